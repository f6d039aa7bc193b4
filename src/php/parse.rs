use std::sync::LazyLock;

use regex::Regex;

use crate::document::LineSource;

/// Optional visibility, `function`, an ASCII name, then an opening
/// parenthesis.
static METHOD_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:public|private|protected)?\s*function\s*((?-u:\w)+)\s*\(.*$")
        .expect("method declaration pattern")
});

/// Name of the nearest method declared at or above `cursor_line`.
///
/// Plain line matching: braces, comments and strings are not understood, so a
/// signature inside a block comment or heredoc above the cursor is picked up
/// like a real one, and `static` or `abstract` methods are not. Line 0 is never
/// examined.
pub fn find_test_method<D>(document: &D, cursor_line: usize) -> Option<String>
where
    D: LineSource + ?Sized,
{
    let mut line = cursor_line;
    while line > 0 {
        if let Some(captures) = document
            .line_at(line)
            .and_then(|text| METHOD_DECLARATION.captures(text))
        {
            return Some(captures[1].to_string());
        }
        line -= 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextDocument;

    const CALCULATOR_TEST: &str = r"<?php

namespace Tests;

use PHPUnit\Framework\TestCase;

class CalculatorTest extends TestCase
{
    public function testAdd(): void
    {
        $this->assertSame(4, 2 + 2);
    }

    /** @dataProvider subtractions */
    function test_subtract($a, $b, $expected)
    {
        $this->assertSame($expected, $a - $b);
    }

    private function helper()
    {
        return 1;
    }
}
";

    #[test]
    fn test_cursor_inside_method_body() {
        let doc = TextDocument::from_text(CALCULATOR_TEST);
        assert_eq!(find_test_method(&doc, 10), Some("testAdd".to_string()));
        assert_eq!(find_test_method(&doc, 16), Some("test_subtract".to_string()));
    }

    #[test]
    fn test_cursor_on_declaration_line() {
        let doc = TextDocument::from_text(CALCULATOR_TEST);
        assert_eq!(find_test_method(&doc, 8), Some("testAdd".to_string()));
    }

    #[test]
    fn test_cursor_between_methods_takes_the_one_above() {
        let doc = TextDocument::from_text(CALCULATOR_TEST);
        assert_eq!(find_test_method(&doc, 13), Some("testAdd".to_string()));
        assert_eq!(find_test_method(&doc, 22), Some("helper".to_string()));
    }

    #[test]
    fn test_cursor_above_first_method() {
        let doc = TextDocument::from_text(CALCULATOR_TEST);
        assert_eq!(find_test_method(&doc, 6), None);
        assert_eq!(find_test_method(&doc, 0), None);
    }

    #[test]
    fn test_declaration_on_first_line_is_not_examined() {
        let lines = ["function testTop() {", "    $x = 1;"];
        assert_eq!(find_test_method(&lines[..], 1), None);
    }

    #[test]
    fn test_signature_like_lines_above_cursor() {
        let lines = [
            "<?php",
            "    public function testReal()",
            "    {",
            "    // function testOld()",
            "        $this->assertTrue(true);",
        ];
        assert_eq!(find_test_method(&lines[..], 4), Some("testReal".to_string()));

        let lines = [
            "<?php",
            "    public function testReal()",
            "    {",
            "    function testOld() {} // disabled",
            "        $this->assertTrue(true);",
        ];
        assert_eq!(find_test_method(&lines[..], 4), Some("testOld".to_string()));
    }

    #[test]
    fn test_static_and_closures_are_skipped() {
        let lines = [
            "<?php",
            "    public function testOuter()",
            "    {",
            "        $fn = function ($x) {",
            "    public static function provider()",
            "        return 1;",
        ];
        assert_eq!(find_test_method(&lines[..], 5), Some("testOuter".to_string()));
    }

    #[test]
    fn test_non_ascii_names_are_skipped() {
        let lines = [
            "<?php",
            "    public function testPlain()",
            "    {",
            "    public function testÄpfel()",
            "        $this->assertTrue(true);",
        ];
        assert_eq!(find_test_method(&lines[..], 4), Some("testPlain".to_string()));

        let lines = ["<?php", "    public function testÄpfel()", "        $x = 1;"];
        assert_eq!(find_test_method(&lines[..], 2), None);
    }

    #[test]
    fn test_cursor_past_end_of_document() {
        let lines = ["<?php", "    public function testLast()", "    {", "    }"];
        assert_eq!(find_test_method(&lines[..], 40), Some("testLast".to_string()));
    }
}
