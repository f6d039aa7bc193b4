//! Fragments of the runner command line.

use std::path::Path;

use crate::{config::Settings, platform::Platform};

const PHPUNIT_STUB: &str = "vendor/bin/phpunit";
const CODECEPT_STUB: &str = "vendor/bin/codecept";

/// Forward slashes only, spaces escaped for the shell.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/").replace(' ', "\\ ")
}

fn join(base: &str, relative: &str) -> String {
    Path::new(base).join(relative).to_string_lossy().to_string()
}

fn run_option(settings: &Settings) -> &'static str {
    if settings.use_codeception { " run" } else { "" }
}

/// Runner executable, rooted at `root_dir` unless a binary is configured.
#[must_use]
pub fn binary(settings: &Settings, platform: Platform, root_dir: &str) -> String {
    if let Some(configured) = &settings.phpunit_binary {
        return format!("{configured}{}", run_option(settings));
    }

    let stub = if settings.use_codeception {
        CODECEPT_STUB
    } else {
        PHPUNIT_STUB
    };
    let stub = if platform.is_windows() {
        format!("{stub}.bat")
    } else {
        stub.to_string()
    };

    format!(
        "{}{}",
        normalize_path(&join(root_dir, &stub)),
        run_option(settings)
    )
}

/// ` --configuration <path>`, or empty when neither an explicit path nor a
/// sub directory is known.
#[must_use]
pub fn configuration(settings: &Settings, sub_directory: Option<&str>) -> String {
    if let Some(explicit) = &settings.xml_config_filepath {
        return format!(" --configuration {explicit}");
    }
    sub_directory
        .map(|dir| {
            format!(
                " --configuration {}",
                normalize_path(&join(dir, "phpunit.xml"))
            )
        })
        .unwrap_or_default()
}

/// Filter clause selecting `method`.
///
/// The POSIX form tolerates the ` with data set ...` suffix PHPUnit adds for
/// data providers. The Windows form stops at the method name.
#[must_use]
pub fn filter(settings: &Settings, platform: Platform, method: Option<&str>) -> String {
    let Some(method) = method else {
        return String::new();
    };
    if settings.use_codeception {
        format!(":{method}")
    } else if platform.is_windows() {
        format!(" --filter '^.*::{method}'")
    } else {
        format!(" --filter '^.*::{method}( .*)?$'")
    }
}

#[must_use]
pub fn suite_suffix(settings: &Settings) -> String {
    settings
        .suite_suffix
        .as_ref()
        .map(|s| format!(" {s}"))
        .unwrap_or_default()
}

#[must_use]
pub fn suffix(settings: &Settings) -> String {
    settings
        .command_suffix
        .as_ref()
        .map(|s| format!(" {s}"))
        .unwrap_or_default()
}
