use std::path::{Path, PathBuf};

use clap::Args;
use serde::Deserialize;

use crate::{error::BPError, workspace};

/// Workspace-level settings file, next to `composer.json`.
pub const TOML_FILE_NAME: &str = ".better-phpunit.toml";
/// Editor settings file holding `better-phpunit.*` keys.
pub const EDITOR_SETTINGS_FILE: &str = ".vscode/settings.json";

/// Settings consumed by the command builder, read once per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Appended to the binary when running the whole suite
    pub suite_suffix: Option<String>,
    /// Appended verbatim to every command
    pub command_suffix: Option<String>,
    /// Explicit `--configuration` path, wins over a discovered sub directory
    pub xml_config_filepath: Option<String>,
    /// Run `codecept run` instead of `phpunit`
    pub use_codeception: bool,
    /// Replaces the `vendor/bin/phpunit` lookup
    pub phpunit_binary: Option<String>,
}

/// One source of settings. Unset fields leave lower layers untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsLayer {
    pub suite_suffix: Option<String>,
    pub command_suffix: Option<String>,
    pub xml_config_filepath: Option<String>,
    pub use_codeception: Option<bool>,
    pub phpunit_binary: Option<String>,
}

/// The `better-phpunit.*` keys of an editor settings file. JSON `null`
/// deserializes to `None`.
#[derive(Debug, Default, Deserialize)]
struct EditorSettings {
    #[serde(rename = "better-phpunit.suiteSuffix", default)]
    suite_suffix: Option<String>,
    #[serde(rename = "better-phpunit.commandSuffix", default)]
    command_suffix: Option<String>,
    #[serde(rename = "better-phpunit.xmlConfigFilepath", default)]
    xml_config_filepath: Option<String>,
    #[serde(rename = "better-phpunit.useCodeception", default)]
    use_codeception: Option<bool>,
    #[serde(rename = "better-phpunit.phpunitBinary", default)]
    phpunit_binary: Option<String>,
}

impl From<EditorSettings> for SettingsLayer {
    fn from(editor: EditorSettings) -> Self {
        Self {
            suite_suffix: editor.suite_suffix,
            command_suffix: editor.command_suffix,
            xml_config_filepath: editor.xml_config_filepath,
            use_codeception: editor.use_codeception,
            phpunit_binary: editor.phpunit_binary,
        }
    }
}

/// Settings overrides accepted on the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Extra arguments appended when running the whole suite
    #[arg(long, allow_hyphen_values = true)]
    pub suite_suffix: Option<String>,

    /// Extra arguments appended to every command
    #[arg(long, allow_hyphen_values = true)]
    pub command_suffix: Option<String>,

    /// Explicit path passed to `--configuration`
    #[arg(long)]
    pub xml_config_filepath: Option<String>,

    /// Use Codeception (`vendor/bin/codecept run`) instead of PHPUnit
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub use_codeception: Option<bool>,

    /// Runner binary to use instead of `vendor/bin/phpunit`
    #[arg(long)]
    pub phpunit_binary: Option<String>,

    /// Ignore settings files and use only command line flags
    #[arg(long)]
    pub no_config: bool,
}

impl From<&SettingsArgs> for SettingsLayer {
    fn from(args: &SettingsArgs) -> Self {
        Self {
            suite_suffix: args.suite_suffix.clone(),
            command_suffix: args.command_suffix.clone(),
            xml_config_filepath: args.xml_config_filepath.clone(),
            use_codeception: args.use_codeception,
            phpunit_binary: args.phpunit_binary.clone(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl SettingsLayer {
    /// Read a TOML layer. A missing file is not an error.
    pub fn from_toml_file(path: &Path) -> Result<Option<Self>, BPError> {
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        let layer = toml::from_str::<SettingsLayer>(&content).map_err(|e| {
            BPError::SettingsParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        Ok(Some(layer))
    }

    /// Read the `better-phpunit.*` keys from an editor settings file.
    ///
    /// Editor settings files are often JSON with comments, which this does not
    /// parse; such a file is skipped with a warning.
    pub fn from_editor_settings(path: &Path) -> Result<Option<Self>, BPError> {
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<EditorSettings>(&content) {
            Ok(editor) => Ok(Some(editor.into())),
            Err(e) => {
                log::warn!("skipping {}: {e}", path.display());
                Ok(None)
            }
        }
    }
}

impl Settings {
    /// Overlay `layer` on top of the current values.
    #[must_use]
    pub fn merge(mut self, layer: SettingsLayer) -> Self {
        if let Some(v) = layer.suite_suffix {
            self.suite_suffix = non_empty(Some(v));
        }
        if let Some(v) = layer.command_suffix {
            self.command_suffix = non_empty(Some(v));
        }
        if let Some(v) = layer.xml_config_filepath {
            self.xml_config_filepath = non_empty(Some(v));
        }
        if let Some(v) = layer.use_codeception {
            self.use_codeception = v;
        }
        if let Some(v) = layer.phpunit_binary {
            self.phpunit_binary = non_empty(Some(v));
        }
        self
    }

    /// Settings files in priority order, lowest first.
    #[must_use]
    pub fn layer_paths(workspace_root: &Path) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(user_file) = user_settings_path() {
            paths.push(user_file);
        }
        paths.push(workspace_root.join(EDITOR_SETTINGS_FILE));
        paths.push(workspace_root.join(TOML_FILE_NAME));
        paths
    }

    /// Load every settings layer for `workspace_root`, then apply `overrides`.
    pub fn load(workspace_root: &Path, overrides: &SettingsArgs) -> Result<Self, BPError> {
        let settings = if overrides.no_config {
            log::debug!("settings files ignored (--no-config)");
            Settings::default()
        } else {
            Self::from_files(&Self::layer_paths(workspace_root))?
        };

        Ok(settings.merge(overrides.into()))
    }

    /// Merge the given settings files in order. `.json` files are read as
    /// editor settings, anything else as TOML.
    pub fn from_files(paths: &[PathBuf]) -> Result<Self, BPError> {
        let mut settings = Settings::default();
        for path in paths {
            let layer = if path.extension().is_some_and(|ext| ext == "json") {
                SettingsLayer::from_editor_settings(path)?
            } else {
                SettingsLayer::from_toml_file(path)?
            };
            if let Some(layer) = layer {
                log::debug!("settings layer {}: {layer:?}", path.display());
                settings = settings.merge(layer);
            }
        }
        Ok(settings)
    }

    /// Validate settings and return warnings.
    #[must_use]
    pub fn validate(&self, workspace_root: &Path) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(binary) = &self.phpunit_binary {
            // A binary with arguments (`docker compose exec app phpunit`) is
            // checked by its first word only.
            let program = binary.split_whitespace().next().unwrap_or(binary);
            let path = Path::new(program);
            if path.is_absolute() && !path.exists() {
                warnings.push(format!("phpunitBinary '{program}' does not exist"));
            }
            if !path.is_absolute() && which::which(program).is_err() {
                warnings.push(format!("phpunitBinary '{program}' not found in PATH"));
            }
        }

        if let Some(config) = &self.xml_config_filepath {
            let resolved = workspace::resolve_path(workspace_root, config);
            if !resolved.exists() {
                warnings.push(format!(
                    "xmlConfigFilepath '{config}' does not exist ({})",
                    resolved.display()
                ));
            }
        }

        warnings
    }
}

fn user_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("better-phpunit").join("settings.toml"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn workspace_only(root: &Path) -> Settings {
        Settings::from_files(&[root.join(EDITOR_SETTINGS_FILE), root.join(TOML_FILE_NAME)])
            .unwrap()
    }

    #[test]
    fn test_merge_overrides_field_by_field() {
        let base = Settings {
            suite_suffix: Some("--testsuite unit".to_string()),
            command_suffix: Some("--colors".to_string()),
            ..Settings::default()
        };
        let merged = base.merge(SettingsLayer {
            command_suffix: Some("--stop-on-failure".to_string()),
            use_codeception: Some(true),
            ..SettingsLayer::default()
        });
        assert_eq!(merged.suite_suffix.as_deref(), Some("--testsuite unit"));
        assert_eq!(merged.command_suffix.as_deref(), Some("--stop-on-failure"));
        assert!(merged.use_codeception);
        assert_eq!(merged.phpunit_binary, None);
    }

    #[test]
    fn test_merge_empty_string_unsets() {
        let base = Settings {
            xml_config_filepath: Some("phpunit.xml".to_string()),
            ..Settings::default()
        };
        let merged = base.merge(SettingsLayer {
            xml_config_filepath: Some(String::new()),
            ..SettingsLayer::default()
        });
        assert_eq!(merged.xml_config_filepath, None);
    }

    #[test]
    fn test_editor_settings_keys() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join(".vscode")).unwrap();
        fs::write(
            root.path().join(EDITOR_SETTINGS_FILE),
            r#"{
                "editor.tabSize": 4,
                "better-phpunit.commandSuffix": "--colors=always",
                "better-phpunit.xmlConfigFilepath": null,
                "better-phpunit.useCodeception": false
            }"#,
        )
        .unwrap();

        let settings = workspace_only(root.path());
        assert_eq!(settings.command_suffix.as_deref(), Some("--colors=always"));
        assert_eq!(settings.xml_config_filepath, None);
        assert!(!settings.use_codeception);
    }

    #[test]
    fn test_editor_settings_with_comments_are_skipped() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join(".vscode")).unwrap();
        fs::write(
            root.path().join(EDITOR_SETTINGS_FILE),
            "{\n  // tests\n  \"better-phpunit.commandSuffix\": \"--debug\"\n}",
        )
        .unwrap();

        assert_eq!(workspace_only(root.path()), Settings::default());
    }

    #[test]
    fn test_toml_layer_wins_over_editor_settings() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join(".vscode")).unwrap();
        fs::write(
            root.path().join(EDITOR_SETTINGS_FILE),
            r#"{"better-phpunit.phpunitBinary": "phpunit", "better-phpunit.suiteSuffix": "--testsuite all"}"#,
        )
        .unwrap();
        fs::write(
            root.path().join(TOML_FILE_NAME),
            "phpunitBinary = \"docker compose exec app vendor/bin/phpunit\"\n",
        )
        .unwrap();

        let settings = workspace_only(root.path());
        assert_eq!(
            settings.phpunit_binary.as_deref(),
            Some("docker compose exec app vendor/bin/phpunit")
        );
        assert_eq!(settings.suite_suffix.as_deref(), Some("--testsuite all"));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let root = TempDir::new().unwrap();
        let path = root.path().join(TOML_FILE_NAME);
        fs::write(&path, "useCodeception = \"maybe\"\n").unwrap();

        let err = SettingsLayer::from_toml_file(&path).unwrap_err();
        assert!(matches!(err, BPError::SettingsParse { .. }));
    }

    #[test]
    fn test_load_without_config_uses_flags_only() {
        let root = TempDir::new().unwrap();
        fs::write(
            root.path().join(TOML_FILE_NAME),
            "commandSuffix = \"--colors\"\n",
        )
        .unwrap();
        let args = SettingsArgs {
            use_codeception: Some(true),
            no_config: true,
            ..SettingsArgs::default()
        };

        let settings = Settings::load(root.path(), &args).unwrap();
        assert_eq!(settings.command_suffix, None);
        assert!(settings.use_codeception);
    }

    #[test]
    fn test_validate_reports_missing_paths() {
        let root = TempDir::new().unwrap();
        let settings = Settings {
            phpunit_binary: Some("/nowhere/bin/phpunit".to_string()),
            xml_config_filepath: Some("config/phpunit.xml".to_string()),
            ..Settings::default()
        };
        let warnings = settings.validate(root.path());
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("does not exist"));
        assert!(warnings[1].contains("config/phpunit.xml"));
    }

    #[test]
    fn test_validate_accepts_existing_config() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("phpunit.xml"), "<phpunit/>").unwrap();
        let settings = Settings {
            xml_config_filepath: Some("phpunit.xml".to_string()),
            ..Settings::default()
        };
        assert!(settings.validate(root.path()).is_empty());
    }
}
