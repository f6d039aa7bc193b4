//! Workspace and runner configuration lookup.

use std::path::{Path, PathBuf};

/// Files that mark the root of an independent PHPUnit setup.
pub const PHPUNIT_CONFIG_FILES: &[&str] = &["phpunit.xml", "phpunit.xml.dist"];

/// Walk up from `file_path` to the nearest directory holding one of
/// `marker_files`.
fn find_config_dir(file_path: &Path, marker_files: &[&str]) -> Option<PathBuf> {
    let parent = file_path.parent()?;
    if marker_files
        .iter()
        .any(|file_name| parent.join(file_name).is_file())
    {
        Some(parent.to_path_buf())
    } else {
        find_config_dir(parent, marker_files)
    }
}

/// Nearest directory above the active file with its own PHPUnit config,
/// reported only when it is not the workspace root itself.
///
/// Codeception projects carry no `phpunit.xml`, so the workspace root is
/// assumed and nothing is reported.
#[must_use]
pub fn sub_directory(file_path: &str, workspace_root: &str, use_codeception: bool) -> Option<String> {
    if use_codeception {
        return None;
    }

    let Some(config_dir) = find_config_dir(Path::new(file_path), PHPUNIT_CONFIG_FILES) else {
        log::debug!("no phpunit config above {file_path}");
        return None;
    };
    log::debug!("phpunit config found in {}", config_dir.display());

    if config_dir == Path::new(workspace_root) {
        None
    } else {
        Some(config_dir.to_string_lossy().to_string())
    }
}

/// Resolve a relative path against a base directory, handling ../ and ./
/// components.
pub fn resolve_path(base_dir: &Path, relative_path: &str) -> PathBuf {
    let absolute = if Path::new(relative_path).is_absolute() {
        PathBuf::from(relative_path)
    } else {
        base_dir.join(relative_path)
    };

    let mut components = Vec::new();
    for component in absolute.components() {
        match component {
            std::path::Component::ParentDir => {
                components.pop();
            }
            std::path::Component::Normal(_)
            | std::path::Component::RootDir
            | std::path::Component::Prefix(_) => {
                components.push(component);
            }
            std::path::Component::CurDir => {}
        }
    }

    PathBuf::from_iter(components)
}
