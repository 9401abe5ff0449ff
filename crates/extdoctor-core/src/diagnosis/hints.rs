//! File name heuristics and recommendation texts.

use std::path::Path;

/// Tokens found in names of repository source downloads.
const SOURCE_ARCHIVE_TOKENS: [&str; 5] = [
    "-main.zip",
    "-master.zip",
    "source code",
    "archive",
    "refs-heads",
];

pub const LEGACY_INSTALL_PATH: &str =
    "Recommended install path: Edit > Preferences > Add-ons > Install from Disk (legacy add-on).";

pub const EXTENSION_INSTALL_PATH: &str = "Recommended install path: Edit > Preferences > Extensions > Install from Disk (extension package).";

/// Returns whether the file name looks like a GitHub/GitLab source download.
///
/// Only the file name is considered, never the archive contents.
pub fn looks_like_source_archive(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_lowercase();
    SOURCE_ARCHIVE_TOKENS
        .iter()
        .any(|token| name.contains(token))
}

/// Returns whether the path carries a `.zip` suffix, ignoring case.
pub fn has_zip_suffix(path: &Path) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(".zip")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_archive_names() {
        for name in [
            "my-addon-main.zip",
            "my-addon-MASTER.zip",
            "Source code (zip).zip",
            "archive.zip",
            "addon-refs-heads-dev.zip",
            "/downloads/nested/repo-main.zip",
        ] {
            assert!(looks_like_source_archive(Path::new(name)), "{name}");
        }
    }

    #[test]
    fn test_release_archive_names() {
        for name in ["my_addon-1.2.0.zip", "extension.zip", "main.zip"] {
            assert!(!looks_like_source_archive(Path::new(name)), "{name}");
        }
    }

    #[test]
    fn test_heuristic_ignores_directories() {
        assert!(!looks_like_source_archive(Path::new(
            "/home/user/archive/addon.zip"
        )));
    }

    #[test]
    fn test_zip_suffix() {
        assert!(has_zip_suffix(Path::new("addon.zip")));
        assert!(has_zip_suffix(Path::new("ADDON.ZIP")));
        assert!(!has_zip_suffix(Path::new("addon.tar.gz")));
        assert!(!has_zip_suffix(Path::new("addon.zip.bak")));
    }
}
