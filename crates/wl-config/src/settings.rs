use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::CatalogSettings;
use crate::paths::UserPaths;

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Value accepted in path and user fields to mean "use the default".
const DEFAULT_SENTINEL: &str = "default";

fn default_hide_missing() -> bool {
    true
}

fn default_show_repos() -> bool {
    true
}

fn default_font() -> String {
    "Consolas".to_string()
}

fn default_font_size() -> u16 {
    10
}

fn default_x_location() -> i32 {
    10
}

fn default_y_location() -> i32 {
    -160
}

/// On-disk settings, as written by the user. Any field may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub exe_path: Option<String>,
    #[serde(default)]
    pub workspace_path: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default = "default_hide_missing")]
    pub hide_missing: bool,
    #[serde(default)]
    pub clean_up_orphans: bool,
    #[serde(default = "default_show_repos")]
    pub show_repos: bool,
    #[serde(default)]
    pub show_glyphs: bool,
    #[serde(default = "default_font")]
    pub font: String,
    #[serde(default = "default_font_size")]
    pub font_size: u16,
    #[serde(default = "default_x_location")]
    pub x_location: i32,
    #[serde(default = "default_y_location")]
    pub y_location: i32,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            exe_path: None,
            workspace_path: None,
            username: None,
            hide_missing: default_hide_missing(),
            clean_up_orphans: false,
            show_repos: default_show_repos(),
            show_glyphs: false,
            font: default_font(),
            font_size: default_font_size(),
            x_location: default_x_location(),
            y_location: default_y_location(),
        }
    }
}

/// `Some(value)` unless the field is absent or holds the `"default"` sentinel.
fn explicit(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.eq_ignore_ascii_case(DEFAULT_SENTINEL))
}

impl SettingsFile {
    /// Read settings from `path`. A missing file yields the defaults; a file
    /// that exists but does not parse is an error. Files ending in `.toml`
    /// are parsed as TOML, everything else as JSON.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.is_file() {
            tracing::info!(path = %path.display(), "Settings file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let settings = if is_toml(path) {
            toml::from_str(&content)
                .with_context(|| format!("invalid TOML in settings file {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("invalid JSON in settings file {}", path.display()))?
        };
        Ok(settings)
    }

    /// Validate field values. Called automatically by `resolve`.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.font.trim().is_empty() {
            anyhow::bail!("font must not be empty");
        }
        if self.font_size == 0 {
            anyhow::bail!("font_size must be greater than 0");
        }
        if matches!(explicit(&self.exe_path), Some("")) {
            anyhow::bail!("exe_path must not be empty");
        }
        if matches!(explicit(&self.workspace_path), Some("")) {
            anyhow::bail!("workspace_path must not be empty");
        }
        if matches!(explicit(&self.username), Some("")) {
            anyhow::bail!("username must not be empty");
        }
        Ok(())
    }

    /// Replace every `"default"` with a concrete value derived from `paths`.
    pub fn resolve(&self, paths: &UserPaths) -> anyhow::Result<LauncherSettings> {
        self.validate()?;
        let user_paths = match explicit(&self.username) {
            Some(name) => paths.for_user(name),
            None => paths.clone(),
        };
        let username = user_paths.username().unwrap_or_default();
        let exe_path = explicit(&self.exe_path)
            .map(PathBuf::from)
            .unwrap_or_else(|| user_paths.editor_exe());
        let workspace_root = explicit(&self.workspace_path)
            .map(PathBuf::from)
            .unwrap_or_else(|| user_paths.workspace_storage_dir());

        Ok(LauncherSettings {
            exe_path,
            username,
            catalog: CatalogSettings {
                workspace_root,
                hide_missing: self.hide_missing,
                clean_up_orphans: self.clean_up_orphans,
                show_repos: self.show_repos,
                show_glyphs: self.show_glyphs,
            },
            font: self.font.clone(),
            font_size: self.font_size,
            x_location: self.x_location,
            y_location: self.y_location,
        })
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

/// Settings with every default resolved against a concrete user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LauncherSettings {
    pub exe_path: PathBuf,
    pub username: String,
    pub catalog: CatalogSettings,
    pub font: String,
    pub font_size: u16,
    pub x_location: i32,
    pub y_location: i32,
}

impl LauncherSettings {
    /// Load and resolve the settings file at `path` for the current user.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let paths = UserPaths::current()?;
        Self::load_with(path, &paths)
    }

    /// Load and resolve the settings file at `path` against `paths`.
    pub fn load_with(path: &Path, paths: &UserPaths) -> anyhow::Result<Self> {
        SettingsFile::load_from(path)?.resolve(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_paths() -> UserPaths {
        UserPaths::with_home(PathBuf::from("/users/ada"))
    }

    #[test]
    fn default_produces_expected_values() {
        let file = SettingsFile::default();
        assert!(file.hide_missing);
        assert!(!file.clean_up_orphans);
        assert!(file.show_repos);
        assert!(!file.show_glyphs);
        assert_eq!(file.font, "Consolas");
        assert_eq!(file.font_size, 10);
        assert_eq!(file.x_location, 10);
        assert_eq!(file.y_location, -160);
    }

    #[test]
    fn load_with_no_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let file = SettingsFile::load_from(&dir.path().join("settings.json")).unwrap();
        assert!(file.hide_missing);
        assert!(file.exe_path.is_none());
    }

    #[test]
    fn load_full_settings_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{
                "exe_path": "default",
                "workspace_path": "default",
                "username": "default",
                "hide_missing": true,
                "clean_up_orphans": false,
                "show_repos": true,
                "font": "CaskaydiaCove Nerd Font",
                "font_size": 10,
                "show_glyphs": true,
                "x_location": 10,
                "y_location": -160
            }"#,
        )
        .unwrap();

        let settings = LauncherSettings::load_with(&path, &test_paths()).unwrap();
        assert_eq!(settings.exe_path, test_paths().editor_exe());
        assert_eq!(
            settings.catalog.workspace_root,
            test_paths().workspace_storage_dir()
        );
        assert_eq!(settings.username, "ada");
        assert!(settings.catalog.show_glyphs);
        assert_eq!(settings.font, "CaskaydiaCove Nerd Font");
    }

    #[test]
    fn load_with_partial_toml_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            "workspace_path = \"/srv/storage\"\nhide_missing = false\n",
        )
        .unwrap();

        let settings = LauncherSettings::load_with(&path, &test_paths()).unwrap();
        assert_eq!(
            settings.catalog.workspace_root,
            PathBuf::from("/srv/storage")
        );
        assert!(!settings.catalog.hide_missing);
        assert!(settings.catalog.show_repos);
        assert_eq!(settings.font_size, 10);
    }

    #[test]
    fn load_with_invalid_json_returns_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = SettingsFile::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("settings.json"));
    }

    #[test]
    fn load_with_invalid_toml_returns_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "not valid {{{{ toml").unwrap();
        assert!(SettingsFile::load_from(&path).is_err());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let file: SettingsFile =
            serde_json::from_str(r#"{"theme": "dark", "show_repos": false}"#).unwrap();
        assert!(!file.show_repos);
    }

    #[test]
    fn sentinel_is_case_insensitive() {
        let file = SettingsFile {
            workspace_path: Some("DEFAULT".to_string()),
            ..SettingsFile::default()
        };
        let settings = file.resolve(&test_paths()).unwrap();
        assert_eq!(
            settings.catalog.workspace_root,
            test_paths().workspace_storage_dir()
        );
    }

    #[test]
    fn username_rebases_default_paths() {
        let file = SettingsFile {
            username: Some("grace".to_string()),
            ..SettingsFile::default()
        };
        let settings = file.resolve(&test_paths()).unwrap();
        assert_eq!(settings.username, "grace");
        assert!(settings
            .catalog
            .workspace_root
            .starts_with(Path::new("/users/grace")));
    }

    #[test]
    fn explicit_paths_win_over_username() {
        let file = SettingsFile {
            username: Some("grace".to_string()),
            workspace_path: Some("/srv/storage".to_string()),
            exe_path: Some("/opt/code/bin/code".to_string()),
            ..SettingsFile::default()
        };
        let settings = file.resolve(&test_paths()).unwrap();
        assert_eq!(
            settings.catalog.workspace_root,
            PathBuf::from("/srv/storage")
        );
        assert_eq!(settings.exe_path, PathBuf::from("/opt/code/bin/code"));
    }

    #[test]
    fn validate_rejects_zero_font_size() {
        let file = SettingsFile {
            font_size: 0,
            ..SettingsFile::default()
        };
        assert!(file.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_font() {
        let file = SettingsFile {
            font: "  ".to_string(),
            ..SettingsFile::default()
        };
        assert!(file.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_workspace_path() {
        let file = SettingsFile {
            workspace_path: Some(String::new()),
            ..SettingsFile::default()
        };
        assert!(file.validate().is_err());
    }

    #[test]
    fn toml_roundtrip() {
        let file = SettingsFile {
            exe_path: Some("/opt/code".to_string()),
            ..SettingsFile::default()
        };
        let serialized = toml::to_string(&file).unwrap();
        let deserialized: SettingsFile = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.exe_path.as_deref(), Some("/opt/code"));
        assert_eq!(deserialized.y_location, -160);
    }
}
