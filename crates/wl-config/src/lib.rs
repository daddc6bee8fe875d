pub mod catalog;
pub mod paths;
pub mod settings;

pub use catalog::CatalogSettings;
pub use paths::UserPaths;
pub use settings::{LauncherSettings, SettingsFile, DEFAULT_SETTINGS_FILE};
