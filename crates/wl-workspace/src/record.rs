//! A single discovered workspace and the name it is shown under.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

use wl_config::CatalogSettings;

/// Prefix for URLs on a known repository host. A Nerd Font code point
/// followed by a space; both known hosts share it.
pub const KNOWN_HOST_GLYPH: &str = "\u{f408} ";

const MISSING_SUFFIX: &str = " (missing)";

/// Display flags copied onto every record at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub show_repository: bool,
    pub show_glyph: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_repository: true,
            show_glyph: false,
        }
    }
}

impl From<&CatalogSettings> for DisplayOptions {
    fn from(settings: &CatalogSettings) -> Self {
        Self {
            show_repository: settings.show_repos,
            show_glyph: settings.show_glyphs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryHost {
    GitHub,
    Bitbucket,
    Other,
}

impl RepositoryHost {
    pub fn classify(url: &str) -> Self {
        let url = url.to_lowercase();
        if url.contains("github.com") {
            RepositoryHost::GitHub
        } else if url.contains("bitbucket.org") {
            RepositoryHost::Bitbucket
        } else {
            RepositoryHost::Other
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            RepositoryHost::GitHub | RepositoryHost::Bitbucket => KNOWN_HOST_GLYPH,
            RepositoryHost::Other => "",
        }
    }
}

/// One previously-opened workspace, as of the scan that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRecord {
    pointer_folder: Option<PathBuf>,
    project_path: PathBuf,
    exists: bool,
    repository_url: Option<String>,
    display: DisplayOptions,
}

impl WorkspaceRecord {
    /// A record for a project folder found on disk.
    pub fn existing(
        project_path: PathBuf,
        pointer_folder: Option<PathBuf>,
        repository_url: Option<String>,
        display: DisplayOptions,
    ) -> Self {
        Self {
            pointer_folder,
            project_path,
            exists: true,
            repository_url,
            display,
        }
    }

    /// A record for a project folder that is gone. Carries no repository URL.
    pub fn missing(
        project_path: PathBuf,
        pointer_folder: Option<PathBuf>,
        display: DisplayOptions,
    ) -> Self {
        Self {
            pointer_folder,
            project_path,
            exists: false,
            repository_url: None,
            display,
        }
    }

    pub fn pointer_folder(&self) -> Option<&Path> {
        self.pointer_folder.as_deref()
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn repository_url(&self) -> Option<&str> {
        self.repository_url.as_deref()
    }

    pub fn repository_host(&self) -> Option<RepositoryHost> {
        self.repository_url.as_deref().map(RepositoryHost::classify)
    }

    pub fn show_repository(&self) -> bool {
        self.display.show_repository
    }

    pub fn show_glyph(&self) -> bool {
        self.display.show_glyph
    }

    /// Path segments split on both `/` and `\`, so Windows paths decode the
    /// same way on every platform.
    fn segments(&self) -> Vec<String> {
        self.project_path
            .to_string_lossy()
            .split(['/', '\\'])
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Final path segment.
    pub fn name(&self) -> String {
        self.segments().pop().unwrap_or_default()
    }

    /// Second-to-last path segment. A drive prefix (`d:`) in that position, or
    /// a path with no parent at all, falls back to the uppercased first
    /// segment of the raw path. A project directly under a UNC share
    /// (`\\host\share\proj`) uses the uppercased share root instead.
    pub fn parent_name(&self) -> String {
        let segments = self.segments();
        if segments.len() == 3 {
            if let Some(sep) = unc_separator(&self.project_path.to_string_lossy()) {
                return format!("{sep}{sep}{}{sep}{}", segments[0], segments[1]).to_uppercase();
            }
        }
        if segments.len() >= 2 {
            let parent = &segments[segments.len() - 2];
            let is_drive_root = segments.len() == 2 && is_drive(parent);
            if !is_drive_root {
                return parent.clone();
            }
        }
        self.project_path
            .to_string_lossy()
            .split(['/', '\\'])
            .next()
            .unwrap_or_default()
            .to_uppercase()
    }

    /// `"{parent} > {name}"`, then the repository segment, then the missing
    /// suffix, always in that order.
    pub fn display_name(&self) -> String {
        let mut display = format!("{} > {}", self.parent_name(), self.name());
        if let Some(url) = self.repository_url.as_deref() {
            if self.display.show_repository {
                let glyph = if self.display.show_glyph {
                    RepositoryHost::classify(url).glyph()
                } else {
                    ""
                };
                display.push_str(" | ");
                display.push_str(glyph);
                display.push_str(url);
            }
        }
        if !self.exists {
            display.push_str(MISSING_SUFFIX);
        }
        display
    }

    /// Case-insensitive substring match on the display name.
    pub fn matches(&self, needle: &str) -> bool {
        self.display_name()
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

/// Separator a UNC path (`//host/...` or `\\host\...`) starts with.
fn unc_separator(raw: &str) -> Option<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), Some(c)) if is_separator(a) && a == b && !is_separator(c) => Some(a),
        _ => None,
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

fn is_drive(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

impl Serialize for WorkspaceRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("WorkspaceRecord", 8)?;
        state.serialize_field("display_name", &self.display_name())?;
        state.serialize_field("name", &self.name())?;
        state.serialize_field("parent_name", &self.parent_name())?;
        state.serialize_field("project_path", &self.project_path)?;
        state.serialize_field("pointer_folder", &self.pointer_folder)?;
        state.serialize_field("exists", &self.exists)?;
        state.serialize_field("repository_url", &self.repository_url)?;
        state.serialize_field("repository_host", &self.repository_host())?;
        state.end()
    }
}
