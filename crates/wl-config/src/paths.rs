use std::path::{Path, PathBuf};

/// Per-user directories that the default editor and storage paths hang off.
///
/// Use `UserPaths::current()` for production (resolves the running user's
/// directories), or `UserPaths::with_home()` for testing with an isolated
/// directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPaths {
    home: PathBuf,
    config_dir: PathBuf,
    data_local_dir: PathBuf,
}

impl UserPaths {
    /// Directories of the user running this process. Returns an error if the
    /// home directory cannot be determined.
    pub fn current() -> anyhow::Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        let layout = Self::with_home(home);
        Ok(Self {
            config_dir: dirs::config_dir().unwrap_or(layout.config_dir),
            data_local_dir: dirs::data_local_dir().unwrap_or(layout.data_local_dir),
            home: layout.home,
        })
    }

    /// Directories laid out under `home` the way the current platform lays
    /// out a user profile.
    pub fn with_home(home: PathBuf) -> Self {
        let config_dir = home.join(config_relative());
        let data_local_dir = home.join(data_local_relative());
        Self {
            home,
            config_dir,
            data_local_dir,
        }
    }

    /// The same layout re-rooted at another user's home directory, a sibling
    /// of this one. Returns `self` unchanged for the current user.
    pub fn for_user(&self, username: &str) -> Self {
        if self.username().as_deref() == Some(username) {
            return self.clone();
        }
        let root = self.home.parent().unwrap_or(&self.home);
        let home = root.join(username);
        let config_dir = rebase(&self.config_dir, &self.home, &home)
            .unwrap_or_else(|| home.join(config_relative()));
        let data_local_dir = rebase(&self.data_local_dir, &self.home, &home)
            .unwrap_or_else(|| home.join(data_local_relative()));
        Self {
            home,
            config_dir,
            data_local_dir,
        }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Final component of the home directory, which is the account name on
    /// every supported platform.
    pub fn username(&self) -> Option<String> {
        self.home
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
    }

    /// VS Code's per-workspace storage directory.
    pub fn workspace_storage_dir(&self) -> PathBuf {
        self.config_dir
            .join("Code")
            .join("User")
            .join("workspaceStorage")
    }

    /// Default VS Code executable for this user.
    pub fn editor_exe(&self) -> PathBuf {
        if cfg!(windows) {
            self.data_local_dir
                .join("Programs")
                .join("Microsoft VS Code")
                .join("Code.exe")
        } else if cfg!(target_os = "macos") {
            PathBuf::from("/Applications/Visual Studio Code.app/Contents/Resources/app/bin/code")
        } else {
            PathBuf::from("code")
        }
    }
}

fn config_relative() -> &'static Path {
    if cfg!(windows) {
        Path::new("AppData/Roaming")
    } else if cfg!(target_os = "macos") {
        Path::new("Library/Application Support")
    } else {
        Path::new(".config")
    }
}

fn data_local_relative() -> &'static Path {
    if cfg!(windows) {
        Path::new("AppData/Local")
    } else if cfg!(target_os = "macos") {
        Path::new("Library/Application Support")
    } else {
        Path::new(".local/share")
    }
}

fn rebase(path: &Path, from: &Path, to: &Path) -> Option<PathBuf> {
    path.strip_prefix(from).ok().map(|rest| to.join(rest))
}
