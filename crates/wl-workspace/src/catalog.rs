use std::path::{Path, PathBuf};

use wl_config::CatalogSettings;

use crate::error::CatalogError;
use crate::record::{DisplayOptions, WorkspaceRecord};
use crate::resolve::resolve_from_pointer;

/// Pointer folders removed by an orphan cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
}

impl CleanupReport {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Resolve every pointer folder under `settings.workspace_root`, sorted by
/// display name. A missing or unreadable root yields an empty list.
pub fn scan(settings: &CatalogSettings) -> Vec<WorkspaceRecord> {
    let display = DisplayOptions::from(settings);
    let mut workspaces: Vec<WorkspaceRecord> = pointer_folders(&settings.workspace_root)
        .iter()
        .filter_map(|folder| resolve_from_pointer(folder, display))
        .collect();
    workspaces.sort_by_cached_key(WorkspaceRecord::display_name);
    tracing::info!(
        root = %settings.workspace_root.display(),
        count = workspaces.len(),
        missing = workspaces.iter().filter(|w| !w.exists()).count(),
        "Scanned workspace storage"
    );
    workspaces
}

/// Immediate subdirectories of `root`, symlinked ones included. Entries that
/// cannot be inspected are skipped.
fn pointer_folders(root: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(root = %root.display(), "Cannot read workspace storage: {}", e);
            return Vec::new();
        }
    };
    entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(root = %root.display(), "Skipping unreadable entry: {}", e);
                None
            }
        })
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect()
}

/// The last scan of one workspace storage root, refined in memory.
///
/// `scan` and `clean_up_orphans` touch the filesystem; `visible_workspaces`,
/// `filter` and `find` only read the cached scan.
#[derive(Debug, Clone)]
pub struct WorkspaceCatalog {
    settings: CatalogSettings,
    workspaces: Vec<WorkspaceRecord>,
}

impl WorkspaceCatalog {
    /// An empty catalog. Nothing is read until `scan` is called.
    pub fn new(settings: CatalogSettings) -> Self {
        Self {
            settings,
            workspaces: Vec::new(),
        }
    }

    /// A catalog over records resolved elsewhere, sorted as a scan would be.
    pub fn with_workspaces(settings: CatalogSettings, mut workspaces: Vec<WorkspaceRecord>) -> Self {
        workspaces.sort_by_cached_key(WorkspaceRecord::display_name);
        Self {
            settings,
            workspaces,
        }
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// Rescan the storage root, replacing the cached result.
    pub fn scan(&mut self) -> &[WorkspaceRecord] {
        self.workspaces = scan(&self.settings);
        &self.workspaces
    }

    /// Every record from the last scan, missing ones included.
    pub fn workspaces(&self) -> &[WorkspaceRecord] {
        &self.workspaces
    }

    /// The last scan, without missing projects when `hide_missing` is set.
    pub fn visible_workspaces(&self) -> Vec<&WorkspaceRecord> {
        self.workspaces
            .iter()
            .filter(|w| !self.settings.hide_missing || w.exists())
            .collect()
    }

    /// Visible records whose display name contains `text`, ignoring case.
    /// Blank text matches everything; other text is matched as given.
    pub fn filter(&self, text: &str) -> Vec<&WorkspaceRecord> {
        if text.trim().is_empty() {
            return self.visible_workspaces();
        }
        self.visible_workspaces()
            .into_iter()
            .filter(|w| w.matches(text))
            .collect()
    }

    /// The visible record shown as exactly `display_name`.
    pub fn find(&self, display_name: &str) -> Option<&WorkspaceRecord> {
        self.visible_workspaces()
            .into_iter()
            .find(|w| w.display_name() == display_name)
    }

    /// Delete the pointer folder of every missing project from the last scan,
    /// then rescan. Does nothing unless `clean_up_orphans` is enabled.
    ///
    /// A folder that is already gone counts as removed. Any other failure stops
    /// the cleanup; the catalog is rescanned before the error is returned.
    pub fn clean_up_orphans(&mut self) -> Result<CleanupReport, CatalogError> {
        if !self.settings.clean_up_orphans {
            tracing::debug!("Orphan cleanup disabled in settings");
            return Ok(CleanupReport::default());
        }

        let orphans: Vec<PathBuf> = self
            .workspaces
            .iter()
            .filter(|w| !w.exists())
            .filter_map(|w| w.pointer_folder().map(Path::to_path_buf))
            .collect();

        let mut report = CleanupReport::default();
        for folder in orphans {
            match std::fs::remove_dir_all(&folder) {
                Ok(()) => {
                    tracing::info!(path = %folder.display(), "Removed orphaned pointer folder");
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(path = %folder.display(), "Orphaned pointer folder already gone");
                }
                Err(source) => {
                    tracing::warn!(path = %folder.display(), "Failed to remove orphaned pointer folder: {}", source);
                    self.scan();
                    return Err(CatalogError::Cleanup {
                        path: folder,
                        removed: report.removed,
                        source,
                    });
                }
            }
            report.removed.push(folder);
        }

        self.scan();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn record(path: &str, exists: bool) -> WorkspaceRecord {
        let display = DisplayOptions::default();
        if exists {
            WorkspaceRecord::existing(PathBuf::from(path), None, None, display)
        } else {
            WorkspaceRecord::missing(PathBuf::from(path), Some(PathBuf::from(path)), display)
        }
    }

    fn catalog_with(hide_missing: bool, workspaces: Vec<WorkspaceRecord>) -> WorkspaceCatalog {
        let mut settings = CatalogSettings::new("/storage");
        settings.hide_missing = hide_missing;
        WorkspaceCatalog {
            settings,
            workspaces,
        }
    }

    #[test]
    fn new_catalog_is_empty_until_scanned() {
        let catalog = WorkspaceCatalog::new(CatalogSettings::new("/storage"));
        assert!(catalog.workspaces().is_empty());
    }

    #[test]
    fn scan_of_missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        let settings = CatalogSettings::new(dir.path().join("nope"));
        assert!(scan(&settings).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn pointer_folders_follows_symlinks() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("elsewhere");
        fs::create_dir(&target).unwrap();
        let root = dir.path().join("storage");
        fs::create_dir(&root).unwrap();
        std::os::unix::fs::symlink(&target, root.join("linked")).unwrap();
        assert_eq!(pointer_folders(&root), vec![root.join("linked")]);
    }

    #[test]
    fn pointer_folders_skips_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("b.txt"), "x").unwrap();
        let folders = pointer_folders(dir.path());
        assert_eq!(folders, vec![dir.path().join("a")]);
    }

    #[test]
    fn visible_hides_missing_when_configured() {
        let catalog = catalog_with(
            true,
            vec![record("/src/a", true), record("/src/b", false)],
        );
        let visible = catalog.visible_workspaces();
        assert_eq!(visible.len(), 1);
        assert!(visible.iter().all(|w| w.exists()));
    }

    #[test]
    fn visible_keeps_missing_when_not_hidden() {
        let catalog = catalog_with(
            false,
            vec![record("/src/a", true), record("/src/b", false)],
        );
        assert_eq!(catalog.visible_workspaces().len(), 2);
    }

    #[test]
    fn filter_is_case_insensitive_over_visible() {
        let catalog = catalog_with(
            true,
            vec![
                record("/Bitbucket/inversion-of-control", true),
                record("/Bitbucket/gone", false),
                record("/GitHub/kiln", true),
            ],
        );
        let hits = catalog.filter("BUCKET");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "inversion-of-control");
        assert!(catalog.filter("nomatch").is_empty());
    }

    #[test]
    fn filter_keeps_surrounding_spaces() {
        let catalog = catalog_with(false, vec![record("/src/kiln", true)]);
        assert!(catalog.filter("kiln ").is_empty());
        assert_eq!(catalog.filter(" kiln").len(), 1);
        assert_eq!(catalog.filter("> kiln").len(), 1);
    }

    #[test]
    fn blank_filter_returns_visible_set() {
        let catalog = catalog_with(
            true,
            vec![record("/src/a", true), record("/src/b", false)],
        );
        assert_eq!(catalog.filter(""), catalog.visible_workspaces());
        assert_eq!(catalog.filter("   "), catalog.visible_workspaces());
    }

    #[test]
    fn find_matches_exact_display_name() {
        let catalog = catalog_with(false, vec![record("/src/a", true), record("/src/ab", true)]);
        assert_eq!(catalog.find("src > a").map(|w| w.name()), Some("a".to_string()));
        assert!(catalog.find("src >").is_none());
    }

    #[test]
    fn cleanup_disabled_deletes_nothing() {
        let dir = TempDir::new().unwrap();
        let pointer = dir.path().join("ptr");
        fs::create_dir(&pointer).unwrap();
        let mut catalog = catalog_with(
            false,
            vec![WorkspaceRecord::missing(
                PathBuf::from("/gone"),
                Some(pointer.clone()),
                DisplayOptions::default(),
            )],
        );

        let report = catalog.clean_up_orphans().unwrap();
        assert!(report.is_empty());
        assert!(pointer.exists());
        assert_eq!(catalog.workspaces().len(), 1);
    }

    fn orphan(pointer: PathBuf) -> WorkspaceRecord {
        WorkspaceRecord::missing(PathBuf::from("/gone"), Some(pointer), DisplayOptions::default())
    }

    fn cleaning_catalog(root: &Path, workspaces: Vec<WorkspaceRecord>) -> WorkspaceCatalog {
        let mut settings = CatalogSettings::new(root);
        settings.clean_up_orphans = true;
        WorkspaceCatalog {
            settings,
            workspaces,
        }
    }

    #[test]
    fn cleanup_counts_vanished_folder_as_removed() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("a-ptr");
        fs::create_dir(&present).unwrap();
        let vanished = dir.path().join("b-ptr");
        let mut catalog = cleaning_catalog(
            dir.path(),
            vec![orphan(present.clone()), orphan(vanished.clone())],
        );

        let report = catalog.clean_up_orphans().unwrap();
        assert_eq!(report.removed, vec![present.clone(), vanished]);
        assert!(!present.exists());
        assert!(catalog.workspaces().is_empty());
    }

    #[test]
    fn cleanup_failure_rescans_and_reports_removed() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("a-ptr");
        fs::create_dir(&first).unwrap();
        // A regular file where a pointer folder was expected cannot be removed
        // as a directory.
        let blocked = dir.path().join("b-ptr");
        fs::write(&blocked, "x").unwrap();
        let last = dir.path().join("c-ptr");
        fs::create_dir(&last).unwrap();
        let mut catalog = cleaning_catalog(
            dir.path(),
            vec![orphan(first.clone()), orphan(blocked.clone()), orphan(last.clone())],
        );

        let err = catalog.clean_up_orphans().unwrap_err();
        match err {
            CatalogError::Cleanup { path, removed, .. } => {
                assert_eq!(path, blocked);
                assert_eq!(removed, vec![first.clone()]);
            }
        }
        assert!(!first.exists());
        assert!(last.exists());
        assert!(catalog
            .workspaces()
            .iter()
            .all(|w| w.pointer_folder() != Some(first.as_path())));
    }

    #[test]
    fn cleanup_skips_records_without_pointer() {
        let dir = TempDir::new().unwrap();
        let mut settings = CatalogSettings::new(dir.path());
        settings.clean_up_orphans = true;
        let mut catalog = WorkspaceCatalog {
            settings,
            workspaces: vec![WorkspaceRecord::missing(
                PathBuf::from("/gone"),
                None,
                DisplayOptions::default(),
            )],
        };

        let report = catalog.clean_up_orphans().unwrap();
        assert!(report.is_empty());
    }
}
