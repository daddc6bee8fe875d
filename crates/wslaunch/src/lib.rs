//! Shared helpers used by the `wslaunch` binary.

pub mod picker;

use wl_config::CatalogSettings;
use wl_workspace::{CatalogError, WorkspaceCatalog, WorkspaceRecord};

/// Build-time version string.
///
/// When `WSLAUNCH_VERSION` is provided in the build environment (for example
/// by CI release workflows), that value is used. Otherwise we fall back to the
/// crate package version.
pub const VERSION: &str = match option_env!("WSLAUNCH_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Scan the storage root once, then remove orphans if the settings ask for it.
pub fn open_catalog(settings: &CatalogSettings) -> Result<WorkspaceCatalog, CatalogError> {
    let mut catalog = WorkspaceCatalog::new(settings.clone());
    catalog.scan();
    if settings.clean_up_orphans {
        let report = catalog.clean_up_orphans()?;
        if !report.is_empty() {
            tracing::info!("Removed {} orphaned pointer folders", report.removed.len());
        }
    }
    Ok(catalog)
}

/// Records to list: the visible set, or every scanned record with `all`,
/// narrowed by `filter` when given.
pub fn listing<'a>(
    catalog: &'a WorkspaceCatalog,
    filter: Option<&str>,
    all: bool,
) -> Vec<&'a WorkspaceRecord> {
    let text = filter.unwrap_or_default();
    if all {
        catalog
            .workspaces()
            .iter()
            .filter(|w| text.trim().is_empty() || w.matches(text))
            .collect()
    } else {
        catalog.filter(text)
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No workspace matches {0:?}")]
    NoMatch(String),
    #[error("{query:?} matches {} workspaces:\n  {}", .candidates.len(), .candidates.join("\n  "))]
    Ambiguous {
        query: String,
        candidates: Vec<String>,
    },
}

/// Pick one visible workspace for `query`: an exact display name first, then
/// the only filter match, then the only match whose folder name equals the
/// query ignoring case.
pub fn select<'a>(
    catalog: &'a WorkspaceCatalog,
    query: &str,
) -> Result<&'a WorkspaceRecord, SelectionError> {
    if let Some(exact) = catalog.find(query) {
        return Ok(exact);
    }
    let query = query.trim();
    if query.is_empty() {
        return Err(SelectionError::NoMatch(query.to_string()));
    }
    let hits = catalog.filter(query);
    match hits.as_slice() {
        [] => Err(SelectionError::NoMatch(query.to_string())),
        [only] => Ok(*only),
        _ => {
            let named: Vec<&WorkspaceRecord> = hits
                .iter()
                .copied()
                .filter(|w| w.name().eq_ignore_ascii_case(query))
                .collect();
            match named.as_slice() {
                [only] => Ok(*only),
                _ => Err(SelectionError::Ambiguous {
                    query: query.to_string(),
                    candidates: hits.iter().map(|w| w.display_name()).collect(),
                }),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
