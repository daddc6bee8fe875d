use std::path::Path;

use crate::pointer;
use crate::record::{DisplayOptions, WorkspaceRecord};
use crate::vcs;

/// Resolve the workspace a pointer folder refers to. `None` when the pointer
/// cannot be read or names no project folder.
pub fn resolve_from_pointer(
    pointer_folder: &Path,
    display: DisplayOptions,
) -> Option<WorkspaceRecord> {
    let project_path = pointer::project_path(pointer_folder)?;
    resolve_from_path(&project_path, Some(pointer_folder), display)
}

/// Resolve a project folder. A folder that does not exist still produces a
/// (missing) record when it came from a pointer folder, and `None` otherwise.
pub fn resolve_from_path(
    project_path: &Path,
    pointer_folder: Option<&Path>,
    display: DisplayOptions,
) -> Option<WorkspaceRecord> {
    let pointer_folder = pointer_folder.map(Path::to_path_buf);
    if !project_path.is_dir() {
        return pointer_folder.map(|pointer| {
            WorkspaceRecord::missing(project_path.to_path_buf(), Some(pointer), display)
        });
    }
    let repository_url = vcs::repository_url(project_path);
    Some(WorkspaceRecord::existing(
        project_path.to_path_buf(),
        pointer_folder,
        repository_url,
        display,
    ))
}
