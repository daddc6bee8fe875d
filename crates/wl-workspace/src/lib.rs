pub mod catalog;
pub mod error;
pub mod pointer;
mod read;
pub mod record;
pub mod resolve;
pub mod vcs;

pub use catalog::{scan, CleanupReport, WorkspaceCatalog};
pub use error::{CatalogError, ReadError};
pub use record::{DisplayOptions, RepositoryHost, WorkspaceRecord};
pub use resolve::{resolve_from_path, resolve_from_pointer};
