use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// `removed` lists the folders deleted before the failure. The catalog
    /// has already been rescanned when this is returned.
    #[error(
        "Failed to remove orphaned pointer folder {} ({} removed before the failure): {source}",
        path.display(),
        removed.len()
    )]
    Cleanup {
        path: PathBuf,
        removed: Vec<PathBuf>,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::Cleanup { .. } => "CATALOG_CLEANUP_FAILED",
        }
    }
}

/// Why a metadata or config file was not read. Never surfaced past the
/// resolver, which treats every variant as "no value".
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("Not a file")]
    NotAFile,
    #[error("File too large: {size} bytes (max {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
