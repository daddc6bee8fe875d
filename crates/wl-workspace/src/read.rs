use crate::error::ReadError;
use std::path::Path;

/// Max size for `workspace.json` and `.git/config`: 1 MB
pub(crate) const MAX_METADATA_SIZE: u64 = 1024 * 1024;

/// Read a small text file, refusing anything that is not a regular file or is
/// larger than `max_size`. Invalid UTF-8 is replaced rather than rejected.
pub(crate) fn read_text(path: &Path, max_size: u64) -> Result<String, ReadError> {
    let metadata = std::fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(ReadError::NotAFile);
    }
    let size = metadata.len();
    if size > max_size {
        return Err(ReadError::FileTooLarge {
            size,
            max: max_size,
        });
    }
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).to_string())
}
