use crate::LaunchError;

/// Open `url` with the system's default browser.
pub fn open_repository(url: &str) -> Result<(), LaunchError> {
    webbrowser::open(url).map_err(|source| LaunchError::Browser {
        url: url.to_string(),
        source,
    })?;
    tracing::info!(url = %url, "Opened repository in browser");
    Ok(())
}
