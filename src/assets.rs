use std::io::ErrorKind;
use std::path::Path;

use crate::error::Result;

/// URL prefix the components directory is served under.
pub const COMPONENTS_URL_PREFIX: &str = "/components";

/// Lists the entry script of every front-end component.
///
/// Each sub-directory `name` of `components_dir` contributes
/// `/components/name/name.js`. Entries are sorted by name; plain files are
/// skipped. A missing directory yields an empty list.
///
/// # Arguments
///
/// * `components_dir` - The directory holding one folder per component.
///
/// # Returns
///
/// A `Result` containing the script paths.
pub async fn js_components(components_dir: &Path) -> Result<Vec<String>> {
    let mut entries = match tokio::fs::read_dir(components_dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("Components directory {} not found", components_dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    Ok(names
        .into_iter()
        .map(|name| format!("{COMPONENTS_URL_PREFIX}/{name}/{name}.js"))
        .collect())
}
