//! Block list files: one uid per line

use crate::Result;
use reqwest::Client;
use std::path::Path;

/// Load uids from an `http(s)://` URL or a local file.
///
/// A local path that does not exist yields an empty list.
pub async fn load_users(source: &str, client: &Client) -> Result<Vec<String>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        tracing::debug!("Downloading block list from {}", source);
        let text = client
            .get(source)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        return Ok(parse_users(&text));
    }

    let path = Path::new(source);
    if !path.is_file() {
        tracing::warn!("Block list file {} does not exist", source);
        return Ok(Vec::new());
    }

    let text = tokio::fs::read_to_string(path).await?;
    Ok(parse_users(&text))
}

/// Trimmed, non-blank lines
pub fn parse_users(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Write uids one per line with a trailing newline
pub fn write_users(path: &Path, users: &[String]) -> Result<()> {
    let mut content = users.join("\n");
    content.push('\n');
    std::fs::write(path, content)?;
    tracing::info!("Wrote {} users to {}", users.len(), path.display());
    Ok(())
}
