//! Reads component source from a file or stdin

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;

/// How long to wait for piped input before giving up
pub const STDIN_TIMEOUT: Duration = Duration::from_secs(5);

/// `None` and `-` read stdin; anything else is a path.
pub async fn read_source(input: Option<&str>) -> Result<String> {
    match input {
        None | Some("-") => read_with_timeout(tokio::io::stdin(), STDIN_TIMEOUT).await,
        Some(path) => tokio::fs::read_to_string(Path::new(path))
            .await
            .with_context(|| format!("Failed to read component source {}", path)),
    }
}

pub async fn read_with_timeout<R: AsyncRead + Unpin>(mut reader: R, wait: Duration) -> Result<String> {
    let mut source = String::new();
    match timeout(wait, reader.read_to_string(&mut source)).await {
        Ok(result) => {
            result.context("Failed to read component source from stdin")?;
        }
        Err(_) => bail!("No component source on stdin after {}s", wait.as_secs()),
    }
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "const Badge = () => <span />;").unwrap();

        let source = read_source(file.path().to_str()).await.unwrap();
        assert_eq!(source, "const Badge = () => <span />;");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let error = read_source(Some("/nonexistent/Badge.js")).await.unwrap_err();
        assert!(error.to_string().contains("/nonexistent/Badge.js"));
    }

    #[tokio::test]
    async fn test_reads_piped_input() {
        let source = read_with_timeout(&b"export default Badge;"[..], STDIN_TIMEOUT).await.unwrap();
        assert_eq!(source, "export default Badge;");
    }

    #[tokio::test]
    async fn test_gives_up_on_silent_input() {
        let (_writer, reader) = tokio::io::duplex(64);
        let error = read_with_timeout(reader, Duration::from_millis(50)).await.unwrap_err();
        assert!(error.to_string().starts_with("No component source on stdin"));
    }
}
