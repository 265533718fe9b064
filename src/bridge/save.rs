//! Save-to-disk dispatch over the recognized content shapes

use std::path::{Path, PathBuf};

use base64::Engine as _;

use super::{download_to_path, DialogOptions};
use crate::error::BridgeError;

/// Content accepted by [`save_content`], decided once at the call boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveContent {
    /// Raw bytes already in memory.
    Bytes(Vec<u8>),
    /// An http(s) URL to fetch.
    Url(String),
    /// A base64 `data:` URL carrying the payload inline.
    DataUrl(String),
}

impl SaveContent {
    /// Classify a string as one of the recognized URL forms.
    ///
    /// Strings matching neither form are rejected immediately, before any
    /// file-system access.
    pub fn classify(value: &str) -> Result<Self, BridgeError> {
        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(Self::Url(value.to_string()))
        } else if base64_payload(value).is_some() {
            Ok(Self::DataUrl(value.to_string()))
        } else {
            Err(BridgeError::UnknownContent)
        }
    }
}

/// Extract the base64 payload of a `data:<mime>;base64,<payload>` URL.
fn base64_payload(value: &str) -> Option<&str> {
    let rest = value.strip_prefix("data:")?;
    let (_mime, payload) = rest.split_once(";base64,")?;
    Some(payload)
}

/// Ask the user where to save, then write `content` there.
///
/// Resolves to the chosen path, or `Ok(None)` if the dialog is cancelled.
pub async fn save_content(
    content: SaveContent,
    suggested_name: &str,
    options: &DialogOptions,
) -> Result<Option<PathBuf>, BridgeError> {
    let Some(handle) = options.to_save_dialog(suggested_name).save_file().await else {
        return Ok(None);
    };
    let target = handle.path().to_path_buf();
    write_content(content, &target).await?;
    tracing::info!("Saved {} to {}", suggested_name, target.display());
    Ok(Some(target))
}

/// Write already-classified content to `target`, one strategy per variant.
pub async fn write_content(content: SaveContent, target: &Path) -> Result<(), BridgeError> {
    match content {
        SaveContent::Bytes(bytes) => {
            tokio::fs::write(target, bytes).await?;
            Ok(())
        }
        SaveContent::Url(url) => download_to_path(&url, target).await,
        SaveContent::DataUrl(data_url) => {
            let payload = base64_payload(&data_url).ok_or(BridgeError::UnknownContent)?;
            let bytes = base64::engine::general_purpose::STANDARD.decode(payload)?;
            tokio::fs::write(target, bytes).await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_http_urls() {
        assert_eq!(
            SaveContent::classify("http://example.com/a.png").unwrap(),
            SaveContent::Url("http://example.com/a.png".to_string())
        );
        assert!(matches!(
            SaveContent::classify("https://example.com/a.png").unwrap(),
            SaveContent::Url(_)
        ));
    }

    #[test]
    fn test_classify_data_url() {
        let data_url = "data:image/png;base64,aGVsbG8=";
        assert_eq!(
            SaveContent::classify(data_url).unwrap(),
            SaveContent::DataUrl(data_url.to_string())
        );
    }

    #[test]
    fn test_classify_rejects_unknown_strings() {
        for value in ["plain text", "ftp://example.com/a", "data:image/png,nope", ""] {
            assert!(matches!(
                SaveContent::classify(value),
                Err(BridgeError::UnknownContent)
            ));
        }
    }

    #[tokio::test]
    async fn test_write_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("raw.bin");
        write_content(SaveContent::Bytes(vec![1, 2, 3]), &target)
            .await
            .unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_data_url_writes_decoded_payload_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("decoded.bin");
        let payload: &[u8] = b"whiteboard snapshot bytes \x00\xff";
        let data_url = format!(
            "data:application/octet-stream;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(payload)
        );
        write_content(SaveContent::DataUrl(data_url), &target)
            .await
            .unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), payload);
    }

    #[tokio::test]
    async fn test_url_content_fetches_to_target() {
        let body = b"remote asset payload";
        let url = super::super::download::serve_once("HTTP/1.1 200 OK", body);
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("fetched.bin");
        write_content(SaveContent::classify(&url).unwrap(), &target)
            .await
            .unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), body);
    }

    #[tokio::test]
    async fn test_invalid_base64_rejects() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("bad.bin");
        let result = write_content(
            SaveContent::DataUrl("data:image/png;base64,@@not-base64@@".to_string()),
            &target,
        )
        .await;
        assert!(matches!(result, Err(BridgeError::DataUrl(_))));
        assert!(!target.exists());
    }
}
