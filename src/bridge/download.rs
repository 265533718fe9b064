//! Streaming download of http(s) resources to local files

use std::path::Path;

use tokio::io::AsyncWriteExt;

use crate::error::BridgeError;

/// Stream the resource at `url` to a file at `dest`.
///
/// Resolves when the stream finishes and rejects on any transport or
/// file-system error. Non-success status codes are treated as transport
/// failures so an error page never becomes the saved file. No timeout is
/// applied.
pub async fn download_to_path(url: &str, dest: &Path) -> Result<(), BridgeError> {
    let mut response = reqwest::get(url).await?.error_for_status()?;
    let mut file = tokio::fs::File::create(dest).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    tracing::debug!("Downloaded {} to {}", url, dest.display());
    Ok(())
}

/// Serve one canned HTTP response on a local port, returning the URL.
#[cfg(test)]
pub(crate) fn serve_once(status_line: &str, body: &[u8]) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = [
        format!(
            "{status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        )
        .into_bytes(),
        body.to_vec(),
    ]
    .concat();
    std::thread::spawn(move || {
        use std::io::{Read, Write};
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = [0u8; 1024];
        let _ = stream.read(&mut request);
        stream.write_all(&response).unwrap();
    });
    format!("http://{addr}/file.bin")
}
