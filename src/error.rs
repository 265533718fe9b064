//! Error taxonomy for the file bridge

/// Failures surfaced by file bridge operations.
///
/// Dialog cancellation is not an error; cancelled operations resolve to an
/// empty result instead.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Save content was a string matching no recognized URL form.
    #[error("unrecognized save content: expected an http(s) URL or a base64 data URL")]
    UnknownContent,

    /// A data URL carried a payload that is not valid base64.
    #[error("malformed data URL payload: {0}")]
    DataUrl(#[from] base64::DecodeError),

    /// Transport failure while fetching a remote resource.
    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Local read or write failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
