//! Insertion gating and dialog filters for canvas media

use anyhow::Result;

use crate::bridge::{self, DialogOptions, FileFilter, NamedFile};

/// Largest file accepted for insertion into the canvas.
pub const MAX_MEDIA_BYTES: u64 = 10 * 1024 * 1024;

/// Image and video extensions the embedded engine can place on the canvas.
pub const SUPPORTED_MEDIA_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "svg", "webp", "mp4", "mov", "qt", "webm",
];

/// Result of screening a batch of files for insertion.
#[derive(Debug, Default)]
pub struct MediaSelection {
    /// Files at or below the size threshold, in their original order.
    pub accepted: Vec<NamedFile>,
    /// Names of files rejected for exceeding the threshold.
    pub rejected: Vec<String>,
}

impl MediaSelection {
    /// Whether any file was rejected and the user should be warned.
    pub fn has_warnings(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// Partition files around the size threshold.
///
/// Oversized files are dropped with a warning; an all-oversized batch simply
/// yields nothing to insert. Never errors.
pub fn screen_for_insertion(files: Vec<NamedFile>) -> MediaSelection {
    let mut selection = MediaSelection::default();
    for file in files {
        if file.len() > MAX_MEDIA_BYTES {
            tracing::warn!(
                "Skipping {}: exceeds the {} MiB media limit",
                file.name,
                MAX_MEDIA_BYTES / (1024 * 1024)
            );
            selection.rejected.push(file.name);
        } else {
            selection.accepted.push(file);
        }
    }
    selection
}

/// Extension filter for the insert-media dialog.
pub fn media_dialog_filters() -> Vec<FileFilter> {
    vec![FileFilter::new("Media", SUPPORTED_MEDIA_EXTENSIONS)]
}

/// Run the insert-media flow: pick files, then screen them for size.
///
/// The media extension filter is appended to whatever the caller supplied.
/// Cancelling the dialog yields an empty selection.
pub async fn pick_media(options: &DialogOptions) -> Result<MediaSelection> {
    let mut options = options.clone();
    for filter in media_dialog_filters() {
        options = options.with_filter(filter);
    }
    let files = bridge::open_files(&options).await?;
    Ok(screen_for_insertion(files))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_of_size(name: &str, len: usize) -> NamedFile {
        NamedFile::new(name, vec![0u8; len])
    }

    #[test]
    fn test_mixed_batch_excludes_exactly_the_oversized() {
        let limit = MAX_MEDIA_BYTES as usize;
        let selection = screen_for_insertion(vec![
            file_of_size("small.png", 10),
            file_of_size("huge.mp4", limit + 1),
            file_of_size("at-limit.jpg", limit),
        ]);
        let accepted: Vec<&str> = selection.accepted.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(accepted, vec!["small.png", "at-limit.jpg"]);
        assert_eq!(selection.rejected, vec!["huge.mp4"]);
        assert!(selection.has_warnings());
    }

    #[test]
    fn test_all_oversized_yields_empty_acceptance() {
        let limit = MAX_MEDIA_BYTES as usize;
        let selection = screen_for_insertion(vec![
            file_of_size("a.mp4", limit + 1),
            file_of_size("b.mov", limit + 2),
        ]);
        assert!(selection.accepted.is_empty());
        assert_eq!(selection.rejected.len(), 2);
    }

    #[test]
    fn test_empty_batch() {
        let selection = screen_for_insertion(Vec::new());
        assert!(selection.accepted.is_empty());
        assert!(!selection.has_warnings());
    }

    #[test]
    fn test_media_filter_covers_images_and_video() {
        let filters = media_dialog_filters();
        assert_eq!(filters.len(), 1);
        assert!(filters[0].extensions.iter().any(|e| e == "png"));
        assert!(filters[0].extensions.iter().any(|e| e == "mp4"));
    }
}
