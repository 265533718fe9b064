//! Native file dialogs and byte transfer for the sandboxed canvas UI
//!
//! Each operation is a single independent interaction: pick and read files,
//! stream a URL to disk, or save caller-supplied content where the user
//! chooses. Operations are uncoordinated with each other, and cancelling a
//! dialog always resolves to an empty result rather than an error.

mod download;
mod save;

pub use download::download_to_path;
pub use save::{save_content, write_content, SaveContent};

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Extension filter shown by a native dialog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFilter {
    /// Display name, e.g. "Media".
    pub name: String,
    /// Extensions without the leading dot.
    pub extensions: Vec<String>,
}

impl FileFilter {
    /// Create a filter from a name and extension list.
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Native-dialog capabilities a caller may request.
///
/// Backends that lack a capability ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DialogProperty {
    /// Select several files at once. The many-file open operation forces
    /// this on regardless of what the caller requested; the variant exists
    /// so renderer-supplied option JSON round-trips.
    MultiSelections,
    /// Allow creating directories from within the dialog.
    CreateDirectory,
    /// Show hidden files; honored only where the native dialog supports it.
    ShowHiddenFiles,
}

/// Options for the open and save dialogs.
///
/// Serializable so the sandboxed canvas UI can send them across the plugin
/// boundary as JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DialogOptions {
    pub title: Option<String>,
    pub default_path: Option<PathBuf>,
    /// Label for the confirm button; ignored by backends that cannot set it.
    pub button_label: Option<String>,
    pub filters: Vec<FileFilter>,
    pub properties: Vec<DialogProperty>,
}

impl DialogOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dialog title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the directory the dialog opens in.
    pub fn with_default_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_path = Some(path.into());
        self
    }

    /// Set the confirm button label.
    pub fn with_button_label(mut self, label: impl Into<String>) -> Self {
        self.button_label = Some(label.into());
        self
    }

    /// Add an extension filter.
    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Request a dialog capability.
    pub fn with_property(mut self, property: DialogProperty) -> Self {
        if !self.has_property(property) {
            self.properties.push(property);
        }
        self
    }

    /// Whether a capability was requested.
    pub fn has_property(&self, property: DialogProperty) -> bool {
        self.properties.contains(&property)
    }

    fn to_dialog(&self) -> rfd::AsyncFileDialog {
        let mut dialog = rfd::AsyncFileDialog::new();
        if let Some(ref title) = self.title {
            dialog = dialog.set_title(title.as_str());
        }
        if let Some(ref path) = self.default_path {
            dialog = dialog.set_directory(path);
        }
        for filter in &self.filters {
            dialog = dialog.add_filter(filter.name.as_str(), &filter.extensions);
        }
        if self.has_property(DialogProperty::CreateDirectory) {
            dialog = dialog.set_can_create_directories(true);
        }
        dialog
    }

    fn to_save_dialog(&self, suggested_name: &str) -> rfd::AsyncFileDialog {
        let mut dialog = self.to_dialog().set_file_name(suggested_name);
        if self.default_path.is_none() {
            if let Some(downloads) = directories::UserDirs::new()
                .and_then(|dirs| dirs.download_dir().map(|d| d.to_path_buf()))
            {
                dialog = dialog.set_directory(downloads);
            }
        }
        dialog
    }
}

/// A file chosen by the user, read fully into memory.
///
/// Created per dialog interaction and handed straight to the canvas; not
/// retained by the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedFile {
    /// File name without its directory.
    pub name: String,
    /// Full contents.
    pub bytes: Vec<u8>,
}

impl NamedFile {
    /// Create a named file from in-memory bytes.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Content length in bytes.
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Whether the file is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Ask the user for a single file and read it fully.
///
/// Cancelling the dialog resolves to `Ok(None)`.
pub async fn open_file(options: &DialogOptions) -> Result<Option<NamedFile>> {
    let Some(handle) = options.to_dialog().pick_file().await else {
        return Ok(None);
    };
    read_handle(handle).await.map(Some)
}

/// Ask the user for one or more files; multi-selection is always on.
///
/// Cancelling the dialog resolves to an empty list.
pub async fn open_files(options: &DialogOptions) -> Result<Vec<NamedFile>> {
    let Some(handles) = options.to_dialog().pick_files().await else {
        return Ok(Vec::new());
    };
    let mut files = Vec::with_capacity(handles.len());
    for handle in handles {
        files.push(read_handle(handle).await?);
    }
    Ok(files)
}

async fn read_handle(handle: rfd::FileHandle) -> Result<NamedFile> {
    let name = handle.file_name();
    let path = handle.path().to_path_buf();
    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(NamedFile { name, bytes })
}
