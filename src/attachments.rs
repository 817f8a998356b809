//! Per-field file selection for the upload steps.
//!
//! An [`AttachmentSet`] binds field keys to selected files and owns the
//! ephemeral preview thumbnails generated for image attachments. Previews
//! are the one scoped resource in the system: the thumbnail file is created
//! when an image is attached and must be gone when the field is replaced,
//! cleared, or the owning form is torn down. `AttachmentSet` is the single
//! ownership point for that lifetime; dropping it releases everything.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::errors::{AppError, ResultExt};

/// A file selected for upload, loaded into memory.
///
/// No content validation happens here: the extension-derived content type is
/// advisory, mirroring a browser `accept` filter.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Load a file from disk, deriving the content type from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading attachment {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        let content_type = content_type_for(path).to_string();

        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image")
    }
}

fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// What the UI shows next to a populated file field.
#[derive(Debug)]
pub enum Preview<'a> {
    /// Path of the ephemeral thumbnail file (image attachments).
    Thumbnail(&'a Path),
    /// Plain file name (everything else).
    FileName(&'a str),
}

struct Slot {
    attachment: Attachment,
    // NamedTempFile unlinks on drop, which is exactly the release contract
    preview: Option<NamedTempFile>,
}

/// Field-keyed attachment storage for one form.
#[derive(Default)]
pub struct AttachmentSet {
    slots: BTreeMap<String, Slot>,
}

impl AttachmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `file` to `field`, or clear the field with `None`.
    ///
    /// Replacing or clearing a field drops the previous slot first, so an
    /// old thumbnail never outlives its attachment.
    pub fn attach(&mut self, field: &str, file: Option<Attachment>) -> Result<(), AppError> {
        if let Some(old) = self.slots.remove(field) {
            drop(old);
            tracing::debug!("Released previous attachment for field {}", field);
        }

        let Some(attachment) = file else {
            return Ok(());
        };

        let preview = if attachment.is_image() {
            let mut tmp = NamedTempFile::new().context("creating preview thumbnail")?;
            tmp.write_all(&attachment.bytes)
                .context("writing preview thumbnail")?;
            Some(tmp)
        } else {
            None
        };

        self.slots.insert(
            field.to_string(),
            Slot {
                attachment,
                preview,
            },
        );
        Ok(())
    }

    pub fn get(&self, field: &str) -> Option<&Attachment> {
        self.slots.get(field).map(|s| &s.attachment)
    }

    pub fn has(&self, field: &str) -> bool {
        self.slots.contains_key(field)
    }

    /// Thumbnail path for images, file name otherwise.
    pub fn preview(&self, field: &str) -> Option<Preview<'_>> {
        let slot = self.slots.get(field)?;
        Some(match &slot.preview {
            Some(tmp) => Preview::Thumbnail(tmp.path()),
            None => Preview::FileName(&slot.attachment.file_name),
        })
    }

    /// Re-key a field, keeping its attachment and preview alive.
    ///
    /// Used when a dynamic row is removed and the rows after it shift down.
    /// Whatever was bound under `to` is released first.
    pub fn rename(&mut self, from: &str, to: &str) {
        if let Some(slot) = self.slots.remove(from) {
            self.slots.insert(to.to_string(), slot);
        } else {
            self.slots.remove(to);
        }
    }

    /// Drop every attachment and preview.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
