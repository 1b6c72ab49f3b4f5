use std::path::Path;

use anyhow::{Context, Result, bail};
use devconnect_core::session::Attachment;

/// Largest file `/attach` will read into memory.
pub const MAX_ATTACHMENT_BYTES: u64 = 200 * 1024 * 1024;

/// Reads a file from disk and infers its media type from the extension.
pub fn load_attachment(path: &Path) -> Result<Attachment> {
    load_attachment_within(path, MAX_ATTACHMENT_BYTES)
}

/// Like [`load_attachment`], refusing anything larger than `max_bytes`
/// before reading it.
pub fn load_attachment_within(path: &Path, max_bytes: u64) -> Result<Attachment> {
    let metadata =
        std::fs::metadata(path).with_context(|| format!("Cannot read {}", path.display()))?;
    if !metadata.is_file() {
        bail!("{} is not a file", path.display());
    }
    if metadata.len() > max_bytes {
        bail!(
            "{} is {} bytes; the limit is {} bytes",
            path.display(),
            metadata.len(),
            max_bytes
        );
    }

    let data = std::fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let media_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(Attachment::new(data, media_type, file_name))
}
