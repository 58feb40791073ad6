//! Input resolution
//!
//! Turns the raw form state (picked file, text box, filename box, voice box)
//! into a validated [`Submission`]. Everything here runs before any network
//! call, so a rejected input never reaches the signing endpoint.

use crate::config::UploadConfig;
use crate::models::{InputSelection, InputSource, SelectedFile, Submission, FALLBACK_CONTENT_TYPE};
use crate::types::{AppError, AppResult};
use bytes::Bytes;
use std::path::Path;
use tracing::debug;

/// Extensions the conversion pipeline accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = [".txt", ".pdf", ".docx", ".doc"];

/// Extension typed-in text must be saved under.
pub const TEXT_EXTENSION: &str = ".txt";

pub fn has_accepted_extension(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Voice from the form, falling back to the configured default when blank.
pub fn resolve_voice(selection: &InputSelection, config: &UploadConfig) -> String {
    let voice = selection.voice.trim();
    if voice.is_empty() {
        config.default_voice.clone()
    } else {
        voice.to_string()
    }
}

/// Name the current selection would be uploaded under, without validating it.
/// A picked file wins over the filename box.
pub fn selected_filename(selection: &InputSelection, config: &UploadConfig) -> String {
    match &selection.file {
        Some(file) => file.name.clone(),
        None => {
            let name = selection.filename.trim();
            if name.is_empty() {
                config.default_filename.clone()
            } else {
                name.to_string()
            }
        }
    }
}

pub fn resolve_input(selection: &InputSelection, config: &UploadConfig) -> AppResult<Submission> {
    let voice = resolve_voice(selection, config);

    let source = match &selection.file {
        Some(file) => {
            if file.name.trim().is_empty() {
                return Err(AppError::validation("Selected file has no name"));
            }
            let mime_type = file
                .declared_type
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or(FALLBACK_CONTENT_TYPE)
                .to_string();
            InputSource::File {
                filename: file.name.clone(),
                mime_type,
                bytes: file.bytes.clone(),
            }
        }
        None => {
            let filename = selected_filename(selection, config);
            if selection.text.is_empty() {
                return Err(AppError::validation("Please enter some text or select a file"));
            }
            if !filename.ends_with(TEXT_EXTENSION) {
                return Err(AppError::validation("Filename must end with .txt"));
            }
            InputSource::Text {
                filename,
                text: selection.text.clone(),
            }
        }
    };

    if !has_accepted_extension(source.filename()) {
        return Err(AppError::validation("File must be .txt, .pdf, .docx, or .doc"));
    }

    debug!(filename = source.filename(), content_type = source.content_type(), "Input resolved");
    Ok(Submission { source, voice })
}

/// Read a file from disk the way a file picker would present it: its bare
/// name, its bytes, and a content type guessed from the extension.
pub async fn load_selected_file(path: &Path) -> AppResult<SelectedFile> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| AppError::validation(format!("Not a file path: {}", path.display())))?;

    let bytes = tokio::fs::read(path).await?;
    let declared_type = mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string());

    Ok(SelectedFile {
        name,
        bytes: Bytes::from(bytes),
        declared_type,
    })
}
