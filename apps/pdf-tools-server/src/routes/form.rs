//! Multipart form collection
//!
//! Reads an entire multipart body into memory, separating uploaded files
//! (kept in upload order) from plain text fields.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;

use crate::error::Result;

/// One uploaded file
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: String,
    pub file_name: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    /// Client file name, or the form field name when none was sent
    pub fn label(&self) -> &str {
        self.file_name.as_deref().unwrap_or(&self.field)
    }
}

/// Fully buffered multipart form
#[derive(Debug, Default)]
pub struct UploadForm {
    files: Vec<UploadedFile>,
    text: HashMap<String, String>,
}

impl UploadForm {
    /// Drain a multipart body
    pub async fn read(multipart: Multipart) -> Result<Self> {
        Self::read_with_text_fields(multipart, &[]).await
    }

    /// Drain a multipart body, always reading the fields named in
    /// `text_fields` as text even when the client attached them as files
    pub async fn read_with_text_fields(
        mut multipart: Multipart,
        text_fields: &[&str],
    ) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();
            let file_name = field.file_name().map(|s| s.to_string());
            let is_file = !text_fields.contains(&name.as_str())
                && is_file_part(file_name.as_deref(), field.content_type());

            if is_file {
                let data = field.bytes().await?;
                tracing::debug!(
                    field = %name,
                    file_name = ?file_name,
                    bytes = data.len(),
                    "Received file"
                );
                form.files.push(UploadedFile {
                    field: name,
                    file_name,
                    data,
                });
            } else {
                let value = field.text().await?;
                form.text.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Take the first file whose field matches one of `names`, else the first file
    pub fn take_file(&mut self, names: &[&str]) -> Option<UploadedFile> {
        let position = self
            .files
            .iter()
            .position(|file| names.contains(&file.field.as_str()))
            .or_else(|| (!self.files.is_empty()).then_some(0))?;
        Some(self.files.remove(position))
    }

    /// Take every file whose field matches one of `names`, in upload order.
    /// When no field matches, take all files.
    pub fn take_files(&mut self, names: &[&str]) -> Vec<UploadedFile> {
        let files = std::mem::take(&mut self.files);
        if !files.iter().any(|file| names.contains(&file.field.as_str())) {
            return files;
        }

        let (matched, rest): (Vec<_>, Vec<_>) = files
            .into_iter()
            .partition(|file| names.contains(&file.field.as_str()));
        self.files = rest;
        matched
    }

    /// Value of a text field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.text.get(name).map(String::as_str)
    }
}

fn is_file_part(file_name: Option<&str>, content_type: Option<&str>) -> bool {
    file_name.is_some() || content_type.is_some_and(is_document_type)
}

fn is_document_type(content_type: &str) -> bool {
    matches!(content_type, "application/pdf" | "application/octet-stream")
}
