//! Zip packaging for split output

use std::collections::HashMap;
use std::io::{Cursor, Write};

use thiserror::Error;
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

/// One file inside a produced archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub content: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }
}

/// Archive writing errors
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Pack entries into a deflate-compressed zip archive.
///
/// Each distinct name becomes exactly one member. When names repeat, the last
/// entry's content wins and the member keeps the position of the first.
pub fn pack(entries: &[ArchiveEntry]) -> Result<Vec<u8>, ArchiveError> {
    let members = resolve_duplicates(entries);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in &members {
        zip.start_file(entry.name.as_str(), options)?;
        zip.write_all(&entry.content)?;
    }

    let buffer = zip.finish()?.into_inner();
    tracing::debug!(
        members = members.len(),
        bytes = buffer.len(),
        "Packed archive"
    );
    Ok(buffer)
}

fn resolve_duplicates(entries: &[ArchiveEntry]) -> Vec<&ArchiveEntry> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut members: Vec<&ArchiveEntry> = Vec::with_capacity(entries.len());

    for entry in entries {
        match slots.get(entry.name.as_str()) {
            Some(&slot) => {
                tracing::debug!(name = %entry.name, "Duplicate archive member, keeping last");
                members[slot] = entry;
            }
            None => {
                slots.insert(entry.name.as_str(), members.len());
                members.push(entry);
            }
        }
    }

    members
}
