//! File metadata entity. Payloads live in the object store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const MAX_EXTENSION_LEN: usize = 16;

/// Metadata of an uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: Uuid,

    /// Original file name as uploaded
    pub name: String,

    /// Text after the last `.` of the name, empty if none
    pub extension: String,

    pub mime_type: Option<String>,

    /// Size of the payload in bytes
    pub size: u64,

    pub uploaded_at: DateTime<Utc>,
}

impl FileRecord {
    pub fn new(name: String, mime_type: Option<String>, size: u64, uploaded_at: DateTime<Utc>) -> Self {
        let extension = extension_of(&name);
        Self {
            id: Uuid::new_v4(),
            name,
            extension,
            mime_type,
            size,
            uploaded_at,
        }
    }

    /// Replaces name, type and size, keeping the id
    pub fn replace_content(
        &mut self,
        name: String,
        mime_type: Option<String>,
        size: u64,
        uploaded_at: DateTime<Utc>,
    ) {
        self.extension = extension_of(&name);
        self.name = name;
        self.mime_type = mime_type;
        self.size = size;
        self.uploaded_at = uploaded_at;
    }

    /// Object store key for the payload: `{id}.{extension}`, or just `{id}`
    pub fn storage_key(&self) -> String {
        if self.extension.is_empty() {
            self.id.to_string()
        } else {
            format!("{}.{}", self.id, self.extension)
        }
    }
}

/// Extension of a file name. Anything that is not a short alphanumeric
/// suffix is dropped so it can never escape the storage key.
fn extension_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext))
            if !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_ascii_lowercase()
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_last_dot() {
        let record = FileRecord::new("archive.tar.GZ".to_string(), None, 10, Utc::now());
        assert_eq!(record.extension, "gz");
        assert_eq!(record.storage_key(), format!("{}.gz", record.id));
    }

    #[test]
    fn test_no_extension() {
        let record = FileRecord::new("README".to_string(), None, 1, Utc::now());
        assert_eq!(record.extension, "");
        assert_eq!(record.storage_key(), record.id.to_string());
    }

    #[test]
    fn test_unsafe_extension_is_dropped() {
        let record = FileRecord::new("evil./../../etc".to_string(), None, 1, Utc::now());
        assert_eq!(record.extension, "");
        assert!(!record.storage_key().contains('/'));
    }

    #[test]
    fn test_replace_content_keeps_id() {
        let mut record = FileRecord::new("a.txt".to_string(), Some("text/plain".to_string()), 3, Utc::now());
        let id = record.id;

        record.replace_content("b.png".to_string(), Some("image/png".to_string()), 9, Utc::now());

        assert_eq!(record.id, id);
        assert_eq!(record.extension, "png");
        assert_eq!(record.size, 9);
        assert_eq!(record.mime_type.as_deref(), Some("image/png"));
    }
}
