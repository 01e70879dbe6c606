use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::ContentHash;

/// A source document that chunks were extracted from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    id: Uuid,
    file_path: String,
    file_sha1: ContentHash,
    source: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl File {
    pub fn new(file_path: String, file_sha1: ContentHash, source: Option<String>) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4(),
            file_path,
            file_sha1,
            source,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn file_sha1(&self) -> &ContentHash {
        &self.file_sha1
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_creation() {
        let hash = ContentHash::new("2aae6c35c94fcfb415dbe95f408b9ce91ee846ed").unwrap();
        let file = File::new(
            "/data/report.pdf".to_string(),
            hash.clone(),
            Some("report.pdf".to_string()),
        );

        assert_eq!(file.file_path(), "/data/report.pdf");
        assert_eq!(file.file_sha1(), &hash);
        assert_eq!(file.source(), Some("report.pdf"));
        assert_eq!(file.created_at(), file.updated_at());
    }

    #[test]
    fn test_with_id_overrides_generated_id() {
        let id = Uuid::new_v4();
        let hash = ContentHash::new("2aae6c35c94fcfb415dbe95f408b9ce91ee846ed").unwrap();
        let file = File::new("a.txt".to_string(), hash, None).with_id(id);

        assert_eq!(file.id(), id);
        assert_eq!(file.source(), None);
    }
}
