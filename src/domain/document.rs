// src/domain/document.rs
//
// Document Entity
//
// Documents are attached to a property by its owner and are immutable once
// attached. The client only ever sees a content hash, never the document body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{time, DomainError};

/// A document attached to a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Position of the document within its property (assigned by the backend)
    pub id: u64,

    /// Content hash supplied when the document was attached
    pub hash: String,

    /// Attachment time, nanoseconds since the Unix epoch
    pub timestamp: u64,

    pub kind: DocumentType,
}

/// Kind of an attached document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Inspection,
    Contract,
    Deed,
    Title,
    Other,
}

impl Document {
    pub fn attached_at(&self) -> DateTime<Utc> {
        time::from_canister_nanos(self.timestamp)
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentType::Inspection => write!(f, "Inspection"),
            DocumentType::Contract => write!(f, "Contract"),
            DocumentType::Deed => write!(f, "Deed"),
            DocumentType::Title => write!(f, "Title"),
            DocumentType::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for DocumentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inspection" => Ok(DocumentType::Inspection),
            "contract" => Ok(DocumentType::Contract),
            "deed" => Ok(DocumentType::Deed),
            "title" => Ok(DocumentType::Title),
            "other" => Ok(DocumentType::Other),
            _ => Err(DomainError::UnknownVariant {
                kind: "document type",
                value: s.to_string(),
            }),
        }
    }
}
