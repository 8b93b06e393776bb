//! Attachment slot types
//!
//! Document slots are single-valued per type (`pan`, `aadhaar`, `gst`,
//! `bank_statement`, `shop_act`) except `additional`, which accumulates an
//! ordered list.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Wire names of the document slots the upload endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    Pan,
    Aadhaar,
    Gst,
    BankStatement,
    ShopAct,
    Additional,
}

impl DocType {
    /// Single-slot document types, in the order flush visits them.
    pub const SINGLE_SLOTS: [DocType; 5] = [
        DocType::Pan,
        DocType::Aadhaar,
        DocType::Gst,
        DocType::BankStatement,
        DocType::ShopAct,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocType::Pan => "pan",
            DocType::Aadhaar => "aadhaar",
            DocType::Gst => "gst",
            DocType::BankStatement => "bank_statement",
            DocType::ShopAct => "shop_act",
            DocType::Additional => "additional",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pan" => Some(DocType::Pan),
            "aadhaar" => Some(DocType::Aadhaar),
            "gst" => Some(DocType::Gst),
            "bank_statement" => Some(DocType::BankStatement),
            "shop_act" => Some(DocType::ShopAct),
            "additional" => Some(DocType::Additional),
            _ => None,
        }
    }

    /// Whether this type may hold more than one attachment at a time.
    pub fn is_multi(self) -> bool {
        matches!(self, DocType::Additional)
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity kinds the upload endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    User,
    Franchise,
}

impl EntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::User => "user",
            EntityType::Franchise => "franchise",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file picked by the user before its owning entity has a server
/// identifier. Lives only for the form session; what persists is the
/// server-side document record produced by the upload.
#[derive(Clone)]
pub struct StagedAttachment {
    pub staging_id: Uuid,
    pub doc_type: DocType,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub label: Option<String>,
}

impl StagedAttachment {
    pub fn new(doc_type: DocType, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            staging_id: Uuid::new_v4(),
            doc_type,
            file_name: file_name.into(),
            bytes,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

// Keep file contents out of debug output.
impl fmt::Debug for StagedAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagedAttachment")
            .field("staging_id", &self.staging_id)
            .field("doc_type", &self.doc_type)
            .field("file_name", &self.file_name)
            .field("bytes", &self.bytes.len())
            .field("label", &self.label)
            .finish()
    }
}

/// Observable state of one document slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Staged,
    Uploading,
    Committed,
}
