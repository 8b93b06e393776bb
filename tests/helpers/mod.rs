//! Shared fixtures for the integration suites
//!
//! Deterministic DTO builders plus an in-memory uploader double that records
//! every call and can be told to fail specific calls by position.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Mutex;

use lo_console::attachments::{DocumentUploader, UploadRequest};
use lo_console::error::UploadError;
use lo_console::models::{Document, Invoice, Lead};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn lead(fields: Value) -> Lead {
    serde_json::from_value(fields).expect("lead fixture should deserialize")
}

pub fn leads(fields: Vec<Value>) -> Vec<Lead> {
    fields.into_iter().map(lead).collect()
}

pub fn invoice(fields: Value) -> Invoice {
    serde_json::from_value(fields).expect("invoice fixture should deserialize")
}

pub fn invoices(fields: Vec<Value>) -> Vec<Invoice> {
    fields.into_iter().map(invoice).collect()
}

/// Records every upload; fails the call numbers (1-based) it was built with.
pub struct MockUploader {
    calls: Mutex<Vec<UploadRequest>>,
    fail_calls: Mutex<HashSet<usize>>,
}

impl MockUploader {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_calls: Mutex::new(HashSet::new()),
        }
    }

    pub fn failing_on(calls: impl IntoIterator<Item = usize>) -> Self {
        let uploader = Self::new();
        *uploader.fail_calls.lock().unwrap() = calls.into_iter().collect();
        uploader
    }

    pub fn calls(&self) -> Vec<UploadRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentUploader for MockUploader {
    async fn upload(&self, request: &UploadRequest) -> Result<Document, UploadError> {
        let call_number = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(request.clone());
            calls.len()
        };

        if self.fail_calls.lock().unwrap().contains(&call_number) {
            return Err(UploadError::Rejected {
                message: format!("injected failure on call {call_number}"),
            });
        }

        Ok(Document {
            id: Some(json!(format!("doc-{call_number}"))),
            document_type: request.doc_type.as_str().to_string(),
            original_file_name: Some(request.file_name.clone()),
            url: Some(format!("https://files.example.test/{}", request.file_name)),
            verification_status: Some("pending".to_string()),
            entity_type: Some(request.entity_type.as_str().to_string()),
            entity_id: Some(json!(request.entity_id.as_str())),
            label: request.label.clone(),
            uploaded_at: None,
        })
    }
}
