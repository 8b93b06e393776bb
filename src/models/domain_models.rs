//! Entity DTOs as received from the console backend
//!
//! Relationship fields are kept as `serde_json::Value` because the backend
//! populates them inconsistently: sometimes a bare identifier string,
//! sometimes a joined object, sometimes absent. Normalization happens in
//! [`crate::identity`], never at the field level.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A field agent in the network.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Agent {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    /// Discriminator for the polymorphic `managed_by` reference:
    /// `"Franchise"` or `"RelationshipManager"`. Absent on legacy rows.
    #[serde(rename = "managedByModel", default)]
    pub managed_by_model: Option<String>,

    /// The managing entity, shaped per `managed_by_model`.
    #[serde(rename = "managedBy", default)]
    pub managed_by: Option<Value>,

    /// Legacy ownership field from before relationship managers existed;
    /// always franchise-shaped when present.
    #[serde(default)]
    pub franchise: Option<Value>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub documents: Vec<Document>,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A franchise office that owns agents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Franchise {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "ownerName", default)]
    pub owner_name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A relationship manager who owns agents directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationshipManager {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

/// A lending bank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bank {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub branch: Option<String>,

    #[serde(default)]
    pub ifsc: Option<String>,

    #[serde(default)]
    pub city: Option<String>,
}

/// A loan lead.
///
/// Each owning relationship comes under up to three field names depending on
/// the backend generation that wrote the row: a populated-or-raw reference,
/// a flat camelCase id, and a flat snake_case id. Consumers resolve them
/// through [`crate::identity::first_key`] in that order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lead {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(rename = "customerName", default)]
    pub customer_name: Option<String>,

    #[serde(default)]
    pub agent: Option<Value>,
    #[serde(rename = "agentId", default)]
    pub agent_id: Option<Value>,
    #[serde(rename = "agent_id", default)]
    pub agent_id_legacy: Option<Value>,

    #[serde(default)]
    pub franchise: Option<Value>,
    #[serde(rename = "franchiseId", default)]
    pub franchise_id: Option<Value>,
    #[serde(rename = "franchise_id", default)]
    pub franchise_id_legacy: Option<Value>,

    #[serde(default)]
    pub bank: Option<Value>,
    #[serde(rename = "bankId", default)]
    pub bank_id: Option<Value>,
    #[serde(rename = "bank_id", default)]
    pub bank_id_legacy: Option<Value>,

    /// Lowercase status string; open-world (new statuses appear server-side
    /// without a client release).
    #[serde(default)]
    pub status: Option<String>,

    #[serde(rename = "loanAmount", default)]
    pub loan_amount: Option<Value>,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Lead {
    /// Requested loan amount, zero when missing or malformed.
    pub fn loan_amount_or_zero(&self) -> Decimal {
        decimal_or_zero(self.loan_amount.as_ref())
    }
}

/// A commission invoice raised against a lead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(rename = "invoiceNumber", default)]
    pub invoice_number: Option<String>,

    #[serde(default)]
    pub agent: Option<Value>,
    #[serde(rename = "agentId", default)]
    pub agent_id: Option<Value>,
    #[serde(rename = "agent_id", default)]
    pub agent_id_legacy: Option<Value>,

    #[serde(default)]
    pub franchise: Option<Value>,
    #[serde(rename = "franchiseId", default)]
    pub franchise_id: Option<Value>,
    #[serde(rename = "franchise_id", default)]
    pub franchise_id_legacy: Option<Value>,

    #[serde(default)]
    pub bank: Option<Value>,
    #[serde(rename = "bankId", default)]
    pub bank_id: Option<Value>,
    #[serde(rename = "bank_id", default)]
    pub bank_id_legacy: Option<Value>,

    #[serde(rename = "commissionAmount", default)]
    pub commission_amount: Option<Value>,

    #[serde(rename = "netPayable", default)]
    pub net_payable: Option<Value>,

    #[serde(default)]
    pub amount: Option<Value>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Invoice {
    /// The figure a payout row shows for this invoice.
    ///
    /// First defined, non-null field wins: `commissionAmount`, then
    /// `netPayable`, then `amount`. A defined-but-malformed field still wins
    /// the chain and contributes zero.
    pub fn payable(&self) -> Decimal {
        decimal_or_zero(first_defined([
            self.commission_amount.as_ref(),
            self.net_payable.as_ref(),
            self.amount.as_ref(),
        ]))
    }
}

/// A server-side document record, created only by a successful upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(rename = "documentType")]
    pub document_type: String,

    #[serde(rename = "originalFileName", default)]
    pub original_file_name: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    /// Set server-side after review; open-world string
    /// (`pending`, `verified`, `rejected`, ...).
    #[serde(rename = "verificationStatus", default)]
    pub verification_status: Option<String>,

    #[serde(rename = "entityType", default)]
    pub entity_type: Option<String>,

    #[serde(rename = "entityId", default)]
    pub entity_id: Option<Value>,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(rename = "uploadedAt", default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// First present, non-null value across a fallback chain of wire fields.
pub(crate) fn first_defined<'a, I>(values: I) -> Option<&'a Value>
where
    I: IntoIterator<Item = Option<&'a Value>>,
{
    values
        .into_iter()
        .flatten()
        .find(|value| !value.is_null())
}

/// Coerce a loose wire numeric to `Decimal`, zero for anything malformed.
///
/// Displayed totals must never carry NaN, so garbage degrades to zero
/// instead of propagating.
pub(crate) fn decimal_or_zero(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Decimal::from(i)
            } else if let Some(u) = n.as_u64() {
                Decimal::from(u)
            } else {
                n.as_f64()
                    .and_then(Decimal::from_f64)
                    .unwrap_or(Decimal::ZERO)
            }
        }
        Some(Value::String(s)) => s.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}
