//! Per-entity roll-ups over leads and invoices
//!
//! Detail and list views show counts and currency sums for one agent,
//! franchise, or bank. The collections are page-mount snapshots, bounded to
//! hundreds of rows, so everything recomputes on demand — no caching.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::identity::{first_key, key_of, IdentityKey};
use crate::models::{Invoice, Lead};

/// Lead statuses that count as terminal. Anything else — including statuses
/// this client has never seen — is active.
const TERMINAL_STATUSES: [&str; 2] = ["completed", "rejected"];

const STATUS_COMPLETED: &str = "completed";

/// Which entity the roll-up is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatTargetKind {
    Agent,
    Franchise,
    Bank,
}

/// Derived roll-up for one target entity. Never persisted; recomputed from
/// the current collections on every render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatRecord {
    pub total: u64,
    pub active: u64,
    pub completed: u64,
    #[serde(rename = "commissionSum")]
    pub commission_sum: Decimal,
    #[serde(rename = "amountSum")]
    pub amount_sum: Decimal,
}

/// The in-memory snapshot a page fetched on mount.
#[derive(Debug, Clone, Copy)]
pub struct Collections<'a> {
    pub leads: &'a [Lead],
    pub invoices: &'a [Invoice],
}

/// Roll up leads and invoices for one target entity.
///
/// Pure and total. An empty target key returns the zero record without
/// filtering — absent references must not match leads that are merely
/// unowned.
pub fn stats_for(kind: StatTargetKind, target: &Value, collections: &Collections<'_>) -> StatRecord {
    stats_for_key(kind, &key_of(target), collections)
}

/// [`stats_for`] when the caller already holds a normalized key.
pub fn stats_for_key(
    kind: StatTargetKind,
    target: &IdentityKey,
    collections: &Collections<'_>,
) -> StatRecord {
    if target.is_empty() {
        return StatRecord::default();
    }

    let mut record = StatRecord::default();

    for lead in collections.leads {
        if !lead_owner_key(lead, kind).matches(target) {
            continue;
        }
        record.total += 1;
        match lead.status.as_deref() {
            Some(STATUS_COMPLETED) => record.completed += 1,
            Some(status) if TERMINAL_STATUSES.contains(&status) => {}
            _ => record.active += 1,
        }
        record.amount_sum += lead.loan_amount_or_zero();
    }

    for invoice in collections.invoices {
        if !invoice_owner_key(invoice, kind).matches(target) {
            continue;
        }
        record.commission_sum += invoice.payable();
    }

    record
}

/// A lead's owning reference for the given target kind: populated nested
/// object first, then the flat id, then the legacy field name.
fn lead_owner_key(lead: &Lead, kind: StatTargetKind) -> IdentityKey {
    match kind {
        StatTargetKind::Agent => first_key([
            lead.agent.as_ref(),
            lead.agent_id.as_ref(),
            lead.agent_id_legacy.as_ref(),
        ]),
        StatTargetKind::Franchise => first_key([
            lead.franchise.as_ref(),
            lead.franchise_id.as_ref(),
            lead.franchise_id_legacy.as_ref(),
        ]),
        StatTargetKind::Bank => first_key([
            lead.bank.as_ref(),
            lead.bank_id.as_ref(),
            lead.bank_id_legacy.as_ref(),
        ]),
    }
}

fn invoice_owner_key(invoice: &Invoice, kind: StatTargetKind) -> IdentityKey {
    match kind {
        StatTargetKind::Agent => first_key([
            invoice.agent.as_ref(),
            invoice.agent_id.as_ref(),
            invoice.agent_id_legacy.as_ref(),
        ]),
        StatTargetKind::Franchise => first_key([
            invoice.franchise.as_ref(),
            invoice.franchise_id.as_ref(),
            invoice.franchise_id_legacy.as_ref(),
        ]),
        StatTargetKind::Bank => first_key([
            invoice.bank.as_ref(),
            invoice.bank_id.as_ref(),
            invoice.bank_id_legacy.as_ref(),
        ]),
    }
}
