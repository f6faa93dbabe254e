use std::collections::HashSet;

use dealwatch_core::{Deal, DealId};
use serde_json::Value;

/// State of the store before a scrape, as read from disk.
#[derive(Debug)]
pub enum PriorStore {
    /// No store file yet.
    Absent,
    Loaded(Vec<Deal>),
    /// The file exists but is not valid JSON, or its top level is not an
    /// array. Treated as empty; the next write replaces it.
    Corrupt(serde_json::Error),
}

impl PriorStore {
    /// Interprets raw store contents. `None` means the file does not exist.
    ///
    /// Records are decoded one by one and tolerate odd field types (see
    /// [`Deal`]). Only an element that is not a JSON object is dropped, with a
    /// warning; it never discards the rest of the store.
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None => PriorStore::Absent,
            Some(content) => match serde_json::from_str::<Vec<Value>>(content) {
                Ok(values) => PriorStore::Loaded(
                    values
                        .into_iter()
                        .enumerate()
                        .filter_map(|(index, value)| stored_deal(index, value))
                        .collect(),
                ),
                Err(e) => PriorStore::Corrupt(e),
            },
        }
    }

    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        matches!(self, PriorStore::Corrupt(_))
    }

    /// The deals to merge against; empty unless the store loaded cleanly.
    #[must_use]
    pub fn into_deals(self) -> Vec<Deal> {
        match self {
            PriorStore::Loaded(deals) => deals,
            PriorStore::Absent | PriorStore::Corrupt(_) => Vec::new(),
        }
    }
}

fn stored_deal(index: usize, value: Value) -> Option<Deal> {
    if !value.is_object() {
        tracing::warn!(index, value = %value, "dropping store entry that is not an object");
        return None;
    }
    match serde_json::from_value(value) {
        Ok(deal) => Some(deal),
        Err(e) => {
            tracing::warn!(index, error = %e, "dropping unreadable store entry");
            None
        }
    }
}

/// Result of [`merge_deals`].
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// The collection to persist: surviving existing deals, then new ones.
    pub deals: Vec<Deal>,
    /// Incoming deals that made it into `deals`.
    pub added: usize,
    /// Deals discarded as duplicates, from either side.
    pub dropped: usize,
}

/// Merges `incoming` into `existing`, first occurrence of an id wins.
///
/// Existing deals are visited first in stored order, then incoming deals in
/// extraction order. A deal is kept unless an already-kept deal has the same
/// id. Deals without an id are always kept.
#[must_use]
pub fn merge_deals(existing: Vec<Deal>, incoming: Vec<Deal>) -> MergeOutcome {
    let mut seen: HashSet<DealId> = HashSet::with_capacity(existing.len() + incoming.len());
    let mut deals = Vec::with_capacity(existing.len() + incoming.len());
    let mut dropped = 0usize;

    let mut keep = |deal: Deal, deals: &mut Vec<Deal>| -> bool {
        let is_new = deal.id.as_ref().map_or(true, |id| seen.insert(id.clone()));
        if is_new {
            deals.push(deal);
        }
        is_new
    };

    for deal in existing {
        if !keep(deal, &mut deals) {
            dropped += 1;
        }
    }

    let mut added = 0usize;
    for deal in incoming {
        if keep(deal, &mut deals) {
            added += 1;
        } else {
            dropped += 1;
        }
    }

    MergeOutcome {
        deals,
        added,
        dropped,
    }
}
