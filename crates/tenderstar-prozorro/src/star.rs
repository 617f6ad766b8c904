//! Star-schema shaping: one fact row per tender, deduplicated dimensions,
//! one item row per line item.
//!
//! All collections keep first-seen order so output is deterministic and
//! follows contract order.

use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Number;

use crate::model::TenderDocument;

/// Placeholder for absent category / contact values
pub const NOT_AVAILABLE: &str = "N/A";

/// Participant type for procuring entities
pub const BUYER: &str = "Buyer";

/// Distinct strings in insertion order
#[derive(Debug, Default, Clone)]
pub struct OrderedSet {
    values: Vec<String>,
    seen: FxHashSet<String>,
}

impl OrderedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert if new. Returns true when the value was not present.
    pub fn insert(&mut self, value: &str) -> bool {
        if self.seen.contains(value) {
            return false;
        }
        self.seen.insert(value.to_string());
        self.values.push(value.to_string());
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.seen.contains(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

// === Rows ===

#[derive(Debug, Clone, PartialEq)]
pub struct FactTenderRow {
    pub tender_id: String,
    pub date: String,
    pub region: String,
    pub participant_id: String,
    pub budget_amount: Number,
    pub actual_amount: Number,
    pub status: String,
    pub bid_count: usize,
    pub primary_category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub tender_id: String,
    pub description: String,
    pub classification_id: String,
    pub classification_description: String,
    pub unit_code: String,
    pub unit_name: String,
    pub quantity: Number,
}

/// Participants keyed by id; first sighting wins
#[derive(Debug, Default, Clone)]
pub struct ParticipantDimension {
    rows: Vec<ParticipantRow>,
    index: FxHashMap<String, usize>,
}

impl ParticipantDimension {
    /// Register a participant unless the id is already known.
    /// Returns true when a new row was added.
    pub fn register(&mut self, row: ParticipantRow) -> bool {
        if self.index.contains_key(&row.id) {
            return false;
        }
        self.index.insert(row.id.clone(), self.rows.len());
        self.rows.push(row);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&ParticipantRow> {
        self.index.get(id).map(|&i| &self.rows[i])
    }

    pub fn rows(&self) -> &[ParticipantRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// In-memory tables for one run
#[derive(Debug, Default, Clone)]
pub struct StarSchema {
    pub facts: Vec<FactTenderRow>,
    pub regions: OrderedSet,
    pub participants: ParticipantDimension,
    pub categories: OrderedSet,
    pub items: Vec<ItemRow>,
}

impl StarSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project one enriched tender into the tables.
    ///
    /// `actual_amount` comes from the contract, not the tender; the tender's
    /// own value is the budget.
    pub fn shape(&mut self, tender_id: &str, tender: &TenderDocument, actual_amount: &Number) {
        let entity = &tender.procuring_entity;
        let region = tender.region();
        let participant_id = tender.participant_id();

        self.facts.push(FactTenderRow {
            tender_id: tender_id.to_string(),
            date: tender.date_created.clone(),
            region: region.to_string(),
            participant_id: participant_id.to_string(),
            budget_amount: tender.budget_amount().clone(),
            actual_amount: actual_amount.clone(),
            status: tender.status.clone(),
            bid_count: tender.bid_count(),
            primary_category: tender
                .primary_category()
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
        });

        self.regions.insert(region);

        if !self.participants.contains(participant_id) {
            self.participants.register(ParticipantRow {
                id: participant_id.to_string(),
                name: entity.name.clone(),
                kind: BUYER.to_string(),
                contact: entity.contact_email().unwrap_or(NOT_AVAILABLE).to_string(),
            });
        }

        for item in tender.items() {
            self.categories.insert(&item.classification.description);
            self.items.push(ItemRow {
                tender_id: tender_id.to_string(),
                description: item.description.clone(),
                classification_id: item.classification.id.clone(),
                classification_description: item.classification.description.clone(),
                unit_code: item.unit.code.clone(),
                unit_name: item.unit.name.clone(),
                quantity: item.quantity.clone(),
            });
        }
    }
}
