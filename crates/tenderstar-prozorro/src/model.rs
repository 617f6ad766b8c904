//! Typed views of the openprocurement API responses.
//!
//! Required fields are plain values, so a missing one fails deserialization.
//! Optional fields (`bids`, `contactPoint`, `items`) tolerate both absence
//! and explicit `null`.

use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::{Number, Value};

/// Monetary value block (`{"amount": ..., "currency": ...}`).
///
/// Amounts stay `Number` so they are written back in their JSON textual form.
#[derive(Debug, Clone, Deserialize)]
pub struct MonetaryValue {
    pub amount: Number,
}

// === Contract list ===

/// One page of the contract list endpoint
#[derive(Debug, Deserialize)]
pub struct ContractPage {
    pub data: Vec<ContractSummary>,
    #[serde(default)]
    pub next_page: Option<NextPage>,
}

#[derive(Debug, Deserialize)]
pub struct NextPage {
    #[serde(default)]
    pub offset: Value,
}

impl ContractPage {
    /// Continuation offset as a query value, `None` when the source signals
    /// the end (missing, null, false, zero, empty string).
    pub fn next_offset(&self) -> Option<String> {
        let offset = &self.next_page.as_ref()?.offset;
        match offset {
            Value::Null | Value::Bool(false) => None,
            Value::Bool(true) => Some("true".to_string()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Array(_) | Value::Object(_) => {
                log::warn!("Unsupported next_page.offset shape: {offset}");
                None
            }
        }
    }
}

/// Contract as listed: which tender to enrich and the settled amount
#[derive(Debug, Clone, Deserialize)]
pub struct ContractSummary {
    pub tender_id: String,
    pub value: MonetaryValue,
}

impl ContractSummary {
    pub fn actual_amount(&self) -> &Number {
        &self.value.amount
    }
}

// === Tender detail ===

/// Detail endpoint envelope: the document sits under `data`
#[derive(Debug, Deserialize)]
pub struct TenderEnvelope {
    pub data: TenderDocument,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderDocument {
    pub date_created: String,
    pub procuring_entity: ProcuringEntity,
    pub value: MonetaryValue,
    pub status: String,
    #[serde(default)]
    pub bids: Option<Vec<IgnoredAny>>,
    #[serde(default)]
    pub items: Option<Vec<Item>>,
}

impl TenderDocument {
    pub fn bid_count(&self) -> usize {
        self.bids.as_ref().map_or(0, Vec::len)
    }

    pub fn items(&self) -> &[Item] {
        self.items.as_deref().unwrap_or_default()
    }

    pub fn region(&self) -> &str {
        &self.procuring_entity.address.region
    }

    pub fn participant_id(&self) -> &str {
        &self.procuring_entity.identifier.id
    }

    pub fn budget_amount(&self) -> &Number {
        &self.value.amount
    }

    /// Classification of the first line item, if any
    pub fn primary_category(&self) -> Option<&str> {
        self.items()
            .first()
            .map(|item| item.classification.description.as_str())
    }
}

/// Buyer organization
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcuringEntity {
    pub name: String,
    pub address: Address,
    pub identifier: Identifier,
    #[serde(default)]
    pub contact_point: Option<ContactPoint>,
}

impl ProcuringEntity {
    pub fn contact_email(&self) -> Option<&str> {
        self.contact_point.as_ref().and_then(|c| c.email.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Address {
    pub region: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Identifier {
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactPoint {
    #[serde(default)]
    pub email: Option<String>,
}

/// Tender line item
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    pub description: String,
    pub classification: Classification,
    pub unit: Unit,
    pub quantity: Number,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Classification {
    pub id: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Unit {
    pub code: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(json: &str) -> ContractPage {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn falsy_offsets_end_paging() {
        for offset in ["0", "0.0", "\"\"", "null", "false"] {
            let p = page(&format!(r#"{{"data": [], "next_page": {{"offset": {offset}}}}}"#));
            assert_eq!(p.next_offset(), None, "offset {offset}");
        }
        assert_eq!(page(r#"{"data": []}"#).next_offset(), None);
        assert_eq!(page(r#"{"data": [], "next_page": {}}"#).next_offset(), None);
    }

    #[test]
    fn truthy_offsets_pass_through() {
        let p = page(r#"{"data": [], "next_page": {"offset": "2024-01-01T00:00:00+02:00"}}"#);
        assert_eq!(p.next_offset().as_deref(), Some("2024-01-01T00:00:00+02:00"));
        let p = page(r#"{"data": [], "next_page": {"offset": 1718000000.123}}"#);
        assert_eq!(p.next_offset().as_deref(), Some("1718000000.123"));
    }

    #[test]
    fn contract_summary_requires_amount() {
        let ok: ContractSummary =
            serde_json::from_str(r#"{"tender_id": "T1", "value": {"amount": 100}}"#).unwrap();
        assert_eq!(ok.actual_amount().to_string(), "100");
        assert!(serde_json::from_str::<ContractSummary>(r#"{"tender_id": "T1"}"#).is_err());
    }

    #[test]
    fn tender_optional_fields_default() {
        let json = r#"{
            "dateCreated": "2024-01-01",
            "procuringEntity": {
                "name": "Acme",
                "address": {"region": "Kyiv"},
                "identifier": {"id": "P1"}
            },
            "value": {"amount": 90},
            "status": "complete",
            "bids": null
        }"#;
        let t: TenderDocument = serde_json::from_str(json).unwrap();
        assert_eq!(t.bid_count(), 0);
        assert!(t.items().is_empty());
        assert_eq!(t.primary_category(), None);
        assert_eq!(t.procuring_entity.contact_email(), None);
    }

    #[test]
    fn tender_missing_procuring_entity_fails() {
        let json = r#"{"dateCreated": "2024-01-01", "value": {"amount": 1}, "status": "x"}"#;
        let err = serde_json::from_str::<TenderDocument>(json).unwrap_err();
        assert!(err.to_string().contains("procuringEntity"));
    }

    #[test]
    fn amounts_keep_textual_form() {
        let v: MonetaryValue = serde_json::from_str(r#"{"amount": 100.0}"#).unwrap();
        assert_eq!(v.amount.to_string(), "100.0");
        let v: MonetaryValue = serde_json::from_str(r#"{"amount": 12.5}"#).unwrap();
        assert_eq!(v.amount.to_string(), "12.5");
    }
}
