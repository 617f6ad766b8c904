//! Output tables: file names, headers, and row → record conversion

use std::path::Path;

use anyhow::Context;
use tenderstar_core::write_table;

use crate::star::{FactTenderRow, ItemRow, ParticipantRow, StarSchema};

/// A fixed output table
#[derive(Debug, Clone, Copy)]
pub struct Table {
    pub file_name: &'static str,
    pub header: &'static [&'static str],
}

pub const FACT_TENDERS: Table = Table {
    file_name: "FactTenders.csv",
    header: &[
        "TenderID",
        "Date",
        "Region",
        "ParticipantID",
        "BudgetAmount",
        "ActualAmount",
        "ContractStatus",
        "BidCount",
        "Category",
    ],
};

pub const DIMENSION_REGION: Table = Table {
    file_name: "DimensionRegion.csv",
    header: &["Region"],
};

pub const DIMENSION_PARTICIPANTS: Table = Table {
    file_name: "DimensionParticipants.csv",
    header: &[
        "ParticipantID",
        "ParticipantName",
        "ParticipantType",
        "ContactDetails",
    ],
};

pub const DIMENSION_CATEGORY: Table = Table {
    file_name: "DimensionCategory.csv",
    header: &["Category"],
};

pub const DIMENSION_ITEMS: Table = Table {
    file_name: "DimensionItems.csv",
    header: &[
        "TenderID",
        "Description",
        "ClassificationID",
        "ClassificationDescription",
        "UnitCode",
        "UnitName",
        "Quantity",
    ],
};

/// All tables in write order
pub const ALL_TABLES: [Table; 5] = [
    FACT_TENDERS,
    DIMENSION_REGION,
    DIMENSION_PARTICIPANTS,
    DIMENSION_CATEGORY,
    DIMENSION_ITEMS,
];

impl FactTenderRow {
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.tender_id.clone(),
            self.date.clone(),
            self.region.clone(),
            self.participant_id.clone(),
            self.budget_amount.to_string(),
            self.actual_amount.to_string(),
            self.status.clone(),
            self.bid_count.to_string(),
            self.primary_category.clone(),
        ]
    }
}

impl ParticipantRow {
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.kind.clone(),
            self.contact.clone(),
        ]
    }
}

impl ItemRow {
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.tender_id.clone(),
            self.description.clone(),
            self.classification_id.clone(),
            self.classification_description.clone(),
            self.unit_code.clone(),
            self.unit_name.clone(),
            self.quantity.to_string(),
        ]
    }
}

/// Rows written per table
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub facts: usize,
    pub regions: usize,
    pub participants: usize,
    pub categories: usize,
    pub items: usize,
}

fn write_one<I>(output_dir: &Path, table: Table, rows: I) -> anyhow::Result<usize>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let path = output_dir.join(table.file_name);
    let written = write_table(&path, table.header, rows)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Wrote {written} rows to {}", path.display());
    Ok(written)
}

/// Write every table of the schema into `output_dir`, replacing existing files.
pub fn write_star(star: &StarSchema, output_dir: &Path) -> anyhow::Result<TableCounts> {
    let single = |value: &str| vec![value.to_string()];

    Ok(TableCounts {
        facts: write_one(
            output_dir,
            FACT_TENDERS,
            star.facts.iter().map(FactTenderRow::to_record),
        )?,
        regions: write_one(output_dir, DIMENSION_REGION, star.regions.iter().map(single))?,
        participants: write_one(
            output_dir,
            DIMENSION_PARTICIPANTS,
            star.participants.rows().iter().map(ParticipantRow::to_record),
        )?,
        categories: write_one(
            output_dir,
            DIMENSION_CATEGORY,
            star.categories.iter().map(single),
        )?,
        items: write_one(
            output_dir,
            DIMENSION_ITEMS,
            star.items.iter().map(ItemRow::to_record),
        )?,
    })
}
