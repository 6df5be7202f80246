// src/credits/lookup.rs

use anyhow::Result;
use serde_json::{Map, Value};

use super::COL_ORCID_ID;
use crate::sheets::Table;

/// All credits belonging to `orcid_id`: rows whose ORCID iD cell equals the
/// input exactly (case-sensitive), in sheet order, each projected to a
/// name → value mapping over the full column set. Zero matches is a valid,
/// empty result.
pub fn credits_for_orcid(table: &Table, orcid_id: &str) -> Result<Vec<Map<String, Value>>> {
    let orcid_col = table.column_index(COL_ORCID_ID)?;
    let credits = table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| row[orcid_col] == orcid_id)
        .map(|(idx, _)| table.labeled_row(idx))
        .collect();
    Ok(credits)
}
