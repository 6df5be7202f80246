// src/credits/claim.rs

use anyhow::Result;

use super::{
    COL_AFFILIATION_PUT_CODE, COL_CLAIMED_AT, COL_CREDIT_TYPE, COL_END_DATE, COL_ORCID_ID,
    COL_START_DATE,
};
use crate::sheets::{CellWrite, Table};

/// Everything identifying the single credit a caller wants to claim.
#[derive(Debug, Clone)]
pub struct ClaimRequest {
    pub credit_type: String,
    pub orcid_id: String,
    pub start_date: String,
    pub end_date: String,
    pub affiliation_put_code: String,
}

/// Cell writes that claim the first unclaimed row matching the request:
/// `claimed_at` into the CLAIMED_AT cell and the put-code into the
/// AFFILIATION_PUT_CODE cell of that one row. All four identifying fields
/// must match exactly and the row's CLAIMED_AT must still be empty. No
/// matching row yields no writes — a silent no-op, not an error.
pub fn single_claim_writes(
    table: &Table,
    request: &ClaimRequest,
    claimed_at: &str,
) -> Result<Vec<CellWrite>> {
    let credit_type_col = table.column_index(COL_CREDIT_TYPE)?;
    let orcid_col = table.column_index(COL_ORCID_ID)?;
    let start_col = table.column_index(COL_START_DATE)?;
    let end_col = table.column_index(COL_END_DATE)?;
    let claimed_col = table.column_index(COL_CLAIMED_AT)?;
    let put_code_col = table.column_index(COL_AFFILIATION_PUT_CODE)?;

    let target = table.rows().iter().position(|row| {
        row[orcid_col] == request.orcid_id
            && row[credit_type_col] == request.credit_type
            && row[start_col] == request.start_date
            && row[end_col] == request.end_date
            && row[claimed_col].is_empty()
    });

    let writes = match target {
        Some(row_idx) => {
            let sheet_row = Table::sheet_row(row_idx);
            vec![
                CellWrite {
                    row: sheet_row,
                    col: claimed_col + 1,
                    value: claimed_at.to_string(),
                },
                CellWrite {
                    row: sheet_row,
                    col: put_code_col + 1,
                    value: request.affiliation_put_code.clone(),
                },
            ]
        }
        None => Vec::new(),
    };
    Ok(writes)
}

/// Cell writes that stamp `claimed_at` onto every row matching
/// `(credit_type, orcid_id)`, claimed or not. Rows already claimed get a
/// fresh timestamp.
pub fn batch_claim_writes(
    table: &Table,
    credit_type: &str,
    orcid_id: &str,
    claimed_at: &str,
) -> Result<Vec<CellWrite>> {
    let credit_type_col = table.column_index(COL_CREDIT_TYPE)?;
    let orcid_col = table.column_index(COL_ORCID_ID)?;
    let claimed_col = table.column_index(COL_CLAIMED_AT)?;

    let writes = table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| row[orcid_col] == orcid_id && row[credit_type_col] == credit_type)
        .map(|(row_idx, _)| CellWrite {
            row: Table::sheet_row(row_idx),
            col: claimed_col + 1,
            value: claimed_at.to_string(),
        })
        .collect();
    Ok(writes)
}
