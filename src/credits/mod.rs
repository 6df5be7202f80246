// src/credits/mod.rs

pub mod claim;
pub mod lookup;

/// Header cell names of the columns the credit logic reads and writes.
/// Any further columns on the sheet are carried through lookups untouched.
pub const COL_CREDIT_TYPE: &str = "column.CREDIT_TYPE";
pub const COL_ORCID_ID: &str = "column.ORCID_ID";
pub const COL_START_DATE: &str = "column.START_DATE";
pub const COL_END_DATE: &str = "column.END_DATE";
pub const COL_CLAIMED_AT: &str = "column.CLAIMED_AT";
pub const COL_AFFILIATION_PUT_CODE: &str = "column.AFFILIATION_PUT_CODE";

pub use claim::{batch_claim_writes, single_claim_writes, ClaimRequest};
pub use lookup::credits_for_orcid;
