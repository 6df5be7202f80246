// src/server/handlers.rs

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;
use warp::{Rejection, Reply};

use super::error::{store_fault, ApiError};
use super::validate::{self, Params};
use crate::config::{ClaimMode, Config};
use crate::credits::{
    batch_claim_writes, credits_for_orcid, single_claim_writes, ClaimRequest,
};
use crate::sheets::SheetsClient;

/// Shared read-only context handed to every handler.
pub struct AppContext {
    pub config: Config,
    pub sheets: SheetsClient,
}

pub async fn health() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&serde_json::json!({
        "status": "healthy",
        "service": "creditsheet",
    })))
}

/// GET: all credits for an ORCID iD.
pub async fn get_credits(
    params: Params,
    ctx: Arc<AppContext>,
) -> Result<warp::reply::Json, Rejection> {
    let orcid_id = match validate_get(&params, &ctx.config) {
        Ok(orcid_id) => orcid_id,
        Err(err) => return Ok(err.into_reply()),
    };

    let table = ctx.sheets.read_table().await.map_err(store_fault)?;
    let credits = credits_for_orcid(&table, &orcid_id).map_err(store_fault)?;
    info!(orcid_id = %orcid_id, credits = credits.len(), "served credit lookup");
    Ok(envelope(&orcid_id, credits))
}

/// POST: claim credits, then return the post-update credit set. Which rows
/// get claimed depends on the deployment's claim mode.
pub async fn post_claim(
    params: Params,
    ctx: Arc<AppContext>,
) -> Result<warp::reply::Json, Rejection> {
    let claim = match validate_post(&params, &ctx.config) {
        Ok(claim) => claim,
        Err(err) => return Ok(err.into_reply()),
    };

    let table = ctx.sheets.read_table().await.map_err(store_fault)?;
    let claimed_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let writes = match &claim {
        Claim::Single(request) => {
            single_claim_writes(&table, request, &claimed_at).map_err(store_fault)?
        }
        Claim::BatchByType {
            credit_type,
            orcid_id,
        } => batch_claim_writes(&table, credit_type, orcid_id, &claimed_at).map_err(store_fault)?,
    };

    for write in &writes {
        ctx.sheets.write_cell(write).await.map_err(store_fault)?;
    }
    info!(
        orcid_id = %claim.orcid_id(),
        mode = ctx.config.claim_mode.as_str(),
        cells_written = writes.len(),
        "processed claim"
    );

    // Re-read so the response reflects the rows as the sheet now holds them.
    let table = ctx.sheets.read_table().await.map_err(store_fault)?;
    let credits = credits_for_orcid(&table, claim.orcid_id()).map_err(store_fault)?;
    Ok(envelope(claim.orcid_id(), credits))
}

enum Claim {
    Single(ClaimRequest),
    BatchByType {
        credit_type: String,
        orcid_id: String,
    },
}

impl Claim {
    fn orcid_id(&self) -> &str {
        match self {
            Claim::Single(request) => &request.orcid_id,
            Claim::BatchByType { orcid_id, .. } => orcid_id,
        }
    }
}

fn validate_get(params: &Params, config: &Config) -> Result<String, ApiError> {
    validate::shared_secret(params, &config.shared_secret)?;
    validate::orcid_id(params)
}

fn validate_post(params: &Params, config: &Config) -> Result<Claim, ApiError> {
    validate::shared_secret(params, &config.shared_secret)?;
    let orcid_id = validate::orcid_id(params)?;
    let credit_type = validate::non_empty(params, "credit_type")?;
    match config.claim_mode {
        ClaimMode::Single => Ok(Claim::Single(ClaimRequest {
            credit_type,
            orcid_id,
            start_date: validate::optional_timestamp(params, "start_date")?,
            end_date: validate::optional_timestamp(params, "end_date")?,
            affiliation_put_code: validate::non_empty(params, "affiliation_put_code")?,
        })),
        ClaimMode::BatchByType => Ok(Claim::BatchByType {
            credit_type,
            orcid_id,
        }),
    }
}

fn envelope(orcid_id: &str, credits: Vec<Map<String, Value>>) -> warp::reply::Json {
    warp::reply::json(&serde_json::json!({
        "orcid_id": orcid_id,
        "credits": credits,
    }))
}
