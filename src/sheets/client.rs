// src/sheets/client.rs

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::a1;
use super::table::{CellWrite, Table};
use crate::config::Config;

/// Thin client over the Google Sheets values API: read a whole sheet as
/// ordered rows of strings, write single cells back. The sheet itself owns
/// all row data; nothing is cached between calls.
pub struct SheetsClient {
    http: Client,
    base: Url,
    token: String,
    spreadsheet_id: String,
    sheet_name: String,
}

/// Wire shape of a values read/write, per the v4 API.
#[derive(Debug, Serialize, Deserialize)]
struct ValueRange {
    range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<Vec<Vec<Value>>>,
}

impl SheetsClient {
    pub fn new(config: &Config) -> Result<Self> {
        let base = Url::parse(&config.sheets_base_url)
            .with_context(|| format!("parsing sheets base URL `{}`", config.sheets_base_url))?;
        Ok(SheetsClient {
            http: Client::new(),
            base,
            token: config.sheets_api_token.clone(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            sheet_name: config.sheet_name.clone(),
        })
    }

    fn values_url(&self, range: &str) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("sheets base URL cannot be a base"))?
            .extend(["v4", "spreadsheets", &self.spreadsheet_id, "values", range]);
        Ok(url)
    }

    /// Fetch every row of the configured sheet and snapshot it.
    pub async fn read_table(&self) -> Result<Table> {
        let mut url = self.values_url(&a1::sheet_range(&self.sheet_name))?;
        url.query_pairs_mut().append_pair("majorDimension", "ROWS");

        debug!(%url, "reading sheet values");
        let body: ValueRange = self
            .http
            .get(url.clone())
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()
            .with_context(|| format!("non-success status from {}", url))?
            .json()
            .await
            .context("decoding sheet values response")?;

        let values = body
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();
        Table::from_values(values)
    }

    /// Write one value into one cell of the live sheet.
    pub async fn write_cell(&self, write: &CellWrite) -> Result<()> {
        let range = a1::cell_range(&self.sheet_name, write.row, write.col);
        let mut url = self.values_url(&range)?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW");

        let body = ValueRange {
            range: range.clone(),
            values: Some(vec![vec![Value::String(write.value.clone())]]),
        };

        debug!(range = %range, "writing cell");
        self.http
            .put(url.clone())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("PUT {} failed", url))?
            .error_for_status()
            .with_context(|| format!("non-success status writing {}", range))?;
        Ok(())
    }
}

/// The values API returns whatever JSON type the cell renders to; the table
/// logic works purely in strings.
fn cell_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
