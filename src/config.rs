// src/config.rs

use anyhow::{Context, Result};
use std::env;

/// What a POST to this deployment claims: one specific credit, or every
/// credit of a given type. The two are separate deployments, never mixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimMode {
    Single,
    BatchByType,
}

impl ClaimMode {
    pub fn as_str(&self) -> &str {
        match self {
            ClaimMode::Single => "single",
            ClaimMode::BatchByType => "batch",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "single" => Some(ClaimMode::Single),
            "batch" => Some(ClaimMode::BatchByType),
            _ => None,
        }
    }
}

/// Startup configuration, read once from the environment and never mutated.
#[derive(Clone, Debug)]
pub struct Config {
    pub shared_secret: String,
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub sheets_api_token: String,
    pub sheets_base_url: String,
    pub claim_mode: ClaimMode,
    pub port: u16,
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("environment variable {} is not set", name))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let claim_mode = match env::var("CLAIM_MODE") {
            Ok(raw) => ClaimMode::from_str(&raw)
                .ok_or_else(|| anyhow::anyhow!("CLAIM_MODE must be `single` or `batch`, got `{}`", raw))?,
            Err(_) => ClaimMode::Single,
        };
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a number")?;

        Ok(Config {
            shared_secret: required("SHARED_SECRET")?,
            spreadsheet_id: required("SPREADSHEET_ID")?,
            sheet_name: required("SHEET_NAME")?,
            sheets_api_token: required("SHEETS_API_TOKEN")?,
            sheets_base_url: env::var("SHEETS_BASE_URL")
                .unwrap_or_else(|_| "https://sheets.googleapis.com".to_string()),
            claim_mode,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_mode_from_str() {
        assert_eq!(ClaimMode::from_str("single"), Some(ClaimMode::Single));
        assert_eq!(ClaimMode::from_str(" Batch "), Some(ClaimMode::BatchByType));
        assert_eq!(ClaimMode::from_str("both"), None);
    }

    #[test]
    fn test_claim_mode_round_trip() {
        for mode in [ClaimMode::Single, ClaimMode::BatchByType] {
            assert_eq!(ClaimMode::from_str(mode.as_str()), Some(mode));
        }
    }
}
