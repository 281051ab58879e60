// Runtime configuration, read from the environment (a local .env file is honoured).

use crate::modules::attendance::core::policy::{DEFAULT_APPROVAL_THRESHOLD, DecisionPolicy};
use crate::modules::attendance::core::record::DuplicatePolicy;
use crate::modules::attendance::use_cases::ingest_spreadsheet::header::DEFAULT_HEADER_SCAN_LIMIT;
use crate::modules::attendance::use_cases::ingest_spreadsheet::ingestor::{
    DEFAULT_BATCH_SIZE, IngestOptions,
};
use crate::shared::infrastructure::participation_store::retrying::RetryPolicy;
use anyhow::{Context, bail};
use std::{env, fmt::Display, str::FromStr, time::Duration};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub approval_threshold: f64,
    pub ingest_batch_size: usize,
    pub header_scan_limit: usize,
    pub duplicate_policy: DuplicatePolicy,
    pub store_timeout_ms: u64,
    pub store_retries: u32,
    pub max_upload_bytes: usize,
    pub notification_capacity: usize,
    pub participations_file: Option<String>,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            info!(path = %path.display(), "loaded environment file");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let config = Self {
            host: try_load(&lookup, "HOST", "0.0.0.0")?,
            port: try_load(&lookup, "PORT", "8080")?,
            approval_threshold: try_load(
                &lookup,
                "APPROVAL_THRESHOLD",
                &DEFAULT_APPROVAL_THRESHOLD.to_string(),
            )?,
            ingest_batch_size: try_load(&lookup, "INGEST_BATCH_SIZE", &DEFAULT_BATCH_SIZE.to_string())?,
            header_scan_limit: try_load(
                &lookup,
                "HEADER_SCAN_LIMIT",
                &DEFAULT_HEADER_SCAN_LIMIT.to_string(),
            )?,
            duplicate_policy: try_load(&lookup, "DUPLICATE_POLICY", "last-row-wins")?,
            store_timeout_ms: try_load(&lookup, "STORE_TIMEOUT_MS", "5000")?,
            store_retries: try_load(&lookup, "STORE_RETRIES", "2")?,
            max_upload_bytes: try_load(&lookup, "MAX_UPLOAD_BYTES", "10485760")?,
            notification_capacity: try_load(&lookup, "NOTIFICATION_CAPACITY", "256")?,
            participations_file: lookup("PARTICIPATIONS_FILE").filter(|path| !path.trim().is_empty()),
        };
        if !(0.0..=100.0).contains(&config.approval_threshold) {
            bail!(
                "APPROVAL_THRESHOLD must be between 0 and 100, got {}",
                config.approval_threshold
            );
        }
        if config.ingest_batch_size == 0 {
            bail!("INGEST_BATCH_SIZE must be at least 1");
        }
        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn decision_policy(&self) -> DecisionPolicy {
        DecisionPolicy::new(self.approval_threshold)
    }

    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            header_scan_limit: self.header_scan_limit,
            batch_size: self.ingest_batch_size,
            duplicate_policy: self.duplicate_policy,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            timeout: Duration::from_millis(self.store_timeout_ms),
            retries: self.store_retries,
            ..RetryPolicy::default()
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse::<T>()
        .map_err(|error| anyhow::anyhow!("{error}"))
        .with_context(|| format!("invalid {key} value: {raw}"))
}
