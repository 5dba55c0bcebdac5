//! Where report data comes from.

use crate::error::SourceError;
use crate::period::ReportPeriod;
use async_trait::async_trait;
use smartspend_types::ReportData;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch(&self, bank_account_id: i64, period: ReportPeriod) -> Result<ReportData, SourceError>;
}

/// Reads a saved report-data payload. The account and period are not
/// checked against the file contents.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ReportSource for JsonFileSource {
    async fn fetch(&self, bank_account_id: i64, period: ReportPeriod) -> Result<ReportData, SourceError> {
        log::debug!(
            "Reading report data for account {} ({}) from {}",
            bank_account_id,
            period,
            self.path.display()
        );
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io { path: self.path.clone(), source })?;
        Ok(ReportData::from_json(&json)?)
    }
}

/// Fixed data per account, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    accounts: HashMap<i64, ReportData>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, bank_account_id: i64, data: ReportData) -> Self {
        self.accounts.insert(bank_account_id, data);
        self
    }
}

#[async_trait]
impl ReportSource for InMemorySource {
    async fn fetch(&self, bank_account_id: i64, _period: ReportPeriod) -> Result<ReportData, SourceError> {
        self.accounts
            .get(&bank_account_id)
            .cloned()
            .ok_or_else(|| SourceError::Status {
                status: 404,
                url: format!("memory://accounts/{}", bank_account_id),
            })
    }
}

#[cfg(feature = "http")]
pub use http::HttpReportSource;

#[cfg(feature = "http")]
mod http {
    use super::*;

    /// The SmartSpend backend's `report/report-data` endpoint.
    #[derive(Debug, Clone)]
    pub struct HttpReportSource {
        client: reqwest::Client,
        base_url: String,
        token: Option<String>,
    }

    impl HttpReportSource {
        /// `base_url` is the API root, e.g. `http://localhost:8080/api/v1`.
        pub fn new(base_url: impl Into<String>) -> Self {
            Self {
                client: reqwest::Client::new(),
                base_url: base_url.into().trim_end_matches('/').to_string(),
                token: None,
            }
        }

        pub fn with_token(mut self, token: impl Into<String>) -> Self {
            self.token = Some(token.into());
            self
        }

        pub fn with_client(mut self, client: reqwest::Client) -> Self {
            self.client = client;
            self
        }

        pub fn endpoint(&self) -> String {
            format!("{}/report/report-data", self.base_url)
        }
    }

    #[async_trait]
    impl ReportSource for HttpReportSource {
        async fn fetch(&self, bank_account_id: i64, period: ReportPeriod) -> Result<ReportData, SourceError> {
            let url = self.endpoint();
            let mut request = self.client.get(&url).query(&[
                ("bankAccountId", bank_account_id.to_string()),
                ("year", period.year().to_string()),
                ("month", period.month().to_string()),
            ]);
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            log::debug!("GET {} (account {}, {})", url, bank_account_id, period);
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(SourceError::Status { status: status.as_u16(), url });
            }
            Ok(response.json::<ReportData>().await?)
        }
    }

}
