use crate::config::Config;
use crate::errors::{AppError, ResultExt};
use crate::models::{BulkSmsRequest, Lead, NewLead, StatsSummary};
use std::time::Duration;

/// Client for the EventFlow backend REST API.
///
/// Every backend endpoint the console talks to lives here; callers never
/// assemble URLs themselves. One request per call: no retries, no backoff,
/// no in-flight deduplication.
#[derive(Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    /// Creates a new `GatewayClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Backend base URL without a trailing slash.
    /// * `timeout` - Per-request timeout.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Gateway(format!("Failed to create backend client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Creates a client from the resolved runtime configuration.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(config.api_base_url.clone(), config.request_timeout())
    }

    /// Fetches the backend-computed stats summary.
    pub async fn fetch_stats(&self) -> Result<StatsSummary, AppError> {
        let url = format!("{}/api/stats", self.base_url);
        tracing::debug!("Fetching stats summary: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("Stats request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Gateway(format!(
                "Stats endpoint returned {}: {}",
                status, error_text
            )));
        }

        let summary = response
            .json()
            .await
            .map_err(|e| AppError::Gateway(format!("Failed to parse stats response: {}", e)))?;

        Ok(summary)
    }

    /// Fetches the most recent leads, newest first.
    pub async fn fetch_recent_leads(&self) -> Result<Vec<Lead>, AppError> {
        let url = format!("{}/api/leads/recent", self.base_url);
        tracing::debug!("Fetching recent leads: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("Recent leads request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Gateway(format!(
                "Recent leads endpoint returned {}: {}",
                status, error_text
            )));
        }

        let leads: Vec<Lead> = response.json().await.map_err(|e| {
            AppError::Gateway(format!("Failed to parse recent leads response: {}", e))
        })?;

        tracing::debug!("Fetched {} recent leads", leads.len());
        Ok(leads)
    }

    /// Creates a lead and returns the backend-confirmed record.
    ///
    /// The returned `Lead` carries the backend-assigned id and timestamp;
    /// it is the record to fold into local state, not the request payload.
    pub async fn create_lead(&self, new_lead: &NewLead) -> Result<Lead, AppError> {
        let url = format!("{}/api/leads", self.base_url);
        tracing::info!("Creating lead: {}", new_lead.name);

        let response = self
            .client
            .post(&url)
            .json(new_lead)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("Lead creation request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Gateway(format!(
                "Lead creation failed {}: {}",
                status, error_text
            )));
        }

        let lead: Lead = response.json().await.map_err(|e| {
            AppError::Gateway(format!("Failed to parse lead creation response: {}", e))
        })?;

        tracing::info!("✓ Lead created: {}", lead.id);
        Ok(lead)
    }

    /// Sends one message to a batch of recipients.
    ///
    /// The dispatch summary is returned as raw JSON; its shape is the
    /// backend's business and the console only prints it.
    pub async fn send_bulk_sms(
        &self,
        request: &BulkSmsRequest,
    ) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/api/sms/bulk", self.base_url);
        tracing::info!("Dispatching SMS to {} recipients", request.recipients.len());

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("Bulk SMS request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Gateway(format!(
                "Bulk SMS dispatch failed {}: {}",
                status, error_text
            )));
        }

        let outcome = response.json().await.map_err(|e| {
            AppError::Gateway(format!("Failed to parse bulk SMS response: {}", e))
        })?;

        tracing::info!("✓ SMS batch accepted for {} recipients", request.recipients.len());
        Ok(outcome)
    }

    /// Fetches the lead activity report.
    pub async fn fetch_report(&self) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/api/reports", self.base_url);
        tracing::debug!("Fetching report: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Report request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Gateway(format!(
                "Report endpoint returned {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .context("Failed to parse report response")
    }
}
