use crate::config::Config;
use crate::errors::{AppError, ResultExt};
use crate::gateway_client::GatewayClient;
use crate::models::{normalize_phone, BulkSmsRequest, Lead, LeadStatus, NewLead};
use crate::store::{DashboardSnapshot, DashboardState};
use crate::view::View;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Leads shown on the dashboard panel; the leads view shows the full list.
pub const RECENT_LEADS_SHOWN: usize = 5;

/// Ties the gateway client to the snapshot store and applies the refresh
/// and failure policy on top of both.
pub struct Dashboard {
    gateway: GatewayClient,
    state: DashboardState,
}

impl Dashboard {
    pub fn new(gateway: GatewayClient) -> Self {
        Dashboard {
            gateway,
            state: DashboardState::new(),
        }
    }

    /// The snapshot as of this instant.
    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        self.state.current()
    }

    /// Fetch stats and recent leads concurrently and fold each success
    /// into the snapshot. Either fetch may fail without affecting the
    /// other; a failure logs a warning and keeps the previous data.
    pub async fn refresh(&self) {
        let (stats, leads) = tokio::join!(
            self.gateway.fetch_stats(),
            self.gateway.fetch_recent_leads()
        );

        match stats {
            Ok(summary) => self.state.replace_summary(summary),
            Err(e) => tracing::warn!("Stats refresh failed, keeping previous snapshot: {}", e),
        }

        match leads {
            Ok(list) => self.state.replace_leads(list),
            Err(e) => tracing::warn!("Lead refresh failed, keeping previous snapshot: {}", e),
        }
    }

    /// Validate operator input, post the lead and fold the backend-confirmed
    /// record into the snapshot. Unlike refresh failures, errors here
    /// surface to the caller.
    pub async fn add_lead(
        &self,
        name: &str,
        phone: &str,
        event_type: &str,
        status: LeadStatus,
    ) -> Result<Lead, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("lead name must not be empty".to_string()));
        }
        let event_type = event_type.trim();
        if event_type.is_empty() {
            return Err(AppError::InvalidInput("event type must not be empty".to_string()));
        }
        let phone_number = normalize_phone(phone)?;

        let new_lead = NewLead {
            name: name.to_string(),
            phone_number,
            event_type: event_type.to_string(),
            status,
        };

        let lead = self.gateway.create_lead(&new_lead).await?;
        self.state.record_created(lead.clone());
        Ok(lead)
    }

    /// Normalize every recipient, then dispatch one message to all of them.
    /// Any bad recipient aborts the whole batch before a request is made.
    pub async fn send_bulk_sms(
        &self,
        message: &str,
        recipients: &[String],
    ) -> Result<serde_json::Value, AppError> {
        if message.trim().is_empty() {
            return Err(AppError::InvalidInput("message must not be empty".to_string()));
        }
        if recipients.is_empty() {
            return Err(AppError::InvalidInput(
                "at least one recipient is required".to_string(),
            ));
        }

        let mut normalized = Vec::with_capacity(recipients.len());
        for raw in recipients {
            let number =
                normalize_phone(raw).with_context(|| format!("recipient {:?}", raw))?;
            normalized.push(number);
        }

        let request = BulkSmsRequest {
            message: message.trim().to_string(),
            recipients: normalized,
        };

        self.gateway.send_bulk_sms(&request).await
    }

    /// Fetch the backend-generated activity report.
    pub async fn report(&self) -> Result<serde_json::Value, AppError> {
        self.gateway.fetch_report().await
    }
}

// ============ Panel Rendering ============

/// Render the selected view as plain text. Pure function of the snapshot
/// and configuration; no I/O happens here.
pub fn render(view: View, snapshot: &DashboardSnapshot, config: &Config) -> String {
    match view {
        View::Dashboard => render_dashboard(snapshot),
        View::Leads => render_leads(snapshot),
        View::Analytics => render_analytics(snapshot),
        View::Settings => render_settings(config),
    }
}

fn lead_line(lead: &Lead) -> String {
    let name = lead.name.as_deref().unwrap_or("(unnamed)");
    let event_type = lead.event_type.as_deref().unwrap_or("-");
    let status = lead.status.map(LeadStatus::as_str).unwrap_or("-");
    let phone = if lead.phone_number.is_empty() {
        "-"
    } else {
        lead.phone_number.as_str()
    };
    format!(
        "  #{:<6} {:<24} {:<14} {:<10} {}",
        lead.id, name, event_type, status, phone
    )
}

fn lead_detail(lead: &Lead) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(date) = lead.event_date {
        parts.push(format!("event: {}", date));
    }
    if let Some(guests) = lead.guest_count {
        parts.push(format!("guests: {}", guests));
    }
    if let Some(budget) = lead.budget {
        parts.push(format!("budget: ${}", budget));
    }
    if let Some(source) = lead.source {
        parts.push(format!("source: {}", source));
    }
    if let Some(timestamp) = lead.timestamp {
        parts.push(format!("captured: {}", timestamp.format("%Y-%m-%d")));
    }
    if parts.is_empty() {
        None
    } else {
        Some(format!("          {}", parts.join(" | ")))
    }
}

fn render_dashboard(snapshot: &DashboardSnapshot) -> String {
    let summary = snapshot.summary;
    let mut out = String::new();
    out.push_str("== Dashboard ==\n");
    out.push_str(&format!("Total leads:      {}\n", summary.total_leads));
    out.push_str(&format!("New leads:        {}\n", summary.new_leads));
    out.push_str(&format!("Converted leads:  {}\n", summary.converted_leads));
    out.push_str(&format!("Active events:    {}\n", summary.active_events));

    out.push_str("\nRecent leads:\n");
    if snapshot.leads.is_empty() {
        out.push_str("  (no leads yet)\n");
        return out;
    }

    for lead in snapshot.leads.iter().take(RECENT_LEADS_SHOWN) {
        out.push_str(&lead_line(lead));
        out.push('\n');
    }
    let hidden = snapshot.leads.len().saturating_sub(RECENT_LEADS_SHOWN);
    if hidden > 0 {
        out.push_str(&format!("  (and {} more, see the leads view)\n", hidden));
    }
    out
}

fn render_leads(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!("== Leads ({}) ==\n", snapshot.leads.len()));
    if snapshot.leads.is_empty() {
        out.push_str("  (no leads yet)\n");
        return out;
    }

    for lead in &snapshot.leads {
        out.push_str(&lead_line(lead));
        out.push('\n');
        if let Some(detail) = lead_detail(lead) {
            out.push_str(&detail);
            out.push('\n');
        }
    }
    out
}

fn render_analytics(snapshot: &DashboardSnapshot) -> String {
    let breakdown = &snapshot.breakdown;
    let mut out = String::new();
    out.push_str("== Analytics ==\n");
    out.push_str(&format!("Total leads:      {}\n", breakdown.total_leads));
    out.push_str(&format!("New leads:        {}\n", breakdown.new_leads));
    out.push_str(&format!("Converted leads:  {}\n", breakdown.converted_leads));

    push_counts(&mut out, "By status:", &breakdown.leads_by_status);
    push_counts(&mut out, "By source:", &breakdown.leads_by_source);
    push_counts(&mut out, "By event type:", &breakdown.leads_by_event_type);
    out
}

fn push_counts(out: &mut String, title: &str, counts: &BTreeMap<String, u64>) {
    out.push_str(&format!("\n{}\n", title));
    if counts.is_empty() {
        out.push_str("  (none recorded)\n");
        return;
    }
    for (key, count) in counts {
        out.push_str(&format!("  {:<16} {}\n", key, count));
    }
}

fn render_settings(config: &Config) -> String {
    let mut out = String::new();
    out.push_str("== Settings ==\n");
    out.push_str(&format!("Backend API URL:    {}\n", config.api_base_url));
    out.push_str(&format!("Request timeout:    {}s\n", config.request_timeout_secs));
    out.push_str(&format!("Recent leads shown: {}\n", RECENT_LEADS_SHOWN));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LeadSource, StatsSummary};
    use crate::stats::aggregate;
    use std::time::Duration;

    fn test_config() -> Config {
        Config {
            api_base_url: "http://localhost:3001".to_string(),
            request_timeout_secs: 30,
        }
    }

    fn lead(id: i64, name: &str, status: LeadStatus) -> Lead {
        Lead {
            id,
            phone_number: "+12025550123".to_string(),
            name: Some(name.to_string()),
            event_type: Some("Wedding".to_string()),
            event_date: None,
            guest_count: None,
            budget: None,
            status: Some(status),
            source: Some(LeadSource::Voice),
            timestamp: None,
        }
    }

    fn snapshot_of(leads: Vec<Lead>, summary: StatsSummary) -> DashboardSnapshot {
        let breakdown = aggregate(&leads);
        DashboardSnapshot {
            summary,
            leads,
            breakdown,
        }
    }

    #[test]
    fn dashboard_panel_shows_summary_and_recent_leads() {
        let summary = StatsSummary {
            total_leads: 2,
            new_leads: 1,
            converted_leads: 1,
            active_events: 3,
        };
        let snapshot = snapshot_of(
            vec![
                lead(1, "Ana Lima", LeadStatus::New),
                lead(2, "Bruno Costa", LeadStatus::Booked),
            ],
            summary,
        );

        let out = render(View::Dashboard, &snapshot, &test_config());
        assert!(out.contains("Total leads:      2"));
        assert!(out.contains("Active events:    3"));
        assert!(out.contains("Ana Lima"));
        assert!(out.contains("Bruno Costa"));
    }

    #[test]
    fn dashboard_panel_caps_recent_leads_at_five() {
        let leads: Vec<Lead> = (1..=7)
            .map(|id| lead(id, &format!("Lead {}", id), LeadStatus::New))
            .collect();
        let snapshot = snapshot_of(leads, StatsSummary::default());

        let out = render(View::Dashboard, &snapshot, &test_config());
        assert!(out.contains("Lead 1"));
        assert!(out.contains("Lead 5"));
        assert!(!out.contains("Lead 6"));
        assert!(out.contains("(and 2 more, see the leads view)"));
    }

    #[test]
    fn leads_panel_lists_everything_with_detail() {
        let mut detailed = lead(1, "Maria Silva", LeadStatus::Contacted);
        detailed.event_date = Some(chrono::NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        detailed.guest_count = Some(150);
        detailed.budget = Some(25000.0);
        detailed.timestamp = Some("2024-01-15T10:30:00Z".parse().unwrap());

        let snapshot = snapshot_of(
            vec![detailed, lead(2, "Jo Park", LeadStatus::New)],
            StatsSummary::default(),
        );

        let out = render(View::Leads, &snapshot, &test_config());
        assert!(out.contains("== Leads (2) =="));
        assert!(out.contains("Maria Silva"));
        assert!(out.contains("event: 2024-06-15"));
        assert!(out.contains("guests: 150"));
        assert!(out.contains("budget: $25000"));
        assert!(out.contains("captured: 2024-01-15"));
        assert!(out.contains("Jo Park"));
    }

    #[test]
    fn analytics_panel_zero_fills_statuses() {
        let snapshot = snapshot_of(
            vec![lead(1, "Solo", LeadStatus::New)],
            StatsSummary::default(),
        );

        let out = render(View::Analytics, &snapshot, &test_config());
        assert!(out.contains("By status:"));
        assert!(out.contains("contacted"));
        assert!(out.contains("booked"));
        assert!(out.contains("voice"));
    }

    #[test]
    fn empty_panels_render_placeholders() {
        let snapshot = DashboardSnapshot::default();
        let config = test_config();

        assert!(render(View::Dashboard, &snapshot, &config).contains("(no leads yet)"));
        assert!(render(View::Leads, &snapshot, &config).contains("(no leads yet)"));
        assert!(render(View::Analytics, &snapshot, &config).contains("(none recorded)"));
    }

    #[test]
    fn settings_panel_shows_resolved_config() {
        let snapshot = DashboardSnapshot::default();
        let out = render(View::Settings, &snapshot, &test_config());
        assert!(out.contains("http://localhost:3001"));
        assert!(out.contains("30s"));
    }

    #[tokio::test]
    async fn add_lead_rejects_bad_input_before_any_request() {
        // Unroutable address: a request would fail with a gateway error,
        // so an InvalidInput proves validation ran first.
        let gateway =
            GatewayClient::new("http://127.0.0.1:1".to_string(), Duration::from_secs(1)).unwrap();
        let dashboard = Dashboard::new(gateway);

        let err = dashboard
            .add_lead("", "+12025550123", "Wedding", LeadStatus::New)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let err = dashboard
            .add_lead("Ana", "123", "Wedding", LeadStatus::New)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn bulk_sms_rejects_empty_batches_and_bad_recipients() {
        let gateway =
            GatewayClient::new("http://127.0.0.1:1".to_string(), Duration::from_secs(1)).unwrap();
        let dashboard = Dashboard::new(gateway);

        let err = dashboard.send_bulk_sms("hello", &[]).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let err = dashboard
            .send_bulk_sms("hello", &["not a phone".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::WithContext { .. }));
    }
}
