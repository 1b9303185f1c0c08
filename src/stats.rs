use crate::models::{Lead, LeadStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// Client-side breakdown derived from a list of leads.
///
/// Pure function of its input: same leads in, same breakdown out, in any
/// order. Records with a missing status, source or event type simply do
/// not contribute to the corresponding map; they still count toward
/// `total_leads`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadBreakdown {
    /// Number of leads aggregated, counted over every record.
    pub total_leads: u64,
    /// Leads currently in the `new` status.
    pub new_leads: u64,
    /// Leads that reached `booked`.
    pub converted_leads: u64,
    /// Count per capture channel; only channels actually observed appear.
    pub leads_by_source: BTreeMap<String, u64>,
    /// Count per pipeline status; every known status appears, zero-filled.
    pub leads_by_status: BTreeMap<String, u64>,
    /// Count per event type; open set, only observed values appear.
    pub leads_by_event_type: BTreeMap<String, u64>,
}

/// Aggregate a slice of leads into a [`LeadBreakdown`].
pub fn aggregate(leads: &[Lead]) -> LeadBreakdown {
    let mut leads_by_source: BTreeMap<String, u64> = BTreeMap::new();
    let mut leads_by_event_type: BTreeMap<String, u64> = BTreeMap::new();

    // Statuses are a closed set, so absent ones still render as zero.
    let mut leads_by_status: BTreeMap<String, u64> = LeadStatus::ALL
        .iter()
        .map(|status| (status.as_str().to_string(), 0))
        .collect();

    let mut new_leads = 0u64;
    let mut converted_leads = 0u64;

    for lead in leads {
        if let Some(status) = lead.status {
            *leads_by_status.entry(status.as_str().to_string()).or_insert(0) += 1;
            match status {
                LeadStatus::New => new_leads += 1,
                LeadStatus::Booked => converted_leads += 1,
                LeadStatus::Contacted => {}
            }
        }

        if let Some(source) = lead.source {
            *leads_by_source.entry(source.as_str().to_string()).or_insert(0) += 1;
        }

        if let Some(event_type) = &lead.event_type {
            *leads_by_event_type.entry(event_type.clone()).or_insert(0) += 1;
        }
    }

    LeadBreakdown {
        total_leads: leads.len() as u64,
        new_leads,
        converted_leads,
        leads_by_source,
        leads_by_status,
        leads_by_event_type,
    }
}
