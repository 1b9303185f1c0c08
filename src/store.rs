use crate::models::{Lead, StatsSummary};
use crate::stats::{aggregate, LeadBreakdown};
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Immutable point-in-time view of everything the console renders.
///
/// Readers hold an `Arc` to a snapshot and are never affected by later
/// refreshes; updates swap in a whole new snapshot instead of mutating.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    /// Backend-computed stats, as of the last successful fetch.
    pub summary: StatsSummary,
    /// Recent leads, most recent first, as served by the backend.
    pub leads: Vec<Lead>,
    /// Breakdown recomputed locally from `leads` on every swap.
    pub breakdown: LeadBreakdown,
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        DashboardSnapshot {
            summary: StatsSummary::default(),
            leads: Vec::new(),
            breakdown: aggregate(&[]),
        }
    }
}

/// Shared holder for the current [`DashboardSnapshot`].
///
/// Starts out with the zeroed default so the console renders before the
/// first fetch completes. A failed refresh leaves the previous snapshot
/// in place.
pub struct DashboardState {
    snapshot: ArcSwap<DashboardSnapshot>,
}

impl DashboardState {
    pub fn new() -> Self {
        DashboardState {
            snapshot: ArcSwap::from_pointee(DashboardSnapshot::default()),
        }
    }

    /// Cheap handle to the snapshot as of this instant.
    pub fn current(&self) -> Arc<DashboardSnapshot> {
        self.snapshot.load_full()
    }

    /// Swap in a freshly fetched lead list, recomputing the breakdown.
    /// The stats summary carries over from the previous snapshot.
    pub fn replace_leads(&self, leads: Vec<Lead>) {
        self.snapshot.rcu(|prev| {
            let breakdown = aggregate(&leads);
            DashboardSnapshot {
                summary: prev.summary,
                leads: leads.clone(),
                breakdown,
            }
        });
        tracing::debug!("lead list snapshot replaced");
    }

    /// Swap in a freshly fetched stats summary, keeping the lead list.
    pub fn replace_summary(&self, summary: StatsSummary) {
        self.snapshot.rcu(|prev| DashboardSnapshot {
            summary,
            leads: prev.leads.clone(),
            breakdown: prev.breakdown.clone(),
        });
        tracing::debug!("stats summary snapshot replaced");
    }

    /// Fold a backend-confirmed lead into the current snapshot without
    /// waiting for the next refresh. Newest leads sit at the front.
    pub fn record_created(&self, lead: Lead) {
        self.snapshot.rcu(|prev| {
            let mut leads = Vec::with_capacity(prev.leads.len() + 1);
            leads.push(lead.clone());
            leads.extend(prev.leads.iter().cloned());
            let breakdown = aggregate(&leads);
            DashboardSnapshot {
                summary: prev.summary,
                leads,
                breakdown,
            }
        });
        tracing::debug!("created lead folded into snapshot");
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        DashboardState::new()
    }
}
