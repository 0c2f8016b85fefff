//! Waiting for asynchronous page content after an interaction.
//!
//! Callers say *which* interaction just happened; the policy decides how to
//! wait. [`FixedSettle`] sleeps a configured duration per phase, which is a
//! coarse time-based wait rather than a readiness signal.

use std::time::Duration;

use mapscrape_core::SettleDelays;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlePhase {
    /// After the initial page load.
    Navigation,
    /// After typing the query into the search box.
    QueryFill,
    /// After submitting the query.
    QuerySubmit,
    /// After each scroll step in the results panel.
    Scroll,
    /// After opening a listing's detail view.
    Detail,
}

#[allow(async_fn_in_trait)]
pub trait SettlePolicy {
    async fn settle(&self, phase: SettlePhase);
}

#[derive(Debug, Clone, Copy)]
pub struct FixedSettle {
    delays: SettleDelays,
}

impl FixedSettle {
    #[must_use]
    pub fn new(delays: SettleDelays) -> Self {
        Self { delays }
    }

    #[must_use]
    pub fn delay_for(&self, phase: SettlePhase) -> Duration {
        match phase {
            SettlePhase::Navigation => self.delays.navigation,
            SettlePhase::QueryFill => self.delays.query_fill,
            SettlePhase::QuerySubmit => self.delays.query_submit,
            SettlePhase::Scroll => self.delays.scroll,
            SettlePhase::Detail => self.delays.detail,
        }
    }
}

impl SettlePolicy for FixedSettle {
    async fn settle(&self, phase: SettlePhase) {
        let delay = self.delay_for(phase);
        if delay.is_zero() {
            return;
        }
        tracing::trace!(?phase, delay_ms = delay.as_millis(), "settling");
        tokio::time::sleep(delay).await;
    }
}
