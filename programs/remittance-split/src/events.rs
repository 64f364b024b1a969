use serde::Serialize;

use crate::state::SplitConfig;

/// Tracing target every structured event is logged under
pub const EVENT_TARGET: &str = "remittance_split::events";

/// A structured record published through `emit`
pub trait Event: Serialize {
    const NAME: &'static str;
}

/// Publishes an event as a JSON payload on the event target
pub fn emit<E: Event>(event: &E) {
    match serde_json::to_string(event) {
        Ok(payload) => tracing::info!(target: EVENT_TARGET, event = E::NAME, %payload),
        Err(err) => tracing::warn!(target: EVENT_TARGET, event = E::NAME, %err, "event not serializable"),
    }
}

#[derive(Debug, Serialize)]
pub struct SplitterConfigured {
    pub config: SplitConfig,
}

impl Event for SplitterConfigured {
    const NAME: &'static str = "splitter_configured";
}

#[cfg(feature = "verbose")]
#[derive(Debug, Serialize)]
pub struct SplitCalculated {
    pub total_amount: i128,
    pub spending: i128,
    pub savings: i128,
    pub bills: i128,
    pub insurance: i128,
}

#[cfg(feature = "verbose")]
impl Event for SplitCalculated {
    const NAME: &'static str = "split_calculated";
}

#[derive(Debug, Serialize)]
pub struct ScenarioCompleted<'a> {
    pub scenario: &'a str,
    pub outcome: &'static str,
    pub calls: usize,
    pub total_remitted: i128,
}

impl Event for ScenarioCompleted<'_> {
    const NAME: &'static str = "scenario_completed";
}

#[derive(Debug, Serialize)]
pub struct SuiteCompleted {
    pub config: SplitConfig,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

impl Event for SuiteCompleted {
    const NAME: &'static str = "suite_completed";
}
