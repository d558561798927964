//! Bounded run loop.
//!
//! [`run_simulation`] steps a [`Simulation`] a fixed number of times,
//! hands every [`StepSummary`] to a [`StepCallback`], and logs progress on
//! every tenth step.

use tracing::{info, warn};

use orgsim_types::{MetricsSeries, StepMetrics};

use crate::simulation::Simulation;
use crate::step::StepSummary;

/// Steps between progress log lines.
const PROGRESS_INTERVAL: u64 = 10;

/// Result of a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// The seed the run used.
    pub seed: u64,
    /// Total number of steps executed by this call.
    pub total_steps: u64,
    /// Metrics of the last step, if any step ran.
    pub final_metrics: Option<StepMetrics>,
    /// Every metrics row recorded so far, in step order.
    pub series: MetricsSeries,
}

/// Callback invoked after each step completes.
///
/// Implementations can stream rows to a reporting collaborator or collect
/// summaries for inspection. The callback only gets shared access to the
/// simulation.
pub trait StepCallback {
    /// Called after a step completes.
    fn on_step(&mut self, summary: &StepSummary, simulation: &Simulation);
}

/// A no-op step callback.
pub struct NoOpCallback;

impl StepCallback for NoOpCallback {
    fn on_step(&mut self, _summary: &StepSummary, _simulation: &Simulation) {}
}

/// Run `steps` steps and return the accumulated metrics.
pub fn run_simulation(
    simulation: &mut Simulation,
    steps: u64,
    callback: &mut dyn StepCallback,
) -> SimulationResult {
    info!(
        steps,
        seed = simulation.seed(),
        employees = simulation.employees().len(),
        "Simulation starting"
    );

    let mut final_metrics = None;
    for i in 1..=steps {
        let summary = simulation.step();
        callback.on_step(&summary, simulation);
        if i.checked_rem(PROGRESS_INTERVAL) == Some(0) {
            info!(
                step = summary.metrics.step,
                average_knowledge = summary.metrics.average_knowledge,
                ai_contribution = summary.metrics.ai_contribution,
                "Step {i} completed"
            );
        }
        final_metrics = Some(summary.metrics);
    }

    SimulationResult {
        seed: simulation.seed(),
        total_steps: steps,
        final_metrics,
        series: simulation.metrics().clone(),
    }
}

/// Log the outcome of a run.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        seed = result.seed,
        total_steps = result.total_steps,
        recorded_steps = result.series.len(),
        "Simulation ended"
    );

    if let Some(ref metrics) = result.final_metrics {
        info!(
            step = metrics.step,
            average_knowledge = metrics.average_knowledge,
            positive = metrics.attitudes.positive,
            neutral = metrics.attitudes.neutral,
            negative = metrics.attitudes.negative,
            ai_contribution = metrics.ai_contribution,
            network_centrality = metrics.network_centrality,
            "Final step metrics"
        );
    } else {
        warn!("Simulation ended with no steps executed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    struct Recorder {
        steps: Vec<u64>,
        usage_at_start: Vec<u64>,
    }

    impl StepCallback for Recorder {
        fn on_step(&mut self, summary: &StepSummary, simulation: &Simulation) {
            self.steps.push(summary.metrics.step);
            self.usage_at_start.push(simulation.ai().usage);
        }
    }

    fn small_config() -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.population.employees = 40;
        config.organization.depth = 4;
        config
    }

    #[test]
    fn runs_requested_steps() {
        let mut sim = Simulation::with_seed(small_config(), 42).unwrap();
        let result = run_simulation(&mut sim, 25, &mut NoOpCallback);
        assert_eq!(result.total_steps, 25);
        assert_eq!(result.series.len(), 25);
        assert_eq!(result.final_metrics.map(|m| m.step), Some(25));
        assert_eq!(result.seed, 42);
        log_simulation_end(&result);
    }

    #[test]
    fn callback_sees_every_step_with_usage_reset() {
        let mut sim = Simulation::with_seed(small_config(), 42).unwrap();
        let mut recorder = Recorder {
            steps: Vec::new(),
            usage_at_start: Vec::new(),
        };
        run_simulation(&mut sim, 5, &mut recorder);
        assert_eq!(recorder.steps, vec![1, 2, 3, 4, 5]);
        assert!(recorder.usage_at_start.iter().all(|&u| u == 0));
    }

    #[test]
    fn zero_steps_yields_empty_result() {
        let mut sim = Simulation::with_seed(small_config(), 42).unwrap();
        let result = run_simulation(&mut sim, 0, &mut NoOpCallback);
        assert!(result.final_metrics.is_none());
        assert!(result.series.is_empty());
        log_simulation_end(&result);
    }
}
