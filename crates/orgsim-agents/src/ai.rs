//! The AI participant.
//!
//! The AI hands out a fixed amount of knowledge per request and counts the
//! requests. Once per simulation step the count is checked against two
//! thresholds and the contribution moves up or down by a fixed increment:
//!
//! - usage `>` evolution threshold: contribution grows
//! - usage `<` decrement threshold: contribution shrinks, never below
//!   [`MIN_CONTRIBUTION`]
//!
//! The counter is cleared after every check, so each step is judged on its
//! own usage alone.

use serde::{Deserialize, Serialize};
use tracing::info;

use orgsim_types::{AgentId, EvolutionOutcome};

/// Lower bound on the AI's knowledge contribution.
pub const MIN_CONTRIBUTION: f64 = 0.5;

/// The single generative-AI participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAgent {
    /// Node id in the social network (one past the last employee).
    pub id: AgentId,
    /// Knowledge handed out per request.
    pub contribution: f64,
    /// Requests served since the last evolution check.
    pub usage: u64,
}

impl AiAgent {
    /// Create an AI participant with zero usage.
    pub const fn new(id: AgentId, contribution: f64) -> Self {
        Self {
            id,
            contribution,
            usage: 0,
        }
    }

    /// Serve one request: count it and return the current contribution.
    pub const fn provide_information(&mut self) -> f64 {
        self.usage = self.usage.saturating_add(1);
        self.contribution
    }

    /// Run the end-of-step evolution check and clear the usage counter.
    ///
    /// The evolution threshold is checked first; the decrement threshold
    /// only applies when the AI did not evolve. Usage is reset even when
    /// neither branch fires.
    pub fn evolve(
        &mut self,
        evolution_threshold: u64,
        decrement_threshold: u64,
        increment: f64,
    ) -> EvolutionOutcome {
        let usage = self.usage;
        self.usage = 0;

        if usage > evolution_threshold {
            self.contribution += increment;
            info!(
                ai = %self.id,
                usage,
                contribution = self.contribution,
                "AI evolved"
            );
            EvolutionOutcome::Evolved
        } else if usage < decrement_threshold {
            self.contribution = (self.contribution - increment).max(MIN_CONTRIBUTION);
            info!(
                ai = %self.id,
                usage,
                contribution = self.contribution,
                "AI diminished"
            );
            EvolutionOutcome::Diminished
        } else {
            EvolutionOutcome::Unchanged
        }
    }
}
