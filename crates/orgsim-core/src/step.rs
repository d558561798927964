//! The per-step protocol.
//!
//! Each step runs four phases in order:
//!
//! 1. **Interactions** -- every employee, in id order: decay, one social
//!    partner, one organizational partner, the AI, attitude update.
//! 2. **Evolution** -- the AI checks this step's usage and resets it.
//! 3. **Mutation** -- on every `change_frequency`-th step, a coin flip adds
//!    or removes `edges_per_change` random social edges.
//! 4. **Metrics** -- one [`StepMetrics`] row is recorded.
//!
//! Employees are updated in place. A partner met later in the same step
//! already carries whatever earlier interactions did to it, so the
//! iteration order is part of the semantics.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, info};

use orgsim_agents::{Employee, Participant};
use orgsim_types::{AgentId, EvolutionOutcome, NetworkMutation, StepMetrics};

use crate::simulation::Simulation;

/// Summary of a single step's execution.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSummary {
    /// The metrics row recorded for this step.
    pub metrics: StepMetrics,
    /// AI requests served this step, observed before the reset.
    pub ai_usage: u64,
    /// Result of the AI evolution check.
    pub evolution: EvolutionOutcome,
    /// Social network rewiring applied this step, if any.
    pub mutation: Option<NetworkMutation>,
}

/// Execute one complete step of the simulation.
pub fn run_step(sim: &mut Simulation) -> StepSummary {
    sim.current_step = sim.current_step.saturating_add(1);
    let step = sim.current_step;

    // --- Phase 1: Interactions ---
    for index in 0..sim.employees.len() {
        phase_employee_turn(sim, index);
    }

    // --- Phase 2: Evolution ---
    let ai_usage = sim.ai.usage;
    let ai_cfg = &sim.config.ai;
    let evolution = sim.ai.evolve(
        ai_cfg.evolution_threshold,
        ai_cfg.decrement_threshold,
        ai_cfg.increment,
    );

    // --- Phase 3: Mutation ---
    let mutation = phase_mutation(sim, step);

    // --- Phase 4: Metrics ---
    let metrics = sim.observe(step);
    sim.metrics.push(metrics);

    debug!(
        step,
        average_knowledge = metrics.average_knowledge,
        ai_usage,
        ai_contribution = metrics.ai_contribution,
        ?evolution,
        ?mutation,
        "Step completed"
    );

    StepSummary {
        metrics,
        ai_usage,
        evolution,
        mutation,
    }
}

/// One employee's turn: decay, social partner, org partner, AI, attitude.
fn phase_employee_turn(sim: &mut Simulation, index: usize) {
    let Some(id) = AgentId::from_index(index) else {
        return;
    };

    let decay_rate = sim.config.knowledge.decay_rate;
    if let Some(employee) = sim.employees.get_mut(index) {
        employee.decay(decay_rate);
    }

    let social_partner = sim.social.neighbors(id).choose(&mut sim.rng).copied();
    if let Some(partner) = social_partner {
        interact_with_participant(sim, index, partner);
    }

    if sim.organization.contains(id) {
        let org_partner = sim.organization.neighbors(id).choose(&mut sim.rng).copied();
        if let Some(partner) = org_partner {
            interact_with_participant(sim, index, partner);
        }
    }

    let positive = sim.config.knowledge.positive_attitude_threshold;
    let negative = sim.config.knowledge.negative_attitude_threshold;
    if let Some(employee) = sim.employees.get_mut(index) {
        employee.interact_with_ai(&mut sim.ai);
        employee.update_attitude(positive, negative);
    }
}

/// Peer interaction with whatever `partner` resolves to.
///
/// Employees exchange knowledge. Meeting the AI node through a graph edge
/// is not a use of the AI and changes nothing. Ids past the AI (hierarchy
/// nodes with no backing employee) are skipped.
fn interact_with_participant(sim: &mut Simulation, index: usize, partner: AgentId) {
    match Participant::resolve(partner, sim.employees.len()) {
        Some(Participant::Employee(other)) => {
            if let Some((a, b)) = pair_mut(&mut sim.employees, index, other) {
                a.interact_with_peer(b);
            }
        }
        Some(Participant::Ai) | None => {}
    }
}

/// Borrow two distinct employees mutably, `first` then `second`.
fn pair_mut(
    employees: &mut [Employee],
    first: usize,
    second: usize,
) -> Option<(&mut Employee, &mut Employee)> {
    let (low, high) = (first.min(second), first.max(second));
    if low == high || high >= employees.len() {
        return None;
    }
    let (head, tail) = employees.split_at_mut(high);
    let low_ref = head.get_mut(low)?;
    let high_ref = tail.first_mut()?;
    if first < second {
        Some((low_ref, high_ref))
    } else {
        Some((high_ref, low_ref))
    }
}

/// Rewire the social network if this step is due.
fn phase_mutation(sim: &mut Simulation, step: u64) -> Option<NetworkMutation> {
    let dynamics = &sim.config.dynamics;
    if !dynamics.enabled || dynamics.change_frequency == 0 {
        return None;
    }
    if step.checked_rem(dynamics.change_frequency) != Some(0) {
        return None;
    }

    let count = dynamics.edges_per_change;
    let mutation = if sim.rng.random_bool(0.5) {
        NetworkMutation::Added(sim.social.add_random_edges(count, &mut sim.rng))
    } else {
        NetworkMutation::Removed(sim.social.remove_random_edges(count, &mut sim.rng))
    };

    info!(
        step,
        ?mutation,
        requested = count,
        edges = sim.social.edge_count(),
        "Social network modified"
    );
    Some(mutation)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use orgsim_types::{Attitude, Role};

    use super::*;

    fn staff(id: u32, knowledge: f64) -> Employee {
        Employee::new(AgentId(id), Role::Staff, knowledge, Attitude::Neutral)
    }

    #[test]
    fn pair_mut_keeps_argument_order() {
        let mut employees = vec![staff(0, 1.0), staff(1, 2.0), staff(2, 3.0)];
        let (a, b) = pair_mut(&mut employees, 2, 0).unwrap();
        assert_eq!(a.id, AgentId(2));
        assert_eq!(b.id, AgentId(0));
        let (a, b) = pair_mut(&mut employees, 0, 1).unwrap();
        assert_eq!(a.id, AgentId(0));
        assert_eq!(b.id, AgentId(1));
    }

    #[test]
    fn pair_mut_rejects_same_or_missing_index() {
        let mut employees = vec![staff(0, 1.0), staff(1, 2.0)];
        assert!(pair_mut(&mut employees, 1, 1).is_none());
        assert!(pair_mut(&mut employees, 0, 5).is_none());
        assert!(pair_mut(&mut employees, 5, 0).is_none());
        assert!(pair_mut(&mut employees, 0, 2).is_none());
    }
}
