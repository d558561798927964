//! Employee state and interaction rules.
//!
//! An employee starts with knowledge equal to its expertise. Expertise never
//! changes and serves as the baseline for attitude drift. Knowledge moves
//! through four operations, all applied in place:
//!
//! - [`Employee::decay`] -- subtract a fixed rate, floored at zero
//! - [`Employee::interact_with_peer`] -- both parties take the mean of their
//!   knowledge, scaled by their own role's [`behavior_modifier`]
//! - [`Employee::interact_with_ai`] -- absorb a share of the AI's
//!   contribution, sized by [`absorption_fraction`]
//! - [`Employee::update_attitude`] -- move the attitude one category toward
//!   the direction of cumulative drift

use rand::Rng;
use serde::{Deserialize, Serialize};

use orgsim_types::{AgentId, Attitude, Role};

use crate::ai::AiAgent;

/// Lowest possible initial expertise.
pub const MIN_EXPERTISE: f64 = 1.0;

/// Highest possible initial expertise.
pub const MAX_EXPERTISE: f64 = 10.0;

/// Role draw for non-root employees, in percent.
const ROLE_WEIGHTS: [(Role, u32); 3] = [
    (Role::Manager, 20),
    (Role::Specialist, 30),
    (Role::Staff, 50),
];

/// Initial attitude draw, in percent.
const ATTITUDE_WEIGHTS: [(Attitude, u32); 3] = [
    (Attitude::Positive, 50),
    (Attitude::Neutral, 30),
    (Attitude::Negative, 20),
];

/// Share of the averaged knowledge a role keeps after a peer interaction.
pub const fn behavior_modifier(role: Role) -> f64 {
    match role {
        Role::Manager => 1.2,
        Role::Specialist => 1.0,
        Role::Staff | Role::Ceo => 0.8,
    }
}

/// Share of the AI's contribution an attitude lets through.
pub const fn absorption_fraction(attitude: Attitude) -> f64 {
    match attitude {
        Attitude::Positive => 1.0,
        Attitude::Neutral => 0.5,
        Attitude::Negative => 0.2,
    }
}

// ---------------------------------------------------------------------------
// Employee
// ---------------------------------------------------------------------------

/// One member of the organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Node id in both networks.
    pub id: AgentId,
    /// Position in the organization.
    pub role: Role,
    /// Knowledge at creation; fixed for the run.
    pub expertise: f64,
    /// Current knowledge.
    pub knowledge: f64,
    /// Current stance toward the AI.
    pub attitude: Attitude,
}

impl Employee {
    /// Create an employee whose knowledge starts at its expertise.
    pub const fn new(id: AgentId, role: Role, expertise: f64, attitude: Attitude) -> Self {
        Self {
            id,
            role,
            expertise,
            knowledge: expertise,
            attitude,
        }
    }

    /// Create an employee with randomly drawn attributes.
    ///
    /// The hierarchy root is always the CEO and consumes no role draw;
    /// everyone else draws a role first. Expertise (uniform in
    /// `[MIN_EXPERTISE, MAX_EXPERTISE]`) and attitude are drawn after.
    pub fn generate<R: Rng>(id: AgentId, is_root: bool, rng: &mut R) -> Self {
        let role = if is_root {
            Role::Ceo
        } else {
            select_weighted(&ROLE_WEIGHTS, rng).unwrap_or(Role::Staff)
        };
        let expertise = rng.random_range(MIN_EXPERTISE..=MAX_EXPERTISE);
        let attitude = select_weighted(&ATTITUDE_WEIGHTS, rng).unwrap_or(Attitude::Neutral);
        Self::new(id, role, expertise, attitude)
    }

    /// Multiplier applied to averaged knowledge after a peer interaction.
    pub const fn behavior_modifier(&self) -> f64 {
        behavior_modifier(self.role)
    }

    /// Knowledge gained or lost since creation.
    pub const fn drift(&self) -> f64 {
        self.knowledge - self.expertise
    }

    /// Lose `rate` knowledge, never dropping below zero.
    pub const fn decay(&mut self, rate: f64) {
        self.knowledge = (self.knowledge - rate).max(0.0);
    }

    /// Exchange knowledge with a peer.
    ///
    /// Both sides compute the same mean, then each keeps
    /// `mean * own modifier`. Results are not clamped.
    pub const fn interact_with_peer(&mut self, other: &mut Self) {
        let mean = (self.knowledge + other.knowledge) / 2.0;
        self.knowledge = mean * self.behavior_modifier();
        other.knowledge = mean * other.behavior_modifier();
    }

    /// Request information from the AI and absorb part of it.
    ///
    /// Counts as one use of the AI. Returns the knowledge gained.
    pub const fn interact_with_ai(&mut self, ai: &mut AiAgent) -> f64 {
        let gained = ai.provide_information() * absorption_fraction(self.attitude);
        self.knowledge += gained;
        gained
    }

    /// Move the attitude at most one category based on cumulative drift.
    ///
    /// Drift above `positive_threshold` pulls toward positive; drift below
    /// `negative_threshold` pulls toward negative. Returns whether the
    /// attitude changed.
    pub fn update_attitude(&mut self, positive_threshold: f64, negative_threshold: f64) -> bool {
        let drift = self.drift();
        let next = if drift > positive_threshold {
            match self.attitude {
                Attitude::Negative | Attitude::Neutral => improve(self.attitude),
                Attitude::Positive => Attitude::Positive,
            }
        } else if drift < negative_threshold {
            match self.attitude {
                Attitude::Positive | Attitude::Neutral => worsen(self.attitude),
                Attitude::Negative => Attitude::Negative,
            }
        } else {
            self.attitude
        };
        let changed = next != self.attitude;
        self.attitude = next;
        changed
    }
}

const fn improve(attitude: Attitude) -> Attitude {
    match attitude {
        Attitude::Negative => Attitude::Neutral,
        Attitude::Neutral | Attitude::Positive => Attitude::Positive,
    }
}

const fn worsen(attitude: Attitude) -> Attitude {
    match attitude {
        Attitude::Positive => Attitude::Neutral,
        Attitude::Neutral | Attitude::Negative => Attitude::Negative,
    }
}

/// Pick an entry with probability proportional to its weight.
fn select_weighted<T: Copy, R: Rng>(entries: &[(T, u32)], rng: &mut R) -> Option<T> {
    let total = entries
        .iter()
        .fold(0_u32, |acc, &(_, weight)| acc.saturating_add(weight));
    if total == 0 {
        return None;
    }
    let roll = rng.random_range(0..total);
    let mut cumulative: u32 = 0;
    for &(value, weight) in entries {
        cumulative = cumulative.saturating_add(weight);
        if roll < cumulative {
            return Some(value);
        }
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn employee(role: Role, knowledge: f64, attitude: Attitude) -> Employee {
        Employee::new(AgentId(0), role, knowledge, attitude)
    }

    #[test]
    fn knowledge_starts_at_expertise() {
        let e = employee(Role::Staff, 4.5, Attitude::Neutral);
        assert!((e.knowledge - 4.5).abs() < f64::EPSILON);
        assert!(e.drift().abs() < f64::EPSILON);
    }

    #[test]
    fn decay_floors_at_zero() {
        let mut e = employee(Role::Staff, 0.03, Attitude::Neutral);
        e.decay(0.05);
        assert!(e.knowledge.abs() < f64::EPSILON);
        e.decay(0.05);
        assert!(e.knowledge.abs() < f64::EPSILON);
    }

    #[test]
    fn peer_interaction_scales_mean_by_own_role() {
        let mut manager = employee(Role::Manager, 4.0, Attitude::Neutral);
        let mut staff = employee(Role::Staff, 6.0, Attitude::Neutral);
        manager.interact_with_peer(&mut staff);
        assert!((manager.knowledge - 6.0).abs() < 1e-12);
        assert!((staff.knowledge - 4.0).abs() < 1e-12);
    }

    #[test]
    fn specialist_keeps_the_mean() {
        let mut a = employee(Role::Specialist, 2.0, Attitude::Neutral);
        let mut b = employee(Role::Specialist, 8.0, Attitude::Neutral);
        a.interact_with_peer(&mut b);
        assert!((a.knowledge - 5.0).abs() < f64::EPSILON);
        assert!((b.knowledge - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ai_interaction_absorbs_by_attitude() {
        let mut ai = AiAgent::new(AgentId(3), 2.0);
        let mut positive = employee(Role::Staff, 1.0, Attitude::Positive);
        let mut neutral = employee(Role::Staff, 1.0, Attitude::Neutral);
        let mut negative = employee(Role::Staff, 1.0, Attitude::Negative);

        assert!((positive.interact_with_ai(&mut ai) - 2.0).abs() < f64::EPSILON);
        assert!((neutral.interact_with_ai(&mut ai) - 1.0).abs() < f64::EPSILON);
        assert!((negative.interact_with_ai(&mut ai) - 0.4).abs() < 1e-12);
        assert!((neutral.knowledge - 2.0).abs() < f64::EPSILON);
        assert_eq!(ai.usage, 3);
    }

    #[test]
    fn attitude_improves_one_step_at_a_time() {
        let mut e = employee(Role::Staff, 5.0, Attitude::Negative);
        e.knowledge = 9.0;
        assert!(e.update_attitude(0.5, -0.5));
        assert_eq!(e.attitude, Attitude::Neutral);
        assert!(e.update_attitude(0.5, -0.5));
        assert_eq!(e.attitude, Attitude::Positive);
        assert!(!e.update_attitude(0.5, -0.5));
        assert_eq!(e.attitude, Attitude::Positive);
    }

    #[test]
    fn attitude_worsens_one_step_at_a_time() {
        let mut e = employee(Role::Staff, 5.0, Attitude::Positive);
        e.knowledge = 1.0;
        e.update_attitude(0.5, -0.5);
        assert_eq!(e.attitude, Attitude::Neutral);
        e.update_attitude(0.5, -0.5);
        assert_eq!(e.attitude, Attitude::Negative);
        assert!(!e.update_attitude(0.5, -0.5));
    }

    #[test]
    fn attitude_holds_inside_the_band() {
        let mut e = employee(Role::Staff, 5.0, Attitude::Neutral);
        e.knowledge = 5.5;
        assert!(!e.update_attitude(0.5, -0.5));
        e.knowledge = 4.5;
        assert!(!e.update_attitude(0.5, -0.5));
        assert_eq!(e.attitude, Attitude::Neutral);
    }

    #[test]
    fn infinite_thresholds_freeze_attitude() {
        let mut e = employee(Role::Staff, 5.0, Attitude::Neutral);
        e.knowledge = 1000.0;
        assert!(!e.update_attitude(f64::INFINITY, f64::NEG_INFINITY));
        e.knowledge = 0.0;
        assert!(!e.update_attitude(f64::INFINITY, f64::NEG_INFINITY));
    }

    #[test]
    fn root_is_always_ceo() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            let e = Employee::generate(AgentId(0), true, &mut rng);
            assert_eq!(e.role, Role::Ceo);
        }
    }

    #[test]
    fn generated_attributes_are_in_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut saw_ceo = false;
        for i in 1..500 {
            let e = Employee::generate(AgentId(i), false, &mut rng);
            saw_ceo |= e.role == Role::Ceo;
            assert!((MIN_EXPERTISE..=MAX_EXPERTISE).contains(&e.expertise));
            assert!((e.knowledge - e.expertise).abs() < f64::EPSILON);
        }
        assert!(!saw_ceo);
    }

    #[test]
    fn weighted_draw_follows_weights() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut staff = 0_u32;
        for _ in 0..10_000 {
            if select_weighted(&ROLE_WEIGHTS, &mut rng) == Some(Role::Staff) {
                staff = staff.saturating_add(1);
            }
        }
        // Expected 5000; a wide band keeps this stable across rand versions.
        assert!((4500..5500).contains(&staff), "staff draws: {staff}");
    }

    #[test]
    fn zero_weights_select_nothing() {
        let mut rng = SmallRng::seed_from_u64(42);
        let entries = [(Role::Staff, 0_u32)];
        assert_eq!(select_weighted(&entries, &mut rng), None);
    }

    #[test]
    fn modifiers_and_fractions() {
        assert!((behavior_modifier(Role::Ceo) - 0.8).abs() < f64::EPSILON);
        assert!((behavior_modifier(Role::Manager) - 1.2).abs() < f64::EPSILON);
        assert!((absorption_fraction(Attitude::Negative) - 0.2).abs() < f64::EPSILON);
    }
}
