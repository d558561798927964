//! Resolving graph node ids to participants.
//!
//! Employees occupy ids `0..employee_count` and the AI sits at
//! `employee_count`. Any other id (a hierarchy node with no backing
//! employee, for instance) resolves to nothing and the interaction is
//! skipped.

use orgsim_types::AgentId;

/// Who a node id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Participant {
    /// An employee, by index into the employee list.
    Employee(usize),
    /// The AI participant.
    Ai,
}

impl Participant {
    /// Resolve a node id against a population of `employee_count` employees.
    pub fn resolve(id: AgentId, employee_count: usize) -> Option<Self> {
        let index = id.index();
        if index < employee_count {
            Some(Self::Employee(index))
        } else if index == employee_count {
            Some(Self::Ai)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_below_count_are_employees() {
        assert_eq!(
            Participant::resolve(AgentId(0), 10),
            Some(Participant::Employee(0))
        );
        assert_eq!(
            Participant::resolve(AgentId(9), 10),
            Some(Participant::Employee(9))
        );
    }

    #[test]
    fn id_equal_to_count_is_the_ai() {
        assert_eq!(Participant::resolve(AgentId(10), 10), Some(Participant::Ai));
    }

    #[test]
    fn ids_past_the_ai_resolve_to_nothing() {
        assert_eq!(Participant::resolve(AgentId(11), 10), None);
        assert_eq!(Participant::resolve(AgentId(120), 100), None);
    }
}
