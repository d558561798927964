//! Integer identifiers for simulation participants.
//!
//! Every participant (employees and the AI) has a dense integer id. An
//! employee's id doubles as its node id in both the organizational and the
//! social network, so ids are assigned `0..N` in creation order and the AI
//! takes `N`.

use serde::{Deserialize, Serialize};

/// Identifier of a simulation participant and of its graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u32);

impl AgentId {
    /// Wrap a raw id.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Build an id from a position in the participant list.
    ///
    /// Returns `None` if the index does not fit the id range.
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    /// Return the id as a position in the participant list.
    pub fn index(self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }
}

impl core::fmt::Display for AgentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AgentId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<AgentId> for u32 {
    fn from(id: AgentId) -> Self {
        id.0
    }
}
