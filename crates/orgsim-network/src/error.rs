//! Error types for the `orgsim-network` crate.
//!
//! Generators validate their parameters up front and return
//! [`NetworkError`] instead of producing a malformed graph.

/// Errors that can occur while generating a network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// A generator parameter is outside its valid range.
    #[error("invalid {parameter}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The requested graph has more nodes than the id space can address.
    #[error("network of {requested} nodes exceeds the id range")]
    TooManyNodes {
        /// Requested node count (saturated on overflow).
        requested: usize,
    },
}
