//! Configuration loading and typed config structures for the simulation.
//!
//! The canonical configuration lives in `orgsim-config.yaml` in the working
//! directory. Every field has a default, so an empty file (or no file at
//! all) yields the reference setup: 100 employees, a five-level hierarchy
//! with three reports per manager, and a small-world social network.
//!
//! A handful of environment variables override YAML values after parsing:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `ORGSIM_SEED` | `run.seed` |
//! | `ORGSIM_STEPS` | `run.steps` |
//! | `ORGSIM_ORG_TOPOLOGY` | `organization.topology` |
//! | `ORGSIM_SOCIAL_TOPOLOGY` | `social.topology` |

use std::path::Path;

use serde::{Deserialize, Serialize};

use orgsim_agents::MIN_CONTRIBUTION;
use orgsim_types::{OrgTopology, ParseTopologyError, SocialTopology};

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A topology override named a kind that does not exist.
    #[error("{source}")]
    UnsupportedTopology {
        /// The underlying parse error.
        #[from]
        source: ParseTopologyError,
    },

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {variable}: {reason}")]
    InvalidOverride {
        /// The environment variable name.
        variable: &'static str,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A parameter is outside its valid range.
    #[error("invalid {field}: {reason}")]
    InvalidValue {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `orgsim-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Population size.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Organizational network shape.
    #[serde(default)]
    pub organization: OrganizationConfig,

    /// Social network shape.
    #[serde(default)]
    pub social: SocialConfig,

    /// AI contribution and evolution rule.
    #[serde(default)]
    pub ai: AiConfig,

    /// Knowledge decay and attitude thresholds.
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Periodic social network rewiring.
    #[serde(default)]
    pub dynamics: DynamicsConfig,

    /// Run length and random seed.
    #[serde(default)]
    pub run: RunConfig,

    /// Result files.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment overrides are applied and the result is validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or an
    /// override/validation error.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// Environment overrides are applied and the result is validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or an
    /// override/validation error.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `ORGSIM_*` environment variables when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] for a non-numeric seed or
    /// step count, or [`ConfigError::UnsupportedTopology`] for an unknown
    /// topology kind.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Override fields from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`Self::apply_env_overrides`].
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("ORGSIM_SEED") {
            let seed = value
                .trim()
                .parse()
                .map_err(|e: core::num::ParseIntError| ConfigError::InvalidOverride {
                    variable: "ORGSIM_SEED",
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
            self.run.seed = Some(seed);
        }
        if let Some(value) = lookup("ORGSIM_STEPS") {
            self.run.steps = value
                .trim()
                .parse()
                .map_err(|e: core::num::ParseIntError| ConfigError::InvalidOverride {
                    variable: "ORGSIM_STEPS",
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
        }
        if let Some(value) = lookup("ORGSIM_ORG_TOPOLOGY") {
            self.organization.topology = value.parse()?;
        }
        if let Some(value) = lookup("ORGSIM_SOCIAL_TOPOLOGY") {
            self.social.topology = value.parse()?;
        }
        Ok(())
    }

    /// Check parameter ranges that the generators and step rules rely on.
    ///
    /// Attitude thresholds may be infinite (to disable transitions) but not
    /// NaN. Generator-specific limits such as `k <= n` are checked when the
    /// networks are built.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population.employees == 0 {
            return Err(invalid("population.employees", "must be at least 1"));
        }
        if self.organization.depth == 0 {
            return Err(invalid("organization.depth", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.social.p) {
            return Err(invalid(
                "social.p",
                format!("{} is not a probability", self.social.p),
            ));
        }
        if !self.ai.initial_contribution.is_finite()
            || self.ai.initial_contribution < MIN_CONTRIBUTION
        {
            return Err(invalid(
                "ai.initial_contribution",
                format!("must be a finite value of at least {MIN_CONTRIBUTION}"),
            ));
        }
        if !self.ai.increment.is_finite() || self.ai.increment < 0.0 {
            return Err(invalid("ai.increment", "must be finite and non-negative"));
        }
        if !self.knowledge.decay_rate.is_finite() || self.knowledge.decay_rate < 0.0 {
            return Err(invalid(
                "knowledge.decay_rate",
                "must be finite and non-negative",
            ));
        }
        if self.knowledge.positive_attitude_threshold.is_nan()
            || self.knowledge.negative_attitude_threshold.is_nan()
        {
            return Err(invalid("knowledge", "attitude thresholds must not be NaN"));
        }
        if self.dynamics.enabled && self.dynamics.change_frequency == 0 {
            return Err(invalid(
                "dynamics.change_frequency",
                "must be at least 1 when dynamics are enabled",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Population size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of employee agents. The AI is added on top.
    #[serde(default = "default_employees")]
    pub employees: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            employees: default_employees(),
        }
    }
}

/// Organizational network shape.
///
/// The hierarchy size follows from `depth` and `branching` alone. With the
/// defaults it holds 121 nodes for 100 employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationConfig {
    /// Plain tree or onion.
    #[serde(default = "default_org_topology")]
    pub topology: OrgTopology,

    /// Number of hierarchy levels, root included.
    #[serde(default = "default_depth")]
    pub depth: u32,

    /// Direct reports per manager (span of control).
    #[serde(default = "default_branching")]
    pub branching: u32,
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            topology: default_org_topology(),
            depth: default_depth(),
            branching: default_branching(),
        }
    }
}

/// Social network shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialConfig {
    /// Small world or scale free.
    #[serde(default = "default_social_topology")]
    pub topology: SocialTopology,

    /// Small world: ring neighbors per node.
    #[serde(default = "default_k")]
    pub k: usize,

    /// Small world: rewiring probability.
    #[serde(default = "default_p")]
    pub p: f64,

    /// Scale free: edges attached per new node.
    #[serde(default = "default_m")]
    pub m: usize,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            topology: default_social_topology(),
            k: default_k(),
            p: default_p(),
            m: default_m(),
        }
    }
}

/// AI contribution and evolution rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Knowledge handed out per request at the start of the run.
    #[serde(default = "default_initial_contribution")]
    pub initial_contribution: f64,

    /// Per-step usage above which the contribution grows.
    #[serde(default = "default_evolution_threshold")]
    pub evolution_threshold: u64,

    /// Per-step usage below which the contribution shrinks.
    #[serde(default = "default_decrement_threshold")]
    pub decrement_threshold: u64,

    /// Amount the contribution moves per evolution check.
    #[serde(default = "default_increment")]
    pub increment: f64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            initial_contribution: default_initial_contribution(),
            evolution_threshold: default_evolution_threshold(),
            decrement_threshold: default_decrement_threshold(),
            increment: default_increment(),
        }
    }
}

/// Knowledge decay and attitude thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Knowledge lost by every employee at the start of its turn.
    #[serde(default = "default_decay_rate")]
    pub decay_rate: f64,

    /// Drift above which attitude moves toward positive.
    #[serde(default = "default_positive_threshold")]
    pub positive_attitude_threshold: f64,

    /// Drift below which attitude moves toward negative.
    #[serde(default = "default_negative_threshold")]
    pub negative_attitude_threshold: f64,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            decay_rate: default_decay_rate(),
            positive_attitude_threshold: default_positive_threshold(),
            negative_attitude_threshold: default_negative_threshold(),
        }
    }
}

/// Periodic social network rewiring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicsConfig {
    /// Whether the social network changes during the run.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Rewire on every step whose number is a multiple of this.
    #[serde(default = "default_change_frequency")]
    pub change_frequency: u64,

    /// Edges added or removed per rewiring.
    #[serde(default = "default_edges_per_change")]
    pub edges_per_change: usize,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            change_frequency: default_change_frequency(),
            edges_per_change: default_edges_per_change(),
        }
    }
}

/// Run length and random seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of steps to execute.
    #[serde(default = "default_steps")]
    pub steps: u64,

    /// Fixed seed for a reproducible run. Drawn from the OS when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Reject a hierarchy whose node count differs from the employee count.
    #[serde(default)]
    pub strict_topology: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            seed: None,
            strict_topology: false,
        }
    }
}

/// Result files written by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for `results.csv`, `results.json`, and `networks.json`.
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// Write both network snapshots before the run.
    #[serde(default = "default_true")]
    pub export_networks: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            export_networks: default_true(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_employees() -> usize {
    100
}

const fn default_org_topology() -> OrgTopology {
    OrgTopology::Hierarchical
}

const fn default_depth() -> u32 {
    5
}

const fn default_branching() -> u32 {
    3
}

const fn default_social_topology() -> SocialTopology {
    SocialTopology::SmallWorld
}

const fn default_k() -> usize {
    4
}

const fn default_p() -> f64 {
    0.1
}

const fn default_m() -> usize {
    2
}

const fn default_initial_contribution() -> f64 {
    2.0
}

const fn default_evolution_threshold() -> u64 {
    15
}

const fn default_decrement_threshold() -> u64 {
    3
}

const fn default_increment() -> f64 {
    0.5
}

const fn default_decay_rate() -> f64 {
    0.05
}

const fn default_positive_threshold() -> f64 {
    0.5
}

const fn default_negative_threshold() -> f64 {
    -0.5
}

const fn default_change_frequency() -> u64 {
    10
}

const fn default_edges_per_change() -> usize {
    5
}

const fn default_steps() -> u64 {
    100
}

fn default_output_directory() -> String {
    "data".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn parse_without_env(yaml: &str) -> Result<SimulationConfig, ConfigError> {
        let config: SimulationConfig = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn default_config_matches_reference_setup() {
        let config = SimulationConfig::default();
        assert_eq!(config.population.employees, 100);
        assert_eq!(config.organization.depth, 5);
        assert_eq!(config.organization.branching, 3);
        assert_eq!(config.organization.topology, OrgTopology::Hierarchical);
        assert_eq!(config.social.topology, SocialTopology::SmallWorld);
        assert_eq!(config.social.k, 4);
        assert_eq!(config.ai.evolution_threshold, 15);
        assert_eq!(config.ai.decrement_threshold, 3);
        assert_eq!(config.dynamics.change_frequency, 10);
        assert_eq!(config.dynamics.edges_per_change, 5);
        assert_eq!(config.run.steps, 100);
        assert!(config.run.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
population:
  employees: 40

organization:
  topology: onion
  depth: 4
  branching: 3

social:
  topology: scale_free
  k: 6
  p: 0.2
  m: 3

ai:
  initial_contribution: 1.5
  evolution_threshold: 30
  decrement_threshold: 5
  increment: 0.25

knowledge:
  decay_rate: 0.1
  positive_attitude_threshold: 1.0
  negative_attitude_threshold: -1.0

dynamics:
  enabled: false
  change_frequency: 5
  edges_per_change: 2

run:
  steps: 250
  seed: 42
  strict_topology: true

output:
  directory: out
  export_networks: false

logging:
  level: debug
  json: true
";
        let config = parse_without_env(yaml).unwrap();
        assert_eq!(config.population.employees, 40);
        assert_eq!(config.organization.topology, OrgTopology::Onion);
        assert_eq!(config.social.topology, SocialTopology::ScaleFree);
        assert_eq!(config.social.m, 3);
        assert!((config.ai.increment - 0.25).abs() < f64::EPSILON);
        assert!(!config.dynamics.enabled);
        assert_eq!(config.run.seed, Some(42));
        assert!(config.run.strict_topology);
        assert_eq!(config.output.directory, "out");
        assert!(config.logging.json);
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = parse_without_env("run:\n  seed: 7\n").unwrap();
        assert_eq!(config.run.seed, Some(7));
        assert_eq!(config.population.employees, 100);
        assert_eq!(config.run.steps, 100);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(parse_without_env("").is_ok());
    }

    #[test]
    fn unknown_topology_fails_to_parse() {
        let result = parse_without_env("organization:\n  topology: matrix\n");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn overrides_replace_yaml_values() {
        let vars: BTreeMap<&str, &str> = [
            ("ORGSIM_SEED", "99"),
            ("ORGSIM_STEPS", "12"),
            ("ORGSIM_ORG_TOPOLOGY", "onion"),
            ("ORGSIM_SOCIAL_TOPOLOGY", "scale-free"),
        ]
        .into_iter()
        .collect();
        let mut config = SimulationConfig::default();
        config
            .apply_overrides(|name| vars.get(name).map(|v| (*v).to_owned()))
            .unwrap();
        assert_eq!(config.run.seed, Some(99));
        assert_eq!(config.run.steps, 12);
        assert_eq!(config.organization.topology, OrgTopology::Onion);
        assert_eq!(config.social.topology, SocialTopology::ScaleFree);
    }

    #[test]
    fn unknown_topology_override_fails_fast() {
        let mut config = SimulationConfig::default();
        let result = config.apply_overrides(|name| {
            (name == "ORGSIM_SOCIAL_TOPOLOGY").then(|| "random".to_owned())
        });
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedTopology { .. })
        ));
    }

    #[test]
    fn non_numeric_seed_override_is_rejected() {
        let mut config = SimulationConfig::default();
        let result = config.apply_overrides(|name| (name == "ORGSIM_SEED").then(|| "abc".to_owned()));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidOverride { variable: "ORGSIM_SEED", .. })
        ));
    }

    #[test]
    fn validation_rejects_out_of_range_values() {
        let mut config = SimulationConfig::default();
        config.ai.initial_contribution = 0.2;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "ai.initial_contribution", .. })
        ));

        let mut config = SimulationConfig::default();
        config.dynamics.change_frequency = 0;
        assert!(config.validate().is_err());
        config.dynamics.enabled = false;
        assert!(config.validate().is_ok());

        let mut config = SimulationConfig::default();
        config.knowledge.decay_rate = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn infinite_attitude_thresholds_are_allowed() {
        let mut config = SimulationConfig::default();
        config.knowledge.positive_attitude_threshold = f64::INFINITY;
        config.knowledge.negative_attitude_threshold = f64::NEG_INFINITY;
        assert!(config.validate().is_ok());
        config.knowledge.negative_attitude_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("orgsim-config.yaml");
        if path.exists() {
            let contents = std::fs::read_to_string(&path).unwrap();
            let config = parse_without_env(&contents);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
