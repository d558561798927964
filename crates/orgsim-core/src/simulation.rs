//! The simulation object: both networks, all participants, one random source.
//!
//! [`Simulation::new`] builds everything in a fixed draw order so a seeded
//! run is reproducible:
//!
//! 1. organizational network (the onion variant draws lateral links)
//! 2. social network over `employees + 1` nodes (the extra node is the AI)
//! 3. per employee, in id order: role, expertise, attitude
//!
//! Stepping lives in [`crate::step`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use orgsim_agents::{AiAgent, Employee};
use orgsim_network::{
    NetworkError, OrgNetwork, SocialNetwork, build_hierarchy, build_onion, build_scale_free,
    build_small_world,
};
use orgsim_types::{
    AgentId, AttitudeCounts, MetricsSeries, NetworkSnapshot, OrgTopology, SocialTopology,
    StepMetrics,
};

use crate::config::{ConfigError, SimulationConfig};
use crate::step::{self, StepSummary};

/// Errors that can occur while setting up a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The configuration is invalid.
    #[error("configuration error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// A network generator rejected its parameters.
    #[error("network error: {source}")]
    Network {
        /// The underlying network error.
        #[from]
        source: NetworkError,
    },

    /// The hierarchy size differs from the employee count in strict mode.
    #[error("hierarchy has {hierarchy_nodes} nodes but there are {employees} employees")]
    TopologyMismatch {
        /// Nodes generated for the organizational network.
        hierarchy_nodes: usize,
        /// Configured employee count.
        employees: usize,
    },
}

/// All simulation state, owned in one place.
#[derive(Debug)]
pub struct Simulation {
    /// The configuration the run was built from.
    pub(crate) config: SimulationConfig,
    /// The seed the random source was initialised with.
    pub(crate) seed: u64,
    /// Reporting hierarchy.
    pub(crate) organization: OrgNetwork,
    /// Informal network, AI node included.
    pub(crate) social: SocialNetwork,
    /// Employees indexed by id.
    pub(crate) employees: Vec<Employee>,
    /// The AI participant.
    pub(crate) ai: AiAgent,
    /// The single random source for the run.
    pub(crate) rng: StdRng,
    /// Number of completed steps.
    pub(crate) current_step: u64,
    /// One metrics row per completed step.
    pub(crate) metrics: MetricsSeries,
}

impl Simulation {
    /// Build a simulation from a configuration.
    ///
    /// Uses `run.seed` when set; otherwise a seed is drawn from the OS and
    /// recorded so the run can be repeated.
    ///
    /// # Errors
    ///
    /// See [`Self::with_seed`].
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let seed = config.run.seed.unwrap_or_else(|| rand::rng().random());
        Self::with_seed(config, seed)
    }

    /// Build a simulation with an explicit seed, ignoring `run.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Config`] if the configuration fails
    /// validation, [`SimulationError::Network`] if a generator rejects its
    /// parameters, or [`SimulationError::TopologyMismatch`] when
    /// `run.strict_topology` is set and the hierarchy size differs from the
    /// employee count.
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);

        let org_cfg = &config.organization;
        let organization = match org_cfg.topology {
            OrgTopology::Hierarchical => build_hierarchy(org_cfg.depth, org_cfg.branching)?,
            OrgTopology::Onion => build_onion(org_cfg.depth, org_cfg.branching, &mut rng)?,
        };

        let employee_count = config.population.employees;
        let participants = employee_count.saturating_add(1);
        let social_cfg = &config.social;
        let social = match social_cfg.topology {
            SocialTopology::SmallWorld => {
                build_small_world(participants, social_cfg.k, social_cfg.p, &mut rng)?
            }
            SocialTopology::ScaleFree => build_scale_free(participants, social_cfg.m, &mut rng)?,
        };

        let hierarchy_nodes = organization.node_count();
        if hierarchy_nodes != employee_count {
            if config.run.strict_topology {
                return Err(SimulationError::TopologyMismatch {
                    hierarchy_nodes,
                    employees: employee_count,
                });
            }
            warn!(
                hierarchy_nodes,
                employees = employee_count,
                "Hierarchy size differs from employee count"
            );
        }

        let mut employees = Vec::with_capacity(employee_count);
        for index in 0..employee_count {
            let id = AgentId::from_index(index)
                .ok_or(NetworkError::TooManyNodes { requested: participants })?;
            let is_root = organization.level_of(id) == Some(0);
            employees.push(Employee::generate(id, is_root, &mut rng));
        }

        let ai_id = AgentId::from_index(employee_count)
            .ok_or(NetworkError::TooManyNodes { requested: participants })?;
        let ai = AiAgent::new(ai_id, config.ai.initial_contribution);

        info!(
            seed,
            employees = employee_count,
            org_topology = %org_cfg.topology,
            org_nodes = hierarchy_nodes,
            org_edges = organization.edge_count(),
            social_topology = %social_cfg.topology,
            social_edges = social.edge_count(),
            "Simulation initialized"
        );

        Ok(Self {
            config,
            seed,
            organization,
            social,
            employees,
            ai,
            rng,
            current_step: 0,
            metrics: MetricsSeries::new(),
        })
    }

    /// Advance by one step. See [`crate::step::run_step`].
    pub fn step(&mut self) -> StepSummary {
        step::run_step(self)
    }

    /// The configuration the run was built from.
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The seed of the random source.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of completed steps.
    pub const fn current_step(&self) -> u64 {
        self.current_step
    }

    /// All employees, indexed by id.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Mutable access to the employees, for setting up scenarios.
    pub fn employees_mut(&mut self) -> &mut [Employee] {
        &mut self.employees
    }

    /// The AI participant.
    pub const fn ai(&self) -> &AiAgent {
        &self.ai
    }

    /// Mutable access to the AI participant, for setting up scenarios.
    pub const fn ai_mut(&mut self) -> &mut AiAgent {
        &mut self.ai
    }

    /// The reporting hierarchy.
    pub const fn organization(&self) -> &OrgNetwork {
        &self.organization
    }

    /// The social network.
    pub const fn social(&self) -> &SocialNetwork {
        &self.social
    }

    /// Metrics of every completed step, in order.
    pub const fn metrics(&self) -> &MetricsSeries {
        &self.metrics
    }

    /// Read-only copy of both networks. Does not touch simulation state.
    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            organization: self.organization.snapshot(),
            social: self.social.snapshot(),
        }
    }

    /// Compute the metrics row for the current state.
    pub(crate) fn observe(&self, step: u64) -> StepMetrics {
        let total: f64 = self.employees.iter().map(|e| e.knowledge).sum();
        let count = u32::try_from(self.employees.len()).unwrap_or(u32::MAX);
        let average_knowledge = if count == 0 {
            0.0
        } else {
            total / f64::from(count)
        };
        StepMetrics {
            step,
            average_knowledge,
            attitudes: AttitudeCounts::tally(self.employees.iter().map(|e| e.attitude)),
            ai_contribution: self.ai.contribution,
            network_centrality: self.social.average_degree_centrality(),
        }
    }
}
