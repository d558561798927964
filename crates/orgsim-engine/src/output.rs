//! Result files.
//!
//! The engine writes up to three files into the output directory:
//!
//! - `networks.json` -- both network snapshots, taken before the first step
//! - `results.csv` -- one row per step with the classic column headers
//! - `results.json` -- a [`RunReport`] header plus the full metrics series

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use orgsim_types::{MetricsSeries, NetworkSnapshot};

use crate::error::EngineError;

/// File name of the network snapshot export.
pub const NETWORKS_FILE: &str = "networks.json";

/// File name of the tabular metrics export.
pub const RESULTS_CSV_FILE: &str = "results.csv";

/// Column headers of `results.csv`.
pub const CSV_COLUMNS: [&str; 7] = [
    "Step",
    "Average Knowledge",
    "Positive Attitudes",
    "Neutral Attitudes",
    "Negative Attitudes",
    "AI Knowledge Contribution",
    "Network Centrality",
];

/// File name of the JSON metrics export.
pub const RESULTS_JSON_FILE: &str = "results.json";

/// Metadata describing one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Seed of the random source; rerun with it to reproduce the series.
    pub seed: u64,
    /// Number of steps executed.
    pub steps: u64,
    /// When the simulation was constructed.
    pub started_at: DateTime<Utc>,
    /// When the last step finished.
    pub finished_at: DateTime<Utc>,
}

/// Contents of `results.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsDocument {
    /// Run metadata.
    pub report: RunReport,
    /// One row per step.
    pub metrics: MetricsSeries,
}

/// Writes result files into one directory.
#[derive(Debug, Clone)]
pub struct OutputDirectory {
    root: PathBuf,
}

impl OutputDirectory {
    /// Use `root`, creating it (and any parents) if missing.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Output`] if the directory cannot be created.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, EngineError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| EngineError::Output {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// The directory path.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write `networks.json`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Serialize`] or [`EngineError::Output`].
    pub fn write_networks(&self, snapshot: &NetworkSnapshot) -> Result<PathBuf, EngineError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        let path = self.write(NETWORKS_FILE, &json)?;
        info!(
            path = %path.display(),
            org_nodes = snapshot.organization.node_count(),
            social_nodes = snapshot.social.node_count(),
            "Network snapshot written"
        );
        Ok(path)
    }

    /// Write `results.csv` and `results.json`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Csv`], [`EngineError::Serialize`], or
    /// [`EngineError::Output`].
    pub fn write_results(
        &self,
        report: &RunReport,
        series: &MetricsSeries,
    ) -> Result<(PathBuf, PathBuf), EngineError> {
        let csv_path = self.write_csv(series)?;

        let document = ResultsDocument {
            report: report.clone(),
            metrics: series.clone(),
        };
        let json = serde_json::to_string_pretty(&document)?;
        let json_path = self.write(RESULTS_JSON_FILE, &json)?;

        info!(
            csv = %csv_path.display(),
            json = %json_path.display(),
            rows = series.len(),
            "Results saved"
        );
        Ok((csv_path, json_path))
    }

    /// Write one row per step. Floats use shortest round-trip formatting.
    fn write_csv(&self, series: &MetricsSeries) -> Result<PathBuf, EngineError> {
        let path = self.root.join(RESULTS_CSV_FILE);
        let mut wtr = csv::Writer::from_path(&path)?;

        wtr.write_record(CSV_COLUMNS)?;
        for row in series.rows() {
            wtr.write_record([
                row.step.to_string(),
                row.average_knowledge.to_string(),
                row.attitudes.positive.to_string(),
                row.attitudes.neutral.to_string(),
                row.attitudes.negative.to_string(),
                row.ai_contribution.to_string(),
                row.network_centrality.to_string(),
            ])?;
        }

        wtr.flush().map_err(|source| EngineError::Output {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    fn write(&self, file_name: &str, contents: &str) -> Result<PathBuf, EngineError> {
        let path = self.root.join(file_name);
        fs::write(&path, contents).map_err(|source| EngineError::Output {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use orgsim_types::{AttitudeCounts, StepMetrics};

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("orgsim-engine-{name}-{}", std::process::id()))
    }

    fn series() -> MetricsSeries {
        (1..=3_u64)
            .map(|step| StepMetrics {
                step,
                average_knowledge: 5.0 / 3.0,
                attitudes: AttitudeCounts {
                    positive: 5,
                    neutral: 3,
                    negative: 2,
                },
                ai_contribution: 2.5,
                network_centrality: 0.04,
            })
            .collect()
    }

    fn report() -> RunReport {
        let now = Utc::now();
        RunReport {
            seed: 42,
            steps: 3,
            started_at: now,
            finished_at: now,
        }
    }

    #[test]
    fn creates_missing_directory() {
        let root = scratch_dir("create").join("nested");
        let out = OutputDirectory::create(&root).unwrap();
        assert!(out.path().is_dir());
        fs::remove_dir_all(root.parent().unwrap()).unwrap();
    }

    #[test]
    fn results_round_trip() {
        let root = scratch_dir("results");
        let out = OutputDirectory::create(&root).unwrap();
        let (csv_path, json_path) = out.write_results(&report(), &series()).unwrap();

        let mut reader = csv::Reader::from_path(csv_path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_COLUMNS);

        let mut read_back = MetricsSeries::new();
        for record in reader.records() {
            let record = record.unwrap();
            let field = |i: usize| record.get(i).unwrap();
            read_back.push(StepMetrics {
                step: field(0).parse().unwrap(),
                average_knowledge: field(1).parse().unwrap(),
                attitudes: AttitudeCounts {
                    positive: field(2).parse().unwrap(),
                    neutral: field(3).parse().unwrap(),
                    negative: field(4).parse().unwrap(),
                },
                ai_contribution: field(5).parse().unwrap(),
                network_centrality: field(6).parse().unwrap(),
            });
        }
        assert_eq!(read_back, series());

        let json = fs::read_to_string(json_path).unwrap();
        let document: ResultsDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(document.metrics, series());
        assert_eq!(document.report.seed, 42);

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn networks_file_is_written() {
        let root = scratch_dir("networks");
        let out = OutputDirectory::create(&root).unwrap();
        let path = out.write_networks(&NetworkSnapshot::default()).unwrap();
        let back: NetworkSnapshot =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(back, NetworkSnapshot::default());
        fs::remove_dir_all(root).unwrap();
    }
}
