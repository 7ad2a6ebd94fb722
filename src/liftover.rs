//! Driving the external liftover catalog tool.
//!
//! Lifting a genetic map from one assembly to another (e.g. rn6 to rn7) is
//! done by an external script; this module only builds its fixed command line
//! and runs it. The tool's output is not read back here.
use serde::{Deserialize, Serialize};
use std::process::Command;
use tracing::info;

use crate::error::RateMapError;

/// Arguments of the liftover catalog tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftoverConfig {
    /// The interpreter used to run `script`.
    pub interpreter: String,
    pub script: String,
    pub species: String,
    /// The genetic map identifier in the catalog.
    pub map: String,
    /// Chain file from the source to the target assembly.
    pub chain_file: String,
    /// Chain file from the target back to the source assembly.
    pub validation_chain: String,
    /// Window length in basepairs.
    pub win_len: u64,
    pub use_adjacent_avg: bool,
    pub retain_intermediates: bool,
    /// Gap threshold in basepairs.
    pub gap_thresh: u64,
}

impl Default for LiftoverConfig {
    fn default() -> Self {
        Self {
            interpreter: "python".to_string(),
            script: "/maintenance/liftOver_catalog.py".to_string(),
            species: "RatNor".to_string(),
            map: "Littrelletal2018_rn6".to_string(),
            chain_file: "rn6ToRn7.over.chain.gz".to_string(),
            validation_chain: "rn7ToRn6.over.chain.gz".to_string(),
            win_len: 1000,
            use_adjacent_avg: true,
            retain_intermediates: true,
            gap_thresh: 1_000_000,
        }
    }
}

impl LiftoverConfig {
    /// The tool's arguments (after the script path), in a fixed order.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "--species".to_string(),
            self.species.clone(),
            "--map".to_string(),
            self.map.clone(),
            "--chainFile".to_string(),
            self.chain_file.clone(),
            "--validationChain".to_string(),
            self.validation_chain.clone(),
            "--winLen".to_string(),
            self.win_len.to_string(),
        ];
        if self.use_adjacent_avg {
            args.push("--useAdjacentAvg".to_string());
        }
        if self.retain_intermediates {
            args.push("--retainIntermediates".to_string());
        }
        args.push("--gapThresh".to_string());
        args.push(self.gap_thresh.to_string());
        args
    }

    /// The whole command line, for logging and dry runs.
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.interpreter.clone(), self.script.clone()];
        parts.extend(self.args());
        parts.join(" ")
    }
}

/// Run the liftover tool to completion, inheriting stdout and stderr.
///
/// A non-zero exit status is an error.
pub fn run_liftover(config: &LiftoverConfig) -> Result<(), RateMapError> {
    info!("running liftover: {}", config.command_line());
    let status = Command::new(&config.interpreter)
        .arg(&config.script)
        .args(config.args())
        .status()?;
    if !status.success() {
        return Err(RateMapError::LiftoverFailed(
            config.script.clone(),
            status.to_string(),
        ));
    }
    Ok(())
}
