// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

use crate::config::{ClearPolicy, PlacementConfig};

#[derive(Parser, Debug, Clone)]
#[command(name = "meatball-gen")]
#[command(about = "Headless meatball generator", long_about = None)]
pub struct Cli {
    /// How many times to press "Generate MeatBall!"
    #[arg(short = 'n', long, default_value_t = 1)]
    pub presses: u32,

    /// Seed for the random source (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// When previous meatballs are removed
    #[arg(long, value_enum)]
    pub policy: Option<ClearPolicy>,

    /// Center samples tried before a press fails
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// JSON file overriding the placement defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the live meatball(s) as Wavefront OBJ
    #[arg(long)]
    pub obj: Option<PathBuf>,

    /// Write a JSON summary of the scene
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Cli {
    /// Defaults, then the config file, then flags
    pub fn placement_config(&self) -> anyhow::Result<PlacementConfig> {
        let mut config = match &self.config {
            Some(path) => PlacementConfig::load(path)?,
            None => PlacementConfig::default(),
        };
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["meatball-gen"]);
        assert_eq!(cli.presses, 1);
        assert!(cli.seed.is_none());
        assert_eq!(cli.placement_config().unwrap(), PlacementConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "meatball-gen",
            "-n",
            "3",
            "--seed",
            "9",
            "--policy",
            "deferred-clear",
            "--max-attempts",
            "12",
        ]);
        let config = cli.placement_config().unwrap();
        assert_eq!(cli.presses, 3);
        assert_eq!(cli.seed, Some(9));
        assert_eq!(config.policy, ClearPolicy::DeferredClear);
        assert_eq!(config.max_attempts, 12);
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let cli = Cli::parse_from(["meatball-gen", "--max-attempts", "0"]);
        assert!(cli.placement_config().is_err());
    }
}
