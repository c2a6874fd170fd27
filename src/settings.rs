//! Command-line and environment settings for the terminal front end.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use crate::core::RulesConfig;
use crate::types::TICK_MS;

#[derive(Clone, Debug, Parser)]
#[command(name = "blockfall", version, about = "Falling-block puzzle game for the terminal")]
pub struct Options {
    /// Randomizer seed; taken from the clock when omitted.
    #[arg(short, long, env = "BLOCKFALL_SEED")]
    pub seed: Option<u32>,

    /// JSON file overriding rule constants.
    #[arg(short, long, env = "BLOCKFALL_RULES")]
    pub rules: Option<PathBuf>,

    /// Write logs to this file. Nothing is logged without it.
    #[arg(long, env = "BLOCKFALL_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log specification, e.g. `debug` or `info,blockfall_core=trace`.
    #[arg(short, long, env = "BLOCKFALL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Fixed simulation step in milliseconds.
    #[arg(long, default_value_t = TICK_MS, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub tick_ms: u32,
}

impl Options {
    pub fn log_spec(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }

    /// Default rules, overridden by the rules file if one is set.
    pub fn load_rules(&self) -> Result<RulesConfig> {
        match &self.rules {
            Some(path) => load_rules_file(path),
            None => Ok(RulesConfig::default()),
        }
    }
}

pub fn load_rules_file(path: &Path) -> Result<RulesConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read rules file {}", path.display()))?;
    parse_rules(&text).with_context(|| format!("invalid rules file {}", path.display()))
}

/// Parse and validate a (possibly partial) JSON rules document.
pub fn parse_rules(json: &str) -> Result<RulesConfig> {
    let rules: RulesConfig = serde_json::from_str(json).context("malformed rules JSON")?;
    rules.validate()?;
    Ok(rules)
}

fn clock_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    // Fold the high bits in so consecutive runs differ.
    (nanos ^ (nanos >> 32)) as u32
}
