//! Command-line configuration and scenario files.

use crate::commands::Command;
use crate::logging;
use anyhow::Context;
use chord_core::hash::StaticIdHasher;
use chord_core::{ChordConfig, ChordNetwork, CollisionPolicy, HasherKind};
use clap::{ArgAction, Parser};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Simulate Chord ring construction and finger-table routing.
#[derive(Debug, Parser)]
#[command(name = "chord-sim", version)]
pub struct CliConfig {
    /// JSON scenario file (nodes, keys, optional pinned ids and ring settings).
    #[arg(long, global = true)]
    pub scenario: Option<PathBuf>,

    /// Number of generated nodes when no scenario is given.
    #[arg(long, default_value_t = 8, global = true)]
    pub nodes: usize,

    /// Number of generated keys when no scenario is given.
    #[arg(long, default_value_t = 16, global = true)]
    pub keys: usize,

    /// Identifier bits `m` (ring size 2^m). Overrides the scenario.
    #[arg(short = 'm', long, global = true)]
    pub bits: Option<u32>,

    /// Hash function: sip, xxh3 or blake3. Overrides the scenario.
    #[arg(long, global = true)]
    pub hasher: Option<HasherKind>,

    /// Fail when two nodes hash to the same identifier instead of ordering
    /// them by name.
    #[arg(long, global = true)]
    pub strict_collisions: bool,

    /// Emit JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn run(&self) -> anyhow::Result<()> {
        logging::init(self.verbose);
        let network = self.scenario()?.into_network()?;
        info!(
            nodes = network.topology().len(),
            keys = network.keys().len(),
            bits = network.space().bits(),
            hasher = %network.config().hasher,
            collisions = ?network.config().collision_policy,
            "network built"
        );
        let output = self.command.execute(&network, self.json)?;
        println!("{output}");
        Ok(())
    }

    /// Loads or generates the scenario and applies command-line overrides.
    pub fn scenario(&self) -> anyhow::Result<Scenario> {
        let mut scenario = match &self.scenario {
            Some(path) => Scenario::load(path)?,
            None => Scenario::generated(self.nodes, self.keys),
        };
        if let Some(bits) = self.bits {
            scenario.config.bits = bits;
        }
        if let Some(hasher) = self.hasher {
            scenario.config.hasher = hasher;
        }
        if self.strict_collisions {
            scenario.config.collision_policy = CollisionPolicy::Reject;
        }
        Ok(scenario)
    }
}

/// A simulation input: ring settings plus the nodes and keys to place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(flatten)]
    pub config: ChordConfig,
    /// Node names, in insertion order. The first is the default lookup start.
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub keys: Vec<String>,
    /// Pinned identifiers for node or key names. Anything not listed is
    /// hashed with the configured `hasher`.
    #[serde(default)]
    pub ids: BTreeMap<String, u64>,
}

impl Scenario {
    /// `node-0..node-{nodes}` and `key-0..key-{keys}` with default settings.
    pub fn generated(nodes: usize, keys: usize) -> Self {
        Self {
            config: ChordConfig::default(),
            nodes: (0..nodes).map(|i| format!("node-{i}")).collect(),
            keys: (0..keys).map(|i| format!("key-{i}")).collect(),
            ids: BTreeMap::new(),
        }
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid scenario JSON")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }

    /// Builds the ring and finger tables and places every key.
    pub fn into_network(self) -> anyhow::Result<ChordNetwork> {
        self.config.validate()?;
        let mut network = if self.ids.is_empty() {
            ChordNetwork::new(self.config)?
        } else {
            let mut hasher = StaticIdHasher::with_fallback(self.config.hasher.build());
            for (name, id) in self.ids {
                hasher.insert(name, id);
            }
            ChordNetwork::with_hasher(self.config, Box::new(hasher))?
        };
        for node in self.nodes {
            network.add_node(node)?;
        }
        for key in self.keys {
            network.add_key(key)?;
        }
        network.build().context("failed to build ring")?;
        network.assign_keys()?;
        Ok(network)
    }
}
