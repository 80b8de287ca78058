//! Simulator subcommands.
//!
//! Every command renders to a `String` so output can be tested without
//! capturing stdout.

use anyhow::Context;
use chord_core::{ChordNetwork, Identifier, LookupResponse, Resolution};
use clap::Subcommand;
use serde::Serialize;
use std::fmt::Write;

/// Rendered command output.
pub type CommandResult = anyhow::Result<String>;

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print nodes in ring order with their successors and stored keys.
    Ring,
    /// Print finger tables.
    Fingers {
        /// Only this node.
        #[arg(long)]
        node: Option<String>,
    },
    /// Look up one key: a key name, or `#<id>` for a raw identifier.
    Lookup {
        key: String,
        /// Starting node (default: first node of the scenario).
        #[arg(long)]
        from: Option<String>,
    },
    /// Look up every registered key and report hop statistics.
    Simulate {
        /// Starting node (default: first node of the scenario).
        #[arg(long)]
        from: Option<String>,
    },
}

#[derive(Serialize)]
struct RingRow<'a> {
    name: &'a str,
    id: Identifier,
    successor: &'a str,
    keys: usize,
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub lookups: usize,
    pub routed: usize,
    pub fallback: usize,
    pub max_hops: usize,
    pub mean_hops: f64,
}

impl SimulationSummary {
    pub fn from_responses(responses: &[LookupResponse]) -> Self {
        if responses.is_empty() {
            return Self::default();
        }
        let routed = responses
            .iter()
            .filter(|r| r.resolution == Resolution::Routed)
            .count();
        let total_hops: usize = responses.iter().map(LookupResponse::hops).sum();
        Self {
            lookups: responses.len(),
            routed,
            fallback: responses.len() - routed,
            max_hops: responses.iter().map(LookupResponse::hops).max().unwrap_or(0),
            mean_hops: total_hops as f64 / responses.len() as f64,
        }
    }
}

#[derive(Serialize)]
struct Simulation {
    responses: Vec<LookupResponse>,
    summary: SimulationSummary,
}

impl Command {
    pub fn execute(&self, network: &ChordNetwork, json: bool) -> CommandResult {
        match self {
            Command::Ring => ring(network, json),
            Command::Fingers { node } => fingers(network, node.as_deref(), json),
            Command::Lookup { key, from } => lookup(network, key, from.as_deref(), json),
            Command::Simulate { from } => simulate(network, from.as_deref(), json),
        }
    }
}

fn ring(network: &ChordNetwork, json: bool) -> CommandResult {
    let order = network.router()?.order().clone();
    let mut rows = Vec::with_capacity(order.len());
    for entry in &order {
        let node = network
            .topology()
            .get(&entry.name)
            .with_context(|| format!("node '{}' missing from topology", entry.name))?;
        rows.push(RingRow {
            name: node.name(),
            id: entry.id,
            successor: node.successor().map(|s| s.name.as_str()).unwrap_or("-"),
            keys: node.keys().len(),
        });
    }

    if json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }
    let mut out = String::new();
    writeln!(
        out,
        "ring of {} nodes, m = {} (size {}), hasher {}",
        rows.len(),
        network.space().bits(),
        network.space().size(),
        network.hasher_name()
    )?;
    for row in &rows {
        writeln!(
            out,
            "{:>12}  {:<16} -> {:<16} keys={}",
            row.id, row.name, row.successor, row.keys
        )?;
    }
    Ok(out.trim_end().to_string())
}

fn fingers(network: &ChordNetwork, only: Option<&str>, json: bool) -> CommandResult {
    // Fails fast when the tables were never built.
    network.router()?;
    let nodes: Vec<_> = match only {
        Some(name) => vec![network
            .topology()
            .get(name)
            .with_context(|| format!("unknown node '{name}'"))?],
        None => network.topology().iter().collect(),
    };

    if json {
        let tables: Vec<_> = nodes
            .iter()
            .map(|n| {
                serde_json::json!({
                    "node": n.name(),
                    "id": n.id(),
                    "fingers": n.finger_table(),
                })
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&tables)?);
    }
    let mut out = String::new();
    for node in nodes {
        let id = node.id().map(|id| id.to_string()).unwrap_or_else(|| "?".into());
        writeln!(out, "{} ({})", node.name(), id)?;
        for entry in node.finger_table() {
            writeln!(out, "  #{:<2} {entry}", entry.index)?;
        }
    }
    Ok(out.trim_end().to_string())
}

fn resolve_key(network: &ChordNetwork, key: &str) -> anyhow::Result<Identifier> {
    if let Some(raw) = key.strip_prefix('#') {
        let id: u64 = raw
            .parse()
            .with_context(|| format!("invalid identifier '{raw}'"))?;
        return Ok(Identifier(id));
    }
    match network.key_id(key) {
        Some(id) => Ok(id),
        None => Ok(network.identifier_of(key)?),
    }
}

fn lookup(network: &ChordNetwork, key: &str, from: Option<&str>, json: bool) -> CommandResult {
    let id = resolve_key(network, key)?;
    let response = network
        .lookup(id, from)
        .with_context(|| format!("lookup of '{key}' failed"))?;
    if json {
        return Ok(serde_json::to_string_pretty(&response)?);
    }
    Ok(response.to_string())
}

fn simulate(network: &ChordNetwork, from: Option<&str>, json: bool) -> CommandResult {
    let router = network.router()?;
    let responses = network
        .keys()
        .values()
        .map(|&id| match from {
            Some(start) => router.lookup(id, start),
            None => router.lookup_from_first(id),
        })
        .collect::<chord_core::Result<Vec<_>>>()?;
    let summary = SimulationSummary::from_responses(&responses);

    if json {
        return Ok(serde_json::to_string_pretty(&Simulation { responses, summary })?);
    }
    let mut out = String::new();
    for (name, response) in network.keys().keys().zip(&responses) {
        writeln!(out, "{name}: {response}")?;
    }
    writeln!(
        out,
        "lookups={} routed={} fallback={} max_hops={} mean_hops={:.2}",
        summary.lookups, summary.routed, summary.fallback, summary.max_hops, summary.mean_hops
    )?;
    Ok(out.trim_end().to_string())
}
