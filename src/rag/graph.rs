//! Entity co-occurrence graph built from corpus records.
//!
//! A lightweight graph-RAG artifact: entities are extracted per record with
//! simple heuristics (email addresses, capitalised words), nodes carry
//! occurrence frequency, and undirected edges carry co-occurrence weight.

use crate::types::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;
use tracing::info;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email pattern")
});

static CAPITALISED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-zA-Z]{2,}\b").expect("valid word pattern"));

/// Node and edge counts after a build.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
}

#[derive(Debug, Serialize)]
struct NodeRecord<'a> {
    id: &'a str,
    label: &'a str,
    frequency: usize,
}

#[derive(Debug, Serialize)]
struct EdgeRecord<'a> {
    source: &'a str,
    target: &'a str,
    weight: usize,
}

/// Extract candidate entities (people, orgs, email addresses) from text.
///
/// Email addresses are matched first, then capitalised words of three or
/// more letters. Duplicates are removed case-insensitively, keeping the
/// first spelling seen in order of appearance.
pub fn extract_entities(text: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut entities = Vec::new();

    let candidates = EMAIL_RE
        .find_iter(text)
        .chain(CAPITALISED_RE.find_iter(text));

    for candidate in candidates {
        let value = candidate.as_str();
        if seen.insert(value.to_lowercase()) {
            entities.push(value.to_string());
        }
    }

    entities
}

/// Builds the co-occurrence graph artifacts from `(source, message)` records.
pub struct GraphBuilder;

impl GraphBuilder {
    /// Build the graph and write `nodes.jsonl` and `edges.jsonl` under `output_dir`.
    ///
    /// Edges are undirected: the pair is sorted before keying so repeated
    /// co-occurrences accumulate on one edge regardless of order.
    pub fn build(records: &[(String, String)], output_dir: &Path) -> Result<GraphSummary> {
        let mut node_frequency: BTreeMap<String, usize> = BTreeMap::new();
        let mut edges: BTreeMap<(String, String), usize> = BTreeMap::new();

        for (_, message) in records {
            let entities = extract_entities(message);
            if entities.is_empty() {
                continue;
            }
            for entity in &entities {
                *node_frequency.entry(entity.clone()).or_default() += 1;
            }
            for (i, source) in entities.iter().enumerate() {
                for target in &entities[i + 1..] {
                    let key = if source <= target {
                        (source.clone(), target.clone())
                    } else {
                        (target.clone(), source.clone())
                    };
                    *edges.entry(key).or_default() += 1;
                }
            }
        }

        fs::create_dir_all(output_dir)?;

        let mut nodes_file = fs::File::create(output_dir.join("nodes.jsonl"))?;
        for (entity, frequency) in &node_frequency {
            let line = serde_json::to_string(&NodeRecord {
                id: entity,
                label: entity,
                frequency: *frequency,
            })?;
            writeln!(nodes_file, "{}", line)?;
        }

        let mut edges_file = fs::File::create(output_dir.join("edges.jsonl"))?;
        for ((source, target), weight) in &edges {
            let line = serde_json::to_string(&EdgeRecord {
                source,
                target,
                weight: *weight,
            })?;
            writeln!(edges_file, "{}", line)?;
        }

        let summary = GraphSummary {
            nodes: node_frequency.len(),
            edges: edges.len(),
        };
        info!(
            nodes = summary.nodes,
            edges = summary.edges,
            output = %output_dir.display(),
            "graph artifacts written"
        );

        Ok(summary)
    }
}
