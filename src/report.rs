//! Score reporting: extremes, median and histogram

use crate::graph::NodeIndex;
use crate::ingest::IdentifierRegistry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bucket boundaries used when none are configured
pub const DEFAULT_HISTOGRAM_BOUNDARIES: [f64; 13] = [
    -1.0, 0.0, 1e-7, 2e-7, 4e-7, 6e-7, 8e-7, 1e-6, 2e-6, 5e-6, 1e-5, 1e-4, 0.1,
];

/// What to include in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of lowest-scored nodes to list
    pub lowest: usize,
    /// Number of highest-scored nodes to list
    pub highest: usize,
    /// Ascending histogram bucket boundaries
    pub histogram: Vec<f64>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            lowest: 10,
            highest: 15,
            histogram: DEFAULT_HISTOGRAM_BOUNDARIES.to_vec(),
        }
    }
}

/// A node with its score and external identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedNode {
    pub index: NodeIndex,
    /// Absent for indices the registry never assigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub score: f64,
}

/// Counts of scores per bucket
///
/// With boundaries `b[0] < b[1] < ... < b[k-1]`, `counts` has `k + 1`
/// entries: `counts[0]` holds scores below `b[0]`, `counts[i]` scores in
/// `[b[i-1], b[i])`, and `counts[k]` scores at or above `b[k-1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub boundaries: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn new(boundaries: Vec<f64>) -> Self {
        let counts = vec![0; boundaries.len() + 1];
        Self { boundaries, counts }
    }

    pub fn add(&mut self, value: f64) {
        let bucket = self.boundaries.partition_point(|&b| b <= value);
        self.counts[bucket] += 1;
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    fn label(&self, bucket: usize) -> String {
        match bucket {
            0 => format!("< {:e}", self.boundaries.first().copied().unwrap_or(0.0)),
            b if b == self.boundaries.len() => format!(">= {:e}", self.boundaries[b - 1]),
            b => format!("[{:e}, {:e})", self.boundaries[b - 1], self.boundaries[b]),
        }
    }
}

/// Summary of one ranking run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankReport {
    pub generated_at: DateTime<Utc>,
    pub node_count: usize,
    pub iterations_run: usize,
    /// Lowest scores, ascending
    pub lowest: Vec<RankedNode>,
    /// Highest scores, descending
    pub highest: Vec<RankedNode>,
    pub median: Option<f64>,
    pub histogram: Histogram,
}

impl RankReport {
    /// Summarize `scores`; identifiers come from `registry`
    pub fn build(
        scores: &[f64],
        registry: &IdentifierRegistry,
        iterations_run: usize,
        config: &ReportConfig,
    ) -> Self {
        let mut order: Vec<usize> = (0..scores.len()).collect();
        // Stable, so equal scores keep index order.
        order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

        let ranked = |i: usize| {
            let index = NodeIndex::new(i);
            RankedNode {
                index,
                id: registry.resolve(index).map(str::to_string),
                score: scores[i],
            }
        };

        let lowest = order.iter().take(config.lowest).map(|&i| ranked(i)).collect();
        let highest = order
            .iter()
            .rev()
            .take(config.highest)
            .map(|&i| ranked(i))
            .collect();
        let median = order.get(order.len() / 2).map(|&i| scores[i]);

        let mut histogram = Histogram::new(config.histogram.clone());
        for &score in scores {
            histogram.add(score);
        }

        Self {
            generated_at: Utc::now(),
            node_count: scores.len(),
            iterations_run,
            lowest,
            highest,
            median,
            histogram,
        }
    }
}

fn write_ranked(f: &mut fmt::Formatter<'_>, nodes: &[RankedNode]) -> fmt::Result {
    for node in nodes {
        match &node.id {
            Some(id) => writeln!(f, "  {:<40} {:e}", id, node.score)?,
            None => writeln!(f, "  #{:<39} {:e}", node.index, node.score)?,
        }
    }
    Ok(())
}

impl fmt::Display for RankReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Ranked {} nodes in {} iteration(s) at {}",
            self.node_count,
            self.iterations_run,
            self.generated_at.to_rfc3339()
        )?;
        writeln!(f)?;
        writeln!(f, "Lowest rank:")?;
        write_ranked(f, &self.lowest)?;
        writeln!(f)?;
        writeln!(f, "Highest rank:")?;
        write_ranked(f, &self.highest)?;
        writeln!(f)?;
        writeln!(f, "Histogram:")?;
        let total = self.histogram.total().max(1);
        for (bucket, &count) in self.histogram.counts.iter().enumerate() {
            writeln!(
                f,
                "  {:<28} {:>10}  {:>6.2}%",
                self.histogram.label(bucket),
                count,
                100.0 * count as f64 / total as f64
            )?;
        }
        writeln!(f)?;
        match self.median {
            Some(median) => writeln!(f, "Median rank: {:e}", median),
            None => writeln!(f, "Median rank: n/a"),
        }
    }
}
