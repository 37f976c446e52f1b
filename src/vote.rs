//! Aggregation policies reducing k generations to one decision per sample

use crate::error::{MathEvalError, Result};
use crate::extract::normalize;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One generation's contribution to a sample's final decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenRecord {
    pub pred: Option<String>,
    /// Step-level reward scores, when a process reward model supplied them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<f64>>,
    pub correct: bool,
}

/// Final decision for one sample after aggregation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub dataset: String,
    pub ans: Option<String>,
    pub correct: bool,
}

/// Aggregation function: k generation records for one sample -> one decision
pub type AggFn = fn(&[GenRecord], &str) -> Decision;

/// Registry of available aggregation methods
static AGG_REGISTRY: Lazy<HashMap<&'static str, AggFn>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, AggFn> = HashMap::new();
    m.insert("pass", agg_pass);
    m.insert("majority_vote", agg_majority_vote);
    m
});

/// Get an aggregation function by name
pub fn get_agg(name: &str) -> Result<AggFn> {
    AGG_REGISTRY.get(name).copied().ok_or_else(|| {
        let mut available: Vec<&str> = AGG_REGISTRY.keys().copied().collect();
        available.sort_unstable();
        MathEvalError::UnknownAggMethod(name.to_string(), available.join(", "))
    })
}

/// All registered aggregation method names, sorted
pub fn available_agg_methods() -> Vec<&'static str> {
    let mut names: Vec<&str> = AGG_REGISTRY.keys().copied().collect();
    names.sort_unstable();
    names
}

/// pass: the first record decides (pass@1 when k=1)
fn agg_pass(records: &[GenRecord], dataset: &str) -> Decision {
    let first = records.first();
    Decision {
        dataset: dataset.to_string(),
        ans: first.and_then(|r| r.pred.clone()),
        correct: first.map(|r| r.correct).unwrap_or(false),
    }
}

/// majority_vote: group predictions by normalized equality, the modal group
/// decides. Ties break to the earliest-occurring group.
fn agg_majority_vote(records: &[GenRecord], dataset: &str) -> Decision {
    // (normalized key, representative index, count)
    let mut groups: Vec<(String, usize, usize)> = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        let key = record.pred.as_deref().map(normalize).unwrap_or_default();
        match groups.iter().position(|(k, _, _)| *k == key) {
            Some(pos) => groups[pos].2 += 1,
            None => groups.push((key, idx, 1)),
        }
    }

    let winner = groups
        .iter()
        .max_by(|a, b| a.2.cmp(&b.2).then(b.1.cmp(&a.1)))
        .map(|(_, idx, _)| *idx);

    match winner {
        Some(idx) => Decision {
            dataset: dataset.to_string(),
            ans: records[idx].pred.clone(),
            correct: records[idx].correct,
        },
        None => Decision {
            dataset: dataset.to_string(),
            ans: None,
            correct: false,
        },
    }
}
