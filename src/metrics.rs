//! Accuracy aggregation across samples and datasets

use crate::vote::{AggFn, Decision, GenRecord};
use serde::{Deserialize, Serialize};

/// Per-sample input to metric computation: the sample's dataset plus its
/// generation records, in generation order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalResult {
    pub dataset: String,
    #[serde(rename = "generation")]
    pub generations: Vec<GenRecord>,
}

/// One per-dataset metric row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetric {
    pub dataset: String,
    pub total: usize,
    pub correct: usize,
    pub accuracy: f64,
}

/// Metric rows for every dataset, in first-seen order, plus the unweighted
/// mean accuracy across datasets. Keeping the average out of the row list
/// means it can never feed back into its own mean.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub per_dataset: Vec<DatasetMetric>,
    pub average_accuracy: f64,
}

/// Reduce per-sample results to per-dataset accuracy under an aggregation
/// policy.
///
/// For each sample the first `k` generation records (clamped to what is
/// available) feed the aggregation function, yielding one decision. Decisions
/// group by dataset in first-seen order, so output ordering is deterministic
/// for a deterministic input ordering. Every dataset row stems from at least
/// one decision, so `total >= 1` and the accuracy division is always defined.
/// The average is the unweighted arithmetic mean of per-dataset accuracies
/// (a dataset with 5 samples counts the same as one with 500); it is 0.0
/// when no datasets are present.
pub fn compute_metrics(eval_results: &[EvalResult], k: usize, agg: AggFn) -> MetricsReport {
    let decisions: Vec<Decision> = eval_results
        .iter()
        .map(|sample| {
            let window = &sample.generations[..k.min(sample.generations.len())];
            agg(window, &sample.dataset)
        })
        .collect();

    let mut per_dataset: Vec<DatasetMetric> = Vec::new();
    for decision in &decisions {
        let idx = match per_dataset.iter().position(|m| m.dataset == decision.dataset) {
            Some(idx) => idx,
            None => {
                per_dataset.push(DatasetMetric {
                    dataset: decision.dataset.clone(),
                    total: 0,
                    correct: 0,
                    accuracy: 0.0,
                });
                per_dataset.len() - 1
            }
        };
        let row = &mut per_dataset[idx];
        row.total += 1;
        if decision.correct {
            row.correct += 1;
        }
    }

    for row in &mut per_dataset {
        row.accuracy = row.correct as f64 / row.total as f64;
    }

    let average_accuracy = if per_dataset.is_empty() {
        0.0
    } else {
        per_dataset.iter().map(|m| m.accuracy).sum::<f64>() / per_dataset.len() as f64
    };

    MetricsReport {
        per_dataset,
        average_accuracy,
    }
}
