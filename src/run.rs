//! Sequential evaluation loop: generate, extract, grade, aggregate

use crate::client::ModelClient;
use crate::config::EvalConfig;
use crate::data::{load_datasets, save_jsonl, Sample};
use crate::error::Result;
use crate::extract::extract_and_strip;
use crate::grader::math_equal;
use crate::metrics::{compute_metrics, EvalResult, MetricsReport};
use crate::report::write_metrics_txt;
use crate::vote::{get_agg, GenRecord};
use crate::prompts;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{info, warn};

/// Checkpoint cadence, in enumerated samples
pub const CHECKPOINT_INTERVAL: usize = 100;

/// Aggregation methods reported in metrics.txt
const AGG_METHODS: &[&str] = &["pass", "majority_vote"];

/// One sample's completed generation.
///
/// Two-phase lifecycle: built after generation and extraction with
/// `correct: None`, graded in a second pass that sets `Some(bool)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    pub dataset: String,
    pub question: String,
    pub response: String,
    pub pred: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt_ans: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
}

/// Generate one completion per sample, checkpointing every
/// [`CHECKPOINT_INTERVAL`] samples. Generation failures skip the sample;
/// it never reaches aggregation.
async fn generate_all(
    client: &ModelClient,
    samples: &[Sample],
    config: &EvalConfig,
) -> Result<Vec<Generation>> {
    let checkpoint_path = config.output_dir.join("checkpoint_generations.jsonl");
    let mut generations: Vec<Generation> = Vec::with_capacity(samples.len());

    for (idx, sample) in samples.iter().enumerate() {
        let prompt = prompts::render(&config.prompt_type, &sample.question);

        match client.complete(&prompt).await {
            Ok(response) => {
                let pred = extract_and_strip(&response, &sample.dataset);
                generations.push(Generation {
                    dataset: sample.dataset.clone(),
                    question: sample.question.clone(),
                    response,
                    pred,
                    gt_ans: sample.answer.clone(),
                    correct: None,
                });
            }
            Err(e) => {
                warn!(sample = idx, error = %e, "generation failed, skipping sample");
            }
        }

        if (idx + 1) % CHECKPOINT_INTERVAL == 0 {
            save_jsonl(&generations, &checkpoint_path)?;
            info!(samples = idx + 1, "checkpoint saved");
        }
    }

    Ok(generations)
}

/// Set the correctness flag on every generation. Missing ground truth
/// grades as incorrect rather than failing the run.
fn grade_all(generations: &mut [Generation]) {
    for gen in generations.iter_mut() {
        let correct = match gen.gt_ans.as_deref() {
            Some(gt) => math_equal(&gen.pred, gt),
            None => {
                warn!(dataset = %gen.dataset, pred = %gen.pred, "no ground truth, marking incorrect");
                false
            }
        };
        gen.correct = Some(correct);
    }
}

/// Project graded generations into the shape metric aggregation consumes.
/// Each sample contributes a single generation record here (k = 1).
fn to_eval_results(generations: &[Generation]) -> Vec<EvalResult> {
    generations
        .iter()
        .map(|gen| EvalResult {
            dataset: gen.dataset.clone(),
            generations: vec![GenRecord {
                pred: Some(gen.pred.clone()),
                scores: None,
                correct: gen.correct.unwrap_or(false),
            }],
        })
        .collect()
}

/// Run a full evaluation: load, generate, grade, aggregate, report.
pub async fn run_eval(config: &EvalConfig) -> Result<Vec<(&'static str, MetricsReport)>> {
    fs::create_dir_all(&config.output_dir)?;

    let spec = format!("{}/{}", config.data_name, config.split);
    let mut samples = load_datasets(&[spec], &config.data_dir)?;
    if let Some(cap) = config.num_test_sample {
        samples.truncate(cap);
    }
    info!(dataset = %config.data_name, split = %config.split, count = samples.len(), "loaded samples");

    let client = ModelClient::new(config);
    let mut generations = generate_all(&client, &samples, config).await?;
    info!(generated = generations.len(), skipped = samples.len() - generations.len(), "generation finished");

    if config.save_outputs {
        save_jsonl(&generations, &config.output_dir.join("generations.jsonl"))?;
    }

    grade_all(&mut generations);
    save_jsonl(&generations, &config.output_dir.join("eval_results.jsonl"))?;

    let eval_results = to_eval_results(&generations);
    let k = 1;
    let mut reports = Vec::new();
    for method in AGG_METHODS {
        let agg = get_agg(method)?;
        reports.push((*method, compute_metrics(&eval_results, k, agg)));
    }

    write_metrics_txt(&config.output_dir.join("metrics.txt"), k, &reports)?;
    info!(path = %config.output_dir.display(), "metrics saved");

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generation(dataset: &str, pred: &str, gt: Option<&str>) -> Generation {
        Generation {
            dataset: dataset.to_string(),
            question: "q".to_string(),
            response: "r".to_string(),
            pred: pred.to_string(),
            gt_ans: gt.map(|s| s.to_string()),
            correct: None,
        }
    }

    #[test]
    fn test_grade_all_sets_flags() {
        let mut gens = vec![
            generation("d", "42", Some("42")),
            generation("d", "41", Some("42")),
        ];
        grade_all(&mut gens);
        assert_eq!(gens[0].correct, Some(true));
        assert_eq!(gens[1].correct, Some(false));
    }

    #[test]
    fn test_missing_ground_truth_is_incorrect() {
        let mut gens = vec![generation("d", "42", None)];
        grade_all(&mut gens);
        assert_eq!(gens[0].correct, Some(false));
    }

    #[test]
    fn test_to_eval_results_singleton_generations() {
        let mut gens = vec![generation("d", "42", Some("42"))];
        grade_all(&mut gens);
        let results = to_eval_results(&gens);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].generations.len(), 1);
        assert!(results[0].generations[0].correct);
    }

    #[test]
    fn test_ungraded_generation_serializes_without_correct() {
        let gen = generation("d", "42", Some("42"));
        let json = serde_json::to_value(&gen).unwrap();
        assert!(json.get("correct").is_none());
    }
}
