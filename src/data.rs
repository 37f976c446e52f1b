//! Dataset loading, schema normalization and JSONL IO

use crate::error::{MathEvalError, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::warn;

/// Source keys that may carry the question text, tried in order
const QUESTION_KEYS: &[&str] = &["question", "prompt", "input", "problem"];

/// Source keys that may carry the ground-truth answer, tried in order
const ANSWER_KEYS: &[&str] = &["answer", "gt_ans", "ground_truth", "target"];

/// One benchmark problem, normalized to a fixed shape at load time
#[derive(Debug, Clone)]
pub struct Sample {
    pub dataset: String,
    pub question: String,
    pub answer: Option<String>,
}

/// Reduce a GSM8K-style answer ("reasoning #### 42") to its final part
fn parse_ground_truth(answer: &str) -> String {
    match answer.rsplit_once("####") {
        Some((_, tail)) => tail.trim().to_string(),
        None => answer.trim().to_string(),
    }
}

/// Map one loosely-typed source record onto a Sample.
///
/// Returns None when no recognized question key is present, which callers
/// treat as a malformed record to skip.
fn normalize_record(dataset: &str, record: &serde_json::Value) -> Option<Sample> {
    let question = QUESTION_KEYS
        .iter()
        .find_map(|key| record.get(key).and_then(|v| v.as_str()))
        .filter(|s| !s.is_empty())?;

    let answer = ANSWER_KEYS
        .iter()
        .find_map(|key| record.get(key))
        .and_then(|v| match v {
            serde_json::Value::String(s) => Some(parse_ground_truth(s)),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

    Some(Sample {
        dataset: dataset.to_string(),
        question: question.to_string(),
        answer,
    })
}

/// Load datasets given as "name/split" specs from `<data_dir>/<name>/<split>.jsonl`.
///
/// Malformed records (no recognized question field) are skipped with a
/// warning. A missing or unreadable dataset file is an error: nothing has
/// been evaluated yet at that point, so failing the run is safe.
pub fn load_datasets(specs: &[String], data_dir: &Path) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();

    for spec in specs {
        let (name, split) = spec.split_once('/').ok_or_else(|| {
            MathEvalError::DatasetError(format!("Invalid dataset spec (want name/split): {}", spec))
        })?;

        let path = data_dir.join(name).join(format!("{}.jsonl", split));
        let file = File::open(&path).map_err(|e| {
            MathEvalError::DatasetError(format!("Cannot open {}: {}", path.display(), e))
        })?;

        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: serde_json::Value = serde_json::from_str(&line).map_err(|e| {
                MathEvalError::DatasetError(format!(
                    "{}:{}: invalid JSON: {}",
                    path.display(),
                    line_no + 1,
                    e
                ))
            })?;

            match normalize_record(name, &record) {
                Some(sample) => samples.push(sample),
                None => {
                    let keys: Vec<&str> = record
                        .as_object()
                        .map(|o| o.keys().map(|k| k.as_str()).collect())
                        .unwrap_or_default();
                    warn!(dataset = name, line = line_no + 1, ?keys, "skipping malformed sample");
                }
            }
        }
    }

    Ok(samples)
}

/// Write a slice of serializable records as newline-delimited JSON,
/// replacing the file wholesale.
pub fn save_jsonl<T: Serialize>(records: &[T], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writeln!(writer)?;
    }

    Ok(())
}
