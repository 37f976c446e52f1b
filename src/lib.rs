//! matheval - evaluate mathematical reasoning of LLMs through
//! OpenAI-compatible APIs
//!
//! This crate provides:
//! - Dataset loading with schema normalization (data)
//! - A sequential generation client (client, prompts)
//! - Final-answer extraction and equivalence grading (extract, grader)
//! - Accuracy aggregation under pluggable policies (vote, metrics)
//! - A grid-table metrics report (report)

pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod extract;
pub mod grader;
pub mod metrics;
pub mod prompts;
pub mod report;
pub mod run;
pub mod vote;

pub use crate::config::{EvalConfig, SamplingParams};
pub use crate::data::{load_datasets, save_jsonl, Sample};
pub use crate::error::{MathEvalError, Result};
pub use crate::extract::{extract_and_strip, normalize};
pub use crate::grader::math_equal;
pub use crate::metrics::{compute_metrics, DatasetMetric, EvalResult, MetricsReport};
pub use crate::run::{run_eval, Generation, CHECKPOINT_INTERVAL};
pub use crate::vote::{available_agg_methods, get_agg, Decision, GenRecord};
