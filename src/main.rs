//! matheval - evaluate mathematical reasoning of LLMs through OpenAI-compatible APIs

use clap::Parser;
use matheval::{run_eval, report, EvalConfig, Result, SamplingParams};
use std::path::PathBuf;

/// Evaluate a model's math-benchmark accuracy through an OpenAI-compatible API
#[derive(Parser, Debug)]
#[command(name = "matheval")]
#[command(version)]
#[command(about = "Evaluate mathematical reasoning of LLMs")]
struct Args {
    /// Model identifier or path, as understood by the backend
    #[arg(long)]
    model: String,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, default_value = "http://localhost:8000/v1")]
    base_url: String,

    /// API key for the backend, if it requires one
    #[arg(long, env = "MATHEVAL_API_KEY")]
    api_key: Option<String>,

    /// Prompt-style tag (e.g. deepseek-math-cot, cot, raw)
    #[arg(long, default_value = "deepseek-math-cot")]
    prompt_type: String,

    /// Dataset name
    #[arg(long, default_value = "college_math")]
    data_name: String,

    /// Dataset split
    #[arg(long, default_value = "test")]
    split: String,

    /// Directory holding <data_name>/<split>.jsonl files
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Directory for checkpoints, JSONL artifacts and metrics.txt
    #[arg(long, default_value = "./outputs")]
    output_dir: PathBuf,

    /// Evaluate at most this many samples
    #[arg(long)]
    num_test_sample: Option<usize>,

    /// Sampling temperature; 0.0 means greedy decoding
    #[arg(long, default_value = "0.7")]
    temperature: f64,

    /// Nucleus sampling top-p
    #[arg(long, default_value = "0.8")]
    top_p: f64,

    /// Maximum new tokens per completion
    #[arg(long, default_value = "512")]
    max_new_tokens: u32,

    /// Also persist full raw generations to generations.jsonl
    #[arg(long, default_value = "false")]
    save_outputs: bool,
}

impl Args {
    fn into_config(self) -> EvalConfig {
        EvalConfig {
            model: self.model,
            base_url: self.base_url,
            api_key: self.api_key,
            prompt_type: self.prompt_type,
            data_name: self.data_name,
            split: self.split,
            data_dir: self.data_dir,
            output_dir: self.output_dir,
            num_test_sample: self.num_test_sample,
            sampling: SamplingParams {
                temperature: self.temperature,
                top_p: self.top_p,
                max_new_tokens: self.max_new_tokens,
            },
            save_outputs: self.save_outputs,
        }
    }
}

async fn run() -> Result<()> {
    let config = Args::parse().into_config();
    let reports = run_eval(&config).await?;

    for (method, metrics) in &reports {
        println!("{}:\n", method);
        println!("{}\n", report::render_table(1, metrics));
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
