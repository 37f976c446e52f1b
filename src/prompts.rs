//! Prompt templates keyed by prompt-style tag

/// Chain-of-thought template asking for a boxed final answer
const COT_BOXED_TEMPLATE: &str = "{question}\nPlease reason step by step, and put your final answer within \\boxed{}.";

/// Template asking for a "The final answer is" conclusion
const COT_FINAL_ANSWER_TEMPLATE: &str = "Given the following problem, reason and give a final answer to the problem.\n\
Problem: {question}\n\
Your response should end with \"The final answer is [answer]\" where [answer] is the response to the problem.";

/// Render a question under a prompt-style tag.
///
/// Unknown tags pass the question through unchanged, so new models can be
/// probed without a template.
pub fn render(prompt_type: &str, question: &str) -> String {
    let template = match prompt_type {
        "deepseek-math-cot" | "qwen-boxed" | "cot-boxed" => COT_BOXED_TEMPLATE,
        "cot" | "direct-cot" => COT_FINAL_ANSWER_TEMPLATE,
        _ => return question.to_string(),
    };
    template.replace("{question}", question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_template() {
        let prompt = render("deepseek-math-cot", "What is 2+2?");
        assert!(prompt.contains("What is 2+2?"));
        assert!(prompt.contains("\\boxed{}"));
    }

    #[test]
    fn test_final_answer_template() {
        let prompt = render("cot", "What is 2+2?");
        assert!(prompt.contains("The final answer is"));
    }

    #[test]
    fn test_unknown_tag_passes_through() {
        assert_eq!(render("raw", "What is 2+2?"), "What is 2+2?");
    }
}
