//! Mathematical equivalence between a predicted and a ground-truth answer

use crate::extract::normalize;
use once_cell::sync::Lazy;
use regex::Regex;

const NUMERIC_TOLERANCE: f64 = 1e-4;

/// \frac{a}{b} with plain numeric arguments
static LATEX_FRAC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\\[dt]?frac\{(-?[\d.]+)\}\{(-?[\d.]+)\}$").unwrap()
});

/// Candidate numeric interpretations of an answer string.
///
/// Percentages are ambiguous ("50%" may mean 50 or 0.5), so both readings
/// are returned and equality holds if any pair of candidates matches.
fn numeric_candidates(text: &str) -> Vec<f64> {
    let s = text.trim().trim_start_matches('$').trim().replace(',', "");
    let mut candidates = Vec::new();

    if let Some(stripped) = s.strip_suffix('%') {
        if let Ok(v) = stripped.trim().parse::<f64>() {
            candidates.push(v);
            candidates.push(v / 100.0);
        }
        return candidates;
    }

    if let Ok(v) = s.parse::<f64>() {
        candidates.push(v);
        return candidates;
    }

    // a/b fractions
    if let Some((num, den)) = s.split_once('/') {
        if let (Ok(n), Ok(d)) = (num.trim().parse::<f64>(), den.trim().parse::<f64>()) {
            if d != 0.0 {
                candidates.push(n / d);
                return candidates;
            }
        }
    }

    if let Some(caps) = LATEX_FRAC_RE.captures(&s) {
        if let (Ok(n), Ok(d)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
            if d != 0.0 {
                candidates.push(n / d);
            }
        }
    }

    candidates
}

fn numeric_equal(pred: &str, gt: &str) -> bool {
    let pred_values = numeric_candidates(pred);
    let gt_values = numeric_candidates(gt);

    pred_values.iter().any(|p| {
        gt_values.iter().any(|g| {
            let scale = 1.0_f64.max(g.abs());
            (p - g).abs() / scale < NUMERIC_TOLERANCE
        })
    })
}

/// Split a bracketed expression into its top-level comma-separated parts,
/// returning the bracket pair and the parts. `(1, 2]` style intervals keep
/// their distinct open/close brackets.
fn split_bracketed(text: &str) -> Option<(char, char, Vec<&str>)> {
    let s = text.trim();
    let open = s.chars().next()?;
    let close = s.chars().last()?;
    if !matches!(open, '(' | '[' | '{') || !matches!(close, ')' | ']' | '}') {
        return None;
    }

    let inner = &s[open.len_utf8()..s.len() - close.len_utf8()];
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, ch) in inner.char_indices() {
        match ch {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&inner[start..]);
    Some((open, close, parts))
}

/// Decide whether two answer expressions are mathematically equal.
///
/// Total function: any input that cannot be interpreted falls back to
/// normalized string comparison, never an error.
pub fn math_equal(pred: &str, gt: &str) -> bool {
    if normalize(pred) == normalize(gt) {
        return true;
    }

    if numeric_equal(pred, gt) {
        return true;
    }

    // Tuples, intervals and sets: same brackets, same arity, equal elements
    if let (Some((po, pc, pred_parts)), Some((go, gc, gt_parts))) =
        (split_bracketed(pred), split_bracketed(gt))
    {
        return po == go
            && pc == gc
            && pred_parts.len() == gt_parts.len()
            && pred_parts
                .iter()
                .zip(gt_parts.iter())
                .all(|(p, g)| math_equal(p.trim(), g.trim()));
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_equality_after_normalize() {
        assert!(math_equal("$1,234", "1234"));
        assert!(math_equal("x + 1", "x+1"));
        assert!(!math_equal("x + 1", "x+2"));
    }

    #[test]
    fn test_numeric_tolerance() {
        assert!(math_equal("0.3333", "1/3"));
        assert!(math_equal("3.14159", "3.141592"));
        assert!(!math_equal("3.14", "3.15"));
    }

    #[test]
    fn test_fractions() {
        assert!(math_equal("1/2", "0.5"));
        assert!(math_equal("\\frac{1}{2}", "0.5"));
        assert!(math_equal("\\frac{3}{4}", "6/8"));
        assert!(!math_equal("1/2", "1/3"));
    }

    #[test]
    fn test_percentages() {
        assert!(math_equal("50%", "0.5"));
        assert!(math_equal("50%", "50"));
        assert!(!math_equal("50%", "5"));
    }

    #[test]
    fn test_negative_numbers() {
        assert!(math_equal("-42", "-42.0"));
        assert!(!math_equal("-42", "42"));
    }

    #[test]
    fn test_intervals_and_tuples() {
        assert!(math_equal("(1, 2)", "(1.0, 2.0)"));
        assert!(math_equal("[0, 1/2]", "[0, 0.5]"));
        // Open vs closed interval
        assert!(!math_equal("(1, 2)", "[1, 2]"));
        assert!(!math_equal("(1, 2)", "(1, 2, 3)"));
    }

    #[test]
    fn test_division_by_zero_is_not_equal() {
        assert!(!math_equal("1/0", "0"));
    }
}
