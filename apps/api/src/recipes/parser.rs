//! Turns raw completion text into candidate structured data.
//!
//! Each endpoint's parser is a pure function from raw text to a tagged
//! outcome, so the recovery heuristics are testable without any I/O.
//! Recipe generation has no recovery: its output feeds structured fields
//! downstream code indexes into, and a heuristic reconstruction risks
//! silently wrong data. The calorie and step parsers never fail, since a
//! degraded answer beats an error for a single scalar or a flat list.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static FIRST_INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Leading enumeration marker: digits, optional period, trailing whitespace.
static ENUMERATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.?\s*").expect("valid regex"));

/// Outcome of parsing a calorie-estimation completion. Never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum CalorieOutcome {
    /// The stripped text decoded as strict JSON.
    Parsed(Value),
    /// Decode failed; the first integer run in the raw text (or 0).
    Recovered(u32),
}

/// Outcome of parsing a step-generation completion. Never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum StepsOutcome {
    /// The stripped text decoded as strict JSON.
    Parsed(Value),
    /// Decode failed; renumbered non-empty lines of the raw text.
    /// May be empty, in which case the normalizer substitutes the fallback step.
    Recovered(Vec<String>),
}

/// Strips a ```json ... ``` or ``` ... ``` fence pair from completion output.
/// Only the outermost pair is handled, not nested fences.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(str::trim)
            .unwrap_or_else(|| stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(str::trim)
            .unwrap_or_else(|| stripped.trim_start())
    } else {
        text
    }
}

/// Recipe generation parse: strict JSON or a terminal error.
pub fn parse_recipes(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(strip_code_fences(raw))
}

/// Calorie estimation parse. On decode failure, scans the raw text for the
/// first integer-looking substring; 0 when there is none.
pub fn parse_calorie_estimate(raw: &str) -> CalorieOutcome {
    match serde_json::from_str(strip_code_fences(raw)) {
        Ok(value) => CalorieOutcome::Parsed(value),
        Err(_) => {
            let recovered = FIRST_INTEGER
                .find(raw)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .unwrap_or(0);
            CalorieOutcome::Recovered(recovered)
        }
    }
}

/// Step generation parse. On decode failure, splits the raw text into
/// non-empty lines, strips leading enumeration markers, and renumbers the
/// survivors as "Step N: <content>".
pub fn parse_steps(raw: &str) -> StepsOutcome {
    match serde_json::from_str(strip_code_fences(raw)) {
        Ok(value) => StepsOutcome::Parsed(value),
        Err(_) => StepsOutcome::Recovered(renumber_lines(raw)),
    }
}

fn renumber_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let cleaned = ENUMERATION_MARKER.replace(line, "");
            let cleaned = cleaned.trim();
            (!cleaned.is_empty()).then(|| cleaned.to_string())
        })
        .enumerate()
        .map(|(index, content)| format!("Step {}: {}", index + 1, content))
        .collect()
}
