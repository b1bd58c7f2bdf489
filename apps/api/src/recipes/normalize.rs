//! Coerces parsed completion output into the fixed response shapes.
//!
//! Normalization repairs malformed recipes field-by-field instead of
//! dropping them; the only rejection is a payload that is not a non-empty
//! array. The calorie and step normalizers never reject.

use serde_json::Value;

use crate::recipes::models::Recipe;
use crate::recipes::parser::{CalorieOutcome, StepsOutcome};

/// The one step returned when nothing usable could be extracted.
pub const FALLBACK_STEP: &str = "1. Follow the description provided";

const DEFAULT_TITLE: &str = "Untitled Recipe";

/// Reason a recipe payload was rejected outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeShapeError {
    NotAnArray,
    Empty,
}

impl std::fmt::Display for RecipeShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipeShapeError::NotAnArray => write!(f, "expected a JSON array of recipes"),
            RecipeShapeError::Empty => write!(f, "recipe array was empty"),
        }
    }
}

/// Validates the overall shape, then repairs every element into a `Recipe`.
/// Individual malformed recipes are fixed up, never dropped.
pub fn normalize_recipes(value: &Value) -> Result<Vec<Recipe>, RecipeShapeError> {
    let items = value.as_array().ok_or(RecipeShapeError::NotAnArray)?;
    if items.is_empty() {
        return Err(RecipeShapeError::Empty);
    }
    Ok(items.iter().map(normalize_recipe).collect())
}

fn normalize_recipe(value: &Value) -> Recipe {
    Recipe {
        title: value
            .get("title")
            .and_then(Value::as_str)
            .filter(|title| !title.trim().is_empty())
            .unwrap_or(DEFAULT_TITLE)
            .to_string(),
        ingredients: string_items(value.get("ingredients")),
        steps: string_items(value.get("steps")),
        estimated_calories: coerce_count(value.get("estimated_calories")),
    }
}

pub fn normalize_calorie_estimate(outcome: CalorieOutcome) -> u32 {
    match outcome {
        CalorieOutcome::Parsed(value) => coerce_count(value.get("estimated_calories")),
        CalorieOutcome::Recovered(estimate) => estimate,
    }
}

/// Enforces a non-empty list of step strings; anything else becomes the
/// single fallback step.
pub fn normalize_steps(outcome: StepsOutcome) -> Vec<String> {
    let steps = match outcome {
        StepsOutcome::Parsed(value) => string_items(Some(&value)),
        StepsOutcome::Recovered(lines) => lines,
    };
    if steps.is_empty() {
        vec![FALLBACK_STEP.to_string()]
    } else {
        steps
    }
}

/// String elements of an array value, in order; anything else is empty.
fn string_items(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Coerces a JSON value to a non-negative integer. Accepts integers,
/// floats (truncated), and numeric strings; everything else is 0.
fn coerce_count(value: Option<&Value>) -> u32 {
    let as_f64 = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    as_f64
        .filter(|n| n.is_finite() && *n > 0.0)
        .map(|n| n as u32)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_recipes_repairs_missing_fields() {
        let value = json!([{}]);
        let recipes = normalize_recipes(&value).unwrap();
        assert_eq!(
            recipes,
            vec![Recipe {
                title: "Untitled Recipe".to_string(),
                ingredients: vec![],
                steps: vec![],
                estimated_calories: 0,
            }]
        );
    }

    #[test]
    fn test_normalize_recipes_keeps_well_formed_elements() {
        let value = json!([
            {
                "title": "Fried Rice",
                "ingredients": ["rice", "egg"],
                "steps": ["Cook rice", "Fry everything"],
                "estimated_calories": 550
            },
            {
                "title": "",
                "ingredients": "not an array",
                "steps": ["Step 1", 42, "Step 2"],
                "estimated_calories": "480"
            }
        ]);
        let recipes = normalize_recipes(&value).unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].title, "Fried Rice");
        assert_eq!(recipes[0].estimated_calories, 550);
        assert_eq!(recipes[1].title, "Untitled Recipe");
        assert!(recipes[1].ingredients.is_empty());
        assert_eq!(recipes[1].steps, vec!["Step 1", "Step 2"]);
        assert_eq!(recipes[1].estimated_calories, 480);
    }

    #[test]
    fn test_normalize_recipes_rejects_non_array() {
        assert_eq!(
            normalize_recipes(&json!({"title": "lone recipe"})),
            Err(RecipeShapeError::NotAnArray)
        );
    }

    #[test]
    fn test_normalize_recipes_rejects_empty_array() {
        assert_eq!(normalize_recipes(&json!([])), Err(RecipeShapeError::Empty));
    }

    #[test]
    fn test_calorie_coercion_from_parsed_object() {
        let parsed = CalorieOutcome::Parsed(json!({"estimated_calories": 420}));
        assert_eq!(normalize_calorie_estimate(parsed), 420);
    }

    #[test]
    fn test_calorie_coercion_accepts_numeric_strings_and_floats() {
        let parsed = CalorieOutcome::Parsed(json!({"estimated_calories": "350"}));
        assert_eq!(normalize_calorie_estimate(parsed), 350);

        let parsed = CalorieOutcome::Parsed(json!({"estimated_calories": 350.9}));
        assert_eq!(normalize_calorie_estimate(parsed), 350);
    }

    #[test]
    fn test_calorie_coercion_zeroes_garbage() {
        for garbage in [
            json!({"estimated_calories": "lots"}),
            json!({"estimated_calories": -200}),
            json!({"estimated_calories": null}),
            json!({}),
            json!(420),
        ] {
            assert_eq!(normalize_calorie_estimate(CalorieOutcome::Parsed(garbage)), 0);
        }
    }

    #[test]
    fn test_calorie_recovered_passes_through() {
        assert_eq!(normalize_calorie_estimate(CalorieOutcome::Recovered(350)), 350);
        assert_eq!(normalize_calorie_estimate(CalorieOutcome::Recovered(0)), 0);
    }

    #[test]
    fn test_normalize_steps_keeps_parsed_strings() {
        let parsed = StepsOutcome::Parsed(json!(["Step 1: Chop", "Step 2: Fry"]));
        assert_eq!(normalize_steps(parsed), vec!["Step 1: Chop", "Step 2: Fry"]);
    }

    #[test]
    fn test_normalize_steps_falls_back_on_non_array_or_empty() {
        for outcome in [
            StepsOutcome::Parsed(json!({"steps": "inline"})),
            StepsOutcome::Parsed(json!([])),
            StepsOutcome::Parsed(json!([1, 2, 3])),
            StepsOutcome::Recovered(vec![]),
        ] {
            assert_eq!(normalize_steps(outcome), vec![FALLBACK_STEP.to_string()]);
        }
    }

    #[test]
    fn test_normalize_steps_keeps_recovered_lines() {
        let recovered = StepsOutcome::Recovered(vec!["Step 1: Simmer".to_string()]);
        assert_eq!(normalize_steps(recovered), vec!["Step 1: Simmer"]);
    }
}
