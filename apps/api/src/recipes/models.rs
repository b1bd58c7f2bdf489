use serde::{Deserialize, Serialize};

/// A normalized recipe as returned to clients.
///
/// Produced fresh per generation request and never mutated afterwards;
/// ratings and notes live with the client's own persistence, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub estimated_calories: u32,
}

/// Request body for recipe generation.
/// `ingredients` must be non-empty; everything else is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeRequest {
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    pub time: Option<u32>,
    pub calories: Option<u32>,
    pub prioritize: Option<String>,
    #[serde(rename = "recipeType")]
    pub recipe_type: Option<String>,
}

/// Request body for calorie estimation of an existing recipe.
#[derive(Debug, Clone, Deserialize)]
pub struct CalorieEstimateRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub description: Option<String>,
}

/// Request body for turning a free-text description into numbered steps.
#[derive(Debug, Clone, Deserialize)]
pub struct StepsRequest {
    #[serde(default)]
    pub description: String,
}
