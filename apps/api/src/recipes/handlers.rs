//! Axum route handlers for the recipe endpoints.
//!
//! Every handler walks the same sequence: validate input, check the
//! credential, build the prompt, invoke the completion backend once,
//! parse, normalize, respond. No step is retried or revisited.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{CompletionParams, LlmError};
use crate::recipes::models::{CalorieEstimateRequest, Recipe, RecipeRequest, StepsRequest};
use crate::recipes::normalize::{
    normalize_calorie_estimate, normalize_recipes, normalize_steps,
};
use crate::recipes::parser::{parse_calorie_estimate, parse_recipes, parse_steps};
use crate::recipes::prompts::{build_calories_prompt, build_recipes_prompt, build_steps_prompt};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CalorieEstimateResponse {
    pub estimated_calories: u32,
}

#[derive(Debug, Serialize)]
pub struct StepsResponse {
    pub steps: Vec<String>,
}

/// POST /api/v1/recipes
///
/// Generates recipe suggestions from the user's ingredients and tools.
/// A completion that cannot be decoded as a recipe array fails the whole
/// request; no heuristic recipes are fabricated.
pub async fn handle_generate_recipes(
    State(state): State<AppState>,
    Json(request): Json<RecipeRequest>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    if request.ingredients.is_empty() {
        return Err(AppError::NoIngredients);
    }
    require_api_key(&state)?;

    info!(
        ingredients = request.ingredients.len(),
        tools = request.tools.len(),
        "generating recipes"
    );

    let prompt = build_recipes_prompt(&request);
    let raw = state
        .llm
        .complete(&prompt, CompletionParams::recipes())
        .await
        .map_err(|e| map_upstream(e, AppError::Generation))?;

    let value = parse_recipes(&raw).map_err(|e| {
        warn!("recipe completion was not valid JSON: {e}");
        AppError::RecipeParse(e.to_string())
    })?;
    let recipes = normalize_recipes(&value).map_err(|e| AppError::RecipeFormat(e.to_string()))?;

    info!(count = recipes.len(), "recipes generated");
    Ok(Json(recipes))
}

/// POST /api/v1/estimate-calories
///
/// Estimates calories for a saved recipe. Parse failures never surface:
/// the first integer in the raw completion (or 0) is the estimate.
pub async fn handle_estimate_calories(
    State(state): State<AppState>,
    Json(request): Json<CalorieEstimateRequest>,
) -> Result<Json<CalorieEstimateResponse>, AppError> {
    if request.title.trim().is_empty() || request.ingredients.is_empty() {
        return Err(AppError::MissingData);
    }
    require_api_key(&state)?;

    let prompt = build_calories_prompt(&request);
    let raw = state
        .llm
        .complete(&prompt, CompletionParams::calories())
        .await
        .map_err(|e| map_upstream(e, AppError::Estimation))?;

    let estimated_calories = normalize_calorie_estimate(parse_calorie_estimate(&raw));
    info!(estimated_calories, title = %request.title, "calories estimated");

    Ok(Json(CalorieEstimateResponse { estimated_calories }))
}

/// POST /api/v1/generate-steps
///
/// Converts a free-text description into numbered steps. Parse failures
/// never surface: unparseable text degrades to renumbered lines, and an
/// empty result degrades to the single fallback step.
pub async fn handle_generate_steps(
    State(state): State<AppState>,
    Json(request): Json<StepsRequest>,
) -> Result<Json<StepsResponse>, AppError> {
    if request.description.trim().is_empty() {
        return Err(AppError::NoDescription);
    }
    require_api_key(&state)?;

    let prompt = build_steps_prompt(&request);
    let raw = state
        .llm
        .complete(&prompt, CompletionParams::steps())
        .await
        .map_err(|e| map_upstream(e, AppError::Generation))?;

    let steps = normalize_steps(parse_steps(&raw));
    info!(count = steps.len(), "steps generated");

    Ok(Json(StepsResponse { steps }))
}

/// The credential is checked per request, before the external call, so a
/// service booted without a key degrades to API_KEY_MISSING responses.
fn require_api_key(state: &AppState) -> Result<(), AppError> {
    if state.config.openai_api_key.is_none() {
        return Err(AppError::ApiKeyMissing);
    }
    Ok(())
}

/// Maps an upstream completion failure onto the wire taxonomy, keeping the
/// credential / rate-limit / catch-all split. The catch-all differs per
/// endpoint (`GENERATION_ERROR` vs `ESTIMATION_ERROR`).
fn map_upstream(err: LlmError, catch_all: fn(String) -> AppError) -> AppError {
    match err {
        LlmError::InvalidApiKey { .. } => AppError::InvalidApiKey,
        LlmError::RateLimited { .. } => AppError::RateLimited,
        other => catch_all(other.to_string()),
    }
}
