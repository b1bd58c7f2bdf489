// All LLM prompt constants for the recipes module.
// Templates use {placeholder} markers replaced by the build_* functions.
// User text is interpolated verbatim; the model receives it as-is.

use crate::recipes::models::{CalorieEstimateRequest, RecipeRequest, StepsRequest};

/// Recipe generation prompt template.
/// Replace: {ingredients}, {tools}, {time}, {calories}, {prioritize}, {recipe_type}
const RECIPES_PROMPT_TEMPLATE: &str = r#"You are a friendly cooking assistant. Suggest 3 creative, realistic recipes
based only on the user's available ingredients and tools.

User's ingredients: {ingredients}
User's tools: {tools}
Time limit: {time} minutes
Target calories: {calories}
Prioritize ingredients: {prioritize}
Recipe type/description: {recipe_type}

IMPORTANT: Consider the recipe type/description when creating recipes. If the user wants a "post-workout protein meal", focus on high-protein options. If they want a "smoothie", create drinkable recipes. If they want "comfort food", make hearty, satisfying dishes. If they want "light lunch", create lighter, fresher options.

Return your answer as **strict JSON only** in this exact format (array of recipes):

[
  {
    "title": "Recipe name",
    "ingredients": ["ingredient 1", "ingredient 2"],
    "steps": ["step 1", "step 2"],
    "estimated_calories": 500
  },
  {
    "title": "Another Recipe name",
    "ingredients": ["ingredient 3", "ingredient 4"],
    "steps": ["step 1", "step 2"],
    "estimated_calories": 300
  },
  {
    "title": "Third Recipe name",
    "ingredients": ["ingredient 5", "ingredient 6"],
    "steps": ["step 1", "step 2"],
    "estimated_calories": 400
  }
]"#;

/// Calorie estimation prompt template.
/// Replace: {title}, {ingredients}, {description}
const CALORIES_PROMPT_TEMPLATE: &str = r#"Estimate the total calories for this recipe based on the ingredients and description.

Recipe Title: "{title}"
Ingredients: {ingredients}
Description: "{description}"

Please provide a reasonable calorie estimate for a typical serving of this dish. Consider:
- The main ingredients and their typical calorie content
- Cooking methods (fried vs baked vs steamed)
- Portion sizes (assume 1 serving unless specified otherwise)
- Common preparation methods

Return your answer as a JSON object with this exact format:
{"estimated_calories": 350}

Make the estimate realistic and based on typical food values. If you cannot make a reasonable estimate, return 0."#;

/// Step generation prompt template.
/// Replace: {description}
const STEPS_PROMPT_TEMPLATE: &str = r#"Convert the following recipe description into clear, numbered cooking steps.
Make the steps practical and easy to follow for someone who wants to recreate this dish.

Recipe Description: "{description}"

Return your answer as a JSON array of strings, where each string is a cooking step:

["Step 1: ...", "Step 2: ...", "Step 3: ..."]

Make sure the steps are:
- Numbered and clear
- In logical cooking order
- Practical and actionable
- Include cooking times and temperatures where appropriate
- Include any important techniques or tips mentioned"#;

/// Renders the recipe generation prompt. Missing optional fields become
/// explicit placeholder text so the model always sees a complete template.
pub fn build_recipes_prompt(request: &RecipeRequest) -> String {
    RECIPES_PROMPT_TEMPLATE
        .replace("{ingredients}", &join_or(&request.ingredients, "none"))
        .replace("{tools}", &join_or(&request.tools, "none"))
        .replace("{time}", &number_or(request.time, "unspecified"))
        .replace("{calories}", &number_or(request.calories, "any"))
        .replace("{prioritize}", text_or(&request.prioritize, "none"))
        .replace(
            "{recipe_type}",
            text_or(&request.recipe_type, "any type of recipe"),
        )
}

pub fn build_calories_prompt(request: &CalorieEstimateRequest) -> String {
    CALORIES_PROMPT_TEMPLATE
        .replace("{title}", &request.title)
        .replace("{ingredients}", &request.ingredients.join(", "))
        .replace(
            "{description}",
            text_or(&request.description, "No description provided"),
        )
}

pub fn build_steps_prompt(request: &StepsRequest) -> String {
    STEPS_PROMPT_TEMPLATE.replace("{description}", &request.description)
}

fn join_or(items: &[String], placeholder: &str) -> String {
    if items.is_empty() {
        placeholder.to_string()
    } else {
        items.join(", ")
    }
}

fn number_or(value: Option<u32>, placeholder: &str) -> String {
    value.map_or_else(|| placeholder.to_string(), |n| n.to_string())
}

fn text_or<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    value
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .unwrap_or(placeholder)
}
