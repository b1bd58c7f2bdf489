use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Each variant maps to one of the stable wire codes clients key on. The
/// response body is the flat `{ "error": ..., "code": ... }` object; that
/// shape is the error contract of the public API, do not nest it.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No ingredients provided")]
    NoIngredients,

    #[error("Title and ingredients are required")]
    MissingData,

    #[error("Description is required")]
    NoDescription,

    #[error("OpenAI API key not configured")]
    ApiKeyMissing,

    #[error("OpenAI API key rejected upstream")]
    InvalidApiKey,

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Recipe response was not valid JSON: {0}")]
    RecipeParse(String),

    #[error("Recipe response had the wrong shape: {0}")]
    RecipeFormat(String),

    #[error("Calorie estimation failed: {0}")]
    Estimation(String),

    #[error("Generation failed: {0}")]
    Generation(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NoIngredients => (
                StatusCode::BAD_REQUEST,
                "NO_INGREDIENTS",
                "No ingredients provided.".to_string(),
            ),
            AppError::MissingData => (
                StatusCode::BAD_REQUEST,
                "MISSING_DATA",
                "Title and ingredients are required.".to_string(),
            ),
            AppError::NoDescription => (
                StatusCode::BAD_REQUEST,
                "NO_DESCRIPTION",
                "Description is required.".to_string(),
            ),
            AppError::ApiKeyMissing => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "API_KEY_MISSING",
                "OpenAI API key not configured.".to_string(),
            ),
            AppError::InvalidApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INVALID_API_KEY",
                "OpenAI API key is invalid or missing.".to_string(),
            ),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMIT",
                "Rate limit exceeded. Please try again later.".to_string(),
            ),
            AppError::RecipeParse(detail) => {
                tracing::error!("Recipe parse error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PARSE_ERROR",
                    "Failed to parse recipe response from AI.".to_string(),
                )
            }
            AppError::RecipeFormat(detail) => {
                tracing::error!("Recipe format error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INVALID_FORMAT",
                    "Invalid recipe format received from AI.".to_string(),
                )
            }
            AppError::Estimation(detail) => {
                tracing::error!("Calorie estimation error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ESTIMATION_ERROR",
                    "Failed to estimate calories. Please try again.".to_string(),
                )
            }
            AppError::Generation(detail) => {
                tracing::error!("Generation error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_ERROR",
                    "Failed to generate a response. Please try again.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn status_and_code(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, body["code"].as_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_input_errors_are_400() {
        for (err, code) in [
            (AppError::NoIngredients, "NO_INGREDIENTS"),
            (AppError::MissingData, "MISSING_DATA"),
            (AppError::NoDescription, "NO_DESCRIPTION"),
        ] {
            let (status, got) = status_and_code(err).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(got, code);
        }
    }

    #[tokio::test]
    async fn test_rate_limit_is_429() {
        let (status, code) = status_and_code(AppError::RateLimited).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(code, "RATE_LIMIT");
    }

    #[tokio::test]
    async fn test_credential_and_parse_errors_are_500() {
        for (err, code) in [
            (AppError::ApiKeyMissing, "API_KEY_MISSING"),
            (AppError::InvalidApiKey, "INVALID_API_KEY"),
            (AppError::RecipeParse("x".into()), "PARSE_ERROR"),
            (AppError::RecipeFormat("x".into()), "INVALID_FORMAT"),
            (AppError::Estimation("x".into()), "ESTIMATION_ERROR"),
            (AppError::Generation("x".into()), "GENERATION_ERROR"),
        ] {
            let (status, got) = status_and_code(err).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(got, code);
        }
    }

    #[tokio::test]
    async fn test_error_body_is_flat() {
        let response = AppError::NoIngredients.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string());
        assert!(body["code"].is_string());
    }
}
