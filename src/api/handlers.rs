use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{Evaluation, FilterResult, Recipe},
};

use super::AppState;

/// Upper bound on ingredients per request
pub const MAX_INGREDIENTS: usize = 100;
/// Upper bound on generated recipe names per filter request
pub const MAX_CANDIDATES: usize = 200;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Display language of the caller; never affects matching
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub candidates: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecipeQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

fn check_ingredient_count(ingredients: &[String]) -> AppResult<()> {
    if ingredients.len() > MAX_INGREDIENTS {
        return Err(AppError::InvalidInput(format!(
            "At most {} ingredients may be submitted",
            MAX_INGREDIENTS
        )));
    }
    Ok(())
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Evaluates what can be made from the submitted ingredients
pub async fn evaluate(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<EvaluateRequest>,
) -> AppResult<Json<Evaluation>> {
    check_ingredient_count(&request.ingredients)?;

    tracing::info!(
        request_id = %request_id,
        ingredient_count = request.ingredients.len(),
        language = request.language.as_deref().unwrap_or("unspecified"),
        "Processing evaluation request"
    );

    let evaluation = state.engine.evaluate(&request.ingredients);

    tracing::info!(
        request_id = %request_id,
        makeable = evaluation.makeable.len(),
        almost_makeable = evaluation.almost_makeable.len(),
        "Evaluation completed"
    );

    Ok(Json(evaluation))
}

/// Filters generated recipe names down to those the user can actually make
pub async fn filter_recipes(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<FilterRequest>,
) -> AppResult<Json<FilterResult>> {
    check_ingredient_count(&request.ingredients)?;
    if request.candidates.len() > MAX_CANDIDATES {
        return Err(AppError::InvalidInput(format!(
            "At most {} candidate recipes may be submitted",
            MAX_CANDIDATES
        )));
    }

    let evaluation = state.engine.evaluate(&request.ingredients);
    let result = state
        .engine
        .filter_generated(&evaluation, &request.candidates);

    tracing::info!(
        request_id = %request_id,
        accepted = result.accepted.len(),
        rejected = result.rejected.len(),
        "Generated recipes filtered"
    );

    Ok(Json(result))
}

/// Lists catalog recipes, optionally restricted to one category
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<RecipeQuery>,
) -> Json<Vec<Recipe>> {
    let recipes = state
        .engine
        .catalog()
        .by_category(params.category.as_deref())
        .cloned()
        .collect();
    Json(recipes)
}

/// Lists recipe categories in catalog order
pub async fn list_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let categories = state
        .engine
        .catalog()
        .categories()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(CategoriesResponse { categories })
}
