use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{queries::categories::get_all_categories, queries::questions, Question},
    server::{
        app::AppState,
        error::ApiError,
        pagination::{paginate, PageQuery},
    },
};

use super::ApiResponse;

#[derive(Serialize)]
struct CategoriesList {
    success: bool,
    categories: BTreeMap<i64, String>,
    total_categories: usize,
}

#[derive(Serialize)]
struct CategoryQuestions {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

async fn list_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesList> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }

    let total_categories = categories.len();
    Ok(Json(CategoriesList {
        success: true,
        categories: categories.into_iter().map(|c| (c.id, c.kind)).collect(),
        total_categories,
    }))
}

// An empty filtered set is a 400 here, not a 404 like everywhere else. The
// frontend depends on the asymmetry, so it stays.
async fn questions_by_category(
    State(pool): State<SqlitePool>,
    Path(category_id): Path<i64>,
    Query(page): Query<PageQuery>,
) -> ApiResponse<CategoryQuestions> {
    let selection = questions::get_questions_for_category(&pool, category_id)
        .await
        .map_err(|_| ApiError::BadRequest)?;
    if selection.is_empty() {
        return Err(ApiError::BadRequest);
    }

    let total_questions = selection.len();
    Ok(Json(CategoryQuestions {
        success: true,
        questions: paginate(selection, page.page()),
        total_questions,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(list_categories))
        .route(
            "/categories/{category_id}/questions",
            get(questions_by_category),
        )
        .with_state(state)
}
