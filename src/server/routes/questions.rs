use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{queries::categories, queries::questions, Question},
    server::{
        app::AppState,
        error::ApiError,
        pagination::{paginate, PageQuery},
    },
};

use super::ApiResponse;

// Nothing is required at intake; incomplete payloads fail at insert time
// against the NOT NULL schema and surface as a 422.
#[derive(Deserialize)]
struct NewQuestion {
    question: Option<String>,
    answer: Option<String>,
    category: Option<i64>,
    difficulty: Option<i64>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
    // always null on this endpoint; the frontend expects the field anyway
    current_category: Option<String>,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct QuestionCreated {
    success: bool,
    created: i64,
    current_category: String,
    total_questions: usize,
}

#[derive(Serialize)]
struct QuestionDeleted {
    success: bool,
    delete_question_id: i64,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(page): Query<PageQuery>,
) -> ApiResponse<QuestionsPage> {
    let selection = questions::get_all_questions(&pool).await?;
    let total_questions = selection.len();

    // no data at all and a page beyond the last one both end up here
    let current = paginate(selection, page.page());
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }

    let categories = categories::get_all_categories(&pool)
        .await?
        .into_iter()
        .map(|c| (c.id, c.kind))
        .collect();

    Ok(Json(QuestionsPage {
        success: true,
        questions: current,
        total_questions,
        categories,
        current_category: None,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    Json(body): Json<NewQuestion>,
) -> ApiResponse<QuestionCreated> {
    let created = questions::create_question(
        &pool,
        body.question.as_deref(),
        body.answer.as_deref(),
        body.category,
        body.difficulty,
    )
    .await
    .map_err(|_| ApiError::Unprocessable)?;

    // read the category back for the response payload; a dangling category
    // id fails here, after the insert, exactly like the original service
    let category = match body.category {
        Some(id) => categories::get_category(&pool, id)
            .await
            .map_err(|_| ApiError::Unprocessable)?,
        None => return Err(ApiError::Unprocessable),
    };

    let total_questions = questions::count_questions(&pool).await? as usize;
    Ok(Json(QuestionCreated {
        success: true,
        created,
        current_category: category.kind,
        total_questions,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(question_id): Path<i64>,
) -> ApiResponse<QuestionDeleted> {
    questions::get_question_by_id(&pool, question_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    questions::delete_question(&pool, question_id)
        .await
        .map_err(|_| ApiError::Unprocessable)?;

    Ok(Json(QuestionDeleted {
        success: true,
        delete_question_id: question_id,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    Query(page): Query<PageQuery>,
    Json(body): Json<SearchBody>,
) -> ApiResponse<SearchResults> {
    let term = body.search_term.unwrap_or_default();
    if term.is_empty() {
        return Err(ApiError::BadRequest);
    }

    let matches = questions::search_questions(&pool, &term).await?;
    let total_questions = matches.len();

    let current = paginate(matches, page.page());
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(SearchResults {
        success: true,
        questions: current,
        total_questions,
        current_category: None,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/{question_id}", delete(delete_question))
        .route("/search/questions", post(search_questions))
        .with_state(state)
}
