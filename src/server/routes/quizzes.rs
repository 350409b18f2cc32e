use axum::{extract::State, routing::post, Json, Router};
use rand::{seq::SliceRandom, thread_rng};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    server::{app::AppState, error::ApiError},
    telemetry::QUIZ_QUESTION_CNTR,
};

use super::ApiResponse;

/// Category id 0 means "all categories".
const ALL_CATEGORIES: i64 = 0;

#[derive(Deserialize)]
struct QuizBody {
    #[serde(default)]
    previous_questions: Vec<i64>,
    quiz_category: Option<QuizCategory>,
}

#[derive(Deserialize)]
struct QuizCategory {
    id: i64,
}

#[derive(Serialize)]
struct QuizQuestion {
    success: bool,
    question: Option<Question>,
    // omitted on exhaustion; the caller appends the served question to its
    // own list before the next round, the server keeps no session state
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_questions: Option<Vec<i64>>,
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    Json(body): Json<QuizBody>,
) -> ApiResponse<QuizQuestion> {
    let category = body.quiz_category.ok_or(ApiError::Unprocessable)?;

    let selection = if category.id == ALL_CATEGORIES {
        questions::get_all_questions(&pool).await
    } else {
        questions::get_questions_for_category(&pool, category.id).await
    }
    .map_err(|_| ApiError::Unprocessable)?;

    let candidates: Vec<Question> = selection
        .into_iter()
        .filter(|q| !body.previous_questions.contains(&q.id))
        .collect();

    let Some(question) = candidates.choose(&mut thread_rng()).cloned() else {
        // exhaustion is a success, not an error
        return Ok(Json(QuizQuestion {
            success: true,
            question: None,
            previous_questions: None,
        }));
    };

    QUIZ_QUESTION_CNTR
        .with_label_values(&[question.category.to_string().as_str()])
        .inc();

    Ok(Json(QuizQuestion {
        success: true,
        question: Some(question),
        previous_questions: Some(body.previous_questions),
    }))
}

pub fn quiz_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
