use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE category = ?1
ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

/// Substring match on the question text. LIKE is case-insensitive for
/// ASCII in sqlite, which is the behavior the frontend expects.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE question LIKE ?1
ORDER BY id
        "#,
    )
    .bind(format!("%{}%", term))
    .fetch_all(pool)
    .await
}

pub async fn count_questions(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await
}

/// Every field is nullable at intake; the NOT NULL schema rejects
/// incomplete payloads at insert time.
pub async fn create_question(
    pool: &SqlitePool,
    question: Option<&str>,
    answer: Option<&str>,
    category: Option<i64>,
    difficulty: Option<i64>,
) -> sqlx::Result<i64> {
    let mut conn = pool.acquire().await?;

    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(question)
    .bind(answer)
    .bind(category)
    .bind(difficulty)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let mut conn = pool.acquire().await?;

    let result = sqlx::query(
        r#"
DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    async fn seed_question(pool: &SqlitePool, question: &str, category: i64) -> i64 {
        create_question(pool, Some(question), Some("42"), Some(category), Some(1))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_and_fetch_roundtrip() {
        let pool = test_pool().await;
        let id = seed_question(&pool, "What is the answer?", 1).await;

        let question = get_question_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(question.question, "What is the answer?");
        assert_eq!(question.category, 1);
        assert_eq!(count_questions(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn create_rejects_missing_fields() {
        let pool = test_pool().await;
        let result = create_question(&pool, Some("No answer"), None, Some(1), Some(1)).await;
        assert!(result.is_err());
        assert_eq!(count_questions(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let pool = test_pool().await;
        seed_question(&pool, "What is the title of the book?", 2).await;
        seed_question(&pool, "Who wrote it?", 2).await;

        let matches = search_questions(&pool, "TITLE").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].question, "What is the title of the book?");

        assert!(search_questions(&pool, "nothing here").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn category_filter_compares_ids() {
        let pool = test_pool().await;
        seed_question(&pool, "q1", 1).await;
        seed_question(&pool, "q2", 2).await;
        seed_question(&pool, "q3", 1).await;

        let filtered = get_questions_for_category(&pool, 1).await.unwrap();
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|q| q.category == 1));
    }

    #[tokio::test]
    async fn delete_reports_affected_rows() {
        let pool = test_pool().await;
        let id = seed_question(&pool, "ephemeral", 1).await;

        assert_eq!(delete_question(&pool, id).await.unwrap(), 1);
        assert_eq!(delete_question(&pool, id).await.unwrap(), 0);
        assert!(get_question_by_id(&pool, id).await.unwrap().is_none());
    }
}
