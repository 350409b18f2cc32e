use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    // the column is named after the original data model; `type` is not a
    // valid field name, so rename on both ends
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, type
FROM categories
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Category> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, type
FROM categories
WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn seeded_categories_are_ordered_by_id() {
        let pool = test_pool().await;
        let categories = get_all_categories(&pool).await.unwrap();

        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0].id, 1);
        assert_eq!(categories[0].kind, "Science");
        assert!(categories.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn get_category_resolves_type() {
        let pool = test_pool().await;

        let category = get_category(&pool, 3).await.unwrap();
        assert_eq!(category.kind, "Geography");

        let missing = get_category(&pool, 42).await;
        assert!(matches!(missing, Err(sqlx::Error::RowNotFound)));
    }
}
