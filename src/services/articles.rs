use chrono::{DateTime, Duration, SubsecRound, Utc};
use sqlx::{QueryBuilder, Sqlite};

use crate::database::Pool;
use crate::model::{
    Article, ArticlePayload, ArticleStats, ListParameters, NewArticle, ValidationMode,
};
use crate::services::ServiceError;

const ARTICLE_COLUMNS: &str =
    "id, title, content, author, created_at, updated_at, is_published";

type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Clone)]
pub struct ArticleService {
    db: Pool,
}

impl ArticleService {
    pub fn new(db: Pool) -> Self {
        Self { db }
    }

    /// List the articles matching the parameters, newest first
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<Vec<Article>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT ");
        query.push(ARTICLE_COLUMNS);
        query.push(" FROM articles WHERE 1 = 1");

        add_filters(&mut query, parameters);

        query.push(" ORDER BY created_at DESC, id DESC");

        Ok(query.build_query_as::<Article>().fetch_all(&self.db).await?)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get(&self, id: i64) -> Result<Option<Article>> {
        Ok(sqlx::query_as::<_, Article>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?)
    }

    /// Validate the payload and insert a new article
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, payload: ArticlePayload) -> Result<Article> {
        let new_article = payload
            .into_new_article()
            .map_err(ServiceError::Validation)?;

        self.insert(&new_article).await
    }

    async fn insert(&self, new_article: &NewArticle) -> Result<Article> {
        let now = now();

        let article: Article = sqlx::query_as(&format!(
            r#"
            INSERT INTO articles (title, content, author, created_at, updated_at, is_published)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {ARTICLE_COLUMNS}
            "#
        ))
        .bind(&new_article.title)
        .bind(&new_article.content)
        .bind(&new_article.author)
        .bind(now)
        .bind(now)
        .bind(new_article.is_published)
        .fetch_one(&self.db)
        .await?;

        tracing::info!("Created article {}", article.id);
        Ok(article)
    }

    /// Return the article with the same title, creating it if there is none.
    ///
    /// The boolean tells whether the article was created.
    #[tracing::instrument(skip(self))]
    pub async fn get_or_create(&self, new_article: &NewArticle) -> Result<(Article, bool)> {
        let existing: Option<Article> = sqlx::query_as(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE title = ? ORDER BY id LIMIT 1"
        ))
        .bind(&new_article.title)
        .fetch_optional(&self.db)
        .await?;

        match existing {
            Some(article) => Ok((article, false)),
            None => Ok((self.insert(new_article).await?, true)),
        }
    }

    /// Update an article with the fields of the payload.
    ///
    /// With [`ValidationMode::Full`] the text fields are all required, with
    /// [`ValidationMode::Partial`] only the given ones are checked and written.
    /// The lookup and the write happen in one transaction.
    #[tracing::instrument(skip(self))]
    pub async fn update(
        &self,
        id: i64,
        payload: ArticlePayload,
        mode: ValidationMode,
    ) -> Result<Article> {
        let mut transaction = self.db.begin().await?;

        // Writing first takes the database write lock, so concurrent updates queue up here
        let current: Option<Article> = sqlx::query_as(&format!(
            "UPDATE articles SET updated_at = updated_at WHERE id = ? RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&mut *transaction)
        .await?;
        let current = current.ok_or(ServiceError::NotFound(id))?;

        let changes = payload
            .validate_for(mode)
            .map_err(ServiceError::Validation)?;

        let updated_at = next_update_timestamp(current.updated_at);

        let article: Article = sqlx::query_as(&format!(
            r#"
            UPDATE articles
            SET title        = COALESCE(?, title),
                content      = COALESCE(?, content),
                author       = COALESCE(?, author),
                is_published = COALESCE(?, is_published),
                updated_at   = ?
            WHERE id = ?
            RETURNING {ARTICLE_COLUMNS}
            "#
        ))
        .bind(changes.title)
        .bind(changes.content)
        .bind(changes.author)
        .bind(changes.is_published)
        .bind(updated_at)
        .bind(id)
        .fetch_one(&mut *transaction)
        .await?;

        transaction.commit().await?;

        tracing::info!("Updated article {}", id);
        Ok(article)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound(id));
        }

        tracing::info!("Deleted article {}", id);
        Ok(())
    }

    /// Count the articles by publication status, in a single query
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn stats(&self) -> Result<ArticleStats> {
        Ok(sqlx::query_as::<_, ArticleStats>(
            r#"
            SELECT COUNT(*)                                                   AS total,
                   COALESCE(SUM(CASE WHEN is_published THEN 1 ELSE 0 END), 0) AS published,
                   COALESCE(SUM(CASE WHEN is_published THEN 0 ELSE 1 END), 0) AS drafts
            FROM articles
            "#,
        )
        .fetch_one(&self.db)
        .await?)
    }
}

fn add_filters(query: &mut QueryBuilder<Sqlite>, parameters: &ListParameters) {
    if let Some(author) = &parameters.author {
        query.push(" AND author LIKE ");
        query.push_bind(format!("%{}%", escape_like(author)));
        query.push(r" ESCAPE '\'");
    }

    if let Some(is_published) = parameters.is_published {
        query.push(" AND is_published = ");
        query.push_bind(is_published);
    }
}

/// Escape the LIKE wildcards so the value matches literally
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Stored timestamps keep microseconds only, so they survive a round-trip through JSON
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Always strictly after the previous update, even if the clock did not move
fn next_update_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    now().max(previous + Duration::microseconds(1))
}
