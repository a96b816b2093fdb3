/// News persistence
///
/// A news article owns its content blocks: they are inserted with the
/// article and deleted with it, always returned ordered by block_order.
/// Block metadata is stored as serialized JSON text.

use crate::domain::news::ImagePosition;
use crate::domain::{News, NewsBlock, NewsBlockFields, NewsCreate, NewsUpdate};
use anyhow::Result;
use chrono::Utc;
use sqlx::{postgres::PgRow, PgPool, Row};

/// News storage over the shared pool
#[derive(Debug, Clone)]
pub struct NewsStore {
    pool: PgPool,
}

impl NewsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Initialize the news and news_blocks tables
    ///
    /// Must run after the clinic_staff schema (author reference). Safe to
    /// call multiple times (uses IF NOT EXISTS).
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS news (
                id BIGSERIAL PRIMARY KEY,
                title VARCHAR(200) NOT NULL,
                excerpt TEXT,
                publication_date TIMESTAMPTZ NOT NULL,
                cover_image VARCHAR(255),
                is_published BOOLEAN NOT NULL DEFAULT FALSE,
                author_id BIGINT NOT NULL REFERENCES clinic_staff(id),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS news_blocks (
                id BIGSERIAL PRIMARY KEY,
                news_id BIGINT NOT NULL REFERENCES news(id),
                title VARCHAR(200),
                text_content TEXT,
                image_url VARCHAR(500),
                image_position VARCHAR(10),
                block_order INTEGER NOT NULL DEFAULT 0,
                meta TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_news_blocks_news ON news_blocks(news_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create an article together with its blocks in one transaction
    pub async fn create(&self, payload: &NewsCreate) -> Result<News> {
        let publication_date = payload.publication_date.unwrap_or_else(Utc::now);
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO news
                (title, excerpt, publication_date, cover_image, is_published, author_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.excerpt)
        .bind(publication_date)
        .bind(&payload.cover_image)
        .bind(payload.is_published)
        .bind(payload.author_id)
        .fetch_one(&mut *tx)
        .await?;

        let news_id: i64 = row.get("id");
        for block in &payload.blocks {
            let meta = match &block.meta {
                Some(value) => Some(serde_json::to_string(value)?),
                None => None,
            };
            sqlx::query(
                r#"
                INSERT INTO news_blocks
                    (news_id, title, text_content, image_url, image_position,
                     block_order, meta)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(news_id)
            .bind(&block.title)
            .bind(&block.text_content)
            .bind(&block.image_url)
            .bind(block.image_position.map(|p| p.as_str()))
            .bind(block.order)
            .bind(meta)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let blocks = self.blocks_for(news_id).await?;
        Ok(news_from_row(&row, blocks))
    }

    pub async fn get(&self, id: i64) -> Result<Option<News>> {
        let row = sqlx::query("SELECT * FROM news WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let blocks = self.blocks_for(id).await?;
                Ok(Some(news_from_row(&row, blocks)))
            }
            None => Ok(None),
        }
    }

    /// List articles, most recent publication first
    pub async fn list(&self, published_only: bool) -> Result<Vec<News>> {
        let rows = if published_only {
            sqlx::query("SELECT * FROM news WHERE is_published ORDER BY publication_date DESC")
                .fetch_all(&self.pool)
                .await?
        } else {
            sqlx::query("SELECT * FROM news ORDER BY publication_date DESC")
                .fetch_all(&self.pool)
                .await?
        };

        let mut articles = Vec::with_capacity(rows.len());
        for row in &rows {
            let blocks = self.blocks_for(row.get("id")).await?;
            articles.push(news_from_row(row, blocks));
        }

        Ok(articles)
    }

    /// Apply only the provided article fields; blocks are not touched here
    pub async fn update(&self, id: i64, patch: &NewsUpdate) -> Result<Option<News>> {
        let row = sqlx::query(
            r#"
            UPDATE news SET
                title = COALESCE($2, title),
                excerpt = COALESCE($3, excerpt),
                cover_image = COALESCE($4, cover_image),
                is_published = COALESCE($5, is_published),
                publication_date = COALESCE($6, publication_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.excerpt)
        .bind(&patch.cover_image)
        .bind(patch.is_published)
        .bind(patch.publication_date)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let blocks = self.blocks_for(id).await?;
                Ok(Some(news_from_row(&row, blocks)))
            }
            None => Ok(None),
        }
    }

    /// Delete an article and the blocks it owns
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM news_blocks WHERE news_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    /// Blocks of one article in display order
    async fn blocks_for(&self, news_id: i64) -> Result<Vec<NewsBlock>> {
        let rows = sqlx::query(
            "SELECT * FROM news_blocks WHERE news_id = $1 ORDER BY block_order, id",
        )
        .bind(news_id)
        .fetch_all(&self.pool)
        .await?;

        let mut blocks = Vec::with_capacity(rows.len());
        for row in &rows {
            blocks.push(block_from_row(row)?);
        }

        Ok(blocks)
    }
}

fn block_from_row(row: &PgRow) -> Result<NewsBlock> {
    let meta = match row.get::<Option<String>, _>("meta") {
        Some(text) => Some(serde_json::from_str(&text)?),
        None => None,
    };

    Ok(NewsBlock {
        id: row.get("id"),
        news_id: row.get("news_id"),
        block: NewsBlockFields {
            title: row.get("title"),
            text_content: row.get("text_content"),
            image_url: row.get("image_url"),
            image_position: row
                .get::<Option<&str>, _>("image_position")
                .and_then(ImagePosition::from_str_opt),
            order: row.get("block_order"),
            meta,
        },
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn news_from_row(row: &PgRow, blocks: Vec<NewsBlock>) -> News {
    News {
        id: row.get("id"),
        title: row.get("title"),
        excerpt: row.get("excerpt"),
        cover_image: row.get("cover_image"),
        is_published: row.get("is_published"),
        publication_date: row.get("publication_date"),
        author_id: row.get("author_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        blocks,
    }
}
