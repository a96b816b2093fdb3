/// Promotion persistence
///
/// Promotions reference a clinic optionally (NULL applies to all clinics)
/// and carry the applicable service ids as an array column.

use crate::domain::{DiscountType, Promotion, PromotionFields, PromotionUpdate};
use anyhow::Result;
use sqlx::{postgres::PgRow, PgPool, Row};

/// Promotion storage over the shared pool
#[derive(Debug, Clone)]
pub struct PromotionStore {
    pool: PgPool,
}

impl PromotionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Initialize the promotions table
    ///
    /// Safe to call multiple times (uses IF NOT EXISTS).
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS promotions (
                id BIGSERIAL PRIMARY KEY,
                title VARCHAR(200) NOT NULL,
                short_description VARCHAR(300),
                description TEXT,
                discount_type VARCHAR(20) NOT NULL DEFAULT 'percentage',
                discount_value DOUBLE PRECISION,
                original_price DOUBLE PRECISION,
                final_price DOUBLE PRECISION,
                start_date TIMESTAMPTZ NOT NULL,
                end_date TIMESTAMPTZ NOT NULL,
                image_url VARCHAR(500),
                gallery TEXT[],
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                is_featured BOOLEAN NOT NULL DEFAULT FALSE,
                conditions TEXT,
                promo_code VARCHAR(50),
                clinic_id BIGINT REFERENCES clinics(id),
                service_ids BIGINT[],
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn create(&self, fields: &PromotionFields) -> Result<Promotion> {
        let row = sqlx::query(
            r#"
            INSERT INTO promotions
                (title, short_description, description, discount_type, discount_value,
                 original_price, final_price, start_date, end_date, image_url, gallery,
                 is_active, is_featured, conditions, promo_code, clinic_id, service_ids)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, $17)
            RETURNING *
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.short_description)
        .bind(&fields.description)
        .bind(fields.discount_type.as_str())
        .bind(fields.discount_value)
        .bind(fields.original_price)
        .bind(fields.final_price)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .bind(&fields.image_url)
        .bind(&fields.gallery)
        .bind(fields.is_active)
        .bind(fields.is_featured)
        .bind(&fields.conditions)
        .bind(&fields.promo_code)
        .bind(fields.clinic_id)
        .bind(&fields.service_ids)
        .fetch_one(&self.pool)
        .await?;

        Ok(promotion_from_row(&row))
    }

    pub async fn get(&self, id: i64) -> Result<Option<Promotion>> {
        let row = sqlx::query("SELECT * FROM promotions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(promotion_from_row))
    }

    /// List promotions, newest window first
    pub async fn list(&self, active_only: bool) -> Result<Vec<Promotion>> {
        let rows = if active_only {
            sqlx::query(
                "SELECT * FROM promotions WHERE is_active ORDER BY start_date DESC",
            )
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query("SELECT * FROM promotions ORDER BY start_date DESC")
                .fetch_all(&self.pool)
                .await?
        };

        Ok(rows.iter().map(promotion_from_row).collect())
    }

    /// Apply only the provided fields and bump updated_at
    pub async fn update(&self, id: i64, patch: &PromotionUpdate) -> Result<Option<Promotion>> {
        let row = sqlx::query(
            r#"
            UPDATE promotions SET
                title = COALESCE($2, title),
                short_description = COALESCE($3, short_description),
                description = COALESCE($4, description),
                discount_type = COALESCE($5, discount_type),
                discount_value = COALESCE($6, discount_value),
                original_price = COALESCE($7, original_price),
                final_price = COALESCE($8, final_price),
                start_date = COALESCE($9, start_date),
                end_date = COALESCE($10, end_date),
                image_url = COALESCE($11, image_url),
                gallery = COALESCE($12, gallery),
                is_active = COALESCE($13, is_active),
                is_featured = COALESCE($14, is_featured),
                conditions = COALESCE($15, conditions),
                promo_code = COALESCE($16, promo_code),
                clinic_id = COALESCE($17, clinic_id),
                service_ids = COALESCE($18, service_ids),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.short_description)
        .bind(&patch.description)
        .bind(patch.discount_type.map(|t| t.as_str()))
        .bind(patch.discount_value)
        .bind(patch.original_price)
        .bind(patch.final_price)
        .bind(patch.start_date)
        .bind(patch.end_date)
        .bind(&patch.image_url)
        .bind(&patch.gallery)
        .bind(patch.is_active)
        .bind(patch.is_featured)
        .bind(&patch.conditions)
        .bind(&patch.promo_code)
        .bind(patch.clinic_id)
        .bind(&patch.service_ids)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(promotion_from_row))
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM promotions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn promotion_from_row(row: &PgRow) -> Promotion {
    Promotion {
        id: row.get("id"),
        promotion: PromotionFields {
            title: row.get("title"),
            short_description: row.get("short_description"),
            description: row.get("description"),
            discount_type: DiscountType::from_str_or_default(row.get("discount_type")),
            discount_value: row.get("discount_value"),
            original_price: row.get("original_price"),
            final_price: row.get("final_price"),
            start_date: row.get("start_date"),
            end_date: row.get("end_date"),
            image_url: row.get("image_url"),
            gallery: row.get("gallery"),
            is_active: row.get("is_active"),
            is_featured: row.get("is_featured"),
            conditions: row.get("conditions"),
            promo_code: row.get("promo_code"),
            clinic_id: row.get("clinic_id"),
            service_ids: row.get("service_ids"),
        },
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
