/// Clinic persistence
///
/// Clinics own their specialists and services outright: deleting a clinic
/// deletes the owned rows (and their join rows) in a single transaction.

use crate::domain::{Clinic, ClinicFields, ClinicUpdate};
use anyhow::Result;
use sqlx::{postgres::PgRow, PgPool, Row};

/// Clinic storage over the shared pool
#[derive(Debug, Clone)]
pub struct ClinicStore {
    pool: PgPool,
}

impl ClinicStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Initialize the clinics table
    ///
    /// Safe to call multiple times (uses IF NOT EXISTS).
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS clinics (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                address TEXT NOT NULL,
                phone_number VARCHAR(20) NOT NULL,
                email VARCHAR(100) NOT NULL,
                is_24_7 BOOLEAN NOT NULL DEFAULT FALSE,
                start_time TIME,
                end_time TIME,
                map_url VARCHAR(500),
                description TEXT,
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_clinics_name ON clinics(name)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn create(&self, fields: &ClinicFields) -> Result<Clinic> {
        let row = sqlx::query(
            r#"
            INSERT INTO clinics
                (name, address, phone_number, email, is_24_7, start_time, end_time,
                 map_url, description, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.address)
        .bind(&fields.phone_number)
        .bind(&fields.email)
        .bind(fields.is_24_7)
        .bind(fields.start_time)
        .bind(fields.end_time)
        .bind(&fields.map_url)
        .bind(&fields.description)
        .bind(fields.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(clinic_from_row(&row))
    }

    pub async fn get(&self, id: i64) -> Result<Option<Clinic>> {
        let row = sqlx::query("SELECT * FROM clinics WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(clinic_from_row))
    }

    pub async fn list(&self) -> Result<Vec<Clinic>> {
        let rows = sqlx::query("SELECT * FROM clinics ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(clinic_from_row).collect())
    }

    /// Apply only the provided fields and bump updated_at
    pub async fn update(&self, id: i64, patch: &ClinicUpdate) -> Result<Option<Clinic>> {
        let row = sqlx::query(
            r#"
            UPDATE clinics SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                phone_number = COALESCE($4, phone_number),
                email = COALESCE($5, email),
                is_24_7 = COALESCE($6, is_24_7),
                start_time = COALESCE($7, start_time),
                end_time = COALESCE($8, end_time),
                map_url = COALESCE($9, map_url),
                description = COALESCE($10, description),
                is_active = COALESCE($11, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.address)
        .bind(&patch.phone_number)
        .bind(&patch.email)
        .bind(patch.is_24_7)
        .bind(patch.start_time)
        .bind(patch.end_time)
        .bind(&patch.map_url)
        .bind(&patch.description)
        .bind(patch.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(clinic_from_row))
    }

    /// Delete a clinic together with the specialists and services it owns
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        // Join rows first, then the owned rows, then the clinic itself
        sqlx::query(
            "DELETE FROM service_specialist
             WHERE service_id IN (SELECT id FROM services WHERE clinic_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM service_specialist
             WHERE specialist_id IN (SELECT id FROM specialists WHERE clinic_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM services WHERE clinic_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM specialists WHERE clinic_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM clinics WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}

fn clinic_from_row(row: &PgRow) -> Clinic {
    Clinic {
        id: row.get("id"),
        clinic: ClinicFields {
            name: row.get("name"),
            address: row.get("address"),
            phone_number: row.get("phone_number"),
            email: row.get("email"),
            is_24_7: row.get("is_24_7"),
            start_time: row.get("start_time"),
            end_time: row.get("end_time"),
            map_url: row.get("map_url"),
            description: row.get("description"),
            is_active: row.get("is_active"),
        },
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
