/// Specialist persistence
///
/// Specialists belong to one clinic and link to services through the
/// service_specialist join table. Deleting a specialist removes only its
/// own join rows; the services themselves are untouched.

use crate::domain::{ServiceShort, Specialist, SpecialistCreate, SpecialistFields, SpecialistUpdate};
use anyhow::Result;
use sqlx::{postgres::PgRow, PgPool, Row};

/// Specialist storage over the shared pool
#[derive(Debug, Clone)]
pub struct SpecialistStore {
    pool: PgPool,
}

impl SpecialistStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Initialize the specialists table
    ///
    /// Safe to call multiple times (uses IF NOT EXISTS).
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS specialists (
                id BIGSERIAL PRIMARY KEY,
                first_name VARCHAR(50) NOT NULL,
                last_name VARCHAR(50) NOT NULL,
                patronymic VARCHAR(50),
                specialization VARCHAR(100) NOT NULL,
                experience INTEGER,
                description TEXT,
                photo_url VARCHAR(255),
                clinic_id BIGINT NOT NULL REFERENCES clinics(id),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_specialists_clinic ON specialists(clinic_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn create(&self, payload: &SpecialistCreate) -> Result<Specialist> {
        let fields = &payload.specialist;
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO specialists
                (first_name, last_name, patronymic, specialization, experience,
                 description, photo_url, clinic_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.patronymic)
        .bind(&fields.specialization)
        .bind(fields.experience)
        .bind(&fields.description)
        .bind(&fields.photo_url)
        .bind(payload.clinic_id)
        .fetch_one(&mut *tx)
        .await?;

        let id: i64 = row.get("id");
        if let Some(service_ids) = &fields.service_ids {
            for service_id in service_ids {
                sqlx::query(
                    "INSERT INTO service_specialist (service_id, specialist_id)
                     VALUES ($1, $2) ON CONFLICT DO NOTHING",
                )
                .bind(service_id)
                .bind(id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        let services = self.services_short(id).await?;
        Ok(specialist_from_row(&row, services))
    }

    pub async fn get(&self, id: i64) -> Result<Option<Specialist>> {
        let row = sqlx::query("SELECT * FROM specialists WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let services = self.services_short(id).await?;
                Ok(Some(specialist_from_row(&row, services)))
            }
            None => Ok(None),
        }
    }

    pub async fn list(&self, clinic_id: Option<i64>) -> Result<Vec<Specialist>> {
        let rows = match clinic_id {
            Some(clinic_id) => {
                sqlx::query(
                    "SELECT * FROM specialists WHERE clinic_id = $1 ORDER BY last_name, first_name",
                )
                .bind(clinic_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query("SELECT * FROM specialists ORDER BY last_name, first_name")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        let mut specialists = Vec::with_capacity(rows.len());
        for row in &rows {
            let services = self.services_short(row.get("id")).await?;
            specialists.push(specialist_from_row(row, services));
        }

        Ok(specialists)
    }

    /// Apply only the provided fields; a provided service_ids list replaces
    /// the specialist's join rows
    pub async fn update(&self, id: i64, patch: &SpecialistUpdate) -> Result<Option<Specialist>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            UPDATE specialists SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                patronymic = COALESCE($4, patronymic),
                specialization = COALESCE($5, specialization),
                experience = COALESCE($6, experience),
                description = COALESCE($7, description),
                photo_url = COALESCE($8, photo_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.first_name)
        .bind(&patch.last_name)
        .bind(&patch.patronymic)
        .bind(&patch.specialization)
        .bind(patch.experience)
        .bind(&patch.description)
        .bind(&patch.photo_url)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(service_ids) = &patch.service_ids {
            sqlx::query("DELETE FROM service_specialist WHERE specialist_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for service_id in service_ids {
                sqlx::query(
                    "INSERT INTO service_specialist (service_id, specialist_id)
                     VALUES ($1, $2) ON CONFLICT DO NOTHING",
                )
                .bind(service_id)
                .bind(id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        let services = self.services_short(id).await?;
        Ok(Some(specialist_from_row(&row, services)))
    }

    /// Delete a specialist and its own join rows only
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM service_specialist WHERE specialist_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM specialists WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    /// Short service forms for embedding in specialist responses
    async fn services_short(&self, specialist_id: i64) -> Result<Vec<ServiceShort>> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.name, s.price, s.duration_minutes, s.category
            FROM services s
            JOIN service_specialist ss ON ss.service_id = s.id
            WHERE ss.specialist_id = $1
            ORDER BY s.order_index, s.name
            "#,
        )
        .bind(specialist_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| ServiceShort {
                id: row.get("id"),
                name: row.get("name"),
                price: row.get("price"),
                duration_minutes: row.get("duration_minutes"),
                category: row.get("category"),
            })
            .collect())
    }
}

fn specialist_from_row(row: &PgRow, services: Vec<ServiceShort>) -> Specialist {
    Specialist {
        id: row.get("id"),
        clinic_id: row.get("clinic_id"),
        specialist: SpecialistFields {
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            patronymic: row.get("patronymic"),
            specialization: row.get("specialization"),
            experience: row.get("experience"),
            description: row.get("description"),
            photo_url: row.get("photo_url"),
            service_ids: None,
        },
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        services,
    }
}
