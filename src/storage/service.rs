/// Service persistence and the service_specialist join table
///
/// Services belong to one clinic. The join table is created here (it needs
/// both the services and specialists tables) and has an independent
/// lifecycle: deleting a service removes only its own join rows.

use crate::domain::{
    Service, ServiceCategory, ServiceCreate, ServiceFields, ServiceStatus, ServiceUpdate,
    SpecialistShort,
};
use anyhow::Result;
use sqlx::{postgres::PgRow, PgPool, Row};

/// Service storage over the shared pool
#[derive(Debug, Clone)]
pub struct ServiceStore {
    pool: PgPool,
}

impl ServiceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Initialize the services and service_specialist tables
    ///
    /// Must run after the clinics and specialists schemas. Safe to call
    /// multiple times (uses IF NOT EXISTS).
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS services (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                short_description VARCHAR(200),
                description TEXT,
                price DOUBLE PRECISION NOT NULL,
                min_price DOUBLE PRECISION,
                max_price DOUBLE PRECISION,
                duration_minutes INTEGER,
                min_duration INTEGER,
                max_duration INTEGER,
                category VARCHAR(30) NOT NULL DEFAULT 'other',
                status VARCHAR(20) NOT NULL DEFAULT 'active',
                is_popular BOOLEAN NOT NULL DEFAULT FALSE,
                is_available_online BOOLEAN NOT NULL DEFAULT FALSE,
                is_emergency BOOLEAN NOT NULL DEFAULT FALSE,
                preparation_info TEXT,
                contraindications TEXT,
                required_specializations TEXT[],
                tags TEXT[],
                image_url VARCHAR(500),
                gallery TEXT[],
                order_index INTEGER NOT NULL DEFAULT 0,
                clinic_id BIGINT NOT NULL REFERENCES clinics(id),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_services_clinic ON services(clinic_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS service_specialist (
                service_id BIGINT NOT NULL REFERENCES services(id),
                specialist_id BIGINT NOT NULL REFERENCES specialists(id),
                PRIMARY KEY (service_id, specialist_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn create(&self, payload: &ServiceCreate) -> Result<Service> {
        let fields = &payload.service;
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO services
                (name, short_description, description, price, min_price, max_price,
                 duration_minutes, min_duration, max_duration, category, status,
                 is_popular, is_available_online, is_emergency, preparation_info,
                 contraindications, required_specializations, tags, image_url,
                 gallery, order_index, clinic_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21, $22)
            RETURNING *
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.short_description)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(fields.min_price)
        .bind(fields.max_price)
        .bind(fields.duration_minutes)
        .bind(fields.min_duration)
        .bind(fields.max_duration)
        .bind(fields.category.as_str())
        .bind(fields.status.as_str())
        .bind(fields.is_popular)
        .bind(fields.is_available_online)
        .bind(fields.is_emergency)
        .bind(&fields.preparation_info)
        .bind(&fields.contraindications)
        .bind(&fields.required_specializations)
        .bind(&fields.tags)
        .bind(&fields.image_url)
        .bind(&fields.gallery)
        .bind(fields.order_index)
        .bind(payload.clinic_id)
        .fetch_one(&mut *tx)
        .await?;

        let id: i64 = row.get("id");
        if let Some(specialist_ids) = &fields.specialist_ids {
            for specialist_id in specialist_ids {
                sqlx::query(
                    "INSERT INTO service_specialist (service_id, specialist_id)
                     VALUES ($1, $2) ON CONFLICT DO NOTHING",
                )
                .bind(id)
                .bind(specialist_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        let specialists = self.specialists_short(id).await?;
        Ok(service_from_row(&row, specialists))
    }

    pub async fn get(&self, id: i64) -> Result<Option<Service>> {
        let row = sqlx::query("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let specialists = self.specialists_short(id).await?;
                Ok(Some(service_from_row(&row, specialists)))
            }
            None => Ok(None),
        }
    }

    pub async fn list(&self, clinic_id: Option<i64>) -> Result<Vec<Service>> {
        let rows = match clinic_id {
            Some(clinic_id) => {
                sqlx::query(
                    "SELECT * FROM services WHERE clinic_id = $1 ORDER BY order_index, name",
                )
                .bind(clinic_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query("SELECT * FROM services ORDER BY order_index, name")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        let mut services = Vec::with_capacity(rows.len());
        for row in &rows {
            let specialists = self.specialists_short(row.get("id")).await?;
            services.push(service_from_row(row, specialists));
        }

        Ok(services)
    }

    /// Apply only the provided fields; a provided specialist_ids list
    /// replaces the service's join rows
    pub async fn update(&self, id: i64, patch: &ServiceUpdate) -> Result<Option<Service>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            UPDATE services SET
                name = COALESCE($2, name),
                short_description = COALESCE($3, short_description),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                min_price = COALESCE($6, min_price),
                max_price = COALESCE($7, max_price),
                duration_minutes = COALESCE($8, duration_minutes),
                min_duration = COALESCE($9, min_duration),
                max_duration = COALESCE($10, max_duration),
                category = COALESCE($11, category),
                status = COALESCE($12, status),
                is_popular = COALESCE($13, is_popular),
                is_available_online = COALESCE($14, is_available_online),
                is_emergency = COALESCE($15, is_emergency),
                preparation_info = COALESCE($16, preparation_info),
                contraindications = COALESCE($17, contraindications),
                required_specializations = COALESCE($18, required_specializations),
                tags = COALESCE($19, tags),
                image_url = COALESCE($20, image_url),
                gallery = COALESCE($21, gallery),
                order_index = COALESCE($22, order_index),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.short_description)
        .bind(&patch.description)
        .bind(patch.price)
        .bind(patch.min_price)
        .bind(patch.max_price)
        .bind(patch.duration_minutes)
        .bind(patch.min_duration)
        .bind(patch.max_duration)
        .bind(patch.category.map(|c| c.as_str()))
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.is_popular)
        .bind(patch.is_available_online)
        .bind(patch.is_emergency)
        .bind(&patch.preparation_info)
        .bind(&patch.contraindications)
        .bind(&patch.required_specializations)
        .bind(&patch.tags)
        .bind(&patch.image_url)
        .bind(&patch.gallery)
        .bind(patch.order_index)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(specialist_ids) = &patch.specialist_ids {
            sqlx::query("DELETE FROM service_specialist WHERE service_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for specialist_id in specialist_ids {
                sqlx::query(
                    "INSERT INTO service_specialist (service_id, specialist_id)
                     VALUES ($1, $2) ON CONFLICT DO NOTHING",
                )
                .bind(id)
                .bind(specialist_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        let specialists = self.specialists_short(id).await?;
        Ok(Some(service_from_row(&row, specialists)))
    }

    /// Delete a service and its own join rows only
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM service_specialist WHERE service_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    /// Short specialist forms for embedding in service responses
    async fn specialists_short(&self, service_id: i64) -> Result<Vec<SpecialistShort>> {
        let rows = sqlx::query(
            r#"
            SELECT sp.id, sp.first_name, sp.last_name, sp.specialization, sp.photo_url
            FROM specialists sp
            JOIN service_specialist ss ON ss.specialist_id = sp.id
            WHERE ss.service_id = $1
            ORDER BY sp.last_name, sp.first_name
            "#,
        )
        .bind(service_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| SpecialistShort {
                id: row.get("id"),
                first_name: row.get("first_name"),
                last_name: row.get("last_name"),
                specialization: row.get("specialization"),
                photo_url: row.get("photo_url"),
            })
            .collect())
    }
}

fn service_from_row(row: &PgRow, specialists: Vec<SpecialistShort>) -> Service {
    Service {
        id: row.get("id"),
        clinic_id: row.get("clinic_id"),
        service: ServiceFields {
            name: row.get("name"),
            short_description: row.get("short_description"),
            description: row.get("description"),
            price: row.get("price"),
            min_price: row.get("min_price"),
            max_price: row.get("max_price"),
            duration_minutes: row.get("duration_minutes"),
            min_duration: row.get("min_duration"),
            max_duration: row.get("max_duration"),
            category: ServiceCategory::from_str_or_default(row.get("category")),
            status: ServiceStatus::from_str_or_default(row.get("status")),
            is_popular: row.get("is_popular"),
            is_available_online: row.get("is_available_online"),
            is_emergency: row.get("is_emergency"),
            preparation_info: row.get("preparation_info"),
            contraindications: row.get("contraindications"),
            required_specializations: row.get("required_specializations"),
            tags: row.get("tags"),
            image_url: row.get("image_url"),
            gallery: row.get("gallery"),
            order_index: row.get("order_index"),
            specialist_ids: None,
        },
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        specialists,
    }
}
