/// User persistence: clinic staff and clients
///
/// Two tables with the same contact core. Emails are unique per table; the
/// password hash column never leaves this module except through
/// verify-oriented lookups.

use crate::domain::{
    Client, ClientFields, ClientUpdate, Staff, StaffFields, StaffUpdate, UserFields, UserRole,
    UserStatus,
};
use anyhow::Result;
use sqlx::{postgres::PgRow, PgPool, Row};

/// Staff and client storage over the shared pool
#[derive(Debug, Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Initialize the clinic_staff and clients tables
    ///
    /// Must run after the clinics schema. Safe to call multiple times
    /// (uses IF NOT EXISTS).
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS clinic_staff (
                id BIGSERIAL PRIMARY KEY,
                email VARCHAR(100) NOT NULL UNIQUE,
                hashed_password VARCHAR(255) NOT NULL,
                first_name VARCHAR(50) NOT NULL,
                last_name VARCHAR(50) NOT NULL,
                phone_number VARCHAR(20),
                status VARCHAR(20) NOT NULL DEFAULT 'active',
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                last_login TIMESTAMPTZ,
                role VARCHAR(30) NOT NULL,
                clinic_id BIGINT NOT NULL REFERENCES clinics(id),
                specialization VARCHAR(100),
                license_number VARCHAR(50),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS clients (
                id BIGSERIAL PRIMARY KEY,
                email VARCHAR(100) NOT NULL UNIQUE,
                hashed_password VARCHAR(255) NOT NULL,
                first_name VARCHAR(50) NOT NULL,
                last_name VARCHAR(50) NOT NULL,
                phone_number VARCHAR(20),
                status VARCHAR(20) NOT NULL DEFAULT 'active',
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                last_login TIMESTAMPTZ,
                date_of_birth DATE,
                address TEXT,
                emergency_contact VARCHAR(100),
                blood_type VARCHAR(5),
                allergies TEXT[],
                chronic_diseases TEXT[],
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// True when a staff row already uses the email
    pub async fn staff_email_taken(&self, email: &str) -> Result<bool> {
        let row = sqlx::query("SELECT id FROM clinic_staff WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    pub async fn create_staff(&self, fields: &StaffFields, hashed_password: &str) -> Result<Staff> {
        let row = sqlx::query(
            r#"
            INSERT INTO clinic_staff
                (email, hashed_password, first_name, last_name, phone_number,
                 is_active, role, clinic_id, specialization, license_number)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&fields.user.email)
        .bind(hashed_password)
        .bind(&fields.user.first_name)
        .bind(&fields.user.last_name)
        .bind(&fields.user.phone_number)
        .bind(fields.user.is_active)
        .bind(fields.role.as_str())
        .bind(fields.clinic_id)
        .bind(&fields.specialization)
        .bind(&fields.license_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(staff_from_row(&row))
    }

    pub async fn get_staff(&self, id: i64) -> Result<Option<Staff>> {
        let row = sqlx::query("SELECT * FROM clinic_staff WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(staff_from_row))
    }

    pub async fn list_staff(&self, clinic_id: Option<i64>) -> Result<Vec<Staff>> {
        let rows = match clinic_id {
            Some(clinic_id) => {
                sqlx::query(
                    "SELECT * FROM clinic_staff WHERE clinic_id = $1
                     ORDER BY last_name, first_name",
                )
                .bind(clinic_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query("SELECT * FROM clinic_staff ORDER BY last_name, first_name")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.iter().map(staff_from_row).collect())
    }

    /// Apply only the provided fields and bump updated_at
    pub async fn update_staff(&self, id: i64, patch: &StaffUpdate) -> Result<Option<Staff>> {
        let row = sqlx::query(
            r#"
            UPDATE clinic_staff SET
                email = COALESCE($2, email),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                phone_number = COALESCE($5, phone_number),
                is_active = COALESCE($6, is_active),
                role = COALESCE($7, role),
                specialization = COALESCE($8, specialization),
                license_number = COALESCE($9, license_number),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.email)
        .bind(&patch.first_name)
        .bind(&patch.last_name)
        .bind(&patch.phone_number)
        .bind(patch.is_active)
        .bind(patch.role.map(|r| r.as_str()))
        .bind(&patch.specialization)
        .bind(&patch.license_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(staff_from_row))
    }

    pub async fn delete_staff(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM clinic_staff WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// True when a client row already uses the email
    pub async fn client_email_taken(&self, email: &str) -> Result<bool> {
        let row = sqlx::query("SELECT id FROM clients WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    pub async fn create_client(
        &self,
        fields: &ClientFields,
        hashed_password: &str,
    ) -> Result<Client> {
        let row = sqlx::query(
            r#"
            INSERT INTO clients
                (email, hashed_password, first_name, last_name, phone_number,
                 is_active, date_of_birth, address, emergency_contact, blood_type,
                 allergies, chronic_diseases)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&fields.user.email)
        .bind(hashed_password)
        .bind(&fields.user.first_name)
        .bind(&fields.user.last_name)
        .bind(&fields.user.phone_number)
        .bind(fields.user.is_active)
        .bind(fields.date_of_birth)
        .bind(&fields.address)
        .bind(&fields.emergency_contact)
        .bind(&fields.blood_type)
        .bind(&fields.allergies)
        .bind(&fields.chronic_diseases)
        .fetch_one(&self.pool)
        .await?;

        Ok(client_from_row(&row))
    }

    pub async fn get_client(&self, id: i64) -> Result<Option<Client>> {
        let row = sqlx::query("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(client_from_row))
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>> {
        let rows = sqlx::query("SELECT * FROM clients ORDER BY last_name, first_name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(client_from_row).collect())
    }

    /// Apply only the provided fields and bump updated_at
    pub async fn update_client(&self, id: i64, patch: &ClientUpdate) -> Result<Option<Client>> {
        let row = sqlx::query(
            r#"
            UPDATE clients SET
                email = COALESCE($2, email),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                phone_number = COALESCE($5, phone_number),
                is_active = COALESCE($6, is_active),
                date_of_birth = COALESCE($7, date_of_birth),
                address = COALESCE($8, address),
                emergency_contact = COALESCE($9, emergency_contact),
                blood_type = COALESCE($10, blood_type),
                allergies = COALESCE($11, allergies),
                chronic_diseases = COALESCE($12, chronic_diseases),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.email)
        .bind(&patch.first_name)
        .bind(&patch.last_name)
        .bind(&patch.phone_number)
        .bind(patch.is_active)
        .bind(patch.date_of_birth)
        .bind(&patch.address)
        .bind(&patch.emergency_contact)
        .bind(&patch.blood_type)
        .bind(&patch.allergies)
        .bind(&patch.chronic_diseases)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(client_from_row))
    }

    pub async fn delete_client(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn user_fields_from_row(row: &PgRow) -> UserFields {
    UserFields {
        email: row.get("email"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        phone_number: row.get("phone_number"),
        is_active: row.get("is_active"),
    }
}

fn staff_from_row(row: &PgRow) -> Staff {
    Staff {
        id: row.get("id"),
        staff: StaffFields {
            user: user_fields_from_row(row),
            role: UserRole::from_str_or_default(row.get("role")),
            clinic_id: row.get("clinic_id"),
            specialization: row.get("specialization"),
            license_number: row.get("license_number"),
        },
        status: UserStatus::from_str_or_default(row.get("status")),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        last_login: row.get("last_login"),
    }
}

fn client_from_row(row: &PgRow) -> Client {
    Client {
        id: row.get("id"),
        client: ClientFields {
            user: user_fields_from_row(row),
            date_of_birth: row.get("date_of_birth"),
            address: row.get("address"),
            emergency_contact: row.get("emergency_contact"),
            blood_type: row.get("blood_type"),
            allergies: row.get("allergies"),
            chronic_diseases: row.get("chronic_diseases"),
        },
        role: UserRole::Client,
        status: UserStatus::from_str_or_default(row.get("status")),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        last_login: row.get("last_login"),
    }
}
