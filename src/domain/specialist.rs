/// Specialist entity shapes
///
/// A specialist is tied to one clinic and linked to services through the
/// service_specialist join relation. Experience is expressed in whole years.

use crate::domain::{rules, rules::FieldErrors};
use crate::error::FieldError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Specialist fields shared by the create and response shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialistFields {
    /// Given name (max 50 chars)
    pub first_name: String,
    /// Family name (max 50 chars)
    pub last_name: String,
    pub patronymic: Option<String>,
    /// Professional specialization (max 100 chars)
    pub specialization: String,
    /// Years of experience, 0-100
    pub experience: Option<i32>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    /// Services this specialist provides
    pub service_ids: Option<Vec<i64>>,
}

impl SpecialistFields {
    /// Validate the whole candidate record
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();

        if let Some(experience) = self.experience {
            if !(0..=100).contains(&experience) {
                errors.add("experience", "experience must be between 0 and 100 years");
            }
        }

        if let Some(url) = &self.photo_url {
            if !rules::is_valid_image_url(url) {
                errors.add(
                    "photo_url",
                    "image URL must start with http://, https:// or /media/",
                );
            }
        }

        errors.into_result()
    }
}

/// Payload for creating a specialist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialistCreate {
    /// Clinic the specialist works at
    pub clinic_id: i64,
    #[serde(flatten)]
    pub specialist: SpecialistFields,
}

impl SpecialistCreate {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        self.specialist.validate()
    }
}

/// Partial update payload; only provided fields are applied
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecialistUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub patronymic: Option<String>,
    pub specialization: Option<String>,
    pub experience: Option<i32>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub service_ids: Option<Vec<i64>>,
}

/// Short service form embedded in specialist responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceShort {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub duration_minutes: Option<i32>,
    pub category: String,
}

/// Specialist as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specialist {
    pub id: i64,
    pub clinic_id: i64,
    #[serde(flatten)]
    pub specialist: SpecialistFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Services this specialist provides
    pub services: Vec<ServiceShort>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_specialist() -> SpecialistFields {
        SpecialistFields {
            first_name: "Anna".to_string(),
            last_name: "Petrova".to_string(),
            patronymic: None,
            specialization: "Surgeon".to_string(),
            experience: Some(12),
            description: None,
            photo_url: None,
            service_ids: None,
        }
    }

    #[test]
    fn experience_within_range_passes() {
        assert!(valid_specialist().validate().is_ok());

        let edge = SpecialistFields {
            experience: Some(0),
            ..valid_specialist()
        };
        assert!(edge.validate().is_ok());

        let edge = SpecialistFields {
            experience: Some(100),
            ..valid_specialist()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn experience_outside_range_is_rejected() {
        let specialist = SpecialistFields {
            experience: Some(101),
            ..valid_specialist()
        };
        assert_eq!(specialist.validate().unwrap_err()[0].field, "experience");

        let specialist = SpecialistFields {
            experience: Some(-1),
            ..valid_specialist()
        };
        assert!(specialist.validate().is_err());
    }

    #[test]
    fn photo_url_is_prefix_checked() {
        let specialist = SpecialistFields {
            photo_url: Some("ftp://old.example.com/photo.jpg".to_string()),
            ..valid_specialist()
        };
        assert_eq!(specialist.validate().unwrap_err()[0].field, "photo_url");
    }
}
