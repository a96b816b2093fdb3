/// Service entity shapes and price/duration range rules
///
/// A service belongs to exactly one clinic and is offered by any number of
/// specialists through the service_specialist join relation. Optional
/// min/max bounds must bracket the base price and duration.

use crate::domain::{rules, rules::FieldErrors};
use crate::error::FieldError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of services a clinic offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Consultation,
    Diagnostics,
    Treatment,
    Surgery,
    Vaccination,
    Grooming,
    Hospitalization,
    #[default]
    Other,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Consultation => "consultation",
            ServiceCategory::Diagnostics => "diagnostics",
            ServiceCategory::Treatment => "treatment",
            ServiceCategory::Surgery => "surgery",
            ServiceCategory::Vaccination => "vaccination",
            ServiceCategory::Grooming => "grooming",
            ServiceCategory::Hospitalization => "hospitalization",
            ServiceCategory::Other => "other",
        }
    }

    /// Parse a stored value with fallback to the catch-all category
    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "consultation" => ServiceCategory::Consultation,
            "diagnostics" => ServiceCategory::Diagnostics,
            "treatment" => ServiceCategory::Treatment,
            "surgery" => ServiceCategory::Surgery,
            "vaccination" => ServiceCategory::Vaccination,
            "grooming" => ServiceCategory::Grooming,
            "hospitalization" => ServiceCategory::Hospitalization,
            _ => ServiceCategory::Other,
        }
    }
}

/// Publication state of a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    #[default]
    Active,
    Inactive,
    Archived,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Active => "active",
            ServiceStatus::Inactive => "inactive",
            ServiceStatus::Archived => "archived",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "inactive" => ServiceStatus::Inactive,
            "archived" => ServiceStatus::Archived,
            _ => ServiceStatus::Active,
        }
    }
}

/// Service fields shared by the create and response shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceFields {
    /// Service name (max 100 chars)
    pub name: String,
    /// Short description for cards (max 200 chars)
    pub short_description: Option<String>,
    /// Full description, may carry HTML
    pub description: Option<String>,
    /// Base price
    pub price: f64,
    /// Lower price bound for ranged pricing
    pub min_price: Option<f64>,
    /// Upper price bound for ranged pricing
    pub max_price: Option<f64>,
    /// Typical duration in minutes
    pub duration_minutes: Option<i32>,
    pub min_duration: Option<i32>,
    pub max_duration: Option<i32>,
    #[serde(default)]
    pub category: ServiceCategory,
    #[serde(default)]
    pub status: ServiceStatus,
    #[serde(default)]
    pub is_popular: bool,
    /// Telemedicine availability
    #[serde(default)]
    pub is_available_online: bool,
    #[serde(default)]
    pub is_emergency: bool,
    pub preparation_info: Option<String>,
    pub contraindications: Option<String>,
    pub required_specializations: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub gallery: Option<Vec<String>>,
    /// Sort position in listings
    #[serde(default)]
    pub order_index: i32,
    /// Specialists offering this service
    pub specialist_ids: Option<Vec<i64>>,
}

impl ServiceFields {
    /// Validate the whole candidate record
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();

        if self.price < 0.0 {
            errors.add("price", "price must not be negative");
        }
        if let Some(min) = self.min_price {
            if min < 0.0 {
                errors.add("min_price", "price must not be negative");
            } else if min > self.price {
                errors.add("min_price", "minimum price cannot exceed the base price");
            }
        }
        if let Some(max) = self.max_price {
            if max < 0.0 {
                errors.add("max_price", "price must not be negative");
            } else if max < self.price {
                errors.add("max_price", "maximum price cannot be below the base price");
            }
        }

        if let Some(duration) = self.duration_minutes {
            if duration < 1 {
                errors.add("duration_minutes", "duration must be at least one minute");
            }
        }
        if let Some(min) = self.min_duration {
            if min < 1 {
                errors.add("min_duration", "duration must be at least one minute");
            } else if let Some(duration) = self.duration_minutes {
                if min > duration {
                    errors.add(
                        "min_duration",
                        "minimum duration cannot exceed the base duration",
                    );
                }
            }
        }
        if let Some(max) = self.max_duration {
            if max < 1 {
                errors.add("max_duration", "duration must be at least one minute");
            } else if let Some(duration) = self.duration_minutes {
                if max < duration {
                    errors.add(
                        "max_duration",
                        "maximum duration cannot be below the base duration",
                    );
                }
            }
        }

        if let Some(url) = &self.image_url {
            if !rules::is_valid_image_url(url) {
                errors.add(
                    "image_url",
                    "image URL must start with http://, https:// or /media/",
                );
            }
        }
        if let Some(gallery) = &self.gallery {
            for url in gallery {
                if !rules::is_valid_image_url(url) {
                    errors.add(
                        "gallery",
                        "image URL must start with http://, https:// or /media/",
                    );
                    break;
                }
            }
        }

        if self.order_index < 0 {
            errors.add("order_index", "order index must not be negative");
        }

        errors.into_result()
    }
}

/// Payload for creating a service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCreate {
    /// Clinic providing the service
    pub clinic_id: i64,
    #[serde(flatten)]
    pub service: ServiceFields,
}

impl ServiceCreate {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        self.service.validate()
    }
}

/// Partial update payload; only provided fields are applied
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub duration_minutes: Option<i32>,
    pub min_duration: Option<i32>,
    pub max_duration: Option<i32>,
    pub category: Option<ServiceCategory>,
    pub status: Option<ServiceStatus>,
    pub is_popular: Option<bool>,
    pub is_available_online: Option<bool>,
    pub is_emergency: Option<bool>,
    pub preparation_info: Option<String>,
    pub contraindications: Option<String>,
    pub required_specializations: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub gallery: Option<Vec<String>>,
    pub order_index: Option<i32>,
    pub specialist_ids: Option<Vec<i64>>,
}

/// Short specialist form embedded in service responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialistShort {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub photo_url: Option<String>,
}

/// Service as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub clinic_id: i64,
    #[serde(flatten)]
    pub service: ServiceFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Specialists offering this service
    pub specialists: Vec<SpecialistShort>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_service() -> ServiceFields {
        ServiceFields {
            name: "Vaccination".to_string(),
            short_description: None,
            description: None,
            price: 1500.0,
            min_price: None,
            max_price: None,
            duration_minutes: Some(30),
            min_duration: None,
            max_duration: None,
            category: ServiceCategory::Vaccination,
            status: ServiceStatus::Active,
            is_popular: false,
            is_available_online: false,
            is_emergency: false,
            preparation_info: None,
            contraindications: None,
            required_specializations: None,
            tags: None,
            image_url: None,
            gallery: None,
            order_index: 0,
            specialist_ids: None,
        }
    }

    #[test]
    fn bounds_bracketing_the_base_price_pass() {
        let service = ServiceFields {
            min_price: Some(1000.0),
            max_price: Some(2000.0),
            ..valid_service()
        };
        assert!(service.validate().is_ok());
    }

    #[test]
    fn min_price_above_base_is_rejected() {
        let service = ServiceFields {
            min_price: Some(1600.0),
            ..valid_service()
        };
        let errors = service.validate().unwrap_err();
        assert_eq!(errors[0].field, "min_price");
    }

    #[test]
    fn max_price_below_base_is_rejected() {
        let service = ServiceFields {
            max_price: Some(1400.0),
            ..valid_service()
        };
        let errors = service.validate().unwrap_err();
        assert_eq!(errors[0].field, "max_price");
    }

    #[test]
    fn duration_bounds_must_bracket_the_base_duration() {
        let service = ServiceFields {
            min_duration: Some(45),
            ..valid_service()
        };
        assert_eq!(service.validate().unwrap_err()[0].field, "min_duration");

        let service = ServiceFields {
            max_duration: Some(15),
            ..valid_service()
        };
        assert_eq!(service.validate().unwrap_err()[0].field, "max_duration");

        let service = ServiceFields {
            min_duration: Some(20),
            max_duration: Some(60),
            ..valid_service()
        };
        assert!(service.validate().is_ok());
    }

    #[test]
    fn negative_price_and_zero_duration_are_rejected() {
        let service = ServiceFields {
            price: -1.0,
            ..valid_service()
        };
        assert_eq!(service.validate().unwrap_err()[0].field, "price");

        let service = ServiceFields {
            duration_minutes: Some(0),
            ..valid_service()
        };
        assert_eq!(service.validate().unwrap_err()[0].field, "duration_minutes");
    }

    #[test]
    fn gallery_urls_are_prefix_checked() {
        let service = ServiceFields {
            gallery: Some(vec![
                "/media/a.jpg".to_string(),
                "cdn.example.com/b.jpg".to_string(),
            ]),
            ..valid_service()
        };
        let errors = service.validate().unwrap_err();
        assert_eq!(errors[0].field, "gallery");
    }
}
