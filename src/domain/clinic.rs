/// Clinic entity shapes and working-hours rules
///
/// A clinic either works around the clock or carries an explicit opening and
/// closing time; the two are mutually exclusive. A clinic owns its
/// specialists and services outright.

use crate::domain::{default_true, rules, rules::FieldErrors};
use crate::error::FieldError;
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Clinic fields shared by the create and response shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicFields {
    /// Clinic name (max 100 chars)
    pub name: String,
    /// Full postal address
    pub address: String,
    /// Contact phone
    pub phone_number: String,
    /// Contact email
    pub email: String,
    /// Around-the-clock operation; excludes the time fields below
    #[serde(default)]
    pub is_24_7: bool,
    /// Opening time, required for non-24/7 clinics
    pub start_time: Option<NaiveTime>,
    /// Closing time, required for non-24/7 clinics
    pub end_time: Option<NaiveTime>,
    /// Link to a map or navigation app
    pub map_url: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Payload for creating a clinic
pub type ClinicCreate = ClinicFields;

impl ClinicFields {
    /// Validate the whole candidate record
    ///
    /// Rules run in field order; a missing is_24_7 deserializes to false
    /// before any time-field rule reads it.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();

        if self.is_24_7 {
            if self.start_time.is_some() {
                errors.add("start_time", "working hours must not be set for a 24/7 clinic");
            }
            if self.end_time.is_some() {
                errors.add("end_time", "working hours must not be set for a 24/7 clinic");
            }
        } else {
            if self.start_time.is_none() {
                errors.add("start_time", "working hours are required for a non-24/7 clinic");
            }
            if self.end_time.is_none() {
                errors.add("end_time", "working hours are required for a non-24/7 clinic");
            }
            if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
                if end <= start {
                    errors.add("end_time", "closing time must be after opening time");
                }
            }
        }

        if let Some(url) = &self.map_url {
            if !rules::is_valid_map_url(url) {
                errors.add(
                    "map_url",
                    "map link must start with http://, https:// or a navigation app scheme",
                );
            }
        }

        errors.into_result()
    }
}

/// Partial update payload; only provided fields are applied
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClinicUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub is_24_7: Option<bool>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub map_url: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Clinic as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clinic {
    pub id: i64,
    #[serde(flatten)]
    pub clinic: ClinicFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_clinic() -> ClinicFields {
        ClinicFields {
            name: "Friend".to_string(),
            address: "12 Main St".to_string(),
            phone_number: "+79123456789".to_string(),
            email: "info@friend.vet".to_string(),
            is_24_7: false,
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: NaiveTime::from_hms_opt(21, 0, 0),
            map_url: None,
            description: None,
            is_active: true,
        }
    }

    #[test]
    fn regular_clinic_with_hours_passes() {
        assert!(valid_clinic().validate().is_ok());
    }

    #[test]
    fn around_the_clock_clinic_rejects_time_fields() {
        let clinic = ClinicFields {
            is_24_7: true,
            end_time: None,
            ..valid_clinic()
        };
        let errors = clinic.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "start_time");
    }

    #[test]
    fn around_the_clock_clinic_without_hours_passes() {
        let clinic = ClinicFields {
            is_24_7: true,
            start_time: None,
            end_time: None,
            ..valid_clinic()
        };
        assert!(clinic.validate().is_ok());
    }

    #[test]
    fn regular_clinic_requires_both_times() {
        let clinic = ClinicFields {
            start_time: None,
            end_time: None,
            ..valid_clinic()
        };
        let errors = clinic.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["start_time", "end_time"]);
    }

    #[test]
    fn closing_time_must_follow_opening_time() {
        let clinic = ClinicFields {
            start_time: NaiveTime::from_hms_opt(21, 0, 0),
            end_time: NaiveTime::from_hms_opt(9, 0, 0),
            ..valid_clinic()
        };
        let errors = clinic.validate().unwrap_err();
        assert_eq!(errors[0].field, "end_time");

        let same = ClinicFields {
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: NaiveTime::from_hms_opt(9, 0, 0),
            ..valid_clinic()
        };
        assert!(same.validate().is_err());
    }

    #[test]
    fn map_url_scheme_is_checked() {
        let clinic = ClinicFields {
            map_url: Some("yandexmaps://build_route".to_string()),
            ..valid_clinic()
        };
        assert!(clinic.validate().is_ok());

        let clinic = ClinicFields {
            map_url: Some("www.example.com/map".to_string()),
            ..valid_clinic()
        };
        let errors = clinic.validate().unwrap_err();
        assert_eq!(errors[0].field, "map_url");
    }
}
