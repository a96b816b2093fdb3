/// User entity shapes: clinic staff and clients
///
/// Both variants share contact fields and a hashed password; staff carry a
/// role and a clinic binding, clients carry personal and medical data.
/// Password hashes never appear in response shapes.

use crate::domain::{default_true, rules, rules::FieldErrors};
use crate::error::FieldError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Role a staff member holds in the system
///
/// The client role is reserved for the client user variant and is rejected
/// on staff records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    ClinicManager,
    Doctor,
    Receptionist,
    Client,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::ClinicManager => "clinic_manager",
            UserRole::Doctor => "doctor",
            UserRole::Receptionist => "receptionist",
            UserRole::Client => "client",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "admin" => UserRole::Admin,
            "clinic_manager" => UserRole::ClinicManager,
            "doctor" => UserRole::Doctor,
            "receptionist" => UserRole::Receptionist,
            _ => UserRole::Client,
        }
    }
}

/// Account lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
    Pending,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Suspended => "suspended",
            UserStatus::Pending => "pending",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "inactive" => UserStatus::Inactive,
            "suspended" => UserStatus::Suspended,
            "pending" => UserStatus::Pending,
            _ => UserStatus::Active,
        }
    }
}

/// Contact fields shared by both user variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFields {
    pub email: String,
    /// Given name (max 50 chars)
    pub first_name: String,
    /// Family name (max 50 chars)
    pub last_name: String,
    pub phone_number: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl UserFields {
    fn validate_into(&self, errors: &mut FieldErrors) {
        if let Some(phone) = &self.phone_number {
            if !rules::is_valid_phone(phone) {
                errors.add("phone_number", "phone number format is not recognized");
            }
        }
    }
}

/// Staff fields shared by the create and response shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffFields {
    #[serde(flatten)]
    pub user: UserFields,
    /// Role in the clinic, anything but client
    pub role: UserRole,
    /// Clinic the staff member belongs to
    pub clinic_id: i64,
    /// Medical specialization, for doctors
    pub specialization: Option<String>,
    pub license_number: Option<String>,
}

impl StaffFields {
    /// Validate the whole candidate record
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        self.user.validate_into(&mut errors);
        if self.role == UserRole::Client {
            errors.add("role", "staff cannot hold the client role");
        }
        errors.into_result()
    }
}

/// Payload for creating a staff member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffCreate {
    /// Plain password; stored only as a bcrypt hash
    pub password: String,
    #[serde(flatten)]
    pub staff: StaffFields,
}

impl StaffCreate {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        if let Err(field_errors) = self.staff.validate() {
            for e in field_errors {
                errors.add(e.field, e.message);
            }
        }
        if let Some(reason) = rules::password_error(&self.password) {
            errors.add("password", reason);
        }
        errors.into_result()
    }
}

/// Partial staff update; the client role stays rejected here
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub is_active: Option<bool>,
    pub role: Option<UserRole>,
    pub specialization: Option<String>,
    pub license_number: Option<String>,
}

impl StaffUpdate {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        if self.role == Some(UserRole::Client) {
            errors.add("role", "staff cannot hold the client role");
        }
        errors.into_result()
    }
}

/// Staff member as returned by the API; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: i64,
    #[serde(flatten)]
    pub staff: StaffFields,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Client fields shared by the create and response shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientFields {
    #[serde(flatten)]
    pub user: UserFields,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    /// Person to reach in an emergency (max 100 chars)
    pub emergency_contact: Option<String>,
    /// One of the eight ABO/Rh values
    pub blood_type: Option<String>,
    pub allergies: Option<Vec<String>>,
    pub chronic_diseases: Option<Vec<String>>,
}

impl ClientFields {
    /// Validate the whole candidate record
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        self.user.validate_into(&mut errors);

        if let Some(blood_type) = &self.blood_type {
            if !rules::is_valid_blood_type(blood_type) {
                errors.add("blood_type", "blood type is not a recognized ABO/Rh value");
            }
        }

        if let Some(date_of_birth) = self.date_of_birth {
            let today = Utc::now().date_naive();
            if date_of_birth > today {
                errors.add("date_of_birth", "date of birth cannot be in the future");
            } else {
                let age_years = (today - date_of_birth).num_days() / 365;
                if age_years > 120 {
                    errors.add("date_of_birth", "implied age must be within 0-120 years");
                }
            }
        }

        errors.into_result()
    }
}

/// Payload for registering a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCreate {
    /// Plain password; stored only as a bcrypt hash
    pub password: String,
    #[serde(flatten)]
    pub client: ClientFields,
}

impl ClientCreate {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        if let Err(field_errors) = self.client.validate() {
            for e in field_errors {
                errors.add(e.field, e.message);
            }
        }
        if let Some(reason) = rules::password_error(&self.password) {
            errors.add("password", reason);
        }
        errors.into_result()
    }
}

/// Partial client update; only provided fields are applied
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub is_active: Option<bool>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<Vec<String>>,
    pub chronic_diseases: Option<Vec<String>>,
}

/// Client as returned by the API; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    #[serde(flatten)]
    pub client: ClientFields,
    /// Always the client role
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Login request shape (token issuance lives outside this backend)
#[derive(Debug, Clone, Deserialize)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

/// Issued token shape
#[derive(Debug, Clone, Serialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    /// "staff" or "client"
    pub user_type: String,
}

/// Password change request
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        if let Some(reason) = rules::password_error(&self.new_password) {
            errors.add("new_password", reason);
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user_fields() -> UserFields {
        UserFields {
            email: "user@example.com".to_string(),
            first_name: "Ivan".to_string(),
            last_name: "Sidorov".to_string(),
            phone_number: None,
            is_active: true,
        }
    }

    fn valid_staff_create() -> StaffCreate {
        StaffCreate {
            password: "abc123".to_string(),
            staff: StaffFields {
                user: user_fields(),
                role: UserRole::Doctor,
                clinic_id: 1,
                specialization: Some("Surgeon".to_string()),
                license_number: None,
            },
        }
    }

    fn valid_client_create() -> ClientCreate {
        ClientCreate {
            password: "abc123".to_string(),
            client: ClientFields {
                user: user_fields(),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 20),
                address: None,
                emergency_contact: None,
                blood_type: None,
                allergies: None,
                chronic_diseases: None,
            },
        }
    }

    #[test]
    fn staff_with_client_role_is_rejected() {
        let mut staff = valid_staff_create();
        staff.staff.role = UserRole::Client;
        assert_eq!(staff.validate().unwrap_err()[0].field, "role");

        let update = StaffUpdate {
            role: Some(UserRole::Client),
            ..StaffUpdate::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn password_without_digit_is_rejected() {
        let mut staff = valid_staff_create();
        staff.password = "abcdef".to_string();
        let errors = staff.validate().unwrap_err();
        assert_eq!(errors[0].field, "password");
        assert_eq!(errors[0].message, "password must contain at least one digit");

        staff.password = "abc123".to_string();
        assert!(staff.validate().is_ok());
    }

    #[test]
    fn short_password_is_rejected() {
        let mut client = valid_client_create();
        client.password = "a1".to_string();
        assert_eq!(client.validate().unwrap_err()[0].field, "password");
    }

    #[test]
    fn blood_type_is_checked_case_insensitively() {
        let mut client = valid_client_create();
        client.client.blood_type = Some("ab-".to_string());
        assert!(client.validate().is_ok());

        client.client.blood_type = Some("X+".to_string());
        assert_eq!(client.validate().unwrap_err()[0].field, "blood_type");
    }

    #[test]
    fn future_date_of_birth_is_rejected() {
        let mut client = valid_client_create();
        let tomorrow = Utc::now().date_naive() + Duration::days(1);
        client.client.date_of_birth = Some(tomorrow);
        assert_eq!(client.validate().unwrap_err()[0].field, "date_of_birth");
    }

    #[test]
    fn implausibly_old_date_of_birth_is_rejected() {
        let mut client = valid_client_create();
        client.client.date_of_birth = NaiveDate::from_ymd_opt(1880, 1, 1);
        assert_eq!(client.validate().unwrap_err()[0].field, "date_of_birth");
    }

    #[test]
    fn bad_phone_number_is_rejected_on_both_variants() {
        let mut staff = valid_staff_create();
        staff.staff.user.phone_number = Some("12345".to_string());
        assert_eq!(staff.validate().unwrap_err()[0].field, "phone_number");

        let mut client = valid_client_create();
        client.client.user.phone_number = Some("+7 912 345-67-89".to_string());
        assert!(client.validate().is_ok());
    }

    #[test]
    fn new_password_in_change_request_is_checked() {
        let change = PasswordChange {
            current_password: "old123".to_string(),
            new_password: "weak".to_string(),
        };
        assert_eq!(change.validate().unwrap_err()[0].field, "new_password");
    }
}
