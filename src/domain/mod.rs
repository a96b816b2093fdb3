/// Domain entity shapes and validation rules
///
/// Each entity ships three shapes: a strict create shape (required fields
/// enforced by the type), an all-optional update shape, and a response shape
/// carrying identity and timestamps. Validation is one function per entity
/// over the whole candidate record; a record with any failing field is
/// wholly rejected, never partially applied.

// Shared rule helpers: URL prefixes, password strength, phone, blood type
pub mod rules;

// Entity shapes
pub mod clinic;
pub mod news;
pub mod promotion;
pub mod service;
pub mod specialist;
pub mod user;

// Re-export commonly used types
pub use clinic::{Clinic, ClinicCreate, ClinicFields, ClinicUpdate};
pub use news::{News, NewsBlock, NewsBlockFields, NewsCreate, NewsUpdate};
pub use promotion::{DiscountType, Promotion, PromotionCreate, PromotionFields, PromotionUpdate};
pub use service::{
    Service, ServiceCategory, ServiceCreate, ServiceFields, ServiceStatus, ServiceUpdate,
    SpecialistShort,
};
pub use specialist::{
    ServiceShort, Specialist, SpecialistCreate, SpecialistFields, SpecialistUpdate,
};
pub use user::{
    Client, ClientCreate, ClientFields, ClientUpdate, PasswordChange, Staff, StaffCreate,
    StaffFields, StaffUpdate, Token, UserFields, UserLogin, UserRole, UserStatus,
};

/// Serde default for flags that start enabled
pub(crate) fn default_true() -> bool {
    true
}
