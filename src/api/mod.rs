/// HTTP API layer
///
/// REST endpoints for every entity plus the landing page and health check.
/// Handlers parse the payload, run the entity's validation rules, and only
/// then touch storage; a record with any failing field is wholly rejected.

use crate::config::Settings;
use crate::storage::{
    ClinicStore, NewsStore, PromotionStore, ServiceStore, SpecialistStore, UserStore,
};

// Landing page and health check
pub mod pages;

// Entity CRUD endpoints
pub mod clinics;
pub mod news;
pub mod promotions;
pub mod services;
pub mod specialists;
pub mod users;

// Re-export router builders
pub use clinics::create_clinic_routes;
pub use news::create_news_routes;
pub use pages::create_page_routes;
pub use promotions::create_promotion_routes;
pub use services::create_service_routes;
pub use specialists::create_specialist_routes;
pub use users::create_user_routes;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub clinics: ClinicStore,
    pub services: ServiceStore,
    pub specialists: SpecialistStore,
    pub promotions: PromotionStore,
    pub news: NewsStore,
    pub users: UserStore,
    /// Process-wide configuration, resolved once at startup
    pub settings: Settings,
}
