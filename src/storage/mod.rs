/// PostgreSQL persistence layer
///
/// One store per entity over a shared connection pool. Ownership is
/// enforced explicitly rather than through database cascades: deleting a
/// clinic removes its specialists and services in one transaction, deleting
/// a news article removes its blocks, and the service_specialist join table
/// has an independent lifecycle where each side deletes only its own rows.

pub mod clinic;
pub mod news;
pub mod promotion;
pub mod service;
pub mod specialist;
pub mod user;

pub use clinic::ClinicStore;
pub use news::NewsStore;
pub use promotion::PromotionStore;
pub use service::ServiceStore;
pub use specialist::SpecialistStore;
pub use user::UserStore;
