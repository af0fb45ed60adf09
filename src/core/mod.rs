// core/mod.rs
pub mod session_service;
pub mod user_service;
pub mod workflow;

// Ré-exports pour faciliter l'import
pub use session_service::SessionService;
pub use user_service::UserService;
