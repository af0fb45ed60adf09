// src/lib.rs
// Modules principaux
pub mod api;
pub mod core;
pub mod models;
pub mod services;
pub mod utils;

// Ré-exports pour faciliter l'utilisation
pub use crate::core::{SessionService, UserService};
pub use models::{
    AuditLog, NewSession, NewUser, Role, Session, SessionStatus, SessionType, SystemSetting,
    TeacherSetup, TimeSlot, User,
};
pub use services::{MemoryStorage, SessionFilter, Storage};
pub use utils::{AppError, Config};

// Version de l'application
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = "SupChaissac";
