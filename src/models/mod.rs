// Modèle: user.rs
pub mod user;
pub use user::{Role, User, NewUser};

// Modèle: session.rs
pub mod session;
pub use session::{
    Session, SessionStatus, SessionType, TimeSlot, NewSession,
};

// Modèle: teacher_setup.rs
pub mod teacher_setup;
pub use teacher_setup::{TeacherSetup, TeacherSetupUpdate};

// Modèle: system.rs
pub mod system;
pub use system::{SystemSetting, SettingUpdate, AuditLog};
