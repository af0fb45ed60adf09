// services/storage.rs
//! Interface de persistance.
//!
//! Toute la couche HTTP passe par le trait `Storage`, injecté au démarrage.
//! Un échec du backend remonte en `ServiceUnavailable`, jamais en liste vide
//! silencieuse. Le backend en mémoire est dans `services::memory` ; une base
//! de données pourra s'y substituer sans toucher aux handlers.

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{AuditLog, Session, SessionStatus, SystemSetting, TeacherSetup, User};
use crate::utils::error::Result;

/// Critères de filtrage d'une liste de sessions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionFilter {
    pub status: Option<SessionStatus>,
    pub teacher_id: Option<Uuid>,
}

#[async_trait]
pub trait Storage: Send + Sync {
    // Utilisateurs
    async fn create_user(&self, user: User) -> Result<User>;
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Tous les utilisateurs, dans l'ordre d'insertion
    async fn list_users(&self) -> Result<Vec<User>>;

    // Sessions
    async fn insert_session(&self, session: Session) -> Result<Session>;
    async fn get_session(&self, id: Uuid) -> Result<Option<Session>>;
    async fn list_sessions(&self, filter: &SessionFilter) -> Result<Vec<Session>>;

    /// Remplace la session portant le même id
    async fn update_session(&self, session: Session) -> Result<Session>;

    // Configurations enseignants
    async fn get_teacher_setup(&self, teacher_id: Uuid) -> Result<Option<TeacherSetup>>;
    async fn upsert_teacher_setup(&self, setup: TeacherSetup) -> Result<TeacherSetup>;

    // Paramètres système
    async fn list_settings(&self) -> Result<Vec<SystemSetting>>;
    async fn get_setting(&self, key: &str) -> Result<Option<SystemSetting>>;
    async fn upsert_setting(&self, setting: SystemSetting) -> Result<SystemSetting>;

    // Journal d'audit (append-only)
    async fn append_audit(&self, entry: AuditLog) -> Result<()>;
    async fn session_history(&self, session_id: Uuid) -> Result<Vec<AuditLog>>;
}
