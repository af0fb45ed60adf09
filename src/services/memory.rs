// services/memory.rs
//! Backend de stockage en mémoire.
//!
//! Les collections sont des `Vec` protégés par un `RwLock` : l'ordre
//! d'insertion est préservé, ce que le contrat de `list_users` exige.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{AuditLog, Session, SystemSetting, TeacherSetup, User};
use crate::services::storage::{SessionFilter, Storage};
use crate::utils::error::{AppError, Result};

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    sessions: Vec<Session>,
    teacher_setups: Vec<TeacherSetup>,
    settings: Vec<SystemSetting>,
    audit: Vec<AuditLog>,
}

/// Stockage en mémoire, partagé entre les workers actix
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: RwLock<State>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_user(&self, user: User) -> Result<User> {
        let mut state = self.inner.write().await;
        if state.users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(format!(
                "l'identifiant '{}' est déjà utilisé",
                user.username
            )));
        }
        state.users.push(user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let state = self.inner.read().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let state = self.inner.read().await;
        Ok(state.users.clone())
    }

    async fn insert_session(&self, session: Session) -> Result<Session> {
        let mut state = self.inner.write().await;
        state.sessions.push(session.clone());
        Ok(session)
    }

    async fn get_session(&self, id: Uuid) -> Result<Option<Session>> {
        let state = self.inner.read().await;
        Ok(state.sessions.iter().find(|s| s.id == id).cloned())
    }

    async fn list_sessions(&self, filter: &SessionFilter) -> Result<Vec<Session>> {
        let state = self.inner.read().await;
        Ok(state
            .sessions
            .iter()
            .filter(|s| filter.status.map_or(true, |status| s.status == status))
            .filter(|s| filter.teacher_id.map_or(true, |id| s.teacher_id == id))
            .cloned()
            .collect())
    }

    async fn update_session(&self, session: Session) -> Result<Session> {
        let mut state = self.inner.write().await;
        match state.sessions.iter_mut().find(|s| s.id == session.id) {
            Some(slot) => {
                *slot = session.clone();
                Ok(session)
            }
            None => Err(AppError::NotFound(format!(
                "session {} inconnue",
                session.id
            ))),
        }
    }

    async fn get_teacher_setup(&self, teacher_id: Uuid) -> Result<Option<TeacherSetup>> {
        let state = self.inner.read().await;
        Ok(state
            .teacher_setups
            .iter()
            .find(|t| t.teacher_id == teacher_id)
            .cloned())
    }

    async fn upsert_teacher_setup(&self, setup: TeacherSetup) -> Result<TeacherSetup> {
        let mut state = self.inner.write().await;
        match state
            .teacher_setups
            .iter_mut()
            .find(|t| t.teacher_id == setup.teacher_id)
        {
            Some(slot) => *slot = setup.clone(),
            None => state.teacher_setups.push(setup.clone()),
        }
        Ok(setup)
    }

    async fn list_settings(&self) -> Result<Vec<SystemSetting>> {
        let state = self.inner.read().await;
        Ok(state.settings.clone())
    }

    async fn get_setting(&self, key: &str) -> Result<Option<SystemSetting>> {
        let state = self.inner.read().await;
        Ok(state.settings.iter().find(|s| s.key == key).cloned())
    }

    async fn upsert_setting(&self, setting: SystemSetting) -> Result<SystemSetting> {
        let mut state = self.inner.write().await;
        match state.settings.iter_mut().find(|s| s.key == setting.key) {
            Some(slot) => *slot = setting.clone(),
            None => state.settings.push(setting.clone()),
        }
        Ok(setting)
    }

    async fn append_audit(&self, entry: AuditLog) -> Result<()> {
        let mut state = self.inner.write().await;
        state.audit.push(entry);
        Ok(())
    }

    async fn session_history(&self, session_id: Uuid) -> Result<Vec<AuditLog>> {
        let state = self.inner.read().await;
        Ok(state
            .audit
            .iter()
            .filter(|a| a.session_id == session_id)
            .cloned()
            .collect())
    }
}
