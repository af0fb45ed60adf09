// core/session_service.rs
//! Orchestration du cycle de vie des sessions : déclaration, transitions
//! de statut, requalification et journal d'audit.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::workflow;
use crate::models::{
    AuditLog, NewSession, Role, Session, SessionStatus, SessionType, User,
};
use crate::services::storage::{SessionFilter, Storage};
use crate::utils::error::{AppError, Result};

pub struct SessionService {
    storage: Arc<dyn Storage>,
    // Verrous par session : le read-check-write d'une transition doit être
    // sérialisé par id, deux requêtes concurrentes sur la même session ne
    // peuvent pas appliquer des transitions contradictoires.
    // Le registre est purgé dès qu'une session atteint un état terminal,
    // plus aucune transition n'étant possible ensuite.
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl SessionService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            locks: Mutex::new(HashMap::new()),
        }
    }

    async fn session_lock(&self, id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn require_user(&self, id: Uuid) -> Result<User> {
        self.storage
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("utilisateur {} inconnu", id)))
    }

    async fn require_session(&self, id: Uuid) -> Result<Session> {
        self.storage
            .get_session(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("session {} inconnue", id)))
    }

    /// Déclaration d'une session par un enseignant.
    /// Le statut initial est SUBMITTED, quoi que demande le client.
    pub async fn submit(&self, data: &NewSession) -> Result<Session> {
        let teacher = self.require_user(data.teacher_id).await?;
        if teacher.role != Role::Teacher {
            return Err(AppError::Unauthorized(
                "seul un enseignant peut déclarer une session".to_string(),
            ));
        }

        let session = Session::submit(data, teacher.name.clone());
        let session = self.storage.insert_session(session).await?;

        self.storage
            .append_audit(AuditLog::new(
                session.id,
                None,
                SessionStatus::Submitted,
                teacher.id,
                teacher.role,
                None,
            ))
            .await?;

        tracing::info!(
            session_id = %session.id,
            teacher = %teacher.username,
            "session déclarée"
        );
        Ok(session)
    }

    /// Applique une transition de statut demandée par `actor_id`.
    ///
    /// Le rôle de l'acteur vient du stockage, pas de la requête.
    /// En cas de succès la session mise à jour est retournée et une
    /// entrée d'audit est ajoutée ; en cas d'échec rien n'est modifié.
    pub async fn change_status(
        &self,
        session_id: Uuid,
        target: SessionStatus,
        actor_id: Uuid,
        comment: Option<String>,
    ) -> Result<Session> {
        let lock = self.session_lock(session_id).await;
        let _guard = lock.lock().await;

        let mut session = self.require_session(session_id).await?;
        let actor = self.require_user(actor_id).await?;

        let previous = session.status;
        workflow::apply_transition(&mut session, target, &actor)?;

        let session = self.storage.update_session(session).await?;
        self.storage
            .append_audit(AuditLog::new(
                session.id,
                Some(previous),
                target,
                actor.id,
                actor.role,
                comment,
            ))
            .await?;

        tracing::info!(
            session_id = %session.id,
            from = previous.as_str(),
            to = target.as_str(),
            actor = %actor.username,
            "transition appliquée"
        );

        // Session close : son verrou ne servira plus
        if target.is_terminal() {
            self.locks.lock().await.remove(&session_id);
        }

        Ok(session)
    }

    /// Requalification du type de session par un examinateur.
    /// Le type d'origine reste intact.
    pub async fn reclassify(
        &self,
        session_id: Uuid,
        new_type: SessionType,
        actor_id: Uuid,
    ) -> Result<Session> {
        let lock = self.session_lock(session_id).await;
        let _guard = lock.lock().await;

        let mut session = self.require_session(session_id).await?;
        let actor = self.require_user(actor_id).await?;

        if !actor.role.is_reviewer() {
            return Err(AppError::Unauthorized(
                "seul un examinateur peut requalifier une session".to_string(),
            ));
        }
        if session.status.is_terminal() {
            return Err(AppError::InvalidTransition(format!(
                "la session est close ({})",
                session.status.as_str()
            )));
        }

        session.session_type = new_type;
        session.updated_at = Utc::now();
        session.updated_by = Some(actor.id);

        self.storage.update_session(session).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Session> {
        self.require_session(id).await
    }

    pub async fn list(&self, filter: &SessionFilter) -> Result<Vec<Session>> {
        self.storage.list_sessions(filter).await
    }

    /// Journal d'audit d'une session, dans l'ordre des transitions
    pub async fn history(&self, session_id: Uuid) -> Result<Vec<AuditLog>> {
        self.require_session(session_id).await?;
        self.storage.session_history(session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewUser, TimeSlot};
    use crate::services::memory::MemoryStorage;
    use chrono::NaiveDate;

    async fn setup() -> (Arc<SessionService>, User, User, User) {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let teacher = storage
            .create_user(User::new(&NewUser {
                username: "teacher1".to_string(),
                name: "M. MARTIN".to_string(),
                role: Role::Teacher,
                initials: Some("MM".to_string()),
                password: None,
                in_pacte: false,
            }))
            .await
            .unwrap();
        let secretary = storage
            .create_user(User::new(&NewUser {
                username: "secretary".to_string(),
                name: "Mme LAURENT".to_string(),
                role: Role::Secretary,
                initials: None,
                password: None,
                in_pacte: false,
            }))
            .await
            .unwrap();
        let admin = storage
            .create_user(User::new(&NewUser {
                username: "admin".to_string(),
                name: "Admin".to_string(),
                role: Role::Admin,
                initials: None,
                password: None,
                in_pacte: false,
            }))
            .await
            .unwrap();

        (
            Arc::new(SessionService::new(storage)),
            teacher,
            secretary,
            admin,
        )
    }

    fn new_session_data(teacher_id: Uuid) -> NewSession {
        NewSession {
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            time_slot: TimeSlot::M2,
            teacher_id,
            session_type: SessionType::Rcd,
            replaced_teacher_name: Some("Mme DURAND".to_string()),
            class_name: Some("5eB".to_string()),
            subject: Some("Mathématiques".to_string()),
            student_count: None,
            grade_level: None,
            comment: None,
        }
    }

    #[tokio::test]
    async fn test_submission_appends_audit() {
        let (service, teacher, _, _) = setup().await;
        let session = service.submit(&new_session_data(teacher.id)).await.unwrap();

        let history = service.history(session.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].previous_status, None);
        assert_eq!(history[0].new_status, SessionStatus::Submitted);
        assert_eq!(history[0].actor_id, teacher.id);
    }

    #[tokio::test]
    async fn test_transition_updates_and_audits() {
        let (service, teacher, secretary, _) = setup().await;
        let session = service.submit(&new_session_data(teacher.id)).await.unwrap();

        let updated = service
            .change_status(session.id, SessionStatus::Reviewed, secretary.id, None)
            .await
            .unwrap();

        assert_eq!(updated.status, SessionStatus::Reviewed);
        assert_eq!(updated.updated_by, Some(secretary.id));

        let history = service.history(session.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].previous_status, Some(SessionStatus::Submitted));
        assert_eq!(history[1].new_status, SessionStatus::Reviewed);
        assert_eq!(history[1].actor_role, Role::Secretary);
    }

    #[tokio::test]
    async fn test_failed_transition_leaves_no_trace() {
        let (service, teacher, secretary, _) = setup().await;
        let session = service.submit(&new_session_data(teacher.id)).await.unwrap();

        let err = service
            .change_status(session.id, SessionStatus::Paid, secretary.id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));

        let unchanged = service.get(session.id).await.unwrap();
        assert_eq!(unchanged.status, SessionStatus::Submitted);
        assert_eq!(service.history(session.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_session_and_actor() {
        let (service, teacher, _, _) = setup().await;
        let session = service.submit(&new_session_data(teacher.id)).await.unwrap();

        let err = service
            .change_status(Uuid::new_v4(), SessionStatus::Reviewed, teacher.id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = service
            .change_status(session.id, SessionStatus::Reviewed, Uuid::new_v4(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_non_teacher_cannot_submit() {
        let (service, _, secretary, _) = setup().await;
        let err = service
            .submit(&new_session_data(secretary.id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_reclassification_keeps_original_type() {
        let (service, teacher, secretary, _) = setup().await;
        let session = service.submit(&new_session_data(teacher.id)).await.unwrap();

        let updated = service
            .reclassify(session.id, SessionType::Hse, secretary.id)
            .await
            .unwrap();

        assert_eq!(updated.session_type, SessionType::Hse);
        assert_eq!(updated.original_type, SessionType::Rcd);
        assert!(updated.was_reclassified());

        // Un enseignant ne requalifie pas
        let err = service
            .reclassify(session.id, SessionType::Autre, teacher.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_lock_registry_pruned_on_terminal_state() {
        let (service, teacher, secretary, admin) = setup().await;
        let session = service.submit(&new_session_data(teacher.id)).await.unwrap();

        service
            .change_status(session.id, SessionStatus::Reviewed, secretary.id, None)
            .await
            .unwrap();
        assert!(service.locks.lock().await.contains_key(&session.id));

        service
            .change_status(session.id, SessionStatus::Validated, secretary.id, None)
            .await
            .unwrap();
        service
            .change_status(session.id, SessionStatus::ReadyForPayment, secretary.id, None)
            .await
            .unwrap();
        service
            .change_status(session.id, SessionStatus::Paid, admin.id, None)
            .await
            .unwrap();

        // PAID est terminal : le verrou de la session est libéré
        assert!(!service.locks.lock().await.contains_key(&session.id));
    }

    #[tokio::test]
    async fn test_concurrent_transitions_are_serialized() {
        let (service, teacher, secretary, _) = setup().await;
        let session = service.submit(&new_session_data(teacher.id)).await.unwrap();

        // Deux transitions concurrentes depuis SUBMITTED : une seule
        // doit gagner, l'autre échoue sur l'arête devenue illégale.
        let s1 = service.clone();
        let s2 = service.clone();
        let (id, actor) = (session.id, secretary.id);
        let (a, b) = tokio::join!(
            s1.change_status(id, SessionStatus::Reviewed, actor, None),
            s2.change_status(id, SessionStatus::Incomplete, actor, None),
        );

        assert!(a.is_ok() != b.is_ok());
        let final_state = service.get(session.id).await.unwrap();
        assert!(matches!(
            final_state.status,
            SessionStatus::Reviewed | SessionStatus::Incomplete
        ));
        // Déclaration + exactement une transition
        assert_eq!(service.history(session.id).await.unwrap().len(), 2);
    }
}
