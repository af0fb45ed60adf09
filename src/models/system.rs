use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

use crate::models::session::SessionStatus;
use crate::models::user::Role;

/// Paramètre de configuration global de l'application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSetting {
    /// ID unique
    pub id: Uuid,

    /// Clé du paramètre (unique)
    pub key: String,

    /// Valeur (JSON libre)
    pub value: serde_json::Value,

    /// Description du paramètre
    pub description: Option<String>,

    /// Date de dernière modification
    pub updated_at: DateTime<Utc>,

    /// Auteur de la dernière modification
    pub updated_by: Option<Uuid>,
}

/// Mise à jour d'un paramètre système
#[derive(Debug, Clone, Deserialize)]
pub struct SettingUpdate {
    pub value: serde_json::Value,
    pub description: Option<String>,
    pub actor_id: Option<Uuid>,
}

/// Entrée d'audit d'une transition de statut.
/// Journal en append-only : une ligne par transition réussie,
/// jamais modifiée ni supprimée.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    /// ID unique
    pub id: Uuid,

    /// Session concernée
    pub session_id: Uuid,

    /// État avant transition (None pour la déclaration initiale)
    pub previous_status: Option<SessionStatus>,

    /// État après transition
    pub new_status: SessionStatus,

    /// Utilisateur à l'origine de la transition
    pub actor_id: Uuid,

    /// Rôle de l'acteur au moment de la transition
    pub actor_role: Role,

    /// Commentaire éventuel
    pub comment: Option<String>,

    /// Date de la transition
    pub created_at: DateTime<Utc>,
}

impl SystemSetting {
    pub fn new(key: String, value: serde_json::Value, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            key,
            value,
            description,
            updated_at: Utc::now(),
            updated_by: None,
        }
    }
}

impl AuditLog {
    /// Crée une entrée d'audit pour une transition
    pub fn new(
        session_id: Uuid,
        previous_status: Option<SessionStatus>,
        new_status: SessionStatus,
        actor_id: Uuid,
        actor_role: Role,
        comment: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            previous_status,
            new_status,
            actor_id,
            actor_role,
            comment,
            created_at: Utc::now(),
        }
    }
}
