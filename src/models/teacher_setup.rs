use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// Configuration individuelle d'un enseignant.
/// Extension un-pour-un de l'utilisateur, modifiable par l'enseignant
/// lui-même ou par un administrateur.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherSetup {
    /// ID de l'enseignant concerné
    pub teacher_id: Uuid,

    /// Participation au dispositif Pacte
    pub in_pacte: bool,

    /// Signature enregistrée (data-URL d'image)
    pub signature: Option<String>,

    /// Date de dernière modification
    pub updated_at: DateTime<Utc>,
}

/// Mise à jour partielle d'une configuration enseignant
#[derive(Debug, Clone, Deserialize)]
pub struct TeacherSetupUpdate {
    pub in_pacte: Option<bool>,
    pub signature: Option<String>,
}

impl TeacherSetup {
    /// Configuration par défaut d'un enseignant
    pub fn new(teacher_id: Uuid) -> Self {
        Self {
            teacher_id,
            in_pacte: false,
            signature: None,
            updated_at: Utc::now(),
        }
    }

    /// Applique une mise à jour partielle
    pub fn apply(&mut self, update: &TeacherSetupUpdate) {
        if let Some(in_pacte) = update.in_pacte {
            self.in_pacte = in_pacte;
        }
        if let Some(signature) = &update.signature {
            self.signature = Some(signature.clone());
        }
        self.updated_at = Utc::now();
    }
}
