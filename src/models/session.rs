use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use validator::Validate;

/// État d'une session dans le circuit de validation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Submitted,       // Déclarée par l'enseignant
    Incomplete,      // Renvoyée pour complément
    Reviewed,        // Examinée par le secrétariat
    Validated,       // Validée par la direction
    Rejected,        // Refusée
    ReadyForPayment, // Transmise pour mise en paiement
    Paid,            // Payée
}

impl SessionStatus {
    /// REJECTED et PAID sont des états absorbants : plus aucune transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Rejected | SessionStatus::Paid)
    }

    /// Nom du statut tel qu'il circule sur le réseau
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Submitted => "SUBMITTED",
            SessionStatus::Incomplete => "INCOMPLETE",
            SessionStatus::Reviewed => "REVIEWED",
            SessionStatus::Validated => "VALIDATED",
            SessionStatus::Rejected => "REJECTED",
            SessionStatus::ReadyForPayment => "READY_FOR_PAYMENT",
            SessionStatus::Paid => "PAID",
        }
    }
}

/// Catégorie de rémunération d'une session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    Rcd,          // Remplacement de courte durée
    DevoirsFaits, // Dispositif "Devoirs faits"
    Hse,          // Heure supplémentaire effective
    Autre,
}

/// Créneau horaire d'une session (demi-journées M=matin, S=soir)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeSlot {
    M1,
    M2,
    M3,
    M4,
    S1,
    S2,
    S3,
    S4,
}

/// Une session de remplacement ou d'heures supplémentaires
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// ID unique de la session
    pub id: Uuid,

    /// Date de la session
    pub date: NaiveDate,

    /// Créneau horaire
    pub time_slot: TimeSlot,

    /// ID de l'enseignant déclarant
    pub teacher_id: Uuid,

    /// Nom de l'enseignant (dénormalisé pour l'affichage)
    pub teacher_name: String,

    /// Type courant - peut être requalifié par un examinateur
    pub session_type: SessionType,

    /// Type déclaré à la création, jamais modifié ensuite
    pub original_type: SessionType,

    /// État courant dans le circuit de validation
    pub status: SessionStatus,

    /// Enseignant remplacé (RCD uniquement)
    pub replaced_teacher_name: Option<String>,

    /// Classe concernée
    pub class_name: Option<String>,

    /// Matière enseignée
    pub subject: Option<String>,

    /// Nombre d'élèves (Devoirs faits)
    pub student_count: Option<i32>,

    /// Niveau (ex: "6e", "5e")
    pub grade_level: Option<String>,

    /// Commentaire libre
    pub comment: Option<String>,

    /// Date de déclaration
    pub created_at: DateTime<Utc>,

    /// Date de dernière modification
    pub updated_at: DateTime<Utc>,

    /// Auteur de la dernière modification
    pub updated_by: Option<Uuid>,
}

/// Données de déclaration d'une nouvelle session
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewSession {
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub teacher_id: Uuid,
    pub session_type: SessionType,

    #[validate(length(min = 1, max = 100, message = "Le nom de l'enseignant remplacé doit faire entre 1 et 100 caractères"))]
    pub replaced_teacher_name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Le nom de classe doit faire entre 1 et 50 caractères"))]
    pub class_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "La matière doit faire entre 1 et 100 caractères"))]
    pub subject: Option<String>,

    #[validate(range(min = 0, max = 100, message = "Le nombre d'élèves doit être entre 0 et 100"))]
    pub student_count: Option<i32>,

    #[validate(length(max = 20, message = "Le niveau est limité à 20 caractères"))]
    pub grade_level: Option<String>,

    #[validate(length(max = 500, message = "Le commentaire est limité à 500 caractères"))]
    pub comment: Option<String>,
}

impl Session {
    /// Crée une session déclarée par un enseignant.
    /// Le statut initial est toujours SUBMITTED et le type d'origine
    /// est figé au type déclaré.
    pub fn submit(data: &NewSession, teacher_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            date: data.date,
            time_slot: data.time_slot,
            teacher_id: data.teacher_id,
            teacher_name,
            session_type: data.session_type,
            original_type: data.session_type,
            status: SessionStatus::Submitted,
            replaced_teacher_name: data.replaced_teacher_name.clone(),
            class_name: data.class_name.clone(),
            subject: data.subject.clone(),
            student_count: data.student_count,
            grade_level: data.grade_level.clone(),
            comment: data.comment.clone(),
            created_at: now,
            updated_at: now,
            updated_by: Some(data.teacher_id),
        }
    }

    /// Indique si le type a été requalifié depuis la déclaration
    pub fn was_reclassified(&self) -> bool {
        self.session_type != self.original_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_submit_defaults() {
        let teacher_id = Uuid::new_v4();
        let session = Session::submit(&new_session_data(teacher_id), "M. MARTIN".to_string());

        assert_eq!(session.status, SessionStatus::Submitted);
        assert_eq!(session.original_type, SessionType::Rcd);
        assert_eq!(session.updated_by, Some(teacher_id));
        assert!(!session.was_reclassified());
    }

    #[test]
    fn test_terminal_states() {
        assert!(SessionStatus::Rejected.is_terminal());
        assert!(SessionStatus::Paid.is_terminal());
        assert!(!SessionStatus::Submitted.is_terminal());
        assert!(!SessionStatus::ReadyForPayment.is_terminal());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_value(SessionStatus::ReadyForPayment).unwrap();
        assert_eq!(json, "READY_FOR_PAYMENT");
        let json = serde_json::to_value(SessionType::DevoirsFaits).unwrap();
        assert_eq!(json, "DEVOIRS_FAITS");
        let json = serde_json::to_value(TimeSlot::S3).unwrap();
        assert_eq!(json, "S3");
    }
}
