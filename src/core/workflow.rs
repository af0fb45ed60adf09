//! Circuit de validation des sessions.
//!
//! La machine à états est entièrement décrite par deux tables :
//! les transitions autorisées (`allowed_targets`) et les rôles habilités
//! par arête (`authorized_roles`). Toute mutation de statut passe par
//! `apply_transition`, qui vérifie d'abord l'arête puis l'habilitation
//! avant de toucher la session.

use chrono::Utc;

use crate::models::{Role, Session, SessionStatus, User};
use crate::utils::error::{AppError, Result};

/// Statuts atteignables depuis un statut donné
pub fn allowed_targets(from: SessionStatus) -> &'static [SessionStatus] {
    use SessionStatus::*;
    match from {
        Submitted => &[Incomplete, Reviewed],
        Incomplete => &[Submitted],
        Reviewed => &[Validated, Rejected],
        Validated => &[ReadyForPayment],
        ReadyForPayment => &[Paid],
        // États absorbants
        Rejected | Paid => &[],
    }
}

/// Vérifie qu'une arête figure dans la table des transitions
pub fn is_allowed(from: SessionStatus, to: SessionStatus) -> bool {
    allowed_targets(from).contains(&to)
}

/// Rôles habilités pour une arête donnée.
/// Retourne une tranche vide pour une arête hors table.
pub fn authorized_roles(from: SessionStatus, to: SessionStatus) -> &'static [Role] {
    use Role::*;
    use SessionStatus::*;
    match (from, to) {
        // Examen initial par le secrétariat ou la direction
        (Submitted, Reviewed) | (Submitted, Incomplete) => &[Secretary, Principal, Admin],
        // L'enseignant complète et re-soumet sa déclaration
        (Incomplete, Submitted) => &[Teacher, Admin],
        (Reviewed, Validated) => &[Secretary, Principal, Admin],
        // Seule la direction peut refuser
        (Reviewed, Rejected) => &[Principal, Admin],
        (Validated, ReadyForPayment) => &[Secretary, Principal, Admin],
        // La mise en paiement effective est réservée à l'administrateur
        (ReadyForPayment, Paid) => &[Admin],
        _ => &[],
    }
}

/// Vérifie qu'une transition est légale pour cet acteur, sans l'appliquer.
///
/// L'arête est contrôlée avant l'habilitation : demander un statut
/// inatteignable est une `InvalidTransition` quel que soit le rôle.
pub fn validate_transition(session: &Session, target: SessionStatus, actor: &User) -> Result<()> {
    if !is_allowed(session.status, target) {
        return Err(AppError::InvalidTransition(format!(
            "{} -> {} n'est pas une transition autorisée",
            session.status.as_str(),
            target.as_str()
        )));
    }

    if !authorized_roles(session.status, target).contains(&actor.role) {
        return Err(AppError::Unauthorized(format!(
            "le rôle {:?} ne peut pas effectuer {} -> {}",
            actor.role,
            session.status.as_str(),
            target.as_str()
        )));
    }

    // Un enseignant ne re-soumet que ses propres déclarations
    if actor.role == Role::Teacher && session.teacher_id != actor.id {
        return Err(AppError::Unauthorized(
            "un enseignant ne peut re-soumettre que ses propres sessions".to_string(),
        ));
    }

    Ok(())
}

/// Applique une transition validée : statut, date et auteur de modification.
/// La session n'est jamais modifiée si la transition est refusée.
pub fn apply_transition(session: &mut Session, target: SessionStatus, actor: &User) -> Result<()> {
    validate_transition(session, target, actor)?;

    session.status = target;
    session.updated_at = Utc::now();
    session.updated_by = Some(actor.id);
    Ok(())
}
