// api/routes/teacher_setups.rs
//! Configuration individuelle des enseignants (Pacte, signature).

use actix_web::{get, put, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{Role, TeacherSetup, TeacherSetupUpdate};
use crate::services::storage::Storage;
use crate::utils::error::{AppError, Result};

#[derive(Debug, Deserialize)]
pub struct SetupUpdateRequest {
    pub in_pacte: Option<bool>,
    pub signature: Option<String>,
    pub actor_id: Uuid,
}

/// Configuration d'un enseignant ; valeurs par défaut si rien n'est enregistré
#[get("/teacher-setups/{teacher_id}")]
pub async fn get_teacher_setup(
    path: web::Path<Uuid>,
    storage: web::Data<dyn Storage>,
) -> Result<HttpResponse> {
    let teacher_id = path.into_inner();
    let teacher = storage
        .get_user(teacher_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("utilisateur {} inconnu", teacher_id)))?;
    if teacher.role != Role::Teacher {
        return Err(AppError::Validation(format!(
            "{} n'est pas un enseignant",
            teacher.username
        )));
    }

    let setup = storage
        .get_teacher_setup(teacher_id)
        .await?
        .unwrap_or_else(|| TeacherSetup::new(teacher_id));
    Ok(HttpResponse::Ok().json(setup))
}

/// Mise à jour par l'enseignant lui-même ou par un administrateur
#[put("/teacher-setups/{teacher_id}")]
pub async fn update_teacher_setup(
    path: web::Path<Uuid>,
    request: web::Json<SetupUpdateRequest>,
    storage: web::Data<dyn Storage>,
) -> Result<HttpResponse> {
    let teacher_id = path.into_inner();
    let actor = storage
        .get_user(request.actor_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("utilisateur {} inconnu", request.actor_id)))?;

    if actor.id != teacher_id && actor.role != Role::Admin {
        return Err(AppError::Unauthorized(
            "seul l'enseignant concerné ou un administrateur peut modifier cette configuration"
                .to_string(),
        ));
    }

    let mut setup = storage
        .get_teacher_setup(teacher_id)
        .await?
        .unwrap_or_else(|| TeacherSetup::new(teacher_id));
    setup.apply(&TeacherSetupUpdate {
        in_pacte: request.in_pacte,
        signature: request.signature.clone(),
    });

    let setup = storage.upsert_teacher_setup(setup).await?;
    Ok(HttpResponse::Ok().json(setup))
}
