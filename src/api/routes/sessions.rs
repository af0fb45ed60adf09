// api/routes/sessions.rs
//! Déclaration et suivi des sessions de remplacement.

use actix_web::{get, patch, post, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::core::SessionService;
use crate::models::{NewSession, SessionStatus, SessionType};
use crate::services::storage::SessionFilter;
use crate::utils::error::Result;

/// Corps d'une demande de transition de statut
#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub status: SessionStatus,
    pub actor_id: Uuid,
    pub comment: Option<String>,
}

/// Corps d'une demande de requalification
#[derive(Debug, Deserialize)]
pub struct ReclassifyRequest {
    pub session_type: SessionType,
    pub actor_id: Uuid,
}

/// Déclaration d'une session par un enseignant.
/// Le statut initial est toujours SUBMITTED.
#[post("/sessions")]
pub async fn create_session(
    request: web::Json<NewSession>,
    sessions: web::Data<SessionService>,
) -> Result<HttpResponse> {
    request.validate()?;
    let session = sessions.submit(&request).await?;
    Ok(HttpResponse::Created().json(session))
}

/// Liste des sessions, filtrable par statut et par enseignant
#[get("/sessions")]
pub async fn list_sessions(
    query: web::Query<SessionFilter>,
    sessions: web::Data<SessionService>,
) -> Result<HttpResponse> {
    let found = sessions.list(&query).await?;
    Ok(HttpResponse::Ok().json(found))
}

/// Détail d'une session
#[get("/sessions/{id}")]
pub async fn get_session(
    path: web::Path<Uuid>,
    sessions: web::Data<SessionService>,
) -> Result<HttpResponse> {
    let session = sessions.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(session))
}

/// Transition de statut.
/// Le rôle de l'acteur est résolu depuis l'annuaire, pas depuis la requête.
#[patch("/sessions/{id}/status")]
pub async fn change_status(
    path: web::Path<Uuid>,
    request: web::Json<StatusChangeRequest>,
    sessions: web::Data<SessionService>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    let session = sessions
        .change_status(
            path.into_inner(),
            request.status,
            request.actor_id,
            request.comment,
        )
        .await?;
    Ok(HttpResponse::Ok().json(session))
}

/// Requalification du type par un examinateur (le type d'origine est conservé)
#[patch("/sessions/{id}/type")]
pub async fn reclassify_session(
    path: web::Path<Uuid>,
    request: web::Json<ReclassifyRequest>,
    sessions: web::Data<SessionService>,
) -> Result<HttpResponse> {
    let session = sessions
        .reclassify(path.into_inner(), request.session_type, request.actor_id)
        .await?;
    Ok(HttpResponse::Ok().json(session))
}

/// Journal d'audit d'une session
#[get("/sessions/{id}/history")]
pub async fn session_history(
    path: web::Path<Uuid>,
    sessions: web::Data<SessionService>,
) -> Result<HttpResponse> {
    let history = sessions.history(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(history))
}
