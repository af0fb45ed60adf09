// api/routes/users.rs
//! Annuaire des utilisateurs.

use actix_web::{get, post, web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::core::UserService;
use crate::models::NewUser;
use crate::utils::error::Result;

/// Liste tous les utilisateurs, dans l'ordre d'insertion.
/// Retourne `[]` quand l'annuaire est vide ; le hash du mot de passe
/// n'est jamais sérialisé.
#[get("/users")]
pub async fn list_users(users: web::Data<UserService>) -> Result<HttpResponse> {
    let all = users.list().await?;
    Ok(HttpResponse::Ok().json(all))
}

/// Détail d'un utilisateur
#[get("/users/{id}")]
pub async fn get_user(
    path: web::Path<Uuid>,
    users: web::Data<UserService>,
) -> Result<HttpResponse> {
    let user = users.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Création d'un compte
#[post("/users")]
pub async fn create_user(
    request: web::Json<NewUser>,
    users: web::Data<UserService>,
) -> Result<HttpResponse> {
    request.validate()?;
    let user = users.create(&request).await?;
    Ok(HttpResponse::Created().json(user))
}
