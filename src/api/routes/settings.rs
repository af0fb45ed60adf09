// api/routes/settings.rs
//! Paramètres de configuration globaux.

use actix_web::{get, put, web, HttpResponse};
use chrono::Utc;

use crate::models::{SettingUpdate, SystemSetting};
use crate::services::storage::Storage;
use crate::utils::error::{AppError, Result};

#[get("/settings")]
pub async fn list_settings(storage: web::Data<dyn Storage>) -> Result<HttpResponse> {
    let settings = storage.list_settings().await?;
    Ok(HttpResponse::Ok().json(settings))
}

#[get("/settings/{key}")]
pub async fn get_setting(
    path: web::Path<String>,
    storage: web::Data<dyn Storage>,
) -> Result<HttpResponse> {
    let key = path.into_inner();
    let setting = storage
        .get_setting(&key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("paramètre '{}' inconnu", key)))?;
    Ok(HttpResponse::Ok().json(setting))
}

/// Crée ou remplace un paramètre, avec traçage de l'auteur
#[put("/settings/{key}")]
pub async fn put_setting(
    path: web::Path<String>,
    request: web::Json<SettingUpdate>,
    storage: web::Data<dyn Storage>,
) -> Result<HttpResponse> {
    let key = path.into_inner();
    let request = request.into_inner();

    let mut setting = storage
        .get_setting(&key)
        .await?
        .unwrap_or_else(|| SystemSetting::new(key.clone(), request.value.clone(), None));

    setting.value = request.value;
    if request.description.is_some() {
        setting.description = request.description;
    }
    setting.updated_at = Utc::now();
    setting.updated_by = request.actor_id;

    let setting = storage.upsert_setting(setting).await?;
    Ok(HttpResponse::Ok().json(setting))
}
