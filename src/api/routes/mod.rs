use actix_web::web;

pub mod sessions;
pub mod settings;
pub mod teacher_setups;
pub mod users;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Annuaire des utilisateurs
            .service(users::list_users)
            .service(users::get_user)
            .service(users::create_user)
            // Sessions et circuit de validation
            .service(sessions::create_session)
            .service(sessions::list_sessions)
            .service(sessions::get_session)
            .service(sessions::change_status)
            .service(sessions::reclassify_session)
            .service(sessions::session_history)
            // Configurations enseignants
            .service(teacher_setups::get_teacher_setup)
            .service(teacher_setups::update_teacher_setup)
            // Paramètres système
            .service(settings::list_settings)
            .service(settings::get_setting)
            .service(settings::put_setting),
    );

    // Routes publiques
    cfg.service(web::resource("/health").route(web::get().to(health_check)));
}

/// Endpoint de santé pour les probes
async fn health_check() -> impl actix_web::Responder {
    actix_web::HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
