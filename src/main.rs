use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionType};
use actix_web::{get, middleware, web, App, HttpServer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use supchaissac_backend::core::{SessionService, UserService};
use supchaissac_backend::services::seed::seed_demo;
use supchaissac_backend::services::{MemoryStorage, Storage};
use supchaissac_backend::utils::error::AppError;
use supchaissac_backend::utils::Config;
use supchaissac_backend::{api, NAME, VERSION};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Chargement de la configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("configuration invalide: {e}"))?;

    // Initialisation du logging
    setup_tracing(&config);
    info!("🚀 Démarrage de {} v{}", NAME, VERSION);
    info!("🔧 Mode: {}", config.run_mode);

    // Initialisation du stockage (en mémoire pour l'instant, derrière le
    // trait Storage pour permettre un vrai backend plus tard)
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    if config.seed_demo_data {
        seed_demo(storage.as_ref())
            .await
            .map_err(|e| anyhow::anyhow!("échec du seed de démonstration: {e}"))?;
    }

    let user_service = web::Data::new(UserService::new(storage.clone()));
    let session_service = web::Data::new(SessionService::new(storage.clone()));
    let storage_data: web::Data<dyn Storage> = web::Data::from(storage);
    let config_data = web::Data::new(config.clone());

    let bind_addr = format!("{}:{}", config.server_host, config.server_port);
    let allowed_origin = config.cors_allowed_origin.clone();
    let workers = config.workers;

    // Configuration du serveur Actix-Web
    let server = HttpServer::new(move || {
        let cors = match &allowed_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header()
                .max_age(3600),
            None => Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600),
        };

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .app_data(user_service.clone())
            .app_data(session_service.clone())
            .app_data(storage_data.clone())
            .app_data(config_data.clone())
            .configure(api::config)
            .service(view_documentation)
            .service(download_documentation)
    })
    .bind(&bind_addr)?
    .workers(workers)
    .shutdown_timeout(10);

    info!("✅ Backend démarré avec succès!");
    info!("🔗 API disponible sur http://{}", bind_addr);

    server.run().await?;
    Ok(())
}

const DOCUMENTATION_FILE: &str = "guide-utilisateur.pdf";

fn documentation_path(config: &Config) -> Result<PathBuf, AppError> {
    let path = PathBuf::from(&config.docs_dir).join(DOCUMENTATION_FILE);
    if !path.exists() {
        return Err(AppError::NotFound(
            "la documentation n'est pas installée sur ce serveur".to_string(),
        ));
    }
    Ok(path)
}

/// Consultation de la documentation dans le navigateur
#[get("/view-documentation")]
async fn view_documentation(config: web::Data<Config>) -> Result<NamedFile, AppError> {
    let path = documentation_path(&config)?;
    let file = NamedFile::open_async(path)
        .await
        .map_err(|e| AppError::ServiceUnavailable(e.to_string()))?;
    Ok(file.set_content_disposition(ContentDisposition {
        disposition: DispositionType::Inline,
        parameters: vec![],
    }))
}

/// Téléchargement de la documentation
#[get("/download-documentation")]
async fn download_documentation(config: web::Data<Config>) -> Result<NamedFile, AppError> {
    let path = documentation_path(&config)?;
    let file = NamedFile::open_async(path)
        .await
        .map_err(|e| AppError::ServiceUnavailable(e.to_string()))?;
    Ok(file.set_content_disposition(ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![],
    }))
}

/// Configure le tracing pour le logging structuré
fn setup_tracing(config: &Config) {
    let log_level: tracing::Level = config
        .log_level
        .parse()
        .unwrap_or(tracing::Level::INFO);

    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with(if config.log_format == "json" {
            Box::new(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_span_list(true),
            ) as Box<dyn tracing_subscriber::Layer<_> + Send + Sync>
        } else {
            Box::new(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_line_number(true)
                    .with_file(true),
            ) as Box<dyn tracing_subscriber::Layer<_> + Send + Sync>
        });

    subscriber.init();
}
