// utils/config.rs
use crate::utils::error::{AppError, Result};
use dotenv::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Environnement et serveur
    pub run_mode: String,
    pub server_host: String,
    pub server_port: u16,
    pub workers: usize,
    pub log_level: String,
    pub log_format: String,

    // CORS
    pub cors_allowed_origin: Option<String>,

    // Documentation statique
    pub docs_dir: String,

    // Données de démonstration
    pub seed_demo_data: bool,
}

impl Config {
    /// Charger la configuration depuis les variables d'environnement
    pub fn from_env() -> Result<Self> {
        // Charger le fichier .env si présent
        let _ = dotenv().ok();

        let config = Config {
            // Environnement et serveur
            run_mode: env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| AppError::Validation("SERVER_PORT must be a number".to_string()))?,
            workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .map_err(|_| AppError::Validation("WORKERS must be a number".to_string()))?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),

            // CORS
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok(),

            // Documentation statique
            docs_dir: env::var("DOCS_DIR").unwrap_or_else(|_| "./docs".to_string()),

            // Données de démonstration
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .map_err(|_| AppError::Validation("SEED_DEMO_DATA must be true or false".to_string()))?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Valide les paramètres critiques
    fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(AppError::Validation(format!(
                "Port invalide: {}",
                self.server_port
            )));
        }

        if self.workers == 0 {
            return Err(AppError::Validation(
                "WORKERS doit être supérieur à zéro".to_string(),
            ));
        }

        Ok(())
    }
}
