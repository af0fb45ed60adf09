// services/seed.rs
//! Jeu de données de démonstration, activé par `SEED_DEMO_DATA`.

use serde_json::json;

use crate::models::{NewUser, Role, SystemSetting, TeacherSetup, User};
use crate::services::storage::Storage;
use crate::utils::error::Result;

/// Insère les comptes et paramètres de démonstration.
/// Idempotent à l'échelle d'un démarrage : le stockage mémoire part vide.
pub async fn seed_demo(storage: &dyn Storage) -> Result<()> {
    let accounts = [
        ("teacher1", "M. MARTIN", Role::Teacher, Some("MM"), false),
        ("teacher2", "Mme DUBOIS", Role::Teacher, Some("MD"), true),
        ("teacher3", "M. BERNARD", Role::Teacher, Some("MB"), true),
        ("secretary", "Mme LAURENT", Role::Secretary, None, false),
        ("principal", "M. ROBERT", Role::Principal, None, false),
        ("admin", "Admin", Role::Admin, None, false),
    ];

    for (username, name, role, initials, in_pacte) in accounts {
        let user = storage
            .create_user(User::new(&NewUser {
                username: username.to_string(),
                name: name.to_string(),
                role,
                initials: initials.map(|i| i.to_string()),
                password: Some(format!("{}-password", username)),
                in_pacte,
            }))
            .await?;

        if role == Role::Teacher {
            let mut setup = TeacherSetup::new(user.id);
            setup.in_pacte = in_pacte;
            storage.upsert_teacher_setup(setup).await?;
        }
    }

    storage
        .upsert_setting(SystemSetting::new(
            "school_year".to_string(),
            json!("2024-2025"),
            Some("Année scolaire courante".to_string()),
        ))
        .await?;

    storage
        .upsert_setting(SystemSetting::new(
            "hse_hourly_rate".to_string(),
            json!(45.5),
            Some("Taux horaire HSE en euros".to_string()),
        ))
        .await?;

    tracing::info!("Données de démonstration insérées");
    Ok(())
}
