// core/user_service.rs
//! Annuaire des utilisateurs : lecture pour l'affichage, création de comptes.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::{NewUser, User};
use crate::services::storage::Storage;
use crate::utils::error::{AppError, Result};

pub struct UserService {
    storage: Arc<dyn Storage>,
}

impl UserService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Tous les utilisateurs, dans l'ordre d'insertion.
    /// Un échec du stockage remonte tel quel (ServiceUnavailable),
    /// jamais converti en liste vide.
    pub async fn list(&self) -> Result<Vec<User>> {
        self.storage.list_users().await
    }

    pub async fn get(&self, id: Uuid) -> Result<User> {
        self.storage
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("utilisateur {} inconnu", id)))
    }

    /// Crée un compte. L'unicité de l'identifiant est garantie par le
    /// stockage (Conflict en cas de doublon).
    pub async fn create(&self, data: &NewUser) -> Result<User> {
        let user = User::new(data);
        let user = self.storage.create_user(user).await?;
        tracing::info!(username = %user.username, role = ?user.role, "utilisateur créé");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::services::memory::MemoryStorage;

    fn data(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            name: username.to_uppercase(),
            role: Role::Teacher,
            initials: None,
            password: None,
            in_pacte: false,
        }
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let service = UserService::new(Arc::new(MemoryStorage::new()));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = UserService::new(Arc::new(MemoryStorage::new()));
        let user = service.create(&data("mmartin")).await.unwrap();

        let fetched = service.get(user.id).await.unwrap();
        assert_eq!(fetched.username, "mmartin");

        let err = service.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let service = UserService::new(Arc::new(MemoryStorage::new()));
        service.create(&data("mmartin")).await.unwrap();
        let err = service.create(&data("mmartin")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
