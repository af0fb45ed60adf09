use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use validator::Validate;

/// Rôle d'un utilisateur dans l'établissement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Teacher,
    Secretary,
    Principal,
    Admin,
}

impl Role {
    /// Les rôles habilités à examiner une session (secrétariat et direction)
    pub fn is_reviewer(&self) -> bool {
        matches!(self, Role::Secretary | Role::Principal | Role::Admin)
    }
}

/// Représente un utilisateur du système
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Identifiant unique de l'utilisateur (UUID)
    pub id: Uuid,

    /// Identifiant de connexion (unique)
    pub username: String,

    /// Nom affiché (ex: "M. MARTIN")
    pub name: String,

    /// Rôle - immuable après création
    pub role: Role,

    /// Initiales utilisées sur les documents officiels
    pub initials: Option<String>,

    /// Signature de l'utilisateur (data-URL d'image)
    pub signature: Option<String>,

    /// Participation au dispositif Pacte
    pub in_pacte: bool,

    /// Hash du mot de passe (jamais sérialisé vers le client)
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    /// Date de création du compte
    pub created_at: DateTime<Utc>,
}

/// Données requises pour créer un nouvel utilisateur
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 3, max = 50, message = "L'identifiant doit faire entre 3 et 50 caractères"))]
    pub username: String,

    #[validate(length(min = 1, max = 100, message = "Le nom doit faire entre 1 et 100 caractères"))]
    pub name: String,

    pub role: Role,

    #[validate(length(max = 4, message = "Les initiales sont limitées à 4 caractères"))]
    pub initials: Option<String>,

    #[validate(length(min = 8, message = "Le mot de passe doit contenir au moins 8 caractères"))]
    pub password: Option<String>,

    #[serde(default)]
    pub in_pacte: bool,
}

impl User {
    /// Crée un nouvel utilisateur à partir des données d'inscription
    pub fn new(data: &NewUser) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: data.username.clone(),
            name: data.name.clone(),
            role: data.role,
            initials: data.initials.clone(),
            signature: None,
            in_pacte: data.in_pacte,
            password_hash: data.password.as_deref().map(Self::hash_password),
            created_at: Utc::now(),
        }
    }

    /// Hash un mot de passe avec Argon2
    pub fn hash_password(password: &str) -> String {
        use argon2::{
            password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
            Argon2,
        };

        let argon2 = Argon2::default();
        let salt = SaltString::generate(&mut OsRng);
        argon2
            .hash_password(password.as_bytes(), &salt)
            .expect("Erreur lors du hashage du mot de passe")
            .to_string()
    }

    /// Vérifie si un mot de passe correspond au hash stocké
    pub fn verify_password(&self, password: &str) -> bool {
        if let Some(hash) = &self.password_hash {
            use argon2::{
                password_hash::{PasswordHash, PasswordVerifier},
                Argon2,
            };

            let argon2 = Argon2::default();
            match PasswordHash::new(hash) {
                Ok(parsed_hash) => argon2
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
                Err(_) => false,
            }
        } else {
            false // Comptes sans mot de passe local
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher_data() -> NewUser {
        NewUser {
            username: "mmartin".to_string(),
            name: "M. MARTIN".to_string(),
            role: Role::Teacher,
            initials: Some("MM".to_string()),
            password: Some("motdepasse123".to_string()),
            in_pacte: false,
        }
    }

    #[test]
    fn test_password_never_serialized() {
        let user = User::new(&teacher_data());
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "mmartin");
        assert_eq!(json["role"], "TEACHER");
    }

    #[test]
    fn test_password_verification() {
        let user = User::new(&teacher_data());
        assert!(user.verify_password("motdepasse123"));
        assert!(!user.verify_password("mauvais"));
    }

    #[test]
    fn test_reviewer_roles() {
        assert!(!Role::Teacher.is_reviewer());
        assert!(Role::Secretary.is_reviewer());
        assert!(Role::Principal.is_reviewer());
        assert!(Role::Admin.is_reviewer());
    }
}
