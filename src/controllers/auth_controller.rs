//! Controller de autenticación
//!
//! Login con verificación bcrypt y emisión de JWT.

use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, UserResponse};
use crate::middleware::auth::generate_jwt_token;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{validation_error, AppError};

pub struct AuthController {
    repository: UserRepository,
}

impl AuthController {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn login(
        &self,
        request: LoginRequest,
        config: &EnvironmentConfig,
    ) -> Result<LoginResponse, AppError> {
        let username = request
            .username
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| validation_error("username", "username is required"))?;
        let password = request
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| validation_error("password", "password is required"))?;

        // Misma respuesta para usuario inexistente y password incorrecto
        let user = self
            .repository
            .find_by_username(&username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let valid = bcrypt::verify(&password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;
        if !valid {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = generate_jwt_token(&user, config)?;

        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    pub async fn me(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }
}
