use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::dto::ApiResponse;
use crate::models::user::UserResponse;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};
use crate::utils::validation::validate_not_empty;

pub struct AuthController {
    repository: UserRepository,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn register(
        &self,
        jwt_config: &JwtConfig,
        request: RegisterRequest,
    ) -> AppResult<ApiResponse<AuthResponse>> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();
        if self.repository.email_exists(&email).await? {
            return Err(AppError::Conflict(
                "Este email já está cadastrado".to_string(),
            ));
        }

        let password_hash =
            hash(&request.password, DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))?;

        let user = self
            .repository
            .create(request.full_name.trim(), &email, &password_hash)
            .await?;

        let token = generate_token(user.id, &user.email, jwt_config)?;

        Ok(ApiResponse::success_with_message(
            AuthResponse {
                token,
                user: user.into(),
            },
            "Conta criada com sucesso!".to_string(),
        ))
    }

    pub async fn login(
        &self,
        jwt_config: &JwtConfig,
        request: LoginRequest,
    ) -> AppResult<ApiResponse<AuthResponse>> {
        validate_not_empty(&request.email)
            .and(validate_not_empty(&request.password))
            .map_err(|_| AppError::BadRequest("Informe email e senha".to_string()))?;

        let user = self
            .repository
            .find_by_email(&request.email.trim().to_lowercase())
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciais inválidas".to_string()))?;

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;
        if !valid {
            return Err(AppError::Unauthorized("Credenciais inválidas".to_string()));
        }

        let token = generate_token(user.id, &user.email, jwt_config)?;

        Ok(ApiResponse::success(AuthResponse {
            token,
            user: user.into(),
        }))
    }

    pub async fn me(&self, user_id: Uuid) -> AppResult<UserResponse> {
        self.repository
            .find_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("Usuário não encontrado".to_string()))
    }
}
