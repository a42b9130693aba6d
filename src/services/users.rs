use crate::{
    auth::{self, user},
    db::DbPool,
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Write-only; never echoed in any response.
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
}

/// Public projection of a user account. The password hash never leaves the
/// service layer.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            active: user.active,
            created_at: user.created_at,
        }
    }
}

/// Service for creating login credentials.
#[derive(Clone)]
pub struct UserService {
    db_pool: Arc<DbPool>,
}

impl UserService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Creates a new user with an argon2-hashed password.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create_user(
        &self,
        request: CreateUserRequest,
    ) -> Result<UserResponse, ServiceError> {
        let db = &*self.db_pool;

        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(request.email.as_str()))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "email '{}' is already registered",
                request.email
            )));
        }

        let password_hash = auth::hash_password(&request.password)
            .map_err(|e| ServiceError::InternalError(e.to_string()))?;

        let now = Utc::now();
        let active = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            email: Set(request.email),
            password_hash: Set(password_hash),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = active.insert(db).await?;

        info!(user_id = %created.id, "user created");
        Ok(created.into())
    }
}
