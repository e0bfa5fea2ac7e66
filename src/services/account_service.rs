//! # Account Service
//!
//! Local accounts for the web front-end. Passwords are stored as Argon2 PHC
//! strings; every new account gets the default role.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::RngCore;
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::{info, warn};
use validator::Validate;

use crate::constants::{DEFAULT_ROLE, MIN_PASSWORD_LEN};
use crate::error::{TodoError, TodoResult};
use crate::models::{NewUser, Role, User};
use crate::types::validate_request;

const INVALID_LOGIN: &str = "Invalid login attempt.";

fn email_taken(email: &str) -> TodoError {
    TodoError::validation(format!("email: an account for '{email}' already exists"))
}

/// A concurrent registration can pass the lookup and still lose the insert
fn create_error(err: sqlx::Error, email: &str) -> TodoError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => email_taken(email),
        _ => err.into(),
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub first_name: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub last_name: String,
    #[validate(length(min = 3, max = 100, message = "must be at least 3 characters"))]
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AccountService {
    pool: SqlitePool,
}

impl AccountService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an account, failing on a taken email or mismatched confirmation
    pub async fn register(&self, request: RegisterRequest) -> TodoResult<User> {
        validate_request(&request)?;
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(TodoError::validation(format!(
                "password: must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if request.password != request.confirm_password {
            return Err(TodoError::validation(
                "confirm_password: the password and confirmation password do not match",
            ));
        }

        let email = request.email.trim().to_string();
        if User::find_by_email(&self.pool, &email).await?.is_some() {
            return Err(email_taken(&email));
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::create(
            &self.pool,
            NewUser {
                email: email.clone(),
                password_hash,
                first_name: request.first_name.trim().to_string(),
                last_name: request.last_name.trim().to_string(),
            },
        )
        .await
        .map_err(|err| create_error(err, &email))?;

        match Role::find_by_name(&self.pool, DEFAULT_ROLE).await? {
            Some(role) => Role::assign_to_user(&self.pool, role.id, &user.id).await?,
            None => warn!(role = DEFAULT_ROLE, "Default role missing, account created without it"),
        }

        info!(user_id = %user.id, "Registered account");
        Ok(user)
    }

    /// Verify credentials and stamp the login time
    pub async fn login(&self, request: &LoginRequest) -> TodoResult<User> {
        let Some(user) = User::find_by_email(&self.pool, &request.email).await? else {
            warn!("Login attempt for unknown email");
            return Err(TodoError::forbidden(INVALID_LOGIN));
        };

        if !verify_password(&request.password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(TodoError::forbidden(INVALID_LOGIN));
        }

        User::record_login(&self.pool, &user.id).await?;
        info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    pub async fn find_user(&self, user_id: &str) -> TodoResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, user_id).await?)
    }
}

fn hash_password(password: &str) -> TodoResult<String> {
    let mut salt_bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| TodoError::Internal(format!("Failed to encode salt: {e}")))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| TodoError::Internal(format!("Failed to hash password: {e}")))
}

fn verify_password(password: &str, hash: &str) -> TodoResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| TodoError::Internal(format!("Stored password hash is invalid: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
