use axum::{ extract::{ Json, State }, http::StatusCode, response::IntoResponse, };
use serde::{Deserialize, Serialize};
use crate::error::{ApiError, ApiResult};
use crate::routes::middleware_auth::JwtUser;
use crate::state::AppState;
use uuid::Uuid;
use argon2::{Argon2, PasswordHasher, PasswordVerifier };
use rand::rngs::OsRng;
use argon2::password_hash::{SaltString, PasswordHash};
use jsonwebtoken::{EncodingKey, Header, encode };
use chrono::Utc;
use chrono::Duration;

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User as it appears in responses. The password hash is deliberately not
/// part of this struct so it can never leak into a serialized body.
#[derive(Serialize, sqlx::FromRow)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub token: String,
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

// Tokens are valid for 7 days.
pub fn issue_token(user_id: Uuid, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let exp = now + Duration::days(7);
    let claims = Claims {
        sub: user_id.to_string(),
        exp: exp.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ApiError::Internal(format!("password hash error: {e}")))
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

// HANDLERS

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("Please provide a name".to_string()));
    }
    if payload.email.trim().is_empty() || !payload.email.contains('@') {
        return Err(ApiError::Validation("Please provide a valid email".to_string()));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let password_hash = hash_password(&payload.password)?;
    let user_id = Uuid::new_v4();
    let name = payload.name.trim().to_string();
    let email = payload.email.trim().to_lowercase();

    let res = sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(user_id)
    .bind(&name)
    .bind(&email)
    .bind(&password_hash)
    .execute(&state.db)
    .await;

    match res {
        Ok(_) => {
            let token = issue_token(user_id, &state.jwt_secret)
                .map_err(|e| ApiError::Internal(format!("jwt encode error: {e}")))?;

            Ok((
                StatusCode::CREATED,
                Json(AuthResponse {
                    id: user_id,
                    name,
                    email,
                    token,
                }),
            ))
        }
        Err(e) if is_unique_violation(&e) => {
            Err(ApiError::Validation("User already exists".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let row = sqlx::query_as::<_, CredentialRow>(
        r#"
        SELECT id, name, email, password_hash FROM users WHERE email = $1
        "#,
    )
    .bind(payload.email.trim().to_lowercase())
    .fetch_optional(&state.db)
    .await?;

    // Same message for unknown email and wrong password.
    let row = row.ok_or(ApiError::Auth("Invalid email or password"))?;

    let parsed_hash = PasswordHash::new(&row.password_hash)
        .map_err(|e| ApiError::Internal(format!("stored hash unparseable: {e}")))?;
    let verified = Argon2::default()
        .verify_password(payload.password.as_bytes(), &parsed_hash)
        .is_ok();

    if !verified {
        return Err(ApiError::Auth("Invalid email or password"));
    }

    let token = issue_token(row.id, &state.jwt_secret)
        .map_err(|e| ApiError::Internal(format!("jwt encode error: {e}")))?;

    Ok(Json(AuthResponse {
        id: row.id,
        name: row.name,
        email: row.email,
        token,
    }))
}

/// Fetch the caller's own record.
pub async fn profile(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
) -> ApiResult<impl IntoResponse> {
    let user = sqlx::query_as::<_, UserResponse>(
        r#"
        SELECT id, name, email FROM users WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(ApiError::NotFound("User"))?;

    Ok(Json(user))
}

/// List all users (id, name, email only). Backs the assignee picker.
pub async fn users(
    State(state): State<AppState>,
    JwtUser(_user_id): JwtUser,
) -> ApiResult<impl IntoResponse> {
    let users = sqlx::query_as::<_, UserResponse>(
        r#"
        SELECT id, name, email FROM users ORDER BY name
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(users))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    #[test]
    fn test_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, "test-secret").unwrap();

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(data.claims.sub, user_id.to_string());
        // 7 day validity
        assert_eq!(data.claims.exp - data.claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let token = issue_token(Uuid::new_v4(), "secret-a").unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"secret-b"),
            &Validation::default(),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_password_hash_verify() {
        let hash = hash_password("hunter2hunter2").unwrap();
        let parsed = PasswordHash::new(&hash).unwrap();

        assert!(Argon2::default()
            .verify_password(b"hunter2hunter2", &parsed)
            .is_ok());
        assert!(Argon2::default()
            .verify_password(b"wrong-password", &parsed)
            .is_err());
    }
}
