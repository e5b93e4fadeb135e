//! Account flows: signup, signin, profile reads and edits, self-promotion.

use serde::{Deserialize, Serialize};
use validator::Validate;
use voltguard_core::error::CoreError;
use voltguard_core::roles::{validate_self_promotion, Role};
use voltguard_core::types::DbId;
use voltguard_db::models::user::{CreateUser, UpdateProfile, UpdateUser, User, UserResponse};
use voltguard_db::store::Store;

use crate::auth::jwt::{generate_access_token, JwtConfig};
use crate::auth::password::{hash_password, verify_password, verify_password_against_dummy};
use crate::error::{AppError, AppResult};

/// Signin failures for unknown emails and wrong passwords share one message.
const BAD_CREDENTIALS: &str = "Incorrect email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 2, message = "must be at least 2 characters"))]
    pub full_name: String,
    /// Defaults to `consumer`.
    pub role: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
}

/// Request body for `POST /auth/signin`.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Token issued by signup, signin and role changes.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Flows
// ---------------------------------------------------------------------------

pub async fn signup(
    store: &dyn Store,
    jwt: &JwtConfig,
    input: SignupRequest,
) -> AppResult<TokenResponse> {
    input.validate()?;
    if input.full_name.trim().len() < 2 {
        return Err(CoreError::Validation("full_name: must be at least 2 characters".into()).into());
    }

    let role = match input.role.as_deref().map(str::trim) {
        None | Some("") => Role::Consumer,
        Some(name) => name.parse::<Role>()?,
    };
    if !role.is_self_assignable() {
        return Err(CoreError::Validation(format!("Role '{role}' cannot be chosen at signup")).into());
    }

    if store.find_user_by_email(&input.email).await?.is_some() {
        return Err(CoreError::Validation("Email already registered".into()).into());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent signup with the same email surfaces as a duplicate store error (400).
    let user = store
        .insert_user(&CreateUser {
            email: input.email,
            password_hash,
            full_name: input.full_name.trim().to_string(),
            role,
            phone: input.phone,
            company: input.company,
        })
        .await?;

    tracing::info!(user_id = user.id, role = %user.role, "User signed up");
    issue_token(jwt, user)
}

pub async fn signin(
    store: &dyn Store,
    jwt: &JwtConfig,
    input: SigninRequest,
) -> AppResult<TokenResponse> {
    let Some(user) = store.find_user_by_email(&input.email).await? else {
        verify_password_against_dummy(&input.password);
        return Err(CoreError::Unauthorized(BAD_CREDENTIALS.into()).into());
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(user_id = user.id, "Signin rejected: wrong password");
        return Err(CoreError::Unauthorized(BAD_CREDENTIALS.into()).into());
    }

    if !user.is_active {
        return Err(CoreError::Forbidden("Account is deactivated".into()).into());
    }

    store.update_user_fields(user.id, &UpdateUser::default()).await?;
    let user = load_user(store, user.id).await?;

    tracing::info!(user_id = user.id, "User signed in");
    issue_token(jwt, user)
}

pub async fn current_user(store: &dyn Store, user_id: DbId) -> AppResult<UserResponse> {
    Ok(load_user(store, user_id).await?.into())
}

/// Partial profile edit. A changed email must not belong to another account.
pub async fn update_profile(
    store: &dyn Store,
    user_id: DbId,
    input: UpdateProfile,
) -> AppResult<UserResponse> {
    input.check()?;
    if let Some(full_name) = &input.full_name {
        if full_name.trim().len() < 2 {
            return Err(
                CoreError::Validation("full_name: must be at least 2 characters".into()).into(),
            );
        }
    }

    if let Some(email) = &input.email {
        if let Some(existing) = store.find_user_by_email(email).await? {
            if existing.id != user_id {
                return Err(CoreError::Validation("Email already registered".into()).into());
            }
        }
    }

    let matched = store.update_user_fields(user_id, &UpdateUser::from(input)).await?;
    if matched == 0 {
        return Err(not_found(user_id));
    }

    tracing::info!(user_id, "Profile updated");
    current_user(store, user_id).await
}

/// Promote a consumer to electrician and return a token carrying the new role.
pub async fn promote_to_electrician(
    store: &dyn Store,
    jwt: &JwtConfig,
    user_id: DbId,
) -> AppResult<TokenResponse> {
    let user = load_user(store, user_id).await?;
    let new_role = validate_self_promotion(user.role)?;

    let update = UpdateUser {
        role: Some(new_role),
        ..Default::default()
    };
    if store.update_user_fields(user_id, &update).await? == 0 {
        return Err(not_found(user_id));
    }

    tracing::info!(user_id, from = %user.role, to = %new_role, "Role changed");
    let user = load_user(store, user_id).await?;
    issue_token(jwt, user)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

async fn load_user(store: &dyn Store, id: DbId) -> AppResult<User> {
    store.get_user(id).await?.ok_or_else(|| not_found(id))
}

fn issue_token(jwt: &JwtConfig, user: User) -> AppResult<TokenResponse> {
    let access_token = generate_access_token(user.id, &user.email, user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    Ok(TokenResponse {
        access_token,
        token_type: "bearer",
        expires_in: jwt.expires_in_secs(),
        user: user.into(),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use jsonwebtoken::Algorithm;
    use voltguard_db::store::{MemoryStore, StoreError};

    use super::*;
    use crate::auth::jwt::validate_token;

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "engine-test-secret".into(),
            algorithm: Algorithm::HS256,
            expiration_hours: 24,
        }
    }

    fn signup_input(email: &str, role: Option<&str>) -> SignupRequest {
        SignupRequest {
            email: email.into(),
            password: "secret1".into(),
            full_name: "Meena Iyer".into(),
            role: role.map(str::to_string),
            phone: None,
            company: None,
        }
    }

    #[tokio::test]
    async fn signup_issues_a_token_for_the_new_user() {
        let store = MemoryStore::new();
        let out = signup(&store, &jwt(), signup_input("m@example.com", None)).await.unwrap();
        assert_eq!(out.token_type, "bearer");
        assert_eq!(out.expires_in, 86_400);
        assert_eq!(out.user.role, Role::Consumer);

        let claims = validate_token(&out.access_token, &jwt()).unwrap();
        assert_eq!(claims.sub, out.user.id);
        assert_eq!(claims.email, "m@example.com");
    }

    #[tokio::test]
    async fn duplicate_email_fails_without_a_second_record() {
        let store = MemoryStore::new();
        signup(&store, &jwt(), signup_input("m@example.com", None)).await.unwrap();
        let err = signup(&store, &jwt(), signup_input("m@example.com", Some("electrician")))
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation(_)));

        let user = store.find_user_by_email("m@example.com").await.unwrap().unwrap();
        assert_eq!(user.role, Role::Consumer);
    }

    #[tokio::test]
    async fn admin_cannot_be_chosen_at_signup() {
        let store = MemoryStore::new();
        let err = signup(&store, &jwt(), signup_input("a@example.com", Some("admin")))
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let store = MemoryStore::new();
        let mut input = signup_input("a@example.com", None);
        input.password = "12345".into();
        assert_matches!(
            signup(&store, &jwt(), input).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }

    #[tokio::test]
    async fn signin_failures_are_indistinguishable() {
        let store = MemoryStore::new();
        signup(&store, &jwt(), signup_input("m@example.com", None)).await.unwrap();

        let wrong_password = signin(
            &store,
            &jwt(),
            SigninRequest {
                email: "m@example.com".into(),
                password: "not-it".into(),
            },
        )
        .await
        .unwrap_err();
        let unknown = signin(
            &store,
            &jwt(),
            SigninRequest {
                email: "nobody@example.com".into(),
                password: "secret1".into(),
            },
        )
        .await
        .unwrap_err();

        assert_matches!(wrong_password, AppError::Core(CoreError::Unauthorized(ref m)) if m == BAD_CREDENTIALS);
        assert_matches!(unknown, AppError::Core(CoreError::Unauthorized(ref m)) if m == BAD_CREDENTIALS);
    }

    #[tokio::test]
    async fn promotion_only_from_consumer() {
        let store = MemoryStore::new();
        let out = signup(&store, &jwt(), signup_input("m@example.com", None)).await.unwrap();

        let promoted = promote_to_electrician(&store, &jwt(), out.user.id).await.unwrap();
        assert_eq!(promoted.user.role, Role::Electrician);
        let claims = validate_token(&promoted.access_token, &jwt()).unwrap();
        assert_eq!(claims.role, Role::Electrician);

        assert_matches!(
            promote_to_electrician(&store, &jwt(), out.user.id).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }

    #[tokio::test]
    async fn profile_email_must_stay_unique() {
        let store = MemoryStore::new();
        signup(&store, &jwt(), signup_input("a@example.com", None)).await.unwrap();
        let b = signup(&store, &jwt(), signup_input("b@example.com", None)).await.unwrap();

        let taken = UpdateProfile {
            email: Some("a@example.com".into()),
            ..Default::default()
        };
        assert_matches!(
            update_profile(&store, b.user.id, taken).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );

        let edit = UpdateProfile {
            city: Some("Chennai".into()),
            email: Some("b@example.com".into()),
            ..Default::default()
        };
        let updated = update_profile(&store, b.user.id, edit).await.unwrap();
        assert_eq!(updated.city.as_deref(), Some("Chennai"));
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let store = MemoryStore::new();
        assert_matches!(
            current_user(&store, 77).await,
            Err(AppError::Core(CoreError::NotFound { entity: "User", id: 77 }))
        );
    }

    #[tokio::test]
    async fn store_outage_propagates() {
        let store = MemoryStore::new();
        store.set_available(false);
        assert_matches!(
            current_user(&store, 1).await,
            Err(AppError::Store(StoreError::Unavailable(_)))
        );
    }
}
