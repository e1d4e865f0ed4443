use chrono::{DateTime, Utc};
use uuid::Uuid;
use vocab_deck_core::{provision_starter_deck, StarterEntry};

use super::ServiceError;
use crate::auth::{self, AuthUser};
use crate::config::Config;
use crate::db::operations::user::{self, NewUser};
use crate::db::DatabaseProxy;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Emails compare case-insensitively and without surrounding whitespace.
    pub fn normalized(email: &str, password: &str) -> Result<Self, ServiceError> {
        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(ServiceError::InvalidInput("email is not valid".to_string()));
        }
        if password.is_empty() {
            return Err(ServiceError::InvalidInput("password is required".to_string()));
        }
        Ok(Self {
            email,
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct LoginSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: AuthUser,
}

/// Creates the account and clones `template` into its deck.
pub async fn register(
    proxy: &DatabaseProxy,
    config: &Config,
    template: &[StarterEntry],
    credentials: &Credentials,
) -> Result<AuthUser, ServiceError> {
    if user::find_user_by_email(proxy, &credentials.email)
        .await?
        .is_some()
    {
        return Err(ServiceError::UserExists);
    }

    let password_hash = auth::hash_password(&credentials.password, config.bcrypt_cost)?;

    let now = Utc::now();
    let new_user = NewUser {
        id: Uuid::new_v4().to_string(),
        email: credentials.email.clone(),
        password_hash,
        created_at: now,
    };
    let starter_words = provision_starter_deck(template, &new_user.id, now);

    match user::insert_user_with_words(proxy, &new_user, &starter_words).await {
        Ok(()) => {}
        // Lost a race with a concurrent registration of the same email.
        Err(err) if user::is_unique_violation(&err) => return Err(ServiceError::UserExists),
        Err(err) => return Err(err.into()),
    }

    tracing::info!(
        user_id = %new_user.id,
        starter_words = starter_words.len(),
        "user registered"
    );

    Ok(AuthUser {
        id: new_user.id,
        email: new_user.email,
    })
}

pub async fn login(
    proxy: &DatabaseProxy,
    config: &Config,
    credentials: &Credentials,
) -> Result<LoginSession, ServiceError> {
    let Some(record) = user::find_user_by_email(proxy, &credentials.email).await? else {
        return Err(ServiceError::InvalidCredentials);
    };

    if !auth::verify_password(&credentials.password, &record.password_hash) {
        tracing::info!(user_id = %record.id, "login rejected: bad password");
        return Err(ServiceError::InvalidCredentials);
    }

    let user = AuthUser {
        id: record.id,
        email: record.email,
    };
    let (token, expires_at) = auth::sign_token(&config.jwt, &user)?;

    tracing::info!(user_id = %user.id, "user logged in");
    Ok(LoginSession {
        token,
        expires_at,
        user,
    })
}

fn is_valid_email(value: &str) -> bool {
    if value.is_empty() || value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    domain.contains('.')
}
