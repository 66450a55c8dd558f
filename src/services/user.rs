//! User service implementation
//!
//! Users are keyed by email. Signing in creates the row on first sight and
//! refreshes the display name and avatar afterwards.

use tracing::debug;
use crate::database::repositories::UserRepository;
use crate::models::user::{User, UserIdentity};
use crate::utils::errors::{Result, StarCastError, ValidationError};
use crate::utils::logging::log_user_action;

/// User service for managing user operations
#[derive(Clone, Debug)]
pub struct UserService {
    user_repository: UserRepository,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(user_repository: UserRepository) -> Self {
        Self { user_repository }
    }

    /// Upsert the user behind a verified identity
    pub async fn sign_in(&self, identity: UserIdentity) -> Result<User> {
        let identity = normalize_identity(identity)?;
        debug!(email = %identity.email, "Signing in user");

        let user = self.user_repository.upsert(&identity).await?;
        log_user_action(user.id, "sign_in", None);
        Ok(user)
    }

    /// Upsert the user behind a request's session token
    ///
    /// Runs on every authenticated request, so it does not record a sign-in.
    pub async fn resolve(&self, identity: UserIdentity) -> Result<User> {
        let identity = normalize_identity(identity)?;
        self.user_repository.upsert(&identity).await
    }

    /// Get user by ID
    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(StarCastError::UserNotFound)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repository.find_by_email(email).await
    }
}

/// Trim fields, lower-case the email and drop empty optionals
pub fn normalize_identity(identity: UserIdentity) -> std::result::Result<UserIdentity, ValidationError> {
    let email = identity.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ValidationError::MissingFields(vec!["email"]));
    }
    if !email.contains('@') {
        return Err(ValidationError::InvalidField {
            field: "email",
            reason: "must be an email address".to_string(),
        });
    }

    let clean = |value: Option<String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    Ok(UserIdentity {
        email,
        name: clean(identity.name),
        image: clean(identity.image),
    })
}
