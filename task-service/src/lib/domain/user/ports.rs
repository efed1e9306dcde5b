use async_trait::async_trait;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated names, username and plaintext password
    ///
    /// # Returns
    /// Created user entity (with hashed password)
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, UserError>;

    /// Resolve a raw bearer token to the user it was issued for.
    ///
    /// # Errors
    /// * `Unauthenticated` - Token is invalid, expired, or its subject no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn resolve_identity(&self, token: &str) -> Result<User, UserError>;
}

/// Persistence operations for users (credential store).
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert a user atomically.
    ///
    /// # Returns
    /// Created user with its store-assigned id
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Unique constraint on username violated; nothing is written
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Exact-match lookup by username.
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
}
