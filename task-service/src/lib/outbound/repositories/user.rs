use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use super::integrity_violation;
use super::IntegrityViolation;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, UserError> {
        let last_name: Option<String> = row.try_get("last_name").map_err(database_error)?;

        Ok(User {
            id: UserId(row.try_get("id").map_err(database_error)?),
            first_name: PersonName::new(row.try_get("first_name").map_err(database_error)?)?,
            last_name: last_name.map(PersonName::new).transpose()?,
            username: Username::new(row.try_get("username").map_err(database_error)?)?,
            password_hash: row.try_get("password_hash").map_err(database_error)?,
        })
    }
}

fn database_error(e: sqlx::Error) -> UserError {
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let row = sqlx::query(
            r#"
            INSERT INTO users (first_name, last_name, username, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, username, password_hash
            "#,
        )
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_ref().map(|n| n.as_str()))
        .bind(user.username.as_str())
        .bind(&user.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match integrity_violation(&e) {
            Some(IntegrityViolation::Unique) => {
                UserError::UsernameAlreadyExists(user.username.to_string())
            }
            _ => database_error(e),
        })?;

        let created = Self::row_to_user(&row)?;
        tx.commit().await.map_err(database_error)?;

        Ok(created)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}
