use chrono::Utc;
use uuid::Uuid;

use crate::db::models::{Owner, User};
use crate::db::sqlite::{Storage, is_unique_violation};
use crate::error::PortagenError;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, is_admin, is_premium, created_at, updated_at";

impl Storage {
    /// Insert a new account. Emails are stored lower-cased.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User, PortagenError> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            password_hash: password_hash.to_string(),
            is_admin,
            is_premium: false,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"INSERT INTO users (id, name, email, password_hash, is_admin, is_premium, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .bind(user.is_premium)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(self.pool())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                PortagenError::BadRequest("User already exists".to_string())
            } else {
                e.into()
            }
        })?;

        Ok(user)
    }

    pub async fn find_user(&self, id: Uuid) -> Result<Option<User>, PortagenError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(user)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, PortagenError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email.trim().to_lowercase())
        .fetch_optional(self.pool())
        .await?;
        Ok(user)
    }

    pub async fn find_owner(&self, id: Uuid) -> Result<Option<Owner>, PortagenError> {
        let owner = sqlx::query_as::<_, Owner>("SELECT id, name, email FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(owner)
    }

    /// Persist name, email and password hash; bumps `updated_at`.
    pub async fn update_user(&self, user: &mut User) -> Result<(), PortagenError> {
        user.email = user.email.trim().to_lowercase();
        user.updated_at = Utc::now();
        sqlx::query(
            r#"UPDATE users SET
                name = ?,
                email = ?,
                password_hash = ?,
                updated_at = ?
              WHERE id = ?"#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.updated_at)
        .bind(user.id)
        .execute(self.pool())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                PortagenError::BadRequest("Email already in use".to_string())
            } else {
                e.into()
            }
        })?;
        Ok(())
    }
}
