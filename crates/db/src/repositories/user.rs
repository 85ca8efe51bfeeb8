use crate::models::DbUser;
use chrono::Utc;
use eyre::Result;
use slotbook_core::models::user::NewUser;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Stores a new user. Returns `None` if the email is already registered.
pub async fn create_user(pool: &Pool<Postgres>, user: &NewUser) -> Result<Option<DbUser>> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating user: id={}, email={}, remember_me={}",
        id, user.email, user.remember_me
    );

    let created = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (id, name, email, phone, remember_me, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (email) DO NOTHING
        RETURNING id, name, email, phone, remember_me, created_at
        "#,
    )
    .bind(id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(user.phone.as_deref())
    .bind(user.remember_me)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    if created.is_none() {
        tracing::debug!("Email already registered: {}", user.email);
    }

    Ok(created)
}

pub async fn get_user_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbUser>> {
    tracing::debug!("Getting user by email: {}", email);

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, phone, remember_me, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
