use chrono::Utc;
use mockall::predicate;
use pretty_assertions::assert_eq;
use slotbook_api::middleware::error_handling::AppError;
use slotbook_core::{
    errors::BookingError,
    models::user::{normalize_email, NewUser, RegisterUserRequest, User},
};
use slotbook_db::models::DbUser;
use uuid::Uuid;

use crate::test_utils::TestContext;

fn stored_user(user: &NewUser) -> DbUser {
    DbUser {
        id: Uuid::new_v4(),
        name: user.name.clone(),
        email: user.email.clone(),
        phone: user.phone.clone(),
        remember_me: user.remember_me,
        created_at: Utc::now(),
    }
}

fn registration(email: &str) -> RegisterUserRequest {
    RegisterUserRequest {
        name: "Grace Hopper".to_string(),
        email: email.to_string(),
        phone: Some("  ".to_string()),
        remember_me: true,
    }
}

// Mirrors the register handler with the store replaced by the mock
async fn test_register_user_wrapper(
    ctx: &TestContext,
    payload: RegisterUserRequest,
) -> Result<Uuid, AppError> {
    let user = payload.validate()?;

    let created = ctx
        .user_repo
        .create_user(user.clone())
        .await?
        .ok_or_else(|| {
            BookingError::Conflict(format!("A user with email {} already exists", user.email))
        })?;

    Ok(created.id)
}

// Mirrors the login handler with the store replaced by the mock
async fn test_login_user_wrapper(ctx: &TestContext, email: &str) -> Result<User, AppError> {
    let email = normalize_email(email)?;

    let user = ctx
        .user_repo
        .get_user_by_email(email)
        .await?
        .ok_or_else(|| BookingError::NotFound("User not found".to_string()))?;

    Ok(User::from(user))
}

#[tokio::test]
async fn test_register_user_success() {
    let mut ctx = TestContext::new();
    let expected = NewUser {
        name: "Grace Hopper".to_string(),
        email: "grace@example.com".to_string(),
        phone: None,
        remember_me: true,
    };
    let stored = stored_user(&expected);
    let stored_id = stored.id;

    ctx.user_repo
        .expect_create_user()
        .with(predicate::eq(expected))
        .times(1)
        .returning(move |_| Ok(Some(stored.clone())));

    let id = test_register_user_wrapper(&ctx, registration(" Grace@Example.com "))
        .await
        .unwrap();

    assert_eq!(id, stored_id);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let mut ctx = TestContext::new();
    ctx.user_repo
        .expect_create_user()
        .times(1)
        .returning(|_| Ok(None));

    let result = test_register_user_wrapper(&ctx, registration("grace@example.com")).await;

    match result.unwrap_err().0 {
        BookingError::Conflict(message) => {
            assert!(message.contains("grace@example.com"));
        }
        e => panic!("Expected Conflict error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_register_invalid_email_never_reaches_store() {
    let mut ctx = TestContext::new();
    ctx.user_repo.expect_create_user().never();

    let result = test_register_user_wrapper(&ctx, registration("not-an-email")).await;

    match result.unwrap_err().0 {
        BookingError::Validation(_) => {}
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_login_normalizes_email() {
    let mut ctx = TestContext::new();
    let stored = stored_user(&NewUser {
        name: "Grace Hopper".to_string(),
        email: "grace@example.com".to_string(),
        phone: Some("555-0101".to_string()),
        remember_me: false,
    });
    let stored_id = stored.id;

    ctx.user_repo
        .expect_get_user_by_email()
        .with(predicate::eq("grace@example.com".to_string()))
        .times(1)
        .returning(move |_| Ok(Some(stored.clone())));

    let user = test_login_user_wrapper(&ctx, "GRACE@example.com").await.unwrap();

    assert_eq!(user.id, stored_id);
    assert_eq!(user.phone.as_deref(), Some("555-0101"));
}

#[tokio::test]
async fn test_login_unknown_user() {
    let mut ctx = TestContext::new();
    ctx.user_repo
        .expect_get_user_by_email()
        .returning(|_| Ok(None));

    let result = test_login_user_wrapper(&ctx, "nobody@example.com").await;

    match result.unwrap_err().0 {
        BookingError::NotFound(message) => assert_eq!(message, "User not found"),
        e => panic!("Expected NotFound error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_login_store_failure() {
    let mut ctx = TestContext::new();
    ctx.user_repo
        .expect_get_user_by_email()
        .returning(|_| Err(eyre::eyre!("connection reset")));

    let result = test_login_user_wrapper(&ctx, "grace@example.com").await;

    assert!(matches!(result.unwrap_err().0, BookingError::Database(_)));
}
