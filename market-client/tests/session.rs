//! Login, bearer token and global 401 handling against the mock backend

mod common;

use common::{MockBackend, booking_json};
use market_client::flow::ReviewDraft;
use market_client::{AppContext, ClientConfig, ClientError, SessionEvent, ValidationError};
use shared::models::Booking;
use tempfile::TempDir;

#[tokio::test]
async fn test_unauthorized_clears_session_and_credential_file() {
    let backend = MockBackend::new();
    let base_url = backend.start().await;
    let dir = TempDir::new().unwrap();
    let credential_path = dir.path().join("credential.json");

    let config = ClientConfig::new(base_url).with_credential_path(&credential_path);
    let ctx = AppContext::new(config.clone()).unwrap();
    ctx.http().login("a@example.com", "secret").await.unwrap();
    assert!(credential_path.exists());

    // a fresh context picks up the cached login
    let ctx = AppContext::new(config).unwrap();
    assert_eq!(ctx.session().token().as_deref(), Some("token-123"));

    let mut events = ctx.session().subscribe();
    let err = ctx.http().me().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));

    let sent = backend.requests_to("GET", "auth/me");
    assert_eq!(sent[0].authorization.as_deref(), Some("Bearer token-123"));

    assert!(!ctx.session().is_logged_in());
    assert!(ctx.current_user().is_none());
    assert!(!credential_path.exists());
    assert_eq!(events.try_recv().unwrap(), SessionEvent::Expired);
}

#[tokio::test]
async fn test_wrong_password_keeps_session_empty() {
    let backend = MockBackend::new();
    let ctx = common::context(&backend).await;

    let mut events = ctx.session().subscribe();

    let err = ctx.http().login("a@example.com", "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 401, .. }));
    assert_eq!(err.user_message(), "Email hoặc mật khẩu không đúng");
    assert!(!ctx.session().is_logged_in());
    // no token was held, so nothing expired
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_review_submission() {
    let backend = MockBackend::new();
    let ctx = common::context(&backend).await;
    ctx.http().login("a@example.com", "secret").await.unwrap();
    let reviews = ctx.reviews();

    let completed: Booking =
        serde_json::from_value(booking_json("b1", "completed", "paid", "Massage body")).unwrap();

    let err = reviews
        .submit(&completed, &ReviewDraft::new(Some(0), "Tốt"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::RatingOutOfRange(0))
    ));
    assert!(backend.requests_to("POST", "reviews/b1").is_empty());

    let review = reviews
        .submit(&completed, &ReviewDraft::new(Some(5), "  Rất hài lòng "))
        .await
        .unwrap();
    assert_eq!(review.rating, 5);

    let sent = backend.requests_to("POST", "reviews/b1");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body.as_ref().unwrap()["comment"], "Rất hài lòng");
    assert_eq!(sent[0].authorization.as_deref(), Some("Bearer token-123"));
}
