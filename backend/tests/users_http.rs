//! End-to-end coverage of the users API.
//!
//! Requests run through the real handlers, `CredentialStore`, the in-memory
//! repository and a low-cost Argon2 hasher, so hashing and lookups behave as
//! they do in production without a database.

use std::sync::Arc;

use accounts::Trace;
use accounts::domain::{
    CredentialStore, INCORRECT_PASSWORD_MESSAGE, TRACE_ID_HEADER, UNKNOWN_EMAIL_MESSAGE,
    USER_NOT_FOUND_MESSAGE, UserId,
};
use accounts::inbound::http::state::HttpState;
use accounts::inbound::http::users::LOGIN_SUCCESS_MESSAGE;
use accounts::inbound::http::{json_config, users};
use accounts::outbound::hashing::{Argon2PasswordHasher, HashingConfig};
use accounts::outbound::memory::InMemoryUserRepository;
use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::NormalizePath;
use actix_web::{App, test, web};
use futures_util::future::join_all;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

type Store = CredentialStore<InMemoryUserRepository, Argon2PasswordHasher>;

#[fixture]
fn store() -> Arc<Store> {
    let hasher = Argon2PasswordHasher::new(HashingConfig::new(8, 1, 1)).expect("valid params");
    Arc::new(CredentialStore::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(hasher),
    ))
}

async fn app(
    store: Arc<Store>,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::from_service(store)))
            .app_data(json_config())
            .wrap(NormalizePath::trim())
            .wrap(Trace)
            .service(users::scope()),
    )
    .await
}

async fn call(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    request: test::TestRequest,
) -> (StatusCode, Value) {
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

fn create(username: &str, email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({ "username": username, "email": email, "password": password }))
}

fn login(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(json!({ "email": email, "password": password }))
}

fn message(body: &Value) -> Option<&str> {
    body.get("message").and_then(Value::as_str)
}

#[rstest]
#[actix_web::test]
async fn create_returns_generated_id_and_stores_a_hash(store: Arc<Store>) {
    let app = app(store.clone()).await;

    let (status, body) = call(&app, create("Ler", "ler@x.com", "pw1234")).await;

    assert_eq!(status, StatusCode::OK);
    let id = body.get("id").and_then(Value::as_i64).expect("generated id");
    assert_eq!(body.get("username").and_then(Value::as_str), Some("Ler"));
    assert!(body.get("password").is_none());

    let stored = store
        .find_by_id(UserId::new(i32::try_from(id).expect("id fits")).expect("valid id"))
        .await
        .expect("lookup succeeds")
        .expect("row exists");
    assert_ne!(stored.password_hash().as_ref(), "pw1234");
    assert!(stored.password_hash().as_ref().starts_with("$argon2id$"));
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_a_conflict_and_creates_nothing(store: Arc<Store>) {
    let app = app(store.clone()).await;
    call(&app, create("Ler", "ler@x.com", "pw1234")).await;

    let (status, body) = call(&app, create("Other", "ler@x.com", "pw5678")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(message(&body), Some("Email address already in use!"));
    assert_eq!(store.find_all().await.expect("list").len(), 1);
}

#[rstest]
#[actix_web::test]
async fn concurrent_creates_with_one_email_admit_a_single_account(store: Arc<Store>) {
    const ATTEMPTS: usize = 8;
    let app = app(store).await;

    let attempts = (0..ATTEMPTS).map(|n| {
        let request = create(&format!("Racer{n}"), "race@x.com", "pw1234").to_request();
        test::call_service(&app, request)
    });
    let statuses: Vec<StatusCode> = join_all(attempts)
        .await
        .iter()
        .map(ServiceResponse::status)
        .collect();

    let created = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    let conflicts = statuses
        .iter()
        .filter(|s| **s == StatusCode::CONFLICT)
        .count();
    assert_eq!(created, 1, "statuses: {statuses:?}");
    assert_eq!(conflicts, ATTEMPTS - 1, "statuses: {statuses:?}");

    let (status, body) = call(&app, test::TestRequest::get().uri("/api/users")).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows.first().and_then(|row| row.get("email")).and_then(Value::as_str),
        Some("race@x.com")
    );
}

#[rstest]
#[actix_web::test]
async fn short_password_is_rejected_with_400(store: Arc<Store>) {
    let app = app(store.clone()).await;

    let (status, body) = call(&app, create("Ler", "ler@x.com", "pw")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.pointer("/details/field").and_then(Value::as_str),
        Some("password")
    );
    assert!(store.find_all().await.expect("list").is_empty());
}

#[rstest]
#[actix_web::test]
async fn login_with_correct_password_succeeds(store: Arc<Store>) {
    let app = app(store).await;
    call(&app, create("Ler", "ler@x.com", "pw1234")).await;

    let (status, body) = call(&app, login("ler@x.com", "pw1234")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(message(&body), Some(LOGIN_SUCCESS_MESSAGE));
    assert_eq!(
        body.pointer("/user/email").and_then(Value::as_str),
        Some("ler@x.com")
    );
    assert!(body.pointer("/user/password").is_none());
}

#[rstest]
#[actix_web::test]
async fn login_with_wrong_password_is_404(store: Arc<Store>) {
    let app = app(store).await;
    call(&app, create("Ler", "ler@x.com", "pw1234")).await;

    let (status, body) = call(&app, login("ler@x.com", "wrong-password")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), Some(INCORRECT_PASSWORD_MESSAGE));
}

#[rstest]
#[actix_web::test]
async fn login_with_unknown_email_is_400(store: Arc<Store>) {
    let app = app(store).await;

    let (status, body) = call(&app, login("nobody@x.com", "pw1234")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), Some(UNKNOWN_EMAIL_MESSAGE));
}

#[rstest]
#[actix_web::test]
async fn get_missing_user_is_404(store: Arc<Store>) {
    let app = app(store).await;

    let (status, body) = call(&app, test::TestRequest::get().uri("/api/users/42")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), Some(USER_NOT_FOUND_MESSAGE));
}

#[rstest]
#[actix_web::test]
async fn password_update_replaces_the_old_credential(store: Arc<Store>) {
    let app = app(store).await;
    let (_, created) = call(&app, create("Ler", "ler@x.com", "pw1234")).await;
    let id = created.get("id").and_then(Value::as_i64).expect("id");

    let (status, _) = call(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/users/{id}"))
            .set_json(json!({ "password": "fresh-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (new_status, _) = call(&app, login("ler@x.com", "fresh-pass")).await;
    let (old_status, _) = call(&app, login("ler@x.com", "pw1234")).await;
    assert_eq!(new_status, StatusCode::OK);
    assert_eq!(old_status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn update_returns_the_updated_user(store: Arc<Store>) {
    let app = app(store).await;
    let (_, created) = call(&app, create("Ler", "ler@x.com", "pw1234")).await;
    let id = created.get("id").and_then(Value::as_i64).expect("id");

    let (status, body) = call(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/users/{id}"))
            .set_json(json!({ "username": "Renamed" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "id": id, "username": "Renamed", "email": "ler@x.com" })
    );
}

#[rstest]
#[actix_web::test]
async fn deleted_user_is_no_longer_found(store: Arc<Store>) {
    let app = app(store).await;
    let (_, created) = call(&app, create("Ler", "ler@x.com", "pw1234")).await;
    let id = created.get("id").and_then(Value::as_i64).expect("id");
    let uri = format!("/api/users/{id}");

    let (status, body) = call(&app, test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": id, "deleted": true }));

    let (status, body) = call(&app, test::TestRequest::get().uri(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), Some(USER_NOT_FOUND_MESSAGE));

    let (status, _) = call(&app, test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn list_is_ordered_and_hides_passwords(store: Arc<Store>) {
    let app = app(store).await;
    call(&app, create("Ler", "ler@x.com", "pw1234")).await;
    call(&app, create("Ada", "ada@x.com", "pw5678")).await;

    let (status, body) = call(&app, test::TestRequest::get().uri("/api/users/")).await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().expect("array body");
    let ids: Vec<i64> = users
        .iter()
        .filter_map(|user| user.get("id").and_then(Value::as_i64))
        .collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(users.iter().all(|user| user.get("password").is_none()));
}

#[rstest]
#[actix_web::test]
async fn error_responses_carry_the_trace_header(store: Arc<Store>) {
    let app = app(store).await;

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/users/42").to_request(),
    )
    .await;
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(response).await;

    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(header.as_str()));
}
