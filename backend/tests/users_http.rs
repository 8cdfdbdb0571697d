//! End-to-end HTTP flows through the users service and in-memory adapters.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use users_api::domain::{TRACE_ID_HEADER, UserId};

mod support;

use support::{InMemoryUserRepository, users_app};

#[fixture]
fn repository() -> Arc<InMemoryUserRepository> {
    Arc::new(InMemoryUserRepository::default())
}

fn ada() -> Value {
    json!({"name": "Ada", "password": "x", "email": "ADA@X.COM", "age": 30})
}

async fn send(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    request: test::TestRequest,
) -> (StatusCode, Value) {
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = serde_json::from_slice(&body).expect("json body");
    (status, value)
}

fn id_of(body: &Value) -> String {
    body.get("id")
        .and_then(Value::as_str)
        .expect("id present")
        .to_owned()
}

#[rstest]
#[actix_web::test]
async fn create_then_get_round_trips_without_password(repository: Arc<InMemoryUserRepository>) {
    let app = test::init_service(users_app(repository.clone())).await;

    let (status, created) = send(
        &app,
        test::TestRequest::post().uri("/users").set_json(ada()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.get("email"), Some(&json!("ada@x.com")));
    assert!(created.get("password").is_none());

    let id = id_of(&created);
    let (status, fetched) = send(&app, test::TestRequest::get().uri(&format!("/users/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert!(fetched.get("password").is_none());

    let stored = repository
        .credential_of(&UserId::new(&id).expect("valid id"))
        .expect("credential stored");
    assert_ne!(stored.as_ref(), "x");
}

#[rstest]
#[actix_web::test]
async fn email_uniqueness_ignores_case(repository: Arc<InMemoryUserRepository>) {
    let app = test::init_service(users_app(repository)).await;
    send(&app, test::TestRequest::post().uri("/users").set_json(ada())).await;

    let mut duplicate = ada();
    duplicate["email"] = json!("ada@x.com");
    let (status, body) = send(
        &app,
        test::TestRequest::post().uri("/users").set_json(duplicate),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.get("error"), Some(&json!("Email already exists")));
    assert_eq!(body.get("code"), Some(&json!("conflict")));
}

#[rstest]
#[actix_web::test]
async fn repeated_creations_get_distinct_ids(repository: Arc<InMemoryUserRepository>) {
    let app = test::init_service(users_app(repository)).await;
    let mut ids = Vec::new();
    for email in ["a@x.com", "b@x.com", "c@x.com"] {
        let mut payload = ada();
        payload["email"] = json!(email);
        let (_, body) = send(&app, test::TestRequest::post().uri("/users").set_json(payload)).await;
        ids.push(id_of(&body));
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);

    let (status, listed) = send(&app, test::TestRequest::get().uri("/users")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.get("count"), Some(&json!(3)));
    let first_email = listed
        .get("users")
        .and_then(|users| users.get(0))
        .and_then(|user| user.get("email"));
    assert_eq!(first_email, Some(&json!("c@x.com")));
}

#[rstest]
#[case(0)]
#[case(150)]
#[actix_web::test]
async fn boundary_ages_are_accepted(repository: Arc<InMemoryUserRepository>, #[case] age: u8) {
    let app = test::init_service(users_app(repository)).await;
    let mut payload = ada();
    payload["age"] = json!(age);

    let (status, body) = send(&app, test::TestRequest::post().uri("/users").set_json(payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.get("age"), Some(&json!(age)));
}

#[rstest]
#[case(json!(151))]
#[case(json!(-1))]
#[case(json!(30.5))]
#[case(json!("thirty"))]
#[actix_web::test]
async fn invalid_ages_fail_validation(
    repository: Arc<InMemoryUserRepository>,
    #[case] age: Value,
) {
    let app = test::init_service(users_app(repository)).await;
    let mut payload = ada();
    payload["age"] = age;

    let (status, body) = send(&app, test::TestRequest::post().uri("/users").set_json(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.get("error"), Some(&json!("Validation failed")));
    let fields: Vec<&str> = body
        .get("details")
        .and_then(Value::as_array)
        .expect("details array")
        .iter()
        .filter_map(|detail| detail.get("field").and_then(Value::as_str))
        .collect();
    assert_eq!(fields, ["age"]);
}

#[rstest]
#[actix_web::test]
async fn mistyped_fields_are_reported_together(repository: Arc<InMemoryUserRepository>) {
    let app = test::init_service(users_app(repository)).await;
    let payload = json!({"name": 42, "email": "not-an-email", "age": 30});

    let (status, body) = send(&app, test::TestRequest::post().uri("/users").set_json(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.get("error"), Some(&json!("Validation failed")));
    let details: Vec<(&str, &str)> = body
        .get("details")
        .and_then(Value::as_array)
        .expect("details array")
        .iter()
        .filter_map(|detail| {
            Some((
                detail.get("field")?.as_str()?,
                detail.get("code")?.as_str()?,
            ))
        })
        .collect();
    assert_eq!(
        details,
        [
            ("name", "not_a_string"),
            ("password", "required"),
            ("email", "invalid_format"),
        ]
    );
}

#[rstest]
#[actix_web::test]
async fn age_only_update_refreshes_updated_at(repository: Arc<InMemoryUserRepository>) {
    let app = test::init_service(users_app(repository)).await;
    let (_, created) = send(&app, test::TestRequest::post().uri("/users").set_json(ada())).await;
    let id = id_of(&created);

    let (status, updated) = send(
        &app,
        test::TestRequest::put()
            .uri(&format!("/users/{id}"))
            .set_json(json!({"age": 40})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated.get("age"), Some(&json!(40)));
    assert_eq!(updated.get("name"), created.get("name"));
    assert_eq!(updated.get("email"), created.get("email"));
    assert_eq!(updated.get("createdAt"), created.get("createdAt"));
    assert_ne!(updated.get("updatedAt"), created.get("updatedAt"));
}

#[rstest]
#[actix_web::test]
async fn empty_update_is_rejected(repository: Arc<InMemoryUserRepository>) {
    let app = test::init_service(users_app(repository)).await;
    let (_, created) = send(&app, test::TestRequest::post().uri("/users").set_json(ada())).await;
    let id = id_of(&created);

    let (status, body) = send(
        &app,
        test::TestRequest::put()
            .uri(&format!("/users/{id}"))
            .set_json(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.get("error"), Some(&json!("Validation failed")));
}

#[rstest]
#[actix_web::test]
async fn delete_then_get_is_not_found(repository: Arc<InMemoryUserRepository>) {
    let app = test::init_service(users_app(repository)).await;
    let (_, created) = send(&app, test::TestRequest::post().uri("/users").set_json(ada())).await;
    let id = id_of(&created);

    let (status, deleted) = send(&app, test::TestRequest::delete().uri(&format!("/users/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, created);

    let (status, body) = send(&app, test::TestRequest::get().uri(&format!("/users/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.get("error"), Some(&json!("User not found")));
}

#[rstest]
#[case("/users/abc")]
#[case("/users/3FA85F64-5717-4562-B3FC-2C963F66AFA6X")]
#[actix_web::test]
async fn malformed_ids_are_rejected(
    repository: Arc<InMemoryUserRepository>,
    #[case] uri: &str,
) {
    let app = test::init_service(users_app(repository)).await;

    let (status, body) = send(&app, test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.get("error"), Some(&json!("Invalid ID")));
}

#[rstest]
#[actix_web::test]
async fn unknown_route_carries_trace_id(repository: Arc<InMemoryUserRepository>) {
    let app = test::init_service(users_app(repository)).await;

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/accounts").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body.get("error"), Some(&json!("Route not found")));
    assert_eq!(body.get("traceId"), Some(&json!(header)));
}
