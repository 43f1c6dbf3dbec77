use lexflow::LexFlow;
use lexflow::error::{AuthError, Error};
use lexflow::models::UserRole;
use lexflow::provision::Registration;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn registration(password: &str, confirm_password: &str) -> Registration {
    Registration {
        email: "a@b.com".to_string(),
        password: password.to_string(),
        confirm_password: confirm_password.to_string(),
        full_name: "Ana Silva".to_string(),
        role: UserRole::Lawyer,
    }
}

fn identity_body(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "email": "a@b.com",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn short_password_fails_before_any_request() {
    let mock_server = MockServer::start().await;

    let lexflow = LexFlow::new(&mock_server.uri(), "test_anon_key");

    let err = lexflow
        .provisioner()
        .register(registration("abc", "abc"))
        .await
        .unwrap_err();

    match err {
        Error::Validation(validation) => assert_eq!(validation.field, "password"),
        other => panic!("expected a validation error, got {:?}", other),
    }

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn mismatched_confirmation_fails_before_any_request() {
    let mock_server = MockServer::start().await;

    let lexflow = LexFlow::new(&mock_server.uri(), "test_anon_key");

    let err = lexflow
        .provisioner()
        .register(registration("secret1", "secret2"))
        .await
        .unwrap_err();

    match err {
        Error::Validation(validation) => assert_eq!(validation.field, "confirm_password"),
        other => panic!("expected a validation error, got {:?}", other),
    }

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn profile_insert_failure_does_not_fail_registration() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(identity_body("u1")))
        .expect(1)
        .mount(&mock_server)
        .await;

    // The store is down; the identity was still created, so the flow
    // must report success and hand the identity back.
    Mock::given(method("POST"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let lexflow = LexFlow::new(&mock_server.uri(), "test_anon_key");

    let identity = lexflow
        .provisioner()
        .register(registration("secret1", "secret1"))
        .await
        .unwrap();

    assert_eq!(identity.id, "u1");
}

#[tokio::test]
async fn duplicate_email_fails_without_touching_the_store() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "code": 422,
            "msg": "User already registered"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // No identity id exists, so no profile row may be attempted.
    Mock::given(method("POST"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let lexflow = LexFlow::new(&mock_server.uri(), "test_anon_key");

    let err = lexflow
        .provisioner()
        .register(registration("secret1", "secret1"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth(AuthError::Conflict(_))));
}

#[tokio::test]
async fn registration_creates_identity_and_profile() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .and(body_partial_json(json!({
            "email": "a@b.com",
            "data": { "full_name": "Ana Silva", "role": "lawyer" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(identity_body("u1")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/users"))
        .and(body_partial_json(json!({
            "id": "u1",
            "email": "a@b.com",
            "full_name": "Ana Silva",
            "role": "lawyer"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "u1",
            "email": "a@b.com",
            "full_name": "Ana Silva",
            "role": "lawyer",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }])))
        .mount(&mock_server)
        .await;

    let lexflow = LexFlow::new(&mock_server.uri(), "test_anon_key");

    let identity = lexflow
        .provisioner()
        .register(registration("secret1", "secret1"))
        .await
        .unwrap();
    assert_eq!(identity.id, "u1");

    let profile = lexflow.profiles().get("u1").await.unwrap().unwrap();
    assert_eq!(profile.id, "u1");
    assert_eq!(profile.email, "a@b.com");
    assert_eq!(profile.full_name, "Ana Silva");
    assert_eq!(profile.role, UserRole::Lawyer);
}
