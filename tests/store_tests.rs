use lexflow::LexFlow;
use lexflow::error::{Error, StoreError};
use lexflow::models::{UserProfile, UserRole};
use lexflow::profiles::NewProfile;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn profile_row(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "email": "ana@example.com",
        "full_name": "Ana Silva",
        "role": "lawyer",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn insert_then_get_round_trips_a_profile() {
    let mock_server = MockServer::start().await;
    let id = Uuid::new_v4().to_string();

    Mock::given(method("POST"))
        .and(path("/rest/v1/users"))
        .and(header("Prefer", "return=minimal"))
        .and(body_partial_json(json!({
            "id": id,
            "email": "ana@example.com",
            "full_name": "Ana Silva",
            "role": "lawyer"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("id", format!("eq.{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([profile_row(&id)])))
        .mount(&mock_server)
        .await;

    let lexflow = LexFlow::new(&mock_server.uri(), "test_anon_key");
    let profiles = lexflow.profiles();

    profiles
        .insert(NewProfile {
            id: id.clone(),
            email: "ana@example.com".to_string(),
            full_name: "Ana Silva".to_string(),
            role: UserRole::Lawyer,
        })
        .await
        .unwrap();

    let profile: UserProfile = profiles.get(&id).await.unwrap().unwrap();

    assert_eq!(profile.id, id);
    assert_eq!(profile.email, "ana@example.com");
    assert_eq!(profile.full_name, "Ana Silva");
    assert_eq!(profile.role, UserRole::Lawyer);
}

#[tokio::test]
async fn duplicate_insert_maps_to_conflict() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint \"users_pkey\""
        })))
        .mount(&mock_server)
        .await;

    let lexflow = LexFlow::new(&mock_server.uri(), "test_anon_key");

    let err = lexflow
        .profiles()
        .insert(NewProfile {
            id: "u1".to_string(),
            email: "ana@example.com".to_string(),
            full_name: "Ana Silva".to_string(),
            role: UserRole::Lawyer,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Store(StoreError::Conflict(_))));
}

#[tokio::test]
async fn missing_row_is_none_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let lexflow = LexFlow::new(&mock_server.uri(), "test_anon_key");

    let profile = lexflow.profiles().get("absent").await.unwrap();
    assert!(profile.is_none());
}

#[tokio::test]
async fn store_outage_maps_to_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let lexflow = LexFlow::new(&mock_server.uri(), "test_anon_key");

    let err = lexflow.profiles().get("u1").await.unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::Unavailable(_))));
}

#[tokio::test]
async fn count_reads_the_content_range_total() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/rest/v1/processes"))
        .and(query_param("status", "eq.active"))
        .and(header("Prefer", "count=exact"))
        .respond_with(ResponseTemplate::new(200).insert_header("Content-Range", "0-24/57"))
        .mount(&mock_server)
        .await;

    let lexflow = LexFlow::new(&mock_server.uri(), "test_anon_key");

    let count = lexflow
        .from("processes")
        .count()
        .eq("status", "active")
        .execute()
        .await
        .unwrap();

    assert_eq!(count, 57);
}

#[tokio::test]
async fn count_of_an_empty_table_is_zero() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/rest/v1/clients"))
        .respond_with(ResponseTemplate::new(200).insert_header("Content-Range", "*/0"))
        .mount(&mock_server)
        .await;

    let lexflow = LexFlow::new(&mock_server.uri(), "test_anon_key");

    let count = lexflow.from("clients").count().execute().await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn count_without_a_total_is_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/rest/v1/clients"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let lexflow = LexFlow::new(&mock_server.uri(), "test_anon_key");

    let err = lexflow.from("clients").count().execute().await.unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::Unavailable(_))));
}
