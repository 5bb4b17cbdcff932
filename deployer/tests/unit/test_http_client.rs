//! Anypoint HTTP client tests against an in-process mock platform

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use chdeployer::authn::credentials::Credentials;
use chdeployer::errors::DeployerError;
use chdeployer::http::client::{HttpClient, ENV_ID_HEADER, ORG_ID_HEADER};
use chdeployer::platform::{AnypointClient, PlatformClient};
use cloudhub_models::ApplicationDescriptor;
use secrecy::SecretString;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_test::assert_ok;

use crate::support::{environment, ROOT_ORG_ID, SANDBOX_ENV_ID};

const TOKEN: &str = "mock-token";

/// Requests seen by the mock platform
#[derive(Clone, Default)]
struct Seen {
    forms: Arc<Mutex<Vec<HashMap<String, String>>>>,
    headers: Arc<Mutex<Vec<HeaderMap>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn token(
    State(seen): State<Seen>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let accepted = form.get("client_secret").map(String::as_str) == Some("shhh")
        || form.get("password").map(String::as_str) == Some("pa55");
    seen.forms.lock().unwrap().push(form);

    if accepted {
        (
            StatusCode::OK,
            Json(json!({ "access_token": TOKEN, "token_type": "bearer" })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "invalid credentials" })),
        )
    }
}

async fn me(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    Ok(Json(json!({
        "user": {
            "username": "jdoe",
            "memberOfOrganizations": [
                { "id": ROOT_ORG_ID, "name": "Example Inc", "subOrganizationIds": null }
            ]
        }
    })))
}

async fn hierarchy(Path(org_id): Path<String>) -> Json<Value> {
    Json(json!({
        "id": org_id,
        "name": "Example Inc",
        "subOrganizations": [
            { "id": "org-lab", "name": "Lab", "subOrganizations": [
                { "id": "org-bob", "name": "bob-lab" }
            ] }
        ]
    }))
}

async fn environments(Path(org_id): Path<String>) -> Json<Value> {
    Json(json!({
        "data": [
            { "id": SANDBOX_ENV_ID, "name": "Sandbox", "organizationId": org_id,
              "isProduction": false, "type": "sandbox" }
        ],
        "total": 1
    }))
}

async fn get_application(
    State(seen): State<Seen>,
    Path(domain): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    seen.headers.lock().unwrap().push(headers);
    match domain.as_str() {
        "foo" => (
            StatusCode::OK,
            Json(json!({
                "domain": "foo",
                "status": "STARTED",
                "properties": { "api.secret": "******" },
                "workers": { "amount": 1, "type": { "name": "Micro" } }
            })),
        ),
        "broken" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "boom" })),
        ),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Application not found" })),
        ),
    }
}

async fn put_application(
    State(seen): State<Seen>,
    Path(domain): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    seen.bodies.lock().unwrap().push(body);
    Json(json!({ "domain": domain }))
}

async fn create_application(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    seen.headers.lock().unwrap().push(headers);
    seen.bodies.lock().unwrap().push(body.clone());
    (StatusCode::CREATED, Json(body))
}

fn authorized(headers: &HeaderMap) -> Result<(), StatusCode> {
    let expected = format!("Bearer {}", TOKEN);
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

/// Start the mock platform on a random port and return its base URL
async fn serve(seen: Seen) -> String {
    let app = Router::new()
        .route("/accounts/login", post(token))
        .route("/accounts/api/v2/oauth2/token", post(token))
        .route("/accounts/api/me", get(me))
        .route("/accounts/api/organizations/{id}/hierarchy", get(hierarchy))
        .route(
            "/accounts/api/organizations/{id}/environments",
            get(environments),
        )
        .route("/cloudhub/api/v2/applications", post(create_application))
        .route(
            "/cloudhub/api/v2/applications/{domain}",
            get(get_application).put(put_application),
        )
        .with_state(seen);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn logged_in_client(base_url: &str) -> AnypointClient {
    let credentials = Credentials::ConnectedApp {
        client_id: "client".to_string(),
        client_secret: SecretString::from("shhh".to_string()),
    };
    let client = AnypointClient::new(base_url, credentials, Duration::from_secs(5)).unwrap();
    assert_ok!(client.login().await);
    client
}

#[tokio::test]
async fn test_connected_app_login() {
    let seen = Seen::default();
    let base_url = serve(seen.clone()).await;

    let client = logged_in_client(&base_url).await;
    let organizations = assert_ok!(client.get_my_organizations().await);

    assert_eq!(organizations.len(), 1);
    assert_eq!(organizations[0].id, ROOT_ORG_ID);
    assert!(organizations[0].sub_organization_ids.is_empty());

    let forms = seen.forms.lock().unwrap();
    assert_eq!(forms[0].get("client_id").map(String::as_str), Some("client"));
    assert_eq!(
        forms[0].get("grant_type").map(String::as_str),
        Some("client_credentials")
    );
}

#[tokio::test]
async fn test_user_login() {
    let base_url = serve(Seen::default()).await;
    let http_client = HttpClient::new(&base_url, Duration::from_secs(5)).unwrap();

    let response = assert_ok!(http_client.login_user("jdoe", "pa55").await);
    assert_eq!(response.access_token, TOKEN);
}

#[tokio::test]
async fn test_rejected_login_is_an_auth_error() {
    let base_url = serve(Seen::default()).await;
    let credentials = Credentials::User {
        username: "jdoe".to_string(),
        password: SecretString::from("wrong".to_string()),
    };
    let client = AnypointClient::new(&base_url, credentials, Duration::from_secs(5)).unwrap();

    let err = client.login().await.unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(
        err.to_string(),
        "Authentication error: login rejected (401): invalid credentials"
    );
}

#[tokio::test]
async fn test_calls_before_login_fail() {
    let base_url = serve(Seen::default()).await;
    let credentials = Credentials::Bearer(SecretString::from(TOKEN.to_string()));
    let client = AnypointClient::new(&base_url, credentials, Duration::from_secs(5)).unwrap();

    let err = client.get_my_organizations().await.unwrap_err();
    assert!(matches!(err, DeployerError::AuthError(_)));
}

#[tokio::test]
async fn test_sub_organizations_and_environments() {
    let base_url = serve(Seen::default()).await;
    let client = logged_in_client(&base_url).await;

    let children = assert_ok!(client.get_sub_organizations(ROOT_ORG_ID).await);
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].name, "Lab");
    assert_eq!(children[0].parent_id.as_deref(), Some(ROOT_ORG_ID));
    assert_eq!(children[0].sub_organization_ids, vec!["org-bob".to_string()]);

    let environments = assert_ok!(client.get_environments(ROOT_ORG_ID).await);
    assert_eq!(environments.len(), 1);
    assert_eq!(environments[0].id, SANDBOX_ENV_ID);
    assert_eq!(environments[0].organization_id, ROOT_ORG_ID);
    assert_eq!(environments[0].environment_type.as_deref(), Some("sandbox"));
}

#[tokio::test]
async fn test_get_application_carries_scope_headers() {
    let seen = Seen::default();
    let base_url = serve(seen.clone()).await;
    let client = logged_in_client(&base_url).await;
    let scope = environment(SANDBOX_ENV_ID, "Sandbox", ROOT_ORG_ID);

    let record = assert_ok!(client.get_application(&scope, "foo").await).unwrap();
    assert_eq!(record.domain, "foo");
    assert_eq!(record.status.as_deref(), Some("STARTED"));
    assert_eq!(record.workers.worker_type.name, "Micro");

    let headers = seen.headers.lock().unwrap();
    assert_eq!(headers[0].get(ORG_ID_HEADER).unwrap(), ROOT_ORG_ID);
    assert_eq!(headers[0].get(ENV_ID_HEADER).unwrap(), SANDBOX_ENV_ID);
}

#[tokio::test]
async fn test_missing_application_is_none() {
    let base_url = serve(Seen::default()).await;
    let client = logged_in_client(&base_url).await;
    let scope = environment(SANDBOX_ENV_ID, "Sandbox", ROOT_ORG_ID);

    let record = assert_ok!(client.get_application(&scope, "bar").await);
    assert!(record.is_none());
}

#[tokio::test]
async fn test_remote_error_message() {
    let base_url = serve(Seen::default()).await;
    let client = logged_in_client(&base_url).await;
    let scope = environment(SANDBOX_ENV_ID, "Sandbox", ROOT_ORG_ID);

    let err = client.get_application(&scope, "broken").await.unwrap_err();
    match err {
        DeployerError::RemoteError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_create_and_update_send_descriptor() {
    let seen = Seen::default();
    let base_url = serve(seen.clone()).await;
    let client = logged_in_client(&base_url).await;
    let scope = environment(SANDBOX_ENV_ID, "Sandbox", ROOT_ORG_ID);

    let mut descriptor: ApplicationDescriptor = serde_json::from_value(json!({
        "applicationInfo": {
            "domain": "foo",
            "workers": { "amount": 2, "type": { "name": "Small" } }
        },
        "applicationSource": { "groupId": "g", "artifactId": "a", "version": "1" }
    }))
    .unwrap();
    descriptor.inject_gav();

    assert_ok!(client.create_application(&scope, &descriptor).await);
    assert_ok!(client.update_application(&scope, &descriptor).await);

    let bodies = seen.bodies.lock().unwrap();
    assert_eq!(bodies.len(), 2);
    for body in bodies.iter() {
        assert_eq!(body["applicationInfo"]["domain"], json!("foo"));
        assert_eq!(
            body["applicationInfo"]["properties"]["chdeployer.application.gav"],
            json!("g:a:1")
        );
        assert_eq!(body["applicationInfo"]["workers"]["type"]["name"], json!("Small"));
    }
}
