use roles_console::domain::role::Role;
use roles_console::domain::token::AuthToken;
use roles_console::infrastructure::envelope::Envelope;
use roles_console::infrastructure::{GatewayError, HttpRoleGateway, RoleGateway};
use serde_json::json;
use std::net::TcpListener;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(root_url: String) -> HttpRoleGateway {
    HttpRoleGateway::new(root_url, Duration::from_secs(5)).unwrap()
}

fn token() -> AuthToken {
    AuthToken::new("tok-123")
}

// ===== LOAD ALL =====

#[tokio::test]
async fn test_load_all_unwraps_envelope_and_sends_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/roles"))
        .and(header("Auth-Token", "tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "obj": [[
                    { "name": "ROLE_ADMIN", "description": "Admins", "version": 2,
                      "grants": [{ "name": "SEC_READ" }, { "name": "SEC_WRITE" }] },
                    { "name": "ROLE_GUEST", "description": null }
                ]]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let roles = gateway(server.uri()).load_all(&token()).await.unwrap();

    assert_eq!(roles.len(), 2);
    assert_eq!(roles[0].name, "ROLE_ADMIN");
    assert_eq!(roles[0].grant_count(), 2);
    assert_eq!(roles[0].extra.get("version"), Some(&json!(2)));
    assert!(roles[1].grants().is_none());
}

#[tokio::test]
async fn test_load_all_under_path_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wms/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Envelope::of(Vec::<Role>::new())))
        .expect(1)
        .mount(&server)
        .await;

    let roles = gateway(format!("{}/wms/", server.uri()))
        .load_all(&token())
        .await
        .unwrap();
    assert!(roles.is_empty());
}

#[tokio::test]
async fn test_load_all_error_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/roles"))
        .respond_with(ResponseTemplate::new(403).set_body_json(Envelope::failure(403, "Access denied")))
        .mount(&server)
        .await;

    let error = gateway(server.uri()).load_all(&token()).await.unwrap_err();

    assert!(matches!(error, GatewayError::Backend { .. }));
    assert_eq!(error.status(), 403);
    assert_eq!(error.message(), "Access denied");
}

#[tokio::test]
async fn test_load_all_rejects_unexpected_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let error = gateway(server.uri()).load_all(&token()).await.unwrap_err();
    assert!(matches!(error, GatewayError::MalformedResponse(_)));
    assert_eq!(error.status(), 502);
}

#[tokio::test]
async fn test_load_all_rejects_empty_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let error = gateway(server.uri()).load_all(&token()).await.unwrap_err();
    assert!(matches!(error, GatewayError::MalformedResponse(_)));
}

// ===== CREATE =====

#[tokio::test]
async fn test_create_posts_role_and_returns_created() {
    let server = MockServer::start().await;
    let role = Role::new("ROLE_PICKER", "Pickers");
    Mock::given(method("POST"))
        .and(path("/roles"))
        .and(header("Auth-Token", "tok-123"))
        .and(body_json(&role))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "items": [{ "httpStatus": "201", "obj": [{ "name": "ROLE_PICKER", "description": "Pickers", "version": 0 }] }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = gateway(server.uri()).create(&token(), &role).await.unwrap();

    assert_eq!(created.name, "ROLE_PICKER");
    assert_eq!(created.extra.get("version"), Some(&json!(0)));
}

#[tokio::test]
async fn test_create_duplicate_is_backend_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/roles"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "items": [{ "httpStatus": "409", "message": "Role with name ROLE_ADMIN already exists" }]
        })))
        .mount(&server)
        .await;

    let error = gateway(server.uri())
        .create(&token(), &Role::new("ROLE_ADMIN", ""))
        .await
        .unwrap_err();

    assert_eq!(error.status(), 409);
    assert_eq!(error.to_string(), "[409] Role with name ROLE_ADMIN already exists");
}

// ===== UPDATE =====

#[tokio::test]
async fn test_update_returns_bare_role() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/roles"))
        .and(header("Auth-Token", "tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "ROLE_ADMIN", "description": "Changed", "version": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updated = gateway(server.uri())
        .update(&token(), &Role::new("ROLE_ADMIN", "Changed"))
        .await
        .unwrap();
    assert_eq!(updated.description.as_deref(), Some("Changed"));
}

#[tokio::test]
async fn test_update_failure_without_envelope_uses_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/roles"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let error = gateway(server.uri())
        .update(&token(), &Role::new("ROLE_X", ""))
        .await
        .unwrap_err();
    assert_eq!(error.status(), 404);
    assert_eq!(error.message(), "Not Found");
}

// ===== DELETE =====

#[tokio::test]
async fn test_delete_many_joins_names_in_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/roles/ROLE_A,ROLE_B"))
        .and(header("Auth-Token", "tok-123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    gateway(server.uri())
        .delete_many(&token(), &["ROLE_A".to_string(), "ROLE_B".to_string()])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_many_failure() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500).set_body_json(Envelope::failure(500, "Role in use")))
        .mount(&server)
        .await;

    let error = gateway(server.uri())
        .delete_many(&token(), &["ROLE_A".to_string()])
        .await
        .unwrap_err();
    assert_eq!(error.status(), 500);
    assert_eq!(error.message(), "Role in use");
}

#[tokio::test]
async fn test_delete_many_rejects_name_with_separator() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let error = gateway(server.uri())
        .delete_many(&token(), &["ROLE_A".to_string(), "PICK,PACK".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(error, GatewayError::InvalidUrl(_)));
    assert_eq!(error.status(), 500);
}

// ===== TRANSPORT =====

#[tokio::test]
async fn test_unreachable_backend_is_transport_failure() {
    // bind a free port, then release it so nothing is listening there
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let error = gateway(format!("http://{addr}"))
        .load_all(&token())
        .await
        .unwrap_err();
    assert!(matches!(error, GatewayError::Transport(_)));
    assert_eq!(error.status(), 503);
}
