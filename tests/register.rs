use cfdns::{ClientOptions, CloudflareClient, Credentials, Error, Registrar};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn envelope(result: serde_json::Value) -> serde_json::Value {
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result
    })
}

fn registrar_for(mock_server: &MockServer) -> Registrar<CloudflareClient> {
    let credentials = Credentials::new("an_email", "an_auth_key").unwrap();
    let options = ClientOptions {
        base_url: mock_server.uri(),
        ..ClientOptions::default()
    };
    Registrar::new(CloudflareClient::new(credentials, options).unwrap())
}

async fn mount_zone(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("name", "example.com"))
        .and(header("X-Auth-Email", "an_email"))
        .and(header("X-Auth-Key", "an_auth_key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!([{"id": "Z1", "name": "example.com"}]))),
        )
        .expect(1)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_register_creates_missing_record() {
    let mock_server = MockServer::start().await;
    mount_zone(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/zones/Z1/dns_records"))
        .and(header("X-Auth-Email", "an_email"))
        .and(header("X-Auth-Key", "an_auth_key"))
        .and(query_param("name", "not-exist.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/zones/Z1/dns_records"))
        .and(header("X-Auth-Email", "an_email"))
        .and(header("X-Auth-Key", "an_auth_key"))
        .and(body_json(json!({
            "type": "CNAME",
            "name": "not-exist.example.com",
            "content": "dest"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": "R-new",
            "type": "CNAME",
            "name": "not-exist.example.com",
            "content": "dest"
        }))))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let registrar = registrar_for(&mock_server);
    let record = registrar
        .register("not-exist.example.com", "dest", "CNAME")
        .await
        .unwrap();

    assert_eq!(record["id"], "R-new");
    assert_eq!(record["content"], "dest");
}

#[tokio::test]
async fn test_register_updates_existing_record() {
    let mock_server = MockServer::start().await;
    mount_zone(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/zones/Z1/dns_records"))
        .and(header("X-Auth-Email", "an_email"))
        .and(header("X-Auth-Key", "an_auth_key"))
        .and(query_param("name", "wadus.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "id": "R1",
            "type": "CNAME",
            "name": "wadus.example.com",
            "content": "old"
        }]))))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/zones/Z1/dns_records/R1"))
        .and(header("X-Auth-Email", "an_email"))
        .and(header("X-Auth-Key", "an_auth_key"))
        .and(body_json(json!({
            "type": "CNAME",
            "name": "wadus.example.com",
            "content": "dest"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": "R1",
            "type": "CNAME",
            "name": "wadus.example.com",
            "content": "dest"
        }))))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let registrar = registrar_for(&mock_server);
    let record = registrar
        .register("wadus.example.com", "dest", "CNAME")
        .await
        .unwrap();

    assert_eq!(record["id"], "R1");
    assert_eq!(record["content"], "dest");
}

#[tokio::test]
async fn test_register_fails_when_zone_is_unknown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/zones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let registrar = registrar_for(&mock_server);
    let err = registrar
        .register("www.unknown.test", "dest", "CNAME")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ZoneNotFound(_)));
}

#[tokio::test]
async fn test_rejected_credentials_abort_registration() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/zones"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "success": false,
            "errors": [{"code": 9103, "message": "Unknown X-Auth-Key or X-Auth-Email"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let registrar = registrar_for(&mock_server);
    let err = registrar
        .register("www.example.com", "dest", "CNAME")
        .await
        .unwrap_err();

    match err {
        Error::Status { status, .. } => assert_eq!(status.as_u16(), 403),
        other => panic!("Expected status error, got: {:?}", other),
    }
}
