mod common;

use common::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use terraform_provider_zitactl::application_oidc::{ApplicationOidcResource, ApplicationOidcState};
use terraform_provider_zitactl::helper::{StringList, list_value};
use terraform_provider_zitactl::{ClientInfo, ProviderModel};
use tf_provider::value::Value;
use wiremock::MockServer;

const CREATE: &str = "/zitadel.app.v2beta.AppService/CreateApplication";
const GET: &str = "/zitadel.app.v2beta.AppService/GetApplication";
const UPDATE: &str = "/zitadel.app.v2beta.AppService/UpdateApplication";
const DELETE: &str = "/zitadel.app.v2beta.AppService/DeleteApplication";

fn s(v: &str) -> Value<String> {
    Value::Value(v.to_string())
}

fn list(items: &[&str]) -> StringList {
    list_value(items)
}

fn configured() -> ApplicationOidcState {
    ApplicationOidcState {
        name: s("web"),
        project_id: s("p-1"),
        grant_types: list(&["OIDC_GRANT_TYPE_AUTHORIZATION_CODE"]),
        redirect_uris: list(&["https://app.example.com/callback"]),
        response_types: list(&["OIDC_RESPONSE_TYPE_CODE"]),
        ..Default::default()
    }
}

fn stored() -> ApplicationOidcState {
    ApplicationOidcState {
        access_token_role_assertion: Value::Value(false),
        access_token_type: s("OIDC_TOKEN_TYPE_BEARER"),
        app_type: s("OIDC_APP_TYPE_WEB"),
        auth_method_type: s("OIDC_AUTH_METHOD_TYPE_BASIC"),
        clock_skew: Value::Null,
        id_token_role_assertion: Value::Value(false),
        id_token_userinfo_assertion: Value::Value(false),
        skip_native_app_success_page: Value::Value(false),
        version: s("OIDC_VERSION_1_0"),
        dev_mode: Value::Value(false),
        id: s("a-1"),
        client_id: s("client-1"),
        client_secret: s("secret-1"),
        ..configured()
    }
}

fn remote_app(name: &str) -> serde_json::Value {
    serde_json::json!({
        "app": {
            "id": "a-1",
            "name": name,
            "state": "APP_STATE_ACTIVE",
            "oidcConfig": {
                "redirectUris": ["https://app.example.com/callback"],
                "responseTypes": ["OIDC_RESPONSE_TYPE_CODE"],
                "grantTypes": ["OIDC_GRANT_TYPE_AUTHORIZATION_CODE"],
                "appType": "OIDC_APP_TYPE_WEB",
                "clientId": "client-1",
                "authMethodType": "OIDC_AUTH_METHOD_TYPE_BASIC",
                "version": "OIDC_VERSION_1_0",
                "accessTokenType": "OIDC_TOKEN_TYPE_BEARER",
                "clockSkew": "1s"
            }
        }
    })
}

// ── Planning ────────────────────────────────────────────────────

#[test]
fn plan_create_marks_outputs_unknown() {
    let plan = ApplicationOidcResource::plan_create_state(configured(), &configured());
    assert_eq!(plan.name, s("web"));
    assert_eq!(plan.app_type, Value::Unknown);
    assert_eq!(plan.clock_skew, Value::Unknown);
    assert_eq!(plan.dev_mode, Value::Unknown);
    assert_eq!(plan.id, Value::Unknown);
    assert_eq!(plan.client_id, Value::Unknown);
    assert_eq!(plan.client_secret, Value::Unknown);
    assert_eq!(plan.additional_origins, Value::Null);
}

#[test]
fn plan_update_keeps_generated_credentials() {
    let prior = stored();
    let proposed = ApplicationOidcState {
        name: s("renamed"),
        client_secret: Value::Unknown,
        ..prior.clone()
    };
    let (plan, replace) = ApplicationOidcResource::plan_update_state(&prior, proposed, &configured());

    assert_eq!(plan.id, s("a-1"));
    assert_eq!(plan.client_id, s("client-1"));
    assert_eq!(plan.client_secret, s("secret-1"));
    assert_eq!(plan.app_type, s("OIDC_APP_TYPE_WEB"));
    assert_eq!(plan.dev_mode, Value::Unknown);
    assert!(replace.is_empty());
}

#[test]
fn changing_project_requires_replacement() {
    let prior = stored();
    let proposed = ApplicationOidcState {
        project_id: s("p-2"),
        ..prior.clone()
    };
    let (_, replace) = ApplicationOidcResource::plan_update_state(&prior, proposed, &configured());
    assert_eq!(replace, vec!["project_id"]);
}

// ── Validation ──────────────────────────────────────────────────

#[test]
fn validate_accepts_known_names() {
    let mut config = configured();
    config.access_token_type = s("OIDC_TOKEN_TYPE_JWT");
    config.auth_method_type = s("OIDC_AUTH_METHOD_TYPE_NONE");
    config.clock_skew = s("500ms");
    config.version = Value::Unknown;
    assert!(config.validate().is_empty());
}

#[test]
fn validate_reports_every_bad_attribute() {
    let mut config = configured();
    config.grant_types = list(&["OIDC_GRANT_TYPE_PASSWORD"]);
    config.app_type = s("WEB");
    config.clock_skew = s("soon");

    let errors = config.validate();
    let attributes: Vec<_> = errors.iter().filter_map(|e| e.attribute.as_deref()).collect();
    assert_eq!(attributes, vec!["grant_types", "app_type", "clock_skew"]);

    let clock = errors.iter().find(|e| e.summary == "Invalid ClockSkew").unwrap();
    assert!(clock.detail.starts_with("Could not parse clock_skew duration"));
}

// ── Create / Read ───────────────────────────────────────────────

#[tokio::test]
async fn create_stores_generated_credentials() {
    let server = MockServer::start().await;
    let info = client_info_for(&server).await;
    mount_rpc(
        &server,
        CREATE,
        serde_json::json!({
            "appId": "a-1",
            "oidcResponse": {"clientId": "client-1", "clientSecret": "secret-1"}
        }),
    )
    .await;
    mount_rpc(&server, GET, remote_app("web")).await;

    let planned = ApplicationOidcResource::plan_create_state(configured(), &configured());
    let state = ApplicationOidcResource::new(info).create_application(planned).await.unwrap();

    assert_eq!(state, stored());

    let body = last_body(&server, CREATE).await;
    assert_eq!(body["projectId"], "p-1");
    assert_eq!(body["name"], "web");
    assert_eq!(body["oidcRequest"]["grantTypes"], serde_json::json!(["OIDC_GRANT_TYPE_AUTHORIZATION_CODE"]));
    assert_eq!(body["oidcRequest"]["appType"], "OIDC_APP_TYPE_WEB");
    assert!(body["oidcRequest"].get("clockSkew").is_none());
}

#[tokio::test]
async fn create_sends_clock_skew_and_tracks_it() {
    let server = MockServer::start().await;
    let info = client_info_for(&server).await;
    mount_rpc(
        &server,
        CREATE,
        serde_json::json!({"appId": "a-1", "oidcResponse": {"clientId": "client-1"}}),
    )
    .await;
    mount_rpc(&server, GET, remote_app("web")).await;

    let config = ApplicationOidcState {
        clock_skew: s("1s"),
        ..configured()
    };
    let planned = ApplicationOidcResource::plan_create_state(config.clone(), &config);
    let state = ApplicationOidcResource::new(info).create_application(planned).await.unwrap();

    assert_eq!(state.clock_skew, s("1s"));
    assert_eq!(state.client_secret, Value::Null);
    assert_eq!(last_body(&server, CREATE).await["oidcRequest"]["clockSkew"], "1s");
}

#[tokio::test]
async fn create_with_bad_clock_skew_makes_no_call() {
    let server = MockServer::start().await;
    let info = client_info_for(&server).await;

    let planned = ApplicationOidcState {
        clock_skew: s("1 second"),
        ..configured()
    };
    let err = ApplicationOidcResource::new(info).create_application(planned).await.unwrap_err();

    assert_eq!(err.summary, "Invalid ClockSkew");
    assert_eq!(calls_to(&server, CREATE).await, 0);
}

#[tokio::test]
async fn create_failure_is_reported() {
    let server = MockServer::start().await;
    let info = client_info_for(&server).await;
    mount_rpc_error(&server, CREATE, 400, "invalid_argument", "redirect uri invalid").await;

    let err = ApplicationOidcResource::new(info)
        .create_application(configured())
        .await
        .unwrap_err();
    assert_eq!(err.summary, "Error creating OIDC application");
    assert!(err.detail.contains("redirect uri invalid"));
}

#[tokio::test]
async fn read_after_import_backfills_client_id() {
    let server = MockServer::start().await;
    let info = client_info_for(&server).await;
    mount_rpc(&server, GET, remote_app("web")).await;

    let imported = ApplicationOidcResource::import_application("p-1:a-1").unwrap();
    let state = ApplicationOidcResource::new(info)
        .read_application(imported)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(state.project_id, s("p-1"));
    assert_eq!(state.name, s("web"));
    assert_eq!(state.client_id, s("client-1"));
    assert_eq!(state.client_secret, Value::Null);
    assert_eq!(state.clock_skew, Value::Null);
    assert_eq!(state.post_logout_redirect_uris, Value::Null);
    assert_eq!(state.grant_types, list(&["OIDC_GRANT_TYPE_AUTHORIZATION_CODE"]));
}

#[tokio::test]
async fn read_of_missing_application_removes_it() {
    let server = MockServer::start().await;
    let info = client_info_for(&server).await;
    mount_rpc_error(&server, GET, 404, "not_found", "App not found").await;

    let state = ApplicationOidcResource::new(info).read_application(stored()).await.unwrap();
    assert_eq!(state, None);
}

#[tokio::test]
async fn read_with_unknown_provider_config_keeps_state() {
    let info = Arc::new(ClientInfo::new());
    info.configure(ProviderModel {
        service_account_key: Value::Unknown,
        ..ProviderModel::new("zitadel.example.com", "")
    })
    .await;

    let state = ApplicationOidcResource::new(info).read_application(stored()).await.unwrap();
    assert_eq!(state, Some(stored()));
}

#[tokio::test]
async fn read_failure_is_reported() {
    let server = MockServer::start().await;
    let info = client_info_for(&server).await;
    mount_rpc_error(&server, GET, 500, "internal", "boom").await;

    let err = ApplicationOidcResource::new(info).read_application(stored()).await.unwrap_err();
    assert_eq!(err.summary, "Error reading OIDC application");
}

// ── Update ──────────────────────────────────────────────────────

#[tokio::test]
async fn rename_only_sends_name() {
    let server = MockServer::start().await;
    let info = client_info_for(&server).await;
    mount_rpc(&server, UPDATE, serde_json::json!({})).await;
    mount_rpc(&server, GET, remote_app("renamed")).await;

    let prior = stored();
    let planned = ApplicationOidcState {
        name: s("renamed"),
        ..prior.clone()
    };
    let state = ApplicationOidcResource::new(info)
        .update_application(&prior, planned)
        .await
        .unwrap();

    assert_eq!(state.name, s("renamed"));
    assert_eq!(
        last_body(&server, UPDATE).await,
        serde_json::json!({"id": "a-1", "projectId": "p-1", "name": "renamed"})
    );
}

#[tokio::test]
async fn config_change_sends_only_oidc_configuration() {
    let server = MockServer::start().await;
    let info = client_info_for(&server).await;
    mount_rpc(&server, UPDATE, serde_json::json!({})).await;
    mount_rpc(&server, GET, remote_app("web")).await;

    let prior = stored();
    let planned = ApplicationOidcState {
        dev_mode: Value::Value(true),
        post_logout_redirect_uris: list(&["https://app.example.com/bye"]),
        ..prior.clone()
    };
    ApplicationOidcResource::new(info)
        .update_application(&prior, planned)
        .await
        .unwrap();

    let body = last_body(&server, UPDATE).await;
    assert!(body.get("name").is_none());
    let oidc = &body["oidcConfigurationRequest"];
    assert_eq!(oidc["devMode"], true);
    assert_eq!(oidc["postLogoutRedirectUris"], serde_json::json!(["https://app.example.com/bye"]));
    assert_eq!(oidc["appType"], "OIDC_APP_TYPE_WEB");
    assert_eq!(oidc["redirectUris"], serde_json::json!(["https://app.example.com/callback"]));
}

#[tokio::test]
async fn unchanged_application_is_not_updated() {
    let server = MockServer::start().await;
    let info = client_info_for(&server).await;
    mount_rpc(&server, GET, remote_app("web")).await;

    let prior = stored();
    ApplicationOidcResource::new(info)
        .update_application(&prior, prior.clone())
        .await
        .unwrap();

    assert_eq!(calls_to(&server, UPDATE).await, 0);
    assert_eq!(calls_to(&server, GET).await, 1);
}

#[test]
fn update_request_detection() {
    let prior = stored();
    assert_eq!(stored().to_update_request(&prior).unwrap(), None);

    let planned = ApplicationOidcState {
        name: s("renamed"),
        clock_skew: s("2s"),
        ..prior.clone()
    };
    let request = planned.to_update_request(&prior).unwrap().unwrap();
    assert_eq!(request.name, "renamed");
    let oidc = request.oidc_configuration_request.unwrap();
    assert_eq!(oidc.clock_skew, Some(std::time::Duration::from_secs(2)));
}

// ── Delete / Import ─────────────────────────────────────────────

#[tokio::test]
async fn delete_sends_app_and_project() {
    let server = MockServer::start().await;
    let info = client_info_for(&server).await;
    mount_rpc(&server, DELETE, serde_json::json!({})).await;

    ApplicationOidcResource::new(info).delete_application(&stored()).await.unwrap();
    assert_eq!(
        last_body(&server, DELETE).await,
        serde_json::json!({"id": "a-1", "projectId": "p-1"})
    );
}

#[tokio::test]
async fn delete_of_missing_application_succeeds() {
    let server = MockServer::start().await;
    let info = client_info_for(&server).await;
    mount_rpc_error(&server, DELETE, 404, "not_found", "App not found").await;

    assert!(ApplicationOidcResource::new(info).delete_application(&stored()).await.is_ok());
}

#[test]
fn import_id_format() {
    let state = ApplicationOidcResource::import_application("p-1:a-1").unwrap();
    assert_eq!(state.project_id, s("p-1"));
    assert_eq!(state.id, s("a-1"));

    for bad in ["a-1", "p-1:a-1:x", ":a-1", "p-1:", ""] {
        let err = ApplicationOidcResource::import_application(bad).unwrap_err();
        assert_eq!(err.summary, "Invalid Import ID");
        assert!(err.detail.contains("'project_id:app_id'"));
    }
}
