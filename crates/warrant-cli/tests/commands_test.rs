//! End-to-end tests for the subcommand handlers against a mock Warrant API.
//!
//! ## Commands Tested
//!
//! | Command | Endpoint | Test |
//! |---------|----------|------|
//! | `check` / `assert` | `POST /v2/check` | `check_*`, `assert_*` |
//! | `assign` / `remove` | `/v2/warrants`, `/v1/...` | `assign_*`, `remove_*` |
//! | `create` / `delete` / `list` | `/v1/{collection}` | `builtin_*` |
//! | `object` | `/v2/objects` | `object_*` |
//! | `objecttype` | `/v2/object-types` | `objecttype_*` |
//! | `query` | `GET /v2/query` | `query_*` |
//! | `import` | `POST /v1/users` | `import_*` |

use std::io::Write;
use std::time::Duration;

use warrant_cli::builtin::{run_create, run_delete, run_list, ListArgs, ResourceArgs};
use warrant_cli::check::{run_assert, run_check, AssertArgs, CheckArgs};
use warrant_cli::config::{ConfigFile, Environment, Overrides, CONFIG_FILE_NAME};
use warrant_cli::import::{run_import, ImportArgs, ImportEntity};
use warrant_cli::object::{run_object, ObjectArgs, ObjectCommand};
use warrant_cli::objecttype::{run_objecttype, ObjectTypeArgs, ObjectTypeCommand};
use warrant_cli::query::{run_query, QueryArgs};
use warrant_cli::warrant::{run_assign, run_remove, WarrantArgs};
use warrant_client::{ClientConfig, WarrantClient};
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> WarrantClient {
    let config = ClientConfig::new("test-key", &mock_server.uri()).unwrap();
    WarrantClient::new(&config).unwrap()
}

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

fn check_args(subject: &str, relation: &str, object: &str) -> CheckArgs {
    CheckArgs {
        subject: subject.into(),
        relation: relation.into(),
        object: object.into(),
        context: None,
        assert: None,
        debug: false,
        warrant_token: None,
    }
}

async fn mount_check(mock_server: &MockServer, result: &str) {
    Mock::given(method("POST"))
        .and(path("/v2/check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "result": result,
            "isImplicit": false,
            "decisionPath": {"member": []}
        })))
        .mount(mock_server)
        .await;
}

fn warrant_args(args: &[&str]) -> WarrantArgs {
    WarrantArgs {
        args: args.iter().map(|s| s.to_string()).collect(),
    }
}

// ── check / assert ───────────────────────────────────────────────────

#[tokio::test]
async fn check_prints_true_line() {
    let mock_server = MockServer::start().await;
    mount_check(&mock_server, "Authorized").await;
    let client = test_client(&mock_server);

    let mut out = Vec::new();
    let code = run_check(&check_args("user:56", "member", "role:admin"), &client, &mut out)
        .await
        .unwrap();
    assert_eq!(code, 0);
    assert!(output(out).ends_with(" true user:56 member role:admin\n"));
}

#[tokio::test]
async fn check_false_still_exits_zero() {
    let mock_server = MockServer::start().await;
    mount_check(&mock_server, "Not Authorized").await;
    let client = test_client(&mock_server);

    let mut out = Vec::new();
    let code = run_check(&check_args("user:2", "editor", "document:xyz"), &client, &mut out)
        .await
        .unwrap();
    assert_eq!(code, 0);
    assert!(output(out).ends_with(" false user:2 editor document:xyz\n"));
}

#[tokio::test]
async fn check_assert_mismatch_exits_one() {
    let mock_server = MockServer::start().await;
    mount_check(&mock_server, "Not Authorized").await;
    let client = test_client(&mock_server);

    let mut args = check_args("user:56", "member", "role:admin");
    args.assert = Some(true);
    let mut out = Vec::new();
    let code = run_check(&args, &client, &mut out).await.unwrap();
    assert_eq!(code, 1);
    assert!(output(out).contains(" assert true user:56 member role:admin"));
}

#[tokio::test]
async fn check_debug_prints_decision_path_and_sends_token() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/check"))
        .and(header("Warrant-Token", "tok"))
        .and(body_partial_json(serde_json::json!({"debug": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "Authorized",
            "isImplicit": true,
            "decisionPath": {"member": [{"objectType": "role", "objectId": "admin"}]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = test_client(&mock_server);

    let mut args = check_args("user:56", "member", "role:admin");
    args.debug = true;
    args.warrant_token = Some("tok".into());
    let mut out = Vec::new();
    run_check(&args, &client, &mut out).await.unwrap();
    let text = output(out);
    assert!(text.contains("\"member\": ["));
    assert!(text.contains("        {"));
}

#[tokio::test]
async fn check_rejects_malformed_context_before_sending() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/check"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let client = test_client(&mock_server);

    let mut args = check_args("user:56", "member", "tenant:x");
    args.context = Some("{clientIp}".into());
    let err = run_check(&args, &client, &mut Vec::new()).await.unwrap_err();
    assert!(err.to_string().starts_with("invalid context"));
}

#[tokio::test]
async fn assert_match_exits_zero() {
    let mock_server = MockServer::start().await;
    mount_check(&mock_server, "Not Authorized").await;
    let client = test_client(&mock_server);

    let args = AssertArgs {
        expected: false,
        subject: "user:2".into(),
        relation: "editor".into(),
        object: "document:xyz".into(),
        context: None,
    };
    let mut out = Vec::new();
    let code = run_assert(&args, &client, &mut out).await.unwrap();
    assert_eq!(code, 0);
    assert!(output(out).contains(" assert false user:2 editor document:xyz"));
}

// ── assign / remove ──────────────────────────────────────────────────

#[tokio::test]
async fn assign_creates_warrant_with_policy() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/warrants"))
        .and(body_partial_json(serde_json::json!({"policy": "domain == warrant.dev"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "objectType": "role",
            "objectId": "admin",
            "relation": "member",
            "subject": {"objectType": "user", "objectId": "56"},
            "policy": "domain == warrant.dev"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = test_client(&mock_server);

    let mut out = Vec::new();
    run_assign(
        &warrant_args(&["user:56", "member", "role:admin", "domain == warrant.dev"]),
        &client,
        &mut out,
    )
    .await
    .unwrap();
    assert_eq!(
        output(out),
        "Created warrant user:56 member role:admin 'domain == warrant.dev'\n"
    );
}

#[tokio::test]
async fn assign_shortcut_hits_association_path() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/users/u1/roles/admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"roleId": "admin"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = test_client(&mock_server);

    let mut out = Vec::new();
    run_assign(&warrant_args(&["role:admin", "user:u1"]), &client, &mut out)
        .await
        .unwrap();
    assert_eq!(output(out), "Assigned role:admin to user:u1\n");
}

#[tokio::test]
async fn assign_shortcut_rejects_unsupported_pair() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server);

    let err = run_assign(&warrant_args(&["user:u1", "role:admin"]), &client, &mut Vec::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "unsupported operation for user and role");
}

#[tokio::test]
async fn remove_deletes_warrant() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/warrants"))
        .and(body_json(serde_json::json!({
            "objectType": "document",
            "objectId": "xyz",
            "relation": "editor",
            "subject": {"objectType": "user", "objectId": "1"}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = test_client(&mock_server);

    let mut out = Vec::new();
    run_remove(&warrant_args(&["user:1", "editor", "document:xyz"]), &client, &mut out)
        .await
        .unwrap();
    assert_eq!(output(out), "Deleted warrant user:1 editor document:xyz\n");
}

#[tokio::test]
async fn remove_shortcut_from_tenant() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/tenants/acme/users/u1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = test_client(&mock_server);

    let mut out = Vec::new();
    run_remove(&warrant_args(&["user:u1", "tenant:acme"]), &client, &mut out)
        .await
        .unwrap();
    assert_eq!(output(out), "Removed user:u1 from tenant:acme\n");
}

// ── create / delete / list ───────────────────────────────────────────

#[tokio::test]
async fn builtin_create_and_delete() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/roles"))
        .and(body_json(serde_json::json!({"roleId": "new-role"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"roleId": "new-role"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/roles/new-role"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = test_client(&mock_server);

    let args = ResourceArgs {
        kind: "role".into(),
        id: "new-role".into(),
    };
    let mut out = Vec::new();
    run_create(&args, &client, &mut out).await.unwrap();
    run_delete(&args, &client, &mut out).await.unwrap();
    assert_eq!(output(out), "Created role:new-role\nDeleted role:new-role\n");
}

#[tokio::test]
async fn builtin_create_rejects_unknown_type() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server);

    let args = ResourceArgs {
        kind: "document".into(),
        id: "x".into(),
    };
    assert!(run_create(&args, &client, &mut Vec::new()).await.is_err());
}

#[tokio::test]
async fn builtin_list_prints_ids() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/permissions"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"permissionId": "view-reports"},
            {"permissionId": "edit-users"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = test_client(&mock_server);

    let mut out = Vec::new();
    run_list(
        &ListArgs {
            collection: "permissions".into(),
        },
        &client,
        &mut out,
    )
    .await
    .unwrap();
    assert_eq!(output(out), "view-reports\nedit-users\n");
}

// ── object ───────────────────────────────────────────────────────────

#[tokio::test]
async fn object_create_prints_id_and_meta() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "objectType": "permission",
            "objectId": "edit-users",
            "meta": {"name": "Edit Users"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = test_client(&mock_server);

    let args = ObjectArgs {
        command: ObjectCommand::Create {
            object: "permission:edit-users".into(),
            meta: Some(r#"{"name": "Edit Users"}"#.into()),
        },
    };
    let mut out = Vec::new();
    run_object(&args, &client, &mut out).await.unwrap();
    assert_eq!(
        output(out),
        "created permission:edit-users\n{\n    \"name\": \"Edit Users\"\n}\n"
    );
}

#[tokio::test]
async fn object_get_without_meta_prints_ref_only() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/objects/role/admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "objectType": "role",
            "objectId": "admin"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = test_client(&mock_server);

    let args = ObjectArgs {
        command: ObjectCommand::Get {
            object: "role:admin".into(),
            warrant_token: None,
        },
    };
    let mut out = Vec::new();
    run_object(&args, &client, &mut out).await.unwrap();
    assert_eq!(output(out), "role:admin\n");
}

#[tokio::test]
async fn object_delete_requires_id() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server);

    let args = ObjectArgs {
        command: ObjectCommand::Delete {
            object: "role".into(),
        },
    };
    let err = run_object(&args, &client, &mut Vec::new()).await.unwrap_err();
    assert!(err.to_string().starts_with("invalid object \"role\""));
}

// ── objecttype ───────────────────────────────────────────────────────

#[tokio::test]
async fn objecttype_apply_reads_stdin() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2/object-types"))
        .and(body_json(serde_json::json!([{"type": "document", "relations": {}}])))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = test_client(&mock_server);

    let args = ObjectTypeArgs {
        command: ObjectTypeCommand::Apply { file: None },
    };
    let mut stdin: &[u8] = br#"[{"type": "document", "relations": {}}]"#;
    let mut out = Vec::new();
    run_objecttype(&args, &client, &mut stdin, &mut out)
        .await
        .unwrap();
    assert_eq!(output(out), "objecttypes updated\n");
}

#[tokio::test]
async fn objecttype_list_prints_all_pages() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/object-types"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{"type": "role"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = test_client(&mock_server);

    let args = ObjectTypeArgs {
        command: ObjectTypeCommand::List {
            warrant_token: None,
        },
    };
    let mut out = Vec::new();
    run_objecttype(&args, &client, &mut std::io::empty(), &mut out)
        .await
        .unwrap();
    assert_eq!(output(out), "[\n    {\n        \"type\": \"role\"\n    }\n]\n");
}

// ── query ────────────────────────────────────────────────────────────

#[tokio::test]
async fn query_prints_page() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/query"))
        .and(query_param("q", "select role where user:56 is member"))
        .and(query_param("prevCursor", "p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{"objectType": "role", "objectId": "admin"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = test_client(&mock_server);

    let args = QueryArgs {
        query: "select role where user:56 is member".into(),
        limit: None,
        next_cursor: None,
        prev_cursor: Some("p1".into()),
        warrant_token: None,
    };
    let mut out = Vec::new();
    run_query(&args, &client, &mut out).await.unwrap();
    let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(printed["results"][0]["objectId"], "admin");
}

// ── import ───────────────────────────────────────────────────────────

#[tokio::test]
async fn import_continues_past_failed_rows_and_sends_blank_ids() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/users"))
        .and(body_json(serde_json::json!({"userId": "taken"})))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "code": "duplicate_record",
            "message": "User taken already exists"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/users"))
        .and(body_json(serde_json::json!({"email": "nobody@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "userId": "generated-id",
            "email": "nobody@example.com"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .with_priority(10)
        .expect(2)
        .mount(&mock_server)
        .await;
    let client = test_client(&mock_server);

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("users.csv");
    let mut f = std::fs::File::create(&file).unwrap();
    writeln!(f, "userId,email").unwrap();
    writeln!(f, "u1,u1@example.com").unwrap();
    writeln!(f, "taken,").unwrap();
    writeln!(f, ",nobody@example.com").unwrap();
    writeln!(f, "u2").unwrap();
    drop(f);

    let args = ImportArgs {
        entity: Some(ImportEntity::Users),
        file: Some(file),
    };
    let mut out = Vec::new();
    let code = run_import(&args, &client, Duration::ZERO, &mut out)
        .await
        .unwrap();
    assert_eq!(code, 0);

    let text = output(out);
    assert!(text.contains("Error processing row 2: "));
    assert!(text.contains("User taken already exists"));
    assert!(!text.contains("Error processing row 3"));
    assert!(text.ends_with("Import complete.\nRows processed: 4\nUsers created: 3\nRows failed: 1\n"));
}

#[tokio::test]
async fn import_requires_file_with_entity() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server);

    let args = ImportArgs {
        entity: Some(ImportEntity::Users),
        file: None,
    };
    let err = run_import(&args, &client, Duration::ZERO, &mut Vec::new())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("must provide 2 args"));
}

// ── connect ──────────────────────────────────────────────────────────

#[tokio::test]
async fn connect_uses_active_environment_endpoint_and_key() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/check"))
        .and(header("Authorization", "ApiKey env-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "Authorized"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join(CONFIG_FILE_NAME);
    let mut config = ConfigFile::default();
    config
        .add_environment("local", Environment::new("env-key", &mock_server.uri()))
        .unwrap();
    config.write(&config_path).unwrap();

    let client = warrant_cli::connect(&config_path, &Overrides::default()).unwrap();
    let code = run_check(&check_args("user:1", "viewer", "report:q3"), &client, &mut Vec::new())
        .await
        .unwrap();
    assert_eq!(code, 0);
}
