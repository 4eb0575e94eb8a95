//! In-process stand-in for the control plane, served on an ephemeral port.
//!
//! VM endpoints answer bare JSON under `/`; everything else is enveloped
//! under `/api/v1`. Every request is recorded as `"METHOD /path?query"`.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use firebird::api::{ApiClient, ClientConfig};

pub const QUOTA_VM: &str = "quota-breaker";
pub const SLOW_NAMESPACE: &str = "slow";
pub const TAKEN_NAME: &str = "taken";
/// VM names whose creation fails with an error body of unusual field types.
/// Collection creates under this name succeed without echoing the record.
pub const ACCEPTED_NAME: &str = "accepted";
pub const EPOCH_VM: &str = "epoch-breaker";
pub const INVALID_VM: &str = "details-breaker";

#[derive(Default)]
struct Inner {
    vms: Vec<Value>,
    collections: Vec<(&'static str, Vec<Value>)>,
    requests: Vec<String>,
    bodies: Vec<(String, Value)>,
    failing: bool,
    next_id: u32,
}

impl Inner {
    fn collection(&mut self, key: &str) -> &mut Vec<Value> {
        let idx = self
            .collections
            .iter()
            .position(|(k, _)| *k == key)
            .expect("unknown collection");
        &mut self.collections[idx].1
    }
}

#[derive(Clone, Default)]
pub struct FakeControlPlane {
    inner: Arc<Mutex<Inner>>,
}

impl FakeControlPlane {
    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    /// Recorded request lines, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    pub fn requests_matching(&self, prefix: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| r.starts_with(prefix))
            .collect()
    }

    /// JSON bodies received, keyed by request line.
    pub fn bodies(&self) -> Vec<(String, Value)> {
        self.lock().bodies.clone()
    }

    /// Make every list endpoint answer with an error status.
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    pub fn vm_count(&self, namespace: &str) -> usize {
        self.lock()
            .vms
            .iter()
            .filter(|v| v["namespace"] == namespace)
            .count()
    }

    pub fn seed_vms(&self, namespace: &str, count: usize) {
        let statuses = ["Running", "Running", "Stopped", "Pending", "Error"];
        let mut inner = self.lock();
        for i in 0..count {
            inner.vms.push(vm_json(
                &format!("vm-{:02}", i),
                namespace,
                statuses[i % statuses.len()],
            ));
        }
    }

    pub fn collection(&self, key: &str) -> Vec<Value> {
        self.lock().collection(key).clone()
    }
}

fn vm_json(name: &str, namespace: &str, status: &str) -> Value {
    json!({
        "name": name,
        "namespace": namespace,
        "status": status,
        "phase": if status == "Running" { "Running" } else { "Scheduled" },
        "cpuCores": 2,
        "memory": "4Gi",
        "image": "kubevirt/cirros-container-disk-demo:latest",
        "createdAt": "2024-01-15T10:30:00",
        "updatedAt": "2024-01-15T10:35:00",
        "ipAddress": "10.0.0.5",
        "nodeName": "node-1"
    })
}

fn envelope(data: Value) -> Response {
    Json(json!({"success": true, "message": "ok", "data": data, "timestamp": "2024-01-15T10:30:00"}))
        .into_response()
}

fn bare_error(status: StatusCode, message: &str, path: &str) -> Response {
    (
        status,
        Json(json!({
            "timestamp": "2024-01-15T10:30:00",
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or(""),
            "message": message,
            "path": path
        })),
    )
        .into_response()
}

async fn record(State(fake): State<FakeControlPlane>, req: Request, next: Next) -> Response {
    let line = format!("{} {}", req.method(), req.uri());
    fake.lock().requests.push(line);
    next.run(req).await
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageQuery {
    page: Option<u32>,
    page_size: Option<u32>,
}

async fn list_vms(
    State(fake): State<FakeControlPlane>,
    Path(namespace): Path<String>,
    Query(q): Query<PageQuery>,
) -> Response {
    if namespace == SLOW_NAMESPACE {
        tokio::time::sleep(Duration::from_secs(2)).await;
    }
    let inner = fake.lock();
    if inner.failing {
        return bare_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "VM backend unavailable",
            &format!("/vms/{}", namespace),
        );
    }
    let all: Vec<&Value> = inner.vms.iter().filter(|v| v["namespace"] == namespace.as_str()).collect();
    let count = |s: &str| all.iter().filter(|v| v["status"] == s).count();
    let page_size = q.page_size.unwrap_or(20).max(1) as usize;
    let total = all.len();
    let last_page = total.div_ceil(page_size).max(1);
    // Pages past the end are clamped to the last one.
    let page = (q.page.unwrap_or(1).max(1) as usize).min(last_page);
    let rows: Vec<Value> = all
        .iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .map(|v| (*v).clone())
        .collect();
    Json(json!({
        "vms": rows,
        "totalCount": total,
        "page": page,
        "pageSize": page_size,
        "hasNext": page < last_page,
        "hasPrevious": page > 1,
        "runningCount": count("Running"),
        "stoppedCount": count("Stopped"),
        "errorCount": count("Error"),
        "pendingCount": count("Pending")
    }))
    .into_response()
}

async fn get_vm(
    State(fake): State<FakeControlPlane>,
    Path((namespace, name)): Path<(String, String)>,
) -> Response {
    let inner = fake.lock();
    match inner
        .vms
        .iter()
        .find(|v| v["namespace"] == namespace.as_str() && v["name"] == name.as_str())
    {
        Some(vm) => Json(vm.clone()).into_response(),
        None => bare_error(
            StatusCode::NOT_FOUND,
            &format!("VM {} not found in namespace {}", name, namespace),
            &format!("/vms/{}/{}", namespace, name),
        ),
    }
}

async fn create_vm(State(fake): State<FakeControlPlane>, Json(body): Json<Value>) -> Response {
    let mut inner = fake.lock();
    inner.bodies.push(("POST /vms".to_string(), body.clone()));
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let namespace = body["namespace"].as_str().unwrap_or_default().to_string();
    if name == QUOTA_VM {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": "quota exceeded"}))).into_response();
    }
    if name == EPOCH_VM {
        let body = json!({"timestamp": 1704067200000u64, "status": 500, "message": "quota exceeded"});
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    }
    if name == INVALID_VM {
        let body = json!({"status": "400", "details": ["name: must match"], "message": "name invalid"});
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }
    if inner.vms.iter().any(|v| v["namespace"] == namespace.as_str() && v["name"] == name.as_str()) {
        return bare_error(StatusCode::CONFLICT, &format!("VM {} already exists", name), "/vms");
    }
    let vm = vm_json(&name, &namespace, "Pending");
    inner.vms.push(vm.clone());
    (StatusCode::CREATED, Json(vm)).into_response()
}

async fn delete_vm(
    State(fake): State<FakeControlPlane>,
    Path((namespace, name)): Path<(String, String)>,
) -> Response {
    let mut inner = fake.lock();
    let before = inner.vms.len();
    inner
        .vms
        .retain(|v| !(v["namespace"] == namespace.as_str() && v["name"] == name.as_str()));
    if inner.vms.len() == before {
        return bare_error(
            StatusCode::NOT_FOUND,
            &format!("VM {} not found in namespace {}", name, namespace),
            &format!("/vms/{}/{}", namespace, name),
        );
    }
    StatusCode::NO_CONTENT.into_response()
}

fn list_collection(fake: &FakeControlPlane, key: &'static str) -> Response {
    let mut inner = fake.lock();
    if inner.failing {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"success": false, "message": "backend unavailable"})),
        )
            .into_response();
    }
    envelope(Value::Array(inner.collection(key).clone()))
}

fn create_in_collection(fake: &FakeControlPlane, key: &'static str, body: Value) -> Response {
    let mut inner = fake.lock();
    inner.bodies.push((format!("POST {}", key), body.clone()));
    if body["name"] == TAKEN_NAME {
        return Json(json!({
            "success": false,
            "message": format!("{} name already exists", key.trim_end_matches('s')),
            "errorCode": "CONFLICT"
        }))
        .into_response();
    }
    if body["name"] == ACCEPTED_NAME {
        return Json(json!({"success": true, "message": "accepted", "data": null})).into_response();
    }
    inner.next_id += 1;
    let mut record = body;
    record["id"] = json!(format!("{}-{}", key, inner.next_id));
    record["createdAt"] = json!("2024-01-15T10:30:00");
    if let Some(obj) = record.as_object_mut() {
        obj.remove("password");
    }
    inner.collection(key).push(record.clone());
    envelope(record)
}

fn get_in_collection(fake: &FakeControlPlane, key: &'static str, id: &str) -> Response {
    let mut inner = fake.lock();
    match inner.collection(key).iter().find(|r| r["id"] == id) {
        Some(r) => envelope(r.clone()),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": format!("{} not found", id)})),
        )
            .into_response(),
    }
}

fn delete_in_collection(fake: &FakeControlPlane, key: &'static str, id: &str) -> Response {
    let mut inner = fake.lock();
    let items = inner.collection(key);
    let before = items.len();
    items.retain(|r| r["id"] != id);
    if items.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": format!("{} not found", id)})),
        )
            .into_response();
    }
    Json(json!({"success": true, "message": "deleted"})).into_response()
}

fn act_on_collection(
    fake: &FakeControlPlane,
    key: &'static str,
    id: &str,
    action: &str,
    body: Bytes,
) -> Response {
    let mut inner = fake.lock();
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    inner
        .bodies
        .push((format!("POST {}/{}/{}", key, id, action), payload.clone()));
    let Some(record) = inner.collection(key).iter_mut().find(|r| r["id"] == id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": format!("{} not found", id)})),
        )
            .into_response();
    };
    match action {
        "start" | "reboot" => record["status"] = json!("ACTIVE"),
        "stop" => record["status"] = json!("SHUTOFF"),
        "enable" => record["enabled"] = json!(true),
        "disable" => record["enabled"] = json!(false),
        "attach" => {
            record["attachments"] = json!([payload]);
            record["status"] = json!("in-use");
        }
        "detach" => {
            record["attachments"] = json!([]);
            record["status"] = json!("available");
        }
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"success": false, "message": format!("unknown action {}", action)})),
            )
                .into_response()
        }
    }
    Json(json!({"success": true, "message": format!("{} ok", action)})).into_response()
}

fn collection_routes(router: Router<FakeControlPlane>, prefix: &str, key: &'static str) -> Router<FakeControlPlane> {
    router
        .route(
            prefix,
            get(move |State(f): State<FakeControlPlane>| async move { list_collection(&f, key) }).post(
                move |State(f): State<FakeControlPlane>, Json(body): Json<Value>| async move {
                    create_in_collection(&f, key, body)
                },
            ),
        )
        .route(
            &format!("{}/:id", prefix),
            get(move |State(f): State<FakeControlPlane>, Path(id): Path<String>| async move {
                get_in_collection(&f, key, &id)
            })
            .delete(move |State(f): State<FakeControlPlane>, Path(id): Path<String>| async move {
                delete_in_collection(&f, key, &id)
            }),
        )
        .route(
            &format!("{}/:id/:action", prefix),
            post(
                move |State(f): State<FakeControlPlane>,
                      Path((id, action)): Path<(String, String)>,
                      body: Bytes| async move { act_on_collection(&f, key, &id, &action, body) },
            ),
        )
}

fn seed_collections() -> Vec<(&'static str, Vec<Value>)> {
    vec![
        (
            "instances",
            vec![
                json!({"id": "i-1", "name": "web", "status": "ACTIVE", "flavor": "m1.small", "image": "cirros", "privateIp": "10.0.0.11", "createdAt": "2024-01-15T10:30:00"}),
                json!({"id": "i-2", "name": "db", "status": "SHUTOFF", "flavor": "m1.large", "image": "ubuntu"}),
            ],
        ),
        (
            "networks",
            vec![json!({"id": "n-1", "name": "private", "status": "ACTIVE", "adminStateUp": true, "shared": false, "subnets": ["s-1"]})],
        ),
        (
            "volumes",
            vec![json!({"id": "v-1", "name": "data", "status": "available", "size": 10, "volumeType": "lvmdriver-1", "availabilityZone": "nova", "attachments": []})],
        ),
        (
            "images",
            vec![json!({"id": "img-1", "name": "cirros", "status": "active", "visibility": "public", "diskFormat": "qcow2", "containerFormat": "bare", "size": 13_267_968})],
        ),
        (
            "users",
            vec![json!({"id": "u-1", "name": "alice", "email": "alice@example.com", "enabled": true, "domainId": "default"})],
        ),
        (
            "domains",
            vec![json!({"id": "default", "name": "Default", "description": "Default domain", "enabled": true})],
        ),
        (
            "projects",
            vec![json!({"id": "p-1", "name": "ops", "enabled": false, "domainId": "default"})],
        ),
        ("roles", vec![json!({"id": "r-1", "name": "admin"})]),
    ]
}

/// Start the fake on 127.0.0.1 and return it with its base URL
/// (`http://127.0.0.1:port`).
pub async fn spawn() -> (FakeControlPlane, String) {
    let fake = FakeControlPlane::default();
    fake.lock().collections = seed_collections();

    let mut api = Router::new()
        .route("/health", get(|| async { envelope(json!({"status": "UP"})) }))
        .route("/identity/health", get(|| async { envelope(json!({"status": "UP"})) }))
        .route(
            "/tenants/health",
            get(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({"success": false, "message": "tenant service starting"})),
                )
            }),
        );
    for (prefix, key) in [
        ("/instances", "instances"),
        ("/networks", "networks"),
        ("/volumes", "volumes"),
        ("/images", "images"),
        ("/identity/users", "users"),
        ("/identity/domains", "domains"),
        ("/tenants/projects", "projects"),
        ("/tenants/roles", "roles"),
    ] {
        api = collection_routes(api, prefix, key);
    }

    let app = Router::new()
        .route("/vms", post(create_vm))
        .route("/vms/:namespace", get(list_vms))
        .route("/vms/:namespace/:name", get(get_vm).delete(delete_vm))
        .nest("/api/v1", api)
        .layer(middleware::from_fn_with_state(fake.clone(), record))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (fake, format!("http://{}", addr))
}

pub fn client_config(base: &str) -> ClientConfig {
    ClientConfig {
        api_base_url: format!("{}/api/v1", base),
        vm_api_base_url: base.to_string(),
        timeout: Duration::from_secs(5),
        verbose: false,
    }
}

pub fn client(base: &str) -> ApiClient {
    ApiClient::new(client_config(base)).unwrap()
}
