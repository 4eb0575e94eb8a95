mod common;

use std::time::Duration;

use firebird::api::{ApiClient, ApiError, HealthProbe};
use firebird::models::{
    AttachVolumeRequest, CreateInstanceRequest, CreateNetworkRequest, CreateProjectRequest,
    CreateUserRequest, VmCreateRequest,
};
use serde_json::json;

#[tokio::test]
async fn test_list_vms_forwards_paging_query() {
    let (fake, base) = common::spawn().await;
    fake.seed_vms("default", 3);
    let client = common::client(&base);

    let page = client.list_vms("default", 2, 2).await.unwrap();
    assert_eq!(page.page, 2);
    assert_eq!(page.page_size, 2);
    assert_eq!(page.total_count, 3);
    assert_eq!(page.vms.len(), 1);
    assert!(page.has_previous && !page.has_next);

    assert_eq!(
        fake.requests_matching("GET /vms/"),
        vec!["GET /vms/default?page=2&pageSize=2".to_string()]
    );
}

#[tokio::test]
async fn test_path_segments_are_encoded() {
    let (fake, base) = common::spawn().await;
    let client = common::client(&base);

    let err = client.get_vm("team a", "web/1").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        fake.requests_matching("GET /vms/"),
        vec!["GET /vms/team%20a/web%2F1".to_string()]
    );
}

#[tokio::test]
async fn test_server_message_is_surfaced() {
    let (_fake, base) = common::spawn().await;
    let client = common::client(&base);

    let req = VmCreateRequest::new(common::QUOTA_VM, "default", 2, 4, "cirros").unwrap();
    let err = client.create_vm(&req).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 500,
            message: Some("quota exceeded".into())
        }
    );
    assert_eq!(err.message(), "quota exceeded");
}

#[tokio::test]
async fn test_server_message_survives_odd_error_fields() {
    let (_fake, base) = common::spawn().await;
    let client = common::client(&base);

    let req = VmCreateRequest::new(common::EPOCH_VM, "default", 2, 4, "cirros").unwrap();
    let err = client.create_vm(&req).await.unwrap_err();
    assert_eq!(err.message(), "quota exceeded");

    let req = VmCreateRequest::new(common::INVALID_VM, "default", 2, 4, "cirros").unwrap();
    let err = client.create_vm(&req).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 400,
            message: Some("name invalid".into())
        }
    );
}

#[tokio::test]
async fn test_create_vm_sends_camel_case_body() {
    let (fake, base) = common::spawn().await;
    let client = common::client(&base);

    let req = VmCreateRequest::new("web-1", "default", 4, 8, "ubuntu:22.04")
        .unwrap()
        .with_description(Some("frontend".into()))
        .with_public_ip(false);
    let vm = client.create_vm(&req).await.unwrap();
    assert_eq!(vm.name, "web-1");

    let (line, body) = fake.bodies().pop().unwrap();
    assert_eq!(line, "POST /vms");
    assert_eq!(
        body,
        json!({
            "name": "web-1",
            "namespace": "default",
            "cpuCores": 4,
            "memoryGb": 8,
            "image": "ubuntu:22.04",
            "description": "frontend",
            "enablePublicIp": false
        })
    );
}

#[tokio::test]
async fn test_enveloped_list_unwraps_data() {
    let (_fake, base) = common::spawn().await;
    let client = common::client(&base);

    let instances = client.list_instances().await.unwrap();
    assert_eq!(instances.len(), 2);
    assert_eq!(instances[0].name, "web");

    let networks = client.list_networks().await.unwrap();
    assert_eq!(networks[0].subnet_summary(), "1 subnet(s)");

    let images = client.list_images().await.unwrap();
    assert_eq!(images[0].size, Some(13_267_968));
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_rejected() {
    let (_fake, base) = common::spawn().await;
    let client = common::client(&base);

    let req = CreateNetworkRequest::new(common::TAKEN_NAME).unwrap();
    let err = client.create_network(&req).await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { .. }));
    assert_eq!(err.message(), "network name already exists");
}

#[tokio::test]
async fn test_create_without_data_is_still_accepted() {
    let (_fake, base) = common::spawn().await;
    let client = common::client(&base);

    let req = CreateNetworkRequest::new(common::ACCEPTED_NAME).unwrap();
    assert_eq!(client.create_network(&req).await.unwrap(), None);
}

#[tokio::test]
async fn test_enveloped_error_status_uses_message() {
    let (fake, base) = common::spawn().await;
    fake.set_failing(true);
    let client = common::client(&base);

    let err = client.list_volumes().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.message(), "backend unavailable");
}

#[tokio::test]
async fn test_create_and_delete_round_trip_through_collection() {
    let (fake, base) = common::spawn().await;
    let client = common::client(&base);

    let req = CreateInstanceRequest::new("api", "m1.medium", "ubuntu", None).unwrap();
    let created = client.create_instance(&req).await.unwrap().unwrap();
    assert!(created.id.starts_with("instances-"));
    assert_eq!(client.list_instances().await.unwrap().len(), 3);

    client.delete_instance(&created.id).await.unwrap();
    assert_eq!(fake.collection("instances").len(), 2);

    let err = client.delete_instance(&created.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_power_actions_post_without_body() {
    let (fake, base) = common::spawn().await;
    let client = common::client(&base);

    client.stop_instance("i-1").await.unwrap();
    client.start_instance("i-2").await.unwrap();
    client.reboot_instance("i-1").await.unwrap();

    assert_eq!(
        fake.requests_matching("POST /api/v1/instances/"),
        vec![
            "POST /api/v1/instances/i-1/stop".to_string(),
            "POST /api/v1/instances/i-2/start".to_string(),
            "POST /api/v1/instances/i-1/reboot".to_string(),
        ]
    );
    let states: Vec<_> = fake
        .collection("instances")
        .iter()
        .map(|i| i["status"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(states, vec!["ACTIVE", "ACTIVE"]);
}

#[tokio::test]
async fn test_attach_and_detach_volume() {
    let (fake, base) = common::spawn().await;
    let client = common::client(&base);

    let req = AttachVolumeRequest::new("i-1", "/dev/vdc").unwrap();
    client.attach_volume("v-1", &req).await.unwrap();
    let volume = client.get_volume("v-1").await.unwrap();
    assert!(volume.is_attached());

    let (line, body) = fake.bodies().pop().unwrap();
    assert_eq!(line, "POST volumes/v-1/attach");
    assert_eq!(body, json!({"instanceId": "i-1", "device": "/dev/vdc"}));

    client.detach_volume("v-1").await.unwrap();
    assert!(!client.get_volume("v-1").await.unwrap().is_attached());
    assert!(fake
        .requests()
        .contains(&"POST /api/v1/volumes/v-1/detach".to_string()));
}

#[tokio::test]
async fn test_identity_and_tenant_paths() {
    let (fake, base) = common::spawn().await;
    let client = common::client(&base);

    let user = CreateUserRequest::new("bob", "bob@example.com", "hunter22").unwrap();
    let created = client.create_user(&user).await.unwrap().unwrap();
    assert_eq!(created.name, "bob");
    client.disable_user(&created.id).await.unwrap();
    assert_eq!(client.get_user(&created.id).await.unwrap().enabled, Some(false));

    let project = CreateProjectRequest::new("lab").unwrap();
    let project = client.create_project(&project).await.unwrap().unwrap();
    client.enable_project(&project.id).await.unwrap();

    let requests = fake.requests();
    assert!(requests.contains(&"POST /api/v1/identity/users".to_string()));
    assert!(requests.contains(&format!("POST /api/v1/identity/users/{}/disable", created.id)));
    assert!(requests.contains(&format!("POST /api/v1/tenants/projects/{}/enable", project.id)));
}

#[tokio::test]
async fn test_health_probes_keep_envelope() {
    let (_fake, base) = common::spawn().await;
    let client = common::client(&base);

    let health = client.probe(HealthProbe::Infrastructure).await.unwrap();
    assert!(health.success);
    assert_eq!(health.data, Some(json!({"status": "UP"})));
    assert!(client.identity_health().await.is_ok());

    let err = client.tenant_health().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.message(), "tenant service starting");
}

#[tokio::test]
async fn test_timeout_reports_configured_duration() {
    let (_fake, base) = common::spawn().await;
    let mut config = common::client_config(&base);
    config.timeout = Duration::from_millis(200);
    let client = ApiClient::new(config).unwrap();

    let err = client
        .list_vms(common::SLOW_NAMESPACE, 1, 20)
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Transport("timeout of 200ms exceeded".into()));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = common::client(&format!("http://{}", addr));
    let err = client.list_instances().await.unwrap_err();
    assert_eq!(err, ApiError::Transport("Network Error".into()));
}
