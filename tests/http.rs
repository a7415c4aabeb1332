use axum::{extract::Path, extract::Query, routing::get, Json, Router};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct SendReminderResponse {
    success: bool,
    notification: NotificationView,
    reload_after_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct NotificationView {
    #[allow(dead_code)]
    id: u64,
    message: String,
    severity: String,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));
static STUB_PORT: Lazy<u16> = Lazy::new(start_stub_backend);

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

// ---- stub club backend ----

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn stub_search(Query(params): Query<SearchQuery>) -> Json<Value> {
    if params.q.to_lowercase().contains("jane") {
        Json(json!([{
            "id": 7,
            "name": "Jane Doe",
            "membership_type": "Gold",
            "expiry_date": "2099-01-01"
        }]))
    } else {
        Json(json!([]))
    }
}

async fn stub_reminders() -> Json<Value> {
    Json(json!([{
        "id": 3,
        "name": "Amy",
        "membership_type": "Silver",
        "phone": "+27821234567",
        "expiry_date": "2026-03-12",
        "days_until_expiry": 2
    }]))
}

async fn stub_phones() -> Json<Value> {
    Json(json!([{ "id": 3, "name": "Amy", "phone": "+27821234567" }]))
}

async fn stub_send(Path(member_id): Path<i64>) -> Json<Value> {
    if member_id == 3 {
        Json(json!({
            "success": true,
            "message": "SMS sent successfully",
            "member_name": "Amy",
            "days_until_expiry": 2
        }))
    } else {
        Json(json!({ "success": false, "message": "Member has no phone number" }))
    }
}

/// The stub runs on its own runtime thread so it outlives the per-test tokio
/// runtimes.
fn start_stub_backend() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub port");
    let port = listener.local_addr().unwrap().port();
    listener.set_nonblocking(true).expect("nonblocking stub listener");

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("stub runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("stub listener");
            let router = Router::new()
                .route("/api/search_members", get(stub_search))
                .route("/api/members_needing_reminders", get(stub_reminders))
                .route("/api/members_with_phones", get(stub_phones))
                .route("/send_reminder/:id", get(stub_send));
            axum::serve(listener, router).await.expect("stub serve");
        });
    });

    port
}

// ---- dashboard server harness ----

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn write_summary_file() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("gym_dashboard_summary_{}_{}.json", std::process::id(), nanos));
    let summary = json!({
        "total_members": 42,
        "active_memberships": 30,
        "expiring_soon": 4,
        "payments_due": 4,
        "classes_today": 2,
        "member_satisfaction": 4.2,
        "members_with_phones": 12,
        "members_needing_reminders": 3,
        "recent_reminders": 5,
        "revenue_months": [
            { "label": "Feb", "total": 1200.0 },
            { "label": "Mar", "total": 1800.0 }
        ]
    });
    std::fs::write(&path, serde_json::to_vec_pretty(&summary).unwrap()).unwrap();
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(base_url.to_string()).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server_with(upstream_url: &str) -> TestServer {
    let port = pick_free_port();
    let summary_path = write_summary_file();
    let child = Command::new(env!("CARGO_BIN_EXE_gym_dashboard"))
        .env("PORT", port.to_string())
        .env("SUMMARY_PATH", summary_path)
        .env("UPSTREAM_URL", upstream_url)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let upstream = format!("http://127.0.0.1:{}", *STUB_PORT);
    let server = Arc::new(spawn_server_with(&upstream).await);
    *guard = Some(Arc::clone(&server));
    server
}

// ---- tests ----

#[tokio::test]
async fn http_dashboard_renders_typed_summary() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let body = client
        .get(server.base_url.clone())
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Fitness Club Dashboard"));
    assert!(body.contains(">42<"));
    assert!(body.contains("4.2/5"));
    assert!(body.contains("Active Members (30)"));
    assert!(body.contains("Expired Members (12)"));
    // tallest revenue month fills its bar
    assert!(body.contains("width: 100%"));
}

#[tokio::test]
async fn http_search_jane_shows_active_member() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/fragments/search?q=Jane", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();

    assert!(body.contains("Jane Doe"));
    assert!(body.contains("ACTIVE"));
    assert!(body.contains("/checkin/7"));
}

#[tokio::test]
async fn http_search_without_match_shows_no_results() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let body = client
        .get(format!("{}/fragments/search?q=zzz", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("No members found"));
}

#[tokio::test]
async fn http_blank_search_prompts_instead_of_calling_upstream() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let body = client
        .get(format!("{}/fragments/search?q=%20%20", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Please enter a member name to search"));
}

#[tokio::test]
async fn http_reminder_fragment_lists_amy() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let body = client
        .get(format!("{}/fragments/reminders", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Amy"));
    assert!(body.contains("Expires in 2 days"));
    assert!(body.contains("sendReminder(3)"));
}

#[tokio::test]
async fn http_send_reminder_success_schedules_reload() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let payload: SendReminderResponse = client
        .post(format!("{}/reminders/3/send", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(payload.success);
    assert_eq!(payload.notification.severity, "success");
    assert!(payload.notification.message.contains("Amy"));
    assert!(payload.notification.message.contains("2 days"));
    assert_eq!(payload.reload_after_ms, Some(2000));

    // the notification also lands on the server-side stack
    let active: Vec<NotificationView> = client
        .get(format!("{}/api/notifications", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(active.iter().any(|n| n.message.contains("Amy")));
}

#[tokio::test]
async fn http_send_reminder_failure_skips_reload() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let payload: SendReminderResponse = client
        .post(format!("{}/reminders/9/send", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(!payload.success);
    assert_eq!(payload.notification.severity, "error");
    assert!(payload.notification.message.contains("no phone"));
    assert_eq!(payload.reload_after_ms, None);
}

#[tokio::test]
async fn http_test_reminder_targets_first_phone_contact() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let payload: SendReminderResponse = client
        .post(format!("{}/reminders/test", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(payload.success);
    assert!(payload.notification.message.contains("Amy"));
}

#[tokio::test]
async fn http_search_with_dead_upstream_shows_visible_error() {
    let _guard = TEST_LOCK.lock().await;
    let dead_port = pick_free_port();
    let server = spawn_server_with(&format!("http://127.0.0.1:{dead_port}")).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/fragments/search?q=Jane", server.base_url))
        .send()
        .await
        .unwrap();

    // the failure is converted into a visible panel message, not a 5xx
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Search error. Please try again."));
}
