use chrono::{Duration as ChronoDuration, Local, Utc};
use fitness_tracker::models::{FoodEntry, Macros, Meal, SummaryResponse, TrackerData, WorkoutSlot};
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

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

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("fitness_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/state")).send().await {
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

async fn spawn_server(seed: Option<&TrackerData>) -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    if let Some(data) = seed {
        std::fs::write(&data_path, serde_json::to_vec(data).unwrap()).expect("write seed file");
    }

    let child = Command::new(env!("CARGO_BIN_EXE_fitness_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
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
    let server = Arc::new(spawn_server(None).await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn fetch_state(client: &Client, base_url: &str) -> TrackerData {
    client
        .get(format!("{base_url}/api/state"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn post_form(client: &Client, url: String, body: &str) -> reqwest::Response {
    client
        .post(url)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(body.to_string())
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_add_then_remove_food_restores_totals() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_state(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/api/food", server.base_url))
        .json(&serde_json::json!({
            "meal": "lunch",
            "name": "Chicken",
            "protein": 40,
            "carbs": 0,
            "fat": 5
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let added: TrackerData = response.json().await.unwrap();

    let mut expected = before.daily_macros;
    expected.add(Macros::new(40, 0, 5));
    assert_eq!(added.daily_macros, expected);
    assert_eq!(added.daily_food.lunch.len(), before.daily_food.lunch.len() + 1);
    assert_eq!(
        added.daily_food.lunch.last(),
        Some(&FoodEntry::new("Chicken", 40, 0, 5))
    );

    let index = added.daily_food.lunch.len() - 1;
    let response = client
        .delete(format!("{}/api/food/lunch/{index}", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let after = fetch_state(&client, &server.base_url).await;
    assert_eq!(after.daily_macros, before.daily_macros);
    assert_eq!(after.daily_food, before.daily_food);
}

#[tokio::test]
async fn http_rejects_empty_name_and_missing_item() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_state(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/api/food", server.base_url))
        .json(&serde_json::json!({ "meal": "dinner", "name": "", "protein": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .delete(format!("{}/api/food/dinner/999", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let after = fetch_state(&client, &server.base_url).await;
    assert_eq!(after, before);
}

#[tokio::test]
async fn http_reset_requires_confirmation() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    client
        .post(format!("{}/api/food", server.base_url))
        .json(&serde_json::json!({
            "meal": "breakfast",
            "name": "Eggs",
            "protein": "12",
            "fat": 10
        }))
        .send()
        .await
        .unwrap();
    let before = fetch_state(&client, &server.base_url).await;
    assert!(!before.daily_food.breakfast.is_empty());

    let response = client
        .post(format!("{}/api/reset", server.base_url))
        .json(&serde_json::json!({ "confirm": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(fetch_state(&client, &server.base_url).await, before);

    let response = client
        .post(format!("{}/api/reset", server.base_url))
        .json(&serde_json::json!({ "confirm": true }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let after: TrackerData = response.json().await.unwrap();
    assert!(after.daily_food.is_empty());
    assert_eq!(after.daily_macros, Macros::default());
    assert_eq!(after.streak, before.streak);
    assert_eq!(after.weekly_history, before.weekly_history);
}

#[tokio::test]
async fn http_workout_notes_and_summary() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .put(format!("{}/api/workouts/day2", server.base_url))
        .json(&serde_json::json!({ "notes": "bench 3x8" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let data: TrackerData = response.json().await.unwrap();
    assert_eq!(data.workout_data.day2.as_ref().unwrap().notes, "bench 3x8");

    let summary: SummaryResponse = client
        .get(format!("{}/api/summary", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(summary.date, Local::now().date_naive().to_string());
    assert_eq!(summary.progress.len(), 3);
    assert_eq!(summary.progress[2].target, 85);
    assert_eq!(summary.macros, data.daily_macros);
}

#[tokio::test]
async fn http_form_add_redirects_to_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_state(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/food/add", server.base_url))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("meal=dinner&name=Rice&protein=4&carbs=45&fat=abc")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let page = response.text().await.unwrap();
    assert!(page.contains("Fitness Tracker"));
    assert!(page.contains("Rice"));

    let after = fetch_state(&client, &server.base_url).await;
    let mut expected = before.daily_macros;
    expected.add(Macros::new(4, 45, 0));
    assert_eq!(after.daily_macros, expected);
}

#[tokio::test]
async fn http_stale_day_rolls_over_on_start() {
    let today = Local::now().date_naive();
    let yesterday = today - ChronoDuration::days(1);
    let mut seed = TrackerData::new(yesterday);
    seed.streak = 2;
    seed.add_food(Meal::Lunch, FoodEntry::new("Mix", 90, 200, 60));
    seed.save_workout(WorkoutSlot::Day1, "legs".into(), Utc::now());

    let server = spawn_server(Some(&seed)).await;
    let client = Client::new();
    let data = fetch_state(&client, &server.base_url).await;

    assert_eq!(data.current_day, today);
    assert_eq!(data.weekly_history.len(), 1);
    assert_eq!(data.weekly_history[0].date, yesterday);
    assert_eq!(data.weekly_history[0].macros, Macros::new(90, 200, 60));
    assert!(data.weekly_history[0].trained);
    assert_eq!(data.streak, 3);
    assert_eq!(data.daily_macros, Macros::default());
    assert!(data.daily_food.is_empty());
    assert!(data.workout_data.day1.is_some());
}

#[tokio::test]
async fn http_form_remove_and_workout() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_state(&client, &server.base_url).await;
    let added: TrackerData = client
        .post(format!("{}/api/food", server.base_url))
        .json(&serde_json::json!({ "meal": "dinner", "name": "Soup", "protein": 6 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let index = added.daily_food.dinner.len() - 1;

    let body = format!("meal=dinner&index={index}");
    let response = post_form(&client, format!("{}/food/remove", server.base_url), &body).await;
    assert!(response.status().is_success());
    let after = fetch_state(&client, &server.base_url).await;
    assert_eq!(after.daily_food, before.daily_food);
    assert_eq!(after.daily_macros, before.daily_macros);

    let body = "slot=day3&notes=row+5x5";
    let response = post_form(&client, format!("{}/workout", server.base_url), body).await;
    assert!(response.status().is_success());
    let after = fetch_state(&client, &server.base_url).await;
    assert_eq!(after.workout_data.day3.as_ref().unwrap().notes, "row 5x5");
}

#[tokio::test]
async fn http_form_reset_needs_ticked_checkbox() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let body = "meal=lunch&name=Pasta&protein=12&carbs=70&fat=8";
    post_form(&client, format!("{}/food/add", server.base_url), body).await;
    let before = fetch_state(&client, &server.base_url).await;
    assert!(!before.daily_food.is_empty());

    let response = post_form(&client, format!("{}/reset", server.base_url), "").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(fetch_state(&client, &server.base_url).await, before);

    let response = post_form(&client, format!("{}/reset", server.base_url), "confirm=on").await;
    assert!(response.status().is_success());
    let after = fetch_state(&client, &server.base_url).await;
    assert!(after.daily_food.is_empty());
    assert_eq!(after.daily_macros, Macros::default());
    assert_eq!(after.workout_data, before.workout_data);
}

#[tokio::test]
async fn http_quick_add_uses_preset() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_state(&client, &server.base_url).await;
    let quick_url = format!("{}/food/quick", server.base_url);

    let response = post_form(&client, quick_url.clone(), "item=chicken").await;
    assert!(response.status().is_success());
    let page = response.text().await.unwrap();
    assert!(page.contains("Quick add"));

    let after = fetch_state(&client, &server.base_url).await;
    assert_eq!(after.daily_food.lunch.len(), before.daily_food.lunch.len() + 1);
    assert_eq!(
        after.daily_food.lunch.last(),
        Some(&FoodEntry::new("Chicken breast", 31, 0, 4))
    );
    let mut expected = before.daily_macros;
    expected.add(Macros::new(31, 0, 4));
    assert_eq!(after.daily_macros, expected);

    let response = post_form(&client, quick_url, "item=pizza").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(fetch_state(&client, &server.base_url).await, after);
}
