mod common;

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use earthengine_rs::{Credentials, EeClient, HttpMethod, session};
use httpmock::Method::POST;
use serde_json::json;
use url::Url;

/* ---------------- EeClient session-state semantics ---------------- */

#[test]
fn initialize_updates_only_the_specified_parts() {
    let client = EeClient::builder().build().unwrap();
    assert!(
        client
            .api_base()
            .as_str()
            .contains("earthengine.googleapis.com")
    );

    let api = Url::parse("http://localhost:8080/api").unwrap();
    client.initialize(None, Some(api.clone()), None);
    assert_eq!(client.api_base(), api);
    assert!(
        client
            .tile_base()
            .as_str()
            .contains("earthengine.googleapis.com")
    );

    let tiles = Url::parse("http://localhost:8081/").unwrap();
    client.initialize(None, None, Some(tiles.clone()));
    assert_eq!(client.api_base(), api);
    assert_eq!(client.tile_base(), tiles);
}

#[test]
fn reset_returns_to_defaults() {
    let client = EeClient::builder()
        .api_base(Url::parse("http://localhost:8080/api").unwrap())
        .credentials(Credentials::bearer("tok"))
        .deadline_ms(5_000)
        .build()
        .unwrap();

    client.reset();

    assert!(
        client
            .api_base()
            .as_str()
            .contains("earthengine.googleapis.com")
    );
    assert_eq!(client.deadline(), None);
}

#[test]
fn deadline_zero_means_no_limit() {
    let client = EeClient::builder().build().unwrap();
    client.set_deadline(5_000);
    assert_eq!(client.deadline(), Some(Duration::from_millis(5_000)));
    client.set_deadline(0);
    assert_eq!(client.deadline(), None);
}

#[test]
fn clones_share_session_state() {
    let client = EeClient::builder().build().unwrap();
    let clone = client.clone();

    let api = Url::parse("http://localhost:8080/api").unwrap();
    clone.initialize(None, Some(api.clone()), None);

    assert_eq!(client.api_base(), api);
}

/* ---------------- Global and thread-local sessions ---------------- */

// Integration tests share the process-wide session; tests that touch it take
// this lock and reset on the way out.
static GLOBAL_SESSION: Mutex<()> = Mutex::new(());

fn global_session() -> MutexGuard<'static, ()> {
    GLOBAL_SESSION.lock().unwrap_or_else(PoisonError::into_inner)
}

#[test]
fn set_thread_credentials_reports_changes() {
    thread::spawn(|| {
        let one = Some(Credentials::bearer("one"));
        assert!(session::set_thread_credentials(one.clone()));
        assert!(!session::set_thread_credentials(one));
        assert!(session::set_thread_credentials(Some(Credentials::bearer("two"))));
        assert!(session::set_thread_credentials(None));
        assert!(!session::set_thread_credentials(None));
    })
    .join()
    .unwrap();
}

#[test]
fn threads_with_distinct_credentials_are_isolated() {
    let _guard = global_session();
    session::reset();

    let global_server = common::setup_server();
    let global_base = common::api_base(&global_server);
    session::initialize(None, Some(global_base.clone()), None);
    session::set_deadline(30_000);

    let server_one = common::setup_server();
    let server_two = common::setup_server();
    let mock_one = server_one.mock(|when, then| {
        when.method(POST)
            .path("/api/value")
            .header("authorization", "Bearer token-one");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"data": "one"}"#);
    });
    let mock_two = server_two.mock(|when, then| {
        when.method(POST)
            .path("/api/value")
            .header("authorization", "Bearer token-two");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"data": "two"}"#);
    });

    let base_one = common::api_base(&server_one);
    let base_two = common::api_base(&server_two);

    let worker = |token: &'static str, base: Url, deadline: u64, expect: &'static str| {
        move || {
            assert!(session::set_thread_credentials(Some(Credentials::bearer(
                token
            ))));
            session::initialize(None, Some(base.clone()), None);
            session::set_deadline(deadline);

            let value = session::send("/value", &[], HttpMethod::Post).unwrap();
            assert_eq!(value, json!(expect));
            assert_eq!(session::current().api_base(), base);
            assert_eq!(
                session::current().deadline(),
                Some(Duration::from_millis(deadline))
            );
        }
    };

    let t1 = thread::spawn(worker("token-one", base_one, 1_000, "one"));
    let t2 = thread::spawn(worker("token-two", base_two, 2_000, "two"));
    t1.join().unwrap();
    t2.join().unwrap();

    mock_one.assert();
    mock_two.assert();

    // the shared session never observed the per-thread overrides
    assert_eq!(session::current().api_base(), global_base);
    assert_eq!(
        session::current().deadline(),
        Some(Duration::from_millis(30_000))
    );

    session::reset();
}

#[test]
fn clearing_thread_credentials_rejoins_the_shared_session() {
    let _guard = global_session();
    session::reset();

    let server = common::setup_server();
    let base = common::api_base(&server);
    session::initialize(None, Some(base.clone()), None);

    let shared_base = base.clone();
    thread::spawn(move || {
        // a fresh override starts from defaults, not from the shared configuration
        assert!(session::set_thread_credentials(Some(Credentials::bearer(
            "tok"
        ))));
        assert!(
            session::current()
                .api_base()
                .as_str()
                .contains("earthengine.googleapis.com")
        );

        assert!(session::set_thread_credentials(None));
        assert_eq!(session::current().api_base(), shared_base);
    })
    .join()
    .unwrap();

    session::reset();
}
