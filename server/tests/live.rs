//! End-to-end checks over real TCP.
//!
//! Starts the server on a random port in a background thread, then drives it
//! with ureq.

use serde_json::Value;
use todo_core::TodoStore;

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_server::run(listener, TodoStore::seeded(), std::future::pending()).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

fn read_json(mut response: ureq::http::Response<ureq::Body>) -> (u16, Value) {
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    (status, serde_json::from_str(&body).unwrap())
}

#[test]
fn crud_over_http() {
    let base = start_server();
    let agent = agent();

    let (status, body) = read_json(agent.get(&format!("{base}/health")).call().unwrap());
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");

    let (status, created) = read_json(
        agent
            .post(&format!("{base}/api/todos"))
            .content_type("application/json")
            .send(r#"{"title":"Over the wire"}"#.as_bytes())
            .unwrap(),
    );
    assert_eq!(status, 201);
    assert_eq!(created["id"], 3);
    assert_eq!(created["completed"], false);
    assert!(!created["created_at"].as_str().unwrap().is_empty());

    let (status, updated) = read_json(
        agent
            .put(&format!("{base}/api/todos/3"))
            .content_type("application/json")
            .send(r#"{"completed":true}"#.as_bytes())
            .unwrap(),
    );
    assert_eq!(status, 200);
    assert_eq!(updated["title"], "Over the wire");
    assert_eq!(updated["completed"], true);

    let (status, stats) =
        read_json(agent.get(&format!("{base}/api/todos/stats")).call().unwrap());
    assert_eq!(status, 200);
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["completed"], 1);

    let (status, _) = read_json(agent.delete(&format!("{base}/api/todos/3")).call().unwrap());
    assert_eq!(status, 200);

    let (status, body) = read_json(agent.get(&format!("{base}/api/todos/3")).call().unwrap());
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Todo not found");

    let (status, body) = read_json(agent.get(&format!("{base}/nope")).call().unwrap());
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Not found");
}

#[test]
fn concurrent_creates_get_distinct_ids() {
    let base = start_server();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let base = base.clone();
            std::thread::spawn(move || {
                let (status, todo) = read_json(
                    agent()
                        .post(&format!("{base}/api/todos"))
                        .content_type("application/json")
                        .send(format!(r#"{{"title":"task {i}"}}"#).as_bytes())
                        .unwrap(),
                );
                assert_eq!(status, 201);
                todo["id"].as_u64().unwrap()
            })
        })
        .collect();

    let mut ids: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids, (3..11).collect::<Vec<_>>());
}
