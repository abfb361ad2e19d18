//! Purpose: End-to-end tests for the HTTP listener and single-slot buffer.
//! Role: Posts real HTTP to an in-process endpoint and reads snapshots the
//! way the log consumer does.
//! Invariants: Bounded waits avoid test flakiness; port 0 avoids clashes.

use csgsi::core::decode_snapshot;
use csgsi::endpoint::GsiServer;
use serde_json::json;
use std::time::Duration;

fn post_url(server: &GsiServer) -> String {
    format!("http://{}/gsi", server.local_addr())
}

#[test]
fn posted_snapshot_reaches_the_reader() {
    let server = GsiServer::spawn("/gsi", 0).expect("spawn");
    let body = json!({"bomb": {"state": "planted", "countdown": "3.5"}});
    let response = ureq::post(&post_url(&server))
        .set("Content-Type", "application/json")
        .send_string(&body.to_string())
        .expect("post");
    assert_eq!(response.status(), 200);
    assert_eq!(response.into_string().expect("body"), "OK");

    let document = server
        .slot()
        .read_timeout(true, Duration::from_secs(5))
        .expect("snapshot in slot");
    let snapshot = decode_snapshot(&document).expect("decode");
    assert_eq!(
        snapshot.state.bomb.as_ref().and_then(|b| b.state.as_deref()),
        Some("planted")
    );
}

#[test]
fn newest_snapshot_overwrites_unread_predecessor() {
    let server = GsiServer::spawn("/gsi", 0).expect("spawn");
    for round in [1, 2] {
        let body = json!({"map": {"round": round}});
        ureq::post(&post_url(&server))
            .send_string(&body.to_string())
            .expect("post");
    }
    let document = server
        .slot()
        .read_timeout(true, Duration::from_secs(5))
        .expect("snapshot");
    assert_eq!(document["map"]["round"], 2);
    // The overwritten first snapshot is gone.
    assert!(server.read(true, false).is_none());
}

#[test]
fn non_json_body_is_rejected_and_not_buffered() {
    let server = GsiServer::spawn("/gsi", 0).expect("spawn");
    match ureq::post(&post_url(&server)).send_string("not json at all") {
        Err(ureq::Error::Status(code, _)) => assert_eq!(code, 400),
        other => panic!("expected 400 status, got {other:?}"),
    }
    assert!(server.read(false, false).is_none());
}

#[test]
fn path_without_leading_slash_is_normalized() {
    let server = GsiServer::spawn("gsi", 0).expect("spawn");
    let response = ureq::post(&post_url(&server))
        .send_string(&json!({}).to_string())
        .expect("post");
    assert_eq!(response.status(), 200);
}
