//! End-to-end checks against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every client
//! operation over real HTTP with `UreqTransport`, so request building,
//! query encoding and envelope decoding are exercised against an actual
//! axum router.

use pagerduty_core::{
    ApiError, Channel, ClientConfig, GetLogEntryOptions, ListLogEntriesOptions, LogEntryClient,
    LogEntryInclude, UreqTransport,
};

fn start_mock_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn log_entries_over_http() {
    let addr = start_mock_server();
    let config = ClientConfig {
        base_url: format!("http://{addr}/"),
        timeout: Some(std::time::Duration::from_secs(5)),
    };
    let client = LogEntryClient::from_config(&config);
    let transport =
        UreqTransport::from_config(&config).with_header("authorization", "Token token=test");

    // Step 1: list everything.
    let options = ListLogEntriesOptions {
        time_zone: "UTC".to_string(),
        total: true,
        ..Default::default()
    };
    let all = client.list_log_entries(&transport, &options).unwrap();
    assert_eq!(all.log_entries.len(), 5);
    assert_eq!(all.total, Some(5));
    assert!(!all.more);

    // Step 2: page through with offset/limit.
    let options = ListLogEntriesOptions {
        offset: Some(2),
        limit: Some(2),
        ..Default::default()
    };
    let page = client.list_log_entries(&transport, &options).unwrap();
    assert_eq!((page.offset, page.limit), (2, 2));
    assert!(page.more);
    let ids: Vec<&str> = page.log_entries.iter().map(|e| e.id()).collect();
    assert_eq!(ids, ["N1K3DMW8QZ0VJA", "T8S1VUJ4E5GHLZ"]);

    // Step 3: overview with includes and a time window.
    let options = ListLogEntriesOptions {
        since: Some("2024-03-01T00:00:00Z".to_string()),
        until: Some("2024-03-02T00:00:00Z".to_string()),
        is_overview: true,
        includes: [LogEntryInclude::Incidents, LogEntryInclude::Teams]
            .into_iter()
            .collect(),
        ..Default::default()
    };
    let overview = client.list_log_entries(&transport, &options).unwrap();
    assert_eq!(overview.log_entries.len(), 3);
    assert!(overview
        .log_entries
        .iter()
        .all(|e| e.object.kind.as_deref() != Some("notify_log_entry")));

    // Step 4: per-incident listing.
    let disk = client
        .list_incident_log_entries(&transport, "PQ7VZ2B", &ListLogEntriesOptions::default())
        .unwrap();
    assert_eq!(disk.log_entries.len(), 1);
    assert!(matches!(
        disk.log_entries[0].channel,
        Some(Channel::WebTrigger { .. })
    ));

    // Step 5: fetch one entry through the envelope.
    let options = GetLogEntryOptions {
        time_zone: "Europe/Berlin".to_string(),
        includes: [LogEntryInclude::Channels].into_iter().collect(),
    };
    let trigger = client
        .get_log_entry(&transport, "T8S1VUJ4E5GHLZ", &options)
        .unwrap();
    assert_eq!(trigger.created_at, "2024-03-01T10:00:00Z");
    match trigger.channel {
        Some(Channel::Api { incident_key, .. }) => {
            assert_eq!(incident_key.as_deref(), Some("srv01/fire"))
        }
        other => panic!("unexpected channel: {other:?}"),
    }
    assert_eq!(trigger.event_details["description"], "The server is on fire.");

    // Step 6: unknown id surfaces as NotFound.
    let err = client
        .get_log_entry(&transport, "DOESNOTEXIST", &GetLogEntryOptions::default())
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}

#[test]
fn closed_port_is_a_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = LogEntryClient::new(&format!("http://{addr}"));
    let transport = UreqTransport::new();

    let err = client
        .list_log_entries(&transport, &ListLogEntriesOptions::default())
        .unwrap_err();
    assert!(matches!(err, ApiError::TransportError(_)), "got {err:?}");

    let err = client
        .get_log_entry(&transport, "Q02JTSNZWHSEKV", &GetLogEntryOptions::default())
        .unwrap_err();
    assert!(matches!(err, ApiError::TransportError(_)), "got {err:?}");
}
