//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector describes the options, the expected request URL, a simulated
//! response and either the decoded result or the expected error variant.
//! Results are compared as decoded values, so key order in the vector files
//! does not matter.

use pagerduty_core::{
    ApiError, GetLogEntryOptions, HttpResponse, ListLogEntriesOptions, ListLogEntryResponse,
    LogEntry, LogEntryClient,
};

const BASE_URL: &str = "https://api.pagerduty.com";

fn client() -> LogEntryClient {
    LogEntryClient::new(BASE_URL)
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_error_kind(name: &str, err: &ApiError, expected: &str) {
    let matched = match expected {
        "EncodingError" => matches!(err, ApiError::EncodingError(_)),
        "NotFound" => matches!(err, ApiError::NotFound),
        "HttpError" => matches!(err, ApiError::HttpError { .. }),
        "DeserializationError" => matches!(err, ApiError::DeserializationError(_)),
        "MissingField" => matches!(err, ApiError::MissingField("log_entry")),
        other => panic!("{name}: unknown expected_error: {other}"),
    };
    assert!(matched, "{name}: expected {expected}, got {err:?}");
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let options: ListLogEntriesOptions = serde_json::from_value(case["options"].clone()).unwrap();

        // Verify build
        let req = c.build_list_log_entries(&options).unwrap();
        let expected_url = case["expected_request"]["url"].as_str().unwrap();
        assert_eq!(req.url, format!("{BASE_URL}{expected_url}"), "{name}: url");
        assert!(!req.url.contains("=&"), "{name}: blank parameter");

        // Verify parse
        let result = c.parse_list_log_entries(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, &result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            let list = result.unwrap();
            let expected: ListLogEntryResponse =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(list, expected, "{name}: parsed result");
            let raw_entries = case["expected_result"]["log_entries"].as_array().unwrap();
            assert_eq!(list.log_entries.len(), raw_entries.len(), "{name}: entry count");
        }
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let raw = include_str!("../../test-vectors/get.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let options: GetLogEntryOptions = serde_json::from_value(case["options"].clone()).unwrap();

        // Verify build; a case without an expected request must fail here.
        let req = c.build_get_log_entry(id, &options);
        let Some(expected_request) = case.get("expected_request") else {
            let expected = case["expected_error"].as_str().unwrap();
            assert_error_kind(name, &req.unwrap_err(), expected);
            continue;
        };
        let req = req.unwrap();
        let expected_url = expected_request["url"].as_str().unwrap();
        assert_eq!(req.url, format!("{BASE_URL}{expected_url}"), "{name}: url");

        // Verify parse
        let result = c.parse_get_log_entry(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, &result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            let entry = result.unwrap();
            let expected: LogEntry = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(entry, expected, "{name}: parsed result");
        }
    }
}
