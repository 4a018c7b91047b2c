//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and either the expected parse result or the expected error message.
//! Bodies are compared as parsed JSON, not raw strings.

use blog_core::{HttpMethod, HttpRequest, HttpResponse, Post, PostClient, PostId};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:9501/blog/api/blog_entry";

fn client() -> PostClient {
    PostClient::new(BASE_URL)
}

fn cases(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn input_id(case: &Value) -> PostId {
    PostId::new(case["input_id"].as_str().unwrap())
}

fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    if let Some(headers) = expected.get("headers") {
        let expected_headers: Vec<(String, String)> = headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match expected.get("body") {
        Some(body) => {
            let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

/// Compare a parse outcome with either `expected_error` or `expected_result`.
fn check_outcome<T>(name: &str, case: &Value, outcome: Result<T, blog_core::ClientError>)
where
    T: std::fmt::Debug + PartialEq + serde::de::DeserializeOwned,
{
    match case.get("expected_error") {
        Some(message) => {
            let err = outcome.unwrap_err();
            assert_eq!(err.to_string(), message.as_str().unwrap(), "{name}: error");
        }
        None => {
            let value = outcome.unwrap();
            if let Some(expected) = case.get("expected_result") {
                let expected: T = serde_json::from_value(expected.clone()).unwrap();
                assert_eq!(value, expected, "{name}: parsed result");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();
        check_request(name, &c.build_list(), &case["expected_request"]);
        check_outcome::<Vec<Post>>(name, &case, c.parse_list(simulated(&case)));
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        let id = input_id(&case);
        check_request(name, &c.build_get(&id), &case["expected_request"]);
        check_outcome::<Post>(name, &case, c.parse_get(&id, simulated(&case)));
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: Post = serde_json::from_value(case["input"].clone()).unwrap();
        check_request(name, &c.build_create(input.fields()), &case["expected_request"]);
        check_outcome::<Post>(name, &case, c.parse_create(&input, simulated(&case)));
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let id = input_id(&case);
        let input: Post = serde_json::from_value(case["input"].clone()).unwrap();
        check_request(name, &c.build_update(&id, input.fields()), &case["expected_request"]);
        check_outcome::<()>(name, &case, c.parse_update(simulated(&case)));
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let id = input_id(&case);
        check_request(name, &c.build_delete(&id), &case["expected_request"]);
        check_outcome::<()>(name, &case, c.parse_delete(simulated(&case)));
    }
}
