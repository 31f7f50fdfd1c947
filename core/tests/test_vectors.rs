//! Verify request composition against JSON test vectors stored in `test-vectors/`.
//!
//! Each case configures a helper, performs one call through a recording
//! transport and compares the captured `HttpRequest` with the expected one.
//! Bodies are compared as parsed JSON, not strings, so key order is irrelevant.

use std::cell::RefCell;

use http_helper::{
    ClientConfig, FormData, Headers, HttpHelper, HttpMethod, HttpRequest, HttpResponse, Params,
    RequestBody, Transport, TransportError,
};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct Recorder {
    requests: RefCell<Vec<HttpRequest>>,
}

impl Transport for Recorder {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: Vec::new(),
        })
    }
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn string_map<T: serde::de::DeserializeOwned + Default>(value: &serde_json::Value) -> T {
    if value.is_null() {
        return T::default();
    }
    serde_json::from_value(value.clone()).unwrap()
}

fn parse_body(value: &serde_json::Value) -> RequestBody {
    match value["kind"].as_str().unwrap() {
        "empty" => RequestBody::Empty,
        "form" => RequestBody::Form(string_map::<FormData>(&value["value"])),
        "json" => RequestBody::Json(value["value"].clone()),
        other => panic!("unknown body kind: {other}"),
    }
}

// ---------------------------------------------------------------------------
// URL composition
// ---------------------------------------------------------------------------

#[test]
fn url_test_vectors() {
    let raw = include_str!("../../test-vectors/urls.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let recorder = Recorder::default();
        let helper = HttpHelper::with_transport(
            ClientConfig::new(case["base_url"].as_str()),
            &recorder,
        );

        let endpoint = case["endpoint"].as_str().unwrap();
        helper.get(endpoint, None).unwrap();

        let sent = recorder.requests.borrow();
        assert_eq!(sent[0].url, case["expected_url"].as_str().unwrap(), "{name}: url");
    }
}

// ---------------------------------------------------------------------------
// Full requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let recorder = Recorder::default();
        let mut helper = HttpHelper::with_transport(
            ClientConfig::new(case["base_url"].as_str()),
            &recorder,
        );
        helper.set_headers(string_map::<Headers>(&case["headers"]));
        if let Some(token) = case["auth"].as_str() {
            helper.set_auth(token);
        }

        let call = &case["call"];
        let endpoint = call["endpoint"].as_str().unwrap();
        let params = string_map::<Params>(&call["params"]);
        let form = (!call["form"].is_null()).then(|| string_map::<FormData>(&call["form"]));
        let json = (!call["json"].is_null()).then(|| call["json"].clone());
        let body = RequestBody::from_parts(form, json).unwrap();

        match parse_method(call["method"].as_str().unwrap()) {
            HttpMethod::Get => helper.get(endpoint, Some(&params)),
            HttpMethod::Delete => helper.delete(endpoint, Some(&params)),
            HttpMethod::Post => helper.post(endpoint, body),
            HttpMethod::Put => helper.put(endpoint, body),
        }
        .unwrap();

        let expected = &case["expected_request"];
        let expected = HttpRequest {
            method: parse_method(expected["method"].as_str().unwrap()),
            url: expected["url"].as_str().unwrap().to_string(),
            query: string_map::<Params>(&expected["query"]),
            headers: string_map::<Headers>(&expected["headers"]),
            body: parse_body(&expected["body"]),
        };

        let sent = recorder.requests.borrow();
        assert_eq!(sent.len(), 1, "{name}: request count");
        assert_eq!(sent[0], expected, "{name}: request");
    }
}
