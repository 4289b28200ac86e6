//! Verify request building against JSON test vectors stored in `test-vectors/`.
//!
//! Each case names an operation, its input and the identity cookie in play,
//! and describes the request that must come out. Headers are the same for
//! every case and are checked once per case against the configured values.

use std::collections::HashMap;
use std::sync::Arc;

use discussion_core::{
    ClientConfig, CommentDraft, CommentId, DiscussionClient, HttpMethod, HttpRequest, Payload,
    TransportMode, UserId,
};

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_mode(s: &str) -> TransportMode {
    match s {
        "jsonp" => TransportMode::Jsonp,
        "json" => TransportMode::Json,
        other => panic!("unknown mode: {other}"),
    }
}

fn build(
    client: &DiscussionClient<(), HashMap<String, String>>,
    operation: &str,
    input: &serde_json::Value,
) -> HttpRequest {
    let comment_id = || CommentId(input["id"].as_u64().unwrap());
    match operation {
        "post_comment" => {
            let draft: CommentDraft = serde_json::from_value(input["draft"].clone()).unwrap();
            client.build_post_comment(input["discussion_id"].as_str().unwrap(), &draft)
        }
        "recommend_comment" => client.build_recommend_comment(comment_id()),
        "pick_comment" => client.build_pick_comment(comment_id()),
        "unpick_comment" => client.build_unpick_comment(comment_id()),
        "get_user" => client.build_get_user(input["id"].as_u64().map(UserId)),
        other => panic!("unknown operation: {other}"),
    }
}

#[test]
fn endpoint_test_vectors() {
    let raw = include_str!("../../test-vectors/endpoints.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let api_root = vectors["config"]["api_root"].as_str().unwrap();
    let client_header = vectors["config"]["client_header"].as_str().unwrap();
    let config = Arc::new(ClientConfig::new(api_root, client_header));

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let mut cookies = HashMap::new();
        if let Some(identity) = case["identity"].as_str() {
            cookies.insert("GU_U".to_string(), identity.to_string());
        }
        // No transport: only the build_* side is exercised here.
        let client = DiscussionClient::new(config.clone(), (), cookies);

        let req = build(&client, case["operation"].as_str().unwrap(), &case["input"]);
        let expected = &case["expected_request"];

        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, expected["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(req.mode, parse_mode(expected["mode"].as_str().unwrap()), "{name}: mode");
        assert!(req.cross_origin, "{name}: cross origin");

        let expected_payload: Payload = serde_json::from_value(expected["payload"].clone()).unwrap();
        assert_eq!(req.payload, expected_payload, "{name}: payload");

        assert_eq!(req.header("D2-X-UID"), Some("zHoBy6HNKsk"), "{name}: uid header");
        assert_eq!(req.header("GU-Client"), Some(client_header), "{name}: client header");
    }
}
