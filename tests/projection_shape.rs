use jwt_options::JwtOptions;
use serde_json::json;

#[test]
fn build_scenario_projects_expected_shape() {
    let options = JwtOptions::new()
        .set_algorithm("RS256")
        .set_issuer("issuer.example")
        .add_audience("svc-a")
        .add_audience("svc-b")
        .set_expires_in_seconds(3600)
        .set_no_timestamp(false);

    let projection = serde_json::to_value(&options).expect("projection");
    assert_eq!(
        projection,
        json!({
            "algorithm": "RS256",
            "issuer": "issuer.example",
            "audience": ["svc-a", "svc-b"],
            "expiresInSeconds": 3600,
            "noTimestamp": false
        })
    );

    // Key order on the wire follows mutation order.
    let text = serde_json::to_string(&options).expect("wire text");
    assert_eq!(
        text,
        r#"{"algorithm":"RS256","issuer":"issuer.example","audience":["svc-a","svc-b"],"expiresInSeconds":3600,"noTimestamp":false}"#
    );
}

#[test]
fn parse_scenario_exposes_typed_views() {
    let text = r#"{"algorithm":"HS512","permissions":["read","write"],"header":{"kid":"key-1"}}"#;
    let options: JwtOptions = serde_json::from_str(text).expect("parse");

    assert_eq!(options.algorithm().expect("algorithm"), "HS512");
    assert_eq!(
        options.permissions().expect("permissions"),
        Some(vec!["read", "write"])
    );
    let header = options.header().expect("header").expect("present");
    assert_eq!(header.get("kid"), Some(&json!("key-1")));
    assert_eq!(options.subject().expect("subject"), None);
    assert!(!options.no_timestamp().expect("noTimestamp"));
}

#[test]
fn remove_scenario_leaves_an_empty_projection() {
    let options: JwtOptions =
        serde_json::from_str(r#"{"expiresInMinutes":5}"#).expect("parse");
    let options = options.set_expires_in_minutes(None);

    assert_eq!(serde_json::to_value(&options).expect("projection"), json!({}));
    assert_eq!(serde_json::to_string(&options).expect("wire text"), "{}");
}

#[test]
fn merge_by_add_builds_the_header() {
    let options = JwtOptions::new().add_header("typ", "JWT").add_header("kid", "k");

    let header = options.header().expect("header").expect("present");
    assert_eq!(header.len(), 2);
    assert_eq!(header.get("typ"), Some(&json!("JWT")));
    assert_eq!(header.get("kid"), Some(&json!("k")));

    assert_eq!(
        serde_json::to_string(&options).expect("wire text"),
        r#"{"header":{"typ":"JWT","kid":"k"}}"#
    );
}

#[test]
fn add_header_merges_into_a_parsed_header() {
    let options: JwtOptions =
        serde_json::from_str(r#"{"header":{"typ":"JWT"}}"#).expect("parse");
    let options = options.add_header("kid", "rotation-2");

    assert_eq!(
        serde_json::to_string(&options).expect("wire text"),
        r#"{"header":{"typ":"JWT","kid":"rotation-2"}}"#
    );
}

#[test]
fn wire_text_round_trip_is_lossless() {
    // Unrecognized keys and their positions survive a parse/serialize cycle.
    let text = r#"{"algorithm":"HS512","x-tenant":"acme","audience":["svc"],"rotation":{"next":"k2"}}"#;
    let options: JwtOptions = serde_json::from_str(text).expect("parse");
    assert_eq!(serde_json::to_string(&options).expect("wire text"), text);
}

#[test]
fn deserializer_rejects_non_objects() {
    let attempt: Result<JwtOptions, _> = serde_json::from_str(r#"["HS256"]"#);
    assert!(attempt.is_err());

    let attempt: Result<JwtOptions, _> = serde_json::from_str("42");
    assert!(attempt.is_err());
}
