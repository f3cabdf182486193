//! Tests for the chart generation client against a mock inference endpoint.

mod common;

use chrono::Utc;
use common::test_config;
use gamesight::chart::{ChartClient, FALLBACK_RATIONALE};
use gamesight::types::{Answer, ChartResult, QueryResult};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INFERENCE_PATH: &str = "/model/chart-model/invoke";

fn answer() -> Answer {
    Answer {
        text: "PS2 led lifetime sales.".into(),
        running_traces: vec![],
        query_results: vec![QueryResult {
            query: "SELECT platform, units FROM sales".into(),
            rows: vec![serde_json::json!({"platform": "PS2", "units": 155})],
        }],
        usage: vec![],
        total_input_tokens: 0,
        total_output_tokens: 0,
        rationale_count: 0,
        session_id: "sess-1".into(),
        created_at: Utc::now(),
    }
}

fn inference_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "content": [{"text": text}]
    }))
}

#[tokio::test]
async fn chart_reply_produces_normalized_spec() {
    let server = MockServer::start().await;
    let reply = concat!(
        "<has_chart>1</has_chart>\n",
        "<chart_type>\nbar\n</chart_type>\n",
        "<chart_configuration>\n",
        "{\"series\": [{\"data\": [\"155\"]}], \"height\": \"300\"}\n",
        "</chart_configuration>\n",
        "<caption>\nLifetime units by platform\n</caption>",
    );
    Mock::given(method("POST"))
        .and(path(INFERENCE_PATH))
        .respond_with(inference_reply(reply))
        .mount(&server)
        .await;

    let client = ChartClient::new(&test_config(&server.uri())).unwrap();
    let result = client.generate(&answer()).await;

    match result {
        ChartResult::Chart(spec) => {
            assert_eq!(spec.chart_type, "bar");
            assert_eq!(spec.caption, "Lifetime units by platform");
            assert_eq!(
                spec.chart_configuration,
                serde_json::json!({"series": [{"data": [155]}], "height": 300})
            );
        }
        ChartResult::NoChart { rationale } => panic!("expected chart, got: {rationale}"),
    }

    // The outbound prompt carries the answer text and the serialized rows.
    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["max_tokens"], 2000);
    assert_eq!(body["temperature"], 1.0);
    let prompt = body["messages"][0]["content"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("PS2 led lifetime sales."));
    assert!(prompt.contains("[{\"platform\":\"PS2\",\"units\":155}]"));
    assert!(!prompt.contains("<<answer>>"));
    assert!(!prompt.contains("<<data_sources>>"));
}

#[tokio::test]
async fn zero_has_chart_returns_model_rationale() {
    let server = MockServer::start().await;
    let reply = "<has_chart>0</has_chart><rationale>\nA single total does not chart well.\n</rationale>";
    Mock::given(method("POST"))
        .and(path(INFERENCE_PATH))
        .respond_with(inference_reply(reply))
        .mount(&server)
        .await;

    let client = ChartClient::new(&test_config(&server.uri())).unwrap();
    assert_eq!(
        client.generate(&answer()).await,
        ChartResult::NoChart {
            rationale: "A single total does not chart well.".into()
        }
    );
}

#[tokio::test]
async fn missing_has_chart_degrades_to_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INFERENCE_PATH))
        .respond_with(inference_reply("no tags in sight"))
        .mount(&server)
        .await;

    let client = ChartClient::new(&test_config(&server.uri())).unwrap();
    assert_eq!(
        client.generate(&answer()).await,
        ChartResult::NoChart {
            rationale: FALLBACK_RATIONALE.into()
        }
    );
}

#[tokio::test]
async fn transport_failure_degrades_to_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INFERENCE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = ChartClient::new(&test_config(&server.uri())).unwrap();
    assert_eq!(
        client.generate(&answer()).await,
        ChartResult::NoChart {
            rationale: FALLBACK_RATIONALE.into()
        }
    );
}

#[tokio::test]
async fn malformed_embedded_configuration_degrades_to_fallback() {
    let server = MockServer::start().await;
    let reply = concat!(
        "<has_chart>1</has_chart>",
        "<chart_type>bar</chart_type>",
        "<chart_configuration>{broken</chart_configuration>",
        "<caption>c</caption>",
    );
    Mock::given(method("POST"))
        .and(path(INFERENCE_PATH))
        .respond_with(inference_reply(reply))
        .mount(&server)
        .await;

    let client = ChartClient::new(&test_config(&server.uri())).unwrap();
    assert_eq!(
        client.generate(&answer()).await,
        ChartResult::NoChart {
            rationale: FALLBACK_RATIONALE.into()
        }
    );
}
