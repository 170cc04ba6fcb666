use polars::prelude::*;
use serde_json::json;
use soda_frame::{cast_float, fetch_frame, summarize_by, FrameError};
use soda_sources::{ClientConfig, Endpoint, ResourceClient, SoqlQuery};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn contributions_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resource/f92i-ik66.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"recipient": "A", "amount": "100"},
            {"recipient": "B", "amount": "50"},
            {"recipient": "A", "amount": "30"}
        ])))
        .mount(&server)
        .await;
    server
}

fn client_for(server: &MockServer) -> ResourceClient {
    ResourceClient::new(
        Endpoint::anonymous(server.address().to_string()),
        ClientConfig::default().with_uri_prefix("http://"),
    )
    .expect("build client")
}

#[tokio::test]
async fn fetch_cast_and_summarize() {
    let server = contributions_server().await;
    let client = client_for(&server);

    let df = fetch_frame(&client, "f92i-ik66", &SoqlQuery::new()).await.unwrap();
    assert_eq!(df.shape(), (3, 2));

    let df = cast_float(&df, "amount").unwrap();
    let summary = summarize_by(&df, "recipient", "amount").unwrap();

    let keys = summary.column("recipient").unwrap().as_materialized_series().str().unwrap().clone();
    let sums = summary.column("sum").unwrap().as_materialized_series().f64().unwrap().clone();
    assert_eq!(keys.get(0), Some("A"));
    assert_eq!(sums.get(0), Some(130.0));
    assert_eq!(keys.get(1), Some("B"));
    assert_eq!(sums.get(1), Some(50.0));
}

#[tokio::test]
async fn fetch_errors_surface_as_source_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = fetch_frame(&client_for(&server), "nope-nope", &SoqlQuery::new())
        .await
        .unwrap_err();
    match err {
        FrameError::Source(source) => assert_eq!(source.status(), Some(404)),
        other => panic!("expected a source error, got {:?}", other),
    }
}

#[test]
fn summary_of_frame_without_rows_is_empty() {
    let df = DataFrame::new(vec![
        Series::new("recipient".into(), Vec::<String>::new()).into(),
        Series::new("amount".into(), Vec::<f64>::new()).into(),
    ])
    .unwrap();

    let summary = summarize_by(&df, "recipient", "amount").unwrap();
    assert_eq!(summary.height(), 0);
}
