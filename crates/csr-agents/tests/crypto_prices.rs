use csr_agents::core::tool::{ErrorKind, ToolCall};
use csr_agents::tools::{CoinGeckoClient, PriceError, PriceSource};
use csr_agents::{Demo, SessionBuilder};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_prices(server: &MockServer, ids: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("ids", ids))
        .and(query_param("vs_currencies", "usd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn coingecko_client_reads_price_table() {
    let server = MockServer::start().await;
    mount_prices(
        &server,
        "bitcoin,ethereum",
        json!({
            "bitcoin": { "usd": 67123.45 },
            "ethereum": { "usd": 3456.7 }
        }),
    )
    .await;

    let client = CoinGeckoClient::with_base_url(server.uri());
    let table = client
        .usd_prices(vec!["bitcoin".to_owned(), "ethereum".to_owned()])
        .await
        .expect("prices should be fetched");

    assert_eq!(table.len(), 2);
    assert_eq!(table["bitcoin"]["usd"], 67123.45);
    assert_eq!(table["ethereum"]["usd"], 3456.7);
}

#[tokio::test]
async fn coingecko_client_reports_http_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = CoinGeckoClient::with_base_url(server.uri());
    let err = client
        .usd_prices(vec!["bitcoin".to_owned()])
        .await
        .expect_err("rate limited request should fail");
    assert!(matches!(err, PriceError::Request(_)), "{err}");
}

#[tokio::test]
async fn coingecko_client_rejects_unexpected_payload() {
    let server = MockServer::start().await;
    mount_prices(&server, "bitcoin", json!({ "status": "ok" })).await;

    let client = CoinGeckoClient::with_base_url(server.uri());
    let err = client
        .usd_prices(vec!["bitcoin".to_owned()])
        .await
        .expect_err("payload is not a price table");
    assert!(matches!(err, PriceError::Payload(_)), "{err}");
}

#[tokio::test]
async fn crypto_demo_calls_price_tools_through_session() {
    let server = MockServer::start().await;
    mount_prices(
        &server,
        "bitcoin,ethereum",
        json!({
            "bitcoin": { "usd": 67123.45 },
            "ethereum": { "usd": 3456.7 }
        }),
    )
    .await;

    let session = SessionBuilder::for_demo(Demo::Crypto)
        .with_price_source(CoinGeckoClient::with_base_url(server.uri()))
        .build()
        .expect("crypto demo should be valid");
    assert_eq!(session.entry_agent().name(), "cryptonAgent");

    let output = session
        .call_tool(ToolCall::new(
            "call_1",
            "get_crypto_prices",
            json!({ "coin_ids": ["bitcoin", "ethereum"] }),
        ))
        .await;
    let prices: Value =
        serde_json::from_str(&output.result.expect("tool should succeed"))
            .expect("tool output should be JSON");
    assert_eq!(prices["ethereum"]["usd"], json!(3456.7));

    let output = session
        .call_tool(ToolCall::new("call_2", "get_crypto_prices", json!({ "coin_ids": [] })))
        .await;
    assert_eq!(
        output.result.expect_err("empty ids").kind(),
        ErrorKind::InvalidInput
    );
}

#[tokio::test]
async fn bitcoin_price_is_formatted() {
    let server = MockServer::start().await;
    mount_prices(&server, "bitcoin", json!({ "bitcoin": { "usd": 67123.45 } }))
        .await;

    let session = SessionBuilder::for_demo(Demo::Crypto)
        .with_price_source(CoinGeckoClient::with_base_url(server.uri()))
        .build()
        .expect("crypto demo should be valid");
    let output = session
        .call_tool(ToolCall::new("call_1", "get_price", Value::Null))
        .await;
    assert_eq!(output.content(), "$67,123.45 USD.");
}
