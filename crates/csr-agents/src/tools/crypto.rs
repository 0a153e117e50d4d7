//! Cryptocurrency price tools.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Display};

use csr_agents_core::money::format_usd;
use csr_agents_core::tool::{Error as ToolError, Tool, ToolResult};
use reqwest::{Client, Response, Url};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

/// Default base URL of the CoinGecko API.
pub const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Prices keyed by coin id, then by currency, e.g.
/// `{"bitcoin": {"usd": 67123.45}}`.
pub type PriceTable = BTreeMap<String, BTreeMap<String, f64>>;

/// Errors from fetching prices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PriceError {
    /// The request failed or returned an error status.
    Request(String),
    /// The response body is not a price table.
    Payload(String),
}

impl Display for PriceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceError::Request(reason) => {
                write!(f, "price request failed: {reason}")
            }
            PriceError::Payload(reason) => {
                write!(f, "unexpected price payload: {reason}")
            }
        }
    }
}

impl Error for PriceError {}

/// A source of US dollar prices.
///
/// Like tools, the returned future must not borrow the source.
pub trait PriceSource: Send + Sync + 'static {
    /// Fetches the USD price of every coin in `coin_ids`.
    ///
    /// Unknown coins are left out of the table.
    fn usd_prices(
        &self,
        coin_ids: Vec<String>,
    ) -> impl Future<Output = Result<PriceTable, PriceError>> + Send + 'static;
}

/// A [`PriceSource`] backed by the CoinGecko `simple/price` endpoint.
#[derive(Clone, Debug)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

impl CoinGeckoClient {
    /// Creates a client for the public CoinGecko API.
    #[inline]
    pub fn new() -> Self {
        Self::with_base_url(COINGECKO_BASE_URL)
    }

    /// Creates a client for a custom base URL.
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Returns the base URL.
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn price_url(&self, coin_ids: &[String]) -> Result<Url, PriceError> {
        let mut url = Url::parse(&format!("{}/simple/price", self.base_url))
            .map_err(|err| PriceError::Request(err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("ids", &coin_ids.join(","))
            .append_pair("vs_currencies", "usd");
        Ok(url)
    }
}

impl Default for CoinGeckoClient {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl PriceSource for CoinGeckoClient {
    fn usd_prices(
        &self,
        coin_ids: Vec<String>,
    ) -> impl Future<Output = Result<PriceTable, PriceError>> + Send + 'static
    {
        let url = self.price_url(&coin_ids);
        let client = self.client.clone();

        async move {
            let url = url?;
            debug!("fetching prices from {url}");
            let resp = client
                .get(url)
                .send()
                .await
                .and_then(Response::error_for_status)
                .map_err(|err| PriceError::Request(err.to_string()))?;
            resp.json::<PriceTable>()
                .await
                .map_err(|err| PriceError::Payload(err.to_string()))
        }
    }
}

/// Input of [`CryptoPricesTool`].
#[derive(Deserialize, JsonSchema)]
pub struct CryptoPricesParameters {
    #[schemars(
        description = "CoinGecko coin ids, e.g. [\"bitcoin\", \"ethereum\"]. Request all coins in one call."
    )]
    coin_ids: Vec<String>,
}

/// A tool for fetching the USD prices of several coins at once.
pub struct CryptoPricesTool<S> {
    source: S,
    parameter_schema: Value,
}

impl<S: PriceSource> CryptoPricesTool<S> {
    /// Creates a new crypto prices tool.
    #[inline]
    pub fn new(source: S) -> Self {
        CryptoPricesTool {
            source,
            parameter_schema: schema_for!(CryptoPricesParameters).to_value(),
        }
    }
}

impl<S: PriceSource> Tool for CryptoPricesTool<S> {
    type Input = CryptoPricesParameters;

    fn name(&self) -> &str {
        "get_crypto_prices"
    }

    fn description(&self) -> &str {
        r#"
Gets real-time USD prices of cryptocurrencies.
Returns a JSON object like {"bitcoin": {"usd": 67123.45}}."#
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: CryptoPricesParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let coin_ids: Vec<_> = input
            .coin_ids
            .iter()
            .map(|id| id.trim().to_lowercase())
            .filter(|id| !id.is_empty())
            .collect();
        let fut = (!coin_ids.is_empty())
            .then(|| self.source.usd_prices(coin_ids));

        async move {
            let Some(fut) = fut else {
                return Err(ToolError::invalid_input()
                    .with_reason("`coin_ids` must not be empty"));
            };
            let table = fut.await.map_err(|err| {
                ToolError::execution_error().with_reason(err.to_string())
            })?;
            serde_json::to_string(&table).map_err(|err| {
                ToolError::execution_error().with_reason(err.to_string())
            })
        }
    }
}

/// Input of [`BitcoinPriceTool`], which takes no arguments.
#[derive(Deserialize, JsonSchema)]
pub struct BitcoinPriceParameters {}

/// A tool for fetching the bitcoin price as display text.
pub struct BitcoinPriceTool<S> {
    source: S,
    parameter_schema: Value,
}

impl<S: PriceSource> BitcoinPriceTool<S> {
    /// Creates a new bitcoin price tool.
    #[inline]
    pub fn new(source: S) -> Self {
        BitcoinPriceTool {
            source,
            parameter_schema: schema_for!(BitcoinPriceParameters).to_value(),
        }
    }
}

impl<S: PriceSource> Tool for BitcoinPriceTool<S> {
    type Input = BitcoinPriceParameters;

    fn name(&self) -> &str {
        "get_price"
    }

    fn description(&self) -> &str {
        "Gets the current bitcoin price in US dollars."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        _input: BitcoinPriceParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let fut = self.source.usd_prices(vec!["bitcoin".to_owned()]);

        async move {
            let table = fut.await.map_err(|err| {
                ToolError::execution_error().with_reason(err.to_string())
            })?;
            let Some(price) = table.get("bitcoin").and_then(|p| p.get("usd"))
            else {
                return Err(ToolError::execution_error()
                    .with_reason("no USD price for bitcoin"));
            };
            Ok(format!("{} USD.", format_usd(*price)))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future::ready;

    use csr_agents_core::tool::ErrorKind;

    use super::*;

    #[derive(Clone)]
    struct FixedPrices(PriceTable);

    impl PriceSource for FixedPrices {
        fn usd_prices(
            &self,
            coin_ids: Vec<String>,
        ) -> impl Future<Output = Result<PriceTable, PriceError>> + Send + 'static
        {
            let table = self
                .0
                .iter()
                .filter(|(id, _)| coin_ids.contains(*id))
                .map(|(id, prices)| (id.clone(), prices.clone()))
                .collect();
            ready(Ok(table))
        }
    }

    struct Offline;

    impl PriceSource for Offline {
        fn usd_prices(
            &self,
            _coin_ids: Vec<String>,
        ) -> impl Future<Output = Result<PriceTable, PriceError>> + Send + 'static
        {
            ready(Err(PriceError::Request("connection refused".to_owned())))
        }
    }

    fn fixed_prices() -> FixedPrices {
        let mut table = PriceTable::new();
        for (id, price) in [("bitcoin", 67123.45), ("ethereum", 3456.7)] {
            table.insert(id.to_owned(), BTreeMap::from([("usd".to_owned(), price)]));
        }
        FixedPrices(table)
    }

    fn coin_ids(ids: &[&str]) -> CryptoPricesParameters {
        CryptoPricesParameters {
            coin_ids: ids.iter().map(|id| id.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_crypto_prices() {
        let tool = CryptoPricesTool::new(fixed_prices());
        let result = tool.execute(coin_ids(&["Bitcoin", " ethereum"])).await;
        let value: Value = serde_json::from_str(&result.unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "bitcoin": { "usd": 67123.45 },
                "ethereum": { "usd": 3456.7 }
            })
        );
    }

    #[tokio::test]
    async fn test_crypto_prices_errors() {
        let tool = CryptoPricesTool::new(fixed_prices());
        let err = tool.execute(coin_ids(&[])).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        let err = tool.execute(coin_ids(&["  "])).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let tool = CryptoPricesTool::new(Offline);
        let err = tool.execute(coin_ids(&["bitcoin"])).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExecutionError);
        assert_eq!(err.reason(), "price request failed: connection refused");
    }

    #[tokio::test]
    async fn test_bitcoin_price() {
        let tool = BitcoinPriceTool::new(fixed_prices());
        let result = tool.execute(BitcoinPriceParameters {}).await;
        assert_eq!(result.unwrap(), "$67,123.45 USD.");

        let tool = BitcoinPriceTool::new(FixedPrices(PriceTable::new()));
        let err = tool.execute(BitcoinPriceParameters {}).await.unwrap_err();
        assert_eq!(err.reason(), "no USD price for bitcoin");
    }

    #[test]
    fn test_price_url() {
        let client = CoinGeckoClient::with_base_url("http://localhost:1234/api/");
        assert_eq!(client.base_url(), "http://localhost:1234/api");

        let url = client
            .price_url(&["bitcoin".to_owned(), "ethereum".to_owned()])
            .unwrap();
        assert_eq!(url.path(), "/api/simple/price");
        assert_eq!(url.query(), Some("ids=bitcoin%2Cethereum&vs_currencies=usd"));
    }
}
