//! Integration tests for the HTTP market-data adapters against mock servers

use httpmock::prelude::*;
use portfolio_ledger::infrastructure::{BrapiClient, FinnhubClient};
use portfolio_ledger::{Country, MarketDataProvider, ProviderError, Symbol};
use rust_decimal_macros::dec;
use serde_json::json;
use std::time::Duration;

fn sym(s: &str) -> Symbol {
    Symbol::new(s).unwrap()
}

fn finnhub(server: &MockServer) -> FinnhubClient {
    FinnhubClient::new(&server.base_url(), "test-key".to_string(), Duration::from_secs(2)).unwrap()
}

mod finnhub {
    use super::*;

    #[tokio::test]
    async fn test_lookup_picks_exact_ticker() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search")
                    .query_param("q", "AAPL")
                    .header("x-finnhub-token", "test-key");
                then.status(200).json_body(json!({
                    "count": 2,
                    "result": [
                        { "description": "APPLE INC", "displaySymbol": "AAPL.SW", "symbol": "AAPL.SW", "type": "Common Stock" },
                        { "description": "APPLE INC", "displaySymbol": "AAPL", "symbol": "AAPL", "type": "Common Stock" }
                    ]
                }));
            })
            .await;

        let lookup = finnhub(&server)
            .lookup_symbol(&sym("AAPL"), Country::Us)
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(lookup.name, "APPLE INC");
        assert_eq!(lookup.raw_type, "Common Stock");
        assert_eq!(lookup.country, Country::Us);
    }

    #[tokio::test]
    async fn test_lookup_without_match_is_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(200).json_body(json!({ "count": 0, "result": [] }));
            })
            .await;

        let err = finnhub(&server)
            .lookup_symbol(&sym("ZZZZ"), Country::Us)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_quote() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/quote").query_param("symbol", "AAPL");
                then.status(200).json_body(json!({
                    "c": 189.5, "d": 1.5, "dp": 0.8, "h": 190.25, "l": 187.0,
                    "o": 188.0, "pc": 188.0, "t": 1_700_000_000
                }));
            })
            .await;

        let price = finnhub(&server).price(&sym("AAPL"), Country::Us).await.unwrap();
        assert_eq!(price.current, dec!(189.5));
        assert_eq!(price.high, dec!(190.25));
        assert_eq!(price.previous_close, dec!(188));
        assert_eq!(price.timestamp.timestamp(), 1_700_000_000);
    }

    #[tokio::test]
    async fn test_zero_quote_is_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/quote");
                then.status(200).json_body(json!({
                    "c": 0, "d": null, "dp": null, "h": 0, "l": 0, "o": 0, "pc": 0, "t": 0
                }));
            })
            .await;

        let err = finnhub(&server)
            .price(&sym("ZZZZ"), Country::Us)
            .await
            .unwrap_err();
        assert_eq!(err, ProviderError::NotFound("ZZZZ".into()));
    }

    #[tokio::test]
    async fn test_server_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/quote");
                then.status(500).body("upstream exploded");
            })
            .await;

        let err = finnhub(&server)
            .price(&sym("AAPL"), Country::Us)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProviderError::Api {
                status: 500,
                message: "upstream exploded".into()
            }
        );
    }

    #[tokio::test]
    async fn test_profile() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/stock/profile2").query_param("symbol", "AAPL");
                then.status(200).json_body(json!({
                    "country": "US", "name": "Apple Inc", "finnhubIndustry": "Technology"
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/stock/profile2").query_param("symbol", "ZZZZ");
                then.status(200).json_body(json!({}));
            })
            .await;

        let client = finnhub(&server);
        let profile = client.company_profile(&sym("AAPL")).await.unwrap().unwrap();
        assert_eq!(profile.industry.as_deref(), Some("Technology"));
        assert!(client.company_profile(&sym("ZZZZ")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_client_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/quote");
                then.status(200)
                    .delay(Duration::from_millis(500))
                    .json_body(json!({ "c": 1, "h": 1, "l": 1, "o": 1, "pc": 1, "t": 1 }));
            })
            .await;

        let client =
            FinnhubClient::new(&server.base_url(), "k".to_string(), Duration::from_millis(50))
                .unwrap();
        let err = client.price(&sym("AAPL"), Country::Us).await.unwrap_err();
        assert_eq!(err, ProviderError::Timeout(50));
    }

    #[tokio::test]
    async fn test_rejects_other_markets() {
        let server = MockServer::start_async().await;
        let err = finnhub(&server)
            .price(&sym("ITSA4"), Country::Br)
            .await
            .unwrap_err();
        assert_eq!(err, ProviderError::UnsupportedMarket(Country::Br));
    }
}

mod brapi {
    use super::*;

    fn brapi(server: &MockServer) -> BrapiClient {
        BrapiClient::new(
            &server.base_url(),
            Some("brapi-token".to_string()),
            Duration::from_secs(2),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_lookup_carries_type_and_sector() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/quote/list")
                    .query_param("search", "HGLG11")
                    .header("authorization", "Bearer brapi-token");
                then.status(200).json_body(json!({
                    "stocks": [
                        { "stock": "HGLG11", "name": "CSHG LOGISTICA FII", "close": 160.1,
                          "sector": null, "type": "fund" }
                    ]
                }));
            })
            .await;

        let lookup = brapi(&server)
            .lookup_symbol(&sym("HGLG11"), Country::Br)
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(lookup.raw_type, "fund");
        assert_eq!(lookup.sector, None);
        assert_eq!(lookup.country, Country::Br);
    }

    #[tokio::test]
    async fn test_quote() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/quote/ITSA4");
                then.status(200).json_body(json!({
                    "results": [{
                        "symbol": "ITSA4",
                        "shortName": "ITAUSA PN",
                        "regularMarketPrice": 10.42,
                        "regularMarketDayHigh": 10.5,
                        "regularMarketDayLow": 10.3,
                        "regularMarketOpen": 10.35,
                        "regularMarketPreviousClose": 10.31,
                        "regularMarketTime": "2024-05-10T20:07:00.000Z"
                    }]
                }));
            })
            .await;

        let price = brapi(&server).price(&sym("ITSA4"), Country::Br).await.unwrap();
        assert_eq!(price.current, dec!(10.42));
        assert_eq!(price.open, dec!(10.35));
        assert_eq!(price.previous_close, dec!(10.31));
        assert_eq!(price.timestamp.to_rfc3339(), "2024-05-10T20:07:00+00:00");
    }

    #[tokio::test]
    async fn test_unknown_ticker() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/quote/XXXX3");
                then.status(404)
                    .json_body(json!({ "error": true, "message": "Não encontramos a ação XXXX3" }));
            })
            .await;

        let err = brapi(&server)
            .price(&sym("XXXX3"), Country::Br)
            .await
            .unwrap_err();
        assert_eq!(err, ProviderError::NotFound("XXXX3".into()));
    }
}
