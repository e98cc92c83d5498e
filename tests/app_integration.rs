use std::fs;
use std::sync::Arc;
use tokenswap::core::config::AppConfig;
use tokenswap::core::{Field, PriceStore, SwapError, SwapRequest};
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const PRICES_JSON: &str = r#"[
        {"currency":"BLUR","date":"2023-08-29T07:10:40.000Z","price":0.20811525423728813},
        {"currency":"USDC","date":"2023-08-29T07:10:30.000Z","price":0.989832},
        {"currency":"ETH","date":"2023-08-29T07:10:52.000Z","price":1645.9337373737374},
        {"currency":"USDC","date":"2023-08-29T07:10:40.000Z","price":1}
    ]"#;

    pub const ICONS_JSON: &str = r#"[
        {"name":"ETH.svg","type":"file","download_url":"https://raw.githubusercontent.com/Switcheo/token-icons/main/tokens/ETH.svg"},
        {"name":"USDC.svg","type":"file","download_url":"https://raw.githubusercontent.com/Switcheo/token-icons/main/tokens/USDC.svg"}
    ]"#;

    pub async fn create_mock_server(prices: &str, status_code: u16) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/prices.json"))
            .respond_with(ResponseTemplate::new(status_code).set_body_string(prices))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/repos/Switcheo/token-icons/contents/tokens"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ICONS_JSON))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(file: &tempfile::NamedTempFile, base_url: &str) {
        let config_content = format!(
            r#"
        providers:
          prices:
            base_url: {base_url}
          icons:
            base_url: {base_url}
        retries: 0
        icons: true
    "#
        );
        std::fs::write(file.path(), config_content).expect("Failed to write config file");
    }
}

fn swap_error(result: anyhow::Result<()>) -> SwapError {
    result
        .expect_err("Expected the swap to fail")
        .downcast::<SwapError>()
        .expect("Expected a swap error")
}

#[test_log::test(tokio::test)]
async fn test_full_swap_flow_with_mock() {
    let mock_server = test_utils::create_mock_server(test_utils::PRICES_JSON, 200).await;
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    test_utils::write_config(&config_file, &mock_server.uri());

    let result = tokenswap::run_command(
        tokenswap::AppCommand::Swap(SwapRequest::new("ETH", "USDC", 2.0)),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert!(result.is_ok(), "Swap failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_prices_flow_with_mock() {
    let mock_server = test_utils::create_mock_server(test_utils::PRICES_JSON, 200).await;
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    test_utils::write_config(&config_file, &mock_server.uri());

    let result = tokenswap::run_command(
        tokenswap::AppCommand::Prices,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert!(result.is_ok(), "Prices failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_prices_flow_reports_feed_failure() {
    let mock_server = test_utils::create_mock_server("Server Error", 500).await;
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    test_utils::write_config(&config_file, &mock_server.uri());

    let result = tokenswap::run_command(
        tokenswap::AppCommand::Prices,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    let err = result.expect_err("Expected prices to fail");
    assert_eq!(err.to_string(), "Failed to fetch token prices");
}

#[test_log::test(tokio::test)]
async fn test_swap_with_unknown_currency() {
    let mock_server = test_utils::create_mock_server(test_utils::PRICES_JSON, 200).await;
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    test_utils::write_config(&config_file, &mock_server.uri());

    let result = tokenswap::run_command(
        tokenswap::AppCommand::Swap(SwapRequest::new("ETH", "BTC", 1.0)),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert_eq!(
        swap_error(result),
        SwapError::MissingPrice {
            field: Field::ToCurrency,
            currency: "BTC".to_string()
        }
    );
}

#[test_log::test(tokio::test)]
async fn test_swap_when_feed_is_down() {
    let mock_server = test_utils::create_mock_server("Server Error", 500).await;
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    test_utils::write_config(&config_file, &mock_server.uri());

    let result = tokenswap::run_command(
        tokenswap::AppCommand::Swap(SwapRequest::new("ETH", "USDC", 1.0)),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert_eq!(swap_error(result), SwapError::StoreNotReady);
}

#[test_log::test(tokio::test)]
async fn test_invalid_swap_does_not_fetch() {
    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::any())
        .respond_with(wiremock::ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    test_utils::write_config(&config_file, &mock_server.uri());

    let result = tokenswap::run_command(
        tokenswap::AppCommand::Swap(SwapRequest::new("ETH", "ETH", 0.0000001)),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    match swap_error(result) {
        SwapError::Validation(errors) => assert_eq!(errors.len(), 2),
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn test_loader_refresh_joins_icons_and_dedupes() {
    let mock_server = test_utils::create_mock_server(test_utils::PRICES_JSON, 200).await;
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    test_utils::write_config(&config_file, &mock_server.uri());
    let config = AppConfig::load_from_path(config_file.path()).unwrap();

    let store = Arc::new(PriceStore::new());
    let loader = tokenswap::build_loader(&config, Arc::clone(&store));

    let count = loader.refresh().await.unwrap();
    info!(count, "Refreshed prices");

    assert_eq!(count, 3);
    let usdc = store.lookup("USDC").await.unwrap();
    assert_eq!(usdc.price, 1.0);
    assert_eq!(
        usdc.symbol_ref.as_deref(),
        Some("https://raw.githubusercontent.com/Switcheo/token-icons/main/tokens/USDC.svg")
    );
    assert!(store.lookup("BLUR").await.unwrap().symbol_ref.is_none());

    let result = tokenswap::core::convert(&store, "ETH", "USDC", 2.0)
        .await
        .unwrap();
    let expected_rate = 1.0 / 1645.9337373737374;
    assert_eq!(result.exchange_rate, expected_rate);
    assert_eq!(result.received_amount, expected_rate * 2.0);
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.yaml");
    assert!(!missing.exists());

    let result = tokenswap::run_command(
        tokenswap::AppCommand::Prices,
        Some(missing.to_str().unwrap()),
    )
    .await;

    let err = result.expect_err("Expected a config error");
    assert!(err.to_string().starts_with("Failed to read config file"));
    assert!(fs::metadata(&missing).is_err());
}
