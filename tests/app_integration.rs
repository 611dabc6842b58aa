use std::sync::Arc;
use std::time::Duration;

use cambio::history::HistoryStore;
use cambio::store::Storage;
use cambio::store::disk::FjallStorage;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_latest_mock_server(mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(
        config_file: &tempfile::NamedTempFile,
        base_url: &str,
        data_dir: &std::path::Path,
        timeout_ms: u64,
    ) {
        let config_content = format!(
            r#"
provider:
  base_url: "{}"
timeout_ms: {}
data_path: "{}"
"#,
            base_url,
            timeout_ms,
            data_dir.display()
        );
        std::fs::write(config_file.path(), config_content).expect("Failed to write config file");
    }
}

fn read_history(data_dir: &std::path::Path) -> Vec<cambio::history::ConversionRecord> {
    let storage = FjallStorage::open(data_dir).expect("Failed to reopen storage");
    HistoryStore::new(Arc::new(storage) as Arc<dyn Storage>).read()
}

#[test_log::test(tokio::test)]
async fn test_full_conversion_flow_with_mock() {
    let mock_response = r#"{"amount": 10.0, "base": "USD", "date": "2026-08-04", "rates": {"EUR": 9.5}}"#;
    let mock_server = test_utils::create_latest_mock_server(mock_response).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    test_utils::write_config(&config_file, &mock_server.uri(), data_dir.path(), 5000);

    let result = cambio::run_command(
        cambio::AppCommand::Convert {
            amount: 10.0,
            from: "USD".to_string(),
            to: "EUR".to_string(),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Conversion failed with: {:?}", result.err());

    let records = read_history(data_dir.path());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].amount, 10.0);
    assert_eq!(records[0].from, "USD");
    assert_eq!(records[0].to, "EUR");
    assert_eq!(records[0].rate, 0.95);
    assert_eq!(records[0].result, 9.5);
    assert!(!records[0].id.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_provider_error_leaves_history_empty() {
    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/latest"))
        .respond_with(wiremock::ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    test_utils::write_config(&config_file, &mock_server.uri(), data_dir.path(), 5000);

    let result = cambio::run_command(
        cambio::AppCommand::Convert {
            amount: 10.0,
            from: "USD".to_string(),
            to: "EUR".to_string(),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    let error = result.expect_err("HTTP 500 must fail the conversion");
    assert_eq!(error.to_string(), "conversion failed, please try again");

    assert!(read_history(data_dir.path()).is_empty());
}

#[test_log::test(tokio::test)]
async fn test_timeout_message_survives_all_layers() {
    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/latest"))
        .respond_with(
            wiremock::ResponseTemplate::new(200)
                .set_body_string(
                    r#"{"amount": 10.0, "base": "USD", "date": "2026-08-04", "rates": {"EUR": 9.5}}"#,
                )
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&mock_server)
        .await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    test_utils::write_config(&config_file, &mock_server.uri(), data_dir.path(), 50);

    let result = cambio::run_command(
        cambio::AppCommand::Convert {
            amount: 10.0,
            from: "USD".to_string(),
            to: "EUR".to_string(),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    let error = result.expect_err("Delayed response must time out");
    assert_eq!(error.to_string(), "time limit exceeded");

    assert!(read_history(data_dir.path()).is_empty());
}

#[test_log::test(tokio::test)]
async fn test_validation_happens_before_any_request() {
    let mock_server = wiremock::MockServer::start().await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    test_utils::write_config(&config_file, &mock_server.uri(), data_dir.path(), 5000);

    let result = cambio::run_command(
        cambio::AppCommand::Convert {
            amount: 10.0,
            from: "USD".to_string(),
            to: "USD".to_string(),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    let error = result.expect_err("Equal currencies must be rejected");
    assert_eq!(error.to_string(), "choose two different currencies");

    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording is on by default");
    assert!(requests.is_empty(), "Validation must block the network call");
}

#[test_log::test(tokio::test)]
async fn test_currencies_flow_with_mock() {
    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/currencies"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(
            r#"{"USD": "United States Dollar", "EUR": "Euro"}"#,
        ))
        .mount(&mock_server)
        .await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    test_utils::write_config(&config_file, &mock_server.uri(), data_dir.path(), 5000);

    let result = cambio::run_command(
        cambio::AppCommand::Currencies,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Listing failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_clear_history_flow() {
    let mock_response = r#"{"amount": 25.0, "base": "EUR", "date": "2026-08-04", "rates": {"JPY": 4000.0}}"#;
    let mock_server = test_utils::create_latest_mock_server(mock_response).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    test_utils::write_config(&config_file, &mock_server.uri(), data_dir.path(), 5000);

    let config_path = config_file.path().to_str().unwrap().to_string();

    cambio::run_command(
        cambio::AppCommand::Convert {
            amount: 25.0,
            from: "EUR".to_string(),
            to: "JPY".to_string(),
        },
        Some(&config_path),
    )
    .await
    .expect("Conversion should succeed");
    assert_eq!(read_history(data_dir.path()).len(), 1);

    cambio::run_command(
        cambio::AppCommand::ClearHistory { assume_yes: true },
        Some(&config_path),
    )
    .await
    .expect("Clear should succeed");

    assert!(read_history(data_dir.path()).is_empty());
}

#[test_log::test(tokio::test)]
async fn test_history_command_renders_saved_records() {
    let mock_response = r#"{"amount": 10.0, "base": "USD", "date": "2026-08-04", "rates": {"EUR": 9.5}}"#;
    let mock_server = test_utils::create_latest_mock_server(mock_response).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    test_utils::write_config(&config_file, &mock_server.uri(), data_dir.path(), 5000);

    let config_path = config_file.path().to_str().unwrap().to_string();

    cambio::run_command(
        cambio::AppCommand::Convert {
            amount: 10.0,
            from: "USD".to_string(),
            to: "EUR".to_string(),
        },
        Some(&config_path),
    )
    .await
    .expect("Conversion should succeed");

    let result = cambio::run_command(cambio::AppCommand::History, Some(&config_path)).await;
    assert!(result.is_ok(), "History failed with: {:?}", result.err());
}
