//! Integration tests for `SheetsClient` using wiremock HTTP mocks.

use laone_sheets::requests::{add_sheet, delete_sheet};
use laone_sheets::types::ValueRange;
use laone_sheets::{SheetsClient, SheetsError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> SheetsClient {
    SheetsClient::with_base_url("test-token", 5, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn create_spreadsheet_returns_id_and_sends_title_and_locale() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/spreadsheets"))
        .and(query_param("fields", "spreadsheetId"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(
            json!({"properties": {"title": "LaOne", "locale": "en_US"}}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"spreadsheetId": "sheet-123"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let id = client
        .create_spreadsheet("LaOne", "en_US")
        .await
        .expect("should create spreadsheet");

    assert_eq!(id, "sheet-123");
}

#[tokio::test]
async fn batch_update_exposes_added_sheet_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/spreadsheets/sheet-123:batchUpdate"))
        .and(body_partial_json(json!({
            "requests": [{"addSheet": {"properties": {"title": "Брови"}}}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "spreadsheetId": "sheet-123",
            "replies": [{
                "addSheet": {"properties": {"sheetId": 918_273_645, "title": "Брови", "index": 1}}
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let resp = client
        .batch_update("sheet-123", &[add_sheet("Брови", 4)])
        .await
        .expect("should parse batch update");

    assert_eq!(resp.spreadsheet_id, "sheet-123");
    assert_eq!(resp.added_sheet_id(), Some(918_273_645));
}

#[tokio::test]
async fn batch_update_without_add_sheet_reply_has_no_sheet_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/spreadsheets/sheet-123:batchUpdate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "spreadsheetId": "sheet-123",
            "replies": [{}]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let resp = client
        .batch_update("sheet-123", &[delete_sheet(0)])
        .await
        .unwrap();
    assert_eq!(resp.added_sheet_id(), None);
}

#[tokio::test]
async fn batch_update_values_uses_user_entered_input() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/spreadsheets/sheet-123/values:batchUpdate"))
        .and(body_partial_json(json!({
            "valueInputOption": "USER_ENTERED",
            "data": [{"range": "'Брови'!A1:F1"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "spreadsheetId": "sheet-123",
            "totalUpdatedRows": 1,
            "totalUpdatedCells": 6
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let data = vec![ValueRange {
        range: "'Брови'!A1:F1".to_owned(),
        values: vec![vec![json!("a"), json!("b"), json!("c"), json!("d"), json!("e"), json!("f")]],
    }];
    let cells = client
        .batch_update_values("sheet-123", &data)
        .await
        .expect("should write values");

    assert_eq!(cells, 6);
}

#[tokio::test]
async fn api_error_response_returns_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/spreadsheets"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "code": 401,
                "message": "Request had invalid authentication credentials.",
                "status": "UNAUTHENTICATED"
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .create_spreadsheet("LaOne", "en_US")
        .await
        .expect_err("401 should fail");

    match err {
        SheetsError::Api {
            status, message, ..
        } => {
            assert_eq!(status, 401);
            assert!(
                message.contains("invalid authentication credentials"),
                "unexpected message: {message}"
            );
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_returns_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/spreadsheets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.create_spreadsheet("LaOne", "en_US").await.unwrap_err();
    assert!(matches!(err, SheetsError::Deserialize { .. }), "got {err:?}");
}
