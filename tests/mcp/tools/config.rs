use qtl::mcp::{QtlMcpServer, types::GetConfigParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

// ============================================================================
// get_config tests
// ============================================================================

#[tokio::test]
async fn test_get_config_defaults() {
    let fixture = McpTestFixture::new().unwrap();
    let server = QtlMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], false);
    assert_eq!(json_result["config"]["translationsRoot"], "./");
    assert_eq!(json_result["config"]["allowPlaceholderReorder"], false);
    assert_eq!(json_result["config"]["checkLocations"], true);
    assert!(json_result["config"]["includes"].is_array());
    assert!(
        json_result["config"]["sourceExtensions"]
            .as_array()
            .unwrap()
            .contains(&json!("cpp"))
    );
}

#[tokio::test]
async fn test_get_config_from_qtlrc() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({
            "translationsRoot": "po",
            "allowPlaceholderReorder": true,
            "ignoreTexts": ["OK"]
        }))
        .unwrap();
    assert!(fixture.root_path().join(".qtlrc.json").exists());

    let server = QtlMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], true);
    assert_eq!(json_result["config"]["translationsRoot"], "po");
    assert_eq!(json_result["config"]["allowPlaceholderReorder"], true);
    assert_eq!(json_result["config"]["ignoreTexts"], json!(["OK"]));
}

#[tokio::test]
async fn test_get_config_invalid_file() {
    let fixture = McpTestFixture::new().unwrap();
    std::fs::write(fixture.root_path().join(".qtlrc.json"), "{ not json").unwrap();

    let server = QtlMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let err = server.get_config(params).await.unwrap_err();
    assert!(err.message.contains("Failed to load config"));
}
