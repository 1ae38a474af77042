use qtl::mcp::{
    QtlMcpServer,
    types::{ScanIssuesParams, ScanOverviewParams},
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, assert_pagination, extract_tool_result_json, fixture_gaussian_beam};

fn issues_params(fixture: &McpTestFixture, rules: Option<Vec<&str>>) -> ScanIssuesParams {
    ScanIssuesParams {
        project_root_path: fixture.root(),
        translations_root: None,
        rules: rules.map(|r| r.into_iter().map(String::from).collect()),
        limit: None,
        offset: None,
    }
}

// ============================================================================
// scan_overview tests
// ============================================================================

#[tokio::test]
async fn test_scan_overview_counts_per_rule() {
    let fixture = fixture_gaussian_beam().unwrap();
    let server = QtlMcpServer::new();

    let params = Parameters(ScanOverviewParams {
        project_root_path: fixture.root(),
        translations_root: None,
    });

    let result = server.scan_overview(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["translationFileCount"], 1);
    assert_eq!(json_result["errorCount"], 1);
    assert_eq!(json_result["warningCount"], 2);
    assert_eq!(
        json_result["rules"],
        json!({
            "missing-message": 1,
            "obsolete": 1,
            "unfinished": 1
        })
    );
}

// ============================================================================
// scan_issues tests
// ============================================================================

#[tokio::test]
async fn test_scan_issues_rule_filter() {
    let fixture = fixture_gaussian_beam().unwrap();
    let server = QtlMcpServer::new();

    let params = Parameters(issues_params(&fixture, Some(vec!["unfinished"])));

    let result = server.scan_issues(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 1);

    let item = &json_result["items"][0];
    assert_eq!(item["rule"], "unfinished");
    assert_eq!(item["severity"], "warning");
    assert_eq!(item["message"], "GaussianBeamWidget::Lens");
    assert_eq!(item["details"], "no translation");
    assert_eq!(item["line"], 10);
    assert!(
        item["filePath"]
            .as_str()
            .unwrap()
            .ends_with("GaussianBeam_fr.ts")
    );
    assert!(item.get("hint").is_none());

    assert_pagination(&json_result, 0, 50, false);
}

#[tokio::test]
async fn test_scan_issues_missing_message_location() {
    let fixture = fixture_gaussian_beam().unwrap();
    let server = QtlMcpServer::new();

    let params = Parameters(issues_params(&fixture, Some(vec!["missing"])));

    let result = server.scan_issues(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 1);

    let item = &json_result["items"][0];
    assert_eq!(item["rule"], "missing-message");
    assert_eq!(item["severity"], "error");
    assert_eq!(item["message"], "GaussianBeamWidget::Focal length");
    assert_eq!(item["details"], "missing in: fr");
    assert_eq!(item["line"], 6);
    assert!(
        item["filePath"]
            .as_str()
            .unwrap()
            .ends_with("GaussianBeamWidget.cpp")
    );
}

#[tokio::test]
async fn test_scan_issues_all_rules_sorted() {
    let fixture = fixture_gaussian_beam().unwrap();
    let server = QtlMcpServer::new();

    let params = Parameters(issues_params(&fixture, None));

    let result = server.scan_issues(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 3);

    let rules: Vec<&str> = json_result["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["rule"].as_str().unwrap())
        .collect();
    // po/ sorts before src/, then by line.
    assert_eq!(rules, vec!["unfinished", "obsolete", "missing-message"]);
}

#[tokio::test]
async fn test_scan_issues_pagination() {
    let mut messages = String::new();
    for i in 0..5 {
        messages.push_str(&format!(
            "    <message>\n        <source>Label {}</source>\n        <translation type=\"unfinished\"></translation>\n    </message>\n",
            i
        ));
    }
    let contexts = format!(
        "<context>\n    <name>GaussianBeamWidget</name>\n{}</context>\n",
        messages
    );
    let fixture = McpTestFixture::with_translations(vec![("fr", contexts.as_str())]).unwrap();
    let server = QtlMcpServer::new();

    let mut params = issues_params(&fixture, Some(vec!["unfinished"]));
    params.limit = Some(2);
    params.offset = Some(2);

    let result = server.scan_issues(Parameters(params)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 5);
    assert_eq!(json_result["items"].as_array().unwrap().len(), 2);
    assert_eq!(json_result["items"][0]["message"], "GaussianBeamWidget::Label 2");
    assert_pagination(&json_result, 2, 2, true);

    let mut params = issues_params(&fixture, Some(vec!["unfinished"]));
    params.limit = Some(500);
    params.offset = Some(4);

    let result = server.scan_issues(Parameters(params)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["items"].as_array().unwrap().len(), 1);
    assert_pagination(&json_result, 4, 100, false);
}

#[tokio::test]
async fn test_scan_issues_unknown_rule() {
    let fixture = fixture_gaussian_beam().unwrap();
    let server = QtlMcpServer::new();

    let params = Parameters(issues_params(&fixture, Some(vec!["hardcoded"])));

    let err = server.scan_issues(params).await.unwrap_err();
    assert!(err.message.contains("Unknown rule: hardcoded"));
}
