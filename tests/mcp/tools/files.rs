use qtl::mcp::{QtlMcpServer, types::GetTranslationFilesParams};
use rmcp::handler::server::wrapper::Parameters;

use crate::{McpTestFixture, extract_tool_result_json, fixture_gaussian_beam};

// ============================================================================
// get_translation_files tests
// ============================================================================

#[tokio::test]
async fn test_get_translation_files_counts() {
    let fixture = fixture_gaussian_beam().unwrap();
    let server = QtlMcpServer::new();

    let params = Parameters(GetTranslationFilesParams {
        project_root_path: fixture.root(),
        translations_root: None,
    });

    let result = server.get_translation_files(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    let files = json_result["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);

    let fr = &files[0];
    assert_eq!(fr["locale"], "fr");
    assert!(
        fr["filePath"]
            .as_str()
            .unwrap()
            .ends_with("GaussianBeam_fr.ts")
    );
    assert_eq!(fr["total"], 2);
    assert_eq!(fr["finished"], 1);
    assert_eq!(fr["unfinished"], 1);
    assert_eq!(fr["obsolete"], 1);
    assert_eq!(fr["completion"], 50.0);
}

#[tokio::test]
async fn test_get_translation_files_sorted_by_path() {
    let context = r#"<context>
    <name>GaussianBeamWidget</name>
    <message>
        <source>Waist</source>
        <translation>Col</translation>
    </message>
</context>
"#;
    let fixture =
        McpTestFixture::with_translations(vec![("fr", context), ("de", context), ("es", context)])
            .unwrap();
    let server = QtlMcpServer::new();

    let params = Parameters(GetTranslationFilesParams {
        project_root_path: fixture.root(),
        translations_root: Some(fixture.root_path().join("po").to_string_lossy().to_string()),
    });

    let result = server.get_translation_files(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    let locales: Vec<&str> = json_result["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["locale"].as_str().unwrap())
        .collect();
    assert_eq!(locales, vec!["de", "es", "fr"]);
    assert_eq!(json_result["files"][0]["completion"], 100.0);
}

#[tokio::test]
async fn test_get_translation_files_none_found() {
    let fixture = McpTestFixture::new().unwrap();
    let server = QtlMcpServer::new();

    let params = Parameters(GetTranslationFilesParams {
        project_root_path: fixture.root(),
        translations_root: None,
    });

    let err = server.get_translation_files(params).await.unwrap_err();
    assert!(err.message.contains("No translation files"));
}
