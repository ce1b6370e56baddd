//! パイプライン全体の統合テスト
//!
//! モッククライアント → 正規化 → セッション → エクスポート

use ffe_inventory::analyzer::run_analysis;
use ffe_inventory::cli::ExportFormat;
use ffe_inventory::{export, report};
use ffe_inventory_common::export::csv_core::BOM;
use ffe_inventory_common::{
    overlays, AnalysisRequest, AnalysisSession, AnalysisStatus, ImageInput, InvocationError,
    VisionClient,
};
use tempfile::tempdir;
use tokio::sync::Mutex;

const LIVING_ROOM: &str = r#"```json
{
  "itemCount": 4,
  "summary": "Warm contemporary living room",
  "items": [
    {"label": "Armchair", "description": "Cognac leather", "box_2d": [0.4, 0.05, 0.85, 0.3]},
    {"label": "Coffee Table", "description": "Round \"travertine\" top", "box_2d": [0.6, 0.35, 0.8, 0.65]},
    {"label": "Armchair", "description": "Boucle", "box_2d": [0.4, 0.7, 0.85, 0.95]},
    {"label": "Floor Lamp", "description": "Arc, brushed brass", "box_2d": [0.05, 0.8, 0.7, 0.98]}
  ],
  "confidenceScore": 0.87
}
```"#;

struct StaticClient(&'static str);

impl VisionClient for StaticClient {
    async fn generate(&self, _request: &AnalysisRequest) -> Result<String, InvocationError> {
        Ok(self.0.to_string())
    }
}

async fn analyze(text: &'static str) -> AnalysisSession {
    let session = Mutex::new(AnalysisSession::new());
    let request = AnalysisRequest::new(ImageInput::new(vec![0xFF, 0xD8, 0xFF], "image/jpeg"));
    run_analysis(&session, &StaticClient(text), request, "data:image/jpeg;base64,/9j/".into())
        .await
        .expect("submission should be accepted");
    session.into_inner()
}

#[tokio::test]
async fn test_living_room_end_to_end() {
    let session = analyze(LIVING_ROOM).await;
    assert_eq!(session.status(), AnalysisStatus::Success);

    let analysis = session.result().unwrap();
    let labels: Vec<&str> = analysis.items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["Armchair 1", "Coffee Table", "Armchair 2", "Floor Lamp"]);
    assert_eq!(analysis.items[3].id, "item-3");

    let numbered = overlays(analysis);
    assert_eq!(numbered[2].number, 3);
    assert_eq!(numbered[2].label, "Armchair 2");
}

#[tokio::test]
async fn test_empty_inventory_is_success() {
    let session = analyze(r#"{"itemCount": 0, "summary": "Empty room", "confidenceScore": 0.4}"#).await;
    assert_eq!(session.status(), AnalysisStatus::Success);
    assert!(session.result().unwrap().items.is_empty());
}

#[tokio::test]
async fn test_saved_result_exports_csv_and_excel() {
    let session = analyze(LIVING_ROOM).await;
    let analysis = session.result().unwrap();

    let dir = tempdir().expect("Failed to create temp dir");
    let json_path = dir.path().join("living.ffe.json");
    report::save_analysis(analysis, &json_path).unwrap();
    let loaded = report::load_analysis(&json_path).unwrap();

    let written = export::export_items(&loaded.items, &ExportFormat::Both, dir.path()).unwrap();
    assert_eq!(written.len(), 2);
    assert!(written.iter().all(|p| p.exists()));

    let csv = std::fs::read_to_string(dir.path().join("FFE_Inventory_List.csv")).unwrap();
    assert!(csv.starts_with(BOM));
    let lines: Vec<&str> = csv[BOM.len()..].lines().collect();
    assert_eq!(lines[0], "ID,Name,Description");
    assert_eq!(lines[1], "1,Armchair 1,Cognac leather");
    assert_eq!(lines[2], "2,Coffee Table,\"Round \"\"travertine\"\" top\"");
    assert_eq!(lines[4], "4,Floor Lamp,\"Arc, brushed brass\"");

    let xlsx = std::fs::read(dir.path().join("FFE_Inventory_List.xlsx")).unwrap();
    assert!(xlsx.starts_with(b"PK"));
}
