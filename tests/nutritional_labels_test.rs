use label_engine::core::LabelPipeline;
use label_engine::{
    JsonSnapshot, LabelConfig, LabelEngine, LabelError, LocalStorage, NutritionalLabelPipeline,
    NutritionalRequest,
};
use std::collections::HashMap;
use tempfile::TempDir;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/snapshot.json");

async fn snapshot() -> JsonSnapshot {
    let storage = LocalStorage::new(env!("CARGO_MANIFEST_DIR"));
    JsonSnapshot::load(&storage, "tests/fixtures/snapshot.json")
        .await
        .unwrap()
}

fn config(output_path: &str, labels_per_chunk: usize) -> LabelConfig {
    let mut config = LabelConfig::default();
    config.output.output_path = output_path.to_string();
    config.nutritional.labels_per_chunk = labels_per_chunk;
    config
}

fn request(product_ids: Vec<u64>, quantities: Vec<(u64, u32)>) -> NutritionalRequest {
    NutritionalRequest {
        product_ids,
        quantities: quantities.into_iter().collect::<HashMap<_, _>>(),
        elaboration_date: "05/11/2025".to_string(),
        production_order_code: Some("OP-2025-118".to_string()),
    }
}

fn label_rows(path: &std::path::Path) -> Vec<(String, String)> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader
        .records()
        .map(|record| {
            let record = record.unwrap();
            (record[1].to_string(), record[3].to_string())
        })
        .collect()
}

#[tokio::test]
async fn test_end_to_end_nutritional_labels() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let pipeline = NutritionalLabelPipeline::new(
        snapshot().await,
        LocalStorage::new(&output_path),
        config(&output_path, 5),
        request(vec![2, 3, 4, 99, 5], vec![(2, 3), (4, 4), (5, 2)]),
    );
    LabelEngine::new(pipeline).run().await.unwrap();

    // COCINA FRIA holds 7 labels, split 5 + 2; product 4 continues at index 3.
    let first = label_rows(&temp_dir.path().join("nutricional_01_cocina_fria_lote_001.csv"));
    let pairs: Vec<(&str, &str)> = first.iter().map(|(id, idx)| (id.as_str(), idx.as_str())).collect();
    assert_eq!(
        pairs,
        vec![("2", "1"), ("2", "2"), ("2", "3"), ("4", "1"), ("4", "2")]
    );

    let second = label_rows(&temp_dir.path().join("nutricional_01_cocina_fria_lote_002.csv"));
    let pairs: Vec<(&str, &str)> = second.iter().map(|(id, idx)| (id.as_str(), idx.as_str())).collect();
    assert_eq!(pairs, vec![("4", "3"), ("4", "4")]);

    // Products without an area restart numbering in their own group.
    let unassigned = label_rows(
        &temp_dir
            .path()
            .join("nutricional_02_sin_cuarto_productivo_lote_001.csv"),
    );
    let pairs: Vec<(&str, &str)> = unassigned.iter().map(|(id, idx)| (id.as_str(), idx.as_str())).collect();
    assert_eq!(pairs, vec![("5", "1"), ("5", "2")]);

    let manifest: serde_json::Value = serde_json::from_slice(
        &std::fs::read(temp_dir.path().join("manifest.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(
        manifest[1]["description"],
        "Etiquetas nutricionales: COCINA FRIA - Lote 2/2 (2 etiqueta(s), productos #4 a #4) - Orden de Producción: OP-2025-118"
    );
}

#[tokio::test]
async fn test_areas_with_colliding_slugs_keep_separate_files() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let snapshot = JsonSnapshot::from_slice(
        br#"{
            "products": [
                {"id": 1, "name": "ENSALADA CESAR", "production_area": "COCINA FRIA", "has_nutritional_information": true, "generate_label": true},
                {"id": 2, "name": "CEVICHE", "production_area": "cocina fria", "has_nutritional_information": true, "generate_label": true}
            ]
        }"#,
    )
    .unwrap();

    let pipeline = NutritionalLabelPipeline::new(
        snapshot,
        LocalStorage::new(&output_path),
        config(&output_path, 100),
        request(vec![1, 2], vec![(1, 2), (2, 3)]),
    );
    LabelEngine::new(pipeline).run().await.unwrap();

    let mut csv_files: Vec<String> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .filter(|name| name.ends_with(".csv"))
        .collect();
    csv_files.sort();
    assert_eq!(
        csv_files,
        vec![
            "nutricional_01_cocina_fria_lote_001.csv",
            "nutricional_02_cocina_fria_lote_001.csv",
        ]
    );

    let written: usize = csv_files
        .iter()
        .map(|name| label_rows(&temp_dir.path().join(name)).len())
        .sum();
    assert_eq!(written, 5);
}

#[tokio::test]
async fn test_prepare_reports_skipped_products() {
    let pipeline = NutritionalLabelPipeline::new(
        snapshot().await,
        LocalStorage::new("."),
        config("./unused", 100),
        request(vec![3, 4, 99, 2, 4], vec![]),
    );

    let products = pipeline.extract().await.unwrap();
    let prepared = pipeline.prepare(&products).unwrap();

    assert_eq!(prepared.valid_product_ids, vec![4, 2]);
    assert_eq!(prepared.not_found_ids, vec![3, 99]);
    assert_eq!(prepared.total_labels, 2);
    assert_eq!(prepared.chunks.len(), 1);
    assert_eq!(prepared.chunks[0].first_product_id, 2);
    assert_eq!(prepared.chunks[0].last_product_id, 4);
}

#[tokio::test]
async fn test_only_ineligible_products_fail_with_empty_result() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    // 1 is a HORECA dish and 3 has labels disabled.
    let pipeline = NutritionalLabelPipeline::new(
        snapshot().await,
        LocalStorage::new(&output_path),
        config(&output_path, 100),
        request(vec![1, 3], vec![]),
    );

    let err = LabelEngine::new(pipeline).run().await.unwrap_err();
    assert!(matches!(err, LabelError::EmptyResult { .. }));
}

#[tokio::test]
async fn test_zero_quantities_produce_no_labels() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let pipeline = NutritionalLabelPipeline::new(
        JsonSnapshot::from_slice(&std::fs::read(FIXTURE).unwrap()).unwrap(),
        LocalStorage::new(&output_path),
        config(&output_path, 100),
        request(vec![2], vec![(2, 0)]),
    );

    let err = LabelEngine::new(pipeline).run().await.unwrap_err();
    assert!(matches!(err, LabelError::EmptyResult { .. }));
}
