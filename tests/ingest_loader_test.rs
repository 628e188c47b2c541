mod common;

use common::serve_once;
use innovation_explorer::ingest::{
    parse_ndjson, DatasetLoader, FileSource, HttpSource, LoadError, LoaderConfig, StaticSource,
};
use std::io::Write;
use std::time::Duration;

const DATASET: &str = concat!(
    r#"{"Innovation/ Technology/ Tool":"Biochar","Country":"Kenya","Challenge it was addressing":"Soil fertility","Site":"Embu"}"#,
    "\r\n",
    "\n",
    "not json at all\n",
    r#"[1,2,3]"#,
    "\n",
    r#"{"Innovation":"Water pans","Centre (s) involved ":"","Centre (s) involved":"IWMI","Scale":3}"#,
    "\n",
);

#[test]
fn test_parse_skips_bad_lines_and_keeps_order() {
    let (records, report) = parse_ndjson(DATASET);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].innovation, "Biochar");
    assert_eq!(records[0].description, "Challenge: Soil fertility. Site: Embu");
    assert_eq!(records[1].innovation, "Water pans");
    assert_eq!(records[1].centres_involved, "IWMI");
    assert_eq!(records[1].scale, "3");

    assert_eq!(report.lines_seen, 4);
    assert_eq!(report.records_parsed, 2);
    assert_eq!(report.skipped_lines, vec![3, 4]);
}

#[test]
fn test_parse_empty_text() {
    let (records, report) = parse_ndjson("\n  \n");
    assert!(records.is_empty());
    assert_eq!(report.lines_seen, 0);
}

#[tokio::test]
async fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DATASET.as_bytes()).unwrap();

    let loader = DatasetLoader::new(FileSource::new(file.path()));
    let dataset = loader.load().await.unwrap();

    assert_eq!(dataset.len(), 2);
    assert_eq!(&*dataset.raw_text, DATASET);
    assert_eq!(dataset.report.skipped_count(), 2);
}

#[tokio::test]
async fn test_load_over_http() {
    let (base, server) = serve_once("200 OK", "application/x-ndjson", DATASET).await;
    let source = HttpSource::from_config(&format!("{base}/data/"), &LoaderConfig::default()).unwrap();

    let dataset = DatasetLoader::new(source).load().await.unwrap();
    let request = server.await.unwrap();

    assert_eq!(dataset.len(), 2);
    assert!(request.starts_with("GET /data/Descriptions_of_innovations.json"));
}

#[tokio::test]
async fn test_http_error_status_fails_load() {
    let (base, server) = serve_once("404 Not Found", "text/plain", "missing").await;
    let source = HttpSource::with_timeout(&format!("{base}/x.json"), Duration::from_secs(5)).unwrap();

    let result = DatasetLoader::new(source).load().await;
    server.await.unwrap();

    assert!(matches!(result, Err(LoadError::HttpStatus(404))));
}

#[tokio::test]
async fn test_static_source_with_only_garbage_loads_empty() {
    let dataset = DatasetLoader::new(StaticSource::new("garbage\n{broken"))
        .load()
        .await
        .unwrap();

    assert!(dataset.is_empty());
    assert_eq!(dataset.report.skipped_lines, vec![1, 2]);
}
