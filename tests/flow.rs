//! End-to-end creation and read flow over the in-memory and file contexts.

use std::path::PathBuf;
use std::sync::Arc;

use tally::adapters::live::FileRecordStore;
use tally::config::{Config, StoreKind};
use tally::context::ServiceContext;
use tally::record::IncidentInput;
use tally::service::IncidentService;

fn input(student_id: &str) -> IncidentInput {
    IncidentInput {
        date: "2024-06-15".to_string(),
        time: "10:25".to_string(),
        student_id: student_id.to_string(),
        location: "Classroom".to_string(),
        antecedent: "Transition".to_string(),
        behavior: "Shouting".to_string(),
        consequence: "Break offered".to_string(),
        duration_sec: 90,
        intensity: 2,
        notes: "follow up".to_string(),
        staff: "Ms. Ruiz".to_string(),
    }
}

#[tokio::test]
async fn students_get_independent_sequences() {
    let service = IncidentService::new(ServiceContext::memory(), "");

    assert_eq!(service.create(input("Alice K")).await.unwrap(), "AL0001");
    assert_eq!(service.create(input("Ben T")).await.unwrap(), "BE0001");
    assert_eq!(service.create(input("Alice K")).await.unwrap(), "AL0002");
}

#[tokio::test]
async fn identifiers_without_letters_use_the_sentinel_prefix() {
    let service = IncidentService::new(ServiceContext::memory(), "");
    assert_eq!(service.create(input("4077")).await.unwrap(), "XX0001");
}

#[tokio::test]
async fn every_created_record_reads_back_identically() {
    let service = IncidentService::new(ServiceContext::memory(), "");
    let id_a = service.create(input("Alice K")).await.unwrap();
    let id_b = service.create(input("Ben T")).await.unwrap();

    let (header, incidents) = service.snapshot().await.unwrap();
    assert_eq!(header, tally::record::header());
    assert_eq!(incidents.len(), 2);

    let alice = incidents.iter().find(|i| i.id == id_a).unwrap();
    assert_eq!(alice.student_id, "Alice K");
    assert_eq!(alice.duration_sec, 90);
    assert_eq!(alice.intensity, 2);
    assert_eq!(alice.notes, "follow up");
    assert_eq!(alice.staff, "Ms. Ruiz");

    let ben = incidents.iter().find(|i| i.id == id_b).unwrap();
    assert_eq!(ben.student_id, "Ben T");
}

#[tokio::test]
async fn a_burst_of_concurrent_submissions_yields_distinct_ids() {
    let service = Arc::new(IncidentService::new(ServiceContext::memory(), ""));

    let mut handles = Vec::new();
    for i in 0..16 {
        let service = Arc::clone(&service);
        let student = if i % 2 == 0 { "Alice K" } else { "Ben T" };
        handles.push(tokio::spawn(async move {
            service.create(input(student)).await.unwrap()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);

    let (_, incidents) = service.snapshot().await.unwrap();
    assert_eq!(incidents.len(), total);
}

fn file_config(data_dir: PathBuf) -> Config {
    Config {
        token: None,
        tab: "incidents".to_string(),
        separator: String::new(),
        store: StoreKind::File,
        data_dir,
        bind: "127.0.0.1:8080".to_string(),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_on_the_file_store_keep_every_row() {
    let dir = std::env::temp_dir().join("tally_flow_file_concurrent");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let config = file_config(dir.clone());
    FileRecordStore::seed(&config.table_path(), tally::record::header()).unwrap();

    let service =
        Arc::new(IncidentService::new(ServiceContext::live(&config).unwrap(), ""));
    let mut handles = Vec::new();
    for i in 0..12 {
        let service = Arc::clone(&service);
        let student = if i % 2 == 0 { "Alice K" } else { "Ben T" };
        handles.push(tokio::spawn(async move {
            service.create(input(student)).await.unwrap()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);

    // Every appended row survives on disk and reads back cleanly.
    let (_, incidents) = service.snapshot().await.unwrap();
    assert_eq!(incidents.len(), total);
    let reopened = ServiceContext::live(&config).unwrap();
    assert_eq!(reopened.records.list_existing_ids().unwrap().len(), total);
    let _ = std::fs::remove_dir_all(&dir);
}
