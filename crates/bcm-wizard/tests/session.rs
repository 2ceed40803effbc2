//! Session-level behavior: the full wizard flow against a mock parser.

use bcm_ingest::{
    AuthContext, CsvUpload, IngestBackend, IngestError, ParsedCsv, headers_from_labels,
};
use bcm_model::{BufferedSink, FieldId, HeaderId, Platform, Severity, TargetSchema};
use bcm_wizard::{IngestOutcome, MigrationSession, WizardError, WizardStep};

/// Backend returning a canned parse result.
enum MockBackend {
    Columns(Vec<&'static str>),
    Fail,
}

impl IngestBackend for MockBackend {
    fn parse_csv(
        &self,
        _auth: &AuthContext,
        _upload: &CsvUpload,
    ) -> Result<ParsedCsv, IngestError> {
        match self {
            Self::Columns(labels) => {
                let labels: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
                Ok(ParsedCsv {
                    headers: headers_from_labels(&labels)?,
                    message: String::new(),
                })
            }
            Self::Fail => Err(IngestError::Status {
                status: 500,
                message: "parser exploded".to_string(),
            }),
        }
    }
}

fn session() -> MigrationSession<BufferedSink> {
    MigrationSession::new(TargetSchema::bigcommerce(), BufferedSink::new())
}

fn field(id: &str) -> FieldId {
    FieldId::new(id).unwrap()
}

fn header(id: &str) -> HeaderId {
    HeaderId::new(id).unwrap()
}

/// Drive a session to the mapping step with the given columns discovered.
fn session_at_mapping(labels: Vec<&'static str>) -> MigrationSession<BufferedSink> {
    let mut s = session();
    s.select_platform(Platform::Shopify).unwrap();
    s.continue_to_upload().unwrap();
    s.select_file(CsvUpload::new("products.csv", b"unused".to_vec()).unwrap())
        .unwrap();
    let outcome = s
        .ingest(&MockBackend::Columns(labels), &AuthContext::anonymous())
        .unwrap();
    assert!(matches!(outcome, IngestOutcome::Loaded { .. }));
    assert_eq!(s.step(), WizardStep::Mapping);
    s
}

#[test]
fn happy_path_reaches_mapping_with_synthesized_headers() {
    let s = session_at_mapping(vec!["SKU", "Price", "Name"]);
    let ids: Vec<&str> = s.pool().snapshot().iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["header_0", "header_1", "header_2"]);
    let labels: Vec<&str> = s.pool().snapshot().iter().map(|h| h.label.as_str()).collect();
    assert_eq!(labels, vec!["SKU", "Price", "Name"]);
}

#[test]
fn failed_ingestion_stays_at_upload_and_notifies() {
    let mut s = session();
    s.select_platform(Platform::Shopify).unwrap();
    s.continue_to_upload().unwrap();
    s.select_file(CsvUpload::new("products.csv", vec![]).unwrap())
        .unwrap();

    let outcome = s
        .ingest(&MockBackend::Fail, &AuthContext::anonymous())
        .unwrap();
    assert!(matches!(outcome, IngestOutcome::Failed(_)));
    assert_eq!(s.step(), WizardStep::AwaitingUpload);
    assert!(s.pool().is_empty());

    let notices = s.sink_mut().drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Error);
}

#[test]
fn second_ingestion_while_outstanding_is_rejected() {
    let mut s = session();
    s.select_platform(Platform::Shopify).unwrap();
    s.continue_to_upload().unwrap();
    s.select_file(CsvUpload::new("products.csv", vec![]).unwrap())
        .unwrap();

    let _ticket = s.begin_ingestion().unwrap();
    assert!(s.ingestion_in_flight());
    assert!(matches!(
        s.begin_ingestion(),
        Err(WizardError::IngestionInProgress)
    ));
}

#[test]
fn stale_result_after_abandon_and_reset_is_discarded() {
    let mut s = session();
    s.select_platform(Platform::Shopify).unwrap();
    s.continue_to_upload().unwrap();
    s.select_file(CsvUpload::new("products.csv", vec![]).unwrap())
        .unwrap();

    let ticket = s.begin_ingestion().unwrap();
    // user navigates back while the request is outstanding
    s.back();
    assert_eq!(s.step(), WizardStep::AwaitingUpload);
    s.reset_mapping().unwrap();

    // the late response must not reappear in the pool
    let labels = vec!["SKU".to_string()];
    let late = ParsedCsv {
        headers: headers_from_labels(&labels).unwrap(),
        message: String::new(),
    };
    let outcome = s.complete_ingestion(ticket, Ok(late)).unwrap();
    assert!(matches!(outcome, IngestOutcome::Discarded));
    assert!(s.pool().is_empty());
    assert_eq!(s.step(), WizardStep::AwaitingUpload);
}

#[test]
fn remapping_an_occupied_field_returns_old_header_to_pool() {
    let mut s = session_at_mapping(vec!["SKU", "Item Code"]);

    s.map_header(&field("sku"), &header("header_0")).unwrap();
    assert_eq!(s.pool().len(), 1);

    // re-drop onto the same field: replaces, never stacks
    s.map_header(&field("sku"), &header("header_1")).unwrap();
    assert_eq!(s.mapped_count(), 1);
    assert_eq!(s.pool().len(), 1);
    assert_eq!(s.pool().snapshot()[0].id.as_str(), "header_0");
    assert_eq!(
        s.table().bound_header(&field("sku")).unwrap().id.as_str(),
        "header_1"
    );
}

#[test]
fn unmapping_restores_the_header() {
    let mut s = session_at_mapping(vec!["Name"]);
    s.map_header(&field("name"), &header("header_0")).unwrap();
    assert!(s.pool().is_empty());

    s.unmap(&field("name")).unwrap();
    assert_eq!(s.pool().len(), 1);
    assert_eq!(s.mapped_count(), 0);
}

#[test]
fn mapping_to_unknown_field_does_not_consume_the_header() {
    let mut s = session_at_mapping(vec!["Name"]);
    let result = s.map_header(&field("bogus"), &header("header_0"));
    assert!(result.is_err());
    assert_eq!(s.pool().len(), 1);
}

#[test]
fn progress_matches_bound_over_total() {
    let mut s = session_at_mapping(vec!["Name", "SKU", "Price"]);
    let total = s.total_field_count();
    assert_eq!(s.progress(), 0.0);

    s.map_header(&field("name"), &header("header_0")).unwrap();
    s.map_header(&field("sku"), &header("header_1")).unwrap();
    s.map_header(&field("price"), &header("header_2")).unwrap();

    assert_eq!(s.mapped_count(), 3);
    assert_eq!(s.progress(), 3.0 / total as f64);
    assert!(s.progress() > 0.0 && s.progress() < 1.0);
}

#[test]
fn progress_reaches_one_when_every_field_is_mapped() {
    let labels: Vec<&'static str> = vec![
        "c0", "c1", "c2", "c3", "c4", "c5", "c6", "c7", "c8", "c9", "c10", "c11",
    ];
    let mut s = session_at_mapping(labels);
    let fields: Vec<FieldId> = s.schema().fields().map(|f| f.id.clone()).collect();
    for (i, f) in fields.iter().enumerate() {
        let h = header(&format!("header_{i}"));
        s.map_header(f, &h).unwrap();
    }
    assert_eq!(s.progress(), 1.0);
    assert!(s.pool().is_empty());
    assert!(s.can_continue());
}

#[test]
fn reset_then_rebuild_reproduces_the_same_table() {
    let mut s = session_at_mapping(vec!["Name", "SKU", "Price"]);
    s.map_header(&field("name"), &header("header_0")).unwrap();
    s.map_header(&field("sku"), &header("header_1")).unwrap();
    s.map_header(&field("price"), &header("header_2")).unwrap();

    let before: Vec<(String, String)> = s
        .table()
        .bindings()
        .map(|(f, h)| (f.to_string(), h.id.to_string()))
        .collect();

    s.reset_mapping().unwrap();
    assert_eq!(s.mapped_count(), 0);
    assert_eq!(s.pool().len(), 3);
    // reset does not navigate
    assert_eq!(s.step(), WizardStep::Mapping);

    s.map_header(&field("name"), &header("header_0")).unwrap();
    s.map_header(&field("sku"), &header("header_1")).unwrap();
    s.map_header(&field("price"), &header("header_2")).unwrap();

    let after: Vec<(String, String)> = s
        .table()
        .bindings()
        .map(|(f, h)| (f.to_string(), h.id.to_string()))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn continue_from_mapping_requires_all_required_fields() {
    let mut s = session_at_mapping(vec!["Name", "SKU", "Price", "Brand"]);
    assert!(!s.can_continue());

    s.map_header(&field("name"), &header("header_0")).unwrap();
    s.map_header(&field("sku"), &header("header_1")).unwrap();
    assert!(!s.can_continue());
    assert_eq!(s.missing_required_fields(), vec![field("price")]);

    s.map_header(&field("price"), &header("header_2")).unwrap();
    assert!(s.can_continue());
}

#[test]
fn reingesting_regenerates_headers_and_clears_bindings() {
    let mut s = session_at_mapping(vec!["Name", "SKU"]);
    s.map_header(&field("name"), &header("header_0")).unwrap();

    // back out of mapping and upload a different file
    s.back();
    assert_eq!(s.step(), WizardStep::AwaitingUpload);
    s.select_file(CsvUpload::new("other.csv", vec![]).unwrap())
        .unwrap();
    let outcome = s
        .ingest(
            &MockBackend::Columns(vec!["Title", "Code", "Cost"]),
            &AuthContext::anonymous(),
        )
        .unwrap();
    assert!(matches!(outcome, IngestOutcome::Loaded { columns: 3 }));

    // stale headers from the previous file must not survive
    assert_eq!(s.mapped_count(), 0);
    assert_eq!(s.pool().len(), 3);
    let labels: Vec<&str> = s.pool().snapshot().iter().map(|h| h.label.as_str()).collect();
    assert_eq!(labels, vec!["Title", "Code", "Cost"]);
}
