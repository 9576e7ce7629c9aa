//! End-to-end behaviour of the listing, flattening, and export engine.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use docex_core::{
    apply, export, flatten, summarize, DocumentRecord, DocumentType, ExportFormat, QueryState,
    Scalar, SortKey, SortOrder, StatusFilter, StructuredValue, TypeFilter,
};

fn t1() -> DateTime<Utc> {
    "2024-01-14T15:45:00Z".parse().unwrap()
}

fn two_records() -> Vec<DocumentRecord> {
    let mut b = DocumentRecord::new(1, "B", DocumentType::Invoice, t1());
    b.processed = true;
    let a = DocumentRecord::new(2, "A", DocumentType::Resume, t1() + Duration::hours(1));
    vec![b, a]
}

fn title_asc() -> QueryState {
    QueryState {
        search_text: String::new(),
        type_filter: TypeFilter::All,
        status_filter: StatusFilter::All,
        sort_key: SortKey::Title,
        sort_order: SortOrder::Asc,
    }
}

fn ids(records: &[DocumentRecord]) -> Vec<u64> {
    records.iter().map(|r| r.id).collect()
}

/// Mixed listing with some duplicate keys.
fn mixed() -> Vec<DocumentRecord> {
    let titles = ["Invoice_1.pdf", "cv.pdf", "paper.pdf", "Invoice_2.pdf", "notes.pdf", "CV.pdf"];
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let mut r = DocumentRecord::new(
                i as u64,
                *title,
                DocumentType::ALL[i % 4],
                t1() - Duration::minutes(i as i64 * 7),
            );
            r.processed = i % 2 == 0;
            r
        })
        .collect()
}

#[test]
fn title_ascending_puts_a_before_b() {
    assert_eq!(ids(&apply(&two_records(), &title_asc())), vec![2, 1]);
}

#[test]
fn processed_filter_keeps_only_processed() {
    let state = QueryState {
        status_filter: StatusFilter::Processed,
        ..title_asc()
    };
    assert_eq!(ids(&apply(&two_records(), &state)), vec![1]);
}

#[test]
fn query_output_is_a_filtered_subset() {
    let records = mixed();
    for status in [StatusFilter::All, StatusFilter::Processed, StatusFilter::Pending] {
        for search in ["", "invoice", "cv", "zzz"] {
            let state = QueryState {
                search_text: search.to_string(),
                status_filter: status,
                ..QueryState::default()
            };
            let out = apply(&records, &state);
            assert!(out.len() <= records.len());
            assert!(out.iter().all(|r| state.matches(r) && records.contains(r)));
        }
    }
}

#[test]
fn applying_twice_is_idempotent() {
    let records = mixed();
    for key in [SortKey::Date, SortKey::Title, SortKey::Type, SortKey::Status] {
        for order in [SortOrder::Asc, SortOrder::Desc] {
            let state = QueryState {
                search_text: "pdf".into(),
                sort_key: key,
                sort_order: order,
                ..QueryState::default()
            };
            let once = apply(&records, &state);
            assert_eq!(apply(&once, &state), once);
        }
    }
}

#[test]
fn reversing_order_flips_distinct_keys() {
    let records = mixed();
    let asc = QueryState {
        sort_key: SortKey::Date,
        sort_order: SortOrder::Asc,
        ..QueryState::default()
    };
    let desc = QueryState {
        sort_order: SortOrder::Desc,
        ..asc.clone()
    };
    let mut forward = ids(&apply(&records, &asc));
    forward.reverse();
    assert_eq!(forward, ids(&apply(&records, &desc)));
}

#[test]
fn summary_of_nothing() {
    let stats = summarize(&[]);
    assert_eq!(stats.total, 0);
    assert_eq!(stats.processed_count, 0);
    assert_eq!(stats.pending_count, 0);
    assert!(stats.recent.is_empty());
}

#[test]
fn summary_counts_always_partition() {
    let records = mixed();
    for n in 0..=records.len() {
        let stats = summarize(&records[..n]);
        assert_eq!(stats.processed_count + stats.pending_count, stats.total);
        assert!(stats.recent.len() <= 5);
    }
}

#[test]
fn flatten_keeps_lists_opaque() {
    let data = StructuredValue::from(json!({"vendor": "ABC", "items": [{"qty": 1}]}));
    let flat = flatten(&data, "");
    let pairs: Vec<(String, String)> = flat
        .iter()
        .map(|(k, v)| (k.clone(), v.printable()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("vendor".to_string(), "ABC".to_string()),
            ("items".to_string(), r#"[{"qty":1}]"#.to_string()),
        ]
    );
    assert_eq!(flat, flatten(&data, ""));
}

#[test]
fn csv_export_of_nested_object() {
    let data = StructuredValue::from(json!({"a": {"b": "x"}}));
    let file = export("report", Some(&data), ExportFormat::Csv).unwrap();
    let mut lines = file.content.lines();
    assert_eq!(lines.next(), Some("a.b"));
    assert_eq!(lines.next(), Some("\"x\""));
}

#[test]
fn csv_rows_have_matching_field_counts() {
    let data = StructuredValue::from(json!({
        "invoice_number": "INV-2024-001",
        "vendor": {"name": "ABC Corporation", "address": {"city": "Springfield"}},
        "total": 1375,
        "paid": false,
        "items": [{"description": "Web", "quantity": 1}]
    }));
    let file = export("inv", Some(&data), ExportFormat::Csv).unwrap();
    let (header, values) = file.content.split_once('\n').unwrap();
    assert_eq!(header.split(',').count(), 6);
    // The list column's JSON contains a comma, the documented unescaped case.
    assert_eq!(values.split(',').count(), 7);

    let plain = StructuredValue::from(json!({"a": "1", "b": {"c": 2}}));
    let file = export("p", Some(&plain), ExportFormat::Csv).unwrap();
    let (header, values) = file.content.split_once('\n').unwrap();
    assert_eq!(header.split(',').count(), values.split(',').count());
}

#[test]
fn json_export_round_trips() {
    let data = StructuredValue::from(json!({
        "title": "Attention",
        "authors": ["A", "B"],
        "meta": {"doi": null, "year": 2017, "peer_reviewed": true}
    }));
    let file = export("paper.pdf", Some(&data), ExportFormat::Json).unwrap();
    let parsed: StructuredValue = serde_json::from_str(&file.content).unwrap();
    assert_eq!(parsed, data);
    assert_eq!(file.filename, "paper.pdf_extracted.json");
}

#[test]
fn processed_record_without_data_has_nothing_to_export_or_render() {
    let mut record = DocumentRecord::new(9, "empty.pdf", DocumentType::Other, t1());
    record.processed = true;
    assert!(docex_core::export_record(&record, ExportFormat::Json).is_none());
    assert!(docex_core::render_record(&record).is_empty());
}

#[test]
fn flat_values_stay_scalars_until_written() {
    let data = StructuredValue::from(json!({"n": 1.0}));
    let flat = flatten(&data, "");
    assert!(matches!(flat["n"], Scalar::Number(_)));
    assert_eq!(flat["n"].printable(), "1");
}
