//! Full-pipeline tests over in-memory fragment sources.
//!
//! No pdfium needed: pages are `Vec<Vec<Fragment>>`, which implements
//! `FragmentSource`. Set `RUST_LOG=pdf2array=debug` to see stage logs.

use pdf2array::{
    apply_filters, extract_rows, extract_table, pdf2array_async, ExtractionConfig, FilterSetting,
    Fragment, PageSelection, Pdf2ArrayError, SliceOptions, SuperscriptOptions,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn frag(text: &str, x: f64, y: f64, width: f64) -> Fragment {
    Fragment::new(text, x, y, width, 10.0)
}

const BODIES: [&str; 4] = ["Revenue", "Expenses", "Assets", "Liabilities"];

/// Four pages, each with a body line and a three-part footer near y = 100.
fn four_page_report() -> Vec<Vec<Fragment>> {
    let footer_ys = [100.0, 100.4, 99.8, 100.2];
    (0..4)
        .map(|page| {
            let number = (page + 1).to_string();
            vec![
                frag(BODIES[page], 0.0, 700.0, 120.0),
                frag("ACME", 0.0, footer_ys[page], 50.0),
                frag("Page", 60.0, footer_ys[page], 50.0),
                frag(&number, 120.0, footer_ys[page], 50.0),
            ]
        })
        .collect()
}

// ── Scenarios ────────────────────────────────────────────────────────────────

#[test]
fn repeated_footer_is_removed_from_every_page() {
    init_tracing();
    let doc = four_page_report();

    let plain = extract_table(&doc, &ExtractionConfig::default()).unwrap();
    assert_eq!(plain.len(), 8);
    assert_eq!(plain[1], vec!["ACME", "Page", "1"]);

    let config = ExtractionConfig::builder().strip_footers(true).build().unwrap();
    let table = extract_table(&doc, &config).unwrap();
    assert_eq!(
        table,
        vec![
            vec!["Revenue"],
            vec!["Expenses"],
            vec!["Assets"],
            vec!["Liabilities"]
        ]
    );
}

#[test]
fn footnote_marker_after_word_is_removed() {
    init_tracing();
    let doc = vec![vec![
        Fragment::new("Intro", 0.0, 500.0, 40.0, 10.0),
        Fragment::new("1", 40.0, 503.0, 3.0, 4.0),
    ]];

    let plain = extract_table(&doc, &ExtractionConfig::default()).unwrap();
    assert_eq!(plain, vec![vec!["1"], vec!["Intro"]]);

    let config = ExtractionConfig::builder()
        .strip_superscript(true)
        .build()
        .unwrap();
    let table = extract_table(&doc, &config).unwrap();
    assert_eq!(table, vec![vec!["Intro"]]);
}

#[test]
fn gap_between_clusters_gives_two_columns() {
    init_tracing();
    let doc = vec![vec![
        frag("Date", 0.0, 700.0, 40.0),
        frag("of", 40.0, 700.0, 15.0),
        frag("issue", 55.0, 700.0, 45.0),
        frag("Amount", 200.0, 700.0, 100.0),
        frag("2024-01-05", 0.0, 680.0, 100.0),
        frag("12.50", 200.0, 680.0, 60.0),
        frag("2024-02-11", 0.0, 660.0, 100.0),
        frag("7.00", 200.0, 660.0, 60.0),
    ]];

    let config = ExtractionConfig::builder().slice(true).build().unwrap();
    let rows = extract_rows(&doc, &config).unwrap();
    let table: Vec<Vec<String>> = rows.iter().map(|r| r.texts()).collect();
    assert_eq!(
        table,
        vec![
            vec!["Date of issue", "Amount"],
            vec!["2024-01-05", "12.50"],
            vec!["2024-02-11", "7.00"],
        ]
    );
    for row in &rows {
        assert_eq!(row.items.len(), 2);
        assert_eq!(row.xs[0], 0.0);
        assert_eq!(row.xs[1], rows[0].xs[1]);
    }
}

// ── Properties ───────────────────────────────────────────────────────────────

#[test]
fn row_building_ignores_fragment_order() {
    let page = vec![
        frag("a", 0.0, 300.0, 20.0),
        frag("b", 30.0, 301.0, 20.0),
        frag("c", 60.0, 299.0, 20.0),
        frag("d", 0.0, 250.0, 20.0),
        frag("e", 30.0, 252.0, 20.0),
        frag("f", 0.0, 100.0, 20.0),
        Fragment::new("tiny", 90.0, 100.5, 10.0, 3.0),
    ];
    let expected = extract_table(&vec![page.clone()], &ExtractionConfig::default()).unwrap();

    let mut reversed = page.clone();
    reversed.reverse();
    assert_eq!(
        extract_table(&vec![reversed], &ExtractionConfig::default()).unwrap(),
        expected
    );

    for shift in 1..page.len() {
        let mut rotated = page.clone();
        rotated.rotate_left(shift);
        assert_eq!(
            extract_table(&vec![rotated], &ExtractionConfig::default()).unwrap(),
            expected,
            "rotation by {shift}"
        );
    }
}

#[test]
fn rows_belong_to_one_page_and_are_numbered() {
    let doc = vec![
        vec![frag("p1", 0.0, 50.0, 10.0)],
        vec![],
        vec![frag("p3", 0.0, 50.0, 10.0), frag("p3b", 20.0, 50.0, 10.0)],
    ];
    let rows = extract_rows(&doc, &ExtractionConfig::default()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].page, 0);
    assert_eq!(rows[1].page, 2);
    assert_eq!(rows[1].texts(), vec!["p3", "p3b"]);
    assert_eq!(
        rows.iter().map(|r| r.row_number).collect::<Vec<_>>(),
        vec![0, 1]
    );
}

#[test]
fn page_selection_is_one_based() {
    let doc = four_page_report();
    let config = ExtractionConfig::builder()
        .pages(PageSelection::Set(vec![4, 2]))
        .build()
        .unwrap();
    let table = extract_table(&doc, &config).unwrap();
    assert_eq!(table[0], vec!["Expenses"]);
    assert_eq!(table[2], vec!["Liabilities"]);
    assert_eq!(table.len(), 4);
}

#[test]
fn filters_are_idempotent_on_their_own_output() {
    let doc = four_page_report();
    let config = ExtractionConfig::builder()
        .strip_footers(true)
        .strip_superscript(true)
        .build()
        .unwrap();
    let once = extract_rows(&doc, &config).unwrap();
    let twice = apply_filters(once.clone(), &config).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn ambiguous_superscript_survives() {
    let doc = vec![vec![
        Fragment::new("Intro", 0.0, 500.0, 40.0, 10.0),
        Fragment::new("Body", 10.0, 501.0, 30.0, 10.0),
        Fragment::new("1", 40.0, 503.0, 3.0, 4.0),
    ]];
    let config = ExtractionConfig::builder()
        .superscript_options(SuperscriptOptions::default())
        .build()
        .unwrap();
    let table = extract_table(&doc, &config).unwrap();
    assert!(table.iter().flatten().any(|cell| cell == "1"));
}

// ── Configuration ────────────────────────────────────────────────────────────

#[test]
fn config_from_json_accepts_bools_and_objects() {
    let json = r#"{
        "pages": { "Range": [1, 2] },
        "strip_footers": true,
        "strip_superscript": { "height_scale": 1.0 },
        "slice": false
    }"#;
    let config: ExtractionConfig = serde_json::from_str(json).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.pages, PageSelection::Range(1, 2));
    assert!(config.strip_footers.resolve().is_some());
    assert!(config.slice.resolve().is_none());

    let superscript = config.strip_superscript.resolve().unwrap();
    assert_eq!(superscript.height_scale, 1.0);
    assert_eq!(superscript.radius_scale, 0.5);
    assert!(superscript.strip_left && superscript.strip_right);
}

#[test]
fn empty_json_is_the_default_config() {
    let config: ExtractionConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, ExtractionConfig::default());
}

#[test]
fn invalid_json_options_are_rejected_at_extraction() {
    let config: ExtractionConfig =
        serde_json::from_str(r#"{ "slice": { "vertical_slices": 0 } }"#).unwrap();
    assert_eq!(
        config.slice,
        FilterSetting::Options(SliceOptions { vertical_slices: 0 })
    );

    let err = extract_table(&four_page_report(), &config).unwrap_err();
    assert!(matches!(err, Pdf2ArrayError::InvalidOptions(_)));
    assert!(!err.is_parse_error());
}

// ── Async entry point ────────────────────────────────────────────────────────

#[tokio::test]
async fn async_entry_reports_non_pdf_input() {
    let err = pdf2array_async(b"PK\x03\x04 zip archive".to_vec(), ExtractionConfig::default())
        .await
        .unwrap_err();
    match err {
        Pdf2ArrayError::NotAPdf { magic } => assert_eq!(magic, b"PK\x03\x04".to_vec()),
        other => panic!("expected NotAPdf, got {other:?}"),
    }
}

#[test]
fn async_entry_validates_options_first() {
    let config = ExtractionConfig {
        slice: FilterSetting::Options(SliceOptions { vertical_slices: 0 }),
        ..Default::default()
    };
    let result = tokio_test::block_on(pdf2array_async(b"%PDF-1.7".to_vec(), config));
    assert!(matches!(result, Err(Pdf2ArrayError::InvalidOptions(_))));
}
