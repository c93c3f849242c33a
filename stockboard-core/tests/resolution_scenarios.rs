use stockboard_core::render::{PresentationSink, RowFormatter, RowRecord, StatusLine, render_resolution};
use stockboard_core::source::decode_document;
use stockboard_core::{BrandKey, Correction, Document, EffectiveTime, Selection, resolve};

#[derive(Default)]
struct Capture {
    status: Option<StatusLine>,
    not_found: Option<bool>,
    sections: Vec<(String, Vec<RowRecord>)>,
}

impl PresentationSink for Capture {
    fn populate_times(&mut self, _date: &str, _times: &[String]) {}

    fn show_status(&mut self, status: &StatusLine) {
        self.status = Some(status.clone());
    }

    fn render_section(&mut self, brand: &BrandKey, rows: &[RowRecord]) {
        self.sections.push((brand.to_string(), rows.to_vec()));
    }

    fn set_not_found(&mut self, not_found: bool) {
        self.not_found = Some(not_found);
    }
}

fn scenario_doc() -> Document {
    decode_document(
        br#"{"2024-01-01": {"10:00 AM": {"iphone":[{"model":"X","price":1000,"stock":"In Stock"}]}}}"#,
    )
    .unwrap()
}

#[test]
fn latest_snapshot_of_requested_date() {
    let doc = scenario_doc();
    let res = resolve(&Selection::latest("2024-01-01"), &doc);
    assert_eq!(res.effective_date, "2024-01-01");
    assert_eq!(res.effective_time, EffectiveTime::At("10:00 AM".into()));
    assert!(res.correction.is_none());

    let mut sink = Capture::default();
    render_resolution(&mut sink, &BrandKey::default_set(), &RowFormatter::default(), &res);
    assert_eq!(sink.not_found, Some(false));
    assert_eq!(sink.status.as_ref().map(StatusLine::class), Some("date-available"));

    let (brand, rows) = &sink.sections[0];
    assert_eq!(brand, "iphone");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].price, "1,000");
    assert_eq!(rows[0].stock_class.as_str(), "in-stock");
    assert!(sink.sections[1..].iter().all(|(_, rows)| rows.is_empty()));
}

#[test]
fn absent_date_falls_back_to_latest_earlier_date() {
    let doc = scenario_doc();
    let latest = resolve(&Selection::latest("2024-01-01"), &doc);
    let res = resolve(&Selection::at("2024-01-02", "9:00 AM"), &doc);
    assert_eq!(res.effective_date, "2024-01-01");
    assert_eq!(res.effective_time, EffectiveTime::At("10:00 AM".into()));
    assert_eq!(
        res.correction,
        Some(Correction {
            date: "2024-01-01".into()
        })
    );
    assert_eq!(res.payload, latest.payload);
}

#[test]
fn empty_document_is_terminal_not_found() {
    let res = resolve(&Selection::latest("2024-06-01"), &Document::new());
    assert!(!res.is_found());
    assert_eq!(res.effective_time, EffectiveTime::NoData);
    assert!(res.correction.is_none());

    let brands = BrandKey::default_set();
    let mut sink = Capture::default();
    render_resolution(&mut sink, &brands, &RowFormatter::default(), &res);
    assert_eq!(sink.not_found, Some(true));
    assert_eq!(sink.sections.len(), brands.len());
    assert!(sink.sections.iter().all(|(_, rows)| rows.is_empty()));
    let status = sink.status.unwrap();
    assert_eq!(status.time, "No Data");
    assert_eq!(status.class(), "date-not-found");
}

#[test]
fn explicit_time_is_used_verbatim() {
    let doc = decode_document(
        br#"{"2024-01-01": {"9:00 AM": {"iphone": []}, "1:00 PM": {"oneplus": []}}}"#,
    )
    .unwrap();
    let res = resolve(&Selection::at("2024-01-01", "1:00 PM"), &doc);
    assert_eq!(res.effective_time, EffectiveTime::At("1:00 PM".into()));
    assert!(res.payload.unwrap().contains_key("oneplus"));

    let res = resolve(&Selection::at("2024-01-01", "9:00 AM"), &doc);
    assert_eq!(res.effective_time, EffectiveTime::At("9:00 AM".into()));
}

#[test]
fn missing_explicit_time_does_not_fall_back() {
    let doc = scenario_doc();
    let res = resolve(&Selection::at("2024-01-01", "11:00 AM"), &doc);
    assert_eq!(res.effective_date, "2024-01-01");
    assert_eq!(res.effective_time, EffectiveTime::At("11:00 AM".into()));
    assert!(res.payload.is_none());
    assert!(res.correction.is_none());
}

#[test]
fn empty_day_is_treated_as_absent() {
    let doc = decode_document(
        br#"{"2024-01-01": {"10:00 AM": {"iphone": []}}, "2024-01-03": {}}"#,
    )
    .unwrap();
    let res = resolve(&Selection::latest("2024-01-03"), &doc);
    assert_eq!(res.effective_date, "2024-01-01");
    assert!(res.correction.is_some());
    assert!(res.is_found());
}

#[test]
fn brand_missing_from_payload_hides_only_that_section() {
    let doc = scenario_doc();
    let res = resolve(&Selection::latest("2024-01-01"), &doc);
    let brands = vec![BrandKey::new("samsung"), BrandKey::IPHONE];
    let mut sink = Capture::default();
    render_resolution(&mut sink, &brands, &RowFormatter::default(), &res);
    assert_eq!(sink.not_found, Some(false));
    assert!(sink.sections[0].1.is_empty());
    assert_eq!(sink.sections[1].1.len(), 1);
}
