use super::*;

fn site(line: u32) -> ConstructionSite {
    ConstructionSite {
        file: "demo.rs",
        line,
        column: 5,
    }
}

#[test]
fn lookup_returns_last_site_at_or_before() {
    let mut log = LineLog::default();
    log.record(0.0, site(10));
    log.record(1.0, site(11));
    log.record(1.0, site(12));
    log.record(3.0, site(13));

    assert_eq!(log.len(), 4);
    assert_eq!(log.at(0.5), Some(site(10)));
    assert_eq!(log.at(1.0), Some(site(12)));
    assert_eq!(log.at(2.9), Some(site(12)));
    assert_eq!(log.at(10.0), Some(site(13)));
}

#[test]
fn nothing_before_first_record() {
    let mut log = LineLog::default();
    log.record(2.0, site(1));
    assert_eq!(log.at(1.0), None);
}

#[test]
fn out_of_order_records_are_sorted() {
    let mut log = LineLog::default();
    log.record(3.0, site(1));
    log.record(1.0, site(2));
    assert_eq!(log.at(2.0), Some(site(2)));
}

#[test]
fn site_display_and_caller_capture() {
    #[track_caller]
    fn here() -> ConstructionSite {
        ConstructionSite::from_location(Location::caller())
    }
    let s = here();
    assert!(s.file.ends_with(".rs"));
    assert!(s.line > 0);
    assert_eq!(site(7).to_string(), "demo.rs:7:5");
}
