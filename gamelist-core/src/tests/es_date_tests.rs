use super::*;

#[test]
fn parses_new_year_as_utc_midnight() {
    let dt = parse_es_date("20230101T000000").unwrap();
    assert_eq!(dt.timestamp(), 1_672_531_200);
}

#[test]
fn format_reproduces_source_string() {
    for s in ["20230101T000000", "19850913T123045", "00010101T000000"] {
        let dt = parse_es_date(s).unwrap();
        assert_eq!(format_es_date(&dt), s);
    }
}

#[test]
fn short_strings_are_absent() {
    assert!(parse_es_date("").is_none());
    assert!(parse_es_date("20230101").is_none());
    assert!(parse_es_date("20230101T00000").is_none());
}

#[test]
fn invalid_calendar_dates_are_absent() {
    assert!(parse_es_date("20230230T000000").is_none());
    assert!(parse_es_date("20231301T000000").is_none());
    assert!(parse_es_date("20230101T250000").is_none());
}

#[test]
fn non_numeric_components_are_absent() {
    assert!(parse_es_date("2023AB01T000000").is_none());
    assert!(parse_es_date("-0230101T000000").is_none());
}

#[test]
fn trailing_characters_are_ignored() {
    let dt = parse_es_date("19960623T000000Z").unwrap();
    assert_eq!(format_es_date(&dt), "19960623T000000");
}

#[test]
fn multibyte_input_does_not_panic() {
    assert!(parse_es_date("2023é101T0000000").is_none());
}
