use tempora_edtf::{parse, Edtf, InstantState, Quality};

/// `Some(expected)` means the input parses and prints as `expected`.
fn check(cases: &[(&str, Option<&str>)]) {
    for (input, expected) in cases {
        match (parse(input), expected) {
            (Ok(edtf), Some(expected)) => assert_eq!(edtf.to_string(), *expected, "{input:?}"),
            (Err(err), None) => assert!(err.is_extraction(), "{input:?}: {err}"),
            (Ok(edtf), None) => panic!("{input:?} should be rejected, got {edtf}"),
            (Err(err), Some(_)) => panic!("{input:?} should parse: {err}"),
        }
    }
}

#[test]
fn complete_date_representation() {
    check(&[
        ("1989-11-01", Some("1989-11-01")),
        ("0989-11-01", Some("0989-11-01")),
        ("198-11-01", None),
        ("1989-11-1", None),
        ("1989-1-01", None),
        ("1989/11/01", None),
        ("1989-11-01T23:59:59", Some("1989-11-01")),
        ("1989-11-01T23:59", Some("1989-11-01")),
        ("1989-11-01T23", Some("1989-11-01")),
        ("1989-11-01T", Some("1989-11-01")),
        ("1989-11-01T23:59:5", Some("1989-11-01")),
        ("1989-11-01T23:59:59Z", Some("1989-11-01")),
        ("1989-11-01T23:59:59-04", Some("1989-11-01")),
        ("1989-11-01T23:59:59+04:44", Some("1989-11-01")),
        ("1989-11-01t23:59:59", None),
        ("1989-11-01 23:59:59", None),
        ("1989-11-01 23:59:59Z", None),
        ("1989-11-01t23:59:59-04:44", None),
    ]);
}

#[test]
fn reduced_precision() {
    check(&[
        ("1989-11", Some("1989-11")),
        ("0989-11", Some("0989-11")),
        ("198-11", None),
        ("1989-1", None),
        ("1989", Some("1989")),
        ("0989", Some("0989")),
        ("198", None),
    ]);
}

#[test]
fn date_intervals() {
    check(&[
        ("1989/1990", Some("1989/1990")),
        ("1989-11/1990-11", Some("1989-11/1990-11")),
        ("1989-11-01/1990-11-01", Some("1989-11-01/1990-11-01")),
        ("1989-11-01/1990", Some("1989-11-01/1990")),
        ("1989/1990-11-01", Some("1989/1990-11-01")),
        ("1989-00/1990-00", Some("1989/1990")),
        ("1989-00-00/1990-00-00", Some("1989/1990")),
        ("1989 / 1990", None),
        ("1989-1990", None),
        ("989-1990", None),
        ("1989-990", None),
    ]);
}

#[test]
fn letter_prefixed_years() {
    check(&[
        ("Y-170000002", Some("Y-170000002")),
        ("Y170000002", Some("Y170000002")),
        ("Y0", None),
        ("Y1", None),
        ("Y-1", None),
        ("Y", None),
    ]);
}

#[test]
fn qualification() {
    check(&[
        ("1989?", Some("1989?")),
        ("1989~", Some("1989~")),
        ("1989-11?", Some("1989-11?")),
        ("1989-11~", Some("1989-11~")),
        ("1989-11-01%", Some("1989-11-01%")),
        ("1989?~", None),
    ]);
}

#[test]
fn negative_years() {
    check(&[
        ("-1989", Some("-1989")),
        ("-9999", Some("-9999")),
        ("-0989", Some("-0989")),
        ("-11989", None),
    ]);
}

#[test]
fn open_intervals() {
    check(&[
        ("../1989-11-01", Some("../1989-11-01")),
        ("../1989~", Some("../1989~")),
        ("../1989-11%", Some("../1989-11%")),
        (".. / 1989-11-01", None),
        ("../ 1989-11-01", None),
        (".. /1989-11-01", None),
        ("1989-11-01/..", Some("1989-11-01/..")),
        ("1989?/..", Some("1989?/..")),
        ("1989-11-01 / ..", None),
        ("1989-11-01 /..", None),
        ("1989-11-01/ ..", None),
        ("../..", None),
    ]);
}

#[test]
fn unknown_intervals() {
    check(&[
        ("/1989-11-01", Some("/1989-11-01")),
        ("/1989%", Some("/1989%")),
        (" / 1989-11-01", None),
        ("/ 1989-11-01", None),
        ("1989-11-01/", Some("1989-11-01/")),
        ("1989-11~/", Some("1989-11~/")),
        ("1989-11-01 / ", None),
        ("1989-11-01/ ", None),
        ("/", None),
    ]);
}

#[test]
fn unknown_and_open_are_distinct() {
    let Ok(Edtf::Interval(unknown)) = parse("1989/") else {
        panic!("expected interval");
    };
    let Ok(Edtf::Interval(open)) = parse("1989/..") else {
        panic!("expected interval");
    };
    assert_eq!(unknown.end().state(), InstantState::Unknown);
    assert_eq!(open.end().state(), InstantState::Open);
    assert_ne!(unknown, open);
}

#[test]
fn interval_quality_is_per_side() {
    let Ok(Edtf::Interval(interval)) = parse("1989?/1990~") else {
        panic!("expected interval");
    };
    assert_eq!(interval.start().quality(), Quality::UNCERTAIN);
    assert_eq!(interval.end().quality(), Quality::APPROXIMATE);
    assert_eq!(interval.quality(), Quality::UNCERTAIN_APPROXIMATE);
}

#[test]
fn bucket_bounds() {
    let edtf: Edtf = "19XX".parse().unwrap();
    assert_eq!(edtf.first_day().unwrap().to_string(), "1901-01-01");
    assert_eq!(edtf.last_day().unwrap().to_string(), "2000-12-31");

    let edtf: Edtf = "198X/199X".parse().unwrap();
    assert_eq!(edtf.first_day().unwrap().to_string(), "1980-01-01");
    assert_eq!(edtf.last_day().unwrap().to_string(), "1999-12-31");
}

#[test]
fn last_bucket_ends_in_four_digits() {
    let edtf: Edtf = "98XX".parse().unwrap();
    let end = edtf.last_day().unwrap().to_string();
    assert_eq!(end, "9900-12-31");
    assert!(end.parse::<Edtf>().is_ok());

    let err = parse("99XX").unwrap_err();
    assert!(err.is_extraction(), "{err}");
    assert_eq!(parse("999X").unwrap().last_day().unwrap().to_string(), "9999-12-31");
}
