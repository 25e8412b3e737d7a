use chrono::prelude::*;
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use structured_qs::{Error, Schema, SearchParams, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Params {
    when: DateTime<FixedOffset>,
}

fn sample_date() -> DateTime<FixedOffset> {
    NaiveDate::from_ymd_opt(2014, 11, 28)
        .unwrap()
        .and_hms_nano_opt(21, 45, 59, 324310806)
        .unwrap()
        .and_local_timezone(FixedOffset::east_opt(9 * 3600).unwrap())
        .unwrap()
}

#[test]
fn dates() {
    let params = Params {
        when: sample_date(),
    };

    let mapping = structured_qs::to_mapping(&params).unwrap();
    let s = structured_qs::to_string(&mapping).unwrap();
    insta::assert_snapshot!(s, @"when=2014-11-28T21%3A45%3A59.324310806%2B09%3A00");

    let data: Params = structured_qs::from_str_as(&s).unwrap();
    assert_eq!(data, params);
}

#[test]
fn improperly_encoded_dates() {
    // a literal `+` only means a space with form encoding
    let data: Params = structured_qs::from_str_as("when=2014-11-28T21:45:59.324310806+09:00").unwrap();
    assert_eq!(data.when, sample_date());

    let err = structured_qs::Config::new()
        .use_form_encoding(true)
        .deserialize_str_as::<Params>("when=2014-11-28T21:45:59.324310806+09:00")
        .unwrap_err();
    assert!(matches!(err, Error::Custom(_)), "got: {:?}", err);
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Range {
    from: NaiveDate,
    to: Option<NaiveDate>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Booking {
    range: Range,
    guests: u8,
}

#[test]
fn schema_accepts_and_normalizes() {
    let schema = Schema::<Booking>::new();
    let params = SearchParams::parse_with("?range_from=2024-02-29&guests=02&utm=ad", &schema).unwrap();

    assert_eq!(params.get("range.from"), Some(&Value::from("2024-02-29")));
    assert_eq!(params.get("guests"), Some(&Value::from("2")));
    assert_eq!(params.get("utm"), None);
    assert_eq!(params.to_string(), "guests=2&range_from=2024-02-29");

    let booking: Booking = params.to_typed().unwrap();
    assert_eq!(booking.range.to, None);
    assert_eq!(booking.range.from, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
}

#[test]
fn schema_rejects() {
    let schema = Schema::<Booking>::new();

    let err = SearchParams::parse_with("range_from=2023-02-29&guests=2", &schema).unwrap_err();
    assert!(matches!(err, Error::Rejected(_)), "got: {:?}", err);

    let err = SearchParams::parse_with("range_from=2024-02-29&guests=300", &schema).unwrap_err();
    assert!(matches!(err, Error::Rejected(_)), "got: {:?}", err);

    let err = SearchParams::parse_with("guests=2", &schema).unwrap_err();
    assert!(err.to_string().contains("missing field `range`"), "got: {}", err);
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SortBy {
    Relevance,
    Price { desc: bool },
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Search {
    sort: SortBy,
    #[serde(default)]
    tags: Vec<String>,
}

#[test]
fn enums() {
    let search: Search = structured_qs::from_str_as("sort=relevance").unwrap();
    assert_eq!(
        search,
        Search {
            sort: SortBy::Relevance,
            tags: vec![],
        }
    );

    let search: Search = structured_qs::from_str_as("sort_price_desc=true&tags=a").unwrap();
    assert_eq!(
        search,
        Search {
            sort: SortBy::Price { desc: true },
            tags: vec!["a".to_owned()],
        }
    );

    let params = SearchParams::from_typed(&search).unwrap();
    assert_eq!(params.to_string(), "sort_price_desc=true&tags=a");
}

#[test]
fn set_all_from_typed() {
    #[derive(Serialize)]
    struct Page {
        page: u16,
    }

    let mut params = SearchParams::parse("sort=relevance&page=1").unwrap();
    params
        .set_all_from(&Page { page: 4 }, structured_qs::Merge::Deep)
        .unwrap();
    assert_eq!(params.to_string(), "page=4&sort=relevance");
}
