//! Parsed CSV through the transformer.

use proptest::prelude::*;
use seller_ingest::parse_csv;
use seller_model::{FieldValue, ImportKind};
use seller_transform::{
    FieldType, TransformRule, TransformationSchema, schemas, transform_rows, verify_transformed,
};

#[test]
fn unparseable_revenue_becomes_null() {
    let parsed = parse_csv("date,revenue\n2024-01-01,100\n2024-01-02,abc\n");
    assert_eq!(parsed.len(), 2);

    let schema = TransformationSchema::new()
        .field("date", TransformRule::new(FieldType::Date))
        .field("revenue", TransformRule::new(FieldType::Currency).required());
    let records = transform_rows(&parsed.rows, &schema).expect("present fields never fail");

    assert_eq!(records[0].value("revenue"), FieldValue::Number(100.0));
    assert_eq!(records[1].value("revenue"), FieldValue::Null);
    assert_eq!(records[1].value("date").to_text(), "2024-01-02");
}

#[test]
fn ppc_export_transforms() {
    let text = "\
campaignName,campaignType,spend,sales,acos,ctr,impressions,clicks,status
Auto - Mugs,Sponsored Products,$1,status-free
Brand Defense,Sponsored Brands,$250.00,$1000.00,25%,0.012,48000,576,Paused
";
    let parsed = parse_csv(text);
    // The first data row has four cells and is skipped.
    assert_eq!(parsed.skipped_lines, [2]);

    let records = transform_rows(&parsed.rows, &schemas::for_kind(ImportKind::PpcCampaign))
        .expect("transform");
    let brand = &records[0];
    assert_eq!(brand.number("spend"), Some(250.0));
    assert_eq!(brand.number("acos"), Some(25.0));
    assert!((brand.number("ctr").unwrap() - 1.2).abs() < 1e-9);
    assert_eq!(brand.value("status"), FieldValue::from("Paused"));
    assert_eq!(brand.number("roas"), Some(0.0));
}

#[test]
fn missing_required_column_names_the_record() {
    let parsed = parse_csv("date,revenue,orders\n2024-01-01,10,2\n");
    let err = transform_rows(&parsed.rows, &schemas::sales_data()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error transforming record 1: Required field 'unitsSold' is missing"
    );
}

fn sales_csv(rows: &[(u32, u32, u32, u32)]) -> String {
    let mut text = String::from("date,revenue,unitsSold,orders,conversionRate\n");
    for (day, cents, units, rate_tenths) in rows {
        text.push_str(&format!(
            "2024-01-{:02},${}.{:02},{units},{units},{}.{}%\n",
            day,
            cents / 100,
            cents % 100,
            rate_tenths / 10,
            rate_tenths % 10
        ));
    }
    text
}

proptest! {
    #[test]
    fn numeric_fields_survive_round_trip(
        rows in prop::collection::vec((1u32..=28, 0u32..10_000_000, 0u32..5_000, 0u32..1_000), 1..20)
    ) {
        let parsed = parse_csv(&sales_csv(&rows));
        prop_assert_eq!(parsed.len(), rows.len());

        let records = transform_rows(&parsed.rows, &schemas::sales_data()).unwrap();
        let originals: Vec<_> = parsed.rows.iter().map(seller_model::Record::from).collect();
        prop_assert!(verify_transformed(&originals, &records).is_valid());

        for (record, (day, cents, units, rate_tenths)) in records.iter().zip(&rows) {
            prop_assert_eq!(record.value("date").to_text(), format!("2024-01-{day:02}"));
            prop_assert_eq!(record.number("revenue"), Some(f64::from(*cents) / 100.0));
            prop_assert_eq!(record.number("unitsSold"), Some(f64::from(*units)));
            prop_assert_eq!(record.number("conversionRate"), Some(f64::from(*rate_tenths) / 10.0));
            prop_assert_eq!(record.number("profitMargin"), Some(0.0));
        }
    }
}
