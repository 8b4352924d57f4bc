//! Reports and exports built from parsed, transformed campaign data.

use chrono::NaiveDate;
use seller_ingest::parse_csv;
use seller_model::{ImportKind, Record, TimeFrame};
use seller_report::{PerformanceReport, export_file_name, write_export};
use seller_transform::{schemas, transform_rows};

const CAMPAIGNS: &str = "\
campaignName,campaignType,spend,sales,totalSales,impressions,clicks,status
Auto - Mugs,Sponsored Products,$144.60,$482.00,$1205.00,24000,300,Active
Brand Defense,Sponsored Brands,$250.00,$1000.00,$2000.00,48000,576,Paused
Launch - Tumbler,Sponsored Products,$80.00,0,$150.00,9000,45,enabled
";

fn campaigns() -> Vec<Record> {
    let parsed = parse_csv(CAMPAIGNS);
    transform_rows(&parsed.rows, &schemas::for_kind(ImportKind::PpcCampaign))
        .expect("campaign rows transform")
}

fn generated_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

#[test]
fn renders_campaign_report() {
    let report = PerformanceReport::from_records(
        &campaigns(),
        "PPC Performance Report",
        TimeFrame::LastMonth.to_string(),
        generated_on(),
    );
    insta::assert_snapshot!(report.render());
}

#[test]
fn writes_report_and_export_files() {
    let dir = tempfile::tempdir().unwrap();
    let records = campaigns();

    let report =
        PerformanceReport::from_records(&records, "PPC Performance Report", "Last 7 days", generated_on());
    let report_path = report.write_to_dir(&dir.path().join("reports")).unwrap();
    assert!(report_path.ends_with("reports/performance-report-2024-06-01.txt"));
    let text = std::fs::read_to_string(&report_path).unwrap();
    assert!(text.starts_with("PPC Performance Report\nGenerated on 2024-06-01 | Period: Last 7 days\n"));

    let export_path = dir
        .path()
        .join(export_file_name(ImportKind::PpcCampaign.export_prefix(), generated_on()));
    write_export(&export_path, &["campaignName", "spend", "status"], &records).unwrap();
    let exported = std::fs::read_to_string(export_path).unwrap();
    assert_eq!(
        exported,
        "campaignName,spend,status\n\
         Auto - Mugs,144.6,Active\n\
         Brand Defense,250,Paused\n\
         Launch - Tumbler,80,Active\n"
    );
}
