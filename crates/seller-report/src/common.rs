//! Shared helpers for output files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

/// `{stem}-YYYY-MM-DD.{extension}`.
pub fn dated_file_name(stem: &str, date: NaiveDate, extension: &str) -> String {
    format!("{stem}-{}.{extension}", date.format("%Y-%m-%d"))
}

/// Dollar amount with thousands separators and two decimals: `$1,234.50`.
pub fn format_money(amount: f64) -> String {
    let rendered = format!("{:.2}", amount.abs());
    let (whole, cents) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));
    let sign = if amount < 0.0 && rendered != "0.00" { "-" } else { "" };
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Whole count with thousands separators: `48,000`.
pub fn format_count(count: f64) -> String {
    let rendered = format!("{:.0}", count.abs());
    let sign = if count < 0.0 && rendered != "0" { "-" } else { "" };
    format!("{sign}{}", group_thousands(&rendered))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(12.5), "$12.50");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_money(-250.0), "-$250.00");
        assert_eq!(format_money(-0.001), "$0.00");
    }

    #[test]
    fn test_count() {
        assert_eq!(format_count(576.0), "576");
        assert_eq!(format_count(48000.0), "48,000");
        assert_eq!(format_count(123456.6), "123,457");
    }

    #[test]
    fn test_dated_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            dated_file_name("performance-report", date, "txt"),
            "performance-report-2024-06-01.txt"
        );
    }
}
