//! Plain-text PPC performance report.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use seller_model::Record;

use crate::common::{dated_file_name, ensure_parent_dir, format_count, format_money};

const RULE_WIDTH: usize = 60;
const ENTRY_RULE_WIDTH: usize = 40;

/// One campaign's figures, taken from a transformed PPC record.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignSummary {
    pub name: String,
    pub campaign_type: String,
    pub status: String,
    pub spend: f64,
    /// Sales attributed to ads.
    pub sales: f64,
    /// Total sales, ads and organic.
    pub total_sales: f64,
    pub impressions: f64,
    pub clicks: f64,
}

impl CampaignSummary {
    /// Reads a record shaped by the PPC campaign schema. Missing numbers count as zero.
    pub fn from_record(record: &Record) -> Self {
        let number = |name: &str| record.number(name).unwrap_or(0.0);
        Self {
            name: record.value("campaignName").to_text(),
            campaign_type: record.value("campaignType").to_text(),
            status: record.value("status").to_text(),
            spend: number("spend"),
            sales: number("sales"),
            total_sales: number("totalSales"),
            impressions: number("impressions"),
            clicks: number("clicks"),
        }
    }

    /// Ad spend as a percentage of ad sales; `None` without sales.
    pub fn acos(&self) -> Option<f64> {
        (self.sales > 0.0).then(|| self.spend / self.sales * 100.0)
    }

    /// Ad sales per unit of spend; `None` without spend.
    pub fn roas(&self) -> Option<f64> {
        (self.spend > 0.0).then(|| self.sales / self.spend)
    }
}

/// Totals and per-campaign figures for a set of PPC campaigns.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceReport {
    pub title: String,
    pub period: String,
    pub generated_on: NaiveDate,
    pub campaigns: Vec<CampaignSummary>,
}

impl PerformanceReport {
    pub fn from_records(
        records: &[Record],
        title: impl Into<String>,
        period: impl Into<String>,
        generated_on: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            period: period.into(),
            generated_on,
            campaigns: records.iter().map(CampaignSummary::from_record).collect(),
        }
    }

    pub fn total_spend(&self) -> f64 {
        self.campaigns.iter().map(|c| c.spend).sum()
    }

    pub fn ad_sales(&self) -> f64 {
        self.campaigns.iter().map(|c| c.sales).sum()
    }

    pub fn total_sales(&self) -> f64 {
        self.campaigns.iter().map(|c| c.total_sales).sum()
    }

    pub fn impressions(&self) -> f64 {
        self.campaigns.iter().map(|c| c.impressions).sum()
    }

    pub fn clicks(&self) -> f64 {
        self.campaigns.iter().map(|c| c.clicks).sum()
    }

    pub fn acos(&self) -> f64 {
        ratio(self.total_spend(), self.ad_sales()) * 100.0
    }

    pub fn roas(&self) -> f64 {
        ratio(self.ad_sales(), self.total_spend())
    }

    /// Ad spend as a percentage of total sales.
    pub fn tacos(&self) -> f64 {
        ratio(self.total_spend(), self.total_sales()) * 100.0
    }

    /// Click-through rate in percent.
    pub fn ctr(&self) -> f64 {
        ratio(self.clicks(), self.impressions()) * 100.0
    }

    /// Lowest ACOS among campaigns with sales.
    pub fn best_campaign(&self) -> Option<&CampaignSummary> {
        self.ranked().min_by(|a, b| a.1.total_cmp(&b.1)).map(|(c, _)| c)
    }

    /// Highest ACOS among campaigns with sales.
    pub fn worst_campaign(&self) -> Option<&CampaignSummary> {
        self.ranked().max_by(|a, b| a.1.total_cmp(&b.1)).map(|(c, _)| c)
    }

    fn ranked(&self) -> impl Iterator<Item = (&CampaignSummary, f64)> {
        self.campaigns
            .iter()
            .filter_map(|c| c.acos().map(|acos| (c, acos)))
    }

    /// `performance-report-YYYY-MM-DD.txt`.
    pub fn file_name(&self) -> String {
        dated_file_name("performance-report", self.generated_on, "txt")
    }

    pub fn render(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();

        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(
            out,
            "Generated on {} | Period: {}",
            self.generated_on.format("%Y-%m-%d"),
            self.period
        );
        let _ = writeln!(out, "{rule}");

        let _ = writeln!(out, "\nSUMMARY\n{rule}");
        let _ = writeln!(out, "\u{2022} Campaigns: {}", self.campaigns.len());
        let _ = writeln!(out, "\u{2022} Total PPC Spend: {}", format_money(self.total_spend()));
        let _ = writeln!(out, "\u{2022} Ad Sales: {}", format_money(self.ad_sales()));
        let _ = writeln!(out, "\u{2022} Total Sales: {}", format_money(self.total_sales()));
        let _ = writeln!(out, "\u{2022} ACOS: {:.1}%", self.acos());
        let _ = writeln!(out, "\u{2022} ROAS: {:.2}", self.roas());
        let _ = writeln!(out, "\u{2022} TACOS: {:.1}%", self.tacos());
        let _ = writeln!(out, "\u{2022} Impressions: {}", format_count(self.impressions()));
        let _ = writeln!(out, "\u{2022} Clicks: {}", format_count(self.clicks()));
        let _ = writeln!(out, "\u{2022} CTR: {:.2}%", self.ctr());

        let _ = writeln!(out, "\nHIGHLIGHTS\n{rule}");
        match (self.best_campaign(), self.worst_campaign()) {
            (Some(best), Some(worst)) => {
                let _ = writeln!(out, "Best ACOS: {} ({})", best.name, percent(best.acos()));
                let _ = writeln!(out, "Needs Attention: {} ({})", worst.name, percent(worst.acos()));
            }
            _ => {
                let _ = writeln!(out, "No campaigns with attributed sales.");
            }
        }

        let _ = writeln!(out, "\nCAMPAIGN DETAILS\n{rule}");
        for campaign in &self.campaigns {
            let _ = writeln!(out, "{} ({})", campaign.name, campaign.campaign_type);
            let _ = writeln!(
                out,
                "  Spend: {} | Sales: {}",
                format_money(campaign.spend),
                format_money(campaign.sales)
            );
            let _ = writeln!(
                out,
                "  ACOS: {} | ROAS: {}",
                percent(campaign.acos()),
                campaign
                    .roas()
                    .map_or_else(|| "n/a".to_string(), |roas| format!("{roas:.2}"))
            );
            let _ = writeln!(
                out,
                "  Impressions: {} | Clicks: {} | Status: {}",
                format_count(campaign.impressions),
                format_count(campaign.clicks),
                campaign.status
            );
            let _ = writeln!(out, "  {}", "\u{2500}".repeat(ENTRY_RULE_WIDTH));
        }

        let _ = writeln!(out, "\nEnd of Report");
        out
    }

    /// Renders into `dir` under [`file_name`](Self::file_name) and returns the path.
    pub fn write_to_dir(&self, dir: &Path) -> Result<std::path::PathBuf> {
        let path = dir.join(self.file_name());
        self.write(&path)?;
        Ok(path)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;
        fs::write(path, self.render())
            .with_context(|| format!("write report {}", path.display()))?;
        info!(path = %path.display(), campaigns = self.campaigns.len(), "report written");
        Ok(())
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}%"))
}
