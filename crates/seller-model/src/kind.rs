//! Import kinds and their column contracts.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The report a CSV file is imported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportKind {
    Sales,
    Inventory,
    Product,
    PpcCampaign,
}

impl ImportKind {
    pub const ALL: [ImportKind; 4] = [
        ImportKind::Sales,
        ImportKind::Inventory,
        ImportKind::Product,
        ImportKind::PpcCampaign,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::Inventory => "Inventory",
            Self::Product => "Products",
            Self::PpcCampaign => "PPC Campaigns",
        }
    }

    /// Column names the imported file must contain (matched by substring).
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Sales => &["date", "revenue"],
            Self::Inventory => &["sku", "product", "stock", "status", "inbound", "velocity"],
            Self::Product => &[
                "name",
                "sku",
                "asin",
                "revenue",
                "sessions",
                "conversionRate",
                "inventory",
                "unitsSold",
                "profit",
                "acos",
                "status",
            ],
            Self::PpcCampaign => &[
                "campaignName",
                "campaignType",
                "totalOrders",
                "totalSales",
                "tacos",
                "spend",
                "sales",
                "acos",
                "roas",
                "impressions",
                "clicks",
                "cpc",
                "cvr",
                "ctr",
                "ppcOrders",
                "status",
            ],
        }
    }

    /// Header line of the downloadable template.
    pub fn template_headers(self) -> &'static [&'static str] {
        match self {
            Self::Sales => &[
                "date",
                "revenue",
                "unitsSold",
                "orders",
                "conversionRate",
                "averageOrderValue",
            ],
            other => other.required_columns(),
        }
    }

    /// Name the template file is derived from, if the kind has one.
    pub fn template_name(self) -> Option<&'static str> {
        match self {
            Self::Sales => Some("Sales"),
            _ => None,
        }
    }

    /// Prefix of export file names.
    pub fn export_prefix(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Inventory => "inventory",
            Self::Product => "products",
            Self::PpcCampaign => "campaigns",
        }
    }
}

impl FromStr for ImportKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sales" => Ok(Self::Sales),
            "inventory" => Ok(Self::Inventory),
            "product" | "products" => Ok(Self::Product),
            "ppc" | "ppccampaign" | "campaign" | "campaigns" => Ok(Self::PpcCampaign),
            _ => Err(ModelError::UnknownImportKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!("Sales".parse::<ImportKind>().unwrap(), ImportKind::Sales);
        assert_eq!("ppc".parse::<ImportKind>().unwrap(), ImportKind::PpcCampaign);
        assert!("refunds".parse::<ImportKind>().is_err());
    }

    #[test]
    fn sales_template_extends_required_columns() {
        let headers = ImportKind::Sales.template_headers();
        for required in ImportKind::Sales.required_columns() {
            assert!(headers.contains(required));
        }
        assert_eq!(ImportKind::PpcCampaign.template_headers().len(), 16);
    }
}
