//! Predefined schemas for seller data.

use seller_model::{FieldValue, ImportKind};

use crate::types::{FieldType, TransformRule, TransformationSchema};

/// Inventory health values; anything else becomes `healthy`.
pub const INVENTORY_STATUSES: [&str; 4] = ["healthy", "low", "critical", "out_of_stock"];

/// Campaign states; anything else becomes `Active`.
pub const CAMPAIGN_STATUSES: [&str; 4] = ["Active", "Paused", "Targeting", "Archived"];

/// Product health values; anything else becomes `profitable`.
pub const PRODUCT_STATUSES: [&str; 4] = ["profitable", "attention", "low-stock", "out-of-stock"];

fn required(field_type: FieldType) -> TransformRule {
    TransformRule::new(field_type).required()
}

fn zero(field_type: FieldType) -> TransformRule {
    TransformRule::new(field_type).with_default(0.0)
}

/// Status rule limited to `allowed` (exact match), falling back to `fallback`.
fn status(allowed: &'static [&'static str], fallback: &'static str) -> TransformRule {
    TransformRule::new(FieldType::String)
        .with_default(fallback)
        .with_transform(move |value| {
            let known = value
                .as_text()
                .is_some_and(|text| allowed.iter().any(|status| *status == text));
            if known { value } else { FieldValue::from(fallback) }
        })
}

/// Catalog product entered through a form.
pub fn product() -> TransformationSchema {
    TransformationSchema::new()
        .field("name", required(FieldType::String))
        .field("sku", required(FieldType::String))
        .field("asin", required(FieldType::String))
        .field("price", required(FieldType::Currency))
        .field("inventory", required(FieldType::Number))
        .field("description", TransformRule::new(FieldType::String).with_default(""))
        .field(
            "category",
            TransformRule::new(FieldType::String).with_default("Uncategorized"),
        )
        .field("isActive", TransformRule::new(FieldType::Boolean).with_default(true))
        .field(
            "tags",
            TransformRule::new(FieldType::Array).with_default(Vec::<String>::new()),
        )
}

/// Product performance row from a product-page CSV.
pub fn product_performance() -> TransformationSchema {
    TransformationSchema::new()
        .field("name", required(FieldType::String))
        .field("sku", required(FieldType::String))
        .field("asin", required(FieldType::String))
        .field("revenue", zero(FieldType::Currency))
        .field("sessions", zero(FieldType::Number))
        .field("conversionRate", zero(FieldType::Percentage))
        .field("inventory", zero(FieldType::Number))
        .field("unitsSold", zero(FieldType::Number))
        .field("profit", zero(FieldType::Currency))
        .field("acos", zero(FieldType::Percentage))
        .field("status", status(&PRODUCT_STATUSES, "profitable"))
}

/// Advertising campaign entered through a form.
pub fn campaign() -> TransformationSchema {
    TransformationSchema::new()
        .field("campaignName", required(FieldType::String))
        .field("budget", required(FieldType::Currency))
        .field("targetAcos", zero(FieldType::Percentage))
        .field("startDate", required(FieldType::Date))
        .field("endDate", TransformRule::new(FieldType::Date))
        .field("isActive", TransformRule::new(FieldType::Boolean).with_default(true))
        .field(
            "keywords",
            TransformRule::new(FieldType::Array).with_default(Vec::<String>::new()),
        )
}

/// Daily sales row.
pub fn sales_data() -> TransformationSchema {
    TransformationSchema::new()
        .field("date", required(FieldType::Date))
        .field("revenue", required(FieldType::Currency))
        .field("unitsSold", required(FieldType::Number))
        .field("orders", required(FieldType::Number))
        .field("conversionRate", zero(FieldType::Percentage))
        .field("averageOrderValue", zero(FieldType::Currency))
        .field("profitMargin", zero(FieldType::Percentage))
}

/// Inventory row.
pub fn inventory_data() -> TransformationSchema {
    TransformationSchema::new()
        .field("sku", required(FieldType::String))
        .field("product", required(FieldType::String))
        .field("stock", required(FieldType::Number))
        .field("inbound", zero(FieldType::Number))
        .field("velocity", zero(FieldType::Number))
        .field("status", status(&INVENTORY_STATUSES, "healthy"))
}

/// PPC campaign performance row.
pub fn ppc_campaign() -> TransformationSchema {
    TransformationSchema::new()
        .field("campaignName", required(FieldType::String))
        .field("campaignType", required(FieldType::String))
        .field("totalOrders", zero(FieldType::Number))
        .field("totalSales", zero(FieldType::Currency))
        .field("tacos", zero(FieldType::Percentage))
        .field("spend", zero(FieldType::Currency))
        .field("sales", zero(FieldType::Currency))
        .field("acos", zero(FieldType::Percentage))
        .field("roas", zero(FieldType::Number))
        .field("impressions", zero(FieldType::Number))
        .field("clicks", zero(FieldType::Number))
        .field("cpc", zero(FieldType::Currency))
        .field("cvr", zero(FieldType::Percentage))
        .field("ctr", zero(FieldType::Percentage))
        .field("ppcOrders", zero(FieldType::Number))
        .field("status", status(&CAMPAIGN_STATUSES, "Active"))
}

/// Schema an import of `kind` is transformed with.
pub fn for_kind(kind: ImportKind) -> TransformationSchema {
    match kind {
        ImportKind::Sales => sales_data(),
        ImportKind::Inventory => inventory_data(),
        ImportKind::Product => product_performance(),
        ImportKind::PpcCampaign => ppc_campaign(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::transform_record;
    use seller_model::Record;

    #[test]
    fn test_inventory_status_normalized() {
        let base = Record::new()
            .with("sku", "MUG-01")
            .with("product", "Mug")
            .with("stock", "12");
        let out = transform_record(&base.clone().with("status", "low"), &inventory_data()).unwrap();
        assert_eq!(out.value("status"), FieldValue::from("low"));

        let out = transform_record(&base.clone().with("status", "LOW"), &inventory_data()).unwrap();
        assert_eq!(out.value("status"), FieldValue::from("healthy"));

        let out = transform_record(&base, &inventory_data()).unwrap();
        assert_eq!(out.value("status"), FieldValue::from("healthy"));
        assert_eq!(out.value("inbound"), FieldValue::Number(0.0));
    }

    #[test]
    fn test_product_defaults() {
        let record = Record::new()
            .with("name", "Mug")
            .with("sku", "MUG-01")
            .with("asin", "B08XYZ1234")
            .with("price", "$12.50")
            .with("inventory", "40")
            .with("tags", "kitchen, gift");
        let out = transform_record(&record, &product()).unwrap();
        assert_eq!(out.value("price"), FieldValue::Number(12.5));
        assert_eq!(out.value("category"), FieldValue::from("Uncategorized"));
        assert_eq!(out.value("isActive"), FieldValue::Bool(true));
        assert_eq!(
            out.value("tags"),
            FieldValue::List(vec!["kitchen".into(), "gift".into()])
        );
    }

    #[test]
    fn test_campaign_requires_start_date() {
        let record = Record::new().with("campaignName", "Brand").with("budget", "50");
        let err = transform_record(&record, &campaign()).unwrap_err();
        assert_eq!(err.to_string(), "Required field 'startDate' is missing");
    }

    #[test]
    fn test_ppc_status_fallback() {
        let record = Record::new()
            .with("campaignName", "Auto - Mugs")
            .with("campaignType", "SP")
            .with("status", "Deleted");
        let out = transform_record(&record, &ppc_campaign()).unwrap();
        assert_eq!(out.value("status"), FieldValue::from("Active"));
        assert_eq!(out.len(), 16);
    }

    #[test]
    fn test_schemas_cover_required_columns() {
        for kind in ImportKind::ALL {
            let schema = for_kind(kind);
            for name in schema.required_fields() {
                let listed = kind
                    .required_columns()
                    .iter()
                    .chain(kind.template_headers())
                    .any(|column| *column == name);
                assert!(
                    listed,
                    "{name} required by {kind:?} schema but not in its columns"
                );
            }
        }
    }
}
