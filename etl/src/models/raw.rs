use serde::Deserialize;

/// One order line exactly as it appears in the flat export.
///
/// Every field is kept as text; coercion happens in the extract step so that
/// failures can name the offending line and column.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOrderLine {
    pub customer_id: String,
    pub first_name: String,
    pub country: String,
    pub age_group: String,
    pub signup_date: String,
    pub order_id: String,
    pub order_date: String,
    pub order_status: String,
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub quantity: String,
    pub unit_price: String,
    pub review_id: Option<String>,
    pub rating: Option<String>,
    pub review_date: Option<String>,
    #[serde(default)]
    pub delivery_date: Option<String>,
}
