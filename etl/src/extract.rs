use crate::models::{LineReview, OrderLine, RawOrderLine};
use crate::utils::dates::parse_date;
use crate::utils::numbers::{parse_count, parse_decimal};
use common::config::ParsePolicy;
use common::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Columns the flat export must provide. `delivery_date` is optional.
pub const REQUIRED_COLUMNS: [&str; 16] = [
    "customer_id",
    "first_name",
    "country",
    "age_group",
    "signup_date",
    "order_id",
    "order_date",
    "order_status",
    "product_id",
    "product_name",
    "category",
    "quantity",
    "unit_price",
    "review_id",
    "rating",
    "review_date",
];

#[derive(Debug, Default)]
pub struct Extract {
    pub lines: Vec<OrderLine>,
    pub skipped_rows: usize,
}

pub fn read_order_lines(path: &Path, policy: ParsePolicy) -> Result<Extract> {
    let file = File::open(path).map_err(|e| {
        Error::InvalidInput(format!("Cannot open extract {}: {}", path.display(), e))
    })?;
    let extract = read_order_lines_from(file, policy)?;

    info!(
        path = %path.display(),
        rows = extract.lines.len(),
        skipped = extract.skipped_rows,
        "Read raw extract"
    );
    Ok(extract)
}

pub fn read_order_lines_from<R: Read>(reader: R, policy: ParsePolicy) -> Result<Extract> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(Error::SchemaMismatch(format!(
            "Extract is missing columns: {}",
            missing.join(", ")
        )));
    }

    let mut extract = Extract::default();
    for record in rdr.records() {
        let parsed = record.map_err(Error::from).and_then(|record| {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let raw: RawOrderLine = record.deserialize(Some(&headers))?;
            coerce(raw, line)
        });

        match parsed {
            Ok(line) => extract.lines.push(line),
            Err(e) => match policy {
                ParsePolicy::Fail => return Err(e),
                ParsePolicy::Skip => {
                    warn!(error = %e, "Skipping unparseable row");
                    extract.skipped_rows += 1;
                }
            },
        }
    }

    Ok(extract)
}

/// Turns a raw text row into typed values.
pub fn coerce(raw: RawOrderLine, line: u64) -> Result<OrderLine> {
    let date = |column: &str, value: &str| {
        parse_date(value).map_err(|reason| Error::parse(line, column, value, reason))
    };

    let signup_date = date("signup_date", &raw.signup_date)?;
    let order_date = date("order_date", &raw.order_date)?;
    let delivery_date = match raw.delivery_date.as_deref() {
        Some(value) => {
            let delivery_date = date("delivery_date", value)?;
            if delivery_date < order_date {
                return Err(Error::parse(
                    line,
                    "delivery_date",
                    value,
                    "before order date",
                ));
            }
            Some(delivery_date)
        }
        None => None,
    };

    let quantity = parse_count(&raw.quantity)
        .map_err(|reason| Error::parse(line, "quantity", raw.quantity.as_str(), reason))?;
    let unit_price = parse_decimal(&raw.unit_price)
        .map_err(|reason| Error::parse(line, "unit_price", raw.unit_price.as_str(), reason))?;
    if unit_price < 0.0 {
        return Err(Error::parse(
            line,
            "unit_price",
            raw.unit_price.as_str(),
            "price is negative",
        ));
    }

    let review = match raw.review_id {
        Some(review_id) => {
            let rating = raw.rating.as_deref().unwrap_or_default();
            let rating = parse_decimal(rating)
                .map_err(|reason| Error::parse(line, "rating", rating, reason))?;
            let review_date = date("review_date", raw.review_date.as_deref().unwrap_or_default())?;
            Some(LineReview {
                review_id,
                rating,
                review_date,
            })
        }
        None => None,
    };

    Ok(OrderLine {
        line,
        customer_id: raw.customer_id,
        first_name: raw.first_name,
        country: raw.country,
        age_group: raw.age_group,
        signup_date,
        order_id: raw.order_id,
        order_date,
        delivery_date,
        order_status: raw.order_status,
        product_id: raw.product_id,
        product_name: raw.product_name,
        category: raw.category,
        quantity,
        unit_price,
        review,
    })
}
