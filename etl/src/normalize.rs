use crate::models::{Customer, Order, OrderItem, OrderLine, Product, Review};
use common::tables::{CUSTOMERS, ORDERS, PRODUCTS, REVIEWS};
use common::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, warn};

/// Duplicate natural keys whose other attributes disagreed with the first
/// occurrence. The first occurrence is the one kept.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictReport {
    pub customers: usize,
    pub orders: usize,
    pub products: usize,
    pub reviews: usize,
}

impl ConflictReport {
    pub fn total(&self) -> usize {
        self.customers + self.orders + self.products + self.reviews
    }
}

#[derive(Debug, Default)]
pub struct NormalizedTables {
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
    pub products: Vec<Product>,
    pub order_items: Vec<OrderItem>,
    pub reviews: Vec<Review>,
    pub conflicts: ConflictReport,
}

/// Splits the flat extract into the five entity tables.
///
/// Every line must already carry a delivery date.
pub fn normalize(lines: &[OrderLine]) -> Result<NormalizedTables> {
    let (customers, customer_conflicts) = dedup_first(
        CUSTOMERS.name,
        lines.iter().map(|l| (l.line, l.customer())),
        |c| c.customer_id.clone(),
    );

    let orders = lines
        .iter()
        .map(|l| {
            l.order().map(|order| (l.line, order)).ok_or_else(|| {
                Error::InvalidInput(format!("Line {} has no delivery date", l.line))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let (orders, order_conflicts) = dedup_first(ORDERS.name, orders, |o| o.order_id.clone());

    let (products, product_conflicts) = dedup_first(
        PRODUCTS.name,
        lines.iter().map(|l| (l.line, l.product())),
        |p| p.product_id.clone(),
    );

    // One source line is one order item; ids are 1-based in source order.
    let order_items: Vec<OrderItem> = lines
        .iter()
        .zip(1..)
        .map(|(l, id)| l.order_item(id))
        .collect();

    let (reviews, review_conflicts) = dedup_first(
        REVIEWS.name,
        lines.iter().filter_map(|l| l.review().map(|r| (l.line, r))),
        |r| r.review_id.clone(),
    );

    let tables = NormalizedTables {
        customers,
        orders,
        products,
        order_items,
        reviews,
        conflicts: ConflictReport {
            customers: customer_conflicts,
            orders: order_conflicts,
            products: product_conflicts,
            reviews: review_conflicts,
        },
    };

    info!(
        customers = tables.customers.len(),
        orders = tables.orders.len(),
        products = tables.products.len(),
        order_items = tables.order_items.len(),
        reviews = tables.reviews.len(),
        conflicts = tables.conflicts.total(),
        "Normalized extract"
    );

    Ok(tables)
}

/// Keeps the first row per key, in source order, and counts later rows that
/// share a key but differ elsewhere.
fn dedup_first<T, I, F>(table: &str, rows: I, key: F) -> (Vec<T>, usize)
where
    T: PartialEq,
    I: IntoIterator<Item = (u64, T)>,
    F: Fn(&T) -> String,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut kept = Vec::new();
    let mut conflicts = 0;

    for (line, row) in rows {
        let row_key = key(&row);
        match positions.get(&row_key) {
            Some(&position) => {
                if kept[position] != row {
                    conflicts += 1;
                    warn!(
                        table,
                        key = %row_key,
                        line,
                        "Duplicate key with conflicting attributes; keeping first occurrence"
                    );
                }
            }
            None => {
                positions.insert(row_key, kept.len());
                kept.push(row);
            }
        }
    }

    (kept, conflicts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineReview;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn line(n: u64, customer: &str, order: &str, product: &str, review: Option<&str>) -> OrderLine {
        OrderLine {
            line: n,
            customer_id: customer.into(),
            first_name: format!("name-{customer}"),
            country: "Thailand".into(),
            age_group: "25-34".into(),
            signup_date: date(2021, 1, 1),
            order_id: order.into(),
            order_date: date(2023, 1, 1),
            delivery_date: Some(date(2023, 1, 4)),
            order_status: "Delivered".into(),
            product_id: product.into(),
            product_name: format!("name-{product}"),
            category: "Home".into(),
            quantity: 1,
            unit_price: 9.5,
            review: review.map(|id| LineReview {
                review_id: id.into(),
                rating: 4.0,
                review_date: date(2023, 1, 10),
            }),
        }
    }

    fn sample() -> Vec<OrderLine> {
        vec![
            line(2, "C1", "O1", "P1", Some("R1")),
            line(3, "C1", "O1", "P2", Some("R1")),
            line(4, "C2", "O2", "P1", None),
            line(5, "C1", "O3", "P3", Some("R2")),
        ]
    }

    #[test]
    fn natural_keys_are_unique() {
        let tables = normalize(&sample()).unwrap();

        let customer_ids: HashSet<_> = tables.customers.iter().map(|c| &c.customer_id).collect();
        let product_ids: HashSet<_> = tables.products.iter().map(|p| &p.product_id).collect();
        let review_ids: HashSet<_> = tables.reviews.iter().map(|r| &r.review_id).collect();

        assert_eq!(tables.customers.len(), 2);
        assert_eq!(customer_ids.len(), 2);
        assert_eq!(tables.orders.len(), 3);
        assert_eq!(tables.products.len(), 3);
        assert_eq!(product_ids.len(), 3);
        assert_eq!(tables.reviews.len(), 2);
        assert_eq!(review_ids.len(), 2);
        assert_eq!(tables.conflicts.total(), 0);
    }

    #[test]
    fn order_items_keep_every_line_with_sequential_ids() {
        let lines = sample();
        let tables = normalize(&lines).unwrap();

        assert_eq!(tables.order_items.len(), lines.len());
        let ids: Vec<i64> = tables.order_items.iter().map(|i| i.order_item_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(tables.order_items[1].product_id, "P2");

        let orders: HashSet<_> = tables.orders.iter().map(|o| o.order_id.as_str()).collect();
        let products: HashSet<_> = tables.products.iter().map(|p| p.product_id.as_str()).collect();
        for item in &tables.order_items {
            assert!(orders.contains(item.order_id.as_str()));
            assert!(products.contains(item.product_id.as_str()));
        }
    }

    #[test]
    fn first_occurrence_wins_and_conflicts_are_counted() {
        let mut lines = sample();
        lines[1].country = "Japan".into();
        lines[1].order_status = "Cancelled".into();

        let tables = normalize(&lines).unwrap();

        assert_eq!(tables.customers[0].country, "Thailand");
        assert_eq!(tables.orders[0].order_status, "Delivered");
        assert_eq!(tables.conflicts.customers, 1);
        assert_eq!(tables.conflicts.orders, 1);
        assert_eq!(tables.conflicts.products, 0);
    }

    #[test]
    fn missing_delivery_date_is_rejected() {
        let mut lines = sample();
        lines[2].delivery_date = None;
        assert!(matches!(normalize(&lines), Err(Error::InvalidInput(_))));
    }
}
