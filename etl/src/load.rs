use crate::models::{Customer, Order, OrderItem, Product, Review};
use crate::normalize::NormalizedTables;
use common::tables::{ALL_TABLES, CUSTOMERS, ORDERS, ORDER_ITEMS, PRODUCTS, REVIEWS, TableDef};
use common::Result;
use rusqlite::{params, Connection, Statement, Transaction};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// A row that knows its table and how to bind itself to that table's insert.
pub trait StoreRow {
    fn table() -> &'static TableDef;
    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize>;
}

impl StoreRow for Customer {
    fn table() -> &'static TableDef {
        &CUSTOMERS
    }

    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![
            self.customer_id,
            self.first_name,
            self.country,
            self.age_group,
            self.signup_date,
        ])
    }
}

impl StoreRow for Product {
    fn table() -> &'static TableDef {
        &PRODUCTS
    }

    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.product_id, self.product_name, self.category])
    }
}

impl StoreRow for Order {
    fn table() -> &'static TableDef {
        &ORDERS
    }

    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![
            self.order_id,
            self.customer_id,
            self.order_date,
            self.delivery_date,
            self.order_status,
        ])
    }
}

impl StoreRow for OrderItem {
    fn table() -> &'static TableDef {
        &ORDER_ITEMS
    }

    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![
            self.order_id,
            self.product_id,
            self.quantity,
            self.unit_price,
            self.order_item_id,
        ])
    }
}

impl StoreRow for Review {
    fn table() -> &'static TableDef {
        &REVIEWS
    }

    fn insert(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![
            self.review_id,
            self.order_id,
            self.rating,
            self.review_date,
        ])
    }
}

/// Opens the store for writing, creating the file if needed.
pub fn open_store(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(Connection::open(path)?)
}

/// Replaces the five entity tables wholesale. Returns rows written per table.
pub fn write_tables(
    conn: &mut Connection,
    tables: &NormalizedTables,
) -> Result<BTreeMap<&'static str, usize>> {
    let tx = conn.transaction()?;

    for table in ALL_TABLES.iter().rev() {
        tx.execute(&table.drop_sql(), [])?;
    }
    for table in ALL_TABLES.iter() {
        tx.execute(&table.create_sql(), [])?;
    }

    let mut counts = BTreeMap::new();
    counts.insert(CUSTOMERS.name, insert_rows(&tx, &tables.customers)?);
    counts.insert(PRODUCTS.name, insert_rows(&tx, &tables.products)?);
    counts.insert(ORDERS.name, insert_rows(&tx, &tables.orders)?);
    counts.insert(ORDER_ITEMS.name, insert_rows(&tx, &tables.order_items)?);
    counts.insert(REVIEWS.name, insert_rows(&tx, &tables.reviews)?);

    tx.commit()?;

    info!(?counts, "Wrote entity tables");
    Ok(counts)
}

fn insert_rows<R: StoreRow>(tx: &Transaction<'_>, rows: &[R]) -> Result<usize> {
    let table = R::table();
    let mut stmt = tx.prepare(&table.insert_sql())?;
    for row in rows {
        row.insert(&mut stmt)?;
    }

    debug!(table = table.name, rows = rows.len(), "Inserted rows");
    Ok(rows.len())
}
