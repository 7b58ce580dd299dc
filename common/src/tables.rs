//! Definitions of the five normalized entity tables.
//!
//! The order of `ALL_TABLES` is dependency order: a table only references
//! tables that appear before it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Integer,
    Real,
    Date,
}

impl SqlType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Date => "DATE",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub references: Option<(&'static str, &'static str)>,
}

impl ColumnDef {
    const fn new(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            references: None,
        }
    }

    const fn references(
        name: &'static str,
        sql_type: SqlType,
        table: &'static str,
        column: &'static str,
    ) -> Self {
        Self {
            name,
            sql_type,
            references: Some((table, column)),
        }
    }
}

#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub primary_key: &'static str,
    pub columns: &'static [ColumnDef],
}

pub static CUSTOMERS: TableDef = TableDef {
    name: "Customers",
    primary_key: "customer_id",
    columns: &[
        ColumnDef::new("customer_id", SqlType::Text),
        ColumnDef::new("first_name", SqlType::Text),
        ColumnDef::new("country", SqlType::Text),
        ColumnDef::new("age_group", SqlType::Text),
        ColumnDef::new("signup_date", SqlType::Date),
    ],
};

pub static PRODUCTS: TableDef = TableDef {
    name: "Products",
    primary_key: "product_id",
    columns: &[
        ColumnDef::new("product_id", SqlType::Text),
        ColumnDef::new("product_name", SqlType::Text),
        ColumnDef::new("category", SqlType::Text),
    ],
};

pub static ORDERS: TableDef = TableDef {
    name: "Orders",
    primary_key: "order_id",
    columns: &[
        ColumnDef::new("order_id", SqlType::Text),
        ColumnDef::references("customer_id", SqlType::Text, "Customers", "customer_id"),
        ColumnDef::new("order_date", SqlType::Date),
        ColumnDef::new("delivery_date", SqlType::Date),
        ColumnDef::new("order_status", SqlType::Text),
    ],
};

pub static ORDER_ITEMS: TableDef = TableDef {
    name: "Order_Items",
    primary_key: "order_item_id",
    columns: &[
        ColumnDef::references("order_id", SqlType::Text, "Orders", "order_id"),
        ColumnDef::references("product_id", SqlType::Text, "Products", "product_id"),
        ColumnDef::new("quantity", SqlType::Integer),
        ColumnDef::new("unit_price", SqlType::Real),
        // Surrogate key, appended after the source columns.
        ColumnDef::new("order_item_id", SqlType::Integer),
    ],
};

pub static REVIEWS: TableDef = TableDef {
    name: "Reviews",
    primary_key: "review_id",
    columns: &[
        ColumnDef::new("review_id", SqlType::Text),
        ColumnDef::references("order_id", SqlType::Text, "Orders", "order_id"),
        ColumnDef::new("rating", SqlType::Real),
        ColumnDef::new("review_date", SqlType::Date),
    ],
};

pub static ALL_TABLES: [&TableDef; 5] = [&CUSTOMERS, &PRODUCTS, &ORDERS, &ORDER_ITEMS, &REVIEWS];

impl TableDef {
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS \"{}\"", self.name)
    }

    pub fn create_sql(&self) -> String {
        let mut lines: Vec<String> = self
            .columns
            .iter()
            .map(|column| {
                let mut line = format!("    {} {}", column.name, column.sql_type.as_str());
                if column.name == self.primary_key {
                    line.push_str(" PRIMARY KEY");
                } else {
                    line.push_str(" NOT NULL");
                }
                line
            })
            .collect();

        for column in self.columns {
            if let Some((table, key)) = column.references {
                lines.push(format!(
                    "    FOREIGN KEY ({}) REFERENCES \"{}\" ({})",
                    column.name, table, key
                ));
            }
        }

        format!("CREATE TABLE \"{}\" (\n{}\n)", self.name, lines.join(",\n"))
    }

    pub fn insert_sql(&self) -> String {
        let placeholders: Vec<String> =
            (1..=self.columns.len()).map(|idx| format!("?{}", idx)).collect();
        format!(
            "INSERT INTO \"{}\" ({}) VALUES ({})",
            self.name,
            self.column_names().join(", "),
            placeholders.join(", ")
        )
    }
}
