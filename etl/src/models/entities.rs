use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub customer_id: String,
    pub first_name: String,
    pub country: String,
    pub age_group: String,
    pub signup_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    pub order_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub order_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub product_id: String,
    pub product_name: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub order_item_id: i64,
    pub order_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub review_id: String,
    pub order_id: String,
    pub rating: f64,
    pub review_date: NaiveDate,
}

/// A coerced row of the flat extract.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    /// 1-based line number in the source file, header included.
    pub line: u64,
    pub customer_id: String,
    pub first_name: String,
    pub country: String,
    pub age_group: String,
    pub signup_date: NaiveDate,
    pub order_id: String,
    pub order_date: NaiveDate,
    /// `None` until filled by the source or the synthetic generator.
    pub delivery_date: Option<NaiveDate>,
    pub order_status: String,
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub review: Option<LineReview>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineReview {
    pub review_id: String,
    pub rating: f64,
    pub review_date: NaiveDate,
}

impl OrderLine {
    pub fn customer(&self) -> Customer {
        Customer {
            customer_id: self.customer_id.clone(),
            first_name: self.first_name.clone(),
            country: self.country.clone(),
            age_group: self.age_group.clone(),
            signup_date: self.signup_date,
        }
    }

    pub fn order(&self) -> Option<Order> {
        Some(Order {
            order_id: self.order_id.clone(),
            customer_id: self.customer_id.clone(),
            order_date: self.order_date,
            delivery_date: self.delivery_date?,
            order_status: self.order_status.clone(),
        })
    }

    pub fn product(&self) -> Product {
        Product {
            product_id: self.product_id.clone(),
            product_name: self.product_name.clone(),
            category: self.category.clone(),
        }
    }

    pub fn order_item(&self, order_item_id: i64) -> OrderItem {
        OrderItem {
            order_item_id,
            order_id: self.order_id.clone(),
            product_id: self.product_id.clone(),
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }

    pub fn review(&self) -> Option<Review> {
        self.review.as_ref().map(|review| Review {
            review_id: review.review_id.clone(),
            order_id: self.order_id.clone(),
            rating: review.rating,
            review_date: review.review_date,
        })
    }
}
