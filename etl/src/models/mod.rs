mod entities;
mod raw;

pub use entities::{Customer, LineReview, Order, OrderItem, OrderLine, Product, Review};
pub use raw::RawOrderLine;
