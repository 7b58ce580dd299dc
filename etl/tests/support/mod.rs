use common::config::Settings;
use std::path::{Path, PathBuf};

pub const HEADER: &str = "customer_id,first_name,country,age_group,signup_date,order_id,order_date,order_status,product_id,product_name,category,quantity,unit_price,review_id,rating,review_date";

pub const ROWS: [&str; 6] = [
    "C1,Alice,Thailand,25-34,2021-05-01,O1,2022-03-10,Delivered,P1,Desk Lamp,Home,2,50.00,R1,2,2022-03-20",
    "C1,Alice,Thailand,25-34,2021-05-01,O2,2023-04-02,Delivered,P2,Headphones,Electronics,1,120.00,R2,5,2023-04-12",
    "C2,Bruno,Brazil,35-44,2022-01-15,O3,2023-06-18,Shipped,P1,Desk Lamp,Home,1,50.00,,,",
    "C2,Bruno,Brazil,35-44,2022-01-15,O3,2023-06-18,Shipped,P3,Novel,Books,3,10.00,,,",
    "C3,Chen,Japan,18-24,2022-09-09,O4,2023-07-01,Delivered,P3,Novel,Books,1,10.00,R3,4,2023-07-05",
    "C3,Chen,Japan,18-24,2022-09-09,O5,2023-07-15,Delivered,P2,Headphones,Electronics,1,120.00,R4,3,2023-07-20",
];

pub fn write_csv(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    std::fs::write(&path, text).unwrap();
    path
}

pub fn settings(input: &Path, database: &Path) -> Settings {
    let mut settings = Settings::default();
    settings.etl.input_path = input.to_path_buf();
    settings.database.path = database.to_path_buf();
    settings
}
