#![allow(dead_code)]

use common::config::Settings;
use dashboard::reports::Reports;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SQL_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../sql");

const EXTRACT: &str = "\
customer_id,first_name,country,age_group,signup_date,order_id,order_date,order_status,product_id,product_name,category,quantity,unit_price,review_id,rating,review_date
C1,Alice,Thailand,25-34,2021-05-01,O1,2022-03-10,Delivered,P1,Desk Lamp,Home,2,50.00,R1,2,2022-03-20
C1,Alice,Thailand,25-34,2021-05-01,O2,2023-04-02,Delivered,P2,Headphones,Electronics,1,120.00,R2,5,2023-04-12
C2,Bruno,Brazil,35-44,2022-01-15,O3,2023-06-18,Shipped,P1,Desk Lamp,Home,1,50.00,,,
C2,Bruno,Brazil,35-44,2022-01-15,O3,2023-06-18,Shipped,P3,Novel,Books,3,10.00,,,
C3,Chen,Japan,18-24,2022-09-09,O4,2023-07-01,Delivered,P3,Novel,Books,1,10.00,R3,4,2023-07-05
C3,Chen,Japan,18-24,2022-09-09,O5,2023-07-15,Delivered,P2,Headphones,Electronics,1,120.00,R4,3,2023-07-20
";

/// A store built by the real ETL from the shared fixture.
pub struct Fixture {
    pub dir: TempDir,
    pub settings: Settings,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("extract.csv");
        std::fs::write(&input, EXTRACT).unwrap();

        let settings = settings(&input, &dir.path().join("ecommerce.db"), Path::new(SQL_DIR));
        etl::run_etl_pipeline(&settings).unwrap();
        Self { dir, settings }
    }

    pub fn reports(&self) -> Reports {
        Reports::from_settings(&self.settings)
    }

    pub fn database(&self) -> PathBuf {
        self.settings.database.path.clone()
    }
}

pub fn settings(input: &Path, database: &Path, sql_dir: &Path) -> Settings {
    let mut settings = Settings::default();
    settings.etl.input_path = input.to_path_buf();
    settings.database.path = database.to_path_buf();
    settings.queries.sql_dir = sql_dir.to_path_buf();
    settings
}
