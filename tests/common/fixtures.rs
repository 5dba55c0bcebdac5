use chrono::NaiveDate;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use rust_decimal::Decimal;
use serde_json::json;
use smartspend_report::{
    AccountRef, RenderedSurface, ReportConfig, ReportData, ReportPeriod, Transaction, TransactionDate,
    TransactionEntry,
};
use std::io::Cursor;

pub fn march_2024() -> ReportPeriod {
    ReportPeriod::new(2024, 3).expect("valid period")
}

/// Default config with a pinned footer date so output is reproducible
pub fn fixed_config() -> ReportConfig {
    ReportConfig::default().with_generated_on(NaiveDate::from_ymd_opt(2024, 4, 1).expect("valid date"))
}

/// `count` transactions named "<prefix> 1".. with the same amount, dated
/// through March 2024
pub fn transactions(prefix: &str, count: usize, amount: i64) -> Vec<TransactionEntry> {
    (0..count)
        .map(|i| {
            Transaction::new(format!("{} {}", prefix, i + 1), Decimal::new(amount, 0))
                .on(TransactionDate::ymd(2024, 3, (i % 28 + 1) as i64))
                .in_category("General")
                .into()
        })
        .collect()
}

pub fn report_data(incomes: Vec<TransactionEntry>, expenses: Vec<TransactionEntry>) -> ReportData {
    ReportData {
        account: AccountRef::named("Checking"),
        incomes,
        expenses,
        ..ReportData::default()
    }
}

/// A payload shaped like the backend's report-data response
pub fn backend_payload() -> serde_json::Value {
    json!({
        "bankAccount": { "id": 3, "accountName": "Nómina", "currentBalance": 2310.75 },
        "incomesList": [
            { "id": 1, "description": "Monthly salary payment", "amount": 2100.00,
              "date": [2024, 3, 1], "category": { "id": 1, "name": "Salary" } },
            { "id": 2, "description": "Refund", "amount": 49.5,
              "date": "2024-03-18T10:15:00", "category": { "id": 4, "name": "Shopping" } }
        ],
        "expensesList": [
            { "id": 10, "description": "Rent", "amount": -950,
              "date": [2024, 3, 2], "category": { "id": 8, "name": "Housing" } },
            { "id": 11, "description": "Groceries", "amount": -120.25,
              "date": [2024, 3, 15], "category": { "id": 9, "name": "Supermarkets" } },
            null
        ],
        "stadistics": { "incomesTotal": 2149.5, "expensesTotal": 0, "balance": 0 },
        "incomePieChart": { "labels": ["Salary", "Shopping"], "data": [2100, 49.5] }
    })
}

pub fn png_chart(width: u32, height: u32) -> RenderedSurface {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([59, 130, 246, 255])))
        .write_to(&mut out, ImageFormat::Png)
        .expect("encode png");
    RenderedSurface::from_encoded(out.into_inner())
}
