//! Fund DTOs

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_fund::{NavPoint, TransactionSummary, TransactionType, TransactionView};

#[derive(Debug, Deserialize, Validate)]
pub struct RecordTransactionRequest {
    pub investor_id: Option<Uuid>,
    pub transaction_type: TransactionType,
    /// Timestamp as the upstream system wrote it, with or without an offset
    #[validate(length(min = 1, max = 64, message = "must be a timestamp"))]
    pub recorded_at: String,
    pub amount: Decimal,
    pub nav: Decimal,
    #[validate(length(max = 500, message = "is too long"))]
    pub note: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionListParams {
    pub investor_id: Option<Uuid>,
    /// Comma-separated transaction types
    pub types: Option<String>,
    /// First local date, inclusive
    pub from: Option<NaiveDate>,
    /// Last local date, inclusive
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub fund_id: Uuid,
    pub investor_id: Option<Uuid>,
    pub transaction_type: TransactionType,
    pub timestamp: DateTime<Tz>,
    pub amount: Decimal,
    pub nav: Decimal,
    pub units_delta: Decimal,
    pub note: Option<String>,
}

impl From<TransactionView> for TransactionResponse {
    fn from(view: TransactionView) -> Self {
        TransactionResponse {
            id: *view.id.as_uuid(),
            fund_id: *view.fund_id.as_uuid(),
            investor_id: view.investor_id.map(|id| *id.as_uuid()),
            transaction_type: view.transaction_type,
            timestamp: view.timestamp,
            amount: view.amount,
            nav: view.nav,
            units_delta: view.units_delta,
            note: view.note,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionListResponse {
    pub timezone: String,
    pub transactions: Vec<TransactionResponse>,
    pub summary: TransactionSummary,
}

#[derive(Debug, Serialize)]
pub struct HoldingResponse {
    pub investor_id: Uuid,
    pub units: Decimal,
    pub invested: Decimal,
    pub withdrawn: Decimal,
    /// Units valued at the latest NAV, absent before the first NAV
    pub value: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct HoldingsResponse {
    pub fund_id: Uuid,
    pub nav_date: Option<NaiveDate>,
    pub nav: Option<Decimal>,
    pub holdings: Vec<HoldingResponse>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RecordNavRequest {
    pub nav_date: NaiveDate,
    pub value: Decimal,
    /// Publication time; defaults to now
    #[validate(length(min = 1, max = 64, message = "must be a timestamp"))]
    pub recorded_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NavSeriesResponse {
    pub fund_id: Uuid,
    pub timezone: String,
    pub points: Vec<NavPoint>,
}
