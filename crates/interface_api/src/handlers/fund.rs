//! Fund handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use core_kernel::{FundId, InvestorId, StoredTimestamp};
use domain_fund::{Nav, NavPoint, Transaction, TransactionQuery, TransactionType};

use crate::dto::fund::*;
use crate::extract::ApiJson;
use crate::{error::ApiError, AppState};

/// Lists a fund's transactions, normalized into the display zone
pub async fn list_transactions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<TransactionListParams>,
) -> Result<Json<TransactionListResponse>, ApiError> {
    let fund_id = FundId::from_uuid(id);
    let query = transaction_query(fund_id, params)?;

    let (views, summary) = state.funds.find_transactions(fund_id, &query).await?;
    Ok(Json(TransactionListResponse {
        timezone: state.zone.name().to_string(),
        transactions: views.into_iter().map(Into::into).collect(),
        summary,
    }))
}

/// Records a transaction against a fund
pub async fn record_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<RecordTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionResponse>), ApiError> {
    request.validate()?;

    let recorded_at = StoredTimestamp::parse(&request.recorded_at)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let mut transaction = Transaction::new(
        FundId::from_uuid(id),
        request.investor_id.map(InvestorId::from_uuid),
        request.transaction_type,
        recorded_at,
        request.amount,
        request.nav,
    )?;
    if let Some(note) = request.note {
        transaction = transaction.with_note(note);
    }

    let view = state.funds.record_transaction(transaction).await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

/// Lists investor holdings in a fund, valued at the latest NAV
pub async fn list_holdings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HoldingsResponse>, ApiError> {
    let fund_id = FundId::from_uuid(id);
    let holdings = state.funds.holdings(fund_id).await?;
    let latest = state.funds.latest_nav(fund_id).await?;

    let mut rows = Vec::with_capacity(holdings.len());
    for holding in holdings {
        let value = match &latest {
            Some(nav) => Some(holding.value_at_nav(nav.value)?),
            None => None,
        };
        rows.push(HoldingResponse {
            investor_id: *holding.investor_id.as_uuid(),
            units: holding.units,
            invested: holding.invested,
            withdrawn: holding.withdrawn,
            value,
        });
    }

    Ok(Json(HoldingsResponse {
        fund_id: id,
        nav_date: latest.as_ref().map(|nav| nav.nav_date),
        nav: latest.as_ref().map(|nav| nav.value),
        holdings: rows,
    }))
}

/// Gets a fund's NAV history
pub async fn get_nav(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NavSeriesResponse>, ApiError> {
    let points = state.funds.nav_series(FundId::from_uuid(id)).await?;
    Ok(Json(NavSeriesResponse {
        fund_id: id,
        timezone: state.zone.name().to_string(),
        points,
    }))
}

/// Records NAV for a fund
pub async fn record_nav(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<RecordNavRequest>,
) -> Result<(StatusCode, Json<NavPoint>), ApiError> {
    request.validate()?;

    let recorded_at = match request.recorded_at.as_deref() {
        Some(raw) => StoredTimestamp::parse(raw).map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => StoredTimestamp::from(Utc::now()),
    };

    let nav = Nav::new(FundId::from_uuid(id), request.nav_date, request.value, recorded_at);
    let point = state.funds.record_nav(nav).await?;
    Ok((StatusCode::CREATED, Json(point)))
}

fn transaction_query(fund_id: FundId, params: TransactionListParams) -> Result<TransactionQuery, ApiError> {
    let mut query = TransactionQuery::for_fund(fund_id);
    query.investor_id = params.investor_id.map(InvestorId::from_uuid);
    query.from_date = params.from;
    query.to_date = params.to;
    query.limit = params.limit;

    if let Some(types) = params.types.as_deref() {
        query.types = types
            .split(',')
            .filter(|t| !t.trim().is_empty())
            .map(str::parse::<TransactionType>)
            .collect::<Result<Vec<_>, _>>()?;
    }

    query.validate()?;
    Ok(query)
}
