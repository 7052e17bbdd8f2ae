//! Investor handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::InvestorId;
use domain_investor::{InvestorQuery, RegionDirectory};

use crate::dto::investor::*;
use crate::extract::ApiJson;
use crate::{error::ApiError, AppState};

/// Creates a new investor
pub async fn create_investor(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateInvestorRequest>,
) -> Result<(StatusCode, Json<InvestorResponse>), ApiError> {
    request.validate()?;

    let investor = state.investors.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(InvestorResponse::new(investor, &state.zone))))
}

/// Lists investors
pub async fn list_investors(
    State(state): State<AppState>,
    Query(params): Query<ListInvestorsParams>,
) -> Result<Json<Vec<InvestorResponse>>, ApiError> {
    let query = InvestorQuery::from(params);
    let investors = state.investors.list(&query).await?;

    Ok(Json(
        investors
            .into_iter()
            .map(|investor| InvestorResponse::new(investor, &state.zone))
            .collect(),
    ))
}

/// Gets an investor by ID
pub async fn get_investor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvestorResponse>, ApiError> {
    let investor = state.investors.get(InvestorId::from_uuid(id)).await?;
    Ok(Json(InvestorResponse::new(investor, &state.zone)))
}

/// Applies a partial update to an investor
pub async fn update_investor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateInvestorRequest>,
) -> Result<Json<InvestorResponse>, ApiError> {
    request.validate()?;

    let investor = state
        .investors
        .update(InvestorId::from_uuid(id), request.into())
        .await?;
    Ok(Json(InvestorResponse::new(investor, &state.zone)))
}

/// Lists the wards of a province
pub async fn list_wards(
    State(state): State<AppState>,
    Path(province_code): Path<String>,
) -> Result<Json<Vec<WardResponse>>, ApiError> {
    if state.regions.province(&province_code)?.is_none() {
        return Err(ApiError::NotFound(format!("Unknown province code {}", province_code)));
    }

    let wards = state.regions.wards_of(&province_code)?;
    Ok(Json(
        wards
            .into_iter()
            .map(|ward| WardResponse { code: ward.code, name: ward.name })
            .collect(),
    ))
}
