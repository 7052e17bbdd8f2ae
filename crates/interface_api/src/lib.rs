//! HTTP API Layer
//!
//! This crate provides the REST API for the fund ledger dashboard using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for investors, funds and administration
//! - **Middleware**: Request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! Every timestamp leaving this crate is expressed in the canonical display
//! zone. The zone is resolved once when [`AppState`] is built; a missing or
//! unknown zone stops the server from starting.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::in_memory(config, regions)?;
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod extract;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::{CanonicalZone, CoreError};
use domain_fund::{FundPort, FundService, InMemoryFundStore};
use domain_investor::{
    CachedRegionDirectory, InMemoryInvestorStore, InvestorPort, InvestorService, RegionDirectory,
};

use crate::config::ApiConfig;
use crate::handlers::{admin, fund, health, investor};
use crate::middleware::request_log_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub zone: CanonicalZone,
    pub investors: InvestorService,
    pub funds: FundService,
    pub regions: Arc<CachedRegionDirectory>,
}

impl AppState {
    /// Wires services over the given stores
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Configuration` if the display zone is missing or
    /// unknown.
    pub fn new(
        config: ApiConfig,
        regions: Arc<dyn RegionDirectory>,
        investor_port: Arc<dyn InvestorPort>,
        fund_port: Arc<dyn FundPort>,
    ) -> Result<Self, CoreError> {
        let zone = config.canonical_zone()?;
        let regions = Arc::new(CachedRegionDirectory::new(regions, config.region_cache()));

        Ok(Self {
            investors: InvestorService::new(investor_port, regions.clone()),
            funds: FundService::new(fund_port, zone),
            zone,
            regions,
            config,
        })
    }

    /// Wires services over in-memory stores
    pub fn in_memory(config: ApiConfig, regions: Arc<dyn RegionDirectory>) -> Result<Self, CoreError> {
        Self::new(
            config,
            regions,
            Arc::new(InMemoryInvestorStore::new()),
            Arc::new(InMemoryFundStore::new()),
        )
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Services and configuration shared by the handlers
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new().route("/health", get(health::health_check));

    let investor_routes = Router::new()
        .route("/", post(investor::create_investor).get(investor::list_investors))
        .route("/:id", get(investor::get_investor).put(investor::update_investor));

    let fund_routes = Router::new()
        .route(
            "/:id/transactions",
            get(fund::list_transactions).post(fund::record_transaction),
        )
        .route("/:id/holdings", get(fund::list_holdings))
        .route("/:id/nav", get(fund::get_nav).post(fund::record_nav));

    let region_routes = Router::new().route("/provinces/:code/wards", get(investor::list_wards));

    let admin_routes = Router::new().route("/regions/invalidate", post(admin::invalidate_regions));

    let api_routes = Router::new()
        .nest("/investors", investor_routes)
        .nest("/funds", fund_routes)
        .nest("/regions", region_routes)
        .nest("/admin", admin_routes)
        .layer(axum_middleware::from_fn(request_log_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
