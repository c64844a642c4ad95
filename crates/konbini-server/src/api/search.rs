use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use konbini_core::geojson::pins_feature_collection;
use konbini_core::{Coordinates, SearchResult, StoreRecord};
use konbini_reconcile::reconcile;

use crate::middleware::RequestId;
use crate::session::Snapshot;

use super::{map_gemini_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct SearchRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SearchData {
    pub center: Coordinates,
    pub text: String,
    pub stores: Vec<StoreRecord>,
    /// True when a newer search superseded this one while it was in flight.
    /// The response still carries this search's outcome, but the shared
    /// snapshot was left to the newer request.
    pub superseded: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct ResultsData {
    pub center: Coordinates,
    pub text: String,
    pub stores: Vec<StoreRecord>,
}

#[derive(Debug, Serialize)]
pub(super) struct PinsData {
    pub center: Coordinates,
    /// GeoJSON FeatureCollection of mappable stores, the shape the map
    /// widget consumes directly.
    pub collection: serde_json::Value,
}

/// `POST /api/v1/search`: run one search against the configured brand.
///
/// The center is the request's explicit coordinates, else its geocoded
/// address, else the configured default. The completed result is published to
/// the shared session unless a newer search got in first.
pub(super) async fn run_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<ApiResponse<SearchData>>, ApiError> {
    let center = resolve_center(&state, &req_id.0, &body).await?;
    let ticket = state.session.begin();

    tracing::info!(%center, ticket, "starting store search");
    let raw = match state
        .gemini
        .find_nearby_stores(center, &state.config.brand, state.config.search_radius_km)
        .await
    {
        Ok(raw) => raw,
        Err(err) => {
            // Stale center/list pairs must not outlive a failed search.
            state.session.clear(ticket).await;
            return Err(map_gemini_error(req_id.0, &err));
        }
    };

    let stores = reconcile(&raw.text, &raw.places, &state.config.brand);
    tracing::info!(ticket, stores = stores.len(), "search reconciled");

    let result = SearchResult {
        text: raw.text,
        stores,
    };
    let published = state
        .session
        .publish(
            ticket,
            Snapshot {
                center,
                result: result.clone(),
            },
        )
        .await;
    if !published {
        tracing::info!(ticket, "search superseded by a newer request; snapshot untouched");
    }

    Ok(Json(ApiResponse {
        data: SearchData {
            center,
            text: result.text,
            stores: result.stores,
            superseded: !published,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// `GET /api/v1/results`: the last published snapshot.
pub(super) async fn get_results(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<ResultsData>>, ApiError> {
    let snapshot = require_snapshot(&state, &req_id.0).await?;
    Ok(Json(ApiResponse {
        data: ResultsData {
            center: snapshot.center,
            text: snapshot.result.text,
            stores: snapshot.result.stores,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// `GET /api/v1/results/pins`: mappable stores from the last snapshot as a
/// GeoJSON FeatureCollection, plus the center the map should fly to.
pub(super) async fn get_result_pins(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<PinsData>>, ApiError> {
    let snapshot = require_snapshot(&state, &req_id.0).await?;
    let collection = pins_feature_collection(snapshot.center, &snapshot.result.stores);
    Ok(Json(ApiResponse {
        data: PinsData {
            center: snapshot.center,
            collection,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

async fn require_snapshot(state: &AppState, req_id: &str) -> Result<Snapshot, ApiError> {
    state.session.snapshot().await.ok_or_else(|| {
        ApiError::new(req_id, "no_results", "no completed search to render")
    })
}

async fn resolve_center(
    state: &AppState,
    req_id: &str,
    body: &SearchRequest,
) -> Result<Coordinates, ApiError> {
    match (body.latitude, body.longitude) {
        (Some(latitude), Some(longitude)) => {
            let center = Coordinates::new(latitude, longitude);
            if center.is_finite() {
                Ok(center)
            } else {
                Err(ApiError::new(
                    req_id,
                    "validation_error",
                    "latitude and longitude must be finite numbers",
                ))
            }
        }
        (None, None) => match body.address.as_deref().map(str::trim) {
            Some(address) if !address.is_empty() => {
                match state.gemini.geocode(address).await {
                    Ok(Some(center)) => Ok(center),
                    Ok(None) => Err(ApiError::new(
                        req_id,
                        "address_not_found",
                        format!("could not resolve \"{address}\" to coordinates"),
                    )),
                    Err(err) => Err(map_gemini_error(req_id.to_owned(), &err)),
                }
            }
            _ => Ok(state.config.default_center),
        },
        _ => Err(ApiError::new(
            req_id,
            "validation_error",
            "latitude and longitude must be provided together",
        )),
    }
}

