//! Route handlers. Each request makes exactly one pipeline call, run on the
//! blocking pool so a slow backend never stalls the reactor.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use serde::Deserialize;
use tracing::{debug, info};
use zodiac_chart::{ALL_BODIES, CelestialBody, ChartError, Ephemeris};
use zodiac_export::html::{PageContent, PageContext, render_page};
use zodiac_export::json::{BodyInfo, EphemerisDocument, SingleBodyDocument, body_table};

use crate::{ApiError, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct EphemerisQuery {
    pub date: Option<String>,
    /// Comma-separated ids or names.
    pub bodies: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub date: Option<String>,
    pub body: Option<String>,
}

pub async fn ephemeris(
    State(state): State<AppState>,
    query: Result<Query<EphemerisQuery>, QueryRejection>,
) -> Result<Json<EphemerisDocument>, ApiError> {
    let Query(query) = query?;
    let bodies = match query.bodies.as_deref() {
        Some(list) => CelestialBody::parse_list(list)?,
        None => ALL_BODIES.to_vec(),
    };
    let date = query.date;
    let result =
        run_blocking(&state.ephemeris, move |eph| eph.compute(date.as_deref(), &bodies)).await?;
    info!(date = %result.iso_date(), bodies = result.readings.len(), "served ephemeris");
    Ok(Json(EphemerisDocument::from(&result)))
}

pub async fn calculate(
    State(state): State<AppState>,
    Path(body_id): Path<String>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<SingleBodyDocument>, ApiError> {
    let body = CelestialBody::parse(&body_id)?;
    let Query(query) = query?;
    let date = query.date;
    let result =
        run_blocking(&state.ephemeris, move |eph| eph.compute(date.as_deref(), &[body])).await?;
    info!(date = %result.iso_date(), %body, "served body");
    SingleBodyDocument::from_result(&result)
        .map(Json)
        .ok_or(ApiError::Chart(ChartError::InvalidBody(body_id)))
}

pub async fn bodies() -> Json<Vec<BodyInfo>> {
    Json(body_table())
}

/// HTML page: form plus table (all bodies) or list (one body).
///
/// The computation is bounded by the configured render timeout.
pub async fn page(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> (StatusCode, Html<String>) {
    let title = state.config.site_title.as_str();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return error_page(title, None, ApiError::from(rejection)),
    };
    let selected = match query.body.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match CelestialBody::parse(raw) {
            Ok(body) => Some(body),
            Err(err) => return error_page(title, None, ApiError::from(err)),
        },
    };
    let bodies = selected.map_or_else(|| ALL_BODIES.to_vec(), |body| vec![body]);

    let limit = state.config.render_timeout();
    let date = query.date;
    let work = run_blocking(&state.ephemeris, move |eph| eph.compute(date.as_deref(), &bodies));
    let outcome = match tokio::time::timeout(limit, work).await {
        Ok(outcome) => outcome,
        Err(_) => Err(ApiError::Timeout(limit)),
    };

    match outcome {
        Ok(result) => {
            let context = PageContext {
                site_title: title,
                moment: Some(result.moment),
                selected_body: selected,
            };
            let content = match (selected, result.readings.first()) {
                (Some(_), Some(reading)) => PageContent::Single(&result, reading),
                _ => PageContent::Table(&result),
            };
            debug!(date = %result.iso_date(), "rendered page");
            (StatusCode::OK, Html(render_page(&context, content)))
        }
        Err(err) => error_page(title, selected, err),
    }
}

fn error_page(
    title: &str,
    selected: Option<CelestialBody>,
    err: ApiError,
) -> (StatusCode, Html<String>) {
    err.log();
    let context = PageContext {
        site_title: title,
        moment: None,
        selected_body: selected,
    };
    let message = err.to_string();
    let page = render_page(
        &context,
        PageContent::Error {
            kind: err.kind(),
            message: &message,
        },
    );
    (err.status(), Html(page))
}

async fn run_blocking<T, F>(ephemeris: &Ephemeris, job: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Ephemeris) -> Result<T, ChartError> + Send + 'static,
{
    let ephemeris = ephemeris.clone();
    let outcome = tokio::task::spawn_blocking(move || job(&ephemeris))
        .await
        .map_err(|err| ApiError::Worker(err.to_string()))?;
    Ok(outcome?)
}
