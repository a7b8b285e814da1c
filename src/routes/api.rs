// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON API used by the dashboard front end.
//!
//! Handlers lock the tracker for the whole request, so a mutation, its
//! save, and the view derived from it never interleave with another request.

use crate::error::{AppError, Result};
use crate::models::{
    Activity, ActivityType, DashboardStats, Goals, GoalsUpdate, Insight, NewActivity,
    SeriesPoint, TypeDistribution, WeeklySummary,
};
use crate::services::aggregation::value_label;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Trailing window shown on the dashboard chart.
const DASHBOARD_SERIES_DAYS: u32 = 7;
/// Trailing window shown on the reports trend chart.
const TRENDS_SERIES_DAYS: u32 = 30;
const MAX_SERIES_DAYS: u32 = 365;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", get(list_activities).post(create_activity))
        .route(
            "/api/activities/{id}",
            get(get_activity).put(update_activity).delete(delete_activity),
        )
        .route("/api/totals", get(get_totals))
        .route("/api/goals", get(get_goals).put(update_goals))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/reports", get(get_reports))
        .route("/api/series", get(get_series))
        .route("/api/export", get(export_report))
}

/// Parse a `type` query parameter. Absent or `all` means no filter.
fn parse_type_filter(raw: Option<&str>) -> Result<Option<ActivityType>> {
    match raw {
        None | Some("all") => Ok(None),
        Some(name) => name
            .parse()
            .map(Some)
            .map_err(|e: crate::models::activity::UnknownActivityType| {
                AppError::BadRequest(e.to_string())
            }),
    }
}

// ─── Activities ──────────────────────────────────────────────

#[derive(Deserialize)]
struct ActivitiesQuery {
    /// `steps`, `workout`, `calories` or `all`
    #[serde(rename = "type")]
    activity_type: Option<String>,
    /// 0 = today only, N = today and the N days before
    days_back: Option<u32>,
}

/// An activity plus its display label.
#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityView {
    #[serde(flatten)]
    pub activity: Activity,
    pub label: String,
}

impl From<Activity> for ActivityView {
    fn from(activity: Activity) -> Self {
        let label = value_label(activity.activity_type, activity.value);
        Self { activity, label }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitiesResponse {
    pub activities: Vec<ActivityView>,
    pub total: u32,
}

/// Response for a create or update.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityMutationResponse {
    pub activity: ActivityView,
    /// False if the change could not be written to storage
    pub persisted: bool,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteActivityResponse {
    pub id: String,
    pub persisted: bool,
}

/// List activities, newest date first.
async fn list_activities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActivitiesQuery>,
) -> Result<Json<ActivitiesResponse>> {
    let type_filter = parse_type_filter(params.activity_type.as_deref())?;
    tracing::debug!(
        activity_type = ?type_filter,
        days_back = ?params.days_back,
        "Listing activities"
    );

    let activities: Vec<ActivityView> = state
        .tracker()?
        .activities(type_filter, params.days_back)
        .into_iter()
        .map(ActivityView::from)
        .collect();

    Ok(Json(ActivitiesResponse {
        total: activities.len() as u32,
        activities,
    }))
}

async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ActivityView>> {
    let tracker = state.tracker()?;
    let activity = tracker
        .activity(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))?;
    Ok(Json(activity.into()))
}

async fn create_activity(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<NewActivity>, JsonRejection>,
) -> Result<(StatusCode, Json<ActivityMutationResponse>)> {
    let Json(input) = payload?;
    input.validate()?;

    let saved = state.tracker()?.add_activity(input);
    Ok((
        StatusCode::CREATED,
        Json(ActivityMutationResponse {
            activity: saved.value.into(),
            persisted: saved.durable,
        }),
    ))
}

async fn update_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<NewActivity>, JsonRejection>,
) -> Result<Json<ActivityMutationResponse>> {
    let Json(input) = payload?;
    input.validate()?;

    let saved = state.tracker()?.update_activity(&id, input)?;
    Ok(Json(ActivityMutationResponse {
        activity: saved.value.into(),
        persisted: saved.durable,
    }))
}

async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteActivityResponse>> {
    let removed = state.tracker()?.remove_activity(&id)?;
    Ok(Json(DeleteActivityResponse {
        id: removed.value.id,
        persisted: removed.durable,
    }))
}

// ─── Totals ──────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TotalsResponse {
    #[serde(rename = "type")]
    pub activity_type: Option<ActivityType>,
    pub days_back: Option<u32>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total: u64,
}

async fn get_totals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActivitiesQuery>,
) -> Result<Json<TotalsResponse>> {
    let activity_type = parse_type_filter(params.activity_type.as_deref())?;
    let total = state.tracker()?.total(activity_type, params.days_back);

    Ok(Json(TotalsResponse {
        activity_type,
        days_back: params.days_back,
        total,
    }))
}

// ─── Goals ───────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalsMutationResponse {
    pub goals: Goals,
    pub persisted: bool,
}

async fn get_goals(State(state): State<Arc<AppState>>) -> Result<Json<Goals>> {
    Ok(Json(state.tracker()?.goals()))
}

async fn update_goals(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<GoalsUpdate>, JsonRejection>,
) -> Result<Json<GoalsMutationResponse>> {
    let Json(update) = payload?;
    update.validate()?;

    let saved = state.tracker()?.update_goals(&update);
    Ok(Json(GoalsMutationResponse {
        goals: saved.value,
        persisted: saved.durable,
    }))
}

// ─── Dashboard & Reports ─────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardResponse {
    pub today: chrono::NaiveDate,
    pub stats: DashboardStats,
    pub steps_last_7_days: Vec<SeriesPoint>,
    pub calories_last_7_days: Vec<SeriesPoint>,
    pub distribution: TypeDistribution,
}

async fn get_dashboard(State(state): State<Arc<AppState>>) -> Result<Json<DashboardResponse>> {
    let tracker = state.tracker()?;
    Ok(Json(DashboardResponse {
        today: tracker.today(),
        stats: tracker.dashboard(),
        steps_last_7_days: tracker.series(ActivityType::Steps, DASHBOARD_SERIES_DAYS),
        calories_last_7_days: tracker.series(ActivityType::Calories, DASHBOARD_SERIES_DAYS),
        distribution: tracker.distribution(),
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ReportsResponse {
    pub summary: WeeklySummary,
    pub steps_last_30_days: Vec<SeriesPoint>,
    pub calories_last_30_days: Vec<SeriesPoint>,
    pub insights: Vec<Insight>,
}

async fn get_reports(State(state): State<Arc<AppState>>) -> Result<Json<ReportsResponse>> {
    let tracker = state.tracker()?;
    Ok(Json(ReportsResponse {
        summary: tracker.summary(),
        steps_last_30_days: tracker.series(ActivityType::Steps, TRENDS_SERIES_DAYS),
        calories_last_30_days: tracker.series(ActivityType::Calories, TRENDS_SERIES_DAYS),
        insights: tracker.insights(),
    }))
}

#[derive(Deserialize)]
struct SeriesQuery {
    #[serde(rename = "type")]
    activity_type: String,
    #[serde(default = "default_series_days")]
    days: u32,
}

fn default_series_days() -> u32 {
    DASHBOARD_SERIES_DAYS
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SeriesResponse {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub days: u32,
    pub points: Vec<SeriesPoint>,
}

async fn get_series(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SeriesQuery>,
) -> Result<Json<SeriesResponse>> {
    let activity_type = parse_type_filter(Some(&params.activity_type))?.ok_or_else(|| {
        AppError::BadRequest("Series needs a single activity type".to_string())
    })?;
    if params.days == 0 || params.days > MAX_SERIES_DAYS {
        return Err(AppError::BadRequest(format!(
            "days must be between 1 and {}",
            MAX_SERIES_DAYS
        )));
    }

    let points = state.tracker()?.series(activity_type, params.days);
    Ok(Json(SeriesResponse {
        activity_type,
        days: params.days,
        points,
    }))
}

// ─── Export ──────────────────────────────────────────────────

/// Download every activity as a CSV report.
async fn export_report(State(state): State<Arc<AppState>>) -> Result<Response> {
    let (csv, filename, count) = {
        let tracker = state.tracker()?;
        (
            tracker.export_csv(),
            tracker.export_filename(),
            tracker.all_activities().len(),
        )
    };
    tracing::info!(filename = %filename, rows = count, "Exporting report");

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid export filename: {}", e)))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/csv; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}
