use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::schedule::{interpret, CoverageLevel, CoverageThresholds, Roster};

/// Read-only state shared by every worker. The roster is loaded once before
/// the server starts and never changes, so no locking is needed.
pub struct AppState {
    pub roster: Roster,
    pub thresholds: CoverageThresholds,
}

#[derive(Deserialize)]
pub struct ThresholdQuery {
    preset: Option<String>,
    low: Option<f64>,
    high: Option<f64>,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    nurse_count: usize,
    assigned_count: usize,
    possible_count: usize,
    coverage_percent: f64,
    level: CoverageLevel,
    message: String,
    thresholds: CoverageThresholds,
}

#[derive(Serialize)]
pub struct NursesResponse {
    nurses: Vec<String>,
}

#[derive(Serialize)]
pub struct ShiftEntry {
    day: String,
    shift: String,
}

#[derive(Serialize)]
pub struct NurseScheduleResponse {
    nurse: String,
    shifts: Vec<ShiftEntry>,
}

#[derive(Serialize)]
pub struct SlotStaffResponse {
    day: String,
    shift: String,
    nurses: Vec<String>,
}

#[derive(Serialize)]
pub struct MatrixResponse {
    nurses: Vec<String>,
    columns: Vec<String>,
    rows: Vec<Vec<u8>>,
}

#[derive(Serialize)]
pub struct DistributionResponse {
    days: Vec<String>,
    shifts: Vec<String>,
    nurses: Vec<String>,
    shifts_per_nurse: Vec<usize>,
    staffing_grid: Vec<Vec<usize>>,
    load_histogram: Vec<usize>,
    day_totals: Vec<usize>,
    shift_totals: Vec<usize>,
    idle_nurses: Vec<String>,
    uncovered_slots: Vec<String>,
}

fn error_response(e: &DashboardError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({"error": e.to_string(), "code": e.code()}))
}

fn resolve_thresholds(
    query: &ThresholdQuery,
    configured: &CoverageThresholds,
) -> Result<CoverageThresholds, DashboardError> {
    let base = match &query.preset {
        Some(name) => CoverageThresholds::preset(name).ok_or_else(|| {
            DashboardError::ConfigurationMismatch(format!("unknown coverage preset '{}'", name))
        })?,
        None => *configured,
    };
    CoverageThresholds::new(query.low.unwrap_or(base.low), query.high.unwrap_or(base.high))
}

// Summary metrics + interpretation
async fn get_summary(
    query: web::Query<ThresholdQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let thresholds = match resolve_thresholds(&query, &state.thresholds) {
        Ok(t) => t,
        Err(e) => return Ok(error_response(&e)),
    };

    let summary = state.roster.summary();
    let level = interpret(summary.coverage_percent, &thresholds);

    Ok(HttpResponse::Ok().json(SummaryResponse {
        nurse_count: summary.nurse_count,
        assigned_count: summary.assigned_count,
        possible_count: summary.possible_count,
        coverage_percent: summary.coverage_percent,
        level,
        message: level.message().to_string(),
        thresholds,
    }))
}

async fn get_nurses(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(NursesResponse {
        nurses: state.roster.nurse_labels(),
    }))
}

// Schedule of one nurse
async fn get_nurse_schedule(
    label: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let roster = &state.roster;
    let nurse = match roster.find_nurse(&label) {
        Some(n) => n,
        None => {
            return Ok(HttpResponse::NotFound()
                .json(serde_json::json!({"error": format!("Unknown nurse: {}", label)})))
        }
    };

    let shifts = roster
        .nurse_schedule(&label)
        .unwrap_or_default()
        .into_iter()
        .map(|(day, shift)| ShiftEntry {
            day: day.to_string(),
            shift: shift.to_string(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(NurseScheduleResponse {
        nurse: roster.nurse_label(nurse),
        shifts,
    }))
}

// Who works a given day/shift
async fn get_slot_staff(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (day, shift) = path.into_inner();
    let layout = state.roster.layout();

    let slot = match layout.find_slot(&day, &shift) {
        Some(slot) => slot,
        None => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": format!("Unknown day/shift: {}/{}", day, shift)
            })))
        }
    };

    Ok(HttpResponse::Ok().json(SlotStaffResponse {
        day: layout.days[slot.day].clone(),
        shift: layout.shifts[slot.shift].clone(),
        nurses: state.roster.slot_staff(slot),
    }))
}

// Raw matrix for the heatmap
async fn get_matrix(state: web::Data<AppState>) -> Result<HttpResponse> {
    let roster = &state.roster;
    let layout = roster.layout();

    Ok(HttpResponse::Ok().json(MatrixResponse {
        nurses: roster.nurse_labels(),
        columns: layout.slots().map(|s| layout.slot_label(s)).collect(),
        rows: roster.matrix().rows().to_vec(),
    }))
}

// Histogram and staffing chart data
async fn get_distribution(state: web::Data<AppState>) -> Result<HttpResponse> {
    let roster = &state.roster;
    let layout = roster.layout();
    let distribution = roster.distribution();

    Ok(HttpResponse::Ok().json(DistributionResponse {
        days: layout.days.clone(),
        shifts: layout.shifts.clone(),
        nurses: roster.nurse_labels(),
        shifts_per_nurse: distribution.shifts_per_nurse,
        staffing_grid: distribution.staffing_grid,
        load_histogram: distribution.load_histogram,
        day_totals: distribution.day_totals,
        shift_totals: distribution.shift_totals,
        idle_nurses: distribution
            .idle_nurses
            .iter()
            .map(|&n| roster.nurse_label(n))
            .collect(),
        uncovered_slots: distribution
            .uncovered_slots
            .iter()
            .map(|&s| layout.slot_label(s))
            .collect(),
    }))
}

async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Routes shared by the server and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/summary", web::get().to(get_summary))
        .route("/api/nurses", web::get().to(get_nurses))
        .route("/api/nurse/{label}", web::get().to(get_nurse_schedule))
        .route("/api/slot/{day}/{shift}", web::get().to(get_slot_staff))
        .route("/api/matrix", web::get().to(get_matrix))
        .route("/api/distribution", web::get().to(get_distribution));
}

pub async fn start_server(state: AppState, bind: &str, port: u16) -> std::io::Result<()> {
    let app_state = web::Data::new(state);
    info!("Serving dashboard on http://{}:{}", bind, port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((bind, port))?
    .run()
    .await
}
