use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/dashboard", get(handlers::dashboard))
        .route("/company_setup", get(handlers::company_setup_page).post(handlers::save_company))
        .route("/maintenance_log", get(handlers::maintenance_log_page).post(handlers::create_maintenance_log))
        .route("/work_order", get(handlers::work_order_page).post(handlers::create_work_order))
        .route("/api/work_order_stats", get(handlers::get_work_order_stats))
        .route("/api/work_order_completion_trend", get(handlers::get_completion_trend))
        .route("/filtered_work_orders", get(handlers::filtered_work_orders))
        .route("/update_work_order_status", post(handlers::update_work_order_status))
        .with_state(state)
}
