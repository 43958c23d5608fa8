use crate::errors::AppError;
use crate::models::{
    Company, CompanySetupForm, MaintenanceLog, MaintenanceLogForm, Notification, Priority,
    StatusUpdateRequest, StatusUpdateResponse, TrendPoint, WorkOrder, WorkOrderFilter,
    WorkOrderForm, WorkOrderRow, WorkOrderStats, WorkOrderStatus,
};
use crate::state::AppState;
use crate::stats::{completion_trend, work_order_stats};
use crate::storage::persist_data;
use crate::ui;
use crate::validate::{validate_company_setup, validate_maintenance_log, validate_work_order};
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    Html(ui::render_dashboard(&data))
}

pub async fn company_setup_page(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    Html(ui::render_company_setup(
        data.company.as_ref(),
        &Default::default(),
    ))
}

pub async fn save_company(
    State(state): State<AppState>,
    Form(form): Form<CompanySetupForm>,
) -> Result<Response, AppError> {
    let validation = validate_company_setup(&form);
    let mut data = state.data.lock().await;
    if !validation.is_valid() {
        let page = ui::render_company_setup(data.company.as_ref(), &validation);
        return Ok(Html(page).into_response());
    }

    data.company = Some(Company {
        name: form.name.trim().to_string(),
        logo_url: form.logo_url.trim().to_string(),
        contact_info: form.contact_info.trim().to_string(),
    });
    persist_data(&state.data_path, &data).await?;

    Ok(Redirect::to("/dashboard").into_response())
}

pub async fn maintenance_log_page() -> Html<String> {
    Html(ui::render_maintenance_log(&Default::default()))
}

pub async fn create_maintenance_log(
    State(state): State<AppState>,
    Form(form): Form<MaintenanceLogForm>,
) -> Result<Response, AppError> {
    let validation = validate_maintenance_log(&form);
    if !validation.is_valid() {
        return Ok(Html(ui::render_maintenance_log(&validation)).into_response());
    }

    let date: NaiveDate = form.date.trim().parse()?;
    let mut data = state.data.lock().await;
    let id = data.next_log_id();
    data.maintenance_logs.insert(
        id,
        MaintenanceLog {
            id,
            date,
            lot_number: form.lot_number.trim().to_string(),
            contact_details: form.contact_details.trim().to_string(),
            maintenance_class: form.maintenance_class.trim().to_string(),
            description: form.description.trim().to_string(),
            allocation: form.allocation.trim().to_string(),
            created_at: Local::now().naive_local(),
        },
    );
    persist_data(&state.data_path, &data).await?;
    info!("created maintenance log {id}");

    Ok(Redirect::to("/dashboard").into_response())
}

pub async fn work_order_page(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    Html(ui::render_work_order(&data, &Default::default()))
}

pub async fn create_work_order(
    State(state): State<AppState>,
    Form(form): Form<WorkOrderForm>,
) -> Result<Response, AppError> {
    let validation = validate_work_order(&form);
    let mut data = state.data.lock().await;
    if !validation.is_valid() {
        let page = ui::render_work_order(&data, &validation);
        return Ok(Html(page).into_response());
    }

    let log_id: u64 = form
        .maintenance_log_id
        .trim()
        .parse()
        .map_err(|_| AppError::bad_request("maintenance_log_id must be an integer"))?;
    let Some(log) = data.maintenance_logs.get(&log_id) else {
        return Err(AppError::not_found(format!(
            "maintenance log {log_id} does not exist"
        )));
    };
    let status = WorkOrderStatus::parse(form.status.trim())
        .ok_or_else(|| AppError::bad_request("unknown status"))?;
    let priority = Priority::parse(form.priority.trim())
        .ok_or_else(|| AppError::bad_request("unknown priority"))?;
    let scheduled_date: NaiveDate = form.scheduled_date.trim().parse()?;

    let now = Local::now().naive_local();
    let is_critical = form.is_critical.is_some();
    let notification_message =
        is_critical.then(|| format!("Critical work order created: {}", excerpt(&log.description)));

    let id = data.next_order_id();
    data.work_orders.insert(
        id,
        WorkOrder {
            id,
            maintenance_log_id: log_id,
            status,
            assigned_to: form.assigned_to.trim().to_string(),
            scheduled_date,
            completed_date: (status == WorkOrderStatus::Completed).then(|| now.date()),
            notes: form.notes.trim().to_string(),
            priority,
            is_critical,
            created_at: now,
            updated_at: now,
        },
    );
    if let Some(message) = notification_message {
        warn!("critical work order {id} created");
        data.notifications.push(Notification {
            work_order_id: id,
            message,
            created_at: now,
        });
    }
    persist_data(&state.data_path, &data).await?;
    info!("created work order {id} ({status})");

    Ok(Redirect::to("/dashboard").into_response())
}

pub async fn get_work_order_stats(
    State(state): State<AppState>,
) -> Result<Json<WorkOrderStats>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(work_order_stats(&data)))
}

pub async fn get_completion_trend(
    State(state): State<AppState>,
) -> Result<Json<Vec<TrendPoint>>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(completion_trend(&data)))
}

pub async fn filtered_work_orders(
    State(state): State<AppState>,
    Query(filter): Query<WorkOrderFilter>,
) -> Result<Json<Vec<WorkOrderRow>>, AppError> {
    let status = match filter.status.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Some(
            WorkOrderStatus::parse(value)
                .ok_or_else(|| AppError::bad_request("unknown status filter"))?,
        ),
        _ => None,
    };
    let priority = match filter.priority.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Some(
            Priority::parse(value).ok_or_else(|| AppError::bad_request("unknown priority filter"))?,
        ),
        _ => None,
    };
    let assignee = filter
        .assigned_to
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase);

    let data = state.data.lock().await;
    let rows = data
        .work_orders
        .values()
        .filter(|order| status.is_none_or(|wanted| order.status == wanted))
        .filter(|order| priority.is_none_or(|wanted| order.priority == wanted))
        .filter(|order| {
            assignee
                .as_deref()
                .is_none_or(|needle| order.assigned_to.to_lowercase().contains(needle))
        })
        .map(WorkOrderRow::project)
        .collect();

    Ok(Json(rows))
}

pub async fn update_work_order_status(
    State(state): State<AppState>,
    Form(payload): Form<StatusUpdateRequest>,
) -> Result<Json<StatusUpdateResponse>, AppError> {
    let new_status = WorkOrderStatus::parse(payload.new_status.trim())
        .ok_or_else(|| AppError::bad_request("unknown status"))?;

    let mut data = state.data.lock().await;
    let Some(order) = data.work_orders.get_mut(&payload.work_order_id) else {
        warn!(
            "status update for missing work order {}",
            payload.work_order_id
        );
        return Ok(Json(StatusUpdateResponse { success: false }));
    };

    order.status = new_status;
    order.completed_date =
        (new_status == WorkOrderStatus::Completed).then(|| Local::now().date_naive());
    order.updated_at = Local::now().naive_local();
    persist_data(&state.data_path, &data).await?;
    info!("work order {} -> {new_status}", payload.work_order_id);

    Ok(Json(StatusUpdateResponse { success: true }))
}

fn excerpt(text: &str) -> String {
    const LIMIT: usize = 50;
    if text.chars().count() <= LIMIT {
        text.to_string()
    } else {
        let head: String = text.chars().take(LIMIT).collect();
        format!("{head}...")
    }
}
