use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Work-order lifecycle. Serialized with the human-readable labels the
/// forms and the status-update endpoint exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkOrderStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl WorkOrderStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(Self::Pending),
            "In Progress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub logo_url: String,
    pub contact_info: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceLog {
    pub id: u64,
    pub date: NaiveDate,
    pub lot_number: String,
    pub contact_details: String,
    pub maintenance_class: String,
    pub description: String,
    pub allocation: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: u64,
    pub maintenance_log_id: u64,
    pub status: WorkOrderStatus,
    pub assigned_to: String,
    pub scheduled_date: NaiveDate,
    pub completed_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    pub priority: Priority,
    #[serde(default)]
    pub is_critical: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Recorded when a critical work order is created; shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub work_order_id: u64,
    pub message: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub company: Option<Company>,
    pub maintenance_logs: BTreeMap<u64, MaintenanceLog>,
    pub work_orders: BTreeMap<u64, WorkOrder>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

impl AppData {
    pub fn next_log_id(&self) -> u64 {
        self.maintenance_logs.keys().next_back().map_or(1, |id| id + 1)
    }

    pub fn next_order_id(&self) -> u64 {
        self.work_orders.keys().next_back().map_or(1, |id| id + 1)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WorkOrderStats {
    pub total: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub completed: u64,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub count: u64,
}

/// Row projection returned by `/filtered_work_orders`; the dashboard table
/// is rebuilt from exactly these fields.
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkOrderRow {
    pub id: u64,
    pub maintenance_log_id: u64,
    pub status: WorkOrderStatus,
    pub assigned_to: String,
    pub scheduled_date: String,
    pub priority: Priority,
    pub is_critical: bool,
}

impl WorkOrderRow {
    pub fn project(order: &WorkOrder) -> Self {
        Self {
            id: order.id,
            maintenance_log_id: order.maintenance_log_id,
            status: order.status,
            assigned_to: order.assigned_to.clone(),
            scheduled_date: order.scheduled_date.to_string(),
            priority: order.priority,
            is_critical: order.is_critical,
        }
    }
}

/// Filter-form fields arrive as the query string; an empty string means the
/// field places no constraint.
#[derive(Debug, Default, Deserialize)]
pub struct WorkOrderFilter {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub work_order_id: u64,
    pub new_status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusUpdateResponse {
    pub success: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompanySetupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub contact_info: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct MaintenanceLogForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub lot_number: String,
    #[serde(default)]
    pub contact_details: String,
    #[serde(default)]
    pub maintenance_class: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub allocation: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkOrderForm {
    #[serde(default)]
    pub maintenance_log_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub scheduled_date: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub priority: String,
    /// Checkbox: present only when ticked.
    #[serde(default)]
    pub is_critical: Option<String>,
}
