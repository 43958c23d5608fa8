use crate::models::{CompanySetupForm, MaintenanceLogForm, WorkOrderForm};

/// Presence validation for a submitted form. Each required field with an
/// empty value is recorded by name; the form page re-render uses the names
/// to mark the matching inputs `is-invalid`.
#[derive(Debug, Default, PartialEq)]
pub struct Validation {
    invalid: Vec<&'static str>,
}

impl Validation {
    pub fn require(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.invalid.push(field);
        }
        self
    }

    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    pub fn invalid_fields(&self) -> &[&'static str] {
        &self.invalid
    }

    /// Class suffix for the named input: `" is-invalid"` or `""`.
    pub fn mark(&self, field: &str) -> &'static str {
        if self.invalid.iter().any(|name| *name == field) {
            " is-invalid"
        } else {
            ""
        }
    }
}

pub fn validate_company_setup(form: &CompanySetupForm) -> Validation {
    let mut v = Validation::default();
    v.require("name", &form.name);
    v
}

pub fn validate_maintenance_log(form: &MaintenanceLogForm) -> Validation {
    let mut v = Validation::default();
    v.require("date", &form.date)
        .require("lot_number", &form.lot_number)
        .require("contact_details", &form.contact_details)
        .require("maintenance_class", &form.maintenance_class)
        .require("description", &form.description)
        .require("allocation", &form.allocation);
    v
}

pub fn validate_work_order(form: &WorkOrderForm) -> Validation {
    let mut v = Validation::default();
    v.require("maintenance_log_id", &form.maintenance_log_id)
        .require("status", &form.status)
        .require("assigned_to", &form.assigned_to)
        .require("scheduled_date", &form.scheduled_date)
        .require("priority", &form.priority);
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_iff_a_required_field_is_empty() {
        let mut form = WorkOrderForm {
            maintenance_log_id: "1".into(),
            status: "Pending".into(),
            assigned_to: "Ana".into(),
            scheduled_date: "2026-02-01".into(),
            priority: "High".into(),
            notes: String::new(),
            is_critical: None,
        };
        assert!(validate_work_order(&form).is_valid());

        form.assigned_to = "   ".into();
        let v = validate_work_order(&form);
        assert!(!v.is_valid());
        assert_eq!(v.invalid_fields(), ["assigned_to"]);
        assert_eq!(v.mark("assigned_to"), " is-invalid");
        assert_eq!(v.mark("status"), "");
    }

    #[test]
    fn optional_fields_never_affect_validity() {
        let form = CompanySetupForm {
            name: "Acme Maintenance".into(),
            logo_url: String::new(),
            contact_info: String::new(),
        };
        assert!(validate_company_setup(&form).is_valid());
    }

    #[test]
    fn no_required_fields_means_valid() {
        assert!(Validation::default().is_valid());
    }

    #[test]
    fn every_empty_required_field_is_reported() {
        let v = validate_maintenance_log(&MaintenanceLogForm::default());
        assert_eq!(v.invalid_fields().len(), 6);
    }
}
