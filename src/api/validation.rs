//! Purpose: Provide a stable, serializable validation report model.
//! Exports: `ValidationReport`, `ValidationStatus`, `ValidationIssue`.
//! Role: Shared contract for CLI diagnostics and embedding agents.
//! Invariants: The first issue matches the error `can_start_stop` returns.
//! Invariants: Issues are listed in ascending service-name order.

use crate::core::deployment::DeploymentConfig;
use crate::core::error::MissingField;
use crate::core::validate::service_issues;
use serde_json::{Map, Value, json};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationStatus {
    Ok,
    Incomplete,
}

impl ValidationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationStatus::Ok => "ok",
            ValidationStatus::Incomplete => "incomplete",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidationIssue {
    pub code: String,
    pub message: String,
    pub service: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidationReport {
    pub status: ValidationStatus,
    pub issues: Vec<ValidationIssue>,
    pub issue_count: usize,
}

impl ValidationReport {
    pub fn ok() -> Self {
        Self {
            status: ValidationStatus::Ok,
            issues: Vec::new(),
            issue_count: 0,
        }
    }

    pub fn set_issues(mut self, issues: Vec<ValidationIssue>) -> Self {
        self.issue_count = issues.len();
        self.issues = issues;
        self.status = if self.issue_count == 0 {
            ValidationStatus::Ok
        } else {
            ValidationStatus::Incomplete
        };
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == ValidationStatus::Ok
    }

    pub fn to_json(&self) -> Value {
        let issues = self
            .issues
            .iter()
            .map(|issue| {
                let mut map = Map::new();
                map.insert("code".to_string(), json!(issue.code));
                map.insert("message".to_string(), json!(issue.message));
                if let Some(service) = &issue.service {
                    map.insert("service".to_string(), json!(service));
                }
                Value::Object(map)
            })
            .collect::<Vec<_>>();
        json!({
            "status": self.status.as_str(),
            "issue_count": self.issue_count,
            "issues": issues,
        })
    }
}

impl DeploymentConfig {
    /// Runs the same checks as `can_start_stop` but keeps every issue.
    pub fn validation_report(&self) -> ValidationReport {
        let issues = service_issues(self)
            .map(|err| ValidationIssue {
                code: issue_code(err.missing()).to_string(),
                message: err.message().unwrap_or_default().to_string(),
                service: err.service().map(str::to_string),
            })
            .collect();
        ValidationReport::ok().set_issues(issues)
    }
}

fn issue_code(missing: Option<MissingField>) -> &'static str {
    match missing {
        Some(MissingField::ServiceName) => "missing-name",
        Some(MissingField::Image) => "missing-image",
        None => "invalid",
    }
}
