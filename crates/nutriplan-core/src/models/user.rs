use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role on the NutriPlan backend.
/// Doctors manage patients and author plans; patients consume them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "DOCTOR")]
    Doctor,
    #[serde(rename = "PATIENT")]
    Patient,
}

impl Role {
    pub fn is_doctor(&self) -> bool {
        matches!(self, Role::Doctor)
    }

    pub fn is_patient(&self) -> bool {
        matches!(self, Role::Patient)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Doctor => write!(f, "Doctor"),
            Role::Patient => write!(f, "Patient"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// First name only, for compact greetings.
    pub fn short_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// A patient as returned by the patients endpoints: a user plus the
/// number of plans assigned to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(flatten)]
    pub user: User,
    #[serde(rename = "plansCount")]
    pub plans_count: Option<i64>,
}

impl Patient {
    pub fn display_plans_count(&self) -> String {
        match self.plans_count {
            Some(1) => "1 plan".to_string(),
            Some(count) => format!("{} plans", count),
            None => "No plans".to_string(),
        }
    }
}
