use serde::{Deserialize, Serialize};

use super::MealPlan;

/// Dashboard counters for the doctor landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorStats {
    #[serde(rename = "patientsCount")]
    pub patients_count: i64,
    #[serde(rename = "plansCount")]
    pub plans_count: i64,
    #[serde(rename = "activePlansCount")]
    pub active_plans_count: i64,
}

/// Dashboard counters for the patient landing page, with the plan
/// currently in effect when there is one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientStats {
    #[serde(rename = "plansCount")]
    pub plans_count: i64,
    #[serde(rename = "activePlansCount")]
    pub active_plans_count: i64,
    #[serde(rename = "currentPlan")]
    pub current_plan: Option<MealPlan>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_doctor_stats() {
        let json = r#"{"patientsCount": 12, "plansCount": 31, "activePlansCount": 9}"#;
        let stats: DoctorStats = serde_json::from_str(json).expect("parse stats");
        assert_eq!(stats.patients_count, 12);
        assert_eq!(stats.active_plans_count, 9);
    }

    #[test]
    fn test_parse_patient_stats_without_current_plan() {
        let json = r#"{"plansCount": 3, "activePlansCount": 0, "currentPlan": null}"#;
        let stats: PatientStats = serde_json::from_str(json).expect("parse stats");
        assert!(stats.current_plan.is_none());
    }
}
