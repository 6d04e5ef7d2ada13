//! Meal plan models: the weekly plan a doctor assigns to a patient,
//! its per-day meals, foods, and lifestyle recommendations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Slot a meal occupies within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MealType {
    #[serde(rename = "BREAKFAST")]
    Breakfast,
    #[serde(rename = "MORNING_SNACK")]
    MorningSnack,
    #[serde(rename = "LUNCH")]
    Lunch,
    #[serde(rename = "AFTERNOON_SNACK")]
    AfternoonSnack,
    #[serde(rename = "DINNER")]
    Dinner,
    #[serde(rename = "EVENING_SNACK")]
    EveningSnack,
}

impl MealType {
    /// Get the display name for this meal slot.
    pub fn display_name(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::MorningSnack => "Morning snack",
            MealType::Lunch => "Lunch",
            MealType::AfternoonSnack => "Afternoon snack",
            MealType::Dinner => "Dinner",
            MealType::EveningSnack => "Evening snack",
        }
    }

    /// All slots in day order.
    pub fn all() -> [MealType; 6] {
        [
            MealType::Breakfast,
            MealType::MorningSnack,
            MealType::Lunch,
            MealType::AfternoonSnack,
            MealType::Dinner,
            MealType::EveningSnack,
        ]
    }
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Priority of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "HIGH")]
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: String,
    pub name: String,
    pub quantity: String,
    pub calories: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub name: String,
    pub description: Option<String>,
    pub calories: Option<i32>,
    // Wire name inherited from the backend schema
    #[serde(rename = "porcion")]
    pub portion: Option<String>,
    pub time: Option<String>,
    #[serde(default)]
    pub foods: Vec<Food>,
}

impl Meal {
    /// Calories for the meal: the meal-level figure when present,
    /// otherwise the sum over foods that carry one.
    pub fn total_calories(&self) -> Option<i32> {
        if self.calories.is_some() {
            return self.calories;
        }
        let sum: i32 = self.foods.iter().filter_map(|f| f.calories).sum();
        if self.foods.iter().any(|f| f.calories.is_some()) {
            Some(sum)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMeal {
    pub id: String,
    #[serde(rename = "dayNumber")]
    pub day_number: i32,
    #[serde(rename = "dayName")]
    pub day_name: String,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

impl DailyMeal {
    pub fn total_calories(&self) -> i32 {
        self.meals.iter().filter_map(|m| m.total_calories()).sum()
    }

    /// Meals sorted into day order (breakfast first).
    pub fn meals_in_order(&self) -> Vec<&Meal> {
        let mut meals: Vec<&Meal> = self.meals.iter().collect();
        meals.sort_by_key(|m| m.meal_type);
        meals
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: String,
}

/// Compact doctor/patient reference embedded in a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanParty {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "endDate")]
    pub end_date: DateTime<Utc>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "doctorId")]
    pub doctor_id: String,
    #[serde(rename = "patientId")]
    pub patient_id: String,
    pub doctor: Option<PlanParty>,
    pub patient: Option<PlanParty>,
    #[serde(rename = "dailyMeals", default)]
    pub daily_meals: Vec<DailyMeal>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

impl MealPlan {
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days().max(0)
    }

    /// Whether the plan covers `now` and is still flagged active.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.start_date <= now && now <= self.end_date
    }

    /// Days sorted by day number; the backend does not guarantee order.
    pub fn days_in_order(&self) -> Vec<&DailyMeal> {
        let mut days: Vec<&DailyMeal> = self.daily_meals.iter().collect();
        days.sort_by_key(|d| d.day_number);
        days
    }
}

// ===== Request payloads =====

#[derive(Debug, Clone, Serialize)]
pub struct FoodDraft {
    pub name: String,
    pub quantity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MealDraft {
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fats: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub foods: Vec<FoodDraft>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyMealDraft {
    #[serde(rename = "dayNumber")]
    pub day_number: i32,
    #[serde(rename = "dayName")]
    pub day_name: String,
    pub meals: Vec<MealDraft>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationDraft {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    pub category: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlanData {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "patientId")]
    pub patient_id: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
    #[serde(rename = "dailyMeals", skip_serializing_if = "Vec::is_empty")]
    pub daily_meals: Vec<DailyMealDraft>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<RecommendationDraft>,
}

/// Partial update; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdatePlanData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(rename = "isActive", skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN_JSON: &str = r#"{
        "id": "plan_01",
        "title": "Hypocaloric week 1",
        "description": "First adjustment week",
        "startDate": "2026-01-05T00:00:00.000Z",
        "endDate": "2026-01-11T00:00:00.000Z",
        "isActive": true,
        "createdAt": "2026-01-02T12:00:00.000Z",
        "updatedAt": "2026-01-02T12:00:00.000Z",
        "doctorId": "doc_1",
        "patientId": "pat_1",
        "doctor": {"id": "doc_1", "name": "Ana Torres", "email": "ana@example.com"},
        "patient": {"id": "pat_1", "name": "Luis Paredes", "email": "luis@example.com"},
        "dailyMeals": [
            {
                "id": "day_2",
                "dayNumber": 2,
                "dayName": "Tuesday",
                "meals": []
            },
            {
                "id": "day_1",
                "dayNumber": 1,
                "dayName": "Monday",
                "meals": [
                    {
                        "id": "meal_1",
                        "type": "BREAKFAST",
                        "name": "Oatmeal with fruit",
                        "description": null,
                        "calories": null,
                        "porcion": "1 bowl",
                        "time": "08:00",
                        "foods": [
                            {"id": "food_1", "name": "Oats", "quantity": "60g", "calories": 230, "notes": null},
                            {"id": "food_2", "name": "Blueberries", "quantity": "50g", "calories": 30, "notes": null}
                        ]
                    },
                    {
                        "id": "meal_2",
                        "type": "LUNCH",
                        "name": "Grilled chicken salad",
                        "description": null,
                        "calories": 520,
                        "porcion": null,
                        "time": "13:30",
                        "foods": []
                    }
                ]
            }
        ],
        "recommendations": [
            {
                "id": "rec_1",
                "title": "Hydration",
                "description": "At least 2L of water per day",
                "priority": "HIGH",
                "category": "habits"
            }
        ]
    }"#;

    #[test]
    fn test_parse_plan() {
        let plan: MealPlan = serde_json::from_str(PLAN_JSON).expect("parse plan");
        assert_eq!(plan.title, "Hypocaloric week 1");
        assert!(plan.is_active);
        assert_eq!(plan.duration_days(), 6);
        assert_eq!(plan.daily_meals.len(), 2);
        assert_eq!(plan.recommendations[0].priority, Priority::High);
    }

    #[test]
    fn test_days_sorted_by_number() {
        let plan: MealPlan = serde_json::from_str(PLAN_JSON).expect("parse plan");
        let days = plan.days_in_order();
        assert_eq!(days[0].day_number, 1);
        assert_eq!(days[1].day_number, 2);
    }

    #[test]
    fn test_meal_calories_fall_back_to_foods() {
        let plan: MealPlan = serde_json::from_str(PLAN_JSON).expect("parse plan");
        let monday = plan
            .daily_meals
            .iter()
            .find(|d| d.day_number == 1)
            .expect("monday present");
        let breakfast = &monday.meals_in_order()[0];
        // Meal-level calories absent, summed from foods
        assert_eq!(breakfast.total_calories(), Some(260));
        // Meal-level calories win when present
        let lunch = &monday.meals_in_order()[1];
        assert_eq!(lunch.total_calories(), Some(520));
        assert_eq!(monday.total_calories(), 780);
    }

    #[test]
    fn test_is_current_respects_active_flag_and_range(){
        let mut plan: MealPlan = serde_json::from_str(PLAN_JSON).expect("parse plan");
        let inside = "2026-01-07T10:00:00Z".parse().unwrap();
        let outside = "2026-02-07T10:00:00Z".parse().unwrap();
        assert!(plan.is_current(inside));
        assert!(!plan.is_current(outside));
        plan.is_active = false;
        assert!(!plan.is_current(inside));
    }

    #[test]
    fn test_update_payload_skips_unset_fields() {
        let update = UpdatePlanData {
            is_active: Some(false),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"isActive":false}"#);
    }

    #[test]
    fn test_create_payload_wire_names() {
        let create = CreatePlanData {
            title: "Week 2".to_string(),
            description: None,
            patient_id: "pat_1".to_string(),
            start_date: "2026-01-12".to_string(),
            end_date: "2026-01-18".to_string(),
            daily_meals: vec![DailyMealDraft {
                day_number: 1,
                day_name: "Monday".to_string(),
                meals: vec![MealDraft {
                    meal_type: MealType::Dinner,
                    name: "Baked salmon".to_string(),
                    description: None,
                    calories: Some(430),
                    protein: Some(38),
                    carbs: None,
                    fats: None,
                    time: Some("20:30".to_string()),
                    foods: vec![],
                }],
            }],
            recommendations: vec![],
        };
        let value = serde_json::to_value(&create).unwrap();
        assert_eq!(value["patientId"], "pat_1");
        assert_eq!(value["dailyMeals"][0]["dayNumber"], 1);
        assert_eq!(value["dailyMeals"][0]["meals"][0]["type"], "DINNER");
        // Unset draft fields stay off the wire entirely
        assert!(value["dailyMeals"][0]["meals"][0].get("carbs").is_none());
    }
}
