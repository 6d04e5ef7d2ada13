//! Data models for NutriPlan entities.
//!
//! This module contains all the data structures used to represent
//! NutriPlan data including:
//!
//! - `User`, `Patient`, `Role`: Account models
//! - `MealPlan`, `DailyMeal`, `Meal`, `Food`: Plan structure
//! - `Recommendation`: Lifestyle guidance attached to a plan
//! - `DoctorStats`, `PatientStats`: Dashboard counters
//! - Draft payloads for plan creation and updates

pub mod plan;
pub mod stats;
pub mod user;

pub use plan::{
    CreatePlanData, DailyMeal, DailyMealDraft, Food, FoodDraft, Meal, MealDraft, MealPlan,
    MealType, PlanParty, Priority, Recommendation, RecommendationDraft, UpdatePlanData,
};
pub use stats::{DoctorStats, PatientStats};
pub use user::{Patient, Role, User};
