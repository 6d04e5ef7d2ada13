//! Meal plan endpoints: CRUD, dashboard stats, and bulk detail hydration.

use anyhow::Result;
use futures::stream::{self, StreamExt};
use tracing::warn;

use crate::models::{CreatePlanData, DoctorStats, MealPlan, PatientStats, UpdatePlanData};

use super::ApiClient;

/// Maximum concurrent API requests when hydrating plan details.
/// Keeps bulk loads polite to the backend.
const MAX_CONCURRENT_REQUESTS: usize = 10;

impl ApiClient {
    /// Fetch all plans visible to the authenticated user. The list view
    /// omits per-day meals; use `fetch_plan` for the full structure.
    pub async fn fetch_plans(&self) -> Result<Vec<MealPlan>> {
        self.get("/api/plans").await
    }

    pub async fn fetch_plan(&self, id: &str) -> Result<MealPlan> {
        self.get(&format!("/api/plans/{}", id)).await
    }

    pub async fn create_plan(&self, data: &CreatePlanData) -> Result<MealPlan> {
        self.post("/api/plans", data).await
    }

    pub async fn update_plan(&self, id: &str, data: &UpdatePlanData) -> Result<MealPlan> {
        self.put(&format!("/api/plans/{}", id), data).await
    }

    pub async fn delete_plan(&self, id: &str) -> Result<()> {
        self.delete_empty(&format!("/api/plans/{}", id)).await
    }

    /// Fetch dashboard counters for the doctor landing page.
    pub async fn fetch_doctor_stats(&self) -> Result<DoctorStats> {
        self.get("/api/plans/stats/doctor").await
    }

    /// Fetch dashboard counters for the patient landing page.
    pub async fn fetch_patient_stats(&self) -> Result<PatientStats> {
        self.get("/api/plans/stats/patient").await
    }

    /// Fetch every visible plan with its full day-by-day structure.
    /// Details load with bounded concurrency; a plan whose detail fetch
    /// fails is dropped from the result with a warning rather than failing
    /// the whole load. Plans come back newest first.
    pub async fn fetch_plans_detailed(&self) -> Result<Vec<MealPlan>> {
        let plans = self.fetch_plans().await?;

        let results: Vec<Result<MealPlan>> = stream::iter(plans.into_iter().map(|plan| {
            let client = self.clone();
            async move { client.fetch_plan(&plan.id).await }
        }))
        .buffer_unordered(MAX_CONCURRENT_REQUESTS)
        .collect()
        .await;

        let mut detailed = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(plan) => detailed.push(plan),
                Err(e) => warn!(error = %e, "Skipping plan whose detail fetch failed"),
            }
        }

        detailed.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(detailed)
    }
}
