//! REST API client module for the NutriPlan backend.
//!
//! This module provides the `ApiClient` for communicating with the
//! NutriPlan API: authentication, patient management, and meal plans.
//!
//! The API uses JWT bearer token authentication with a refresh-token
//! rotation scheme; the client transparently refreshes an expired access
//! token once per request.

pub mod auth;
pub mod client;
pub mod error;
pub mod patients;
pub mod plans;

pub use auth::{AuthResponse, LoginData, RegisterData, TokenPair};
pub use client::ApiClient;
pub use error::ApiError;
pub use patients::{CreatePatientData, UpdatePatientData};
