//! Core library for NutriPlan clients.
//!
//! NutriPlan is a meal-plan service connecting doctors and their patients.
//! This crate holds everything a front end needs short of rendering:
//!
//! - [`api::ApiClient`]: the authenticated request pipeline (bearer token
//!   attachment, response envelopes, one-shot 401 refresh-and-retry)
//! - [`auth::SessionStore`]: the observable, disk-persisted session state
//! - [`auth::AuthFlow`]: login/register/logout orchestration emitting
//!   UI-agnostic notices and navigation events
//! - [`models`]: users, patients, meal plans, and request payloads
//! - [`config::Config`]: config file plus environment overrides
//!
//! A front end wires the pieces together roughly like this:
//!
//! ```no_run
//! use std::sync::Arc;
//! use nutriplan_core::{api::ApiClient, auth::{AuthFlow, SessionFile, SessionStore}, config::Config};
//!
//! # async fn wire() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let session = Arc::new(SessionStore::new(SessionFile::new(Config::state_dir()?)));
//! let api = ApiClient::new(config.api_base_url(), Arc::clone(&session))?;
//!
//! let (events_tx, _events_rx) = tokio::sync::mpsc::channel(32);
//! let flow = AuthFlow::new(api.clone(), Arc::clone(&session), events_tx);
//! flow.restore().await;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError};
pub use auth::{AuthFlow, Session, SessionFile, SessionStore, UiEvent};
pub use config::Config;
