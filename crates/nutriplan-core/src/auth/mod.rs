//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `Session` / `SessionFile`: the session snapshot and its disk persistence
//! - `SessionStore`: the single owner of session state, observable and durable
//! - `AuthFlow`: login/register/logout orchestration over the API
//! - `SavedCredentials`: optional saved-login storage in the OS keychain
//!
//! Sessions survive restarts via the session file; token expiry is handled
//! by the request pipeline's refresh path, not by local timestamps.

pub mod credentials;
pub mod flow;
pub mod session;
pub mod store;

pub use credentials::SavedCredentials;
pub use flow::{AuthFlow, NoticeLevel, Route, UiEvent};
pub use session::{Session, SessionFile};
pub use store::SessionStore;
