//! Session lifecycle controller.
//!
//! `AuthFlow` is the surface UI code talks to: it performs the auth API
//! calls, translates outcomes into session store mutations, and emits
//! user-facing notices and navigation over a channel so any front end can
//! subscribe without this crate knowing how things render.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError, LoginData, RegisterData};
use crate::models::User;

use super::credentials::SavedCredentials;
use super::SessionStore;

// ============================================================================
// Constants
// ============================================================================

/// Shown when the server's login error carries no message.
const LOGIN_FALLBACK_ERROR: &str = "Could not sign in";

/// Shown when the server's registration error carries no message.
const REGISTER_FALLBACK_ERROR: &str = "Could not create the account";

/// Screens the controller can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    DoctorDashboard,
    PatientDashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Side effects the controller asks the front end to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Notice { level: NoticeLevel, message: String },
    Navigate(Route),
}

pub struct AuthFlow {
    api: ApiClient,
    session: Arc<SessionStore>,
    events: mpsc::Sender<UiEvent>,
}

impl AuthFlow {
    pub fn new(api: ApiClient, session: Arc<SessionStore>, events: mpsc::Sender<UiEvent>) -> Self {
        Self {
            api,
            session,
            events,
        }
    }

    /// Restore the persisted session, then silently revalidate it against
    /// the profile endpoint. An expired session is cleaned up by the
    /// pipeline's refresh path without any notice; the user simply lands
    /// on the login screen again. Returns whether a live session exists.
    pub async fn restore(&self) -> bool {
        let restored = self.session.restore();
        if restored && self.session.snapshot().is_authenticated() {
            if let Err(e) = self.refresh_profile().await {
                debug!(error = %e, "Silent profile refresh after restore failed");
            }
        }
        self.session.snapshot().is_authenticated()
    }

    /// Sign in. On success the session is established, a welcome notice is
    /// emitted, and the user is routed to the dashboard for their role.
    /// On failure the server's message (or a fallback) is surfaced and the
    /// error re-thrown so callers can short-circuit.
    pub async fn login(&self, data: &LoginData, remember: bool) -> Result<User> {
        match self.api.login(data).await {
            Ok(auth) => {
                self.session
                    .login(auth.user.clone(), auth.access_token, auth.refresh_token);

                if remember {
                    if let Err(e) = SavedCredentials::store(&data.email, &data.password) {
                        warn!(error = %e, "Failed to save login to keychain");
                    }
                }

                self.notify(
                    NoticeLevel::Success,
                    format!("Welcome back, {}!", auth.user.short_name()),
                )
                .await;

                let route = if auth.user.role.is_doctor() {
                    Route::DoctorDashboard
                } else {
                    Route::PatientDashboard
                };
                self.navigate(route).await;

                Ok(auth.user)
            }
            Err(e) => {
                let message = Self::surface_message(&e, LOGIN_FALLBACK_ERROR);
                self.notify(NoticeLevel::Error, message).await;
                Err(e)
            }
        }
    }

    /// Create an account. No auto-login: the user is routed back to the
    /// login screen with a confirmation notice.
    pub async fn register(&self, data: &RegisterData) -> Result<User> {
        match self.api.register(data).await {
            Ok(auth) => {
                self.notify(
                    NoticeLevel::Success,
                    "Account created. Please sign in.".to_string(),
                )
                .await;
                self.navigate(Route::Login).await;
                Ok(auth.user)
            }
            Err(e) => {
                let message = Self::surface_message(&e, REGISTER_FALLBACK_ERROR);
                self.notify(NoticeLevel::Error, message).await;
                Err(e)
            }
        }
    }

    /// Sign out. The server-side token invalidation is best effort: its
    /// failure is logged and never blocks the local logout or navigation.
    pub async fn logout(&self) {
        if let Some(refresh_token) = self.session.snapshot().refresh_token {
            if let Err(e) = self.api.logout(&refresh_token).await {
                warn!(error = %e, "Server-side logout failed, clearing local session anyway");
            }
        }

        self.session.logout();
        self.notify(NoticeLevel::Info, "Signed out".to_string()).await;
        self.navigate(Route::Login).await;
    }

    /// Re-fetch the authenticated user and store the fresh copy. Errors
    /// propagate; callers decide whether they are worth surfacing.
    pub async fn refresh_profile(&self) -> Result<User> {
        let user = self.api.get_profile().await?;
        self.session.set_user(user.clone());
        Ok(user)
    }

    /// The message to show for a failed auth call: the server's own text
    /// when the response carried one, a generic fallback otherwise.
    fn surface_message(error: &anyhow::Error, fallback: &str) -> String {
        error
            .downcast_ref::<ApiError>()
            .and_then(|api| api.user_message())
            .unwrap_or(fallback)
            .to_string()
    }

    async fn notify(&self, level: NoticeLevel, message: String) {
        if self
            .events
            .send(UiEvent::Notice { level, message })
            .await
            .is_err()
        {
            debug!("UI event receiver dropped, discarding notice");
        }
    }

    async fn navigate(&self, route: Route) {
        if self.events.send(UiEvent::Navigate(route)).await.is_err() {
            debug!("UI event receiver dropped, discarding navigation");
        }
    }
}
