//! Page and auth handlers.
//!
//! Every page handler composes a fresh view-model and renders it; any
//! failure along the way becomes a [`WebError`] (500). Handlers are only
//! reachable for routes the [`FeatureGate`](dexstats_core::FeatureGate)
//! registered.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/`, `/index` | Home page leaderboards |
//! | `GET` | `/pokemon` | Live pokemon map |
//! | `GET` | `/raids` | Raids by city |
//! | `GET` | `/gyms` | Gyms by city |
//! | `GET` | `/quests` | Quests by city |
//! | `GET` | `/invasions` | Invasions by city |
//! | `GET` | `/nests` | Nests by city |
//! | `GET` | `/login` | Redirect to the Discord login flow |
//! | `GET` | `/logout` | Destroy the session, redirect to `/login` |

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::SET_COOKIE;
use axum::response::{Html, IntoResponse, Redirect};
use dexstats_core::{AuthRoute, GeofenceSource, Page, StatsSource};

use crate::error::WebError;
use crate::session;
use crate::state::AppState;

/// Shared state as extracted by handlers.
pub type SharedState<S, G> = State<Arc<AppState<S, G>>>;

/// Compose and render one page.
///
/// # Errors
///
/// Returns [`WebError::Compose`] or [`WebError::Render`].
pub async fn render_page<S, G>(state: &AppState<S, G>, page: Page) -> Result<Html<String>, WebError>
where
    S: StatsSource,
    G: GeofenceSource,
{
    let view_model = state.composer.compose(page).await?;
    let html = state.renderer.render(page, &view_model)?;
    Ok(Html(html))
}

macro_rules! page_handler {
    ($(#[$meta:meta])* $name:ident => $page:expr) => {
        $(#[$meta])*
        ///
        /// # Errors
        ///
        /// Returns [`WebError`] if composition or rendering fails.
        pub async fn $name<S, G>(State(state): SharedState<S, G>) -> Result<Html<String>, WebError>
        where
            S: StatsSource,
            G: GeofenceSource,
        {
            render_page(&state, $page).await
        }
    };
}

page_handler! {
    /// `GET /` and `GET /index`.
    index => Page::Index
}
page_handler! {
    /// `GET /pokemon`.
    pokemon => Page::Pokemon
}
page_handler! {
    /// `GET /raids`.
    raids => Page::Raids
}
page_handler! {
    /// `GET /gyms`.
    gyms => Page::Gyms
}
page_handler! {
    /// `GET /quests`.
    quests => Page::Quests
}
page_handler! {
    /// `GET /invasions`.
    invasions => Page::Invasions
}
page_handler! {
    /// `GET /nests`.
    nests => Page::Nests
}

/// `GET /login`: hand off to the Discord OAuth flow.
pub async fn login<S, G>(State(state): SharedState<S, G>) -> Redirect {
    Redirect::to(&state.discord_login_path)
}

/// `GET /logout`: destroy the session named by the cookie, then go to
/// `/login`.
///
/// # Errors
///
/// Returns [`WebError::Session`] if the session store fails.
pub async fn logout<S, G>(
    State(state): SharedState<S, G>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, WebError> {
    if let Some(id) = session::session_id(&headers) {
        let existed = state.sessions.destroy(&id)?;
        tracing::debug!(existed, "Session destroyed");
    }
    Ok((
        [(SET_COOKIE, session::expired_cookie())],
        Redirect::to(AuthRoute::Login.path()),
    ))
}
