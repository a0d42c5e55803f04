//! Shared application state for the dashboard server.
//!
//! [`AppState`] is built once at startup and shared by every handler
//! through an [`Arc`]. Nothing in it is mutated per request: the composer
//! hands out fresh view-models, and the session store synchronizes
//! internally.

use std::sync::Arc;

use dexstats_core::{FeatureGate, PageComposer};

use crate::render::TemplateRenderer;
use crate::session::SessionStore;

/// Everything a request handler needs.
pub struct AppState<S, G> {
    /// Builds one view-model per request.
    pub composer: PageComposer<S, G>,
    /// Turns view-models into HTML.
    pub renderer: TemplateRenderer,
    /// The route table this process was started with.
    pub gate: FeatureGate,
    /// Login sessions, destroyed on logout.
    pub sessions: Arc<dyn SessionStore>,
    /// Where `/login` redirects to start the Discord OAuth flow.
    pub discord_login_path: String,
}

impl<S, G> AppState<S, G> {
    /// Assemble the state.
    pub fn new(
        composer: PageComposer<S, G>,
        renderer: TemplateRenderer,
        gate: FeatureGate,
        sessions: Arc<dyn SessionStore>,
        discord_login_path: &str,
    ) -> Self {
        Self {
            composer,
            renderer,
            gate,
            sessions,
            discord_login_path: discord_login_path.to_owned(),
        }
    }
}
