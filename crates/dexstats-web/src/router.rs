//! Axum router construction for the dashboard.
//!
//! Routes come from the [`FeatureGate`](dexstats_core::FeatureGate) held
//! in the state, consulted once here. A disabled page gets no route at
//! all, so requests to it fall through to axum's default 404.

use std::sync::Arc;

use axum::Router;
use axum::routing::{MethodRouter, get};
use dexstats_core::{AuthRoute, GeofenceSource, Page, StatsSource};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the dashboard server.
///
/// The router includes, depending on the feature gate:
/// - `GET /`, `GET /index` -- always
/// - `GET /pokemon`, `/raids`, `/gyms`, `/quests`, `/invasions`, `/nests`
/// - `GET /login`, `GET /logout` -- when Discord login is enabled
pub fn build_router<S, G>(state: Arc<AppState<S, G>>) -> Router
where
    S: StatsSource + 'static,
    G: GeofenceSource + 'static,
{
    let gate = state.gate;
    let mut router = Router::new();

    for page in gate.pages() {
        for &path in page.paths() {
            router = router.route(path, page_route::<S, G>(page));
        }
    }
    for auth in gate.auth_routes() {
        router = router.route(auth.path(), auth_route::<S, G>(auth));
    }

    tracing::info!(routes = ?gate.route_table(), "Router built");

    router
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn page_route<S, G>(page: Page) -> MethodRouter<Arc<AppState<S, G>>>
where
    S: StatsSource + 'static,
    G: GeofenceSource + 'static,
{
    match page {
        Page::Index => get(handlers::index::<S, G>),
        Page::Pokemon => get(handlers::pokemon::<S, G>),
        Page::Raids => get(handlers::raids::<S, G>),
        Page::Gyms => get(handlers::gyms::<S, G>),
        Page::Quests => get(handlers::quests::<S, G>),
        Page::Invasions => get(handlers::invasions::<S, G>),
        Page::Nests => get(handlers::nests::<S, G>),
    }
}

fn auth_route<S, G>(route: AuthRoute) -> MethodRouter<Arc<AppState<S, G>>>
where
    S: StatsSource + 'static,
    G: GeofenceSource + 'static,
{
    match route {
        AuthRoute::Login => get(handlers::login::<S, G>),
        AuthRoute::Logout => get(handlers::logout::<S, G>),
    }
}
