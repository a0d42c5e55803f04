//! Integration tests for the dashboard routes.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. Statistics come from an in-memory fixture and
//! templates from in-memory sources.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use dexstats_core::{
    BaseViewModel, DashboardConfig, DisplayFormatter, FeatureGate, Geofence, GeofenceRegistry,
    Locale, PageComposer, Pokedex, SourceError, StatsSource,
};
use dexstats_types::{
    GymDefenderStat, GymUnderAttackRecord, IvStat, NewGym, NewPokestop, PokemonCountStat,
    PokemonId, QuestReward, StatWindow,
};
use dexstats_web::{
    build_router, AppState, MemorySessionStore, Session, SessionError, SessionStore,
    TemplateRenderer,
};
use tower::ServiceExt;

#[derive(Debug, Default)]
struct FixtureStats {
    fail: bool,
}

impl FixtureStats {
    fn check(&self) -> Result<(), SourceError> {
        if self.fail {
            Err(SourceError::Query(String::from("secret table detail")))
        } else {
            Ok(())
        }
    }
}

impl StatsSource for FixtureStats {
    async fn new_pokestops(&self) -> Result<Vec<NewPokestop>, SourceError> {
        self.check()?;
        Ok(vec![NewPokestop {
            id: String::from("s1"),
            name: Some(String::from("Fountain")),
            lat: 1.0,
            lon: 1.0,
            url: None,
            first_seen: Utc::now(),
        }])
    }

    async fn new_gyms(&self) -> Result<Vec<NewGym>, SourceError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn gym_defenders(&self, _limit: u32) -> Result<Vec<GymDefenderStat>, SourceError> {
        self.check()?;
        Ok(vec![GymDefenderStat {
            pokemon_id: PokemonId::new(143),
            count: Some(4_321),
        }])
    }

    async fn gyms_under_attack(&self, _limit: u32) -> Result<Vec<GymUnderAttackRecord>, SourceError> {
        self.check()?;
        Ok(vec![GymUnderAttackRecord {
            id: String::from("g1"),
            name: Some(String::from("Town Hall")),
            lat: 1.0,
            lon: 1.0,
            url: None,
            team_id: 2,
            available_slots: Some(0),
            updated: Utc::now(),
        }])
    }

    async fn top_pokemon_iv_stats(&self, _iv: u8, _limit: u32) -> Result<Vec<IvStat>, SourceError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn top_pokemon_stats(
        &self,
        _window: StatWindow,
        _limit: u32,
    ) -> Result<Vec<PokemonCountStat>, SourceError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn quest_rewards(&self) -> Result<Vec<QuestReward>, SourceError> {
        self.check()?;
        Ok(Vec::new())
    }
}

/// Session store whose every operation fails.
#[derive(Debug)]
struct BrokenSessionStore;

impl SessionStore for BrokenSessionStore {
    fn destroy(&self, _id: &str) -> Result<bool, SessionError> {
        Err(SessionError::Unavailable(String::from("down")))
    }
}

fn templates() -> TemplateRenderer {
    let cities = "{% for c in cities %}<li>{{ c.name }}</li>{% endfor %}";
    TemplateRenderer::from_sources([
        (
            String::from("index.html"),
            String::from(
                "<title>{{ title }}</title>\
                 <p>stops={{ new_pokestops | length }}</p>\
                 {% for d in gym_defenders %}<li>{{ d.name }}:{{ d.count }}</li>{% endfor %}\
                 {% for g in gyms_under_attack %}<li>{{ g.team }}:{{ g.slots_available }}</li>{% endfor %}",
            ),
        ),
        (
            String::from("pokemon.html"),
            String::from("<p>zoom={{ start_zoom }}</p>{% for p in pokemon %}<li>{{ p.name }}</li>{% endfor %}"),
        ),
        (String::from("raids.html"), cities.to_owned()),
        (String::from("gyms.html"), cities.to_owned()),
        (String::from("quests.html"), cities.to_owned()),
        (
            String::from("invasions.html"),
            String::from("<p>grunts={{ grunt_types | length }}</p>"),
        ),
        (String::from("nests.html"), cities.to_owned()),
    ])
    .unwrap()
}

fn make_router(yaml: &str, stats: FixtureStats, sessions: Arc<dyn SessionStore>) -> Router {
    let config = DashboardConfig::parse(yaml).unwrap();
    let formatter = DisplayFormatter::new(
        Arc::new(Pokedex::from_entries([(1, "Bulbasaur"), (143, "Snorlax")])),
        Arc::new(Locale::from_pairs("en", [("team_2", "Valor")])),
        &config.icons.pokemon_url,
        &config.locale.separator(),
    );
    let registry = GeofenceRegistry::from_geofences(vec![Geofence {
        name: String::from("Springfield"),
        polygon: vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)],
    }]);
    let composer = PageComposer::new(
        Arc::new(stats),
        Arc::new(registry),
        Arc::new(BaseViewModel::from_config(&config).unwrap()),
        Arc::new(formatter),
    );
    let state = AppState::new(
        composer,
        templates(),
        FeatureGate::new(config.feature_flags()),
        sessions,
        &config.discord.login_path,
    );
    build_router(Arc::new(state))
}

fn default_router() -> Router {
    make_router(
        "site:\n  title: Test Dex\n",
        FixtureStats::default(),
        Arc::new(MemorySessionStore::new()),
    )
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn index_renders_leaderboards() {
    let (status, body) = get(default_router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Test Dex</title>"));
    assert!(body.contains("stops=1"));
    assert!(body.contains("<li>Snorlax:4,321</li>"));
    assert!(body.contains("<li>valor:Full</li>"));
}

#[tokio::test]
async fn index_alias_serves_same_page() {
    let (status, body) = get(default_router(), "/index").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Test Dex</title>"));
}

#[tokio::test]
async fn every_enabled_page_renders() {
    for uri in ["/pokemon", "/raids", "/gyms", "/quests", "/invasions", "/nests"] {
        let (status, _) = get(default_router(), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn per_city_pages_list_cities() {
    let (_, body) = get(default_router(), "/gyms").await;
    assert!(body.contains("<li>Springfield</li>"));
}

#[tokio::test]
async fn invasions_page_lists_51_grunts() {
    let (_, body) = get(default_router(), "/invasions").await;
    assert!(body.contains("grunts=51"));
}

#[tokio::test]
async fn pokemon_page_has_viewport() {
    let (_, body) = get(default_router(), "/pokemon").await;
    assert!(body.contains("zoom="));
    assert!(body.contains("<li>Bulbasaur</li>"));
}

#[tokio::test]
async fn disabled_pages_are_not_found() {
    let yaml = "pages:\n  quests:\n    enabled: false\n  nests:\n    enabled: false\n";
    let router = make_router(
        yaml,
        FixtureStats::default(),
        Arc::new(MemorySessionStore::new()),
    );
    let (status, _) = get(router.clone(), "/quests").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(router.clone(), "/nests").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(router, "/gyms").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn auth_routes_absent_without_discord() {
    let (status, _) = get(default_router(), "/login").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(default_router(), "/logout").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_redirects_to_discord() {
    let yaml = "discord:\n  enabled: true\n  login_path: /api/discord/login\n";
    let router = make_router(
        yaml,
        FixtureStats::default(),
        Arc::new(MemorySessionStore::new()),
    );
    let response = router
        .oneshot(Request::get("/login").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/api/discord/login");
}

#[tokio::test]
async fn logout_destroys_session_and_redirects() {
    let store = Arc::new(MemorySessionStore::new());
    store
        .insert(
            "abc123",
            Session {
                user_id: String::from("42"),
                username: String::from("misty"),
            },
        )
        .unwrap();
    let router = make_router(
        "discord:\n  enabled: true\n",
        FixtureStats::default(),
        Arc::clone(&store) as Arc<dyn SessionStore>,
    );

    let request = Request::get("/logout")
        .header(COOKIE, "dexstats.sid=abc123")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/login");
    let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("dexstats.sid=;"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn logout_store_failure_is_server_error() {
    let router = make_router(
        "discord:\n  enabled: true\n",
        FixtureStats::default(),
        Arc::new(BrokenSessionStore),
    );
    let request = Request::get("/logout")
        .header(COOKIE, "dexstats.sid=abc123")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn source_failure_is_generic_server_error() {
    let router = make_router(
        "site:\n  title: Test Dex\n",
        FixtureStats { fail: true },
        Arc::new(MemorySessionStore::new()),
    );
    let (status, body) = get(router, "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Something went wrong"));
    assert!(!body.contains("secret table detail"));
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (status, _) = get(default_router(), "/admin").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
