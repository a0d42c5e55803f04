//! Pages and the startup-time feature gate that decides which exist.
//!
//! The gate is consulted once, while the router is being built. A page
//! whose flag is off never gets a route, so requests to it fall through
//! to the router's ordinary not-found handling.

use crate::config::FeatureFlags;

/// A dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Page {
    /// Home page with leaderboards. Always registered.
    Index,
    /// Live pokemon map.
    Pokemon,
    /// Raid boards by city.
    Raids,
    /// Gym boards by city.
    Gyms,
    /// Quest boards by city.
    Quests,
    /// Team Rocket invasion boards by city.
    Invasions,
    /// Nest boards by city.
    Nests,
}

impl Page {
    /// Every page in navigation order.
    pub const ALL: [Self; 7] = [
        Self::Index,
        Self::Pokemon,
        Self::Raids,
        Self::Gyms,
        Self::Quests,
        Self::Invasions,
        Self::Nests,
    ];

    /// Logical template name handed to the renderer.
    pub const fn template(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Pokemon => "pokemon",
            Self::Raids => "raids",
            Self::Gyms => "gyms",
            Self::Quests => "quests",
            Self::Invasions => "invasions",
            Self::Nests => "nests",
        }
    }

    /// URL paths served by this page.
    pub const fn paths(self) -> &'static [&'static str] {
        match self {
            Self::Index => &["/", "/index"],
            Self::Pokemon => &["/pokemon"],
            Self::Raids => &["/raids"],
            Self::Gyms => &["/gyms"],
            Self::Quests => &["/quests"],
            Self::Invasions => &["/invasions"],
            Self::Nests => &["/nests"],
        }
    }

    /// Whether `flags` turn this page on.
    pub const fn is_enabled(self, flags: FeatureFlags) -> bool {
        match self {
            Self::Index => true,
            Self::Pokemon => flags.pokemon,
            Self::Raids => flags.raids,
            Self::Gyms => flags.gyms,
            Self::Quests => flags.quests,
            Self::Invasions => flags.invasions,
            Self::Nests => flags.nests,
        }
    }
}

/// Redirect-only routes of the Discord login integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthRoute {
    /// Starts the OAuth flow.
    Login,
    /// Destroys the session.
    Logout,
}

impl AuthRoute {
    /// Both auth routes.
    pub const ALL: [Self; 2] = [Self::Login, Self::Logout];

    /// URL path of the route.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Logout => "/logout",
        }
    }
}

/// Decides, once, which routes the process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureGate {
    flags: FeatureFlags,
}

impl FeatureGate {
    /// Freeze `flags` into a gate.
    pub const fn new(flags: FeatureFlags) -> Self {
        Self { flags }
    }

    /// The flags this gate was built from.
    pub const fn flags(&self) -> FeatureFlags {
        self.flags
    }

    /// Registered pages: the index first, then enabled pages in navigation order.
    pub fn pages(&self) -> Vec<Page> {
        Page::ALL
            .into_iter()
            .filter(|page| page.is_enabled(self.flags))
            .collect()
    }

    /// Registered auth routes (both or neither).
    pub fn auth_routes(&self) -> Vec<AuthRoute> {
        if self.flags.discord {
            AuthRoute::ALL.to_vec()
        } else {
            Vec::new()
        }
    }

    /// Whether `/login` and `/logout` are registered.
    pub const fn auth_enabled(&self) -> bool {
        self.flags.discord
    }

    /// Every registered path.
    pub fn route_table(&self) -> Vec<&'static str> {
        let pages = self.pages().into_iter().flat_map(|page| page.paths().iter().copied());
        let auth = self.auth_routes().into_iter().map(AuthRoute::path);
        pages.chain(auth).collect()
    }

    /// Whether `path` has a route.
    pub fn is_registered(&self, path: &str) -> bool {
        self.route_table().contains(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_pages_registered_by_default() {
        let gate = FeatureGate::new(FeatureFlags::ALL_PAGES);
        assert_eq!(gate.pages(), Page::ALL.to_vec());
        assert_eq!(
            gate.route_table(),
            vec![
                "/", "/index", "/pokemon", "/raids", "/gyms", "/quests", "/invasions", "/nests"
            ]
        );
        assert!(!gate.auth_enabled());
    }

    #[test]
    fn disabled_page_is_absent_from_route_table() {
        let flags = FeatureFlags {
            quests: false,
            nests: false,
            ..FeatureFlags::ALL_PAGES
        };
        let gate = FeatureGate::new(flags);
        assert!(!gate.is_registered("/quests"));
        assert!(!gate.is_registered("/nests"));
        assert!(gate.is_registered("/gyms"));
        assert!(!gate.pages().contains(&Page::Quests));
    }

    #[test]
    fn index_survives_every_flag_off() {
        let flags = FeatureFlags {
            pokemon: false,
            raids: false,
            gyms: false,
            quests: false,
            invasions: false,
            nests: false,
            discord: false,
        };
        let gate = FeatureGate::new(flags);
        assert_eq!(gate.pages(), vec![Page::Index]);
        assert_eq!(gate.route_table(), vec!["/", "/index"]);
    }

    #[test]
    fn discord_flag_registers_login_and_logout() {
        let flags = FeatureFlags {
            discord: true,
            ..FeatureFlags::ALL_PAGES
        };
        let gate = FeatureGate::new(flags);
        assert!(gate.is_registered("/login"));
        assert!(gate.is_registered("/logout"));
    }

    #[test]
    fn templates_match_page_names() {
        let names: Vec<&str> = Page::ALL.iter().map(|p| p.template()).collect();
        assert_eq!(
            names,
            vec!["index", "pokemon", "raids", "gyms", "quests", "invasions", "nests"]
        );
    }
}
