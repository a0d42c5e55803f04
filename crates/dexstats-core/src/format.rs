//! Display formatting: raw records in, display-ready rows out.
//!
//! Everything here is pure and total. Unknown catalog ids produce an empty
//! name, never an error, so a single unmapped species cannot take a page
//! down.

use std::sync::Arc;

use dexstats_types::{
    CountRow, DefenderRow, GymDefenderStat, GymSlots, GymUnderAttackRecord, GymUnderAttackRow,
    IvRow, IvStat, PokemonCountStat, PokemonId, Team,
};

use crate::catalog::Pokedex;
use crate::locale::Locale;

/// Render a count with digit groups, treating `None` as zero.
///
/// `format_count(Some(1234567), ",")` is `"1,234,567"`.
pub fn format_count(n: Option<u64>, separator: &str) -> String {
    let digits = n.unwrap_or(0).to_string();
    let groups: Vec<&str> = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect();
    groups.join(separator)
}

/// `"Full"` when no slot is open, otherwise `"<n>/6"`.
pub fn format_slots(slots: GymSlots) -> String {
    if slots.is_full() {
        "Full".to_owned()
    } else {
        format!("{}/{}", slots.get(), GymSlots::MAX)
    }
}

/// Which icon of a species to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IconVariant {
    /// Form index (`0` for the default form).
    pub form: u16,
    /// Shiny coloring.
    pub shiny: bool,
}

impl IconVariant {
    /// The default, non-shiny form.
    pub const DEFAULT: Self = Self {
        form: 0,
        shiny: false,
    };
}

/// Shapes upstream records into display rows using the process-wide
/// catalog and locale.
#[derive(Debug, Clone)]
pub struct DisplayFormatter {
    pokedex: Arc<Pokedex>,
    locale: Arc<Locale>,
    icon_base: String,
    separator: String,
}

impl DisplayFormatter {
    /// Create a formatter.
    ///
    /// `icon_base` is the URL prefix of the pokemon icon set; a trailing
    /// `/` is ignored.
    pub fn new(
        pokedex: Arc<Pokedex>,
        locale: Arc<Locale>,
        icon_base: &str,
        separator: &str,
    ) -> Self {
        Self {
            pokedex,
            locale,
            icon_base: icon_base.trim_end_matches('/').to_owned(),
            separator: separator.to_owned(),
        }
    }

    /// The catalog backing [`Self::resolve_name`].
    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    /// Format a count with this formatter's separator.
    pub fn count(&self, n: Option<u64>) -> String {
        format_count(n, &self.separator)
    }

    /// Format a gym's open slot count.
    pub fn slots(&self, slots: GymSlots) -> String {
        format_slots(slots)
    }

    /// Species name, or `None` for ids missing from the pokedex.
    pub fn resolve_name(&self, id: PokemonId) -> Option<String> {
        self.pokedex.name(id).map(str::to_owned)
    }

    /// Icon URL of a species variant.
    ///
    /// `<base>/pokemon_icon_<id:03>_<form:02>[_shiny].png`
    pub fn resolve_icon(&self, id: PokemonId, variant: IconVariant) -> String {
        let shiny = if variant.shiny { "_shiny" } else { "" };
        format!(
            "{}/pokemon_icon_{:03}_{:02}{shiny}.png",
            self.icon_base,
            id.get(),
            variant.form
        )
    }

    /// Localized team name, lowercased for use as a CSS class.
    pub fn lowercase_team_name(&self, team_id: u8) -> String {
        let key = format!("team_{team_id}");
        let name = Team::from_id(team_id).map_or_else(
            || self.locale.translate(&key),
            |team| self.locale.translate_or(&key, team.default_name()),
        );
        name.to_lowercase()
    }

    /// Localized grunt type name (`grunt_<id>`).
    pub fn grunt_name(&self, id: u8) -> String {
        self.locale.translate(&format!("grunt_{id}"))
    }

    /// Shape a gym defender leaderboard entry.
    pub fn defender_row(&self, stat: &GymDefenderStat) -> DefenderRow {
        DefenderRow {
            id: stat.pokemon_id,
            name: self.resolve_name(stat.pokemon_id),
            count: self.count(stat.count),
            image_url: self.resolve_icon(stat.pokemon_id, IconVariant::DEFAULT),
        }
    }

    /// Shape a top-IV leaderboard entry.
    pub fn iv_row(&self, stat: &IvStat) -> IvRow {
        IvRow {
            pokemon_id: stat.pokemon_id,
            name: self.resolve_name(stat.pokemon_id),
            iv: stat.iv,
            count: self.count(stat.count),
            image_url: self.resolve_icon(stat.pokemon_id, IconVariant::DEFAULT),
        }
    }

    /// Shape a lifetime/today leaderboard entry.
    pub fn count_row(&self, stat: &PokemonCountStat) -> CountRow {
        CountRow {
            pokemon_id: stat.pokemon_id,
            name: self.resolve_name(stat.pokemon_id),
            shiny: self.count(stat.shiny),
            count: self.count(stat.count),
            image_url: self.resolve_icon(stat.pokemon_id, IconVariant::DEFAULT),
        }
    }

    /// Shape a gym under attack, clamping its slot count into `0..=6`.
    ///
    /// A missing slot count is treated as a full gym.
    pub fn gym_under_attack_row(&self, record: &GymUnderAttackRecord) -> GymUnderAttackRow {
        let raw = record.available_slots.unwrap_or(0);
        let slots = GymSlots::clamped(raw);
        if i64::from(slots.get()) != raw {
            tracing::warn!(
                gym_id = record.id,
                available_slots = raw,
                "Gym slot count outside 0..=6, clamped"
            );
        }
        GymUnderAttackRow {
            id: record.id.clone(),
            name: record.name.clone(),
            lat: record.lat,
            lon: record.lon,
            url: record.url.clone(),
            team_id: record.team_id,
            team: self.lowercase_team_name(record.team_id),
            slots_available: self.slots(slots),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use proptest::prelude::*;

    use super::*;

    fn formatter() -> DisplayFormatter {
        DisplayFormatter::new(
            Arc::new(Pokedex::from_entries([(1, "Bulbasaur"), (150, "Mewtwo")])),
            Arc::new(Locale::from_pairs("en", [("team_1", "Mystic"), ("grunt_4", "Tier II")])),
            "/img/pokemon/",
            ",",
        )
    }

    fn gym(available_slots: Option<i64>, team_id: u8) -> GymUnderAttackRecord {
        GymUnderAttackRecord {
            id: "gym-1".to_owned(),
            name: Some("Fountain".to_owned()),
            lat: 1.0,
            lon: 2.0,
            url: None,
            team_id,
            available_slots,
            updated: Utc::now(),
        }
    }

    #[test]
    fn format_count_groups_thousands() {
        assert_eq!(format_count(Some(0), ","), "0");
        assert_eq!(format_count(Some(999), ","), "999");
        assert_eq!(format_count(Some(1000), ","), "1,000");
        assert_eq!(format_count(Some(1_234_567), "."), "1.234.567");
    }

    #[test]
    fn format_count_treats_absent_as_zero() {
        assert_eq!(format_count(None, ","), format_count(Some(0), ","));
    }

    #[test]
    fn format_slots_labels() {
        assert_eq!(format_slots(GymSlots::FULL), "Full");
        for k in 1..=6 {
            let slots = GymSlots::new(k).unwrap_or(GymSlots::FULL);
            assert_eq!(format_slots(slots), format!("{k}/6"));
        }
    }

    #[test]
    fn icon_url_is_pure_function_of_inputs() {
        let f = formatter();
        assert_eq!(
            f.resolve_icon(PokemonId(1), IconVariant::DEFAULT),
            "/img/pokemon/pokemon_icon_001_00.png"
        );
        assert_eq!(
            f.resolve_icon(PokemonId(150), IconVariant { form: 3, shiny: true }),
            "/img/pokemon/pokemon_icon_150_03_shiny.png"
        );
    }

    #[test]
    fn unknown_species_has_blank_name_but_keeps_count() {
        let f = formatter();
        let row = f.defender_row(&GymDefenderStat {
            pokemon_id: PokemonId(9999),
            count: Some(4321),
        });
        assert_eq!(row.name, None);
        assert_eq!(row.count, "4,321");
    }

    #[test]
    fn team_names_are_lowercased_with_fallbacks() {
        let f = formatter();
        assert_eq!(f.lowercase_team_name(1), "mystic");
        assert_eq!(f.lowercase_team_name(2), "valor");
        assert_eq!(f.lowercase_team_name(9), "team_9");
    }

    #[test]
    fn gym_row_recomputes_slot_label() {
        let f = formatter();
        assert_eq!(f.gym_under_attack_row(&gym(Some(0), 1)).slots_available, "Full");
        assert_eq!(f.gym_under_attack_row(&gym(Some(2), 1)).slots_available, "2/6");
        assert_eq!(f.gym_under_attack_row(&gym(None, 1)).slots_available, "Full");
        assert_eq!(f.gym_under_attack_row(&gym(Some(11), 1)).slots_available, "6/6");
        assert_eq!(f.gym_under_attack_row(&gym(Some(-2), 1)).slots_available, "Full");
    }

    #[test]
    fn grunt_names_resolve_through_locale() {
        let f = formatter();
        assert_eq!(f.grunt_name(4), "Tier II");
        assert_eq!(f.grunt_name(5), "grunt_5");
    }

    proptest! {
        #[test]
        fn format_count_length_is_monotonic(a in any::<u64>(), b in any::<u64>()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                format_count(Some(lo), ",").len() <= format_count(Some(hi), ",").len()
            );
        }

        #[test]
        fn format_count_strips_back_to_digits(n in any::<u64>()) {
            let rendered = format_count(Some(n), ",");
            prop_assert_eq!(rendered.replace(',', ""), n.to_string());
        }
    }
}
