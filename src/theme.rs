//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles. The active
//! variant is persisted to the preference store under the `theme` key.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    /// Stable lowercase name written to the preference store.
    pub fn pref_name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl Default for ThemeVariant {
    fn default() -> Self {
        Self::Dark
    }
}

// ============================================================================
// Color Palette — semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
///
/// Each field corresponds to a specific visual element in the TUI.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Category tabs --
    pub category_normal: Style,
    pub category_active: Style,

    // -- Article list --
    pub article_title: Style,
    pub article_selected: Style,
    pub article_source: Style,
    pub article_date: Style,
    pub article_bookmark: Style,

    // -- Detail pane --
    pub detail_heading: Style,
    pub detail_body: Style,
    pub detail_metadata: Style,
    pub detail_link: Style,

    // -- Feedback --
    pub error_text: Style,
    pub loading_text: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub header_title: Style,
}

impl ColorPalette {
    /// Dark palette, the default.
    fn dark() -> Self {
        Self {
            // Category tabs
            category_normal: Style::default().fg(Color::Gray),
            category_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            // Article list
            article_title: Style::default().add_modifier(Modifier::BOLD),
            article_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            article_source: Style::default().fg(Color::Cyan),
            article_date: Style::default().fg(Color::DarkGray),
            article_bookmark: Style::default().fg(Color::Yellow),

            // Detail pane
            detail_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            detail_body: Style::default(),
            detail_metadata: Style::default().fg(Color::DarkGray),
            detail_link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),

            // Feedback
            error_text: Style::default().fg(Color::Red),
            loading_text: Style::default().fg(Color::Yellow),

            // Chrome
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
            header_title: Style::default().add_modifier(Modifier::BOLD),
        }
    }

    /// Light palette — adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            // Category tabs
            category_normal: Style::default().fg(Color::DarkGray),
            category_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            // Article list
            article_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            article_selected: Style::default().bg(Color::Blue).fg(Color::White),
            article_source: Style::default().fg(Color::Blue),
            article_date: Style::default().fg(Color::DarkGray),
            article_bookmark: Style::default().fg(Color::Magenta),

            // Detail pane
            detail_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            detail_body: Style::default().fg(Color::Black),
            detail_metadata: Style::default().fg(Color::DarkGray),
            detail_link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),

            // Feedback
            error_text: Style::default().fg(Color::Red),
            loading_text: Style::default().fg(Color::Magenta),

            // Chrome
            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
            header_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        }
    }
}

// ============================================================================
// Style Map — string-keyed lookup
// ============================================================================

/// String-keyed style lookup.
///
/// Built from a `ColorPalette`, this allows resolving role names (e.g.
/// `"detail_heading"`) to their concrete `Style` at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 17] = [
    "category_normal",
    "category_active",
    "article_title",
    "article_selected",
    "article_source",
    "article_date",
    "article_bookmark",
    "detail_heading",
    "detail_body",
    "detail_metadata",
    "detail_link",
    "error_text",
    "loading_text",
    "status_bar",
    "panel_border",
    "panel_border_focused",
    "header_title",
];

impl StyleMap {
    /// Build a `StyleMap` from a `ColorPalette`.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 17] = [
            p.category_normal,
            p.category_active,
            p.article_title,
            p.article_selected,
            p.article_source,
            p.article_date,
            p.article_bookmark,
            p.detail_heading,
            p.detail_body,
            p.detail_metadata,
            p.detail_link,
            p.error_text,
            p.loading_text,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
            p.header_title,
        ];

        let mut map = HashMap::with_capacity(ROLE_NAMES.len());
        for (name, style) in ROLE_NAMES.iter().zip(styles.iter()) {
            map.insert(*name, *style);
        }

        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_from_str_name() {
        assert_eq!(
            ThemeVariant::from_str_name("dark"),
            Some(ThemeVariant::Dark)
        );
        assert_eq!(
            ThemeVariant::from_str_name("Light"),
            Some(ThemeVariant::Light)
        );
        assert_eq!(
            ThemeVariant::from_str_name("DARK"),
            Some(ThemeVariant::Dark)
        );
        assert_eq!(ThemeVariant::from_str_name("neon"), None);
    }

    #[test]
    fn variant_next_cycles_both_ways() {
        assert_eq!(ThemeVariant::Dark.next(), ThemeVariant::Light);
        assert_eq!(ThemeVariant::Light.next(), ThemeVariant::Dark);
    }

    #[test]
    fn pref_name_round_trips() {
        for v in [ThemeVariant::Dark, ThemeVariant::Light] {
            assert_eq!(ThemeVariant::from_str_name(v.pref_name()), Some(v));
        }
    }

    #[test]
    fn dark_palette_selection_style() {
        let palette = ThemeVariant::Dark.palette();
        assert_eq!(
            palette.article_selected,
            Style::default().bg(Color::DarkGray).fg(Color::White)
        );
    }

    #[test]
    fn dark_palette_bookmark_marker() {
        let palette = ThemeVariant::Dark.palette();
        assert_eq!(palette.article_bookmark, Style::default().fg(Color::Yellow));
    }

    #[test]
    fn light_palette_differs_from_dark() {
        let dark = ThemeVariant::Dark.palette();
        let light = ThemeVariant::Light.palette();
        // Light selection uses Blue bg instead of DarkGray
        assert_ne!(dark.article_selected, light.article_selected);
        assert_ne!(dark.status_bar, light.status_bar);
    }

    #[test]
    fn style_map_resolves_known_roles() {
        let palette = ThemeVariant::Dark.palette();
        let sm = StyleMap::from_palette(&palette);

        assert_eq!(sm.resolve("article_selected"), palette.article_selected);
        assert_eq!(sm.resolve("detail_heading"), palette.detail_heading);
        assert_eq!(sm.resolve("status_bar"), palette.status_bar);
    }

    #[test]
    fn style_map_returns_default_for_unknown() {
        let palette = ThemeVariant::Dark.palette();
        let sm = StyleMap::from_palette(&palette);
        assert_eq!(sm.resolve("nonexistent_role"), Style::default());
    }

    #[test]
    fn style_map_has_all_roles() {
        let palette = ThemeVariant::Dark.palette();
        let sm = StyleMap::from_palette(&palette);
        for name in ROLE_NAMES {
            assert_ne!(
                sm.map.get(name),
                None,
                "Role '{}' missing from StyleMap",
                name
            );
        }
        assert_eq!(sm.map.len(), ROLE_NAMES.len());
    }
}
