//! Theme state and switching
//!
//! Two-state machine (Light/Dark). The pure half lives in [`Theme`] so the
//! transition and initialization rules are testable without a DOM; the
//! controller applies the resolved state to the page and persists changes.

use crate::consts;
#[cfg(target_arch = "wasm32")]
use crate::store::{Backend, PrefStore};

/// Page theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Persisted string form ("theme" storage key holds this as JSON).
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// The opposite theme.
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Glyph shown in the toggle button: the sun invites leaving dark mode,
    /// the moon invites entering it.
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => consts::MOON_ICON,
            Theme::Dark => consts::SUN_ICON,
        }
    }

    /// Initial theme resolution: any stored value wins ("dark" means Dark,
    /// everything else Light), otherwise the OS color-scheme preference,
    /// otherwise Light.
    pub fn resolve_initial(stored: Option<&str>, system_prefers_dark: bool) -> Self {
        match stored {
            Some(s) => Theme::from_str(s).unwrap_or(Theme::Light),
            None if system_prefers_dark => Theme::Dark,
            None => Theme::Light,
        }
    }
}

/// Applies [`Theme`] state to the live page (WASM only).
///
/// Owns the body handle that carries the theme marker class and the icon
/// element inside the toggle button. Both are validated present at startup.
#[cfg(target_arch = "wasm32")]
pub struct ThemeController {
    theme: Theme,
    body: web_sys::HtmlElement,
    icon: web_sys::Element,
}

#[cfg(target_arch = "wasm32")]
impl ThemeController {
    pub fn new(body: web_sys::HtmlElement, icon: web_sys::Element) -> Self {
        Self {
            theme: Theme::Light,
            body,
            icon,
        }
    }

    /// Resolve the initial theme from the stored preference or the OS
    /// color-scheme, then apply it.
    pub fn init<B: Backend>(&mut self, store: &PrefStore<B>) {
        let stored: Option<String> = store.load(consts::THEME_KEY, None);
        self.theme = Theme::resolve_initial(stored.as_deref(), system_prefers_dark());
        log::info!("initial theme: {}", self.theme.as_str());
        self.apply();
    }

    /// Flip the theme, apply it, persist the new state string.
    pub fn toggle<B: Backend>(&mut self, store: &PrefStore<B>) {
        self.theme = self.theme.toggled();
        self.apply();
        store.save(consts::THEME_KEY, &self.theme.as_str());
    }

    /// Idempotent: DomTokenList add/remove never duplicates the marker.
    pub fn apply(&self) {
        let classes = self.body.class_list();
        let _ = match self.theme {
            Theme::Dark => classes.add_1(consts::DARK_THEME_CLASS),
            Theme::Light => classes.remove_1(consts::DARK_THEME_CLASS),
        };
        self.icon.set_text_content(Some(self.theme.icon()));
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }
}

/// OS-level dark color-scheme preference via media query.
#[cfg(target_arch = "wasm32")]
fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok())
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryBackend, PrefStore};

    #[test]
    fn test_toggle_cycle_is_identity() {
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn test_icon_glyphs() {
        assert_eq!(Theme::Dark.icon(), consts::SUN_ICON);
        assert_eq!(Theme::Light.icon(), consts::MOON_ICON);
    }

    #[test]
    fn test_resolve_no_stored_uses_system_preference() {
        assert_eq!(Theme::resolve_initial(None, true), Theme::Dark);
        assert_eq!(Theme::resolve_initial(None, false), Theme::Light);
    }

    #[test]
    fn test_resolve_stored_beats_system_preference() {
        assert_eq!(Theme::resolve_initial(Some("dark"), false), Theme::Dark);
        assert_eq!(Theme::resolve_initial(Some("light"), true), Theme::Light);
    }

    #[test]
    fn test_resolve_unrecognized_stored_reads_as_light() {
        // A present stored value decides the theme; only "dark" is dark
        assert_eq!(Theme::resolve_initial(Some("sepia"), true), Theme::Light);
        assert_eq!(Theme::resolve_initial(Some(""), true), Theme::Light);
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(Theme::from_str("Dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_str("LIGHT"), Some(Theme::Light));
        assert_eq!(Theme::from_str("blue"), None);
    }

    #[test]
    fn test_stored_theme_round_trip() {
        let store = PrefStore::new(MemoryBackend::new());
        assert!(store.save(consts::THEME_KEY, &Theme::Dark.as_str()));

        let stored: Option<String> = store.load(consts::THEME_KEY, None);
        let resolved = Theme::resolve_initial(stored.as_deref(), false);
        assert_eq!(resolved, Theme::Dark);
    }
}
