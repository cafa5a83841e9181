//! Theme Motion - page theme switching and animation controls
//!
//! Core modules:
//! - `store`: JSON key/value preference persistence (LocalStorage on web)
//! - `theme`: Light/dark theme state and the document-level theme marker
//! - `animation`: CSS class driven animation start/stop on one target element
//! - `prefs`: The persisted animation preference record and its form wiring

pub mod animation;
pub mod prefs;
pub mod store;
pub mod theme;

pub use animation::{AnimationController, AnimationSpeed, AnimationType};
pub use prefs::PreferenceRecord;
pub use store::PrefStore;
pub use theme::Theme;

/// Page contract constants: storage keys, marker classes, element ids.
pub mod consts {
    /// Storage key for the persisted theme string ("dark"/"light")
    pub const THEME_KEY: &str = "theme";
    /// Storage key for the persisted preference record
    pub const PREFS_KEY: &str = "preferences";

    /// Marker class carried by the document body while dark theme is active
    pub const DARK_THEME_CLASS: &str = "dark-theme";
    /// Marker class flashed on the save button after a successful save
    pub const SAVE_SUCCESS_CLASS: &str = "save-success";

    /// Icon glyphs shown in the theme toggle button
    pub const SUN_ICON: &str = "\u{2600}\u{fe0f}";
    pub const MOON_ICON: &str = "\u{1f319}";

    /// Save button labels (default and transient acknowledgement)
    pub const SAVE_LABEL: &str = "Save Preferences";
    pub const SAVED_LABEL: &str = "Saved!";
    /// How long the acknowledgement label stays up before reverting (ms)
    pub const SAVE_ACK_MS: i32 = 1500;

    /// Required element ids
    pub const THEME_TOGGLE_ID: &str = "theme-toggle-btn";
    pub const ANIMATION_TYPE_ID: &str = "animation-type";
    pub const ANIMATION_SPEED_ID: &str = "animation-speed";
    pub const START_ANIMATION_ID: &str = "start-animation";
    pub const RESET_ANIMATION_ID: &str = "reset-animation";
    pub const SAVE_PREFERENCES_ID: &str = "save-preferences";
    /// Selectors for elements located by class rather than id
    pub const ANIMATED_ELEMENT_SELECTOR: &str = ".animated-element";
    pub const TOGGLE_ICON_SELECTOR: &str = ".toggle-icon";
}
