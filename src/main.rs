//! Theme Motion entry point
//!
//! Wires the controllers to the live page on wasm32; the native binary is
//! a diagnostic stub.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, HtmlSelectElement, MouseEvent};

    use theme_motion::animation::AnimationController;
    use theme_motion::consts;
    use theme_motion::prefs::PreferencesController;
    use theme_motion::store::{LocalStorage, PrefStore};
    use theme_motion::theme::ThemeController;

    /// All page state, composed once at startup and shared by the
    /// click handlers.
    struct Page {
        store: PrefStore<LocalStorage>,
        theme: ThemeController,
        animations: AnimationController<Element>,
        prefs: PreferencesController,
    }

    /// Required-element lookup. A missing element is a page setup bug, so
    /// fail fast with the offending id in the message.
    fn require_by_id(document: &Document, id: &str) -> Element {
        document
            .get_element_by_id(id)
            .unwrap_or_else(|| panic!("required element #{id} missing"))
    }

    fn require_selector(document: &Document, selector: &str) -> Element {
        document
            .query_selector(selector)
            .ok()
            .flatten()
            .unwrap_or_else(|| panic!("required element {selector} missing"))
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Theme Motion starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let body = document.body().expect("no body");
        let toggle_btn = require_by_id(&document, consts::THEME_TOGGLE_ID);
        let icon = toggle_btn
            .query_selector(consts::TOGGLE_ICON_SELECTOR)
            .ok()
            .flatten()
            .unwrap_or_else(|| {
                panic!(
                    "theme toggle has no {} child",
                    consts::TOGGLE_ICON_SELECTOR
                )
            });
        let animated = require_selector(&document, consts::ANIMATED_ELEMENT_SELECTOR);
        let type_select: HtmlSelectElement = require_by_id(&document, consts::ANIMATION_TYPE_ID)
            .dyn_into()
            .expect("animation-type is not a <select>");
        let speed_select: HtmlSelectElement = require_by_id(&document, consts::ANIMATION_SPEED_ID)
            .dyn_into()
            .expect("animation-speed is not a <select>");
        let save_btn = require_by_id(&document, consts::SAVE_PREFERENCES_ID);
        let save_button: HtmlElement = save_btn
            .clone()
            .dyn_into()
            .expect("save-preferences is not an HTML element");
        let start_btn = require_by_id(&document, consts::START_ANIMATION_ID);
        let reset_btn = require_by_id(&document, consts::RESET_ANIMATION_ID);

        let store = PrefStore::new(LocalStorage::acquire());

        // Initialize theme
        let mut theme = ThemeController::new(body, icon);
        theme.init(&store);

        // Bind the animation target
        let mut animations = AnimationController::new();
        animations.bind(animated);

        // Load saved preferences into the form
        let prefs = PreferencesController::new(type_select, speed_select, save_button);
        let record = prefs.load(&store);
        log::info!(
            "loaded preferences ({}/{})",
            record.animation_type,
            record.animation_speed
        );

        let page = Rc::new(RefCell::new(Page {
            store,
            theme,
            animations,
            prefs,
        }));

        setup_click_handlers(&page, &toggle_btn, &start_btn, &reset_btn, &save_btn);

        log::info!("Theme Motion ready");
    }

    fn setup_click_handlers(
        page: &Rc<RefCell<Page>>,
        toggle_btn: &Element,
        start_btn: &Element,
        reset_btn: &Element,
        save_btn: &Element,
    ) {
        // Theme toggle
        {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut p = page.borrow_mut();
                let p = &mut *p;
                p.theme.toggle(&p.store);
            });
            let _ = toggle_btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Start animation with the current form selection
        {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut p = page.borrow_mut();
                let p = &mut *p;
                let (ty, speed) = p.prefs.selected();
                p.animations.start(&ty, &speed);
            });
            let _ = start_btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Reset animation
        {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                page.borrow_mut().animations.stop();
            });
            let _ = reset_btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Save preferences
        {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut p = page.borrow_mut();
                let p = &mut *p;
                p.prefs.save(&p.store, &mut p.animations);
            });
            let _ = save_btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Theme Motion (native) starting...");
    log::info!("Native mode has no page to enhance - run with `trunk serve` for the web version");

    // Quick smoke check of the pure logic
    println!("\nRunning store round-trip check...");
    check_store_round_trip();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn check_store_round_trip() {
    use theme_motion::prefs::PreferenceRecord;
    use theme_motion::store::{MemoryBackend, PrefStore};

    let store = PrefStore::new(MemoryBackend::new());
    let record = PreferenceRecord {
        animation_type: "rotate".to_string(),
        animation_speed: "fast".to_string(),
    };
    assert!(store.save("preferences", &record));
    let loaded: PreferenceRecord = store.load("preferences", PreferenceRecord::default());
    assert_eq!(loaded, record, "round-trip should preserve the record");
    println!("✓ Store round-trip passed!");
}
