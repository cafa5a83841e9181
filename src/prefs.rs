//! User preference record and its form wiring
//!
//! The record is persisted wholesale under the `"preferences"` key using
//! the original wire names (`animationType`/`animationSpeed`). Field-level
//! defaults mean a record missing a field still loads as bounce/medium.
//!
//! The save acknowledgement (label flash + marker class on the save button)
//! reverts on a timer. The timer bookkeeping lives in [`RevertTimer`] behind
//! the [`AckTimer`] trait so the cancel/reschedule rules are testable off
//! the page; the live page plugs in `setTimeout`.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use {
    crate::animation::{AnimationController, ClassSurface},
    crate::consts,
    crate::store::{Backend, PrefStore},
    wasm_bindgen::JsCast,
    wasm_bindgen::closure::Closure,
};

/// The persisted animation preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceRecord {
    pub animation_type: String,
    pub animation_speed: String,
}

impl Default for PreferenceRecord {
    fn default() -> Self {
        Self {
            animation_type: "bounce".to_string(),
            animation_speed: "medium".to_string(),
        }
    }
}

/// Deferred one-shot callback scheduling. The live page uses window
/// timeouts; tests drive a manual implementation.
pub trait AckTimer {
    type Handle;

    /// Schedule `revert` to run after `delay_ms`. `None` means scheduling
    /// failed and nothing is pending.
    fn schedule(&self, revert: Box<dyn FnOnce()>, delay_ms: i32) -> Option<Self::Handle>;

    /// Cancel a previously scheduled callback.
    fn cancel(&self, handle: Self::Handle);
}

/// At-most-one pending revert. Restarting cancels whatever is still
/// pending before scheduling the new revert, so back-to-back saves never
/// leave two timers racing.
pub struct RevertTimer<T: AckTimer> {
    timer: T,
    pending: Rc<RefCell<Option<T::Handle>>>,
}

impl<T: AckTimer> RevertTimer<T>
where
    T::Handle: 'static,
{
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    /// Cancel any pending revert, then schedule `revert` after `delay_ms`.
    pub fn restart(&self, revert: impl FnOnce() + 'static, delay_ms: i32) {
        if let Some(handle) = self.pending.borrow_mut().take() {
            self.timer.cancel(handle);
        }

        let pending = self.pending.clone();
        let handle = self.timer.schedule(
            Box::new(move || {
                pending.borrow_mut().take();
                revert();
            }),
            delay_ms,
        );
        *self.pending.borrow_mut() = handle;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }
}

/// `setTimeout`/`clearTimeout` backed timer (WASM only).
#[cfg(target_arch = "wasm32")]
pub struct WindowTimeout;

#[cfg(target_arch = "wasm32")]
impl AckTimer for WindowTimeout {
    type Handle = i32;

    fn schedule(&self, revert: Box<dyn FnOnce()>, delay_ms: i32) -> Option<i32> {
        let window = web_sys::window()?;
        let closure = Closure::once(revert);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms,
        ) {
            Ok(handle) => {
                closure.forget();
                Some(handle)
            }
            Err(e) => {
                log::warn!("failed to schedule ack revert: {e:?}");
                None
            }
        }
    }

    fn cancel(&self, handle: i32) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(handle);
        }
    }
}

/// Moves preferences between the form controls and the store (WASM only).
#[cfg(target_arch = "wasm32")]
pub struct PreferencesController {
    type_select: web_sys::HtmlSelectElement,
    speed_select: web_sys::HtmlSelectElement,
    save_button: web_sys::HtmlElement,
    revert_timer: RevertTimer<WindowTimeout>,
}

#[cfg(target_arch = "wasm32")]
impl PreferencesController {
    pub fn new(
        type_select: web_sys::HtmlSelectElement,
        speed_select: web_sys::HtmlSelectElement,
        save_button: web_sys::HtmlElement,
    ) -> Self {
        Self {
            type_select,
            speed_select,
            save_button,
            revert_timer: RevertTimer::new(WindowTimeout),
        }
    }

    /// Load the stored record (default bounce/medium) into the form
    /// controls and return it.
    pub fn load<B: Backend>(&self, store: &PrefStore<B>) -> PreferenceRecord {
        let record: PreferenceRecord = store.load(consts::PREFS_KEY, PreferenceRecord::default());
        self.type_select.set_value(&record.animation_type);
        self.speed_select.set_value(&record.animation_speed);
        record
    }

    /// Current form control values as (type, speed).
    pub fn selected(&self) -> (String, String) {
        (self.type_select.value(), self.speed_select.value())
    }

    /// Persist the current form values. A successful persist flashes the
    /// acknowledgement; either way, a running animation is restarted with
    /// the new type/speed.
    pub fn save<B: Backend, S: ClassSurface>(
        &self,
        store: &PrefStore<B>,
        animations: &mut AnimationController<S>,
    ) {
        let record = PreferenceRecord {
            animation_type: self.type_select.value(),
            animation_speed: self.speed_select.value(),
        };

        if store.save(consts::PREFS_KEY, &record) {
            log::info!(
                "preferences saved ({}/{})",
                record.animation_type,
                record.animation_speed
            );
            self.acknowledge();
        }

        if animations.current().is_some() {
            animations.start(&record.animation_type, &record.animation_speed);
        }
    }

    /// Flash "Saved!" on the button, reverting after the ack window.
    fn acknowledge(&self) {
        self.save_button.set_text_content(Some(consts::SAVED_LABEL));
        let _ = self
            .save_button
            .class_list()
            .add_1(consts::SAVE_SUCCESS_CLASS);

        let button = self.save_button.clone();
        self.revert_timer.restart(
            move || {
                button.set_text_content(Some(consts::SAVE_LABEL));
                let _ = button.class_list().remove_1(consts::SAVE_SUCCESS_CLASS);
            },
            consts::SAVE_ACK_MS,
        );
    }
}
