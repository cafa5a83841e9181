//! CSS class driven animation control
//!
//! An animation is "running" when the bound element carries exactly two
//! marker classes: one for the type (`rotate-animation`, ...) and one for
//! the speed (`slow`/`medium`/`fast`). The controller guarantees the
//! element never accumulates markers from earlier runs: the class set is
//! always empty or exactly the last-started pair.
//!
//! Type/speed inputs are applied as literal class names without validation;
//! the form controls own the enumerated sets, and an out-of-set value just
//! becomes a class no stylesheet rule matches.

/// Known animation types (the set offered by the form control).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationType {
    Rotate,
    Bounce,
    Pulse,
}

impl AnimationType {
    pub const ALL: [AnimationType; 3] =
        [AnimationType::Rotate, AnimationType::Bounce, AnimationType::Pulse];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationType::Rotate => "rotate",
            AnimationType::Bounce => "bounce",
            AnimationType::Pulse => "pulse",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rotate" => Some(AnimationType::Rotate),
            "bounce" => Some(AnimationType::Bounce),
            "pulse" => Some(AnimationType::Pulse),
            _ => None,
        }
    }

    /// Marker class for this type.
    pub fn class_name(&self) -> &'static str {
        match self {
            AnimationType::Rotate => "rotate-animation",
            AnimationType::Bounce => "bounce-animation",
            AnimationType::Pulse => "pulse-animation",
        }
    }
}

/// Known animation speeds. The speed name doubles as its marker class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationSpeed {
    Slow,
    Medium,
    Fast,
}

impl AnimationSpeed {
    pub const ALL: [AnimationSpeed; 3] =
        [AnimationSpeed::Slow, AnimationSpeed::Medium, AnimationSpeed::Fast];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(AnimationSpeed::Slow),
            "medium" => Some(AnimationSpeed::Medium),
            "fast" => Some(AnimationSpeed::Fast),
            _ => None,
        }
    }
}

/// Marker class derived from a raw type name.
pub fn type_class(type_name: &str) -> String {
    format!("{type_name}-animation")
}

/// The in-memory record of the currently running animation. Holds the
/// literal class pair so even out-of-set inputs can be fully removed later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationDescriptor {
    pub type_class: String,
    pub speed_class: String,
}

/// Something that carries marker classes. The live page binds a
/// `web_sys::Element`; tests bind a plain set.
pub trait ClassSurface {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
}

#[cfg(target_arch = "wasm32")]
impl ClassSurface for web_sys::Element {
    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.class_list().remove_1(class);
    }
}

/// Owns the single animatable target and the live descriptor.
#[derive(Default)]
pub struct AnimationController<S: ClassSurface> {
    surface: Option<S>,
    current: Option<AnimationDescriptor>,
}

impl<S: ClassSurface> AnimationController<S> {
    pub fn new() -> Self {
        Self {
            surface: None,
            current: None,
        }
    }

    /// Associate the controller with its target. Rebinding stops any
    /// running animation first so markers never linger on the old target.
    pub fn bind(&mut self, surface: S) {
        self.stop();
        self.surface = Some(surface);
    }

    /// Start an animation, replacing whatever was running. Applies exactly
    /// two marker classes and records the descriptor.
    pub fn start(&mut self, type_name: &str, speed_name: &str) {
        self.stop();

        let Some(surface) = self.surface.as_ref() else {
            log::warn!("start ignored: no element bound");
            return;
        };

        let type_class = type_class(type_name);
        surface.add_class(&type_class);
        surface.add_class(speed_name);

        self.current = Some(AnimationDescriptor {
            type_class,
            speed_class: speed_name.to_string(),
        });
    }

    /// Remove every known marker class plus whatever the live descriptor
    /// recorded, and clear the descriptor. No-op when idle or unbound.
    pub fn stop(&mut self) {
        let descriptor = self.current.take();

        let Some(surface) = self.surface.as_ref() else {
            return;
        };

        for ty in AnimationType::ALL {
            surface.remove_class(ty.class_name());
        }
        for speed in AnimationSpeed::ALL {
            surface.remove_class(speed.as_str());
        }
        if let Some(desc) = descriptor {
            surface.remove_class(&desc.type_class);
            surface.remove_class(&desc.speed_class);
        }
    }

    /// The running animation, if any.
    pub fn current(&self) -> Option<&AnimationDescriptor> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct TestSurface {
        classes: Rc<RefCell<HashSet<String>>>,
    }

    impl TestSurface {
        fn snapshot(&self) -> HashSet<String> {
            self.classes.borrow().clone()
        }
    }

    impl ClassSurface for TestSurface {
        fn add_class(&self, class: &str) {
            self.classes.borrow_mut().insert(class.to_string());
        }

        fn remove_class(&self, class: &str) {
            self.classes.borrow_mut().remove(class);
        }
    }

    fn set_of(classes: &[&str]) -> HashSet<String> {
        classes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_start_applies_exact_pair() {
        let surface = TestSurface::default();
        let mut ctl = AnimationController::new();
        ctl.bind(surface.clone());

        ctl.start("bounce", "medium");
        assert_eq!(surface.snapshot(), set_of(&["bounce-animation", "medium"]));
        assert_eq!(
            ctl.current(),
            Some(&AnimationDescriptor {
                type_class: "bounce-animation".to_string(),
                speed_class: "medium".to_string(),
            })
        );
    }

    #[test]
    fn test_start_replaces_previous_run() {
        let surface = TestSurface::default();
        let mut ctl = AnimationController::new();
        ctl.bind(surface.clone());

        ctl.start("rotate", "fast");
        ctl.start("pulse", "slow");
        assert_eq!(surface.snapshot(), set_of(&["pulse-animation", "slow"]));
    }

    #[test]
    fn test_stop_clears_everything() {
        let surface = TestSurface::default();
        let mut ctl = AnimationController::new();
        ctl.bind(surface.clone());

        ctl.start("pulse", "fast");
        ctl.stop();
        assert!(surface.snapshot().is_empty());
        assert!(ctl.current().is_none());

        // Idle stop is a no-op
        ctl.stop();
        assert!(surface.snapshot().is_empty());
    }

    #[test]
    fn test_stop_before_bind_is_noop() {
        let mut ctl: AnimationController<TestSurface> = AnimationController::new();
        ctl.stop();
        assert!(ctl.current().is_none());
    }

    #[test]
    fn test_start_before_bind_is_ignored() {
        let mut ctl: AnimationController<TestSurface> = AnimationController::new();
        ctl.start("rotate", "fast");
        assert!(ctl.current().is_none());
    }

    #[test]
    fn test_unrecognized_values_applied_and_removed_literally() {
        let surface = TestSurface::default();
        let mut ctl = AnimationController::new();
        ctl.bind(surface.clone());

        ctl.start("wobble", "ludicrous");
        assert_eq!(
            surface.snapshot(),
            set_of(&["wobble-animation", "ludicrous"])
        );

        // The descriptor remembers the literal pair, so stop removes it
        ctl.stop();
        assert!(surface.snapshot().is_empty());
    }

    #[test]
    fn test_rebind_stops_animation_on_old_target() {
        let old = TestSurface::default();
        let new = TestSurface::default();
        let mut ctl = AnimationController::new();
        ctl.bind(old.clone());
        ctl.start("bounce", "slow");

        ctl.bind(new.clone());
        assert!(old.snapshot().is_empty());
        assert!(new.snapshot().is_empty());
        assert!(ctl.current().is_none());
    }

    #[test]
    fn test_arbitrary_sequence_never_accumulates() {
        let surface = TestSurface::default();
        let mut ctl = AnimationController::new();
        ctl.bind(surface.clone());

        let pairs = [
            ("rotate", "fast"),
            ("rotate", "slow"),
            ("bounce", "fast"),
            ("pulse", "medium"),
        ];
        for (ty, speed) in pairs {
            ctl.start(ty, speed);
            assert_eq!(
                surface.snapshot(),
                set_of(&[type_class(ty).as_str(), speed]),
                "after start({ty}, {speed})"
            );
        }
        ctl.stop();
        assert!(surface.snapshot().is_empty());
    }

    #[test]
    fn test_type_and_speed_parsing() {
        assert_eq!(AnimationType::from_str("Rotate"), Some(AnimationType::Rotate));
        assert_eq!(AnimationType::from_str("spin"), None);
        assert_eq!(AnimationSpeed::from_str("FAST"), Some(AnimationSpeed::Fast));
        assert_eq!(AnimationSpeed::from_str("warp"), None);
        assert_eq!(AnimationType::Pulse.class_name(), "pulse-animation");
    }
}
