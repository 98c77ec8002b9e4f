/// Page transition as reported by `pagehide` / `pageshow`. `persisted` is set
/// when the page enters or leaves the back/forward cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageTransition {
    Hide { persisted: bool },
    Show { persisted: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Leave the runtime as it is.
    Keep,
    /// Drop the runtime: listeners, pending frame and autoplay timer.
    Teardown,
    /// Mount a fresh runtime.
    Mount,
}

/// A cached page keeps its runtime so it is live again on Back. Only a real
/// unload tears down, and a restored page without a runtime mounts again.
pub fn lifecycle_action(transition: PageTransition, mounted: bool) -> LifecycleAction {
    match transition {
        PageTransition::Hide { persisted: false } if mounted => LifecycleAction::Teardown,
        PageTransition::Show { persisted: true } if !mounted => LifecycleAction::Mount,
        _ => LifecycleAction::Keep,
    }
}
