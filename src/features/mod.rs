//! In-stage purchasable features.
//!
//! A feature costs coins, fires [`RunEvent::FeatureActivated`] for the
//! stage to apply, and then cools down. Purchase goes through
//! [`RunController::activate_feature`]; [`FeatureSlot`] tracks one shop
//! button's hold gate and cooldown.
//!
//! [`RunEvent::FeatureActivated`]: crate::events::RunEvent::FeatureActivated
//! [`RunController::activate_feature`]: crate::run::RunController::activate_feature

mod spec;
mod timer;

pub use spec::{FeatureKind, FeatureSpec};
pub use timer::{Cooldown, HoldGate, Release};

/// One feature button: what it sells plus its timers.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureSlot {
    pub spec: FeatureSpec,
    pub hold: HoldGate,
    pub cooldown: Cooldown,
}

impl FeatureSlot {
    #[must_use]
    pub fn new(spec: FeatureSpec) -> Self {
        let cooldown = Cooldown::new(spec.cooldown);
        Self {
            spec,
            hold: HoldGate::default(),
            cooldown,
        }
    }

    /// Pointer down. Ignored while cooling down.
    pub fn press(&mut self) {
        if self.cooldown.ready() {
            self.hold.press();
        }
    }

    /// Advance both timers. Returns true when a hold completes and the
    /// purchase should be attempted.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.cooldown.tick(dt);
        self.hold.tick(dt)
    }

    /// Call after a successful purchase.
    pub fn activated(&mut self) {
        self.cooldown.start();
    }

    /// Clear all timers (stage respawn).
    pub fn reset(&mut self) {
        self.hold.release();
        self.cooldown.reset();
    }
}
