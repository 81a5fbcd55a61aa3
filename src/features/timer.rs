//! Timers driven by an external tick.
//!
//! The core never sleeps. The host calls `tick(dt)` from its frame loop and
//! reads the state back.

/// Counts down from a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cooldown {
    duration: f32,
    remaining: f32,
}

impl Cooldown {
    /// A ready (not running) cooldown of `duration` seconds.
    #[must_use]
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            remaining: 0.0,
        }
    }

    /// Begin counting down from the full duration.
    pub fn start(&mut self) {
        self.remaining = self.duration;
    }

    /// Advance by `dt` seconds. Returns true on the tick that finishes it.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        self.remaining == 0.0
    }

    #[must_use]
    pub fn ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Fraction still to wait, 1.0 right after `start`, 0.0 when ready.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            0.0
        } else {
            self.remaining / self.duration
        }
    }

    /// Stop immediately (stage respawn).
    pub fn reset(&mut self) {
        self.remaining = 0.0;
    }
}

/// Press-and-hold gate: fires once the pointer has been held long enough.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoldGate {
    hold_duration: f32,
    held: Option<f32>,
}

/// What releasing a [`HoldGate`] means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// Nothing was being held.
    Idle,
    /// Let go too early; the host shows its "keep holding" hint.
    TooEarly,
}

impl HoldGate {
    /// Default gate: 1.5 seconds.
    #[must_use]
    pub fn new(hold_duration: f32) -> Self {
        Self {
            hold_duration,
            held: None,
        }
    }

    pub fn press(&mut self) {
        self.held = Some(0.0);
    }

    /// Advance the hold. Returns true once, when the hold completes.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(held) = self.held.as_mut() else {
            return false;
        };
        *held += dt;
        if *held >= self.hold_duration {
            self.held = None;
            return true;
        }
        false
    }

    /// Pointer up or left the button.
    pub fn release(&mut self) -> Release {
        match self.held.take() {
            Some(_) => Release::TooEarly,
            None => Release::Idle,
        }
    }

    #[must_use]
    pub fn is_held(&self) -> bool {
        self.held.is_some()
    }
}

impl Default for HoldGate {
    fn default() -> Self {
        Self::new(1.5)
    }
}
