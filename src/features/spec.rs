use serde::{Deserialize, Serialize};

/// Every purchasable in-stage boost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    SpeedBoost,
    StaminaBoost,
    StrengthBoost,
    DalgonaChangeShape,
    DalgonaAddTime,
    DalgonaErrorMargin,
    TugOfWarPowerBoost,
    TugOfWarPowerLock,
    TugOfWarDecayResist,
    MarblesRemoveOption,
    MarblesAddTime,
    GlassBridgeRemoveWrong,
    GlassBridgeAddTime,
    SquidStrengthBoost,
    SquidStaminaBoost,
}

impl FeatureKind {
    /// Stage index this feature belongs to, or `None` for general boosts.
    #[must_use]
    pub const fn stage(self) -> Option<usize> {
        match self {
            FeatureKind::SpeedBoost | FeatureKind::StaminaBoost | FeatureKind::StrengthBoost => {
                None
            }
            FeatureKind::DalgonaChangeShape
            | FeatureKind::DalgonaAddTime
            | FeatureKind::DalgonaErrorMargin => Some(1),
            FeatureKind::TugOfWarPowerBoost
            | FeatureKind::TugOfWarPowerLock
            | FeatureKind::TugOfWarDecayResist => Some(2),
            FeatureKind::MarblesRemoveOption | FeatureKind::MarblesAddTime => Some(3),
            FeatureKind::GlassBridgeRemoveWrong | FeatureKind::GlassBridgeAddTime => Some(4),
            FeatureKind::SquidStrengthBoost | FeatureKind::SquidStaminaBoost => Some(5),
        }
    }
}

/// A purchasable feature as the shop defines it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub kind: FeatureKind,
    pub name: String,
    /// Effect strength (multiplier, extra seconds, ...), interpreted by the stage.
    pub value: f32,
    /// Coins per activation.
    pub cost: i64,
    /// Seconds the effect lasts.
    pub duration: f32,
    /// Seconds before it can be bought again.
    pub cooldown: f32,
}

impl FeatureSpec {
    /// Feature with the default economy: 50 coins, 10s effect, 20s cooldown.
    pub fn new(kind: FeatureKind, name: impl Into<String>, value: f32) -> Self {
        Self {
            kind,
            name: name.into(),
            value,
            cost: 50,
            duration: 10.0,
            cooldown: 20.0,
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: i64) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, cooldown: f32) -> Self {
        self.cooldown = cooldown;
        self
    }
}
