//! Static upgrade catalog and the effect interpreter.
//!
//! Effects are plain data. Each variant is either additive, multiplicative or
//! a flag, so applying a set of effects gives the same [`Modifiers`] in any
//! order. Load relies on this when it replays bought upgrades.

use std::fmt;

use super::state::Modifiers;

/// One-shot change an upgrade makes to the modifier record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    AddPerClick(u32),
    MultiplySharpenerPower(f64),
    MultiplyWorkerBoost(f64),
    MultiplyDemand(f64),
    MultiplyPrice(f64),
    /// Multiplies the worker cost multiplier (0.5 = workers twice as cheap).
    DiscountWorkerCost(f64),
    EnableAutomation,
    AddFlatPerSec(f64),
    AddCreativityRate(f64),
    MultiplyReputationBoost(f64),
    EnableRobotFactory,
}

impl Effect {
    /// Stable name used in log messages.
    pub fn tag(&self) -> &'static str {
        match self {
            Effect::AddPerClick(_) => "add_per_click",
            Effect::MultiplySharpenerPower(_) => "multiply_sharpener_power",
            Effect::MultiplyWorkerBoost(_) => "multiply_worker_boost",
            Effect::MultiplyDemand(_) => "multiply_demand",
            Effect::MultiplyPrice(_) => "multiply_price",
            Effect::DiscountWorkerCost(_) => "discount_worker_cost",
            Effect::EnableAutomation => "enable_automation",
            Effect::AddFlatPerSec(_) => "add_flat_per_sec",
            Effect::AddCreativityRate(_) => "add_creativity_rate",
            Effect::MultiplyReputationBoost(_) => "multiply_reputation_boost",
            Effect::EnableRobotFactory => "enable_robot_factory",
        }
    }
}

/// Static definition of a purchasable upgrade.
#[derive(Debug, PartialEq)]
pub struct UpgradeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub cost: f64,
    /// Lifetime pencils needed before the upgrade can be bought.
    pub unlocked_at: f64,
    pub effects: &'static [Effect],
}

/// Error raised when an effect cannot be applied.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectError {
    /// The effect's parameter would corrupt the modifier record
    /// (non-finite, or a non-positive multiplier, or a negative amount).
    InvalidParameter { effect: &'static str, value: f64 },
}

impl fmt::Display for EffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectError::InvalidParameter { effect, value } => {
                write!(f, "invalid parameter {} for effect {}", value, effect)
            }
        }
    }
}

impl std::error::Error for EffectError {}

fn multiplier(effect: &Effect, value: f64) -> Result<f64, EffectError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EffectError::InvalidParameter {
            effect: effect.tag(),
            value,
        })
    }
}

fn amount(effect: &Effect, value: f64) -> Result<f64, EffectError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EffectError::InvalidParameter {
            effect: effect.tag(),
            value,
        })
    }
}

/// Apply a single effect. On error the modifiers are left untouched.
pub fn apply_effect(m: &mut Modifiers, effect: &Effect) -> Result<(), EffectError> {
    match *effect {
        Effect::AddPerClick(n) => m.per_click_bonus = m.per_click_bonus.saturating_add(n),
        Effect::MultiplySharpenerPower(x) => m.sharpener_power *= multiplier(effect, x)?,
        Effect::MultiplyWorkerBoost(x) => m.worker_boost *= multiplier(effect, x)?,
        Effect::MultiplyDemand(x) => m.demand *= multiplier(effect, x)?,
        Effect::MultiplyPrice(x) => m.price_multiplier *= multiplier(effect, x)?,
        Effect::DiscountWorkerCost(x) => m.worker_cost_multiplier *= multiplier(effect, x)?,
        Effect::EnableAutomation => m.automation = true,
        Effect::AddFlatPerSec(x) => m.flat_per_sec += amount(effect, x)?,
        Effect::AddCreativityRate(x) => m.creativity_rate += amount(effect, x)?,
        Effect::MultiplyReputationBoost(x) => m.reputation_boost *= multiplier(effect, x)?,
        Effect::EnableRobotFactory => m.robot_factory = true,
    }
    Ok(())
}

/// Apply every effect of an upgrade. A failing effect does not stop the
/// remaining ones; the first error is returned.
pub fn apply_upgrade(m: &mut Modifiers, def: &UpgradeDef) -> Result<(), EffectError> {
    let mut first_err = None;
    for effect in def.effects {
        if let Err(e) = apply_effect(m, effect) {
            first_err.get_or_insert(e);
        }
    }
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

pub static CATALOG: [UpgradeDef; 13] = [
    UpgradeDef {
        id: "better-wood",
        name: "Better Wood",
        description: "+1 Pencil per click",
        cost: 50.0,
        unlocked_at: 25.0,
        effects: &[Effect::AddPerClick(1)],
    },
    UpgradeDef {
        id: "sharper-leads",
        name: "Sharper Leads",
        description: "Auto-sharpeners 2x effective",
        cost: 200.0,
        unlocked_at: 100.0,
        effects: &[Effect::MultiplySharpenerPower(2.0)],
    },
    UpgradeDef {
        id: "mass-production",
        name: "Mass Production",
        description: "Workers produce +50% pencils",
        cost: 1_000.0,
        unlocked_at: 500.0,
        effects: &[Effect::MultiplyWorkerBoost(1.5)],
    },
    UpgradeDef {
        id: "eco-brand",
        name: "Eco Brand",
        description: "Demand +20%",
        cost: 2_500.0,
        unlocked_at: 2_000.0,
        effects: &[Effect::MultiplyDemand(1.2)],
    },
    UpgradeDef {
        id: "marketing-hub",
        name: "Marketing Hub",
        description: "Sell price +10%",
        cost: 10_000.0,
        unlocked_at: 7_000.0,
        effects: &[Effect::MultiplyPrice(1.1)],
    },
    UpgradeDef {
        id: "factory-line",
        name: "Factory Line",
        description: "Workers twice as cheap",
        cost: 50_000.0,
        unlocked_at: 25_000.0,
        effects: &[Effect::DiscountWorkerCost(0.5)],
    },
    UpgradeDef {
        id: "automation-suite",
        name: "Automation Suite",
        description: "Sharpeners produce while offline",
        cost: 200_000.0,
        unlocked_at: 100_000.0,
        effects: &[Effect::EnableAutomation],
    },
    UpgradeDef {
        id: "global-distribution",
        name: "Global Distribution",
        description: "Demand +200%",
        cost: 1_000_000.0,
        unlocked_at: 500_000.0,
        effects: &[Effect::MultiplyDemand(3.0)],
    },
    UpgradeDef {
        id: "design-studio",
        name: "Design Studio",
        description: "Gain Creativity per second",
        cost: 5_000.0,
        unlocked_at: 1_500.0,
        effects: &[Effect::AddCreativityRate(1.0)],
    },
    UpgradeDef {
        id: "reputation-campaign",
        name: "Reputation Campaign",
        description: "Reputation boosts price slightly",
        cost: 25_000.0,
        unlocked_at: 8_000.0,
        effects: &[Effect::MultiplyReputationBoost(1.05)],
    },
    UpgradeDef {
        id: "pencil-collective",
        name: "Pencil Collective",
        description: "Workers produce +100%",
        cost: 120_000.0,
        unlocked_at: 50_000.0,
        effects: &[Effect::MultiplyWorkerBoost(2.0)],
    },
    UpgradeDef {
        id: "luxury-graphite",
        name: "Luxury Graphite",
        description: "Price +50% for premium pencils",
        cost: 500_000.0,
        unlocked_at: 200_000.0,
        effects: &[Effect::MultiplyPrice(1.5)],
    },
    UpgradeDef {
        id: "robot-factory",
        name: "Robot Factory",
        description: "Automates most production",
        cost: 2_000_000.0,
        unlocked_at: 1_000_000.0,
        effects: &[Effect::EnableRobotFactory, Effect::AddFlatPerSec(500.0)],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn catalog_unlocks_below_cost() {
        for def in &CATALOG {
            assert!(def.unlocked_at <= def.cost, "{} unlocks after its cost", def.id);
            assert!(!def.effects.is_empty(), "{} has no effect", def.id);
        }
    }

    #[test]
    fn additive_effects_accumulate() {
        let mut m = Modifiers::default();
        apply_effect(&mut m, &Effect::AddPerClick(1)).unwrap();
        apply_effect(&mut m, &Effect::AddPerClick(2)).unwrap();
        apply_effect(&mut m, &Effect::AddCreativityRate(1.0)).unwrap();
        apply_effect(&mut m, &Effect::AddFlatPerSec(500.0)).unwrap();
        assert_eq!(m.per_click_bonus, 3);
        assert!((m.creativity_rate - 1.0).abs() < 1e-9);
        assert!((m.flat_per_sec - 500.0).abs() < 1e-9);
    }

    #[test]
    fn multiplicative_effects_compound() {
        let mut m = Modifiers::default();
        apply_effect(&mut m, &Effect::MultiplyWorkerBoost(1.5)).unwrap();
        apply_effect(&mut m, &Effect::MultiplyWorkerBoost(2.0)).unwrap();
        apply_effect(&mut m, &Effect::DiscountWorkerCost(0.5)).unwrap();
        assert!((m.worker_boost - 3.0).abs() < 1e-9);
        assert!((m.worker_cost_multiplier - 0.5).abs() < 1e-9);
    }

    #[test]
    fn flags_are_idempotent() {
        let mut m = Modifiers::default();
        apply_effect(&mut m, &Effect::EnableAutomation).unwrap();
        apply_effect(&mut m, &Effect::EnableAutomation).unwrap();
        apply_effect(&mut m, &Effect::EnableRobotFactory).unwrap();
        assert!(m.automation);
        assert!(m.robot_factory);
    }

    #[test]
    fn invalid_multiplier_leaves_modifiers_untouched() {
        let mut m = Modifiers::default();
        let err = apply_effect(&mut m, &Effect::MultiplyDemand(0.0)).unwrap_err();
        assert_eq!(
            err,
            EffectError::InvalidParameter {
                effect: "multiply_demand",
                value: 0.0
            }
        );
        assert!(apply_effect(&mut m, &Effect::AddFlatPerSec(f64::NAN)).is_err());
        assert!(apply_effect(&mut m, &Effect::AddCreativityRate(-1.0)).is_err());
        assert_eq!(m, Modifiers::default());
    }

    #[test]
    fn apply_upgrade_continues_past_a_broken_effect() {
        static PARTIAL: UpgradeDef = UpgradeDef {
            id: "partial",
            name: "Partial",
            description: "",
            cost: 1.0,
            unlocked_at: 0.0,
            effects: &[
                Effect::MultiplySharpenerPower(-2.0),
                Effect::EnableAutomation,
            ],
        };
        let mut m = Modifiers::default();
        assert!(apply_upgrade(&mut m, &PARTIAL).is_err());
        assert!(m.automation);
        assert!((m.sharpener_power - 1.0).abs() < 1e-9);
    }

    #[test]
    fn effect_order_does_not_matter() {
        let effects: Vec<&Effect> = CATALOG.iter().flat_map(|d| d.effects.iter()).collect();
        let mut forward = Modifiers::default();
        for e in &effects {
            apply_effect(&mut forward, e).unwrap();
        }
        let mut backward = Modifiers::default();
        for e in effects.iter().rev() {
            apply_effect(&mut backward, e).unwrap();
        }
        assert_eq!(forward.per_click_bonus, backward.per_click_bonus);
        assert!((forward.worker_boost - backward.worker_boost).abs() < 1e-9);
        assert!((forward.demand - backward.demand).abs() < 1e-9);
        assert!((forward.price_multiplier - backward.price_multiplier).abs() < 1e-9);
        assert!((forward.reputation_boost - backward.reputation_boost).abs() < 1e-9);
        assert!((forward.flat_per_sec - backward.flat_per_sec).abs() < 1e-9);
        assert_eq!(forward.automation, backward.automation);
        assert_eq!(forward.robot_factory, backward.robot_factory);
    }
}
