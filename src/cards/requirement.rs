//! Play requirements.
//!
//! A card declares an ordered list of `(PlayReq, parameter)` pairs. Some are
//! checked when deciding whether the card can be played at all; the targeting
//! ones are evaluated per candidate when computing legal targets. Codes that
//! the engine does not know arrive as [`PlayReq::Other`] and are rejected as
//! an error rather than assumed satisfied.

use serde::{Deserialize, Serialize};

/// Named predicate a card declares for legal play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayReq {
    // Targeting
    /// A target must be chosen.
    TargetToPlay,
    /// A target must be chosen if any valid target exists.
    TargetIfAvailable,
    MinionTarget,
    FriendlyTarget,
    EnemyTarget,
    DamagedTarget,
    UndamagedTarget,
    FrozenTarget,
    /// Target attack at most the parameter.
    TargetMaxAttack,
    /// Target attack at least the parameter.
    TargetMinAttack,
    NonSelfTarget,
    MustTargetTaunter,
    TargetWithDeathrattle,

    // Board state
    /// The friendly board must have a free slot.
    NumMinionSlots,
    /// At least one entourage card is missing from the friendly board.
    EntireEntourageNotInPlay,
    WeaponEquipped,
    /// The enemy board holds at least the parameter's minions.
    MinimumEnemyMinions,
    /// Both boards together hold at least the parameter's minions.
    MinimumTotalMinions,
    /// A friendly minion has died earlier this game.
    FriendlyMinionDiedThisGame,
    /// The controller's hero power is the card whose raw id is the parameter.
    RequiresHeroPower,

    /// Any code the engine has no rule for.
    Other(u32),
}

impl PlayReq {
    /// Requirements evaluated per target candidate rather than per card.
    #[must_use]
    pub const fn is_targeting(self) -> bool {
        matches!(
            self,
            PlayReq::TargetToPlay
                | PlayReq::TargetIfAvailable
                | PlayReq::MinionTarget
                | PlayReq::FriendlyTarget
                | PlayReq::EnemyTarget
                | PlayReq::DamagedTarget
                | PlayReq::UndamagedTarget
                | PlayReq::FrozenTarget
                | PlayReq::TargetMaxAttack
                | PlayReq::TargetMinAttack
                | PlayReq::NonSelfTarget
                | PlayReq::MustTargetTaunter
                | PlayReq::TargetWithDeathrattle
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targeting_classification() {
        assert!(PlayReq::TargetToPlay.is_targeting());
        assert!(PlayReq::MustTargetTaunter.is_targeting());
        assert!(!PlayReq::NumMinionSlots.is_targeting());
        assert!(!PlayReq::Other(77).is_targeting());
    }
}
