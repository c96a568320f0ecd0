//! Bounty classes and their claim-window polarity.

use serde::{Deserialize, Serialize};

/// On-chain bounty class, as reported by the ledger contract.
///
/// Wire codes follow the contract's numeric encoding (0..=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BountyType {
    Single,
    Ongoing,
    Tiered,
    Competition,
}

/// When a bounty class accepts claims relative to its open flag.
///
/// Single/Ongoing bounties pay out while open. Tiered/Competition
/// bounties pay out only after the competition has been closed. Kept as
/// an explicit table so adding a class forces a polarity decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimWindow {
    WhileOpen,
    AfterClose,
}

impl BountyType {
    /// Decode the ledger's numeric class code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Single),
            1 => Some(Self::Ongoing),
            2 => Some(Self::Tiered),
            3 => Some(Self::Competition),
            _ => None,
        }
    }

    /// The ledger's numeric class code.
    pub fn code(self) -> u8 {
        match self {
            Self::Single => 0,
            Self::Ongoing => 1,
            Self::Tiered => 2,
            Self::Competition => 3,
        }
    }

    pub fn claim_window(self) -> ClaimWindow {
        match self {
            Self::Single | Self::Ongoing => ClaimWindow::WhileOpen,
            Self::Tiered | Self::Competition => ClaimWindow::AfterClose,
        }
    }

    /// Whether a claim is valid given the ledger's current open flag.
    pub fn claimable(self, is_open: bool) -> bool {
        match self.claim_window() {
            ClaimWindow::WhileOpen => is_open,
            ClaimWindow::AfterClose => !is_open,
        }
    }

    /// Five-field closer payloads carry the claim tier; four-field
    /// payloads omit it.
    pub fn payload_carries_tier(self) -> bool {
        matches!(self, Self::Tiered | Self::Competition)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Ongoing => "ongoing",
            Self::Tiered => "tiered",
            Self::Competition => "competition",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for code in 0u8..=3 {
            let ty = BountyType::from_code(code).unwrap();
            assert_eq!(ty.code(), code);
        }
        assert!(BountyType::from_code(4).is_none());
    }

    #[test]
    fn polarity_table() {
        assert!(BountyType::Single.claimable(true));
        assert!(!BountyType::Single.claimable(false));
        assert!(BountyType::Ongoing.claimable(true));
        assert!(!BountyType::Ongoing.claimable(false));

        assert!(BountyType::Tiered.claimable(false));
        assert!(!BountyType::Tiered.claimable(true));
        assert!(BountyType::Competition.claimable(false));
        assert!(!BountyType::Competition.claimable(true));
    }

    #[test]
    fn tier_arity_follows_class() {
        assert!(!BountyType::Single.payload_carries_tier());
        assert!(!BountyType::Ongoing.payload_carries_tier());
        assert!(BountyType::Tiered.payload_carries_tier());
        assert!(BountyType::Competition.payload_carries_tier());
    }
}
