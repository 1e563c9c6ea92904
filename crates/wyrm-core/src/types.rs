use serde::{Deserialize, Serialize};

use crate::error::ChainError;

// ---------------------------------------------------------------------------
// FollowMode
// ---------------------------------------------------------------------------

/// How a chain tracks its head from tick to tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowMode {
    /// Length-preserving relaxation with tip damping and obstacle avoidance.
    #[default]
    Relaxed,
    /// Straight line behind the head along `-forward`, re-laid every tick.
    Rigid,
}

// ---------------------------------------------------------------------------
// AngleConvention
// ---------------------------------------------------------------------------

/// Which solved angles a skeleton binding writes to its bones.
///
/// Bone `i` (1-indexed) corresponds to link `i - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleConvention {
    /// Each bone takes its link's world yaw/pitch. For flat skeletons.
    Absolute,
    /// Each bone takes the delta against the previous link; bone 1 is zero.
    Relative,
    /// Bone 1 takes link 0's absolute pitch with zero yaw (the owner's
    /// facing already yaws the head), later bones take relative deltas.
    #[default]
    Hierarchical,
}

// ---------------------------------------------------------------------------
// Rest lengths
// ---------------------------------------------------------------------------

/// Check a rest-length table before any chain is built from it.
///
/// # Errors
///
/// [`ChainError::Empty`] for an empty table, [`ChainError::InvalidRestLength`]
/// for the first entry that is non-finite or not strictly positive.
pub fn validate_rest_lengths(lengths: &[f64]) -> Result<(), ChainError> {
    if lengths.is_empty() {
        return Err(ChainError::Empty);
    }
    for (index, &value) in lengths.iter().enumerate() {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChainError::InvalidRestLength { index, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(FollowMode::default(), FollowMode::Relaxed);
        assert_eq!(AngleConvention::default(), AngleConvention::Hierarchical);
    }

    #[test]
    fn rest_lengths_ok() {
        assert!(validate_rest_lengths(&[1.0, 0.5, 2.25]).is_ok());
    }

    #[test]
    fn rest_lengths_empty() {
        assert_eq!(validate_rest_lengths(&[]), Err(ChainError::Empty));
    }

    #[test]
    fn rest_lengths_reports_first_bad_index() {
        let err = validate_rest_lengths(&[1.0, 0.0, -1.0]).unwrap_err();
        assert_eq!(
            err,
            ChainError::InvalidRestLength {
                index: 1,
                value: 0.0
            }
        );
    }

    #[test]
    fn rest_lengths_reject_non_finite() {
        assert!(validate_rest_lengths(&[f64::NAN]).is_err());
        assert!(validate_rest_lengths(&[1.0, f64::INFINITY]).is_err());
    }
}
