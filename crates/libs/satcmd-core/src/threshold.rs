//! Voltage thresholds for Set Scale.
//!
//! The operator enters a voltage in millivolts; the instrument wants a
//! 12-bit code relative to its reference voltage. The raw millivolt value
//! of the minimum threshold is the lower bound for the maximum threshold,
//! so the two codes can never cross.

use serde::Serialize;

use crate::constants::THRESHOLD_MAX;

/// A threshold as entered and as encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Threshold {
    /// Operator input in millivolts, before the transform.
    pub raw_millivolts: u32,
    /// 12-bit code written into the packet.
    pub value: u16,
}

impl Threshold {
    pub fn from_millivolts(raw_millivolts: u32, reference_millivolts: u32) -> Self {
        Self {
            raw_millivolts,
            value: threshold_value(raw_millivolts, reference_millivolts),
        }
    }
}

/// Maps millivolts onto `0..=THRESHOLD_MAX`, rounding to nearest.
///
/// Inputs above the reference saturate at full scale, as does a zero
/// reference.
pub fn threshold_value(raw_millivolts: u32, reference_millivolts: u32) -> u16 {
    if reference_millivolts == 0 || raw_millivolts >= reference_millivolts {
        return THRESHOLD_MAX;
    }
    let full_scale = u64::from(THRESHOLD_MAX);
    let reference = u64::from(reference_millivolts);
    let scaled = (u64::from(raw_millivolts) * full_scale + reference / 2) / reference;
    u16::try_from(scaled.min(full_scale)).unwrap_or(THRESHOLD_MAX)
}
