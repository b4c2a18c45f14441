use crate::constants::RESOLUTIONS;
use crate::error::CommandError;

/// Returns `true` for the channel counts the instrument supports: 1, or a
/// power of two from 8 through 1024.
pub fn is_valid_resolution(value: u32) -> bool {
    RESOLUTIONS.contains(&value)
}

/// Resolution as carried on the wire: 0 for a single channel, otherwise
/// the channel count divided by 8.
pub fn resolution_code(resolution: u16) -> u8 {
    if resolution == 1 {
        0
    } else {
        u8::try_from(resolution / 8).unwrap_or(u8::MAX)
    }
}

pub fn check_range(
    field: &'static str,
    value: u32,
    min: u32,
    max: u32,
) -> Result<(), CommandError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CommandError::out_of_range(field, value, min, max))
    }
}

/// Narrows a provider value that has already been range-checked.
pub(crate) fn narrow<T: TryFrom<u32>>(
    field: &'static str,
    value: u32,
    max: u32,
) -> Result<T, CommandError> {
    T::try_from(value).map_err(|_| CommandError::out_of_range(field, value, 0, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_the_supported_resolutions() {
        let accepted: Vec<u32> = (0..=2048).filter(|v| is_valid_resolution(*v)).collect();
        assert_eq!(accepted, RESOLUTIONS);
    }

    #[test]
    fn rejects_near_misses() {
        for value in [0, 2, 4, 7, 9, 24, 1023, 2048] {
            assert!(!is_valid_resolution(value), "{value} should be rejected");
        }
    }

    #[test]
    fn resolution_codes() {
        assert_eq!(resolution_code(1), 0);
        assert_eq!(resolution_code(8), 1);
        assert_eq!(resolution_code(64), 8);
        assert_eq!(resolution_code(1024), 128);
    }

    #[test]
    fn range_check_reports_bounds() {
        assert!(check_range("repetitions", 63, 0, 63).is_ok());
        assert_eq!(
            check_range("repetitions", 64, 0, 63),
            Err(CommandError::OutOfRange {
                field: "repetitions",
                value: 64,
                min: 0,
                max: 63
            })
        );
    }
}
