/// Errors from command generation.
///
/// Field validation normally happens at the input boundary, so the
/// validation variants only fire when a caller hands an encoder values that
/// bypassed the provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CommandError {
    #[error("unknown command index {index} (registry has {count} commands)")]
    UnknownCommand { index: usize, count: usize },

    #[error("unknown command: {0}")]
    UnknownCommandName(String),

    #[error("{field} out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("invalid resolution: {0} (expected 1 or a power of two in 8..=1024)")]
    InvalidResolution(u32),

    #[error("maximum threshold {max} is below minimum threshold {min}")]
    ThresholdOrder { min: u16, max: u16 },

    #[error("no more input for prompt: {prompt}")]
    InputExhausted { prompt: String },

    #[error("input error on prompt {prompt}: {message}")]
    Input { prompt: String, message: String },
}

impl CommandError {
    /// Returns `true` when the failure came from the input provider rather
    /// than from field validation.
    pub fn is_input_failure(&self) -> bool {
        matches!(self, Self::InputExhausted { .. } | Self::Input { .. })
    }

    pub fn out_of_range(field: &'static str, value: u32, min: u32, max: u32) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }
}
