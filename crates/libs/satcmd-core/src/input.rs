use crate::constants::FLAG_MAX;
use crate::error::CommandError;
use crate::threshold::Threshold;

/// Source of operator-supplied field values.
///
/// Implementations own the prompt and re-prompt loop: a returned integer is
/// always within the requested bounds. An `Err` means the provider cannot
/// produce a value at all (closed input, I/O failure).
pub trait InputProvider {
    /// Request an integer in `min..=max`.
    fn request_integer(&mut self, prompt: &str, min: u32, max: u32) -> Result<u32, CommandError>;

    /// Request a voltage threshold whose raw input is at least
    /// `lower_bound_millivolts`.
    fn request_threshold(
        &mut self,
        prompt: &str,
        lower_bound_millivolts: u32,
    ) -> Result<Threshold, CommandError>;

    /// Request a 32-bit timestamp.
    fn request_timestamp(&mut self, prompt: &str) -> Result<u32, CommandError>;

    /// Heading shown before a command's prompts.
    fn announce(&mut self, _heading: &str) {}

    /// Request a 0/1 answer.
    fn request_flag(&mut self, prompt: &str) -> Result<bool, CommandError> {
        Ok(self.request_integer(prompt, 0, FLAG_MAX)? == FLAG_MAX)
    }
}
