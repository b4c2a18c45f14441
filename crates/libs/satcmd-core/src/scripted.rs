use std::collections::VecDeque;

use crate::constants::DEFAULT_REFERENCE_MILLIVOLTS;
use crate::error::CommandError;
use crate::input::InputProvider;
use crate::threshold::Threshold;

/// An [`InputProvider`] that answers from a fixed queue of values.
///
/// Answers outside the requested bounds are discarded and counted as a
/// re-prompt, the same way an interactive provider would reject them.
/// Thresholds consume one queued value as millivolts.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    answers: VecDeque<u32>,
    reference_millivolts: u32,
    prompts: Vec<String>,
    headings: Vec<String>,
    reprompts: usize,
}

impl ScriptedInput {
    pub fn new(answers: impl IntoIterator<Item = u32>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            reference_millivolts: DEFAULT_REFERENCE_MILLIVOLTS,
            prompts: Vec::new(),
            headings: Vec::new(),
            reprompts: 0,
        }
    }

    pub fn with_reference_millivolts(mut self, reference_millivolts: u32) -> Self {
        self.reference_millivolts = reference_millivolts;
        self
    }

    /// Every prompt served, in order, including re-prompts.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn headings(&self) -> &[String] {
        &self.headings
    }

    /// Number of answers rejected by bounds checks.
    pub fn reprompts(&self) -> usize {
        self.reprompts
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_within(&mut self, prompt: &str, min: u32, max: u32) -> Result<u32, CommandError> {
        loop {
            self.prompts.push(prompt.to_string());
            let value = self
                .answers
                .pop_front()
                .ok_or_else(|| CommandError::InputExhausted {
                    prompt: prompt.to_string(),
                })?;
            if (min..=max).contains(&value) {
                return Ok(value);
            }
            self.reprompts += 1;
        }
    }
}

impl InputProvider for ScriptedInput {
    fn request_integer(&mut self, prompt: &str, min: u32, max: u32) -> Result<u32, CommandError> {
        self.next_within(prompt, min, max)
    }

    fn request_threshold(
        &mut self,
        prompt: &str,
        lower_bound_millivolts: u32,
    ) -> Result<Threshold, CommandError> {
        let raw = self.next_within(prompt, lower_bound_millivolts, self.reference_millivolts)?;
        Ok(Threshold::from_millivolts(raw, self.reference_millivolts))
    }

    fn request_timestamp(&mut self, prompt: &str) -> Result<u32, CommandError> {
        self.next_within(prompt, 0, u32::MAX)
    }

    fn announce(&mut self, heading: &str) {
        self.headings.push(heading.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_out_of_range_answers() {
        let mut input = ScriptedInput::new([9, 70, 5]);
        assert_eq!(input.request_integer("reps", 0, 63), Ok(9));
        assert_eq!(input.request_integer("reps", 0, 63), Ok(5));
        assert_eq!(input.reprompts(), 1);
        assert_eq!(input.prompts().len(), 3);
    }

    #[test]
    fn exhausted_queue_is_an_input_failure() {
        let mut input = ScriptedInput::new([]);
        let err = input.request_timestamp("ts").unwrap_err();
        assert!(err.is_input_failure());
    }

    #[test]
    fn threshold_respects_lower_bound() {
        let mut input = ScriptedInput::new([100, 2000]).with_reference_millivolts(4095);
        let threshold = input.request_threshold("max", 500).unwrap();
        assert_eq!(threshold.raw_millivolts, 2000);
        assert_eq!(threshold.value, 2000);
        assert_eq!(input.reprompts(), 1);
    }
}
