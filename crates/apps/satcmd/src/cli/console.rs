//! Interactive [`InputProvider`] over a line-oriented reader and writer.
//!
//! Prompts, rejections and menus go to the writer (stderr in the binary) so
//! stdout carries only the generated packet.

use std::io::{BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use satcmd_core::{CommandError, InputProvider, Threshold};

pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
    reference_millivolts: u32,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W, reference_millivolts: u32) -> Self {
        Self {
            reader,
            writer,
            reference_millivolts,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write a line that is not a prompt (menus, headings).
    pub fn show(&mut self, text: &str) -> Result<(), CommandError> {
        writeln!(self.writer, "{text}").map_err(|err| io_error(text, &err))
    }

    /// Read one line. The inner `Err` is a line that is not UTF-8, which the
    /// caller re-prompts like any other unparseable answer.
    fn read_answer(&mut self, prompt: &str) -> Result<Result<String, String>, CommandError> {
        write!(self.writer, "{prompt} ").map_err(|err| io_error(prompt, &err))?;
        self.writer.flush().map_err(|err| io_error(prompt, &err))?;

        let mut line = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut line)
            .map_err(|err| io_error(prompt, &err))?;
        if read == 0 {
            return Err(CommandError::InputExhausted {
                prompt: prompt.to_string(),
            });
        }
        Ok(String::from_utf8(line)
            .map(|text| text.trim().to_string())
            .map_err(|_| "not a number: input is not valid UTF-8".to_string()))
    }

    fn ask<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> Result<T, CommandError> {
        loop {
            let parsed = self
                .read_answer(prompt)?
                .and_then(|answer| parse(&answer));
            match parsed {
                Ok(value) => return Ok(value),
                Err(reason) => {
                    log::debug!("console: rejected answer for {prompt:?}: {reason}");
                    self.show(&format!("  {reason}, try again"))?;
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> InputProvider for ConsoleInput<R, W> {
    fn request_integer(&mut self, prompt: &str, min: u32, max: u32) -> Result<u32, CommandError> {
        self.ask(prompt, |text| parse_bounded(text, min, max))
    }

    fn request_threshold(
        &mut self,
        prompt: &str,
        lower_bound_millivolts: u32,
    ) -> Result<Threshold, CommandError> {
        let reference = self.reference_millivolts;
        let lower = lower_bound_millivolts.min(reference);
        let prompt = format!("{prompt} [{lower}-{reference} mV]:");
        let raw = self.ask(&prompt, |text| parse_bounded(text, lower, reference))?;
        Ok(Threshold::from_millivolts(raw, reference))
    }

    fn request_timestamp(&mut self, prompt: &str) -> Result<u32, CommandError> {
        let prompt = format!("{prompt} (unix seconds or 'now'):");
        self.ask(&prompt, parse_timestamp)
    }

    fn announce(&mut self, heading: &str) {
        if let Err(err) = self.show(heading) {
            log::warn!("console: {err}");
        }
    }
}

fn io_error(prompt: &str, err: &std::io::Error) -> CommandError {
    CommandError::Input {
        prompt: prompt.to_string(),
        message: err.to_string(),
    }
}

/// Parse a decimal or `0x`-prefixed hexadecimal integer.
pub fn parse_integer(text: &str) -> Result<u64, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err("expected a number".into());
    }
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(digits) => u64::from_str_radix(digits, 16),
        None => text.parse::<u64>(),
    };
    parsed.map_err(|_| format!("not a number: {text}"))
}

fn parse_bounded(text: &str, min: u32, max: u32) -> Result<u32, String> {
    let value = parse_integer(text)?;
    u32::try_from(value)
        .ok()
        .filter(|v| (min..=max).contains(v))
        .ok_or_else(|| format!("{value} is outside {min}-{max}"))
}

/// Parse a 32-bit timestamp, accepting `now` for the current Unix time.
pub fn parse_timestamp(text: &str) -> Result<u32, String> {
    if text.trim().eq_ignore_ascii_case("now") {
        return now_unix_seconds();
    }
    parse_bounded(text, 0, u32::MAX)
}

pub fn now_unix_seconds() -> Result<u32, String> {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| format!("system clock before unix epoch: {err}"))?
        .as_secs();
    u32::try_from(secs).map_err(|_| format!("unix time {secs} does not fit in 32 bits"))
}
