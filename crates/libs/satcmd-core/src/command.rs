//! Command kinds, their typed parameters, and the per-command packing rules.
//!
//! Byte layout after the `[opcode][identifier]` header:
//!
//! ```text
//! Set Duration         [reps<<2|mode<<1|ok][duration BE:2][breaktime BE:2]
//! Set Scale            [min>>4][(min&0xF)<<4|max>>8][max&0xFF][res/8][sampling]
//! Request Measurement  [timestamp LE:4][cont<<7|header<<6]
//! Request Selftest     [timestamp LE:4]
//! Reset/Restart/Save/Stop  (nothing)
//! ```

use serde::Serialize;

use crate::buffer::CommandBuffer;
use crate::constants::{
    BREAKTIME_MAX, DURATION_MAX, FIELDS_OFFSET, REPETITIONS_MAX, RESOLUTION_MAX,
    RESOLUTION_MIN, SAMPLING_MAX, SAMPLING_MIN, THRESHOLD_MAX,
};
use crate::error::CommandError;
use crate::fields::{check_range, is_valid_resolution, narrow, resolution_code};
use crate::input::InputProvider;
use crate::threshold::Threshold;

/// The commands the instrument accepts through the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandKind {
    SetDuration,
    SetScale,
    RequestMeasurement,
    RequestSelftest,
    Reset,
    Restart,
    Save,
    Stop,
}

impl CommandKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::SetDuration => "Set duration",
            Self::SetScale => "Set scale",
            Self::RequestMeasurement => "Request measurement",
            Self::RequestSelftest => "Request selftest",
            Self::Reset => "Reset",
            Self::Restart => "Restart",
            Self::Save => "Save",
            Self::Stop => "Stop",
        }
    }

    pub const fn opcode(self) -> u8 {
        match self {
            Self::SetDuration => 0xE0,
            Self::SetScale => 0xD0,
            Self::RequestMeasurement => 0x07,
            Self::RequestSelftest => 0x06,
            Self::Reset => 0x0F,
            Self::Restart => 0x0E,
            Self::Save => 0xAA,
            Self::Stop => 0xBB,
        }
    }

    /// Kebab-case name used on the command line.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::SetDuration => "set-duration",
            Self::SetScale => "set-scale",
            Self::RequestMeasurement => "request-measurement",
            Self::RequestSelftest => "request-selftest",
            Self::Reset => "reset",
            Self::Restart => "restart",
            Self::Save => "save",
            Self::Stop => "stop",
        }
    }
}

/// Set Duration measurement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum DurationMode {
    MaxTime = 0,
    MaxHits = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationParams {
    pub mode: DurationMode,
    pub okaying: bool,
    pub repetitions: u8,
    pub duration: u16,
    pub breaktime: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScaleParams {
    pub min_voltage: Threshold,
    pub max_voltage: Threshold,
    pub resolution: u16,
    pub sampling: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeasurementParams {
    pub timestamp: u32,
    pub continue_on_full: bool,
    pub header: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelftestParams {
    pub timestamp: u32,
}

/// A command kind together with its field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum CommandParams {
    SetDuration(DurationParams),
    SetScale(ScaleParams),
    RequestMeasurement(MeasurementParams),
    RequestSelftest(SelftestParams),
    Reset,
    Restart,
    Save,
    Stop,
}

const TIMESTAMP_PROMPT: &str = "Enter the timestamp";

impl CommandParams {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::SetDuration(_) => CommandKind::SetDuration,
            Self::SetScale(_) => CommandKind::SetScale,
            Self::RequestMeasurement(_) => CommandKind::RequestMeasurement,
            Self::RequestSelftest(_) => CommandKind::RequestSelftest,
            Self::Reset => CommandKind::Reset,
            Self::Restart => CommandKind::Restart,
            Self::Save => CommandKind::Save,
            Self::Stop => CommandKind::Stop,
        }
    }

    /// Ask the provider for every field `kind` needs, in wire order.
    pub fn collect(kind: CommandKind, input: &mut dyn InputProvider) -> Result<Self, CommandError> {
        input.announce(&format!("{} command", kind.name()));
        let params = match kind {
            CommandKind::SetDuration => Self::SetDuration(collect_duration(input)?),
            CommandKind::SetScale => Self::SetScale(collect_scale(input)?),
            CommandKind::RequestMeasurement => {
                let timestamp = input.request_timestamp(TIMESTAMP_PROMPT)?;
                let continue_on_full = input.request_flag(
                    "Continue the measurement when a channel is full? [0 = n, 1 = y]",
                )?;
                let header =
                    input.request_flag("Does the measurement need a header packet? [0 = n, 1 = y]")?;
                Self::RequestMeasurement(MeasurementParams {
                    timestamp,
                    continue_on_full,
                    header,
                })
            }
            CommandKind::RequestSelftest => Self::RequestSelftest(SelftestParams {
                timestamp: input.request_timestamp(TIMESTAMP_PROMPT)?,
            }),
            CommandKind::Reset => Self::Reset,
            CommandKind::Restart => Self::Restart,
            CommandKind::Save => Self::Save,
            CommandKind::Stop => Self::Stop,
        };
        Ok(params)
    }

    /// Check the field invariants the packing relies on.
    pub fn validate(&self) -> Result<(), CommandError> {
        match self {
            Self::SetDuration(p) => check_range(
                "repetitions",
                u32::from(p.repetitions),
                0,
                REPETITIONS_MAX,
            ),
            Self::SetScale(p) => {
                let max = u32::from(THRESHOLD_MAX);
                check_range("min_voltage", u32::from(p.min_voltage.value), 0, max)?;
                check_range("max_voltage", u32::from(p.max_voltage.value), 0, max)?;
                if p.max_voltage.value < p.min_voltage.value {
                    return Err(CommandError::ThresholdOrder {
                        min: p.min_voltage.value,
                        max: p.max_voltage.value,
                    });
                }
                if !is_valid_resolution(u32::from(p.resolution)) {
                    return Err(CommandError::InvalidResolution(u32::from(p.resolution)));
                }
                check_range("sampling", u32::from(p.sampling), SAMPLING_MIN, SAMPLING_MAX)
            }
            Self::RequestMeasurement(_)
            | Self::RequestSelftest(_)
            | Self::Reset
            | Self::Restart
            | Self::Save
            | Self::Stop => Ok(()),
        }
    }

    /// Write the fields into cells 2..7. Cells the command does not use are
    /// left as they are.
    pub fn encode_into(&self, buf: &mut CommandBuffer) -> Result<(), CommandError> {
        self.validate()?;
        let at = FIELDS_OFFSET;
        match self {
            Self::SetDuration(p) => {
                buf.put_u8(at, (p.repetitions << 2) | ((p.mode as u8) << 1) | u8::from(p.okaying));
                buf.put_u16_be(at + 1, p.duration);
                buf.put_u16_be(at + 3, p.breaktime);
            }
            Self::SetScale(p) => {
                let min = p.min_voltage.value;
                let max = p.max_voltage.value;
                buf.put_u8(at, (min >> 4) as u8);
                buf.put_u8(at + 1, (((min & 0xF) << 4) | (max >> 8)) as u8);
                buf.put_u8(at + 2, (max & 0xFF) as u8);
                buf.put_u8(at + 3, resolution_code(p.resolution));
                buf.put_u8(at + 4, p.sampling);
            }
            // The receiver expects these timestamps little-endian.
            Self::RequestMeasurement(p) => {
                buf.put_u32_le(at, p.timestamp);
                buf.put_u8(at + 4, (u8::from(p.continue_on_full) << 7) | (u8::from(p.header) << 6));
            }
            Self::RequestSelftest(p) => buf.put_u32_le(at, p.timestamp),
            Self::Reset | Self::Restart | Self::Save | Self::Stop => {}
        }
        Ok(())
    }
}

fn collect_duration(input: &mut dyn InputProvider) -> Result<DurationParams, CommandError> {
    let mode = if input.request_flag("MAX_TIME [0] or MAX_HITS mode [1]?")? {
        DurationMode::MaxHits
    } else {
        DurationMode::MaxTime
    };
    let okaying = input.request_flag("Okaying (0 = no, 1 = yes)?")?;
    let repetitions = input.request_integer("Repetitions [0-63]?", 0, REPETITIONS_MAX)?;
    let duration = input.request_integer("Duration [0-65535]:", 0, DURATION_MAX)?;
    let breaktime = input.request_integer(
        "Breaktime (the time between two measurements in seconds) [0-65535]?",
        0,
        BREAKTIME_MAX,
    )?;

    Ok(DurationParams {
        mode,
        okaying,
        repetitions: narrow("repetitions", repetitions, REPETITIONS_MAX)?,
        duration: narrow("duration", duration, DURATION_MAX)?,
        breaktime: narrow("breaktime", breaktime, BREAKTIME_MAX)?,
    })
}

fn collect_scale(input: &mut dyn InputProvider) -> Result<ScaleParams, CommandError> {
    let min_voltage = input.request_threshold("Minimum voltage", 0)?;
    let max_voltage = input.request_threshold("Maximum voltage", min_voltage.raw_millivolts)?;

    let resolution = loop {
        let value = input.request_integer(
            "Resolution [1, 8-1024] (number of channels, powers of two):",
            RESOLUTION_MIN,
            RESOLUTION_MAX,
        )?;
        if is_valid_resolution(value) {
            break value;
        }
        log::warn!("resolution {value} rejected: expected 1 or a power of two in 8..=1024");
    };
    let sampling = input.request_integer("Sampling [1-255]:", SAMPLING_MIN, SAMPLING_MAX)?;

    Ok(ScaleParams {
        min_voltage,
        max_voltage,
        resolution: narrow("resolution", resolution, RESOLUTION_MAX)?,
        sampling: narrow("sampling", sampling, SAMPLING_MAX)?,
    })
}
