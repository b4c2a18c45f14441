//! # satcmd-core
//!
//! Command registry and packet encoders for the payload instrument uplink.
//!
//! Every registry command produces a fixed 7-byte packet:
//!
//! ```text
//! [opcode:1][identifier:1][fields:5]
//! ```
//!
//! The field layout depends on the command. Set Duration and Set Scale pack
//! multi-byte fields big-endian; Request Measurement and Request Selftest
//! carry a little-endian timestamp because the receiving hardware expects
//! it that way. Time Sync is separate from the registry and produces a bare
//! 4-byte little-endian timestamp.
//!
//! ## Example
//!
//! ```rust
//! use satcmd_core::{generate, CommandBuffer, ScriptedInput};
//!
//! // Request Selftest (index 3) with identifier 9 and timestamp 0x01020304.
//! let mut input = ScriptedInput::new([0x0102_0304]);
//! let mut buffer = CommandBuffer::new();
//! let packet = generate(3, 9, &mut input, &mut buffer).unwrap();
//! assert_eq!(packet.opcode, 0x06);
//! assert_eq!(buffer.as_bytes(), &[0x06, 9, 0x04, 0x03, 0x02, 0x01, 0x00]);
//! ```

pub mod buffer;
pub mod command;
pub mod constants;
pub mod error;
pub mod fields;
pub mod input;
pub mod registry;
pub mod threshold;

mod scripted;

pub use buffer::{CommandBuffer, TimeSyncBuffer};
pub use command::{
    CommandKind, CommandParams, DurationMode, DurationParams, MeasurementParams, ScaleParams,
    SelftestParams,
};
pub use error::CommandError;
pub use fields::is_valid_resolution;
pub use input::InputProvider;
pub use registry::{
    encode_time_sync, generate, generate_time_sync, CommandDescriptor, Packet, REGISTRY,
};
pub use scripted::ScriptedInput;
pub use threshold::{threshold_value, Threshold};
