/// Length of a registry command packet.
pub const PACKET_LEN: usize = 7;

/// Length of a time-sync packet.
pub const TIME_SYNC_LEN: usize = 4;

/// First cell an encoder may write; cells 0 and 1 hold opcode and identifier.
pub const FIELDS_OFFSET: usize = 2;

pub const IDENTIFIER_MAX: u32 = 0xFF;
pub const FLAG_MAX: u32 = 1;

pub const REPETITIONS_MAX: u32 = 63;
pub const DURATION_MAX: u32 = 0xFFFF;
pub const BREAKTIME_MAX: u32 = 0xFFFF;

pub const RESOLUTION_MIN: u32 = 1;
pub const RESOLUTION_MAX: u32 = 1024;

/// Channel counts the instrument accepts. Everything else in
/// `RESOLUTION_MIN..=RESOLUTION_MAX` is re-prompted.
pub const RESOLUTIONS: [u32; 9] = [1, 8, 16, 32, 64, 128, 256, 512, 1024];

pub const SAMPLING_MIN: u32 = 1;
pub const SAMPLING_MAX: u32 = 0xFF;

/// Thresholds are 12-bit; Set Scale packs two of them into three bytes.
pub const THRESHOLD_MAX: u16 = 0x0FFF;

pub const DEFAULT_REFERENCE_MILLIVOLTS: u32 = 3300;
