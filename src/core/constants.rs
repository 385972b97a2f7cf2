// Format constants for headerless navigation-class files

// Seconds in one GPS week
pub const WEEK_SECONDS: f64 = 7.0 * 86_400.0;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const MICROS_PER_SECOND: f64 = 1_000_000.0;

// Every field on disk is an 8-byte float
pub const FIELD_SIZE: usize = 8;

// Adjacent records further apart than this are a dropout, never interpolated
pub const INTERPOLATION_TOLERANCE_SECS: f64 = 1.0;

// Interpolation-search probes before falling back to a linear walk
pub const BRACKET_ROUNDS: u32 = 3;

// Records are numbered from 1
pub const FIRST_RECORD: u64 = 1;

// Filename convention: ..._YYMMDD_NNNN.ext, offsets counted from the end
pub const STAMP_LEN: usize = 16;
pub const DATE_SEPARATOR_OFFSET: usize = 16;
pub const LINE_SEPARATOR_OFFSET: usize = 9;
pub const EXTENSION_DOT_OFFSET: usize = 4;

// Navigation record: (seconds_of_week, 16 x f64)
pub const NAVIGATION_FIELDS: [&str; 17] = [
    "seconds_of_week",
    "latitude",
    "longitude",
    "altitude",
    "x_velocity",
    "y_velocity",
    "z_velocity",
    "roll",
    "pitch",
    "platform_heading",
    "wander_angle",
    "x_body_accel",
    "y_body_accel",
    "z_body_accel",
    "x_body_ang_rate",
    "y_body_ang_rate",
    "z_body_ang_rate",
];

// Precision-estimate record: (seconds_of_week, 9 x f64)
pub const PRECISION_FIELDS: [&str; 10] = [
    "seconds_of_week",
    "north_position_rms",
    "east_position_rms",
    "down_position_rms",
    "north_velocity_rms",
    "east_velocity_rms",
    "down_velocity_rms",
    "roll_rms",
    "pitch_rms",
    "heading_rms",
];

pub const NAVIGATION_RECORD_SIZE: usize = NAVIGATION_FIELDS.len() * FIELD_SIZE; // 136 bytes
pub const PRECISION_RECORD_SIZE: usize = PRECISION_FIELDS.len() * FIELD_SIZE; // 80 bytes
