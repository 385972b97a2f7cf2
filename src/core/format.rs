// Data structures for navigation-class record files

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::constants::*;
use crate::core::error::{NavError, Result};
use crate::core::rollover;

// Field 0 is always seconds-of-week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordKind {
    pub name: &'static str,
    pub field_names: &'static [&'static str],
}

impl RecordKind {
    pub const NAVIGATION: RecordKind = RecordKind {
        name: "navigation",
        field_names: &NAVIGATION_FIELDS,
    };

    pub const PRECISION: RecordKind = RecordKind {
        name: "precision",
        field_names: &PRECISION_FIELDS,
    };

    pub fn field_count(&self) -> usize {
        self.field_names.len()
    }

    pub fn record_size(&self) -> usize {
        self.field_count() * FIELD_SIZE
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.field_names.iter().position(|n| *n == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub fields: Vec<f64>,
}

impl RawSample {
    pub fn new(fields: Vec<f64>) -> Self {
        Self { fields }
    }

    pub fn seconds_of_week(&self) -> f64 {
        self.fields.first().copied().unwrap_or(f64::NAN)
    }

    pub fn set_seconds_of_week(&mut self, value: f64) {
        if let Some(t) = self.fields.first_mut() {
            *t = value;
        }
    }

    pub fn field(&self, index: usize) -> Option<f64> {
        self.fields.get(index).copied()
    }

    pub fn field_by_name(&self, kind: &RecordKind, name: &str) -> Option<f64> {
        kind.field_index(name).and_then(|i| self.field(i))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Linear interpolation of every field at seconds-of-week `t`; the time
    /// field of the result is exactly `t`. Records must have distinct times.
    pub fn interpolate(earlier: &RawSample, later: &RawSample, t: f64) -> RawSample {
        let t0 = earlier.seconds_of_week();
        let t2 = later.seconds_of_week();
        let fraction = (t - t0) / (t2 - t0);

        let mut fields: Vec<f64> = earlier
            .fields
            .iter()
            .zip(later.fields.iter())
            .map(|(y0, y2)| y0 + (y2 - y0) * fraction)
            .collect();
        if let Some(time) = fields.first_mut() {
            *time = t;
        }
        RawSample { fields }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FileTimeDomain {
    pub reference_week_epoch: i64,
    pub start_record: u64,
    pub end_record: u64,
    // absolute microseconds
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    pub start_seconds_of_week: f64,
    pub rollover_occurred: bool,
}

impl FileTimeDomain {
    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start_timestamp && timestamp <= self.end_timestamp
    }

    pub fn duration_secs(&self) -> f64 {
        (self.end_timestamp - self.start_timestamp) as f64 / MICROS_PER_SECOND
    }

    pub fn start_datetime(&self) -> Option<DateTime<Utc>> {
        rollover::to_datetime(self.start_timestamp)
    }

    pub fn end_datetime(&self) -> Option<DateTime<Utc>> {
        rollover::to_datetime(self.end_timestamp)
    }

    pub fn correct(&self, seconds_of_week: f64) -> f64 {
        rollover::correct(
            seconds_of_week,
            self.start_seconds_of_week,
            self.rollover_occurred,
        )
    }

    pub fn timestamp_of(&self, seconds_of_week: f64) -> i64 {
        rollover::to_micros(self.reference_week_epoch, self.correct(seconds_of_week))
    }
}

pub(crate) fn check_arity(sample: &RawSample, kind: &RecordKind) -> Result<()> {
    if sample.len() != kind.field_count() {
        return Err(NavError::FieldCount {
            expected: kind.field_count(),
            got: sample.len(),
        });
    }
    Ok(())
}

// Angles in radians, everything else in meters and seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationRecord {
    pub seconds_of_week: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub x_velocity: f64,
    pub y_velocity: f64,
    pub z_velocity: f64,
    pub roll: f64,
    pub pitch: f64,
    pub platform_heading: f64,
    pub wander_angle: f64,
    pub x_body_accel: f64,
    pub y_body_accel: f64,
    pub z_body_accel: f64,
    pub x_body_ang_rate: f64,
    pub y_body_ang_rate: f64,
    pub z_body_ang_rate: f64,
}

impl NavigationRecord {
    pub fn true_heading(&self) -> f64 {
        self.platform_heading - self.wander_angle
    }

    pub fn latitude_degrees(&self) -> f64 {
        self.latitude.to_degrees()
    }

    pub fn longitude_degrees(&self) -> f64 {
        self.longitude.to_degrees()
    }

    pub fn to_sample(&self) -> RawSample {
        RawSample::new(vec![
            self.seconds_of_week,
            self.latitude,
            self.longitude,
            self.altitude,
            self.x_velocity,
            self.y_velocity,
            self.z_velocity,
            self.roll,
            self.pitch,
            self.platform_heading,
            self.wander_angle,
            self.x_body_accel,
            self.y_body_accel,
            self.z_body_accel,
            self.x_body_ang_rate,
            self.y_body_ang_rate,
            self.z_body_ang_rate,
        ])
    }
}

impl TryFrom<&RawSample> for NavigationRecord {
    type Error = NavError;

    fn try_from(sample: &RawSample) -> Result<Self> {
        check_arity(sample, &RecordKind::NAVIGATION)?;
        let f = &sample.fields;
        Ok(Self {
            seconds_of_week: f[0],
            latitude: f[1],
            longitude: f[2],
            altitude: f[3],
            x_velocity: f[4],
            y_velocity: f[5],
            z_velocity: f[6],
            roll: f[7],
            pitch: f[8],
            platform_heading: f[9],
            wander_angle: f[10],
            x_body_accel: f[11],
            y_body_accel: f[12],
            z_body_accel: f[13],
            x_body_ang_rate: f[14],
            y_body_ang_rate: f[15],
            z_body_ang_rate: f[16],
        })
    }
}

/// RMS error estimates. Position in meters, velocity in m/s, attitude in arc minutes.
///
/// The `*_rms_degrees` helpers use 60 arc minutes per degree. This differs
/// from the 0.016 (1/62.5) factor some vendor tooling applies, so values come
/// out about 4% larger than those tools report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecisionRecord {
    pub seconds_of_week: f64,
    pub north_position_rms: f64,
    pub east_position_rms: f64,
    pub down_position_rms: f64,
    pub north_velocity_rms: f64,
    pub east_velocity_rms: f64,
    pub down_velocity_rms: f64,
    pub roll_rms: f64,
    pub pitch_rms: f64,
    pub heading_rms: f64,
}

impl PrecisionRecord {
    const ARC_MINUTES_PER_DEGREE: f64 = 60.0;

    pub fn roll_rms_degrees(&self) -> f64 {
        self.roll_rms / Self::ARC_MINUTES_PER_DEGREE
    }

    pub fn pitch_rms_degrees(&self) -> f64 {
        self.pitch_rms / Self::ARC_MINUTES_PER_DEGREE
    }

    pub fn heading_rms_degrees(&self) -> f64 {
        self.heading_rms / Self::ARC_MINUTES_PER_DEGREE
    }

    pub fn to_sample(&self) -> RawSample {
        RawSample::new(vec![
            self.seconds_of_week,
            self.north_position_rms,
            self.east_position_rms,
            self.down_position_rms,
            self.north_velocity_rms,
            self.east_velocity_rms,
            self.down_velocity_rms,
            self.roll_rms,
            self.pitch_rms,
            self.heading_rms,
        ])
    }
}

impl TryFrom<&RawSample> for PrecisionRecord {
    type Error = NavError;

    fn try_from(sample: &RawSample) -> Result<Self> {
        check_arity(sample, &RecordKind::PRECISION)?;
        let f = &sample.fields;
        Ok(Self {
            seconds_of_week: f[0],
            north_position_rms: f[1],
            east_position_rms: f[2],
            down_position_rms: f[3],
            north_velocity_rms: f[4],
            east_velocity_rms: f[5],
            down_velocity_rms: f[6],
            roll_rms: f[7],
            pitch_rms: f[8],
            heading_rms: f[9],
        })
    }
}
