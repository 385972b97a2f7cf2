// Time-domain search: absolute timestamp -> bracketing records -> sample

use serde::{Deserialize, Serialize};
use std::io::{Read, Seek};
use tracing::{debug, trace};

use crate::core::error::{NavError, Result};
use crate::core::format::RawSample;
use crate::core::rollover;
use crate::core::store::RecordStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchResult {
    Interpolated { timestamp: i64, sample: RawSample },
    // adjacent records are a dropout apart
    Nearest {
        requested: i64,
        timestamp: i64,
        sample: RawSample,
    },
    NotFound { requested: i64, start: i64, end: i64 },
}

impl SearchResult {
    pub fn timestamp(&self) -> Option<i64> {
        match self {
            SearchResult::Interpolated { timestamp, .. } => Some(*timestamp),
            SearchResult::Nearest { timestamp, .. } => Some(*timestamp),
            SearchResult::NotFound { .. } => None,
        }
    }

    pub fn sample(&self) -> Option<&RawSample> {
        match self {
            SearchResult::Interpolated { sample, .. } => Some(sample),
            SearchResult::Nearest { sample, .. } => Some(sample),
            SearchResult::NotFound { .. } => None,
        }
    }

    pub fn is_interpolated(&self) -> bool {
        matches!(self, SearchResult::Interpolated { .. })
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, SearchResult::NotFound { .. })
    }

    pub fn into_interpolated(self) -> Result<RawSample> {
        match self {
            SearchResult::Interpolated { sample, .. } => Ok(sample),
            SearchResult::Nearest {
                requested,
                timestamp,
                ..
            } => Err(NavError::DropoutNoInterpolation {
                timestamp: requested,
                nearest: timestamp,
            }),
            SearchResult::NotFound {
                requested,
                start,
                end,
            } => Err(NavError::TimestampOutOfDomain {
                timestamp: requested,
                start,
                end,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Probe {
    index: u64,
    timestamp: i64,
}

struct Located {
    probe: Probe,
    sample: RawSample,
}

/// Find the sample at absolute microsecond `target`.
///
/// A few interpolation-search probes narrow the bracket, then a linear walk
/// from the last probe finds the two adjacent records around the target.
pub fn find_record<R: Read + Seek>(store: &mut RecordStore<R>, target: i64) -> Result<SearchResult> {
    let domain = *store.domain();
    if !domain.contains(target) {
        trace!(target, "Timestamp outside file domain");
        return Ok(SearchResult::NotFound {
            requested: target,
            start: domain.start_timestamp,
            end: domain.end_timestamp,
        });
    }

    let rounds = store.config().bracket_rounds;
    let tolerance = store.config().interpolation_tolerance_secs;
    let target_sow = rollover::to_seconds_of_week(domain.reference_week_epoch, target);

    let mut lower = Probe {
        index: domain.start_record,
        timestamp: domain.start_timestamp,
    };
    let mut upper = Probe {
        index: domain.end_record,
        timestamp: domain.end_timestamp,
    };
    let mut candidate: Option<Located> = None;

    for round in 0..rounds {
        let span = upper.timestamp - lower.timestamp;
        if span < 0 {
            return Err(NavError::InternalConsistency(format!(
                "inverted bracket: record {} at {} after record {} at {}",
                lower.index, lower.timestamp, upper.index, upper.timestamp
            )));
        }
        if span == 0 {
            // bracket has closed on the target
            break;
        }
        let width = upper.index.checked_sub(lower.index).ok_or_else(|| {
            NavError::InternalConsistency(format!(
                "bracket indices out of order: {} > {}",
                lower.index, upper.index
            ))
        })?;

        let fraction = (target - lower.timestamp) as f64 / span as f64;
        let index = (lower.index + (width as f64 * fraction) as u64).min(upper.index);

        let located = locate(store, index)?;
        trace!(round, index, timestamp = located.probe.timestamp, "Bracketing probe");

        if located.probe.timestamp < target {
            lower = located.probe;
        } else {
            upper = located.probe;
        }
        candidate = Some(located);
    }

    let current = match candidate {
        Some(located) => located,
        None => locate(store, upper.index)?,
    };

    if current.probe.timestamp == target {
        let mut sample = current.sample;
        sample.set_seconds_of_week(target_sow);
        return Ok(SearchResult::Interpolated {
            timestamp: target,
            sample,
        });
    }

    let forward = current.probe.timestamp < target;
    let mut previous = current;
    loop {
        let index = if forward {
            if previous.probe.index >= domain.end_record {
                return Err(NavError::InternalConsistency(format!(
                    "walked past the last record without reaching {target}"
                )));
            }
            previous.probe.index + 1
        } else {
            if previous.probe.index <= domain.start_record {
                return Err(NavError::InternalConsistency(format!(
                    "walked past the first record without reaching {target}"
                )));
            }
            previous.probe.index - 1
        };

        let located = locate(store, index)?;
        trace!(index, timestamp = located.probe.timestamp, forward, "Walk step");

        let crossed = if forward {
            located.probe.timestamp >= target
        } else {
            located.probe.timestamp <= target
        };
        if !crossed {
            previous = located;
            continue;
        }

        let (earlier, later) = if forward {
            (&previous.sample, &located.sample)
        } else {
            (&located.sample, &previous.sample)
        };
        return resolve(earlier, later, &located, target, target_sow, tolerance);
    }
}

fn locate<R: Read + Seek>(store: &mut RecordStore<R>, index: u64) -> Result<Located> {
    let sample = store.read_corrected(index)?;
    let timestamp = rollover::to_micros(
        store.domain().reference_week_epoch,
        sample.seconds_of_week(),
    );
    Ok(Located {
        probe: Probe { index, timestamp },
        sample,
    })
}

fn resolve(
    earlier: &RawSample,
    later: &RawSample,
    found: &Located,
    target: i64,
    target_sow: f64,
    tolerance: f64,
) -> Result<SearchResult> {
    let gap = later.seconds_of_week() - earlier.seconds_of_week();

    if gap >= tolerance {
        debug!(
            gap,
            nearest = found.probe.timestamp,
            "Dropout around {}, returning nearest record",
            target
        );
        return Ok(SearchResult::Nearest {
            requested: target,
            timestamp: found.probe.timestamp,
            sample: found.sample.clone(),
        });
    }

    if gap <= 0.0 {
        return Err(NavError::InternalConsistency(format!(
            "zero-length bracket at seconds-of-week {}",
            earlier.seconds_of_week()
        )));
    }

    Ok(SearchResult::Interpolated {
        timestamp: target,
        sample: RawSample::interpolate(earlier, later, target_sow),
    })
}
