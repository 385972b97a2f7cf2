// Example usage of the navigation reader
//
//   cargo run --example read_nav -- data/pos/sbet_240315_0001.out [seconds_of_week]

use anyhow::Context;
use survey_nav::{NavigationRecord, RecordStore, SearchResult};
use tracing::{info, Level};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .unwrap_or_else(|| "data/pos/sbet_240315_0001.out".to_string());

    let mut store = RecordStore::open_navigation(&path)
        .with_context(|| format!("opening {path}"))?;

    let domain = *store.domain();
    info!("Records: {}", store.record_count());
    info!("Start: {:?}", domain.start_datetime());
    info!("End:   {:?}", domain.end_datetime());
    info!("Duration: {:.3} s", domain.duration_secs());
    if domain.rollover_occurred {
        info!("File crosses a GPS week boundary");
    }

    // Query the middle of the file unless a seconds-of-week value was given
    let target = match args.next() {
        Some(sow) => {
            let sow: f64 = sow.parse().context("seconds-of-week must be a number")?;
            survey_nav::core::rollover::to_micros(domain.reference_week_epoch, sow)
        }
        None => domain.start_timestamp + (domain.end_timestamp - domain.start_timestamp) / 2,
    };

    match store.find_record(target)? {
        SearchResult::Interpolated { timestamp, sample } => {
            let nav = NavigationRecord::try_from(&sample)?;
            info!("Interpolated at {}: {}", timestamp, serde_json::to_string(&nav)?);
            info!(
                "lat {:.8} lon {:.8} true heading {:.4} rad",
                nav.latitude_degrees(),
                nav.longitude_degrees(),
                nav.true_heading()
            );
        }
        SearchResult::Nearest {
            requested,
            timestamp,
            sample,
        } => {
            let nav = NavigationRecord::try_from(&sample)?;
            info!(
                "Dropout near {}, nearest record at {}: {}",
                requested,
                timestamp,
                serde_json::to_string(&nav)?
            );
        }
        SearchResult::NotFound { requested, start, end } => {
            info!("{} is outside [{}, {}]", requested, start, end);
        }
    }

    // First few records, sequentially
    store.rewind();
    for sample in store.samples().take(3) {
        let sample = sample?;
        info!("sow {:.3} -> {}", sample.seconds_of_week(), domain.timestamp_of(sample.seconds_of_week()));
    }

    Ok(())
}
