use crate::error::Result;
use crate::extractor::InventorySource;
use crate::sink::JsonFileSink;
use crate::targets::Target;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

/// Outcome counts for one batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub attempted: usize,
    pub written: usize,
    pub failed: usize,
}

/// Processes targets strictly in table order: fetch, extract, write, pause.
///
/// A per-target failure of any kind degrades to one logged line naming the
/// theater and URL; the loop always moves on to the next row. The delay is
/// applied after every target, success or failure.
pub async fn run_batch(
    source: &dyn InventorySource,
    sink: &JsonFileSink,
    targets: &[Target],
    delay: Duration,
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for target in targets {
        summary.attempted += 1;
        match process_target(source, sink, target).await {
            Ok(path) => {
                summary.written += 1;
                info!("Inventory for {} written to {}", target.theater, path.display());
            }
            Err(e) => {
                summary.failed += 1;
                error!("Error fetching {} @ {}: {}", target.theater, target.url, e);
            }
        }
        tokio::time::sleep(delay).await;
    }

    summary
}

async fn process_target(
    source: &dyn InventorySource,
    sink: &JsonFileSink,
    target: &Target,
) -> Result<PathBuf> {
    let inventory = source.fetch_inventory(&target.url).await?;
    sink.write(&target.theater, &inventory)
}
