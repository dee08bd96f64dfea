use console::style;
use tracing::info;
use crate::cache::{self, DatasetKey};
use crate::cli::commands::{CacheAction, CacheArgs};
use crate::config::{CacheBackend, TriageConfig};
use crate::errors::TriageError;
use crate::pipeline::EvidenceAggregator;

pub async fn handle_cache(args: CacheArgs, config: TriageConfig) -> Result<(), TriageError> {
    match args.action {
        CacheAction::Clear => {
            if config.cache.backend == CacheBackend::Memory {
                println!("Memory cache lives only for one process; nothing to clear");
                return Ok(());
            }
            cache::from_config(&config.cache).clear().await;
            info!(dir = %config.cache.session_dir().display(), "Session cache cleared");
            println!("{} Cleared {}", style("✓").green(), config.cache.session_dir().display());
        }
        CacheAction::Warm => {
            let aggregator = EvidenceAggregator::from_config(&config)?;
            let failures = aggregator.warm_catalogs().await;
            for key in DatasetKey::ALL {
                match failures.iter().find(|(k, _)| *k == key) {
                    Some((_, e)) => println!("{} {} ({})", style("✗").red(), key, e),
                    None => println!("{} {}", style("✓").green(), key),
                }
            }
            if let Some((_, e)) = failures.into_iter().next() {
                return Err(TriageError::Network(e.to_string()));
            }
        }
    }
    Ok(())
}
