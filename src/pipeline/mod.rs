pub mod aggregator;

pub use aggregator::EvidenceAggregator;
