/// CSV export for sizing results.
pub mod export;
