// Library root: pitch-tracking ingestion, normalization and aggregation.
//
// Pipeline: `ingest` reads raw session CSVs, `normalize` builds the canonical
// pitch table, `filter` narrows it, and `summary` / `scatter` turn a subset
// into what the report screens display.

pub mod auth;
pub mod config;
pub mod export;
pub mod filter;
pub mod ingest;
pub mod normalize;
pub mod pitch;
pub mod scatter;
pub mod summary;
