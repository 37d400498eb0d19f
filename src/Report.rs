/// Builds the result record of one query (totals, per-fragment breakdown, lookup
/// provenance, unit cell ratio) and prints it as tables.
pub mod composer;
/// File name of the JSON summary and writing it to disk.
pub mod export;
