//! PowerAdmin Database Adapter
//!
//! Implements the `MetricsDatabase` port against the PowerAdmin
//! statistics schema (`ConfigComputerInfo`, `ConfigGroupInfo`,
//! `Statistic`, `StatData`) via sqlx.

pub mod stats;

pub use stats::StatsDatabase;
