//! Running summary: derived statistics over a fitness-tracker activity
//! history (totals, monthly breakdown, fastest/longest run, time-of-day
//! habits, daily streaks), served over HTTP or from the command line.

pub mod activities;
pub mod aggregate;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod file_utils;
pub mod summary;
