//! colcalc_engine - formula language for derived columns.

pub mod engine;
