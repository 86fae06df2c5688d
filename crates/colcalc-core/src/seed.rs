//! Seed sheet shown at startup.
//!
//! Three columns: elapsed time in hours, cell density and culture volume.
//! Values come from a seeded RNG so the same seed always yields the same sheet.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::sheet::{Column, ROW_COUNT, Sheet, SheetData};

pub const DEFAULT_SEED: u64 = 42;

/// Build the startup sheet with [`ROW_COUNT`] rows.
pub fn seed_sheet(seed: u64) -> Sheet {
    Sheet::from(seed_data(seed, ROW_COUNT))
}

pub fn seed_data(seed: u64, row_count: usize) -> SheetData {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = SheetData::new(row_count);

    let time: Vec<Option<f64>> = (0..row_count).map(|row| Some(row as f64)).collect();
    let density: Vec<Option<f64>> = (0..row_count)
        .map(|_| Some(rng.gen_range(1.0e5..5.0e6_f64).round()))
        .collect();
    let volume: Vec<Option<f64>> = (0..row_count)
        .map(|_| Some((rng.gen_range(0.5..2.0_f64) * 1000.0).round() / 1000.0))
        .collect();

    data.push_column(Column::time("Time", "time_col"), &time);
    data.push_column(
        Column::data("Cell Density (Cell Count/Litre)", "var_col_1"),
        &density,
    );
    data.push_column(Column::data("Volume (Litres)", "var_col_2"), &volume);
    data
}
