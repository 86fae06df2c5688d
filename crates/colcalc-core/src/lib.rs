//! colcalc-core - UI-agnostic sheet model, derived columns and export.

pub mod error;
pub mod seed;
pub mod sheet;
pub mod storage;

pub use error::{ErrorKind, Result, SheetError};
pub use seed::seed_sheet;
pub use sheet::{
    CellPos, Column, ColumnCatalog, ColumnId, ColumnKind, ROW_COUNT, Sheet, SheetData, ValueStore,
};

pub use colcalc_engine::engine::{ColumnRef, Formula};
