//! Sheet state and logic (UI-agnostic).

mod catalog;
mod column;
mod ops;
mod state;
mod store;

pub use catalog::ColumnCatalog;
pub use column::{Column, ColumnId, ColumnKind};
pub use state::{ROW_COUNT, Sheet, SheetData};
pub use store::{CellPos, ValueStore};
