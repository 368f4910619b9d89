//! # sheetgate-core
//!
//! Cell value model and tabular conversion for sheetgate.
//!
//! This crate holds the pieces that are independent of both the HTTP surface
//! and the automation transport: the [`CellScalar`] value model, the
//! JSON-widening conversion in [`encode`], and the used-range to table
//! conversion in [`table`].

pub mod encode;
pub mod table;
pub mod value;

pub use encode::{widen, EncodeError};
pub use table::{Table, UsedRange};
pub use value::CellScalar;
