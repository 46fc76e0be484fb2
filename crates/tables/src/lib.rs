//! Tables domain module.
//!
//! Seating units (`OrderTable`) and the table-group rules the order workflow
//! depends on. Group formation itself is not modelled here; only the ungroup
//! eligibility check is.

pub mod group;
pub mod table;

pub use group::TableGroupMembers;
pub use table::OrderTable;
