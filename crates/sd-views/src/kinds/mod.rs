//! Per-kind renderers
//!
//! Each renderer accepts the same `(rows, schema, handlers)` contract.

pub mod activity;
pub mod board;
pub mod boxes;
pub mod calendar;
pub mod list;
pub mod placeholder;
pub mod portfolio;
pub mod table;
pub mod timeline;

pub mod util;
