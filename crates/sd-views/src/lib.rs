//! View system for the production-management platform
//!
//! One data subscription, N presentation strategies: every view kind
//! renders the same row/schema contract, so switching kinds at runtime
//! never refetches. Item interaction is routed uniformly through
//! [`ViewHandlers`].

mod custom;
mod dispatch;
mod kinds;

pub use custom::{CustomRegistry, CustomRenderer};
pub use dispatch::{has_renderer, render};

use sd_core::DataRow;

/// Uniform interaction callbacks passed into every view kind.
///
/// `on_item_click` fires for every kind that supports selection; the
/// dispatcher never opens dialogs itself, it defers creation to
/// `on_create_action`.
pub struct ViewHandlers<'a> {
    pub on_item_click: &'a mut dyn FnMut(&DataRow),
    pub on_create_action: &'a mut dyn FnMut(),
}
