//! Shared chrome for the production-management platform
//!
//! The page shell composes these widgets: top bar, tab bar, toolbar,
//! inline error banner, loading indicator, detail drawer, create
//! dialog and the transient notice overlay.

pub mod chrome;
pub mod dialog;
pub mod draft;
pub mod drawer;
pub mod notices;
pub mod theme;

pub use chrome::{error_banner, loading_indicator, tab_bar, toolbar, top_bar, ToolbarAction, TopBarAction};
pub use dialog::{create_dialog, DialogAction};
pub use draft::{DraftField, RowDraft};
pub use drawer::{detail_drawer, DrawerAction};
pub use notices::NoticeOverlay;
pub use theme::{apply_theme, Theme};
