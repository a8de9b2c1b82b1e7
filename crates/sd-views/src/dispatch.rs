//! View dispatcher
//!
//! Tagged dispatch over the closed [`ViewKind`] enumeration. The match
//! is exhaustive; kinds without a dedicated renderer degrade to a
//! neutral placeholder instead of failing. Rendering is pure: the rows
//! arrive already filtered and the dispatcher performs no fetching.

use egui::Ui;
use sd_core::{DataRow, FieldDescriptor, ViewKind};

use crate::kinds;
use crate::ViewHandlers;

/// Render one view kind over the given rows and schema.
pub fn render(
    ui: &mut Ui,
    kind: ViewKind,
    rows: &[DataRow],
    schema: &[FieldDescriptor],
    handlers: &mut ViewHandlers<'_>,
) {
    match kind {
        ViewKind::List => kinds::list::render(ui, rows, schema, handlers),
        ViewKind::Board => kinds::board::render(ui, rows, schema, handlers),
        ViewKind::Table => kinds::table::render(ui, rows, schema, handlers),
        ViewKind::Calendar => kinds::calendar::render(ui, rows, schema, handlers),
        ViewKind::Timeline => kinds::timeline::render(ui, rows, schema, handlers),
        ViewKind::Activity => kinds::activity::render(ui, rows, schema, handlers),
        ViewKind::Box => kinds::boxes::render(ui, rows, schema, handlers),
        ViewKind::Portfolio => kinds::portfolio::render(ui, rows, schema, handlers),
        ViewKind::Map
        | ViewKind::MindMap
        | ViewKind::Form
        | ViewKind::Embed
        | ViewKind::Chat
        | ViewKind::Doc
        | ViewKind::Financial
        | ViewKind::Pivot => kinds::placeholder::render(ui, kind),
    }
}

/// Whether a kind has a dedicated renderer (as opposed to the
/// placeholder path).
pub fn has_renderer(kind: ViewKind) -> bool {
    matches!(
        kind,
        ViewKind::List
            | ViewKind::Board
            | ViewKind::Table
            | ViewKind::Calendar
            | ViewKind::Timeline
            | ViewKind::Activity
            | ViewKind::Box
            | ViewKind::Portfolio
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_selectable_kind_has_a_renderer() {
        for kind in ViewKind::ALL {
            if kind.supports_selection() {
                assert!(has_renderer(kind), "{} should render", kind.slug());
            }
        }
    }
}
