//! The closed set of presentation strategies

use serde::{Deserialize, Serialize};

/// A presentation strategy applied to the rows of a tab.
///
/// The enumeration is closed: every tab renders through exactly one of
/// these kinds, and switching kinds at runtime reuses the same row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewKind {
    List,
    Board,
    Table,
    Calendar,
    Timeline,
    Map,
    MindMap,
    Form,
    Activity,
    Box,
    Embed,
    Chat,
    Doc,
    Financial,
    Portfolio,
    Pivot,
}

impl ViewKind {
    /// Every kind, in menu order.
    pub const ALL: [ViewKind; 16] = [
        ViewKind::List,
        ViewKind::Board,
        ViewKind::Table,
        ViewKind::Calendar,
        ViewKind::Timeline,
        ViewKind::Map,
        ViewKind::MindMap,
        ViewKind::Form,
        ViewKind::Activity,
        ViewKind::Box,
        ViewKind::Embed,
        ViewKind::Chat,
        ViewKind::Doc,
        ViewKind::Financial,
        ViewKind::Portfolio,
        ViewKind::Pivot,
    ];

    /// Stable slug used in descriptors and persisted layouts.
    pub fn slug(&self) -> &'static str {
        match self {
            ViewKind::List => "list",
            ViewKind::Board => "board",
            ViewKind::Table => "table",
            ViewKind::Calendar => "calendar",
            ViewKind::Timeline => "timeline",
            ViewKind::Map => "map",
            ViewKind::MindMap => "mind-map",
            ViewKind::Form => "form",
            ViewKind::Activity => "activity",
            ViewKind::Box => "box",
            ViewKind::Embed => "embed",
            ViewKind::Chat => "chat",
            ViewKind::Doc => "doc",
            ViewKind::Financial => "financial",
            ViewKind::Portfolio => "portfolio",
            ViewKind::Pivot => "pivot",
        }
    }

    /// Parse a slug back into a kind.
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.slug() == slug)
    }

    /// Human-readable label for the view switcher.
    pub fn label(&self) -> &'static str {
        match self {
            ViewKind::List => "List",
            ViewKind::Board => "Board",
            ViewKind::Table => "Table",
            ViewKind::Calendar => "Calendar",
            ViewKind::Timeline => "Timeline",
            ViewKind::Map => "Map",
            ViewKind::MindMap => "Mind Map",
            ViewKind::Form => "Form",
            ViewKind::Activity => "Activity",
            ViewKind::Box => "Box",
            ViewKind::Embed => "Embed",
            ViewKind::Chat => "Chat",
            ViewKind::Doc => "Doc",
            ViewKind::Financial => "Financial",
            ViewKind::Portfolio => "Portfolio",
            ViewKind::Pivot => "Pivot",
        }
    }

    /// Whether the kind participates in the cross-view item-selection
    /// contract (clicking an item opens its detail drawer).
    pub fn supports_selection(&self) -> bool {
        matches!(
            self,
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_round_trip() {
        for kind in ViewKind::ALL {
            assert_eq!(ViewKind::from_slug(kind.slug()), Some(kind));
        }
    }

    #[test]
    fn unknown_slug_is_none() {
        assert_eq!(ViewKind::from_slug("gantt"), None);
    }
}
