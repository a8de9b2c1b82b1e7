//! Demo workspace
//!
//! A self-contained in-memory deployment: module registry, bindings,
//! schemas, seeded backend and one custom-rendered tab. Everything the
//! shell needs to run without a real server.

use std::sync::Arc;

use sd_core::{
    DataRow, FieldDescriptor, FieldKind, ModuleDescriptor, ModuleRegistry, SchemaRegistry,
    TabDescriptor, TableBindings, ViewKind, FALLBACK_COLLECTION,
};
use sd_data::InMemoryBackend;
use sd_views::CustomRegistry;
use serde_json::json;

pub fn registry() -> ModuleRegistry {
    ModuleRegistry::new(vec![
        ModuleDescriptor::new("dashboard", "Dashboard", "🏠").with_tabs([
            TabDescriptor::new("overview", "Overview", ViewKind::List),
            TabDescriptor::new("widgets", "Widgets", ViewKind::Table)
                .with_views([ViewKind::Table, ViewKind::List]),
        ]),
        ModuleDescriptor::new("productions", "Productions", "🎬").with_tabs([
            TabDescriptor::new("overview", "Overview", ViewKind::Board).with_views([
                ViewKind::Board,
                ViewKind::List,
                ViewKind::Table,
                ViewKind::Timeline,
                ViewKind::Portfolio,
            ]),
            TabDescriptor::new("crew", "Crew", ViewKind::Table)
                .with_views([ViewKind::Table, ViewKind::List, ViewKind::Box]),
        ]),
        ModuleDescriptor::new("events", "Events", "🎪").with_tabs([
            TabDescriptor::new("schedule", "Schedule", ViewKind::Calendar).with_views([
                ViewKind::Calendar,
                ViewKind::List,
                ViewKind::Timeline,
                ViewKind::Table,
            ]),
            TabDescriptor::new("lineup", "Lineup", ViewKind::List)
                .with_views([ViewKind::List, ViewKind::Board, ViewKind::Table]),
        ]),
        ModuleDescriptor::new("assets", "Assets", "📦").with_tabs([TabDescriptor::new(
            "inventory",
            "Inventory",
            ViewKind::Table,
        )
        .with_views([ViewKind::Table, ViewKind::List, ViewKind::Board])]),
        ModuleDescriptor::new("finance", "Finance", "💰").with_tabs([
            TabDescriptor::new("expenses", "Expenses", ViewKind::Table)
                .with_views([ViewKind::Table, ViewKind::List, ViewKind::Activity]),
            TabDescriptor::new("budgets", "Budgets", ViewKind::Financial)
                .with_views([ViewKind::Financial, ViewKind::Table]),
        ]),
        ModuleDescriptor::new("reports", "Reports", "📊").with_tabs([TabDescriptor::new(
            "overview",
            "Overview",
            ViewKind::Table,
        )
        .with_views([ViewKind::Table, ViewKind::List])]),
        ModuleDescriptor::new("community", "Community", "👥").with_tabs([TabDescriptor::new(
            "members",
            "Members",
            ViewKind::Box,
        )
        .with_views([ViewKind::Box, ViewKind::List, ViewKind::Table])]),
    ])
}

pub fn bindings() -> TableBindings {
    TableBindings::new(FALLBACK_COLLECTION)
        .with_tab_default("overview", "productions")
        .with_tab_default("schedule", "events")
        .with_tab_default("lineup", "bookings")
        .with_tab_default("crew", "crew_members")
        .with_tab_default("inventory", "assets")
        .with_tab_default("expenses", "transactions")
        .with_tab_default("budgets", "budgets")
        .with_tab_default("members", "members")
        .with_tab_default("widgets", "dashboard_widgets")
        // Reports reads templates, not productions, despite the shared
        // tab slug.
        .with_override("reports", "overview", "report_templates")
}

pub fn schemas() -> SchemaRegistry {
    let mut schemas = SchemaRegistry::new();

    let production_fields = vec![
        FieldDescriptor::new("title", FieldKind::Text, "Title"),
        FieldDescriptor::new("status", FieldKind::Enum, "Status"),
        FieldDescriptor::new("start_date", FieldKind::Date, "Start date"),
        FieldDescriptor::new("budget", FieldKind::Currency, "Budget"),
        FieldDescriptor::new("producer_id", FieldKind::Reference, "Producer").hidden(),
    ];
    schemas.insert("productions", "overview", production_fields.clone());
    schemas.insert("dashboard", "overview", production_fields);

    schemas.insert(
        "productions",
        "crew",
        vec![
            FieldDescriptor::new("name", FieldKind::Text, "Name"),
            FieldDescriptor::new("role", FieldKind::Enum, "Role"),
            FieldDescriptor::new("day_rate", FieldKind::Currency, "Day rate"),
            FieldDescriptor::new("confirmed", FieldKind::Bool, "Confirmed"),
        ],
    );

    schemas.insert(
        "events",
        "schedule",
        vec![
            FieldDescriptor::new("name", FieldKind::Text, "Name"),
            FieldDescriptor::new("venue", FieldKind::Text, "Venue"),
            FieldDescriptor::new("date", FieldKind::Date, "Date"),
            FieldDescriptor::new("status", FieldKind::Enum, "Status"),
        ],
    );
    schemas.insert(
        "events",
        "lineup",
        vec![
            FieldDescriptor::new("artist_name", FieldKind::Text, "Artist"),
            FieldDescriptor::new("stage", FieldKind::Enum, "Stage"),
            FieldDescriptor::new("fee", FieldKind::Currency, "Fee"),
            FieldDescriptor::new("date", FieldKind::Date, "Date"),
        ],
    );

    schemas.insert(
        "assets",
        "inventory",
        vec![
            FieldDescriptor::new("name", FieldKind::Text, "Name"),
            FieldDescriptor::new("category", FieldKind::Enum, "Category"),
            FieldDescriptor::new("quantity", FieldKind::Number, "Quantity"),
            FieldDescriptor::new("serial", FieldKind::Text, "Serial").unsortable(),
        ],
    );

    schemas.insert(
        "finance",
        "expenses",
        vec![
            FieldDescriptor::new("description", FieldKind::Text, "Description"),
            FieldDescriptor::new("category", FieldKind::Enum, "Category"),
            FieldDescriptor::new("amount", FieldKind::Currency, "Amount"),
            FieldDescriptor::new("created_at", FieldKind::Date, "Logged"),
        ],
    );
    schemas.insert(
        "finance",
        "budgets",
        vec![
            FieldDescriptor::new("name", FieldKind::Text, "Name"),
            FieldDescriptor::new("allocated", FieldKind::Currency, "Allocated"),
            FieldDescriptor::new("spent", FieldKind::Currency, "Spent"),
        ],
    );

    schemas.insert(
        "reports",
        "overview",
        vec![
            FieldDescriptor::new("name", FieldKind::Text, "Name"),
            FieldDescriptor::new("kind", FieldKind::Enum, "Kind"),
        ],
    );

    schemas.insert(
        "community",
        "members",
        vec![
            FieldDescriptor::new("name", FieldKind::Text, "Name"),
            FieldDescriptor::new("role", FieldKind::Enum, "Role"),
            FieldDescriptor::new("email", FieldKind::Text, "Email"),
        ],
    );

    // dashboard/widgets deliberately has no schema: that tab exercises
    // the row-introspection fallback.

    schemas
}

pub fn customs() -> CustomRegistry {
    let mut customs = CustomRegistry::new();
    customs.register(
        "dashboard",
        "overview",
        Box::new(|ctx: &sd_core::AmbientContext, ui: &mut egui::Ui| {
            ui.add_space(16.0);
            ui.heading(format!("Welcome back, {}", ctx.session.user_id));
            ui.weak(format!("Workspace: {}", ctx.session.workspace_id));
            ui.add_space(8.0);
            ui.label("Jump into a module above to manage your productions.");
            Ok(())
        }),
    );
    customs
}

pub fn workspaces() -> Vec<String> {
    vec!["tourco".into(), "brightside".into()]
}

fn rows(values: Vec<serde_json::Value>) -> Vec<DataRow> {
    values.into_iter().filter_map(DataRow::from_value).collect()
}

/// Seed both workspaces so the workspace switcher shows disjoint data.
pub fn backend() -> Arc<InMemoryBackend> {
    let backend = Arc::new(InMemoryBackend::new());

    backend.seed(
        "productions",
        rows(vec![
            json!({
                "id": "p1", "workspace_id": "tourco",
                "title": "Midnight Run Tour", "status": "active",
                "start_date": "2026-09-04", "budget": 250000.0,
            }),
            json!({
                "id": "p2", "workspace_id": "tourco",
                "title": "Harbor Lights Festival", "status": "planning",
                "start_date": "2026-11-20", "budget": 480000.0,
            }),
            json!({
                "id": "p3", "workspace_id": "tourco",
                "title": "Winter Acoustic Sessions", "status": "wrapped",
                "start_date": "2026-01-12", "budget": 60000.0,
            }),
            json!({
                "id": "p4", "workspace_id": "brightside",
                "title": "Brightside Showcase", "status": "active",
                "start_date": "2026-10-02", "budget": 95000.0,
            }),
        ]),
    );

    backend.seed(
        "events",
        rows(vec![
            json!({
                "id": "e1", "workspace_id": "tourco",
                "name": "Opening Night", "venue": "Astra Hall",
                "date": "2026-09-04", "status": "confirmed",
            }),
            json!({
                "id": "e2", "workspace_id": "tourco",
                "name": "Riverside Stop", "venue": "Pier 9",
                "date": "2026-09-11", "status": "confirmed",
            }),
            json!({
                "id": "e3", "workspace_id": "tourco",
                "name": "Closing Gala", "venue": "Grand Meridian",
                "date": "2026-10-30", "status": "hold",
            }),
            json!({
                "id": "e4", "workspace_id": "brightside",
                "name": "Showcase Night", "venue": "Loft 22",
                "date": "2026-10-02", "status": "confirmed",
            }),
        ]),
    );

    backend.seed(
        "bookings",
        rows(vec![
            json!({
                "id": "b1", "workspace_id": "tourco",
                "artist_name": "The Hollow Pines", "stage": "main",
                "fee": 12000.0, "date": "2026-09-04",
            }),
            json!({
                "id": "b2", "workspace_id": "tourco",
                "artist_name": "Mara Venn", "stage": "acoustic",
                "fee": 4500.0, "date": "2026-09-11",
            }),
            json!({
                "id": "b3", "workspace_id": "tourco",
                "artist_name": "Static Bloom", "stage": "main",
                "fee": 9000.0, "date": "2026-10-30",
            }),
        ]),
    );

    backend.seed(
        "crew_members",
        rows(vec![
            json!({
                "id": "c1", "workspace_id": "tourco",
                "name": "Jo Reyes", "role": "production_manager",
                "day_rate": 650.0, "confirmed": true,
            }),
            json!({
                "id": "c2", "workspace_id": "tourco",
                "name": "Sam Okafor", "role": "foh_engineer",
                "day_rate": 520.0, "confirmed": true,
            }),
            json!({
                "id": "c3", "workspace_id": "tourco",
                "name": "Lena Kovac", "role": "lighting_designer",
                "day_rate": 540.0, "confirmed": false,
            }),
        ]),
    );

    backend.seed(
        "assets",
        rows(vec![
            json!({
                "id": "a1", "workspace_id": "tourco",
                "name": "Line array L", "category": "audio",
                "quantity": 8, "serial": "LA-2291",
            }),
            json!({
                "id": "a2", "workspace_id": "tourco",
                "name": "Moving head wash", "category": "lighting",
                "quantity": 16, "serial": "MH-0087",
            }),
            json!({
                "id": "a3", "workspace_id": "tourco",
                "name": "Stage deck 2x1", "category": "staging",
                "quantity": 40, "serial": "SD-1140",
            }),
        ]),
    );

    backend.seed(
        "transactions",
        rows(vec![
            json!({
                "id": "t1", "workspace_id": "tourco",
                "description": "Trucking deposit", "category": "logistics",
                "amount": 8200.0, "created_at": "2026-08-02",
            }),
            json!({
                "id": "t2", "workspace_id": "tourco",
                "description": "Backline rental", "category": "equipment",
                "amount": 3100.0, "created_at": "2026-08-14",
            }),
        ]),
    );

    backend.seed(
        "budgets",
        rows(vec![
            json!({
                "id": "g1", "workspace_id": "tourco",
                "name": "Production", "allocated": 120000.0, "spent": 41000.0,
            }),
            json!({
                "id": "g2", "workspace_id": "tourco",
                "name": "Artist fees", "allocated": 80000.0, "spent": 25500.0,
            }),
        ]),
    );

    backend.seed(
        "report_templates",
        rows(vec![
            json!({
                "id": "r1", "workspace_id": "tourco",
                "name": "Settlement summary", "kind": "financial",
            }),
            json!({
                "id": "r2", "workspace_id": "tourco",
                "name": "Crew roster", "kind": "operations",
            }),
        ]),
    );

    backend.seed(
        "members",
        rows(vec![
            json!({
                "id": "m1", "workspace_id": "tourco",
                "name": "Ava Lindqvist", "role": "admin",
                "email": "ava@tourco.example",
            }),
            json!({
                "id": "m2", "workspace_id": "tourco",
                "name": "Noor Haddad", "role": "member",
                "email": "noor@tourco.example",
            }),
        ]),
    );

    backend.seed(
        "dashboard_widgets",
        rows(vec![
            json!({
                "id": "w1", "workspace_id": "tourco",
                "title": "Upcoming events", "position": 1,
            }),
            json!({
                "id": "w2", "workspace_id": "tourco",
                "title": "Budget burn", "position": 2,
            }),
        ]),
    );

    backend
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tab_resolves_to_a_collection() {
        let registry = registry();
        let bindings = bindings();
        for module in registry.modules() {
            for tab in &module.tabs {
                let collection = bindings.resolve(&module.slug, &tab.slug);
                assert!(!collection.is_empty(), "{}/{}", module.slug, tab.slug);
            }
        }
    }

    #[test]
    fn reports_overview_reads_templates() {
        let bindings = bindings();
        assert_eq!(bindings.resolve("reports", "overview"), "report_templates");
        assert_eq!(bindings.resolve("productions", "overview"), "productions");
        assert_eq!(bindings.resolve("community", "members"), "members");
    }

    #[test]
    fn widgets_tab_relies_on_row_introspection() {
        let schemas = schemas();
        assert!(schemas.lookup("dashboard", "widgets").is_none());
        assert!(schemas.lookup("dashboard", "overview").is_some());
    }
}
