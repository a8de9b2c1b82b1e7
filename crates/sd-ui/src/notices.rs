//! Transient toast overlay for mutation failures

use std::time::Instant;

use egui::Context;

use crate::theme;

const NOTICE_TTL_SECS: u64 = 5;

/// Queue of short-lived messages drawn in the bottom-right corner.
#[derive(Default)]
pub struct NoticeOverlay {
    messages: Vec<(String, Instant)>,
}

impl NoticeOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push((message.into(), Instant::now()));
    }

    pub fn ui(&mut self, ctx: &Context) {
        let now = Instant::now();
        self.messages
            .retain(|(_, at)| now.duration_since(*at).as_secs() < NOTICE_TTL_SECS);
        if self.messages.is_empty() {
            return;
        }

        egui::Area::new("notice_overlay")
            .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -12.0])
            .show(ctx, |ui| {
                for (message, _) in &self.messages {
                    egui::Frame::popup(ui.style())
                        .stroke(egui::Stroke::new(1.0, theme::warning_color()))
                        .show(ui, |ui| {
                            ui.label(message);
                        });
                }
            });
    }
}
