//! Chart Viewer Widget
//! Scrollable column of figure panels, one interactive plot per panel.

use crate::charts::{ChartPlotter, Figure};
use egui::{RichText, ScrollArea};

const PANEL_SPACING: f32 = 15.0;

/// Scrollable display of a single figure.
pub struct ChartViewer {
    figure: Figure,
}

impl ChartViewer {
    pub fn new(figure: Figure) -> Self {
        Self { figure }
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// Draw every panel of the figure stacked vertically.
    pub fn show(&self, ui: &mut egui::Ui) {
        if self.figure.panels.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (i, panel) in self.figure.panels.iter().enumerate() {
                    let id = format!("{}_{i}", self.figure.slug);
                    egui::Frame::none()
                        .rounding(8.0)
                        .fill(ui.visuals().widgets.noninteractive.bg_fill)
                        .inner_margin(12.0)
                        .show(ui, |ui| {
                            ChartPlotter::draw_panel(ui, &id, panel);
                        });
                    ui.add_space(PANEL_SPACING);
                }
            });
    }
}
