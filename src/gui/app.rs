//! Figure Window
//! Native window showing one figure. Opening it blocks until it is closed,
//! so figures are inspected one at a time.

use crate::charts::{Figure, FigureSink, RenderError};
use crate::gui::ChartViewer;
use egui::RichText;
use tracing::info;

/// The eframe application behind one figure window.
pub struct FigureApp {
    viewer: ChartViewer,
}

impl FigureApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, figure: Figure) -> Self {
        Self {
            viewer: ChartViewer::new(figure),
        }
    }
}

impl eframe::App for FigureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("hint").show(ctx, |ui| {
            ui.label(RichText::new("Close this window to continue the analysis.").weak());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(&self.viewer.figure().title);
            ui.add_space(8.0);
            self.viewer.show(ui);
        });
    }
}

/// Shows each presented figure in its own blocking window.
#[derive(Debug, Default)]
pub struct WindowSink;

impl FigureSink for WindowSink {
    fn present(&mut self, figure: &Figure) -> Result<(), RenderError> {
        let (width, height) = figure.size;
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([width as f32, (height as f32).min(1000.0)])
                .with_min_inner_size([600.0, 400.0])
                .with_title(&figure.title),
            ..Default::default()
        };

        info!(figure = %figure.slug, "showing chart window");

        let app_name = figure.title.clone();
        let figure = figure.clone();
        eframe::run_native(
            &app_name,
            options,
            Box::new(move |cc| Ok(Box::new(FigureApp::new(cc, figure)))),
        )
        .map_err(|e| RenderError::Window(e.to_string()))
    }
}
