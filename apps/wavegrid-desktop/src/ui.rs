use egui::Context as EguiContext;
use wavegrid_common::{ParamId, ParamStore};
use wavegrid_tools::StatsSummary;

/// Slider panel for the seven wave parameters.
///
/// Sliders edit a local copy and write back through the store, so the
/// store's clamping applies to every change.
pub fn tuning_panel(ctx: &EguiContext, store: &ParamStore, open: &mut bool) {
    egui::Window::new("Wave parameters")
        .open(open)
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| {
            for id in ParamId::ALL {
                let range = id.range();
                let mut value = store.get(id);
                let response = ui.add(
                    egui::Slider::new(&mut value, range.min..=range.max)
                        .step_by(f64::from(range.step))
                        .text(id.label()),
                );
                if response.changed() {
                    store.set(id, value);
                }
            }

            ui.separator();
            if ui.button("Reset").clicked() {
                store.reset();
            }
            ui.small("F1: panel | drag: orbit | wheel: zoom | R: camera");
        });
}

/// FPS and frame-time readout in the top-left corner.
pub fn stats_overlay(ctx: &EguiContext, summary: &StatsSummary, points: u32) {
    egui::Area::new(egui::Id::new("stats_overlay"))
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.monospace(summary.to_string());
                ui.monospace(format!("points: {points}"));
            });
        });
}
