// ui.rs - Draws the board and the control strip

use eframe::egui;
use egui::{Color32, Rect, Sense, Stroke, Vec2};

use crate::app::LifeApp;
use conway::PATTERNS;

const BOARD_PIXELS: f32 = 750.0;
const SPACING: f32 = 0.5;

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.collect_finished_ticker();
        if self.has_ticker() {
            // The last sink repaint can land before the task has exited.
            ctx.request_repaint_after(self.options.interval);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.is_running() { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.toggle_running();
                }

                if ui.button("⏭ Step").clicked() {
                    self.step_once();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.clear();
                }

                if ui.button("🎲 Random").clicked() {
                    self.randomize();
                }

                ui.separator();

                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.apply_selected_pattern();
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.generation()));
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = self.speed();
                let slider = ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec"));
                if slider.changed() {
                    self.set_speed(speed);
                }
                // Restart the ticker once per drag, not once per frame.
                if slider.drag_released() || (slider.changed() && !slider.dragged()) {
                    self.apply_speed();
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            if let Some(status) = &self.status {
                ui.label(status.as_str());
            }

            ui.separator();
            ui.label("Click cells to toggle them while paused.");
            ui.separator();

            let snapshot = self.snapshot();
            let longest = snapshot.width.max(snapshot.height) as f32;
            let box_size = ((BOARD_PIXELS / longest) - SPACING).clamp(1.0, 15.0);
            let pitch = box_size + SPACING;
            let board_size = Vec2::new(
                pitch * snapshot.width as f32 - SPACING,
                pitch * snapshot.height as f32 - SPACING,
            );

            let (response, painter) = ui.allocate_painter(board_size, Sense::click());
            let origin = response.rect.min;

            painter.rect_filled(response.rect, 0.0, Color32::BLACK);

            for y in 0..snapshot.height {
                for x in 0..snapshot.width {
                    let rect = Rect::from_min_size(
                        origin + Vec2::new(x as f32 * pitch, y as f32 * pitch),
                        Vec2::splat(box_size),
                    );
                    let color = if snapshot.is_alive(x, y) { self.live_color } else { self.dead_color };
                    painter.rect_filled(rect, 1.0, color);
                    if box_size >= 4.0 {
                        painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                    }
                }
            }

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let offset = pos - origin;
                    if offset.x >= 0.0 && offset.y >= 0.0 {
                        self.toggle_cell((offset.x / pitch) as usize, (offset.y / pitch) as usize);
                    }
                }
            }

            ui.separator();

            let live = snapshot.live_count();
            let total = snapshot.cells.len();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {live}"));
                ui.label(format!("Dead cells: {}", total - live));
                ui.label(format!("Population: {:.1}%", live as f32 / total as f32 * 100.0));
            });
        });
    }
}
