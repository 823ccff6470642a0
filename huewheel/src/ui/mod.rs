mod color_wheel;

use egui::Ui;
use huewheel_core::{
    palette::Palette,
    selector::{ColorSelector, WheelToggle},
    Hsv, Rgb, SharedColor,
};

/// egui's stock RGB color editor, as a [`Palette`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EditPalette {
    rgb: [f32; 3],
}
impl Palette for EditPalette {
    fn current_color(&self) -> Rgb {
        self.rgb.into()
    }
    fn set_current_color(&mut self, color: Rgb) {
        self.rgb = color.as_array();
    }
}
impl EditPalette {
    /// Show the editor, returning true if the user changed the color.
    fn ui(&mut self, ui: &mut Ui) -> bool {
        let mut rgb = self.rgb;
        let changed = egui::color_picker::color_edit_button_rgb(ui, &mut rgb).changed();
        if changed {
            // egui never hands back out-of-range channels, but that's on it and not on us.
            self.rgb = rgb.map(huewheel_core::color::clamp01);
        }
        changed
    }
}

/// The color window: palette editor plus the wheel popup it can summon.
pub struct ColorWindow {
    selector: ColorSelector<EditPalette>,
    wheel_view: color_wheel::WheelView,
    toggle_key: egui::Key,
    /// Revision of the shared color last seen, to notice changes made by others.
    seen_revision: u64,
}
impl ColorWindow {
    #[must_use]
    pub fn new(shared: SharedColor, settings: &crate::global::settings::Settings) -> Self {
        let mut selector =
            ColorSelector::new(EditPalette::default(), shared, settings.selector_config());
        selector.update();
        let seen_revision = selector.shared().revision();
        Self {
            selector,
            wheel_view: color_wheel::WheelView::default(),
            toggle_key: settings.toggle_key(),
            seen_revision,
        }
    }
    #[must_use]
    pub fn is_wheel_open(&self) -> bool {
        self.selector.is_wheel_open()
    }
    /// Toggle the wheel as if by hotkey with the pointer at `pointer`.
    pub fn toggle_wheel(&mut self, pointer: egui::Pos2) -> WheelToggle {
        let toggle = self.selector.toggle_wheel([pointer.x, pointer.y]);
        if toggle == WheelToggle::Opened {
            self.wheel_view.reset();
        }
        toggle
    }
    pub fn ui(&mut self, ctx: &egui::Context) {
        let now = std::time::Duration::from_secs_f64(ctx.input(|input| input.time).max(0.0));
        self.selector.tick(now);

        let revision = self.selector.shared().revision();
        if revision != self.seen_revision {
            self.selector.update();
        }

        let (toggle_pressed, escape_pressed, pointer) = ctx.input(|input| {
            (
                input.key_pressed(self.toggle_key),
                input.key_pressed(egui::Key::Escape),
                input.pointer.hover_pos(),
            )
        });
        // Don't eat keys meant for a text field.
        let typing = ctx.wants_keyboard_input();

        // Before the panel, so the panel's widgets know whether the wheel has the pointer.
        self.wheel_view.show(ctx, &mut self.selector, now);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Color");
            ui.separator();
            if self.selector.palette_mut().ui(ui) {
                self.selector.on_color_changed();
            }
            let Hsv { h, s, v } = self.selector.get_color();
            ui.label(format!("H {h:.3}  S {s:.3}  V {v:.3}"));

            let wheel_button = ui
                .button("Wheel")
                .on_hover_text(format!("Or press {}", self.toggle_key.name()));
            if wheel_button.clicked() {
                self.toggle_wheel(wheel_button.rect.center());
            }
            brush_preview(ui, self.selector.shared());
        });

        if toggle_pressed && !typing {
            let pointer = pointer.unwrap_or_else(|| ctx.screen_rect().center());
            self.toggle_wheel(pointer);
        }
        if escape_pressed {
            self.selector.close_wheel();
        }

        // A wheel opened this frame is first shown next frame.
        if self.selector.is_wheel_open() && !self.wheel_view.is_seeded() {
            ctx.request_repaint();
        }
        self.seen_revision = self.selector.shared().revision();

        if let Some(wakeup) = self.selector.next_wakeup() {
            ctx.request_repaint_after(wakeup.saturating_sub(now));
        }
    }
}
impl eframe::App for ColorWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}

/// Swatch of the shared brush color, as the rest of the app would see it.
fn brush_preview(ui: &mut Ui, shared: &SharedColor) {
    let [r, g, b] = shared.get().to_rgb().to_rgb8();
    ui.horizontal(|ui| {
        ui.label("Brush");
        let size = egui::Vec2::splat(ui.style().spacing.interact_size.y);
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        ui.painter().rect(
            rect,
            0.0,
            egui::Color32::from_rgb(r, g, b),
            ui.style().visuals.noninteractive().bg_stroke,
        );
    });
}
