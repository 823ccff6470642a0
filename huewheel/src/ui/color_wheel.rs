//! Hosting the wheel popup in egui: upload its image, place it under the pointer, and turn
//! egui's pointer events into enter/leave/press/release against the wheel's shape.

use az::Az;
use huewheel_core::{
    palette::Palette,
    popup::{CursorShape, PointerButton, WheelEvent, WheelPopup},
    selector::ColorSelector,
    wheel,
};

/// A pointer event in popup-local coordinates, before shape hit-testing.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum RawPointer {
    Moved([f32; 2]),
    Button {
        button: PointerButton,
        pressed: bool,
        position: [f32; 2],
    },
    /// Pointer left the window entirely.
    Gone,
}

/// Tracks whether the pointer is within the popup's shape, emulating the enter and leave
/// notifications a shaped native window would get.
#[derive(Default, Clone, Copy, Debug)]
pub struct PointerTracker {
    inside: bool,
}
impl PointerTracker {
    #[must_use]
    pub fn is_inside(&self) -> bool {
        self.inside
    }
    /// Translate a raw event into events for the popup. `contains` tests a popup-local point against the shape.
    pub fn translate(
        &mut self,
        raw: RawPointer,
        contains: impl Fn([f32; 2]) -> bool,
    ) -> smallvec::SmallVec<[WheelEvent; 2]> {
        let mut events = smallvec::SmallVec::new();
        match raw {
            RawPointer::Moved(position) => {
                self.crossing(contains(position), &mut events);
                events.push(WheelEvent::Motion { position });
            }
            RawPointer::Button {
                button,
                pressed: true,
                position,
            } => {
                self.crossing(contains(position), &mut events);
                // Clicks outside the shape fall through the popup.
                if self.inside {
                    events.push(WheelEvent::Press { button, position });
                }
            }
            // The popup grabs the pointer on press, so releases are delivered wherever they happen.
            RawPointer::Button {
                button,
                pressed: false,
                position,
            } => events.push(WheelEvent::Release { button, position }),
            RawPointer::Gone => self.crossing(false, &mut events),
        }
        events
    }
    /// Start tracking a freshly shown popup, which may have appeared right under the pointer.
    /// Returns `Leave` when the pointer starts off the shape (or off the window).
    pub fn seed(&mut self, inside: bool) -> WheelEvent {
        self.inside = inside;
        if inside {
            WheelEvent::Enter
        } else {
            WheelEvent::Leave
        }
    }
    fn crossing(&mut self, inside: bool, events: &mut smallvec::SmallVec<[WheelEvent; 2]>) {
        match (self.inside, inside) {
            (false, true) => events.push(WheelEvent::Enter),
            (true, false) => events.push(WheelEvent::Leave),
            _ => (),
        }
        self.inside = inside;
    }
}

fn button_from_egui(button: egui::PointerButton) -> PointerButton {
    match button {
        egui::PointerButton::Primary => PointerButton::Primary,
        egui::PointerButton::Secondary => PointerButton::Secondary,
        egui::PointerButton::Middle => PointerButton::Middle,
        egui::PointerButton::Extra1 => PointerButton::Other(4),
        egui::PointerButton::Extra2 => PointerButton::Other(5),
    }
}
fn cursor_to_egui(cursor: CursorShape) -> egui::CursorIcon {
    match cursor {
        CursorShape::Default => egui::CursorIcon::Default,
        CursorShape::Crosshair => egui::CursorIcon::Crosshair,
    }
}

/// Per-popup egui resources. Call [`Self::reset`] whenever a new popup is opened.
#[derive(Default)]
pub struct WheelView {
    /// Uploaded wheel, and the popup revision it was uploaded from.
    texture: Option<(egui::TextureHandle, u64)>,
    tracker: PointerTracker,
    seeded: bool,
}
impl WheelView {
    /// Layer the popup is drawn on.
    #[must_use]
    pub fn layer_id() -> egui::LayerId {
        egui::LayerId::new(egui::Order::Foreground, egui::Id::new("huewheel-popup"))
    }
    pub fn reset(&mut self) {
        self.texture = None;
        self.tracker = PointerTracker::default();
        self.seeded = false;
    }
    #[must_use]
    pub fn is_uploaded(&self) -> bool {
        self.texture.is_some()
    }
    /// Has the popup been told where the pointer was when it appeared?
    #[must_use]
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }
    fn texture_for(&mut self, ctx: &egui::Context, popup: &WheelPopup) -> egui::TextureId {
        let revision = popup.revision();
        let image = || {
            egui::ColorImage::from_rgba_unmultiplied(popup.image().size(), popup.image().as_bytes())
        };
        match &mut self.texture {
            Some((handle, uploaded)) => {
                if *uploaded != revision {
                    handle.set(image(), egui::TextureOptions::NEAREST);
                    *uploaded = revision;
                }
                handle.id()
            }
            None => {
                let handle =
                    ctx.load_texture("huewheel-wheel", image(), egui::TextureOptions::NEAREST);
                let id = handle.id();
                self.texture = Some((handle, revision));
                id
            }
        }
    }
    /// Feed the popup (if open) this frame's pointer events, then draw it.
    ///
    /// Call before drawing anything the popup may cover: the popup only takes the pointer
    /// away from widgets underneath while the pointer is over its shape, and that's decided here.
    pub fn show<P: Palette>(
        &mut self,
        ctx: &egui::Context,
        selector: &mut ColorSelector<P>,
        now: std::time::Duration,
    ) {
        let Some(popup) = selector.wheel() else {
            self.reset();
            return;
        };
        let [x, y] = popup.origin();
        let origin = egui::pos2(x, y);
        let local = |pos: egui::Pos2| [pos.x - origin.x, pos.y - origin.y];

        if !self.seeded {
            let hover = ctx.input(|input| input.pointer.hover_pos());
            let inside = hover.is_some_and(|pos| popup.contains(local(pos)));
            let event = self.tracker.seed(inside);
            self.seeded = true;
            selector.handle_wheel_event(event, now);
        }

        let raw: Vec<RawPointer> = ctx.input(|input| {
            input
                .events
                .iter()
                .filter_map(|event| match *event {
                    egui::Event::PointerMoved(pos) => Some(RawPointer::Moved(local(pos))),
                    egui::Event::PointerButton {
                        pos,
                        button,
                        pressed,
                        ..
                    } => Some(RawPointer::Button {
                        button: button_from_egui(button),
                        pressed,
                        position: local(pos),
                    }),
                    egui::Event::PointerGone => Some(RawPointer::Gone),
                    _ => None,
                })
                .collect()
        });

        for raw in raw {
            // The popup may be dismissed partway through, eg. by a toggle.
            let Some(popup) = selector.wheel() else {
                break;
            };
            // A release re-renders, so the shape is looked up again for every event.
            let events = self.tracker.translate(raw, |point| popup.contains(point));
            for event in events {
                selector.handle_wheel_event(event, now);
            }
        }

        let Some(popup) = selector.wheel() else {
            self.reset();
            return;
        };
        let texture = self.texture_for(ctx, popup);
        let size = egui::Vec2::splat(wheel::SIZE.az::<f32>());
        let inside = self.tracker.is_inside();

        // egui hit-tests layers by rectangle. Off the shape the popup must not be interactable,
        // or its transparent parts would swallow clicks meant for what's underneath.
        let layer = Self::layer_id();
        egui::Area::new(layer.id)
            .order(layer.order)
            .fixed_pos(origin)
            .interactable(inside)
            .show(ctx, |ui| {
                let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                ui.painter().image(
                    texture,
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            });

        if inside {
            ctx.set_cursor_icon(cursor_to_egui(WheelPopup::CURSOR));
        }
    }
}
