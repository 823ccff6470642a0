//! # Wheel popup
//! The borderless, wheel-shaped popup. It owns its rendered image and shape, tracks the pointer to
//! dismiss itself shortly after the pointer wanders off, and turns clicks into picked colors.
//!
//! The popup never tears itself down - it reports picks and arms its dismiss timer, and the
//! [`ColorSelector`](crate::selector::ColorSelector) that owns it does the rest.

use crate::{
    color::Hsv,
    timer::{TimerHandle, TimerQueue},
    wheel::{self, ClipMask, WheelImage},
};
use az::Az;

/// How long the pointer may leave the popup before it is dismissed.
pub const DEFAULT_DISMISS_DELAY: std::time::Duration = std::time::Duration::from_millis(200);

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum CursorShape {
    Default,
    Crosshair,
}

/// Timers a popup may arm.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PopupTimer {
    Dismiss,
}

/// Pointer events delivered to the popup. Positions are popup-local pixels.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum WheelEvent {
    /// Pointer entered the popup's shape.
    Enter,
    /// Pointer left the popup's shape.
    Leave,
    Press {
        button: PointerButton,
        position: [f32; 2],
    },
    Motion {
        position: [f32; 2],
    },
    Release {
        button: PointerButton,
        position: [f32; 2],
    },
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PointerState {
    /// Freshly opened, the pointer hasn't come or gone yet.
    Idle,
    Inside,
    /// Pointer left, and the popup will be dismissed when this timer fires.
    PendingDismiss(TimerHandle),
}

pub struct WheelPopup {
    color: Hsv,
    /// Button that started the current press, if any.
    pressed: Option<PointerButton>,
    pointer: PointerState,
    image: WheelImage,
    mask: ClipMask,
    revision: u64,
    origin: [f32; 2],
}
impl WheelPopup {
    /// Cursor to show for as long as the popup is open.
    pub const CURSOR: CursorShape = CursorShape::Crosshair;

    /// Create and render a popup for `color`, centered on `pointer` (in screen coordinates).
    #[must_use]
    pub fn new(color: Hsv, pointer: [f32; 2]) -> Self {
        let color = color.normalized();
        let image = WheelImage::rendered(color);
        let mask = ClipMask::from_alpha(&image);
        let half = (wheel::SIZE / 2).az::<f32>();
        Self {
            color,
            pressed: None,
            pointer: PointerState::Idle,
            image,
            mask,
            revision: 0,
            origin: [pointer[0] - half, pointer[1] - half],
        }
    }
    #[must_use]
    pub fn color(&self) -> Hsv {
        self.color
    }
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed.is_some()
    }
    #[must_use]
    pub fn pointer_state(&self) -> PointerState {
        self.pointer
    }
    #[must_use]
    pub fn image(&self) -> &WheelImage {
        &self.image
    }
    #[must_use]
    pub fn mask(&self) -> &ClipMask {
        &self.mask
    }
    /// Incremented every time the image and mask are re-rendered.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
    /// Top-left corner of the popup, in screen coordinates.
    #[must_use]
    pub fn origin(&self) -> [f32; 2] {
        self.origin
    }
    /// Whether a popup-local point lies within the popup's shape.
    #[must_use]
    pub fn contains(&self, [x, y]: [f32; 2]) -> bool {
        self.mask.contains(x, y)
    }
    /// Is this the timer that will dismiss the popup?
    #[must_use]
    pub fn is_dismiss_timer(&self, handle: TimerHandle) -> bool {
        self.pointer == PointerState::PendingDismiss(handle)
    }
    /// Re-render the image and shape for the current color.
    pub fn render(&mut self) {
        wheel::render(&mut self.image, self.color);
        self.mask = ClipMask::from_alpha(&self.image);
        self.revision = self.revision.wrapping_add(1);
    }
    /// Pick a new color at a popup-local point. Does not re-render.
    pub fn pick(&mut self, [x, y]: [f32; 2]) -> Hsv {
        self.color = wheel::pick(x, y, self.color);
        self.color
    }
    pub fn enter(&mut self, timers: &mut TimerQueue<PopupTimer>) {
        self.disarm(timers);
        self.pointer = PointerState::Inside;
    }
    /// Pointer left, arm the dismiss timer. Replaces an already armed one.
    pub fn leave(
        &mut self,
        timers: &mut TimerQueue<PopupTimer>,
        now: std::time::Duration,
        delay: std::time::Duration,
    ) {
        self.disarm(timers);
        let handle = timers.schedule(now, delay, PopupTimer::Dismiss);
        log::trace!("pointer left wheel, dismissing in {delay:?}");
        self.pointer = PointerState::PendingDismiss(handle);
    }
    /// Returns the picked color, if any.
    pub fn press(&mut self, button: PointerButton, position: [f32; 2]) -> Option<Hsv> {
        self.pressed = Some(button);
        (button == PointerButton::Primary).then(|| self.pick(position))
    }
    /// Dragging with the primary button picks continuously, without re-rendering.
    pub fn motion(&mut self, position: [f32; 2]) -> Option<Hsv> {
        (self.pressed == Some(PointerButton::Primary)).then(|| self.pick(position))
    }
    /// Releasing the primary button after a press picks one last time and re-renders.
    pub fn release(&mut self, button: PointerButton, position: [f32; 2]) -> Option<Hsv> {
        let was_pressed = self.pressed.take().is_some();
        if was_pressed && button == PointerButton::Primary {
            let picked = self.pick(position);
            self.render();
            Some(picked)
        } else {
            None
        }
    }
    /// Dispatch an event, returning a newly picked color, if any.
    pub fn handle(
        &mut self,
        event: WheelEvent,
        timers: &mut TimerQueue<PopupTimer>,
        now: std::time::Duration,
        dismiss_delay: std::time::Duration,
    ) -> Option<Hsv> {
        match event {
            WheelEvent::Enter => {
                self.enter(timers);
                None
            }
            WheelEvent::Leave => {
                self.leave(timers, now, dismiss_delay);
                None
            }
            WheelEvent::Press { button, position } => self.press(button, position),
            WheelEvent::Motion { position } => self.motion(position),
            WheelEvent::Release { button, position } => self.release(button, position),
        }
    }
    /// Cancel anything this popup has armed. Done by the owner when tearing the popup down.
    pub fn disarm(&mut self, timers: &mut TimerQueue<PopupTimer>) {
        if let PointerState::PendingDismiss(handle) = self.pointer {
            timers.cancel(handle);
            self.pointer = PointerState::Idle;
        }
    }
}
