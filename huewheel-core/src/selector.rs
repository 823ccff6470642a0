//! # Selector
//! The primary color selector: a [`Palette`] widget kept in sync with the application's [`SharedColor`],
//! and the owner of the (at most one) [`WheelPopup`].

use crate::{
    color::Hsv,
    palette::Palette,
    popup::{PopupTimer, WheelEvent, WheelPopup, DEFAULT_DISMISS_DELAY},
    shared::SharedColor,
    timer::TimerQueue,
};
use std::time::Duration;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SelectorConfig {
    /// How long the pointer may leave the wheel before it is dismissed.
    pub dismiss_delay: Duration,
}
impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            dismiss_delay: DEFAULT_DISMISS_DELAY,
        }
    }
}

/// What [`ColorSelector::toggle_wheel`] did.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum WheelToggle {
    Opened,
    Closed,
}

pub struct ColorSelector<P> {
    palette: P,
    shared: SharedColor,
    wheel: Option<WheelPopup>,
    timers: TimerQueue<PopupTimer>,
    config: SelectorConfig,
}
impl<P: Palette> ColorSelector<P> {
    #[must_use]
    pub fn new(palette: P, shared: SharedColor, config: SelectorConfig) -> Self {
        Self {
            palette,
            shared,
            wheel: None,
            timers: TimerQueue::new(),
            config,
        }
    }
    #[must_use]
    pub fn palette(&self) -> &P {
        &self.palette
    }
    /// Access the palette widget directly. Call [`Self::on_color_changed`] after changing its color.
    pub fn palette_mut(&mut self) -> &mut P {
        &mut self.palette
    }
    #[must_use]
    pub fn shared(&self) -> &SharedColor {
        &self.shared
    }
    #[must_use]
    pub fn config(&self) -> SelectorConfig {
        self.config
    }
    pub fn set_config(&mut self, config: SelectorConfig) {
        self.config = config;
    }
    /// The palette's current color.
    ///
    /// # Panics
    /// If the palette reports a channel outside of `[0, 1]`.
    #[must_use]
    pub fn get_color(&self) -> Hsv {
        let rgb = self.palette.current_color();
        if let Err(err) = rgb.validated() {
            panic!("palette reported an invalid color: {err}");
        }
        rgb.to_hsv()
    }
    /// Normalize, then write into the palette. Like any other palette change, this is
    /// relayed into the shared color.
    pub fn set_color(&mut self, color: Hsv) {
        self.palette.set_current_color(color.normalized().to_rgb());
        self.on_color_changed();
    }
    /// The palette changed, relay it to the shared color.
    pub fn on_color_changed(&mut self) {
        self.shared.set(self.get_color());
    }
    /// The shared color changed elsewhere, pull it into the palette.
    pub fn update(&mut self) {
        self.set_color(self.shared.get());
    }
    /// Open the wheel centered on `pointer` (screen coordinates), or close it if it's already open.
    pub fn toggle_wheel(&mut self, pointer: [f32; 2]) -> WheelToggle {
        if self.close_wheel() {
            WheelToggle::Closed
        } else {
            log::debug!("opening color wheel at {pointer:?}");
            self.wheel = Some(WheelPopup::new(self.shared.get(), pointer));
            WheelToggle::Opened
        }
    }
    /// Remove the wheel, disarming its timers. Returns false if it was already closed.
    pub fn close_wheel(&mut self) -> bool {
        let Some(mut wheel) = self.wheel.take() else {
            return false;
        };
        wheel.disarm(&mut self.timers);
        log::debug!("closed color wheel");
        true
    }
    #[must_use]
    pub fn wheel(&self) -> Option<&WheelPopup> {
        self.wheel.as_ref()
    }
    #[must_use]
    pub fn is_wheel_open(&self) -> bool {
        self.wheel.is_some()
    }
    /// Forward a pointer event to the wheel, applying whatever it picks. Does nothing if the wheel is closed.
    pub fn handle_wheel_event(&mut self, event: WheelEvent, now: Duration) {
        let Some(wheel) = self.wheel.as_mut() else {
            return;
        };
        if let Some(picked) = wheel.handle(event, &mut self.timers, now, self.config.dismiss_delay) {
            log::trace!("picked {picked:?}");
            self.set_color(picked);
        }
    }
    /// Fire any timers due by `now`.
    pub fn tick(&mut self, now: Duration) {
        for (handle, timer) in self.timers.expire(now) {
            match timer {
                PopupTimer::Dismiss => {
                    // A stale handle from a popup that's already gone shouldn't close a new one.
                    if self
                        .wheel
                        .as_ref()
                        .is_some_and(|wheel| wheel.is_dismiss_timer(handle))
                    {
                        log::debug!("pointer stayed away, dismissing color wheel");
                        self.close_wheel();
                    }
                }
            }
        }
    }
    /// When [`Self::tick`] next has work to do, if ever.
    #[must_use]
    pub fn next_wakeup(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }
}

#[cfg(test)]
mod test {
    use super::{ColorSelector, SelectorConfig, WheelToggle};
    use crate::{
        color::{Hsv, Rgb},
        palette::{DevicePalette, Palette},
        popup::{PointerButton, PointerState, WheelEvent},
        shared::SharedColor,
    };
    use std::time::Duration;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }
    fn selector() -> ColorSelector<DevicePalette> {
        ColorSelector::new(
            DevicePalette::default(),
            SharedColor::default(),
            SelectorConfig::default(),
        )
    }
    fn close(a: Hsv, b: Hsv) -> bool {
        // 16 bit quantization loses a little.
        const EPSILON: f32 = 1e-3;
        (a.h - b.h).abs() < EPSILON && (a.s - b.s).abs() < EPSILON && (a.v - b.v).abs() < EPSILON
    }

    #[test]
    fn black_round_trips() {
        let mut selector = selector();
        selector.set_color(Hsv::new(0.0, 0.0, 0.0));
        assert_eq!(selector.get_color(), Hsv::new(0.0, 0.0, 0.0));
    }
    #[test]
    fn set_color_normalizes() {
        let mut selector = selector();
        selector.set_color(Hsv::new(1.5, 1.2, -0.3));
        // Value of zero is black, regardless of hue and saturation.
        assert_eq!(selector.get_color(), Hsv::BLACK);

        selector.set_color(Hsv::new(-0.75, 1.2, 0.8));
        assert!(close(selector.get_color(), Hsv::new(0.25, 1.0, 0.8)));
    }
    #[test]
    fn relays_to_shared() {
        let mut selector = selector();
        let shared = selector.shared().clone();
        let before = shared.revision();

        selector.set_color(Hsv::new(0.5, 0.5, 0.5));
        assert!(close(shared.get(), Hsv::new(0.5, 0.5, 0.5)));
        assert!(shared.revision() > before);

        // Palette changed by the user directly
        selector
            .palette_mut()
            .set_current_color(Rgb::new(1.0, 0.0, 0.0));
        selector.on_color_changed();
        assert!(close(shared.get(), Hsv::new(0.0, 1.0, 1.0)));

        // And back the other way.
        shared.set(Hsv::new(0.75, 0.25, 1.0));
        selector.update();
        assert!(close(selector.get_color(), Hsv::new(0.75, 0.25, 1.0)));
    }
    #[test]
    #[should_panic(expected = "palette reported an invalid color")]
    fn out_of_range_palette() {
        struct Broken;
        impl Palette for Broken {
            fn current_color(&self) -> Rgb {
                Rgb::new(0.0, 1.5, 0.0)
            }
            fn set_current_color(&mut self, _: Rgb) {}
        }
        let selector = ColorSelector::new(Broken, SharedColor::default(), SelectorConfig::default());
        let _ = selector.get_color();
    }
    #[test]
    fn toggle_twice() {
        let mut selector = selector();
        assert_eq!(selector.toggle_wheel([100.0, 100.0]), WheelToggle::Opened);
        assert!(selector.is_wheel_open());
        assert_eq!(selector.toggle_wheel([100.0, 100.0]), WheelToggle::Closed);
        assert!(selector.wheel().is_none());
        assert_eq!(selector.next_wakeup(), None);
        // Closing again is harmless.
        assert!(!selector.close_wheel());
    }
    #[test]
    fn opens_with_shared_color() {
        let mut selector = selector();
        selector.shared().set(Hsv::new(0.4, 0.3, 0.2));
        selector.toggle_wheel([0.0, 0.0]);
        assert_eq!(
            selector.wheel().map(|wheel| wheel.color()),
            Some(Hsv::new(0.4, 0.3, 0.2))
        );
    }
    #[test]
    fn enter_cancels_dismiss() {
        let mut selector = selector();
        selector.toggle_wheel([0.0, 0.0]);
        selector.handle_wheel_event(WheelEvent::Enter, ms(900));
        selector.handle_wheel_event(WheelEvent::Leave, ms(1000));
        assert_eq!(selector.next_wakeup(), Some(ms(1200)));

        selector.handle_wheel_event(WheelEvent::Enter, ms(1100));
        assert_eq!(selector.next_wakeup(), None);
        selector.tick(ms(1300));
        assert!(selector.is_wheel_open());
        assert_eq!(
            selector.wheel().map(|wheel| wheel.pointer_state()),
            Some(PointerState::Inside)
        );
    }
    #[test]
    fn leave_dismisses() {
        let mut selector = selector();
        selector.toggle_wheel([0.0, 0.0]);
        selector.handle_wheel_event(WheelEvent::Enter, ms(900));
        selector.handle_wheel_event(WheelEvent::Leave, ms(1000));

        selector.tick(ms(1199));
        assert!(selector.is_wheel_open());
        selector.tick(ms(1200));
        assert!(!selector.is_wheel_open());
        assert_eq!(selector.next_wakeup(), None);

        // Double dismiss is a no-op
        assert!(!selector.close_wheel());
        selector.tick(ms(5000));
        assert!(!selector.is_wheel_open());
    }
    #[test]
    fn configured_delay() {
        let mut selector = selector();
        selector.set_config(SelectorConfig {
            dismiss_delay: ms(50),
        });
        selector.toggle_wheel([0.0, 0.0]);
        selector.handle_wheel_event(WheelEvent::Leave, ms(0));
        selector.tick(ms(50));
        assert!(!selector.is_wheel_open());
    }
    #[test]
    fn stale_dismiss_ignored() {
        let mut selector = selector();
        selector.toggle_wheel([0.0, 0.0]);
        selector.handle_wheel_event(WheelEvent::Leave, ms(0));
        // Closed by toggle and reopened before the old timer would have fired.
        selector.toggle_wheel([0.0, 0.0]);
        selector.toggle_wheel([0.0, 0.0]);
        selector.tick(ms(1000));
        assert!(selector.is_wheel_open());
    }
    #[test]
    fn events_without_wheel() {
        let mut selector = selector();
        selector.handle_wheel_event(WheelEvent::Leave, ms(0));
        selector.handle_wheel_event(
            WheelEvent::Press {
                button: PointerButton::Primary,
                position: [241.0, 128.0],
            },
            ms(0),
        );
        assert_eq!(selector.next_wakeup(), None);
        assert_eq!(selector.get_color(), Hsv::BLACK);
    }
    #[test]
    fn picks_reach_palette_and_shared() {
        let mut selector = selector();
        selector.shared().set(Hsv::new(0.0, 1.0, 1.0));
        selector.update();
        selector.toggle_wheel([300.0, 300.0]);
        let revision = selector.wheel().map(|wheel| wheel.revision());

        // Press on the ring at hue 0.25
        selector.handle_wheel_event(
            WheelEvent::Press {
                button: PointerButton::Primary,
                position: [241.0, 128.0],
            },
            ms(0),
        );
        assert!(close(selector.get_color(), Hsv::new(0.25, 1.0, 1.0)));
        assert!(close(selector.shared().get(), Hsv::new(0.25, 1.0, 1.0)));
        assert_eq!(selector.wheel().map(|wheel| wheel.revision()), revision);

        // Release in the wedge at half saturation and value
        selector.handle_wheel_event(
            WheelEvent::Release {
                button: PointerButton::Primary,
                position: [128.0, 174.0],
            },
            ms(10),
        );
        assert!(close(selector.get_color(), Hsv::new(0.25, 0.5, 0.5)));
        assert_eq!(
            selector.wheel().map(|wheel| wheel.revision()),
            revision.map(|revision| revision + 1)
        );
    }
}
