//! The standard palette widget, as seen by the selector.

use crate::color::{DeviceRgb, Rgb};

/// A toolkit color chooser that can report and accept its current color.
///
/// Implementors report colors with every channel in `[0, 1]`. Reporting anything else is a bug
/// in the implementor, and the selector will panic on it.
pub trait Palette {
    fn current_color(&self) -> Rgb;
    fn set_current_color(&mut self, color: Rgb);
}

/// A palette storing 16 bit device channels, like most toolkit color selection widgets do.
/// Colors are quantized on the way in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct DevicePalette {
    pub color: DeviceRgb,
}
impl Palette for DevicePalette {
    fn current_color(&self) -> Rgb {
        Rgb::from_device(self.color)
    }
    fn set_current_color(&mut self, color: Rgb) {
        self.color = color.to_device();
    }
}

impl<P: Palette + ?Sized> Palette for Box<P> {
    fn current_color(&self) -> Rgb {
        (**self).current_color()
    }
    fn set_current_color(&mut self, color: Rgb) {
        (**self).set_current_color(color);
    }
}
