pub mod color;
pub mod palette;
pub mod popup;
pub mod selector;
pub mod shared;
pub mod timer;
pub mod wheel;

pub use color::{Hsv, Rgb};
pub use selector::ColorSelector;
pub use shared::SharedColor;
