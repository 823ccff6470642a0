//! The application's current color, shared between the selector and whoever paints with it.

use crate::color::Hsv;

struct Inner {
    color: Hsv,
    revision: u64,
}

/// Cheaply cloneable handle to the shared brush color. All clones observe the same color.
#[derive(Clone)]
pub struct SharedColor(std::sync::Arc<parking_lot::RwLock<Inner>>);
impl SharedColor {
    #[must_use]
    pub fn new(color: Hsv) -> Self {
        Self(std::sync::Arc::new(parking_lot::RwLock::new(Inner {
            color: color.normalized(),
            revision: 0,
        })))
    }
    #[must_use]
    pub fn get(&self) -> Hsv {
        self.0.read().color
    }
    /// Store a new color, normalizing it first.
    pub fn set(&self, color: Hsv) {
        let mut write = self.0.write();
        write.color = color.normalized();
        write.revision = write.revision.wrapping_add(1);
    }
    /// Bumped on every [`Self::set`], so listeners can poll for changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.0.read().revision
    }
}
impl Default for SharedColor {
    fn default() -> Self {
        Self::new(Hsv::BLACK)
    }
}
impl std::fmt::Debug for SharedColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let read = self.0.read();
        f.debug_struct("SharedColor")
            .field("color", &read.color)
            .field("revision", &read.revision)
            .finish()
    }
}
