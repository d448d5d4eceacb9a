//! Virtual grow light: dimmable, on until switched off.

use std::sync::Mutex;

/// A simulated dimmable light.
#[derive(Default)]
pub struct VirtualLight {
    brightness: Mutex<Option<u8>>,
}

impl VirtualLight {
    /// Current brightness in percent, `None` when off.
    #[must_use]
    pub fn brightness(&self) -> Option<u8> {
        self.brightness.lock().ok().and_then(|b| *b)
    }

    /// Switch on at `pct`. Zero percent counts as off.
    pub fn on(&self, pct: u8) {
        self.set((pct > 0).then_some(pct));
    }

    pub fn off(&self) {
        self.set(None);
    }

    fn set(&self, value: Option<u8>) {
        if let Ok(mut brightness) = self.brightness.lock() {
            *brightness = value;
        }
    }
}
