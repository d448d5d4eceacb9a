//! Simulated actuator devices.

mod light;
mod pump;
mod strip;

pub use light::VirtualLight;
pub use pump::VirtualPump;
pub use strip::VirtualStrip;
