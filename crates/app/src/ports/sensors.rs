//! Sensor port: produces one snapshot of every environmental reading.

use std::future::Future;
use std::sync::Arc;

use planthub_domain::sensor::SensorSnapshot;

/// Reads all sensors at once.
///
/// Reading never fails as a whole: a sensor that cannot be read is reported
/// as absent in the returned snapshot.
pub trait SensorProvider: Send + Sync {
    /// Take a snapshot of every sensor.
    fn read_all(&self) -> impl Future<Output = SensorSnapshot> + Send;
}

impl<T: SensorProvider> SensorProvider for Arc<T> {
    fn read_all(&self) -> impl Future<Output = SensorSnapshot> + Send {
        (**self).read_all()
    }
}
