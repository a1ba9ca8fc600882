use serde::{Deserialize, Serialize};

/// One navigation estimate from the vehicle telemetry log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    /// Radians.
    pub latitude: f64,
    /// Radians.
    pub longitude: f64,
    /// Radians, clockwise from north.
    pub yaw: f64,
    pub vx: f64,
    pub vy: f64,
    /// Metres.
    pub altitude: f64,
}

impl TrackPoint {
    pub fn new(
        timestamp: f64,
        latitude: f64,
        longitude: f64,
        yaw: f64,
        vx: f64,
        vy: f64,
        altitude: f64,
    ) -> Self {
        Self {
            timestamp,
            latitude,
            longitude,
            yaw,
            vx,
            vy,
            altitude,
        }
    }
}
