//! Geographic primitives for the store map.
//!
//! Zoom is expressed as a Kakao map "level": 1 is street level and larger
//! numbers zoom further out.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// South-west / north-east rectangle grown one position at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    corners: Option<(LatLng, LatLng)>,
}

impl Bounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_positions<I: IntoIterator<Item = LatLng>>(positions: I) -> Self {
        let mut bounds = Self::new();
        for p in positions {
            bounds.extend(p);
        }
        bounds
    }

    pub fn extend(&mut self, p: LatLng) {
        self.corners = Some(match self.corners {
            None => (p, p),
            Some((sw, ne)) => (
                LatLng::new(sw.lat.min(p.lat), sw.lon.min(p.lon)),
                LatLng::new(ne.lat.max(p.lat), ne.lon.max(p.lon)),
            ),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.corners.is_none()
    }

    pub fn south_west(&self) -> Option<LatLng> {
        self.corners.map(|(sw, _)| sw)
    }

    pub fn north_east(&self) -> Option<LatLng> {
        self.corners.map(|(_, ne)| ne)
    }

    pub fn center(&self) -> Option<LatLng> {
        self.corners.map(|(sw, ne)| {
            LatLng::new((sw.lat + ne.lat) / 2.0, (sw.lon + ne.lon) / 2.0)
        })
    }
}

/// Clamp a map level into `[min_level, max_level]`.
pub fn clamp_level(level: u8, min_level: u8, max_level: u8) -> u8 {
    level.clamp(min_level, max_level)
}
