//! Visualization messages, laid out like ROS `visualization_msgs/Marker`.
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Stamp split into whole seconds and nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Time {
    pub sec: i32,
    pub nanosec: u32,
}

impl Time {
    /// Saturates outside the `i32` seconds range.
    pub fn from_nanos(time_ns: i64) -> Time {
        match i32::try_from(time_ns.div_euclid(1_000_000_000)) {
            Ok(sec) => Time {
                sec,
                nanosec: time_ns.rem_euclid(1_000_000_000) as u32,
            },
            Err(_) if time_ns < 0 => Time {
                sec: i32::MIN,
                nanosec: 0,
            },
            Err(_) => Time {
                sec: i32::MAX,
                nanosec: 999_999_999,
            },
        }
    }

    pub fn as_nanos(&self) -> i64 {
        self.sec as i64 * 1_000_000_000 + self.nanosec as i64
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.sec as f64 + self.nanosec as f64 * 1e-9
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub stamp: Time,
    pub frame_id: String,
}

/// Position in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Point {
        Point { x, y, z }
    }

    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl From<DVec3> for Point {
    fn from(v: DVec3) -> Self {
        Point::new(v.x, v.y, v.z)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<[f64; 3]> for Vector3 {
    fn from(v: [f64; 3]) -> Self {
        Vector3 {
            x: v[0],
            y: v[1],
            z: v[2],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorRGBA {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRGBA {
    pub const RED: ColorRGBA = ColorRGBA::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: ColorRGBA = ColorRGBA::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: ColorRGBA = ColorRGBA::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> ColorRGBA {
        ColorRGBA { r, g, b, a }
    }

    pub fn to_u8(self) -> (u8, u8, u8, u8) {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b), q(self.a))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerType {
    #[default]
    Arrow = 0,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerAction {
    /// Add, or modify if a marker with the same ns/id exists.
    #[default]
    Add = 0,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub header: Header,
    pub ns: String,
    pub id: i32,
    pub marker_type: MarkerType,
    pub action: MarkerAction,
    /// For arrows: shaft diameter, head diameter, head length.
    pub scale: Vector3,
    pub color: ColorRGBA,
    /// Tail then head.
    pub points: Vec<Point>,
}

impl Marker {
    pub fn tail(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn head(&self) -> Option<Point> {
        self.points.get(1).copied()
    }
}

/// One visualization update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerBatch {
    pub markers: Vec<Marker>,
}

impl MarkerBatch {
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Marker> {
        self.markers.iter()
    }
}
