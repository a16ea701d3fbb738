//! Hand-tracking frames as delivered by the controller.
//!
//! Positions are in the controller's coordinate space, in millimeters.
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    Right,
}

/// Anatomical bone order, proximal to distal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoneType {
    Metacarpal = 0,
    Proximal = 1,
    Intermediate = 2,
    Distal = 3,
}

impl BoneType {
    pub const ALL: [BoneType; 4] = [
        BoneType::Metacarpal,
        BoneType::Proximal,
        BoneType::Intermediate,
        BoneType::Distal,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FingerType {
    Thumb = 0,
    Index = 1,
    Middle = 2,
    Ring = 3,
    Pinky = 4,
}

impl FingerType {
    pub const ALL: [FingerType; 5] = [
        FingerType::Thumb,
        FingerType::Index,
        FingerType::Middle,
        FingerType::Ring,
        FingerType::Pinky,
    ];
}

/// A rigid segment between two joints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub prev_joint: Vec3,
    pub next_joint: Vec3,
}

impl Bone {
    pub fn new(prev_joint: Vec3, next_joint: Vec3) -> Bone {
        Bone {
            prev_joint,
            next_joint,
        }
    }

    pub fn length(&self) -> f32 {
        self.prev_joint.distance(self.next_joint)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finger {
    pub finger_type: FingerType,
    pub bones: [Bone; 4],
}

impl Finger {
    pub fn bone(&self, bone_type: BoneType) -> &Bone {
        &self.bones[bone_type as usize]
    }
}

/// Orthonormal orientation of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Basis {
    pub x_basis: Vec3,
    pub y_basis: Vec3,
    pub z_basis: Vec3,
}

impl Default for Basis {
    fn default() -> Self {
        Self {
            x_basis: Vec3::X,
            y_basis: Vec3::Y,
            z_basis: Vec3::Z,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    #[serde(default)]
    pub id: i32,
    pub handedness: Handedness,
    pub palm_position: Vec3,
    #[serde(default)]
    pub basis: Basis,
    /// Thumb first, pinky last.
    pub fingers: [Finger; 5],
}

impl Hand {
    pub fn is_right(&self) -> bool {
        self.handedness == Handedness::Right
    }

    pub fn is_left(&self) -> bool {
        self.handedness == Handedness::Left
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub id: i64,
    /// Controller clock, microseconds.
    #[serde(default)]
    pub timestamp_us: i64,
    #[serde(default)]
    pub hands: Vec<Hand>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    pub fn right_hands(&self) -> impl Iterator<Item = &Hand> {
        self.hands.iter().filter(|h| h.is_right())
    }
}

/// A frame together with the host time it was delivered at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedFrame {
    pub time_ns: i64,
    pub frame: Frame,
}
