#![allow(dead_code)]
use glam::Vec3;
use leap_markers::frame::{Basis, Bone, Finger, FingerType, Frame, Hand, Handedness};

/// Every bone runs from (10, 20, 30) mm to (40, 50, 60) mm, shifted by
/// 100 mm per finger along x so fingers are told apart.
pub fn make_hand(handedness: Handedness) -> Hand {
    let fingers = FingerType::ALL.map(|finger_type| {
        let shift = Vec3::new(100.0 * finger_type as usize as f32, 0.0, 0.0);
        let bone = Bone::new(
            Vec3::new(10.0, 20.0, 30.0) + shift,
            Vec3::new(40.0, 50.0, 60.0) + shift,
        );
        Finger {
            finger_type,
            bones: [bone; 4],
        }
    });
    Hand {
        id: 1,
        handedness,
        palm_position: Vec3::new(100.0, 200.0, 300.0),
        basis: Basis::default(),
        fingers,
    }
}

pub fn frame_with(hands: Vec<Hand>) -> Frame {
    Frame {
        id: 7,
        timestamp_us: 0,
        hands,
    }
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
