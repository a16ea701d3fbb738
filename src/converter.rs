use glam::{DVec3, Vec3};

use crate::config::MarkerConfig;
use crate::frame::{BoneType, Frame, Hand};
use crate::marker::{ColorRGBA, Header, Marker, MarkerAction, MarkerBatch, MarkerType, Point, Time};

/// Turns right hands of a frame into finger-bone and palm-axis arrows.
///
/// Stateless: the same frame and stamp always give the same batch.
#[derive(Debug, Clone, Default)]
pub struct FrameToMarkersConverter {
    config: MarkerConfig,
}

/// Color of every bone arrow on finger `finger_idx`.
pub fn finger_color(finger_idx: usize) -> ColorRGBA {
    let i = finger_idx as f64;
    ColorRGBA::new(0.9, (0.3 + 0.2 * i) as f32, (1.0 - 0.2 * i) as f32, 1.0)
}

impl FrameToMarkersConverter {
    pub fn new(config: MarkerConfig) -> FrameToMarkersConverter {
        FrameToMarkersConverter { config }
    }

    pub fn config(&self) -> &MarkerConfig {
        &self.config
    }

    /// Left hands are skipped. Ids count up from 0 across all right hands.
    pub fn convert(&self, frame: &Frame, stamp: Time) -> MarkerBatch {
        let mut batch = MarkerBatch::default();
        let mut marker_id = 0;
        for hand in frame.right_hands() {
            self.push_finger_arrows(hand, stamp, &mut marker_id, &mut batch);
            self.push_axis_arrows(hand, stamp, &mut marker_id, &mut batch);
        }
        batch
    }

    fn push_finger_arrows(&self, hand: &Hand, stamp: Time, marker_id: &mut i32, batch: &mut MarkerBatch) {
        let finger_count = self.config.finger_count.min(hand.fingers.len());
        for (i, finger) in hand.fingers.iter().take(finger_count).enumerate() {
            for bone_type in BoneType::ALL {
                let bone = finger.bone(bone_type);
                let tail = self.to_meters(bone.prev_joint);
                let head = self.to_meters(bone.next_joint);
                batch.markers.push(self.arrow(
                    stamp,
                    format!("finger_arrow_{}", i),
                    marker_id,
                    self.config.finger_arrow_scale,
                    finger_color(i),
                    tail,
                    head,
                ));
            }
        }
    }

    fn push_axis_arrows(&self, hand: &Hand, stamp: Time, marker_id: &mut i32, batch: &mut MarkerBatch) {
        let origin = self.to_meters(hand.palm_position);
        let axes = [
            (hand.basis.x_basis, "x_axis", ColorRGBA::RED),
            (hand.basis.y_basis, "y_axis", ColorRGBA::GREEN),
            (hand.basis.z_basis, "z_axis", ColorRGBA::BLUE),
        ];
        for (dir, ns, color) in axes {
            let head = origin + dir.as_dvec3() / self.config.axis_divisor;
            batch.markers.push(self.arrow(
                stamp,
                ns.to_string(),
                marker_id,
                self.config.axis_arrow_scale,
                color,
                origin,
                head,
            ));
        }
    }

    fn to_meters(&self, p_mm: Vec3) -> DVec3 {
        p_mm.as_dvec3() / self.config.mm_per_meter
    }

    #[allow(clippy::too_many_arguments)]
    fn arrow(
        &self,
        stamp: Time,
        ns: String,
        marker_id: &mut i32,
        scale: [f64; 3],
        color: ColorRGBA,
        tail: DVec3,
        head: DVec3,
    ) -> Marker {
        let id = *marker_id;
        *marker_id += 1;
        Marker {
            header: Header {
                stamp,
                frame_id: self.config.frame_id.clone(),
            },
            ns,
            id,
            marker_type: MarkerType::Arrow,
            action: MarkerAction::Add,
            scale: scale.into(),
            color,
            points: vec![Point::from(tail), Point::from(head)],
        }
    }
}
