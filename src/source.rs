//! Frame delivery: recorded JSON-lines files or a synthetic animated hand.
use std::f32::consts::TAU;
use std::path::Path;

use anyhow::{bail, Result};
use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::frame::{Basis, Bone, Finger, FingerType, Frame, Hand, Handedness, TimedFrame};
use crate::io::read_json_lines;

/// Stands in for the controller's frame callback.
pub trait FrameSource {
    /// `None` once the source is exhausted.
    fn next_frame(&mut self) -> Option<Result<TimedFrame>>;

    /// Number of frames left, when known up front.
    fn remaining(&self) -> Option<usize> {
        None
    }
}

/// Replays a recording with one `TimedFrame` per line.
pub struct ReplaySource {
    frames: std::vec::IntoIter<TimedFrame>,
}

impl ReplaySource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<ReplaySource> {
        let mut frames: Vec<TimedFrame> = read_json_lines(path)?;
        frames.sort_by_key(|f| f.time_ns);
        log::debug!("loaded {} frames", frames.len());
        Ok(Self::from_frames(frames))
    }

    pub fn from_frames(frames: Vec<TimedFrame>) -> ReplaySource {
        ReplaySource {
            frames: frames.into_iter(),
        }
    }
}

impl FrameSource for ReplaySource {
    fn next_frame(&mut self) -> Option<Result<TimedFrame>> {
        self.frames.next().map(Ok)
    }

    fn remaining(&self) -> Option<usize> {
        Some(self.frames.len())
    }
}

/// Bone lengths in mm, metacarpal to distal, thumb first.
const BONE_LENGTHS_MM: [[f32; 4]; 5] = [
    [0.0, 46.0, 32.0, 25.0],
    [68.0, 40.0, 23.0, 17.0],
    [64.0, 45.0, 27.0, 18.0],
    [60.0, 42.0, 26.0, 18.0],
    [56.0, 33.0, 18.0, 16.0],
];

/// Knuckle offsets across the palm, thumb first, right hand.
const KNUCKLE_X_MM: [f32; 5] = [-35.0, -22.0, 0.0, 20.0, 38.0];

/// A posed hand at animation time `t_secs`, without noise.
pub fn synthetic_hand(id: i32, handedness: Handedness, t_secs: f32) -> Hand {
    let mirror = match handedness {
        Handedness::Right => 1.0,
        Handedness::Left => -1.0,
    };
    let palm_position = Vec3::new(
        mirror * 80.0 + 30.0 * (0.8 * t_secs).sin(),
        200.0 + 15.0 * (0.5 * t_secs).sin(),
        10.0 * (0.3 * t_secs).cos(),
    );
    let yaw = 0.3 * (0.5 * t_secs).sin();
    let orientation = Quat::from_rotation_y(mirror * yaw);
    let basis = Basis {
        x_basis: orientation * (Vec3::X * mirror),
        y_basis: orientation * Vec3::Y,
        z_basis: orientation * Vec3::Z,
    };

    let fingers = FingerType::ALL.map(|finger_type| {
        let f = finger_type as usize;
        // 0 = open hand, 1 = fist
        let curl = 0.5 - 0.5 * (TAU * 0.5 * t_secs + 0.4 * f as f32).cos();
        let wrist = palm_position + orientation * Vec3::new(mirror * KNUCKLE_X_MM[f] * 0.4, 0.0, 40.0);
        let mut joint = wrist;
        let mut bones = [Bone::new(Vec3::ZERO, Vec3::ZERO); 4];
        for (b, bone) in bones.iter_mut().enumerate() {
            let bend = Quat::from_rotation_x(-curl * 0.5 * b as f32);
            let dir = if b == 0 {
                let knuckle = palm_position
                    + orientation * Vec3::new(mirror * KNUCKLE_X_MM[f], 0.0, -30.0);
                (knuckle - wrist).normalize_or_zero()
            } else {
                orientation * (bend * Vec3::NEG_Z)
            };
            let next = joint + dir * BONE_LENGTHS_MM[f][b];
            *bone = Bone::new(joint, next);
            joint = next;
        }
        Finger { finger_type, bones }
    });

    Hand {
        id,
        handedness,
        palm_position,
        basis,
        fingers,
    }
}

/// Deterministic animated hands at a fixed delivery rate.
pub struct SyntheticSource {
    rng: ChaCha8Rng,
    start_ns: i64,
    period_ns: i64,
    count: usize,
    emitted: usize,
    with_left: bool,
    jitter_mm: f32,
}

impl SyntheticSource {
    /// `rate_hz` must be finite, positive and at most 1 GHz.
    pub fn new(seed: u64, rate_hz: f64, count: usize) -> Result<SyntheticSource> {
        if !(rate_hz > 0.0 && rate_hz.is_finite()) {
            bail!("delivery rate must be positive, got {}", rate_hz);
        }
        let period_ns = (1e9 / rate_hz) as i64;
        if period_ns < 1 {
            bail!("delivery rate {} Hz is below nanosecond resolution", rate_hz);
        }
        Ok(SyntheticSource {
            rng: ChaCha8Rng::seed_from_u64(seed),
            start_ns: 0,
            period_ns,
            count,
            emitted: 0,
            with_left: false,
            jitter_mm: 0.5,
        })
    }

    pub fn with_start_ns(mut self, start_ns: i64) -> SyntheticSource {
        self.start_ns = start_ns;
        self
    }

    pub fn with_left_hand(mut self, with_left: bool) -> SyntheticSource {
        self.with_left = with_left;
        self
    }

    pub fn with_jitter_mm(mut self, jitter_mm: f32) -> SyntheticSource {
        self.jitter_mm = jitter_mm.abs();
        self
    }

    fn jitter(&mut self, p: Vec3) -> Vec3 {
        if self.jitter_mm == 0.0 {
            return p;
        }
        let j = self.jitter_mm;
        p + Vec3::new(
            self.rng.random_range(-j..=j),
            self.rng.random_range(-j..=j),
            self.rng.random_range(-j..=j),
        )
    }

    fn noisy_hand(&mut self, id: i32, handedness: Handedness, t_secs: f32) -> Hand {
        let mut hand = synthetic_hand(id, handedness, t_secs);
        hand.palm_position = self.jitter(hand.palm_position);
        for finger in hand.fingers.iter_mut() {
            for bone in finger.bones.iter_mut() {
                bone.prev_joint = self.jitter(bone.prev_joint);
                bone.next_joint = self.jitter(bone.next_joint);
            }
        }
        hand
    }
}

impl FrameSource for SyntheticSource {
    fn next_frame(&mut self) -> Option<Result<TimedFrame>> {
        if self.emitted >= self.count {
            return None;
        }
        let idx = self.emitted;
        self.emitted += 1;
        let elapsed_ns = (idx as i64).saturating_mul(self.period_ns);
        let t_secs = elapsed_ns as f32 * 1e-9;

        let mut hands = vec![self.noisy_hand(1, Handedness::Right, t_secs)];
        if self.with_left {
            hands.push(self.noisy_hand(2, Handedness::Left, t_secs));
        }
        Some(Ok(TimedFrame {
            time_ns: self.start_ns.saturating_add(elapsed_ns),
            frame: Frame {
                id: idx as i64,
                timestamp_us: elapsed_ns / 1000,
                hands,
            },
        }))
    }

    fn remaining(&self) -> Option<usize> {
        Some(self.count - self.emitted)
    }
}
