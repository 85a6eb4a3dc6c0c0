use std::time::Duration;

use glam::Vec3;
use xrds_core::{Handle, HandleError, Pose, XrdsComponent, XrdsObject};

use crate::{ExponentialSmoothing, Smoothing};

/// Positional change below this is treated as jitter
const MOVE_TOLERANCE: f32 = 1e-5;

#[derive(Debug, Default, Clone, Copy)]
struct PendingEvents {
    held: bool,
    released: bool,
}

#[derive(Debug, Default, Clone, Copy)]
struct Pulses {
    held: bool,
    moved: bool,
    released: bool,
    thrown: bool,
}

/// Kinematic handle driven by a tracked hand or controller.
///
/// Input (`hold`, `release`, `track`) is queued and latched into one-frame pulses on
/// the next `update`, so the anchor must be updated before the objects observing it.
/// While held the anchor follows the tracked pose; while free it smooths toward the
/// target pose written by its owner.
#[derive(Debug, Clone)]
pub struct AnchorHandle {
    name: String,
    pose: Pose,
    prev_pose: Pose,
    target_pose: Pose,
    tracked_pose: Option<Pose>,
    held: bool,
    pending: PendingEvents,
    pulses: Pulses,
    velocity: Vec3,
    throw_speed: f32,
    smoothing: ExponentialSmoothing,
}

impl AnchorHandle {
    pub fn new(name: &str, pose: Pose) -> Self {
        Self {
            name: name.to_owned(),
            pose,
            prev_pose: pose,
            target_pose: pose,
            tracked_pose: None,
            held: false,
            pending: PendingEvents::default(),
            pulses: Pulses::default(),
            velocity: Vec3::ZERO,
            throw_speed: 1.0,
            smoothing: ExponentialSmoothing::default(),
        }
    }

    /// Minimum release speed in m/s for a release to count as a throw
    pub fn with_throw_speed(mut self, throw_speed: f32) -> Self {
        self.throw_speed = throw_speed;
        self
    }

    pub fn with_smoothing(mut self, smoothing: ExponentialSmoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Feeds the pose of the hand driving this anchor. Ignored unless held.
    pub fn track(&mut self, pose: Pose) {
        self.tracked_pose = Some(pose);
    }

    /// Linear velocity measured over the last update, in m/s
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn latch_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        self.pulses = Pulses {
            held: pending.held,
            released: pending.released,
            // release speed is the speed at the last update while held
            thrown: pending.released && self.velocity.length() >= self.throw_speed,
            moved: false,
        };
        if self.pulses.held {
            log::debug!("Anchor '{}' grabbed", self.name);
        }
        if self.pulses.released {
            log::debug!(
                "Anchor '{}' released (speed={:.3}, thrown={})",
                self.name,
                self.velocity.length(),
                self.pulses.thrown
            );
        }
    }
}

impl XrdsObject for AnchorHandle {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
    fn on_construct(&mut self) {
        self.target_pose = self.pose;
        self.prev_pose = self.pose;
    }
    fn on_destroy(&mut self) {}
}

impl XrdsComponent for AnchorHandle {
    fn update(&mut self, elapsed: Duration) {
        self.latch_pending();

        let tracked = self.tracked_pose.take();
        let before = self.pose;
        self.pose = match (self.held, tracked) {
            (true, Some(tracked)) => tracked,
            (true, None) => self.pose,
            (false, _) => {
                self.smoothing
                    .smooth(&self.prev_pose, &self.pose, &self.target_pose, elapsed)
            }
        };
        self.prev_pose = before;

        let secs = elapsed.as_secs_f32();
        self.velocity = if secs > 0.0 {
            (self.pose.position - before.position) / secs
        } else {
            Vec3::ZERO
        };
        self.pulses.moved = !self.pose.abs_diff_eq(&before, MOVE_TOLERANCE);
    }
}

impl Handle for AnchorHandle {
    fn pose(&self) -> Pose {
        self.pose
    }

    fn target_pose(&self) -> Pose {
        self.target_pose
    }

    fn set_target_pose(&mut self, pose: Pose) {
        self.target_pose = pose;
    }

    fn is_held(&self) -> bool {
        self.held
    }

    fn was_held(&self) -> bool {
        self.pulses.held
    }

    fn was_moved(&self) -> bool {
        self.pulses.moved
    }

    fn was_released(&self) -> bool {
        self.pulses.released
    }

    fn was_thrown(&self) -> bool {
        self.pulses.thrown
    }

    fn hold(&mut self) -> Result<(), HandleError> {
        if !self.held {
            self.held = true;
            self.pending.held = true;
            self.pending.released = false;
        }
        Ok(())
    }

    fn release(&mut self) {
        if self.held {
            self.held = false;
            self.pending.released = true;
            self.pending.held = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    const FRAME: Duration = Duration::from_millis(10);

    #[test]
    fn transitions_are_one_frame_pulses() {
        let mut anchor = AnchorHandle::new("left", Pose::IDENTITY);
        anchor.on_construct();

        anchor.hold().unwrap();
        assert!(anchor.is_held());
        assert!(!anchor.was_held());

        anchor.update(FRAME);
        assert!(anchor.was_held());

        anchor.update(FRAME);
        assert!(!anchor.was_held());
        assert!(anchor.is_held());

        anchor.release();
        assert!(!anchor.is_held());
        anchor.update(FRAME);
        assert!(anchor.was_released());

        anchor.update(FRAME);
        assert!(!anchor.was_released());
    }

    #[test]
    fn follows_tracked_pose_only_while_held() {
        let mut anchor = AnchorHandle::new("right", Pose::IDENTITY);
        anchor.on_construct();

        anchor.track(Pose::from_position(vec3(1.0, 0.0, 0.0)));
        anchor.update(FRAME);
        assert_eq!(anchor.pose(), Pose::IDENTITY);
        assert!(!anchor.was_moved());

        anchor.hold().unwrap();
        let hand = Pose::from_position(vec3(0.0, 0.5, 0.0));
        anchor.track(hand);
        anchor.update(FRAME);
        assert_eq!(anchor.pose(), hand);
        assert!(anchor.was_moved());
    }

    #[test]
    fn free_anchor_smooths_toward_target() {
        let mut anchor = AnchorHandle::new("free", Pose::IDENTITY);
        anchor.on_construct();
        let target = Pose::from_position(vec3(0.0, 0.0, 1.0));
        anchor.set_target_pose(target);

        anchor.update(FRAME);
        let first = anchor.pose();
        assert!(first.position.z > 0.0 && first.position.z < 1.0);

        for _ in 0..100 {
            anchor.update(FRAME);
        }
        assert!(anchor.pose().abs_diff_eq(&target, 1e-3));
    }

    #[test]
    fn fast_release_is_a_throw() {
        let mut anchor = AnchorHandle::new("thrower", Pose::IDENTITY).with_throw_speed(2.0);
        anchor.on_construct();
        anchor.hold().unwrap();
        anchor.update(FRAME);

        // 5 cm in 10 ms is 5 m/s
        anchor.track(Pose::from_position(vec3(0.05, 0.0, 0.0)));
        anchor.update(FRAME);
        assert!((anchor.velocity().x - 5.0).abs() < 1e-3);

        anchor.release();
        anchor.update(FRAME);
        assert!(anchor.was_released());
        assert!(anchor.was_thrown());
    }

    #[test]
    fn slow_release_is_not_a_throw() {
        let mut anchor = AnchorHandle::new("dropper", Pose::IDENTITY).with_throw_speed(2.0);
        anchor.on_construct();
        anchor.hold().unwrap();
        anchor.update(FRAME);
        anchor.update(FRAME);

        anchor.release();
        anchor.update(FRAME);
        assert!(anchor.was_released());
        assert!(!anchor.was_thrown());
    }

    #[test]
    fn release_without_hold_is_noop() {
        let mut anchor = AnchorHandle::new("idle", Pose::IDENTITY);
        anchor.release();
        anchor.update(FRAME);
        assert!(!anchor.was_released());
        assert!(!anchor.is_held());
    }
}
