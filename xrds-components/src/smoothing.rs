use std::{fmt::Debug, time::Duration};

use xrds_core::{HandleError, Pose};

/// Per-frame motion filter used by handled objects and handles to chase a target pose.
///
/// Implementations must converge monotonically toward `target` and never reach it
/// in a single step.
pub trait Smoothing: Debug + Send + Sync {
    fn smooth(&self, prev: &Pose, current: &Pose, target: &Pose, elapsed: Duration) -> Pose;
}

/// Closes a fixed fraction of the remaining distance per unit of time.
///
/// After `half_life` has elapsed half of the distance to the target is covered,
/// regardless of how the time is split into frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialSmoothing {
    half_life: Duration,
}

impl Default for ExponentialSmoothing {
    fn default() -> Self {
        Self {
            half_life: Duration::from_millis(25),
        }
    }
}

impl ExponentialSmoothing {
    pub fn new(half_life: Duration) -> Result<Self, HandleError> {
        if half_life.is_zero() {
            return Err(HandleError::InvalidHalfLife);
        }
        Ok(Self { half_life })
    }

    pub fn half_life(&self) -> Duration {
        self.half_life
    }

    /// Fraction of the remaining distance covered in `elapsed`, in `[0, 1)`.
    pub fn factor(&self, elapsed: Duration) -> f32 {
        let halvings = elapsed.as_secs_f32() / self.half_life.as_secs_f32();
        let factor = 1.0 - 0.5f32.powf(halvings);
        // powf underflows to zero for very long frames
        factor.clamp(0.0, 1.0 - f32::EPSILON)
    }
}

impl Smoothing for ExponentialSmoothing {
    fn smooth(&self, _prev: &Pose, current: &Pose, target: &Pose, elapsed: Duration) -> Pose {
        current.lerp(target, self.factor(elapsed))
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec3, Quat};

    use super::*;

    const FRAME: Duration = Duration::from_millis(11);

    #[test]
    fn rejects_zero_half_life() {
        assert_eq!(
            ExponentialSmoothing::new(Duration::ZERO),
            Err(HandleError::InvalidHalfLife)
        );
    }

    #[test]
    fn half_life_covers_half_the_distance() {
        let smoothing = ExponentialSmoothing::new(Duration::from_millis(100)).unwrap();
        assert!((smoothing.factor(Duration::from_millis(100)) - 0.5).abs() < 1e-5);
        assert_eq!(smoothing.factor(Duration::ZERO), 0.0);
    }

    #[test]
    fn converges_without_overshoot() {
        let smoothing = ExponentialSmoothing::default();
        let target = Pose::new(vec3(0.0, 1.0, -2.0), Quat::from_rotation_y(1.2));
        let mut prev = Pose::IDENTITY;
        let mut current = Pose::IDENTITY;
        let mut last_distance = current.distance(&target);

        for _ in 0..60 {
            let next = smoothing.smooth(&prev, &current, &target, FRAME);
            let distance = next.distance(&target);

            assert!(distance <= last_distance + 1e-6);
            assert!(next.position.y <= target.position.y);
            assert!(next.angle_between(&target) <= current.angle_between(&target) + 1e-3);

            prev = current;
            current = next;
            last_distance = distance;
        }

        assert!(current.abs_diff_eq(&target, 1e-3));
    }

    #[test]
    fn never_snaps_in_one_frame() {
        let smoothing = ExponentialSmoothing::default();
        let target = Pose::from_position(vec3(10.0, 0.0, 0.0));

        let next = smoothing.smooth(
            &Pose::IDENTITY,
            &Pose::IDENTITY,
            &target,
            Duration::from_secs(60),
        );

        assert!(next.position.x < target.position.x);
    }
}
