use glam::{Quat, Vec3};

use crate::Transform;

/// Rigid placement in 3D space: position plus unit orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Applies `other` as a pose expressed in this pose's local frame.
    pub fn then(&self, other: &Pose) -> Pose {
        Pose {
            position: self.position + self.rotation * other.position,
            rotation: (self.rotation * other.rotation).normalize(),
        }
    }

    pub fn inverse(&self) -> Pose {
        let rotation = self.rotation.inverse();
        Pose {
            position: -(rotation * self.position),
            rotation,
        }
    }

    /// Pose of `self` in the frame of `reference`, so that
    /// `reference.then(&self.relative_to(reference)) == self`.
    pub fn relative_to(&self, reference: &Pose) -> Pose {
        reference.inverse().then(self)
    }

    /// Position lerp and rotation slerp. `t` is clamped to `[0, 1]`.
    pub fn lerp(&self, other: &Pose, t: f32) -> Pose {
        let t = t.clamp(0.0, 1.0);
        Pose {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.slerp(other.rotation, t).normalize(),
        }
    }

    pub fn abs_diff_eq(&self, other: &Pose, max_abs_diff: f32) -> bool {
        // q and -q describe the same orientation
        self.position.abs_diff_eq(other.position, max_abs_diff)
            && (self.rotation.abs_diff_eq(other.rotation, max_abs_diff)
                || self.rotation.abs_diff_eq(-other.rotation, max_abs_diff))
    }

    pub fn distance(&self, other: &Pose) -> f32 {
        self.position.distance(other.position)
    }

    pub fn angle_between(&self, other: &Pose) -> f32 {
        self.rotation.angle_between(other.rotation)
    }
}

impl From<&Transform> for Pose {
    fn from(transform: &Transform) -> Self {
        Self {
            position: transform.get_translation(),
            rotation: transform.get_rotation(),
        }
    }
}

impl From<Pose> for Transform {
    fn from(pose: Pose) -> Self {
        Transform::default()
            .with_translation(pose.position)
            .with_rotation(pose.rotation)
    }
}
