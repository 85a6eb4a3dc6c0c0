use std::{
    fmt::Debug,
    sync::{Arc, RwLock, Weak},
};

use crate::{HandleError, Pose};

/// Attachment point through which a user grabs and moves an object
/// (tracked hand anchor, physical controller, ...).
///
/// The `was_*` queries are one-frame pulses: they report `true` only during the
/// frame in which the corresponding transition happened.
pub trait Handle: Debug {
    /// Current world pose
    fn pose(&self) -> Pose;

    /// Pose the handle should move toward when it is not driven by a user
    fn target_pose(&self) -> Pose;
    fn set_target_pose(&mut self, pose: Pose);

    fn is_held(&self) -> bool;
    fn was_held(&self) -> bool;
    fn was_moved(&self) -> bool;
    fn was_released(&self) -> bool;

    /// Released with enough speed to count as a throw. Implies `was_released`.
    fn was_thrown(&self) -> bool {
        false
    }

    fn hold(&mut self) -> Result<(), HandleError>;

    /// Forces the handle out of its held state. The implementation is
    /// responsible for reporting `was_released` afterwards.
    fn release(&mut self);
}

pub type SharedHandle = Arc<RwLock<dyn Handle + Send + Sync>>;
pub type WeakHandle = Weak<RwLock<dyn Handle + Send + Sync>>;

pub fn share_handle<H>(handle: H) -> Arc<RwLock<H>>
where
    H: Handle + Send + Sync + 'static,
{
    Arc::new(RwLock::new(handle))
}
