use std::{fmt::Debug, sync::Arc, time::Duration};

use xrds_core::{
    read_lock, write_lock, Handle, HandleError, Pose, SharedHandle, Transform, WeakHandle,
    XrdsComponent, XrdsObject,
};

use crate::{ExponentialSmoothing, Smoothing};

pub type TargetHook = Box<dyn FnMut(&mut Pose) + Send + Sync>;

/// Object that is grabbed and moved through a fixed set of handles.
///
/// Only one handle is held at a time. While a handle is held the object's target
/// pose follows that handle through the offset recorded the first time the handle
/// was seen, and every handle (held or not) is told to stay rigidly attached to
/// the object.
pub struct HandledObject {
    name: String,
    handles: Vec<WeakHandle>,
    /// Handle pose relative to the object, indexed by handle slot. Captured once.
    handle_deltas: Vec<Option<Pose>>,
    held_handle: Option<usize>,
    pose: Pose,
    prev_pose: Pose,
    target_pose: Pose,
    smoothing: Box<dyn Smoothing>,
    on_update_target: Option<TargetHook>,
}

impl Debug for HandledObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandledObject")
            .field("name", &self.name)
            .field("handles", &self.handles.len())
            .field("handle_deltas", &self.handle_deltas)
            .field("held_handle", &self.held_handle)
            .field("pose", &self.pose)
            .field("target_pose", &self.target_pose)
            .field("smoothing", &self.smoothing)
            .finish()
    }
}

#[derive(Default)]
pub struct HandledObjectBuilder {
    name: String,
    pose: Pose,
    handles: Vec<WeakHandle>,
    smoothing: Option<Box<dyn Smoothing>>,
    on_update_target: Option<TargetHook>,
}

impl HandledObjectBuilder {
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    /// Appends a handle. Slots are assigned in call order and iteration follows them.
    pub fn with_handle(mut self, handle: SharedHandle) -> Self {
        self.handles.push(Arc::downgrade(&handle));
        self
    }

    pub fn with_smoothing<S>(mut self, smoothing: S) -> Self
    where
        S: Smoothing + 'static,
    {
        self.smoothing = Some(Box::new(smoothing));
        self
    }

    /// Hook run every update right before smoothing, free to adjust the target pose
    pub fn with_target_hook<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut Pose) + Send + Sync + 'static,
    {
        self.on_update_target = Some(Box::new(hook));
        self
    }

    pub fn build(self) -> HandledObject {
        let handle_count = self.handles.len();
        HandledObject {
            name: self.name,
            handles: self.handles,
            handle_deltas: vec![None; handle_count],
            held_handle: None,
            pose: self.pose,
            prev_pose: self.pose,
            target_pose: self.pose,
            smoothing: self
                .smoothing
                .unwrap_or_else(|| Box::new(ExponentialSmoothing::default())),
            on_update_target: self.on_update_target,
        }
    }
}

impl HandledObject {
    pub fn builder(name: &str) -> HandledObjectBuilder {
        HandledObjectBuilder {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    /// Slot of the currently held handle
    pub fn held_handle(&self) -> Option<usize> {
        self.held_handle
    }

    pub fn handle(&self, slot: usize) -> Option<SharedHandle> {
        self.handles.get(slot).and_then(|weak| weak.upgrade())
    }

    /// Cached pose of the handle in `slot` relative to this object, if it was seen yet
    pub fn handle_delta(&self, slot: usize) -> Result<Option<Pose>, HandleError> {
        self.handle_deltas
            .get(slot)
            .copied()
            .ok_or(HandleError::SlotOutOfBounds {
                slot,
                len: self.handles.len(),
            })
    }

    pub fn prev_pose(&self) -> Pose {
        self.prev_pose
    }

    pub fn transform(&self) -> Transform {
        Transform::from(self.pose)
    }

    fn live_handles(&self) -> Vec<(usize, SharedHandle)> {
        self.handles
            .iter()
            .enumerate()
            .filter_map(|(slot, weak)| match weak.upgrade() {
                Some(handle) => Some((slot, handle)),
                None => {
                    log::warn!("Handle slot {} of '{}' was dropped", slot, self.name);
                    None
                }
            })
            .collect()
    }

    fn any_handle(&self, f: impl Fn(&dyn Handle) -> bool) -> bool {
        self.handles
            .iter()
            .filter_map(|weak| weak.upgrade())
            .any(|handle| f(&*read_lock(&handle)))
    }
}

fn find_handle(handles: &[(usize, SharedHandle)], slot: usize) -> Option<&SharedHandle> {
    handles
        .iter()
        .find(|(s, _)| *s == slot)
        .map(|(_, handle)| handle)
}

impl XrdsObject for HandledObject {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn on_construct(&mut self) {
        self.target_pose = self.pose;
        self.prev_pose = self.pose;
    }

    fn on_destroy(&mut self) {
        self.release();
    }
}

impl XrdsComponent for HandledObject {
    fn update(&mut self, elapsed: Duration) {
        let obj_pose = self.pose;
        let handles = self.live_handles();

        if let Some(slot) = self.held_handle {
            let released = find_handle(&handles, slot)
                .map_or(true, |handle| read_lock(handle).was_released());
            if released {
                log::debug!("'{}' released by handle {}", self.name, slot);
                self.held_handle = None;
            }
        }

        // Only one handle may be held at a time. Among the handles grabbed this frame the
        // last one in slot order wins, and only a holder from a previous frame is released.
        let previous = self.held_handle;
        let grabbed = handles
            .iter()
            .filter(|(slot, handle)| previous != Some(*slot) && read_lock(handle).was_held())
            .map(|(slot, _)| *slot)
            .last();
        if let Some(slot) = grabbed {
            if let Some(prev_handle) = previous.and_then(|prev| find_handle(&handles, prev)) {
                write_lock(prev_handle).release();
            }
            log::debug!("'{}' grabbed by handle {}", self.name, slot);
            self.held_handle = Some(slot);
        }

        for (slot, handle) in &handles {
            if self.handle_deltas[*slot].is_none() {
                let delta = read_lock(handle).pose().relative_to(&obj_pose);
                self.handle_deltas[*slot] = Some(delta);
            }
        }

        if let Some(slot) = self.held_handle {
            let held = find_handle(&handles, slot);
            if let (Some(handle), Some(delta)) = (held, self.handle_deltas[slot]) {
                self.target_pose = read_lock(handle).pose().then(&delta.inverse());
            }
        }

        if let Some(hook) = self.on_update_target.as_mut() {
            hook(&mut self.target_pose);
        }

        let new_pose = self
            .smoothing
            .smooth(&self.prev_pose, &self.pose, &self.target_pose, elapsed);
        self.prev_pose = self.pose;
        self.pose = new_pose;

        for (slot, handle) in &handles {
            if let Some(delta) = self.handle_deltas[*slot] {
                write_lock(handle).set_target_pose(self.pose.then(&delta));
            }
        }
    }
}

impl Handle for HandledObject {
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
        self.held_handle.is_some()
    }

    fn was_held(&self) -> bool {
        self.any_handle(|handle| handle.was_held())
    }

    fn was_moved(&self) -> bool {
        self.any_handle(|handle| handle.was_moved())
    }

    fn was_released(&self) -> bool {
        self.any_handle(|handle| handle.was_released())
    }

    fn was_thrown(&self) -> bool {
        self.any_handle(|handle| handle.was_thrown())
    }

    fn hold(&mut self) -> Result<(), HandleError> {
        log::error!(
            "Can't hold '{}' directly; call hold() on one of its handles instead",
            self.name
        );
        Err(HandleError::InvalidOperation(
            "handled objects are held through their handles",
        ))
    }

    fn release(&mut self) {
        if let Some(slot) = self.held_handle.take() {
            if let Some(handle) = self.handle(slot) {
                write_lock(&handle).release();
            }
        }
    }
}
