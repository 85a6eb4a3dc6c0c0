use std::{
    sync::{Arc, RwLock},
    time::Duration,
};

use glam::{vec3, Quat};
use xrds_components::{AnchorHandle, HandledObject};
use xrds_core::{read_lock, share_handle, write_lock, Handle, Pose, XrdsComponent, XrdsObject};

const FRAME: Duration = Duration::from_millis(11);

struct Rig {
    left: Arc<RwLock<AnchorHandle>>,
    right: Arc<RwLock<AnchorHandle>>,
    object: HandledObject,
}

impl Rig {
    fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let left = share_handle(AnchorHandle::new(
            "left",
            Pose::from_position(vec3(-0.2, 1.0, 0.0)),
        ));
        let right = share_handle(AnchorHandle::new(
            "right",
            Pose::new(vec3(0.2, 1.0, 0.0), Quat::from_rotation_z(0.3)),
        ));
        let mut object = HandledObject::builder("bar")
            .with_pose(Pose::from_position(vec3(0.0, 1.0, 0.0)))
            .with_handle(left.clone())
            .with_handle(right.clone())
            .build();
        write_lock(&left).on_construct();
        write_lock(&right).on_construct();
        object.on_construct();
        Self {
            left,
            right,
            object,
        }
    }

    /// Anchors first, then the object, like a world would
    fn tick(&mut self) {
        write_lock(&self.left).update(FRAME);
        write_lock(&self.right).update(FRAME);
        self.object.update(FRAME);
    }
}

#[test]
fn carried_object_follows_hand_then_settles_after_release() {
    let mut rig = Rig::new();
    rig.tick();

    write_lock(&rig.left).hold().unwrap();
    let mut hand = read_lock(&rig.left).pose();
    for _ in 0..60 {
        hand.position += vec3(0.0, 0.0, -0.01);
        write_lock(&rig.left).track(hand);
        rig.tick();
    }

    // grip offset is preserved: the object sits 0.2 m to the right of the hand
    let expected = Pose::from_position(hand.position + vec3(0.2, 0.0, 0.0));
    assert_eq!(rig.object.held_handle(), Some(0));
    assert!(rig.object.target_pose().abs_diff_eq(&expected, 1e-4));
    assert!(rig.object.pose().abs_diff_eq(&expected, 0.05));

    write_lock(&rig.left).release();
    rig.tick();
    assert!(rig.object.was_released());
    assert_eq!(rig.object.held_handle(), None);

    for _ in 0..120 {
        rig.tick();
    }
    assert!(rig.object.pose().abs_diff_eq(&expected, 1e-3));

    // the free right anchor ends up where it was attached, relative to the object
    let delta = rig.object.handle_delta(1).unwrap().unwrap();
    assert!(read_lock(&rig.right)
        .pose()
        .abs_diff_eq(&rig.object.pose().then(&delta), 1e-3));
}

#[test]
fn switching_hands_force_releases_the_first() {
    let mut rig = Rig::new();
    rig.tick();

    write_lock(&rig.left).hold().unwrap();
    rig.tick();
    assert_eq!(rig.object.held_handle(), Some(0));

    write_lock(&rig.right).hold().unwrap();
    rig.tick();
    assert_eq!(rig.object.held_handle(), Some(1));
    assert!(!read_lock(&rig.left).is_held());

    rig.tick();
    assert!(read_lock(&rig.left).was_released());
    // the stale release of the old holder does not affect the new one
    assert_eq!(rig.object.held_handle(), Some(1));
}

#[test]
fn releasing_the_object_releases_its_hand() {
    let mut rig = Rig::new();
    rig.tick();
    write_lock(&rig.right).hold().unwrap();
    rig.tick();

    rig.object.release();
    assert!(!read_lock(&rig.right).is_held());
    assert_eq!(rig.object.held_handle(), None);

    rig.tick();
    assert!(rig.object.was_released());
    assert!(rig.object.hold().is_err());
}
