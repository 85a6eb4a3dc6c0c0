use std::{
    sync::{Arc, RwLock},
    time::Duration,
};

use glam::{vec3, Quat, Vec3};
use log::info;
use rand::Rng;
use xrds::{
    base::{read_lock, write_lock, Handle, Pose},
    components::{AnchorHandle, ExponentialSmoothing, HandledObject},
    Runtime, RuntimeHandler, RuntimeParameters, World,
};

mod program_args;
pub use program_args::*;

const OBJECT_ORIGIN: Vec3 = vec3(0.0, 1.0, -0.4);
const LEFT_GRIP: Vec3 = vec3(-0.15, 1.0, -0.4);
const RIGHT_GRIP: Vec3 = vec3(0.15, 1.0, -0.4);
const REPORT_INTERVAL: u64 = 15;

struct ScenarioApp {
    kind: ScenarioKind,
    jitter: f32,
    object: Arc<RwLock<HandledObject>>,
    left: Arc<RwLock<AnchorHandle>>,
    right: Arc<RwLock<AnchorHandle>>,
    frame: u64,
}

impl ScenarioApp {
    fn new(kind: ScenarioKind, options: &ScenarioOptions) -> anyhow::Result<Self> {
        let left = Arc::new(RwLock::new(
            AnchorHandle::new("left", Pose::from_position(LEFT_GRIP))
                .with_throw_speed(options.throw_speed),
        ));
        let right = Arc::new(RwLock::new(
            AnchorHandle::new("right", Pose::from_position(RIGHT_GRIP))
                .with_throw_speed(options.throw_speed),
        ));
        let smoothing = ExponentialSmoothing::new(Duration::from_millis(options.half_life_ms))?;
        let object = HandledObject::builder("crate")
            .with_pose(Pose::from_position(OBJECT_ORIGIN))
            .with_handle(left.clone())
            .with_handle(right.clone())
            .with_smoothing(smoothing)
            .build();

        Ok(Self {
            kind,
            jitter: options.jitter,
            object: Arc::new(RwLock::new(object)),
            left,
            right,
            frame: 0,
        })
    }

    /// Moves a held anchor by `step`, plus tracking noise
    fn drag(&self, anchor: &Arc<RwLock<AnchorHandle>>, step: Vec3) {
        let noise = if self.jitter > 0.0 {
            let mut rng = rand::rng();
            vec3(
                rng.random_range(-self.jitter..self.jitter),
                rng.random_range(-self.jitter..self.jitter),
                rng.random_range(-self.jitter..self.jitter),
            )
        } else {
            Vec3::ZERO
        };
        let mut anchor = write_lock(anchor);
        let pose = anchor.pose();
        anchor.track(pose.with_position(pose.position + step + noise));
    }

    fn handoff(&mut self) -> anyhow::Result<()> {
        match self.frame {
            10 => write_lock(&self.left).hold()?,
            11..=69 => self.drag(&self.left, vec3(0.0, 0.002, -0.004)),
            70 => write_lock(&self.right).hold()?,
            // 4 cm per frame is well above the throw speed at 90 Hz
            71..=99 => self.drag(&self.right, vec3(0.04, 0.01, 0.0)),
            100 => write_lock(&self.right).release(),
            _ => {}
        }
        Ok(())
    }

    fn simultaneous(&mut self) -> anyhow::Result<()> {
        match self.frame {
            10 => {
                write_lock(&self.left).hold()?;
                write_lock(&self.right).hold()?;
            }
            11..=59 => self.drag(&self.right, vec3(0.0, 0.004, 0.0)),
            60 => {
                write_lock(&self.right).release();
                write_lock(&self.left).release();
            }
            _ => {}
        }
        Ok(())
    }

    fn drift(&mut self) -> anyhow::Result<()> {
        if self.frame == 0 {
            let target = Pose::new(vec3(0.5, 1.2, -0.8), Quat::from_rotation_y(0.8));
            write_lock(&self.object).set_target_pose(target);
        }
        Ok(())
    }

    fn report(&self) {
        let object = read_lock(&self.object);
        if object.was_held() {
            info!("[{}] grabbed by handle {:?}", self.frame, object.held_handle());
        }
        if object.was_thrown() {
            info!("[{}] thrown at {:.3} m/s", self.frame, self.release_speed());
        } else if object.was_released() {
            info!("[{}] released", self.frame);
        }
        if self.frame % REPORT_INTERVAL == 0 {
            let pose = object.pose();
            info!(
                "[{}] object pos={:.3?} rot={:.3?} held={:?} left={:.3?} right={:.3?}",
                self.frame,
                pose.position,
                pose.rotation,
                object.held_handle(),
                read_lock(&self.left).pose().position,
                read_lock(&self.right).pose().position,
            );
        }
    }

    fn release_speed(&self) -> f32 {
        read_lock(&self.left)
            .velocity()
            .length()
            .max(read_lock(&self.right).velocity().length())
    }
}

impl RuntimeHandler for ScenarioApp {
    fn on_construct(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_begin(&mut self, world: &mut World) -> anyhow::Result<()> {
        // anchors latch their input before the object reads it
        world.register(self.left.clone());
        world.register(self.right.clone());
        world.register(self.object.clone());
        Ok(())
    }

    fn on_update(&mut self, _world: &mut World, _diff: Duration) -> anyhow::Result<()> {
        self.report();
        match self.kind {
            ScenarioKind::Handoff => self.handoff()?,
            ScenarioKind::Simultaneous => self.simultaneous()?,
            ScenarioKind::Drift => self.drift()?,
        }
        self.frame += 1;
        Ok(())
    }

    fn on_end(&mut self, world: &mut World) -> anyhow::Result<()> {
        let object = read_lock(&self.object);
        info!(
            "Finished after {} frames: object pos={:.3?} target={:.3?} held={:?}",
            world.frame(),
            object.pose().position,
            object.target_pose().position,
            object.held_handle(),
        );
        Ok(())
    }
}

pub fn run(kind: ScenarioKind, options: ScenarioOptions) -> anyhow::Result<()> {
    if options.tick_rate <= 0.0 {
        anyhow::bail!("Tick rate must be positive (got {})", options.tick_rate);
    }
    let tick_rate = Duration::from_secs_f32(1.0 / options.tick_rate);
    let app = ScenarioApp::new(kind, &options)?;
    let runtime = Runtime::new(RuntimeParameters {
        app_name: "xrds-demos".to_owned(),
        tick_rate,
        max_frames: Some(options.frames),
    })?;

    if options.realtime {
        runtime.run_block(app)?;
    } else {
        runtime.run_frames(app, options.frames, tick_rate)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ScenarioOptions {
        ScenarioOptions {
            frames: 0,
            tick_rate: 90.0,
            half_life_ms: 25,
            throw_speed: 1.5,
            jitter: 0.0,
            realtime: false,
        }
    }

    fn step(app: &mut ScenarioApp, world: &mut World, frames: u64) {
        let diff = Duration::from_secs_f32(1.0 / 90.0);
        for _ in 0..frames {
            app.on_update(world, diff).unwrap();
            world.update(diff);
        }
    }

    #[test]
    fn handoff_ends_with_a_throw() {
        let mut app = ScenarioApp::new(ScenarioKind::Handoff, &options()).unwrap();
        let mut world = World::new("test");
        app.on_begin(&mut world).unwrap();

        step(&mut app, &mut world, 71);
        assert_eq!(read_lock(&app.object).held_handle(), Some(1));
        assert!(!read_lock(&app.left).is_held());

        step(&mut app, &mut world, 30);
        assert!(read_lock(&app.right).was_thrown());
        assert_eq!(read_lock(&app.object).held_handle(), None);
    }

    #[test]
    fn simultaneous_grab_keeps_right_hand() {
        let mut app = ScenarioApp::new(ScenarioKind::Simultaneous, &options()).unwrap();
        let mut world = World::new("test");
        app.on_begin(&mut world).unwrap();

        step(&mut app, &mut world, 12);

        assert_eq!(read_lock(&app.object).held_handle(), Some(1));
        assert!(read_lock(&app.left).is_held());
    }

    #[test]
    fn drift_drags_handles_along() {
        let mut app = ScenarioApp::new(ScenarioKind::Drift, &options()).unwrap();
        let mut world = World::new("test");
        app.on_begin(&mut world).unwrap();

        step(&mut app, &mut world, 200);

        let object = read_lock(&app.object);
        let target = object.target_pose();
        assert!(object.pose().abs_diff_eq(&target, 1e-3));
        let delta = object.handle_delta(0).unwrap().unwrap();
        assert!(read_lock(&app.left)
            .pose()
            .abs_diff_eq(&target.then(&delta), 1e-2));
    }
}
