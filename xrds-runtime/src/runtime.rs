use std::time::Duration;

use log::{debug, info};
use tokio::time::{Instant, MissedTickBehavior};

use crate::{RuntimeBuilder, RuntimeError, World};

/// Application callbacks driven by [`Runtime`].
///
/// `on_update` runs before the world is ticked, so input fed to components there
/// is observed by the same frame.
pub trait RuntimeHandler {
    fn on_construct(&mut self) -> anyhow::Result<()>;
    fn on_begin(&mut self, world: &mut World) -> anyhow::Result<()>;
    fn on_update(&mut self, world: &mut World, diff: Duration) -> anyhow::Result<()>;
    fn on_end(&mut self, world: &mut World) -> anyhow::Result<()>;
}

#[derive(Debug, Clone)]
pub struct RuntimeParameters {
    pub app_name: String,
    pub tick_rate: Duration,
    /// Stop after this many frames. Runs until interrupted when `None`.
    pub max_frames: Option<u64>,
}

impl Default for RuntimeParameters {
    fn default() -> Self {
        Self {
            app_name: "xrds".to_owned(),
            tick_rate: Duration::from_secs_f32(1.0 / 120.0),
            max_frames: None,
        }
    }
}

#[derive(Debug)]
pub struct Runtime {
    params: RuntimeParameters,
    world: World,
}

impl Runtime {
    pub fn new(params: RuntimeParameters) -> Result<Self, RuntimeError> {
        if params.tick_rate.is_zero() {
            return Err(RuntimeError::InvalidTickRate);
        }
        let world = World::new(&params.app_name);
        Ok(Self { params, world })
    }

    pub fn builder() -> RuntimeBuilder {
        crate::new()
    }

    pub fn params(&self) -> &RuntimeParameters {
        &self.params
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Runs the frame loop on a single-threaded executor until it finishes.
    pub fn run_block<A>(self, app: A) -> Result<(), RuntimeError>
    where
        A: RuntimeHandler,
    {
        let frame_runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .enable_io()
            .thread_name(format!("{}-frame", self.params.app_name))
            .build()?;

        frame_runtime.block_on(self.run(app))
    }

    pub async fn run<A>(mut self, mut app: A) -> Result<(), RuntimeError>
    where
        A: RuntimeHandler,
    {
        app.on_construct()?;
        app.on_begin(&mut self.world)?;
        info!(
            "Runtime '{}' started (tick_rate={:?}, max_frames={:?})",
            self.params.app_name, self.params.tick_rate, self.params.max_frames
        );

        let mut interval = tokio::time::interval(self.params.tick_rate);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut before = Instant::now();

        while !self.is_finished() {
            tokio::select! {
                _ = interval.tick() => {}
                result = tokio::signal::ctrl_c() => {
                    result?;
                    info!("Interrupted");
                    break;
                }
            }
            let now = Instant::now();
            let diff = now.duration_since(before);
            before = now;
            self.step(&mut app, diff)?;
        }

        self.finish(app)
    }

    /// Steps `frames` frames of `diff` each without waiting on the clock.
    pub fn run_frames<A>(
        mut self,
        mut app: A,
        frames: u64,
        diff: Duration,
    ) -> Result<(), RuntimeError>
    where
        A: RuntimeHandler,
    {
        app.on_construct()?;
        app.on_begin(&mut self.world)?;
        for _ in 0..frames {
            self.step(&mut app, diff)?;
        }
        self.finish(app)
    }

    fn is_finished(&self) -> bool {
        self.params
            .max_frames
            .is_some_and(|max_frames| self.world.frame() >= max_frames)
    }

    fn step<A>(&mut self, app: &mut A, diff: Duration) -> Result<(), RuntimeError>
    where
        A: RuntimeHandler,
    {
        app.on_update(&mut self.world, diff)?;
        self.world.update(diff);
        Ok(())
    }

    fn finish<A>(mut self, mut app: A) -> Result<(), RuntimeError>
    where
        A: RuntimeHandler,
    {
        app.on_end(&mut self.world)?;
        self.world.clear();
        debug!("Runtime '{}' finished", self.params.app_name);
        Ok(())
    }
}
