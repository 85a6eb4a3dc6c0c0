use std::time::Duration;

use crate::{Runtime, RuntimeError, RuntimeParameters};

#[derive(Default)]
pub struct RuntimeBuilder {
    params: RuntimeParameters,
}

pub fn new() -> RuntimeBuilder {
    RuntimeBuilder {
        ..Default::default()
    }
}

impl RuntimeBuilder {
    pub fn with_application_name(mut self, application_name: &str) -> Self {
        self.params.app_name = application_name.to_owned();
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.params.tick_rate = tick_rate;
        self
    }

    pub fn with_max_frames(mut self, max_frames: u64) -> Self {
        self.params.max_frames = Some(max_frames);
        self
    }

    pub fn build(self) -> Result<Runtime, RuntimeError> {
        Runtime::new(self.params)
    }
}
