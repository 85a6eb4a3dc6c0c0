#[derive(Clone, Copy, clap::Subcommand)]
pub enum ScenarioKind {
    /// Left hand grabs and carries the object, right hand takes it over and throws it
    Handoff,
    /// Both hands grab on the same frame; the later handle wins
    Simultaneous,
    /// Nobody holds the object; it drifts to a new target and drags its handles along
    Drift,
}

#[derive(Clone, clap::Args)]
pub struct ScenarioOptions {
    /// Number of frames to simulate
    #[arg(long, default_value_t = 180)]
    pub frames: u64,
    /// Frame rate in Hz
    #[arg(long, default_value_t = 90.0)]
    pub tick_rate: f32,
    /// Half-life of the object's smoothing in milliseconds
    #[arg(long, default_value_t = 25)]
    pub half_life_ms: u64,
    /// Release speed (m/s) above which a release counts as a throw
    #[arg(long, default_value_t = 1.5)]
    pub throw_speed: f32,
    /// Amplitude of random hand tracking noise in meters
    #[arg(long, default_value_t = 0.0)]
    pub jitter: f32,
    /// Pace frames on the wall clock instead of stepping as fast as possible
    #[arg(long, default_value_t = false)]
    pub realtime: bool,
}
