use std::{fmt::Debug, time::Duration};

pub trait XrdsObject: Debug {
    fn name(&self) -> Option<&str> {
        None
    }
    /// Called once when the object enters a world, before its first update
    fn on_construct(&mut self);
    fn on_destroy(&mut self);
}

pub trait XrdsComponent: XrdsObject {
    /// Per-frame tick. `elapsed` is the time since the previous tick.
    fn update(&mut self, elapsed: Duration);
}
