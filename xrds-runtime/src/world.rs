use std::{
    sync::{Arc, RwLock},
    time::Duration,
};

use uuid::Uuid;
use xrds_core::{write_lock, XrdsComponent};

pub type SharedComponent = Arc<RwLock<dyn XrdsComponent + Send + Sync>>;

/// Ordered set of components ticked once per frame.
///
/// Components are updated in registration order, so anything producing input for
/// another component (hand anchors feeding a handled object) must be registered first.
#[derive(Debug, Default)]
pub struct World {
    name: String,
    components: Vec<(Uuid, SharedComponent)>,
    frame: u64,
}

impl World {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of completed updates
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Adds a component and runs its construct hook. Returns the id used to remove it.
    pub fn register(&mut self, component: SharedComponent) -> Uuid {
        let id = Uuid::new_v4();
        {
            let mut guard = write_lock(&component);
            guard.on_construct();
            log::debug!(
                "Register component: {{id={}, name={:?}, world={}}}",
                id,
                guard.name(),
                self.name
            );
        }
        self.components.push((id, component));
        id
    }

    pub fn unregister(&mut self, id: &Uuid) -> Option<SharedComponent> {
        let index = self.components.iter().position(|(cid, _)| cid == id)?;
        let (_, component) = self.components.remove(index);
        write_lock(&component).on_destroy();
        log::debug!("Unregister component: {{id={}, world={}}}", id, self.name);
        Some(component)
    }

    pub fn get(&self, id: &Uuid) -> Option<&SharedComponent> {
        self.components
            .iter()
            .find(|(cid, _)| cid == id)
            .map(|(_, component)| component)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn update(&mut self, elapsed: Duration) {
        for (_, component) in &self.components {
            write_lock(component).update(elapsed);
        }
        self.frame += 1;
    }

    pub fn clear(&mut self) {
        for (_, component) in self.components.drain(..) {
            write_lock(&component).on_destroy();
        }
    }
}
