// observer.rs - Generation-change listeners registered on an engine

use crate::grid::GridSnapshot;

/// Receives the engine state every time the generation counter is written.
pub trait GenerationObserver: Send {
    fn generation_changed(&mut self, snapshot: &GridSnapshot);
}

impl<F> GenerationObserver for F
where
    F: FnMut(&GridSnapshot) + Send,
{
    fn generation_changed(&mut self, snapshot: &GridSnapshot) {
        self(snapshot)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u64,
    observers: Vec<(ObserverId, Box<dyn GenerationObserver>)>,
}

impl ObserverRegistry {
    pub fn add(&mut self, observer: Box<dyn GenerationObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Calls every observer in registration order.
    pub fn notify(&mut self, snapshot: &GridSnapshot) {
        for (_, observer) in &mut self.observers {
            observer.generation_changed(snapshot);
        }
    }
}
