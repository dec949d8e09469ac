use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// "Go back" primitive used after a successful save or on cancel.
pub trait Navigator: Send + Sync {
    fn back(&self);
}

/// Stack of visited console routes. The root entry is never popped.
#[derive(Debug)]
pub struct History {
    stack: Mutex<Vec<String>>,
}

impl History {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            stack: Mutex::new(vec![root.into()]),
        }
    }

    fn stack(&self) -> MutexGuard<'_, Vec<String>> {
        self.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, route: impl Into<String>) {
        let route = route.into();
        debug!(route = %route, "Navigate");
        self.stack().push(route);
    }

    pub fn current(&self) -> Option<String> {
        self.stack().last().cloned()
    }

    pub fn depth(&self) -> usize {
        self.stack().len()
    }
}

impl Navigator for History {
    fn back(&self) {
        let mut stack = self.stack();
        if stack.len() <= 1 {
            debug!("Already at root, back ignored");
            return;
        }
        let from = stack.pop().unwrap_or_default();
        let to = stack.last().cloned().unwrap_or_default();
        info!(from = %from, to = %to, "Navigate back");
    }
}
