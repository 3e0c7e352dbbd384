//! Tiered task queue.
//!
//! Three FIFO lanes feed the pump:
//!
//! - **Immediate**: work that must run soon on the pump (cross-thread calls, input)
//! - **Main**: event dispatch and bubbling
//! - **Deferred**: runs only once Immediate and Main are both empty
//!
//! Immediate and Main form the upper tier; Immediate is drained first within it.
//! Producers on any thread push; only the pump pops. Items pushed while the
//! pump is draining are eligible in the same drain.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// Queue lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    Immediate,
    Main,
    Deferred,
}

#[derive(Debug)]
struct Lanes<T> {
    immediate: VecDeque<T>,
    main: VecDeque<T>,
    deferred: VecDeque<T>,
}

impl<T> Default for Lanes<T> {
    fn default() -> Self {
        Self {
            immediate: VecDeque::new(),
            main: VecDeque::new(),
            deferred: VecDeque::new(),
        }
    }
}

/// Multi-producer, single-consumer queue with three lanes.
///
/// Cloning yields another handle to the same queue.
#[derive(Debug)]
pub struct TaskQueue<T> {
    lanes: Arc<Mutex<Lanes<T>>>,
}

impl<T> Clone for TaskQueue<T> {
    fn clone(&self) -> Self {
        Self {
            lanes: Arc::clone(&self.lanes),
        }
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            lanes: Arc::new(Mutex::new(Lanes::default())),
        }
    }

    // A panicking task never holds the lock, so poisoning only means some
    // other thread died mid-push; the lanes themselves are still consistent.
    fn lock(&self) -> MutexGuard<'_, Lanes<T>> {
        self.lanes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append an item to a lane.
    pub fn push(&self, lane: Lane, item: T) {
        let mut lanes = self.lock();
        match lane {
            Lane::Immediate => lanes.immediate.push_back(item),
            Lane::Main => lanes.main.push_back(item),
            Lane::Deferred => lanes.deferred.push_back(item),
        }
    }

    /// Next item in drain order, or `None` when every lane is empty.
    ///
    /// The upper tier is not interleaved: Immediate empties before Main is
    /// touched, even for Main items queued earlier. Deferred runs last.
    pub fn pop(&self) -> Option<T> {
        let mut lanes = self.lock();
        lanes
            .immediate
            .pop_front()
            .or_else(|| lanes.main.pop_front())
            .or_else(|| lanes.deferred.pop_front())
    }

    /// Number of queued items in one lane.
    pub fn len(&self, lane: Lane) -> usize {
        let lanes = self.lock();
        match lane {
            Lane::Immediate => lanes.immediate.len(),
            Lane::Main => lanes.main.len(),
            Lane::Deferred => lanes.deferred.len(),
        }
    }

    /// Total queued items.
    pub fn pending(&self) -> usize {
        let lanes = self.lock();
        lanes.immediate.len() + lanes.main.len() + lanes.deferred.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending() == 0
    }
}
