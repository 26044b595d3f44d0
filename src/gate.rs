//! Concurrency gate bounding the number of simultaneously executing tasks
//!
//! The gate is a counting semaphore with a fixed capacity plus a pair of atomic counters
//! used for observability. Admission hands out a [`GatePermit`]; the slot is released when
//! the permit is dropped, so every exit path of a task (normal return, early `?` return,
//! panic unwinding) gives its slot back.

use crate::error::FetchError;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Fixed-capacity admission gate shared by all tasks of an engine
///
/// Cloning is cheap and clones share the same slots and counters.
///
/// # Examples
///
/// ```
/// use bounded_fetch::gate::ConcurrencyGate;
///
/// # async fn example() {
/// let gate = ConcurrencyGate::new(2);
///
/// let first = gate.acquire().await.unwrap();
/// let _second = gate.acquire().await.unwrap();
/// assert_eq!(gate.available(), 0);
///
/// drop(first);
/// assert_eq!(gate.available(), 1);
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ConcurrencyGate {
    /// Slots; the semaphore guarantees at most `capacity` outstanding permits
    slots: Arc<Semaphore>,
    /// Configured capacity (C)
    capacity: usize,
    /// Tasks currently past admission and not yet released
    in_flight: Arc<AtomicUsize>,
    /// Highest value `in_flight` has reached
    peak: Arc<AtomicUsize>,
}

impl ConcurrencyGate {
    /// Create a gate with `capacity` slots
    ///
    /// A capacity of zero is raised to one; configuration validation rejects zero before
    /// an engine ever builds its gate.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Arc::new(Semaphore::new(capacity)),
            capacity,
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wait until a slot is free and take it
    ///
    /// Returns [`FetchError::GateClosed`] if the gate was closed before or while waiting.
    pub async fn acquire(&self) -> Result<GatePermit, FetchError> {
        let permit = self
            .slots
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| FetchError::GateClosed)?;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        Ok(GatePermit {
            _permit: permit,
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    /// Close the gate: waiters and later acquirers get [`FetchError::GateClosed`]
    ///
    /// Permits already handed out stay valid until dropped.
    pub fn close(&self) {
        self.slots.close();
    }

    /// Whether the gate has been closed
    pub fn is_closed(&self) -> bool {
        self.slots.is_closed()
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots currently free
    pub fn available(&self) -> usize {
        self.slots.available_permits()
    }

    /// Number of tasks currently holding a slot
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of tasks that held a slot at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// An admitted slot; dropping it releases the slot and wakes the next waiter
#[derive(Debug)]
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
    in_flight: Arc<AtomicUsize>,
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        // Runs before the semaphore permit field is dropped, so in_flight never
        // undercounts a task that has not yet released its slot.
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
