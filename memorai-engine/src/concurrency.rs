//! Cancellation, deadlines and backpressure, per spec §5. The engine's
//! trait surfaces are synchronous (`fn`, not `async fn`), so these are
//! plain, cooperative primitives checked at coarse stage boundaries rather
//! than an async runtime's task cancellation — consistent with the rest of
//! the workspace, which expresses concurrency via threads/`rayon` and
//! `DashMap`, not `tokio`.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use memorai_core::errors::{MemoraiError, MemoraiResult};

/// A shared, cooperative cancel flag. Cloning shares the same underlying
/// flag; `cancel()` from any clone is observed by every other.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A caller-supplied deadline, measured from the moment the call started.
#[derive(Clone, Copy)]
pub struct Deadline {
    started_at: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    pub fn new(limit: Option<Duration>) -> Self {
        Self { started_at: Instant::now(), limit }
    }

    pub fn none() -> Self {
        Self::new(None)
    }

    fn is_expired(&self) -> bool {
        self.limit.is_some_and(|limit| self.started_at.elapsed() > limit)
    }
}

/// Checked at coarse stage boundaries; never mid-computation. Returns
/// `Timeout` before `Cancelled` when both conditions hold, since an expired
/// deadline is the more specific diagnosis.
pub fn check(deadline: Deadline, cancellation: Option<&CancellationToken>) -> MemoraiResult<()> {
    if deadline.is_expired() {
        return Err(MemoraiError::Timeout);
    }
    if cancellation.is_some_and(CancellationToken::is_cancelled) {
        return Err(MemoraiError::Cancelled);
    }
    Ok(())
}

/// Bounded admission in front of `remember`, per spec §5 "optional bounded
/// queue ... when full, new writes fail fast with `Overloaded`". Tracks an
/// in-flight count against a fixed capacity rather than literally queueing —
/// the effect (fail-fast on saturation) is the same without a buffering
/// stage that nothing else in this engine needs.
pub struct AdmissionControl {
    capacity: Option<usize>,
    in_flight: AtomicUsize,
}

impl AdmissionControl {
    pub fn new(capacity: Option<usize>) -> Self {
        Self { capacity, in_flight: AtomicUsize::new(0) }
    }

    /// Admits one caller, returning a guard that releases the slot on drop.
    /// Fails with `Overloaded` if `capacity` is set and already saturated.
    pub fn admit(&self) -> MemoraiResult<AdmissionGuard<'_>> {
        if let Some(capacity) = self.capacity {
            let previous = self.in_flight.fetch_add(1, Ordering::SeqCst);
            if previous >= capacity {
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                return Err(MemoraiError::Overloaded);
            }
        }
        Ok(AdmissionGuard { control: self })
    }
}

pub struct AdmissionGuard<'a> {
    control: &'a AdmissionControl,
}

impl Drop for AdmissionGuard<'_> {
    fn drop(&mut self) {
        if self.control.capacity.is_some() {
            self.control.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_observed_across_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn deadline_of_none_never_expires() {
        let deadline = Deadline::none();
        assert!(check(deadline, None).is_ok());
    }

    #[test]
    fn admission_control_rejects_past_capacity() {
        let control = AdmissionControl::new(Some(1));
        let first = control.admit().unwrap();
        assert!(matches!(control.admit(), Err(MemoraiError::Overloaded)));
        drop(first);
        assert!(control.admit().is_ok());
    }

    #[test]
    fn unbounded_admission_control_never_rejects() {
        let control = AdmissionControl::new(None);
        let guards: Vec<_> = (0..1000).map(|_| control.admit().unwrap()).collect();
        assert_eq!(guards.len(), 1000);
    }
}
