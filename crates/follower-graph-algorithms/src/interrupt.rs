//! Cooperative cancellation for the iterative solvers
//!
//! Solvers poll an [`Interrupt`] once per iteration. A tripped interrupt
//! ends the solve with [`crate::AlgoError::Interrupted`]; the partial vector
//! is dropped, never returned.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub trait Interrupt {
    fn is_interrupted(&self) -> bool;
}

/// Never interrupts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl Interrupt for Never {
    fn is_interrupted(&self) -> bool {
        false
    }
}

/// Wall-clock time budget.
///
/// A budget too large to represent as an [`Instant`] never expires.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    pub fn at(at: Instant) -> Self {
        Self { at: Some(at) }
    }

    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now().checked_add(budget),
        }
    }
}

impl Interrupt for Deadline {
    fn is_interrupted(&self) -> bool {
        self.at.map_or(false, |at| Instant::now() >= at)
    }
}

/// A flag another thread can raise.
impl Interrupt for AtomicBool {
    fn is_interrupted(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: Interrupt> Interrupt for Option<T> {
    fn is_interrupted(&self) -> bool {
        self.as_ref().map_or(false, Interrupt::is_interrupted)
    }
}

impl<T: Interrupt + ?Sized> Interrupt for &T {
    fn is_interrupted(&self) -> bool {
        (**self).is_interrupted()
    }
}

impl<T: Interrupt + ?Sized> Interrupt for Arc<T> {
    fn is_interrupted(&self) -> bool {
        (**self).is_interrupted()
    }
}
