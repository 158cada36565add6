//! Best-effort multi-step operations
//!
//! Several device procedures must run to completion even when one of their
//! bus transactions fails: leaving the embedded-function bank selected, paged
//! access latched, or the embedded engines halted in debug mode would leave the
//! device in a state that normal accessors cannot recover from.
//!
//! [`Sequence`] records the outcome of every step without short-circuiting.
//! Steps that produce a value hand it back as `Some`, so dependent steps can be
//! skipped when their input is missing while the remaining (restore) steps
//! still run.
//!
//! # Example
//!
//! ```ignore
//! let mut seq = Sequence::new();
//! if seq.step(driver.select_bank(Bank::EmbeddedFunction)).is_some() {
//!     seq.step(driver.write_something());
//! }
//! seq.step(driver.select_bank(Bank::Main));
//! seq.finish()
//! ```

use crate::Error;

/// Accumulates the results of a best-effort sequence of steps
#[derive(Debug)]
#[must_use = "a sequence reports its outcome only through `finish`"]
pub struct Sequence<E> {
    first_error: Option<Error<E>>,
    failed_steps: u8,
}

impl<E> Sequence<E> {
    /// Create an empty sequence
    pub const fn new() -> Self {
        Self {
            first_error: None,
            failed_steps: 0,
        }
    }

    /// Record the outcome of one step
    ///
    /// Returns the step's value on success, or `None` when it failed. A failed
    /// step that was itself an aggregate (`Error::Indeterminate`) contributes
    /// all of its failed steps.
    pub fn step<T>(&mut self, result: Result<T, Error<E>>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                let failures = match error {
                    Error::Indeterminate { failed_steps } => failed_steps,
                    _ => 1,
                };
                self.failed_steps = self.failed_steps.saturating_add(failures);
                if self.first_error.is_none() {
                    self.first_error = Some(error);
                }
                None
            }
        }
    }

    /// Number of failed steps recorded so far
    pub const fn failed_steps(&self) -> u8 {
        self.failed_steps
    }

    /// `true` while no step has failed
    pub const fn is_clean(&self) -> bool {
        self.failed_steps == 0
    }

    /// Finish the sequence
    ///
    /// # Errors
    ///
    /// - A single failed step is returned unchanged.
    /// - Two or more failed steps are reported as [`Error::Indeterminate`].
    pub fn finish(self) -> Result<(), Error<E>> {
        self.finish_with(())
    }

    /// Finish the sequence, returning `value` when every step succeeded
    ///
    /// # Errors
    ///
    /// Same as [`finish`](Self::finish).
    pub fn finish_with<T>(self, value: T) -> Result<T, Error<E>> {
        match (self.failed_steps, self.first_error) {
            (0, _) | (_, None) => Ok(value),
            (1, Some(error)) => Err(error),
            (failed_steps, Some(_)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Sequence finished with {} failed steps", failed_steps);
                Err(Error::Indeterminate { failed_steps })
            }
        }
    }

    /// Finish the sequence with the outcome of the step that produced its value
    ///
    /// `result` counts as one more step. Outcomes do not depend on step order,
    /// so it may come from a step that ran before the recorded ones.
    ///
    /// # Errors
    ///
    /// Same as [`finish`](Self::finish).
    pub fn finish_result<T>(mut self, result: Result<T, Error<E>>) -> Result<T, Error<E>> {
        match result {
            Ok(value) => self.finish_with(value),
            Err(error) if self.first_error.is_none() => Err(error),
            Err(error) => {
                self.step::<()>(Err(error));
                let failed_steps = self.failed_steps;
                #[cfg(feature = "defmt")]
                defmt::warn!("Sequence finished with {} failed steps", failed_steps);
                Err(Error::Indeterminate { failed_steps })
            }
        }
    }
}

impl<E> Default for Sequence<E> {
    fn default() -> Self {
        Self::new()
    }
}
