//! The error-fallback state machine.
//!
//! When a page fails to render, the renderer attempts the error page for
//! the failure's status code. That attempt can itself fail, so the cascade
//! bounds the retries: the first failure is attempted under its own code,
//! every later failure is promoted to 500, and once the 500 page has been
//! attempted the cascade is exhausted and the static fallback is served.
//! A cascade therefore makes at most two page attempts.
use std::collections::HashSet;

use crate::error::INTERNAL_ERROR;

/// What to do about the latest failure in a cascade.
#[derive(Debug, PartialEq)]
pub(crate) enum Step {
    /// Attempt the error page registered for this status code.
    Attempt(u16),
    /// Out of error pages; serve the static fallback.
    Exhausted,
}

/// Tracks which error pages this cascade has already attempted.
#[derive(Debug, Default)]
pub(crate) struct Cascade {
    seen: HashSet<u16>,
}

impl Cascade {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Admit a failure with the given status code and decide the next step.
    ///
    /// Only the first failure is retried under its own code. Anything after
    /// that goes straight to 500, so a stream of distinct non-500 failures
    /// cannot cycle through their error pages.
    pub(crate) fn admit(&mut self, code: u16) -> Step {
        let code = if self.seen.is_empty() {
            code
        } else {
            INTERNAL_ERROR
        };

        if self.seen.insert(code) {
            Step::Attempt(code)
        } else {
            Step::Exhausted
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_first_failure_attempted_under_own_code() {
        let mut cascade = Cascade::new();
        assert_eq!(cascade.admit(404), Step::Attempt(404));
    }

    #[test]
    fn test_repeated_code_escalates() {
        let mut cascade = Cascade::new();
        assert_eq!(cascade.admit(404), Step::Attempt(404));
        assert_eq!(cascade.admit(404), Step::Attempt(500));
        assert_eq!(cascade.admit(404), Step::Exhausted);
    }

    #[test]
    fn test_distinct_codes_escalate_too() {
        let mut cascade = Cascade::new();
        assert_eq!(cascade.admit(404), Step::Attempt(404));
        assert_eq!(cascade.admit(403), Step::Attempt(500));
        assert_eq!(cascade.admit(400), Step::Exhausted);
    }

    #[test]
    fn test_double_internal_error_exhausts() {
        let mut cascade = Cascade::new();
        assert_eq!(cascade.admit(500), Step::Attempt(500));
        assert_eq!(cascade.admit(500), Step::Exhausted);
    }

    #[test]
    fn test_bounded_attempts() {
        // No sequence of failures survives a third admission.
        for first in [400, 403, 404, 500] {
            for second in [400, 403, 404, 500] {
                for third in [400, 403, 404, 500] {
                    let mut cascade = Cascade::new();
                    cascade.admit(first);
                    cascade.admit(second);
                    assert_eq!(cascade.admit(third), Step::Exhausted);
                }
            }
        }
    }
}
