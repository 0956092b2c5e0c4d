//! Last-issued-wins bookkeeping for one kind of fetch.
//!
//! Every request takes a fresh generation. When a response comes back it is
//! only applied if its generation is still the newest one issued; anything
//! older is dropped without touching state or reporting an error.

use crate::error::LocatorError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Error(String),
}

impl Phase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Phase::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed,
    Stale,
}

pub(crate) enum Accepted<T> {
    Value(T),
    Failed,
    Stale,
}

#[derive(Debug)]
pub struct Concern {
    name: &'static str,
    generation: u64,
    phase: Phase,
}

impl Concern {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            generation: 0,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.generation
    }

    /// Start a request, superseding whatever is in flight.
    pub fn begin(&mut self) -> Generation {
        if self.phase.is_loading() {
            tracing::debug!(
                concern = self.name,
                superseded = self.generation,
                "Superseding in-flight request"
            );
        }
        self.generation += 1;
        self.phase = Phase::Loading;
        Generation(self.generation)
    }

    /// Invalidate anything in flight and go back to idle.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.phase = Phase::Idle;
    }

    pub(crate) fn accept<T>(
        &mut self,
        generation: Generation,
        result: Result<T, LocatorError>,
    ) -> Accepted<T> {
        if !self.is_current(generation) {
            tracing::debug!(
                concern = self.name,
                generation = generation.0,
                current = self.generation,
                "Dropping stale response"
            );
            return Accepted::Stale;
        }
        match result {
            Ok(value) => {
                self.phase = Phase::Ready;
                Accepted::Value(value)
            }
            Err(e) => {
                tracing::warn!(
                    concern = self.name,
                    network = e.is_network(),
                    error = %e,
                    "Fetch failed"
                );
                self.phase = Phase::Error(e.user_message());
                Accepted::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network_error() -> LocatorError {
        LocatorError::Network {
            url: "http://localhost:8081/api/v1/stores/filtered".to_string(),
            reason: "connection reset".to_string(),
        }
    }

    #[test]
    fn test_begin_moves_to_loading() {
        let mut c = Concern::new("stores");
        assert_eq!(c.phase(), &Phase::Idle);
        let g = c.begin();
        assert!(c.is_current(g));
        assert!(c.phase().is_loading());
    }

    #[test]
    fn test_success_moves_to_ready() {
        let mut c = Concern::new("stores");
        let g = c.begin();
        assert!(matches!(c.accept(g, Ok(3)), Accepted::Value(3)));
        assert_eq!(c.phase(), &Phase::Ready);
    }

    #[test]
    fn test_failure_records_message() {
        let mut c = Concern::new("stores");
        let g = c.begin();
        assert!(matches!(
            c.accept::<()>(g, Err(network_error())),
            Accepted::Failed
        ));
        assert!(c.phase().error().is_some());
    }

    #[test]
    fn test_superseded_response_is_stale() {
        let mut c = Concern::new("stores");
        let a = c.begin();
        let b = c.begin();
        assert!(matches!(c.accept(b, Ok("b")), Accepted::Value("b")));
        assert!(matches!(c.accept(a, Ok("a")), Accepted::Stale));
        assert_eq!(c.phase(), &Phase::Ready);
    }

    #[test]
    fn test_stale_failure_does_not_surface() {
        let mut c = Concern::new("menus");
        let a = c.begin();
        let _b = c.begin();
        assert!(matches!(
            c.accept::<()>(a, Err(network_error())),
            Accepted::Stale
        ));
        assert!(c.phase().is_loading());
    }

    #[test]
    fn test_reset_invalidates_in_flight() {
        let mut c = Concern::new("menus");
        let a = c.begin();
        c.reset();
        assert_eq!(c.phase(), &Phase::Idle);
        assert!(matches!(c.accept(a, Ok(1)), Accepted::Stale));
        assert_eq!(c.phase(), &Phase::Idle);
    }
}
