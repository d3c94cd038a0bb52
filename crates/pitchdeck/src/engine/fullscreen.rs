/// Fullscreen flag built from two signals: what we last asked the platform
/// for, and what the platform last reported. A report always wins over an
/// earlier request, so a refused request only lingers until the next report.
#[derive(Debug, Clone)]
pub struct FullscreenState {
    requested: Option<bool>,
    observed: bool,
}

impl FullscreenState {
    pub fn new(observed: bool) -> Self {
        Self {
            requested: None,
            observed,
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.requested.unwrap_or(self.observed)
    }

    #[cfg(test)]
    pub fn observed(&self) -> bool {
        self.observed
    }

    #[cfg(test)]
    pub fn requested(&self) -> Option<bool> {
        self.requested
    }

    /// Optimistically record a request. Returns the requested value.
    pub fn request(&mut self, fullscreen: bool) -> bool {
        self.requested = Some(fullscreen);
        fullscreen
    }

    /// Adopt the platform's authoritative state. Returns true if the
    /// effective value changed.
    pub fn observe(&mut self, fullscreen: bool) -> bool {
        let before = self.is_fullscreen();
        self.observed = fullscreen;
        self.requested = None;
        before != fullscreen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_optimistic() {
        let mut state = FullscreenState::new(false);
        state.request(true);
        assert!(state.is_fullscreen());
        assert!(!state.observed());
    }

    #[test]
    fn test_observation_overrides_refused_request() {
        let mut state = FullscreenState::new(false);
        state.request(true);
        assert!(state.observe(false));
        assert!(!state.is_fullscreen());
        assert_eq!(state.requested(), None);
    }

    #[test]
    fn test_unsolicited_observation() {
        let mut state = FullscreenState::new(true);
        assert!(state.observe(false));
        assert!(!state.is_fullscreen());
        assert!(!state.observe(false));
    }
}
