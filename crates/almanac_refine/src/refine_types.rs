//! Configuration for timestamp refinement.

/// Configuration for bisection and fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefineConfig {
    /// Maximum bisection iterations per event (default 50).
    pub max_iterations: u32,
    /// Convergence threshold for the bracket width in seconds (default 1).
    pub tolerance_secs: u32,
    /// Maximum oracle-bound refinements in flight at once (default 4).
    pub max_concurrency: usize,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tolerance_secs: 1,
            max_concurrency: 4,
        }
    }
}

impl RefineConfig {
    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if self.tolerance_secs == 0 {
            return Err("tolerance_secs must be > 0");
        }
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_valid() {
        let c = RefineConfig::default();
        assert_eq!(c.max_iterations, 50);
        assert_eq!(c.tolerance_secs, 1);
        assert_eq!(c.max_concurrency, 4);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_zero_iterations() {
        let mut c = RefineConfig::default();
        c.max_iterations = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_zero_tolerance() {
        let mut c = RefineConfig::default();
        c.tolerance_secs = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_zero_concurrency() {
        let mut c = RefineConfig::default();
        c.max_concurrency = 0;
        assert!(c.validate().is_err());
    }
}
