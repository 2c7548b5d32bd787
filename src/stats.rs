//! Pool inspection and diagnostics.

use crate::pool::IAPool;

/// Summary statistics for one pool's current state.
#[derive(Clone, Debug)]
pub struct PoolStats {
    pub name: String,
    pub size: usize,
    pub tick_count: u64,
    pub mean_activation: f64,
    pub min_activation: f64,
    pub max_activation: f64,
    /// Index of the most active unit (lowest index on ties).
    pub argmax: usize,
    /// Units above zero, i.e. the ones that excite other pools.
    pub active_units: usize,
    /// Mean absolute distance from the resting state.
    pub mean_displacement: f64,
}

impl PoolStats {
    pub fn active_ratio(&self) -> f64 {
        if self.size > 0 {
            self.active_units as f64 / self.size as f64
        } else {
            0.0
        }
    }
}

impl std::fmt::Display for PoolStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Pool '{}': {} units, tick {}", self.name, self.size, self.tick_count)?;
        writeln!(f, "  Activation: mean={:.4} min={:.4} max={:.4} (unit {})",
            self.mean_activation, self.min_activation, self.max_activation, self.argmax)?;
        writeln!(f, "  Active: {} ({:.1}%), mean |a - rest|: {:.4}",
            self.active_units, self.active_ratio() * 100.0, self.mean_displacement)?;
        Ok(())
    }
}

impl IAPool {
    /// Compute summary statistics of the current state.
    pub fn stats(&self) -> PoolStats {
        let state = self.state();
        let n = self.size();

        let (mut min, mut max, mut argmax) = (f64::INFINITY, f64::NEG_INFINITY, 0usize);
        for (i, &a) in state.iter().enumerate() {
            if a < min {
                min = a;
            }
            if a > max {
                max = a;
                argmax = i;
            }
        }

        let displacement: f64 = state
            .iter()
            .zip(self.resting_state().iter())
            .map(|(a, r)| (a - r).abs())
            .sum();

        PoolStats {
            name: self.name().to_string(),
            size: n,
            tick_count: self.tick_count(),
            mean_activation: state.mean().unwrap_or(0.0),
            min_activation: min,
            max_activation: max,
            argmax,
            active_units: state.iter().filter(|&&a| a > 0.0).count(),
            mean_displacement: displacement / n as f64,
        }
    }
}
