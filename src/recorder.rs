//! Trajectory sink for activation traces.
//!
//! The network writes one sample per probe per tick. Hosts that want tables,
//! plots or files implement [`TrajectoryRecorder`] themselves; the crate only
//! ships an in-memory trace and a no-op sink.

/// Receives `(entity_id, tick, activation)` samples.
pub trait TrajectoryRecorder {
    /// Record one activation sample.
    ///
    /// `entity_id`: probe label (e.g. "WORK", "E in READ")
    /// `tick`: zero-based tick index within the run
    /// `activation`: post-step activation of the probed unit
    fn record(&mut self, entity_id: &str, tick: u64, activation: f64);
}

/// No-op recorder for runs that only care about the final state.
pub struct NullRecorder;

impl TrajectoryRecorder for NullRecorder {
    #[inline]
    fn record(&mut self, _entity_id: &str, _tick: u64, _activation: f64) {}
}

/// One recorded activation.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub entity_id: String,
    pub tick: u64,
    pub activation: f64,
}

/// In-memory trajectory, samples kept in arrival order.
#[derive(Clone, Debug, Default)]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Activation series for one entity, in tick order of arrival.
    pub fn series(&self, entity_id: &str) -> Vec<f64> {
        self.samples
            .iter()
            .filter(|s| s.entity_id == entity_id)
            .map(|s| s.activation)
            .collect()
    }

    /// Most recent activation recorded for `entity_id`.
    pub fn last(&self, entity_id: &str) -> Option<f64> {
        self.samples
            .iter()
            .rev()
            .find(|s| s.entity_id == entity_id)
            .map(|s| s.activation)
    }

    /// Distinct entity ids in first-seen order.
    pub fn entities(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for s in &self.samples {
            if !seen.contains(&s.entity_id.as_str()) {
                seen.push(&s.entity_id);
            }
        }
        seen
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl TrajectoryRecorder for Trajectory {
    fn record(&mut self, entity_id: &str, tick: u64, activation: f64) {
        self.samples.push(Sample {
            entity_id: entity_id.to_string(),
            tick,
            activation,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trajectory_groups_by_entity() {
        let mut t = Trajectory::new();
        t.record("work", 0, 0.1);
        t.record("word", 0, 0.05);
        t.record("work", 1, 0.2);
        assert_eq!(t.len(), 3);
        assert_eq!(t.series("work"), vec![0.1, 0.2]);
        assert_eq!(t.last("word"), Some(0.05));
        assert_eq!(t.last("weak"), None);
        assert_eq!(t.entities(), vec!["work", "word"]);
        t.clear();
        assert!(t.is_empty());
    }

    #[test]
    fn null_recorder_accepts_anything() {
        let mut r = NullRecorder;
        r.record("x", 7, f64::NAN);
    }
}
