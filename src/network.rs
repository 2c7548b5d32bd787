//! Network: synchronous multi-pool orchestration.
//!
//! Pools are wired to sources (other pools or named external inputs) in the
//! order their weight matrices expect. Every tick takes a value snapshot of
//! all pool states first and only then steps the pools, so a pool never reads
//! a peer that has already advanced to the current tick. Stepping pools in
//! place without the snapshot would turn the model into a Gauss–Seidel
//! variant with different dynamics.

use ndarray::{Array1, ArrayView1};

use crate::error::{IaError, IaResult};
use crate::pool::IAPool;
use crate::recorder::TrajectoryRecorder;

/// Handle to a pool inside a [`Network`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoolId(usize);

impl PoolId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to an external input channel inside a [`Network`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ExternalId(usize);

impl ExternalId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Where one of a pool's inputs comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// Previous-tick state of another pool (or of the pool itself).
    Pool(PoolId),
    /// Caller-supplied vector for the current tick.
    External(ExternalId),
}

/// A single unit whose activation is written to the recorder after every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Probe {
    pub label: String,
    pub pool: PoolId,
    pub unit: usize,
}

impl Probe {
    pub fn new(label: &str, pool: PoolId, unit: usize) -> Self {
        Self { label: label.to_string(), pool, unit }
    }
}

/// Outcome of [`Network::run_until_settled`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settle {
    /// Ticks actually run.
    pub ticks: usize,
    /// Whether the last tick moved every unit by less than the tolerance.
    pub converged: bool,
    /// Largest absolute unit change on the last tick.
    pub max_delta: f64,
}

#[derive(Clone, Debug)]
struct ExternalSpec {
    name: String,
    size: usize,
}

/// A set of interconnected pools advanced in lockstep.
#[derive(Clone, Debug, Default)]
pub struct Network {
    pools: Vec<IAPool>,
    /// `wiring[i]` lists pool i's sources in weight-matrix order.
    wiring: Vec<Option<Vec<Source>>>,
    /// Disabled pools are not stepped and read as all-zero by their consumers.
    enabled: Vec<bool>,
    externals: Vec<ExternalSpec>,
    /// Ticks since construction or the last `reset()`.
    tick_count: u64,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an external input channel of `size` values.
    pub fn add_external(&mut self, name: &str, size: usize) -> IaResult<ExternalId> {
        if size == 0 {
            return Err(IaError::InvalidConfig(format!("external '{name}': size must be non-zero")));
        }
        if self.external_id(name).is_some() {
            return Err(IaError::InvalidConfig(format!("external '{name}' already exists")));
        }
        self.externals.push(ExternalSpec { name: name.to_string(), size });
        Ok(ExternalId(self.externals.len() - 1))
    }

    /// Add a pool. It must be wired with [`Network::connect`] before the first tick.
    pub fn add_pool(&mut self, pool: IAPool) -> IaResult<PoolId> {
        if self.pool_id(pool.name()).is_some() {
            return Err(IaError::InvalidConfig(format!("pool '{}' already exists", pool.name())));
        }
        self.pools.push(pool);
        self.wiring.push(None);
        self.enabled.push(true);
        Ok(PoolId(self.pools.len() - 1))
    }

    /// Wire `target`'s inputs. `sources[i]` feeds the pool's weight matrix `i`.
    pub fn connect(&mut self, target: PoolId, sources: Vec<Source>) -> IaResult<()> {
        let pool = self.pool(target).ok_or_else(|| unknown_pool(target))?;
        let weights = pool.weights().ok_or_else(|| IaError::MissingWeights {
            pool: pool.name().to_string(),
        })?;
        if sources.len() != pool.input_count() {
            return Err(IaError::InputCount {
                pool: pool.name().to_string(),
                expected: pool.input_count(),
                actual: sources.len(),
            });
        }
        for (index, (source, w)) in sources.iter().zip(weights).enumerate() {
            let len = self.source_len(*source)?;
            if len != w.nrows() {
                return Err(IaError::InputShape {
                    pool: pool.name().to_string(),
                    index,
                    expected: w.nrows(),
                    actual: len,
                });
            }
        }

        log::debug!("[WIRE] {}: {} sources", pool.name(), sources.len());
        self.wiring[target.0] = Some(sources);
        Ok(())
    }

    fn source_len(&self, source: Source) -> IaResult<usize> {
        match source {
            Source::Pool(id) => self.pool(id).map(IAPool::size).ok_or_else(|| unknown_pool(id)),
            Source::External(id) => self
                .externals
                .get(id.0)
                .map(|e| e.size)
                .ok_or_else(|| IaError::InvalidConfig(format!("unknown external #{}", id.0))),
        }
    }

    /// Enable or disable a pool. A disabled pool keeps its state, is skipped
    /// by `step()` and is seen as all zeros by the pools it feeds.
    pub fn set_enabled(&mut self, id: PoolId, enabled: bool) -> IaResult<()> {
        let flag = self.enabled.get_mut(id.0).ok_or_else(|| unknown_pool(id))?;
        *flag = enabled;
        Ok(())
    }

    pub fn is_enabled(&self, id: PoolId) -> bool {
        self.enabled.get(id.0).copied().unwrap_or(false)
    }

    pub fn pool(&self, id: PoolId) -> Option<&IAPool> {
        self.pools.get(id.0)
    }

    pub fn pools(&self) -> &[IAPool] {
        &self.pools
    }

    pub fn pool_id(&self, name: &str) -> Option<PoolId> {
        self.pools.iter().position(|p| p.name() == name).map(PoolId)
    }

    pub fn external_id(&self, name: &str) -> Option<ExternalId> {
        self.externals.iter().position(|e| e.name == name).map(ExternalId)
    }

    pub fn external_count(&self) -> usize {
        self.externals.len()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Return every pool to rest.
    pub fn reset(&mut self) {
        for pool in &mut self.pools {
            pool.reset();
        }
        self.tick_count = 0;
    }

    /// Value copies of every pool's state; disabled pools read as zeros.
    pub fn snapshot(&self) -> Vec<Array1<f64>> {
        self.pools
            .iter()
            .zip(&self.enabled)
            .map(|(pool, &on)| {
                if on {
                    pool.state().to_owned()
                } else {
                    Array1::zeros(pool.size())
                }
            })
            .collect()
    }

    fn validate(&self, externals: &[ArrayView1<'_, f64>]) -> IaResult<()> {
        for (pool, wiring) in self.pools.iter().zip(&self.wiring) {
            if wiring.is_none() {
                return Err(IaError::InvalidConfig(format!("pool '{}' is not wired", pool.name())));
            }
        }
        if externals.len() != self.externals.len() {
            return Err(IaError::InvalidConfig(format!(
                "expected {} external inputs, got {}",
                self.externals.len(),
                externals.len()
            )));
        }
        for (ext, input) in self.externals.iter().zip(externals) {
            if input.len() != ext.size {
                return Err(IaError::InvalidConfig(format!(
                    "external '{}' has length {}, expected {}",
                    ext.name,
                    input.len(),
                    ext.size
                )));
            }
        }
        Ok(())
    }

    fn validate_probes(&self, probes: &[Probe]) -> IaResult<()> {
        for probe in probes {
            let pool = self.pool(probe.pool).ok_or_else(|| unknown_pool(probe.pool))?;
            if probe.unit >= pool.size() {
                return Err(IaError::InvalidConfig(format!(
                    "probe '{}': unit {} out of range for pool '{}' ({} units)",
                    probe.label,
                    probe.unit,
                    pool.name(),
                    pool.size()
                )));
            }
        }
        Ok(())
    }

    /// Advance every enabled pool one synchronous tick.
    ///
    /// `externals[k]` is the current value of external channel `k`, in
    /// declaration order. All wiring and shapes are checked before any pool
    /// is touched.
    pub fn step(&mut self, externals: &[ArrayView1<'_, f64>]) -> IaResult<()> {
        self.validate(externals)?;

        // 1. Snapshot before any pool moves.
        let snapshot = self.snapshot();

        // 2. Step every enabled pool from the snapshot only.
        for (i, pool) in self.pools.iter_mut().enumerate() {
            if !self.enabled[i] {
                continue;
            }
            let Some(sources) = &self.wiring[i] else { continue };
            let inputs: Vec<ArrayView1<'_, f64>> = sources
                .iter()
                .map(|source| match *source {
                    Source::Pool(id) => snapshot[id.0].view(),
                    Source::External(id) => externals[id.0].view(),
                })
                .collect();
            pool.step(&inputs)?;
        }

        self.tick_count += 1;
        Ok(())
    }

    fn record_probes<R>(&self, probes: &[Probe], tick: u64, recorder: &mut R)
    where
        R: TrajectoryRecorder + ?Sized,
    {
        for probe in probes {
            let activation = self.pools[probe.pool.0].state()[probe.unit];
            recorder.record(&probe.label, tick, activation);
        }
    }

    /// Run `ticks` ticks with external inputs chosen per tick by `schedule`.
    ///
    /// After each tick the probed units are written to `recorder`, tagged with
    /// the run-relative tick index.
    pub fn run_with<F, R>(
        &mut self,
        ticks: usize,
        mut schedule: F,
        probes: &[Probe],
        recorder: &mut R,
    ) -> IaResult<()>
    where
        F: FnMut(u64) -> Vec<Array1<f64>>,
        R: TrajectoryRecorder + ?Sized,
    {
        self.validate_probes(probes)?;
        for t in 0..ticks as u64 {
            let inputs = schedule(t);
            let views: Vec<ArrayView1<'_, f64>> = inputs.iter().map(Array1::view).collect();
            self.step(&views)?;
            self.record_probes(probes, t, recorder);
        }
        log::debug!(
            "[RUN] {} ticks over {} pools ({} probes)",
            ticks,
            self.pools.len(),
            probes.len()
        );
        Ok(())
    }

    /// Run `ticks` ticks with the same external inputs every tick.
    pub fn run<R>(
        &mut self,
        ticks: usize,
        externals: &[Array1<f64>],
        probes: &[Probe],
        recorder: &mut R,
    ) -> IaResult<()>
    where
        R: TrajectoryRecorder + ?Sized,
    {
        self.run_with(ticks, |_| externals.to_vec(), probes, recorder)
    }

    /// Tick until no unit moves by `tolerance` or more, or `max_ticks` is reached.
    pub fn run_until_settled(
        &mut self,
        max_ticks: usize,
        tolerance: f64,
        externals: &[Array1<f64>],
    ) -> IaResult<Settle> {
        let views: Vec<ArrayView1<'_, f64>> = externals.iter().map(Array1::view).collect();
        let mut settle = Settle { ticks: 0, converged: false, max_delta: f64::INFINITY };

        while settle.ticks < max_ticks {
            let before: Vec<Array1<f64>> =
                self.pools.iter().map(|p| p.state().to_owned()).collect();
            self.step(&views)?;
            settle.ticks += 1;
            settle.max_delta = self
                .pools
                .iter()
                .zip(&before)
                .map(|(pool, prev)| max_abs_diff(pool.state(), prev.view()))
                .fold(0.0, f64::max);
            if settle.max_delta < tolerance {
                settle.converged = true;
                break;
            }
        }

        log::debug!(
            "[SETTLE] {} ticks, converged={}, max_delta={:.3e}",
            settle.ticks,
            settle.converged,
            settle.max_delta
        );
        Ok(settle)
    }
}

fn max_abs_diff(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).fold(0.0, f64::max)
}

fn unknown_pool(id: PoolId) -> IaError {
    IaError::InvalidConfig(format!("unknown pool #{}", id.0))
}
