//! IAPool: one layer of interactive-activation units and its tick.
//!
//! A pool owns its parameters, its immutable input weight matrices and its
//! activation vector. `step()` composes the activation engine over the
//! pre-step state; `reset()` restores the resting vector.

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::activation::{compute_activation, compute_effect, compute_net_input};
use crate::error::{IaError, IaResult};

/// Resting activation: one value for every unit, or one value per unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RestingState {
    Uniform(f64),
    PerUnit(Vec<f64>),
}

impl From<f64> for RestingState {
    fn from(v: f64) -> Self {
        Self::Uniform(v)
    }
}

impl From<Vec<f64>> for RestingState {
    fn from(v: Vec<f64>) -> Self {
        Self::PerUnit(v)
    }
}

impl From<Array1<f64>> for RestingState {
    fn from(v: Array1<f64>) -> Self {
        Self::PerUnit(v.to_vec())
    }
}

/// Pool dynamics parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoolConfig {
    /// Fraction of the distance to rest removed each tick. Default: 0.1
    pub decay_rate: f64,
    /// Equilibrium each unit decays toward. Default: 0.0 for every unit
    pub resting_state: RestingState,
    /// Activation ceiling. Default: 1.0
    pub max_value: f64,
    /// Activation floor. Default: -1.0
    pub min_value: f64,
    /// All-to-all lateral inhibition within the pool. Default: 1.0
    pub inhibition_strength: f64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            decay_rate: 0.1,
            resting_state: RestingState::Uniform(0.0),
            max_value: 1.0,
            min_value: -1.0,
            inhibition_strength: 1.0,
        }
    }
}

impl PoolConfig {
    pub fn with_decay_rate(mut self, decay_rate: f64) -> Self {
        self.decay_rate = decay_rate;
        self
    }

    pub fn with_resting_state(mut self, resting_state: impl Into<RestingState>) -> Self {
        self.resting_state = resting_state.into();
        self
    }

    pub fn with_bounds(mut self, min_value: f64, max_value: f64) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    pub fn with_inhibition(mut self, inhibition_strength: f64) -> Self {
        self.inhibition_strength = inhibition_strength;
        self
    }
}

/// A pool of interactive-activation units.
#[derive(Clone, Debug)]
pub struct IAPool {
    /// Human-readable name (e.g. "letter_0", "words"). Used in logs and trajectories.
    name: String,
    size: usize,
    config: PoolConfig,
    /// Input weight matrices in input order; `weights[i]` is `(source_i, size)`.
    weights: Option<Vec<Array2<f64>>>,
    /// Broadcast resting vector, never aliased by `state`.
    resting: Array1<f64>,
    state: Array1<f64>,
    /// Ticks since construction or the last `reset()`.
    tick_count: u64,
}

impl IAPool {
    /// Create a pool of `size` units resting at the configured state.
    ///
    /// The pool has no weights yet; attach them with [`IAPool::with_weights`]
    /// before the first `step()`.
    pub fn new(name: &str, size: usize, config: PoolConfig) -> IaResult<Self> {
        if size == 0 {
            return Err(IaError::InvalidConfig(format!("pool '{name}': size must be non-zero")));
        }
        if !(config.min_value <= config.max_value) {
            return Err(IaError::InvalidConfig(format!(
                "pool '{name}': min_value ({}) exceeds max_value ({})",
                config.min_value, config.max_value
            )));
        }
        if !config.decay_rate.is_finite() || config.decay_rate < 0.0 {
            return Err(IaError::InvalidConfig(format!(
                "pool '{name}': decay_rate must be finite and >= 0, got {}",
                config.decay_rate
            )));
        }

        let resting = match &config.resting_state {
            RestingState::Uniform(v) => Array1::from_elem(size, *v),
            RestingState::PerUnit(values) => {
                if values.len() != size {
                    return Err(IaError::InvalidConfig(format!(
                        "pool '{name}': resting state has {} values for {size} units",
                        values.len()
                    )));
                }
                Array1::from_vec(values.clone())
            }
        };
        if let Some((unit, rest)) = resting
            .iter()
            .enumerate()
            .find(|(_, &r)| !(config.min_value..=config.max_value).contains(&r))
        {
            return Err(IaError::InvalidConfig(format!(
                "pool '{name}': resting state {rest} of unit {unit} outside [{}, {}]",
                config.min_value, config.max_value
            )));
        }

        Ok(Self {
            name: name.to_string(),
            size,
            config,
            weights: None,
            state: resting.clone(),
            resting,
            tick_count: 0,
        })
    }

    /// Attach the ordered input weight matrices. Each must have `size` columns.
    pub fn with_weights(mut self, weights: Vec<Array2<f64>>) -> IaResult<Self> {
        for (index, w) in weights.iter().enumerate() {
            if w.ncols() != self.size {
                return Err(IaError::WeightShape {
                    pool: self.name.clone(),
                    index,
                    expected: self.size,
                    actual: w.ncols(),
                });
            }
        }
        self.weights = Some(weights);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn weights(&self) -> Option<&[Array2<f64>]> {
        self.weights.as_deref()
    }

    /// Number of input sources this pool expects, 0 if weights are unset.
    pub fn input_count(&self) -> usize {
        self.weights.as_ref().map_or(0, Vec::len)
    }

    pub fn resting_state(&self) -> ArrayView1<'_, f64> {
        self.resting.view()
    }

    pub fn state(&self) -> ArrayView1<'_, f64> {
        self.state.view()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Restore every unit to its resting activation.
    pub fn reset(&mut self) {
        self.state = self.resting.clone();
        self.tick_count = 0;
        log::debug!("[RESET] {}: {} units back to rest", self.name, self.size);
    }

    /// Check `inputs` against the weight matrices without computing anything.
    pub fn validate_inputs(&self, inputs: &[ArrayView1<'_, f64>]) -> IaResult<()> {
        let weights = self.weights.as_ref().ok_or_else(|| IaError::MissingWeights {
            pool: self.name.clone(),
        })?;
        if inputs.len() != weights.len() {
            return Err(IaError::InputCount {
                pool: self.name.clone(),
                expected: weights.len(),
                actual: inputs.len(),
            });
        }
        for (index, (input, w)) in inputs.iter().zip(weights).enumerate() {
            if input.len() != w.nrows() {
                return Err(IaError::InputShape {
                    pool: self.name.clone(),
                    index,
                    expected: w.nrows(),
                    actual: input.len(),
                });
            }
        }
        Ok(())
    }

    /// Advance the pool one tick.
    ///
    /// `inputs[i]` is multiplied by `weights[i]`. On error the state is left
    /// exactly as it was.
    pub fn step(&mut self, inputs: &[ArrayView1<'_, f64>]) -> IaResult<ArrayView1<'_, f64>> {
        self.validate_inputs(inputs)?;
        let weights = self.weights.as_deref().unwrap_or(&[]);
        let cfg = &self.config;

        let current = self.state.view();
        let net_input = compute_net_input(inputs, weights, cfg.inhibition_strength, current)?;
        let effect = compute_effect(net_input.view(), current, cfg.min_value, cfg.max_value)?;
        let next = compute_activation(
            effect.view(),
            current,
            cfg.decay_rate,
            self.resting.view(),
            cfg.min_value,
            cfg.max_value,
        )?;

        self.state = next;
        self.tick_count += 1;
        log::trace!("[STEP] {}: tick {}", self.name, self.tick_count);
        Ok(self.state.view())
    }

    /// The `n` most active units as `(index, activation)`, most active first.
    ///
    /// Ties keep index order.
    pub fn top_n(&self, n: usize) -> Vec<(usize, f64)> {
        let mut ranked: Vec<(usize, f64)> = self.state.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }
}
