//! # iapool
//!
//! Interactive Activation pools for perceptual decision dynamics.
//!
//! A pool is a layer of units that excite or inhibit the layers wired into
//! it and inhibit each other within the layer. Each tick every unit moves
//! toward its ceiling under net excitation, toward its floor under net
//! inhibition, and decays toward rest. A [`Network`] advances several pools
//! in lockstep from a snapshot of the previous tick.
//!
//! On top of the engine sits the classic letter/word model: four letter
//! pools driven by 14 line-segment features per position, and a word pool
//! fed by the letters and feeding back to them.

pub mod activation;
pub mod config;
pub mod error;
pub mod experiments;
pub mod features;
pub mod lexicon;
pub mod model;
pub mod network;
pub mod pool;
pub mod recorder;
pub mod stats;

#[cfg(test)]
mod integration_test;

pub use config::{ModelParams, TrialConfig};
pub use error::{IaError, IaResult};
pub use experiments::{Comparison, Series};
pub use features::{PositionInput, N_FEATURES, N_LETTERS, WORD_LENGTH};
pub use lexicon::Lexicon;
pub use model::WordModel;
pub use network::{ExternalId, Network, PoolId, Probe, Settle, Source};
pub use pool::{IAPool, PoolConfig, RestingState};
pub use recorder::{NullRecorder, Sample, Trajectory, TrajectoryRecorder};
pub use stats::PoolStats;
