//! WordModel: the four-position letter/word IA network.
//!
//! Topology:
//! - externals `present_{p}` and `absent_{p}` (14 segments each) per position
//! - `letter_{p}`: 26 units, inputs `[present_p, absent_p, words]`
//! - `words`: one unit per lexicon entry, inputs `[letter_0 .. letter_3]`
//!
//! Turning the word layer off disables the `words` pool: it stops updating
//! and the letter pools see zero top-down input.

use ndarray::{Array1, ArrayView1};

use crate::config::{ModelParams, TrialConfig};
use crate::error::{IaError, IaResult};
use crate::features::{
    feature_absence_letter_weights, feature_letter_weights, index_letter, letter_index,
    PositionInput, N_FEATURES, N_LETTERS, WORD_LENGTH,
};
use crate::lexicon::Lexicon;
use crate::network::{Network, PoolId, Probe, Settle, Source};
use crate::pool::{IAPool, PoolConfig};
use crate::recorder::TrajectoryRecorder;

#[derive(Clone, Debug)]
pub struct WordModel {
    lexicon: Lexicon,
    params: ModelParams,
    network: Network,
    letter_pools: [PoolId; WORD_LENGTH],
    word_pool: PoolId,
}

impl WordModel {
    pub fn new(lexicon: Lexicon, params: ModelParams) -> IaResult<Self> {
        params.validate()?;
        let mut network = Network::new();

        let mut externals = Vec::with_capacity(2 * WORD_LENGTH);
        for p in 0..WORD_LENGTH {
            let present = network.add_external(&format!("present_{p}"), N_FEATURES)?;
            let absent = network.add_external(&format!("absent_{p}"), N_FEATURES)?;
            externals.push((present, absent));
        }

        let base = PoolConfig::default()
            .with_decay_rate(params.decay_rate)
            .with_bounds(params.min_activation, params.max_activation);

        let (fle, fli) = (params.feature_letter_excitation, params.feature_letter_inhibition);
        let present_w = feature_letter_weights(fle, fli);
        let absent_w = feature_absence_letter_weights(fle, fli);

        let mut letter_pools = Vec::with_capacity(WORD_LENGTH);
        for p in 0..WORD_LENGTH {
            let cfg = base
                .clone()
                .with_resting_state(0.0)
                .with_inhibition(params.letter_letter_inhibition);
            let top_down = lexicon.word_letter_weights(
                p,
                params.word_letter_excitation,
                params.word_letter_inhibition,
            )?;
            let pool = IAPool::new(&format!("letter_{p}"), N_LETTERS, cfg)?
                .with_weights(vec![present_w.clone(), absent_w.clone(), top_down])?;
            letter_pools.push(network.add_pool(pool)?);
        }

        let word_cfg = base
            .with_resting_state(lexicon.resting_states(params.rest_gain))
            .with_inhibition(params.word_word_inhibition);
        let bottom_up = (0..WORD_LENGTH)
            .map(|p| {
                lexicon.letter_word_weights(
                    p,
                    params.letter_word_excitation,
                    params.letter_word_inhibition,
                )
            })
            .collect::<IaResult<Vec<_>>>()?;
        let words = IAPool::new("words", lexicon.len(), word_cfg)?.with_weights(bottom_up)?;
        let word_pool = network.add_pool(words)?;

        for (&pool, &(present, absent)) in letter_pools.iter().zip(&externals) {
            network.connect(
                pool,
                vec![Source::External(present), Source::External(absent), Source::Pool(word_pool)],
            )?;
        }
        network.connect(word_pool, letter_pools.iter().map(|&id| Source::Pool(id)).collect())?;

        let letter_pools: [PoolId; WORD_LENGTH] = letter_pools
            .try_into()
            .map_err(|_| IaError::InvalidConfig("letter pool count".to_string()))?;

        log::debug!(
            "[BUILD] word model: {} words, {} letter pools",
            lexicon.len(),
            WORD_LENGTH
        );

        Ok(Self { lexicon, params, network, letter_pools, word_pool })
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn letter_pool(&self, position: usize) -> Option<&IAPool> {
        self.letter_pools.get(position).and_then(|&id| self.network.pool(id))
    }

    pub fn word_pool(&self) -> &IAPool {
        &self.network.pools()[self.word_pool.index()]
    }

    pub fn word_layer(&self) -> bool {
        self.network.is_enabled(self.word_pool)
    }

    pub fn set_word_layer(&mut self, enabled: bool) -> IaResult<()> {
        self.network.set_enabled(self.word_pool, enabled)
    }

    pub fn reset(&mut self) {
        self.network.reset();
    }

    /// One synchronous tick with `inputs[p]` shown at position `p`.
    pub fn step(&mut self, inputs: &[PositionInput; WORD_LENGTH]) -> IaResult<()> {
        let externals = external_vectors(inputs);
        let views: Vec<ArrayView1<'_, f64>> = externals.iter().map(Array1::view).collect();
        self.network.step(&views)
    }

    /// Hold `inputs` until no unit moves by `tolerance` or `max_ticks` pass.
    pub fn run_until_settled(
        &mut self,
        inputs: &[PositionInput; WORD_LENGTH],
        max_ticks: usize,
        tolerance: f64,
    ) -> IaResult<Settle> {
        self.network.run_until_settled(max_ticks, tolerance, &external_vectors(inputs))
    }

    /// Reset, then run one trial.
    ///
    /// `stimulus` is shown for the first `stimulus_duration` ticks, then the
    /// O/X mask (or blanks when the mask is off) for the rest of `duration`.
    /// The word layer stays as `trial.word_layer` leaves it afterwards.
    pub fn run_trial<R>(
        &mut self,
        stimulus: &[PositionInput; WORD_LENGTH],
        trial: &TrialConfig,
        probes: &[Probe],
        recorder: &mut R,
    ) -> IaResult<()>
    where
        R: TrajectoryRecorder + ?Sized,
    {
        self.reset();
        self.set_word_layer(trial.word_layer)?;

        let shown = external_vectors(stimulus);
        let after = if trial.mask_enabled { PositionInput::mask() } else { PositionInput::blank() };
        let after = external_vectors(&std::array::from_fn(|_| after.clone()));
        let stimulus_ticks = trial.stimulus_duration as u64;

        log::debug!(
            "[TRIAL] {} ticks, stimulus {} ticks, mask={}, word_layer={}",
            trial.duration,
            trial.stimulus_duration,
            trial.mask_enabled,
            trial.word_layer
        );
        self.network.run_with(
            trial.duration,
            |t| if t < stimulus_ticks { shown.clone() } else { after.clone() },
            probes,
            recorder,
        )
    }

    /// Probe on a word unit, labelled with the uppercased word.
    pub fn word_probe(&self, word: &str) -> Option<Probe> {
        let index = self.lexicon.index_of(word)?;
        Some(Probe::new(&word.to_ascii_uppercase(), self.word_pool, index))
    }

    /// Probe on `letter` at `position`, labelled e.g. `E@1`.
    pub fn letter_probe(&self, position: usize, letter: char) -> Option<Probe> {
        let pool = *self.letter_pools.get(position)?;
        let index = letter_index(letter)?;
        let label = format!("{}@{}", letter.to_ascii_uppercase(), position);
        Some(Probe::new(&label, pool, index))
    }

    pub fn word_activation(&self, word: &str) -> Option<f64> {
        let index = self.lexicon.index_of(word)?;
        Some(self.word_pool().state()[index])
    }

    pub fn letter_activation(&self, position: usize, letter: char) -> Option<f64> {
        let pool = self.letter_pool(position)?;
        Some(pool.state()[letter_index(letter)?])
    }

    /// The `n` most active words, most active first.
    pub fn top_words(&self, n: usize) -> Vec<(String, f64)> {
        self.word_pool()
            .top_n(n)
            .into_iter()
            .filter_map(|(i, a)| self.lexicon.word(i).map(|w| (w.to_string(), a)))
            .collect()
    }

    /// The `n` most active letters at `position`, most active first.
    pub fn top_letters(&self, position: usize, n: usize) -> Vec<(char, f64)> {
        self.letter_pool(position)
            .map(|pool| {
                pool.top_n(n)
                    .into_iter()
                    .filter_map(|(i, a)| index_letter(i).map(|c| (c, a)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Flatten positions into external order: present_0, absent_0, present_1, ...
fn external_vectors(inputs: &[PositionInput; WORD_LENGTH]) -> Vec<Array1<f64>> {
    inputs
        .iter()
        .flat_map(|p| [p.present.clone(), p.absent.clone()])
        .collect()
}
