//! Word-model parameters and trial settings.
//!
//! Defaults are the published IA values used throughout the letter/word
//! model. Any subset can be overridden from JSON; missing keys keep their
//! defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IaError, IaResult};

/// Connection strengths and unit dynamics for the word model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelParams {
    /// Feature → letter, feature consistent with letter. Default: 0.005
    pub feature_letter_excitation: f64,
    /// Feature → letter, feature inconsistent with letter. Default: 0.15
    pub feature_letter_inhibition: f64,
    /// Letter → word, letter in that position of the word. Default: 0.07
    pub letter_word_excitation: f64,
    /// Letter → word, letter not in that position. Default: 0.04
    pub letter_word_inhibition: f64,
    /// Word → letter, letter in that position of the word. Default: 0.3
    pub word_letter_excitation: f64,
    /// Word → letter, letter not in that position. Default: 0.0
    pub word_letter_inhibition: f64,
    /// Lateral inhibition within the word pool. Default: 0.21
    pub word_word_inhibition: f64,
    /// Lateral inhibition within each letter pool. Default: 0.0
    pub letter_letter_inhibition: f64,
    /// Activation floor for all pools. Default: -0.2
    pub min_activation: f64,
    /// Activation ceiling for all pools. Default: 1.0
    pub max_activation: f64,
    /// Decay toward rest for all pools. Default: 0.07
    pub decay_rate: f64,
    /// Scales word frequency (0 to -1) into word resting states. Default: 0.05
    pub rest_gain: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            feature_letter_excitation: 0.005,
            feature_letter_inhibition: 0.15,
            letter_word_excitation: 0.07,
            letter_word_inhibition: 0.04,
            word_letter_excitation: 0.3,
            word_letter_inhibition: 0.0,
            word_word_inhibition: 0.21,
            letter_letter_inhibition: 0.0,
            min_activation: -0.2,
            max_activation: 1.0,
            decay_rate: 0.07,
            rest_gain: 0.05,
        }
    }
}

impl ModelParams {
    pub fn from_json_str(json: &str) -> IaResult<Self> {
        let params: Self = serde_json::from_str(json)
            .map_err(|e| IaError::InvalidConfig(format!("model params: {e}")))?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> IaResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| IaError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Reject parameter sets no pool could be built from.
    pub fn validate(&self) -> IaResult<()> {
        let all = [
            ("featureLetterExcitation", self.feature_letter_excitation),
            ("featureLetterInhibition", self.feature_letter_inhibition),
            ("letterWordExcitation", self.letter_word_excitation),
            ("letterWordInhibition", self.letter_word_inhibition),
            ("wordLetterExcitation", self.word_letter_excitation),
            ("wordLetterInhibition", self.word_letter_inhibition),
            ("wordWordInhibition", self.word_word_inhibition),
            ("letterLetterInhibition", self.letter_letter_inhibition),
            ("minActivation", self.min_activation),
            ("maxActivation", self.max_activation),
            ("decayRate", self.decay_rate),
            ("restGain", self.rest_gain),
        ];
        if let Some((name, _)) = all.iter().find(|(_, v)| !v.is_finite()) {
            return Err(IaError::InvalidConfig(format!("{name} must be finite")));
        }
        if self.min_activation > self.max_activation {
            return Err(IaError::InvalidConfig(format!(
                "minActivation ({}) exceeds maxActivation ({})",
                self.min_activation, self.max_activation
            )));
        }
        if self.decay_rate < 0.0 {
            return Err(IaError::InvalidConfig(format!(
                "decayRate must be >= 0, got {}",
                self.decay_rate
            )));
        }
        Ok(())
    }
}

/// How long a trial runs and what the word model sees during it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrialConfig {
    /// Total ticks. Default: 40
    pub duration: usize,
    /// Ticks the stimulus is shown before the post-stimulus display. Default: 20
    pub stimulus_duration: usize,
    /// Show the O/X mask after the stimulus; blanks otherwise. Default: true
    pub mask_enabled: bool,
    /// Run with the word pool connected. Default: true
    pub word_layer: bool,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            duration: 40,
            stimulus_duration: 20,
            mask_enabled: true,
            word_layer: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_published_values() {
        let p = ModelParams::default();
        assert_eq!(p.feature_letter_excitation, 0.005);
        assert_eq!(p.word_word_inhibition, 0.21);
        assert_eq!(p.min_activation, -0.2);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let p = ModelParams::from_json_str(r#"{"decayRate": 0.1, "restGain": 0.2}"#).unwrap();
        assert_eq!(p.decay_rate, 0.1);
        assert_eq!(p.rest_gain, 0.2);
        assert_eq!(p.letter_word_excitation, 0.07);
    }

    #[test]
    fn invalid_params_rejected() {
        assert!(ModelParams::from_json_str(r#"{"minActivation": 2.0}"#).is_err());
        assert!(ModelParams::from_json_str(r#"{"decayRate": -0.5}"#).is_err());
        assert!(ModelParams::from_json_str("not json").is_err());
        assert!(ModelParams::from_json_file("/nonexistent/params.json").is_err());
    }

    #[test]
    fn trial_config_from_json() {
        let t: TrialConfig =
            serde_json::from_str(r#"{"duration": 10, "maskEnabled": false}"#).unwrap();
        assert_eq!(t.duration, 10);
        assert_eq!(t.stimulus_duration, 20);
        assert!(!t.mask_enabled);
        assert!(t.word_layer);
    }
}
