//! Canned word-recognition trials.
//!
//! Each experiment runs one or more default trials (40 ticks, stimulus for
//! 20, then the mask) and returns the probed activation series side by side.

use crate::config::TrialConfig;
use crate::error::{IaError, IaResult};
use crate::features::{text_to_inputs, PositionInput, WORD_LENGTH};
use crate::model::WordModel;
use crate::network::Probe;
use crate::recorder::Trajectory;

/// One labelled activation trace.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
}

/// Labelled traces from one experiment, all on the same tick axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub title: String,
    pub series: Vec<Series>,
}

impl Comparison {
    pub fn get(&self, label: &str) -> Option<&[f64]> {
        self.series.iter().find(|s| s.label == label).map(|s| s.values.as_slice())
    }

    /// Number of ticks on the shared axis.
    pub fn ticks(&self) -> usize {
        self.series.iter().map(|s| s.values.len()).max().unwrap_or(0)
    }

    /// Label of the series with the highest peak.
    pub fn leader(&self) -> Option<&str> {
        self.series
            .iter()
            .map(|s| (s.label.as_str(), s.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(label, _)| label)
    }
}

/// Run one trial and pull a single probe's series out under `label`.
fn letter_trace(
    model: &mut WordModel,
    stimulus: &[PositionInput; WORD_LENGTH],
    word_layer: bool,
    position: usize,
    letter: char,
    label: &str,
) -> IaResult<Series> {
    let probe = model.letter_probe(position, letter).ok_or_else(|| {
        IaError::InvalidConfig(format!("no letter unit '{letter}' at position {position}"))
    })?;
    let probe = Probe { label: label.to_string(), ..probe };
    let trial = TrialConfig { word_layer, ..TrialConfig::default() };

    let mut trace = Trajectory::new();
    model.run_trial(stimulus, &trial, &[probe], &mut trace)?;
    Ok(Series { label: label.to_string(), values: trace.series(label) })
}

/// `letter` in a word context (word layer on) vs the same letter alone with
/// blanks around it and no word layer.
fn letter_in_context(
    model: &mut WordModel,
    context: &str,
    position: usize,
    letter: char,
) -> IaResult<Comparison> {
    let in_label = format!("{} in {}", letter.to_ascii_uppercase(), context.to_ascii_uppercase());
    let alone_label = format!("{} alone", letter.to_ascii_uppercase());

    let shown = text_to_inputs(context);
    let in_context = letter_trace(model, &shown, true, position, letter, &in_label)?;

    let mut alone: [PositionInput; WORD_LENGTH] = std::array::from_fn(|_| PositionInput::blank());
    alone[position] = PositionInput::letter(letter)
        .ok_or_else(|| IaError::InvalidConfig(format!("'{letter}' is not a letter")))?;
    let isolated = letter_trace(model, &alone, false, position, letter, &alone_label)?;

    Ok(Comparison {
        title: format!("{in_label} vs {alone_label}"),
        series: vec![in_context, isolated],
    })
}

/// Word superiority: E in READ vs E alone.
pub fn word_superiority(model: &mut WordModel) -> IaResult<Comparison> {
    letter_in_context(model, "read", 1, 'e')
}

/// Pseudoword superiority: E in MAVE vs E alone.
pub fn pseudoword_superiority(model: &mut WordModel) -> IaResult<Comparison> {
    letter_in_context(model, "mave", 3, 'e')
}

/// Present `stimulus` once and trace several word units side by side.
pub fn word_race(model: &mut WordModel, stimulus: &str, words: &[&str]) -> IaResult<Comparison> {
    let probes = words
        .iter()
        .map(|w| {
            model
                .word_probe(w)
                .ok_or_else(|| IaError::InvalidConfig(format!("word '{w}' is not in the lexicon")))
        })
        .collect::<IaResult<Vec<Probe>>>()?;

    let mut trace = Trajectory::new();
    model.run_trial(&text_to_inputs(stimulus), &TrialConfig::default(), &probes, &mut trace)?;

    let series = probes
        .iter()
        .map(|p| Series { label: p.label.clone(), values: trace.series(&p.label) })
        .collect();
    Ok(Comparison {
        title: format!(
            "{} vs {}",
            stimulus.to_ascii_uppercase(),
            words.join("/").to_ascii_uppercase()
        ),
        series,
    })
}

/// Rich get richer: with MAVE shown, frequent HAVE outruns rarer GAVE and SAVE.
pub fn rich_get_richer(model: &mut WordModel) -> IaResult<Comparison> {
    word_race(model, "mave", &["have", "gave", "save"])
}

/// Gang effect: MAVE neighbours MALE, MOVE and SAVE compete.
pub fn gang_effect(model: &mut WordModel) -> IaResult<Comparison> {
    word_race(model, "mave", &["male", "move", "save"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelParams;
    use crate::lexicon::Lexicon;

    fn model() -> WordModel {
        let lexicon = Lexicon::new([
            ("read", -0.2),
            ("road", -0.4),
            ("have", 0.0),
            ("gave", -0.5),
            ("save", -0.6),
            ("male", -0.7),
            ("move", -0.4),
        ])
        .unwrap();
        WordModel::new(lexicon, ModelParams::default()).unwrap()
    }

    #[test]
    fn word_context_helps_letter() {
        let mut m = model();
        let c = word_superiority(&mut m).unwrap();
        assert_eq!(c.ticks(), 40);
        let in_word = c.get("E in READ").unwrap();
        let alone = c.get("E alone").unwrap();
        assert!(in_word[19] > alone[19], "E in READ {} vs alone {}", in_word[19], alone[19]);
        assert_eq!(c.leader(), Some("E in READ"));
    }

    #[test]
    fn pseudoword_context_helps_letter() {
        let mut m = model();
        let c = pseudoword_superiority(&mut m).unwrap();
        let in_word = c.get("E in MAVE").unwrap();
        let alone = c.get("E alone").unwrap();
        assert!(in_word[19] > alone[19], "E in MAVE {} vs alone {}", in_word[19], alone[19]);
        assert!(!m.word_layer(), "last trial ran without the word layer");
    }

    #[test]
    fn frequent_word_wins_race() {
        let mut m = model();
        let c = rich_get_richer(&mut m).unwrap();
        assert_eq!(c.series.len(), 3);
        assert_eq!(c.leader(), Some("HAVE"));
    }

    #[test]
    fn closest_neighbour_leads_gang() {
        let mut m = model();
        let c = gang_effect(&mut m).unwrap();
        assert_eq!(c.leader(), Some("SAVE"), "SAVE shares three letters with MAVE");
        assert_eq!(c.title, "MAVE vs MALE/MOVE/SAVE");
    }

    #[test]
    fn superiority_effects_hold_on_stock_vocabulary() {
        let mut m =
            WordModel::new(Lexicon::default_words().unwrap(), ModelParams::default()).unwrap();

        let word = word_superiority(&mut m).unwrap();
        assert_eq!(word.leader(), Some("E in READ"));
        let in_read = word.get("E in READ").unwrap()[19];
        assert!((in_read - 0.8014433340).abs() < 1e-6, "E in READ at tick 19: {in_read}");

        let pseudo = pseudoword_superiority(&mut m).unwrap();
        assert_eq!(pseudo.leader(), Some("E in MAVE"));
        let alone = pseudo.get("E alone").unwrap()[19];
        assert!((alone - 0.4755128056).abs() < 1e-6, "E alone at tick 19: {alone}");
    }

    #[test]
    fn race_rejects_unknown_words() {
        let mut m = model();
        assert!(word_race(&mut m, "mave", &["have", "zzzz"]).is_err());
    }
}
