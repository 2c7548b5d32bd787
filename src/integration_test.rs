//! Integration Test: Word Recognition From Letter Features
//!
//! Builds the full four-position model over a small vocabulary and checks:
//! - the word pool settles on the presented word over close competitors
//! - exact tick-20 activations stay pinned (regression baseline)
//! - top-down word feedback rescues a partially visible letter
//! - every unit stays inside its bounds for the whole trial

#[cfg(test)]
mod tests {
    use ndarray::Array1;

    use crate::config::{ModelParams, TrialConfig};
    use crate::features::{text_to_inputs, PositionInput};
    use crate::lexicon::Lexicon;
    use crate::model::WordModel;
    use crate::recorder::Trajectory;

    const VOCAB: [(&str, f64); 6] = [
        ("work", -0.3),
        ("word", -0.1),
        ("weak", -0.5),
        ("wear", -0.4),
        ("fork", -0.6),
        ("park", -0.8),
    ];

    fn model() -> WordModel {
        WordModel::new(Lexicon::new(VOCAB).unwrap(), ModelParams::default()).unwrap()
    }

    fn assert_close(actual: f64, expected: f64, what: &str) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "{what}: expected {expected:.10}, got {actual:.10}"
        );
    }

    /// Last position shows only the segments R and K share, plus a few
    /// visibly missing ones.
    fn wor_ambiguous() -> [PositionInput; 4] {
        let mut inputs = text_to_inputs("wor");
        inputs[3] = PositionInput::ambiguous(
            Array1::from(vec![0., 1., 0., 0., 1., 0., 0., 1., 0., 0., 0., 0., 0., 1.]),
            Array1::from(vec![0., 0., 1., 1., 0., 0., 0., 0., 1., 1., 0., 0., 1., 0.]),
        );
        inputs
    }

    #[test]
    fn work_beats_competitors() {
        let mut m = model();
        let stim = text_to_inputs("work");
        for _ in 0..20 {
            m.step(&stim).unwrap();
        }

        let work = m.word_activation("work").unwrap();
        for (word, _) in VOCAB.iter().skip(1) {
            let other = m.word_activation(word).unwrap();
            assert!(work > other, "work ({work}) should beat {word} ({other})");
        }
        assert_eq!(m.top_words(1)[0].0, "work");
    }

    #[test]
    fn tick_20_regression_baseline() {
        let mut m = model();
        let stim = text_to_inputs("work");
        for _ in 0..20 {
            m.step(&stim).unwrap();
        }

        let expected = [
            ("work", 0.7103800388),
            ("word", 0.0830929419),
            ("weak", -0.1227981880),
            ("wear", -0.1497121690),
            ("fork", -0.0310386271),
            ("park", -0.1289214746),
        ];
        for (word, value) in expected {
            assert_close(m.word_activation(word).unwrap(), value, word);
        }

        assert_close(m.letter_activation(0, 'w').unwrap(), 0.8086992184, "w@0");
        assert_close(m.letter_activation(1, 'o').unwrap(), 0.8094193207, "o@1");
        assert_close(m.letter_activation(2, 'r').unwrap(), 0.8094193207, "r@2");
        assert_close(m.letter_activation(3, 'k').unwrap(), 0.7885756252, "k@3");
        assert_close(m.letter_activation(3, 'd').unwrap(), -0.1916539568, "d@3");
    }

    #[test]
    fn word_feedback_resolves_ambiguous_letter() {
        let stim = wor_ambiguous();

        let mut with_words = model();
        for _ in 0..20 {
            with_words.step(&stim).unwrap();
        }
        assert_close(with_words.letter_activation(3, 'k').unwrap(), 0.7562575895, "k@3 with words");
        let r = with_words.letter_activation(3, 'r').unwrap();
        assert_close(r, -0.1199132047, "r@3 with words");
        assert_close(with_words.word_activation("work").unwrap(), 0.6812903854, "work");
        assert_close(with_words.word_activation("word").unwrap(), 0.1712086968, "word");

        let mut letters_only = model();
        letters_only.set_word_layer(false).unwrap();
        for _ in 0..20 {
            letters_only.step(&stim).unwrap();
        }
        let k_alone = letters_only.letter_activation(3, 'k').unwrap();
        assert_close(k_alone, 0.3573120841, "k@3 without words");
        assert!(
            with_words.letter_activation(3, 'k').unwrap() > k_alone,
            "top-down support should raise k"
        );
    }

    #[test]
    fn activations_stay_bounded_through_trial() {
        let mut m = model();
        let probes: Vec<_> = VOCAB.iter().filter_map(|(w, _)| m.word_probe(w)).collect();
        let mut trace = Trajectory::new();
        m.run_trial(&text_to_inputs("work"), &TrialConfig::default(), &probes, &mut trace)
            .unwrap();

        assert_eq!(trace.len(), 40 * VOCAB.len());
        assert!(
            trace.samples().iter().all(|s| (-0.2..=1.0).contains(&s.activation)),
            "every sample inside [min, max]"
        );
        for pool in m.network().pools() {
            let in_bounds = pool.state().iter().all(|&a| (-0.2..=1.0).contains(&a));
            assert!(in_bounds, "pool {}", pool.name());
        }

        let work = trace.series("WORK");
        assert_close(work[19], 0.7103800388, "trial tick 19 equals 20 bare steps");
        assert!(work[39] < work[19], "mask lets WORK fall back");
    }

    #[test]
    fn repeated_trials_are_identical() {
        let mut m = model();
        let probe = vec![m.word_probe("work").unwrap()];
        let mut first = Trajectory::new();
        let mut second = Trajectory::new();
        m.run_trial(&text_to_inputs("work"), &TrialConfig::default(), &probe, &mut first).unwrap();
        m.run_trial(&text_to_inputs("work"), &TrialConfig::default(), &probe, &mut second).unwrap();
        assert_eq!(first.series("WORK"), second.series("WORK"));
    }
}
