//! Word recognition demo: letter features settling into a word.
//!
//! Shows the classic IA effects on a small vocabulary:
//!   - WORK presented in full: the word pool picks WORK over its neighbours
//!   - WOR + ambiguous R/K: word feedback resolves the last letter to K
//!   - Word and pseudoword superiority: E in READ / MAVE beats E alone
//!
//! Parameters default to the published values; pass a JSON file to override
//! any of them (camelCase keys, e.g. `{"decayRate": 0.1}`).
//!
//! Run: cargo run --example word_recognition [params.json]

use iapool::experiments::{gang_effect, pseudoword_superiority, rich_get_richer, word_superiority};
use iapool::features::text_to_inputs;
use iapool::{
    Comparison, IaResult, Lexicon, ModelParams, PositionInput, TrialConfig, Trajectory, WordModel,
};
use ndarray::Array1;

const VOCAB: [(&str, f64); 12] = [
    ("work", -0.3),
    ("word", -0.1),
    ("weak", -0.5),
    ("wear", -0.4),
    ("fork", -0.6),
    ("park", -0.8),
    ("read", -0.2),
    ("have", 0.0),
    ("gave", -0.5),
    ("save", -0.6),
    ("male", -0.7),
    ("move", -0.4),
];

fn main() -> IaResult<()> {
    env_logger::init();

    let params = match std::env::args().nth(1) {
        Some(path) => ModelParams::from_json_file(path)?,
        None => ModelParams::default(),
    };

    println!("=== Interactive Activation: Word Recognition ===\n");
    let mut model = WordModel::new(Lexicon::new(VOCAB)?, params)?;
    println!("Lexicon: {} words, {} pools\n", model.lexicon().len(), model.network().pools().len());

    // --- WORK, fully visible ---
    let probes: Vec<_> =
        ["work", "word", "fork"].iter().filter_map(|w| model.word_probe(w)).collect();
    let mut trace = Trajectory::new();
    model.run_trial(&text_to_inputs("work"), &TrialConfig::default(), &probes, &mut trace)?;

    println!("--- WORK (20 ticks stimulus, 20 ticks mask) ---");
    for probe in &probes {
        let series = trace.series(&probe.label);
        let peak = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        println!("  {:<5} peak {:+.4}  final {:+.4}", probe.label, peak, series[series.len() - 1]);
    }
    println!();

    // --- WOR + ambiguous last letter ---
    let mut stimulus = text_to_inputs("wor");
    stimulus[3] = PositionInput::ambiguous(
        Array1::from(vec![0., 1., 0., 0., 1., 0., 0., 1., 0., 0., 0., 0., 0., 1.]),
        Array1::from(vec![0., 0., 1., 1., 0., 0., 0., 0., 1., 1., 0., 0., 1., 0.]),
    );
    model.reset();
    model.set_word_layer(true)?;
    for _ in 0..20 {
        model.step(&stimulus)?;
    }
    println!("--- WOR? (last letter R/K ambiguous) ---");
    println!("  Tick 20 words:   {}", format_ranked(model.top_words(3)));
    println!("  Tick 20 letters: {}", format_ranked(model.top_letters(3, 3)));

    let settle = model.run_until_settled(&stimulus, 500, 1e-6)?;
    println!(
        "  Settles in {} ticks (converged: {}, last delta {:.2e})",
        settle.ticks, settle.converged, settle.max_delta
    );
    for pool in model.network().pools() {
        print!("{}", pool.stats());
    }
    println!();

    // --- Canned experiments ---
    for comparison in [
        word_superiority(&mut model)?,
        pseudoword_superiority(&mut model)?,
        rich_get_richer(&mut model)?,
        gang_effect(&mut model)?,
    ] {
        print_comparison(&comparison);
    }

    Ok(())
}

fn format_ranked<T: std::fmt::Display>(ranked: Vec<(T, f64)>) -> String {
    ranked
        .iter()
        .map(|(item, a)| format!("{item}={a:+.3}"))
        .collect::<Vec<_>>()
        .join("  ")
}

fn print_comparison(c: &Comparison) {
    println!("--- {} ---", c.title);
    for s in &c.series {
        let at = |t: usize| s.values.get(t).copied().unwrap_or(f64::NAN);
        println!(
            "  {:<12} t=5 {:+.3}  t=19 {:+.3}  t=39 {:+.3}",
            s.label,
            at(5),
            at(19),
            at(39)
        );
    }
    if let Some(leader) = c.leader() {
        println!("  Leader: {leader}");
    }
    println!();
}
