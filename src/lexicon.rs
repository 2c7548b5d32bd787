//! Four-letter vocabulary and the letter/word weight tables derived from it.

use ndarray::{Array1, Array2};

use crate::error::{IaError, IaResult};
use crate::features::{letter_index, N_LETTERS, WORD_LENGTH};

/// One vocabulary word and its log-frequency (0 for the most frequent words,
/// down to about -1 for the rarest).
#[derive(Clone, Debug, PartialEq)]
pub struct LexiconEntry {
    pub word: String,
    pub frequency: f64,
    /// Letter index per position.
    letters: [usize; WORD_LENGTH],
}

/// Ordered word list. Word `i` is unit `i` of the word pool.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
}

impl Lexicon {
    /// Build from `(word, frequency)` pairs.
    ///
    /// Words are lowercased and must be exactly four ASCII letters. Duplicates
    /// are rejected.
    pub fn new<S: AsRef<str>>(entries: impl IntoIterator<Item = (S, f64)>) -> IaResult<Self> {
        let mut lexicon = Self::default();
        for (word, frequency) in entries {
            lexicon.push(word.as_ref(), frequency)?;
        }
        if lexicon.is_empty() {
            return Err(IaError::InvalidConfig("lexicon is empty".to_string()));
        }
        Ok(lexicon)
    }

    /// The stock four-letter vocabulary, every word at frequency 0.
    ///
    /// Frequency-neutral: all words rest at 0, so frequency effects (a
    /// frequent neighbour outrunning a rare one) need a lexicon built with
    /// real frequencies via [`Lexicon::new`].
    pub fn default_words() -> IaResult<Self> {
        Self::new(DEFAULT_WORDS.iter().map(|&w| (w, 0.0)))
    }

    fn push(&mut self, word: &str, frequency: f64) -> IaResult<()> {
        let word = word.to_ascii_lowercase();
        let chars: Vec<char> = word.chars().collect();
        if chars.len() != WORD_LENGTH {
            return Err(IaError::InvalidConfig(format!(
                "word '{word}' must have {WORD_LENGTH} letters"
            )));
        }
        let mut letters = [0usize; WORD_LENGTH];
        for (slot, &c) in letters.iter_mut().zip(&chars) {
            *slot = letter_index(c).ok_or_else(|| {
                IaError::InvalidConfig(format!("word '{word}': '{c}' is not a letter"))
            })?;
        }
        if !frequency.is_finite() {
            return Err(IaError::InvalidConfig(format!("word '{word}': frequency must be finite")));
        }
        if self.index_of(&word).is_some() {
            return Err(IaError::InvalidConfig(format!("duplicate word '{word}'")));
        }
        self.entries.push(LexiconEntry { word, frequency, letters });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    /// Unit index of `word` (case-insensitive).
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.word.eq_ignore_ascii_case(word))
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.word.as_str())
    }

    /// Word-pool resting vector: `frequency * rest_gain` per word.
    pub fn resting_states(&self, rest_gain: f64) -> Array1<f64> {
        self.entries.iter().map(|e| e.frequency * rest_gain).collect()
    }

    /// Letter pool `position` → word pool, `(N_LETTERS, len)`.
    ///
    /// Fails for `position >= WORD_LENGTH`.
    pub fn letter_word_weights(
        &self,
        position: usize,
        exc: f64,
        inh: f64,
    ) -> IaResult<Array2<f64>> {
        if position >= WORD_LENGTH {
            return Err(IaError::InvalidConfig(format!(
                "letter position {position} out of range (words have {WORD_LENGTH} letters)"
            )));
        }
        let mut w = Array2::from_elem((N_LETTERS, self.len()), -inh);
        for (i, e) in self.entries.iter().enumerate() {
            w[[e.letters[position], i]] = exc;
        }
        Ok(w)
    }

    /// Word pool → letter pool `position`, `(len, N_LETTERS)`.
    pub fn word_letter_weights(
        &self,
        position: usize,
        exc: f64,
        inh: f64,
    ) -> IaResult<Array2<f64>> {
        Ok(self.letter_word_weights(position, exc, inh)?.reversed_axes())
    }
}

/// Stock vocabulary for [`Lexicon::default_words`].
#[rustfmt::skip]
const DEFAULT_WORDS: &[&str] = &[
    "have", "gave", "save", "male", "move", "work", "word", "weak", "wear", "able", "back", "ball",
    "bank", "base", "bear", "beat", "been", "bell", "best", "bill", "bird", "blue", "boat", "body",
    "book", "born", "both", "call", "came", "card", "care", "case", "cast", "city", "club", "cold",
    "come", "cool", "cost", "dark", "data", "date", "dead", "deal", "dear", "deep", "door", "down",
    "draw", "drop", "duty", "each", "earl", "earn", "ease", "east", "easy", "edge", "else", "even",
    "ever", "face", "fact", "fail", "fair", "fall", "farm", "fast", "fear", "feel", "feet", "fell",
    "felt", "file", "fill", "film", "find", "fine", "fire", "firm", "fish", "five", "flat", "flow",
    "food", "foot", "form", "four", "free", "from", "full", "fund", "gain", "game", "gate", "girl",
    "give", "glad", "goal", "goes", "gold", "gone", "good", "gray", "grew", "grow", "half", "hall",
    "hand", "hang", "hard", "harm", "hate", "head", "hear", "heat", "held", "hell", "help", "here",
    "hero", "high", "hill", "hire", "hold", "hole", "holy", "home", "hope", "host", "hour", "huge",
    "hung", "hurt", "idea", "inch", "iron", "item", "join", "jump", "just", "keep", "kept", "kill",
    "kind", "king", "knee", "knew", "know", "lack", "lady", "laid", "lake", "land", "lane", "last",
    "late", "lead", "left", "less", "life", "lift", "like", "line", "link", "list", "live", "load",
    "loan", "lock", "long", "look", "lord", "lose", "loss", "lost", "love", "made", "mail", "main",
    "make", "many", "mark", "mass", "mate", "mean", "meat", "meet", "mere", "mile", "milk", "mill",
    "mind", "mine", "miss", "mode", "moon", "more", "most", "much", "must", "name", "near", "neck",
    "need", "news", "next", "nice", "nine", "none", "noon", "nose", "note", "once", "only", "onto",
    "open", "oral", "over", "pace", "pack", "page", "paid", "pain", "pair", "pale", "park", "part",
    "pass", "past", "path", "peak", "pick", "pink", "plan", "play", "plot", "plus", "poll", "pool",
    "poor", "port", "post", "pull", "pure", "push", "race", "rail", "rain", "rank", "rare", "rate",
    "read", "real", "rear", "rely", "rent", "rest", "rice", "rich", "ride", "ring", "rise", "risk",
    "road", "rock", "role", "roll", "roof", "room", "root", "rose", "rule", "runs", "safe", "said",
    "sake", "sale", "salt", "same", "sand", "seat", "seed", "seek", "seem", "seen", "self", "sell",
    "send", "sent", "ship", "shop", "shot", "show", "shut", "side", "sign", "site", "size", "skin",
    "slip", "slow", "snow", "soft", "soil", "sold", "sole", "some", "song", "soon", "sort", "soul",
    "spot", "star", "stay", "step", "stop", "such", "suit", "sure", "take", "tale", "talk", "tall",
    "tank", "tape", "task", "team", "tear", "tell", "tend", "term", "test", "text", "than", "that",
    "them", "then", "they", "thin", "this", "thus", "tide", "tied", "tier", "till", "time", "tiny",
    "told", "tone", "took", "tool", "tops", "torn", "tour", "town", "tree", "trip", "true", "tune",
    "turn", "twin", "type", "unit", "upon", "used", "user", "vary", "vast", "very", "vice", "view",
    "vote", "wage", "wait", "wake", "walk", "wall", "want", "ward", "warm", "warn", "wash", "wave",
    "ways", "week", "well", "went", "were", "west", "what", "when", "whom", "wide", "wife", "wild",
    "will", "wind", "wine", "wing", "wire", "wise", "wish", "with", "wood", "yard", "yeah", "year",
    "your", "zone",
];
