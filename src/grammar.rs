//! Finnish verb morphology: syllable division, KPT consonant gradation,
//! verb-type classification and present-tense conjugation.
//!
//! Everything here is pure string work over the Finnish alphabet; no markup
//! is involved. Verb rules follow the six-class taxonomy from
//! http://people.uta.fi/~km56049/finnish/verbs.html and the syllable rules
//! from http://people.uta.fi/~km56049/finnish/syldiv.html

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConjugationError;

const VOWELS: &str = "aeiouyäö";
const BACK_VOWELS: &str = "aou";

fn is_vowel(c: char) -> bool {
    VOWELS.contains(c)
}

lazy_static! {
    // Two-vowel nuclei that do NOT open a new syllable.
    static ref DIPHTHONG: Regex = Regex::new(r"^(?:[aeiouyäö]i|[aeiu]u|[eiäö]y|ie|uo|yö)").unwrap();
    static ref LONG_VOWEL: Regex = Regex::new(r"^(?:aa|ee|ii|oo|uu|yy|ää|öö)").unwrap();

    // Verb-type suffix patterns, anchored at the end of the infinitive.
    // Priority order is a hard contract: some endings are subsets of others
    // ("...ita" must hit type 5 before the looser shapes get a chance).
    static ref VERB_TYPE_PATTERNS: Vec<(Regex, VerbType)> = vec![
        (Regex::new(r"[aeiouyäö][aä]$").unwrap(), VerbType::Type1),
        (Regex::new(r"d[aä]$").unwrap(), VerbType::Type2),
        (Regex::new(r"(?:[lnr]|st)[aä]$").unwrap(), VerbType::Type3),
        (Regex::new(r"[aouyäö]t[aä]$").unwrap(), VerbType::Type4),
        (Regex::new(r"it[aä]$").unwrap(), VerbType::Type5),
        (Regex::new(r"et[aä]$").unwrap(), VerbType::Type6),
    ];
}

// ─────────────────────────────────────────────────────────────────────────────
// Syllable division
// ─────────────────────────────────────────────────────────────────────────────

/// Split a word into syllables.
///
/// Scans left to right keeping a rolling V/C shape signature for the current
/// syllable attempt. `VCV`/`VCCV`/`VCCCV` split one letter before the final
/// vowel; `VV` splits between the vowels unless the pair is a diphthong or a
/// long vowel, which counts as a single nucleus. The concatenation of the
/// returned pieces always reproduces the input exactly; a word with no
/// boundary comes back as a single syllable.
pub fn divide_syllables(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut shape = String::new();
    let mut nucleus = String::new();
    let mut split_at = None;

    for (i, &c) in chars.iter().enumerate() {
        if shape.is_empty() {
            // Leading consonants stay attached to the first vowel.
            if is_vowel(c) {
                shape.push('V');
                nucleus.push(c);
            }
        } else {
            nucleus.push(c);
            shape.push(if is_vowel(c) { 'V' } else { 'C' });
        }
        if shape == "VCV" || shape == "VCCV" || shape == "VCCCV" {
            split_at = Some(i - 1);
            break;
        } else if shape == "VV" {
            if DIPHTHONG.is_match(&nucleus) || LONG_VOWEL.is_match(&nucleus) {
                // Single nucleus; keep scanning from its last letter.
                shape = "V".to_string();
                nucleus = c.to_string();
            } else {
                split_at = Some(i);
                break;
            }
        }
    }

    match split_at {
        Some(idx) => {
            let head: String = chars[..idx].iter().collect();
            let rest: String = chars[idx..].iter().collect();
            let mut syllables = vec![head];
            syllables.extend(divide_syllables(&rest));
            syllables
        }
        None => vec![word.to_string()],
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Consonant gradation (KPT)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradationDirection {
    ToStrong,
    ToWeak,
}

/// Strong-grade cluster → weak-grade counterpart. The weak→strong table is
/// derived by inverting this one; `k → ""` is excluded from the inverse
/// since a vanished letter cannot be pattern-matched back into existence.
const STRONG_TO_WEAK: &[(&str, &str)] = &[
    ("lke", "lje"),
    ("lki", "lje"),
    ("rke", "rje"),
    ("rki", "rje"),
    ("hke", "hje"),
    ("uku", "uvu"),
    ("yky", "yvy"),
    ("lk", "l"),
    ("kk", "k"),
    ("tt", "t"),
    ("pp", "p"),
    ("nk", "ng"),
    ("lp", "lv"),
    ("rp", "rv"),
    ("mp", "mm"),
    ("ht", "hd"),
    ("lt", "ll"),
    ("rt", "rr"),
    ("nt", "nn"),
    ("rk", "r"),
    ("k", ""),
    ("p", "v"),
    ("t", "d"),
];

/// Cluster search tiers, most specific first. Within a tier the leftmost
/// match wins; across tiers the earlier tier wins regardless of position.
const STRONG_TIERS: &[&[&str]] = &[
    &["lke", "lki", "rke", "rki", "hke", "uku", "yky"],
    &["lk", "kk", "tt", "pp", "nk", "lp", "rp", "mp", "ht", "lt", "rt", "nt", "rk"],
    &["k", "p", "t"],
];

const WEAK_TIERS: &[&[&str]] = &[
    &["lje", "rje", "hje", "uvu", "yvy"],
    &["ng", "lv", "rv", "mm", "hd", "ll", "rr", "nn"],
    &["k", "p", "t", "v", "d", "r", "l"],
];

/// Stems whose correct counterpart cannot be derived by pattern matching:
/// once a `k` has vanished in the weak grade there is nothing left to match
/// back. Keyed by exact naive stem and direction.
const GRADATION_EXCEPTIONS: &[(&str, GradationDirection, &str)] = &[
    ("lue", GradationDirection::ToStrong, "luke"),
    ("hae", GradationDirection::ToStrong, "hake"),
    ("pae", GradationDirection::ToStrong, "pake"),
];

/// Weak clusters with two strong-grade pre-images. Resolution needs lexical
/// knowledge the engine does not have, so both candidates are surfaced.
enum StrongForm {
    Unique(&'static str),
    Ambiguous(&'static str, &'static str),
}

static WEAK_TO_STRONG: Lazy<HashMap<&'static str, StrongForm>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, StrongForm> = HashMap::new();
    for &(strong, weak) in STRONG_TO_WEAK {
        if weak.is_empty() {
            continue;
        }
        match map.remove(weak) {
            None => {
                map.insert(weak, StrongForm::Unique(strong));
            }
            Some(StrongForm::Unique(first)) => {
                map.insert(weak, StrongForm::Ambiguous(first, strong));
            }
            Some(ambiguous) => {
                map.insert(weak, ambiguous);
            }
        }
    }
    map
});

fn weak_form_of(strong: &str) -> Option<&'static str> {
    STRONG_TO_WEAK
        .iter()
        .find(|(s, _)| *s == strong)
        .map(|(_, w)| *w)
}

/// Single-letter matches are blocked after these letters: sk, hk, tk and st
/// clusters do not gradate.
fn blocked_by_predecessor(cluster: &str, prev: Option<char>) -> bool {
    match (cluster, prev) {
        ("k", Some(p)) => "hst".contains(p),
        ("t", Some(p)) => p == 's',
        _ => false,
    }
}

fn find_cluster(
    chars: &[char],
    tiers: &'static [&'static [&'static str]],
    boundary: usize,
) -> Option<(usize, &'static str)> {
    for tier in tiers {
        for pos in 0..chars.len() {
            for &cluster in *tier {
                let len = cluster.chars().count();
                if pos + len > chars.len() {
                    continue;
                }
                if !cluster.chars().zip(&chars[pos..pos + len]).all(|(a, &b)| a == b) {
                    continue;
                }
                // The cluster has to sit at or next to the boundary between
                // the last two syllables, and only vowels may follow it.
                if pos + 1 < boundary {
                    continue;
                }
                if !chars[pos + len..].iter().all(|&c| is_vowel(c)) {
                    continue;
                }
                let prev = if pos > 0 { Some(chars[pos - 1]) } else { None };
                if blocked_by_predecessor(cluster, prev) {
                    continue;
                }
                return Some((pos, cluster));
            }
        }
    }
    None
}

/// Apply consonant gradation to a naive stem.
///
/// Total: when no pattern applies the stem comes back unchanged. A weak
/// cluster with two possible strong grades yields a bracketed placeholder
/// (`su[lke/lki]`) instead of a guess — ambiguity is data, not an error.
pub fn change_grade(naive_stem: &str, direction: GradationDirection) -> String {
    for &(stem, dir, corrected) in GRADATION_EXCEPTIONS {
        if stem == naive_stem && dir == direction {
            debug!(stem = naive_stem, corrected, "gradation exception hit");
            return corrected.to_string();
        }
    }

    let syllables = divide_syllables(naive_stem);
    if syllables.len() < 2 {
        return naive_stem.to_string();
    }
    let boundary: usize = syllables[..syllables.len() - 1]
        .iter()
        .map(|s| s.chars().count())
        .sum();

    let chars: Vec<char> = naive_stem.chars().collect();
    let tiers = match direction {
        GradationDirection::ToWeak => STRONG_TIERS,
        GradationDirection::ToStrong => WEAK_TIERS,
    };
    let Some((pos, cluster)) = find_cluster(&chars, tiers, boundary) else {
        debug!(stem = naive_stem, "no gradation pattern applies");
        return naive_stem.to_string();
    };

    let replacement = match direction {
        GradationDirection::ToWeak => match weak_form_of(cluster) {
            Some(weak) => weak.to_string(),
            None => return naive_stem.to_string(),
        },
        GradationDirection::ToStrong => match WEAK_TO_STRONG.get(cluster) {
            Some(StrongForm::Unique(strong)) => strong.to_string(),
            Some(StrongForm::Ambiguous(a, b)) => format!("[{a}/{b}]"),
            None => return naive_stem.to_string(),
        },
    };

    let head: String = chars[..pos].iter().collect();
    let tail: String = chars[pos + cluster.chars().count()..].iter().collect();
    let graded = format!("{head}{replacement}{tail}");
    debug!(stem = naive_stem, cluster, graded = %graded, "gradation applied");
    graded
}

// ─────────────────────────────────────────────────────────────────────────────
// Verb-type classification
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbType {
    Type1,
    Type2,
    Type3,
    Type4,
    Type5,
    Type6,
    Unclassified,
}

impl fmt::Display for VerbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerbType::Type1 => write!(f, "1"),
            VerbType::Type2 => write!(f, "2"),
            VerbType::Type3 => write!(f, "3"),
            VerbType::Type4 => write!(f, "4"),
            VerbType::Type5 => write!(f, "5"),
            VerbType::Type6 => write!(f, "6"),
            VerbType::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// Classify an infinitive into one of the six inflection classes.
///
/// Pure and total: the first matching pattern in priority order wins, and a
/// verb no pattern recognizes is `Unclassified` rather than an error.
/// Irregular verbs that belong to the "wrong" class are not corrected here;
/// the conjugator's override table handles them.
pub fn classify_verb(verb: &str) -> VerbType {
    for (pattern, verb_type) in VERB_TYPE_PATTERNS.iter() {
        if pattern.is_match(verb) {
            return *verb_type;
        }
    }
    VerbType::Unclassified
}

// ─────────────────────────────────────────────────────────────────────────────
// Present-tense conjugation
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tense {
    Present,
    Past,
}

/// The six person forms of a conjugated verb. All fields are always filled
/// once conjugation succeeds; there are no partial results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conjugation {
    #[serde(rename = "minä")]
    pub mina: String,
    #[serde(rename = "sinä")]
    pub sina: String,
    #[serde(rename = "hän")]
    pub han: String,
    pub me: String,
    pub te: String,
    pub he: String,
}

impl Conjugation {
    /// Person label / surface form pairs, in the conventional order.
    pub fn persons(&self) -> [(&'static str, &str); 6] {
        [
            ("minä", self.mina.as_str()),
            ("sinä", self.sina.as_str()),
            ("hän", self.han.as_str()),
            ("me", self.me.as_str()),
            ("te", self.te.as_str()),
            ("he", self.he.as_str()),
        ]
    }
}

impl fmt::Display for Conjugation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Minä {}\nSinä {}\nHän {}\nMe {}\nTe {}\nHe {}",
            self.mina, self.sina, self.han, self.me, self.te, self.he
        )
    }
}

/// Verbs conjugated from stored forms instead of rules, keyed by infinitive.
static IRREGULAR_VERBS: Lazy<HashMap<String, Conjugation>> = Lazy::new(|| {
    serde_yaml::from_str(include_str!("../schema/irregular_verbs.yaml"))
        .expect("embedded irregular-verb schema must parse")
});

fn has_back_vowel(word: &str) -> bool {
    word.chars().any(|c| BACK_VOWELS.contains(c))
}

/// Drop the last `n` characters (character-aware, not byte-aware).
fn chop(word: &str, n: usize) -> String {
    let chars: Vec<char> = word.chars().collect();
    let cut = chars.len().saturating_sub(n);
    chars[..cut].iter().collect()
}

/// Remove the infinitive `t` sitting before the final vowel: haluta → halua.
fn drop_infinitive_t(verb: &str) -> String {
    let chars: Vec<char> = verb.chars().collect();
    let n = chars.len();
    if n >= 2 && chars[n - 2] == 't' {
        chars[..n - 2].iter().chain(chars[n - 1..].iter()).collect()
    } else {
        verb.to_string()
    }
}

fn person_forms(stem: &str, han_end: &str, he_stem: &str, he_end: &str) -> Conjugation {
    Conjugation {
        mina: format!("{stem}n"),
        sina: format!("{stem}t"),
        han: format!("{stem}{han_end}"),
        me: format!("{stem}mme"),
        te: format!("{stem}tte"),
        he: format!("{he_stem}{he_end}"),
    }
}

/// Conjugate a verb in the given tense. Only the present tense is
/// implemented; anything else fails with `UnsupportedTense`.
pub fn conjugate(verb: &str, tense: Tense) -> Result<Conjugation, ConjugationError> {
    if tense != Tense::Present {
        return Err(ConjugationError::UnsupportedTense(tense));
    }
    if let Some(forms) = IRREGULAR_VERBS.get(verb) {
        debug!(verb, "irregular-verb override hit");
        return Ok(forms.clone());
    }

    let verb_type = classify_verb(verb);
    debug!(verb, %verb_type, "classified");
    let he_end = if has_back_vowel(verb) { "vat" } else { "vät" };

    let forms = match verb_type {
        VerbType::Unclassified => {
            return Err(ConjugationError::UnclassifiedVerb(verb.to_string()));
        }
        VerbType::Type1 => {
            // Weak stem carries minä/sinä/me/te; the strong stem (which the
            // naive trim already is) carries hän and he. Hän doubles the
            // final stem vowel.
            let strong = chop(verb, 1);
            let weak = change_grade(&strong, GradationDirection::ToWeak);
            let mut forms = person_forms(&weak, "", &strong, he_end);
            if let Some(last) = strong.chars().last() {
                forms.han = format!("{strong}{last}");
            }
            forms
        }
        VerbType::Type2 => {
            let stem = chop(verb, 2);
            person_forms(&stem, "", &stem, he_end)
        }
        VerbType::Type3 => {
            // The final l is trimmed along with the suffix and re-appended
            // afterwards: keeping it would hide the cluster from gradation.
            let mut stem = change_grade(&chop(verb, 3), GradationDirection::ToStrong);
            stem.push('l');
            let base = format!("{stem}e");
            person_forms(&base, "e", &base, he_end)
        }
        VerbType::Type4 => {
            let stem = change_grade(&drop_infinitive_t(verb), GradationDirection::ToStrong);
            let mut rev = stem.chars().rev();
            let last = rev.next();
            let second_to_last = rev.next();
            let han_end = match (last, second_to_last) {
                // Already a long vowel; nothing to double.
                (Some(l), Some(s)) if l == s => String::new(),
                (Some(l), _) => l.to_string(),
                _ => String::new(),
            };
            person_forms(&stem, &han_end, &stem, he_end)
        }
        VerbType::Type5 => {
            let stem = format!("{}se", chop(verb, 1));
            person_forms(&stem, "e", &stem, he_end)
        }
        VerbType::Type6 => {
            let mut stem = change_grade(&chop(verb, 2), GradationDirection::ToStrong);
            stem.push_str("ne");
            person_forms(&stem, "e", &stem, he_end)
        }
    };
    Ok(forms)
}

/// Convenience wrapper for the only implemented tense.
pub fn conjugate_present(verb: &str) -> Result<Conjugation, ConjugationError> {
    conjugate(verb, Tense::Present)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod syllable_tests {
    use super::*;

    #[test]
    fn basic_cv_alternation() {
        assert_eq!(divide_syllables("talo"), vec!["ta", "lo"]);
        assert_eq!(divide_syllables("hevonen"), vec!["he", "vo", "nen"]);
        assert_eq!(divide_syllables("ystävä"), vec!["ys", "tä", "vä"]);
    }

    #[test]
    fn consonant_clusters_split_before_last_consonant() {
        assert_eq!(divide_syllables("kirjoittaa"), vec!["kir", "joit", "taa"]);
        assert_eq!(divide_syllables("aurinko"), vec!["au", "rin", "ko"]);
    }

    #[test]
    fn diphthongs_and_long_vowels_stay_together() {
        assert_eq!(divide_syllables("maa"), vec!["maa"]);
        assert_eq!(divide_syllables("tietää"), vec!["tie", "tää"]);
        assert_eq!(divide_syllables("puhua"), vec!["pu", "hu", "a"]);
    }

    #[test]
    fn vowel_pair_that_is_no_diphthong_splits() {
        assert_eq!(divide_syllables("kauan"), vec!["kau", "an"]);
        assert_eq!(divide_syllables("halua"), vec!["ha", "lu", "a"]);
    }

    #[test]
    fn single_syllable_words_come_back_whole() {
        assert_eq!(divide_syllables("tu"), vec!["tu"]);
        assert_eq!(divide_syllables("prr"), vec!["prr"]);
    }

    #[test]
    fn concatenation_reproduces_the_word() {
        for word in [
            "puhua",
            "kirjoittaa",
            "aurinko",
            "kauan",
            "opiskella",
            "ymmärtää",
            "näätä",
            "maa",
            "",
        ] {
            assert_eq!(divide_syllables(word).concat(), word);
        }
    }
}
