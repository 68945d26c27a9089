//! Profanity screening for submitted quotes.
//!
//! The validator is a pure function of its input: it never touches storage or
//! the network. It is used as a gate in front of every write and, separately,
//! to mask flagged words for display.

use regex::{Regex, RegexBuilder};
use std::fmt;
use std::sync::LazyLock;

use crate::error::AppError;
use serde_json::json;

/// Built-in lexicon of disallowed words.
///
/// Entries are matched as whole words, case-insensitively.
const DEFAULT_LEXICON: &[&str] = &[
    "arse",
    "arsehole",
    "ass",
    "asshole",
    "bastard",
    "bitch",
    "bollocks",
    "bullshit",
    "cock",
    "crap",
    "cunt",
    "damn",
    "dick",
    "dickhead",
    "douche",
    "dumbass",
    "fuck",
    "fucked",
    "fucker",
    "fucking",
    "goddamn",
    "idiot",
    "jackass",
    "moron",
    "motherfucker",
    "piss",
    "pissed",
    "prick",
    "pussy",
    "retard",
    "shit",
    "shitty",
    "slut",
    "twat",
    "wanker",
    "whore",
];

/// Character used to mask flagged words in [`ContentValidator::sanitize`].
const MASK_CHAR: char = '*';

static DEFAULT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile_lexicon(DEFAULT_LEXICON.iter().copied()).expect("built-in lexicon compiles")
});

/// Which field of a submission was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    OffensiveText,
    OffensiveAuthor,
}

impl RejectionReason {
    /// Human readable reason returned to the caller verbatim.
    pub fn message(&self) -> &'static str {
        match self {
            RejectionReason::OffensiveText => "quote text contains disallowed language",
            RejectionReason::OffensiveAuthor => "author name contains disallowed language",
        }
    }

    /// Short field label used for metrics.
    pub fn field(&self) -> &'static str {
        match self {
            RejectionReason::OffensiveText => "text",
            RejectionReason::OffensiveAuthor => "author",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of [`ContentValidator::validate_submission`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(RejectionReason),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// Decides whether free text is acceptable for storage.
///
/// Matching is word-boundary aware, so a disallowed word hidden inside a
/// legitimate one ("class", "Scunthorpe") is not flagged.
#[derive(Debug, Clone)]
pub struct ContentValidator {
    pattern: Regex,
}

impl Default for ContentValidator {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.clone(),
        }
    }
}

impl ContentValidator {
    /// Creates a validator using the built-in lexicon only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator from the built-in lexicon plus `extra_terms`.
    ///
    /// Blank terms are ignored and terms are matched literally.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the combined lexicon cannot be
    /// compiled (for instance, it exceeds the regex size limit).
    pub fn with_extra_terms<I, S>(extra_terms: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra: Vec<String> = extra_terms
            .into_iter()
            .map(|term| term.as_ref().trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();

        if extra.is_empty() {
            return Ok(Self::default());
        }

        let terms = DEFAULT_LEXICON
            .iter()
            .copied()
            .chain(extra.iter().map(String::as_str));

        let pattern = compile_lexicon(terms).map_err(|e| {
            AppError::internal(
                "Blocked terms could not be compiled",
                json!({ "reason": e.to_string() }),
            )
        })?;

        Ok(Self { pattern })
    }

    /// Returns true if `text` contains a disallowed word.
    ///
    /// Empty and whitespace-only input is never offensive.
    pub fn is_offensive(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        self.pattern.is_match(text)
    }

    /// Masks every disallowed word with `*`, one per character.
    ///
    /// The result has the same number of characters as the input. Meant for
    /// display only; a sanitized submission is still rejected on write.
    pub fn sanitize(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &regex::Captures<'_>| {
                MASK_CHAR.to_string().repeat(caps[0].chars().count())
            })
            .into_owned()
    }

    /// Checks quote text, then author, and reports the first problem found.
    pub fn validate_submission(&self, text: &str, author: &str) -> Verdict {
        if self.is_offensive(text) {
            return Verdict::Rejected(RejectionReason::OffensiveText);
        }

        if self.is_offensive(author) {
            return Verdict::Rejected(RejectionReason::OffensiveAuthor);
        }

        Verdict::Accepted
    }
}

/// Builds one case-insensitive alternation with word boundaries on both sides.
///
/// Longer terms are tried first so "fucking" wins over "fuck" when masking.
fn compile_lexicon<'a>(terms: impl Iterator<Item = &'a str>) -> Result<Regex, regex::Error> {
    let mut terms: Vec<&str> = terms.collect();
    terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    terms.dedup();

    let alternation = terms
        .iter()
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");

    RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
        .case_insensitive(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_lexicon_word() {
        let validator = ContentValidator::new();

        assert!(validator.is_offensive("you are an idiot"));
        assert!(validator.is_offensive("well, damn."));
    }

    #[test]
    fn test_case_insensitive() {
        let validator = ContentValidator::new();

        assert!(validator.is_offensive("What an IDIOT"));
        assert!(validator.is_offensive("Idiot!"));
    }

    #[test]
    fn test_word_boundaries() {
        let validator = ContentValidator::new();

        assert!(!validator.is_offensive("The class assembled in Scunthorpe"));
        assert!(!validator.is_offensive("An assistant passed the cocktail"));
        assert!(!validator.is_offensive("Dickens wrote about shiitake"));
    }

    #[test]
    fn test_clean_text_passes() {
        let validator = ContentValidator::new();

        assert!(!validator.is_offensive(
            "The only way to do great work is to love what you do."
        ));
    }

    #[test]
    fn test_empty_input_is_not_offensive() {
        let validator = ContentValidator::new();

        assert!(!validator.is_offensive(""));
        assert!(!validator.is_offensive("   \n\t"));
    }

    #[test]
    fn test_sanitize_preserves_length() {
        let validator = ContentValidator::new();

        let input = "Shit happens, idiot.";
        let cleaned = validator.sanitize(input);

        assert_eq!(cleaned, "**** happens, *****.");
        assert_eq!(cleaned.chars().count(), input.chars().count());
    }

    #[test]
    fn test_sanitize_prefers_longest_term() {
        let validator = ContentValidator::new();

        assert_eq!(validator.sanitize("fucking hell"), "******* hell");
    }

    #[test]
    fn test_sanitize_leaves_clean_text_untouched() {
        let validator = ContentValidator::new();

        let input = "Be yourself; everyone else is already taken.";
        assert_eq!(validator.sanitize(input), input);
    }

    #[test]
    fn test_validate_submission_accepts_clean_input() {
        let validator = ContentValidator::new();

        let verdict = validator.validate_submission("Stay curious.", "Ada Lovelace");

        assert!(verdict.is_accepted());
    }

    #[test]
    fn test_validate_submission_checks_text_before_author() {
        let validator = ContentValidator::new();

        let verdict = validator.validate_submission("you are an idiot", "some jackass");

        assert_eq!(verdict, Verdict::Rejected(RejectionReason::OffensiveText));
    }

    #[test]
    fn test_validate_submission_rejects_author() {
        let validator = ContentValidator::new();

        let verdict = validator.validate_submission("Stay curious.", "Captain Bullshit");

        assert_eq!(verdict, Verdict::Rejected(RejectionReason::OffensiveAuthor));
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            RejectionReason::OffensiveText.to_string(),
            "quote text contains disallowed language"
        );
        assert_eq!(
            RejectionReason::OffensiveAuthor.to_string(),
            "author name contains disallowed language"
        );
    }

    #[test]
    fn test_extra_terms() {
        let validator = ContentValidator::with_extra_terms(["Blorp", "  ", "zorg"]).unwrap();

        assert!(validator.is_offensive("what a blorp"));
        assert!(validator.is_offensive("ZORG was here"));
        assert!(validator.is_offensive("idiot"));
        assert!(!validator.is_offensive("blorpy"));
    }

    #[test]
    fn test_extra_terms_are_literal() {
        let validator = ContentValidator::with_extra_terms(["a.c"]).unwrap();

        assert!(validator.is_offensive("say a.c now"));
        assert!(!validator.is_offensive("say abc now"));
    }
}
