//! Built-in English stop-word list.
//!
//! Stop words are dropped from every token set before indexing or probing, so a
//! shared "the" or "and" never counts as evidence that two rows match.

use hashbrown::HashSet;
use once_cell::sync::Lazy;

/// The stop words, all lowercase.
///
/// The list includes a few misspelled entries ("fify", "thickv", "amoungst");
/// they are part of the established list and stay.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
    "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
    "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
    "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
    "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de",
    "describe", "detail", "do", "done", "down", "due", "during", "each", "eg", "eight",
    "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even", "ever", "every",
    "everyone", "everything", "everywhere", "except", "few", "fifteen", "fify", "fill", "find",
    "fire", "first", "five", "for", "former", "formerly", "forty", "found", "four", "from",
    "front", "full", "further", "get", "give", "go", "had", "has", "hasnt", "have", "he",
    "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon", "hers", "herself",
    "him", "himself", "his", "how", "however", "hundred", "ie", "if", "in", "inc", "indeed",
    "interest", "into", "is", "it", "its", "itself", "keep", "last", "latter", "latterly",
    "least", "less", "ltd", "made", "many", "may", "me", "meanwhile", "might", "mill", "mine",
    "more", "moreover", "most", "mostly", "move", "much", "must", "my", "myself", "name",
    "namely", "neither", "never", "nevertheless", "next", "nine", "no", "nobody", "none",
    "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once",
    "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours", "ourselves",
    "out", "over", "own", "part", "per", "perhaps", "please", "put", "rather", "re", "same",
    "see", "seem", "seemed", "seeming", "seems", "serious", "several", "she", "should", "show",
    "side", "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone",
    "something", "sometime", "sometimes", "somewhere", "still", "such", "system", "take",
    "ten", "than", "that", "the", "their", "them", "themselves", "then", "thence", "there",
    "thereafter", "thereby", "therefore", "therein", "thereupon", "these", "they", "thickv",
    "thin", "third", "this", "those", "though", "three", "through", "throughout", "thru",
    "thus", "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two",
    "un", "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were",
    "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
    "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
    "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without",
    "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Returns the process-wide stop-word set.
///
/// The set is built on first use and never changes afterwards.
pub fn stop_words() -> &'static HashSet<&'static str> {
    &STOP_WORD_SET
}

/// Checks whether `word` is a stop word, ignoring case.
///
/// # Examples
///
/// ```
/// use downsample::stop_words::is_stop_word;
/// assert!(is_stop_word("The"));
/// assert!(!is_stop_word("apple"));
/// ```
#[inline]
pub fn is_stop_word(word: &str) -> bool {
    if word.chars().any(char::is_uppercase) {
        STOP_WORD_SET.contains(word.to_lowercase().as_str())
    } else {
        STOP_WORD_SET.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_word_list_has_no_duplicates() {
        assert_eq!(stop_words().len(), STOP_WORDS.len());
        assert_eq!(STOP_WORDS.len(), 317);
    }

    #[test]
    fn test_stop_words_are_lowercase() {
        for word in STOP_WORDS {
            assert_eq!(*word, word.to_lowercase(), "stop word '{}' is not lowercase", word);
        }
    }

    #[test]
    fn test_is_stop_word_case_insensitive() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("THE"));
        assert!(is_stop_word("Whereupon"));
        assert!(is_stop_word("thickv"));
        assert!(!is_stop_word("apple"));
        assert!(!is_stop_word(""));
    }

    #[test]
    fn test_stop_words_returns_same_set() {
        assert!(std::ptr::eq(stop_words(), stop_words()));
    }
}
