use log::debug;
use std::collections::HashSet;

use crate::config::{FrequencyTable, WordCountOptions, DEFAULT_TOP_N};

// The English stopword list shipped with the usual word-cloud tools.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "com", "could", "couldn't", "did", "didn't",
    "do", "does", "doesn't", "doing", "don't", "down", "during", "each", "else", "ever", "few",
    "for", "from", "further", "get", "had", "hadn't", "has", "hasn't", "have", "haven't",
    "having", "he", "he'd", "he'll", "he's", "hence", "her", "here", "here's", "hers", "herself",
    "him", "himself", "his", "how", "how's", "however", "http", "i", "i'd", "i'll", "i'm", "i've",
    "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "just", "k", "let's",
    "like", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off",
    "on", "once", "only", "or", "other", "otherwise", "ought", "our", "ours", "ourselves", "out",
    "over", "own", "r", "same", "shall", "shan't", "she", "she'd", "she'll", "she's", "should",
    "shouldn't", "since", "so", "some", "such", "than", "that", "that's", "the", "their",
    "theirs", "them", "themselves", "then", "there", "there's", "therefore", "these", "they",
    "they'd", "they'll", "they're", "they've", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "wasn't", "we", "we'd", "we'll", "we're", "we've", "were",
    "weren't", "what", "what's", "when", "when's", "where", "where's", "which", "while", "who",
    "who's", "whom", "why", "why's", "with", "won't", "would", "wouldn't", "www", "you", "you'd",
    "you'll", "you're", "you've", "your", "yours", "yourself", "yourselves",
];

pub fn default_stopwords() -> HashSet<String> {
    STOPWORDS.iter().map(|s| s.to_string()).collect()
}

/// The default stopwords, extended with some extra words.
///
/// The extra words are lowercased, since they are matched against lowercased tokens.
pub fn stopwords_with(extra: &[String]) -> HashSet<String> {
    let mut res = default_stopwords();
    res.extend(extra.iter().map(|s| s.to_lowercase()));
    res
}

/// Counts the words of a text, leaving out the stopwords.
///
/// The text is lowercased and split on whitespace. The stopwords are matched
/// as they are: they must already be lowercase.
pub fn analyze(text: &str, stopwords: &HashSet<String>) -> FrequencyTable {
    let mut table = FrequencyTable::default();
    let lowered = text.to_lowercase();
    for token in lowered.split_whitespace() {
        table.total_tokens += 1;
        if stopwords.contains(token) {
            continue;
        }
        if let Some(pos) = table.positions.get(token) {
            table.counts[*pos].1 += 1;
        } else {
            table
                .positions
                .insert(token.to_string(), table.counts.len());
            table.counts.push((token.to_string(), 1));
        }
    }
    debug!(
        "analyze: {} tokens, {} distinct words counted",
        table.total_tokens,
        table.counts.len()
    );
    table
}

/// Counts the words of the aggregate text with the stopwords of the options.
pub fn count_words(text: &str, options: &WordCountOptions) -> FrequencyTable {
    analyze(text, &options.stopwords)
}

impl WordCountOptions {
    /// The default stopwords with some extra words, showing the default number of words.
    pub fn with_extra_stopwords(extra: &[String]) -> WordCountOptions {
        WordCountOptions {
            stopwords: stopwords_with(extra),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl FrequencyTable {
    pub fn get(&self, token: &str) -> u64 {
        self.positions
            .get(token)
            .map(|pos| self.counts[*pos].1)
            .unwrap_or(0)
    }

    /// All the counted words, in the order they were first seen.
    pub fn counts(&self) -> &[(String, u64)] {
        &self.counts
    }

    /// The number of tokens in the text, stopwords included.
    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` most frequent words. Ties keep the order of first appearance.
    pub fn most_common(&self, n: usize) -> Vec<(String, u64)> {
        let mut res = self.counts.clone();
        // Stable sort.
        res.sort_by(|a, b| b.1.cmp(&a.1));
        res.truncate(n);
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_lowercased_words() {
        let stop = default_stopwords();
        let t = analyze("Great labs and great LECTURES. Labs", &stop);
        assert_eq!(t.get("great"), 2);
        assert_eq!(t.get("labs"), 2);
        assert_eq!(t.get("lectures."), 1);
        assert_eq!(t.get("and"), 0);
        assert_eq!(t.total_tokens(), 6);
    }

    #[test]
    fn no_stopword_survives() {
        let stop = stopwords_with(&["Class".to_string(), "lab".to_string()]);
        let text = "The class was fun and the lab was long but the CLASS was short";
        let t = analyze(text, &stop);
        for (w, c) in t.counts() {
            assert!(!stop.contains(w), "{} should have been removed", w);
            assert!(*c >= 1);
        }
        let sum: u64 = t.counts().iter().map(|p| p.1).sum();
        assert!(sum <= t.total_tokens());
        assert_eq!(t.get("fun"), 1);
        assert_eq!(t.get("class"), 0);
    }

    #[test]
    fn stopwords_are_case_sensitive() {
        let mut stop: HashSet<String> = HashSet::new();
        stop.insert("Labs".to_string());
        let t = analyze("Labs labs", &stop);
        assert_eq!(t.get("labs"), 2);
    }

    #[test]
    fn most_common_ties_keep_first_seen_order() {
        let stop = HashSet::new();
        let t = analyze("b a c a b d", &stop);
        assert_eq!(
            t.most_common(3),
            vec![
                ("b".to_string(), 2),
                ("a".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
        assert_eq!(t.most_common(20).len(), 4);
    }

    #[test]
    fn word_count_options() {
        let defaults = WordCountOptions::default();
        assert_eq!(defaults.top_n, DEFAULT_TOP_N);
        assert!(defaults.stopwords.contains("the"));

        let opts = WordCountOptions {
            top_n: 1,
            ..WordCountOptions::with_extra_stopwords(&["Labs".to_string()])
        };
        let t = count_words("the labs were great and the demos great labs", &opts);
        assert_eq!(t.get("labs"), 0);
        assert_eq!(t.most_common(opts.top_n), vec![("great".to_string(), 2)]);
    }

    #[test]
    fn empty_text() {
        let t = analyze("   ", &default_stopwords());
        assert!(t.is_empty());
        assert_eq!(t.total_tokens(), 0);
        assert!(t.most_common(20).is_empty());
    }
}
