use crate::tweet::CleanedTweet;
use regex::Regex;
use std::collections::HashSet;

/// English stopwords (NLTK list).
pub const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Turns raw tweet text into a stopword-free token string and the list of
/// hashtags it carried.
pub struct TextNormalizer {
    retweet: Regex,
    amp: Regex,
    mention: Regex,
    link: Regex,
    hashtag: Regex,
    stopwords: HashSet<&'static str>,
}

impl TextNormalizer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            retweet: Regex::new(r"^rt @")?,
            amp: Regex::new(r"^amp @")?,
            mention: Regex::new(r"@\w+")?,
            link: Regex::new(r"http\S+|www\.\S+")?,
            hashtag: Regex::new(r"#(\w+)")?,
            stopwords: STOPWORDS.iter().copied().collect(),
        })
    }

    pub fn normalize(&self, raw_text: &str) -> CleanedTweet {
        let text = raw_text.to_lowercase();

        let text = self.retweet.replacen(&text, 1, "@");
        let text = self.amp.replacen(&text, 1, "@");
        let text = self.mention.replace_all(&text, "");
        let text = self.link.replace_all(&text, "");

        // Hashtags are collected before they are stripped, and kept as-is.
        let hashtags: Vec<String> = self
            .hashtag
            .captures_iter(&text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect();
        let text = self.hashtag.replace_all(&text, "");

        let tokens: Vec<String> = text
            .split_whitespace()
            .map(|w| w.chars().filter(|c| !c.is_ascii_punctuation()).collect::<String>())
            .filter(|w| !w.is_empty() && w.chars().all(char::is_alphabetic))
            .filter(|w| !self.stopwords.contains(w.as_str()))
            .collect();

        CleanedTweet {
            tokens: tokens.join(" "),
            hashtags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> CleanedTweet {
        TextNormalizer::new().unwrap().normalize(text)
    }

    #[test]
    fn test_retweet_with_link_and_hashtag() {
        let cleaned = normalize("RT @alice: I love #Pizza!!! http://x.co");
        assert_eq!(cleaned.tokens, "love");
        assert_eq!(cleaned.hashtags, vec!["pizza"]);
    }

    #[test]
    fn test_all_stopwords_reduce_to_empty() {
        let cleaned = normalize("the a an");
        assert_eq!(cleaned.tokens, "");
        assert!(cleaned.hashtags.is_empty());
    }

    #[test]
    fn test_mentions_anywhere_are_removed() {
        let cleaned = normalize("great game @bob_99 and @carol");
        assert_eq!(cleaned.tokens, "great game");
    }

    #[test]
    fn test_amp_artifact_is_stripped() {
        let cleaned = normalize("amp @dave thanks everyone");
        assert_eq!(cleaned.tokens, "thanks everyone");
    }

    #[test]
    fn test_www_links_are_removed() {
        let cleaned = normalize("read www.example.com/page today https://t.co/abc");
        assert_eq!(cleaned.tokens, "read today");
    }

    #[test]
    fn test_hashtags_keep_order_and_are_not_stopword_filtered() {
        let cleaned = normalize("#The market #Bull_Run #2024 rally");
        assert_eq!(cleaned.hashtags, vec!["the", "bull_run", "2024"]);
        assert_eq!(cleaned.tokens, "market rally");
    }

    #[test]
    fn test_numbers_are_dropped() {
        let cleaned = normalize("price hit 42 dollars 3x");
        assert_eq!(cleaned.tokens, "price hit dollars");
    }

    #[test]
    fn test_punctuation_removed_inside_tokens() {
        // "don't" becomes "dont", which is not in the stopword list.
        let cleaned = normalize("Don't panic, friends.");
        assert_eq!(cleaned.tokens, "dont panic friends");
    }

    #[test]
    fn test_plain_text_is_stable_under_renormalization() {
        let first = normalize("Markets Rally As Investors Cheer Strong Earnings");
        assert_eq!(first.tokens, "markets rally investors cheer strong earnings");
        let second = normalize(&first.tokens);
        assert_eq!(second.tokens, first.tokens);
        assert!(second.hashtags.is_empty());
    }

    #[test]
    fn test_retweet_marker_only_at_start() {
        // A mid-text "rt @" is just a mention after a stray token.
        let cleaned = normalize("wow rt @someone cool");
        assert_eq!(cleaned.tokens, "wow rt cool");
    }
}
