use crate::error::RankError;
use crate::tweet::FrequencyTable;
use std::collections::HashMap;

/// Count whitespace-separated tokens across `items` and order them by count,
/// highest first.
///
/// Items are joined before splitting, so a multi-word item contributes each
/// of its words rather than counting as one label. Ties keep the order in
/// which the tokens were first seen.
pub fn rank<S: AsRef<str>>(items: &[S]) -> Result<FrequencyTable, RankError> {
    let joined = items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for word in joined.split_whitespace() {
        match index.get(word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word, counts.len());
                counts.push((word, 1));
            }
        }
    }

    if counts.is_empty() {
        return Err(RankError::EmptyInput);
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let (labels, counts) = counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .unzip();
    Ok(FrequencyTable { labels, counts })
}
