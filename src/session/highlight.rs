/// Char range `[start, end)` of a typed word that does not match the target
/// word at the same position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MismatchSpan {
    pub word_index: usize,
    pub start: usize,
    pub end: usize,
}

impl MismatchSpan {
    pub fn contains(&self, char_idx: usize) -> bool {
        char_idx >= self.start && char_idx < self.end
    }
}

/// Split `text` on whitespace, yielding each word with its char range.
fn words_with_ranges(text: &str) -> Vec<(usize, usize, &str)> {
    let mut words = Vec::new();
    let mut word_start: Option<(usize, usize)> = None; // (char idx, byte idx)
    let mut char_idx = 0;

    for (byte_idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some((start_char, start_byte)) = word_start.take() {
                words.push((start_char, char_idx, &text[start_byte..byte_idx]));
            }
        } else if word_start.is_none() {
            word_start = Some((char_idx, byte_idx));
        }
        char_idx += 1;
    }
    if let Some((start_char, start_byte)) = word_start {
        words.push((start_char, char_idx, &text[start_byte..]));
    }

    words
}

/// Compare typed and target word-by-word using raw (case-sensitive) equality.
/// Typed words past the end of the target are always flagged.
pub fn mismatch_spans(typed: &str, target: &str) -> Vec<MismatchSpan> {
    let target_words: Vec<&str> = target.split_whitespace().collect();

    words_with_ranges(typed)
        .into_iter()
        .enumerate()
        .filter(|(i, (_, _, word))| target_words.get(*i) != Some(word))
        .map(|(i, (start, end, _))| MismatchSpan {
            word_index: i,
            start,
            end,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flagged(typed: &str, target: &str) -> Vec<usize> {
        mismatch_spans(typed, target)
            .iter()
            .map(|s| s.word_index)
            .collect()
    }

    #[test]
    fn exact_prefix_has_no_mismatches() {
        assert!(mismatch_spans("The quick", "The quick brown fox").is_empty());
        assert!(mismatch_spans("", "The quick brown fox").is_empty());
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert_eq!(flagged("the Quick brown fox", "The quick brown fox"), vec![0, 1]);
    }

    #[test]
    fn partially_typed_word_is_flagged_until_complete() {
        assert_eq!(flagged("The qui", "The quick brown"), vec![1]);
        assert!(flagged("The quick", "The quick brown").is_empty());
    }

    #[test]
    fn extra_words_beyond_target_are_flagged() {
        assert_eq!(flagged("a b c d", "a b"), vec![2, 3]);
        assert_eq!(flagged("x", ""), vec![0]);
    }

    #[test]
    fn spans_cover_word_char_ranges_in_buffer() {
        let spans = mismatch_spans("  hello   wrld", "hello world");
        assert_eq!(
            spans,
            vec![MismatchSpan {
                word_index: 1,
                start: 10,
                end: 14,
            }]
        );
    }

    #[test]
    fn spans_use_char_indices_for_multibyte_text() {
        let spans = mismatch_spans("café bär", "café bar");
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end), (5, 8));
        assert!(spans[0].contains(5));
        assert!(!spans[0].contains(8));
    }
}
