/// Maps between byte offsets (what `regex` reports) and character offsets
/// (what the host counts in).
#[derive(Debug)]
pub(crate) struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    pub(crate) fn char_to_byte(&self, char_offset: usize) -> usize {
        self.char_to_byte
            .get(char_offset)
            .copied()
            .unwrap_or(self.text_len)
    }

    pub(crate) fn char_count(&self) -> usize {
        self.char_to_byte.len() - 1
    }

    pub(crate) fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) => idx,
            Err(idx) => idx,
        }
    }
}

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Collapses every run of whitespace into a single space.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                collapsed.push(' ');
            }
            in_space = true;
        } else {
            collapsed.push(ch);
            in_space = false;
        }
    }
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_offsets_map_to_chars() {
        let text = "a\u{e9}b\u{1F600}c";
        let index = CharIndex::new(text);
        assert_eq!(index.byte_to_char(0), 0);
        assert_eq!(index.byte_to_char(1), 1);
        assert_eq!(index.byte_to_char(3), 2);
        assert_eq!(index.byte_to_char(4), 3);
        assert_eq!(index.byte_to_char(8), 4);
        assert_eq!(index.byte_to_char(text.len()), 5);
    }

    #[test]
    fn char_offsets_map_to_bytes() {
        let text = "a\u{e9}b\u{1F600}c";
        let index = CharIndex::new(text);
        assert_eq!(index.char_count(), 5);
        assert_eq!(index.char_to_byte(2), 3);
        assert_eq!(index.char_to_byte(4), 8);
        assert_eq!(index.char_to_byte(5), text.len());
        assert_eq!(index.char_to_byte(40), text.len());
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(collapse_whitespace("a \t\n b  c"), "a b c");
        assert_eq!(collapse_whitespace("\n\nx"), " x");
    }
}
