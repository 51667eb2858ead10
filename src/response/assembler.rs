/// What one appended fragment changed in the line list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppendDelta {
    /// Number of lines newly appended by this fragment.
    pub new_lines: usize,
    /// Whether the previously-existing last line was mutated in place.
    pub last_line_changed: bool,
}

impl AppendDelta {
    /// True when the fragment changed nothing (e.g. `""` on a non-empty list).
    pub fn is_empty(&self) -> bool {
        self.new_lines == 0 && !self.last_line_changed
    }
}

/// Assembles a stream of arbitrarily-chunked text fragments into logical lines.
///
/// A newline inside a fragment is a hard break; otherwise consecutive
/// fragments concatenate within the same line. Invariant: joining `lines()`
/// with `\n` reproduces the exact concatenation of every fragment received
/// since the last `reset`. Only the last line is ever mutated; earlier
/// lines are final once a break lands after them.
#[derive(Debug, Default)]
pub struct TextAssembler {
    lines: Vec<String>,
}

impl TextAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the line list for a new session.
    pub fn reset(&mut self) {
        self.lines.clear();
    }

    /// Append one stream fragment, splitting on embedded newlines.
    ///
    /// On an empty list every part becomes its own line (so even `""`
    /// creates one empty line). Otherwise the first part extends the
    /// current last line and the remaining parts append after it.
    pub fn append_fragment(&mut self, fragment: &str) -> AppendDelta {
        let mut parts = fragment.split('\n');
        let first = parts.next().unwrap_or("");

        let mut delta = AppendDelta::default();
        match self.lines.last_mut() {
            Some(last) => {
                if !first.is_empty() {
                    last.push_str(first);
                    delta.last_line_changed = true;
                }
            }
            None => {
                self.lines.push(first.to_string());
                delta.new_lines += 1;
            }
        }
        for part in parts {
            self.lines.push(part.to_string());
            delta.new_lines += 1;
        }
        delta
    }

    /// The assembled lines, in arrival order. The shared borrow is the
    /// snapshot guarantee: the list cannot change while this is held.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Full response text, lines joined with `\n` (the share surface).
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble(fragments: &[&str]) -> TextAssembler {
        let mut assembler = TextAssembler::new();
        for fragment in fragments {
            assembler.append_fragment(fragment);
        }
        assembler
    }

    #[test]
    fn fragments_concatenate_within_a_line() {
        let assembler = assemble(&["Hello ", "world", "\nSecond line"]);
        assert_eq!(assembler.lines(), ["Hello world", "Second line"]);
    }

    #[test]
    fn single_fragment_with_many_breaks() {
        let assembler = assemble(&["a\nb\nc\nd\ne"]);
        assert_eq!(assembler.lines(), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn empty_fragment_on_empty_list_creates_one_empty_line() {
        let assembler = assemble(&[""]);
        assert_eq!(assembler.lines(), [""]);
    }

    #[test]
    fn empty_fragment_on_non_empty_list_is_a_noop() {
        let mut assembler = assemble(&["abc"]);
        let delta = assembler.append_fragment("");
        assert!(delta.is_empty());
        assert_eq!(assembler.lines(), ["abc"]);
    }

    #[test]
    fn lone_newline_appends_one_empty_line() {
        let mut assembler = assemble(&["abc"]);
        let delta = assembler.append_fragment("\n");
        assert_eq!(delta.new_lines, 1);
        assert!(!delta.last_line_changed);
        assert_eq!(assembler.lines(), ["abc", ""]);
    }

    #[test]
    fn leading_newline_on_empty_list_keeps_the_empty_first_line() {
        let assembler = assemble(&["\nhello"]);
        assert_eq!(assembler.lines(), ["", "hello"]);
    }

    #[test]
    fn delta_reports_extension_and_new_lines() {
        let mut assembler = assemble(&["one"]);
        let delta = assembler.append_fragment(" more\ntwo\nthree");
        assert_eq!(delta.new_lines, 2);
        assert!(delta.last_line_changed);
        assert_eq!(assembler.lines(), ["one more", "two", "three"]);
    }

    #[test]
    fn reset_clears_everything() {
        let mut assembler = assemble(&["a\nb"]);
        assembler.reset();
        assert!(assembler.is_empty());
        assert_eq!(assembler.line_count(), 0);
        assert_eq!(assembler.joined(), "");
    }

    #[test]
    fn joining_lines_reconstructs_the_raw_stream() {
        let cases: &[&[&str]] = &[
            &["Hello ", "world", "\nSecond line"],
            &["a\nb\nc\nd\ne"],
            &[""],
            &["", "", "x"],
            &["\n"],
            &["one", "\n", "\n", "two\n"],
            &["mixed\npartial", " tail", "\n\nblank above"],
        ];
        for fragments in cases {
            let assembler = assemble(fragments);
            assert_eq!(
                assembler.joined(),
                fragments.concat(),
                "reconstruction failed for {fragments:?}"
            );
        }
    }

    #[test]
    fn trailing_newline_leaves_an_open_empty_line() {
        let assembler = assemble(&["done\n"]);
        assert_eq!(assembler.lines(), ["done", ""]);
        assert_eq!(assembler.joined(), "done\n");
    }
}
