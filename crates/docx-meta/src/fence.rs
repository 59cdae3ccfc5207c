//! Fenced code block tracking for line-oriented scans.

/// Tracks whether a line-by-line scan is inside a fenced code block.
///
/// Recognizes CommonMark fences: three or more backticks or tildes, indented
/// by at most three spaces. A fence closes on a line with the same character
/// repeated at least as many times and nothing else.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    /// Feed the next line. Returns `true` if the line belongs to a fenced
    /// block, including its opening and closing delimiter lines.
    pub(crate) fn in_code(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start_matches(' ');
        let fence = if line.len() - trimmed.len() <= 3 {
            fence_run(trimmed)
        } else {
            None
        };

        match (self.open, fence) {
            (None, Some((ch, len, _))) => {
                self.open = Some((ch, len));
                true
            }
            (Some((ch, len)), Some((close_ch, close_len, true)))
                if close_ch == ch && close_len >= len =>
            {
                self.open = None;
                true
            }
            (Some(_), _) => true,
            (None, None) => false,
        }
    }
}

/// Parse a fence delimiter: (character, run length, rest-is-blank).
fn fence_run(line: &str) -> Option<(char, usize, bool)> {
    let ch = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = line.chars().take_while(|c| *c == ch).count();
    if len < 3 {
        return None;
    }
    let rest = &line[len..];
    if ch == '`' && rest.contains('`') {
        return None;
    }
    Some((ch, len, rest.trim().is_empty()))
}
