//! Line splitter (Component E): raw text -> indexed, depth-tagged lines.

use crate::indent::{check_depth_jump, measure_depth};
use crate::error::Result;

/// A single non-blank source line with its indent depth and 1-based number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
    pub content: String,
    pub depth: usize,
    pub line_num: usize,
}

/// Split `text` into `Line`s, skipping blank lines, validating indentation
/// at `step` spaces and rejecting depth jumps greater than +1.
pub(crate) fn split_lines(text: &str, step: usize) -> Result<Vec<Line>> {
    let mut out = Vec::new();
    let mut prev_depth = 0usize;
    for (idx, raw) in text.lines().enumerate() {
        let line_num = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let depth = measure_depth(line_num, raw, step)?;
        if !out.is_empty() {
            check_depth_jump(line_num, raw, prev_depth, depth)?;
        } else if depth != 0 {
            check_depth_jump(line_num, raw, 0, depth)?;
        }
        prev_depth = depth;
        out.push(Line {
            content: raw.trim_start_matches(' ').to_string(),
            depth,
            line_num,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_lines() {
        let lines = split_lines("a: 1\n\n  b: 2\n", 2).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].depth, 0);
        assert_eq!(lines[1].depth, 1);
    }

    #[test]
    fn rejects_initial_depth_jump() {
        let err = split_lines("    a: 1\n", 2).unwrap_err();
        assert!(matches!(err, crate::error::ToonError::Indent { .. }));
    }

    #[test]
    fn tracks_line_numbers_through_blanks() {
        let lines = split_lines("a: 1\n\n\nb: 2\n", 2).unwrap();
        assert_eq!(lines[1].line_num, 4);
    }
}
