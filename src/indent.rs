//! Indent engine (Component B): emit-side indent strings and decode-side
//! leading-space measurement/validation.

use crate::error::{Result, ToonError};

/// Produce the indentation prefix for `depth` levels at `step` spaces each.
pub(crate) fn make_indent(depth: usize, step: usize) -> String {
    " ".repeat(depth * step)
}

/// Measure the leading-space run of `line`, validating it against `step`.
///
/// Returns the depth (`leading_spaces / step`). Rejects a tab anywhere in
/// the leading whitespace, and a non-zero remainder.
pub(crate) fn measure_depth(line_num: usize, raw: &str, step: usize) -> Result<usize> {
    let mut spaces = 0usize;
    for ch in raw.chars() {
        match ch {
            ' ' => spaces += 1,
            '\t' => return Err(ToonError::indent_tab(line_num, raw)),
            _ => break,
        }
    }
    if spaces % step != 0 {
        return Err(ToonError::indent_remainder(line_num, raw, step));
    }
    Ok(spaces / step)
}

/// Validate that a freshly read line's depth is never more than one deeper
/// than the previous depth seen at this point in the stream.
pub(crate) fn check_depth_jump(line_num: usize, raw: &str, prev_depth: usize, depth: usize) -> Result<()> {
    if depth > prev_depth + 1 {
        return Err(ToonError::indent_jump(line_num, raw, prev_depth, depth));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_simple_depth() {
        assert_eq!(measure_depth(1, "    key: 1", 2).unwrap(), 2);
        assert_eq!(measure_depth(1, "key: 1", 2).unwrap(), 0);
    }

    #[test]
    fn rejects_remainder() {
        assert!(matches!(
            measure_depth(1, "   key: 1", 2),
            Err(ToonError::Indent { .. })
        ));
    }

    #[test]
    fn rejects_tab_indentation() {
        assert!(matches!(
            measure_depth(1, "\tkey: 1", 2),
            Err(ToonError::Indent { .. })
        ));
    }

    #[test]
    fn rejects_depth_jump_by_more_than_one() {
        assert!(check_depth_jump(2, "      key: 1", 0, 1).is_ok());
        assert!(matches!(
            check_depth_jump(2, "      key: 1", 0, 2),
            Err(ToonError::Indent { .. })
        ));
    }

    #[test]
    fn emits_indent_string() {
        assert_eq!(make_indent(0, 2), "");
        assert_eq!(make_indent(2, 2), "    ");
        assert_eq!(make_indent(1, 4), "    ");
    }
}
