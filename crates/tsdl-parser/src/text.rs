//! Indentation helpers shared by the parser and the printer.

/// Count of leading spaces and tabs.
pub fn leading_ws(line: &str) -> usize {
    line.chars().take_while(|ch| *ch == ' ' || *ch == '\t').count()
}

fn strip_ws(line: &str, count: usize) -> &str {
    let mut idx = 0usize;
    for (seen, (i, ch)) in line.char_indices().enumerate() {
        if seen == count || (ch != ' ' && ch != '\t') {
            return &line[i..];
        }
        idx = i + ch.len_utf8();
    }
    &line[idx..]
}

/// Remove the common leading indentation of `text`.
///
/// With `skip_first`, the first line is kept verbatim and does not take part
/// in computing the common indentation (it started mid-line in the source).
pub fn dedent(text: &str, skip_first: bool) -> String {
    let lines: Vec<&str> = text.lines().map(|line| line.trim_end_matches('\r')).collect();
    let skip = usize::from(skip_first);
    let common = lines
        .iter()
        .skip(skip)
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_ws(line))
        .min()
        .unwrap_or(0);

    let mut out = String::with_capacity(text.len());
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if i < skip {
            out.push_str(line.trim_start());
        } else if line.trim().is_empty() {
            continue;
        } else {
            out.push_str(strip_ws(line, common).trim_end());
        }
    }
    out
}

/// Keep the first line and strip up to `indent` leading whitespace
/// characters from every following line.
pub fn dedent_continuation(text: &str, indent: usize) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(strip_ws(line, indent).trim_end());
        } else {
            out.push_str(line.trim_end());
        }
    }
    out
}

/// Prefix every non-empty line with `prefix`, appending a line break to each.
pub fn indent_lines(out: &mut String, text: &str, prefix: &str) {
    for line in text.lines() {
        if !line.trim().is_empty() {
            out.push_str(prefix);
            out.push_str(line);
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedent_removes_common_indent() {
        let text = "    /** Docs. */\n    alert(message?: any): void";
        assert_eq!(dedent(text, false), "/** Docs. */\nalert(message?: any): void");
    }

    #[test]
    fn test_dedent_skip_first_line() {
        let text = "{\n        A = 1,\n        B = 2\n    }";
        assert_eq!(dedent(text, true), "{\n    A = 1,\n    B = 2\n}");
    }

    #[test]
    fn test_dedent_continuation() {
        let text = ": {\n        new(): Foo;\n    }";
        assert_eq!(dedent_continuation(text, 4), ": {\n    new(): Foo;\n}");
    }

    #[test]
    fn test_indent_lines() {
        let mut out = String::new();
        indent_lines(&mut out, "a;\n\nb;", "    ");
        assert_eq!(out, "    a;\n\n    b;\n");
    }
}
