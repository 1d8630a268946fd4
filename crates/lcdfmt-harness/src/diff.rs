//! Diff rendering for fixture comparison.

/// Render a line diff between expected and actual output.
///
/// Each differing line is shown as a `-`/`+` pair followed by a caret under
/// the first differing column, which is what matters on a fixed-width panel.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let expected_lines: Vec<&str> = expected.split('\n').collect();
    let actual_lines: Vec<&str> = actual.split('\n').collect();
    let mut out = String::new();
    out.push_str("--- expected\n");
    out.push_str("+++ actual\n");
    for i in 0..expected_lines.len().max(actual_lines.len()) {
        let e = expected_lines.get(i).copied();
        let a = actual_lines.get(i).copied();
        if e == a {
            continue;
        }
        out.push_str(&format!("@@ line {} @@\n", i + 1));
        if let Some(e) = e {
            out.push_str(&format!("-{e:?}\n"));
        }
        if let Some(a) = a {
            out.push_str(&format!("+{a:?}\n"));
        }
        if let (Some(e), Some(a)) = (e, a) {
            let col = first_difference(e, a);
            // +2 skips the sign and the opening quote
            out.push_str(&format!("{}^ column {col}\n", " ".repeat(col + 2)));
        }
    }
    out
}

fn first_difference(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .position(|(x, y)| x != y)
        .unwrap_or_else(|| a.chars().count().min(b.chars().count()))
}
