use std::collections::HashMap;

/// Delimiters we try, in order of preference when scores tie.
const CANDIDATES: &[u8] = b",\t;|";

/// Guess the field delimiter of a CSV sample.
///
/// A delimiter scores well when most lines contain it the same non-zero
/// number of times. Quoted sections are ignored. If `sample` was cut
/// mid-line (no trailing newline) the last line is left out.
pub(crate) fn sniff_delimiter(sample: &str) -> Option<u8> {
    let mut lines: Vec<&str> = sample.lines().collect();
    if !sample.ends_with('\n') && lines.len() > 1 {
        lines.pop();
    }
    let lines: Vec<&str> = lines.into_iter().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return None;
    }

    let mut best: Option<(u8, f64)> = None;
    for &delim in CANDIDATES {
        let Some(score) = consistency(&lines, delim) else {
            continue;
        };
        match best {
            Some((_, s)) if s >= score => {}
            _ => best = Some((delim, score)),
        }
    }
    best.map(|(delim, _)| delim)
}

/// Share of lines whose count of `delim` equals the most common non-zero count.
fn consistency(lines: &[&str], delim: u8) -> Option<f64> {
    let mut freq: HashMap<usize, usize> = HashMap::new();
    for line in lines {
        let n = count_unquoted(line, delim);
        if n > 0 {
            *freq.entry(n).or_default() += 1;
        }
    }
    // Highest frequency, then highest count, so the result is deterministic.
    let (_, lines_with_mode) = freq
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)))?;
    Some(lines_with_mode as f64 / lines.len() as f64)
}

fn count_unquoted(line: &str, delim: u8) -> usize {
    let mut in_quotes = false;
    let mut n = 0;
    for &b in line.as_bytes() {
        if b == b'"' {
            in_quotes = !in_quotes;
        } else if b == delim && !in_quotes {
            n += 1;
        }
    }
    n
}

#[cfg(test)]
#[path = "sniff_tests.rs"]
mod tests;
