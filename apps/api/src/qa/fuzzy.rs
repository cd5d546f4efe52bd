//! Fuzzy string similarity on a 0–100 scale.
//!
//! The base ratio is the normalized Indel similarity: `2 * LCS / (len_a + len_b)`.
//! `partial_ratio` slides the shorter string across the longer one and keeps
//! the best window, so a question that is a fragment of a longer sentence
//! still scores high. Lengths are counted in Unicode scalar values.

/// Best similarity between the shorter string and any same-length window of the
/// longer one (plus the shorter head and tail windows at either edge).
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let best = best_window(short, long);

    // Equal lengths give no natural needle; score both ways.
    if short.len() == long.len() && best < 100.0 {
        return best.max(best_window(long, short));
    }
    best
}

/// Slides `short` across `long` and keeps the best window score.
fn best_window(short: &[char], long: &[char]) -> f64 {
    let m = short.len();
    let n = long.len();

    let mut best = 0.0_f64;
    let mut consider = |window: &[char]| {
        let score = ratio_chars(short, window);
        if score > best {
            best = score;
        }
    };

    // Edge windows shorter than the needle.
    for k in 1..m {
        consider(&long[..k]);
        consider(&long[n - k..]);
    }
    for start in 0..=(n - m) {
        consider(&long[start..start + m]);
    }

    best
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Length of the longest common subsequence, two-row dynamic programming.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
