//! Text canonicalization and similarity scoring.
//!
//! Everything downstream (field codes, word codes, synonym matching, value
//! filters) runs through these functions, so they are deliberately small and
//! total: any input string, including the empty string, has a defined result.

/// Upper bound (exclusive) for [`scalar_code`] values.
pub const CODE_SPACE: u64 = 10_000_000_000;

/// Lowercase the input and fold Turkish diacritics to their closest ASCII
/// letter (ı→i, ş→s, ğ→g, ü→u, ö→o, ç→c).
///
/// Folding happens before lowercasing so that 'İ' maps to a plain 'i' rather
/// than an 'i' with a combining dot.
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'ı' | 'İ' => 'i',
            'ş' | 'Ş' => 's',
            'ğ' | 'Ğ' => 'g',
            'ü' | 'Ü' => 'u',
            'ö' | 'Ö' => 'o',
            'ç' | 'Ç' => 'c',
            other => other,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lowercase without introducing combining marks: 'İ' maps to a plain 'i'
/// instead of the "i̇" that Unicode default lowering produces. Diacritics are
/// otherwise kept, so `lowercase("İzmir")` is `"izmir"` but
/// `lowercase("Ayşe")` is `"ayşe"`.
pub fn lowercase(text: &str) -> String {
    text.chars()
        .flat_map(|c| {
            let c = if c == 'İ' { 'i' } else { c };
            c.to_lowercase()
        })
        .collect()
}

/// Levenshtein edit distance over the normalized forms of `a` and `b`.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = normalize(a).chars().collect();
    let b: Vec<char> = normalize(b).chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two-row rolling DP.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Similarity score in `[0, 1]` derived from the edit distance.
///
/// A blank input on either side scores 0.0 - even when both sides are blank,
/// where the distance formula alone would give 1.0. The blank guard takes
/// precedence; callers rely on that exact ordering.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0.0;
    }

    let distance = levenshtein(a, b);
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    1.0 - (distance as f64 / max_len as f64)
}

/// Deterministic scalar code for a piece of text, in `[0, CODE_SPACE)`.
///
/// Normalizes the input, then runs a rolling polynomial hash
/// (`h = h * 31 + char`) with wraparound arithmetic and reduces it modulo
/// ten billion. This is a cheap stand-in for a semantic vector, not an
/// embedding: unrelated strings that collide are indistinguishable to every
/// downstream stage, and field names share the code space with value tokens.
pub fn scalar_code(text: &str) -> u64 {
    if text.trim().is_empty() {
        return 0;
    }

    let normalized = normalize(text.trim());
    let mut hash: i64 = 0;
    for c in normalized.chars() {
        hash = hash.wrapping_mul(31).wrapping_add(c as i64);
    }

    (hash % CODE_SPACE as i64).unsigned_abs()
}
