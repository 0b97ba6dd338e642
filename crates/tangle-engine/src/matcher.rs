//! Edit distance and closest-name suggestions.
//!
//! Used to turn "no such binding" into "did you mean ...?". Distances are
//! Levenshtein distances over Unicode scalar values: substitution, insertion
//! and deletion each cost one, and comparison is case-sensitive.

/// Levenshtein distance between `a` and `b`.
///
/// ```
/// assert_eq!(tangle_engine::distance("com.google.Cat", "com.google.Cats"), 1);
/// assert_eq!(tangle_engine::distance("kitten", "sitting"), 3);
/// ```
#[must_use]
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // Keep the shorter string in the row to bound memory.
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut previous: Vec<usize> = (0..=short.len()).collect();
    let mut current = vec![0; short.len() + 1];

    for (i, long_char) in long.iter().enumerate() {
        current[0] = i + 1;
        for (j, short_char) in short.iter().enumerate() {
            let substitution = previous[j] + usize::from(long_char != short_char);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[short.len()]
}

/// Candidates closest to `target`, all at the same minimal distance.
///
/// Candidates further than `max_distance` are discarded first. Of the rest,
/// only those at the smallest distance found are returned, in candidate
/// order. If nothing is within `max_distance` the result is empty. `limit`
/// caps the number of suggestions returned; `None` keeps every tie.
///
/// ```
/// use tangle_engine::closest_names;
///
/// let nodes = ["com.google.Cat", "com.google.Bat", "com.google.Dog"];
/// assert_eq!(
///     closest_names("com.google.Cats", nodes, 3, None),
///     vec!["com.google.Cat"]
/// );
/// ```
pub fn closest_names<'a, I>(
    target: &str,
    candidates: I,
    max_distance: usize,
    limit: Option<usize>,
) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best = max_distance;
    let mut closest: Vec<&'a str> = Vec::new();

    for candidate in candidates {
        let candidate_distance = distance(target, candidate);
        if candidate_distance > best {
            continue;
        }
        if candidate_distance < best {
            best = candidate_distance;
            closest.clear();
        }
        closest.push(candidate);
    }

    if let Some(limit) = limit {
        closest.truncate(limit);
    }
    closest
}
