//! Item name resolution with fuzzy suggestions.

use strsim::jaro_winkler;

/// Minimum similarity for a name to be suggested (0.0-1.0).
const SUGGEST_THRESHOLD: f64 = 0.8;

/// Resolve typed input to one of `candidates`, ignoring case.
pub fn resolve_name<'a, I>(input: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let input = input.trim();
    candidates
        .into_iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(input))
}

/// Resolve every name in `inputs`. Names that do not resolve are kept as
/// typed so the caller can report them.
pub fn resolve_names(inputs: &[String], candidates: &[&str]) -> Vec<String> {
    inputs
        .iter()
        .map(|input| {
            resolve_name(input, candidates.iter().copied())
                .map_or_else(|| input.trim().to_string(), str::to_string)
        })
        .collect()
}

/// Candidates that look like `input`, best first.
pub fn suggest_names<'a, I>(input: &str, candidates: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let input_lower = input.trim().to_lowercase();
    let mut scored: Vec<(&str, f64)> = candidates
        .into_iter()
        .filter_map(|name| {
            let name_lower = name.to_lowercase();
            let score = if name_lower.starts_with(&input_lower) {
                2.0
            } else if name_lower.contains(&input_lower) {
                1.0
            } else {
                jaro_winkler(&input_lower, &name_lower)
            };
            (score >= SUGGEST_THRESHOLD).then_some((name, score))
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(limit)
        .map(|(name, _)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOP: [&str; 4] = ["Fine Sword", "Machine Gun", "Rocket Launcher", "Elixir"];

    #[test]
    fn case_insensitive_match() {
        assert_eq!(resolve_name("machine gun", SHOP), Some("Machine Gun"));
        assert_eq!(resolve_name("  ELIXIR ", SHOP), Some("Elixir"));
        assert_eq!(resolve_name("Machine", SHOP), None);
    }

    #[test]
    fn unresolved_names_are_kept() {
        let inputs = vec!["elixir".to_string(), "Laser".to_string()];
        assert_eq!(resolve_names(&inputs, &SHOP), vec!["Elixir", "Laser"]);
    }

    #[test]
    fn suggests_close_names() {
        assert_eq!(suggest_names("Machin Gun", SHOP, 3), vec!["Machine Gun"]);
        assert_eq!(suggest_names("rocket", SHOP, 3), vec!["Rocket Launcher"]);
        assert!(suggest_names("zzzz", SHOP, 3).is_empty());
    }
}
