use anyhow::{Context, Result};

/// Parse comma-separated seed values, skipping blanks.
///
/// # Errors
///
/// Returns an error naming the first token that is not an unsigned integer.
pub fn parse_seeds(list: &str) -> Result<Vec<u64>> {
    split_csv(list)
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed '{token}'"))
        })
        .collect()
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}
