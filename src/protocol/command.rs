//! Protocol command parsing

/// Trim a raw input line, dropping blank ones
pub fn parse_command(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    Some(input.to_string())
}

/// Split `update <upper> | <lower>` arguments into the two action texts
pub fn split_pair(args: &str) -> Option<(&str, &str)> {
    let (upper, lower) = args.split_once('|')?;
    let (upper, lower) = (upper.trim(), lower.trim());
    if upper.is_empty() || lower.is_empty() {
        return None;
    }
    Some((upper, lower))
}
