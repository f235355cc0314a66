use crate::errors::ParseFailure;

/// Parse a free-form win-rate field into a percentage.
///
/// Accepts `"230W 146L (61.17%)"` style text, where the percentage sits in the
/// first parenthesized segment, as well as bare values like `"45.0%"`.
pub fn parse_winrate(text: &str) -> Result<f64, ParseFailure> {
    let segment = percentage_segment(text).ok_or_else(|| ParseFailure::new(text))?;
    let trimmed = segment.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

    number
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ParseFailure::new(text))
}

/// True when the record's win rate reaches `threshold`; unparseable text never does
pub fn meets_threshold(text: &str, threshold: f64) -> bool {
    parse_winrate(text).is_ok_and(|value| value >= threshold)
}

fn percentage_segment(text: &str) -> Option<&str> {
    match text.find('(') {
        Some(open) => {
            let inner = &text[open + 1..];
            let close = inner.find(')')?;
            Some(&inner[..close])
        }
        None => Some(text),
    }
}
