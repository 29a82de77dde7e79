//! Diacritic-insensitive comparison keys.

/// Map a Polish diacritic to its base letter.
///
/// Only lower-case letters are listed; callers lower-case first.
fn strip_diacritic(c: char) -> char {
    match c {
        'ą' => 'a',
        'ć' => 'c',
        'ę' => 'e',
        'ł' => 'l',
        'ń' => 'n',
        'ó' => 'o',
        'ś' => 's',
        'ź' | 'ż' => 'z',
        other => other,
    }
}

/// Normalize a string for prefix matching.
///
/// Lower-cases the input, then replaces Polish diacritics with their base
/// letters. Everything else (digits, punctuation, whitespace, letters from
/// other alphabets) passes through unchanged.
///
/// # Examples
///
/// ```
/// use station_distance::domain::normalize;
///
/// assert_eq!(normalize("Łódź"), "lodz");
/// assert_eq!(normalize("Małczew 8 kier. Andrespol"), "malczew 8 kier. andrespol");
/// ```
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(strip_diacritic)
        .collect()
}
