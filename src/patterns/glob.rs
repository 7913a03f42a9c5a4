use regex::Regex;

/// Compile a bundle glob into an anchored regex that ignores ASCII case.
///
/// Only `*` (any run of characters) and `?` (exactly one character) are special; every
/// other character is matched literally. Non-ASCII letters must match exactly.
pub fn glob_regex(glob: &str) -> Result<Regex, regex::Error> {
    let mut pattern = String::with_capacity(glob.len() * 2 + 8);
    pattern.push_str("(?s)^");
    let mut literal = [0u8; 4];
    for ch in glob.chars() {
        match ch {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            letter if letter.is_ascii_alphabetic() => {
                pattern.push('[');
                pattern.push(letter.to_ascii_lowercase());
                pattern.push(letter.to_ascii_uppercase());
                pattern.push(']');
            }
            other => pattern.push_str(&regex::escape(other.encode_utf8(&mut literal))),
        }
    }
    pattern.push('$');
    Regex::new(&pattern)
}
