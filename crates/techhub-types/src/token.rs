//! Token rules shared by the tokenizer and catalog keyword checks

/// Tokens shorter than this are dropped
pub const MIN_TOKEN_LEN: usize = 2;

/// Characters kept in a token; whitespace separates tokens and anything
/// else is stripped
pub fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Characters trimmed from both ends of a token
pub fn is_edge_char(c: char) -> bool {
    c == '-' || c == '_'
}

/// Whether `keyword` can ever be produced by tokenizing some text
pub fn is_matchable(keyword: &str) -> bool {
    keyword.chars().count() >= MIN_TOKEN_LEN
        && keyword.chars().all(is_token_char)
        && !keyword.starts_with(is_edge_char)
        && !keyword.ends_with(is_edge_char)
        && keyword.to_lowercase() == keyword
}
