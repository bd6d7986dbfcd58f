/// Clean HTML content using the ammonia library.
///
/// Whitelist-based: safe tags (like <b>, <p>) survive, dangerous tags
/// (like <script>, <iframe>) are removed together with their content, and
/// event-handler attributes are stripped.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

/// Sanitizes user input and trims the result.
/// An empty return means nothing displayable was submitted.
pub fn sanitize_field(input: &str) -> String {
    clean_html(input.trim()).trim().to_string()
}
