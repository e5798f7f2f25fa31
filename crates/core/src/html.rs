//! Small markup helpers shared by the extractor, redliner and assembler.

use html5gum::{Token, Tokenizer};

/// Escape text for placement in element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Text content of a markup string: tags and comments dropped, character
/// references decoded.
pub fn strip_tags(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());

    for token_result in Tokenizer::new(markup) {
        if let Ok(Token::String(chunk)) = token_result {
            text.push_str(&String::from_utf8_lossy(&chunk));
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("Kinney Law & <Compliance> \"LLC\""),
            "Kinney Law &amp; &lt;Compliance&gt; &quot;LLC&quot;"
        );
        assert_eq!(escape_html("{{company_name}}"), "{{company_name}}");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            strip_tags("<h3>Dependent Care</h3><p>Pays <em>qualifying</em> costs.</p>"),
            "Dependent CarePays qualifying costs."
        );
    }

    #[test]
    fn test_strip_tags_decodes_references() {
        assert_eq!(strip_tags("Fees &amp; costs<!-- internal -->"), "Fees & costs");
    }

    #[test]
    fn test_strip_tags_plain_text() {
        assert_eq!(strip_tags("no markup at all"), "no markup at all");
        assert_eq!(strip_tags(""), "");
    }
}
