//! Identifier → wire name conversion.
//!
//! Declared field names and enum members are PascalCase; the platform
//! speaks snake_case. Acronym runs stay together (`URLValue` → `url_value`)
//! and the conversion is idempotent on its own output.

const SEPARATOR: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Lower,
    Upper,
}

/// Convert a PascalCase or camelCase identifier to snake_case.
pub fn to_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);
    let mut state = State::Start;

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            match state {
                State::Upper => {
                    // End of an acronym run: "URLValue" splits before the V.
                    if let Some(&next) = chars.get(i + 1) {
                        if i > 0 && !next.is_uppercase() && next != SEPARATOR {
                            out.push(SEPARATOR);
                        }
                    }
                }
                State::Lower => out.push(SEPARATOR),
                State::Start => {}
            }
            out.extend(c.to_lowercase());
            state = State::Upper;
        } else if c == SEPARATOR {
            out.push(SEPARATOR);
            state = State::Start;
        } else {
            out.push(c);
            state = State::Lower;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_case_fields() {
        assert_eq!(to_snake_case("ChatId"), "chat_id");
        assert_eq!(to_snake_case("UntilDate"), "until_date");
        assert_eq!(to_snake_case("RevokeMessages"), "revoke_messages");
        assert_eq!(to_snake_case("ReplyToMessageId"), "reply_to_message_id");
    }

    #[test]
    fn camel_case_and_single_words() {
        assert_eq!(to_snake_case("banChatMember"), "ban_chat_member");
        assert_eq!(to_snake_case("Text"), "text");
        assert_eq!(to_snake_case("url"), "url");
    }

    #[test]
    fn acronyms_stay_together() {
        assert_eq!(to_snake_case("URLValue"), "url_value");
        assert_eq!(to_snake_case("ChatID"), "chat_id");
        assert_eq!(to_snake_case("HTML"), "html");
    }

    #[test]
    fn digits_attach_to_previous_word() {
        assert_eq!(to_snake_case("MarkdownV2"), "markdown_v2");
    }

    #[test]
    fn existing_separator_starts_a_word() {
        assert_eq!(to_snake_case("Chat_ID"), "chat_id");
        assert_eq!(to_snake_case("chat_id"), "chat_id");
    }

    #[test]
    fn idempotent() {
        for ident in ["ChatId", "URLValue", "MigratedToSupergroup", "MarkdownV2", "a_b"] {
            let once = to_snake_case(ident);
            assert_eq!(to_snake_case(&once), once, "not idempotent for {ident}");
        }
    }

    #[test]
    fn empty_input() {
        assert_eq!(to_snake_case(""), "");
    }
}
