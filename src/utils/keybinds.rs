//! Key names accepted in settings and understood by the input backend

/// A key the bot can press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyName {
    /// Letter or digit, stored lowercase to avoid layout mapping issues
    Char(char),
    /// Function key F1..=F12
    F(u8),
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Shift,
    Control,
    Alt,
    CapsLock,
}

/// Resolve a key name string to a validated key
pub fn resolve_key(key_name: &str) -> Option<KeyName> {
    let key_upper = key_name.trim().to_uppercase();
    if key_upper.is_empty() {
        return None;
    }

    // Single character keys (letters and digits)
    let mut chars = key_upper.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return c
            .is_ascii_alphanumeric()
            .then(|| KeyName::Char(c.to_ascii_lowercase()));
    }

    if let Some(n) = key_upper.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
        return (1..=12).contains(&n).then_some(KeyName::F(n));
    }

    match key_upper.as_str() {
        "ESC" | "ESCAPE" => Some(KeyName::Escape),
        "ENTER" | "RETURN" => Some(KeyName::Enter),
        "SPACE" => Some(KeyName::Space),
        "TAB" => Some(KeyName::Tab),
        "BACKSPACE" => Some(KeyName::Backspace),
        "UP" => Some(KeyName::Up),
        "DOWN" => Some(KeyName::Down),
        "LEFT" => Some(KeyName::Left),
        "RIGHT" => Some(KeyName::Right),
        "HOME" => Some(KeyName::Home),
        "END" => Some(KeyName::End),
        "PAGEUP" => Some(KeyName::PageUp),
        "PAGEDOWN" => Some(KeyName::PageDown),
        "DELETE" => Some(KeyName::Delete),
        "SHIFT" => Some(KeyName::Shift),
        "CTRL" | "CONTROL" => Some(KeyName::Control),
        "ALT" => Some(KeyName::Alt),
        "CAPSLOCK" => Some(KeyName::CapsLock),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_key() {
        assert_eq!(resolve_key("1"), Some(KeyName::Char('1')));
        assert_eq!(resolve_key("A"), Some(KeyName::Char('a')));
        assert_eq!(resolve_key(" f9 "), Some(KeyName::F(9)));
        assert_eq!(resolve_key("ESC"), Some(KeyName::Escape));
        assert_eq!(resolve_key("control"), Some(KeyName::Control));
    }

    #[test]
    fn test_resolve_key_rejects_unknown() {
        assert_eq!(resolve_key(""), None);
        assert_eq!(resolve_key("F13"), None);
        assert_eq!(resolve_key("F0"), None);
        assert_eq!(resolve_key("#"), None);
        assert_eq!(resolve_key("INVALID_KEY_NAME"), None);
    }
}
