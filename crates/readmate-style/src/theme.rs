//! Built-in theme table.

use readmate_protocols::Theme;

/// Names of the built-in themes, in display order. `default` means "leave
/// the page alone" and has no theme record.
pub fn theme_names() -> &'static [&'static str] {
    &["default", "light", "dark", "sepia", "gray", "night", "custom"]
}

/// Look up a built-in theme. `custom` returns its starting values; the
/// user's saved custom theme overrides them at apply time. `default` and
/// unknown names return `None`.
pub fn builtin_theme(name: &str) -> Option<Theme> {
    match name {
        "light" => Some(Theme::new("#fafafa", "#303030", "#0066cc")),
        "dark" => Some(Theme::new("#1a1a1a", "#e0e0e0", "#6db3f2")),
        "sepia" => Some(Theme::new("#f4ecd8", "#5c4a3a", "#8b6914")),
        "gray" => Some(Theme::new("#363636", "#ffffff", "#80b3ff")),
        "night" => Some(Theme::new("#0d1117", "#c9d1d9", "#58a6ff")),
        "custom" => Some(Theme::new("#363636", "#ffffff", "#80b3ff")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_named_theme_resolves_except_default() {
        for name in theme_names() {
            if *name == "default" {
                assert!(builtin_theme(name).is_none());
            } else {
                assert!(builtin_theme(name).is_some(), "missing theme {name}");
            }
        }
    }

    #[test]
    fn test_unknown_theme_is_none() {
        assert!(builtin_theme("solarized").is_none());
    }

    #[test]
    fn test_night_theme_values() {
        let theme = builtin_theme("night").unwrap();
        assert_eq!(theme.background, "#0d1117");
        assert_eq!(theme.link_color, "#58a6ff");
    }
}
