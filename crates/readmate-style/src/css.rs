//! Theme and text-settings CSS generation.
//!
//! The generated rules mirror what the page-wide re-theme needs: everything
//! is overridden except the engine's own overlay elements, which must keep
//! their fixed styling regardless of the page theme.

use readmate_protocols::types::overlay;
use readmate_protocols::{TextSettings, Theme};

use crate::color::adjust_brightness;

/// Selector fragment excluding the overlay subtrees from a page-wide rule.
fn overlay_exclusions() -> String {
    let ids = [
        overlay::AI_POPUP,
        overlay::AI_LOADER,
        overlay::AI_OVERLAY,
        overlay::PROGRESS,
        overlay::COMPLETE_TOAST,
    ];
    let mut out = String::new();
    for id in ids {
        out.push_str(&format!(":not(#{id}):not(#{id} *)"));
    }
    out
}

/// Page-wide theme stylesheet.
pub fn theme_css(theme: &Theme) -> String {
    let exclude = overlay_exclusions();
    let input_bg = adjust_brightness(&theme.background, 10);
    let button_bg = adjust_brightness(&theme.background, 20);
    let code_bg = adjust_brightness(&theme.background, 15);
    let Theme {
        background,
        color,
        link_color,
    } = theme;

    format!(
        r#"html, body {{
  background-color: {background} !important;
  color: {color} !important;
}}

*{exclude} {{
  background-color: {background} !important;
  color: {color} !important;
  border-color: {color} !important;
}}

a{exclude}, a{exclude} * {{
  color: {link_color} !important;
}}

img, video, iframe, svg {{
  opacity: 0.9 !important;
}}

input{exclude}, textarea{exclude}, select{exclude} {{
  background-color: {input_bg} !important;
  color: {color} !important;
  border: 1px solid {color} !important;
}}

button{exclude} {{
  background-color: {button_bg} !important;
  color: {color} !important;
  border: 1px solid {color} !important;
}}

code{exclude}, pre{exclude} {{
  background-color: {code_bg} !important;
  color: {color} !important;
}}
"#
    )
}

/// Stylesheet for text formatting, scoped to the marked content container.
pub fn text_settings_css(settings: &TextSettings) -> String {
    let class = overlay::ENHANCED_CLASS;
    let font_family_rule = if settings.font_family == "default" {
        String::new()
    } else {
        format!("font-family: {} !important;", settings.font_family)
    };
    let heading_line_height = (settings.line_height - 0.2).max(1.2);
    let item_spacing = settings.paragraph_spacing / 2;
    let TextSettings {
        font_size,
        line_height,
        paragraph_spacing,
        ..
    } = settings;

    format!(
        r#".{class},
.{class} p,
.{class} li,
.{class} div,
.{class} span,
.{class} td,
.{class} th {{
  font-size: {font_size}px !important;
  line-height: {line_height} !important;
  {font_family_rule}
}}

.{class} p {{
  margin-bottom: {paragraph_spacing}px !important;
}}

.{class} h1,
.{class} h2,
.{class} h3,
.{class} h4,
.{class} h5,
.{class} h6 {{
  line-height: {heading_line_height:.1} !important;
  {font_family_rule}
}}

.{class} li {{
  margin-bottom: {item_spacing}px !important;
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn night() -> Theme {
        Theme::new("#0d1117", "#c9d1d9", "#58a6ff")
    }

    #[test]
    fn test_theme_css_excludes_every_overlay_id() {
        let css = theme_css(&night());
        for id in [
            overlay::AI_POPUP,
            overlay::AI_LOADER,
            overlay::AI_OVERLAY,
            overlay::PROGRESS,
            overlay::COMPLETE_TOAST,
        ] {
            assert!(css.contains(&format!(":not(#{id})")), "missing exclusion for {id}");
        }
    }

    #[test]
    fn test_theme_css_uses_brightened_backgrounds() {
        let css = theme_css(&night());
        assert!(css.contains(&adjust_brightness("#0d1117", 10)));
        assert!(css.contains(&adjust_brightness("#0d1117", 20)));
        assert!(css.contains("color: #58a6ff !important"));
    }

    #[test]
    fn test_text_settings_css_scopes_to_enhanced_class() {
        let settings = TextSettings {
            enabled: true,
            font_size: 20,
            line_height: 1.8,
            paragraph_spacing: 14,
            font_family: "Georgia, serif".to_string(),
        };
        let css = text_settings_css(&settings);
        assert!(css.contains(&format!(".{}", overlay::ENHANCED_CLASS)));
        assert!(css.contains("font-size: 20px !important"));
        assert!(css.contains("margin-bottom: 14px !important"));
        assert!(css.contains("margin-bottom: 7px !important"));
        assert!(css.contains("font-family: Georgia, serif !important"));
    }

    #[test]
    fn test_default_font_family_emits_no_rule() {
        let css = text_settings_css(&TextSettings::default());
        assert!(!css.contains("font-family"));
    }

    #[test]
    fn test_heading_line_height_floor() {
        let settings = TextSettings {
            line_height: 1.3,
            ..TextSettings::default()
        };
        let css = text_settings_css(&settings);
        assert!(css.contains("line-height: 1.2 !important"));
    }
}
