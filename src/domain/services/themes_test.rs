use super::Themes;
use crate::domain::models::Theme;

#[test]
fn it_prefers_configured_theme() {
    assert_eq!(
        Themes::resolve("light", Some("15;0".to_string())),
        Theme::Light
    );
    assert_eq!(
        Themes::resolve("dark", Some("0;15".to_string())),
        Theme::Dark
    );
}

#[test]
fn it_falls_back_to_terminal_background() {
    assert_eq!(Themes::resolve("", Some("0;15".to_string())), Theme::Light);
    assert_eq!(
        Themes::resolve("", Some("0;default;7".to_string())),
        Theme::Light
    );
    assert_eq!(Themes::resolve("", Some("15;0".to_string())), Theme::Dark);
}

#[test]
fn it_defaults_to_dark() {
    assert_eq!(Themes::resolve("", None), Theme::Dark);
    assert_eq!(Themes::resolve("", Some("garbage".to_string())), Theme::Dark);
    assert_eq!(Themes::resolve("purple", None), Theme::Dark);
}

#[test]
fn it_has_distinct_palettes() {
    assert_ne!(
        Themes::palette(Theme::Light).background,
        Themes::palette(Theme::Dark).background
    );
}
