use strum::EnumString;
use strum::EnumVariantNames;

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumString, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(&self) -> Theme {
        match self {
            Theme::Light => return Theme::Dark,
            Theme::Dark => return Theme::Light,
        }
    }
}
