use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

/// How the rings are shown: flat sectors or planets around a sun.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    #[default]
    #[strum(to_string = "flat", serialize = "2d")]
    Flat,
    #[strum(to_string = "orbital", serialize = "3d")]
    Orbital,
}

impl Presentation {
    pub fn toggled(self) -> Self {
        match self {
            Self::Flat => Self::Orbital,
            Self::Orbital => Self::Flat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_deserialization() {
        let cases = vec![
            ("\"flat\"", Presentation::Flat),
            ("\"FLAT\"", Presentation::Flat),
            ("\"2d\"", Presentation::Flat),
            ("\"orbital\"", Presentation::Orbital),
            ("\"Orbital\"", Presentation::Orbital),
            ("\"3D\"", Presentation::Orbital),
        ];

        for (json, expected) in cases {
            let deserialized: Presentation = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn toggling_round_trips() {
        assert_eq!(Presentation::Flat.toggled(), Presentation::Orbital);
        assert_eq!(Presentation::Flat.toggled().toggled(), Presentation::Flat);
        assert_eq!(Presentation::Orbital.to_string(), "orbital");
    }
}
