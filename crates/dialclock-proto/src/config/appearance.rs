use hex_color::HexColor;
use iced::{Color, theme::Palette};
use serde::{Deserialize, Deserializer, de::Error as _};

/// Color entry accepted by the appearance section.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum AppearanceColor {
    /// Simple color variant with a single hex value.
    Simple(HexColor),
    /// Base color with an explicit text color drawn on top of it.
    Complete {
        base: HexColor,
        text: Option<HexColor>,
    },
}

impl AppearanceColor {
    /// Returns the base [`Color`] representation.
    #[must_use]
    pub fn get_base(&self) -> Color {
        match self {
            AppearanceColor::Simple(color) => to_color(*color),
            AppearanceColor::Complete { base, .. } => to_color(*base),
        }
    }

    /// Returns the text [`Color`] if configured.
    #[must_use]
    pub fn get_text(&self) -> Option<Color> {
        match self {
            AppearanceColor::Simple(_) => None,
            AppearanceColor::Complete { text, .. } => text.map(to_color),
        }
    }
}

fn to_color(color: HexColor) -> Color {
    Color::from_rgb8(color.r, color.g, color.b)
}

/// How the widget decides whether animations are suppressed.
#[derive(Deserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MotionPreference {
    /// Follow the desktop setting when one is available.
    #[default]
    Auto,
    /// Always snap hands and skip fades.
    Reduce,
    /// Always animate.
    Full,
}

impl MotionPreference {
    /// Resolves the preference against the desktop signal, if any.
    #[must_use]
    pub fn prefers_reduced(self, system: Option<bool>) -> bool {
        match self {
            Self::Auto => system.unwrap_or(false),
            Self::Reduce => true,
            Self::Full => false,
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Appearance {
    #[serde(default)]
    pub font_name:         Option<String>,
    #[serde(
        deserialize_with = "scale_factor_deserializer",
        default = "default_scale_factor"
    )]
    pub scale_factor:      f64,
    #[serde(default)]
    pub reduced_motion:    MotionPreference,
    #[serde(default = "default_background_color")]
    pub background_color:  AppearanceColor,
    #[serde(default = "default_face_color")]
    pub face_color:        AppearanceColor,
    #[serde(default = "default_text_color")]
    pub text_color:        AppearanceColor,
    #[serde(default = "default_accent_color")]
    pub accent_color:      AppearanceColor,
    #[serde(default = "default_hand_color")]
    pub hand_color:        AppearanceColor,
    #[serde(default = "default_second_hand_color")]
    pub second_hand_color: AppearanceColor,
}

impl Appearance {
    /// Palette used to build the application theme.
    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette {
            background: self.background_color.get_base(),
            text:       self.text_color.get_base(),
            primary:    self.accent_color.get_base(),
            success:    self.accent_color.get_base(),
            danger:     self.second_hand_color.get_base(),
        }
    }
}

static ACCENT: HexColor = HexColor::rgb(250, 179, 135);

fn scale_factor_deserializer<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;

    if value <= 0.0 {
        return Err(D::Error::custom("Scale factor must be greater than 0.0"));
    }

    if value > 4.0 {
        return Err(D::Error::custom("Scale factor cannot be greater than 4.0"));
    }

    Ok(value)
}

fn default_scale_factor() -> f64 {
    1.0
}

fn default_background_color() -> AppearanceColor {
    AppearanceColor::Simple(HexColor::rgb(30, 30, 46))
}

fn default_face_color() -> AppearanceColor {
    AppearanceColor::Complete {
        base: HexColor::rgb(49, 50, 68),
        text: Some(HexColor::rgb(205, 214, 244)),
    }
}

fn default_text_color() -> AppearanceColor {
    AppearanceColor::Simple(HexColor::rgb(205, 214, 244))
}

fn default_accent_color() -> AppearanceColor {
    AppearanceColor::Simple(ACCENT)
}

fn default_hand_color() -> AppearanceColor {
    AppearanceColor::Simple(HexColor::rgb(205, 214, 244))
}

fn default_second_hand_color() -> AppearanceColor {
    AppearanceColor::Simple(HexColor::rgb(243, 139, 168))
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            font_name:         None,
            scale_factor:      default_scale_factor(),
            reduced_motion:    MotionPreference::default(),
            background_color:  default_background_color(),
            face_color:        default_face_color(),
            text_color:        default_text_color(),
            accent_color:      default_accent_color(),
            hand_color:        default_hand_color(),
            second_hand_color: default_second_hand_color(),
        }
    }
}
