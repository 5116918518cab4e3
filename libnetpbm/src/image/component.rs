use strum::{Display, EnumString};

/// What a single numeric slot of a pixel means.
///
/// Carries no value; the uppercase serialized names double as the color tokens of
/// synthesized PAM `TUPLTYPE` strings (e.g. `LIGHTCYAN`).
#[derive(Display, EnumString, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Component {
    /// A component whose meaning could not be determined
    Unknown,
    /// Additive grayscale: the lowest value is black, the highest is white
    White,
    /// Subtractive grayscale (ink coverage), or the K plane of a CMYK image:
    /// the lowest value is blank, the highest is full black
    Black,
    /// The red component of an RGB image
    Red,
    /// The green component of an RGB image
    Green,
    /// The blue component of an RGB image
    Blue,
    /// The cyan component of a CMY or CMYK image
    Cyan,
    /// The magenta component of a CMY or CMYK image
    Magenta,
    /// The yellow component of a CMY or CMYK image
    Yellow,
    /// The alpha (opacity) component of an image with transparency
    Alpha,
    /// The orange ink of a CMYKOG (Hexachrome-style) image
    Orange,
    /// The green ink of a CMYKOG image (distinct from additive [`Component::Green`])
    SubtractiveGreen,
    /// The light-cyan ink of a CMYKcm (six-color photo printer) image
    LightCyan,
    /// The light-magenta ink of a CMYKcm image
    LightMagenta,
}
