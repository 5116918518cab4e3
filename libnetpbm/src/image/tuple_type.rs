use std::str::FromStr;

use itertools::Itertools;

use super::component::Component;

/// PAM `TUPLTYPE` tokens with a fixed, known channel layout.
///
/// The `GRAYSCALE` entries precede the `BLACKANDWHITE` ones so that a reverse lookup
/// of `[White]` encodes as `GRAYSCALE`; both names decode to the same layout. `CMYK`
/// is a GhostScript-compatible extension, the remaining CMYK variants follow suit.
const KNOWN_TUPLE_TYPES: &[(&str, &[Component])] = &[
    ("GRAYSCALE", &[Component::White]),
    ("GRAYSCALE_ALPHA", &[Component::White, Component::Alpha]),
    ("BLACKANDWHITE", &[Component::White]),
    ("BLACKANDWHITE_ALPHA", &[Component::White, Component::Alpha]),
    ("RGB", &[Component::Red, Component::Green, Component::Blue]),
    (
        "RGB_ALPHA",
        &[
            Component::Red,
            Component::Green,
            Component::Blue,
            Component::Alpha,
        ],
    ),
    (
        "CMYK",
        &[
            Component::Cyan,
            Component::Magenta,
            Component::Yellow,
            Component::Black,
        ],
    ),
    (
        "CMYK_ALPHA",
        &[
            Component::Cyan,
            Component::Magenta,
            Component::Yellow,
            Component::Black,
            Component::Alpha,
        ],
    ),
    (
        "CMYKOG",
        &[
            Component::Cyan,
            Component::Magenta,
            Component::Yellow,
            Component::Black,
            Component::Orange,
            Component::SubtractiveGreen,
        ],
    ),
    (
        "CMYKOG_ALPHA",
        &[
            Component::Cyan,
            Component::Magenta,
            Component::Yellow,
            Component::Black,
            Component::Orange,
            Component::SubtractiveGreen,
            Component::Alpha,
        ],
    ),
    (
        "CMYKcm",
        &[
            Component::Cyan,
            Component::Magenta,
            Component::Yellow,
            Component::Black,
            Component::LightCyan,
            Component::LightMagenta,
        ],
    ),
    (
        "CMYKcm_ALPHA",
        &[
            Component::Cyan,
            Component::Magenta,
            Component::Yellow,
            Component::Black,
            Component::LightCyan,
            Component::LightMagenta,
            Component::Alpha,
        ],
    ),
];

/// Decodes a `TUPLTYPE` string into its channel layout.
///
/// Known tokens map to their fixed layout; anything else is split on `_` and decoded
/// color-by-color, with unrecognized pieces becoming [`Component::Unknown`].
pub(crate) fn decode_tuple_type(tuple_type: &str) -> Vec<Component> {
    if let Some((_, components)) = KNOWN_TUPLE_TYPES
        .iter()
        .find(|(name, _)| *name == tuple_type)
    {
        return components.to_vec();
    }
    tuple_type
        .split('_')
        .map(|piece| Component::from_str(piece).unwrap_or(Component::Unknown))
        .collect()
}

/// Encodes a channel layout as a `TUPLTYPE` string.
///
/// The first known layout that matches wins; unrecognized combinations are
/// synthesized by joining the color tokens with `_`.
pub(crate) fn encode_tuple_type(components: &[Component]) -> String {
    if let Some((name, _)) = KNOWN_TUPLE_TYPES
        .iter()
        .find(|(_, layout)| *layout == components)
    {
        return (*name).to_owned();
    }
    components.iter().join("_")
}
