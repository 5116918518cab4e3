//! Normalization of channel order and grayscale polarity.
//!
//! Netpbm's dialects disagree about what "gray" means: PGM and PAM `GRAYSCALE` are
//! additive (0 is black), while PBM bitmaps and the K plane of CMYK are subtractive
//! (0 is blank). Canonicalization reconciles the two and settles recognized channel
//! sets into one fixed order, so downstream code can address channels by meaning
//! without caring which dialect an image came from.

use strum::{Display, EnumString};
use tracing::debug;

use crate::{
    image::{Component, Image},
    sample::Sample,
};

/// How grayscale polarity should be converted during canonicalization.
#[derive(Display, EnumString, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum GrayscaleConversion {
    /// Grayscale channels remain untouched
    #[default]
    None,
    /// Additive ([`Component::White`]) channels become subtractive
    /// ([`Component::Black`]); useful when transcoding toward PBM
    WhiteToBlack,
    /// Subtractive ([`Component::Black`]) channels become additive
    /// ([`Component::White`]); useful when transcoding PBM toward PGM or PAM
    BlackToWhite,
}

impl GrayscaleConversion {
    const fn direction(self) -> Option<(Component, Component)> {
        match self {
            Self::None => None,
            Self::WhiteToBlack => Some((Component::White, Component::Black)),
            Self::BlackToWhite => Some((Component::Black, Component::White)),
        }
    }
}

/// Channel sets with a canonical order, matched as multisets.
const CANONICAL_ORDERS: &[&[Component]] = &[
    &[Component::Red, Component::Green, Component::Blue],
    &[
        Component::Red,
        Component::Green,
        Component::Blue,
        Component::Alpha,
    ],
    &[Component::White, Component::Alpha],
    &[Component::Black, Component::Alpha],
    &[
        Component::Cyan,
        Component::Magenta,
        Component::Yellow,
        Component::Black,
    ],
    &[
        Component::Cyan,
        Component::Magenta,
        Component::Yellow,
        Component::Black,
        Component::Alpha,
    ],
];

/// For each slot of `order`, the index of a still-unassigned matching channel in
/// `current`. `None` unless the two are equal as multisets.
fn permutation_to(current: &[Component], order: &[Component]) -> Option<Vec<usize>> {
    if current.len() != order.len() {
        return None;
    }
    let mut used = vec![false; current.len()];
    let mut mapping = Vec::with_capacity(order.len());
    for &wanted in order {
        let index = (0..current.len()).find(|&i| !used[i] && current[i] == wanted)?;
        used[index] = true;
        mapping.push(index);
    }
    Some(mapping)
}

/// Normalizes an image's grayscale polarity and channel order.
///
/// Step 1: if `conversion` names a direction and the image has channels of the
/// source polarity, every value in those channels is replaced by
/// `max_value - value` and the channel is retagged to the opposite polarity.
///
/// Step 2: if the resulting channel set equals one of the recognized sets (as a
/// multiset), channels and pixel values are permuted into that set's canonical
/// order. Images whose channels are already canonical, or not recognized at all,
/// pass through with their row data untouched.
///
/// The transformation is pure: it consumes its input and returns a new image, and
/// the header's `image_type` is carried over unchanged.
#[must_use]
pub fn canonicalize<S: Sample>(image: Image<S>, conversion: GrayscaleConversion) -> Image<S> {
    let (header, mut rows) = image.into_parts();
    let mut components = header.components().to_vec();
    let stride = components.len();

    if let Some((from, to)) = conversion.direction() {
        let flip: Vec<bool> = components.iter().map(|&c| c == from).collect();
        if flip.contains(&true) {
            debug!("converting {from} channel(s) to {to}");
            let max = header.max_value().clone();
            for row in &mut rows {
                for (i, value) in row.iter_mut().enumerate() {
                    if flip[i % stride] {
                        *value = value.invert(&max);
                    }
                }
            }
            for component in &mut components {
                if *component == from {
                    *component = to;
                }
            }
        }
    }

    let matched = CANONICAL_ORDERS
        .iter()
        .find_map(|order| permutation_to(&components, order).map(|mapping| (*order, mapping)));
    if let Some((order, mapping)) = matched {
        let identity = mapping.iter().enumerate().all(|(slot, &source)| slot == source);
        if !identity {
            debug!("reordering channels {components:?} to {order:?}");
            rows = rows
                .into_iter()
                .map(|row| {
                    let mut permuted = Vec::with_capacity(row.len());
                    for pixel in row.chunks(stride) {
                        for &source in &mapping {
                            permuted.push(pixel[source].clone());
                        }
                    }
                    permuted
                })
                .collect();
            components = order.to_vec();
        }
    }

    Image::from_parts_unchecked(header.with_components(components), rows)
}
