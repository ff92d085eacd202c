// SPDX-License-Identifier: MIT
//
// tint-color: perceptual color math for the tint token engine.
//
// Everything above this crate (ramps, validation, exporters) speaks in
// hex strings because that is what token files store. Everything inside
// this crate speaks OKLCH, because that is where equal numeric steps look
// like equal visual steps. The `hex` module is the bridge: a string-level
// API that never fails, substituting a documented fallback when a user is
// halfway through typing a color.
//
//   "#3b82f6" ──parse──▶ Color (OKLCH) ──brighten/darken/mix──▶ to_gamut ──▶ "#rrggbb"
//                              │
//                              └──▶ contrast (WCAG 2.x, sRGB relative luminance)

pub mod color;
pub mod contrast;
pub mod hex;

pub use color::Color;
pub use contrast::{contrast_ratio, ensure_readability, relative_luminance};
