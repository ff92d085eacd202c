//! # tint-tokens: the design-token engine
//!
//! Turns a handful of seed values into a complete, dual-mode token
//! system, checks it, and writes it out in five formats.
//!
//! # Architecture
//!
//! ```text
//! seeds (brand hexes, neutral base, spacing unit, radius, font size)
//!     │
//!     ▼
//! scale.rs:     neutral ramp, spacing, radius, type scale (pure)
//!     │
//!     ▼
//! model.rs:     TokenSystem (every color is a light/dark pair)
//!     │         ▲
//!     │         └── defaults.rs / presets.rs: complete starting points
//!     │         └── editor.rs: TokenEditor, the mutation API
//!     ▼
//! validate.rs:  WCAG contrast checks ──▶ review.rs: structural checks + score
//!     │
//!     ▼
//! formats/:     CSS · Tailwind · TS theme · W3C JSON · Figma variables
//! ```
//!
//! # Color Space
//!
//! Ramps and contrast fixes are computed in OKLCH via `tint-color`; the
//! model itself stores plain `#rrggbb` strings so it serializes as-is.
//! Malformed hex never panics: generators fall back, validators skip or
//! report.

// Exporters build deeply nested JSON literals in one expression.
#![allow(clippy::too_many_lines)]

pub mod defaults;
pub mod editor;
pub mod formats;
pub mod model;
pub mod presets;
pub mod review;
pub mod scale;
pub mod validate;

pub use defaults::default_tokens;
pub use editor::{ColorPatch, TokenEditor};
pub use formats::ExportFormat;
pub use model::{ColorToken, ColorValue, Mode, SurfaceRole, TokenSystem};
pub use presets::{Preset, preset, preset_ids};
pub use review::{ThemeReview, review_theme};
pub use validate::{IssueCategory, Severity, ValidationIssue, validate_all_contrasts};
