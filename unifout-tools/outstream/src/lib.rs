//! Color-gradient text for ANSI terminals.
//!
//! Colors are parsed from `#rrggbb` strings and turned into 24-bit
//! foreground escapes by [`AnsiEncoder`], whose `rgb_to_ansi` entry point is
//! overloaded on three channel integers or a single tuple.
//!
//! ```
//! use unifout_outstream::{gradient_text, hex_to_rgb, AnsiEncoder};
//!
//! let encoder = AnsiEncoder::new().unwrap();
//! let out = gradient_text(&encoder, "ab", hex_to_rgb("#000000"), Some(hex_to_rgb("#ff0000")), 0)
//!     .unwrap();
//! assert_eq!(out, "\x1b[38;2;0;0;0ma\x1b[38;2;127;0;0mb\x1b[0m");
//! ```

pub mod color;
pub mod config;
pub mod gradient;

use thiserror::Error;
use unifout_overload::DispatchError;

pub use color::{hex_to_rgb, AnsiEncoder, Rgb};
pub use config::Config;
pub use gradient::{gradient_text, write_color, RESET};

/// Errors produced while encoding colors.
#[derive(Debug, Error)]
pub enum OutstreamError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("color tuple needs three channels, got {0}")]
    ShortTuple(usize),
}

/// Result type for outstream operations.
pub type OutstreamResult<T> = Result<T, OutstreamError>;
