//! Hex parsing and escape encoding.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;
use unifout_overload::{BoundArgs, CallArgs, DispatchTable, Param, TypeTag, Value};

use crate::{OutstreamError, OutstreamResult};

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// The channels as dispatchable integers.
    pub fn channels(self) -> [Value; 3] {
        [
            Value::from(i64::from(self.red)),
            Value::from(i64::from(self.green)),
            Value::from(i64::from(self.blue)),
        ]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Parses `#rrggbb`. Anything else is black.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    parse_hex(hex).unwrap_or_else(|| {
        trace!("`{}` is not a #rrggbb color, using black", hex);
        Rgb::BLACK
    })
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

fn escape(red: &Value, green: &Value, blue: &Value) -> String {
    format!("\x1b[38;2;{};{};{}m", red, green, blue)
}

fn from_channels(args: &BoundArgs<'_, Value>) -> OutstreamResult<String> {
    Ok(escape(&args[0], &args[1], &args[2]))
}

fn from_tuple(args: &BoundArgs<'_, Value>) -> OutstreamResult<String> {
    let items = args[0].as_tuple().unwrap_or_default();
    match items {
        [red, green, blue, ..] => Ok(escape(red, green, blue)),
        _ => Err(OutstreamError::ShortTuple(items.len())),
    }
}

/// Encodes colors as 24-bit foreground escapes.
///
/// `rgb_to_ansi` accepts either `(red: int, green: int, blue: int)` or a
/// single `(rgb: tuple)`.
#[derive(Debug)]
pub struct AnsiEncoder {
    table: DispatchTable<Value, OutstreamResult<String>>,
}

impl AnsiEncoder {
    pub const ENTRY: &'static str = "rgb_to_ansi";

    pub fn new() -> OutstreamResult<Self> {
        let mut table = DispatchTable::new();
        table.register(
            Self::ENTRY,
            vec![
                Param::new("red", TypeTag::INT),
                Param::new("green", TypeTag::INT),
                Param::new("blue", TypeTag::INT),
            ],
            from_channels,
        )?;
        table.register(
            Self::ENTRY,
            vec![Param::new("rgb", TypeTag::TUPLE)],
            from_tuple,
        )?;
        Ok(Self { table })
    }

    /// Dispatches `rgb_to_ansi` on arbitrary arguments.
    pub fn rgb_to_ansi(&self, args: &CallArgs<Value>) -> OutstreamResult<String> {
        self.table.invoke(Self::ENTRY, args)?
    }

    /// Encodes through the three-channel overload.
    pub fn encode(&self, color: Rgb) -> OutstreamResult<String> {
        self.table.call(Self::ENTRY, color.channels().into())?
    }

    /// Encodes through the tuple overload.
    pub fn encode_tuple(&self, color: Rgb) -> OutstreamResult<String> {
        let tuple = Value::from(color.channels().to_vec());
        self.table.call(Self::ENTRY, vec![tuple])?
    }
}
