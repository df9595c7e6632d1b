//! Filter expression parsing.
//!
//! Parses the filter-function grammar the catalog (and custom `--expr`
//! input) is written in: `none`, or a whitespace-separated chain of
//! `function(argument)` calls:
//!
//! ```text
//! grayscale(100%)  sepia(60%)  invert(1)  brightness(150%)
//! contrast(200%)   saturate(0.5)  hue-rotate(90deg)  blur(5px)
//! ```
//!
//! Amounts are percentages or plain numbers, angles take `deg`/`grad`/
//! `rad`/`turn` units, blur radii take `px`. Negative amounts, unknown
//! functions, and malformed calls are explicit parse errors — an
//! expression either parses fully or is rejected.

use thiserror::Error;

/// One parsed filter function.
///
/// Amounts are normalized: percentages are already divided by 100, angles
/// are in degrees, blur radii in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterOp {
    Grayscale(f32),
    Sepia(f32),
    Invert(f32),
    Brightness(f32),
    Contrast(f32),
    Saturate(f32),
    HueRotate(f32),
    Blur(f32),
}

/// A parsed chain of filter operations, applied left to right.
///
/// The empty chain is the identity filter (`none`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterChain {
    ops: Vec<FilterOp>,
}

impl FilterChain {
    pub fn ops(&self) -> &[FilterOp] {
        &self.ops
    }

    /// True for `none` — nothing to apply.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("empty filter expression")]
    Empty,
    #[error("unknown filter function '{0}'")]
    UnknownFunction(String),
    #[error("malformed filter expression near '{0}'")]
    Malformed(String),
    #[error("invalid {kind} '{value}' for {function}()")]
    InvalidArgument {
        function: &'static str,
        kind: &'static str,
        value: String,
    },
}

/// Parse a filter expression into a [`FilterChain`].
pub fn parse(input: &str) -> Result<FilterChain, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    if trimmed.eq_ignore_ascii_case("none") {
        return Ok(FilterChain::default());
    }

    let mut ops = Vec::new();
    let mut rest = trimmed;
    while !rest.trim_start().is_empty() {
        let (op, remainder) = parse_function(rest.trim_start())?;
        ops.push(op);
        rest = remainder;
    }
    Ok(FilterChain { ops })
}

/// Parse one `name(argument)` call from the front of `input`, returning the
/// op and the unconsumed remainder.
fn parse_function(input: &str) -> Result<(FilterOp, &str), ParseError> {
    let open = input
        .find('(')
        .ok_or_else(|| ParseError::Malformed(snippet(input)))?;
    let close = input[open..]
        .find(')')
        .map(|i| open + i)
        .ok_or_else(|| ParseError::Malformed(snippet(input)))?;

    let name = input[..open].trim().to_ascii_lowercase();
    let arg = input[open + 1..close].trim();
    let remainder = &input[close + 1..];

    let op = match name.as_str() {
        "grayscale" => FilterOp::Grayscale(parse_amount("grayscale", arg)?),
        "sepia" => FilterOp::Sepia(parse_amount("sepia", arg)?),
        "invert" => FilterOp::Invert(parse_amount("invert", arg)?),
        "brightness" => FilterOp::Brightness(parse_amount("brightness", arg)?),
        "contrast" => FilterOp::Contrast(parse_amount("contrast", arg)?),
        "saturate" => FilterOp::Saturate(parse_amount("saturate", arg)?),
        "hue-rotate" => FilterOp::HueRotate(parse_angle("hue-rotate", arg)?),
        "blur" => FilterOp::Blur(parse_length("blur", arg)?),
        _ => return Err(ParseError::UnknownFunction(name)),
    };
    Ok((op, remainder))
}

/// First few characters of `input`, for error messages.
fn snippet(input: &str) -> String {
    input.chars().take(24).collect()
}

/// A percentage (`150%`) or plain number (`1.5`). Must be non-negative.
fn parse_amount(function: &'static str, arg: &str) -> Result<f32, ParseError> {
    let invalid = || ParseError::InvalidArgument {
        function,
        kind: "amount",
        value: arg.to_string(),
    };

    let value = if let Some(percent) = arg.strip_suffix('%') {
        percent.trim().parse::<f32>().map_err(|_| invalid())? / 100.0
    } else {
        arg.parse::<f32>().map_err(|_| invalid())?
    };
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

/// An angle with unit (`90deg`, `0.25turn`, `1.57rad`, `100grad`).
/// A bare `0` is allowed, matching how angles are commonly written.
fn parse_angle(function: &'static str, arg: &str) -> Result<f32, ParseError> {
    let invalid = || ParseError::InvalidArgument {
        function,
        kind: "angle",
        value: arg.to_string(),
    };

    let parse_num = |s: &str| s.trim().parse::<f32>().map_err(|_| invalid());

    let degrees = if let Some(v) = arg.strip_suffix("grad") {
        parse_num(v)? * 360.0 / 400.0
    } else if let Some(v) = arg.strip_suffix("deg") {
        parse_num(v)?
    } else if let Some(v) = arg.strip_suffix("rad") {
        parse_num(v)?.to_degrees()
    } else if let Some(v) = arg.strip_suffix("turn") {
        parse_num(v)? * 360.0
    } else if arg.trim() == "0" {
        0.0
    } else {
        return Err(invalid());
    };
    if !degrees.is_finite() {
        return Err(invalid());
    }
    Ok(degrees)
}

/// A pixel length (`5px`) or bare `0`. Must be non-negative.
fn parse_length(function: &'static str, arg: &str) -> Result<f32, ParseError> {
    let invalid = || ParseError::InvalidArgument {
        function,
        kind: "length",
        value: arg.to_string(),
    };

    let value = if let Some(v) = arg.strip_suffix("px") {
        v.trim().parse::<f32>().map_err(|_| invalid())?
    } else if arg.trim() == "0" {
        0.0
    } else {
        return Err(invalid());
    };
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value)
}
