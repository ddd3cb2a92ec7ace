#![forbid(unsafe_code)]

//! Tokenizing and value parsing shared by both parsers.

use std::num::IntErrorKind;

use flexgrid_layout::{Alignment, BorderSide, HideMode, SizeConstraint};

use crate::error::{ConstraintParseError, Result};

/// Unit suffixes a number may carry.
const NUMBER_SUFFIXES: [&str; 4] = ["px", "pt", "%", "!"];

/// Split on `delimiter`, trim each piece and drop empty pieces.
pub(crate) fn split_trimmed(text: &str, delimiter: char) -> Vec<&str> {
    text.split(delimiter)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Comma-separated directives, each split into whitespace-separated words.
pub(crate) fn directives(text: &str) -> impl Iterator<Item = Vec<&str>> {
    split_trimmed(text, ',')
        .into_iter()
        .map(|token| token.split_whitespace().collect::<Vec<_>>())
        .filter(|words| !words.is_empty())
}

/// Parse a float, allowing one trailing `px`, `pt`, `%` or `!`.
pub(crate) fn parse_float(text: &str) -> Result<f32> {
    if text.is_empty() {
        return Err(ConstraintParseError::new(
            "Empty value where number expected",
        ));
    }
    let number = NUMBER_SUFFIXES
        .iter()
        .find_map(|suffix| text.strip_suffix(suffix))
        .unwrap_or(text);
    let value: f32 = number.parse().map_err(|_| {
        ConstraintParseError::new(format!("Invalid number format: '{text}'"))
    })?;
    let spelled_infinite = number
        .trim_start_matches(['+', '-'])
        .to_ascii_lowercase()
        .starts_with("inf");
    if value.is_infinite() && !spelled_infinite {
        return Err(ConstraintParseError::new(format!(
            "Number out of range: '{text}'"
        )));
    }
    Ok(value)
}

/// Parse an integer that must span the whole text.
pub(crate) fn parse_int(text: &str) -> Result<i32> {
    if text.is_empty() {
        return Err(ConstraintParseError::new(
            "Empty value where integer expected",
        ));
    }
    text.parse::<i32>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ConstraintParseError::new(format!("Integer out of range: '{text}'"))
        }
        _ => ConstraintParseError::new(format!("Invalid integer format: '{text}'")),
    })
}

/// Negative counts become zero.
pub(crate) fn count(value: i32) -> usize {
    usize::try_from(value).unwrap_or(0)
}

/// Size directive: `pref`, `N%`, `min:pref[:max]`, `N!` or bare `N`.
pub(crate) fn parse_size_constraint(text: &str) -> Result<SizeConstraint> {
    let s = text.to_ascii_lowercase();
    if s.is_empty() || s == "pref" {
        return Ok(SizeConstraint::content());
    }

    if let Some(idx) = s.find('%') {
        return Ok(SizeConstraint::percentage(parse_float(&s[..idx])?));
    }

    if s.contains(':') {
        match split_trimmed(&s, ':').as_slice() {
            [min, preferred, max, ..] => {
                return Ok(SizeConstraint::range(
                    parse_float(min)?,
                    parse_float(preferred)?,
                    parse_float(max)?,
                ));
            }
            [min, preferred] => {
                return Ok(SizeConstraint::range(
                    parse_float(min)?,
                    parse_float(preferred)?,
                    f32::INFINITY,
                ));
            }
            _ => {}
        }
    }

    let fixed = s.contains('!');
    let mut number = s.replace('!', "");
    if let Some(idx) = number.find("px").or_else(|| number.find("pt")) {
        number.truncate(idx);
    }
    let value = parse_float(&number)?;
    Ok(if fixed {
        SizeConstraint::fixed(value)
    } else {
        SizeConstraint::range(0.0, value, f32::INFINITY)
    })
}

/// Alignment word. Unknown words mean center.
pub(crate) fn parse_alignment(text: &str) -> Alignment {
    match text.to_ascii_lowercase().as_str() {
        "start" | "left" | "top" | "leading" => Alignment::Start,
        "end" | "right" | "bottom" | "trailing" => Alignment::End,
        "fill" | "stretch" => Alignment::Fill,
        "baseline" => Alignment::Baseline,
        _ => Alignment::Center,
    }
}

/// Docking side. Unknown words mean no docking.
pub(crate) fn parse_border_side(text: &str) -> BorderSide {
    match text.to_ascii_lowercase().as_str() {
        "north" | "top" => BorderSide::Top,
        "south" | "bottom" => BorderSide::Bottom,
        "west" | "left" => BorderSide::Left,
        "east" | "right" => BorderSide::Right,
        _ => BorderSide::None,
    }
}

/// Hide mode code, `0` or `3`.
pub(crate) fn parse_hide_mode(text: &str) -> Result<HideMode> {
    let code = parse_int(text)?;
    HideMode::from_code(i64::from(code)).ok_or_else(|| {
        ConstraintParseError::new(format!(
            "Invalid hide mode: '{text}'. Valid values are 0 or 3"
        ))
    })
}
