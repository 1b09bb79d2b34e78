use nom::{
    bytes::complete::is_not,
    character::complete::{char, digit1},
    combinator::{opt, recognize},
    sequence::pair,
};

use super::result::{IResult, ParseError, Span};
use crate::model::SampleValue;

/// Parses a float the way the exposition format spells them, i.e. with
/// `NaN`, `+Inf` and `-Inf` on top of the usual decimal notation.
pub fn parse_float(s: &str) -> Option<f64> {
    match s {
        "NaN" => Some(f64::NAN),
        "+Inf" | "Inf" => Some(f64::INFINITY),
        "-Inf" => Some(f64::NEG_INFINITY),
        _ => s.parse::<f64>().ok(),
    }
}

pub(super) fn sample_value(input: Span) -> IResult<SampleValue> {
    let (rest, token) = is_not(" \t")(input)?;
    match parse_float(token.fragment()) {
        Some(v) => Ok((rest, v)),
        None => Err(nom::Err::Failure(ParseError::partial(
            "sample", "a number", token,
        ))),
    }
}

pub(super) fn timestamp(input: Span) -> IResult<i64> {
    let (rest, token) = recognize(pair(opt(char('-')), digit1))(input)?;
    match token.fragment().parse::<i64>() {
        Ok(ts) => Ok((rest, ts)),
        Err(_) => Err(nom::Err::Failure(ParseError::partial(
            "sample", "a millisecond timestamp", token,
        ))),
    }
}
