use nom::{
    bytes::complete::take_while,
    character::complete::{char as nom_char, satisfy, space0},
    combinator::recognize,
    sequence::{delimited, pair, preceded},
};

use super::result::{IResult, ParseError, Span};

fn is_label_head(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_label_tail(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn identifier<'a>(
    input: Span<'a>,
    head: fn(char) -> bool,
    tail: fn(char) -> bool,
) -> IResult<'a, String> {
    let (rest, m) = recognize(pair(
        satisfy::<_, _, ParseError<'a>>(head),
        take_while(tail),
    ))(input)?;
    Ok((rest, m.fragment().to_string()))
}

pub fn label_identifier(input: Span) -> IResult<String> {
    // [a-zA-Z_][a-zA-Z0-9_]*
    identifier(input, is_label_head, is_label_tail)
}

pub fn metric_identifier(input: Span) -> IResult<String> {
    // [a-zA-Z_:][a-zA-Z0-9_:]*
    identifier(
        input,
        |c| is_label_head(c) || c == ':',
        |c| is_label_tail(c) || c == ':',
    )
}

/// `{` [element (`,` element)* [`,`]] `}`, blanks allowed around elements.
///
/// Once the opening brace is consumed, anything that does not fit is a
/// `Failure` and stops the alternatives of enclosing parsers.
pub fn braced_list<'a, F, O>(
    mut element: F,
    wherein: &'static str,
    expected: &'static str,
) -> impl FnMut(Span<'a>) -> IResult<'a, Vec<O>>
where
    F: FnMut(Span<'a>) -> IResult<'a, O>,
{
    move |input: Span<'a>| {
        let (mut rest, _) = nom_char::<_, ParseError<'a>>('{')(input)?;
        let mut elements = Vec::new();

        loop {
            let (r, _) = space0::<_, ParseError<'a>>(rest)?;
            if let Ok((r, _)) = nom_char::<_, ParseError<'a>>('}')(r) {
                return Ok((r, elements));
            }

            let (r, elem) = match element(r) {
                Ok(parsed) => parsed,
                Err(nom::Err::Error(_)) => {
                    return Err(nom::Err::Failure(ParseError::partial(wherein, expected, r)))
                }
                Err(e) => return Err(e),
            };
            elements.push(elem);

            let (r, _) = space0::<_, ParseError<'a>>(r)?;
            rest = match nom_char::<_, ParseError<'a>>(',')(r) {
                Ok((r, _)) => r,
                Err(_) => match nom_char::<_, ParseError<'a>>('}')(r) {
                    Ok((r, _)) => return Ok((r, elements)),
                    Err(_) => {
                        return Err(nom::Err::Failure(ParseError::partial(
                            wherein, "',' or '}'", r,
                        )))
                    }
                },
            };
        }
    }
}

// Exposition lines are single-line, so only blanks and tabs count as padding.
pub fn maybe_padded<'a, F, O>(f: F) -> impl FnMut(Span<'a>) -> IResult<'a, O>
where
    F: FnMut(Span<'a>) -> IResult<'a, O>,
{
    delimited(space0, f, space0)
}

pub fn maybe_lpadded<'a, F, O>(f: F) -> impl FnMut(Span<'a>) -> IResult<'a, O>
where
    F: FnMut(Span<'a>) -> IResult<'a, O>,
{
    preceded(space0, f)
}
