use nom::{character::complete::char, InputTake};

use super::result::{IResult, ParseError, Span};

// Double-quoted label value. Understands the \\, \" and \n escapes; any other
// escaped character is kept as is, backslash included.
pub fn string_literal(input: Span) -> IResult<String> {
    let (rest, _) = char('"')(input)?;

    let mut value = String::new();
    let mut escaped = false;
    for (pos, c) in rest.fragment().char_indices() {
        if escaped {
            match c {
                'n' => value.push('\n'),
                '\\' | '"' => value.push(c),
                _ => {
                    value.push('\\');
                    value.push(c);
                }
            }
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            let (rest, _) = rest.take_split(pos + 1);
            return Ok((rest, value));
        } else {
            value.push(c);
        }
    }

    Err(nom::Err::Failure(ParseError::partial(
        "label value",
        "closing quote",
        rest.take_split(rest.fragment().len()).0,
    )))
}

pub fn unescape_help(text: &str) -> String {
    let mut help = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            help.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => help.push('\n'),
            Some('\\') => help.push('\\'),
            Some(other) => {
                help.push('\\');
                help.push(other);
            }
            None => help.push('\\'),
        }
    }
    help
}
