pub(crate) use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_till, take_until, take_while, take_while1},
    character::complete::{char, line_ending, multispace0, multispace1},
    combinator::{cut, map, opt},
    error::{make_error, Error, ErrorKind},
    multi::{many0, separated_list1},
    number::complete::recognize_float,
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
    IResult,
};

pub(crate) type ParserResult<'a, T> = IResult<&'a str, T>;

pub(crate) fn parse_error<T>(s: &str, kind: ErrorKind) -> ParserResult<'_, T> {
    let err: Error<&str> = make_error(s, kind);
    Err(nom::Err::Error(err))
}
