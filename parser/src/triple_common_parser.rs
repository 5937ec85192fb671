use std::borrow::Cow;

use crate::prelude::*;

pub const BASE_TURTLE: &str = "@base";
pub const BASE_SPARQL: &str = "BASE";
pub const PREFIX_TURTLE: &str = "@prefix";
pub const PREFIX_SPARQL: &str = "PREFIX";

#[derive(PartialEq, Debug, Clone)]
pub enum Iri<'a> {
    Enclosed(&'a str),
    Prefixed {
        prefix: &'a str,
        local_name: &'a str,
    },
}
/// Numeric shorthand literals keep their lexical form.
#[derive(PartialEq, Debug, Clone)]
pub enum Literal<'a> {
    Quoted {
        datatype: Option<Iri<'a>>,
        value: Cow<'a, str>,
        lang: Option<&'a str>,
    },
    Double(&'a str),
    Decimal(&'a str),
    Integer(&'a str),
    Boolean(bool),
}
#[derive(PartialEq, Debug, Clone)]
pub enum BlankNode<'a> {
    Labeled(&'a str),
    Unlabeled,
}

/// Longest run of `allowed` characters, dots included, minus trailing dots.
pub(crate) fn dotted_name<F>(s: &str, allowed: F) -> ParserResult<&str>
where
    F: Fn(char) -> bool,
{
    let (_, candidate) = take_while(|c: char| allowed(c) || c == '.')(s)?;
    let name = candidate.trim_end_matches('.');
    Ok((&s[name.len()..], name))
}

pub(crate) mod iri {
    use crate::grammar::{is_pn_local_char, is_pn_prefix_char};
    use crate::prelude::*;
    use crate::triple_common_parser::{dotted_name, Iri};

    pub(crate) fn pn_local(s: &str) -> ParserResult<&str> {
        dotted_name(s, is_pn_local_char)
    }
    pub(crate) fn prefixed_iri(s: &str) -> ParserResult<Iri> {
        let prefixed = map(
            separated_pair(take_while(is_pn_prefix_char), tag(":"), pn_local),
            |(prefix, local_name)| Iri::Prefixed { prefix, local_name },
        );
        preceded(multispace0, prefixed)(s)
    }
    pub(crate) fn iri(s: &str) -> ParserResult<Iri> {
        delimited(multispace0, alt((enclosed_iri, prefixed_iri)), multispace0)(s)
    }
    pub(crate) fn enclosed_iri(s: &str) -> ParserResult<Iri> {
        let enclosed = map(
            delimited(char('<'), take_while(|s: char| s != '>'), char('>')),
            Iri::Enclosed,
        );

        preceded(multispace0, enclosed)(s)
    }
}

pub(crate) mod prologue {
    use super::iri::enclosed_iri;
    use crate::prelude::*;
    use crate::triple_common_parser::{
        Iri, BASE_SPARQL, BASE_TURTLE, PREFIX_SPARQL, PREFIX_TURTLE,
    };

    pub(crate) fn base_sparql(s: &str) -> ParserResult<Iri> {
        base(BASE_SPARQL, enclosed_iri)(s)
    }
    pub(crate) fn base_turtle(s: &str) -> ParserResult<Iri> {
        base(
            BASE_TURTLE,
            terminated(enclosed_iri, preceded(multispace0, char('.'))),
        )(s)
    }
    fn base<'a, F>(
        base_tag: &'static str,
        extract_base: F,
    ) -> impl FnMut(&'a str) -> ParserResult<'a, Iri<'a>>
    where
        F: FnMut(&'a str) -> ParserResult<'a, Iri<'a>>,
    {
        preceded(preceded(multispace0, tag_no_case(base_tag)), extract_base)
    }
    fn prefix<'a>(
        prefix_tag: &'static str,
    ) -> impl FnMut(&'a str) -> ParserResult<'a, (&'a str, Iri<'a>)> {
        preceded(
            preceded(multispace0, tag_no_case(prefix_tag)),
            separated_pair(
                preceded(multispace0, take_until(":")),
                tag(":"),
                enclosed_iri,
            ),
        )
    }
    pub(crate) fn prefix_turtle(s: &str) -> ParserResult<(&str, Iri<'_>)> {
        terminated(prefix(PREFIX_TURTLE), preceded(multispace0, char('.')))(s)
    }
    pub(crate) fn prefix_sparql(s: &str) -> ParserResult<(&str, Iri<'_>)> {
        prefix(PREFIX_SPARQL)(s)
    }
}
pub(crate) mod literal {
    use std::borrow::Cow;

    use crate::grammar::{
        is_lang_char, is_pn_local_char, DATATYPE_MARKER, LANGTAG, STRING_LITERAL_LONG_QUOTE,
        STRING_LITERAL_LONG_SINGLE_QUOTE, STRING_LITERAL_QUOTE, STRING_LITERAL_SINGLE_QUOTE,
    };
    use crate::prelude::*;
    use crate::shared::unescape_literal;
    use crate::triple_common_parser::iri::iri;
    use crate::triple_common_parser::Literal;

    fn ends_token(remaining: &str) -> bool {
        !remaining.starts_with(is_pn_local_char)
    }

    pub(crate) fn parse_boolean(s: &str) -> ParserResult<bool> {
        let (remaining, val) = alt((tag("true"), tag("false")))(s)?;
        if remaining.starts_with(is_pn_local_char) {
            return parse_error(s, ErrorKind::IsNot);
        }
        let boolean_value = val.parse::<bool>().map_err(|_err| {
            let err: Error<&str> = make_error(val, ErrorKind::IsNot);
            nom::Err::Error(err)
        })?;
        Ok((remaining, boolean_value))
    }

    pub(crate) fn parse_number(s: &str) -> ParserResult<Literal> {
        let (_, recognized) = recognize_float(s)?;
        // a trailing '.' terminates the statement, it is not a decimal point
        let num = recognized.strip_suffix('.').unwrap_or(recognized);
        let remaining = &s[num.len()..];
        if num.is_empty() || !num.contains(|c: char| c.is_ascii_digit()) || !ends_token(remaining)
        {
            return parse_error(s, ErrorKind::Float);
        }
        let literal = if num.contains(|c: char| c == 'e' || c == 'E') {
            Literal::Double(num)
        } else if num.contains('.') {
            Literal::Decimal(num)
        } else {
            Literal::Integer(num)
        };
        Ok((remaining, literal))
    }

    pub(crate) fn primitive_literal(s: &str) -> ParserResult<Literal> {
        let (no_white_space, _) = multispace0(s)?;

        if let Ok((remaining, boolean_value)) = parse_boolean(no_white_space) {
            Ok((remaining, Literal::Boolean(boolean_value)))
        } else if let Ok((remaining, number_value)) = parse_number(no_white_space) {
            Ok((remaining, number_value))
        } else {
            parse_error(no_white_space, ErrorKind::IsNot)
        }
    }

    fn long_string<'a>(
        quote: &'static str,
    ) -> impl FnMut(&'a str) -> ParserResult<'a, Cow<'a, str>> {
        map(
            delimited(tag(quote), take_until(quote), tag(quote)),
            unescape_literal,
        )
    }

    /// A single line string delimited by `quote`, honoring backslash escapes.
    pub(crate) fn quoted_string<'a>(
        quote: char,
    ) -> impl FnMut(&'a str) -> ParserResult<'a, Cow<'a, str>> {
        move |s: &'a str| {
            let (body, _) = char(quote)(s)?;
            let mut escaped = false;
            for (idx, c) in body.char_indices() {
                match c {
                    '\\' if !escaped => escaped = true,
                    c if c == quote && !escaped => {
                        return Ok((&body[idx + c.len_utf8()..], unescape_literal(&body[..idx])));
                    }
                    '\n' | '\r' if !escaped => break,
                    _ => escaped = false,
                }
            }
            parse_error(s, ErrorKind::Escaped)
        }
    }

    pub(crate) fn lang(s: &str) -> ParserResult<&str> {
        preceded(tag(LANGTAG), take_while1(is_lang_char))(s)
    }

    pub(crate) fn string_literal(s: &str) -> ParserResult<Literal> {
        let mut datatype = preceded(tag(DATATYPE_MARKER), iri);

        let (no_white_space, _) = multispace0(s)?;
        let (remaining, string_literal) = alt((
            long_string(STRING_LITERAL_LONG_QUOTE),
            long_string(STRING_LITERAL_LONG_SINGLE_QUOTE),
            quoted_string(STRING_LITERAL_QUOTE),
            quoted_string(STRING_LITERAL_SINGLE_QUOTE),
        ))(no_white_space)?;

        if let Ok((remaining, datatype)) = datatype(remaining) {
            Ok((
                remaining,
                Literal::Quoted {
                    datatype: Some(datatype),
                    value: string_literal,
                    lang: None,
                },
            ))
        } else if let Ok((remaining, lang)) = lang(remaining) {
            Ok((
                remaining,
                Literal::Quoted {
                    datatype: None,
                    value: string_literal,
                    lang: Some(lang),
                },
            ))
        } else {
            Ok((
                remaining,
                Literal::Quoted {
                    datatype: None,
                    value: string_literal,
                    lang: None,
                },
            ))
        }
    }

    pub(crate) fn literal(s: &str) -> ParserResult<Literal> {
        alt((string_literal, primitive_literal))(s)
    }
}
pub(crate) mod triple {
    use crate::grammar::BLANK_NODE_LABEL;
    use crate::prelude::*;
    use crate::shared::NS_TYPE;
    use crate::triple_common_parser::iri::pn_local;
    use crate::triple_common_parser::{comments, BlankNode, Iri};
    use std::collections::VecDeque;

    pub(crate) fn object_list<'a, F1, F2, T>(
        object_extractor: F1,
        mut map_list: F2,
    ) -> impl FnMut(&'a str) -> ParserResult<'a, T>
    where
        F1: FnMut(&'a str) -> ParserResult<'a, T> + Copy,
        F2: FnMut(Vec<T>) -> T,
    {
        move |s| {
            let (remaining, mut list) = separated_list1(
                delimited(multispace0, char(','), comments),
                object_extractor,
            )(s)?;
            if list.len() > 1 {
                Ok((remaining, map_list(list)))
            } else if let Some(single_value) = list.pop() {
                Ok((remaining, single_value))
            } else {
                parse_error(s, ErrorKind::LengthValue)
            }
        }
    }
    pub(crate) fn ns_type(s: &str) -> ParserResult<Iri> {
        preceded(
            multispace0,
            map(terminated(char('a'), multispace1), |_| Iri::Enclosed(NS_TYPE)),
        )(s)
    }
    pub(crate) fn predicate_list<'a, F1, F2, F3, F4, F5, T>(
        subject_extractor: F1,
        predicate_extractor: F2,
        object_list_extractor: F3,
        map_predicate_object: F4,
        map_statement: F5,
    ) -> impl FnMut(&'a str) -> ParserResult<'a, T>
    where
        F1: Fn(&'a str) -> ParserResult<'a, T>,
        F2: Fn(&'a str) -> ParserResult<'a, T> + Copy,
        F3: Fn(&'a str) -> ParserResult<'a, T> + Copy,
        F4: Fn((T, T)) -> T + Copy,
        F5: Fn(T, Vec<T>) -> T,
    {
        move |s| {
            let (remaining, subject) = subject_extractor(s)?;

            let (remaining, list) = preceded(
                multispace0,
                separated_list1(
                    delimited(multispace0, tag(";"), comments),
                    map(
                        pair(predicate_extractor, object_list_extractor),
                        map_predicate_object,
                    ),
                ),
            )(remaining)?;
            // a dangling ';' before the end of the statement is allowed
            let (remaining, _) = many0(preceded(multispace0, char(';')))(remaining)?;
            Ok((remaining, map_statement(subject, list)))
        }
    }
    pub(crate) fn collection<'a, T, F>(
        object_extractor: F,
    ) -> impl Fn(&'a str) -> ParserResult<'a, VecDeque<T>>
    where
        F: Fn(&'a str) -> ParserResult<'a, T> + Copy,
    {
        move |s| {
            let (remaining, _) = multispace0(s)?;
            let (remaining, res) = preceded(
                char('('),
                terminated(
                    many0(object_extractor),
                    preceded(multispace0, cut(char(')'))),
                ),
            )(remaining)?;
            Ok((remaining, VecDeque::from(res)))
        }
    }
    pub(crate) fn anon_bnode<'a, F, T>(anon_parser: F) -> impl Fn(&'a str) -> ParserResult<'a, T>
    where
        F: Fn(&'a str) -> ParserResult<'a, T> + Copy,
    {
        move |s| {
            let extract = preceded(
                char('['),
                terminated(anon_parser, preceded(multispace0, cut(char(']')))),
            );
            preceded(multispace0, extract)(s)
        }
    }
    pub(crate) fn labeled_bnode(s: &str) -> ParserResult<BlankNode> {
        let (remaining, _) = multispace0(s)?;
        let (remaining, label) = preceded(tag(BLANK_NODE_LABEL), pn_local)(remaining)?;
        if label.is_empty() || label.starts_with('-') || label.contains(':') {
            return parse_error(label, ErrorKind::IsNot);
        }
        Ok((remaining, BlankNode::Labeled(label)))
    }
}
pub(crate) fn comments(s: &str) -> ParserResult<Vec<&str>> {
    many0(delimited(
        multispace0,
        preceded(char('#'), take_till(|c| c == '\n' || c == '\r')),
        opt(line_ending),
    ))(s)
}

#[cfg(test)]
mod test {
    use super::iri::{iri, prefixed_iri};
    use super::literal::{literal, parse_number};
    use super::prologue::{base_sparql, base_turtle, prefix_sparql, prefix_turtle};
    use super::triple::labeled_bnode;
    use super::{BlankNode, Iri, Literal};
    use std::borrow::Cow;

    #[test]
    fn base_test() {
        let base_sparql_s = r#"
              BASE   <http://one.example/sparql>

        "#;
        let base_turtle_s = r#"

             @base    <http://one.example/turtle> .
        "#;

        let (_, base) = base_turtle(base_turtle_s).unwrap();
        assert_eq!(Iri::Enclosed("http://one.example/turtle"), base);

        let (_, base) = base_sparql(base_sparql_s).unwrap();
        assert_eq!(Iri::Enclosed("http://one.example/sparql"), base);
    }

    #[test]
    fn prefix_test() {
        let (_, prefix) = prefix_turtle("@prefix    p:    <http://two.example/turtle> .").unwrap();
        assert_eq!(("p", Iri::Enclosed("http://two.example/turtle")), prefix);
        let (_, prefix) = prefix_turtle("@prefix    :    <http://two.example/empty> .").unwrap();
        assert_eq!(("", Iri::Enclosed("http://two.example/empty")), prefix);
        let (_, prefix) = prefix_sparql("PREFIX p: <http://two.example/sparql>").unwrap();
        assert_eq!(("p", Iri::Enclosed("http://two.example/sparql")), prefix);
    }

    #[test]
    fn prefixed_iri_test() {
        assert_eq!(
            Ok((
                "",
                Iri::Prefixed {
                    prefix: "foaf",
                    local_name: "firstName",
                }
            )),
            prefixed_iri("foaf:firstName")
        );
        // the statement terminator does not belong to the local name
        assert_eq!(
            Ok((
                ".",
                Iri::Prefixed {
                    prefix: "ex",
                    local_name: "a.b",
                }
            )),
            prefixed_iri("ex:a.b.")
        );
        assert_eq!(
            Ok(("", Iri::Enclosed("http://example.org/#spiderman"))),
            iri(" <http://example.org/#spiderman> ")
        );
    }

    #[test]
    fn literal_test() {
        assert_eq!(
            Ok((
                " .",
                Literal::Quoted {
                    datatype: None,
                    value: Cow::Borrowed("Человек-паук"),
                    lang: Some("ru"),
                }
            )),
            literal(r#""Человек-паук"@ru ."#)
        );
        assert_eq!(
            Ok((
                "",
                Literal::Quoted {
                    datatype: Some(Iri::Prefixed {
                        prefix: "xsd",
                        local_name: "double",
                    }),
                    value: Cow::Borrowed("1.663E-4"),
                    lang: None,
                }
            )),
            literal(r#""1.663E-4"^^xsd:double"#)
        );
        let (_, escaped) = literal(r#""say \"hi\"" ."#).unwrap();
        assert_eq!(
            Literal::Quoted {
                datatype: None,
                value: Cow::Owned(r#"say "hi""#.to_string()),
                lang: None,
            },
            escaped
        );
        let (_, empty) = literal(r#""" ."#).unwrap();
        assert_eq!(
            Literal::Quoted {
                datatype: None,
                value: Cow::Borrowed(""),
                lang: None,
            },
            empty
        );
        let (_, long) = literal("'''multi\nline''' .").unwrap();
        assert_eq!(
            Literal::Quoted {
                datatype: None,
                value: Cow::Borrowed("multi\nline"),
                lang: None,
            },
            long
        );
        assert_eq!(Ok((" ;", Literal::Boolean(true))), literal("true ;"));
    }

    #[test]
    fn number_test() {
        assert_eq!(Ok((" ;", Literal::Integer("2"))), parse_number("2 ;"));
        assert_eq!(Ok((".", Literal::Integer("25"))), parse_number("25."));
        assert_eq!(Ok((" .", Literal::Decimal("4.002602"))), parse_number("4.002602 ."));
        assert_eq!(Ok(("", Literal::Double("1.663E-4"))), parse_number("1.663E-4"));
        assert_eq!(Ok((",", Literal::Integer("-5"))), parse_number("-5,"));
        assert!(parse_number("abc").is_err());
    }

    #[test]
    fn labeled_bnode_test() {
        assert_eq!(Ok(("", BlankNode::Labeled("alice"))), labeled_bnode("_:alice"));
        assert_eq!(Ok((".", BlankNode::Labeled("b1"))), labeled_bnode("_:b1."));
        assert!(labeled_bnode("_:").is_err());
    }
}
