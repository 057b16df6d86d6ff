//! Parser for schematic instruction scripts.
//!
//! A script is the ordered call sequence a circuit generator emits:
//!
//! ```text
//! # voltage divider
//! add("resistor", "r1", { x: -100, y: 0, label: "10k" });
//! add("resistor", "r2", { x: 100, y: 0, rotation: 90 });
//! connect("r1", "right", "r2", "left");
//! ```
//!
//! The whole text is parsed up front so a malformed script executes nothing.

use crate::error::ScriptError;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace1, not_line_ending, satisfy},
    combinator::{cut, map, not, opt, recognize, value},
    error::{Error, ErrorKind},
    multi::{fold_many0, many0, separated_list0},
    number::complete::double,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};
use schemakernel_layout::{PinRef, PlaceConfig};

// ---------------------------------------------------------------------------
// AST
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `add(type, id, { x, y, rotation, label })`
    Add {
        tag: String,
        id: String,
        config: PlaceConfig,
    },
    /// `connect(fromId, fromPin, toId, toPin)`
    Connect { from: PinRef, to: PinRef },
    /// `reset()`
    Reset,
}

/// A statement and the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub line: usize,
    pub statement: Statement,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Consume whitespace, `# …` and `// …` comments.
fn ws_comments(input: &str) -> IResult<&str, ()> {
    let (input, _) = many0(alt((
        value((), multispace1),
        value((), pair(char('#'), not_line_ending)),
        value((), pair(tag("//"), not_line_ending)),
    )))(input)?;
    Ok((input, ()))
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(is_ident_char),
    ))(input)
}

/// `word`, not followed by further identifier characters.
fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    move |input| {
        let (rest, kw) = tag(word)(input)?;
        let (rest, _) = not(satisfy(is_ident_char))(rest)?;
        Ok((rest, kw))
    }
}

/// Punctuation with surrounding whitespace.
fn sym<'a>(c: char) -> impl FnMut(&'a str) -> IResult<&'a str, char> {
    delimited(ws_comments, char(c), ws_comments)
}

enum Piece<'a> {
    Text(&'a str),
    Char(char),
}

fn escape(input: &str) -> IResult<&str, char> {
    preceded(
        char('\\'),
        cut(alt((
            value('"', char('"')),
            value('\'', char('\'')),
            value('\\', char('\\')),
            value('\n', char('n')),
            value('\t', char('t')),
        ))),
    )(input)
}

/// String contents up to the closing `quote`, with escapes resolved.
fn quoted_body<'a>(quote: char) -> impl FnMut(&'a str) -> IResult<&'a str, String> {
    move |input| {
        fold_many0(
            alt((
                map(take_while1(move |c: char| c != quote && c != '\\'), Piece::Text),
                map(escape, Piece::Char),
            )),
            String::new,
            |mut acc, piece| {
                match piece {
                    Piece::Text(s) => acc.push_str(s),
                    Piece::Char(c) => acc.push(c),
                }
                acc
            },
        )(input)
    }
}

/// `"double"` or `'single'` quoted string.
fn quoted_string(input: &str) -> IResult<&str, String> {
    alt((
        delimited(char('"'), quoted_body('"'), cut(char('"'))),
        delimited(char('\''), quoted_body('\''), cut(char('\''))),
    ))(input)
}

// ---------------------------------------------------------------------------
// Config object
// ---------------------------------------------------------------------------

enum Field {
    X(f64),
    Y(f64),
    Rotation(f64),
    Label(String),
}

fn config_key(input: &str) -> IResult<&str, String> {
    alt((map(identifier, str::to_string), quoted_string))(input)
}

/// `key: value`. Keys may be bare or quoted; unknown keys are rejected.
fn config_field(input: &str) -> IResult<&str, Field> {
    let (rest, key) = config_key(input)?;
    let (rest, _) = cut(sym(':'))(rest)?;
    match key.as_str() {
        "x" => map(cut(double), Field::X)(rest),
        "y" => map(cut(double), Field::Y)(rest),
        "rotation" => map(cut(double), Field::Rotation)(rest),
        "label" => map(cut(quoted_string), Field::Label)(rest),
        _ => Err(nom::Err::Failure(Error::new(input, ErrorKind::Verify))),
    }
}

/// `{ x: -100, y: 0, rotation: 90, label: "10k" }`. Missing keys keep their
/// defaults; a repeated key takes the last value.
fn config_object(input: &str) -> IResult<&str, PlaceConfig> {
    let (input, _) = char('{')(input)?;
    let (input, _) = ws_comments(input)?;
    let (input, fields) = separated_list0(sym(','), config_field)(input)?;
    let (input, _) = opt(sym(','))(input)?;
    let (input, _) = ws_comments(input)?;
    let (input, _) = cut(char('}'))(input)?;

    let mut config = PlaceConfig::default();
    for field in fields {
        match field {
            Field::X(x) => config.x = x,
            Field::Y(y) => config.y = y,
            Field::Rotation(r) => config.rotation = r,
            Field::Label(text) => config.label = Some(text),
        }
    }
    Ok((input, config))
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

/// `name(`. Once the name matches, the rest of the call must be well formed.
fn call<'a>(name: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, ()> {
    move |input| {
        let (input, _) = keyword(name)(input)?;
        let (input, _) = cut(sym('('))(input)?;
        Ok((input, ()))
    }
}

/// Optional trailing comma, then `)`.
fn close_call(input: &str) -> IResult<&str, ()> {
    let (input, _) = opt(sym(','))(input)?;
    let (input, _) = ws_comments(input)?;
    let (input, _) = cut(char(')'))(input)?;
    Ok((input, ()))
}

fn string_arg(input: &str) -> IResult<&str, String> {
    cut(quoted_string)(input)
}

fn comma(input: &str) -> IResult<&str, char> {
    cut(sym(','))(input)
}

/// `add("resistor", "r1", { ... })`; the config object may be omitted.
fn add_call(input: &str) -> IResult<&str, Statement> {
    let (input, _) = call("add")(input)?;
    let (input, kind) = string_arg(input)?;
    let (input, _) = comma(input)?;
    let (input, id) = string_arg(input)?;
    let (input, config) = opt(preceded(sym(','), config_object))(input)?;
    let (input, _) = close_call(input)?;
    Ok((
        input,
        Statement::Add {
            tag: kind,
            id,
            config: config.unwrap_or_default(),
        },
    ))
}

/// `connect("r1", "right", "r2", "left")`
fn connect_call(input: &str) -> IResult<&str, Statement> {
    let (input, _) = call("connect")(input)?;
    let (input, from_id) = string_arg(input)?;
    let (input, _) = comma(input)?;
    let (input, from_pin) = string_arg(input)?;
    let (input, _) = comma(input)?;
    let (input, to_id) = string_arg(input)?;
    let (input, _) = comma(input)?;
    let (input, to_pin) = string_arg(input)?;
    let (input, _) = close_call(input)?;
    Ok((
        input,
        Statement::Connect {
            from: PinRef::new(from_id, from_pin),
            to: PinRef::new(to_id, to_pin),
        },
    ))
}

fn reset_call(input: &str) -> IResult<&str, Statement> {
    let (input, _) = call("reset")(input)?;
    let (input, _) = cut(char(')'))(input)?;
    Ok((input, Statement::Reset))
}

/// One statement with its optional `circuit.` receiver and `;`.
fn statement(input: &str) -> IResult<&str, Statement> {
    let (input, _) = opt(tuple((keyword("circuit"), sym('.'))))(input)?;
    let (input, stmt) = alt((add_call, connect_call, reset_call))(input)?;
    let (input, _) = opt(preceded(ws_comments, char(';')))(input)?;
    Ok((input, stmt))
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

/// Parse a complete script.
pub fn parse_script(src: &str) -> Result<Vec<Instruction>, ScriptError> {
    let mut instructions = Vec::new();
    let mut rest = skip_ws(src);

    while !rest.is_empty() {
        let (line, _) = position(src, rest);
        match statement(rest) {
            Ok((next, statement)) => {
                instructions.push(Instruction { line, statement });
                rest = skip_ws(next);
            }
            Err(nom::Err::Error(e)) if e.input.len() == rest.len() => {
                return Err(parse_error(
                    src,
                    rest,
                    format!("expected a statement, found `{}`", token(rest)),
                ));
            }
            Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
                return Err(parse_error(src, e.input, describe(&e)));
            }
            Err(nom::Err::Incomplete(_)) => {
                return Err(parse_error(src, "", "unexpected end of input".to_string()));
            }
        }
    }

    Ok(instructions)
}

fn skip_ws(input: &str) -> &str {
    match ws_comments(input) {
        Ok((rest, _)) => rest,
        Err(_) => input,
    }
}

fn parse_error(src: &str, at: &str, message: String) -> ScriptError {
    let (line, column) = position(src, at);
    ScriptError::Parse {
        line,
        column,
        message,
    }
}

fn describe(err: &Error<&str>) -> String {
    if err.code == ErrorKind::Verify {
        let key = err.input.split(':').next().unwrap_or_default().trim();
        return format!("unknown config key {key}");
    }
    match token(err.input) {
        "" => "unexpected end of input".to_string(),
        tok => format!("unexpected `{tok}`"),
    }
}

/// Offending text for diagnostics: up to the next whitespace, at most 20 chars.
fn token(input: &str) -> &str {
    let end = input
        .char_indices()
        .take(20)
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or_else(|| input.char_indices().nth(20).map_or(input.len(), |(i, _)| i));
    &input[..end]
}

/// 1-based (line, column) of `rest`, a suffix of `src`.
fn position(src: &str, rest: &str) -> (usize, usize) {
    let offset = src.len().saturating_sub(rest.len());
    let consumed = &src[..offset];
    let line = consumed.matches('\n').count() + 1;
    let line_start = consumed.rfind('\n').map_or(0, |i| i + 1);
    (line, consumed[line_start..].chars().count() + 1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
