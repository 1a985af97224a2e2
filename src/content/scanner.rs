//! Content-stream text-run scanner.
//!
//! Content streams use postfix notation where operands come before the
//! operator. This scanner is not a general content-stream interpreter: it is
//! a minimal forward tokenizer that locates every `BT`..`ET` region in
//! document order, records the region's exact byte range, and collects the
//! visible text shown by `Tj` (single-string form) and `TJ` (array form)
//! operators inside it.
//!
//! Example content stream:
//! ```text
//! BT
//!   /F1 12 Tf
//!   100 700 Td
//!   (Hello, World!) Tj
//! ET
//! ```
//!
//! Byte ranges are preserved exactly so the rewriter can splice marked-content
//! operators around a region without disturbing anything else. String content
//! is decoded byte-per-character (latin-1), so the text round-trips for
//! streams that are not valid UTF-8.

use crate::geometry::Point;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while1};
use nom::character::complete::char;
use nom::combinator::map;
use nom::sequence::delimited;

/// One discovered `BT`..`ET` region in a page content stream.
///
/// `start`..`end` is the byte range covering the region inclusive of the
/// `BT` and `ET` operators. `text` is the concatenated, trimmed visible text
/// of the region's show operators. The font and origin fields are a
/// best-effort capture of the text state for the layout reader; the matcher
/// ignores them.
#[derive(Debug, Clone)]
pub struct TextRun {
    /// Byte offset of the `B` in `BT`
    pub start: usize,
    /// Byte offset one past the `T` in `ET`
    pub end: usize,
    /// Decoded visible text, parts joined with single spaces, trimmed
    pub text: String,
    /// Size from the last `Tf` seen before the region ended
    pub font_size: Option<f32>,
    /// Resource name from the last `Tf` seen before the region ended
    pub font_name: Option<String>,
    /// First `Td`/`TD`/`Tm` translation inside the region
    pub origin: Option<Point>,
}

/// A single content-stream token.
#[derive(Debug)]
enum Token<'a> {
    LiteralString(&'a [u8]),
    HexString,
    Name(&'a [u8]),
    Number(f32),
    ArrayStart,
    ArrayEnd,
    DictStart,
    DictEnd,
    Operator(&'a str),
}

/// Operand accumulated ahead of an operator.
#[derive(Debug)]
enum Operand {
    Str(String),
    Name(String),
    Number(f32),
    Array(Vec<String>),
    Other,
}

/// In-flight state for the region currently being scanned.
struct RunBuilder {
    start: usize,
    parts: Vec<String>,
    origin: Option<Point>,
}

/// Scan a content stream for `BT`..`ET` text runs, in document order.
///
/// The scanner is resilient: bytes that do not tokenize are skipped one at a
/// time, and an unterminated region at end of stream is discarded rather than
/// reported with a bad range.
pub fn scan_text_runs(data: &[u8]) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut rest = data;

    let mut font: Option<(String, f32)> = None;
    let mut run: Option<RunBuilder> = None;
    let mut operands: Vec<Operand> = Vec::new();
    let mut array: Option<Vec<String>> = None;

    loop {
        rest = skip_whitespace_and_comments(rest);
        if rest.is_empty() {
            break;
        }
        let offset = data.len() - rest.len();

        let (next, token) = match parse_token(rest) {
            Ok(parsed) => parsed,
            Err(_) => {
                // Skip the problematic byte and resynchronize.
                rest = &rest[1..];
                continue;
            },
        };
        let token_end = data.len() - next.len();
        rest = next;

        match token {
            Token::LiteralString(raw) => {
                let decoded = decode_literal_string(raw);
                match array.as_mut() {
                    Some(elements) => elements.push(decoded),
                    None => operands.push(Operand::Str(decoded)),
                }
            },
            Token::HexString | Token::DictStart | Token::DictEnd => {
                if array.is_none() {
                    operands.push(Operand::Other);
                }
            },
            Token::Name(raw) => {
                if array.is_none() {
                    operands.push(Operand::Name(latin1_to_string(raw)));
                }
            },
            Token::Number(value) => {
                if array.is_none() {
                    operands.push(Operand::Number(value));
                }
            },
            Token::ArrayStart => {
                array = Some(Vec::new());
            },
            Token::ArrayEnd => {
                operands.push(Operand::Array(array.take().unwrap_or_default()));
            },
            Token::Operator(op) => {
                match op {
                    "BT" => {
                        run = Some(RunBuilder {
                            start: offset,
                            parts: Vec::new(),
                            origin: None,
                        });
                    },
                    "ET" => {
                        if let Some(builder) = run.take() {
                            runs.push(TextRun {
                                start: builder.start,
                                end: token_end,
                                text: builder.parts.join(" ").trim().to_string(),
                                font_size: font.as_ref().map(|(_, size)| *size),
                                font_name: font.as_ref().map(|(name, _)| name.clone()),
                                origin: builder.origin,
                            });
                        }
                    },
                    "Tj" => {
                        if let Some(builder) = run.as_mut() {
                            if let Some(Operand::Str(text)) = operands.last() {
                                builder.parts.push(text.clone());
                            }
                        }
                    },
                    "TJ" => {
                        if let Some(builder) = run.as_mut() {
                            if let Some(Operand::Array(elements)) = operands.last() {
                                builder.parts.extend(elements.iter().cloned());
                            }
                        }
                    },
                    "Tf" => {
                        if let [.., Operand::Name(name), Operand::Number(size)] = operands.as_slice()
                        {
                            font = Some((name.clone(), *size));
                        }
                    },
                    "Td" | "TD" => {
                        if let Some(builder) = run.as_mut() {
                            if builder.origin.is_none() {
                                if let [.., Operand::Number(x), Operand::Number(y)] =
                                    operands.as_slice()
                                {
                                    builder.origin = Some(Point::new(*x, *y));
                                }
                            }
                        }
                    },
                    "Tm" => {
                        if let Some(builder) = run.as_mut() {
                            if builder.origin.is_none() {
                                if let [.., Operand::Number(e), Operand::Number(f)] =
                                    operands.as_slice()
                                {
                                    builder.origin = Some(Point::new(*e, *f));
                                }
                            }
                        }
                    },
                    "BI" => {
                        // Inline image: binary data up to EI, opaque to us.
                        rest = skip_inline_image(rest);
                    },
                    _ => {},
                }
                operands.clear();
                array = None;
            },
        }
    }

    runs
}

/// Skip whitespace and `%` comments.
fn skip_whitespace_and_comments(mut input: &[u8]) -> &[u8] {
    loop {
        let before = input.len();
        while let Some(&b) = input.first() {
            if b.is_ascii_whitespace() || b == 0 {
                input = &input[1..];
            } else {
                break;
            }
        }
        if input.first() == Some(&b'%') {
            while let Some(&b) = input.first() {
                input = &input[1..];
                if b == b'\n' || b == b'\r' {
                    break;
                }
            }
        }
        if input.len() == before {
            return input;
        }
    }
}

/// Skip past the binary payload of an inline image, leaving the input after
/// the closing `EI`.
fn skip_inline_image(input: &[u8]) -> &[u8] {
    let mut pos = 0;
    while pos + 1 < input.len() {
        if input[pos] == b'E'
            && input[pos + 1] == b'I'
            && (pos == 0 || input[pos - 1].is_ascii_whitespace())
            && (pos + 2 >= input.len() || input[pos + 2].is_ascii_whitespace())
        {
            return &input[pos + 2..];
        }
        pos += 1;
    }
    &input[input.len()..]
}

fn parse_token(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    alt((
        parse_literal_string,
        parse_dict_start,
        parse_dict_end,
        parse_hex_string,
        parse_name,
        parse_number,
        map(char('['), |_| Token::ArrayStart),
        map(char(']'), |_| Token::ArrayEnd),
        parse_operator,
    ))(input)
}

/// Parse a literal string enclosed in parentheses.
///
/// Literal strings can contain balanced nested parentheses and backslash
/// escape sequences; the raw bytes between the outer parentheses are
/// returned and decoding happens separately.
fn parse_literal_string(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    let (remaining, _) = char('(')(input)?;
    let mut depth = 1;
    let mut pos = 0;

    while depth > 0 && pos < remaining.len() {
        match remaining[pos] {
            b'\\' => {
                // Skip the escaped character; octal digits are covered too.
                pos += 2;
            },
            b'(' => {
                depth += 1;
                pos += 1;
            },
            b')' => {
                depth -= 1;
                pos += 1;
            },
            _ => {
                pos += 1;
            },
        }
    }

    if depth != 0 || pos > remaining.len() {
        return Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Tag)));
    }

    let content = &remaining[..pos - 1];
    Ok((&remaining[pos..], Token::LiteralString(content)))
}

/// Parse a hexadecimal string enclosed in angle brackets.
///
/// The content is discarded: hex strings are not literal string operands and
/// never contribute run text.
fn parse_hex_string(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    delimited(
        char('<'),
        map(
            take_while(|c: u8| c.is_ascii_hexdigit() || c.is_ascii_whitespace()),
            |_| Token::HexString,
        ),
        char('>'),
    )(input)
}

fn parse_dict_start(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    map(tag("<<"), |_| Token::DictStart)(input)
}

fn parse_dict_end(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    map(tag(">>"), |_| Token::DictEnd)(input)
}

/// Parse a name object (`/F1`, `/H1`, ...).
fn parse_name(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    let (rest, _) = char('/')(input)?;
    let (rest, name) = take_while(is_regular_char)(rest)?;
    Ok((rest, Token::Name(name)))
}

/// Parse a numeric operand (integer or real, optional sign).
fn parse_number(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    let (rest, raw) =
        take_while1(|c: u8| c.is_ascii_digit() || c == b'+' || c == b'-' || c == b'.')(input)?;
    let text = std::str::from_utf8(raw)
        .map_err(|_| nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Digit)))?;
    let value: f32 = text
        .parse()
        .map_err(|_| nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Digit)))?;
    Ok((rest, Token::Number(value)))
}

/// Parse an operator name.
///
/// Operators are 1-3 letter keywords, plus `'`, `"` and starred forms.
fn parse_operator(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    let (rest, raw) = take_while1(|c: u8| {
        c.is_ascii_alphanumeric() || c == b'\'' || c == b'"' || c == b'*'
    })(input)?;
    let name = std::str::from_utf8(raw)
        .map_err(|_| nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Alpha)))?;
    Ok((rest, Token::Operator(name)))
}

/// Regular characters per the PDF token grammar: everything that is neither
/// whitespace nor a delimiter.
fn is_regular_char(c: u8) -> bool {
    !c.is_ascii_whitespace() && !matches!(c, b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%')
}

/// Decode the raw bytes of a literal string.
///
/// Handles `\n`, `\r`, `\t`, `\b`, `\f`, `\(`, `\)`, `\\`, octal `\ddd`, and
/// backslash line continuations. Bytes map to chars one-to-one (latin-1).
fn decode_literal_string(raw: &[u8]) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        let b = raw[i];
        if b != b'\\' {
            out.push(b as char);
            i += 1;
            continue;
        }

        i += 1;
        if i >= raw.len() {
            break;
        }
        match raw[i] {
            b'n' => {
                out.push('\n');
                i += 1;
            },
            b'r' => {
                out.push('\r');
                i += 1;
            },
            b't' => {
                out.push('\t');
                i += 1;
            },
            b'b' => {
                out.push('\u{8}');
                i += 1;
            },
            b'f' => {
                out.push('\u{c}');
                i += 1;
            },
            b'\r' => {
                // Line continuation; swallow an optional following LF.
                i += 1;
                if i < raw.len() && raw[i] == b'\n' {
                    i += 1;
                }
            },
            b'\n' => {
                i += 1;
            },
            d if d.is_ascii_digit() && d < b'8' => {
                let mut value: u32 = 0;
                let mut digits = 0;
                while digits < 3 && i < raw.len() && raw[i].is_ascii_digit() && raw[i] < b'8' {
                    value = value * 8 + u32::from(raw[i] - b'0');
                    i += 1;
                    digits += 1;
                }
                // High-order overflow is ignored per the string grammar.
                out.push((value & 0xff) as u8 as char);
            },
            other => {
                out.push(other as char);
                i += 1;
            },
        }
    }

    out
}

/// Decode bytes one-to-one into a string (latin-1).
fn latin1_to_string(raw: &[u8]) -> String {
    raw.iter().map(|&b| b as char).collect()
}
