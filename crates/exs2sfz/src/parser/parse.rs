use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{anychar, char, space0, space1},
    combinator::{eof, map, peek, recognize},
    multi::{many0, many_till},
    sequence::{delimited, pair, preceded, separated_pair, terminated},
    IResult,
};

use crate::error::{Error, Result};
use crate::parser::types::{SfzFile, SfzGroup, SfzSection, SfzSectionType};

/// One lexical item on an SFZ line.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    Header(&'a str),
    Opcode(&'a str, &'a str),
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '$')(input)
}

/// Where an opcode value stops: end of line, the next `name=`, or a header.
fn value_end(input: &str) -> IResult<&str, ()> {
    alt((
        map(eof, |_| ()),
        map(pair(space1, pair(identifier, char('='))), |_| ()),
        map(pair(space0, char('<')), |_| ()),
    ))(input)
}

fn opcode_value(input: &str) -> IResult<&str, &str> {
    map(recognize(many_till(anychar, peek(value_end))), str::trim)(input)
}

fn header(input: &str) -> IResult<&str, Token<'_>> {
    map(delimited(char('<'), identifier, char('>')), Token::Header)(input)
}

fn opcode(input: &str) -> IResult<&str, Token<'_>> {
    map(
        separated_pair(identifier, char('='), opcode_value),
        |(name, value)| Token::Opcode(name, value),
    )(input)
}

fn token(input: &str) -> IResult<&str, Token<'_>> {
    preceded(space0, alt((header, opcode)))(input)
}

fn line_tokens(input: &str) -> IResult<&str, Vec<Token<'_>>> {
    terminated(many0(token), pair(space0, eof))(input)
}

/// Tokenize one comment-free line. On failure returns the 1-based column.
fn tokenize_line(line: &str) -> std::result::Result<Vec<Token<'_>>, usize> {
    match line_tokens(line) {
        Ok((_, tokens)) => Ok(tokens),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(line.len() - e.input.len() + 1),
        Err(nom::Err::Incomplete(_)) => Err(line.len() + 1),
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse SFZ text into its global/group/region levels.
///
/// # SFZ File Format
///
/// SFZ files consist of:
///
/// 1. **Section headers**: Enclosed in angle brackets, like `<region>` or `<group>`
/// 2. **Opcodes**: Parameter=value pairs, like `sample=piano C4.wav` or `key=60`
/// 3. **Comments**: Starting with `//` and running to the end of the line
///
/// Headers and opcodes may share a line (`<region> sample=a.wav key=60`). A
/// value runs until the next `name=` token, so sample paths may contain
/// spaces.
///
/// `<control>` and `<global>` opcodes are collected as instrument-wide
/// opcodes. A `<region>` that appears before any `<group>` is placed in an
/// implicit group. `<master>`, `<curve>` and `<effect>` sections are skipped.
pub fn parse_sfz(content: &str) -> Result<SfzFile> {
    let mut sfz = SfzFile::new();
    let mut current: Option<SfzSectionType> = None;

    for (index, raw_line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = strip_comment(raw_line);

        if line.trim().is_empty() {
            continue;
        }

        // Preprocessor directives (#define, #include) are not expanded
        if line.trim_start().starts_with('#') {
            log::warn!(
                "Skipping unsupported directive on line {}: {}",
                line_number,
                line.trim()
            );
            continue;
        }

        let tokens = tokenize_line(line).map_err(|column| Error::ParseAt {
            line: line_number,
            column,
            message: format!("Unexpected input: {}", line[column - 1..].trim()),
        })?;

        for token in tokens {
            match token {
                Token::Header(name) => {
                    let section_type =
                        SfzSectionType::from_header(name).ok_or_else(|| Error::ParseAt {
                            line: line_number,
                            column: line.find('<').map(|p| p + 1).unwrap_or(1),
                            message: format!("Unknown section type: {}", name),
                        })?;
                    open_section(&mut sfz, section_type, line_number);
                    current = Some(section_type);
                }
                Token::Opcode(name, value) => {
                    add_opcode(&mut sfz, current, name, value, line_number);
                }
            }
        }
    }

    Ok(sfz)
}

fn open_section(sfz: &mut SfzFile, section_type: SfzSectionType, line_number: usize) {
    match section_type {
        SfzSectionType::Group => sfz.groups.push(SfzGroup::new()),
        SfzSectionType::Region => {
            if sfz.groups.is_empty() {
                sfz.groups.push(SfzGroup::new());
            }
            if let Some(group) = sfz.groups.last_mut() {
                group.regions.push(SfzSection::new(SfzSectionType::Region));
            }
        }
        SfzSectionType::Global | SfzSectionType::Control => {}
        SfzSectionType::Master | SfzSectionType::Curve | SfzSectionType::Effect => {
            log::warn!(
                "Ignoring {} section on line {}",
                section_type.header_str(),
                line_number
            );
        }
    }
}

fn add_opcode(
    sfz: &mut SfzFile,
    current: Option<SfzSectionType>,
    name: &str,
    value: &str,
    line_number: usize,
) {
    match current {
        Some(SfzSectionType::Global) | Some(SfzSectionType::Control) => {
            sfz.global.add_opcode(name, value);
        }
        Some(SfzSectionType::Group) => {
            if let Some(group) = sfz.groups.last_mut() {
                group.header.add_opcode(name, value);
            }
        }
        Some(SfzSectionType::Region) => {
            if let Some(region) = sfz.groups.last_mut().and_then(|g| g.regions.last_mut()) {
                region.add_opcode(name, value);
            }
        }
        Some(_) => {}
        None => log::warn!(
            "Opcode {} on line {} appears before any section header; ignored",
            name,
            line_number
        ),
    }
}
