//! Move notation parser
//!
//! Tokens are a face letter (`F B L R U D`, either case) with an optional
//! suffix: none for CW, `'` for CCW, `2` for two CW turns. Tokens may be run
//! together (`RUR'`) or separated by whitespace.
use nom::{
    character::complete::{multispace0, one_of},
    combinator::{map_opt, opt},
    multi::many0,
    sequence::{pair, preceded},
    IResult,
};

use crate::error::ParseError;
use crate::rotation::{Face, RotationCommand, TurnDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suffix {
    None,
    Prime,
    Double,
}

fn face(input: &str) -> IResult<&str, Face> {
    map_opt(one_of("FBLRUDfblrud"), Face::from_letter)(input)
}

fn suffix(input: &str) -> IResult<&str, Suffix> {
    let (input, c) = opt(one_of("'2"))(input)?;
    let suffix = match c {
        Some('\'') => Suffix::Prime,
        Some(_) => Suffix::Double,
        None => Suffix::None,
    };
    Ok((input, suffix))
}

fn moves(input: &str) -> IResult<&str, Vec<(Face, Suffix)>> {
    many0(preceded(multispace0, pair(face, suffix)))(input)
}

/// Parse a move sequence into individual quarter-turn commands
pub fn parse_moves(input: &str) -> Result<Vec<RotationCommand>, ParseError> {
    let rest = match moves(input) {
        Ok((rest, parsed)) if rest.trim().is_empty() => {
            return Ok(expand(&parsed));
        }
        Ok((rest, _)) => rest.trim_start(),
        Err(_) => input.trim_start(),
    };

    let offset = input.len() - rest.len();
    let token = rest.split_whitespace().next().unwrap_or(rest).to_string();
    Err(ParseError::InvalidMove { token, offset })
}

fn expand(parsed: &[(Face, Suffix)]) -> Vec<RotationCommand> {
    let mut commands = Vec::with_capacity(parsed.len());
    for &(face, suffix) in parsed {
        match suffix {
            Suffix::None => commands.push(RotationCommand::cw(face)),
            Suffix::Prime => commands.push(RotationCommand::ccw(face)),
            Suffix::Double => {
                commands.push(RotationCommand::cw(face));
                commands.push(RotationCommand::cw(face));
            }
        }
    }
    commands
}

/// Render commands as space-separated notation, one token per quarter turn
pub fn format_moves(commands: &[RotationCommand]) -> String {
    commands
        .iter()
        .map(|c| match c.direction {
            TurnDirection::Cw => c.face.letter().to_string(),
            TurnDirection::Ccw => format!("{}'", c.face.letter()),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_sequence() {
        let commands = parse_moves("F U' r2").unwrap();
        assert_eq!(
            commands,
            vec![
                RotationCommand::cw(Face::Front),
                RotationCommand::ccw(Face::Up),
                RotationCommand::cw(Face::Right),
                RotationCommand::cw(Face::Right),
            ]
        );
    }

    #[test]
    fn test_parse_compact_and_padded() {
        assert_eq!(parse_moves("RUR'").unwrap().len(), 3);
        assert_eq!(parse_moves("  B\n\tD'  ").unwrap().len(), 2);
        assert!(parse_moves("").unwrap().is_empty());
        assert!(parse_moves("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_errors_report_offset() {
        assert_eq!(
            parse_moves("F X2 U"),
            Err(ParseError::InvalidMove {
                token: "X2".to_string(),
                offset: 2
            })
        );
        assert_eq!(
            parse_moves("F3"),
            Err(ParseError::InvalidMove {
                token: "3".to_string(),
                offset: 1
            })
        );
    }

    #[test]
    fn test_format_moves() {
        let commands = parse_moves("F2 l'").unwrap();
        assert_eq!(format_moves(&commands), "F F L'");
        assert_eq!(parse_moves(&format_moves(&commands)).unwrap(), commands);
    }
}
