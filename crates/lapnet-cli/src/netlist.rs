//! A small line-oriented netlist format.
//!
//! ```text
//! * RC low-pass
//! V1 in dc 5
//! R1 in out 1k
//! C1 out 0 100u
//! ```
//!
//! - `R`, `C`, `L` lines: `<name> <node> <node> <value>`
//! - `V` lines: `<name> <node> [sin|cos|dc] [amplitude] [frequency]`,
//!   defaulting to a 1 V cosine at 1 rad/s
//! - Node `0` is ground, as is `GND`
//! - `*` starts a comment line, `;` a trailing comment, `.` a directive
//!   (ignored)
//!
//! Values accept SPICE suffixes (`f p n u m k meg g t`); trailing unit
//! letters are ignored.

use lapnet_core::{
    ComponentKind, DEFAULT_AMPLITUDE, DEFAULT_FREQUENCY, NodeId, Waveform,
};
use lapnet_solver::Command;
use thiserror::Error;

/// Netlist parse errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: invalid value '{text}'")]
    InvalidValue { line: usize, text: String },

    #[error("line {line}: {source}")]
    Circuit {
        line: usize,
        source: lapnet_core::Error,
    },
}

/// Parse netlist text into commands, in file order.
pub fn parse_netlist(text: &str) -> Result<Vec<Command>, ParseError> {
    let mut commands = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split(';').next().unwrap_or("").trim();
        if content.is_empty() || content.starts_with('*') || content.starts_with('.') {
            continue;
        }

        let fields: Vec<&str> = content.split_whitespace().collect();
        let name = fields[0];
        let designator = name.chars().next().map(|c| c.to_ascii_uppercase());

        let command = match designator {
            Some('V') => parse_source(&fields, line)?,
            Some(letter) => parse_component(letter, &fields, line)?,
            None => continue,
        };
        commands.push(command);
    }

    Ok(commands)
}

fn parse_component(letter: char, fields: &[&str], line: usize) -> Result<Command, ParseError> {
    let kind = letter
        .to_string()
        .parse::<ComponentKind>()
        .map_err(|source| ParseError::Circuit { line, source })?;

    if fields.len() != 4 {
        return Err(ParseError::Syntax {
            line,
            message: format!(
                "expected '{} <node> <node> <value>', found {} fields",
                fields[0],
                fields.len()
            ),
        });
    }

    Ok(Command::AddComponent {
        kind,
        value: parse_value(fields[3], line)?,
        start: parse_node(fields[1]),
        end: parse_node(fields[2]),
    })
}

fn parse_source(fields: &[&str], line: usize) -> Result<Command, ParseError> {
    if fields.len() < 2 || fields.len() > 5 {
        return Err(ParseError::Syntax {
            line,
            message: format!(
                "expected '{} <node> [waveform] [amplitude] [frequency]'",
                fields[0]
            ),
        });
    }

    let waveform = match fields.get(2) {
        Some(tag) => tag
            .parse::<Waveform>()
            .map_err(|source| ParseError::Circuit { line, source })?,
        None => Waveform::default(),
    };
    let amplitude = match fields.get(3) {
        Some(text) => parse_value(text, line)?,
        None => DEFAULT_AMPLITUDE,
    };
    let frequency = match (fields.get(4), waveform) {
        (Some(text), _) => parse_value(text, line)?,
        (None, Waveform::Dc) => 0.0,
        (None, _) => DEFAULT_FREQUENCY,
    };

    Ok(Command::AddSource {
        amplitude,
        frequency,
        waveform,
        start: parse_node(fields[1]),
    })
}

fn parse_node(text: &str) -> NodeId {
    if text == "0" || text.eq_ignore_ascii_case("gnd") {
        NodeId::ground()
    } else {
        NodeId::new(text)
    }
}

/// Parse a number with an optional SPICE scale suffix.
pub fn parse_value(text: &str, line: usize) -> Result<f64, ParseError> {
    let invalid = || ParseError::InvalidValue {
        line,
        text: text.to_string(),
    };

    let split = text
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')))
        .unwrap_or(text.len());
    let (number, suffix) = text.split_at(split);
    let base: f64 = number.parse().map_err(|_| invalid())?;

    let suffix = suffix.to_ascii_lowercase();
    let scale = if suffix.starts_with("meg") {
        1e6
    } else {
        match suffix.chars().next() {
            Some('f') => 1e-15,
            Some('p') => 1e-12,
            Some('n') => 1e-9,
            Some('u') => 1e-6,
            Some('m') => 1e-3,
            Some('k') => 1e3,
            Some('g') => 1e9,
            Some('t') => 1e12,
            _ => 1.0,
        }
    };

    Ok(base * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        let cases = [
            ("1", 1.0),
            ("2.5", 2.5),
            ("1k", 1e3),
            ("4.7K", 4.7e3),
            ("100u", 100e-6),
            ("10m", 10e-3),
            ("2meg", 2e6),
            ("1e-3", 1e-3),
            ("3nF", 3e-9),
            ("50ohm", 50.0),
        ];
        for (text, expected) in cases {
            let value = parse_value(text, 1).unwrap();
            assert!(
                (value - expected).abs() <= 1e-12 * expected.abs(),
                "{} -> {}, expected {}",
                text,
                value,
                expected
            );
        }
        assert!(matches!(
            parse_value("abc", 7),
            Err(ParseError::InvalidValue { line: 7, .. })
        ));
    }

    #[test]
    fn test_parse_rc() {
        let text = "\
* RC low-pass
V1 in dc 5
R1 in out 1k ; series
C1 out 0 100u
.end
";
        let commands = parse_netlist(text).unwrap();
        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[0],
            Command::AddSource {
                amplitude: 5.0,
                frequency: 0.0,
                waveform: Waveform::Dc,
                start: NodeId::from("in"),
            }
        );
        let Command::AddComponent {
            kind,
            value,
            start,
            end,
        } = &commands[2]
        else {
            panic!("expected a component, got {:?}", commands[2]);
        };
        assert_eq!(*kind, ComponentKind::Capacitor);
        assert!((value - 100e-6).abs() < 1e-18);
        assert_eq!(start, &NodeId::from("out"));
        assert!(end.is_ground());
    }

    #[test]
    fn test_source_defaults() {
        let commands = parse_netlist("V1 a").unwrap();
        assert_eq!(
            commands[0],
            Command::AddSource {
                amplitude: DEFAULT_AMPLITUDE,
                frequency: DEFAULT_FREQUENCY,
                waveform: Waveform::Cosine,
                start: NodeId::from("a"),
            }
        );
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            parse_netlist("Q1 a b c"),
            Err(ParseError::Circuit {
                line: 1,
                source: lapnet_core::Error::UnknownComponentKind(_)
            })
        ));
        assert!(matches!(
            parse_netlist("\nV1 a square 1 1"),
            Err(ParseError::Circuit {
                line: 2,
                source: lapnet_core::Error::UnsupportedWaveform(_)
            })
        ));
        assert!(matches!(
            parse_netlist("R1 a b"),
            Err(ParseError::Syntax { line: 1, .. })
        ));
    }
}
