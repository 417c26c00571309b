//! Trace reader: one `KIND ADDRESS [SIZE]` instruction per line

use std::path::Path;

use crate::diagnostic::Diagnostic;
use crate::error::TraceError;
use crate::instruction::{Instruction, InstructionKind};

/// Instructions read from a trace, plus the lines that were skipped
#[derive(Debug, Default)]
pub struct ParsedTrace {
    pub instructions: Vec<Instruction>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Read and parse a trace file
pub fn fetch_trace(trace_path: &Path) -> Result<ParsedTrace, TraceError> {
    let content = std::fs::read_to_string(trace_path)
        .map_err(|e| TraceError::FileReadError(trace_path.into(), e))?;
    parse_trace(&content)
}

pub fn parse_trace(content: &str) -> Result<ParsedTrace, TraceError> {
    let mut trace = ParsedTrace::default();

    for (line_num, line) in content.lines().enumerate() {
        match parse_line(line, line_num + 1) {
            Ok(Some(inst)) => trace.instructions.push(inst),
            Ok(None) => {}
            Err(LineError::UnknownKind(diagnostic)) => {
                diagnostic.emit();
                trace.diagnostics.push(diagnostic);
            }
            Err(LineError::Invalid(e)) => return Err(e),
        }
    }

    Ok(trace)
}

pub enum LineError {
    /// Skippable
    UnknownKind(Diagnostic),
    Invalid(TraceError),
}

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(
    line: &str,
    line_num: usize,
) -> Result<Option<Instruction>, LineError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    let kind: InstructionKind = parts[0].parse().map_err(|_| {
        LineError::UnknownKind(Diagnostic::UnknownInstruction {
            line: line_num,
            kind: parts[0].to_string(),
        })
    })?;

    if parts.len() < 2 || parts.len() > 3 {
        return Err(LineError::Invalid(TraceError::InvalidFormat {
            line: line_num,
        }));
    }

    let address = parse_number(parts[1]).ok_or_else(|| {
        LineError::Invalid(TraceError::InvalidAddress {
            line: line_num,
            token: parts[1].to_string(),
        })
    })?;

    let mut inst = Instruction::new(kind, address);
    if let Some(token) = parts.get(2) {
        let size = parse_number(token).filter(|&size| size > 0).ok_or_else(
            || {
                LineError::Invalid(TraceError::InvalidSize {
                    line: line_num,
                    token: token.to_string(),
                })
            },
        )?;
        inst = inst.with_size(size);
    }

    Ok(Some(inst))
}

/// Decimal, or hexadecimal with a `0x` prefix
fn parse_number(token: &str) -> Option<u64> {
    match token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => token.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trace() {
        let trace = parse_trace(
            "# warm up\n\
             LOAD 0\n\
             load 0x40\n\
             \n\
             Store 128\n\
             lds_store 0x10 16\n\
             LDS_LOAD 32\n",
        )
        .unwrap();

        assert_eq!(
            trace.instructions,
            vec![
                Instruction::load(0),
                Instruction::load(64),
                Instruction::store(128),
                Instruction::new(InstructionKind::ScratchpadStore, 16)
                    .with_size(16),
                Instruction::new(InstructionKind::ScratchpadLoad, 32),
            ]
        );
        assert!(trace.diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_kind_is_skipped() {
        let trace = parse_trace("LOAD 0\nPREFETCH 64\nSTORE 64\n").unwrap();
        assert_eq!(
            trace.instructions,
            vec![Instruction::load(0), Instruction::store(64)]
        );
        assert_eq!(
            trace.diagnostics,
            vec![Diagnostic::UnknownInstruction {
                line: 2,
                kind: "PREFETCH".to_string(),
            }]
        );
    }

    #[test]
    fn test_invalid_lines() {
        assert!(matches!(
            parse_trace("LOAD 0\nLOAD -4\n"),
            Err(TraceError::InvalidAddress { line: 2, .. })
        ));
        assert!(matches!(
            parse_trace("LOAD 0xzz\n"),
            Err(TraceError::InvalidAddress { line: 1, .. })
        ));
        assert!(matches!(
            parse_trace("LDS_LOAD 0 0\n"),
            Err(TraceError::InvalidSize { line: 1, .. })
        ));
        assert!(matches!(
            parse_trace("STORE\n"),
            Err(TraceError::InvalidFormat { line: 1 })
        ));
        assert!(matches!(
            parse_trace("STORE 1 2 3\n"),
            Err(TraceError::InvalidFormat { line: 1 })
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/memsim.trace");
        assert!(matches!(
            fetch_trace(path),
            Err(TraceError::FileReadError(..))
        ));
    }
}
