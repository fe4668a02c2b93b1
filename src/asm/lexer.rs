//! Source-line tokenization.
//!
//! AC100 assembly is line oriented: one statement per line, tokens split on
//! whitespace runs after trimming. The lexer classifies each line so the
//! two assembler passes agree on which lines consume code space.

/// A classified source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// Whitespace-only line; skipped by both passes.
    Blank,
    /// First token begins with `;`; skipped by both passes.
    Comment,
    /// A single token ending in `:`. The label name (without the colon) is
    /// recorded in pass 1 and the line consumes no code space.
    Label(&'a str),
    /// An instruction statement: mnemonic plus operand tokens.
    Statement {
        mnemonic: &'a str,
        operands: Vec<&'a str>,
    },
}

/// Split a source line into tokens.
///
/// Leading and trailing whitespace is ignored; runs of interior whitespace
/// separate tokens. A blank line yields no tokens.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Classify a source line for the assembler passes.
pub fn classify(line: &str) -> Line<'_> {
    let tokens = tokenize(line);
    let Some(&first) = tokens.first() else {
        return Line::Blank;
    };
    if first.starts_with(';') {
        return Line::Comment;
    }
    if tokens.len() == 1 {
        if let Some(name) = first.strip_suffix(':') {
            return Line::Label(name);
        }
    }
    Line::Statement {
        mnemonic: first,
        operands: tokens[1..].to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_lines() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify("   "), Line::Blank);
        assert_eq!(classify("\t"), Line::Blank);
    }

    #[test]
    fn test_comment_lines() {
        assert_eq!(classify("; a comment"), Line::Comment);
        assert_eq!(classify(";no space"), Line::Comment);
        assert_eq!(classify("   ; indented"), Line::Comment);
    }

    #[test]
    fn test_label_lines() {
        assert_eq!(classify("loop:"), Line::Label("loop"));
        assert_eq!(classify("  done:  "), Line::Label("done"));
    }

    #[test]
    fn test_label_must_be_alone() {
        // a trailing-colon token followed by anything is not a label line
        let line = classify("loop: LDI R1 1");
        assert!(matches!(line, Line::Statement { mnemonic: "loop:", .. }));
    }

    #[test]
    fn test_statements() {
        assert_eq!(
            classify("LDI R1 1"),
            Line::Statement {
                mnemonic: "LDI",
                operands: vec!["R1", "1"],
            }
        );
        assert_eq!(
            classify("  HALT  "),
            Line::Statement {
                mnemonic: "HALT",
                operands: vec![],
            }
        );
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(
            classify("ST   R1    0x0500"),
            Line::Statement {
                mnemonic: "ST",
                operands: vec!["R1", "0x0500"],
            }
        );
    }
}
