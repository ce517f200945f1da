//! Structural scan of the graded script's source text.
//!
//! Not a Python parser. The scan catches the malformed-artifact class
//! the grader cares about (unbalanced delimiters, unterminated string
//! literals) and reports a line number and message, while accepting any
//! structurally sound script.

/// A structural error found in the source, with its line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// 1-based line the error was detected on.
    pub line: usize,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

fn closes(open: char, close: char) -> bool {
    matches!((open, close), ('(', ')') | ('[', ']') | ('{', '}'))
}

/// Scans source text for structural errors.
///
/// Understands `#` comments, single- and double-quoted strings with
/// backslash escapes, and triple-quoted strings spanning lines.
///
/// # Errors
///
/// Returns the first structural error encountered, with its line.
pub fn scan(source: &str) -> Result<(), SyntaxError> {
    let chars: Vec<char> = source.chars().collect();
    let mut line = 1usize;
    // Stack of (opening delimiter, line it was opened on).
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\n' => {
                line += 1;
                i += 1;
            }
            '#' => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '\'' | '"' => {
                let quote = c;
                let start_line = line;
                if chars.get(i + 1) == Some(&quote) && chars.get(i + 2) == Some(&quote) {
                    // Triple-quoted: runs until the matching triple.
                    i += 3;
                    loop {
                        if i >= chars.len() {
                            return Err(SyntaxError {
                                line: start_line,
                                message: "unterminated triple-quoted string".to_string(),
                            });
                        }
                        if chars[i] == quote
                            && chars.get(i + 1) == Some(&quote)
                            && chars.get(i + 2) == Some(&quote)
                        {
                            i += 3;
                            break;
                        }
                        if chars[i] == '\n' {
                            line += 1;
                        }
                        i += 1;
                    }
                } else {
                    // Single-line string: a newline before the closing
                    // quote is an error, as in Python.
                    i += 1;
                    loop {
                        match chars.get(i) {
                            None | Some('\n') => {
                                return Err(SyntaxError {
                                    line: start_line,
                                    message: "unterminated string literal".to_string(),
                                });
                            }
                            Some('\\') => i += 2,
                            Some(&ch) if ch == quote => {
                                i += 1;
                                break;
                            }
                            Some(_) => i += 1,
                        }
                    }
                }
            }
            '(' | '[' | '{' => {
                stack.push((c, line));
                i += 1;
            }
            ')' | ']' | '}' => {
                match stack.pop() {
                    None => {
                        return Err(SyntaxError {
                            line,
                            message: format!("unmatched '{c}'"),
                        });
                    }
                    Some((open, _)) if !closes(open, c) => {
                        return Err(SyntaxError {
                            line,
                            message: format!("closing '{c}' does not match opening '{open}'"),
                        });
                    }
                    Some(_) => {}
                }
                i += 1;
            }
            _ => i += 1,
        }
    }

    if let Some((open, open_line)) = stack.pop() {
        return Err(SyntaxError { line: open_line, message: format!("unclosed '{open}'") });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_well_formed_script() {
        let src = "import os\nclient = MQTTClient(u, k)\nclient.publish('temperature', t)\n";
        assert_eq!(scan(src), Ok(()));
    }

    #[test]
    fn accepts_comments_and_strings_with_delimiters_inside() {
        let src = "# not a paren: (\nmsg = 'also not: ('\ndoc = \"\"\"(\n[\n\"\"\"\n";
        assert_eq!(scan(src), Ok(()));
    }

    #[test]
    fn reports_unclosed_paren_with_its_opening_line() {
        let src = "x = 1\nclient = MQTTClient(u, k\ny = 2\n";
        let err = scan(src).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.message, "unclosed '('");
    }

    #[test]
    fn reports_unmatched_closer() {
        let err = scan("x = 1)\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.message, "unmatched ')'");
    }

    #[test]
    fn reports_mismatched_pair() {
        let err = scan("x = [1, 2)\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.message, "closing ')' does not match opening '['");
    }

    #[test]
    fn reports_unterminated_string_on_its_line() {
        let err = scan("a = 1\nb = 'oops\nc = 2\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.message, "unterminated string literal");
    }

    #[test]
    fn escaped_quote_does_not_close_a_string() {
        assert_eq!(scan("s = 'it\\'s fine'\n"), Ok(()));
    }

    #[test]
    fn reports_unterminated_triple_quote() {
        let err = scan("doc = \"\"\"start\nmore\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.message, "unterminated triple-quoted string");
    }
}
