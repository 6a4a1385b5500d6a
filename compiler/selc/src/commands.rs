//! Command implementations for the `se` binary.

use std::fs::File;
use std::io::{self, BufReader, Write};

use se_lexer_core::{ScanError, TokenKind, TokenScanner};

/// Clean run: the scan reached end-of-input.
pub const EXIT_OK: i32 = 0;
/// The source could not be opened or reading it failed mid-scan.
pub const EXIT_FAILURE: i32 = 1;
/// Bad invocation; usage was printed.
pub const EXIT_USAGE: i32 = 2;

/// Argument dispatch for the binary: exactly one argument, the path of
/// the file to tokenize. The argument is always a path, never a
/// subcommand, so a file literally named `help` still gets lexed.
/// Anything else is a usage error.
pub fn dispatch(args: &[String], out: &mut dyn Write, err: &mut dyn Write) -> io::Result<i32> {
    match args {
        [path] => lex_file(path, out, err),
        _ => {
            writeln!(err, "Usage: se <file.se>")?;
            Ok(EXIT_USAGE)
        }
    }
}

/// Tokenize a source file, printing one line per token.
///
/// An unopenable file is reported on `err` and the process-level
/// failure code is returned; it is never a panic or abort.
pub fn lex_file(path: &str, out: &mut dyn Write, err: &mut dyn Write) -> io::Result<i32> {
    tracing::debug!(path, "opening source file");
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            writeln!(err, "error: cannot open '{path}': {e}")?;
            return Ok(EXIT_FAILURE);
        }
    };
    lex_source(TokenScanner::from_reader(BufReader::new(file)), out, err)
}

/// Drive a scanner to end-of-input, printing `{line} {kind}: {text}`
/// for every token on `out`.
///
/// Recoverable scan errors (unterminated string, unrecognized byte) and
/// truncation reports go to `err` and the scan continues. A read
/// failure of the underlying source is fatal.
pub fn lex_source(
    mut scanner: TokenScanner<'_>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<i32> {
    let mut count = 0usize;
    loop {
        match scanner.next_token() {
            Ok(tok) if tok.kind == TokenKind::Eof => {
                tracing::debug!(tokens = count, "scan complete");
                return Ok(EXIT_OK);
            }
            Ok(tok) => {
                writeln!(out, "{} {}: {}", tok.line, tok.kind.canonical(), tok.lexeme())?;
                if let Some(report) = scanner.take_truncation() {
                    writeln!(err, "warning: {report}")?;
                }
                count += 1;
            }
            Err(ScanError::Io(e)) => {
                writeln!(err, "error: source read failed: {e}")?;
                return Ok(EXIT_FAILURE);
            }
            Err(e) => {
                writeln!(err, "error: {e}")?;
            }
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(source: &str) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = lex_source(TokenScanner::from_str(source), &mut out, &mut err)
            .expect("writing to a Vec cannot fail");
        (
            code,
            String::from_utf8(out).expect("stdout is utf-8"),
            String::from_utf8(err).expect("stderr is utf-8"),
        )
    }

    #[test]
    fn prints_one_line_per_token() {
        let (code, out, err) = run("x = 1 + 2");
        assert_eq!(code, EXIT_OK);
        assert_eq!(
            out,
            "1 <identifier>: x\n\
             1 =: =\n\
             1 <number>: 1\n\
             1 +: +\n\
             1 <number>: 2\n"
        );
        assert_eq!(err, "");
    }

    #[test]
    fn literal_lines_use_the_captured_text() {
        let (_, out, _) = run("\"hi there\"\nname");
        assert_eq!(out, "1 <string>: hi there\n2 <identifier>: name\n");
    }

    #[test]
    fn empty_source_prints_nothing() {
        let (code, out, err) = run("");
        assert_eq!(code, EXIT_OK);
        assert_eq!(out, "");
        assert_eq!(err, "");
    }

    #[test]
    fn recoverable_errors_go_to_stderr_and_scanning_continues() {
        let (code, out, err) = run("a @ b");
        assert_eq!(code, EXIT_OK);
        assert_eq!(out, "1 <identifier>: a\n1 <identifier>: b\n");
        assert_eq!(err, "error: 1:3: unrecognized character 0x40\n");
    }

    #[test]
    fn unterminated_string_is_reported_then_scan_ends_cleanly() {
        let (code, out, err) = run("ok \"broken");
        assert_eq!(code, EXIT_OK);
        assert_eq!(out, "1 <identifier>: ok\n");
        assert_eq!(err, "error: 1:4: unterminated string literal\n");
    }

    #[test]
    fn truncation_warns_but_still_prints_the_token() {
        let source = "y".repeat(se_lexer_core::MAX_LEXEME_LEN + 1);
        let (code, out, err) = run(&source);
        assert_eq!(code, EXIT_OK);
        let line = out.lines().next().expect("one token line");
        assert!(line.starts_with("1 <identifier>: "));
        assert!(err.starts_with("warning: "));
        assert!(err.contains("truncated"));
    }

    #[test]
    fn missing_argument_prints_usage_and_exits_2() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code =
            dispatch(&[], &mut out, &mut err).expect("writing to a Vec cannot fail");
        assert_eq!(code, EXIT_USAGE);
        assert!(out.is_empty());
        let err = String::from_utf8(err).expect("stderr is utf-8");
        assert_eq!(err, "Usage: se <file.se>\n");
    }

    #[test]
    fn extra_arguments_are_a_usage_error() {
        let args = vec!["a.se".to_string(), "b.se".to_string()];
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code =
            dispatch(&args, &mut out, &mut err).expect("writing to a Vec cannot fail");
        assert_eq!(code, EXIT_USAGE);
        assert!(out.is_empty());
    }

    #[test]
    fn the_argument_is_always_a_path_never_a_subcommand() {
        // No word is reserved: a file named `help` or `version` is lexed
        // like any other input.
        let dir = tempfile::tempdir().expect("tempdir");
        for name in ["help", "version"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "x = 1").expect("write source file");
            let args = vec![path.to_string_lossy().into_owned()];
            let mut out = Vec::new();
            let mut err = Vec::new();
            let code =
                dispatch(&args, &mut out, &mut err).expect("writing to a Vec cannot fail");
            assert_eq!(code, EXIT_OK);
            let out = String::from_utf8(out).expect("stdout is utf-8");
            assert_eq!(out, "1 <identifier>: x\n1 =: =\n1 <number>: 1\n");
            assert!(err.is_empty());
        }
    }

    #[test]
    fn bare_word_arguments_resolve_as_paths() {
        // `se help` with no such file reports an open failure instead of
        // printing usage text.
        let args = vec!["help".to_string()];
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code =
            dispatch(&args, &mut out, &mut err).expect("writing to a Vec cannot fail");
        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        let err = String::from_utf8(err).expect("stderr is utf-8");
        assert!(err.starts_with("error: cannot open 'help'"));
    }

    #[test]
    fn missing_file_fails_without_panicking() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = lex_file("/no/such/file.se", &mut out, &mut err)
            .expect("writing to a Vec cannot fail");
        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        let err = String::from_utf8(err).expect("stderr is utf-8");
        assert!(err.starts_with("error: cannot open '/no/such/file.se'"));
    }
}
