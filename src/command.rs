//! One parsed line of shell input.

use alloc::string::String;
use alloc::vec::Vec;
use core::ptr;

/// Upper bound on tokens per line; anything past it is dropped.
pub const MAX_TOKENS: usize = 10;

/// An ordered sequence of non-empty tokens split out of one input line.
///
/// Tokens are owned copies stored NUL-terminated, so they can be handed to
/// `exec` as C strings without touching the buffer they were parsed from.
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// Splits `line` on runs of the space character. Leading and trailing
    /// spaces produce no tokens; a maximal run of non-space characters is
    /// one token.
    pub fn parse(line: &str) -> CommandLine {
        let tokens = line
            .split(' ')
            .filter(|token| !token.is_empty())
            .take(MAX_TOKENS)
            .map(|token| {
                let mut owned = String::with_capacity(token.len() + 1);
                owned.push_str(token);
                owned.push('\0');
                owned
            })
            .collect();
        CommandLine { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Token `index` without its NUL terminator.
    pub fn token(&self, index: usize) -> &str {
        let token = &self.tokens[index];
        &token[..token.len() - 1]
    }

    /// The program name as a C string, ready for `exec`. The line must not
    /// be empty.
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Argument vector for `exec`: one pointer per token plus the null
    /// sentinel. The pointers borrow from `self`.
    pub fn argv(&self) -> Vec<*const u8> {
        let mut argv: Vec<*const u8> = self.tokens.iter().map(|token| token.as_ptr()).collect();
        argv.push(ptr::null());
        argv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &CommandLine) -> Vec<&str> {
        (0..line.len()).map(|i| line.token(i)).collect()
    }

    #[test]
    fn splits_on_space_runs() {
        let line = CommandLine::parse("  ls   -la ");
        assert_eq!(tokens(&line), ["ls", "-la"]);
    }

    #[test]
    fn blank_lines_yield_no_tokens() {
        assert!(CommandLine::parse("").is_empty());
        assert!(CommandLine::parse("     ").is_empty());
    }

    #[test]
    fn single_token_line() {
        let line = CommandLine::parse("exit");
        assert_eq!(tokens(&line), ["exit"]);
    }

    #[test]
    fn caps_token_count() {
        let line = CommandLine::parse("a b c d e f g h i j k l");
        assert_eq!(line.len(), MAX_TOKENS);
        assert_eq!(line.token(MAX_TOKENS - 1), "j");
    }

    #[test]
    fn program_keeps_its_terminator() {
        let line = CommandLine::parse("cat file");
        assert_eq!(line.program(), "cat\0");
        assert_eq!(line.token(0), "cat");
        assert_eq!(line.token(1), "file");
    }

    #[test]
    fn argv_ends_with_null_sentinel() {
        let line = CommandLine::parse("echo hello world");
        let argv = line.argv();
        assert_eq!(argv.len(), 4);
        assert!(argv[3].is_null());
        assert!(argv[..3].iter().all(|p| !p.is_null()));
    }
}
