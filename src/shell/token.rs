use serde::Serialize;
use std::borrow::Cow;

/// A single command-line token tagged with its quoting policy
///
/// `quoted` tokens are shell-escaped when the command line is rendered;
/// literal tokens (flag names, the executable, fixed subcommands) are emitted
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellToken {
    pub text: String,
    pub quoted: bool,
}

impl ShellToken {
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: false,
        }
    }

    pub fn quoted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: true,
        }
    }

    /// Renders this token for a POSIX shell.
    ///
    /// Quoted tokens pass through [`quote_word`]; literal tokens come back
    /// unchanged.
    pub fn render(&self) -> Cow<'_, str> {
        if self.quoted {
            quote_word(&self.text)
        } else {
            Cow::Borrowed(&self.text)
        }
    }
}

/// Renders a token sequence as a single POSIX shell command line.
pub fn render_command_line(tokens: &[ShellToken]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&token.render());
    }
    out
}

/// Quotes a single shell word so a POSIX shell parses it back as one
/// argument with exactly the original value.
///
/// Matches the behavior of Python's `shlex.quote`: words made only of safe
/// characters are returned as-is, everything else is single-quoted with
/// embedded single quotes spliced as `'"'"'`.
pub fn quote_word(word: &str) -> Cow<'_, str> {
    if word.is_empty() {
        return Cow::Borrowed("''");
    }

    if is_safe_word(word) {
        return Cow::Borrowed(word);
    }

    let mut out = String::with_capacity(word.len() + 2);
    out.push('\'');

    for part in word.split('\'') {
        out.push_str(part);
        out.push_str("'\"'\"'");
    }

    out.truncate(out.len().saturating_sub("'\"'\"'".len()));
    out.push('\'');
    Cow::Owned(out)
}

/// Safe characters (not quoted): `A-Za-z0-9_@%+=:,./-`
fn is_safe_word(word: &str) -> bool {
    word.bytes().all(|b| {
        matches!(
            b,
            b'a'..=b'z'
                | b'A'..=b'Z'
                | b'0'..=b'9'
                | b'_'
                | b'-'
                | b'.'
                | b'/'
                | b':'
                | b'@'
                | b'%'
                | b'+'
                | b'='
                | b','
        )
    })
}
