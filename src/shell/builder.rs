use super::ShellToken;
use indexmap::IndexMap;

/// Fluent accumulator of command-line tokens
///
/// The builder appends tokens strictly in call order and never reorders; the
/// caller owns the argument order contract of the target tool. Absent or
/// empty values append nothing, so optional build options never leave behind
/// a dangling flag.
///
/// # Example
///
/// ```
/// use dockwright::shell::CommandLineBuilder;
///
/// let tokens = CommandLineBuilder::new(["docker", "build", "--rm"])
///     .with_flag_arg("--pull", true)
///     .with_named_arg("-t", Some("app:latest"))
///     .with_quoted_arg(Some("."))
///     .build();
///
/// let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
/// assert_eq!(texts, ["docker", "build", "--rm", "--pull", "-t", "app:latest", "."]);
/// ```
#[derive(Debug, Clone)]
pub struct CommandLineBuilder {
    tokens: Vec<ShellToken>,
}

impl CommandLineBuilder {
    /// Creates a builder seeded with the always-present leading tokens
    /// (executable name and fixed subcommand/flags). These are emitted
    /// verbatim, never quoted.
    pub fn new<I, S>(base: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: base.into_iter().map(ShellToken::literal).collect(),
        }
    }

    /// Appends `flag` as a single literal token iff `condition` holds.
    pub fn with_flag_arg(mut self, flag: &str, condition: bool) -> Self {
        if condition {
            self.tokens.push(ShellToken::literal(flag));
        }
        self
    }

    /// Appends `flag` followed by a quoted value token iff `value` is set
    /// and non-empty. Omits both tokens otherwise.
    pub fn with_named_arg(mut self, flag: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            if !value.is_empty() {
                self.tokens.push(ShellToken::literal(flag));
                self.tokens.push(ShellToken::quoted(value));
            }
        }
        self
    }

    /// Appends `flag` followed by a quoted `key=value` token for every entry,
    /// in the mapping's iteration order. Re-emits `flag` per entry, matching
    /// repeatable flags like `--build-arg` and `--label`. An empty mapping
    /// appends nothing.
    pub fn with_key_value_args(mut self, flag: &str, entries: &IndexMap<String, String>) -> Self {
        for (key, value) in entries {
            self.tokens.push(ShellToken::literal(flag));
            self.tokens
                .push(ShellToken::quoted(format!("{}={}", key, value)));
        }
        self
    }

    /// Appends a quoted positional token iff `value` is set and non-empty.
    pub fn with_quoted_arg(mut self, value: Option<&str>) -> Self {
        if let Some(value) = value {
            if !value.is_empty() {
                self.tokens.push(ShellToken::quoted(value));
            }
        }
        self
    }

    /// Terminal operation: yields the accumulated token sequence.
    pub fn build(self) -> Vec<ShellToken> {
        self.tokens
    }
}
