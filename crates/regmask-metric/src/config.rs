use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

/// An error type for the configuration store.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Error to read the parameter file.
    #[error("Failed to read the parameter file. {0}")]
    Io(#[from] std::io::Error),

    /// A command-line key came without a value.
    #[error("Command line argument -{0} has no value")]
    MissingArgumentValue(String),

    /// A parameter file line is not a `(Key value ...)` entry.
    #[error("Malformed parameter entry at line {0}")]
    MalformedEntry(usize),

    /// A parameter value did not parse as the requested type.
    #[error("Parameter {key} has an invalid value: '{value}'")]
    InvalidParameter {
        /// The parameter key.
        key: String,
        /// The raw value that failed to parse.
        value: String,
    },
}

/// A read-only key/value store queried by the registration components.
///
/// Two namespaces are kept, matching how a registration run is configured:
/// command-line arguments (`-key value` pairs, one value per key) and
/// parameter file entries (`(Key value ...)` lines, several values per key).
/// Lookups with a default never fail on absent keys; absence is a
/// configuration choice, not an error.
///
/// # Examples
///
/// ```
/// use regmask_metric::Configuration;
///
/// let config = Configuration::parse_parameters(
///     r#"
///     // registration pyramid
///     (NumberOfResolutions 4)
///     "#,
/// )
/// .unwrap();
///
/// let levels: usize = config.read_parameter("NumberOfResolutions", 0, 3).unwrap();
/// assert_eq!(levels, 4);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Configuration {
    arguments: HashMap<String, String>,
    parameters: HashMap<String, Vec<String>>,
}

impl Configuration {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from command-line style tokens.
    ///
    /// Tokens starting with `-` are keys; each key consumes the following
    /// token as its value. Tokens that are not preceded by a key are
    /// ignored.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut config = Self::new();
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            let arg = arg.as_ref();
            let Some(key) = arg.strip_prefix('-') else {
                continue;
            };
            let value = iter
                .next()
                .ok_or_else(|| ConfigError::MissingArgumentValue(key.to_string()))?;
            config.set_argument(key, value.as_ref());
        }
        Ok(config)
    }

    /// Reads and parses a parameter file.
    ///
    /// See [`Configuration::parse_parameters`] for the accepted syntax.
    pub fn from_parameter_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse_parameters(&text)
    }

    /// Parses parameter entries from text.
    ///
    /// Each non-empty line is either a `//` comment or an entry of the form
    /// `(Key value ...)`. Values may be double-quoted to contain spaces. A
    /// later entry for the same key replaces the earlier one.
    pub fn parse_parameters(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            let line_number = index + 1;
            let inner = line
                .strip_prefix('(')
                .and_then(|rest| rest.strip_suffix(')'))
                .ok_or(ConfigError::MalformedEntry(line_number))?;
            let mut tokens = tokenize(inner, line_number)?;
            if tokens.is_empty() {
                return Err(ConfigError::MalformedEntry(line_number));
            }
            let key = tokens.remove(0);
            config.parameters.insert(key, tokens);
        }
        Ok(config)
    }

    /// Sets a command-line argument value, replacing any previous one.
    pub fn set_argument(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.arguments.insert(key.into(), value.into());
    }

    /// Sets a parameter entry, replacing any previous one.
    pub fn set_parameter<I>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.parameters
            .insert(key.into(), values.into_iter().map(Into::into).collect());
    }

    /// The command-line argument value for `key`, if given.
    pub fn argument(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).map(String::as_str)
    }

    /// Reads one parameter value, falling back to a default.
    ///
    /// A missing key or index yields the supplied default, never an error.
    /// A present value that does not parse as `T` is reported as
    /// [`ConfigError::InvalidParameter`].
    pub fn read_parameter<T: FromStr>(
        &self,
        key: &str,
        index: usize,
        default: T,
    ) -> Result<T, ConfigError> {
        match self.parameters.get(key).and_then(|values| values.get(index)) {
            None => Ok(default),
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidParameter {
                key: key.to_string(),
                value: raw.clone(),
            }),
        }
    }
}

/// Splits an entry body into whitespace-separated tokens, honoring double
/// quotes.
fn tokenize(inner: &str, line_number: usize) -> Result<Vec<String>, ConfigError> {
    let mut tokens = Vec::new();
    let mut chars = inner.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '"' {
            chars.next();
            let mut token = String::new();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some(ch) => token.push(ch),
                    None => return Err(ConfigError::MalformedEntry(line_number)),
                }
            }
            tokens.push(token);
        } else {
            let mut token = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                token.push(ch);
                chars.next();
            }
            tokens.push(token);
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_entries_and_comments() -> Result<(), ConfigError> {
        let config = Configuration::parse_parameters(
            r#"
            // pyramid setup
            (NumberOfResolutions 4)
            (ImagePyramidSchedule 8 8 4 4 2 2 1 1)
            (ResultImageFormat "nii.gz")
            "#,
        )?;

        assert_eq!(config.read_parameter("NumberOfResolutions", 0, 3)?, 4);
        assert_eq!(config.read_parameter("ImagePyramidSchedule", 3, 0)?, 4);
        assert_eq!(
            config.read_parameter("ResultImageFormat", 0, String::new())?,
            "nii.gz"
        );
        Ok(())
    }

    #[test]
    fn missing_key_or_index_yields_default() -> Result<(), ConfigError> {
        let config = Configuration::parse_parameters("(NumberOfResolutions 4)")?;
        assert_eq!(config.read_parameter("HistogramSize", 0, 32)?, 32);
        assert_eq!(config.read_parameter("NumberOfResolutions", 1, 3)?, 3);
        Ok(())
    }

    #[test]
    fn invalid_value_is_an_error() {
        let config = Configuration::parse_parameters("(NumberOfResolutions many)").unwrap();
        let result = config.read_parameter("NumberOfResolutions", 0, 3usize);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { key, value })
                if key == "NumberOfResolutions" && value == "many"
        ));
    }

    #[test]
    fn quoted_values_keep_spaces() -> Result<(), ConfigError> {
        let config = Configuration::parse_parameters(r#"(MaskPath "with space/mask.png")"#)?;
        assert_eq!(
            config.read_parameter("MaskPath", 0, String::new())?,
            "with space/mask.png"
        );
        Ok(())
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(matches!(
            Configuration::parse_parameters("NumberOfResolutions 4"),
            Err(ConfigError::MalformedEntry(1))
        ));
        assert!(matches!(
            Configuration::parse_parameters("\n()"),
            Err(ConfigError::MalformedEntry(2))
        ));
        assert!(matches!(
            Configuration::parse_parameters(r#"("unterminated)"#),
            Err(ConfigError::MalformedEntry(1))
        ));
    }

    #[test]
    fn arguments_from_tokens() -> Result<(), ConfigError> {
        let config = Configuration::from_args(["-fMask", "fixed.png", "-mMask", "moving.png"])?;
        assert_eq!(config.argument("fMask"), Some("fixed.png"));
        assert_eq!(config.argument("mMask"), Some("moving.png"));
        assert_eq!(config.argument("tMask"), None);
        Ok(())
    }

    #[test]
    fn dangling_key_is_an_error() {
        let result = Configuration::from_args(["-fMask"]);
        assert!(matches!(
            result,
            Err(ConfigError::MissingArgumentValue(key)) if key == "fMask"
        ));
    }

    #[test]
    fn programmatic_builders() -> Result<(), ConfigError> {
        let mut config = Configuration::new();
        config.set_argument("fMask", "fixed.png");
        config.set_parameter("NumberOfResolutions", ["5"]);
        assert_eq!(config.argument("fMask"), Some("fixed.png"));
        assert_eq!(config.read_parameter("NumberOfResolutions", 0, 3)?, 5);
        Ok(())
    }
}
