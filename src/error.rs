use core::fmt;
use std::{borrow::Cow, error, mem::replace};

#[derive(Clone, PartialEq)]
pub enum Error {
    /// The help flag was specified. Not a failure: callers usually print help and exit.
    Help,

    InvalidTag {
        tag: String,
        position: usize,
        rest: String,
        reason: Cow<'static, str>,
    },
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },
    InvalidAccumulate(String),
    FlagAfterVerbs(String),
    InvalidVerbName(String),
    DuplicateVerb(String),

    UnknownFlag(String, Vec<String>),
    UnknownVerb(String, Vec<String>),
    MissingValue(String),
    ValueInCluster(String),
    DuplicateFlag(String),
    MutexViolation(String, Vec<String>),
    MissingObligatory(String),
    TrailingArguments(Vec<String>),
    InvalidValue {
        flag: String,
        value: String,
        reason: Cow<'static, str>,
    },

    Format(fmt::Error),
    Regex(regex::Error),
}

impl Error {
    pub const fn is_help(&self) -> bool {
        matches!(self, Error::Help)
    }

    /// Errors in the declaration of a flag set. These are programming mistakes.
    pub const fn is_schema(&self) -> bool {
        matches!(
            self,
            Error::InvalidTag { .. }
                | Error::DuplicateName { .. }
                | Error::InvalidAccumulate(_)
                | Error::FlagAfterVerbs(_)
                | Error::InvalidVerbName(_)
                | Error::DuplicateVerb(_)
                | Error::Regex(_)
        )
    }

    /// Errors caused by the arguments given on the command line.
    pub const fn is_parse(&self) -> bool {
        matches!(
            self,
            Error::UnknownFlag(..)
                | Error::UnknownVerb(..)
                | Error::MissingValue(_)
                | Error::ValueInCluster(_)
                | Error::DuplicateFlag(_)
                | Error::MutexViolation(..)
                | Error::MissingObligatory(_)
                | Error::TrailingArguments(_)
                | Error::InvalidValue { .. }
        )
    }
}

impl error::Error for Error {}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Help => write!(f, "Request for help.")?,

            Error::InvalidTag { tag, position, rest, reason } => write!(f, "Invalid tag '{tag}' at position {position} near '{rest}': {reason}.")?,
            Error::DuplicateName { name, first, second } => write!(f, "Duplicate name '{name}' declared by flags '{first}' and '{second}'.")?,
            Error::InvalidAccumulate(flag) => write!(f, "Flag '{flag}' is tagged 'accumulate' but is not bound to an integer.")?,
            Error::FlagAfterVerbs(flag) => write!(f, "Flag '{flag}' is declared after the verbs.")?,
            Error::InvalidVerbName(name) => write!(f, "Invalid verb name '{name}'. A valid verb name is non-empty, has no whitespace and does not start with '-'.")?,
            Error::DuplicateVerb(name) => write!(f, "Duplicate verb '{name}'.")?,

            Error::UnknownFlag(flag, suggestions) => {
                write!(f, "Unknown flag '{flag}'.")?;
                let suggestions = suggestions.iter().map(|suggestion| format!("'{suggestion}'"));
                write_join(f, " Similar matches: ", ".", ", ", suggestions)?;
            }
            Error::UnknownVerb(verb, suggestions) => {
                write!(f, "Unknown verb '{verb}'.")?;
                let suggestions = suggestions.iter().map(|suggestion| format!("'{suggestion}'"));
                write_join(f, " Similar matches: ", ".", ", ", suggestions)?;
            }
            Error::MissingValue(flag) => write!(f, "Flag '{flag}' needs an argument.")?,
            Error::ValueInCluster(flag) => write!(f, "Flag '{flag}' needs a value and must be last in a flag cluster.")?,
            Error::DuplicateFlag(flag) => write!(f, "Flag '{flag}' can only be specified once.")?,
            Error::MutexViolation(group, flags) => {
                write!(f, "Only one of ")?;
                write_join(f, "'", "'", "', '", flags)?;
                write!(f, " can be specified (group '{group}').")?;
            }
            Error::MissingObligatory(flag) => write!(f, "Flag '{flag}' must be specified.")?,
            Error::TrailingArguments(arguments) => {
                write!(f, "Invalid trailing arguments")?;
                write_join(f, " '", "'", "', '", arguments)?;
                write!(f, ".")?;
            }
            Error::InvalidValue { flag, value, reason } => write!(f, "Invalid value '{value}' for flag '{flag}': {reason}.")?,

            Error::Format(error) => fmt::Display::fmt(error, f)?,
            Error::Regex(error) => fmt::Display::fmt(error, f)?,
        }
        Ok(())
    }
}

impl From<fmt::Error> for Error {
    fn from(error: fmt::Error) -> Self {
        Error::Format(error)
    }
}

impl From<regex::Error> for Error {
    fn from(error: regex::Error) -> Self {
        Error::Regex(error)
    }
}

fn write_join(
    formatter: &mut fmt::Formatter,
    prefix: impl fmt::Display,
    suffix: impl fmt::Display,
    separator: impl fmt::Display,
    items: impl IntoIterator<Item = impl fmt::Display>,
) -> Result<(), fmt::Error> {
    let mut has = false;
    for item in items.into_iter() {
        if replace(&mut has, true) {
            write!(formatter, "{separator}")?;
        } else {
            write!(formatter, "{prefix}")?;
        }
        write!(formatter, "{item}")?;
    }
    if has {
        write!(formatter, "{suffix}")?;
    }
    Ok(())
}
