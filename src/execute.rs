use crate::{build::Builder, error::Error};
use log::debug;
use std::{borrow::Cow, env, path::Path};

/// A command that declares its own flags and runs once they are parsed.
///
/// Verbs are commands too: [`Execute::declare`] nests them with [`Builder::verb`] and
/// [`Execute::selected`] hands back the one that was chosen, so [`execute`] can walk down to the
/// deepest selected command and run it with the trailing arguments.
///
/// ```
/// use tagflags::{execute, Builder, Error, Execute, Remainder, Verbs};
///
/// #[derive(Default)]
/// struct Tool {
///     verb: Verbs,
///     rest: Remainder,
///     echo: Echo,
/// }
///
/// #[derive(Default)]
/// struct Echo {
///     upper: bool,
///     output: String,
/// }
///
/// impl Execute for Tool {
///     type Error = Error;
///
///     fn declare<'a>(&'a mut self, builder: Builder<'a>) -> Builder<'a> {
///         builder
///             .flag("--rest", &mut self.rest)
///             .verbs(&mut self.verb)
///             .verb(self.echo.declare(Builder::new("echo")))
///     }
///
///     fn remainder(&self) -> Option<&[String]> {
///         Some(self.rest.as_slice())
///     }
///
///     fn selected(&mut self) -> Option<&mut dyn Execute<Error = Error>> {
///         match self.verb.selected() {
///             Some("echo") => Some(&mut self.echo),
///             _ => None,
///         }
///     }
///
///     fn execute(&mut self, _: &[String]) -> Result<(), Error> {
///         Ok(())
///     }
/// }
///
/// impl Execute for Echo {
///     type Error = Error;
///
///     fn declare<'a>(&'a mut self, builder: Builder<'a>) -> Builder<'a> {
///         builder.flag("-u, --upper", &mut self.upper)
///     }
///
///     fn execute(&mut self, arguments: &[String]) -> Result<(), Error> {
///         self.output = arguments.join(" ");
///         if self.upper {
///             self.output.make_ascii_uppercase();
///         }
///         Ok(())
///     }
/// }
///
/// let mut tool = Tool::default();
/// execute(&mut tool, "tool", ["echo", "-u", "hello", "world"])?;
/// assert_eq!(tool.echo.output, "HELLO WORLD");
/// # Ok::<(), Error>(())
/// ```
pub trait Execute {
    type Error: From<Error>;

    /// Declares the flags of this command and its verbs on `builder`.
    fn declare<'a>(&'a mut self, builder: Builder<'a>) -> Builder<'a>;

    /// Runs the command with the arguments captured by the nearest remainder.
    fn execute(&mut self, arguments: &[String]) -> Result<(), Self::Error>;

    /// The remainder slot this command declared, if any.
    fn remainder(&self) -> Option<&[String]> {
        None
    }

    /// The verb chosen while parsing, if this command has verbs.
    fn selected(&mut self) -> Option<&mut dyn Execute<Error = Self::Error>> {
        None
    }
}

/// Parses `arguments` into `command` and runs the deepest selected command.
///
/// Parse errors, [`Error::Help`] included, are returned before anything runs.
pub fn execute<E: Execute, A: Into<Cow<'static, str>>>(
    command: &mut E,
    name: impl Into<Cow<'static, str>>,
    arguments: impl IntoIterator<Item = A>,
) -> Result<(), E::Error> {
    let mut flags = command.declare(Builder::new(name)).build()?;
    flags.parse(arguments)?;
    drop(flags);
    run(command, Vec::new())
}

/// Like [`execute`], with the program name and arguments of the current process.
pub fn execute_env<E: Execute>(command: &mut E) -> Result<(), E::Error> {
    let mut arguments = env::args();
    let name = arguments
        .next()
        .as_deref()
        .and_then(|path| Path::new(path).file_name())
        .and_then(|name| name.to_str())
        .map_or_else(|| "program".to_owned(), str::to_owned);
    execute(command, name, arguments)
}

fn run<R: From<Error>>(
    command: &mut dyn Execute<Error = R>,
    inherited: Vec<String>,
) -> Result<(), R> {
    let arguments = match command.remainder() {
        Some(rest) if !rest.is_empty() => rest.to_vec(),
        _ => inherited,
    };
    match command.selected() {
        Some(verb) => run(verb, arguments),
        None => {
            debug!("executing with {} arguments", arguments.len());
            command.execute(&arguments)
        }
    }
}
