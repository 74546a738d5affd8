use crate::{
    error::Error,
    flag::Flag,
    help,
    mutex::MutexGroup,
    spell::Spell,
    style::{self, Style},
    value::Verbs,
};
use log::{debug, trace};
use std::{
    borrow::Cow,
    collections::{HashMap, VecDeque},
    fmt,
};

/// The flags of one program or verb level, bound to the caller's slots.
///
/// A flag set is built by [`crate::Builder`] and is meant to be parsed once. Once the flag set
/// is dropped, the bound slots can be read again.
pub struct FlagSet<'a> {
    pub(crate) name: Cow<'static, str>,
    pub(crate) flags: Vec<Flag<'a>>,
    pub(crate) shorts: HashMap<char, usize>,
    pub(crate) longs: HashMap<String, usize>,
    pub(crate) help: Option<usize>,
    pub(crate) remainder: Option<usize>,
    pub(crate) selected: Option<&'a mut Verbs>,
    pub(crate) verbs: Vec<FlagSet<'a>>,
}

impl<'a> FlagSet<'a> {
    /// Parses the process arguments, skipping the program name.
    pub fn parse_env(&mut self) -> Result<(), Error> {
        self.parse(std::env::args().skip(1))
    }

    /// Parses `arguments`, writing into the bound slots.
    ///
    /// Returns [`Error::Help`] when the help flag was specified, before any other validation.
    /// Slots written before an error keep their new value.
    pub fn parse<A: Into<Cow<'static, str>>>(
        &mut self,
        arguments: impl IntoIterator<Item = A>,
    ) -> Result<(), Error> {
        let mut arguments = arguments.into_iter().map(Into::into).collect();
        self.consume(&mut arguments, None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flags(&self) -> &[Flag<'a>] {
        &self.flags
    }

    pub fn verbs(&self) -> &[FlagSet<'a>] {
        &self.verbs
    }

    pub fn verb(&self, name: &str) -> Option<&FlagSet<'a>> {
        self.verbs.iter().find(|verb| verb.name == name)
    }

    pub fn verb_names(&self) -> Vec<&str> {
        self.verbs.iter().map(|verb| verb.name()).collect()
    }

    /// Finds a flag by one of its names, written with its dashes (`--name` or `-n`).
    pub fn find(&self, name: &str) -> Option<&Flag<'a>> {
        let index = match name.strip_prefix("--") {
            Some(long) => self.longs.get(long),
            None => {
                let mut letters = name.strip_prefix('-')?.chars();
                match (letters.next(), letters.next()) {
                    (Some(short), None) => self.shorts.get(&short),
                    _ => None,
                }
            }
        };
        index.map(|&index| &self.flags[index])
    }

    pub fn help_flag(&self) -> Option<&Flag<'a>> {
        self.help.map(|index| &self.flags[index])
    }

    pub fn remainder_flag(&self) -> Option<&Flag<'a>> {
        self.remainder.map(|index| &self.flags[index])
    }

    pub fn mutex_groups(&self) -> Vec<MutexGroup<'_, 'a>> {
        MutexGroup::collect(&self.flags)
    }

    /// Renders the help text of this flag set and its verbs.
    pub fn help<S: Style + ?Sized>(&self, style: &S) -> Result<String, Error> {
        Ok(help::help(self, style)?)
    }

    /// Renders the help text with a caller-supplied layout instead of the default one.
    pub fn help_with(
        &self,
        render: impl FnOnce(&Self, &mut dyn fmt::Write) -> fmt::Result,
    ) -> Result<String, Error> {
        let mut buffer = String::new();
        render(self, &mut buffer)?;
        Ok(buffer)
    }

    /// Writes the help text to the standard error stream.
    pub fn print_help(&self) -> Result<(), Error> {
        eprint!("{}", self.help(&style::Default)?);
        Ok(())
    }

    fn consume(
        &mut self,
        arguments: &mut VecDeque<Cow<'static, str>>,
        mut inherited: Option<&mut Flag<'a>>,
    ) -> Result<(), Error> {
        while let Some(argument) = arguments.pop_front() {
            if let Some(name) = argument.strip_prefix("--") {
                self.long(name, arguments)?;
            } else if let Some(cluster) = argument.strip_prefix('-').filter(|rest| !rest.is_empty()) {
                self.cluster(cluster, arguments)?;
            } else {
                arguments.push_front(argument);
                self.trailing(arguments, inherited.as_deref_mut())?;
            }
        }
        self.validate()
    }

    fn long(&mut self, name: &str, arguments: &mut VecDeque<Cow<'static, str>>) -> Result<(), Error> {
        match self.longs.get(name) {
            Some(&index) => self.flags[index].matched(arguments),
            None => {
                let suggestions = Spell::new().suggest(name, self.longs.keys().map(String::as_str));
                Err(Error::UnknownFlag(
                    format!("--{name}"),
                    suggestions.into_iter().map(|long| format!("--{long}")).collect(),
                ))
            }
        }
    }

    fn cluster(
        &mut self,
        cluster: &str,
        arguments: &mut VecDeque<Cow<'static, str>>,
    ) -> Result<(), Error> {
        let mut letters = cluster.chars().peekable();
        while let Some(letter) = letters.next() {
            let Some(&index) = self.shorts.get(&letter) else {
                return Err(Error::UnknownFlag(format!("-{letter}"), Vec::new()));
            };
            let flag = &mut self.flags[index];
            if flag.needs_value() && letters.peek().is_some() {
                return Err(Error::ValueInCluster(flag.name()));
            }
            flag.matched(arguments)?;
        }
        Ok(())
    }

    /// Handles the first argument that is not a flag: dispatches to a verb or fills the remainder.
    fn trailing(
        &mut self,
        arguments: &mut VecDeque<Cow<'static, str>>,
        inherited: Option<&mut Flag<'a>>,
    ) -> Result<(), Error> {
        let remainder = match self.remainder {
            Some(index) => self.flags.get_mut(index),
            None => inherited,
        };

        if !self.verbs.is_empty() {
            let keyword = arguments.pop_front().unwrap_or_default();
            let Some(index) = self.verbs.iter().position(|verb| verb.name == keyword) else {
                let suggestions = Spell::new().suggest(&keyword, self.verbs.iter().map(|verb| verb.name()));
                return Err(Error::UnknownVerb(keyword.into_owned(), suggestions));
            };
            if let Some(selected) = self.selected.as_mut() {
                selected.0 = Some(keyword.into_owned());
            }
            let verb = &mut self.verbs[index];
            trace!("'{}' dispatches {} arguments to verb '{}'", self.name, arguments.len(), verb.name);
            verb.consume(arguments, remainder)
        } else if let Some(flag) = remainder {
            let rest = arguments.drain(..).map(Cow::into_owned).collect::<Vec<_>>();
            debug!("'{}' captures {} trailing arguments into '{}'", self.name, rest.len(), flag.name());
            flag.capture(rest)
        } else {
            Err(Error::TrailingArguments(
                arguments.drain(..).map(Cow::into_owned).collect(),
            ))
        }
    }

    fn validate(&self) -> Result<(), Error> {
        if self.help_flag().map_or(false, Flag::was_specified) {
            debug!("'{}' was asked for help", self.name);
            return Err(Error::Help);
        }
        if let Some(flag) = self
            .flags
            .iter()
            .find(|flag| flag.is_obligatory() && !flag.was_specified())
        {
            return Err(Error::MissingObligatory(flag.name()));
        }
        for group in self.mutex_groups() {
            if !group.is_valid() {
                return Err(Error::MutexViolation(group.name().to_owned(), group.names()));
            }
        }
        Ok(())
    }
}
