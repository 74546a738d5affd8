use crate::{
    error::Error,
    flag::Flag,
    parse::FlagSet,
    tag::Tag,
    value::{Kind, Value, Verbs},
};
use log::debug;
use std::{
    borrow::Cow,
    collections::{hash_map::Entry, HashMap},
    hash::Hash,
};

/// Declares the flags and verbs of a program level.
///
/// The first declaration error is kept and every later call is skipped; [`Builder::build`]
/// returns it.
///
/// ```
/// use tagflags::{Builder, Verbs};
///
/// let mut verbose = 0u8;
/// let mut server = String::new();
/// let mut verb = Verbs::default();
/// let mut name = String::new();
///
/// let mut flags = Builder::new("tool")
///     .flag("-v, accumulate", &mut verbose)
///     .flag("--server, obligatory", &mut server)
///     .verbs(&mut verb)
///     .verb(Builder::new("create").flag("-n, --name", &mut name))
///     .build()?;
/// flags.parse(["-vv", "--server", "local", "create", "-n", "tmp"])?;
/// drop(flags);
///
/// assert_eq!(verbose, 2);
/// assert_eq!(verb.selected(), Some("create"));
/// assert_eq!(name, "tmp");
/// # Ok::<(), tagflags::Error>(())
/// ```
pub struct Builder<'a> {
    verbs: bool,
    set: Result<FlagSet<'a>, Error>,
}

impl<'a> Builder<'a> {
    /// Starts a flag set. For a verb, `name` is the keyword that selects it.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            verbs: false,
            set: Ok(FlagSet {
                name: name.into(),
                flags: Vec::new(),
                shorts: HashMap::new(),
                longs: HashMap::new(),
                help: None,
                remainder: None,
                selected: None,
                verbs: Vec::new(),
            }),
        }
    }

    /// Declares a flag described by `tag` and bound to `value`.
    ///
    /// The first flag bound to a [`crate::Help`] slot is the help flag and the first bound to a
    /// [`crate::Remainder`] slot is the remainder; later ones are plain flags.
    pub fn flag(self, tag: &str, value: &'a mut dyn Value) -> Self {
        let verbs = self.verbs;
        self.try_map(|mut set| {
            let tag = Tag::parse(tag)?;
            if verbs {
                return Err(Error::FlagAfterVerbs(tag.name()));
            }

            let flag = Flag::new(tag, value)?;
            let index = set.flags.len();
            for &short in flag.shorts() {
                if let Some(first) = insert_key(&mut set.shorts, short, index) {
                    return Err(duplicate(format!("-{short}"), &set.flags, first, &flag));
                }
            }
            for long in flag.longs() {
                if let Some(first) = insert_key(&mut set.longs, long.clone(), index) {
                    return Err(duplicate(format!("--{long}"), &set.flags, first, &flag));
                }
            }

            match flag.kind() {
                Kind::Help if set.help.is_none() => set.help = Some(index),
                Kind::Remainder if set.remainder.is_none() => set.remainder = Some(index),
                _ => {}
            }
            set.flags.push(flag);
            Ok(set)
        })
    }

    /// Ends the flag phase and records the keyword of the dispatched verb into `selected`.
    pub fn verbs(mut self, selected: &'a mut Verbs) -> Self {
        self.verbs = true;
        self.map(|mut set| {
            set.selected = Some(selected);
            set
        })
    }

    /// Declares a verb. Its keyword is the name given to `verb`.
    pub fn verb(mut self, verb: Builder<'a>) -> Self {
        self.verbs = true;
        self.try_map(|mut set| {
            let verb = verb.build()?;
            let name = verb.name();
            if name.is_empty() || name.starts_with('-') || name.contains(char::is_whitespace) {
                return Err(Error::InvalidVerbName(name.to_owned()));
            }
            if set.verb(name).is_some() {
                return Err(Error::DuplicateVerb(name.to_owned()));
            }
            set.verbs.push(verb);
            Ok(set)
        })
    }

    /// Applies `pipe` to the builder, for declarations shared between levels.
    pub fn pipe(self, pipe: impl FnOnce(Self) -> Self) -> Self {
        pipe(self)
    }

    pub fn build(self) -> Result<FlagSet<'a>, Error> {
        let set = self.set?;
        debug!(
            "built flag set '{}' with {} flags and {} verbs",
            set.name,
            set.flags.len(),
            set.verbs.len()
        );
        Ok(set)
    }

    fn map(self, map: impl FnOnce(FlagSet<'a>) -> FlagSet<'a>) -> Self {
        self.try_map(|set| Ok(map(set)))
    }

    fn try_map(self, map: impl FnOnce(FlagSet<'a>) -> Result<FlagSet<'a>, Error>) -> Self {
        Self {
            verbs: self.verbs,
            set: self.set.and_then(map),
        }
    }
}

/// Returns the index already registered for `key`, if any.
fn insert_key<K: Hash + Eq>(indices: &mut HashMap<K, usize>, key: K, index: usize) -> Option<usize> {
    match indices.entry(key) {
        Entry::Occupied(entry) => Some(*entry.get()),
        Entry::Vacant(entry) => {
            entry.insert(index);
            None
        }
    }
}

fn duplicate<'a>(name: String, flags: &[Flag<'a>], first: usize, second: &Flag<'a>) -> Error {
    Error::DuplicateName {
        name,
        first: flags.get(first).unwrap_or(second).name(),
        second: second.name(),
    }
}
