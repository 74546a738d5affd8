use crate::{
    error::Error,
    tag::Tag,
    value::{Input, Kind, Value},
};
use std::{borrow::Cow, collections::VecDeque, fmt};

/// A declared flag, bound to a slot in the caller's data.
pub struct Flag<'a> {
    pub(crate) tag: Tag,
    pub(crate) kind: Kind,
    pub(crate) specified: bool,
    pub(crate) value: &'a mut dyn Value,
}

impl<'a> Flag<'a> {
    pub(crate) fn new(tag: Tag, value: &'a mut dyn Value) -> Result<Self, Error> {
        if tag.accumulate && !value.counts() {
            return Err(Error::InvalidAccumulate(tag.name()));
        }
        Ok(Self {
            kind: value.kind(),
            specified: false,
            tag,
            value,
        })
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn shorts(&self) -> &[char] {
        &self.tag.shorts
    }

    pub fn longs(&self) -> &[String] {
        &self.tag.longs
    }

    pub fn description(&self) -> &str {
        &self.tag.description
    }

    pub fn groups(&self) -> &[String] {
        &self.tag.groups
    }

    pub const fn is_obligatory(&self) -> bool {
        self.tag.obligatory
    }

    pub const fn accumulates(&self) -> bool {
        self.tag.accumulate
    }

    pub const fn kind(&self) -> &Kind {
        &self.kind
    }

    pub const fn was_specified(&self) -> bool {
        self.specified
    }

    pub fn name(&self) -> String {
        self.tag.name()
    }

    /// Whether the argument following the flag is consumed as its value.
    pub fn needs_value(&self) -> bool {
        !self.tag.accumulate && self.kind.needs_value()
    }

    /// Whether the flag may be specified more than once.
    pub fn repeats(&self) -> bool {
        self.tag.accumulate || self.kind.is_multi()
    }

    /// The slot's current value when it is not the zero value.
    pub fn default_value(&self) -> Option<String> {
        self.value.display()
    }

    /// Applies one occurrence of the flag, taking its value from `arguments` when it needs one.
    pub(crate) fn matched(
        &mut self,
        arguments: &mut VecDeque<Cow<'static, str>>,
    ) -> Result<(), Error> {
        if self.specified && !self.repeats() {
            return Err(Error::DuplicateFlag(self.name()));
        }
        if self.needs_value() {
            let Some(argument) = arguments.pop_front() else {
                return Err(Error::MissingValue(self.name()));
            };
            self.assign(Input::Text(&argument))
        } else if self.tag.accumulate {
            self.assign(Input::Count)
        } else {
            self.assign(Input::Switch)
        }
    }

    /// Hands every trailing argument to a remainder slot.
    pub(crate) fn capture(&mut self, arguments: Vec<String>) -> Result<(), Error> {
        self.assign(Input::Rest(arguments))
    }

    fn assign(&mut self, input: Input) -> Result<(), Error> {
        let text = input.text().map(str::to_owned);
        self.value.set(input).map_err(|reason| Error::InvalidValue {
            flag: self.tag.name(),
            value: text.unwrap_or_default(),
            reason,
        })?;
        self.specified = true;
        Ok(())
    }
}

impl fmt::Debug for Flag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("tag", &self.tag)
            .field("kind", &self.kind)
            .field("specified", &self.specified)
            .finish()
    }
}
