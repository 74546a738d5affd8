use std::{
    borrow::Cow,
    num::{ParseFloatError, ParseIntError},
    ops::{Deref, DerefMut},
};

/// The kind of a flag, derived from the type of the slot it is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Boolean,
    String,
    Integer,
    Float,
    Help,
    Remainder,
    Marshaled,
    Multi(Box<Kind>),
}

/// What the parser feeds to a slot when its flag is matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'i> {
    /// The flag was matched and takes no value.
    Switch,
    /// An accumulating flag was matched once more.
    Count,
    /// The argument following the flag.
    Text(&'i str),
    /// Every argument from the first trailing one onwards.
    Rest(Vec<String>),
}

/// A write slot into the caller's data.
///
/// Implemented for `bool`, `String`, the integer and float primitives, [`Help`], [`Remainder`],
/// and for `Option<T>` and `Vec<T>` where `T: Marshal`.
pub trait Value {
    fn kind(&self) -> Kind;
    fn set(&mut self, input: Input) -> Result<(), Cow<'static, str>>;

    /// Whether the slot can be used as an `accumulate` counter.
    fn counts(&self) -> bool {
        false
    }

    /// The current value, if it differs from the zero value. Used to show defaults in help.
    fn display(&self) -> Option<String> {
        None
    }
}

/// Conversion of a single argument into a value.
///
/// Implement this for your own types to bind them as `Option<T>` or `Vec<T>` slots.
///
/// ```
/// use std::borrow::Cow;
/// use tagflags::Marshal;
///
/// struct Name(String, String);
///
/// impl Marshal for Name {
///     fn marshal(text: &str) -> Result<Self, Cow<'static, str>> {
///         let (first, last) = text.split_once(' ').ok_or("incomplete name")?;
///         Ok(Name(first.into(), last.into()))
///     }
/// }
/// ```
pub trait Marshal: Sized {
    fn marshal(text: &str) -> Result<Self, Cow<'static, str>>;

    fn kind() -> Kind {
        Kind::Marshaled
    }

    fn show(&self) -> Option<String> {
        None
    }
}

/// Marks the help flag. Parsing returns [`crate::Error::Help`] when it is specified.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Help(pub bool);

/// Captures every argument after the last flag when no verb applies.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Remainder(pub Vec<String>);

/// Records the keyword of the verb that was dispatched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Verbs(pub Option<String>);

impl Kind {
    pub fn needs_value(&self) -> bool {
        !matches!(self, Kind::Boolean | Kind::Help | Kind::Remainder)
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, Kind::Multi(_))
    }
}

impl Input<'_> {
    pub(crate) fn text(&self) -> Option<&str> {
        match self {
            Input::Text(text) => Some(text),
            _ => None,
        }
    }

    fn unexpected(&self) -> Cow<'static, str> {
        match self {
            Input::Switch => "a value is required".into(),
            Input::Count => "cannot be accumulated".into(),
            Input::Text(_) => "does not take a value".into(),
            Input::Rest(_) => "cannot capture trailing arguments".into(),
        }
    }
}

impl Verbs {
    pub fn selected(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl Deref for Remainder {
    type Target = Vec<String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Remainder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Value for bool {
    fn kind(&self) -> Kind {
        Kind::Boolean
    }

    fn set(&mut self, input: Input) -> Result<(), Cow<'static, str>> {
        match input {
            Input::Switch => {
                *self = true;
                Ok(())
            }
            input => Err(input.unexpected()),
        }
    }

    fn display(&self) -> Option<String> {
        self.then(|| "true".to_owned())
    }
}

impl Value for Help {
    fn kind(&self) -> Kind {
        Kind::Help
    }

    fn set(&mut self, input: Input) -> Result<(), Cow<'static, str>> {
        match input {
            Input::Switch => {
                self.0 = true;
                Ok(())
            }
            input => Err(input.unexpected()),
        }
    }
}

impl Value for Remainder {
    fn kind(&self) -> Kind {
        Kind::Remainder
    }

    fn set(&mut self, input: Input) -> Result<(), Cow<'static, str>> {
        match input {
            // Naming the remainder flag only marks it.
            Input::Switch => Ok(()),
            Input::Rest(arguments) => {
                self.0 = arguments;
                Ok(())
            }
            input => Err(input.unexpected()),
        }
    }
}

impl Marshal for String {
    fn marshal(text: &str) -> Result<Self, Cow<'static, str>> {
        Ok(text.to_owned())
    }

    fn kind() -> Kind {
        Kind::String
    }

    fn show(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.clone())
    }
}

impl Value for String {
    fn kind(&self) -> Kind {
        Kind::String
    }

    fn set(&mut self, input: Input) -> Result<(), Cow<'static, str>> {
        match input {
            Input::Text(text) => {
                *self = Self::marshal(text)?;
                Ok(())
            }
            input => Err(input.unexpected()),
        }
    }

    fn display(&self) -> Option<String> {
        self.show()
    }
}

macro_rules! integer {
    ($($type: ty),*) => {$(
        impl Marshal for $type {
            fn marshal(text: &str) -> Result<Self, Cow<'static, str>> {
                text.parse()
                    .map_err(|error: ParseIntError| Cow::Owned(error.to_string()))
            }

            fn kind() -> Kind {
                Kind::Integer
            }

            fn show(&self) -> Option<String> {
                (*self != 0).then(|| self.to_string())
            }
        }

        impl Value for $type {
            fn kind(&self) -> Kind {
                Kind::Integer
            }

            fn set(&mut self, input: Input) -> Result<(), Cow<'static, str>> {
                match input {
                    Input::Count => {
                        *self = self.checked_add(1).ok_or("counter overflow")?;
                        Ok(())
                    }
                    Input::Text(text) => {
                        *self = <$type as Marshal>::marshal(text)?;
                        Ok(())
                    }
                    input => Err(input.unexpected()),
                }
            }

            fn counts(&self) -> bool {
                true
            }

            fn display(&self) -> Option<String> {
                Marshal::show(self)
            }
        }
    )*};
}

macro_rules! float {
    ($($type: ty),*) => {$(
        impl Marshal for $type {
            fn marshal(text: &str) -> Result<Self, Cow<'static, str>> {
                text.parse()
                    .map_err(|error: ParseFloatError| Cow::Owned(error.to_string()))
            }

            fn kind() -> Kind {
                Kind::Float
            }

            fn show(&self) -> Option<String> {
                (*self != 0.0).then(|| self.to_string())
            }
        }

        impl Value for $type {
            fn kind(&self) -> Kind {
                Kind::Float
            }

            fn set(&mut self, input: Input) -> Result<(), Cow<'static, str>> {
                match input {
                    Input::Text(text) => {
                        *self = <$type as Marshal>::marshal(text)?;
                        Ok(())
                    }
                    input => Err(input.unexpected()),
                }
            }

            fn display(&self) -> Option<String> {
                Marshal::show(self)
            }
        }
    )*};
}

integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
float!(f32, f64);

impl<T: Marshal> Value for Option<T> {
    fn kind(&self) -> Kind {
        T::kind()
    }

    fn set(&mut self, input: Input) -> Result<(), Cow<'static, str>> {
        match input {
            Input::Text(text) => {
                *self = Some(T::marshal(text)?);
                Ok(())
            }
            input => Err(input.unexpected()),
        }
    }

    fn display(&self) -> Option<String> {
        self.as_ref().and_then(T::show)
    }
}

impl<T: Marshal> Value for Vec<T> {
    fn kind(&self) -> Kind {
        Kind::Multi(Box::new(T::kind()))
    }

    fn set(&mut self, input: Input) -> Result<(), Cow<'static, str>> {
        match input {
            Input::Text(text) => {
                self.push(T::marshal(text)?);
                Ok(())
            }
            input => Err(input.unexpected()),
        }
    }

    fn display(&self) -> Option<String> {
        let shown = self.iter().filter_map(T::show).collect::<Vec<_>>();
        (!shown.is_empty()).then(|| shown.join(", "))
    }
}
