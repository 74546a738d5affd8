use self::color::*;
use std::fmt::{self, Write};
use termion::{
    color::Fg,
    style::{Bold, Faint, Italic, Reset, Underline},
};

/// Styled text for the terminal, wrapped to its width.
pub struct Default;
/// Unstyled text wrapped at a fixed width.
pub struct Plain;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Item {
    Usage,
    Group,
    Verb,
    Option,
    Description,
    Tag,
}

pub trait Style {
    fn indent(&self) -> usize;
    fn width(&self) -> usize;
    fn begin(&self, item: Item, write: &mut dyn Write) -> fmt::Result;
    fn end(&self, item: Item, write: &mut dyn Write) -> fmt::Result;
}

impl Style for Default {
    #[inline]
    fn indent(&self) -> usize {
        4
    }

    #[inline]
    fn width(&self) -> usize {
        term_size::dimensions().map_or(96, |(width, _)| width.max(40))
    }

    fn begin(&self, item: Item, write: &mut dyn Write) -> fmt::Result {
        match item {
            Item::Usage => write!(write, "{Underline}{}", Fg(VIOLET)),
            Item::Group => write!(write, "{Bold}{}", Fg(OCEAN_BLUE)),
            Item::Verb => write!(write, "{Bold}{}", Fg(TURQUOISE)),
            Item::Option => write!(write, "{}", Fg(TURQUOISE)),
            Item::Description => write!(write, "{}", Fg(PEACH)),
            Item::Tag => write!(write, "{Faint}{Italic}{}", Fg(CORAL_PINK)),
        }
    }

    fn end(&self, _: Item, write: &mut dyn Write) -> fmt::Result {
        write!(write, "{Reset}")
    }
}

impl Style for Plain {
    #[inline]
    fn indent(&self) -> usize {
        4
    }

    #[inline]
    fn width(&self) -> usize {
        96
    }

    fn begin(&self, _: Item, _: &mut dyn Write) -> fmt::Result {
        Ok(())
    }

    fn end(&self, _: Item, _: &mut dyn Write) -> fmt::Result {
        Ok(())
    }
}

pub mod color {
    use termion::color::Rgb;

    pub const OCEAN_BLUE: Rgb = Rgb(36, 113, 163);
    pub const TURQUOISE: Rgb = Rgb(64, 224, 208);
    pub const CORAL_PINK: Rgb = Rgb(255, 127, 80);
    pub const VIOLET: Rgb = Rgb(238, 130, 238);
    pub const PEACH: Rgb = Rgb(255, 218, 185);
}
