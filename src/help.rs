use crate::{
    flag::Flag,
    parse::FlagSet,
    style::{Item, Style},
};
use std::fmt::{self, Write};

const SEPARATOR: &str = ", ";
const OBLIGATORY: &str = "(*)";

struct Helper<'h, S: ?Sized> {
    buffer: &'h mut String,
    style: &'h S,
}

impl<S: Style + ?Sized> Helper<'_, S> {
    fn styled(&mut self, item: Item, value: impl fmt::Display) -> Result<(), fmt::Error> {
        self.style.begin(item, self.buffer)?;
        write!(self.buffer, "{value}")?;
        self.style.end(item, self.buffer)
    }

    fn space(&mut self, width: usize) -> Result<(), fmt::Error> {
        write!(self.buffer, "{:width$}", "")
    }

    fn usage(&mut self, set: &FlagSet) -> Result<(), fmt::Error> {
        let mut usage = format!("Usage: {} [global options]", set.name());
        if !set.verbs().is_empty() {
            usage.push_str(" <verb> [verb options]");
        }
        self.styled(Item::Usage, usage)?;
        writeln!(self.buffer)?;
        writeln!(self.buffer)
    }

    fn node(&mut self, set: &FlagSet, indent: usize) -> Result<(), fmt::Error> {
        self.table(set.flags(), indent)?;
        if set.verbs().is_empty() {
            return Ok(());
        }

        writeln!(self.buffer)?;
        self.space(indent.saturating_sub(self.style.indent()))?;
        self.styled(Item::Group, "Verbs:")?;
        writeln!(self.buffer)?;
        for verb in set.verbs() {
            self.space(indent)?;
            self.styled(Item::Verb, format_args!("{}:", verb.name()))?;
            writeln!(self.buffer)?;
            self.node(verb, indent + self.style.indent())?;
        }
        Ok(())
    }

    fn table(&mut self, flags: &[Flag], indent: usize) -> Result<(), fmt::Error> {
        let flags = flags
            .iter()
            .filter(|flag| !flag.tag().is_anonymous())
            .map(|flag| (shorts(flag), longs(flag), flag))
            .collect::<Vec<_>>();
        let short = flags.iter().map(|(short, _, _)| width(short)).max().unwrap_or(0);
        let long = flags.iter().map(|(_, long, _)| width(long)).max().unwrap_or(0);
        let column = indent + short + long + 2;

        for (shorts, longs, flag) in flags.iter() {
            self.space(indent)?;
            self.styled(Item::Option, shorts)?;
            self.space(short - width(shorts) + 1)?;
            self.styled(Item::Option, longs)?;
            self.space(long - width(longs) + 1)?;
            self.describe(flag, column)?;
            let end = self.buffer.trim_end_matches(' ').len();
            self.buffer.truncate(end);
            writeln!(self.buffer)?;
        }
        Ok(())
    }

    fn describe(&mut self, flag: &Flag, column: usize) -> Result<(), fmt::Error> {
        let limit = self.style.width().max(column + 16);
        let mut cursor = column;
        let mut words = flag.description().split_whitespace().peekable();
        if words.peek().is_some() {
            self.style.begin(Item::Description, self.buffer)?;
            for word in words {
                cursor = self.word(word, cursor, column, limit)?;
            }
            self.style.end(Item::Description, self.buffer)?;
        }

        let mut tags = Vec::new();
        if let Some(value) = flag.default_value() {
            tags.push(format!("(default: {value})"));
        }
        if flag.is_obligatory() {
            tags.push(OBLIGATORY.to_owned());
        }
        for tag in tags {
            if cursor + width(&tag) > limit && cursor > column {
                writeln!(self.buffer)?;
                self.space(column)?;
                cursor = column;
            } else if cursor > column {
                write!(self.buffer, " ")?;
                cursor += 1;
            }
            self.styled(Item::Tag, &tag)?;
            cursor += width(&tag);
        }
        Ok(())
    }

    fn word(
        &mut self,
        word: &str,
        cursor: usize,
        column: usize,
        limit: usize,
    ) -> Result<usize, fmt::Error> {
        let mut cursor = cursor;
        if cursor > column {
            if cursor + 1 + width(word) > limit {
                writeln!(self.buffer)?;
                self.space(column)?;
                cursor = column;
            } else {
                write!(self.buffer, " ")?;
                cursor += 1;
            }
        }
        write!(self.buffer, "{word}")?;
        Ok(cursor + width(word))
    }
}

pub(crate) fn help<S: Style + ?Sized>(set: &FlagSet, style: &S) -> Result<String, fmt::Error> {
    let mut buffer = String::new();
    let mut helper = Helper {
        buffer: &mut buffer,
        style,
    };
    helper.usage(set)?;
    helper.styled(Item::Group, "Global options:")?;
    writeln!(helper.buffer)?;
    helper.node(set, style.indent())?;
    Ok(buffer)
}

fn shorts(flag: &Flag) -> String {
    let shorts = flag
        .shorts()
        .iter()
        .map(|short| format!("-{short}"))
        .collect::<Vec<_>>();
    match shorts.is_empty() || flag.longs().is_empty() {
        true => shorts.join(SEPARATOR),
        false => format!("{},", shorts.join(SEPARATOR)),
    }
}

fn longs(flag: &Flag) -> String {
    flag.longs()
        .iter()
        .map(|long| format!("--{long}"))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

fn width(value: &str) -> usize {
    value.chars().count()
}
