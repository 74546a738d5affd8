use std::{
    error,
    fmt::{self, Write},
    result,
};
use tagflags::{
    style::{self, Item, Style},
    Builder, Help, Verbs,
};

type Result = result::Result<(), Box<dyn error::Error>>;

#[test]
fn renders_flags_and_verbs() -> Result {
    let (mut help, mut server, mut verbose, mut port) = (Help::default(), String::new(), 0u8, 8080u16);
    let (mut verb, mut name) = (Verbs::default(), String::new());
    let flags = Builder::new("tool")
        .flag("-h, --help, description='Shows this help.'", &mut help)
        .flag("-s, --server, obligatory, description='The server to talk to.'", &mut server)
        .flag("-v, --verbose, accumulate", &mut verbose)
        .flag("--port, description='The port.'", &mut port)
        .verbs(&mut verb)
        .verb(Builder::new("create").flag("-n, --name, description='Name of the database.'", &mut name))
        .build()?;
    let expected = "\
Usage: tool [global options] <verb> [verb options]

Global options:
    -h, --help    Shows this help.
    -s, --server  The server to talk to. (*)
    -v, --verbose
        --port    The port. (default: 8080)

Verbs:
    create:
        -n, --name Name of the database.
";
    assert_eq!(flags.help(&style::Plain)?, expected);
    Ok(())
}

#[test]
fn anonymous_flags_are_hidden() -> Result {
    let (mut hidden, mut shown) = (false, false);
    let flags = Builder::new("tool")
        .flag("description='Hidden.'", &mut hidden)
        .flag("--shown, description='Shown.'", &mut shown)
        .build()?;
    let help = flags.help(&style::Plain)?;
    assert!(help.starts_with("Usage: tool [global options]\n"));
    assert!(!help.contains("Hidden."));
    assert!(help.contains("--shown Shown."));
    Ok(())
}

struct Narrow;

impl Style for Narrow {
    fn indent(&self) -> usize {
        2
    }

    fn width(&self) -> usize {
        40
    }

    fn begin(&self, _: Item, _: &mut dyn Write) -> fmt::Result {
        Ok(())
    }

    fn end(&self, _: Item, _: &mut dyn Write) -> fmt::Result {
        Ok(())
    }
}

#[test]
fn descriptions_wrap_to_the_style_width() -> Result {
    let description = "Describes the thing in so many words that a single line of forty columns cannot hold all of them.";
    let mut flag = false;
    let tag = format!("-d, --describe, description='{description}'");
    let flags = Builder::new("tool").flag(&tag, &mut flag).build()?;
    let help = flags.help(&Narrow)?;

    let lines = help.lines().collect::<Vec<_>>();
    assert!(lines.iter().all(|line| line.chars().count() <= 40));
    let row = lines
        .iter()
        .position(|line| line.starts_with("  -d, --describe "))
        .ok_or("missing row")?;
    let continued = &lines[row + 1..];
    assert!(continued.len() >= 2);
    assert!(continued.iter().all(|line| line.starts_with(&" ".repeat(17))));
    let words = help.split_whitespace().collect::<Vec<_>>().join(" ");
    assert!(words.contains(description));
    Ok(())
}

#[test]
fn default_style_adds_escapes() -> Result {
    let mut server = String::from("local");
    let flags = Builder::new("tool")
        .flag("-s, --server, description='The server.'", &mut server)
        .build()?;
    let help = flags.help(&style::Default)?;
    assert!(help.contains("--server"));
    assert!(help.contains("local"));
    assert!(help.contains('\u{1b}'));
    Ok(())
}

#[test]
fn custom_renderer_replaces_the_layout() -> Result {
    let (mut help, mut server, mut verb) = (Help::default(), String::new(), Verbs::default());
    let flags = Builder::new("tool")
        .flag("-h, --help", &mut help)
        .flag("-s, --server, description='The server.'", &mut server)
        .verbs(&mut verb)
        .verb(Builder::new("create"))
        .verb(Builder::new("delete"))
        .build()?;
    let help = flags.help_with(|flags, out| {
        writeln!(out, "{}:", flags.name())?;
        for flag in flags.flags() {
            writeln!(out, "{}", flag.name())?;
        }
        writeln!(out, "[{}]", flags.verb_names().join("|"))
    })?;
    assert_eq!(help, "tool:\n--help\n--server\n[create|delete]\n");
    Ok(())
}
