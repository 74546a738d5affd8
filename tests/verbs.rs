use std::{error, result};
use tagflags::{Builder, Error, Help, Remainder, Verbs};

type Result = result::Result<(), Box<dyn error::Error>>;

fn logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Default)]
struct Server {
    help: Help,
    server: String,
    verbose: u8,
    verb: Verbs,
    create: Create,
    delete: Delete,
}

#[derive(Default)]
struct Create {
    help: Help,
    name: String,
    template: Option<String>,
}

#[derive(Default)]
struct Delete {
    name: String,
    force: bool,
}

fn parse(server: &mut Server, arguments: &[&'static str]) -> result::Result<(), Error> {
    logger();
    let mut flags = Builder::new("server")
        .flag("-h, --help", &mut server.help)
        .flag("-s, --server, obligatory", &mut server.server)
        .flag("-v, --verbose, accumulate", &mut server.verbose)
        .verbs(&mut server.verb)
        .verb(
            Builder::new("create")
                .flag("-h, --help", &mut server.create.help)
                .flag("-n, --name, obligatory", &mut server.create.name)
                .flag("-t, --template", &mut server.create.template),
        )
        .verb(
            Builder::new("delete")
                .flag("-n, --name, obligatory", &mut server.delete.name)
                .flag("-f, --force", &mut server.delete.force),
        )
        .build()?;
    flags.parse(arguments.iter().copied())
}

#[test]
fn dispatches_to_the_named_verb() -> Result {
    let mut server = Server::default();
    parse(&mut server, &["-vs", "local", "create", "-n", "db", "-t", "empty"])?;
    assert_eq!(server.server, "local");
    assert_eq!(server.verbose, 1);
    assert_eq!(server.verb.selected(), Some("create"));
    assert_eq!(server.create.name, "db");
    assert_eq!(server.create.template.as_deref(), Some("empty"));
    assert!(server.delete.name.is_empty());
    Ok(())
}

#[test]
fn verb_errors_are_returned_unchanged() -> Result {
    let mut server = Server::default();
    assert_eq!(
        parse(&mut server, &["--server", "local", "delete", "-f"]),
        Err(Error::MissingObligatory("--name".into()))
    );
    assert_eq!(server.verb.selected(), Some("delete"));
    assert!(server.delete.force);
    Ok(())
}

#[test]
fn parent_is_validated_after_the_verb() -> Result {
    let mut server = Server::default();
    assert_eq!(
        parse(&mut server, &["delete", "-n", "db"]),
        Err(Error::MissingObligatory("--server".into()))
    );
    assert_eq!(server.delete.name, "db");
    Ok(())
}

#[test]
fn parent_flags_are_not_known_to_verbs() -> Result {
    let mut server = Server::default();
    assert_eq!(
        parse(&mut server, &["create", "-n", "db", "--server", "local"]),
        Err(Error::UnknownFlag("--server".into(), Vec::new()))
    );
    Ok(())
}

#[test]
fn help_in_a_verb() -> Result {
    let mut server = Server::default();
    let error = parse(&mut server, &["-s", "local", "create", "--help"]).unwrap_err();
    assert!(error.is_help());
    assert!(server.create.help.0);
    assert!(!server.help.0);
    Ok(())
}

#[test]
fn help_in_the_parent() -> Result {
    let mut server = Server::default();
    let error = parse(&mut server, &["-h", "delete", "-n", "db"]).unwrap_err();
    assert!(error.is_help());
    Ok(())
}

#[test]
fn unknown_verb_suggests_similar_verbs() -> Result {
    let mut server = Server::default();
    let error = parse(&mut server, &["-s", "local", "craete"]).unwrap_err();
    assert_eq!(
        error,
        Error::UnknownVerb("craete".into(), vec!["create".into()])
    );
    assert_eq!(server.verb.selected(), None);
    Ok(())
}

#[test]
fn verbs_are_listed_in_declaration_order() -> Result {
    let (mut verb, mut quiet) = (Verbs::default(), false);
    let flags = Builder::new("tool")
        .verbs(&mut verb)
        .verb(Builder::new("list"))
        .verb(Builder::new("add").flag("-q", &mut quiet))
        .verb(Builder::new("remove"))
        .build()?;
    assert_eq!(flags.verb_names(), ["list", "add", "remove"]);
    assert_eq!(flags.verb("add").map(|verb| verb.flags().len()), Some(1));
    assert!(flags.verb("rm").is_none());
    Ok(())
}

#[test]
fn verbs_without_a_marker() -> Result {
    let mut force = false;
    let mut flags = Builder::new("tool")
        .verb(Builder::new("clean").flag("-f", &mut force))
        .build()?;
    flags.parse(["clean", "-f"])?;
    drop(flags);
    assert!(force);
    Ok(())
}

#[test]
fn nested_verbs() -> Result {
    logger();
    let (mut outer, mut inner, mut url) = (Verbs::default(), Verbs::default(), String::new());
    let mut flags = Builder::new("git")
        .verbs(&mut outer)
        .verb(
            Builder::new("remote")
                .verbs(&mut inner)
                .verb(Builder::new("add").flag("-u, --url, obligatory", &mut url))
                .verb(Builder::new("remove")),
        )
        .build()?;
    flags.parse(["remote", "add", "--url", "https://example.com"])?;
    drop(flags);
    assert_eq!(outer.selected(), Some("remote"));
    assert_eq!(inner.selected(), Some("add"));
    assert_eq!(url, "https://example.com");
    Ok(())
}

#[test]
fn verb_inherits_the_parent_remainder() -> Result {
    let (mut rest, mut quiet, mut verb) = (Remainder::default(), false, Verbs::default());
    let mut flags = Builder::new("tool")
        .flag("--rest", &mut rest)
        .verbs(&mut verb)
        .verb(Builder::new("run").flag("-q", &mut quiet))
        .build()?;
    flags.parse(["run", "-q", "script.sh", "-x", "--debug"])?;
    drop(flags);
    assert!(quiet);
    assert_eq!(*rest, ["script.sh", "-x", "--debug"]);
    Ok(())
}

#[test]
fn remainder_is_inherited_through_nested_verbs() -> Result {
    let (mut rest, mut outer, mut inner) = (Remainder::default(), Verbs::default(), Verbs::default());
    let mut flags = Builder::new("tool")
        .flag("--rest", &mut rest)
        .verbs(&mut outer)
        .verb(
            Builder::new("a")
                .verbs(&mut inner)
                .verb(Builder::new("b")),
        )
        .build()?;
    flags.parse(["a", "b", "x", "-y"])?;
    drop(flags);
    assert_eq!(outer.selected(), Some("a"));
    assert_eq!(inner.selected(), Some("b"));
    assert_eq!(*rest, ["x", "-y"]);
    Ok(())
}

#[test]
fn verb_remainder_shadows_the_parent_remainder() -> Result {
    let (mut outer, mut inner) = (Remainder::default(), Remainder::default());
    let mut flags = Builder::new("tool")
        .flag("--rest", &mut outer)
        .verb(Builder::new("run").flag("--rest", &mut inner))
        .build()?;
    flags.parse(["run", "one", "two"])?;
    drop(flags);
    assert!(outer.is_empty());
    assert_eq!(*inner, ["one", "two"]);
    Ok(())
}

#[test]
fn verb_without_remainder_rejects_trailing_arguments() -> Result {
    let mut quiet = false;
    let mut flags = Builder::new("tool")
        .verb(Builder::new("run").flag("-q", &mut quiet))
        .build()?;
    assert_eq!(
        flags.parse(["run", "-q", "extra"]),
        Err(Error::TrailingArguments(vec!["extra".into()]))
    );
    Ok(())
}
