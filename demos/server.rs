use std::process::exit;
use tagflags::{Builder, Error, Help, Remainder, Verbs};

#[derive(Default)]
struct Server {
    help: Help,
    server: String,
    port: Option<u16>,
    verbose: u8,
    json: bool,
    yaml: bool,
    verb: Verbs,
    create: Create,
    delete: Delete,
    rest: Remainder,
}

#[derive(Default)]
struct Create {
    name: String,
    template: Option<String>,
}

#[derive(Default)]
struct Delete {
    names: Vec<String>,
    force: bool,
}

fn main() {
    env_logger::init();
    let mut server = Server::default();
    match parse(&mut server) {
        Ok(true) => {}
        Ok(false) => exit(0),
        Err(error) => {
            eprintln!("{error}");
            exit(2);
        }
    }

    println!("server: {} (port {:?}, verbosity {})", server.server, server.port, server.verbose);
    println!("format: {}", if server.json { "json" } else if server.yaml { "yaml" } else { "text" });
    match server.verb.selected() {
        Some("create") => println!("create '{}' from {:?}", server.create.name, server.create.template),
        Some("delete") => println!("delete {:?} (force: {})", server.delete.names, server.delete.force),
        _ => println!("nothing to do"),
    }
    if !server.rest.is_empty() {
        println!("rest: {:?}", *server.rest);
    }
}

/// Returns `false` when help was printed.
fn parse(server: &mut Server) -> Result<bool, Error> {
    let mut flags = Builder::new("server")
        .flag("-h, --help, description='Shows this help.'", &mut server.help)
        .flag("-s, --server, obligatory, description='The server to talk to.'", &mut server.server)
        .flag("-p, --port, description='The port of the server.'", &mut server.port)
        .flag("-v, --verbose, accumulate, description='More output, once per occurrence.'", &mut server.verbose)
        .flag("--json, mutexgroup='format', description='Prints JSON.'", &mut server.json)
        .flag("--yaml, mutexgroup='format', description='Prints YAML.'", &mut server.yaml)
        .flag("--rest, description='Arguments passed along to the server.'", &mut server.rest)
        .verbs(&mut server.verb)
        .verb(
            Builder::new("create")
                .flag("-n, --name, obligatory, description='Name of the database.'", &mut server.create.name)
                .flag("-t, --template, description='Template to start from.'", &mut server.create.template),
        )
        .verb(
            Builder::new("delete")
                .flag("-n, --name, description='Database to delete. May be repeated.'", &mut server.delete.names)
                .flag("-f, --force, description='Do not ask for confirmation.'", &mut server.delete.force),
        )
        .build()?;

    match flags.parse_env() {
        Ok(()) => Ok(true),
        Err(error) if error.is_help() => {
            flags.print_help()?;
            Ok(false)
        }
        Err(error) => Err(error),
    }
}
