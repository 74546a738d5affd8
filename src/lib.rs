mod build;
mod error;
mod execute;
mod flag;
mod help;
mod mutex;
mod parse;
mod spell;
pub mod style;
mod tag;
mod value;

pub use crate::{
    build::Builder,
    error::Error,
    execute::{execute, execute_env, Execute},
    flag::Flag,
    mutex::MutexGroup,
    parse::FlagSet,
    spell::Spell,
    tag::Tag,
    value::{Help, Input, Kind, Marshal, Remainder, Value, Verbs},
};

/*
    TODO:
    - Render the mutex groups in the help text.
*/
