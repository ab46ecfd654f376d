//! Line-oriented front end: commands in, rendered form and listing out.
mod command;
mod render;
mod session;

pub(crate) use session::{connect, print_employees, run_wizard};
