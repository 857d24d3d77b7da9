//! `nn`: browse notebooks of plain-text notes in the terminal and open them
//! in an external editor.

pub mod config;
pub mod controller;
pub mod editor;
pub mod error;
pub mod fixture;
pub mod formatting;
pub mod help;
pub mod logging;
pub mod note;
pub mod paths;
pub mod selection;
pub mod store;
pub mod tui;

use config::Config;
use formatting::FormatContext;
use std::env;
use std::error::Error;

pub fn entry() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    logging::init_from_env()?;
    let config = Config::from_env()?;
    let ctx = FormatContext::from_env();

    let Some((cmd, rest)) = args.split_first() else {
        return tui::run(&config);
    };

    match (cmd.as_str(), rest.is_empty()) {
        ("init" | "check" | "new" | "sync", true) => {
            println!("nn {cmd} - not implemented");
        }
        ("show", true) => {
            if let Err(err) = editor::show_tree(&config.notes_dir) {
                eprintln!(
                    "{} {err}",
                    ctx.format_error("Cannot execute command:")
                );
                std::process::exit(1);
            }
        }
        ("help", _) => print_lines(&help::render(rest, Some(&config), &ctx)),
        _ => print_lines(&help::render(&[], Some(&config), &ctx)),
    }
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
