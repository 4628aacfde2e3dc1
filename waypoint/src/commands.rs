use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("waypoint")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("waypoint")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(
            arg!(--"grid-max" <MAX>)
                .required(false)
                .global(true)
                .help("Largest coordinate on either canvas axis (the canvas starts at 0)")
                .value_parser(clap::value_parser!(i32).range(1..=99))
                .default_value("10"),
        )
        .subcommand_required(false)
        .subcommand(command!("ui").about("Launch the interactive full-screen REPL"))
        .subcommand(
            command!("shell")
                .about("Line-based REPL on stdin/stdout. Type 'help' for the command language."),
        )
        .subcommand(
            command!("demo")
                .about("Find a path on the three-node example graph")
                .arg(
                    arg!(--"from" <NODE>)
                        .required(false)
                        .help("Start node, as \"Node 1\" or 1")
                        .default_value("1"),
                )
                .arg(
                    arg!(--"to" <NODE>)
                        .required(false)
                        .help("Goal node, as \"Node 3\" or 3")
                        .default_value("3"),
                )
                .arg(
                    arg!(--"trace")
                        .required(false)
                        .help("Include every step of the algorithm in the report")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, markdown")
                        .value_parser(["text", "json", "markdown", "md"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("run")
                .about("Run ';'-separated console commands against a fresh graph")
                .arg(
                    arg!(<COMMANDS>)
                        .required(true)
                        .num_args(1..)
                        .help("e.g. \"node add 0 0; node add 2 2; edge add 1 2 4; path 1 2\""),
                ),
        )
}
