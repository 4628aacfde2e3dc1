use commands::command_argument_builder;
use waypoint::handlers::{handle_demo, handle_run, handle_shell, handle_ui};
use waypoint_core::print_banner;

mod commands;

fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    match chosen_command.subcommand() {
        None => {}
        Some(("ui", _)) => handle_ui(&chosen_command),
        Some(("shell", _)) => handle_shell(&chosen_command),
        Some(("demo", sub_matches)) => handle_demo(&chosen_command, sub_matches),
        Some(("run", sub_matches)) => handle_run(&chosen_command, sub_matches),
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
