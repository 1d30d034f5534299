use clap::{Arg, ArgAction, Command};
use log::debug;

fn camera_arg() -> Arg {
    Arg::new("camera")
        .long("camera")
        .value_name("INDEX")
        .help("Camera device index to capture from (overrides config)")
        .value_parser(clap::value_parser!(i32))
        .action(ArgAction::Set)
}

fn root_arg() -> Arg {
    Arg::new("root")
        .long("root")
        .value_name("DIR")
        .help("Working root holding snapshots/, dataset_<N>/ and common_dataset/ (overrides config)")
        .action(ArgAction::Set)
}

pub fn build_cli() -> Command {
    debug!("⚙️ Building CLI interface...");
    Command::new("camset")
        .version("0.1.0")
        .author("Camset Developers")
        .about("An interactive tool for capturing camera frames into numbered dataset folders, with snapshot and merge support.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom configuration file")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("live")
                .about("Shows the live feed with record/snap/merge controls (the default when no subcommand is given)")
                .arg(camera_arg())
                .arg(root_arg()),
        )
        .subcommand(
            Command::new("snap")
                .about("Captures a single snapshot headlessly and exits")
                .arg(camera_arg())
                .arg(root_arg()),
        )
        .subcommand(
            Command::new("merge")
                .about("Merges all snapshots and session folders into the common dataset")
                .arg(root_arg()),
        )
}
