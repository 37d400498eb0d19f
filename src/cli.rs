/// Command line arguments (clap derive).
pub mod cli_args;
/// Help text and worked examples printed as tables.
pub mod cli_examples;
/// Subcommand dispatch and the interactive menu.
pub mod cli_main;
/// Hofmann volume table printed at a chosen temperature.
pub mod cli_table;
pub mod logging;
