use super::cli_args::{Cli, Commands, EstimateArgs, TableArgs};
use super::cli_examples::print_all_examples;
use super::cli_table::print_volume_table;
use crate::errors::HofCalcError;
use crate::hofcalc_api::HofCalc;
use crate::settings::Settings;
use log::{error, info};
use prettytable::{Cell, Row, Table};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Runs the chosen subcommand, or the interactive menu when there is none.
pub fn run(cli: Cli) -> Result<(), HofCalcError> {
    let settings = Settings::load(&cli.config)?;
    match cli.command {
        Some(Commands::Estimate(args)) => run_estimate(settings, &args),
        Some(Commands::Table(args)) => run_table(&settings, &args),
        Some(Commands::HelpExamples) => {
            print_all_examples();
            Ok(())
        }
        None => run_interactive_menu(settings, &cli.config),
    }
}

/// Settings with the command line overrides applied
pub fn apply_overrides(mut settings: Settings, args: &EstimateArgs) -> Settings {
    if let Some(t) = args.temperature {
        settings.temperature = t;
    }
    if let Some(cell) = args.unit_cell_volume {
        settings.unit_cell_volume = Some(cell);
    }
    if let Some(split) = args.split {
        settings.split_mode = split.into();
    }
    if args.no_lookup {
        settings.lookup.enabled = false;
    }
    if let Some(dir) = &args.export {
        settings.export_dir = Some(dir.to_string_lossy().into_owned());
    }
    settings
}

fn run_estimate(settings: Settings, args: &EstimateArgs) -> Result<(), HofCalcError> {
    let session = HofCalc::new(apply_overrides(settings, args))?;
    let report = session.estimate(&args.input)?;
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        report.print_report();
    }
    if let Some(path) = session.export(&report)? {
        println!("Summary saved to {}", path.display());
    }
    Ok(())
}

fn run_table(settings: &Settings, args: &TableArgs) -> Result<(), HofCalcError> {
    let table = settings.load_volume_table()?;
    print_volume_table(&table, args.temperature);
    if let Some(path) = &args.save {
        table.save_json(path)?;
        println!("Table saved to {}", path.display());
    }
    Ok(())
}

pub fn run_interactive_menu(settings: Settings, config_path: &Path) -> Result<(), HofCalcError> {
    let mut session = HofCalc::new(settings)?;
    loop {
        show_main_menu();
        let Some(choice) = get_user_input() else {
            break;
        };

        match choice.trim() {
            "1" => estimation_menu(&session),
            "2" => print_volume_table(session.table(), session.settings().temperature),
            "3" => print_all_examples(),
            "4" => settings_menu(&mut session, config_path),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
    Ok(())
}

/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - prompts

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() {
    println!(
        "\x1b[34m\n Welcome to HofCalc: crystallographic volume estimation\n
    from Hofmann atomic volumes \n \x1b[0m"
    );
    println!("\x1b[33m1. Volume estimation\x1b[0m");
    println!("\x1b[33m2. Hofmann volumes table\x1b[0m");
    println!("\x1b[33m3. Help and examples\x1b[0m");
    println!("\x1b[33m4. Settings\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    prompt("Enter your choice: ");
}

fn estimation_menu(session: &HofCalc) {
    let mut settings = session.settings().clone();
    prompt("Search terms (separate fragments with ';'): ");
    let Some(input) = get_user_input() else {
        return;
    };
    if input.trim().is_empty() {
        println!("Nothing to estimate.");
        return;
    }

    prompt(&format!("Temperature / K [{}]: ", settings.temperature));
    match get_user_input().as_deref().map(str::trim) {
        Some("") | None => {}
        Some(t) => match t.parse::<f64>() {
            Ok(t) => settings.temperature = t,
            Err(_) => {
                println!("'{}' is not a temperature, using {} K", t, settings.temperature);
            }
        },
    }

    prompt("Unit cell volume / Å3 (optional): ");
    match get_user_input().as_deref().map(str::trim) {
        Some("") | None => {}
        Some(v) => match v.parse::<f64>() {
            Ok(v) => settings.unit_cell_volume = Some(v),
            Err(_) => println!("'{}' is not a volume, ignored", v),
        },
    }

    let report = match session.estimate_with(input.trim(), &settings) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            println!("\x1b[31m{}\x1b[0m", e);
            return;
        }
    };
    report.print_report();

    prompt("Save summary file? (y/N): ");
    if let Some(answer) = get_user_input() {
        if answer.trim().eq_ignore_ascii_case("y") {
            let dir = settings
                .export_dir
                .clone()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            match report.write_summary(&dir) {
                Ok(path) => println!("Summary saved to {}", path.display()),
                Err(e) => println!("\x1b[31m{}\x1b[0m", e),
            }
        }
    }
}

fn settings_menu(session: &mut HofCalc, config_path: &Path) {
    loop {
        let mut table = Table::new();
        table.add_row(Row::new(vec![Cell::new("Setting"), Cell::new("Value")]));
        for (name, value) in session.settings().describe() {
            table.add_row(Row::new(vec![Cell::new(name), Cell::new(&value)]));
        }
        table.printstd();
        println!("\x1b[33m<setting> <value>\x1b[0m change a setting (e.g. 'temperature 293')");
        println!("\x1b[33ms\x1b[0m save to {}", config_path.display());
        println!("\x1b[33m0\x1b[0m back to main menu");
        prompt("> ");

        let Some(line) = get_user_input() else {
            return;
        };
        let line = line.trim();
        match line {
            "" | "0" => return,
            "s" => match session.settings().save(config_path) {
                Ok(()) => println!("Settings saved to {}", config_path.display()),
                Err(e) => println!("\x1b[31m{}\x1b[0m", e),
            },
            _ => {
                let (key, value) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
                let mut settings = session.settings().clone();
                let result = settings
                    .set_option(key, value)
                    .and_then(|_| session.update_settings(settings));
                match result {
                    Ok(()) => info!("setting '{}' changed to '{}'", key, value.trim()),
                    Err(e) => println!("\x1b[31m{}\x1b[0m", e),
                }
            }
        }
    }
}

fn prompt(text: &str) {
    print!("\x1b[36m{}\x1b[0m", text);
    let _ = io::stdout().flush();
}

/// None on end of input or a read error
fn get_user_input() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input),
    }
}
