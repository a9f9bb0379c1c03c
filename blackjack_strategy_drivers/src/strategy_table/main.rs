mod report;

use blackjack_strategy::{Calculator, EquationKey, Shoe};
use blackjack_strategy_drivers::{parse_config_from_file, Config, DriverError};
use clap::Parser;
use log::{error, info};

const DEFAULT_CONFIG_PATH: &str = "~/.blackjack_strategy.yml";
const DEFAULT_CONFIG_FILE_NAME: &str = ".blackjack_strategy.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Print the equations and solved values of one cell, such as 16_T or s18_A
    #[arg(long)]
    explain: Option<EquationKey>,

    /// Compare exact and simulated stand expectations of a player total
    #[arg(long, value_parser = clap::value_parser!(u8).range(3..=21))]
    simulate: Option<u8>,

    /// Number of dealer hands per up-card when simulating
    #[arg(long, default_value_t = 100_000)]
    hands: u32,
}

/// The default path falls back to the built-in config when the file is
/// missing. Any other path must exist.
fn load_config(path: &str) -> Result<Config, DriverError> {
    if path != DEFAULT_CONFIG_PATH {
        return parse_config_from_file(path);
    }
    let home_dir = home::home_dir().ok_or(DriverError::NoHomeDirectory)?;
    let config_file_path = home_dir.join(DEFAULT_CONFIG_FILE_NAME);
    if !config_file_path.is_file() {
        info!(
            "{} not found, using the default config",
            config_file_path.display()
        );
        return Ok(Config::default());
    }
    parse_config_from_file(&config_file_path.to_string_lossy())
}

fn run(args: &CommandLineArgs) -> Result<(), DriverError> {
    let config = load_config(&args.config)?;
    let style = config.strategy_table.table_style()?;
    let shoe: Shoe = config.shoe.try_into()?;

    let calculator = Calculator::new()?;
    let values = calculator.solve(&shoe)?;
    info!("solved {} values", values.len());

    if let Some(key) = &args.explain {
        print!("{}", report::explain(calculator.equations(), &values, key)?);
        return Ok(());
    }
    if let Some(player_total) = args.simulate {
        let mut rng = rand::thread_rng();
        print!(
            "{}",
            report::simulate(&shoe, &values, player_total, args.hands, &mut rng)?
        );
        return Ok(());
    }

    let table = blackjack_strategy::StrategyTable::from_values(&values)?;
    print!("{}", table.render(style));
    if config.strategy_table.show_deviations {
        let baseline = calculator.baseline()?;
        print!("{}", report::deviations(&table.deviations(&baseline)));
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CommandLineArgs::parse();
    if let Err(err) = run(&args) {
        error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulate_accepts_solved_totals() {
        let args = CommandLineArgs::try_parse_from(["strategy_table", "--simulate", "17"]).unwrap();
        assert_eq!(args.simulate, Some(17));
        assert_eq!(args.hands, 100_000);
        assert_eq!(args.config, DEFAULT_CONFIG_PATH);
    }

    #[test]
    fn simulate_rejects_unsolved_totals() {
        for total in ["2", "22", "300"] {
            let err = CommandLineArgs::try_parse_from(["strategy_table", "--simulate", total])
                .unwrap_err();
            assert!(err.to_string().contains("--simulate"), "{}", err);
        }
    }

    #[test]
    fn explain_parses_equation_key() {
        let args = CommandLineArgs::try_parse_from(["strategy_table", "--explain", "s18_A"]).unwrap();
        assert_eq!(args.explain, Some(EquationKey::soft(18, blackjack_strategy::Card::Ace)));
        assert!(CommandLineArgs::try_parse_from(["strategy_table", "--explain", "s11_A"]).is_err());
    }
}
