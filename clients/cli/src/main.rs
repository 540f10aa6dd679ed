use std::io::{self, BufRead, Write};

use blackjack::{GameRules, PayoutRatio};
use blackjack_table::msg::{Command as TableCommand, RoundResponse};
use blackjack_table::{MemoryLedger, SeatKey, Table, TableConfig};
use clap::{Parser, Subcommand};
use serde::Serialize;

mod render;

type BoxErr = Box<dyn std::error::Error + Send + Sync>;

const LOCAL_SEAT: SeatKey = SeatKey { guild: 0, player: 0 };

#[derive(Parser)]
#[command(name = "blackjack-cli", about = "Play blackjack against the dealer from a terminal")]
struct Cli {
    /// Decks per shoe
    #[arg(long, env = "BJ_DECKS", default_value_t = 6)]
    decks: u8,

    /// Minimum bet
    #[arg(long, env = "BJ_MIN_BET", default_value_t = 10)]
    min_bet: u64,

    /// Blackjack payout ratio (e.g. "3:2")
    #[arg(long, env = "BJ_PAYOUT", default_value = "3:2")]
    blackjack_payout: String,

    /// Dealer stands once reaching this total
    #[arg(long, env = "BJ_DEALER_STANDS_ON", default_value_t = 17)]
    dealer_stands_on: u8,

    /// Reshuffle the shoe before a round once fewer cards remain
    #[arg(long, env = "BJ_RESHUFFLE_BELOW", default_value_t = 52)]
    reshuffle_below: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play rounds interactively on stdin
    Play {
        /// Starting balance
        #[arg(long, env = "BJ_BALANCE", default_value_t = 1000)]
        balance: u64,

        /// Seed the shuffles for a reproducible session
        #[arg(long, env = "BJ_SEED")]
        seed: Option<u64>,

        /// Print every response as a JSON line
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the effective table configuration
    Rules {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Debug, Default, Serialize)]
struct SessionSummary {
    rounds: u32,
    net: i64,
    balance: u64,
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match table_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    let result = match cli.command {
        Command::Play {
            balance,
            seed,
            json,
        } => play(config, balance, seed, json),
        Command::Rules { json } => print_rules(&config, json),
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn table_config(cli: &Cli) -> Result<TableConfig, BoxErr> {
    let rules = GameRules {
        num_decks: cli.decks,
        blackjack_payout: parse_payout_ratio(&cli.blackjack_payout)?,
        dealer_stands_on: cli.dealer_stands_on,
        reshuffle_below: cli.reshuffle_below,
    };
    rules.validate()?;
    Ok(TableConfig {
        min_bet: cli.min_bet,
        rules,
    })
}

fn parse_payout_ratio(s: &str) -> Result<PayoutRatio, BoxErr> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 {
        return Err(format!("Invalid payout ratio '{s}', expected format 'N:D'").into());
    }
    Ok(PayoutRatio::new(parts[0].trim().parse()?, parts[1].trim().parse()?)?)
}

fn print_rules(config: &TableConfig, json: bool) -> Result<(), BoxErr> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        print!("{}", render::rules(config));
    }
    Ok(())
}

fn play(config: TableConfig, balance: u64, seed: Option<u64>, json: bool) -> Result<(), BoxErr> {
    let ledger = MemoryLedger::new(balance);
    let mut table = match seed {
        Some(seed) => Table::seeded(ledger, seed),
        None => Table::new(ledger),
    };
    table.set_default_config(config)?;

    let mut summary = SessionSummary {
        balance,
        ..SessionSummary::default()
    };

    if !json {
        println!("Balance: {balance}. Place a bet with `bj <amount|all>`, `quit` to leave.");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        match input.to_ascii_lowercase().as_str() {
            "quit" | "exit" => break,
            "balance" => {
                println!("{}", render::balance(&table.query_balance(LOCAL_SEAT)));
                continue;
            }
            _ => {}
        }

        let response = input
            .parse::<TableCommand>()
            .and_then(|command| table.execute(LOCAL_SEAT, command));

        match response {
            Ok(response) => {
                record(&mut summary, &response);
                if json {
                    println!("{}", serde_json::to_string(&response)?);
                } else {
                    print!("{}", render::round(&response));
                }
            }
            Err(e) => {
                log::debug!("Rejected '{input}': {e:?}");
                println!("{e}");
            }
        }
        stdout.flush()?;
    }

    if table.abandon(LOCAL_SEAT) {
        log::warn!("Left the table with a round in progress; it was not settled");
    }

    if json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!(
            "Played {} round(s), net {:+}, balance {}",
            summary.rounds, summary.net, summary.balance
        );
    }
    Ok(())
}

fn record(summary: &mut SessionSummary, response: &RoundResponse) {
    summary.balance = response.balance;
    if let Some(net) = response.net_payout {
        summary.rounds += 1;
        summary.net += net;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payout_ratio() {
        assert_eq!(parse_payout_ratio("3:2").unwrap(), PayoutRatio::THREE_TO_TWO);
        assert_eq!(parse_payout_ratio("6 : 5").unwrap(), PayoutRatio::SIX_TO_FIVE);
        assert!(parse_payout_ratio("3").is_err());
        assert!(parse_payout_ratio("3:0").is_err());
        assert!(parse_payout_ratio("a:b").is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["blackjack-cli", "rules"]);
        let config = table_config(&cli).unwrap();
        assert_eq!(config.min_bet, 10);
        assert_eq!(config.rules.num_decks, 6);
        assert_eq!(config.rules.blackjack_payout, PayoutRatio::THREE_TO_TWO);
        assert_eq!(config.rules, GameRules::default());
    }

    #[test]
    fn test_reshuffle_below_flag() {
        let cli = Cli::parse_from(["blackjack-cli", "--decks", "1", "--reshuffle-below", "20", "rules"]);
        assert_eq!(table_config(&cli).unwrap().rules.reshuffle_below, 20);

        let cli = Cli::parse_from(["blackjack-cli", "--decks", "1", "--reshuffle-below", "5", "rules"]);
        assert!(table_config(&cli).is_err());
    }

    #[test]
    fn test_zero_decks_rejected() {
        let cli = Cli::parse_from(["blackjack-cli", "--decks", "0", "rules"]);
        assert!(table_config(&cli).is_err());
    }
}
