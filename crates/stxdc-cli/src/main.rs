//! stXDC CLI
//!
//! Command-line access to the staking toolkit: unit conversion, display
//! formatting, stake validation and admin parameter encoding.

mod settings;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use stxdc_core::prelude::*;
use stxdc_core::{
    check_unstake_liquidity, fixed_point_to_percent, format_address_short, format_base_units,
    format_decimal, format_exchange_rate, is_staking_balance_low, is_valid_address,
    max_stakeable_amount,
    parse_fixed_point, parse_to_base_units, percent_to_fixed_point, validate_liquidity_transfer,
    validate_redemption_quantity, ActionGate, DashboardConfig, ProtocolParametersForm, StakeForm,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "stxdc")]
#[command(author = "Valid LSD Contributors")]
#[command(version = "0.1.0")]
#[command(about = "stXDC liquid staking toolkit - amounts, percentages and form checks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (defaults to ./stxdc.toml when present)
    #[arg(short, long, global = true, env = "STXDC_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a whole-token amount to base units (wei)
    ToWei {
        amount: String,
    },

    /// Convert base units (wei) to a whole-token amount
    FromWei {
        wei: String,

        /// Round for display instead of printing every digit
        #[arg(short, long)]
        precision: Option<u32>,
    },

    /// Format a number for display
    Format {
        #[arg(allow_hyphen_values = true)]
        value: f64,

        /// Fractional digits (defaults to display.precision)
        #[arg(short, long)]
        precision: Option<u32>,
    },

    /// Format the stXDC/XDC exchange rate
    Rate {
        rate: f64,
    },

    /// Fixed-point percentage conversion
    Percent {
        #[command(subcommand)]
        percent: PercentCommands,
    },

    /// Staking widget checks
    Stake {
        #[command(subcommand)]
        stake: StakeCommands,
    },

    /// Admin inventory checks
    Inventory {
        #[command(subcommand)]
        inventory: InventoryCommands,
    },

    /// Admin protocol parameters
    Protocol {
        #[command(subcommand)]
        protocol: ProtocolCommands,
    },

    /// Address helpers
    Address {
        #[command(subcommand)]
        address: AddressCommands,
    },

    /// Configuration helpers
    Config {
        #[command(subcommand)]
        config: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum PercentCommands {
    /// 12.34 -> 1234
    ToFixed {
        #[arg(allow_hyphen_values = true)]
        value: f64,
        #[arg(short, long)]
        precision: Option<u32>,
    },
    /// 1234 -> 12.34
    FromFixed {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(short, long)]
        precision: Option<u32>,
    },
}

#[derive(Subcommand)]
enum StakeCommands {
    /// Validate a stake or unstake amount against node state
    Validate {
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,
        #[arg(short, long, default_value = "stake")]
        direction: StakeDirection,
        #[arg(long)]
        balance: DecimalAmount,
        #[arg(long, default_value = "0")]
        lot_size: DecimalAmount,
        #[arg(long, default_value = "0")]
        max_supply: DecimalAmount,
        #[arg(long, default_value = "0")]
        current_supply: DecimalAmount,
        #[arg(long)]
        staking_paused: bool,
        #[arg(long)]
        unstaking_paused: bool,
        #[arg(long)]
        no_node_space: bool,
        /// Staking contract balance; checks unstake payout liquidity
        #[arg(long)]
        staking_contract_balance: Option<DecimalAmount>,
    },
    /// Largest lot-size multiple the balance can stake
    Max {
        #[arg(long)]
        balance: DecimalAmount,
        #[arg(long)]
        lot_size: DecimalAmount,
    },
}

#[derive(Subcommand)]
enum InventoryCommands {
    /// Validate a node-token redemption quantity
    Redeem {
        #[arg(allow_hyphen_values = true)]
        quantity: String,
        #[arg(long)]
        inventory_balance: DecimalAmount,
    },
    /// Validate a liquidity transfer into the staking contract
    Transfer {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        #[arg(long)]
        free_balance: DecimalAmount,
    },
    /// Compare the staking contract balance with its floor
    BalanceStatus {
        #[arg(long)]
        staking_balance: DecimalAmount,
        #[arg(long)]
        liquidity_threshold: DecimalAmount,
        #[arg(long, default_value = "0")]
        tolerance_adjustment: DecimalAmount,
    },
}

#[derive(Subcommand)]
enum ProtocolCommands {
    /// Validate a parameter file (TOML) and print the on-chain encoding
    Check {
        file: PathBuf,
    },
    /// Decode on-chain parameters (JSON) back into form values
    Decode {
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum AddressCommands {
    /// 0x... -> xdc...
    ToXdc { address: String },
    /// xdc... -> 0x...
    ToEth { address: String },
    /// Shortened display form
    Short { address: String },
    /// Check prefix and length
    Validate { address: String },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print or write the default configuration
    Init {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration
    Show,
}

fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false))
        .init();
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a rejection as JSON, then fail the process with the same message
fn reject(err: LsdError) -> anyhow::Result<()> {
    print_json(&json!({
        "ok": false,
        "code": err.code(),
        "transient": err.is_transient(),
        "error": err.to_string(),
    }))?;
    Err(err.into())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = settings::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::ToWei { amount } => {
            let wei = parse_to_base_units(&amount)?;
            println!("{}", wei);
        }

        Commands::FromWei { wei, precision } => {
            let wei: BaseUnitAmount = wei.parse()?;
            match precision {
                Some(precision) => println!("{}", format_base_units(&wei, precision)),
                None => println!("{}", from_base_units(&wei)),
            }
        }

        Commands::Format { value, precision } => {
            println!("{}", format_decimal(value, precision.unwrap_or(config.display.precision)));
        }

        Commands::Rate { rate } => {
            println!(
                "1 {} = {} {}",
                STAKED_SYMBOL,
                format_exchange_rate(rate, config.display.exchange_rate_precision),
                SYMBOL
            );
        }

        Commands::Percent { percent } => run_percent(percent, &config)?,
        Commands::Stake { stake } => run_stake(stake, &config)?,
        Commands::Inventory { inventory } => run_inventory(inventory)?,
        Commands::Protocol { protocol } => run_protocol(protocol, &config)?,

        Commands::Address { address } => match address {
            AddressCommands::ToXdc { address } => println!("{}", stxdc_core::eth_to_xdc_address(&address)),
            AddressCommands::ToEth { address } => println!("{}", stxdc_core::xdc_to_eth_address(&address)),
            AddressCommands::Short { address } => println!(
                "{}",
                format_address_short(&address, config.display.address_head, config.display.address_tail)
            ),
            AddressCommands::Validate { address } => {
                if !is_valid_address(&address) {
                    anyhow::bail!("invalid address: {}", address);
                }
                println!("valid");
            }
        },

        Commands::Config { config: command } => match command {
            ConfigCommands::Init { output } => {
                let rendered = settings::default_config_toml()?;
                match output {
                    Some(path) => {
                        std::fs::write(&path, rendered)
                            .with_context(|| format!("failed to write {}", path.display()))?;
                        tracing::info!("Wrote default configuration to {:?}", path);
                    }
                    None => print!("{}", rendered),
                }
            }
            ConfigCommands::Show => print!("{}", toml::to_string_pretty(&config)?),
        },
    }

    Ok(())
}

fn run_percent(command: PercentCommands, config: &DashboardConfig) -> anyhow::Result<()> {
    match command {
        PercentCommands::ToFixed { value, precision } => {
            let precision = precision.unwrap_or(config.percent.precision);
            println!("{}", percent_to_fixed_point(value, precision)?);
        }
        PercentCommands::FromFixed { value, precision } => {
            let precision = precision.unwrap_or(config.percent.precision);
            let fixed = parse_fixed_point(&value)?;
            println!("{}", fixed_point_to_percent(fixed, precision)?);
        }
    }
    Ok(())
}

fn run_stake(command: StakeCommands, config: &DashboardConfig) -> anyhow::Result<()> {
    match command {
        StakeCommands::Validate {
            amount,
            direction,
            balance,
            lot_size,
            max_supply,
            current_supply,
            staking_paused,
            unstaking_paused,
            no_node_space,
            staking_contract_balance,
        } => {
            let mut form = StakeForm::new(
                StakeSnapshot {
                    available_balance: balance,
                    lot_size,
                    max_supply,
                    current_supply,
                },
                ActionGate {
                    staking_paused,
                    unstaking_paused,
                    node_space_available: !no_node_space,
                },
                config.input.max_amount_len,
            );
            form.direction = direction;

            let intent = match form.prepare(&amount) {
                Ok(intent) => intent,
                Err(err) => return reject(err.into()),
            };

            if let (StakeDirection::Unstake, Some(available)) = (direction, staking_contract_balance) {
                if let Err(err) = check_unstake_liquidity(&available, &intent.amount) {
                    return reject(err.into());
                }
            }

            print_json(&json!({
                "ok": true,
                "direction": intent.direction,
                "amount": intent.amount,
                "base_units": intent.base_units(),
                "remaining_supply": form.snapshot.remaining_supply(),
            }))?;
        }
        StakeCommands::Max { balance, lot_size } => {
            println!("{}", max_stakeable_amount(&balance, &lot_size));
        }
    }
    Ok(())
}

fn run_inventory(command: InventoryCommands) -> anyhow::Result<()> {
    let result = match command {
        InventoryCommands::Redeem { quantity, inventory_balance } => {
            validate_redemption_quantity(&quantity, &inventory_balance)
        }
        InventoryCommands::Transfer { amount, free_balance } => {
            validate_liquidity_transfer(&amount, &free_balance)
        }
        InventoryCommands::BalanceStatus {
            staking_balance,
            liquidity_threshold,
            tolerance_adjustment,
        } => {
            let low =
                is_staking_balance_low(&staking_balance, &liquidity_threshold, &tolerance_adjustment);
            return print_json(&json!({
                "ok": true,
                "low": low,
                "floor": liquidity_threshold.saturating_sub(&tolerance_adjustment),
            }));
        }
    };

    match result {
        Ok(amount) => print_json(&json!({
            "ok": true,
            "amount": amount,
            "base_units": to_base_units(&amount),
        })),
        Err(err) => reject(err.into()),
    }
}

fn run_protocol(command: ProtocolCommands, config: &DashboardConfig) -> anyhow::Result<()> {
    match command {
        ProtocolCommands::Check { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let form: ProtocolParametersForm = toml::from_str(&content)?;

            let report = form.validate(&config.fee_warnings);
            for warning in &report.warnings {
                tracing::warn!(field = warning.field, "{}", warning.message);
            }
            if let Some(err) = report.errors.into_iter().next() {
                return reject(err.into());
            }

            let parameters = form.encode(config.percent.precision).map_err(LsdError::from)?;
            print_json(&json!({
                "ok": true,
                "parameters": parameters,
                "warnings": report.warnings,
            }))?;
        }
        ProtocolCommands::Decode { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let parameters: stxdc_core::ProtocolParameters = serde_json::from_str(&content)?;
            print!("{}", toml::to_string_pretty(&parameters.to_form()?)?);
        }
    }
    Ok(())
}
