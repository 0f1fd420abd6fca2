use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::BankService;
use crate::domain::{format_cents, parse_cents, Cents};
use crate::http;

/// Bankledger - minimal bank-account ledger
#[derive(Parser)]
#[command(name = "bankledger")]
#[command(about = "A minimal bank-account ledger with daily deposit limits")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "bankledger.db")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Deposit an amount into an account
    Deposit {
        /// Last name of the account
        last_name: String,

        /// Amount to deposit (e.g., "50.00" or "50")
        amount: String,
    },

    /// Withdraw an amount from an account
    Withdraw {
        /// Last name of the account
        last_name: String,

        /// Amount to withdraw (e.g., "50.00" or "50")
        amount: String,
    },

    /// Transfer an amount between two accounts
    Transfer {
        /// Amount to transfer (e.g., "50.00" or "50")
        amount: String,

        /// Last name of the source account
        #[arg(long)]
        from: String,

        /// Last name of the destination account
        #[arg(long)]
        to: String,
    },

    /// Show the most recent transactions for an account
    Transactions {
        /// Last name of the account
        last_name: String,
    },

    /// Serve the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
    },
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// First name
        first_name: String,

        /// Last name (unique across all accounts)
        last_name: String,
    },

    /// Show an account by last name
    Show {
        /// Last name of the account
        last_name: String,
    },

    /// Show an account by first name
    ShowFirst {
        /// First name of the account
        first_name: String,
    },

    /// List all accounts
    List,
}

fn parse_amount(raw: &str) -> Result<Cents> {
    let cents = parse_cents(raw).map_err(|e| anyhow::anyhow!("{}: {}", raw, e))?;
    if cents <= 0 {
        anyhow::bail!("amount must be positive");
    }
    Ok(cents)
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                BankService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Account(account_cmd) => {
                let service = BankService::connect(&self.database).await?;
                run_account_command(&service, account_cmd).await?;
            }

            Commands::Deposit { last_name, amount } => {
                let service = BankService::connect(&self.database).await?;
                let amount = parse_amount(&amount)?;
                let view = service
                    .deposit(&last_name, amount)
                    .await
                    .context("Deposit failed")?;
                println!(
                    "Deposited {} into {}. New balance: {}",
                    format_cents(amount),
                    view.last_name,
                    format_cents(view.balance_cents)
                );
            }

            Commands::Withdraw { last_name, amount } => {
                let service = BankService::connect(&self.database).await?;
                let amount = parse_amount(&amount)?;
                let view = service
                    .withdraw(&last_name, amount)
                    .await
                    .context("Withdrawal failed")?;
                println!(
                    "Withdrew {} from {}. New balance: {}",
                    format_cents(amount),
                    view.last_name,
                    format_cents(view.balance_cents)
                );
            }

            Commands::Transfer { amount, from, to } => {
                let service = BankService::connect(&self.database).await?;
                let amount = parse_amount(&amount)?;
                service
                    .transfer(&from, &to, amount)
                    .await
                    .context("Transfer failed")?;
                println!("Transferred {} from {} to {}", format_cents(amount), from, to);
            }

            Commands::Transactions { last_name } => {
                let service = BankService::connect(&self.database).await?;
                let transactions = service.latest_transactions(&last_name).await?;
                if transactions.is_empty() {
                    println!("No transactions for {}", last_name);
                } else {
                    for tx in transactions {
                        println!("{:<10} {:>12}", tx.kind, format_cents(tx.amount_cents));
                    }
                }
            }

            Commands::Serve { addr } => {
                let service = BankService::connect(&self.database).await?;
                http::serve(Arc::new(service), &addr).await?;
            }
        }

        Ok(())
    }
}

async fn run_account_command(service: &BankService, command: AccountCommands) -> Result<()> {
    match command {
        AccountCommands::Create {
            first_name,
            last_name,
        } => {
            let view = service.create_account(&first_name, &last_name).await?;
            println!(
                "Created account: {} {} (notifications via {})",
                view.first_name, view.last_name, view.notification_preference
            );
        }

        AccountCommands::Show { last_name } => {
            let view = service.account_by_last_name(&last_name).await?;
            print_account(&view);
        }

        AccountCommands::ShowFirst { first_name } => {
            let view = service.account_by_first_name(&first_name).await?;
            print_account(&view);
        }

        AccountCommands::List => {
            let accounts = service.list_accounts().await?;
            if accounts.is_empty() {
                println!("No accounts");
            } else {
                for view in accounts {
                    println!(
                        "{:<20} {:>12}",
                        format!("{} {}", view.first_name, view.last_name),
                        format_cents(view.balance_cents)
                    );
                }
            }
        }
    }

    Ok(())
}

fn print_account(view: &crate::application::AccountView) {
    println!("{} {}", view.first_name, view.last_name);
    println!("  Balance:       {}", format_cents(view.balance_cents));
    println!("  Notifications: {}", view.notification_preference);
}
