use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};

use crate::application::LedgerService;
use crate::domain::{format_cents, parse_amount, AccountKind, Transaction, TransactionKind};

/// Moneta - Personal Finance Tracker
#[derive(Parser)]
#[command(name = "moneta")]
#[command(about = "A local-first personal finance tracker")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "moneta.db")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Record an income or expense transaction
    Add {
        /// Amount (e.g., "50.00" or "50")
        amount: String,

        /// Description of the transaction
        description: String,

        /// Record an expense instead of an income
        #[arg(long)]
        expense: bool,

        /// Account id (defaults to the main account)
        #[arg(short, long)]
        account: Option<String>,

        /// Category (e.g., "groceries")
        #[arg(short, long)]
        category: Option<String>,

        /// Date of the transaction (YYYY-MM-DD, defaults to now)
        #[arg(long)]
        date: Option<String>,
    },

    /// List all transactions
    Transactions,

    /// Show the most recent transactions
    Recent {
        /// Maximum number of transactions to show
        #[arg(short, long, default_value = "3")]
        limit: usize,
    },

    /// Show the global balance
    Balance,
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Add {
        /// Account name
        name: String,

        /// Account type: savings, credit, other
        #[arg(short = 't', long = "type", default_value = "other")]
        kind: String,
    },

    /// List all accounts with their balances
    List,

    /// Delete an account and all of its transactions
    Delete {
        /// Account id
        id: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let service = LedgerService::init(&self.database).await?;

        match self.command {
            Commands::Account(account_cmd) => run_account_command(&service, account_cmd).await?,

            Commands::Add {
                amount,
                description,
                expense,
                account,
                category,
                date,
            } => {
                let amount_cents =
                    parse_amount(&amount).context("Invalid amount format. Use '50.00' or '50'")?;

                let date = match date {
                    Some(date_str) => parse_date(&date_str).with_context(|| {
                        format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str)
                    })?,
                    None => Utc::now(),
                };

                let account_id = match account {
                    Some(id) => id,
                    None => service.main_account().await?.id,
                };

                let kind = if expense {
                    TransactionKind::Expense
                } else {
                    TransactionKind::Income
                };

                let transaction = service
                    .record_transaction(&account_id, kind, amount_cents, description, date, category)
                    .await?;

                println!(
                    "Recorded {}: {} ({})",
                    transaction.kind,
                    format_cents(transaction.amount),
                    transaction.id
                );
            }

            Commands::Transactions => {
                let transactions = service.list_transactions().await?;
                print_transactions(&transactions);
            }

            Commands::Recent { limit } => {
                let transactions = service.recent_transactions(Some(limit)).await?;
                print_transactions(&transactions);
            }

            Commands::Balance => {
                let balance = service.total_balance().await?;
                println!("Total balance: {}", format_cents(balance.total));
                println!("Last updated:  {}", balance.last_updated.to_rfc3339());
            }
        }

        Ok(())
    }
}

async fn run_account_command(service: &LedgerService, cmd: AccountCommands) -> Result<()> {
    match cmd {
        AccountCommands::Add { name, kind } => {
            let kind = AccountKind::from_str(&kind)
                .filter(|k| *k != AccountKind::Main)
                .with_context(|| {
                    format!("Invalid account type '{kind}'. Use savings, credit or other")
                })?;
            let account = service.create_account(name, kind).await?;
            println!("Created account: {} ({})", account.name, account.id);
        }

        AccountCommands::List => {
            let accounts = service.list_accounts().await?;
            println!("{:<38} {:<20} {:<10} {:>12}", "ID", "NAME", "TYPE", "BALANCE");
            println!("{}", "-".repeat(82));
            for account in accounts {
                println!(
                    "{:<38} {:<20} {:<10} {:>12}",
                    account.id,
                    account.name,
                    account.kind.to_string(),
                    format_cents(account.balance)
                );
            }
        }

        AccountCommands::Delete { id } => {
            service.delete_account(&id).await?;
            println!("Deleted account: {}", id);
        }
    }
    Ok(())
}

fn print_transactions(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("No transactions found.");
        return;
    }

    println!(
        "{:<12} {:<8} {:>12} {:<24} {}",
        "DATE", "TYPE", "AMOUNT", "DESCRIPTION", "ACCOUNT"
    );
    println!("{}", "-".repeat(80));
    for tx in transactions {
        println!(
            "{:<12} {:<8} {:>12} {:<24} {}",
            tx.date.date_naive().to_string(),
            tx.kind.to_string(),
            format_cents(tx.amount),
            tx.description,
            tx.account_id
        );
    }
}

fn parse_date(date_str: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?;
    Ok(date
        .and_hms_opt(0, 0, 0)
        .context("Invalid time components")?
        .and_utc())
}
