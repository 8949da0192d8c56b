use clap::{Parser, Subcommand};
use serde_json::Value;

use hubtel_payment::{Config, Pay, ReceiveMoney};

#[derive(Parser)]
#[command(name = "hubtel-pay")]
#[command(about = "Hubtel mobile-money payments from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Debit a customer's mobile-money wallet
    Receive(ReceiveArgs),

    /// Print the configuration read from the environment
    Config,
}

#[derive(clap::Args, Debug, Default)]
pub struct ReceiveArgs {
    /// JSON object mass-assigned before the flags below are applied
    #[arg(long, value_name = "JSON")]
    pub input: Option<String>,

    #[arg(long)]
    pub amount: Option<f64>,

    /// Customer mobile-money number
    #[arg(long)]
    pub from: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Network code, e.g. mtn-gh or vodafone-gh
    #[arg(long)]
    pub channel: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Callback URL used for both success and failure
    #[arg(long)]
    pub callback: Option<String>,

    #[arg(long)]
    pub callback_on_fail: Option<String>,

    /// Client reference, parsed as JSON when possible
    #[arg(long)]
    pub reference: Option<String>,

    /// Vodafone Cash voucher
    #[arg(long)]
    pub token: Option<String>,

    #[arg(long)]
    pub fees_on_customer: bool,
}

/// Builds the transaction: mass assignment first, flags override.
pub fn build_receive(pay: &Pay, args: ReceiveArgs) -> anyhow::Result<ReceiveMoney> {
    let mut tx = match &args.input {
        Some(raw) => {
            let input: Value = serde_json::from_str(raw)?;
            if !input.is_object() {
                anyhow::bail!("--input must be a JSON object");
            }
            pay.receive_money_from(&input)
        }
        None => pay.receive_money(),
    };

    if let Some(amount) = args.amount {
        tx = tx.amount(amount);
    }
    if let Some(from) = args.from {
        tx = tx.from(from);
    }
    if let Some(name) = args.name {
        tx = tx.customer_name(name);
    }
    if let Some(email) = args.email {
        tx = tx.customer_email(email);
    }
    if let Some(channel) = args.channel {
        tx = tx.channel(channel);
    }
    if let Some(description) = args.description {
        tx = tx.description(description);
    }
    if let Some(callback) = args.callback {
        tx = tx.callback(callback);
    }
    if let Some(url) = args.callback_on_fail {
        tx = tx.callback_on_fail(url);
    }
    if let Some(reference) = args.reference {
        let value: Value = serde_json::from_str(&reference).unwrap_or(Value::String(reference));
        tx = tx.reference(value);
    }
    if let Some(token) = args.token {
        tx = tx.token(token);
    }
    if args.fees_on_customer {
        tx = tx.fees_on_customer(true);
    }

    Ok(tx)
}

pub async fn handle_receive(pay: &Pay, args: ReceiveArgs) -> anyhow::Result<()> {
    let tx = build_receive(pay, args)?;

    tracing::info!("Sending receive-money request");
    let payload = tx.run().await?;

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

pub fn handle_config_validate(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Validating configuration...");

    println!("Configuration:");
    println!("  Account Number: {}", config.account_number());
    println!("  Client ID: {}", config.client_id());
    println!("  Client Secret: {}", mask_secret(config.client_secret()));
    println!("  API Base: {}", config.api_base());

    tracing::info!("Configuration is valid");
    println!("✓ Configuration is valid");

    Ok(())
}

fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(2).collect();
    format!("{}****", visible)
}
