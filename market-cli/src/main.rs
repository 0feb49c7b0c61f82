//! market - command-line front end for the service marketplace
//!
//! Loads `.env`, builds one [`AppContext`] and runs a single command against
//! it. Payment links are printed rather than opened; a gateway return URL is
//! reconciled with `market return <url>`.

mod commands;
mod logger;
mod render;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use market_client::config::{DEFAULT_BASE_URL, DEFAULT_CREDENTIAL_PATH, DEFAULT_TIMEOUT_SECS};
use market_client::{AppContext, ClientConfig, RetryPolicy};
use shared::models::{BookingStatus, PaymentStatus, ServiceType};

#[derive(Debug, Parser)]
#[command(name = "market", version, about = "Book services, pay and review from the terminal")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// Backend base URL
    #[arg(long, global = true, env = "MARKET_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "MARKET_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Where the login is cached between runs
    #[arg(long, global = true, env = "MARKET_CREDENTIAL_PATH", default_value = DEFAULT_CREDENTIAL_PATH)]
    credential_path: PathBuf,

    /// Attempts for payment calls on connection errors and timeouts
    #[arg(long, global = true, env = "MARKET_RETRY_ATTEMPTS", default_value_t = 3)]
    retry_attempts: u32,

    /// Backoff base delay in milliseconds
    #[arg(long, global = true, env = "MARKET_RETRY_BASE_MS", default_value_t = 500)]
    retry_base_ms: u64,

    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit JSON log lines
    #[arg(long, global = true, env = "LOG_JSON", default_value_t = false)]
    log_json: bool,
}

impl GlobalArgs {
    fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_url)
            .with_timeout(self.timeout)
            .with_credential_path(&self.credential_path)
            .with_retry(RetryPolicy::new(
                self.retry_attempts,
                Duration::from_millis(self.retry_base_ms),
            ))
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and cache the token
    Login {
        #[arg(long, env = "MARKET_EMAIL")]
        email: String,
        #[arg(long, env = "MARKET_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the cached login
    Logout,
    /// Show the logged-in user as the backend sees it
    Whoami,
    /// Search the service catalogue
    Services {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "type", value_parser = parse_service_type)]
        service_type: Option<ServiceType>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one service with its reviews
    Service { service_id: String },
    /// Book a service and start payment
    Book(BookArgs),
    /// Start (or restart) payment for an unpaid booking
    Pay { booking_id: String },
    /// Reconcile a payment gateway return URL or query string
    Return { url: String },
    /// List bookings for the logged-in customer or shop
    Bookings {
        #[arg(long, value_parser = parse_booking_status)]
        status: Option<BookingStatus>,
        #[arg(long, value_parser = parse_payment_status)]
        payment_status: Option<PaymentStatus>,
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Change a booking's status (shop/admin)
    SetStatus {
        booking_id: String,
        #[arg(value_parser = parse_booking_status)]
        status: BookingStatus,
    },
    /// Change a booking's payment status (shop/admin)
    SetPaymentStatus {
        booking_id: String,
        #[arg(value_parser = parse_payment_status)]
        payment_status: PaymentStatus,
    },
    /// Cancel a booking
    Cancel { booking_id: String },
    /// Review a completed booking
    Review {
        booking_id: String,
        /// 1 to 5 stars
        #[arg(long)]
        rating: Option<u8>,
        #[arg(long, default_value = "")]
        comment: String,
    },
}

#[derive(Debug, Args)]
struct PageArgs {
    #[arg(long, default_value_t = shared::query::DEFAULT_PAGE)]
    page: u32,
    #[arg(long, default_value_t = shared::query::DEFAULT_LIMIT)]
    limit: u32,
}

#[derive(Debug, Args)]
struct BookArgs {
    service_id: String,
    /// `YYYY-MM-DD`
    #[arg(long)]
    date: String,
    /// `HH:MM`
    #[arg(long)]
    time: String,
    #[arg(long, default_value = "")]
    address: String,
    /// Defaults to the service's own type
    #[arg(long = "type", value_parser = parse_service_type)]
    service_type: Option<ServiceType>,
    /// Defaults to the logged-in user's name
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long, default_value = "")]
    notes: String,
}

fn parse_service_type(value: &str) -> Result<ServiceType, String> {
    value.parse()
}

fn parse_booking_status(value: &str) -> Result<BookingStatus, String> {
    BookingStatus::ALL
        .into_iter()
        .find(|status| status.as_str() == value.trim().to_ascii_lowercase())
        .ok_or_else(|| format!("expected one of: pending, confirmed, completed, canceled (got {value})"))
}

fn parse_payment_status(value: &str) -> Result<PaymentStatus, String> {
    PaymentStatus::ALL
        .into_iter()
        .find(|status| status.as_str() == value.trim().to_ascii_lowercase())
        .ok_or_else(|| format!("expected one of: pending, paid, failed (got {value})"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logger::init_logger(&cli.global.log_level, cli.global.log_json)?;

    let ctx = AppContext::new(cli.global.client_config())?;

    if let Err(e) = commands::run(&ctx, cli.command).await {
        tracing::debug!("Command failed: {e:?}");
        return Err(e);
    }
    Ok(())
}
