use std::path::PathBuf;

use chrono::NaiveDate;
use rapid_client::model::{FilterParams, ReportMode, SettlementSearchRequest};

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path.
    #[arg(short, long, value_name = "FILE", env = "RAPID_CONFIG", default_value = "rapid.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Looks up a transaction by exactly one of its identifiers.
    Transaction(TransactionArgs),
    /// Looks up a token customer.
    Customer {
        /// Token customer ID.
        token_customer_id: u64,
    },
    /// Searches settlements by date or date range.
    Settlements(SettlementArgs),
}

#[derive(Debug, clap::Args)]
pub struct TransactionArgs {
    /// Gateway transaction ID.
    #[arg(long)]
    pub id: Option<i64>,
    /// Access code of a hosted payment.
    #[arg(long)]
    pub access_code: Option<String>,
    /// Merchant invoice number.
    #[arg(long)]
    pub invoice_number: Option<String>,
    /// Merchant invoice reference.
    #[arg(long)]
    pub invoice_reference: Option<String>,
}

impl From<TransactionArgs> for FilterParams {
    fn from(args: TransactionArgs) -> Self {
        Self {
            transaction_id: args.id.map(i128::from),
            access_code: args.access_code,
            invoice_number: args.invoice_number,
            invoice_reference: args.invoice_reference,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum Report {
    #[default]
    Both,
    Summary,
    Transactions,
}

impl From<Report> for ReportMode {
    fn from(report: Report) -> Self {
        match report {
            Report::Both => Self::Both,
            Report::Summary => Self::SummaryOnly,
            Report::Transactions => Self::TransactionOnly,
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct SettlementArgs {
    /// Single settlement date (YYYY-MM-DD).
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub date: Option<NaiveDate>,
    /// Start of a settlement date range (YYYY-MM-DD).
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,
    /// End of a settlement date range (YYYY-MM-DD).
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,
    /// Parts of the report to return.
    #[arg(long, value_enum, default_value_t)]
    pub report: Report,
    /// Card type code, e.g. VI or MC.
    #[arg(long)]
    pub card_type: Option<String>,
    /// ISO 4217 currency code.
    #[arg(long)]
    pub currency: Option<String>,
    /// Page number.
    #[arg(long)]
    pub page: Option<u32>,
    /// Results per page.
    #[arg(long)]
    pub page_size: Option<u32>,
}

impl From<SettlementArgs> for SettlementSearchRequest {
    fn from(args: SettlementArgs) -> Self {
        Self {
            report_mode: args.report.into(),
            settlement_date: args.date,
            start_date: args.from,
            end_date: args.to,
            card_type: args.card_type,
            currency: args.currency,
            page: args.page,
            page_size: args.page_size,
        }
    }
}
