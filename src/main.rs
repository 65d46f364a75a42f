use anyhow::Result;
use clap::Parser;
use shopadmin::{
    api::{ApiClient, DEFAULT_API_URL},
    commands::{self, ListArgs, require_token},
};

/// shopadmin - e-commerce admin console
///
/// Inspect dashboard metrics, orders, products and vendors of a shop API
/// from the terminal.
///
/// Authenticated commands read the bearer token from --token or the
/// SHOPADMIN_TOKEN environment variable. Get one with `shopadmin login`.
///
/// Examples:
///   shopadmin login --email admin@example.com
///   shopadmin orders --search pending
#[derive(Parser, Debug)]
#[command(author, version = env!("SHOPADMIN_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Shop API base URL
    #[arg(
        long = "api-url",
        env = "SHOPADMIN_API_URL",
        value_name = "URL",
        default_value = DEFAULT_API_URL,
        global = true
    )]
    pub api_url: String,

    /// Bearer token for authenticated endpoints
    #[arg(
        long,
        env = "SHOPADMIN_TOKEN",
        value_name = "TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub token: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Log in and print an access token
    Login(LoginArgs),

    /// Show dashboard metrics
    Dashboard,

    /// List orders
    Orders(ListOpts),

    /// List products
    Products(ListOpts),

    /// List vendors
    Vendors(ListOpts),

    /// Change a vendor's status (e.g. approved, suspended)
    VendorStatus(VendorStatusArgs),

    /// Change a vendor's commission percentage
    VendorCommission(VendorCommissionArgs),

    /// Change an order's status (e.g. shipped, delivered)
    OrderStatus(OrderStatusArgs),
}

#[derive(clap::Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "SHOPADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,
}

const ORDERS_PAGE_SIZE: u32 = 50;
const CATALOG_PAGE_SIZE: u32 = 100;

#[derive(clap::Args, Debug)]
pub struct ListOpts {
    /// Only show entries containing this text (case-insensitive)
    #[arg(long, short = 's', value_name = "TEXT")]
    pub search: Option<String>,

    /// Page to fetch
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Entries per page [default: 50 for orders, 100 otherwise]
    #[arg(long)]
    pub limit: Option<u32>,
}

impl ListOpts {
    fn into_args(self, default_limit: u32) -> ListArgs {
        ListArgs {
            search: self.search,
            page: self.page,
            limit: self.limit.unwrap_or(default_limit),
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct VendorStatusArgs {
    #[arg(value_name = "VENDOR_ID")]
    pub id: String,
    pub status: String,
}

#[derive(clap::Args, Debug)]
pub struct VendorCommissionArgs {
    #[arg(value_name = "VENDOR_ID")]
    pub id: String,
    /// Commission in percent
    #[arg(allow_negative_numbers = true)]
    pub commission: f64,
}

#[derive(clap::Args, Debug)]
pub struct OrderStatusArgs {
    #[arg(value_name = "ORDER_ID")]
    pub id: String,
    pub status: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let api = ApiClient::new(&cli.api_url)?;
    let token = cli.token.as_deref();
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Login(args) => commands::login(&api, &args.email, &args.password, &mut out).await?,
        Commands::Dashboard => commands::dashboard(&api, require_token(token)?, &mut out).await?,
        Commands::Orders(opts) => {
            let args = opts.into_args(ORDERS_PAGE_SIZE);
            commands::orders(&api, require_token(token)?, &args, &mut out).await?
        }
        Commands::Products(opts) => {
            let args = opts.into_args(CATALOG_PAGE_SIZE);
            commands::products(&api, require_token(token)?, &args, &mut out).await?
        }
        Commands::Vendors(opts) => {
            let args = opts.into_args(CATALOG_PAGE_SIZE);
            commands::vendors(&api, require_token(token)?, &args, &mut out).await?
        }
        Commands::VendorStatus(args) => {
            commands::vendor_status(&api, require_token(token)?, &args.id, &args.status, &mut out)
                .await?
        }
        Commands::VendorCommission(args) => {
            commands::vendor_commission(
                &api,
                require_token(token)?,
                &args.id,
                args.commission,
                &mut out,
            )
            .await?
        }
        Commands::OrderStatus(args) => {
            commands::order_status(&api, require_token(token)?, &args.id, &args.status, &mut out)
                .await?
        }
    }
    Ok(())
}
