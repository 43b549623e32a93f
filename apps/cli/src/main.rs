use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};

use stockfolio_cli::config::Config;
use stockfolio_cli::context::{initialize_context, ServiceContext};
use stockfolio_cli::shell;
use stockfolio_cli::views::TradeForm;
use stockfolio_core::portfolios::{NewPortfolio, PortfolioUpdate};
use stockfolio_core::session::SignupRequest;
use stockfolio_core::trades::TradeFilter;
use stockfolio_export::{ChromiumSurfaceFactory, ExportOutcome, ReportScope};

#[derive(Parser)]
#[command(
    name = "stockfolio",
    version,
    about = "Portfolio-tracking client for the stock backend"
)]
struct Cli {
    /// Backend base URL (overrides STOCKFOLIO_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and persist the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Register a new account (a successful signup also logs in)
    Signup {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        password_confirm: String,
    },
    /// Forget the persisted session token
    Logout,
    /// Manage portfolios
    #[command(subcommand)]
    Portfolios(PortfolioCommand),
    /// Manage trades
    #[command(subcommand)]
    Trades(TradeCommand),
    /// Export the rendered report as a PNG image
    Export {
        /// Scope the report to one portfolio
        #[arg(long)]
        portfolio_id: Option<i64>,
        /// Device-scale factor override
        #[arg(long)]
        scale: Option<f64>,
        /// Output directory override
        #[arg(long)]
        out: Option<PathBuf>,
        /// Open the HTML fallback in the default browser when rasterization fails
        #[arg(long)]
        open_fallback: bool,
    },
    /// Interactive dashboard
    Dashboard,
}

#[derive(Subcommand)]
enum PortfolioCommand {
    /// List portfolios
    List,
    /// Create a portfolio
    Create { name: String },
    /// Rename a portfolio
    Rename { id: i64, name: String },
    /// Delete a portfolio by id
    Delete { id: i64 },
    /// Delete a portfolio by name
    DeleteByName { name: String },
}

#[derive(Subcommand)]
enum TradeCommand {
    /// List trades, grouped by portfolio
    List {
        #[arg(long)]
        portfolio_id: Option<i64>,
        /// Filter by portfolio name instead of id
        #[arg(long, conflicts_with = "portfolio_id")]
        portfolio: Option<String>,
    },
    /// Show the aggregated record for a symbol
    Show { symbol: String },
    /// Create a trade
    Add {
        symbol: String,
        #[arg(long)]
        portfolio_id: Option<i64>,
        #[arg(long, default_value = "")]
        total_buy_qty: String,
        #[arg(long, default_value = "")]
        buy_price: String,
        #[arg(long, default_value = "")]
        total_sell_qty: String,
        #[arg(long, default_value = "")]
        sell_price: String,
        #[arg(long, default_value = "")]
        wk_52_high: String,
        #[arg(long, default_value = "")]
        wk_52_low: String,
    },
    /// Partially update a trade
    Update {
        id: i64,
        #[arg(long, default_value = "")]
        symbol: String,
        #[arg(long, default_value = "")]
        total_buy_qty: String,
        #[arg(long, default_value = "")]
        buy_price: String,
        #[arg(long, default_value = "")]
        total_sell_qty: String,
        #[arg(long, default_value = "")]
        sell_price: String,
        #[arg(long, default_value = "")]
        wk_52_high: String,
        #[arg(long, default_value = "")]
        wk_52_low: String,
    },
    /// Delete a trade
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(api_url) = cli.api_url {
        config.base_url = api_url;
    }
    let context = initialize_context(config)?;
    context.session.restore().await?;

    match cli.command {
        Command::Login { email, password } => {
            context.session.login(&email, &password).await?;
            println!("Logged in as {}", email);
        }
        Command::Signup {
            first_name,
            last_name,
            email,
            password,
            password_confirm,
        } => {
            context
                .session
                .signup(SignupRequest {
                    first_name,
                    last_name,
                    email: email.clone(),
                    password,
                    password_confirm,
                })
                .await?;
            println!("Signed up as {}", email);
        }
        Command::Logout => {
            context.session.logout().await?;
            println!("Logged out");
        }
        Command::Portfolios(command) => {
            require_session(&context)?;
            run_portfolio_command(&context, command).await?;
        }
        Command::Trades(command) => {
            require_session(&context)?;
            run_trade_command(&context, command).await?;
        }
        Command::Export {
            portfolio_id,
            scale,
            out,
            open_fallback,
        } => {
            require_session(&context)?;
            run_export(&context, portfolio_id, scale, out, open_fallback).await?;
        }
        Command::Dashboard => {
            require_session(&context)?;
            shell::run_dashboard(context).await?;
        }
    }
    Ok(())
}

fn require_session(context: &ServiceContext) -> anyhow::Result<()> {
    if !context.session.is_authenticated() {
        bail!("Not logged in; run `stockfolio login` first");
    }
    Ok(())
}

async fn run_portfolio_command(
    context: &ServiceContext,
    command: PortfolioCommand,
) -> anyhow::Result<()> {
    match command {
        PortfolioCommand::List => {
            let portfolios = context.portfolios.list_portfolios().await?;
            if portfolios.is_empty() {
                println!("No portfolios.");
            }
            for portfolio in portfolios {
                let created = portfolio
                    .created_at
                    .map(|at| at.format(" (created %Y-%m-%d)").to_string())
                    .unwrap_or_default();
                println!("[{}] {}{}", portfolio.id, portfolio.name, created);
            }
        }
        PortfolioCommand::Create { name } => {
            let portfolio = context
                .portfolios
                .create_portfolio(NewPortfolio { name })
                .await?;
            println!("Created portfolio [{}] {}", portfolio.id, portfolio.name);
        }
        PortfolioCommand::Rename { id, name } => {
            let portfolio = context
                .portfolios
                .rename_portfolio(id, PortfolioUpdate { name })
                .await?;
            println!("Renamed portfolio [{}] to {}", portfolio.id, portfolio.name);
        }
        PortfolioCommand::Delete { id } => {
            context.portfolios.delete_portfolio(id).await?;
            println!("Deleted portfolio {}", id);
        }
        PortfolioCommand::DeleteByName { name } => {
            context.portfolios.delete_portfolio_by_name(&name).await?;
            println!("Deleted portfolio '{}'", name);
        }
    }
    Ok(())
}

async fn run_trade_command(context: &ServiceContext, command: TradeCommand) -> anyhow::Result<()> {
    match command {
        TradeCommand::List {
            portfolio_id,
            portfolio,
        } => {
            let filter = match (portfolio_id, portfolio) {
                (Some(id), _) => TradeFilter::PortfolioId(id),
                (None, Some(name)) => TradeFilter::PortfolioName(name),
                (None, None) => TradeFilter::All,
            };
            let trades = context.trades.list_trades(&filter).await?;
            if trades.is_empty() {
                println!("No trades.");
            }
            for trade in trades {
                println!(
                    "[{}] {:<8} {} buy {} @ {}  value {}",
                    trade.id,
                    trade.symbol,
                    trade.portfolio_name.as_deref().unwrap_or("-"),
                    shell::format_quantity(trade.total_buy_qty),
                    shell::format_money(trade.buy_price),
                    shell::format_money(trade.current_value),
                );
            }
        }
        TradeCommand::Show { symbol } => {
            let trade = context.trades.get_trade_by_symbol(&symbol).await?;
            println!("{}", serde_json::to_string_pretty(&trade)?);
        }
        TradeCommand::Add {
            symbol,
            portfolio_id,
            total_buy_qty,
            buy_price,
            total_sell_qty,
            sell_price,
            wk_52_high,
            wk_52_low,
        } => {
            let form = TradeForm {
                symbol,
                total_buy_qty,
                buy_price,
                total_sell_qty,
                sell_price,
                wk_52_high,
                wk_52_low,
            };
            let trade = context
                .trades
                .create_trade(form.parse_new(portfolio_id)?)
                .await?;
            println!("Created trade [{}] {}", trade.id, trade.symbol);
        }
        TradeCommand::Update {
            id,
            symbol,
            total_buy_qty,
            buy_price,
            total_sell_qty,
            sell_price,
            wk_52_high,
            wk_52_low,
        } => {
            let form = TradeForm {
                symbol,
                total_buy_qty,
                buy_price,
                total_sell_qty,
                sell_price,
                wk_52_high,
                wk_52_low,
            };
            let trade = context.trades.update_trade(id, form.parse_update()?).await?;
            println!("Updated trade [{}] {}", trade.id, trade.symbol);
        }
        TradeCommand::Delete { id } => {
            context.trades.delete_trade(id).await?;
            println!("Deleted trade {}", id);
        }
    }
    Ok(())
}

async fn run_export(
    context: &ServiceContext,
    portfolio_id: Option<i64>,
    scale: Option<f64>,
    out: Option<PathBuf>,
    open_fallback: bool,
) -> anyhow::Result<()> {
    let scope = match portfolio_id {
        Some(id) => {
            let portfolio = context.portfolios.get_portfolio(id).await?;
            ReportScope::portfolio(portfolio.id, portfolio.name)
        }
        None => ReportScope::all(),
    };

    let pipeline = context.export_pipeline(Arc::new(ChromiumSurfaceFactory), scale, out);
    match pipeline.run(&scope).await? {
        ExportOutcome::Png { path } => println!("Report exported to {}", path.display()),
        ExportOutcome::HtmlFallback { path, reason } => {
            println!(
                "Rasterization failed ({}); saved the HTML report to {}",
                reason,
                path.display()
            );
            println!("Open it in a browser and print to PDF (Ctrl+P).");
            if open_fallback {
                open::that(&path)?;
            }
        }
    }
    Ok(())
}
