//! Interactive dashboard loop and table rendering.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use rust_decimal::Decimal;

use stockfolio_core::constants::DISPLAY_DECIMAL_PRECISION;
use stockfolio_core::trades::Trade;

use crate::context::ServiceContext;
use crate::views::{DashboardView, TradeForm};

pub fn format_money(value: Option<Decimal>) -> String {
    match value {
        Some(value) => format!("{:.*}", DISPLAY_DECIMAL_PRECISION as usize, value),
        None => "-".to_string(),
    }
}

pub fn format_quantity(value: Option<i64>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}

fn print_trade_row(trade: &Trade) {
    println!(
        "  [{}] {:<8} buy {:>6} @ {:>10}  bal {:>6}  value {:>12}  P/L {:>10}",
        trade.id,
        trade.symbol,
        format_quantity(trade.total_buy_qty),
        format_money(trade.buy_price),
        format_quantity(trade.balance_qty),
        format_money(trade.current_value),
        format_money(trade.realised_profit_loss),
    );
}

fn print_trade_detail(trade: &Trade) {
    println!("{} (trade {})", trade.symbol, trade.id);
    println!("  buy:  {} @ {}", format_quantity(trade.total_buy_qty), format_money(trade.buy_price));
    println!("  sell: {} @ {}", format_quantity(trade.total_sell_qty), format_money(trade.sell_price));
    println!("  52wk: {} / {}", format_money(trade.wk_52_high), format_money(trade.wk_52_low));
    println!("  buy value:        {}", format_money(trade.total_buy_value));
    println!("  sell value:       {}", format_money(trade.total_sell_value));
    println!("  acquisition cost: {}", format_money(trade.acquisition_cost));
    println!("  % holding:        {}", format_money(trade.percent_holding));
    println!("  current value:    {}", format_money(trade.current_value));
    println!("  realised P/L:     {}", format_money(trade.realised_profit_loss));
}

/// Grouped trade listing plus selection and error banner.
pub fn print_dashboard(view: &DashboardView) {
    if let Some(message) = view.error() {
        println!("error: {}", message);
    }
    match view.selected() {
        Some(portfolio) => println!("Portfolio: {} (#{})", portfolio.name, portfolio.id),
        None => println!("All portfolios"),
    }
    if view.portfolios().is_empty() {
        println!("No portfolios yet; create one with `np <name>`.");
    }
    let grouped = view.grouped_trades();
    if grouped.is_empty() {
        println!("No trades to show.");
        return;
    }
    for (group, trades) in grouped {
        println!("## {}", group);
        for trade in trades {
            print_trade_row(trade);
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  r | refresh               reload portfolios and trades");
    println!("  s <id>                    select a portfolio");
    println!("  all                       back to the all-portfolios scope");
    println!("  np <name>                 create a portfolio");
    println!("  mv <id> <name>            rename a portfolio");
    println!("  rm <id>                   delete a portfolio");
    println!("  add <symbol> [qty] [px]   create a trade in the selected portfolio");
    println!("  rmt <id>                  delete a trade");
    println!("  sym <symbol>              show the aggregated record for a symbol");
    println!("  q | quit                  leave the dashboard");
}

/// Line-driven interactive dashboard.
pub async fn run_dashboard(context: Arc<ServiceContext>) -> anyhow::Result<()> {
    let mut view = DashboardView::new(context.portfolios.clone(), context.trades.clone());
    view.refresh().await;
    print_dashboard(&view);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("stockfolio> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else { continue };

        match command {
            "q" | "quit" | "exit" => break,
            "help" => {
                print_help();
                continue;
            }
            "r" | "refresh" => view.refresh().await,
            "all" => view.clear_selection().await,
            "s" | "select" => match parts.next().and_then(|raw| raw.parse().ok()) {
                Some(id) => view.select_portfolio(id).await,
                None => {
                    println!("usage: s <portfolio-id>");
                    continue;
                }
            },
            "np" => {
                let name = parts.collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    println!("usage: np <name>");
                    continue;
                }
                view.create_portfolio(&name).await;
            }
            "mv" => {
                let id = parts.next().and_then(|raw| raw.parse().ok());
                let name = parts.collect::<Vec<_>>().join(" ");
                match id {
                    Some(id) if !name.is_empty() => view.rename_portfolio(id, &name).await,
                    _ => {
                        println!("usage: mv <id> <name>");
                        continue;
                    }
                }
            }
            "rm" => match parts.next().and_then(|raw| raw.parse().ok()) {
                Some(id) => view.delete_portfolio(id).await,
                None => {
                    println!("usage: rm <id>");
                    continue;
                }
            },
            "add" => {
                let Some(symbol) = parts.next() else {
                    println!("usage: add <symbol> [qty] [price]");
                    continue;
                };
                let form = TradeForm {
                    symbol: symbol.to_string(),
                    total_buy_qty: parts.next().unwrap_or_default().to_string(),
                    buy_price: parts.next().unwrap_or_default().to_string(),
                    ..Default::default()
                };
                view.save_trade(None, &form).await;
            }
            "rmt" => match parts.next().and_then(|raw| raw.parse().ok()) {
                Some(id) => view.delete_trade(id).await,
                None => {
                    println!("usage: rmt <id>");
                    continue;
                }
            },
            "sym" => {
                let Some(symbol) = parts.next() else {
                    println!("usage: sym <symbol>");
                    continue;
                };
                view.view_symbol(symbol).await;
                if let Some(trade) = view.expanded() {
                    print_trade_detail(trade);
                }
                view.close_detail();
                if let Some(message) = view.error() {
                    println!("error: {}", message);
                    view.dismiss_error();
                }
                continue;
            }
            other => {
                println!("unknown command '{}'; try help", other);
                continue;
            }
        }

        print_dashboard(&view);
        view.dismiss_error();
    }
    Ok(())
}
