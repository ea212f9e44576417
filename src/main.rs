mod args;
mod config;
mod context;
mod dns_class;
mod dns_type;
mod duration;
mod error;
mod fs;
mod handler;
mod header;
mod name;
mod packet;
mod pair;
mod parser;
mod question;
mod record;
mod resolver;
mod result_code;
mod server;
mod socks;
mod writer;

use std::str::FromStr;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use crate::args::Args;
use crate::config::load_config;
use crate::context::Context;
use crate::server::new_server;

fn main() {
    let args = Args::parse();

    let level = Level::from_str(&args.log_level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialize logger: {}", err);

        std::process::exit(1);
    }

    let ctx = match load_config(args.config.as_deref())
        .map(|cfg| cfg.apply_args(&args))
        .and_then(Context::from) {
        Ok(ctx) => ctx,
        Err(err) => {
            error!("Invalid configuration: {:#}", err);

            std::process::exit(1);
        }
    };

    info!("Relaying lookups to {}", ctx.proxy);

    if let Err(err) = new_server(&ctx).start() {
        error!("Failed to start server: {:#}", err);

        std::process::exit(1);
    }
}
