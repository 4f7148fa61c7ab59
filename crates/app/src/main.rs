//! Bazaar - command-line entry point
//!
//! Wires configuration, logging, the session file and the reqwest transport
//! into an [`ApiGateway`] and runs one command against it.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use bazaar_application::{AdService, ApiGateway, CallContext, GatewayConfig, SessionService};
use bazaar_domain::{ApiResponse, RequestDescriptor, SessionSnapshot};
use bazaar_infrastructure::config::log_startup_summary;
use bazaar_infrastructure::{
    FileSessionStore, ReqwestTransport, load_config, logging, session_path,
};
use clap::Parser;
use serde::Serialize;
use serde_json::{Value, json};

mod cli;

use cli::{AdsCommand, Cli, Command, RequestArgs, SessionCommand};

type Gateway = ApiGateway<ReqwestTransport, FileSessionStore>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config().context("failed to load configuration")?;
    logging::init(&config);
    log_startup_summary(&config);

    let store = Arc::new(FileSessionStore::new(session_path(&config)));
    let gateway = Arc::new(ApiGateway::new(
        ReqwestTransport::new()?,
        Arc::clone(&store),
        GatewayConfig::from_app_config(&config)?,
    ));

    match cli.command {
        Command::Request(args) => request(&gateway, args).await,
        Command::Ads(command) => ads(AdService::new(gateway), command).await,
        Command::Session(command) => session(SessionService::new(store), command).await,
    }
}

async fn request(gateway: &Gateway, args: RequestArgs) -> Result<()> {
    let mut descriptor = RequestDescriptor::new(args.method, args.path);
    if let Some(json) = args.json {
        let body: Value = serde_json::from_str(&json).context("--json is not valid JSON")?;
        descriptor = descriptor.with_json(body);
    }
    if let Some(ms) = args.timeout_ms {
        descriptor = descriptor.with_timeout(Duration::from_millis(ms));
    }
    let context = if args.login_screen {
        CallContext::login_screen()
    } else {
        CallContext::default()
    };

    let response = gateway.send_with(&descriptor, context).await?;
    print_body(&response)
}

async fn ads(
    service: AdService<ReqwestTransport, FileSessionStore>,
    command: AdsCommand,
) -> Result<()> {
    match command {
        AdsCommand::List => print_json(&service.list_ads().await?),
        AdsCommand::Show { id } => print_json(&service.ad_by_id(&id).await?),
        AdsCommand::User { user_id } => print_json(&service.ads_by_user(&user_id).await?),
        AdsCommand::Images { id } => print_json(&service.ad_images(&id).await),
        AdsCommand::Delete { id } => {
            service.delete_ad(&id).await?;
            println!("deleted ad {id}");
            Ok(())
        }
        AdsCommand::Toggle { id } => print_json(&service.toggle_ad_status(&id).await?),
    }
}

async fn session(service: SessionService<FileSessionStore>, command: SessionCommand) -> Result<()> {
    match command {
        SessionCommand::Login {
            token,
            role,
            user_id,
        } => {
            let snapshot = SessionSnapshot {
                access_token: Some(token),
                role,
                user_id,
            };
            service.login(&snapshot).await?;
            println!("session stored");
            Ok(())
        }
        SessionCommand::Show => {
            let current = service.current().await?;
            print_json(&json!({
                "authenticated": current.has_token(),
                "role": current.role,
                "userId": current.user_id,
            }))
        }
        SessionCommand::Logout => {
            service.logout().await?;
            println!("logged out");
            Ok(())
        }
    }
}

/// Prints a decoded body: JSON pretty-printed, text as-is, nothing when empty.
fn print_body(response: &ApiResponse) -> Result<()> {
    match response.data() {
        Value::Null => Ok(()),
        Value::String(text) => {
            println!("{text}");
            Ok(())
        }
        value => print_json(&value),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
