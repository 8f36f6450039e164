mod args;
mod config;
mod crypt;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use covmon::{Covmon, RunOutcome};
use covmon_postgres::PgGateway;
use covmon_smtp::SmtpTransport;
use tracing_subscriber::EnvFilter;

use crate::args::{Action, CRYPT_NEEDS_VALUE, Parsed, USAGE};
use crate::crypt::Crypter;

const USAGE_EXIT: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = match args::parse(std::env::args()) {
        Parsed::Usage => {
            println!("{USAGE}");
            return ExitCode::from(USAGE_EXIT);
        }
        Parsed::Invalid(msg) => {
            eprintln!("{msg}");
            return ExitCode::from(USAGE_EXIT);
        }
        Parsed::Cli(cli) => cli,
    };

    let result = match cli.action {
        Action::Crypt => match cli.value2crypt.as_deref() {
            Some(value) => crypt(value),
            None => {
                eprintln!("{CRYPT_NEEDS_VALUE}");
                return ExitCode::from(USAGE_EXIT);
            }
        },
        Action::Run => run(&cli.config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("covmon failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn crypt(value: &str) -> Result<()> {
    let sealed = Crypter::from_env()
        .and_then(|mut c| c.encrypt(value))
        .map_err(|e| anyhow::anyhow!("Не удалось зашифровать сообщение: {e}"))?;
    println!("Зашифрованное значение: {sealed}");
    Ok(())
}

async fn run(path: &Path) -> Result<()> {
    let config = config::load(path)?;
    tracing::info!(
        config = %path.display(),
        variant = ?config.report.variant,
        "configuration loaded"
    );

    let gateway = PgGateway::connect_lazy(&config.datasource, config.report.query_timeout())
        .context("configuring warehouse connection")?;
    let transport = SmtpTransport::new(&config.smtp, Some(config.report.send_timeout()))
        .context("configuring mail relay")?;
    tracing::debug!(from = %transport.sender(), "mail relay configured");
    let covmon = Covmon::builder()
        .with_gateway(Arc::new(gateway))
        .with_transport(Arc::new(transport))
        .config(config)
        .build()
        .context("assembling report job")?;

    let report = covmon.run().await;
    match &report.outcome {
        RunOutcome::Completed(summary) => tracing::info!(
            subject = %report.subject,
            attempted = summary.attempted,
            delivered = summary.delivered,
            failed = summary.failed,
            "run completed"
        ),
        RunOutcome::NoRecipients => {
            tracing::warn!(subject = %report.subject, "no recipients; nothing sent");
        }
        RunOutcome::Aborted(e) => tracing::error!(error = %e, "run aborted"),
    }
    Ok(())
}
