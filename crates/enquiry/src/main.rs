//! `admissions-enquiry` -- interactive admission enquiry form.
//!
//! Asks a prospective parent for the enquiry details on the terminal and
//! delivers them to the school's intake endpoint, offering a retry when
//! delivery fails.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default        | Description                              |
//! |------------------------|----------|----------------|------------------------------------------|
//! | `INTAKE_URL`           | yes      | --             | Intake endpoint, e.g. `https://script.example/exec` |
//! | `INTAKE_ENCODING`      | no       | `multipart`    | `multipart` or `urlencoded`              |
//! | `INTAKE_RESPONSE_MODE` | no       | `acknowledged` | `acknowledged` or `opaque`               |

use std::sync::Arc;

use admissions_enquiry::submitter::EnquirySubmitter;
use admissions_enquiry::terminal::{SessionOutcome, Terminal};
use admissions_intake::{IntakeApi, IntakeConfig};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the prompts.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "admissions_enquiry=info,admissions_intake=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = IntakeConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid intake configuration");
        std::process::exit(1);
    });

    let api = IntakeApi::new(config);
    tracing::info!(
        url = %api.config().url,
        encoding = api.config().encoding.as_str(),
        mode = api.config().mode.as_str(),
        "Starting admissions-enquiry",
    );

    let mut submitter = EnquirySubmitter::new(Arc::new(api));
    let mut terminal = Terminal::new(
        tokio::io::BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    );

    let outcome = terminal.run(&mut submitter).await?;
    tracing::info!(
        attempts = submitter.attempts(),
        outcome = ?outcome,
        "Enquiry session finished",
    );

    if outcome == SessionOutcome::Abandoned {
        std::process::exit(1);
    }
    Ok(())
}
