use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eventflow_console::config::Config;
use eventflow_console::dashboard::{self, Dashboard};
use eventflow_console::gateway_client::GatewayClient;
use eventflow_console::models::LeadStatus;
use eventflow_console::view::View;

/// Operator console for the EventFlow lead backend.
#[derive(Parser)]
#[command(name = "eventflow-console", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Refresh from the backend and render a view
    Show {
        /// View to render: dashboard, leads, analytics or settings.
        /// Unknown names fall back to the dashboard.
        #[arg(default_value = "dashboard")]
        view: String,
    },
    /// Register a lead manually
    AddLead {
        /// Lead display name
        #[arg(long)]
        name: String,
        /// Contact number; bare numbers are treated as US
        #[arg(long)]
        phone: String,
        /// Event category, free text (e.g. "Wedding")
        #[arg(long)]
        event_type: String,
        /// Initial status: new, contacted or booked
        #[arg(long, default_value = "new")]
        status: String,
    },
    /// Send one SMS message to a batch of recipients
    SendSms {
        /// Message text
        #[arg(long)]
        message: String,
        /// Recipient number, repeatable
        #[arg(long = "to", required = true, num_args = 1..)]
        to: Vec<String>,
    },
    /// Fetch and print the backend activity report
    Report,
}

/// Main entry point for the console.
///
/// Initializes logging and configuration, builds the gateway client, then
/// dispatches the selected subcommand. Panels print to stdout; diagnostics
/// go to stderr so piped output stays clean.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventflow_console=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    let gateway = GatewayClient::from_config(&config)?;
    let dashboard = Dashboard::new(gateway);

    match cli.command {
        Command::Show { view } => {
            let view = View::parse(&view);
            dashboard.refresh().await;
            let snapshot = dashboard.snapshot();
            print!("{}", dashboard::render(view, &snapshot, &config));
        }
        Command::AddLead {
            name,
            phone,
            event_type,
            status,
        } => {
            let status: LeadStatus = status.parse()?;
            let lead = dashboard.add_lead(&name, &phone, &event_type, status).await?;
            println!(
                "Created lead #{}: {} ({})",
                lead.id,
                lead.name.as_deref().unwrap_or(&name),
                lead.phone_number
            );
        }
        Command::SendSms { message, to } => {
            let outcome = dashboard.send_bulk_sms(&message, &to).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Report => {
            let report = dashboard.report().await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
