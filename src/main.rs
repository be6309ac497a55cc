use clap::{Parser, Subcommand};
use giftcert::application::resolver::PaymentResolver;
use giftcert::application::wizard::{PurchaseWizard, WizardEvent};
use giftcert::config::Config;
use giftcert::domain::nominal::{MIN_NOMINAL, PRESET_NOMINALS};
use giftcert::infrastructure::http::{HttpCheckoutInitiator, HttpPaymentVerifier};
use giftcert::interfaces::return_url::order_id_from_url;
use miette::{IntoDiagnostic, Result, miette};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Payment verification endpoint (overrides GIFTCERT_CHECK_PAYMENT_URL)
    #[arg(long, global = true)]
    check_payment_url: Option<String>,

    /// Checkout endpoint (overrides GIFTCERT_CREATE_PAYMENT_URL)
    #[arg(long, global = true)]
    create_payment_url: Option<String>,

    /// Page the payment provider returns to (overrides GIFTCERT_RETURN_URL)
    #[arg(long, global = true)]
    return_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fill in the three wizard steps and start checkout
    Purchase {
        /// One of the preset amounts
        #[arg(long, value_parser = parse_preset, conflicts_with = "custom")]
        nominal: Option<u64>,

        /// Free-text amount; non-digits are ignored
        #[arg(long)]
        custom: Option<String>,

        /// Name printed on the certificate
        #[arg(long)]
        recipient: String,

        /// Optional sender name
        #[arg(long, default_value = "")]
        sender: String,
    },
    /// Resolve the payment outcome from the URL the provider returned to
    Resolve {
        /// Full return URL, including the `orderId` query parameter
        redirect: String,
    },
}

fn parse_preset(raw: &str) -> std::result::Result<u64, String> {
    let value: u64 = raw.parse().map_err(|e| format!("{e}"))?;
    if PRESET_NOMINALS.contains(&value) {
        Ok(value)
    } else {
        Err(format!("not a preset amount, expected one of {PRESET_NOMINALS:?}"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()
        .and_then(|config| {
            config.with_overrides(
                cli.check_payment_url.as_deref(),
                cli.create_payment_url.as_deref(),
                cli.return_url.as_deref(),
            )
        })
        .into_diagnostic()?;

    match cli.command {
        Command::Purchase {
            nominal,
            custom,
            recipient,
            sender,
        } => purchase(&config, nominal, custom, recipient, sender).await,
        Command::Resolve { redirect } => resolve(&config, &redirect).await,
    }
}

async fn purchase(
    config: &Config,
    nominal: Option<u64>,
    custom: Option<String>,
    recipient: String,
    sender: String,
) -> Result<()> {
    let checkout_url = config.require_create_payment_url().into_diagnostic()?;
    let return_url = config.require_return_url().into_diagnostic()?;
    let checkout = HttpCheckoutInitiator::new(checkout_url.clone()).into_diagnostic()?;
    let mut wizard = PurchaseWizard::new(Box::new(checkout), return_url.clone());

    // Step 1: amount
    match (nominal, custom) {
        (Some(value), _) => wizard.select_preset_amount(value),
        (None, Some(raw)) => wizard.enter_custom_amount(&raw),
        (None, None) => {}
    }
    if wizard.advance().await == WizardEvent::Stayed {
        return Err(miette!(
            "Amount {} is below the minimum of {MIN_NOMINAL}",
            wizard.nominal()
        ));
    }

    // Step 2: recipient
    wizard.set_recipient_name(recipient);
    wizard.set_sender_name(sender);
    if wizard.advance().await == WizardEvent::Stayed {
        return Err(miette!("Recipient name is required"));
    }

    // Step 3: payment
    match wizard.advance().await {
        WizardEvent::Redirect(redirect) => {
            eprintln!(
                "Order {} for {} created, continue payment at:",
                redirect.order_number,
                wizard.order_request().into_diagnostic()?.nominal
            );
            println!("{}", redirect.form_url);
            Ok(())
        }
        WizardEvent::Failed(notice) => Err(miette!("{notice}")),
        other => Err(miette!("Unexpected wizard state: {other:?}")),
    }
}

async fn resolve(config: &Config, redirect: &str) -> Result<()> {
    let order_id = match Url::parse(redirect) {
        Ok(url) => order_id_from_url(&url),
        Err(e) => {
            warn!(error = %e, "Return URL could not be parsed");
            None
        }
    };

    let verifier = HttpPaymentVerifier::new(config.check_payment_url.clone()).into_diagnostic()?;
    let mut resolver = PaymentResolver::mount(Box::new(verifier), order_id);
    let state = resolver.resolve().await;
    println!("{}", serde_json::to_string_pretty(state).into_diagnostic()?);
    Ok(())
}
