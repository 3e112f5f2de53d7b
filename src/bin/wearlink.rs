//! Command-line driver for the wearable integration flows.
//!
//! Usage:
//!
//! ```text
//! wearlink [--config wearlink.toml] <command>
//! ```
//!
//! Every command runs against the configured backend with the real
//! adapters: `reqwest` for the API, Tokio timers for polling, and a JSON
//! file for the persisted markers. Navigation that would leave the app is
//! reported on stdout. Logging is controlled by `WEARLINK_LOG` using the
//! usual `EnvFilter` syntax, and Ctrl-C cancels a running poll.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use mockable::DefaultClock;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Builder;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use wearlink::{
    api::{ApiError, HttpApiClient},
    check_in::services::DailyCheckInGate,
    config::{ClientConfig, ConfigError},
    device::{
        domain::{
            AppRoute, ConnectionOutcome, DeviceDomainError, DisconnectionOutcome, IntegrationUrl,
            ProviderId,
        },
        ports::AppNavigator,
        services::{
            ConnectionController, ConnectionError, ConsentCallbackHandler,
            DisconnectionController, DisconnectionError,
        },
    },
    local_state::{LocalState, adapters::JsonFileKeyValueStore, ports::StoreError},
    messages::{MessageCatalog, MessageError, UserMessage},
    polling::adapters::TokioPollTimer,
    verification::{
        domain::{
            EmailAddress, OtpContext, OtpFeedback, OtpResendError, OtpSuccess,
            ParseOtpContextError, VerificationDomainError,
        },
        services::OtpVerificationFlow,
    },
};

const LOG_ENV: &str = "WEARLINK_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";
const INTERRUPTED: u8 = 130;

#[derive(Debug, Parser)]
#[command(name = "wearlink", version, about = "Wearable device integration client")]
struct Cli {
    /// TOML file layered over the built-in defaults.
    #[arg(long, global = true, default_value = "wearlink.toml")]
    config: Utf8PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start a device connection and follow it through to the provider.
    Connect {
        /// Provider to link, for example `garmin`.
        #[arg(long)]
        provider: String,
    },
    /// Resume synchronization from a `task_id`/`provider` query string.
    Sync {
        /// Query string handed to the synchronization screen.
        #[arg(long)]
        query: String,
    },
    /// Unlink the connected device.
    Disconnect,
    /// Report the provider consent callback.
    Consent {
        /// Report that consent was refused.
        #[arg(long)]
        denied: bool,
    },
    /// Submit a one-time passcode.
    Verify {
        /// Address the code was sent to.
        #[arg(long)]
        email: String,
        /// Six-digit code.
        #[arg(long)]
        code: String,
        /// `verify` or `reset_password`.
        #[arg(long, default_value = "verify")]
        context: String,
    },
    /// Ask for a fresh one-time passcode.
    Resend {
        /// Address to send the code to.
        #[arg(long)]
        email: String,
        /// `verify` or `reset_password`.
        #[arg(long, default_value = "verify")]
        context: String,
    },
    /// Inspect or update the daily check-in markers.
    CheckIn {
        #[command(subcommand)]
        action: Option<CheckInAction>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum CheckInAction {
    /// Print whether today's check-in should be shown.
    Status,
    /// Record today's check-in as completed.
    Complete,
    /// Record today's check-in as skipped.
    Skip,
}

/// Errors that abort a command.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("api.base_url is not configured")]
    MissingBaseUrl,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Device(#[from] DeviceDomainError),
    #[error(transparent)]
    Verification(#[from] VerificationDomainError),
    #[error(transparent)]
    OtpContext(#[from] ParseOtpContextError),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error(transparent)]
    Disconnection(#[from] DisconnectionError),
    #[error(transparent)]
    Message(#[from] MessageError),
    #[error("failed to start the async runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

/// Reports navigation on stdout.
struct TerminalNavigator;

impl TerminalNavigator {
    fn announce(line: &str) {
        if let Err(err) = writeln!(io::stdout(), "{line}") {
            tracing::warn!(%err, "failed to report navigation");
        }
    }
}

impl AppNavigator for TerminalNavigator {
    fn open_external(&self, url: &IntegrationUrl) {
        Self::announce(&external_line(url));
    }

    fn go_to(&self, route: AppRoute) {
        Self::announce(&route_line(route));
    }
}

fn external_line(url: &IntegrationUrl) -> String {
    format!("open {url}")
}

fn route_line(route: AppRoute) -> String {
    format!("navigate {route}")
}

type CliConnectionController =
    ConnectionController<HttpApiClient, TokioPollTimer, TerminalNavigator, JsonFileKeyValueStore>;

/// Shared adapters for one invocation.
struct App {
    config: ClientConfig,
    state: LocalState<JsonFileKeyValueStore>,
    catalog: MessageCatalog,
    clock: Arc<DefaultClock>,
}

impl App {
    fn load(config_path: &Utf8Path) -> Result<Self, CliError> {
        let config = ClientConfig::load(Some(config_path))?;
        let store = JsonFileKeyValueStore::open(&config.storage.state_file)?;
        Ok(Self {
            catalog: MessageCatalog::new(config.locale),
            state: LocalState::new(Arc::new(store)),
            clock: Arc::new(DefaultClock),
            config,
        })
    }

    fn api(&self) -> Result<Arc<HttpApiClient>, CliError> {
        if self.config.api.base_url.trim().is_empty() {
            return Err(CliError::MissingBaseUrl);
        }
        let client = HttpApiClient::new(
            &self.config.api.base_url,
            self.config.api.bearer_token.clone(),
            self.config.request_timeout(),
        )?;
        Ok(Arc::new(client))
    }

    fn say(line: &str) -> Result<(), CliError> {
        writeln!(io::stdout(), "{line}").map_err(CliError::Output)
    }

    fn say_message(&self, message: &UserMessage) -> Result<(), CliError> {
        Self::say(&self.catalog.render(message)?)
    }

    async fn connect(
        &self,
        provider: &str,
        cancellation: &CancellationToken,
    ) -> Result<ExitCode, CliError> {
        let provider_id = ProviderId::new(provider)?;
        let outcome = self
            .connection_controller()?
            .connect(&provider_id, cancellation)
            .await?;
        self.report_connection(&outcome)
    }

    async fn sync(
        &self,
        query: &str,
        cancellation: &CancellationToken,
    ) -> Result<ExitCode, CliError> {
        let outcome = self
            .connection_controller()?
            .synchronize_from_query(query, cancellation)
            .await?;
        self.report_connection(&outcome)
    }

    fn connection_controller(&self) -> Result<CliConnectionController, CliError> {
        Ok(ConnectionController::new(
            self.api()?,
            Arc::new(TokioPollTimer),
            Arc::new(TerminalNavigator),
            self.state.clone(),
            self.config.connection_policy(),
        ))
    }

    fn report_connection(&self, outcome: &ConnectionOutcome) -> Result<ExitCode, CliError> {
        match outcome {
            ConnectionOutcome::Redirected { retry_count, .. } => {
                Self::say(&format!(
                    "handed off to the provider after {retry_count} retry signal(s)"
                ))?;
                Ok(ExitCode::SUCCESS)
            }
            ConnectionOutcome::Failed(failure) => {
                self.say_message(&failure.user_message())?;
                Ok(ExitCode::FAILURE)
            }
            ConnectionOutcome::Cancelled => {
                Self::say("connection cancelled")?;
                Ok(ExitCode::from(INTERRUPTED))
            }
        }
    }

    async fn disconnect(&self, cancellation: &CancellationToken) -> Result<ExitCode, CliError> {
        let controller = DisconnectionController::new(
            self.api()?,
            Arc::new(TokioPollTimer),
            self.state.clone(),
            self.config.disconnection_policy(),
        );
        match controller.disconnect(cancellation).await? {
            DisconnectionOutcome::Succeeded => {
                Self::say("device disconnected")?;
                Ok(ExitCode::SUCCESS)
            }
            DisconnectionOutcome::Failed(failure) => {
                self.say_message(&failure.user_message())?;
                Ok(ExitCode::FAILURE)
            }
            DisconnectionOutcome::Cancelled => {
                Self::say("disconnection cancelled")?;
                Ok(ExitCode::from(INTERRUPTED))
            }
        }
    }

    async fn consent(&self, denied: bool) -> Result<ExitCode, CliError> {
        let handler = ConsentCallbackHandler::new(
            self.api()?,
            self.state.clone(),
            Arc::clone(&self.clock),
        );
        let outcome = handler.handle(!denied).await;
        if let Some(message) = outcome.error() {
            self.say_message(message)?;
        }
        TerminalNavigator.go_to(outcome.next_route());
        Ok(ExitCode::SUCCESS)
    }

    async fn verify(&self, email: &str, code: &str, context: &str) -> Result<ExitCode, CliError> {
        let address = EmailAddress::new(email)?;
        let mut flow = OtpVerificationFlow::with_max_attempts(
            self.api()?,
            address.clone(),
            OtpContext::try_from(context)?,
            self.config.otp.max_attempts,
        );
        flow.enter_code(code);
        match flow.submit().await {
            Ok(OtpSuccess::Verified) => {
                Self::say("account verified")?;
                Ok(ExitCode::SUCCESS)
            }
            Ok(OtpSuccess::ResetAuthorized(grant)) => {
                Self::say(&format!("password reset authorized for {}", grant.email()))?;
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                self.say_message(&err.feedback().user_message(&address))?;
                Ok(ExitCode::FAILURE)
            }
        }
    }

    async fn resend(&self, email: &str, context: &str) -> Result<ExitCode, CliError> {
        let address = EmailAddress::new(email)?;
        let mut flow =
            OtpVerificationFlow::new(self.api()?, address.clone(), OtpContext::try_from(context)?);
        match flow.resend().await {
            Ok(()) => {
                Self::say(&format!("a new code was sent to {address}"))?;
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                let feedback = match err {
                    OtpResendError::AlreadyVerified => OtpFeedback::AlreadyVerified,
                    OtpResendError::Unavailable(_) => OtpFeedback::ResendFailed,
                };
                self.say_message(&feedback.user_message(&address))?;
                Ok(ExitCode::FAILURE)
            }
        }
    }

    fn check_in(&self, action: CheckInAction) -> Result<ExitCode, CliError> {
        let gate = DailyCheckInGate::new(self.state.clone(), Arc::clone(&self.clock));
        match action {
            CheckInAction::Status => Self::say(gate.decision()?.as_str())?,
            CheckInAction::Complete => {
                gate.mark_completed()?;
                Self::say(&format!("check-in completed for {}", gate.today()))?;
            }
            CheckInAction::Skip => {
                gate.mark_skipped()?;
                Self::say(&format!("check-in skipped for {}", gate.today()))?;
            }
        }
        Ok(ExitCode::SUCCESS)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();
    match execute(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(%err, "command failed");
            if writeln!(io::stderr(), "error: {err}").is_err() {
                tracing::warn!("failed to write error to stderr");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn execute(cli: Cli) -> Result<ExitCode, CliError> {
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    runtime.block_on(async {
        let app = App::load(&cli.config)?;
        let cancellation = cancel_on_interrupt();
        match cli.command {
            Command::Connect { provider } => app.connect(&provider, &cancellation).await,
            Command::Sync { query } => app.sync(&query, &cancellation).await,
            Command::Disconnect => app.disconnect(&cancellation).await,
            Command::Consent { denied } => app.consent(denied).await,
            Command::Verify {
                email,
                code,
                context,
            } => app.verify(&email, &code, &context).await,
            Command::Resend { email, context } => app.resend(&email, &context).await,
            Command::CheckIn { action } => app.check_in(action.unwrap_or(CheckInAction::Status)),
        }
    })
}

fn cancel_on_interrupt() -> CancellationToken {
    let cancellation = CancellationToken::new();
    let trigger = cancellation.clone();
    drop(tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, cancelling");
            trigger.cancel();
        }
    }));
    cancellation
}
