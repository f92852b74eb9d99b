//! Command-line front end of the records console.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use records_console::domain::Resource;
use records_console::domain::catalogue::Catalogue;
use records_console::domain::job_board::{
    AcademicFormation, Application, Category, Company, Course, Experience, Language, Offer,
    Professional, Reference, Skill,
};
use records_console::domain::license_work::{
    Dependence, Employee, Employer, Holiday, LicenseApplication, LicenseForm, Reason, State,
};
use records_console::domain::types::RecordId;
use records_console::domain::uic::{Enrollment, ProjectPlan, Requirement};
use records_console::domain::user::{Role, User};
use records_console::dto::dialog::{Dialog, DialogKind};
use records_console::forms::login::LoginForm;
use records_console::models::config::ConsoleConfig;
use records_console::repository::{HttpRepository, ResourceReader};
use records_console::repository::errors::RepositoryError;
use records_console::services::catalogues::load_options;
use records_console::services::dialogs::{from_service_error, translate};
use records_console::services::list::ListController;
use records_console::services::{Outcome, ServiceError, auth};
use records_console::session::{FileSessionStore, SessionError, SessionHandle};
use records_console::ui::{Confirmation, ConfirmationGate, DialogPresenter, Navigator, Ui};

#[derive(Parser, Debug)]
#[command(name = "records-console")]
#[command(about = "Administrative console for the job-board and academic records backend")]
#[command(version)]
struct Cli {
    /// Answer yes to every confirmation prompt
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    /// Session file overriding the configured one
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the issued token
    Login {
        #[arg(long, short = 'u')]
        username: String,
        /// Read from standard input when omitted
        #[arg(long, short = 'p')]
        password: Option<String>,
    },
    /// Revoke the token and forget the session
    Logout,
    /// List one page of a resource
    List {
        resource: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        per_page: Option<usize>,
        #[arg(long, short = 'f')]
        filter: Option<String>,
    },
    /// Show a single record
    Show { resource: String, id: i64 },
    /// Delete one or more records
    Delete {
        resource: String,
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// List the entries of a catalogue family, e.g. IDENTIFICATION_TYPE
    Catalogues { kind: String },
    /// Select the professional whose curriculum is being edited
    Professional { id: i64 },
    /// Print the resources this console knows about
    Resources,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("unknown resource `{0}`; run `records-console resources` for the list")]
    UnknownResource(String),

    #[error("invalid id {0}")]
    InvalidId(i64),

    #[error("failed to read from standard input: {0}")]
    Input(#[from] std::io::Error),

    /// Already reported to the user through a dialog.
    #[error("operation failed")]
    Reported,
}

/// Prints dialogs to the terminal and asks confirmations on standard input.
struct ConsoleUi {
    assume_yes: bool,
}

impl DialogPresenter for ConsoleUi {
    fn present(&self, dialog: Dialog) {
        match dialog.kind {
            DialogKind::Success | DialogKind::Info => println!("{}", dialog.to_plain_text()),
            DialogKind::Warning | DialogKind::Error => eprintln!("{}", dialog.to_plain_text()),
        }
    }
}

#[async_trait]
impl ConfirmationGate for ConsoleUi {
    async fn confirm(&self, confirmation: Confirmation) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{} {} [y/N] ", confirmation.title(), confirmation.text());
        if std::io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match BufReader::new(tokio::io::stdin()).read_line(&mut answer).await {
            Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
            Err(err) => {
                log::error!("Failed to read confirmation: {err}");
                false
            }
        }
    }
}

impl Navigator for ConsoleUi {
    fn navigate(&self, route: &str) {
        log::debug!("Navigating to {route}");
    }
}

struct Context {
    config: ConsoleConfig,
    repo: Arc<HttpRepository>,
    session: SessionHandle,
    store: FileSessionStore,
    ui: Ui,
}

fn record_id(id: i64) -> Result<RecordId, CliError> {
    RecordId::new(id).map_err(|_| CliError::InvalidId(id))
}

fn print_json<S: serde::Serialize>(value: &S) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => log::error!("Failed to render record: {err}"),
    }
}

fn outcome(outcome: Outcome) -> Result<(), CliError> {
    match outcome {
        Outcome::Done | Outcome::Cancelled | Outcome::Stale => Ok(()),
        Outcome::Failed => Err(CliError::Reported),
    }
}

#[derive(Debug)]
enum ResourceAction {
    List {
        page: usize,
        per_page: Option<usize>,
        filter: Option<String>,
    },
    Show(RecordId),
    Delete(Vec<RecordId>),
}

async fn run_resource<T: Resource>(ctx: &Context, action: ResourceAction) -> Result<(), CliError> {
    match action {
        ResourceAction::List {
            page,
            per_page,
            filter,
        } => {
            let per_page = per_page.unwrap_or(ctx.config.per_page);
            let mut list: ListController<T, _> =
                ListController::new(ctx.repo.clone(), ctx.ui.clone(), per_page);

            outcome(list.open_page(filter.as_deref(), page).await)?;

            for record in list.records() {
                print_json(record);
            }
            let paginator = list.paginator();
            println!(
                "Page {} of {} ({}-{} of {})",
                paginator.current_page,
                paginator.last_page(),
                paginator.from(),
                paginator.to(),
                paginator.total
            );
            Ok(())
        }
        ResourceAction::Show(id) => {
            match ResourceReader::<T>::get(ctx.repo.as_ref(), id).await {
                Ok(record) => {
                    print_json(&record);
                    Ok(())
                }
                Err(err) => {
                    ctx.ui.dialogs.present(translate(&err));
                    Err(CliError::Reported)
                }
            }
        }
        ResourceAction::Delete(ids) => {
            let mut list: ListController<T, _> =
                ListController::new(ctx.repo.clone(), ctx.ui.clone(), ctx.config.per_page);

            if let [id] = ids.as_slice() {
                return outcome(list.delete_one(*id).await);
            }
            for id in ids {
                list.select(id);
            }
            outcome(list.delete_selected().await)
        }
    }
}

macro_rules! resources {
    ($($ty:ty),* $(,)?) => {
        const RESOURCE_PATHS: &[&str] = &[$(<$ty as Resource>::PATH),*];

        async fn dispatch(
            ctx: &Context,
            name: &str,
            action: ResourceAction,
        ) -> Result<(), CliError> {
            let name = name.trim_matches('/');
            $(
                if name == <$ty as Resource>::PATH {
                    return run_resource::<$ty>(ctx, action).await;
                }
            )*
            Err(CliError::UnknownResource(name.to_string()))
        }
    };
}

resources!(
    User,
    Role,
    Catalogue,
    Professional,
    Course,
    AcademicFormation,
    Experience,
    Language,
    Skill,
    Reference,
    Category,
    Company,
    Offer,
    Application,
    Employer,
    Employee,
    LicenseForm,
    Holiday,
    Reason,
    State,
    Dependence,
    LicenseApplication,
    ProjectPlan,
    Enrollment,
    Requirement,
);

async fn read_password() -> Result<String, CliError> {
    print!("Password: ");
    std::io::stdout().flush()?;
    let mut password = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut password)
        .await?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}

async fn run(ctx: &Context, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => read_password().await?,
            };
            let form = LoginForm {
                username,
                password,
                device_name: ctx.config.device_name.clone(),
            };
            let session =
                auth::login(ctx.repo.as_ref(), &ctx.store, &ctx.session, form).await?;
            if let Some(user) = &session.user {
                let name = user.full_name();
                println!(
                    "Logged in as {}",
                    if name.is_empty() { &user.username } else { &name }
                );
            }
            Ok(())
        }
        Command::Logout => {
            auth::logout(ctx.repo.as_ref(), &ctx.store, &ctx.session).await?;
            Ok(())
        }
        Command::List {
            resource,
            page,
            per_page,
            filter,
        } => {
            let action = ResourceAction::List {
                page,
                per_page,
                filter,
            };
            dispatch(ctx, &resource, action).await
        }
        Command::Show { resource, id } => {
            dispatch(ctx, &resource, ResourceAction::Show(record_id(id)?)).await
        }
        Command::Delete { resource, ids } => {
            let ids = ids
                .into_iter()
                .map(record_id)
                .collect::<Result<Vec<_>, _>>()?;
            dispatch(ctx, &resource, ResourceAction::Delete(ids)).await
        }
        Command::Catalogues { kind } => {
            for option in load_options(ctx.repo.as_ref(), &kind).await? {
                println!("{:>6}  {}", option.id, option.label);
            }
            Ok(())
        }
        Command::Professional { id } => {
            let professional =
                ResourceReader::<Professional>::get(ctx.repo.as_ref(), record_id(id)?).await?;
            auth::select_professional(&ctx.store, &ctx.session, professional)?;
            println!("Professional {id} selected");
            Ok(())
        }
        Command::Resources => {
            for path in RESOURCE_PATHS {
                println!("{path}");
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let config = match ConsoleConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading console config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let store = FileSessionStore::new(
        cli.session_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.session_file)),
    );
    let session = match SessionHandle::restore(&store) {
        Ok(session) => session,
        Err(err) => {
            log::error!("Error restoring session from {}: {err}", store.path().display());
            return ExitCode::FAILURE;
        }
    };

    let repo = match HttpRepository::from_config(&config, session.clone()) {
        Ok(repo) => Arc::new(repo),
        Err(err) => {
            log::error!("Error building HTTP client: {err}");
            return ExitCode::FAILURE;
        }
    };

    let ctx = Context {
        config,
        repo,
        session,
        store,
        ui: Ui::from_shared(Arc::new(ConsoleUi {
            assume_yes: cli.yes,
        })),
    };

    match run(&ctx, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Reported) => ExitCode::FAILURE,
        Err(CliError::Service(err)) => {
            ctx.ui.dialogs.present(from_service_error(&err));
            ExitCode::FAILURE
        }
        Err(CliError::Repository(err)) => {
            ctx.ui.dialogs.present(translate(&err));
            ExitCode::FAILURE
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
