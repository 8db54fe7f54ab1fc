//! Command pipeline for the `grant-sql` binary.
//!
//! The binary reads the command line with [`load_settings`], hands the
//! outcome to [`execute`] and reports failures with [`write_error`]. Keeping
//! help, plan resolution, rendering and output here lets the whole flow be
//! exercised in tests without spawning a process.

mod error;

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use ortho_config::OrthoConfig;
use tracing::{debug, info};
use uuid::Uuid;

pub use error::CliError;

use crate::atomic_io::write_atomic;
use crate::error::{GrantSetError, OutputError};
use crate::grant_set::{DEFAULT_OWNER_ID, GrantSet};
use crate::identifier::{IdGenerator, RandomIds, SeededIds};
use crate::permission::Permission;
use crate::settings::GrantSqlSettings;
use crate::statement::{InsertStatement, Owners, StatementLayout, TableName};

/// Usage text printed for `-h` and `--help`.
pub const USAGE: &str = concat!(
    "Usage: grant-sql [options]\n",
    "\n",
    "Prints an INSERT statement granting permissions to one user.\n",
    "\n",
    "Options:\n",
    "  --owner-id <uuid>      User receiving the grants (GRANT_SQL_OWNER_ID)\n",
    "  --created-by <uuid>    User recorded as issuing the grants (GRANT_SQL_CREATED_BY)\n",
    "  --table <name>         Target table (GRANT_SQL_TABLE, default permissions)\n",
    "  --grant-file <path>    JSON grant set replacing the superuser list (GRANT_SQL_GRANT_FILE)\n",
    "  --seed <n>             Derive row ids from a seed (GRANT_SQL_SEED)\n",
    "  --compact              Print the statement on one line (GRANT_SQL_COMPACT)\n",
    "  --output <path>        Write the statement to a file (GRANT_SQL_OUTPUT)\n",
    "  -h, --help             Print this help output\n",
);

/// Outcome of reading the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Show help output and exit successfully.
    Help,
    /// Continue with the loaded settings.
    Settings(GrantSqlSettings),
}

/// Loads settings from command-line arguments, environment and config files.
///
/// The first item of `args` is the program name. A `-h` or `--help` flag
/// short-circuits to [`ParseOutcome::Help`] without reading any
/// configuration.
///
/// # Errors
///
/// Returns [`CliError::Settings`] when the layered configuration is invalid.
///
/// # Example
///
/// ```
/// use std::ffi::OsString;
///
/// use grant_sql::cli::{ParseOutcome, load_settings};
///
/// let args = ["grant-sql", "--help"].map(OsString::from);
///
/// let outcome = load_settings(args).expect("help parses");
/// assert_eq!(outcome, ParseOutcome::Help);
/// ```
pub fn load_settings<I>(args: I) -> Result<ParseOutcome, CliError>
where
    I: IntoIterator<Item = OsString>,
{
    let collected: Vec<OsString> = args.into_iter().collect();
    if wants_help(&collected) {
        return Ok(ParseOutcome::Help);
    }
    GrantSqlSettings::load_from_iter(collected)
        .map(ParseOutcome::Settings)
        .map_err(|err| CliError::Settings {
            message: err.to_string(),
        })
}

fn wants_help(args: &[OsString]) -> bool {
    args.iter()
        .skip(1)
        .take_while(|arg| arg.as_os_str() != "--")
        .any(|arg| arg.as_os_str() == "-h" || arg.as_os_str() == "--help")
}

/// Where the rendered statement goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// The writer handed to [`run`], normally standard output.
    Stdout,
    /// A file written atomically.
    File(Utf8PathBuf),
}

/// Fully resolved inputs for one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantPlan {
    table: TableName,
    layout: StatementLayout,
    owners: Owners,
    permissions: Vec<Permission>,
    seed: Option<u64>,
    destination: Destination,
}

impl GrantPlan {
    /// Resolves settings into a plan.
    ///
    /// The owner comes from the settings, then the grant file, then
    /// [`DEFAULT_OWNER_ID`]. The creator falls back to the owner.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] when an identifier, the table name, a path, or the
    /// grant file is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use grant_sql::cli::GrantPlan;
    /// use grant_sql::GrantSqlSettings;
    ///
    /// let settings = GrantSqlSettings {
    ///     owner_id: None,
    ///     created_by: None,
    ///     table: None,
    ///     grant_file: None,
    ///     seed: Some(7),
    ///     compact: false,
    ///     output: None,
    /// };
    ///
    /// let plan = GrantPlan::from_settings(&settings).expect("plan resolves");
    /// assert_eq!(plan.permissions().len(), 12);
    /// assert_eq!(plan.owners().user_id.to_string(), "835b5bc7-6117-4669-9202-1d4acd7ad204");
    /// ```
    pub fn from_settings(settings: &GrantSqlSettings) -> Result<Self, CliError> {
        let table = TableName::new(settings.table_name())?;
        let grants = match settings.grant_file() {
            Some(path) => load_grant_file(path)?,
            None => GrantSet::superuser(),
        };

        let user_id = match settings.owner_id.as_deref() {
            Some(value) => parse_id(value).map_err(|message| CliError::InvalidOwnerId {
                value: value.to_owned(),
                message,
            })?,
            None => grants.user_id().unwrap_or(DEFAULT_OWNER_ID),
        };
        let created_by = match settings.created_by.as_deref() {
            Some(value) => parse_id(value).map_err(|message| CliError::InvalidCreatedBy {
                value: value.to_owned(),
                message,
            })?,
            None => grants.created_by().unwrap_or(user_id),
        };

        let destination = match settings.output() {
            Some(path) => Destination::File(utf8_path(path)?),
            None => Destination::Stdout,
        };

        Ok(Self {
            table,
            layout: settings.layout(),
            owners: Owners {
                created_by,
                user_id,
            },
            permissions: grants.permissions().to_vec(),
            seed: settings.seed,
            destination,
        })
    }

    /// Returns the target table.
    #[must_use]
    pub const fn table(&self) -> &TableName {
        &self.table
    }

    /// Returns the identifiers recorded against every row.
    #[must_use]
    pub const fn owners(&self) -> Owners {
        self.owners
    }

    /// Returns the permissions in grant order.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Returns where the statement will be written.
    #[must_use]
    pub const fn destination(&self) -> &Destination {
        &self.destination
    }
}

/// Assembles the statement described by `plan`.
///
/// Row identifiers are random unless the plan carries a seed.
///
/// # Errors
///
/// Returns [`CliError::StatementError`] if the plan has no permissions.
pub fn render_plan(plan: &GrantPlan) -> Result<InsertStatement, CliError> {
    let mut ids: Box<dyn IdGenerator> = match plan.seed {
        Some(seed) => Box::new(SeededIds::new(seed)),
        None => Box::new(RandomIds),
    };
    debug!(
        table = %plan.table,
        rows = plan.permissions.len(),
        seeded = plan.seed.is_some(),
        "assembling permission grant statement"
    );

    Ok(InsertStatement::assemble(
        plan.table.clone(),
        plan.layout,
        plan.owners,
        &plan.permissions,
        ids.as_mut(),
    )?)
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Table the statement inserts into.
    pub table: String,
    /// Number of value tuples emitted.
    pub row_count: usize,
    /// Where the statement was written.
    pub destination: Destination,
}

/// Resolves, renders and writes a statement.
///
/// The statement goes to `stdout` unless the settings name an output file.
///
/// # Errors
///
/// Returns [`CliError`] when the plan cannot be resolved or the statement
/// cannot be written.
///
/// # Example
///
/// ```
/// use grant_sql::GrantSqlSettings;
/// use grant_sql::cli::run;
///
/// let settings = GrantSqlSettings {
///     owner_id: None,
///     created_by: None,
///     table: None,
///     grant_file: None,
///     seed: None,
///     compact: true,
///     output: None,
/// };
/// let mut stdout = Vec::new();
///
/// let outcome = run(&settings, &mut stdout).expect("run succeeds");
/// let sql = String::from_utf8(stdout).expect("utf-8 output");
///
/// assert_eq!(outcome.row_count, 12);
/// assert!(sql.starts_with("INSERT INTO permissions ("));
/// ```
pub fn run<W>(settings: &GrantSqlSettings, mut stdout: W) -> Result<RunOutcome, CliError>
where
    W: Write,
{
    let plan = GrantPlan::from_settings(settings)?;
    let statement = render_plan(&plan)?;
    let sql = format!("{statement}\n");

    match &plan.destination {
        Destination::Stdout => write_stdout(&mut stdout, &sql)?,
        Destination::File(path) => write_output_file(path, &sql)?,
    }

    let outcome = RunOutcome {
        table: statement.table().to_string(),
        row_count: statement.rows().len(),
        destination: plan.destination,
    };
    info!(
        table = %outcome.table,
        rows = outcome.row_count,
        destination = ?outcome.destination,
        "permission grant statement written"
    );
    Ok(outcome)
}

/// Formats the confirmation printed after writing to a file.
///
/// Returns `None` when the statement itself went to standard output.
///
/// # Example
///
/// ```
/// use grant_sql::cli::{Destination, RunOutcome, success_message};
///
/// let outcome = RunOutcome {
///     table: "permissions".to_owned(),
///     row_count: 12,
///     destination: Destination::File("seed/grants.sql".into()),
/// };
///
/// assert_eq!(
///     success_message(&outcome).as_deref(),
///     Some("Wrote 12 permission grants for table permissions to seed/grants.sql")
/// );
/// ```
#[must_use]
pub fn success_message(outcome: &RunOutcome) -> Option<String> {
    match &outcome.destination {
        Destination::Stdout => None,
        Destination::File(path) => Some(format!(
            "Wrote {} permission grants for table {} to {}",
            outcome.row_count, outcome.table, path
        )),
    }
}

/// Carries out a parsed command line.
///
/// Help goes to `stdout`. Otherwise the statement is rendered with [`run`]
/// and, for file output, the [`success_message`] follows on `stdout`.
///
/// # Errors
///
/// Returns [`CliError`] when [`run`] fails or `stdout` cannot be written.
///
/// # Example
///
/// ```
/// use grant_sql::cli::{ParseOutcome, USAGE, execute};
///
/// let mut stdout = Vec::new();
/// execute(&ParseOutcome::Help, &mut stdout).expect("help prints");
///
/// assert_eq!(stdout, USAGE.as_bytes());
/// ```
pub fn execute<W>(outcome: &ParseOutcome, mut stdout: W) -> Result<(), CliError>
where
    W: Write,
{
    match outcome {
        ParseOutcome::Help => write_stdout(&mut stdout, USAGE),
        ParseOutcome::Settings(settings) => {
            let summary = run(settings, &mut stdout)?;
            match success_message(&summary) {
                Some(message) => write_stdout(&mut stdout, &format!("{message}\n")),
                None => Ok(()),
            }
        }
    }
}

/// Writes `err` to `stderr` as a single line.
///
/// Multi-line messages, such as argument parser output, are folded onto one
/// line. Failures to write are ignored since nothing else can report them.
///
/// # Example
///
/// ```
/// use grant_sql::cli::{CliError, write_error};
///
/// let err = CliError::Settings {
///     message: "unexpected argument\n\nUsage: grant-sql".to_owned(),
/// };
/// let mut stderr = Vec::new();
/// write_error(&err, &mut stderr);
///
/// assert_eq!(
///     String::from_utf8(stderr).expect("utf-8"),
///     "failed to load configuration: unexpected argument Usage: grant-sql\n"
/// );
/// ```
pub fn write_error<W>(err: &CliError, mut stderr: W)
where
    W: Write,
{
    debug!(error = %err, "grant-sql failed");
    let rendered = err.to_string();
    let line = rendered
        .lines()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if let Err(write_err) = writeln!(stderr, "{line}") {
        drop(write_err);
    }
}

fn write_stdout<W>(stdout: &mut W, text: &str) -> Result<(), CliError>
where
    W: Write,
{
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|err| CliError::Stdout {
            message: err.to_string(),
        })
}

fn parse_id(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|err| err.to_string())
}

fn utf8_path(path: &Path) -> Result<Utf8PathBuf, CliError> {
    Utf8PathBuf::from_path_buf(path.to_path_buf()).map_err(|rejected| CliError::NonUtf8Path {
        path: rejected.to_string_lossy().into_owned(),
    })
}

/// Splits `path` into its parent directory and bare file name.
fn split_parent(path: &Utf8Path) -> (&Utf8Path, &Utf8Path) {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path.file_name().map_or(path, Utf8Path::new);
    (parent, file_name)
}

fn load_grant_file(path: &Path) -> Result<GrantSet, CliError> {
    let grant_path = utf8_path(path)?;
    let (parent, file_name) = split_parent(&grant_path);
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| {
        GrantSetError::IoError {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    })?;
    let grants = GrantSet::from_file(&dir, file_name)?;
    debug!(
        path = %grant_path,
        permissions = grants.permissions().len(),
        "loaded grant file"
    );
    Ok(grants)
}

fn write_output_file(path: &Utf8Path, contents: &str) -> Result<(), CliError> {
    let (parent, file_name) = split_parent(path);
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| {
        OutputError::Write {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    })?;
    write_atomic(&dir, file_name, contents)?;
    Ok(())
}
