//! Credentials and fetch settings
//!
//! Username and token live in `~/.ghportfolio/{username,token}`; the
//! `GHPORTFOLIO_USERNAME` / `GHPORTFOLIO_TOKEN` environment variables take
//! precedence over the files.

use crate::services::stargazers::{BackoffPolicy, DEFAULT_CONCURRENCY, DEFAULT_PAGE_SIZE};
use crate::types::{PortfolioError, Result};
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Data folder under the home directory
const APP_DIR: &str = ".ghportfolio";

const TOKEN_FILE: &str = "token";
const USERNAME_FILE: &str = "username";

pub const TOKEN_ENV: &str = "GHPORTFOLIO_TOKEN";
pub const USERNAME_ENV: &str = "GHPORTFOLIO_USERNAME";

const SETUP_HINT: &str = "Please run `ghportfolio setup`";

/// Where credential files are stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    dir: PathBuf,
}

impl ConfigPaths {
    /// `~/.ghportfolio`
    pub fn default_location() -> Result<Self> {
        let home = directories::UserDirs::new()
            .ok_or_else(|| PortfolioError::Config("Failed to get home directory".into()))?
            .home_dir()
            .to_path_buf();
        Ok(Self::with_dir(home.join(APP_DIR)))
    }

    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    pub fn username_path(&self) -> PathBuf {
        self.dir.join(USERNAME_FILE)
    }
}

/// Validated username and token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub username: Option<String>,
    pub token: Option<String>,
    pub page_size: u32,
    pub concurrency: usize,
    pub backoff: BackoffPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: None,
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
            backoff: BackoffPolicy::default(),
        }
    }
}

impl Config {
    /// Load from the credential files, then apply environment overrides
    pub fn load(paths: &ConfigPaths) -> Result<Self> {
        Self::load_with_env(paths, |key| std::env::var(key).ok())
    }

    fn load_with_env<E>(paths: &ConfigPaths, env: E) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        let username = non_empty(env(USERNAME_ENV)).or(read_trimmed(&paths.username_path())?);
        let token = non_empty(env(TOKEN_ENV)).or(read_trimmed(&paths.token_path())?);
        Ok(Self {
            username,
            token,
            ..Self::default()
        })
    }

    /// Both username and token must be present and non-empty
    pub fn credentials(&self) -> Result<Credentials> {
        let username = self.username.clone().ok_or_else(|| {
            PortfolioError::Config(format!("GitHub username is empty. {}", SETUP_HINT))
        })?;
        let token = self.token.clone().ok_or_else(|| {
            PortfolioError::Config(format!("GitHub token is empty. {}", SETUP_HINT))
        })?;
        Ok(Credentials { username, token })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trimmed file contents; a missing file reads as `None`
fn read_trimmed(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(non_empty(Some(content))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn write_secret(path: &Path, value: &str) -> Result<()> {
    fs::write(path, format!("{}\n", value.trim()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

/// Persist credentials, creating the data folder if needed
pub fn save_credentials(paths: &ConfigPaths, credentials: &Credentials) -> Result<()> {
    fs::create_dir_all(paths.dir())?;
    write_secret(&paths.username_path(), &credentials.username)?;
    write_secret(&paths.token_path(), &credentials.token)?;
    Ok(())
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim().to_string();
    if answer.is_empty() {
        return Err(PortfolioError::Config("no value entered".into()));
    }
    Ok(answer)
}

/// Interactive first-run setup: ask for username and token and store them
pub fn run_setup<R: BufRead, W: Write>(
    paths: &ConfigPaths,
    input: &mut R,
    output: &mut W,
) -> Result<Credentials> {
    writeln!(output, "Running Setup")?;
    writeln!(output, "--------------------------------------")?;

    let username = prompt(input, output, "Enter your Github username: ")?;
    let token = prompt(
        input,
        output,
        "Enter a Github Access Token (goto 'Settings/Developer settings/Personal Access Tokens') \
         with 'user', 'notifications', and 'push' permissions: ",
    )?;

    let credentials = Credentials { username, token };
    save_credentials(paths, &credentials)?;

    writeln!(output)?;
    writeln!(output, "--------------------------------------")?;
    Ok(credentials)
}
