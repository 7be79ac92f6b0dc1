use std::fmt;
use std::path::PathBuf;

use crate::error::{QaError, QaResult};

/// Default location of the pretest record, relative to the crate root.
pub const DEFAULT_PRETEST_IDS_PATH: &str = "tests/testdata/pretest-ids.json";

/// Keys every run must provide, in the order they are checked.
pub const REQUIRED_KEYS: &[&str] = &[
    "UI_BASE_URL",
    "API_BASE_URL",
    "DB_HOST",
    "DB_USER",
    "DB_PASSWORD",
    "DB_NAME",
    "ADMIN_USERNAME",
    "ADMIN_PASSWORD",
    "USER_USERNAME",
    "USER_PASSWORD",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "admin" | "administrator" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(format!("unknown role: {s}. valid roles: admin, user")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub name: String,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"***")
            .field("name", &self.name)
            .finish()
    }
}

/// Process-wide configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Env {
    pub ui_base_url: String,
    pub api_base_url: String,
    pub db: DbConfig,
    pub admin: Credentials,
    pub user: Credentials,
}

impl Env {
    /// Load `.env` (if present) and resolve every required key from the
    /// process environment. Fails on the first key that is unset or empty.
    pub fn load() -> QaResult<Self> {
        // A missing .env file is normal in CI where variables are injected.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration for a scenario run. `Ok(None)` only when
    /// `NQA_SKIP_BDD` opts out; a missing key is an error otherwise.
    pub fn for_scenarios() -> QaResult<Option<Self>> {
        let _ = dotenvy::dotenv();
        Self::for_scenarios_from_lookup(|key| std::env::var(key).ok())
    }

    pub fn for_scenarios_from_lookup<F>(lookup: F) -> QaResult<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        if truthy(lookup(SKIP_SCENARIOS).as_deref()) {
            return Ok(None);
        }
        Self::from_lookup(lookup).map(Some)
    }

    /// Resolve the configuration through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> QaResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> QaResult<String> {
            match lookup(key) {
                Some(v) if !v.trim().is_empty() => Ok(v),
                _ => Err(QaError::MissingEnv(key.to_string())),
            }
        };

        let ui_base_url = base_url("UI_BASE_URL", required("UI_BASE_URL")?)?;
        let api_base_url = base_url("API_BASE_URL", required("API_BASE_URL")?)?;
        let db = DbConfig {
            host: required("DB_HOST")?,
            user: required("DB_USER")?,
            password: required("DB_PASSWORD")?,
            name: required("DB_NAME")?,
        };
        let admin = Credentials {
            username: required("ADMIN_USERNAME")?,
            password: required("ADMIN_PASSWORD")?,
        };
        let user = Credentials {
            username: required("USER_USERNAME")?,
            password: required("USER_PASSWORD")?,
        };

        Ok(Env {
            ui_base_url,
            api_base_url,
            db,
            admin,
            user,
        })
    }

    pub fn credentials(&self, role: Role) -> &Credentials {
        match role {
            Role::Admin => &self.admin,
            Role::User => &self.user,
        }
    }

    /// Absolute UI URL for a route such as `/ui/login`.
    pub fn ui_url(&self, route: &str) -> String {
        format!("{}{route}", self.ui_base_url)
    }
}

fn base_url(key: &str, value: String) -> QaResult<String> {
    let trimmed = value.trim().trim_end_matches('/').to_string();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(QaError::InvalidEnv {
            key: key.to_string(),
            reason: format!("expected an http(s) URL, got {value:?}"),
        });
    }
    Ok(trimmed)
}

/// Set to skip the scenario run instead of failing on missing configuration.
pub const SKIP_SCENARIOS: &str = "NQA_SKIP_BDD";

/// Location of the pretest record: `PRETEST_IDS_PATH` or the default path.
pub fn pretest_ids_path() -> PathBuf {
    std::env::var("PRETEST_IDS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PRETEST_IDS_PATH))
}

/// True when `HEADED` asks for a visible browser (`1`, `true` or `yes`).
pub fn headed() -> bool {
    flag_set("HEADED")
}

pub fn flag_set(key: &str) -> bool {
    truthy(std::env::var(key).ok().as_deref())
}

fn truthy(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("1" | "true" | "yes")
    )
}
