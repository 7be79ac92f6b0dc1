//! Rust side of the Playwright bridge.
//!
//! The bridge script is embedded in the binary, written to a temp dir at
//! launch and run with `node`. Playwright itself is resolved from the working
//! directory's `node_modules`.

use std::fmt;
use std::io::ErrorKind;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::locator::Locator;
use crate::env::{self, Env};
use crate::error::{QaError, QaResult};

const BRIDGE_SCRIPT: &str = include_str!("bridge.js");

/// Upper bound on a single bridge command. Playwright's own action timeout
/// fires well before this.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(60);

/// Playwright's default per-action timeout, in milliseconds.
pub const ACTION_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Load,
    DomContentLoaded,
    NetworkIdle,
}

impl LoadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::Load => "load",
            LoadState::DomContentLoaded => "domcontentloaded",
            LoadState::NetworkIdle => "networkidle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitState {
    Attached,
    Detached,
    Visible,
    Hidden,
}

impl WaitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitState::Attached => "attached",
            WaitState::Detached => "detached",
            WaitState::Visible => "visible",
            WaitState::Hidden => "hidden",
        }
    }
}

/// An option of a `<select>`, picked by value or by visible label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectBy<'a> {
    Value(&'a str),
    Label(&'a str),
}

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub base_url: String,
    pub headless: bool,
    pub slow_mo_ms: u64,
    pub action_timeout_ms: u64,
    pub node: String,
}

impl BrowserConfig {
    /// Headless unless `HEADED` is set, in which case actions are slowed
    /// down so they can be followed.
    pub fn from_env(env: &Env) -> Self {
        let headed = env::headed();
        BrowserConfig {
            base_url: env.ui_base_url.clone(),
            headless: !headed,
            slow_mo_ms: if headed { 100 } else { 0 },
            action_timeout_ms: ACTION_TIMEOUT_MS,
            node: "node".to_string(),
        }
    }
}

#[derive(Deserialize)]
struct Reply {
    id: u64,
    ok: bool,
    #[serde(default)]
    value: Value,
    #[serde(default)]
    error: Option<String>,
}

struct BridgeIo {
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
}

/// One browser page driven through the bridge process.
///
/// Commands are serialized: each is awaited before the next is sent.
pub struct Browser {
    base_url: String,
    io: Mutex<BridgeIo>,
    next_id: AtomicU64,
    child: Mutex<Child>,
    _script_dir: TempDir,
}

impl fmt::Debug for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Browser")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Browser {
    /// Start the bridge and open a fresh context and page.
    pub async fn launch(config: &BrowserConfig) -> QaResult<Self> {
        let script_dir = TempDir::new()?;
        let script = script_dir.path().join("bridge.js");
        tokio::fs::write(&script, BRIDGE_SCRIPT).await?;

        let mut child = Command::new(&config.node)
            .arg(&script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => QaError::PlaywrightNotFound,
                _ => QaError::Io(e),
            })?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            return Err(QaError::Playwright("bridge stdio not captured".to_string()));
        };

        let browser = Browser {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            io: Mutex::new(BridgeIo {
                stdin,
                stdout: BufReader::new(stdout).lines(),
            }),
            next_id: AtomicU64::new(1),
            child: Mutex::new(child),
            _script_dir: script_dir,
        };

        let launched = browser
            .call(
                "launch",
                json!({
                    "headless": config.headless,
                    "slowMo": config.slow_mo_ms,
                    "timeout": config.action_timeout_ms,
                }),
            )
            .await;
        match launched {
            Ok(_) => {
                info!(headless = config.headless, "browser launched");
                Ok(browser)
            }
            Err(QaError::Playwright(msg)) if msg.contains("playwright-not-found") => {
                Err(QaError::PlaywrightNotFound)
            }
            Err(e) => Err(e),
        }
    }

    /// Send one command and wait for its reply.
    async fn call(&self, cmd: &str, args: Value) -> QaResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let line = json!({ "id": id, "cmd": cmd, "args": args }).to_string();

        let mut io = self.io.lock().await;
        io.stdin.write_all(line.as_bytes()).await?;
        io.stdin.write_all(b"\n").await?;
        io.stdin.flush().await?;

        let reply = tokio::time::timeout(COMMAND_TIMEOUT, read_reply(&mut io.stdout, id))
            .await
            .map_err(|_| QaError::Timeout(format!("browser command '{cmd}'")))??;

        if reply.ok {
            debug!(cmd, "bridge ok");
            Ok(reply.value)
        } else {
            let error = reply.error.unwrap_or_else(|| "unknown bridge error".to_string());
            Err(QaError::Playwright(format!("{cmd}: {error}")))
        }
    }

    /// Navigate to an absolute URL, or to a path under the UI base URL.
    pub async fn goto(&self, url: &str, wait: LoadState) -> QaResult<()> {
        let url = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}{url}", self.base_url)
        };
        self.call("goto", json!({ "url": url, "waitUntil": wait.as_str() }))
            .await?;
        Ok(())
    }

    pub async fn reload(&self, wait: LoadState) -> QaResult<()> {
        self.call("reload", json!({ "waitUntil": wait.as_str() })).await?;
        Ok(())
    }

    pub async fn url(&self) -> QaResult<String> {
        Ok(as_string(self.call("url", Value::Null).await?))
    }

    pub async fn title(&self) -> QaResult<String> {
        Ok(as_string(self.call("title", Value::Null).await?))
    }

    pub async fn wait_for_load(&self, state: LoadState) -> QaResult<()> {
        self.call("wait_for_load", json!({ "state": state.as_str() }))
            .await?;
        Ok(())
    }

    pub async fn fill(&self, locator: &Locator, value: &str) -> QaResult<()> {
        self.call("fill", json!({ "selector": locator.selector(), "value": value }))
            .await?;
        Ok(())
    }

    pub async fn clear(&self, locator: &Locator) -> QaResult<()> {
        self.call("clear", json!({ "selector": locator.selector() }))
            .await?;
        Ok(())
    }

    pub async fn click(&self, locator: &Locator) -> QaResult<()> {
        self.call("click", json!({ "selector": locator.selector() }))
            .await?;
        Ok(())
    }

    pub async fn select_option(&self, locator: &Locator, option: SelectBy<'_>) -> QaResult<()> {
        let args = match option {
            SelectBy::Value(value) => json!({ "selector": locator.selector(), "value": value }),
            SelectBy::Label(label) => json!({ "selector": locator.selector(), "label": label }),
        };
        self.call("select_option", args).await?;
        Ok(())
    }

    /// `textContent` of the first match; empty when the element has none.
    pub async fn text(&self, locator: &Locator) -> QaResult<String> {
        let value = self
            .call("text", json!({ "selector": locator.selector() }))
            .await?;
        Ok(as_string(value))
    }

    pub async fn inner_text(&self, locator: &Locator) -> QaResult<String> {
        let value = self
            .call("inner_text", json!({ "selector": locator.selector() }))
            .await?;
        Ok(as_string(value))
    }

    pub async fn input_value(&self, locator: &Locator) -> QaResult<String> {
        let value = self
            .call("input_value", json!({ "selector": locator.selector() }))
            .await?;
        Ok(as_string(value))
    }

    pub async fn is_visible(&self, locator: &Locator) -> QaResult<bool> {
        let value = self
            .call("is_visible", json!({ "selector": locator.selector() }))
            .await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    /// False when nothing matches.
    pub async fn is_enabled(&self, locator: &Locator) -> QaResult<bool> {
        let value = self
            .call("is_enabled", json!({ "selector": locator.selector() }))
            .await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    pub async fn count(&self, locator: &Locator) -> QaResult<usize> {
        let value = self
            .call("count", json!({ "selector": locator.selector() }))
            .await?;
        Ok(value.as_u64().unwrap_or(0) as usize)
    }

    pub async fn wait_for(&self, locator: &Locator, state: WaitState, timeout: Duration) -> QaResult<()> {
        self.call(
            "wait_for",
            json!({
                "selector": locator.selector(),
                "state": state.as_str(),
                "timeout": timeout.as_millis() as u64,
            }),
        )
        .await
        .map_err(|e| match e {
            QaError::Playwright(_) => QaError::Timeout(format!("{locator} to be {}", state.as_str())),
            other => other,
        })?;
        Ok(())
    }

    /// Accept the next `confirm()`/`alert()` dialog. Dialogs are dismissed
    /// otherwise.
    pub async fn accept_next_dialog(&self) -> QaResult<()> {
        self.call("accept_next_dialog", Value::Null).await?;
        Ok(())
    }

    /// Drop cookies and local/session storage: the browser is logged out.
    pub async fn clear_storage(&self) -> QaResult<()> {
        self.call("clear_storage", Value::Null).await?;
        Ok(())
    }

    /// Computed CSS `property` of the first match, e.g. `color`.
    pub async fn computed_style(&self, locator: &Locator, property: &str) -> QaResult<String> {
        let value = self
            .call(
                "computed_style",
                json!({ "selector": locator.selector(), "property": property }),
            )
            .await?;
        Ok(as_string(value))
    }

    /// Close the browser and wait for the bridge to exit.
    pub async fn close(self) -> QaResult<()> {
        if let Err(e) = self.call("close", Value::Null).await {
            // The bridge may exit before its reply is flushed.
            debug!(error = %e, "close reply not received");
        }
        let mut child = self.child.lock().await;
        match tokio::time::timeout(Duration::from_secs(5), child.wait()).await {
            Ok(status) => {
                status?;
            }
            Err(_) => {
                warn!("bridge did not exit, killing it");
                child.kill().await?;
            }
        }
        Ok(())
    }
}

async fn read_reply(lines: &mut Lines<BufReader<ChildStdout>>, id: u64) -> QaResult<Reply> {
    loop {
        let Some(line) = lines.next_line().await? else {
            return Err(QaError::Playwright("bridge exited".to_string()));
        };
        match serde_json::from_str::<Reply>(&line) {
            Ok(reply) if reply.id == id => return Ok(reply),
            Ok(reply) => debug!(id = reply.id, "ignoring stale bridge reply"),
            Err(_) => debug!(%line, "bridge output"),
        }
    }
}

fn as_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
