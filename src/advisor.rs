//! Advisor: narrative advice on top of a simulation result.
//!
//! The advisor never fails. A missing backend, a backend error or a timeout
//! all produce a clearly labeled placeholder instead, so the numbers already
//! computed are always shown.

use std::io::{ErrorKind, Read, Write};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

use crate::display::format_currency;
use crate::error::{Result, SimError};
use crate::models::SimulationResult;

/// How long a backend gets before the placeholder is returned.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

pub const SYSTEM_PROMPT: &str = "You are an expert Vertical Farming consultant.";

/// Extra time a backend gets to honor its own deadline before the advisor
/// stops waiting for it.
const DEADLINE_GRACE: Duration = Duration::from_millis(250);

/// How often a running advisor command is checked for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// A text-generation backend.
///
/// `timeout` is the time the advisor will wait. Backends holding external
/// resources should stop and release them once it has passed.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str, timeout: Duration) -> Result<String>;
}

/// Who said a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Advisor,
}

/// Ordered chat history, owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Conversation {
    pub turns: Vec<(Role, String)>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: Role, text: impl Into<String>) {
        self.turns.push((role, text.into()));
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Renders the consultant prompt for `result`.
///
/// With a question the model is asked to answer it; without one it is asked
/// for a short executive summary.
pub fn build_prompt(result: &SimulationResult, question: Option<&str>) -> String {
    let fin = &result.financials;
    let mut prompt = format!(
        "{}\n\
         Analyze this farm configuration:\n\
         - Project: {}\n\
         - Location: {}\n\
         - Crop: {}\n\
         - System: {}\n\
         - Annual Revenue: {}\n\
         - Annual OpEx: {}\n\
         - Net Profit: {}\n\
         - ROI: {}%\n\
         - Payback Period: {} years\n\n\
         Risk Score: {}/100\n",
        SYSTEM_PROMPT,
        result.config.project_name,
        result.config.location_city,
        result.crop.name,
        result.infra.system_name,
        format_currency(fin.revenue_annual),
        format_currency(fin.opex_annual),
        format_currency(fin.net_profit_annual),
        fin.roi_percent,
        fin.payback_period_years,
        result.risk_score,
    );

    match question.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => {
            prompt.push_str(&format!(
                "\nUser Question: {}\nProvide a specific, strategic answer based on the data above.",
                q
            ));
        }
        None => prompt.push_str(
            "\nProvide a strategic executive summary of the viability of this farm in 3-4 bullet points.",
        ),
    }
    prompt
}

/// Advisor service. Construct one explicitly and pass it to whatever runs
/// the conversation.
#[derive(Clone)]
pub struct Advisor {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl Advisor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Advisor {
            generator: Some(generator),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// An advisor without a backend; every answer is the placeholder.
    pub fn unconfigured() -> Self {
        Advisor {
            generator: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Returns advice for `result`, or a labeled placeholder.
    pub fn advise(&self, result: &SimulationResult, question: Option<&str>) -> String {
        let Some(generator) = &self.generator else {
            return unavailable_placeholder();
        };

        let prompt = build_prompt(result, question);
        match generate_with_timeout(Arc::clone(generator), prompt, self.timeout) {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!(error = %e, "advisor backend failed");
                error_placeholder(&e)
            }
        }
    }

    /// Asks a follow-up question, recording both turns in `conversation`.
    pub fn ask(
        &self,
        result: &SimulationResult,
        conversation: &mut Conversation,
        question: &str,
    ) -> String {
        conversation.push(Role::User, question);
        let answer = self.advise(result, Some(question));
        conversation.push(Role::Advisor, answer.clone());
        answer
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Advisor::unconfigured()
    }
}

fn unavailable_placeholder() -> String {
    "[advisor unavailable] No text generation backend is configured. \
     Set VFPLANNER_ADVISOR_CMD to enable the advisor."
        .to_string()
}

fn error_placeholder(err: &SimError) -> String {
    format!("[advisor error] {}", err)
}

/// Runs the backend on a worker thread and gives up shortly after `timeout`.
///
/// A worker that outlives the deadline is detached; its answer is dropped.
fn generate_with_timeout(
    generator: Arc<dyn TextGenerator>,
    prompt: String,
    timeout: Duration,
) -> Result<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(generator.generate(&prompt, timeout));
    });

    match rx.recv_timeout(timeout.saturating_add(DEADLINE_GRACE)) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(SimError::ExternalService(format!(
            "no response within {}s",
            timeout.as_secs_f64()
        ))),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(SimError::ExternalService(
            "advisor backend stopped unexpectedly".to_string(),
        )),
    }
}

/// Backend that pipes the prompt into an external command and reads the
/// reply from its stdout.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        CommandGenerator {
            program: program.into(),
            args,
        }
    }

    /// Parses a whitespace-separated command line such as `llm -m small`.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(CommandGenerator::new(program, parts.collect()))
    }
}

/// Kills `child` and waits for it so no process is left behind.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Reads a child pipe to the end on its own thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

impl TextGenerator for CommandGenerator {
    /// Runs the command, killing it if it has not exited within `timeout`.
    fn generate(&self, prompt: &str, timeout: Duration) -> Result<String> {
        debug!(program = %self.program, "invoking advisor command");
        let deadline = Instant::now().checked_add(timeout);
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SimError::ExternalService(format!("cannot start {}: {}", self.program, e)))?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        if let Some(mut stdin) = child.stdin.take() {
            // A command that exits without reading its input is judged by its exit status
            match stdin.write_all(prompt.as_bytes()) {
                Err(e) if e.kind() != ErrorKind::BrokenPipe => {
                    reap(&mut child);
                    return Err(SimError::ExternalService(format!(
                        "cannot write prompt to {}: {}",
                        self.program, e
                    )));
                }
                _ => {}
            }
        }

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if deadline.is_some_and(|d| Instant::now() >= d) => {
                    reap(&mut child);
                    warn!(program = %self.program, "advisor command timed out, killed");
                    return Err(SimError::ExternalService(format!(
                        "{} timed out after {}s",
                        self.program,
                        timeout.as_secs_f64()
                    )));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    reap(&mut child);
                    return Err(SimError::ExternalService(e.to_string()));
                }
            }
        };

        let stdout = stdout.join().unwrap_or_default();
        let stderr = stderr.join().unwrap_or_default();
        if !status.success() {
            return Err(SimError::ExternalService(format!(
                "{} exited with {}: {}",
                self.program,
                status,
                String::from_utf8_lossy(&stderr).trim()
            )));
        }

        let text = String::from_utf8_lossy(&stdout).trim().to_string();
        if text.is_empty() {
            return Err(SimError::ExternalService(format!(
                "{} returned an empty response",
                self.program
            )));
        }
        Ok(text)
    }
}
