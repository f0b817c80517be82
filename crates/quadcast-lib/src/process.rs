//! External process execution — trait + system backend + mock.
//!
//! Every shell-out in the crate goes through [`CommandRunner`], so the
//! locator, installer, prober and session can be exercised without touching
//! real binaries.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Process-kill-by-name utility used for best-effort cleanup.
pub const KILLALL: &str = "killall";

/// What to do with a child's stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Send stdout to the null device.
    Discard,
    /// Collect stdout as (lossy) UTF-8.
    Stdout,
}

/// Completed child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if terminated by a signal.
    pub code: Option<i32>,
    /// Captured stdout. Empty when run with [`Capture::Discard`].
    pub stdout: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Human-readable exit status, e.g. `"exit status: 1"`.
    pub fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("exit status: {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

// ── Trait ──

pub trait CommandRunner {
    /// Run `program` with `args` to completion. Stdin and stderr are always
    /// discarded. `Err` means the process could not be spawned at all.
    fn run(&self, program: &Path, args: &[&str], capture: Capture) -> io::Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &Path, args: &[&str], capture: Capture) -> io::Result<CommandOutput> {
        (**self).run(program, args, capture)
    }
}

/// Runs real processes via `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[&str], capture: Capture) -> io::Result<CommandOutput> {
        log::debug!("exec: {} {}", program.display(), args.join(" "));
        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::null()).stderr(Stdio::null());
        match capture {
            Capture::Discard => {
                let status = cmd.stdout(Stdio::null()).status()?;
                Ok(CommandOutput {
                    code: status.code(),
                    stdout: String::new(),
                })
            }
            Capture::Stdout => {
                let output = cmd.stdout(Stdio::piped()).output()?;
                Ok(CommandOutput {
                    code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                })
            }
        }
    }
}

// ── Best-effort cleanup ──

/// Outcome of a cleanup step whose failure is tolerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cleanup {
    Done,
    /// The step did not complete; the reason is kept for logging only.
    Skipped(String),
}

/// Terminate every running process called `name`.
pub fn kill_by_name(runner: &impl CommandRunner, name: &str) -> Cleanup {
    match runner.run(Path::new(KILLALL), &[name], Capture::Discard) {
        Ok(out) if out.success() => Cleanup::Done,
        Ok(out) => Cleanup::Skipped(format!("{KILLALL} {name}: {}", out.status_text())),
        Err(e) => Cleanup::Skipped(format!("{KILLALL} {name}: {e}")),
    }
}

// ── Mock runner for testing ──

/// In-memory command runner for unit and integration tests.
///
/// Always compiled (zero runtime cost), hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// Scripted reaction to an invocation.
    #[derive(Debug, Clone)]
    pub enum MockResponse {
        /// Process ran and exited with `code`, printing `stdout`.
        Exit { code: i32, stdout: String },
        /// Process could not be spawned.
        Missing,
    }

    /// A recorded invocation.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Invocation {
        pub program: PathBuf,
        pub args: Vec<String>,
        pub capture: Capture,
    }

    impl Invocation {
        /// Final path component of the program (`/opt/homebrew/bin/brew` → `brew`).
        pub fn program_name(&self) -> String {
            program_key(&self.program)
        }
    }

    fn program_key(program: &Path) -> String {
        program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| program.to_string_lossy().into_owned())
    }

    type Hook = Box<dyn FnMut()>;

    /// Responses are keyed by program file name, so a tool located at any
    /// path answers with the same script. Unscripted programs behave as
    /// missing (spawn fails with `NotFound`).
    #[derive(Default)]
    pub struct MockRunner {
        /// Program name → scripted response.
        pub responses: RefCell<HashMap<String, MockResponse>>,
        /// Every invocation, in order.
        pub calls: RefCell<Vec<Invocation>>,
        hooks: RefCell<HashMap<String, Hook>>,
    }

    impl MockRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Script `program` to exit with `code` and print `stdout`.
        pub fn respond(&self, program: &str, code: i32, stdout: &str) {
            self.responses.borrow_mut().insert(
                program.to_string(),
                MockResponse::Exit {
                    code,
                    stdout: stdout.to_string(),
                },
            );
        }

        /// Script `program` to fail to spawn.
        pub fn missing(&self, program: &str) {
            self.responses
                .borrow_mut()
                .insert(program.to_string(), MockResponse::Missing);
        }

        /// Run `hook` every time `program` is invoked (before responding).
        /// Used to simulate side effects such as an installer creating a file.
        pub fn on_run(&self, program: &str, hook: impl FnMut() + 'static) {
            self.hooks
                .borrow_mut()
                .insert(program.to_string(), Box::new(hook));
        }

        /// Argument lists of every call to `program`, in order.
        pub fn calls_to(&self, program: &str) -> Vec<Vec<String>> {
            self.calls
                .borrow()
                .iter()
                .filter(|c| c.program_name() == program)
                .map(|c| c.args.clone())
                .collect()
        }

        pub fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl CommandRunner for MockRunner {
        fn run(
            &self,
            program: &Path,
            args: &[&str],
            capture: Capture,
        ) -> io::Result<CommandOutput> {
            let key = program_key(program);
            self.calls.borrow_mut().push(Invocation {
                program: program.to_path_buf(),
                args: args.iter().map(|a| a.to_string()).collect(),
                capture,
            });
            if let Some(hook) = self.hooks.borrow_mut().get_mut(&key) {
                hook();
            }
            match self.responses.borrow().get(&key) {
                Some(MockResponse::Exit { code, stdout }) => Ok(CommandOutput {
                    code: Some(*code),
                    stdout: match capture {
                        Capture::Stdout => stdout.clone(),
                        Capture::Discard => String::new(),
                    },
                }),
                Some(MockResponse::Missing) | None => Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("mock: {key} not found"),
                )),
            }
        }
    }
}
