//! Extraction through an external `7z`-family binary.

use std::ffi::OsString;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::process::Child;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;
use std::time::Instant;

use tracing::debug;
use tracing::info;
use tracing::warn;

use super::ArchiveExtractor;
use crate::DiagnosticError;
use crate::Result;

/// Binaries probed by [`CommandExtractor::discover`], in order.
pub const CANDIDATES: &[&str] = &[
    "7z",
    "7za",
    "7zz",
    r"C:\Program Files\7-Zip\7z.exe",
    r"C:\Program Files (x86)\7-Zip\7z.exe",
];

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs `7z x` in a child process.
///
/// Standard input is closed so an encrypted archive without a passphrase
/// fails instead of prompting.
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    program: PathBuf,
    leading_args: Vec<OsString>,
    timeout: Option<Duration>,
}

impl CommandExtractor {
    /// Uses `program` as the 7z binary.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            timeout: None,
        }
    }

    /// Probes [`CANDIDATES`] and returns the first one that can be launched.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticError::ExtractionFailed`] with no exit code if no
    /// candidate runs.
    pub fn discover() -> Result<Self> {
        for candidate in CANDIDATES {
            let launched = Command::new(candidate)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            if launched.is_ok() {
                debug!(program = candidate, "found 7z executable");
                return Ok(Self::new(candidate));
            }
        }
        Err(DiagnosticError::ExtractionFailed {
            exit_code: None,
            output: format!("no 7z executable found (tried: {})", CANDIDATES.join(", ")),
        })
    }

    /// Arguments placed before the `x` subcommand, for wrappers such as an
    /// interpreter running a launcher script.
    #[must_use]
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Kills the child and fails with a timeout once `timeout` elapses.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The binary this extractor launches.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn build_command(&self, archive: &Path, passphrase: Option<&str>, dest: &Path) -> Command {
        let mut out_flag = OsString::from("-o");
        out_flag.push(dest.as_os_str());

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args)
            .arg("x")
            .arg(archive)
            .arg(out_flag)
            .arg("-y")
            .arg("-bd");
        if let Some(pass) = passphrase {
            cmd.arg(format!("-p{pass}"));
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    fn wait(&self, child: &mut Child) -> Result<Option<ExitStatus>> {
        let Some(timeout) = self.timeout else {
            return Ok(Some(child.wait()?));
        };

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            if Instant::now() >= deadline {
                warn!(timeout = ?timeout, "7z exceeded timeout, killing");
                if let Err(e) = child.kill() {
                    debug!(error = %e, "kill after timeout failed");
                }
                child.wait()?;
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl ArchiveExtractor for CommandExtractor {
    fn extract(&self, archive: &Path, passphrase: Option<&str>, dest: &Path) -> Result<()> {
        info!(
            program = %self.program.display(),
            archive = %archive.display(),
            encrypted = passphrase.is_some(),
            "extracting with external tool"
        );

        let mut child = self
            .build_command(archive, passphrase, dest)
            .spawn()
            .map_err(|e| DiagnosticError::ExtractionFailed {
                exit_code: None,
                output: format!("failed to run {}: {e}", self.program.display()),
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        // A killed child may leave grandchildren holding the pipes open, so
        // readers are only joined once the child exited on its own.
        let Some(status) = self.wait(&mut child)? else {
            return Err(DiagnosticError::ExtractionTimeout {
                timeout: self.timeout.unwrap_or_default(),
            });
        };
        let output = join_output(stdout, stderr);

        if status.success() {
            debug!("external extraction complete");
            Ok(())
        } else {
            Err(DiagnosticError::ExtractionFailed {
                exit_code: status.code(),
                output,
            })
        }
    }

    fn name(&self) -> &str {
        "7z-command"
    }
}

/// Reads a child pipe to completion on a helper thread so the child never
/// blocks on a full pipe while we poll it.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join_output(stdout: Option<JoinHandle<String>>, stderr: Option<JoinHandle<String>>) -> String {
    [stdout, stderr]
        .into_iter()
        .flatten()
        .filter_map(|handle| handle.join().ok())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
