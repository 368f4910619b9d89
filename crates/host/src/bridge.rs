//! Subprocess management and JSON IPC for the automation helper.

use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use sheetgate_core::{CellScalar, UsedRange};

use crate::protocol::{Command, Request, Response, ResponseData, ResponseResult};
use crate::{AutomationHost, HostError};

/// Configuration for the automation bridge.
#[derive(Debug, Clone, Default)]
pub struct BridgeConfig {
    /// Path to the helper executable. If `None`, the helper is searched for
    /// next to the current binary.
    pub helper_path: Option<PathBuf>,
}

/// Live [`AutomationHost`] implementation.
///
/// Spawns the helper process attached to the running spreadsheet application
/// and forwards every call as one request line over its stdin, reading one
/// response line back. The stdio pair is guarded by mutexes; calls block the
/// calling thread for their duration and the helper serializes access to the
/// document on its side.
pub struct StdioBridge {
    child: Mutex<Child>,
    stdin: Mutex<ChildStdin>,
    stdout: Mutex<BufReader<ChildStdout>>,
    next_id: AtomicU64,
}

impl StdioBridge {
    /// Spawn the helper process.
    pub fn start(config: BridgeConfig) -> Result<Self, HostError> {
        let helper = config.helper_path.unwrap_or_else(find_helper_exe);

        let mut child = std::process::Command::new(&helper)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            // Helper diagnostics go to our stderr
            .stderr(Stdio::inherit())
            .spawn()?;

        let stdin = child.stdin.take().ok_or(HostError::NotRunning)?;
        let stdout = child.stdout.take().ok_or(HostError::NotRunning)?;

        tracing::info!("automation helper started: {}", helper.display());

        Ok(Self {
            child: Mutex::new(child),
            stdin: Mutex::new(stdin),
            stdout: Mutex::new(BufReader::new(stdout)),
            next_id: AtomicU64::new(1),
        })
    }

    /// Send a command to the helper and wait for the matching response.
    fn send_command(&self, command: Command) -> Result<Option<ResponseData>, HostError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = Request { id, command };
        let json = serde_json::to_string(&request)?;

        {
            let mut stdin = self.stdin.lock().map_err(|_| HostError::NotRunning)?;
            writeln!(stdin, "{json}").map_err(|e| HostError::Send(e.to_string()))?;
            stdin.flush().map_err(|e| HostError::Send(e.to_string()))?;
        }

        let response: Response = {
            let mut stdout = self.stdout.lock().map_err(|_| HostError::NotRunning)?;
            let mut line = String::new();
            stdout
                .read_line(&mut line)
                .map_err(|e| HostError::Read(e.to_string()))?;

            if line.is_empty() {
                return Err(HostError::NotRunning);
            }

            serde_json::from_str(&line)?
        };

        if response.id != id {
            return Err(HostError::UnexpectedResponse);
        }

        match response.result {
            ResponseResult::Ok { data } => Ok(data),
            ResponseResult::Error { message } => Err(HostError::Command(message)),
        }
    }

    fn name_list(&self, command: Command) -> Result<Vec<String>, HostError> {
        match self.send_command(command)? {
            Some(ResponseData::Names(names)) => Ok(names),
            _ => Err(HostError::UnexpectedResponse),
        }
    }

    fn active_name(&self, command: Command) -> Result<Option<String>, HostError> {
        match self.send_command(command)? {
            Some(ResponseData::Active(active)) => Ok(active),
            _ => Err(HostError::UnexpectedResponse),
        }
    }
}

impl Drop for StdioBridge {
    fn drop(&mut self) {
        if let Ok(child) = self.child.get_mut() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl AutomationHost for StdioBridge {
    fn ping(&self) -> Result<bool, HostError> {
        match self.send_command(Command::Ping) {
            Ok(_) => Ok(true),
            // The helper answers with an error when the application is gone.
            Err(HostError::Command(message)) => {
                tracing::debug!("ping rejected: {message}");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    fn workbook_names(&self) -> Result<Vec<String>, HostError> {
        self.name_list(Command::ListWorkbooks)
    }

    fn active_workbook(&self) -> Result<Option<String>, HostError> {
        self.active_name(Command::ActiveWorkbook)
    }

    fn sheet_names(&self, workbook: &str) -> Result<Vec<String>, HostError> {
        self.name_list(Command::ListSheets {
            workbook: workbook.to_string(),
        })
    }

    fn active_sheet(&self, workbook: &str) -> Result<Option<String>, HostError> {
        self.active_name(Command::ActiveSheet {
            workbook: workbook.to_string(),
        })
    }

    fn used_range(&self, workbook: &str, sheet: &str) -> Result<Option<UsedRange>, HostError> {
        match self.send_command(Command::UsedRange {
            workbook: workbook.to_string(),
            sheet: sheet.to_string(),
        })? {
            Some(ResponseData::Range(range)) => Ok(range),
            None => Ok(None),
            _ => Err(HostError::UnexpectedResponse),
        }
    }

    fn write_cell(
        &self,
        workbook: &str,
        sheet: &str,
        cell: &str,
        value: CellScalar,
    ) -> Result<(), HostError> {
        self.send_command(Command::WriteCell {
            workbook: workbook.to_string(),
            sheet: sheet.to_string(),
            cell: cell.to_string(),
            value,
        })?;
        Ok(())
    }

    fn write_range(
        &self,
        workbook: &str,
        sheet: &str,
        range: &str,
        values: Vec<Vec<CellScalar>>,
    ) -> Result<(), HostError> {
        self.send_command(Command::WriteRange {
            workbook: workbook.to_string(),
            sheet: sheet.to_string(),
            range: range.to_string(),
            values,
        })?;
        Ok(())
    }
}

/// Locate the helper executable next to the current binary, falling back to
/// the working directory.
fn find_helper_exe() -> PathBuf {
    if let Ok(mut exe) = std::env::current_exe() {
        exe.pop();
        let candidate = exe.join("sheetgate-helper");
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from("sheetgate-helper")
}
