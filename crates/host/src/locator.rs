//! Named-vs-active resolution of application, workbook, and worksheet.

use crate::{AutomationHost, HostError};

/// Outcome of one resolution step.
///
/// `NotFoundByName` is only produced when the caller asked for a specific
/// name; `NoActiveTarget` covers the unnamed case where no active target
/// exists (or, for the application step, the host is unreachable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFoundByName(String),
    NoActiveTarget,
}

/// Resolver over an automation host.
///
/// Each step is independently callable and callers pattern-match on the
/// outcome; there is no combinator that short-circuits across steps. The few
/// call sites keep that explicit sequencing readable.
///
/// Transport failures are deliberately kept apart from genuine absence:
/// workbook/worksheet resolution returns `Err(HostError)` when the lookup
/// itself failed, and a [`Lookup`] variant when it succeeded but the target
/// does not exist.
pub struct Locator<'a> {
    host: &'a dyn AutomationHost,
}

impl<'a> Locator<'a> {
    pub fn new(host: &'a dyn AutomationHost) -> Self {
        Self { host }
    }

    /// Resolve the running application. Any failure to reach it is absence.
    pub fn resolve_application(&self) -> Lookup<()> {
        match self.host.ping() {
            Ok(true) => Lookup::Found(()),
            Ok(false) => Lookup::NoActiveTarget,
            Err(err) => {
                tracing::debug!("application ping failed: {err}");
                Lookup::NoActiveTarget
            }
        }
    }

    /// Resolve a workbook by exact name, or the active workbook when no name
    /// is given.
    pub fn resolve_workbook(&self, name: Option<&str>) -> Result<Lookup<String>, HostError> {
        match name {
            Some(name) => {
                let names = self.host.workbook_names()?;
                if names.iter().any(|n| n == name) {
                    Ok(Lookup::Found(name.to_string()))
                } else {
                    Ok(Lookup::NotFoundByName(name.to_string()))
                }
            }
            None => Ok(match self.host.active_workbook()? {
                Some(active) => Lookup::Found(active),
                None => Lookup::NoActiveTarget,
            }),
        }
    }

    /// Resolve a worksheet within a workbook, by exact name or active.
    pub fn resolve_worksheet(
        &self,
        workbook: &str,
        name: Option<&str>,
    ) -> Result<Lookup<String>, HostError> {
        match name {
            Some(name) => {
                let names = self.host.sheet_names(workbook)?;
                if names.iter().any(|n| n == name) {
                    Ok(Lookup::Found(name.to_string()))
                } else {
                    Ok(Lookup::NotFoundByName(name.to_string()))
                }
            }
            None => Ok(match self.host.active_sheet(workbook)? {
                Some(active) => Lookup::Found(active),
                None => Lookup::NoActiveTarget,
            }),
        }
    }
}
