mod client;
mod enums;
mod progress;

pub(crate) use client::PackageKitClient;
pub(crate) use progress::{Progress, ProgressUpdate, describe_progress};

use crate::error::BackendError;
use crate::types::{PackageDetail, PackageId, ResolvedPackage};

/// Operations the session needs from a package manager. Every call blocks
/// until the backend reports completion and forwards progress as it arrives.
pub(crate) trait PackageBackend {
    fn refresh_cache(&self, progress: &mut dyn FnMut(Progress)) -> Result<(), BackendError>;

    fn resolve(
        &self,
        names: &[String],
        progress: &mut dyn FnMut(Progress),
    ) -> Result<Vec<ResolvedPackage>, BackendError>;

    fn get_details(
        &self,
        ids: &[PackageId],
        progress: &mut dyn FnMut(Progress),
    ) -> Result<Vec<PackageDetail>, BackendError>;

    fn install_packages(
        &self,
        ids: &[PackageId],
        progress: &mut dyn FnMut(Progress),
    ) -> Result<(), BackendError>;

    fn remove_packages(
        &self,
        ids: &[PackageId],
        progress: &mut dyn FnMut(Progress),
    ) -> Result<(), BackendError>;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Stage {
    RefreshCache,
    Resolve,
    GetDetails,
    Install,
    Remove,
}

impl Stage {
    /// Prefix of the message shown when this stage fails.
    pub(crate) fn error_prefix(self) -> &'static str {
        match self {
            Stage::RefreshCache => "Error updating package data",
            Stage::Resolve => "Error reading package status",
            Stage::GetDetails => "Error reading package details",
            Stage::Install => "Error installing packages",
            Stage::Remove => "Error removing packages",
        }
    }

    /// Text shown while the stage starts, before the backend reports progress.
    pub(crate) fn waiting_text(self) -> &'static str {
        match self {
            Stage::RefreshCache => "Updating package data - please wait...",
            Stage::Resolve => "Reading package status - please wait...",
            Stage::GetDetails => "Reading package details - please wait...",
            Stage::Install => "Installing packages - please wait...",
            Stage::Remove => "Removing packages - please wait...",
        }
    }
}

/// One backend call, built by the session and run off the main thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Request {
    RefreshCache,
    Resolve(Vec<String>),
    GetDetails(Vec<PackageId>),
    Install(Vec<PackageId>),
    Remove(Vec<PackageId>),
}

impl Request {
    pub(crate) fn stage(&self) -> Stage {
        match self {
            Request::RefreshCache => Stage::RefreshCache,
            Request::Resolve(_) => Stage::Resolve,
            Request::GetDetails(_) => Stage::GetDetails,
            Request::Install(_) => Stage::Install,
            Request::Remove(_) => Stage::Remove,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum StageOutput {
    Refreshed,
    Resolved(Vec<ResolvedPackage>),
    Details(Vec<PackageDetail>),
    Installed,
    Removed,
}

pub(crate) fn execute_request(
    backend: &dyn PackageBackend,
    request: Request,
    progress: &mut dyn FnMut(Progress),
) -> Result<StageOutput, BackendError> {
    match request {
        Request::RefreshCache => backend
            .refresh_cache(progress)
            .map(|_| StageOutput::Refreshed),
        Request::Resolve(names) => backend
            .resolve(&names, progress)
            .map(StageOutput::Resolved),
        Request::GetDetails(ids) => backend
            .get_details(&ids, progress)
            .map(StageOutput::Details),
        Request::Install(ids) => backend
            .install_packages(&ids, progress)
            .map(|_| StageOutput::Installed),
        Request::Remove(ids) => backend
            .remove_packages(&ids, progress)
            .map(|_| StageOutput::Removed),
    }
}
