use tracing::{debug, info, warn};

use crate::catalogue::Catalogue;
use crate::categories::ALL_PROGRAMS;
use crate::error::BackendError;
use crate::packagekit::{Request, Stage, StageOutput};
use crate::types::{CatalogueEntry, Category, PackageDetail, PackageId, ResolvedPackage};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub(crate) enum SessionPhase {
    #[default]
    Loading,
    Resolving,
    Interactive,
    Transacting,
    Done,
    Error,
}

/// Install and remove sets computed from the toggle state of every entry.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Reconciliation {
    pub install: Vec<PackageId>,
    pub remove: Vec<PackageId>,
}

impl Reconciliation {
    pub(crate) fn is_empty(&self) -> bool {
        self.install.is_empty() && self.remove.is_empty()
    }
}

/// What the controller has to do after a stage completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    Issue(Request),
    Interactive,
    Finished(String),
    Failed(String),
}

/// Catalogue plus chain state for one run of the dialog. Only the main
/// thread touches it; backend results are fed in through [`Session::complete`].
#[derive(Debug, Default)]
pub(crate) struct Session {
    entries: Vec<CatalogueEntry>,
    categories: Vec<Category>,
    phase: SessionPhase,
    pending: Option<Reconciliation>,
}

impl Session {
    pub(crate) fn new(catalogue: Catalogue) -> Self {
        Self {
            entries: catalogue.entries,
            categories: catalogue.categories,
            phase: SessionPhase::Loading,
            pending: None,
        }
    }

    pub(crate) fn entry(&self, index: usize) -> Option<&CatalogueEntry> {
        self.entries.get(index)
    }

    pub(crate) fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub(crate) fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub(crate) fn start(&mut self) -> Request {
        self.phase = SessionPhase::Loading;
        Request::RefreshCache
    }

    /// Package names in catalogue order, as passed to Resolve. Groups
    /// without a package name are left out; the daemon rejects empty names.
    pub(crate) fn package_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.package.as_str())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub(crate) fn display_name_for(&self, id: &PackageId) -> Option<String> {
        self.entries
            .iter()
            .find(|entry| &entry.package_id == id)
            .map(|entry| entry.name.clone())
    }

    /// Records Resolve results. The first matching entry that is not yet
    /// installed takes the identifier; installed entries are never reset.
    pub(crate) fn apply_resolved(&mut self, packages: &[ResolvedPackage]) {
        for package in packages {
            let Some(entry) = self
                .entries
                .iter_mut()
                .find(|entry| !entry.installed && entry.matches_package(&package.package_id))
            else {
                debug!(package = %package.package_id, "resolve result ignored");
                continue;
            };

            debug!(
                package = %entry.package,
                version = package.package_id.version(),
                arch = package.package_id.arch(),
                installed = package.installed,
                "package resolved"
            );
            entry.package_id = package.package_id.clone();
            if package.installed {
                entry.installed = true;
                entry.desired = true;
            }
            if entry.summary.is_none() && !package.summary.is_empty() {
                entry.summary = Some(package.summary.clone());
            }
        }
    }

    /// Records GetDetails results. A record goes to the entry holding its
    /// exact identifier; records for identifiers no entry holds fall back to
    /// a name match, but never overwrite an entry that got its own record.
    pub(crate) fn apply_details(&mut self, details: &[PackageDetail]) {
        let mut filled = vec![false; self.entries.len()];
        let mut unmatched = Vec::new();

        for detail in details {
            let Some(id) = detail.package_id.as_ref() else {
                continue;
            };
            match self.entries.iter().position(|entry| &entry.package_id == id) {
                Some(index) => {
                    merge_detail(&mut self.entries[index], detail);
                    filled[index] = true;
                }
                None => unmatched.push((id, detail)),
            }
        }

        for (id, detail) in unmatched {
            let Some(index) = self
                .entries
                .iter()
                .position(|entry| entry.matches_package(id))
            else {
                debug!(package = %id, "details ignored");
                continue;
            };
            if filled[index] {
                continue;
            }
            merge_detail(&mut self.entries[index], detail);
            filled[index] = true;
        }
    }

    /// Indices of the entries shown for `category`.
    pub(crate) fn visible_entries(&self, category: &str) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                entry.is_resolved() && (category == ALL_PROGRAMS || entry.category == category)
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Flips the desired state of an entry while the dialog is interactive.
    pub(crate) fn toggle(&mut self, index: usize) -> Option<&CatalogueEntry> {
        if self.phase != SessionPhase::Interactive {
            return None;
        }
        let entry = self.entries.get_mut(index)?;
        if !entry.is_resolved() {
            return None;
        }
        entry.desired = !entry.desired;
        Some(entry)
    }

    pub(crate) fn reconcile(&self) -> Reconciliation {
        let mut sets = Reconciliation::default();
        for entry in self.entries.iter().filter(|entry| entry.is_resolved()) {
            match (entry.installed, entry.desired) {
                (false, true) => sets.install.push(entry.package_id.clone()),
                (true, false) => sets.remove.push(entry.package_id.clone()),
                _ => {}
            }
        }
        sets
    }

    /// Starts the install/remove chain. `None` means nothing changed and the
    /// session is over.
    pub(crate) fn begin_transaction(&mut self) -> Option<Request> {
        if self.phase != SessionPhase::Interactive {
            return None;
        }

        let sets = self.reconcile();
        info!(
            install = sets.install.len(),
            remove = sets.remove.len(),
            "applying changes"
        );
        if sets.is_empty() {
            self.phase = SessionPhase::Done;
            return None;
        }

        self.phase = SessionPhase::Transacting;
        let request = if sets.install.is_empty() {
            Request::Remove(sets.remove.clone())
        } else {
            Request::Install(sets.install.clone())
        };
        self.pending = Some(sets);
        Some(request)
    }

    /// Feeds the outcome of `stage` back in and decides the next step. Any
    /// error ends the chain.
    pub(crate) fn complete(
        &mut self,
        stage: Stage,
        result: Result<StageOutput, BackendError>,
    ) -> Step {
        let output = match result {
            Ok(output) => output,
            Err(err) => {
                warn!(?stage, code = ?err.code(), error = %err, "backend stage failed");
                self.phase = SessionPhase::Error;
                return Step::Failed(format!("{} - {}", stage.error_prefix(), err));
            }
        };

        match output {
            StageOutput::Refreshed => {
                self.phase = SessionPhase::Resolving;
                Step::Issue(Request::Resolve(self.package_names()))
            }
            StageOutput::Resolved(packages) => {
                self.apply_resolved(&packages);
                let ids = packages
                    .into_iter()
                    .map(|package| package.package_id)
                    .collect();
                Step::Issue(Request::GetDetails(ids))
            }
            StageOutput::Details(details) => {
                self.apply_details(&details);
                self.phase = SessionPhase::Interactive;
                Step::Interactive
            }
            StageOutput::Installed => {
                let remove = self
                    .pending
                    .as_ref()
                    .map(|sets| sets.remove.clone())
                    .unwrap_or_default();
                if remove.is_empty() {
                    self.phase = SessionPhase::Done;
                    Step::Finished("Installation complete".to_string())
                } else {
                    Step::Issue(Request::Remove(remove))
                }
            }
            StageOutput::Removed => {
                self.phase = SessionPhase::Done;
                let installed_any = self
                    .pending
                    .as_ref()
                    .is_some_and(|sets| !sets.install.is_empty());
                if installed_any {
                    Step::Finished("Installation and removal complete".to_string())
                } else {
                    Step::Finished("Removal complete".to_string())
                }
            }
        }
    }
}

fn merge_detail(entry: &mut CatalogueEntry, detail: &PackageDetail) {
    entry.size = detail.size.or(entry.size);
    if let Some(summary) = detail.summary.clone().filter(|s| !s.is_empty()) {
        entry.summary = Some(summary);
    }
    if let Some(description) = detail.description.clone() {
        entry.long_description = Some(description);
    }
}
