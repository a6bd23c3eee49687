use std::fmt;

/// Identifier carried by entries the backend has not resolved yet.
pub(crate) const UNRESOLVED_ID: &str = "none";

/// A PackageKit package identifier, `name;version;arch;data`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct PackageId(String);

impl PackageId {
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub(crate) fn unresolved() -> Self {
        Self(UNRESOLVED_ID.to_string())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn is_resolved(&self) -> bool {
        self.0 != UNRESOLVED_ID
    }

    fn field(&self, index: usize) -> &str {
        self.0.split(';').nth(index).unwrap_or("")
    }

    pub(crate) fn name(&self) -> &str {
        self.field(0)
    }

    pub(crate) fn version(&self) -> &str {
        self.field(1)
    }

    pub(crate) fn arch(&self) -> &str {
        self.field(2)
    }

    pub(crate) fn data(&self) -> &str {
        self.field(3)
    }

    /// True when the data field reports a locally installed copy
    /// (`installed` or `installed:<repo>`).
    pub(crate) fn has_installed_marker(&self) -> bool {
        self.data() == "installed" || self.data().starts_with("installed:")
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PendingChange {
    Install,
    Remove,
}

impl PendingChange {
    pub(crate) fn annotation(self) -> &'static str {
        match self {
            PendingChange::Install => "Will be installed",
            PendingChange::Remove => "Will be removed",
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct CatalogueEntry {
    pub name: String,
    pub description: String,
    pub category: String,
    pub package: String,
    pub icon: String,
    pub package_id: PackageId,
    pub installed: bool,
    pub desired: bool,
    pub size: Option<u64>,
    pub summary: Option<String>,
    pub long_description: Option<String>,
}

impl CatalogueEntry {
    pub(crate) fn new(
        name: String,
        description: String,
        category: String,
        package: String,
        icon: String,
    ) -> Self {
        Self {
            name,
            description,
            category,
            package,
            icon,
            package_id: PackageId::unresolved(),
            installed: false,
            desired: false,
            size: None,
            summary: None,
            long_description: None,
        }
    }

    pub(crate) fn is_resolved(&self) -> bool {
        self.package_id.is_resolved()
    }

    /// Change that applying the current toggle state would cause.
    pub(crate) fn pending_change(&self) -> Option<PendingChange> {
        if !self.is_resolved() {
            return None;
        }
        match (self.installed, self.desired) {
            (false, true) => Some(PendingChange::Install),
            (true, false) => Some(PendingChange::Remove),
            _ => None,
        }
    }

    pub(crate) fn matches_package(&self, id: &PackageId) -> bool {
        !self.package.is_empty() && id.name() == self.package
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Category {
    pub name: String,
    pub icon: &'static str,
}

/// One row of a Resolve reply.
#[derive(Clone, Debug)]
pub(crate) struct ResolvedPackage {
    pub package_id: PackageId,
    pub installed: bool,
    pub summary: String,
}

/// One record of a GetDetails reply.
#[derive(Clone, Debug, Default)]
pub(crate) struct PackageDetail {
    pub package_id: Option<PackageId>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub size: Option<u64>,
}
