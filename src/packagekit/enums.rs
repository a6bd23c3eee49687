//! The subset of PackageKit enumerations this program reacts to.
//! Values follow `pk-enum.h`.

/// `PkRoleEnum`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Role {
    GetDetails,
    InstallPackages,
    RefreshCache,
    RemovePackages,
    Resolve,
    Other(u32),
}

impl Role {
    pub(crate) fn from_raw(value: u32) -> Self {
        match value {
            3 => Role::GetDetails,
            11 => Role::InstallPackages,
            13 => Role::RefreshCache,
            14 => Role::RemovePackages,
            17 => Role::Resolve,
            other => Role::Other(other),
        }
    }
}

/// `PkStatusEnum`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Status {
    Remove,
    Download,
    Install,
    LoadingCache,
    Other(u32),
}

impl Status {
    pub(crate) fn from_raw(value: u32) -> Self {
        match value {
            6 => Status::Remove,
            8 => Status::Download,
            9 => Status::Install,
            27 => Status::LoadingCache,
            other => Status::Other(other),
        }
    }
}

/// `PkInfoEnum`, only the installed state matters here.
pub(crate) const INFO_INSTALLED: u32 = 1;

/// `PkExitEnum`
pub(crate) const EXIT_SUCCESS: u32 = 1;

/// `PkTransactionFlagEnum` bitfield with only `ONLY_TRUSTED` set.
pub(crate) const TRANSACTION_FLAG_ONLY_TRUSTED: u64 = 1 << 1;

/// `PkFilterEnum` bitfield with no filter applied.
pub(crate) const FILTER_NONE: u64 = 0;

/// Percentage value PackageKit sends when progress is unknown.
pub(crate) const PERCENTAGE_UNKNOWN: u32 = 101;
