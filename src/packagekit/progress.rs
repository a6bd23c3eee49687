use super::enums::{PERCENTAGE_UNKNOWN, Role, Status};
use crate::types::PackageId;

/// Snapshot of a transaction's progress properties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Progress {
    pub role: Role,
    pub status: Status,
    pub percentage: Option<u32>,
    pub package_id: Option<PackageId>,
}

impl Progress {
    pub(crate) fn new(role: Role) -> Self {
        Self {
            role,
            status: Status::Other(0),
            percentage: None,
            package_id: None,
        }
    }

    pub(crate) fn set_percentage(&mut self, raw: u32) {
        self.percentage = if raw >= PERCENTAGE_UNKNOWN {
            None
        } else {
            Some(raw)
        };
    }

    pub(crate) fn set_package(&mut self, raw: &str) {
        self.package_id = if raw.is_empty() {
            None
        } else {
            Some(PackageId::new(raw))
        };
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ProgressUpdate {
    /// Replace the dialog text; pulse when no percentage is known.
    Message {
        text: String,
        percentage: Option<u32>,
    },
    /// Keep the current text and pulse the bar.
    Pulse,
}

/// Turns a progress report into dialog text. `display_name` looks up the
/// catalogue name for the package being worked on.
pub(crate) fn describe_progress<F>(progress: &Progress, display_name: F) -> ProgressUpdate
where
    F: Fn(&PackageId) -> Option<String>,
{
    let percentage = progress.percentage;
    let message = |text: String| ProgressUpdate::Message { text, percentage };
    let package_name = || {
        progress
            .package_id
            .as_ref()
            .and_then(|id| display_name(id))
    };

    match (progress.role, progress.status) {
        (Role::RefreshCache, Status::LoadingCache) => {
            message("Updating package data - please wait...".to_string())
        }
        (Role::Resolve, Status::LoadingCache) => {
            message("Reading package status - please wait...".to_string())
        }
        (Role::GetDetails, Status::LoadingCache) => {
            message("Reading package details - please wait...".to_string())
        }
        (Role::InstallPackages, status @ (Status::Download | Status::Install)) => {
            let verb = if status == Status::Install {
                "Installing"
            } else {
                "Downloading"
            };
            let name = package_name().unwrap_or_else(|| "packages".to_string());
            message(format!("{} {} - please wait...", verb, name))
        }
        (Role::RemovePackages, Status::Remove) => {
            let name = package_name().unwrap_or_else(|| "packages".to_string());
            message(format!("Removing {} - please wait...", name))
        }
        _ => ProgressUpdate::Pulse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(role: Role, status: Status, percentage: u32, package: &str) -> Progress {
        let mut progress = Progress::new(role);
        progress.status = status;
        progress.set_percentage(percentage);
        progress.set_package(package);
        progress
    }

    fn lookup(id: &PackageId) -> Option<String> {
        (id.name() == "scratch3").then(|| "Scratch 3".to_string())
    }

    #[test]
    fn loading_cache_stages_have_fixed_text() {
        let update = describe_progress(
            &progress(Role::RefreshCache, Status::LoadingCache, 40, ""),
            lookup,
        );
        assert_eq!(
            update,
            ProgressUpdate::Message {
                text: "Updating package data - please wait...".into(),
                percentage: Some(40),
            }
        );

        let update = describe_progress(
            &progress(Role::GetDetails, Status::LoadingCache, 101, ""),
            lookup,
        );
        assert_eq!(
            update,
            ProgressUpdate::Message {
                text: "Reading package details - please wait...".into(),
                percentage: None,
            }
        );
    }

    #[test]
    fn install_names_the_package_when_known() {
        let update = describe_progress(
            &progress(
                Role::InstallPackages,
                Status::Install,
                70,
                "scratch3;3.0;armhf;raspberrypi",
            ),
            lookup,
        );
        assert_eq!(
            update,
            ProgressUpdate::Message {
                text: "Installing Scratch 3 - please wait...".into(),
                percentage: Some(70),
            }
        );

        let update = describe_progress(
            &progress(Role::InstallPackages, Status::Download, 101, "libfoo;1;armhf;main"),
            lookup,
        );
        assert_eq!(
            update,
            ProgressUpdate::Message {
                text: "Downloading packages - please wait...".into(),
                percentage: None,
            }
        );
    }

    #[test]
    fn remove_falls_back_to_generic_name() {
        let update = describe_progress(
            &progress(Role::RemovePackages, Status::Remove, 10, ""),
            lookup,
        );
        assert_eq!(
            update,
            ProgressUpdate::Message {
                text: "Removing packages - please wait...".into(),
                percentage: Some(10),
            }
        );
    }

    #[test]
    fn other_statuses_pulse() {
        let update = describe_progress(
            &progress(Role::InstallPackages, Status::Other(2), 5, ""),
            lookup,
        );
        assert_eq!(update, ProgressUpdate::Pulse);
        let update = describe_progress(
            &progress(Role::Resolve, Status::Other(3), 5, ""),
            lookup,
        );
        assert_eq!(update, ProgressUpdate::Pulse);
    }
}
