use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, warn};
use zbus::blocking::{Connection, MessageIterator};
use zbus::message::Type as MessageType;
use zbus::zvariant::{DynamicType, OwnedObjectPath, OwnedValue, Type, Value};
use zbus::{MatchRule, Message};

use super::PackageBackend;
use super::enums::{
    EXIT_SUCCESS, FILTER_NONE, INFO_INSTALLED, Role, Status, TRANSACTION_FLAG_ONLY_TRUSTED,
};
use super::progress::Progress;
use crate::error::BackendError;
use crate::types::{PackageDetail, PackageId, ResolvedPackage};

const PK_SERVICE: &str = "org.freedesktop.PackageKit";
const PK_PATH: &str = "/org/freedesktop/PackageKit";
const PK_INTERFACE: &str = "org.freedesktop.PackageKit";
const PK_TRANSACTION_INTERFACE: &str = "org.freedesktop.PackageKit.Transaction";
const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";

/// Body of the `Package` signal.
#[derive(Debug, Deserialize, Type)]
struct PackageSignal {
    info: u32,
    package_id: String,
    summary: String,
}

/// Body of the `ErrorCode` signal.
#[derive(Debug, Deserialize, Type)]
struct ErrorCodeSignal {
    code: u32,
    details: String,
}

/// Body of the `Finished` signal.
#[derive(Debug, Deserialize, Type)]
struct FinishedSignal {
    exit: u32,
    runtime: u32,
}

/// Body of the `ItemProgress` signal.
#[derive(Debug, Deserialize, Type)]
struct ItemProgressSignal {
    package_id: String,
    status: u32,
    percentage: u32,
}

/// Everything a transaction reported before `Finished`.
#[derive(Debug, Default)]
struct TransactionOutput {
    packages: Vec<ResolvedPackage>,
    details: Vec<PackageDetail>,
}

/// PackageKit client talking to the daemon over the system bus.
pub(crate) struct PackageKitClient {
    connection: Connection,
}

impl PackageKitClient {
    pub(crate) fn connect() -> Result<Self, BackendError> {
        let connection = Connection::system().map_err(|err| {
            BackendError::transport(format!("Failed to connect to system bus: {}", err))
        })?;
        Ok(Self { connection })
    }

    fn run<B>(
        &self,
        role: Role,
        method: &str,
        body: &B,
        progress: &mut dyn FnMut(Progress),
    ) -> Result<TransactionOutput, BackendError>
    where
        B: serde::Serialize + DynamicType,
    {
        let reply = self.connection.call_method(
            Some(PK_SERVICE),
            PK_PATH,
            Some(PK_INTERFACE),
            "CreateTransaction",
            &(),
        )?;
        let path: OwnedObjectPath = reply.body().deserialize()?;
        debug!(%path, method, "transaction created");

        // Subscribe before starting the method so no signal is missed.
        let rule = MatchRule::builder()
            .msg_type(MessageType::Signal)
            .path(path.as_str())?
            .build();
        let signals = MessageIterator::for_match_rule(rule, &self.connection, None)?;

        self.connection.call_method(
            Some(PK_SERVICE),
            path.as_str(),
            Some(PK_TRANSACTION_INTERFACE),
            "SetHints",
            &vec!["interactive=true"],
        )?;
        self.connection.call_method(
            Some(PK_SERVICE),
            path.as_str(),
            Some(PK_TRANSACTION_INTERFACE),
            method,
            body,
        )?;

        collect_transaction(role, signals, progress)
    }
}

/// Folds the signals of one transaction into its output. `ErrorCode` or a
/// failed exit end as `Operation`; a stream that stops before `Finished`
/// ends as `Transport`.
fn collect_transaction<I>(
    role: Role,
    signals: I,
    progress: &mut dyn FnMut(Progress),
) -> Result<TransactionOutput, BackendError>
where
    I: IntoIterator<Item = zbus::Result<Message>>,
{
    let mut output = TransactionOutput::default();
    let mut state = Progress::new(role);
    let mut error: Option<BackendError> = None;

    for message in signals {
        let message = message?;
        let header = message.header();
        let (Some(interface), Some(member)) = (header.interface(), header.member()) else {
            continue;
        };

        if interface.as_str() == PROPERTIES_INTERFACE {
            if member.as_str() == "PropertiesChanged" && apply_properties(&message, &mut state)? {
                progress(state.clone());
            }
            continue;
        }
        if interface.as_str() != PK_TRANSACTION_INTERFACE {
            continue;
        }

        match member.as_str() {
            "Package" => {
                let signal: PackageSignal = message.body().deserialize()?;
                output.packages.push(ResolvedPackage {
                    package_id: PackageId::new(signal.package_id),
                    installed: signal.info == INFO_INSTALLED,
                    summary: signal.summary,
                });
            }
            "Details" => {
                let body = message.body();
                let data: HashMap<String, Value<'_>> = body.deserialize()?;
                output.details.push(parse_details(&data));
            }
            "ItemProgress" => {
                let signal: ItemProgressSignal = message.body().deserialize()?;
                state.status = Status::from_raw(signal.status);
                state.set_percentage(signal.percentage);
                state.set_package(&signal.package_id);
                progress(state.clone());
            }
            "ErrorCode" => {
                let signal: ErrorCodeSignal = message.body().deserialize()?;
                warn!(code = signal.code, details = %signal.details, "PackageKit reported an error");
                error = Some(BackendError::operation(signal.code, signal.details));
            }
            "Finished" => {
                let signal: FinishedSignal = message.body().deserialize()?;
                debug!(exit = signal.exit, runtime_ms = signal.runtime, "transaction finished");
                if let Some(err) = error {
                    return Err(err);
                }
                if signal.exit != EXIT_SUCCESS {
                    return Err(BackendError::operation(
                        0,
                        format!("Transaction finished with exit code {}", signal.exit),
                    ));
                }
                return Ok(output);
            }
            "Destroy" => break,
            _ => {}
        }
    }

    Err(error.unwrap_or_else(|| {
        BackendError::transport("PackageKit transaction ended without finishing")
    }))
}

/// Applies a `PropertiesChanged` body to `state`; true if anything changed.
fn apply_properties(message: &Message, state: &mut Progress) -> Result<bool, BackendError> {
    let (_interface, changed, _invalidated): (String, HashMap<String, OwnedValue>, Vec<String>) =
        message.body().deserialize()?;

    let mut touched = false;
    for (name, value) in &changed {
        match (name.as_str(), &**value) {
            ("Role", Value::U32(raw)) => {
                state.role = Role::from_raw(*raw);
                touched = true;
            }
            ("Status", Value::U32(raw)) => {
                state.status = Status::from_raw(*raw);
                touched = true;
            }
            ("Percentage", Value::U32(raw)) => {
                state.set_percentage(*raw);
                touched = true;
            }
            ("LastPackage", Value::Str(raw)) => {
                state.set_package(raw.as_str());
                touched = true;
            }
            _ => {}
        }
    }
    Ok(touched)
}

fn parse_details(data: &HashMap<String, Value<'_>>) -> PackageDetail {
    let text = |key: &str| match data.get(key) {
        Some(Value::Str(value)) => Some(value.as_str().to_string()),
        _ => None,
    };

    PackageDetail {
        package_id: text("package-id").map(PackageId::new),
        summary: text("summary"),
        description: text("description"),
        size: match data.get("size") {
            Some(Value::U64(size)) => Some(*size),
            _ => None,
        },
    }
}

impl PackageBackend for PackageKitClient {
    fn refresh_cache(&self, progress: &mut dyn FnMut(Progress)) -> Result<(), BackendError> {
        self.run(Role::RefreshCache, "RefreshCache", &true, progress)
            .map(|_| ())
    }

    fn resolve(
        &self,
        names: &[String],
        progress: &mut dyn FnMut(Progress),
    ) -> Result<Vec<ResolvedPackage>, BackendError> {
        self.run(Role::Resolve, "Resolve", &(FILTER_NONE, names), progress)
            .map(|output| output.packages)
    }

    fn get_details(
        &self,
        ids: &[PackageId],
        progress: &mut dyn FnMut(Progress),
    ) -> Result<Vec<PackageDetail>, BackendError> {
        let ids = raw_ids(ids);
        self.run(Role::GetDetails, "GetDetails", &ids, progress)
            .map(|output| output.details)
    }

    fn install_packages(
        &self,
        ids: &[PackageId],
        progress: &mut dyn FnMut(Progress),
    ) -> Result<(), BackendError> {
        let ids = raw_ids(ids);
        self.run(
            Role::InstallPackages,
            "InstallPackages",
            &(TRANSACTION_FLAG_ONLY_TRUSTED, ids),
            progress,
        )
        .map(|_| ())
    }

    fn remove_packages(
        &self,
        ids: &[PackageId],
        progress: &mut dyn FnMut(Progress),
    ) -> Result<(), BackendError> {
        let ids = raw_ids(ids);
        // allow_deps, autoremove
        self.run(
            Role::RemovePackages,
            "RemovePackages",
            &(TRANSACTION_FLAG_ONLY_TRUSTED, ids, true, true),
            progress,
        )
        .map(|_| ())
    }
}

fn raw_ids(ids: &[PackageId]) -> Vec<&str> {
    ids.iter().map(PackageId::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSACTION_PATH: &str = "/18_dcbeacec";

    fn signal<B>(interface: &str, member: &str, body: &B) -> zbus::Result<Message>
    where
        B: serde::Serialize + DynamicType,
    {
        Message::signal(TRANSACTION_PATH, interface, member)?.build(body)
    }

    fn transaction<B>(member: &str, body: &B) -> zbus::Result<Message>
    where
        B: serde::Serialize + DynamicType,
    {
        signal(PK_TRANSACTION_INTERFACE, member, body)
    }

    fn collect(
        role: Role,
        messages: Vec<zbus::Result<Message>>,
    ) -> (Result<TransactionOutput, BackendError>, Vec<Progress>) {
        let mut seen = Vec::new();
        let result = collect_transaction(role, messages, &mut |update: Progress| seen.push(update));
        (result, seen)
    }

    #[test]
    fn details_map_is_parsed_by_key() {
        let mut data = HashMap::new();
        data.insert("package-id".to_string(), Value::from("vlc;3.0;armhf;main"));
        data.insert("size".to_string(), Value::from(15_728_640u64));
        data.insert("summary".to_string(), Value::from("multimedia player"));

        let detail = parse_details(&data);
        assert_eq!(
            detail.package_id.as_ref().map(PackageId::as_str),
            Some("vlc;3.0;armhf;main")
        );
        assert_eq!(detail.size, Some(15_728_640));
        assert_eq!(detail.summary.as_deref(), Some("multimedia player"));
        assert_eq!(detail.description, None);
    }

    #[test]
    fn packages_and_details_are_collected_until_finished() {
        let mut details: HashMap<&str, Value<'_>> = HashMap::new();
        details.insert("package-id", Value::from("vlc;3.0.12;armhf;installed:main"));
        details.insert("size", Value::from(2_097_152u64));

        let (result, _) = collect(
            Role::Resolve,
            vec![
                transaction(
                    "Package",
                    &(INFO_INSTALLED, "vlc;3.0.12;armhf;installed:main", "media player"),
                ),
                transaction("Package", &(2u32, "scratch3;3.0;armhf;main", "")),
                transaction("Details", &details),
                transaction("Finished", &(EXIT_SUCCESS, 120u32)),
            ],
        );

        let output = result.expect("transaction succeeds");
        assert_eq!(output.packages.len(), 2);
        assert!(output.packages[0].installed);
        assert_eq!(output.packages[0].summary, "media player");
        assert!(!output.packages[1].installed);
        assert_eq!(output.details.len(), 1);
        assert_eq!(output.details[0].size, Some(2_097_152));
    }

    #[test]
    fn error_code_before_finished_is_an_operation_error() {
        let (result, _) = collect(
            Role::RemovePackages,
            vec![
                transaction("ErrorCode", &(14u32, "b is required by c")),
                transaction("Finished", &(2u32, 40u32)),
            ],
        );
        assert_eq!(
            result.err(),
            Some(BackendError::operation(14, "b is required by c"))
        );
    }

    #[test]
    fn failed_exit_is_an_operation_error() {
        let (result, _) = collect(
            Role::InstallPackages,
            vec![transaction("Finished", &(2u32, 40u32))],
        );
        assert!(matches!(
            result,
            Err(BackendError::Operation { code: 0, .. })
        ));
    }

    #[test]
    fn stream_without_finished_is_a_transport_error() {
        let (result, _) = collect(Role::Resolve, vec![transaction("Destroy", &())]);
        assert!(matches!(result, Err(BackendError::Transport(_))));

        let (result, _) = collect(Role::Resolve, Vec::new());
        assert!(matches!(result, Err(BackendError::Transport(_))));
    }

    #[test]
    fn property_changes_are_forwarded_as_progress() {
        let mut changed: HashMap<&str, Value<'_>> = HashMap::new();
        changed.insert("Role", Value::from(11u32));
        changed.insert("Status", Value::from(9u32));
        changed.insert("Percentage", Value::from(40u32));
        changed.insert("LastPackage", Value::from("scratch3;3.0;armhf;main"));

        let (result, seen) = collect(
            Role::InstallPackages,
            vec![
                signal(
                    PROPERTIES_INTERFACE,
                    "PropertiesChanged",
                    &(PK_TRANSACTION_INTERFACE, changed, Vec::<&str>::new()),
                ),
                transaction("ItemProgress", &("scratch3;3.0;armhf;main", 9u32, 101u32)),
                transaction("Finished", &(EXIT_SUCCESS, 10u32)),
            ],
        );

        assert!(result.is_ok());
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].role, Role::InstallPackages);
        assert_eq!(seen[0].status, Status::Install);
        assert_eq!(seen[0].percentage, Some(40));
        assert_eq!(
            seen[0].package_id,
            Some(PackageId::new("scratch3;3.0;armhf;main"))
        );
        assert_eq!(seen[1].percentage, None);
    }
}
