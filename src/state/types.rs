use crate::categories::ALL_PROGRAMS;
use crate::error::BackendError;
use crate::packagekit::{Progress, Stage, StageOutput};
use crate::state::session::Session;

pub(crate) struct AppState {
    pub(crate) session: Session,
    pub(crate) selected_category: String,
    /// Entry indices shown in the package list, in row order.
    pub(crate) visible: Vec<usize>,
    pub(crate) selected_package: Option<usize>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: Session::default(),
            selected_category: ALL_PROGRAMS.to_string(),
            visible: Vec::new(),
            selected_package: None,
        }
    }
}

pub(crate) enum AppMessage {
    Progress(Progress),
    StageFinished {
        stage: Stage,
        result: Result<StageOutput, BackendError>,
    },
}
