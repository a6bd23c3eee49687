use std::rc::Rc;
use std::thread;

use libadwaita::prelude::*;
use tracing::{debug, error, info};

use super::AppController;
use crate::catalogue::load_default_catalogue;
use crate::error::BackendError;
use crate::packagekit::{
    PackageKitClient, Progress, ProgressUpdate, Request, Stage, StageOutput, describe_progress,
    execute_request,
};
use crate::state::session::{Session, SessionPhase, Step};
use crate::state::types::AppMessage;

const CATALOGUE_MISSING_TEXT: &str = "Unable to open package data file";

impl AppController {
    /// Loads the catalogue and kicks off the refresh/resolve/details chain.
    pub(crate) fn start(self: &Rc<Self>) {
        let catalogue = match load_default_catalogue() {
            Ok(catalogue) => catalogue,
            Err(err) => {
                error!(error = %err, "catalogue not loaded");
                self.show_notice(CATALOGUE_MISSING_TEXT);
                return;
            }
        };

        let request = {
            let mut state = self.state.borrow_mut();
            state.session = Session::new(catalogue);
            state.session.start()
        };
        self.dispatch(request);
    }

    /// Runs one backend request on a worker thread. Progress and the result
    /// come back through the controller's channel.
    pub(crate) fn dispatch(self: &Rc<Self>, request: Request) {
        let stage = request.stage();
        debug!(?stage, "dispatching backend request");
        self.show_progress(Some(stage.waiting_text()), None);

        let sender = self.sender.clone();
        thread::spawn(move || {
            let progress_sender = sender.clone();
            let mut forward = move |progress: Progress| {
                let _ = progress_sender.send(AppMessage::Progress(progress));
            };
            let result = PackageKitClient::connect()
                .and_then(|client| execute_request(&client, request, &mut forward));
            let _ = sender.send(AppMessage::StageFinished { stage, result });
        });
    }

    pub(crate) fn on_progress(&self, progress: Progress) {
        let update = {
            let state = self.state.borrow();
            describe_progress(&progress, |id| state.session.display_name_for(id))
        };
        match update {
            ProgressUpdate::Message { text, percentage } => {
                self.show_progress(Some(text.as_str()), percentage);
            }
            ProgressUpdate::Pulse => self.show_progress(None, None),
        }
    }

    pub(crate) fn finish_stage(
        self: &Rc<Self>,
        stage: Stage,
        result: Result<StageOutput, BackendError>,
    ) {
        let step = self.state.borrow_mut().session.complete(stage, result);
        match step {
            Step::Issue(request) => self.dispatch(request),
            Step::Interactive => self.enter_interactive(),
            Step::Finished(text) => {
                info!(%text, "changes applied");
                self.show_notice(&text);
            }
            Step::Failed(text) => {
                error!(%text, "backend chain aborted");
                self.show_notice(&text);
            }
        }
    }

    fn enter_interactive(self: &Rc<Self>) {
        self.rebuild_category_list();
        self.close_message();
        self.set_controls_sensitive(true);
        self.update_info_button();
    }

    pub(crate) fn on_install_clicked(self: &Rc<Self>) {
        if self.state.borrow().session.phase() != SessionPhase::Interactive {
            return;
        }
        self.set_controls_sensitive(false);
        let request = self.state.borrow_mut().session.begin_transaction();
        match request {
            Some(request) => self.dispatch(request),
            None => {
                info!("no changes selected");
                self.app.quit();
            }
        }
    }
}
