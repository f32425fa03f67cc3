use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};

use anyhow::Context;
use chrono::Local;
use dashboard_core::{update, AppState, HtmlDocument, Msg};
use dashboard_engine::ConnectionHandle;
use dashboard_logging::{dash_error, dash_info, set_frame_seq};

use super::config;
use super::console;
use super::effects::{EffectRunner, MsgSink};
use super::logging;
use super::page::PageWriter;
use super::ui;

pub fn run_app(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = config::load(config_path.as_deref()).context("loading configuration")?;
    logging::initialize(config.log_destination);
    dash_info!(
        "Dashboard v{} starting, page at {:?}",
        ui::constants::APP_VERSION,
        config.page_path()
    );

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();

    let sink = Arc::new(MsgSink::new(msg_tx.clone()));
    let connection = ConnectionHandle::spawn(config.connection.clone(), sink)
        .context("starting the connection worker")?;
    console::spawn_reader(msg_tx).context("starting the console reader")?;
    println!("{}", console::HELP);

    let page = PageWriter::new(config.output_dir.clone(), config.page_file.clone());
    let mut handler = AppEventHandler::new(EffectRunner::new(Some(connection)), page);
    handler.run(&msg_rx);

    dash_info!("Dashboard stopped");
    Ok(())
}

struct AppEventHandler {
    state: AppState,
    document: HtmlDocument,
    effects: EffectRunner,
    page: PageWriter,
}

impl AppEventHandler {
    fn new(effects: EffectRunner, page: PageWriter) -> Self {
        Self {
            state: AppState::new(),
            document: HtmlDocument::new(),
            effects,
            page,
        }
    }

    fn run(&mut self, msg_rx: &mpsc::Receiver<Msg>) {
        self.render();
        while !self.effects.is_stopped() {
            match msg_rx.recv_timeout(ui::constants::TICK_INTERVAL) {
                Ok(msg) => self.dispatch_msg(msg),
                Err(mpsc::RecvTimeoutError::Timeout) => self.dispatch_msg(Msg::Tick),
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let mut pending = VecDeque::from([msg]);
        while let Some(msg) = pending.pop_front() {
            if matches!(msg, Msg::FrameReceived(_)) {
                set_frame_seq(self.state.frames_received() + 1);
            }
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            for effect in effects {
                pending.extend(self.effects.run(effect, &mut self.document));
            }
        }

        if self.state.consume_dirty() {
            self.render();
        }
    }

    fn render(&mut self) {
        let view = self.state.view();
        let footer = ui::render::footer_text(&view, self.document.card_count(), &Local::now());
        self.document.set_footer(footer);
        if let Err(err) = self.page.write(&self.document.to_html()) {
            dash_error!("Failed to write page {:?}: {}", self.page.target(), err);
        }
    }
}
