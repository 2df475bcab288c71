//! Home view model actor.
//!
//! A single task owns [`HomeCore`] and is the only place state changes. User
//! commands, timer deadlines and fetch completions are multiplexed onto it;
//! fetches themselves run on spawned tasks and report back over a channel.

use std::collections::HashMap;

use shared::domain::DisplayMode;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{sleep_until, Instant},
};
use tracing::{debug, info, warn};

use crate::{
    bus::SignalLine,
    controller::assert_valid_index,
    gateway::CatalogGateway,
    home::{HomeCommand, HomeCore},
    outcome::{Completion, FetchRequest},
    settings::HomeSettings,
    state::HomeState,
};

/// Spawns the home actor on the current tokio runtime.
pub fn spawn_home(gateway: CatalogGateway, settings: HomeSettings) -> HomeHandle {
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let (completions_tx, completions_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(HomeState::default());

    let actor = HomeActor {
        core: HomeCore::new(settings),
        gateway,
        commands: commands_rx,
        completions_tx,
        completions: completions_rx,
        in_flight: HashMap::new(),
        publisher: state_tx,
    };
    let task = tokio::spawn(actor.run());

    HomeHandle {
        commands: commands_tx,
        state: state_rx,
        task,
    }
}

/// Command surface for the rendering layer. Dropping the handle stops the
/// actor and aborts its in-flight fetches.
pub struct HomeHandle {
    commands: mpsc::UnboundedSender<HomeCommand>,
    state: watch::Receiver<HomeState>,
    task: JoinHandle<()>,
}

impl HomeHandle {
    pub fn set_mode(&self, mode: DisplayMode) {
        self.send(HomeCommand::SetMode(mode));
    }

    pub fn swap_mode(&self) {
        self.send(HomeCommand::SwapMode);
    }

    /// # Panics
    ///
    /// Panics on an out-of-range index, in the caller, before anything is
    /// queued.
    pub fn set_selected_index(&self, index: usize) {
        assert_valid_index(index);
        self.send(HomeCommand::SetSelectedIndex(index));
    }

    pub fn load_more(&self) {
        self.send(HomeCommand::LoadMore);
    }

    pub fn subscribe(&self) -> watch::Receiver<HomeState> {
        self.state.clone()
    }

    pub fn state(&self) -> HomeState {
        self.state.borrow().clone()
    }

    pub async fn shutdown(self) {
        let Self { commands, task, .. } = self;
        drop(commands);
        if let Err(err) = task.await {
            warn!("home view model task ended abnormally: {err}");
        }
    }

    fn send(&self, command: HomeCommand) {
        if self.commands.send(command).is_err() {
            warn!(?command, "home view model is stopped; command dropped");
        }
    }
}

struct HomeActor {
    core: HomeCore,
    gateway: CatalogGateway,
    commands: mpsc::UnboundedReceiver<HomeCommand>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions: mpsc::UnboundedReceiver<Completion>,
    in_flight: HashMap<SignalLine, JoinHandle<()>>,
    publisher: watch::Sender<HomeState>,
}

impl HomeActor {
    async fn run(mut self) {
        info!("home view model started");
        self.core.bootstrap(Instant::now());
        self.flush();

        loop {
            let deadline = self.core.next_deadline();
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.core.handle(command, Instant::now()),
                    None => break,
                },
                Some(completion) = self.completions.recv() => {
                    let line = completion.line();
                    let token = completion.token();
                    let applied = self.core.complete(completion);
                    debug!(line = %line, %token, applied, "fetch completed");
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.core.advance(Instant::now());
                }
            }
            self.flush();
        }

        for (_, task) in self.in_flight.drain() {
            task.abort();
        }
        info!("home view model stopped");
    }

    fn flush(&mut self) {
        for request in self.core.drain() {
            self.dispatch(request);
        }

        let state = self.core.state();
        self.publisher.send_if_modified(|published| {
            if published == state {
                false
            } else {
                *published = state.clone();
                true
            }
        });
    }

    fn dispatch(&mut self, request: FetchRequest) {
        let line = request.line();
        if let Some(previous) = self.in_flight.remove(&line) {
            previous.abort();
        }

        let gateway = self.gateway.clone();
        let completions = self.completions_tx.clone();
        let task = tokio::spawn(async move {
            let completion = gateway.execute(request).await;
            let _ = completions.send(completion);
        });
        self.in_flight.insert(line, task);
    }
}
