use crate::{config::Config, roster::Roster};
use std::sync::Arc;

pub trait State: Send + Sync + Clone + 'static {
    fn config(&self) -> &Config;
    fn roster(&self) -> &dyn Roster;
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    config: Config,
    roster: Box<dyn Roster>,
}

impl AppState {
    pub fn new<R: Roster>(config: Config, roster: R) -> Self {
        Self {
            inner: Arc::new(InnerState {
                config,
                roster: Box::new(roster) as Box<dyn Roster>,
            }),
        }
    }
}

impl State for AppState {
    fn config(&self) -> &Config {
        &self.inner.config
    }

    fn roster(&self) -> &dyn Roster {
        self.inner.roster.as_ref()
    }
}
