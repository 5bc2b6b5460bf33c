use crate::{
    app::state::State,
    config::{Config, RosterConfig, SheetConfig, StaticFilesConfig},
    roster::Roster,
    test_helpers::prelude::*,
};
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    sync::Arc,
    time::Duration,
};

#[derive(Clone)]
pub struct TestState {
    config: Config,
    roster: Arc<TestRoster>,
}

/// Configuration pointing at unreachable collaborators and a missing asset root.
pub fn test_config() -> Config {
    Config {
        listener_address: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 3000),
        metrics_listener_address: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 3001),
        sentry: None,
        static_files: StaticFilesConfig {
            root: PathBuf::from("/nonexistent/public"),
            index: "index.html".to_string(),
        },
        roster: RosterConfig {
            url: "http://localhost:1234".into(),
            timeout: Duration::from_secs(1),
        },
        sheet: SheetConfig {
            url: "http://localhost:1234/append".into(),
            timeout: Duration::from_secs(1),
        },
        diagnostics: false,
    }
}

impl TestState {
    pub fn new(roster: TestRoster) -> Self {
        Self {
            config: test_config(),
            roster: Arc::new(roster),
        }
    }

    pub fn static_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.static_files.root = root.into();
        self
    }

    pub fn diagnostics(mut self) -> Self {
        self.config.diagnostics = true;
        self
    }

    pub fn test_roster(&self) -> &TestRoster {
        &self.roster
    }
}

impl State for TestState {
    fn config(&self) -> &Config {
        &self.config
    }

    fn roster(&self) -> &dyn Roster {
        self.roster.as_ref()
    }
}
