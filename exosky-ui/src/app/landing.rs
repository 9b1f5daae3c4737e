use std::time::Duration;

use crate::{
    app::{
        loader::{
            Clients,
            LoadTask,
        },
        Page,
        PageEvent,
        Route,
    },
    graphics::scene::Scene,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub label: &'static str,
    pub route: Route,
}

#[derive(Debug, Default)]
pub struct LandingPage {
    mounted: bool,
}

impl LandingPage {
    pub const TITLE: &'static str = "Welcome page";

    pub fn links(&self) -> [Link; 2] {
        [
            Link {
                label: "Explorer",
                route: Route::Explorer,
            },
            Link {
                label: "Planet view",
                route: Route::Planet { exoplanet: None },
            },
        ]
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }
}

impl Page for LandingPage {
    fn mount(&mut self, _clients: &Clients) -> Option<LoadTask> {
        tracing::debug!("mounting landing page");
        self.mounted = true;
        None
    }

    fn unmount(&mut self) {
        tracing::debug!("unmounting landing page");
        self.mounted = false;
    }

    fn handle_event(&mut self, _event: PageEvent) {}

    fn frame(&mut self, _dt: Duration) {}

    fn scene(&self) -> Option<Scene<'_>> {
        None
    }
}
