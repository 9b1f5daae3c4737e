pub mod config;
pub mod explorer;
pub mod interaction;
pub mod landing;
pub mod loader;
pub mod planet;
pub mod search;

use std::{
    fmt::Display,
    time::Duration,
};

use exosky_protocol::ExoplanetName;
use percent_encoding::{
    percent_decode_str,
    utf8_percent_encode,
    AsciiSet,
    CONTROLS,
};
use url::Url;

use self::{
    config::Config,
    explorer::ExplorerPage,
    landing::LandingPage,
    loader::{
        Clients,
        LoadTask,
    },
    planet::PlanetPage,
};
use crate::{
    error::Error,
    graphics::scene::Scene,
    input::mouse::MouseEvent,
};

/// Characters escaped in a route path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    Mouse(MouseEvent),
    Resize { width: f32, height: f32 },
}

/// A top-level view. The router mounts exactly one at a time.
pub trait Page {
    /// Attaches listeners and starts the page's catalog load, if it has one.
    /// The host spawns the returned task on its executor.
    fn mount(&mut self, clients: &Clients) -> Option<LoadTask>;

    /// Detaches listeners. Loads still in flight are discarded when they
    /// finish.
    fn unmount(&mut self);

    fn handle_event(&mut self, event: PageEvent);

    /// Per-frame step, called once per display refresh while mounted.
    fn frame(&mut self, dt: Duration);

    /// What to draw. `None` for pages without a 3D view.
    fn scene(&self) -> Option<Scene<'_>>;
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Explorer,
    Planet { exoplanet: Option<ExoplanetName> },
}

impl Route {
    /// Parses a location path like `/planet/TOI-700%20d`. Query and fragment
    /// are ignored.
    pub fn from_path(path: &str) -> Result<Self, Error> {
        let unknown = || Error::UnknownRoute(path.to_owned());

        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());

        let route = match (segments.next(), segments.next(), segments.next()) {
            (None, _, _) => Self::Landing,
            (Some("explorer"), None, _) => Self::Explorer,
            (Some("planet"), None, _) => Self::Planet { exoplanet: None },
            (Some("planet"), Some(name), None) => {
                let name = percent_decode_str(name)
                    .decode_utf8()
                    .map_err(|_| unknown())?;
                Self::Planet {
                    exoplanet: Some(ExoplanetName::from(name.into_owned())),
                }
            }
            _ => return Err(unknown()),
        };

        Ok(route)
    }

    pub fn path(&self) -> String {
        match self {
            Self::Landing => "/".to_owned(),
            Self::Explorer => "/explorer".to_owned(),
            Self::Planet { exoplanet: None } => "/planet".to_owned(),
            Self::Planet {
                exoplanet: Some(name),
            } => format!("/planet/{}", utf8_percent_encode(name, PATH_SEGMENT)),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug)]
pub enum ActivePage {
    Landing(LandingPage),
    Explorer(ExplorerPage),
    Planet(PlanetPage),
}

impl ActivePage {
    fn new(route: &Route, config: &Config) -> Self {
        match route {
            Route::Landing => Self::Landing(LandingPage::default()),
            Route::Explorer => Self::Explorer(ExplorerPage::new(config.explorer.clone())),
            Route::Planet { exoplanet } => {
                Self::Planet(PlanetPage::new(config.planet.clone(), exoplanet.clone()))
            }
        }
    }

    pub fn as_page(&self) -> &dyn Page {
        match self {
            Self::Landing(page) => page,
            Self::Explorer(page) => page,
            Self::Planet(page) => page,
        }
    }

    pub fn as_page_mut(&mut self) -> &mut dyn Page {
        match self {
            Self::Landing(page) => page,
            Self::Explorer(page) => page,
            Self::Planet(page) => page,
        }
    }
}

/// Router owning the mounted page.
#[derive(Debug)]
pub struct App {
    config: Config,
    clients: Clients,
    route: Route,
    page: ActivePage,
}

impl App {
    /// Starts on the landing page. `base_url` is where the page is served
    /// from and is used unless the config names explicit URLs.
    pub fn new(config: Config, base_url: &Url) -> Result<Self, Error> {
        let urls = config.urls(base_url)?;
        let clients = Clients::new(&urls);
        let route = Route::Landing;
        let mut page = ActivePage::new(&route, &config);
        // the landing page has nothing to load
        let _ = page.as_page_mut().mount(&clients);

        Ok(Self {
            config,
            clients,
            route,
            page,
        })
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn page(&self) -> &ActivePage {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut ActivePage {
        &mut self.page
    }

    pub fn clients(&self) -> &Clients {
        &self.clients
    }

    /// Unmounts the current page and mounts the one for `route`. Returns the
    /// new page's load task for the host to spawn.
    pub fn navigate(&mut self, route: Route) -> Option<LoadTask> {
        tracing::debug!(from = %self.route, to = %route, "navigating");

        self.page.as_page_mut().unmount();
        self.page = ActivePage::new(&route, &self.config);
        self.route = route;
        self.page.as_page_mut().mount(&self.clients)
    }

    pub fn navigate_to_path(&mut self, path: &str) -> Result<Option<LoadTask>, Error> {
        let route = Route::from_path(path)?;
        Ok(self.navigate(route))
    }

    pub fn handle_event(&mut self, event: PageEvent) {
        self.page.as_page_mut().handle_event(event);
    }

    pub fn frame(&mut self, dt: Duration) {
        self.page.as_page_mut().frame(dt);
    }

    pub fn scene(&self) -> Option<Scene<'_>> {
        self.page.as_page().scene()
    }

    pub fn explorer_mut(&mut self) -> Option<&mut ExplorerPage> {
        match &mut self.page {
            ActivePage::Explorer(page) => Some(page),
            _ => None,
        }
    }

    pub fn planet_mut(&mut self) -> Option<&mut PlanetPage> {
        match &mut self.page {
            ActivePage::Planet(page) => Some(page),
            _ => None,
        }
    }
}
