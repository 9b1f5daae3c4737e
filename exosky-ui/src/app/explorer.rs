//! Galaxy explorer: nearby stars, their exoplanets and the sun in a
//! cartesian scene around an orbit camera.

use std::time::Duration;

use exosky_protocol::{
    assets,
    catalog::CartesianCatalog,
    model::body::BodyKind,
};
use futures::FutureExt;
use nalgebra::{
    Point2,
    Point3,
};

use crate::{
    app::{
        config::ExplorerConfig,
        interaction::{
            pick_point,
            Intent,
            Interaction,
            Selection,
            Tooltip,
        },
        loader::{
            load_channel,
            Clients,
            Listeners,
            LoadReceiver,
            LoadTask,
        },
        search::SearchList,
        Page,
        PageEvent,
    },
    graphics::{
        camera::{
            Camera,
            Viewport,
        },
        orbit::OrbitController,
        scene::Scene,
    },
    input::mouse::MouseEvent,
    sky::point_cloud::{
        CloudKind,
        MarkerStyle,
        PointCloud,
        PointInfo,
    },
};

#[derive(Clone, Debug)]
pub struct ExplorerCatalogs {
    pub stars: CartesianCatalog,
    pub planets: CartesianCatalog,
}

#[derive(Debug)]
pub struct ExplorerPage {
    config: ExplorerConfig,
    listeners: Listeners,
    viewport: Viewport,
    camera: Camera,
    orbit: OrbitController,
    clouds: Vec<PointCloud>,
    interaction: Interaction,
    search: SearchList,
    loads: Option<LoadReceiver<ExplorerCatalogs>>,
}

impl ExplorerPage {
    pub fn new(config: ExplorerConfig) -> Self {
        let viewport = Viewport::default();
        let mut orbit = OrbitController::new(Point3::from(config.eye), Point3::origin());
        orbit.damping_factor = config.damping_factor;
        orbit.focus_distance = config.focus_distance;
        let camera = Camera::new(orbit.transform(), config.camera.projection(viewport.aspect()));
        let interaction = Interaction::new(config.interaction);

        Self {
            config,
            listeners: Listeners::empty(),
            viewport,
            camera,
            orbit,
            clouds: vec![],
            interaction,
            search: SearchList::default(),
            loads: None,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }

    pub fn clouds(&self) -> &[PointCloud] {
        &self.clouds
    }

    pub fn cloud(&self, kind: CloudKind) -> Option<&PointCloud> {
        self.clouds.iter().find(|cloud| cloud.kind == kind)
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.interaction.tooltip()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.interaction.selection()
    }

    pub fn search(&self) -> &SearchList {
        &self.search
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.search.set_query(query);
    }

    pub fn search_results(&self) -> Vec<&str> {
        self.search.results()
    }

    /// Builds the scene from freshly loaded catalogs.
    pub fn on_loaded(&mut self, catalogs: ExplorerCatalogs) {
        let stars = catalogs.stars.bodies(BodyKind::Star);
        let planets = catalogs.planets.bodies(BodyKind::Exoplanet);
        tracing::info!(
            num_stars = stars.len(),
            num_planets = planets.len(),
            "loaded explorer catalogs"
        );

        self.search = SearchList::new(planets.iter().map(|planet| planet.name.clone()).collect());
        self.clouds = vec![
            PointCloud::from_bodies(CloudKind::NearbyStars, &stars, &MarkerStyle::NEARBY_STAR),
            PointCloud::sun(),
            PointCloud::from_bodies(CloudKind::Exoplanets, &planets, &MarkerStyle::EXOPLANET),
        ];
    }

    /// Selects the named exoplanet and flies to it. Returns `false` if there
    /// is no such exoplanet.
    pub fn select_exoplanet(&mut self, name: &str) -> bool {
        let Some(point) = self
            .cloud(CloudKind::Exoplanets)
            .and_then(|cloud| cloud.point(cloud.find(name)?))
        else {
            tracing::debug!(name, "no such exoplanet");
            return false;
        };

        self.orbit.fly_to(point.position);
        let text = selection_text(&point);
        let position = self.screen_center();
        self.interaction.select(point, text, position);
        true
    }

    /// Flies to the selected object, if any.
    pub fn focus_selected(&mut self) -> bool {
        let Some(selection) = self.interaction.selection()
        else {
            return false;
        };
        self.orbit.fly_to(selection.point.position);
        true
    }

    pub fn close_selection(&mut self) {
        self.interaction.close_selection();
    }

    pub fn toggle_drawing(&mut self) -> bool {
        self.interaction.toggle_drawing()
    }

    fn screen_center(&self) -> Point2<f32> {
        Point2::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    fn pick(&self, position: Point2<f32>) -> Option<PointInfo> {
        pick_point(
            &self.camera,
            &self.viewport,
            &self.clouds,
            &self.config.pick,
            position,
        )
    }

    fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Rotate(delta) => self.orbit.rotate(delta, self.viewport.height),
            Intent::Pan(delta) => {
                self.orbit
                    .pan(delta, self.viewport.height, self.camera.projection.fovy)
            }
            Intent::Zoom(delta_y) => self.camera.projection.zoom(delta_y),
            Intent::Hover(position) => {
                let tooltip = self.pick(position).map(|point| {
                    Tooltip {
                        text: point.label,
                        position,
                    }
                });
                self.interaction.hover(tooltip);
            }
            Intent::Pick(position) => {
                let hit = self.pick(position);
                let text = hit.as_ref().map(selection_text);
                let outcome = self.interaction.click(hit, text, position);
                tracing::trace!(?outcome, "explorer click");
            }
        }
    }
}

fn selection_text(point: &PointInfo) -> String {
    match point.cloud {
        CloudKind::Exoplanets => format!("Exoplanet: {}", point.label),
        CloudKind::Sun => "Sun".to_owned(),
        _ => format!("Star: {}", point.label),
    }
}

impl Page for ExplorerPage {
    fn mount(&mut self, clients: &Clients) -> Option<LoadTask> {
        tracing::debug!("mounting explorer");
        self.listeners = Listeners::all();

        let (sender, receiver) = load_channel();
        self.loads = Some(receiver);

        let asset_client = clients.assets.clone();
        let task = async move {
            let result = futures::try_join!(
                asset_client.get_json::<CartesianCatalog>(assets::NEARBY_STARS),
                asset_client.get_json::<CartesianCatalog>(assets::NEARBY_PLANETS),
            );
            match result {
                Ok((stars, planets)) => {
                    sender.deliver(ExplorerCatalogs { stars, planets });
                }
                Err(error) => tracing::error!(?error, "could not load explorer catalogs"),
            }
        };
        Some(task.boxed_local())
    }

    fn unmount(&mut self) {
        tracing::debug!("unmounting explorer");
        self.listeners = Listeners::empty();
        self.loads = None;
    }

    fn handle_event(&mut self, event: PageEvent) {
        match event {
            PageEvent::Mouse(event) => {
                let listener = match event {
                    MouseEvent::Wheel { .. } => Listeners::WHEEL,
                    _ => Listeners::POINTER,
                };
                if !self.listeners.contains(listener) {
                    return;
                }
                for intent in self.interaction.handle_mouse(&event) {
                    self.apply(intent);
                }
            }
            PageEvent::Resize { width, height } => {
                if !self.listeners.contains(Listeners::RESIZE) {
                    return;
                }
                let viewport = Viewport::new(width, height);
                if viewport.is_empty() {
                    tracing::debug!(?viewport, "ignoring empty resize");
                    return;
                }
                self.viewport = viewport;
                self.camera.projection.set_aspect(self.viewport.aspect());
            }
        }
    }

    fn frame(&mut self, dt: Duration) {
        let loaded = self
            .loads
            .as_mut()
            .map(LoadReceiver::drain)
            .unwrap_or_default();
        for catalogs in loaded {
            self.on_loaded(catalogs);
        }

        self.camera.transform = self.orbit.update(dt);
    }

    fn scene(&self) -> Option<Scene<'_>> {
        Some(
            Scene::new(&self.camera)
                .with_clouds(&self.clouds)
                .with_lines(self.interaction.lines()),
        )
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::{
        Vector2,
        Vector3,
    };

    use super::*;
    use crate::{
        app::config::Urls,
        input::mouse::{
            MouseButton,
            WheelDeltaMode,
        },
    };

    fn catalogs() -> ExplorerCatalogs {
        ExplorerCatalogs {
            stars: CartesianCatalog::from_json_str(
                r#"{"x": {"0": 3, "1": -2}, "y": {"0": 0, "1": -1}, "z": {"0": 0, "1": 0}}"#,
            )
            .unwrap(),
            planets: CartesianCatalog::from_json_str(
                r#"{
                    "x": {"0": 0.5, "1": 0, "2": -1},
                    "y": {"0": 0, "1": 0.5, "2": 0},
                    "z": {"0": 0, "1": 0, "2": 2},
                    "name": {"0": "Kepler-1", "1": "Kepler-2", "2": "TOI-700"}
                }"#,
            )
            .unwrap(),
        }
    }

    fn clients() -> Clients {
        Clients::new(&Urls::from_base(&"http://localhost:3333/".parse().unwrap()).unwrap())
    }

    fn loaded_page() -> ExplorerPage {
        let mut page = ExplorerPage::new(ExplorerConfig::default());
        let _task = page.mount(&clients());
        page.on_loaded(catalogs());
        page
    }

    #[test]
    fn it_builds_the_scene_from_both_catalogs() {
        let page = loaded_page();
        assert_eq!(page.cloud(CloudKind::NearbyStars).unwrap().len(), 2);
        assert_eq!(page.cloud(CloudKind::Exoplanets).unwrap().len(), 3);
        assert_eq!(page.cloud(CloudKind::Sun).unwrap().len(), 1);
        assert_eq!(page.scene().unwrap().clouds.len(), 3);
    }

    #[test]
    fn it_searches_exoplanet_names() {
        let mut page = loaded_page();
        page.set_search_query("kepler");
        assert_eq!(page.search_results(), vec!["Kepler-1", "Kepler-2"]);
    }

    #[test]
    fn selecting_a_search_result_flies_there() {
        let mut page = loaded_page();
        assert!(page.select_exoplanet("TOI-700"));
        assert_eq!(page.selection().unwrap().text, "Exoplanet: TOI-700");
        assert!(page.orbit().is_flying());

        for _ in 0..70 {
            page.frame(Duration::from_millis(16));
        }
        assert!(!page.orbit().is_flying());
        assert_eq!(page.orbit().target(), Point3::new(-1.0, 0.0, 2.0));

        assert!(!page.select_exoplanet("Nope"));
        page.close_selection();
        assert!(page.selection().is_none());
        assert!(!page.focus_selected());
    }

    #[test]
    fn clicking_the_sun_selects_it() {
        let mut page = loaded_page();
        // looking from (1, 1, 1) at the origin, the sun is in the center
        page.frame(Duration::ZERO);
        page.handle_event(PageEvent::Mouse(MouseEvent::Click {
            button: MouseButton::Left,
            position: Point2::new(640.0, 360.0),
        }));
        assert_eq!(page.selection().unwrap().text, "Sun");

        assert!(page.focus_selected());
        assert!(page.orbit().is_flying());
    }

    #[test]
    fn hovering_shows_the_label() {
        let mut page = loaded_page();
        page.frame(Duration::ZERO);
        page.handle_event(PageEvent::Mouse(MouseEvent::Move {
            position: Point2::new(640.0, 360.0),
            delta: Vector2::zeros(),
        }));
        assert_eq!(page.tooltip().unwrap().text, "Sun");

        page.handle_event(PageEvent::Mouse(MouseEvent::Move {
            position: Point2::new(5.0, 5.0),
            delta: Vector2::zeros(),
        }));
        assert!(page.tooltip().is_none());
    }

    #[test]
    fn wheel_changes_the_field_of_view() {
        let mut page = loaded_page();
        page.handle_event(PageEvent::Mouse(MouseEvent::Wheel {
            delta: Vector3::new(0.0, -200.0, 0.0),
            mode: WheelDeltaMode::Pixel,
        }));
        assert!((page.camera().projection.fovy - 55.0).abs() < 1e-3);
    }

    #[test]
    fn unmounted_page_ignores_events() {
        let mut page = loaded_page();
        page.unmount();
        page.handle_event(PageEvent::Resize {
            width: 100.0,
            height: 100.0,
        });
        assert_eq!(page.camera().projection.aspect, 1280.0 / 720.0);
    }

    #[test]
    fn empty_resizes_are_ignored() {
        let mut page = loaded_page();
        page.handle_event(PageEvent::Resize {
            width: 0.0,
            height: 720.0,
        });
        assert_eq!(page.camera().projection.aspect, 1280.0 / 720.0);

        page.handle_event(PageEvent::Resize {
            width: 1000.0,
            height: 500.0,
        });
        assert_eq!(page.camera().projection.aspect, 2.0);
    }
}
