//! Night sky as seen from the surface of a planet.
//!
//! The camera sits at the origin inside the star sphere and is turned
//! directly by dragging. Without an exoplanet the bundled earth sky is
//! shown.

use std::time::Duration;

use bytes::Bytes;
use exosky_client::ApiClient;
use exosky_protocol::{
    assets,
    catalog::StarCatalog,
    ExoplanetName,
};
use futures::FutureExt;
use nalgebra::{
    Point2,
    Point3,
    UnitQuaternion,
    Vector2,
    Vector3,
};

use crate::{
    app::{
        config::PlanetConfig,
        interaction::{
            pick_point,
            Intent,
            Interaction,
            Mode,
            Selection,
            Tooltip,
        },
        loader::{
            load_channel,
            Clients,
            Listeners,
            LoadReceiver,
            LoadSender,
            LoadTask,
        },
        Page,
        PageEvent,
    },
    graphics::{
        camera::{
            Camera,
            Viewport,
        },
        scene::Scene,
        transform::Transform,
    },
    input::mouse::MouseEvent,
    sky::{
        grid::{
            GridKind,
            GridOverlay,
        },
        point_cloud::{
            PointCloud,
            PointInfo,
        },
    },
};

#[derive(Debug)]
pub struct PlanetPage {
    config: PlanetConfig,
    exoplanet: Option<ExoplanetName>,
    listeners: Listeners,
    viewport: Viewport,
    camera: Camera,
    yaw: f32,
    pitch: f32,
    clouds: Vec<PointCloud>,
    equatorial_grid: GridOverlay,
    galactic_grid: GridOverlay,
    interaction: Interaction,
    api: Option<ApiClient>,
    stars: Option<LoadReceiver<StarCatalog>>,
    report_sender: Option<LoadSender<Bytes>>,
    reports: Option<LoadReceiver<Bytes>>,
    report: Option<Bytes>,
}

impl PlanetPage {
    pub fn new(config: PlanetConfig, exoplanet: Option<ExoplanetName>) -> Self {
        let viewport = Viewport::default();
        let camera = Camera::new(
            Transform::from_position(Point3::origin()),
            config.camera.projection(viewport.aspect()),
        );
        let interaction = Interaction::new(config.interaction);

        Self {
            config,
            exoplanet,
            listeners: Listeners::empty(),
            viewport,
            camera,
            yaw: 0.0,
            pitch: 0.0,
            clouds: vec![],
            equatorial_grid: GridOverlay::new(GridKind::Equatorial),
            galactic_grid: GridOverlay::new(GridKind::Galactic),
            interaction,
            api: None,
            stars: None,
            report_sender: None,
            reports: None,
            report: None,
        }
    }

    pub fn exoplanet(&self) -> Option<&ExoplanetName> {
        self.exoplanet.as_ref()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn stars(&self) -> Option<&PointCloud> {
        self.clouds.first()
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.interaction.tooltip()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.interaction.selection()
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn close_selection(&mut self) {
        self.interaction.close_selection();
    }

    pub fn toggle_drawing(&mut self) -> bool {
        self.interaction.toggle_drawing()
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.interaction.mode(), Mode::Drawing(_))
    }

    fn grid(&self, kind: GridKind) -> &GridOverlay {
        match kind {
            GridKind::Equatorial => &self.equatorial_grid,
            GridKind::Galactic => &self.galactic_grid,
        }
    }

    fn grid_mut(&mut self, kind: GridKind) -> &mut GridOverlay {
        match kind {
            GridKind::Equatorial => &mut self.equatorial_grid,
            GridKind::Galactic => &mut self.galactic_grid,
        }
    }

    /// Shows or hides a grid. Returns whether it is now visible.
    pub fn toggle_grid(&mut self, kind: GridKind) -> bool {
        let visible = self.grid_mut(kind).toggle();
        tracing::debug!(?kind, visible, "toggled grid");
        visible
    }

    pub fn is_grid_visible(&self, kind: GridKind) -> bool {
        self.grid(kind).is_visible()
    }

    pub fn grid_button_label(&self, kind: GridKind) -> &'static str {
        match (kind, self.is_grid_visible(kind)) {
            (GridKind::Equatorial, false) => "Show Equatorial Grid",
            (GridKind::Equatorial, true) => "Hide Equatorial Grid",
            (GridKind::Galactic, false) => "Show Galactic Grid",
            (GridKind::Galactic, true) => "Hide Galactic Grid",
        }
    }

    pub fn on_loaded(&mut self, catalog: StarCatalog) {
        let stars = catalog.stars();
        tracing::info!(
            num_stars = stars.len(),
            exoplanet = ?self.exoplanet,
            "loaded sky catalog"
        );
        self.clouds = vec![PointCloud::from_stars(&stars, &self.config.stars)];
    }

    /// Starts downloading the PDF report of the exoplanet this view shows.
    /// The report is available through [`Self::take_report`] once the
    /// returned task has finished.
    pub fn print_report(&self) -> Option<LoadTask> {
        let (Some(name), Some(api), Some(sender)) =
            (&self.exoplanet, &self.api, &self.report_sender)
        else {
            tracing::debug!("no exoplanet to print a report for");
            return None;
        };

        let name = name.clone();
        let api = api.clone();
        let sender = sender.clone();
        let task = async move {
            match api.print_report(&name).await {
                Ok(pdf) => {
                    tracing::info!(%name, num_bytes = pdf.len(), "downloaded report");
                    sender.deliver(pdf);
                }
                Err(error) => tracing::error!(?error, %name, "could not download report"),
            }
        };
        Some(task.boxed_local())
    }

    pub fn take_report(&mut self) -> Option<Bytes> {
        self.report.take()
    }

    fn orientation(&self) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), self.pitch)
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.yaw)
    }

    fn rotate(&mut self, delta: Vector2<f32>) {
        self.yaw -= delta.x * self.config.rotation_speed;
        self.pitch -= delta.y * self.config.rotation_speed;
        self.camera.transform = Transform::from_parts(Point3::origin(), self.orientation());
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
            Intent::Rotate(delta) => self.rotate(delta),
            // panning is off for the sky view
            Intent::Pan(_) => {}
            Intent::Zoom(delta_y) => self.camera.projection.zoom(delta_y),
            Intent::Hover(position) => {
                let tooltip = self
                    .pick(position)
                    .and_then(|point| point.magnitude)
                    .map(|vmag| {
                        Tooltip {
                            text: format!("Vmag: {vmag}"),
                            position,
                        }
                    });
                self.interaction.hover(tooltip);
            }
            Intent::Pick(position) => {
                let hit = self.pick(position);
                let text = hit
                    .as_ref()
                    .and_then(|point| point.magnitude)
                    .map(|vmag| format!("Clicked on star: Vmag {vmag}"));
                let outcome = self.interaction.click(hit, text, position);
                tracing::trace!(?outcome, "sky click");
            }
        }
    }
}

impl Page for PlanetPage {
    fn mount(&mut self, clients: &Clients) -> Option<LoadTask> {
        tracing::debug!(exoplanet = ?self.exoplanet, "mounting planet view");
        self.listeners = Listeners::all();
        self.api = Some(clients.api.clone());

        let (report_sender, reports) = load_channel();
        self.report_sender = Some(report_sender);
        self.reports = Some(reports);

        let (sender, receiver) = load_channel();
        self.stars = Some(receiver);

        let task = match &self.exoplanet {
            Some(name) => {
                let api = clients.api.clone();
                let name = name.clone();
                async move {
                    match api.get_planet_stars(&name).await {
                        Ok(catalog) => {
                            sender.deliver(catalog);
                        }
                        Err(error) => tracing::error!(?error, %name, "could not load planet sky"),
                    }
                }
                .boxed_local()
            }
            None => {
                let asset_client = clients.assets.clone();
                async move {
                    match asset_client.get_json::<StarCatalog>(assets::EARTH_STARS).await {
                        Ok(catalog) => {
                            sender.deliver(catalog);
                        }
                        Err(error) => tracing::error!(?error, "could not load earth sky"),
                    }
                }
                .boxed_local()
            }
        };
        Some(task)
    }

    fn unmount(&mut self) {
        tracing::debug!("unmounting planet view");
        self.listeners = Listeners::empty();
        self.api = None;
        self.stars = None;
        self.report_sender = None;
        self.reports = None;
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

    fn frame(&mut self, _dt: Duration) {
        let loaded = self
            .stars
            .as_mut()
            .map(LoadReceiver::drain)
            .unwrap_or_default();
        for catalog in loaded {
            self.on_loaded(catalog);
        }

        if let Some(pdf) = self.reports.as_mut().and_then(LoadReceiver::try_next) {
            self.report = Some(pdf);
        }
    }

    fn scene(&self) -> Option<Scene<'_>> {
        Some(
            Scene::new(&self.camera)
                .with_clouds(&self.clouds)
                .with_grid(self.equatorial_grid.visible_grid())
                .with_grid(self.galactic_grid.visible_grid())
                .with_lines(self.interaction.lines()),
        )
    }
}
