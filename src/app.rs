use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use egui::{Color32, TextureOptions};

use crate::model::{ShapeId, ShapeModel};
use crate::painter::{EguiPainter, Painter};
use crate::raster;
use crate::shape::Shape;
use crate::tree::{ShapeTree, ShapeTreeAdapter, TreeModel, TreeModelEvent, TreeModelListener};

pub const WORLD_WIDTH: i32 = 640;
pub const WORLD_HEIGHT: i32 = 420;

const MAX_LOGGED_EVENTS: usize = 12;

/// Viewer preferences restored across restarts.
///
/// We derive Deserialize/Serialize so we can persist them on shutdown.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct ViewerSettings {
    pub paused: bool,
    /// Time between two animation steps
    pub frame_millis: u64,
    pub show_tree: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            paused: false,
            frame_millis: 40,
            show_tree: true,
        }
    }
}

/// Keeps the most recent tree notifications for display
#[derive(Debug, Default)]
struct TreeEventLog {
    entries: RefCell<VecDeque<String>>,
}

impl TreeEventLog {
    fn push(&self, entry: String) {
        let mut entries = self.entries.borrow_mut();
        if entries.len() == MAX_LOGGED_EVENTS {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    fn entries(&self) -> Vec<String> {
        self.entries.borrow().iter().cloned().collect()
    }
}

fn describe_tree_event(verb: &str, event: &TreeModelEvent<ShapeId>) -> String {
    let path = event
        .path
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("/");
    format!("{verb} {:?} at {:?} under {path}", event.children, event.child_indices)
}

impl TreeModelListener<ShapeId> for TreeEventLog {
    fn tree_nodes_inserted(&self, _tree: &dyn TreeModel<ShapeId>, event: &TreeModelEvent<ShapeId>) {
        self.push(describe_tree_event("inserted", event));
    }

    fn tree_nodes_removed(&self, _tree: &dyn TreeModel<ShapeId>, event: &TreeModelEvent<ShapeId>) {
        self.push(describe_tree_event("removed", event));
    }
}

/// Animated view of a shape hierarchy with a tree outline beside it
pub struct SpaceShapesApp {
    settings: ViewerSettings,
    model: ShapeModel,
    tree: Rc<ShapeTreeAdapter>,
    event_log: Rc<TreeEventLog>,
    selected: ShapeId,
    // Image shapes only hold texture ids; the handles keep the textures alive.
    textures: Vec<egui::TextureHandle>,
    last_step: f64,
    spawned: i32,
    status: Option<String>,
}

impl std::fmt::Debug for SpaceShapesApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpaceShapesApp")
            .field("settings", &self.settings)
            .field("shapes", &self.model.len())
            .field("selected", &self.selected)
            .field("tree_listeners", &self.tree.listener_count())
            .field("textures", &self.textures.len())
            .finish()
    }
}

impl Default for SpaceShapesApp {
    fn default() -> Self {
        Self::with_settings(ViewerSettings::default())
    }
}

impl SpaceShapesApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::with_settings(settings)
    }

    fn with_settings(settings: ViewerSettings) -> Self {
        let mut model = ShapeModel::with_world(WORLD_WIDTH, WORLD_HEIGHT);
        let tree = ShapeTreeAdapter::observe(&model);
        let event_log = Rc::new(TreeEventLog::default());
        tree.add_tree_model_listener(&event_log);

        populate_demo(&mut model);
        let selected = model.root();

        Self {
            settings,
            model,
            tree,
            event_log,
            selected,
            textures: Vec::new(),
            last_step: 0.0,
            spawned: 0,
            status: None,
        }
    }

    /// The carrier new shapes go into: the selection if it is a carrier,
    /// otherwise the selection's owner, otherwise the root.
    fn target_carrier(&self) -> ShapeId {
        match self.model.shape(self.selected) {
            Some(shape) if shape.is_carrier() => self.selected,
            Some(shape) => shape.owner().unwrap_or(self.model.root()),
            None => self.model.root(),
        }
    }

    /// Adds `shape` to the target carrier. Returns its id when the carrier
    /// accepted it.
    fn spawn(&mut self, shape: Shape) -> Option<ShapeId> {
        self.spawned += 1;
        let speed = 2 + self.spawned % 7;
        let shape = shape.with_velocity(speed, 9 - speed);

        let carrier = self.target_carrier();
        match self.model.adopt(carrier, shape) {
            Ok(id) => {
                if let Some(shape) = self.model.shape(id) {
                    log::info!("Added {} {} to {}", shape, id, carrier);
                }
                self.status = None;
                Some(id)
            }
            Err((err, shape)) => {
                self.status = Some(format!("Cannot add {shape}: {err}"));
                None
            }
        }
    }

    fn remove_selected(&mut self) {
        match self.model.owner(self.selected) {
            Some(owner) => {
                log::info!("Removing {} from {}", self.selected, owner);
                self.model.remove(owner, self.selected);
                self.selected = owner;
            }
            None => self.status = Some("The root cannot be removed".to_owned()),
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            let bytes = match (&file.bytes, &file.path) {
                (Some(bytes), _) => bytes.to_vec(),
                (None, Some(path)) => match std::fs::read(path) {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        log::error!("Failed to read image file: {}: {}", path.display(), err);
                        continue;
                    }
                },
                (None, None) => {
                    log::warn!("Dropped file has no accessible data: {}", file.name);
                    continue;
                }
            };
            self.add_image(ctx, &file.name, &bytes);
        }
    }

    fn add_image(&mut self, ctx: &egui::Context, name: &str, bytes: &[u8]) {
        let carrier = self.target_carrier();
        let (max_width, max_height) = self
            .model
            .shape(carrier)
            .map_or((WORLD_WIDTH, WORLD_HEIGHT), |shape| (shape.width(), shape.height()));

        match raster::load_scaled(bytes, max_width.max(1) as u32, max_height.max(1) as u32) {
            Ok(image) => {
                let [width, height] = image.size;
                let texture = ctx.load_texture(name, image, TextureOptions::default());
                let shape = Shape::image(texture.id(), width as i32, height as i32).with_text(name);
                // A rejected image drops its texture here
                if self.spawn(shape).is_some() {
                    self.textures.push(texture);
                }
            }
            Err(err) => {
                log::warn!("Failed to load image {}: {}", name, err);
                self.status = Some(format!("Cannot load {name}: {err}"));
            }
        }
    }

    fn tree_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Shapes");
        ui.horizontal_wrapped(|ui| {
            if ui.button("Rectangle").clicked() {
                self.spawn(Shape::rectangle());
            }
            if ui.button("Oval").clicked() {
                self.spawn(Shape::oval());
            }
            if ui.button("Hexagon").clicked() {
                self.spawn(Shape::hexagon().with_size(50, 40));
            }
            if ui.button("Dynamic").clicked() {
                self.spawn(Shape::dynamic(Color32::LIGHT_BLUE));
            }
            if ui.button("Carrier").clicked() {
                self.spawn(Shape::carrier().with_size(120, 90));
            }
        });
        if ui.button("Remove selected").clicked() {
            self.remove_selected();
        }
        if let Some(status) = &self.status {
            ui.colored_label(Color32::LIGHT_RED, status.as_str());
        }
        ui.separator();

        let tree = ShapeTree::new(&self.model);
        let mut selected = self.selected;
        egui::ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
            show_node(ui, &tree, tree.root(), &mut selected);
        });
        self.selected = selected;

        ui.separator();
        ui.label("Recent changes");
        for entry in self.event_log.entries() {
            ui.small(entry);
        }
    }
}

/// Renders one node of the outline and, for branches, its children
fn show_node(ui: &mut egui::Ui, tree: &ShapeTree<'_>, node: ShapeId, selected: &mut ShapeId) {
    let label = match tree.model().shape(node) {
        Some(shape) => format!("{node} {shape}"),
        None => node.to_string(),
    };
    if ui.selectable_label(*selected == node, label).clicked() {
        *selected = node;
    }
    if tree.is_leaf(node) {
        return;
    }
    ui.indent(node, |ui| {
        for index in 0..tree.child_count(node) {
            if let Some(child) = tree.child(node, index) {
                show_node(ui, tree, child, selected);
            }
        }
    });
}

/// Builds the hierarchy the viewer starts with
fn populate_demo(model: &mut ShapeModel) {
    fn attach(model: &mut ShapeModel, carrier: ShapeId, shape: Shape) -> Option<ShapeId> {
        match model.adopt(carrier, shape) {
            Ok(id) => Some(id),
            Err((err, shape)) => {
                log::warn!("Skipping demo shape {}: {}", shape, err);
                None
            }
        }
    }

    let root = model.root();

    attach(model, root, Shape::rectangle().at(0, 0).with_velocity(2, 3).with_text("Hi"));
    attach(model, root, Shape::oval().at(40, 60).with_velocity(4, 2));
    attach(model, root, Shape::hexagon().at(120, 30).with_velocity(-3, 4).with_size(60, 45));
    attach(model, root, Shape::dynamic(Color32::LIGHT_BLUE).at(300, 200).with_velocity(5, -3));

    let Some(carrier) = attach(
        model,
        root,
        Shape::carrier().at(200, 100).with_velocity(2, 1).with_size(220, 160).with_text("carrier"),
    ) else {
        return;
    };
    attach(model, carrier, Shape::hexagon().at(10, 10).with_velocity(3, 2));
    if let Some(inner) = attach(model, carrier, Shape::carrier().at(60, 40).with_velocity(-1, 2).with_size(110, 80)) {
        attach(model, inner, Shape::dynamic(Color32::LIGHT_RED).at(5, 5).with_velocity(4, 3));
    }
}

impl eframe::App for SpaceShapesApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        let now = ctx.input(|i| i.time);
        let frame_secs = self.settings.frame_millis as f64 / 1000.0;
        if !self.settings.paused && now - self.last_step >= frame_secs {
            self.model.step(WORLD_WIDTH, WORLD_HEIGHT);
            self.last_step = now;
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.checkbox(&mut self.settings.paused, "Paused");
                ui.checkbox(&mut self.settings.show_tree, "Tree");
                ui.label("Frame (ms):");
                ui.add(egui::Slider::new(&mut self.settings.frame_millis, 10..=500));
            });
        });

        if self.settings.show_tree {
            egui::SidePanel::left("tree").resizable(true).show(ctx, |ui| {
                self.tree_panel(ui);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let size = egui::vec2(WORLD_WIDTH as f32 + 1.0, WORLD_HEIGHT as f32 + 1.0);
            let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
            let mut shape_painter = EguiPainter::new(&painter, response.rect);
            shape_painter.set_color(ui.visuals().text_color());
            self.model.paint_all(&mut shape_painter);
        });

        if !self.settings.paused {
            ctx.request_repaint_after(Duration::from_millis(self.settings.frame_millis));
        }
    }
}
