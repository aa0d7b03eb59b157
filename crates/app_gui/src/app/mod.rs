//! Window state and event wiring. All classification state lives in the
//! core [`Session`]; this module only renders it and forwards events.

mod results;

use eframe::{App, Frame, egui};
use flora_core::{
    CLASS_LABELS, Effect, Event, FloraError, FrameSource, ModelRegistry, PairingPolicy, Session,
    SessionConfig,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rfd::FileDialog;
use std::time::Duration;

/// Accent green used across the theme, matching the original styling.
pub(crate) const ACCENT: egui::Color32 = egui::Color32::from_rgb(76, 175, 80);

const IMAGE_PANEL_SIZE: f32 = 380.0;
const FRAME_INTERVAL: Duration = Duration::from_millis(30);

pub struct UiApp {
    session: Session<StdRng>,
    texture: Option<egui::TextureHandle>,
    error_dialog: Option<ErrorDialog>,
    status: String,
}

/// Contents of the blocking load-error modal.
struct ErrorDialog {
    path: String,
    kind: &'static str,
    message: String,
}

impl ErrorDialog {
    fn from_error(err: &FloraError) -> Self {
        Self {
            path: err
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

fn open_camera() -> Result<Box<dyn FrameSource>, FloraError> {
    #[cfg(feature = "camera")]
    {
        Ok(Box::new(flora_core::OpenCvSource::open()?))
    }
    #[cfg(not(feature = "camera"))]
    {
        Ok(Box::new(flora_core::TestPatternSource::default()))
    }
}

impl UiApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        apply_theme(&cc.egui_ctx);
        let session = Session::new(
            ModelRegistry::builtin(),
            CLASS_LABELS.iter().map(|s| s.to_string()).collect(),
            SessionConfig::default(),
            StdRng::from_os_rng(),
            Box::new(open_camera),
        );
        Self {
            session,
            texture: None,
            error_dialog: None,
            status: String::new(),
        }
    }

    /// Forward one event to the session and apply the resulting effects to
    /// the widgets. Load errors land in the modal, with the display and
    /// table already cleared by the session.
    fn dispatch(&mut self, ctx: &egui::Context, event: Event) {
        match self.session.apply(event) {
            Ok(effects) => {
                for effect in effects {
                    match effect {
                        Effect::ImageShown => self.refresh_texture(ctx),
                        Effect::ImageCleared => self.texture = None,
                        Effect::CameraStarted => {
                            self.status = "Camera running".to_string();
                        }
                        Effect::CameraStopped => {
                            self.status = "Camera stopped".to_string();
                        }
                        Effect::ResultsUpdated | Effect::ResultsCleared => {}
                    }
                }
            }
            Err(e) => {
                tracing::warn!("event failed: {e}");
                self.texture = None;
                self.error_dialog = Some(ErrorDialog::from_error(&e));
            }
        }
    }

    fn refresh_texture(&mut self, ctx: &egui::Context) {
        if let Some(img) = self.session.display() {
            let size = [img.width as usize, img.height as usize];
            let color = egui::ColorImage::from_rgba_unmultiplied(size, &img.pixels);
            self.texture = Some(ctx.load_texture("display", color, egui::TextureOptions::LINEAR));
        }
    }

    fn render_error_modal(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &self.error_dialog else {
            return;
        };
        let mut dismissed = false;
        egui::Modal::new(egui::Id::new("load-error")).show(ctx, |ui| {
            ui.heading("Image load failed");
            ui.add_space(6.0);
            if !dialog.path.is_empty() {
                ui.label(format!("Path: {}", dialog.path));
            }
            ui.label(format!("Error kind: {}", dialog.kind));
            ui.label(format!("Details: {}", dialog.message));
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
        if dismissed {
            self.error_dialog = None;
        }
    }

    fn render_left_panel(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.label("Select model:");
        let mut selected = self.session.current_model().to_string();
        egui::ComboBox::from_id_salt("model-select")
            .selected_text(selected.clone())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for profile in self.session.registry().profiles() {
                    ui.selectable_value(&mut selected, profile.name.clone(), &profile.name);
                }
            });
        if selected != self.session.current_model() {
            self.dispatch(ctx, Event::SelectModel(selected));
        }

        ui.add_space(6.0);
        ui.label("Label pairing:");
        let mut pairing = self.session.config().pairing;
        egui::ComboBox::from_id_salt("pairing-select")
            .selected_text(pairing.display_name())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for policy in [PairingPolicy::Paired, PairingPolicy::Independent] {
                    ui.selectable_value(&mut pairing, policy, policy.display_name());
                }
            });
        if pairing != self.session.config().pairing {
            self.dispatch(ctx, Event::SetPairing(pairing));
        }

        ui.add_space(20.0);
        let desired = egui::Vec2::splat(IMAGE_PANEL_SIZE);
        if let Some(tex) = &self.texture {
            ui.add(egui::Image::new(tex).max_size(desired));
        } else {
            let (rect, _) = ui.allocate_exact_size(desired, egui::Sense::hover());
            ui.painter()
                .rect_filled(rect, 10.0, egui::Color32::from_rgb(46, 46, 46));
        }

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            let busy = self.error_dialog.is_some();
            if ui
                .add_enabled(!busy, egui::Button::new("Upload image"))
                .clicked()
                && let Some(path) = FileDialog::new()
                    .add_filter("Image Files", &["png", "jpg", "jpeg"])
                    .pick_file()
            {
                self.dispatch(ctx, Event::LoadImage(path));
            }

            let camera_label = if self.session.camera_active() {
                "Stop camera"
            } else {
                "Start camera"
            };
            if ui
                .add_enabled(!busy, egui::Button::new(camera_label))
                .clicked()
            {
                self.dispatch(ctx, Event::ToggleCamera);
            }
        });
    }
}

impl App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // The capture "timer": one frame per repaint while the camera runs,
        // paced at roughly the original's 30 ms cadence.
        if self.session.camera_active() && self.error_dialog.is_none() {
            self.dispatch(ctx, Event::FrameTick);
            ctx.request_repaint_after(FRAME_INTERVAL);
        }

        egui::SidePanel::left("controls")
            .min_width(420.0)
            .show(ctx, |ui| {
                self.render_left_panel(ctx, ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_results_panel(ui);
        });

        self.render_error_modal(ctx);
    }
}

fn apply_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();
    visuals.selection.bg_fill = ACCENT;
    visuals.hyperlink_color = ACCENT;
    visuals.widgets.hovered.bg_fill = ACCENT.gamma_multiply(0.2);
    ctx.set_visuals(visuals);
}
