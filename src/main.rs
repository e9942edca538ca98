use std::time::Duration;

use config::{
    Settings, ViewSettings, ALTERNATE_COLOR, ALTERNATE_THICKNESS, BACKGROUND_COLOR, CAPTION,
    FRAME_RATE, LINE_THICKNESS, MAX_COUNT, SCREEN_SIZE, SNOWFLAKE_COLOR,
};
use eframe::{
    egui::{
        self, pos2, vec2, Align2, CollapsingHeader, Color32, FontId, Frame, Pos2, Rect, Shadow,
        Slider,
    },
    epaint::PathShape,
};
use geom::{Point, Segment};
use input::InputEvent;
use state::{AppState, FrameClock, LoopState};

mod config;
#[cfg(not(target_arch = "wasm32"))]
mod export;
mod geom;
mod input;
mod state;
mod symmetry;

/// Native main function
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        follow_system_theme: false,
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(SCREEN_SIZE)
            .with_title(CAPTION),
        ..Default::default()
    };

    eframe::run_native(
        CAPTION,
        native_options,
        Box::new(|cc| Ok(Box::new(App::new(cc)))),
    )
}

/// Web main function
#[cfg(target_arch = "wasm32")]
fn main() {
    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let start_result = eframe::WebRunner::new()
            .start(
                "eframe_canvas",
                web_options,
                Box::new(|cc| Ok(Box::new(App::new(cc)))),
            )
            .await;

        // Remove the loading text and spinner:
        let loading_text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("loading_text"));
        if let Some(loading_text) = loading_text {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p> The app has crashed. See the developer console for details. </p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

const HELP_TEXT: &str = "Draw within the bounds of the slice. Press Delete to clear the snowflake.";
const KEYS_TEXT: &str = "M: mirror   R: spin   Tab / Up / Down: slices   S: export PNG";
const ARC_SAMPLE_COUNT: usize = 48;

struct App {
    state: AppState,
    view_settings: ViewSettings,
    clock: FrameClock,
    /// Result of the last export, shown in the status line.
    status: Option<String>,
}
impl App {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let Settings {
            symmetry,
            spinning,
            view_settings,
        } = Settings::new();

        Self {
            state: AppState::new(symmetry, spinning),
            view_settings,
            clock: FrameClock::new(FRAME_RATE),
            status: None,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn export(&mut self) {
        let spin = self.state.spin.radians();
        let result = export::save_png(self.state.render_set(), spin, std::path::Path::new("."));
        self.status = Some(match result {
            Ok(path) => format!("Saved {}", path.display()),
            Err(e) => {
                log::error!("Export failed: {e}");
                format!("Export failed: {e}")
            }
        });
    }

    #[cfg(target_arch = "wasm32")]
    fn export(&mut self) {
        log::warn!("Export requested in the browser");
        self.status = Some("Export is not available in the browser".to_string());
    }

    fn status_line(&self) -> String {
        let on_off = |b: bool| if b { "on" } else { "off" };
        let loop_state = match self.state.loop_state() {
            LoopState::Idle => "idle",
            LoopState::Drawing => "drawing",
            LoopState::Spinning => "spinning",
        };
        let mut line = format!(
            "Slices: {}   Mirror: {}   Spin: {}   ({loop_state})",
            self.state.symmetry.count(),
            on_off(self.state.symmetry.mirror),
            on_off(self.state.spinning),
        );
        if let Some(status) = &self.status {
            line.push_str("   ");
            line.push_str(status);
        }
        line
    }
}
impl eframe::App for App {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        let ticks = self.clock.tick(ctx.input(|i| i.time));
        self.state.advance(ticks, self.view_settings.spin_speed);

        egui::CentralPanel::default()
            .frame(Frame::none().fill(BACKGROUND_COLOR))
            .show(ctx, |ui| {
                let rect = ui.available_rect_before_wrap();
                let (pad, flake) = layout(rect);

                let r = ui.interact(
                    pad.rect(),
                    eframe::egui::Id::new("Pad"),
                    egui::Sense::click_and_drag(),
                );

                let events =
                    input::poll(ctx, &r, self.state.capture.is_active(), |pos| pad.to_geom(pos));
                for event in events {
                    match event {
                        InputEvent::Export => self.export(),
                        event => self.state.apply(event),
                    }
                }

                let painter = ui.painter();
                let arc = self.state.arc();
                let spin = self.state.spin.radians();

                // Drawing pad
                painter.circle_stroke(
                    pad.center,
                    pad.radius,
                    (ALTERNATE_THICKNESS, ALTERNATE_COLOR),
                );
                let points = (0..=ARC_SAMPLE_COUNT)
                    .map(|i| arc * i as f64 / ARC_SAMPLE_COUNT as f64)
                    .map(|theta| pad.to_screen(Point::from_polar(1., theta)))
                    .collect();
                painter.add(PathShape {
                    points,
                    closed: false,
                    fill: Color32::TRANSPARENT,
                    stroke: (LINE_THICKNESS, ALTERNATE_COLOR).into(),
                });
                for theta in [0., arc] {
                    painter.line_segment(
                        [pad.center, pad.to_screen(Point::from_polar(1., theta))],
                        (LINE_THICKNESS, ALTERNATE_COLOR),
                    );
                }
                for &segment in &self.state.slice {
                    pad.draw(painter, segment, LINE_THICKNESS, ALTERNATE_COLOR);
                }

                // Snowflake
                painter.circle_stroke(
                    flake.center,
                    flake.radius,
                    (ALTERNATE_THICKNESS, SNOWFLAKE_COLOR),
                );
                for segment in self.state.render_set() {
                    flake.draw(painter, segment.rotate(spin), LINE_THICKNESS, SNOWFLAKE_COLOR);
                }
                if self.view_settings.overlay {
                    for segment in &self.state.slice {
                        flake.draw(
                            painter,
                            segment.rotate(spin),
                            ALTERNATE_THICKNESS,
                            ALTERNATE_COLOR,
                        );
                    }
                }

                // Help and status
                let font = FontId::proportional(16.);
                painter.text(
                    rect.left_bottom() + vec2(20., -20.),
                    Align2::LEFT_BOTTOM,
                    self.status_line(),
                    font.clone(),
                    ALTERNATE_COLOR,
                );
                painter.text(
                    rect.left_bottom() + vec2(20., -44.),
                    Align2::LEFT_BOTTOM,
                    KEYS_TEXT,
                    font.clone(),
                    ALTERNATE_COLOR,
                );
                painter.text(
                    rect.center_top() + vec2(0., 20.),
                    Align2::CENTER_TOP,
                    HELP_TEXT,
                    font,
                    ALTERNATE_COLOR,
                );

                // Settings menu
                let mut export = false;
                Frame::popup(ui.style())
                    .outer_margin(10.)
                    .shadow(Shadow::NONE)
                    .show(ui, |ui| {
                        CollapsingHeader::new("Settings").show(ui, |ui| {
                            ui.horizontal(|ui| {
                                let mut count = self.state.symmetry.count();
                                if ui.add(Slider::new(&mut count, 1..=MAX_COUNT)).changed() {
                                    self.state.set_count(count);
                                };
                                ui.label("Slices");
                            });
                            if ui
                                .checkbox(&mut self.state.symmetry.mirror, "Mirror")
                                .changed()
                            {
                                log::debug!("Mirror: {}", self.state.symmetry.mirror);
                                self.state.invalidate();
                            }
                            ui.checkbox(&mut self.state.spinning, "Spin");
                            ui.horizontal(|ui| {
                                ui.add(Slider::new(
                                    &mut self.view_settings.spin_speed,
                                    -3.0..=3.0,
                                ));
                                ui.label("Spin Speed");
                            });
                            ui.checkbox(&mut self.view_settings.overlay, "Show slice on snowflake");
                            ui.horizontal(|ui| {
                                if ui.button("Clear").clicked() {
                                    self.state.apply(InputEvent::Reset);
                                }
                                if ui.button("Export PNG").clicked() {
                                    export = true;
                                }
                            });
                        })
                    });
                if export {
                    self.export();
                }
            });

        if self.state.spinning {
            ctx.request_repaint_after(Duration::from_secs_f64(self.clock.interval()));
        }
    }
}

/// A circle on screen holding geometry in unit coordinates.
#[derive(Debug, Copy, Clone)]
struct Disc {
    center: Pos2,
    radius: f32,
}
impl Disc {
    fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, vec2(2. * self.radius, 2. * self.radius))
    }

    fn to_screen(&self, point: Point) -> Pos2 {
        pos2(point.x as f32, -point.y as f32) * self.radius + self.center.to_vec2()
    }

    fn to_geom(&self, pos: Pos2) -> Point {
        let pos = (pos - self.center.to_vec2()) / self.radius;
        Point::new(pos.x as f64, -pos.y as f64)
    }

    fn draw(&self, painter: &egui::Painter, segment: Segment, width: f32, color: Color32) {
        painter.line_segment(
            [self.to_screen(segment.start), self.to_screen(segment.end)],
            (width, color),
        );
    }
}

/// Splits the window into the drawing pad (left) and the snowflake (right).
fn layout(rect: Rect) -> (Disc, Disc) {
    let half = rect.width() / 2.;
    let radius = (half.min(rect.height()) * 0.4).max(1.);
    let pad = Disc {
        center: pos2(rect.left() + half / 2., rect.center().y),
        radius,
    };
    let flake = Disc {
        center: pos2(rect.left() + 1.5 * half, rect.center().y),
        radius: radius * 0.9,
    };
    (pad, flake)
}
