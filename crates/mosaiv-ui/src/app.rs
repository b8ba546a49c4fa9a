use std::path::Path;

use iced::widget::{button, checkbox, column, container, image as preview_image, row, slider, text};
use iced::{Element, Length, Task};

use mosaiv_core::config::AppConfig;
use mosaiv_core::scaler::{Bitmap, Viewport};
use mosaiv_engine::decoder::ImageRsCodec;
use mosaiv_engine::mosaic::{SeedMode, VoronoiMosaic};
use mosaiv_engine::session::Session;

use crate::message::Message;
use crate::upload;

const CONFIG_FILE: &str = "mosaiv.json";

pub struct App {
    pub(crate) session: Session,
    pub(crate) config: AppConfig,
    pub(crate) viewport: Viewport,
    pub(crate) codec: ImageRsCodec,
    pub(crate) mosaic: VoronoiMosaic,
    pub(crate) cell_count: u32,
    pub(crate) random_seeds: bool,
    pub(crate) preview: Option<preview_image::Handle>,
    pub(crate) status_message: String,
}

impl App {
    pub fn boot() -> (Self, Task<Message>) {
        let config = AppConfig::load_or_default(Path::new(CONFIG_FILE));
        (Self::with_config(config), Task::none())
    }

    pub fn with_config(mut config: AppConfig) -> Self {
        // A hand-edited config file must not be able to zero these out.
        config.cell_count_cap = config.cell_count_cap.max(1);
        let viewport = Viewport::new(config.max_display_width, config.max_display_height)
            .unwrap_or_else(|e| {
                log::warn!("config viewport rejected ({e}), falling back to defaults");
                let defaults = AppConfig::default();
                Viewport::new(defaults.max_display_width, defaults.max_display_height)
                    .expect("default viewport bounds are nonzero")
            });

        Self {
            session: Session::from_config(&config),
            cell_count: config.default_cell_count.clamp(1, config.cell_count_cap),
            config,
            viewport,
            codec: ImageRsCodec,
            mosaic: VoronoiMosaic::default(),
            random_seeds: false,
            preview: None,
            status_message: String::new(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenFileDialog => {
                self.status_message = "Choosing an image...".into();
                Task::perform(pick_image(), Message::FilePicked)
            }
            Message::FilePicked(None) => {
                self.status_message = "Open cancelled".into();
                Task::none()
            }
            Message::FilePicked(Some((name, bytes))) => {
                match upload::ingest(&mut self.session, &self.codec, &name, &bytes) {
                    Ok(()) => {
                        if let Some(source) = self.session.source() {
                            self.status_message = format!(
                                "Loaded {} ({}x{})",
                                source.name, source.width, source.height
                            );
                        }
                        self.show_source();
                    }
                    Err(e) => {
                        self.status_message = format!("Load failed: {e}");
                    }
                }
                Task::none()
            }
            Message::CellCountChanged(value) => {
                self.cell_count = value;
                Task::none()
            }
            Message::RandomSeedsToggled(value) => {
                self.random_seeds = value;
                Task::none()
            }
            Message::ApplyMosaic => {
                let seed_mode = if self.random_seeds {
                    SeedMode::Randomized
                } else {
                    SeedMode::Deterministic
                };
                let result = self.session.apply_mosaic(
                    &self.mosaic,
                    seed_mode,
                    self.cell_count,
                    self.config.cell_count_cap,
                    self.viewport,
                );
                match result {
                    Ok(bitmap) => {
                        self.set_preview(bitmap);
                        self.status_message = format!("Mosaic applied ({} cells)", self.cell_count);
                    }
                    Err(e) => {
                        self.status_message = format!("Mosaic failed: {e}");
                    }
                }
                Task::none()
            }
            Message::ShowSource => {
                self.show_source();
                Task::none()
            }
            Message::ClearImage => {
                match self.session.clear() {
                    Ok(()) => {
                        self.preview = None;
                        self.status_message = "Image cleared".into();
                    }
                    Err(e) => {
                        self.status_message = format!("Clear failed: {e}");
                    }
                }
                Task::none()
            }
            Message::Exit => iced::exit(),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let has_source = self.session.source().is_some();

        let controls = row![
            button("Open Image...").on_press(Message::OpenFileDialog),
            checkbox(self.random_seeds).label("Random seeds").on_toggle(Message::RandomSeedsToggled),
            text(format!("Cells: {}", self.cell_count)),
            slider(
                1..=self.config.cell_count_cap,
                self.cell_count,
                Message::CellCountChanged
            )
            .width(Length::Fixed(220.0)),
            button("Apply Mosaic").on_press_maybe(has_source.then_some(Message::ApplyMosaic)),
            button("Show Source").on_press_maybe(has_source.then_some(Message::ShowSource)),
            button("Clear").on_press_maybe(has_source.then_some(Message::ClearImage)),
        ]
        .spacing(8)
        .padding(8);

        let preview: Element<'_, Message> = match &self.preview {
            Some(handle) => preview_image(handle.clone()).into(),
            None => text("Open an image to begin").into(),
        };

        column![
            controls,
            container(preview).center(Length::Fill),
            text(&self.status_message).size(14),
        ]
        .into()
    }

    fn show_source(&mut self) {
        match self.session.render_source(self.viewport) {
            Ok(bitmap) => self.set_preview(bitmap),
            Err(e) => {
                self.status_message = format!("Render failed: {e}");
            }
        }
    }

    fn set_preview(&mut self, bitmap: Bitmap) {
        self.preview = Some(preview_image::Handle::from_rgba(
            bitmap.width(),
            bitmap.height(),
            bitmap.into_data(),
        ));
    }
}

async fn pick_image() -> Option<(String, Vec<u8>)> {
    let file = rfd::AsyncFileDialog::new()
        .add_filter("Images", &["png", "jpg", "jpeg"])
        .pick_file()
        .await?;
    let name = file.file_name();
    let bytes = file.read().await;
    Some((name, bytes))
}
