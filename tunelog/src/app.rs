//! TuneLog Iced application.

use iced::widget::{column, text};
use iced::{Element, Length, Task, Theme};

use tunelog_core::{FieldSelection, Pipeline, Sample, ZoomController};

use crate::config::AppConfig;
use crate::demo::{self, DemoLog};
use crate::message::Message;
use crate::view::canvas::{PlotState, plot_view};
use crate::view::fields::fields_view;
use crate::view::legend::legend_view;

/// Fields shown when the configuration does not select any.
const DEFAULT_FIELDS: &[&str] = &["rpm", "map"];

/// The main TuneLog application.
pub struct TuneLog {
    config: AppConfig,
    /// Demo log generator.
    demo: DemoLog,
    /// Every field the user can toggle.
    catalog: Vec<FieldSelection>,
    /// Frame derivation for the current log, selection and zoom.
    pipeline: Pipeline,
    /// Single owner of the zoom transform.
    zoom: ZoomController,
    /// Canvas cache and drawing settings.
    plot: PlotState,
    /// Last selection change that was refused.
    notice: Option<String>,
}

impl TuneLog {
    /// Boot the TuneLog application (called by iced::application).
    pub fn boot(config: AppConfig) -> (Self, Task<Message>) {
        let mut demo = DemoLog::new(config.demo.seed);
        let samples = demo.generate(config.demo.samples);
        (Self::with_log(config, demo, &samples), Task::none())
    }

    /// Create the application around an already loaded log.
    pub fn with_log(config: AppConfig, demo: DemoLog, samples: &[Sample]) -> Self {
        let plot_config = &config.plot;
        let mut pipeline = Pipeline::new(plot_config.viewport(), plot_config.pipeline_options());
        pipeline.set_samples(samples);

        let catalog = demo::catalog();
        let selection = if plot_config.selection.is_empty() {
            catalog
                .iter()
                .filter(|f| DEFAULT_FIELDS.contains(&f.name.as_str()))
                .cloned()
                .collect()
        } else {
            plot_config.selection.clone()
        };

        let mut notice = None;
        if let Err(e) = pipeline.set_selection(selection) {
            tracing::warn!(error = %e, "Configured selection refused");
            notice = Some(e.to_string());
        }

        tracing::info!(
            samples = pipeline.samples().len(),
            fields = pipeline.selection().len(),
            "Log loaded"
        );

        let mut app = Self {
            zoom: ZoomController::new(plot_config.zoom_bounds()),
            plot: PlotState::new(plot_config),
            config,
            demo,
            catalog,
            pipeline,
            notice,
        };
        app.refresh();
        app
    }

    /// Get the window title.
    pub fn title(&self) -> String {
        let k = self.zoom.current().k;
        if k > 1.0 {
            format!("TuneLog - {:.1}x", k)
        } else {
            "TuneLog".to_string()
        }
    }

    /// Handle incoming messages.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Gesture(gesture) => {
                if let Some(transform) = self.zoom.handle(gesture) {
                    self.pipeline.set_transform(Some(transform));
                }
            }

            Message::ResetZoom => {
                let transform = self.zoom.reset();
                self.pipeline.set_transform(Some(transform));
            }

            Message::ToggleField(name) => {
                self.toggle_field(&name);
            }

            Message::Regenerate => {
                let samples = self.demo.generate(self.config.demo.samples);
                self.pipeline.set_samples(&samples);
                tracing::info!(samples = samples.len(), "Generated new demo log");
            }
        }

        self.refresh();
        Task::none()
    }

    /// Render the view.
    pub fn view(&self) -> Element<'_, Message> {
        let frame = self.pipeline.last_frame();

        let mut content = column![
            fields_view(
                &self.catalog,
                self.pipeline.selection(),
                self.pipeline.options().max_fields,
            ),
            plot_view(frame, &self.plot, self.pipeline.viewport()),
        ]
        .spacing(12)
        .padding(16)
        .width(Length::Fill);

        if let Some(frame) = frame {
            content = content.push(legend_view(frame));
        }

        if let Some(ref notice) = self.notice {
            content = content.push(text(notice.as_str()).size(12).style(|_theme: &Theme| {
                text::Style {
                    color: Some(iced::Color::from_rgb(0.9, 0.6, 0.3)),
                }
            }));
        }

        content.into()
    }

    /// Get the application theme.
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Add or remove a catalog field from the selection.
    fn toggle_field(&mut self, name: &str) {
        let mut selection = self.pipeline.selection().to_vec();

        if let Some(pos) = selection.iter().position(|f| f.name == name) {
            selection.remove(pos);
        } else if let Some(field) = self.catalog.iter().find(|f| f.name == name) {
            selection.push(field.clone());
        } else {
            tracing::warn!(field = %name, "Unknown field toggled");
            return;
        }

        match self.pipeline.set_selection(selection) {
            Ok(()) => self.notice = None,
            Err(e) => {
                tracing::warn!(error = %e, "Selection change refused");
                self.notice = Some(e.to_string());
            }
        }
    }

    /// Bring the frame up to date, repainting only when it changed.
    fn refresh(&mut self) {
        let before = self.pipeline.recompute_count();
        self.pipeline.frame();
        if self.pipeline.recompute_count() != before {
            self.plot.invalidate();
        }
    }
}
