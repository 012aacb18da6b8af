//! Canvas-based plot surface: draws the current frame and turns pointer
//! and keyboard input into zoom/pan gestures.

use iced::mouse;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke, Text};
use iced::{Color, Element, Length, Point, Rectangle, Renderer, Size, Theme};

use tunelog_core::{Frame as PlotFrame, Gesture, Hsl, PlotConfig, Viewport, WheelDelta};

use super::formatting::format_time;
use crate::message::Message;

/// Plot background, `#222629`.
pub const BACKGROUND: Color = Color::from_rgb8(0x22, 0x26, 0x29);

/// Approximate number of time ticks along the bottom edge.
const TICK_COUNT: usize = 8;

/// Keyboard zoom step.
const KEY_ZOOM_FACTOR: f64 = 2.0;

/// Drawing settings and the geometry cache for the plot.
#[derive(Debug)]
pub struct PlotState {
    cache: Cache,
    stroke_width: f32,
    show_ticks: bool,
}

impl PlotState {
    pub fn new(config: &PlotConfig) -> Self {
        Self {
            cache: Cache::new(),
            stroke_width: config.stroke_width,
            show_ticks: config.show_ticks,
        }
    }

    /// Drop cached geometry so the next draw repaints.
    pub fn invalidate(&self) {
        self.cache.clear();
    }
}

/// Interaction state for the plot surface.
#[derive(Debug, Clone, Default)]
pub struct PlotInteraction {
    dragging: bool,
}

/// Canvas program drawing one frame.
struct LogCanvas<'a> {
    frame: Option<&'a PlotFrame>,
    plot: &'a PlotState,
    viewport: Viewport,
}

impl<'a> canvas::Program<Message> for LogCanvas<'a> {
    type State = PlotInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let message = match event {
            canvas::Event::Mouse(mouse_event) => {
                self.handle_mouse(interaction, mouse_event, bounds, cursor)
            }
            canvas::Event::Keyboard(keyboard_event) => self.handle_keyboard(keyboard_event),
            _ => None,
        };
        message.map(canvas::Action::publish)
    }

    fn draw(
        &self,
        _interaction: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.plot.cache.draw(renderer, bounds.size(), |frame| {
            self.draw_plot(frame, bounds.size());
        });

        vec![geometry]
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if interaction.dragging {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

impl<'a> LogCanvas<'a> {
    /// Translate mouse events into gestures.
    fn handle_mouse(
        &self,
        interaction: &mut PlotInteraction,
        event: &mouse::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Message> {
        let gesture = match event {
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                let at = cursor.position_in(bounds)?;
                interaction.dragging = true;
                Gesture::DragStart { at: to_viewport(at) }
            }
            mouse::Event::CursorMoved { position } if interaction.dragging => {
                // Keep following the pointer outside the canvas while pressed.
                let local = Point::new(position.x - bounds.x, position.y - bounds.y);
                Gesture::DragMove {
                    to: to_viewport(local),
                }
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) if interaction.dragging => {
                interaction.dragging = false;
                Gesture::DragEnd
            }
            mouse::Event::WheelScrolled { delta } => {
                let at = cursor.position_in(bounds)?;
                let delta = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => WheelDelta::Lines(f64::from(*y)),
                    mouse::ScrollDelta::Pixels { y, .. } => WheelDelta::Pixels(f64::from(*y)),
                };
                Gesture::Wheel {
                    delta,
                    at: to_viewport(at),
                }
            }
            _ => return None,
        };

        Some(Message::Gesture(gesture))
    }

    /// Handle keyboard events: `+`/`-` zoom around the center, `0` resets.
    fn handle_keyboard(&self, event: &iced::keyboard::Event) -> Option<Message> {
        use iced::keyboard::{Event, Key};

        let Event::KeyPressed { key, .. } = event else {
            return None;
        };
        let center = [self.viewport.width / 2.0, self.viewport.height / 2.0];

        match key {
            Key::Character(c) if c.as_str() == "+" || c.as_str() == "=" => {
                Some(Message::Gesture(Gesture::ZoomBy {
                    factor: KEY_ZOOM_FACTOR,
                    at: center,
                }))
            }
            Key::Character(c) if c.as_str() == "-" => Some(Message::Gesture(Gesture::ZoomBy {
                factor: 1.0 / KEY_ZOOM_FACTOR,
                at: center,
            })),
            Key::Character(c) if c.as_str() == "0" => Some(Message::ResetZoom),
            _ => None,
        }
    }

    /// Draw the plot onto the frame.
    fn draw_plot(&self, frame: &mut Frame, size: Size) {
        let background = Path::rectangle(Point::ORIGIN, size);
        frame.fill(&background, BACKGROUND);

        let Some(plot) = self.frame else {
            return;
        };

        if plot.paths().is_empty() {
            let hint = Text {
                content: "Select a field to plot".to_string(),
                position: Point::new(size.width / 2.0 - 70.0, size.height / 2.0),
                color: Color::from_rgb(0.5, 0.5, 0.5),
                size: 16.0.into(),
                ..Text::default()
            };
            frame.fill_text(hint);
            return;
        }

        if self.plot.show_ticks {
            self.draw_ticks(frame, plot, size);
        }

        // Later selections paint over earlier ones.
        for path in plot.paths() {
            if path.points.len() < 2 {
                continue;
            }

            let mut builder = canvas::path::Builder::new();
            let mut points = path.points.iter().map(|p| Point::new(p[0] as f32, p[1] as f32));
            if let Some(first) = points.next() {
                builder.move_to(first);
            }
            for point in points {
                builder.line_to(point);
            }

            frame.stroke(
                &builder.build(),
                Stroke::default()
                    .with_color(to_color(path.color))
                    .with_width(self.plot.stroke_width),
            );
        }
    }

    /// Draw vertical grid lines and time labels.
    fn draw_ticks(&self, frame: &mut Frame, plot: &PlotFrame, size: Size) {
        let grid_color = Color::from_rgba(1.0, 1.0, 1.0, 0.06);
        let label_color = Color::from_rgb(0.5, 0.5, 0.5);
        let x = &plot.scales().x;

        for tick in plot.scales().time_ticks(TICK_COUNT) {
            let px = x.apply(tick) as f32;

            let line = Path::line(Point::new(px, 0.0), Point::new(px, size.height));
            frame.stroke(
                &line,
                Stroke::default().with_color(grid_color).with_width(1.0),
            );

            let label = Text {
                content: format_time(tick),
                position: Point::new(px + 3.0, size.height - 14.0),
                color: label_color,
                size: 10.0.into(),
                ..Text::default()
            };
            frame.fill_text(label);
        }
    }
}

fn to_viewport(point: Point) -> [f64; 2] {
    [f64::from(point.x), f64::from(point.y)]
}

/// Convert a field color for drawing.
pub fn to_color(color: Hsl) -> Color {
    let [r, g, b] = color.to_rgb();
    Color::from_rgb(r, g, b)
}

/// Create the plot element, sized to the viewport.
pub fn plot_view<'a>(
    frame: Option<&'a PlotFrame>,
    plot: &'a PlotState,
    viewport: Viewport,
) -> Element<'a, Message> {
    Canvas::new(LogCanvas {
        frame,
        plot,
        viewport,
    })
    .width(Length::Fixed(viewport.width as f32))
    .height(Length::Fixed(viewport.height as f32))
    .into()
}
