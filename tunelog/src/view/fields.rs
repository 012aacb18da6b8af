//! Field panel: toggle buttons for every channel in the log.

use iced::widget::{Row, button, row, text};
use iced::{Alignment, Element, Theme};

use tunelog_core::FieldSelection;

use crate::message::Message;

/// Render one toggle per catalog entry, highlighted when selected.
pub fn fields_view<'a>(
    catalog: &'a [FieldSelection],
    selection: &[FieldSelection],
    max_fields: usize,
) -> Element<'a, Message> {
    let toggles: Vec<Element<'a, Message>> = catalog
        .iter()
        .map(|field| {
            let is_selected = selection.iter().any(|s| s.name == field.name);
            button(text(field.label.as_str()).size(12))
                .on_press(Message::ToggleField(field.name.clone()))
                .style(if is_selected {
                    iced::widget::button::primary
                } else {
                    iced::widget::button::secondary
                })
                .into()
        })
        .collect();

    let count = text(format!("{}/{} fields", selection.len(), max_fields))
        .size(12)
        .style(|_theme: &Theme| text::Style {
            color: Some(iced::Color::from_rgb(0.5, 0.5, 0.5)),
        });

    row![
        Row::with_children(toggles).spacing(8),
        count,
        button(text("Reset zoom").size(12))
            .on_press(Message::ResetZoom)
            .style(iced::widget::button::secondary),
        button(text("New log").size(12))
            .on_press(Message::Regenerate)
            .style(iced::widget::button::secondary),
    ]
    .spacing(16)
    .align_y(Alignment::Center)
    .into()
}
