//! Result readout

use iced::widget::{container, row, text};
use iced::{Border, Element, Theme};

use crate::theme::{Palette, Sizes};

/// Create result readout view, e.g. "Result: 4 - 9 - 0"
pub fn result_display<'a, Message: 'a>(readout: String) -> Element<'a, Message> {
    container(
        row![
            text("Result:")
                .size(Sizes::RESULT_TEXT)
                .color(Palette::TEXT_SECONDARY),
            text(readout).size(Sizes::RESULT_TEXT).color(Palette::GOLD),
        ]
        .spacing(Sizes::SPACING_NORMAL),
    )
    .padding([10, 24])
    .style(|_theme: &Theme| container::Style {
        background: Some(Palette::BG_DEEP.into()),
        border: Border {
            color: Palette::GOLD_DIM,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    })
    .into()
}
