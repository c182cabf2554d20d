//! Spin buttons, one per mode

use iced::widget::{button, text, Row};
use iced::{Border, Color, Element, Theme};

use l9_core::ReelCount;
use l9_slot::SlotMachine;

use crate::theme::{lighten, mode_color, Palette, Sizes};
use crate::view::SlotMessage;

/// Message a mode's button sends, or `None` while it is disabled
pub fn spin_action(machine: &SlotMachine, mode: ReelCount) -> Option<SlotMessage> {
    (!machine.is_spinning()).then_some(SlotMessage::Spin(mode))
}

/// Create the row of spin buttons
pub fn spin_buttons<'a>(machine: &SlotMachine) -> Element<'a, SlotMessage> {
    let buttons = ReelCount::ALL.into_iter().map(|mode| {
        let spinning_here = machine.is_spinning() && machine.active_mode() == Some(mode);
        spin_button(
            machine.button_label(mode),
            mode,
            spin_action(machine, mode),
            spinning_here,
        )
    });

    Row::with_children(buttons).spacing(Sizes::SPACING_NORMAL).into()
}

fn spin_button<'a>(
    label: &'static str,
    mode: ReelCount,
    on_press: Option<SlotMessage>,
    spinning_here: bool,
) -> Element<'a, SlotMessage> {
    let base = mode_color(mode);

    button(text(label).size(Sizes::BUTTON_TEXT))
        .on_press_maybe(on_press)
        .padding([10, 18])
        .style(move |_theme: &Theme, status| {
            let (background, text_color) = match status {
                button::Status::Disabled if spinning_here => (Palette::GOLD, Palette::DIGIT),
                button::Status::Disabled => (
                    Color { a: 0.45, ..base },
                    Palette::TEXT_DISABLED,
                ),
                button::Status::Hovered => (lighten(base, 0.15), Palette::TEXT_PRIMARY),
                button::Status::Pressed => (lighten(base, 0.3), Palette::TEXT_PRIMARY),
                button::Status::Active => (base, Palette::TEXT_PRIMARY),
            };

            button::Style {
                background: Some(background.into()),
                text_color,
                border: Border {
                    color: Palette::GOLD_DIM,
                    width: 1.0,
                    radius: 8.0.into(),
                },
                ..Default::default()
            }
        })
        .into()
}
