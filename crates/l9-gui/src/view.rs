//! Slot machine screen

use std::time::Instant;

use iced::alignment::{Horizontal, Vertical};
use iced::widget::{column, container, text, Row};
use iced::{Alignment, Border, Element, Length, Theme};

use l9_core::{Millis, ReelCount};
use l9_slot::SlotMachine;

use crate::theme::{Palette, Sizes};
use crate::widgets::{reel_window, result_display, spin_buttons, LightStrip};

/// Messages produced by the slot machine screen
#[derive(Debug, Clone, Copy)]
pub enum SlotMessage {
    /// Spin button pressed
    Spin(ReelCount),
    /// Frame tick
    Tick(Instant),
}

/// Create the full slot machine view
///
/// `elapsed_ms` drives the light animation only; reel state comes from the
/// machine.
pub fn slot_machine_view<'a>(machine: &SlotMachine, elapsed_ms: Millis) -> Element<'a, SlotMessage> {
    let animate = machine.is_spinning();

    // Header
    let header = column![
        text("Lucky 9").size(Sizes::TITLE).color(Palette::GOLD),
        text("Test Your Fortune")
            .size(Sizes::SUBTITLE)
            .color(Palette::TEXT_SECONDARY),
    ]
    .spacing(Sizes::SPACING_SMALL)
    .align_x(Alignment::Center);

    // Reels
    let reels = Row::with_children(
        machine
            .reels()
            .iter()
            .map(|reel| reel_window::<SlotMessage>(reel)),
    )
    .spacing(Sizes::SPACING_NORMAL);

    let frame = container(reels)
        .padding(20)
        .style(|_theme: &Theme| container::Style {
            background: Some(Palette::BG_FRAME.into()),
            border: Border {
                color: Palette::GOLD,
                width: 4.0,
                radius: 16.0.into(),
            },
            ..Default::default()
        });

    let display = column![
        LightStrip::new(elapsed_ms).animate(animate),
        frame,
        LightStrip::new(elapsed_ms).animate(animate),
    ]
    .spacing(Sizes::SPACING_NORMAL)
    .align_x(Alignment::Center);

    let mut content = column![header, display, spin_buttons(machine)]
        .spacing(Sizes::SPACING_LARGE)
        .align_x(Alignment::Center);

    // Readout only once idle
    if let Some(readout) = machine.readout() {
        content = content.push(result_display(readout));
    }

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .style(|_theme: &Theme| container::Style {
            background: Some(Palette::BG_DEEPEST.into()),
            text_color: Some(Palette::TEXT_PRIMARY),
            ..Default::default()
        })
        .into()
}
