//! Reel window: one digit slot

use iced::alignment::{Horizontal, Vertical};
use iced::widget::{container, text};
use iced::{Border, Element, Length, Shadow, Theme, Vector};

use l9_slot::Reel;

use crate::theme::{Palette, Sizes};

/// Text shown for a reel; "?" until it has a digit
pub fn reel_label(reel: &Reel) -> String {
    match reel.display() {
        Some(digit) => digit.to_string(),
        None => "?".to_string(),
    }
}

/// Create reel window view
pub fn reel_window<'a, Message: 'a>(reel: &Reel) -> Element<'a, Message> {
    let spinning = reel.is_spinning();
    let digit = text(reel_label(reel))
        .size(Sizes::REEL_DIGIT)
        .color(if spinning {
            Palette::DIGIT_SPINNING
        } else {
            Palette::DIGIT
        });

    container(digit)
        .width(Length::Fixed(Sizes::REEL_WIDTH))
        .height(Length::Fixed(Sizes::REEL_HEIGHT))
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .style(move |_theme: &Theme| container::Style {
            background: Some(Palette::REEL_BG.into()),
            border: Border {
                color: if spinning { Palette::GOLD } else { Palette::GOLD_DIM },
                width: 3.0,
                radius: 10.0.into(),
            },
            // Glow while spinning
            shadow: if spinning {
                Shadow {
                    color: Palette::GLOW,
                    offset: Vector::new(0.0, 0.0),
                    blur_radius: 18.0,
                }
            } else {
                Shadow::default()
            },
            ..Default::default()
        })
        .into()
}
