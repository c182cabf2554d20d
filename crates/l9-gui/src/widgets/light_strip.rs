//! Decorative marquee light strip

use iced::advanced::layout::{self, Layout};
use iced::advanced::renderer;
use iced::advanced::widget::{self, Widget};
use iced::{mouse, Element, Length, Rectangle, Size};

use crate::theme::{light_color, Palette, Sizes};

/// Lights per strip
pub const LIGHT_COUNT: usize = 12;

/// Animation delay between neighbouring lights (ms)
pub const LIGHT_STAGGER_MS: u64 = 100;

/// Length of one pulse (ms)
pub const LIGHT_PERIOD_MS: u64 = 1000;

/// Brightness of an idle strip
pub const LIGHT_IDLE_LEVEL: f32 = 0.3;

/// Brightness (0.0 to 1.0) of light `index`, `elapsed_ms` into the animation
///
/// Light `i` starts pulsing `i × 100ms` after the first one; until then it
/// sits at the idle level.
pub fn light_level(index: usize, elapsed_ms: u64, animate: bool) -> f32 {
    let offset = index as u64 * LIGHT_STAGGER_MS;
    if !animate || elapsed_ms < offset {
        return LIGHT_IDLE_LEVEL;
    }

    let t = ((elapsed_ms - offset) % LIGHT_PERIOD_MS) as f32 / LIGHT_PERIOD_MS as f32;
    0.5 + 0.5 * (t * std::f32::consts::TAU).cos()
}

/// Row of pulsing lights
pub struct LightStrip {
    count: usize,
    elapsed_ms: u64,
    animate: bool,
    light_size: f32,
    spacing: f32,
}

impl LightStrip {
    pub fn new(elapsed_ms: u64) -> Self {
        Self {
            count: LIGHT_COUNT,
            elapsed_ms,
            animate: false,
            light_size: Sizes::LIGHT_SIZE,
            spacing: Sizes::LIGHT_SIZE,
        }
    }

    pub fn animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    fn width(&self) -> f32 {
        let n = self.count as f32;
        n * self.light_size + (n + 1.0) * self.spacing
    }

    fn height(&self) -> f32 {
        self.light_size + self.spacing
    }
}

impl<Message, Theme, Renderer> Widget<Message, Theme, Renderer> for LightStrip
where
    Renderer: renderer::Renderer,
{
    fn size(&self) -> Size<Length> {
        Size::new(Length::Fixed(self.width()), Length::Fixed(self.height()))
    }

    fn layout(
        &self,
        _tree: &mut widget::Tree,
        _renderer: &Renderer,
        _limits: &layout::Limits,
    ) -> layout::Node {
        layout::Node::new(Size::new(self.width(), self.height()))
    }

    fn draw(
        &self,
        _tree: &widget::Tree,
        renderer: &mut Renderer,
        _theme: &Theme,
        _style: &renderer::Style,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();

        // Draw rail
        renderer.fill_quad(
            renderer::Quad {
                bounds,
                border: iced::Border {
                    color: Palette::GOLD_DIM,
                    width: 1.0,
                    radius: (bounds.height / 2.0).into(),
                },
                shadow: Default::default(),
            },
            Palette::BG_FRAME,
        );

        // Draw lights
        let y = bounds.y + (bounds.height - self.light_size) / 2.0;
        for i in 0..self.count {
            let light_bounds = Rectangle {
                x: bounds.x + self.spacing + i as f32 * (self.light_size + self.spacing),
                y,
                width: self.light_size,
                height: self.light_size,
            };

            let level = light_level(i, self.elapsed_ms, self.animate);
            renderer.fill_quad(
                renderer::Quad {
                    bounds: light_bounds,
                    border: iced::Border {
                        color: Palette::GOLD_DIM,
                        width: 1.0,
                        radius: (self.light_size / 2.0).into(),
                    },
                    shadow: iced::Shadow {
                        color: if level > 0.6 {
                            Palette::GLOW
                        } else {
                            iced::Color::TRANSPARENT
                        },
                        offset: iced::Vector::new(0.0, 0.0),
                        blur_radius: self.light_size * level,
                    },
                },
                light_color(level),
            );
        }
    }
}

impl<'a, Message, Theme, Renderer> From<LightStrip> for Element<'a, Message, Theme, Renderer>
where
    Renderer: renderer::Renderer + 'a,
    Message: 'a,
    Theme: 'a,
{
    fn from(strip: LightStrip) -> Self {
        Element::new(strip)
    }
}
