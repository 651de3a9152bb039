//! Terminal rendering of the particle clock.
//!
//! The 1920x1080 logical display is drawn onto a braille canvas; labels sit
//! in text rows above and below it.

use motes_core::{
    ClockReading, ColorTheme, DISPLAY_HEIGHT, DISPLAY_WIDTH, Rgba, TimeFormat, ZONE_COUNT,
};
use motes_swarm::{Sprite, SwarmWorld};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Paragraph,
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
    },
};

/// Canvas background.
const BACKGROUND: Rgba = Rgba::rgb(28, 27, 28);

/// Side label color.
const LABEL: Rgba = Rgba::rgb(0xBB, 0xB6, 0xC3);

/// Zone divider colors; the divider drifts between them.
const DIVIDER_LIGHT: Rgba = Rgba::rgb(0xFF, 0xFF, 0xFF);
const DIVIDER_DARK: Rgba = Rgba::rgb(0x4E, 0x58, 0x59);
const DIVIDER_RATE: f32 = 0.008;
const DIVIDER_MAX_BLEND: f32 = 0.3;

/// Sprites at least this heavy also get an outline ring.
const RING_WEIGHT: f32 = 14.0;

const LOADING_TEXT: &str = "INITIALIZING PARTICLE ENGINE...";

/// Everything one frame needs to draw.
pub struct ViewModel<'a> {
    pub world: &'a SwarmWorld,
    pub reading: &'a ClockReading,
    pub location: &'a str,
    /// Faces are still loading.
    pub loading: bool,
    pub time_format: TimeFormat,
    pub color_theme: ColorTheme,
}

fn color(c: Rgba) -> Color {
    let (r, g, b) = c.to_rgb8();
    Color::Rgb(r, g, b)
}

/// Canvas y grows upward; display y grows downward.
fn flip(y: f32) -> f64 {
    (DISPLAY_HEIGHT - y) as f64
}

/// Divider color for a frame.
fn divider_color(frame: u64) -> Rgba {
    let t = ((frame as f32 * DIVIDER_RATE).sin() + 1.0) / 2.0 * DIVIDER_MAX_BLEND;
    DIVIDER_LIGHT.lerp(DIVIDER_DARK, t)
}

/// Draw the whole clock.
pub fn draw(frame: &mut Frame, model: &ViewModel<'_>) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Location labels
        Constraint::Fill(1),   // Particle canvas
        Constraint::Length(1), // Time and date labels
        Constraint::Length(1), // Help text
    ])
    .split(frame.area());

    draw_location_row(frame, chunks[0], model.location);
    draw_canvas(frame, chunks[1], model);
    draw_footer_row(frame, chunks[2], model.reading);
    draw_help(frame, chunks[3], model);
}

fn zone_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::horizontal([Constraint::Ratio(1, ZONE_COUNT as u32); ZONE_COUNT]).split(area)
}

fn draw_location_row(frame: &mut Frame, area: Rect, location: &str) {
    for column in zone_columns(area).iter() {
        let label = Paragraph::new(location.to_string())
            .style(Style::new().fg(color(LABEL)))
            .alignment(Alignment::Right);
        frame.render_widget(label, *column);
    }
}

fn draw_footer_row(frame: &mut Frame, area: Rect, reading: &ClockReading) {
    let time = reading.footer_text();
    let date = reading.date_text();

    for column in zone_columns(area).iter() {
        let [left, right] =
            Layout::horizontal([Constraint::Length(time.len() as u16 + 1), Constraint::Fill(1)])
                .areas(*column);
        frame.render_widget(Paragraph::new(time.clone().white().bold()), left);
        frame.render_widget(
            Paragraph::new(date.clone())
                .style(Style::new().fg(color(LABEL)))
                .alignment(Alignment::Right),
            right,
        );
    }
}

fn draw_canvas(frame: &mut Frame, area: Rect, model: &ViewModel<'_>) {
    let world = model.world;
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(color(BACKGROUND))
        .x_bounds([0.0, DISPLAY_WIDTH as f64])
        .y_bounds([0.0, DISPLAY_HEIGHT as f64])
        .paint(|ctx| {
            draw_dividers(ctx, world.frame());
            for sprite in world.sprites() {
                draw_sprite(ctx, &sprite);
            }
            if model.loading {
                let x = (DISPLAY_WIDTH as f64 - LOADING_TEXT.len() as f64 * 12.0) / 2.0;
                ctx.print(x, DISPLAY_HEIGHT as f64 / 2.0, LOADING_TEXT.white());
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_dividers(ctx: &mut Context<'_>, frame: u64) {
    let zone_width = DISPLAY_WIDTH / ZONE_COUNT as f32;
    let divider = color(divider_color(frame));
    for i in 1..ZONE_COUNT {
        let x = (i as f32 * zone_width) as f64;
        ctx.draw(&CanvasLine {
            x1: x,
            y1: 0.0,
            x2: x,
            y2: DISPLAY_HEIGHT as f64,
            color: divider,
        });
    }
}

fn draw_sprite(ctx: &mut Context<'_>, sprite: &Sprite) {
    let x = sprite.position.x as f64;
    let y = flip(sprite.position.y);
    let fill = color(sprite.color);

    ctx.draw(&Points {
        coords: &[(x, y)],
        color: fill,
    });
    if sprite.weight >= RING_WEIGHT {
        ctx.draw(&Circle {
            x,
            y,
            radius: sprite.weight as f64 / 2.0,
            color: fill,
        });
    }
}

fn draw_help(frame: &mut Frame, area: Rect, model: &ViewModel<'_>) {
    let accent = color(model.color_theme.palette().active);
    let help = Line::from(vec![
        "q".bold().fg(accent),
        " quit  ".dark_gray(),
        "t".bold().fg(accent),
        Span::from(format!(" {} ", model.time_format.label())).dark_gray(),
        " toggle 12/24h  ".dark_gray(),
        "c".bold().fg(accent),
        Span::from(format!(" {} ", model.color_theme.name())).dark_gray(),
        " cycle color".dark_gray(),
    ])
    .centered();
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_divider_color_stays_near_white() {
        for frame in (0..1000).step_by(13) {
            let c = divider_color(frame);
            let furthest = DIVIDER_LIGHT.lerp(DIVIDER_DARK, DIVIDER_MAX_BLEND);
            assert!(c.distance(DIVIDER_LIGHT) <= furthest.distance(DIVIDER_LIGHT) + 1e-3);
        }
    }

    #[test]
    fn test_flip() {
        assert_eq!(flip(0.0), DISPLAY_HEIGHT as f64);
        assert_eq!(flip(DISPLAY_HEIGHT), 0.0);
    }

    #[test]
    fn test_draw_shows_labels() {
        let world = SwarmWorld::seeded(10, ColorTheme::Moss.palette(), 5);
        let reading = ClockReading {
            hour: 9,
            minute: 41,
            second: 7,
            day: 9,
            month: 3,
            year: 2024,
            weekday: 6,
        };
        let model = ViewModel {
            world: &world,
            reading: &reading,
            location: "LOCATING...",
            loading: true,
            time_format: TimeFormat::TwentyFourHour,
            color_theme: ColorTheme::Moss,
        };

        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        terminal.draw(|frame| draw(frame, &model)).unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect()
        };
        assert!(row(0).contains("LOCATING..."));
        assert!(row(38).contains("09:41:07"));
        assert!(row(39).contains("quit"));
    }
}
