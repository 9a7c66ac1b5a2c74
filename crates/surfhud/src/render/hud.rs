//! Panel layout and text formatting.

use crate::error::Result;
use crate::overlay::{Canvas, PANEL_HEIGHT, PANEL_WIDTH, Point, Rect, Rgb, TextStyle};
use crate::telemetry::{Snapshot, Vec3};

pub const TITLE_BAR_HEIGHT: i32 = 24;

const BODY_COLOR: Rgb = Rgb(30, 30, 30);
const BORDER_COLOR: Rgb = Rgb(100, 100, 100);
const TITLE_BAR_COLOR: Rgb = Rgb(50, 50, 50);
const TITLE_COLOR: Rgb = Rgb(200, 200, 255);
const COORDS_COLOR: Rgb = Rgb(200, 200, 255);
const VELOCITY_COLOR: Rgb = Rgb::WHITE;
const SPEED_COLOR: Rgb = Rgb(180, 255, 180);

const TITLE_SIZE: i32 = 16;
const TEXT_LEFT: i32 = 6;
const COORDS_TOP: i32 = 26;
const LINE_HEIGHT: i32 = 16;

fn format_vec3(v: Vec3) -> String {
    format!("{:.1}, {:.1}, {:.1}", v.x, v.y, v.z)
}

pub fn format_coords(position: Vec3) -> String {
    format!("Coords: {}", format_vec3(position))
}

pub fn format_velocity(velocity: Vec3) -> String {
    format!("Velocity: {}", format_vec3(velocity))
}

pub fn format_speed(speed: f32) -> String {
    format!("Speed: {:.1} u/s", speed)
}

/// Draw the telemetry panel with its top-left corner at `origin`.
///
/// Order: body, border, title bar, title, then the coordinate, velocity and
/// speed lines.
pub fn draw_panel<C: Canvas + ?Sized>(
    canvas: &mut C,
    origin: Point,
    title: &str,
    snapshot: &Snapshot,
) -> Result<()> {
    let bounds = Rect::at(origin, PANEL_WIDTH, PANEL_HEIGHT);

    canvas.fill_rect(bounds, BODY_COLOR)?;
    canvas.draw_box(bounds, BORDER_COLOR)?;
    canvas.fill_rect(Rect::at(origin, PANEL_WIDTH, TITLE_BAR_HEIGHT), TITLE_BAR_COLOR)?;
    canvas.draw_text(
        title,
        origin.offset(PANEL_WIDTH / 2, 4),
        TextStyle::default()
            .color(TITLE_COLOR)
            .size(TITLE_SIZE)
            .centered(),
    )?;

    let lines = [
        (format_coords(snapshot.position), COORDS_COLOR),
        (format_velocity(snapshot.velocity), VELOCITY_COLOR),
        (format_speed(snapshot.speed), SPEED_COLOR),
    ];
    for (i, (text, color)) in lines.iter().enumerate() {
        let top = COORDS_TOP + LINE_HEIGHT * i as i32;
        canvas.draw_text(
            text,
            origin.offset(TEXT_LEFT, top),
            TextStyle::default().color(*color),
        )?;
    }

    Ok(())
}
