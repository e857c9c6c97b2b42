use super::model::WheelState;
use super::{
    LABEL_FONT_FACTOR, LABEL_RADIUS_FACTOR, POINTER_HEIGHT_FACTOR, POINTER_WIDTH_FACTOR,
    WHEEL_RADIUS_FACTOR,
};
use crate::spin::{SectorLayout, sector_color};
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;

/// Draws the whole wheel at the given rotation (degrees). Pure: the state
/// is read, never mutated.
pub fn draw(
    cr: &Context,
    state: &WheelState,
    width: f64,
    height: f64,
    rotation: f64,
) -> Result<(), cairo::Error> {
    let (cx, cy) = (width / 2.0, height / 2.0);
    let radius = width.min(height) * WHEEL_RADIUS_FACTOR;
    let layout = state.resolver.layout();

    draw_backing_disc(cr, cx, cy, radius)?;
    for index in 0..layout.count() {
        let color = sector_color(&state.palette, index);
        draw_sector(cr, &layout, index, cx, cy, radius, rotation, color)?;
    }
    for index in 0..layout.count() {
        draw_label(cr, &layout, index, &state.label(index), cx, cy, radius, rotation)?;
    }
    draw_pointer(cr, cx, cy, width, height)
}

fn draw_backing_disc(cr: &Context, cx: f64, cy: f64, radius: f64) -> Result<(), cairo::Error> {
    cr.set_source_rgb(0.5, 0.5, 0.5);
    cr.arc(cx, cy, radius * 1.02, 0.0, 2.0 * PI);
    cr.fill()
}

#[allow(clippy::too_many_arguments)]
fn draw_sector(
    cr: &Context,
    layout: &SectorLayout,
    index: usize,
    cx: f64,
    cy: f64,
    radius: f64,
    rotation: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    // Sector 0 sits under the top pointer at rotation 0; cairo measures
    // angles from the +x axis, hence the -90 degree shift.
    let center = rotation + layout.start_angle(index) - 90.0;
    let (lo, hi) = layout.arc_bounds(index);

    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.move_to(cx, cy);
    cr.arc(
        cx,
        cy,
        radius,
        (center + lo).to_radians(),
        (center + hi).to_radians(),
    );
    cr.close_path();
    cr.fill()
}

#[allow(clippy::too_many_arguments)]
fn draw_label(
    cr: &Context,
    layout: &SectorLayout,
    index: usize,
    text: &str,
    cx: f64,
    cy: f64,
    radius: f64,
    rotation: f64,
) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.translate(cx, cy);
    cr.rotate((rotation + layout.start_angle(index)).to_radians());

    cr.set_source_rgb(1.0, 1.0, 1.0);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(radius * LABEL_FONT_FACTOR);
    if let Ok(ext) = cr.text_extents(text) {
        cr.move_to(
            -ext.width() / 2.0,
            -(radius * LABEL_RADIUS_FACTOR) + ext.height() / 2.0,
        );
        cr.show_text(text)?;
    }
    cr.restore()
}

/// The fixed marker over the winning sector: an upward triangle closing
/// into a half-disc base, centered on the wheel.
fn draw_pointer(
    cr: &Context,
    cx: f64,
    cy: f64,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let half_width = width * POINTER_WIDTH_FACTOR / 2.0;
    let half_height = height * POINTER_HEIGHT_FACTOR / 2.0;

    cr.set_source_rgb(1.0, 1.0, 1.0);
    cr.move_to(cx, cy - half_height);
    cr.line_to(cx + half_width, cy);
    cr.arc(cx, cy, half_width, 0.0, PI);
    cr.close_path();
    cr.fill()
}
