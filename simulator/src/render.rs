//! Paints a [`SceneHost`] element tree onto an embedded-graphics target.
//!
//! Elements draw in creation order (painter's algorithm), parents before
//! children. The widget core keeps all geometry in element-local terms;
//! this module resolves absolute positions and maps abstract styling
//! (fonts, circle-radius sentinel, opacity) onto concrete primitives.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Arc,
    Circle,
    Line,
    PrimitiveStyle,
    Rectangle,
    RoundedRectangle,
};
use embedded_graphics::text::{Baseline, Text, TextStyleBuilder};
use panel_common::host::scene::{ArcData, LineData, Payload, SceneHost, TextData};
use panel_common::host::{ElementId, FontKind, TextAlign, RADIUS_CIRCLE};
use panel_common::Host;
use profont::{PROFONT_12_POINT, PROFONT_9_POINT};

use crate::panel::controls::dim;

fn font_for(kind: FontKind) -> &'static MonoFont<'static> {
    match kind {
        FontKind::Small => &PROFONT_9_POINT,
        FontKind::Body => &PROFONT_12_POINT,
    }
}

/// Draw every visible element of `host`, offset by `origin` (the screen
/// cutout position on the panel).
pub fn draw_scene<D>(display: &mut D, host: &SceneHost, origin: Point)
where
    D: DrawTarget<Color = Rgb888>,
{
    let mut ids: Vec<ElementId> = host.ids().collect();
    ids.sort_by_key(|id| host.seq(*id));

    for id in ids {
        if host.effectively_hidden(id) {
            continue;
        }

        let pos = origin + host.absolute_pos(id);
        let (w, h) = host.computed_size(id);

        match host.payload(id) {
            Some(Payload::Box) => draw_box(display, host, id, pos, w, h),
            Some(Payload::Arc(arc)) => draw_arc(display, arc, pos, w, h),
            Some(Payload::Line(line)) => draw_line(display, line, pos),
            Some(Payload::Text(text)) => draw_text(display, text, pos, w, h),
            None => {}
        }
    }
}

fn draw_box<D>(display: &mut D, host: &SceneHost, id: ElementId, pos: Point, w: i32, h: i32)
where
    D: DrawTarget<Color = Rgb888>,
{
    let Some((color, opacity, radius)) = host.bg(id) else {
        return;
    };
    if opacity == 0 || w <= 0 || h <= 0 {
        return;
    }

    // No alpha compositing on the target; approximate opacity by dimming.
    let color = dim(color, opacity as f32 / 255.0);
    let style = PrimitiveStyle::with_fill(color);
    let rect = Rectangle::new(pos, Size::new(w as u32, h as u32));

    let min_dim = w.min(h);
    if radius == RADIUS_CIRCLE || 2 * radius >= min_dim {
        Circle::with_center(rect.center(), min_dim as u32)
            .into_styled(style)
            .draw(display)
            .ok();
    } else if radius > 0 {
        RoundedRectangle::with_equal_corners(rect, Size::new(radius as u32, radius as u32))
            .into_styled(style)
            .draw(display)
            .ok();
    } else {
        rect.into_styled(style).draw(display).ok();
    }
}

fn draw_arc<D>(display: &mut D, arc: &ArcData, pos: Point, w: i32, h: i32)
where
    D: DrawTarget<Color = Rgb888>,
{
    let min_dim = w.min(h);
    if min_dim <= 0 {
        return;
    }
    let center = pos + Point::new(w / 2, h / 2);

    // Keep the stroke inside the element box.
    let track_width = arc.track_width.max(0) as u32;
    let diameter = (min_dim - arc.track_width.max(arc.span_width)).max(2) as u32;

    if track_width > 0 {
        Arc::with_center(
            center,
            diameter,
            Angle::from_degrees(arc.bg_start_deg),
            Angle::from_degrees(arc.bg_end_deg - arc.bg_start_deg),
        )
        .into_styled(
            PrimitiveStyle::with_stroke(arc.track_color, track_width),
        )
        .draw(display)
        .ok();
    }

    let sweep = arc.span_end_deg - arc.span_start_deg;
    if sweep > 0.0 && arc.span_width > 0 {
        Arc::with_center(
            center,
            diameter,
            Angle::from_degrees(arc.span_start_deg),
            Angle::from_degrees(sweep),
        )
        .into_styled(PrimitiveStyle::with_stroke(
            arc.span_color,
            arc.span_width as u32,
        ))
        .draw(display)
        .ok();
    }
}

fn draw_line<D>(display: &mut D, line: &LineData, pos: Point)
where
    D: DrawTarget<Color = Rgb888>,
{
    if line.width <= 0 {
        return;
    }
    let style = PrimitiveStyle::with_stroke(line.color, line.width as u32);
    Line::new(pos + line.from, pos + line.to)
        .into_styled(style)
        .draw(display)
        .ok();
}

fn draw_text<D>(display: &mut D, text: &TextData, pos: Point, w: i32, h: i32)
where
    D: DrawTarget<Color = Rgb888>,
{
    if text.text.is_empty() || w <= 0 || h <= 0 {
        return;
    }

    let font = font_for(text.font);
    let text_width = text.text.chars().count() as i32 * text.font.char_width();

    // ScrollLabel pre-computes its alignment into offset_x; plain labels
    // rely on the align field with a zero offset.
    let free = (w - text_width).max(0);
    let base_x = match text.align {
        TextAlign::Left => 0,
        TextAlign::Center => free / 2,
        TextAlign::Right => free,
    };

    let rect = Rectangle::new(pos, Size::new(w as u32, h as u32));
    let mut clipped = display.clipped(&rect);

    let char_style = MonoTextStyle::new(font, text.color);
    let text_style = TextStyleBuilder::new().baseline(Baseline::Middle).build();
    Text::with_text_style(
        text.text.as_str(),
        Point::new(pos.x + base_x + text.offset_x, pos.y + h / 2),
        char_style,
        text_style,
    )
    .draw(&mut clipped)
    .ok();
}
