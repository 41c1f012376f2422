use super::model::{Body, Menu, Ring};
use super::{
    ICON_FILL, ICON_INACTIVE_ALPHA, ICON_SIZE, LABEL_FONT_SIZE, ORBIT_SEGMENTS, PLANET_RADIUS,
    SUN_RADIUS,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use orbit_core::orbit::Vec3;
use orbit_core::polar::{self, PathCommand, SectorPath, SectorSpan, Sweep};
use orbit_core::{MenuItem, Point, Presentation, RingLayout};
use palette::Srgba;
use std::f64::consts::PI;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

// cairo measures angles from +x towards +y
fn cairo_angle(p: Point) -> f64 {
    p.y.atan2(p.x)
}

/// Replays a sector outline onto the current cairo path. The context must be
/// translated to the hub centre.
pub fn trace(cr: &Context, path: &SectorPath) {
    let mut current = Point::default();
    for command in path.commands() {
        match *command {
            PathCommand::MoveTo(p) => {
                cr.move_to(p.x, p.y);
                current = p;
            }
            PathCommand::LineTo(p) => {
                cr.line_to(p.x, p.y);
                current = p;
            }
            PathCommand::Arc {
                radius, sweep, to, ..
            } => {
                let (from, until) = (cairo_angle(current), cairo_angle(to));
                match sweep {
                    Sweep::Clockwise => cr.arc(0.0, 0.0, radius, from, until),
                    Sweep::CounterClockwise => cr.arc_negative(0.0, 0.0, radius, from, until),
                }
                current = to;
            }
            PathCommand::Close => cr.close_path(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectorState {
    Hovered,
    Expanded,
    Idle,
}

impl SectorState {
    fn resolve(hovered: bool, expanded: bool) -> Self {
        if hovered {
            Self::Hovered
        } else if expanded {
            Self::Expanded
        } else {
            Self::Idle
        }
    }

    fn color(&self, colors: &ThemeColors) -> Srgba<f64> {
        match self {
            Self::Hovered => colors.hovered,
            Self::Expanded => colors.expanded,
            Self::Idle => colors.sector,
        }
    }
}

struct SectorRenderer<'a> {
    item: &'a MenuItem,
    icon: Option<&'a Pixbuf>,
    layout: RingLayout,
    span: SectorSpan,
    state: SectorState,
    scale: f64,
}

impl SectorRenderer<'_> {
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        set_color(cr, self.state.color(colors));
        trace(cr, &self.layout.path(self.span));
        cr.fill()?;

        let center = self.layout.centroid(self.span);
        match self.icon {
            Some(pixbuf) => draw_icon(
                cr,
                pixbuf,
                center,
                (self.layout.outer - self.layout.inner) * ICON_FILL,
                self.state == SectorState::Idle,
            ),
            None => draw_label(
                cr,
                &self.item.label,
                center,
                LABEL_FONT_SIZE * self.scale,
                colors.text,
            ),
        }
    }
}

fn draw_icon(
    cr: &Context,
    pixbuf: &Pixbuf,
    center: Point,
    size: f64,
    dim: bool,
) -> Result<(), cairo::Error> {
    let icon_scale = size / ICON_SIZE as f64;
    let (w, h) = (
        pixbuf.width() as f64 * icon_scale,
        pixbuf.height() as f64 * icon_scale,
    );

    cr.save()?;
    cr.translate(center.x - w / 2.0, center.y - h / 2.0);
    cr.scale(icon_scale, icon_scale);
    cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
    if dim {
        cr.paint_with_alpha(ICON_INACTIVE_ALPHA)?;
    } else {
        cr.paint()?;
    }
    cr.restore()
}

fn draw_label(
    cr: &Context,
    text: &str,
    at: Point,
    font_size: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    set_color(cr, color);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(font_size);
    if let Ok(ext) = cr.text_extents(text) {
        cr.move_to(
            at.x - ext.width() / 2.0 - ext.x_bearing(),
            at.y + ext.height() / 2.0,
        );
        cr.show_text(text)?;
    }
    Ok(())
}

/// Hub disc with a plus that turns into a cross while the menu is open.
fn draw_hub(
    cr: &Context,
    center: Point,
    radius: f64,
    open: bool,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_color(cr, colors.hub);
    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    cr.fill()?;

    let arm = radius * 0.4;
    cr.save()?;
    cr.translate(center.x, center.y);
    if open {
        cr.rotate(PI / 4.0);
    }
    set_color(cr, colors.text);
    cr.set_line_width((radius * 0.12).max(1.0));
    cr.move_to(-arm, 0.0);
    cr.line_to(arm, 0.0);
    cr.move_to(0.0, -arm);
    cr.line_to(0.0, arm);
    cr.stroke()?;
    cr.restore()
}

fn draw_flat(cr: &Context, menu: &Menu, colors: &ThemeColors) -> Result<(), cairo::Error> {
    for ring in Ring::ALL {
        let layout = menu.ring_layout(ring);
        let items = menu.ring_items(ring);
        for (index, item) in items.iter().enumerate() {
            SectorRenderer {
                item,
                icon: menu.icon_for(item),
                layout,
                span: layout.span(index, items.len()),
                state: SectorState::resolve(menu.is_hovered(ring, index), menu.is_expanded(item)),
                scale: menu.scale_factor,
            }
            .draw(cr, colors)?;
        }
    }

    draw_hub(
        cr,
        Point::default(),
        menu.hub_radius(),
        menu.disclosure.is_open(),
        colors,
    )
}

fn draw_orbit_line(
    cr: &Context,
    menu: &Menu,
    radius: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let step = polar::FULL_TURN / ORBIT_SEGMENTS as f64;
    let points = (0..=ORBIT_SEGMENTS).filter_map(|i| {
        let p = polar::polar_to_cartesian(radius, i as f64 * step);
        menu.project(Vec3::new(p.x, 0.0, p.y))
    });

    let mut started = false;
    for projected in points {
        let s = projected.screen;
        if started {
            cr.line_to(s.x, s.y);
        } else {
            cr.move_to(s.x, s.y);
            started = true;
        }
    }

    set_color(cr, colors.orbit);
    cr.set_line_width(1.5 * menu.scale_factor);
    cr.stroke()
}

fn draw_body(
    cr: &Context,
    menu: &Menu,
    body: &Body<'_>,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let Body {
        ring,
        index,
        item,
        projected,
    } = body;
    let radius = PLANET_RADIUS * projected.scale;
    let state = SectorState::resolve(menu.is_hovered(*ring, *index), menu.is_expanded(item));

    set_color(cr, state.color(colors));
    cr.arc(projected.screen.x, projected.screen.y, radius, 0.0, 2.0 * PI);
    cr.fill()?;

    if let Some(pixbuf) = menu.icon_for(item) {
        draw_icon(
            cr,
            pixbuf,
            projected.screen,
            radius * 2.0 * ICON_FILL,
            state == SectorState::Idle,
        )?;
    }

    let label_at = projected
        .screen
        .offset(Point::new(0.0, radius + LABEL_FONT_SIZE * menu.scale_factor));
    draw_label(
        cr,
        &item.label,
        label_at,
        LABEL_FONT_SIZE * menu.scale_factor,
        colors.text,
    )
}

fn draw_orbital(cr: &Context, menu: &Menu, colors: &ThemeColors) -> Result<(), cairo::Error> {
    for ring in Ring::ALL {
        if !menu.ring_items(ring).is_empty() {
            draw_orbit_line(cr, menu, Menu::orbit_radius(ring), colors)?;
        }
    }

    let mut bodies = menu.bodies();
    // painter's order, far side first
    bodies.sort_by(|a, b| b.projected.depth.total_cmp(&a.projected.depth));

    let sun = menu.sun();
    let sun_depth = sun.map(|s| s.depth).unwrap_or(f64::INFINITY);
    let (behind, in_front): (Vec<_>, Vec<_>) =
        bodies.iter().partition(|b| b.projected.depth > sun_depth);

    for body in behind {
        draw_body(cr, menu, body, colors)?;
    }
    if let Some(sun) = sun {
        draw_hub(
            cr,
            sun.screen,
            SUN_RADIUS * sun.scale,
            menu.disclosure.is_open(),
            colors,
        )?;
    }
    for body in in_front {
        draw_body(cr, menu, body, colors)?;
    }
    Ok(())
}

pub fn draw(cr: &Context, menu: &Menu, colors: &ThemeColors) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.translate(menu.center.x, menu.center.y);
    let result = match menu.presentation {
        Presentation::Flat => draw_flat(cr, menu, colors),
        Presentation::Orbital => draw_orbital(cr, menu, colors),
    };
    cr.restore()?;
    result
}
