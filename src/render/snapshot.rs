//! Software rendering of the whole desktop for one instant.
//!
//! Each visible window is drawn with `vello_cpu` into a pixmap of its real
//! pixel size, so content spilling past the client area is cropped, then
//! composited over the desktop with the window opacity. Ropes are drawn last,
//! on top of every window.

use std::sync::Arc;

use image::RgbaImage;
use kurbo::{Affine, BezPath, Circle, Line, Point, Rect, Shape, Stroke, StrokeOpts};

use crate::animation::jitter::{Decoration, DecorationShape};
use crate::assets::text::{TextEngine, layout_extent};
use crate::content::Content;
use crate::content::label::{DecoratedLabel, TextAlign};
use crate::foundation::color::{Rgba8, palette};
use crate::foundation::core::{ScreenPoint, ScreenSize};
use crate::foundation::error::{YanzhiError, YanzhiResult};
use crate::render::composite::{over, premultiply, unpremultiply};
use crate::window::container::ContainerWindow;
use crate::window::effects::ROPE_WIDTH;
use crate::window::stage::Stage;

/// Desktop color behind all windows.
pub const DESKTOP: Rgba8 = Rgba8::rgb(0x20, 0x20, 0x24);

const PATH_TOLERANCE: f64 = 0.1;

/// Render every visible window, in stacking order, onto a screen-sized image.
#[tracing::instrument(level = "debug", skip(stage), fields(at = stage.now()))]
pub fn render_stage(stage: &Stage) -> YanzhiResult<RgbaImage> {
    let screen = stage.scale().screen();
    let desktop = premultiply(DESKTOP.to_array());
    let mut canvas: Vec<u8> = desktop
        .iter()
        .copied()
        .cycle()
        .take(screen.width as usize * screen.height as usize * 4)
        .collect();
    let font = font_data(stage.text());

    let visible: Vec<&ContainerWindow> = stage.windows().iter().filter(|w| w.is_visible()).collect();
    for w in &visible {
        let placement = w.placement();
        if placement.size.is_empty() {
            continue;
        }
        let layer = render_window(w, placement.size, stage.text(), font.as_ref())?;
        composite_at(&mut canvas, screen, &layer, placement.origin, placement.opacity as f32);
    }

    let ropes: Vec<Line> = visible.iter().filter_map(|w| w.ropes()).flatten().collect();
    if !ropes.is_empty() {
        let layer = render_ropes(&ropes, screen, stage.scale().factor())?;
        composite_at(&mut canvas, screen, &layer, ScreenPoint::ORIGIN, 1.0);
    }

    for px in canvas.chunks_exact_mut(4) {
        let straight = unpremultiply([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&straight);
    }
    RgbaImage::from_raw(screen.width, screen.height, canvas)
        .ok_or_else(|| YanzhiError::resource("snapshot buffer does not match the screen size"))
}

/// The show font as `vello_cpu` glyph source, if one is loaded.
pub fn font_data(text: &TextEngine) -> Option<vello_cpu::peniko::FontData> {
    let bytes = text.font_bytes()?;
    Some(vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(bytes.to_vec()),
        0,
    ))
}

/// One window's client area at `size` real pixels, premultiplied.
pub fn render_window(
    window: &ContainerWindow,
    size: ScreenSize,
    text: &TextEngine,
    font: Option<&vello_cpu::peniko::FontData>,
) -> YanzhiResult<vello_cpu::Pixmap> {
    let (w, h) = surface_size(size)?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    let area = Rect::new(0.0, 0.0, f64::from(size.width), f64::from(size.height));
    let center = area.center().to_vec2();
    let zoom = Affine::translate(center)
        * Affine::scale(window.content_scale())
        * Affine::translate(-center);

    if !window.is_transparent() {
        fill_rect(&mut ctx, area, palette::BG, Affine::IDENTITY);
    }
    match window.content() {
        Content::Frames(c) => {
            let spin = Affine::rotate_about(c.display_angle().to_radians(), area.center());
            draw_image(&mut ctx, c.current_image(), size, zoom * spin)?;
        }
        Content::Label(l) => {
            draw_label(&mut ctx, l, size, window.scale().factor(), text, font, zoom)?;
        }
        Content::Empty => {}
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap)
}

fn draw_label(
    ctx: &mut vello_cpu::RenderContext,
    label: &DecoratedLabel,
    size: ScreenSize,
    factor: f64,
    text: &TextEngine,
    font: Option<&vello_cpu::peniko::FontData>,
    xf: Affine,
) -> YanzhiResult<()> {
    let style = label.style();
    let area = Rect::new(0.0, 0.0, f64::from(size.width), f64::from(size.height));
    fill_rect(ctx, area, style.background, xf);

    match label.image() {
        Some(img) => draw_image(ctx, img, size, xf)?,
        None => {
            if let Some(font) = font {
                draw_text(ctx, label, size, factor, text, font, xf);
            }
        }
    }

    let jitter = label.jitter();
    for (deco, offset) in jitter.decorations().iter().zip(jitter.offsets()) {
        let center = Point::new(
            f64::from(deco.position.x + offset.x) * factor,
            f64::from(deco.position.y + offset.y) * factor,
        );
        for path in decoration_paths(deco, center, factor) {
            fill_path(ctx, &path, deco.color, xf);
        }
    }
    Ok(())
}

/// Text block centered vertically; each line placed by its own advance.
fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    label: &DecoratedLabel,
    size: ScreenSize,
    factor: f64,
    text: &TextEngine,
    font: &vello_cpu::peniko::FontData,
    xf: Affine,
) {
    let style = label.style();
    let Some(layout) = text.layout(label.text(), &style.text_style(), factor as f32) else {
        return;
    };
    let (_, text_h) = layout_extent(&layout);
    let width = f64::from(size.width);
    let top = (f64::from(size.height) - text_h) / 2.0;

    for line in layout.lines() {
        let advance = f64::from(line.metrics().advance);
        let dx = match style.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => (width - advance) / 2.0,
            TextAlign::Right => width - advance,
        };
        ctx.set_transform(affine_to_cpu(xf * Affine::translate((dx, top))));
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

/// Draw `img` stretched over the `size` client area under `xf`.
fn draw_image(
    ctx: &mut vello_cpu::RenderContext,
    img: &RgbaImage,
    size: ScreenSize,
    xf: Affine,
) -> YanzhiResult<()> {
    let (iw, ih) = img.dimensions();
    if iw == 0 || ih == 0 {
        return Ok(());
    }
    let fit = Affine::scale_non_uniform(
        f64::from(size.width) / f64::from(iw),
        f64::from(size.height) / f64::from(ih),
    );
    let paint = vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap_from_image(img)?)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    };
    ctx.set_transform(affine_to_cpu(xf * fit));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(iw), f64::from(ih)));
    Ok(())
}

fn render_ropes(lines: &[Line], screen: ScreenSize, factor: f64) -> YanzhiResult<vello_cpu::Pixmap> {
    let (w, h) = surface_size(screen)?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    let stroke = Stroke::new(ROPE_WIDTH * factor);
    for line in lines {
        let band = kurbo::stroke(
            line.path_elements(PATH_TOLERANCE),
            &stroke,
            &StrokeOpts::default(),
            PATH_TOLERANCE,
        );
        fill_path(&mut ctx, &band, palette::ROPE, Affine::IDENTITY);
    }
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap)
}

fn shape_path(shape: DecorationShape, half: f64) -> BezPath {
    match shape {
        DecorationShape::Circle => Circle::new(Point::ORIGIN, half).to_path(PATH_TOLERANCE),
        DecorationShape::Rectangle => Rect::new(-half, -half, half, half).to_path(PATH_TOLERANCE),
        DecorationShape::Triangle => {
            let mut p = BezPath::new();
            p.move_to((0.0, -half));
            p.line_to((-half, half));
            p.line_to((half, half));
            p.close_path();
            p
        }
    }
}

/// Fill paths of one decoration centered on `center`, in client pixels.
///
/// The outline is always stroked `width` wide; filled shapes add their
/// interior.
pub fn decoration_paths(deco: &Decoration, center: Point, factor: f64) -> Vec<BezPath> {
    let xf = Affine::translate(center.to_vec2()) * Affine::rotate(deco.rotation.to_radians());
    let outline = shape_path(deco.shape, f64::from(deco.size / 2) * factor);
    let mut paths = Vec::with_capacity(2);
    if deco.fill {
        paths.push(xf * outline.clone());
    }
    if deco.width > 0 {
        let band = kurbo::stroke(
            outline.iter(),
            &Stroke::new(f64::from(deco.width) * factor),
            &StrokeOpts::default(),
            PATH_TOLERANCE,
        );
        paths.push(xf * band);
    }
    paths
}

fn fill_rect(ctx: &mut vello_cpu::RenderContext, rect: Rect, color: Rgba8, xf: Affine) {
    ctx.set_transform(affine_to_cpu(xf));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1));
}

fn fill_path(ctx: &mut vello_cpu::RenderContext, path: &BezPath, color: Rgba8, xf: Affine) {
    ctx.set_transform(affine_to_cpu(xf));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a));
    ctx.fill_path(&bezpath_to_cpu(path));
}

/// Source-over `layer` onto the premultiplied `canvas` with its top-left at
/// `origin`; parts off the screen are dropped.
fn composite_at(
    canvas: &mut [u8],
    screen: ScreenSize,
    layer: &vello_cpu::Pixmap,
    origin: ScreenPoint,
    opacity: f32,
) {
    let (lw, lh) = (i64::from(layer.width()), i64::from(layer.height()));
    let (sw, sh) = (i64::from(screen.width), i64::from(screen.height));
    let src = layer.data_as_u8_slice();
    for ly in 0..lh {
        let cy = i64::from(origin.y) + ly;
        if cy < 0 || cy >= sh {
            continue;
        }
        for lx in 0..lw {
            let cx = i64::from(origin.x) + lx;
            if cx < 0 || cx >= sw {
                continue;
            }
            let s = ((ly * lw + lx) * 4) as usize;
            let d = ((cy * sw + cx) * 4) as usize;
            let px = [src[s], src[s + 1], src[s + 2], src[s + 3]];
            let dst = [canvas[d], canvas[d + 1], canvas[d + 2], canvas[d + 3]];
            canvas[d..d + 4].copy_from_slice(&over(dst, px, opacity));
        }
    }
}

fn surface_size(size: ScreenSize) -> YanzhiResult<(u16, u16)> {
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| YanzhiError::configuration(format!("surface width {} exceeds u16", size.width)))?;
    let h: u16 = size
        .height
        .try_into()
        .map_err(|_| YanzhiError::configuration(format!("surface height {} exceeds u16", size.height)))?;
    Ok((w, h))
}

fn pixmap_from_image(img: &RgbaImage) -> YanzhiResult<vello_cpu::Pixmap> {
    let (w, h) = surface_size(ScreenSize::new(img.width(), img.height()))?;
    let pixels: Vec<vello_cpu::peniko::color::PremulRgba8> = img
        .pixels()
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array(premultiply(px.0)))
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/snapshot.rs"]
mod tests;
