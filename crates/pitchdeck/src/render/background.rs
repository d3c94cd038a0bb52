use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use eframe::egui::{self, Color32, Mesh, Pos2, Rect, TextureHandle, TextureOptions};

use crate::deck::{Background, Deck, parse_color};
use crate::theme::Theme;

/// Decoded image backgrounds, uploaded once per path. A path that failed to
/// load is remembered so it is not retried every frame.
#[derive(Default)]
pub struct BackgroundCache {
    textures: RefCell<HashMap<PathBuf, Option<TextureHandle>>>,
}

impl BackgroundCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn texture(&self, ctx: &egui::Context, path: &Path) -> Option<TextureHandle> {
        if let Some(cached) = self.textures.borrow().get(path) {
            return cached.clone();
        }
        let loaded = match load_image(path) {
            Ok(image) => Some(ctx.load_texture(
                path.display().to_string(),
                image,
                TextureOptions::LINEAR,
            )),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load background image");
                None
            }
        };
        self.textures
            .borrow_mut()
            .insert(path.to_path_buf(), loaded.clone());
        loaded
    }
}

fn load_image(path: &Path) -> anyhow::Result<egui::ColorImage> {
    let image = image::open(path)?.into_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        image.as_flat_samples().as_slice(),
    ))
}

/// Paint a slide background filling `rect`.
pub fn paint(
    ui: &egui::Ui,
    background: &Background,
    deck: &Deck,
    cache: &BackgroundCache,
    rect: Rect,
    opacity: f32,
) {
    let painter = ui.painter();
    match background {
        Background::Solid { .. } => {
            painter.rect_filled(rect, 0.0, Theme::with_opacity(background.base_color(), opacity));
        }
        Background::Gradient { top, bottom } => {
            let top = parse_color(top).unwrap_or(Color32::BLACK);
            let bottom = parse_color(bottom).unwrap_or(Color32::BLACK);
            painter.add(vertical_gradient(
                rect,
                Theme::with_opacity(top, opacity),
                Theme::with_opacity(bottom, opacity),
            ));
        }
        Background::Image { path, dim } => {
            painter.rect_filled(rect, 0.0, Theme::with_opacity(Color32::BLACK, opacity));
            let resolved = deck.resolve(path);
            if let Some(texture) = cache.texture(ui.ctx(), &resolved) {
                let uv = cover_uv(texture.size_vec2(), rect.size());
                painter.image(
                    texture.id(),
                    rect,
                    uv,
                    Theme::with_opacity(Color32::WHITE, opacity),
                );
            }
            if *dim > 0.0 {
                painter.rect_filled(rect, 0.0, Theme::with_opacity(Color32::BLACK, dim * opacity));
            }
        }
    }
}

fn vertical_gradient(rect: Rect, top: Color32, bottom: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(1, 3, 2);
    mesh
}

/// UV rect that crops an image of `image_size` to fill `target` without distortion.
fn cover_uv(image_size: egui::Vec2, target: egui::Vec2) -> Rect {
    if image_size.x <= 0.0 || image_size.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
    }
    let image_aspect = image_size.x / image_size.y;
    let target_aspect = target.x / target.y;
    if image_aspect > target_aspect {
        let visible = target_aspect / image_aspect;
        let margin = (1.0 - visible) / 2.0;
        Rect::from_min_max(Pos2::new(margin, 0.0), Pos2::new(1.0 - margin, 1.0))
    } else {
        let visible = image_aspect / target_aspect;
        let margin = (1.0 - visible) / 2.0;
        Rect::from_min_max(Pos2::new(0.0, margin), Pos2::new(1.0, 1.0 - margin))
    }
}
