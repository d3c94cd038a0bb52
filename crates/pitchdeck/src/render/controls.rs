use eframe::egui::{self, Color32, FontId, Pos2, Rect, Sense, Stroke};

use crate::render::text;
use crate::theme::Theme;

const BAR_HEIGHT: f32 = 52.0;
const BAR_PADDING_X: f32 = 36.0;
const DOT_SIZE: f32 = 6.0;
const DOT_ACTIVE_WIDTH: f32 = 24.0;
const DOT_GAP: f32 = 6.0;
const BUTTON_SIZE: f32 = 30.0;
/// Below this fade level the bar no longer takes clicks.
const INTERACTIVE_OPACITY: f32 = 0.05;

pub const HINT: &str = "\u{2190} \u{2192} Navigate \u{00B7} F Fullscreen";

/// Something the user clicked in the control bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Previous,
    Next,
    GoTo(usize),
    ToggleFullscreen,
}

/// Snapshot of engine state the bar displays.
#[derive(Debug, Clone)]
pub struct ControlBar {
    pub status: String,
    pub count: usize,
    pub current: usize,
    pub can_previous: bool,
    pub can_next: bool,
    pub fullscreen: bool,
    pub show_hint: bool,
}

/// Paint the overlay at `opacity` and return the clicked action, if any.
pub fn show(ui: &egui::Ui, rect: Rect, bar: &ControlBar, opacity: f32) -> Option<ControlAction> {
    if opacity <= 0.0 {
        return None;
    }
    let interactive = opacity >= INTERACTIVE_OPACITY;
    let mut action = None;

    if bar.show_hint {
        let color = Theme::with_opacity(Color32::from_white_alpha(102), opacity);
        let galley = ui
            .painter()
            .layout_no_wrap(HINT.to_string(), FontId::proportional(11.0), color);
        let pos = Pos2::new(rect.right() - 32.0 - galley.rect.width(), rect.top() + 20.0);
        ui.painter().galley(pos, galley, color);
    }

    let bar_rect = bar_rect(rect);
    let center_y = bar_rect.center().y;

    // Status readout
    text::draw_line_centered_v(
        ui,
        &bar.status,
        bar_rect.left(),
        center_y,
        FontId::monospace(13.0),
        Theme::with_opacity(Color32::from_white_alpha(128), opacity),
    );

    // Indicators
    for (i, dot) in dot_rects(bar.count, bar.current, Pos2::new(bar_rect.center().x, center_y))
        .into_iter()
        .enumerate()
    {
        let hit = dot.expand2(egui::vec2(DOT_GAP / 2.0, 8.0));
        let response = ui.interact(hit, ui.id().with(("dot", i)), sense(interactive));
        if interactive && response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        let alpha = if i == bar.current {
            230
        } else if response.hovered() {
            160
        } else {
            77
        };
        ui.painter().rect_filled(
            dot,
            DOT_SIZE / 2.0,
            Theme::with_opacity(Color32::from_white_alpha(alpha), opacity),
        );
        if response.clicked() {
            action = Some(ControlAction::GoTo(i));
        }
    }

    let buttons = ButtonRects::new(bar_rect);
    if button(ui, "prev", buttons.previous, bar.can_previous && interactive, opacity, |painter, r, stroke| {
        draw_chevron(painter, r, stroke, false)
    }) {
        action = Some(ControlAction::Previous);
    }
    if button(ui, "next", buttons.next, bar.can_next && interactive, opacity, |painter, r, stroke| {
        draw_chevron(painter, r, stroke, true)
    }) {
        action = Some(ControlAction::Next);
    }

    ui.painter().line_segment(
        [
            Pos2::new(buttons.divider_x, center_y - 9.0),
            Pos2::new(buttons.divider_x, center_y + 9.0),
        ],
        Stroke::new(1.0, Theme::with_opacity(Color32::from_white_alpha(51), opacity)),
    );

    let fullscreen = bar.fullscreen;
    if button(ui, "fullscreen", buttons.fullscreen, interactive, opacity, |painter, r, stroke| {
        draw_fullscreen_icon(painter, r, stroke, fullscreen)
    }) {
        action = Some(ControlAction::ToggleFullscreen);
    }

    action
}

/// Strip along the bottom edge of `rect` that holds the readout, dots and buttons.
fn bar_rect(rect: Rect) -> Rect {
    Rect::from_min_max(
        Pos2::new(rect.left() + BAR_PADDING_X, rect.bottom() - BAR_HEIGHT),
        Pos2::new(rect.right() - BAR_PADDING_X, rect.bottom()),
    )
}

/// Step and fullscreen buttons, right-aligned in the bar.
struct ButtonRects {
    previous: Rect,
    next: Rect,
    divider_x: f32,
    fullscreen: Rect,
}

impl ButtonRects {
    fn new(bar_rect: Rect) -> Self {
        let center_y = bar_rect.center().y;
        let mut x = bar_rect.right() - BUTTON_SIZE;
        let fullscreen = button_rect(x, center_y);
        x -= 9.0;
        let divider_x = x;
        x -= BUTTON_SIZE;
        let next = button_rect(x, center_y);
        x -= BUTTON_SIZE + 4.0;
        let previous = button_rect(x, center_y);
        Self {
            previous,
            next,
            divider_x,
            fullscreen,
        }
    }
}

fn sense(interactive: bool) -> Sense {
    if interactive {
        Sense::click()
    } else {
        Sense::hover()
    }
}

fn button_rect(left: f32, center_y: f32) -> Rect {
    Rect::from_min_size(
        Pos2::new(left, center_y - BUTTON_SIZE / 2.0),
        egui::vec2(BUTTON_SIZE, BUTTON_SIZE),
    )
}

/// A ghost button: dim icon, brighter with a faint plate on hover. Disabled
/// buttons draw at 30% and never report clicks.
fn button(
    ui: &egui::Ui,
    name: &str,
    rect: Rect,
    enabled: bool,
    opacity: f32,
    draw_icon: impl FnOnce(&egui::Painter, Rect, Stroke),
) -> bool {
    let response = ui.interact(rect, ui.id().with(name), sense(enabled));
    let hovered = enabled && response.hovered();
    if hovered {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        ui.painter().rect_filled(
            rect,
            6.0,
            Theme::with_opacity(Color32::from_white_alpha(26), opacity),
        );
    }
    let alpha = if hovered { 230 } else { 128 };
    let dim = if enabled { 1.0 } else { 0.3 };
    let stroke = Stroke::new(
        1.6,
        Theme::with_opacity(Color32::from_white_alpha(alpha), opacity * dim),
    );
    draw_icon(ui.painter(), rect.shrink(8.0), stroke);
    enabled && response.clicked()
}

fn draw_chevron(painter: &egui::Painter, r: Rect, stroke: Stroke, pointing_right: bool) {
    let (tip_x, back_x) = if pointing_right {
        (r.right() - 3.0, r.left() + 4.0)
    } else {
        (r.left() + 3.0, r.right() - 4.0)
    };
    let points = vec![
        Pos2::new(back_x, r.top()),
        Pos2::new(tip_x, r.center().y),
        Pos2::new(back_x, r.bottom()),
    ];
    painter.add(egui::Shape::line(points, stroke));
}

/// Four corner brackets: pointing outward to enter fullscreen, inward to leave it.
fn draw_fullscreen_icon(painter: &egui::Painter, r: Rect, stroke: Stroke, fullscreen: bool) {
    let arm = r.width() * 0.35;
    let corners = [
        (r.left_top(), 1.0, 1.0),
        (r.right_top(), -1.0, 1.0),
        (r.left_bottom(), 1.0, -1.0),
        (r.right_bottom(), -1.0, -1.0),
    ];
    for (corner, sx, sy) in corners {
        let elbow = if fullscreen {
            Pos2::new(corner.x + sx * arm, corner.y + sy * arm)
        } else {
            corner
        };
        let points = if fullscreen {
            vec![
                Pos2::new(corner.x, elbow.y),
                elbow,
                Pos2::new(elbow.x, corner.y),
            ]
        } else {
            vec![
                Pos2::new(corner.x + sx * arm, corner.y),
                elbow,
                Pos2::new(corner.x, corner.y + sy * arm),
            ]
        };
        painter.add(egui::Shape::line(points, stroke));
    }
}

/// Indicator rects centred on `center`: the current one is a wide pill.
pub fn dot_rects(count: usize, current: usize, center: Pos2) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let widths: Vec<f32> = (0..count)
        .map(|i| if i == current { DOT_ACTIVE_WIDTH } else { DOT_SIZE })
        .collect();
    let total: f32 = widths.iter().sum::<f32>() + DOT_GAP * (count as f32 - 1.0);
    let mut x = center.x - total / 2.0;
    widths
        .into_iter()
        .map(|w| {
            let rect = Rect::from_min_size(
                Pos2::new(x, center.y - DOT_SIZE / 2.0),
                egui::vec2(w, DOT_SIZE),
            );
            x += w + DOT_GAP;
            rect
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::from_min_size(Pos2::ZERO, egui::vec2(1280.0, 720.0))
    }

    fn bar(current: usize, count: usize) -> ControlBar {
        ControlBar {
            status: format!("{} / {count}", current + 1),
            count,
            current,
            can_previous: current > 0,
            can_next: current + 1 < count,
            fullscreen: false,
            show_hint: true,
        }
    }

    fn frame(ctx: &egui::Context, events: Vec<egui::Event>, bar: &ControlBar, opacity: f32) -> Option<ControlAction> {
        let input = egui::RawInput {
            screen_rect: Some(screen()),
            events,
            ..Default::default()
        };
        let mut action = None;
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                if let Some(clicked) = show(ui, screen(), bar, opacity) {
                    action = Some(clicked);
                }
            });
        });
        action
    }

    /// Lay out once, then hover, press and release at `pos`. Returns every
    /// action the bar reported along the way.
    fn click(bar: &ControlBar, opacity: f32, pos: Pos2) -> Vec<ControlAction> {
        let ctx = egui::Context::default();
        let button = |pressed| egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        };
        [
            vec![],
            vec![egui::Event::PointerMoved(pos)],
            vec![button(true)],
            vec![button(false)],
            vec![],
        ]
        .into_iter()
        .filter_map(|events| frame(&ctx, events, bar, opacity))
        .collect()
    }

    fn dot_center(bar: &ControlBar, index: usize) -> Pos2 {
        let center = bar_rect(screen()).center();
        dot_rects(bar.count, bar.current, center)[index].center()
    }

    fn buttons() -> ButtonRects {
        ButtonRects::new(bar_rect(screen()))
    }

    #[test]
    fn test_dot_rects_centered() {
        let dots = dot_rects(5, 2, Pos2::new(100.0, 50.0));
        assert_eq!(dots.len(), 5);
        // 4 * 6 + 24 + 4 * 6 = 72 wide
        assert_eq!(dots[0].left(), 64.0);
        assert_eq!(dots[4].right(), 136.0);
        assert_eq!(dots[2].width(), DOT_ACTIVE_WIDTH);
        assert_eq!(dots[1].width(), DOT_SIZE);
        assert_eq!(dots[0].center().y, 50.0);
    }

    #[test]
    fn test_dot_rects_empty() {
        assert!(dot_rects(0, 0, Pos2::ZERO).is_empty());
    }

    #[test]
    fn test_button_rects_do_not_overlap() {
        let b = buttons();
        assert!(b.previous.right() <= b.next.left());
        assert!(b.next.right() <= b.divider_x);
        assert!(b.divider_x <= b.fullscreen.left());
        assert_eq!(b.fullscreen.right(), bar_rect(screen()).right());
    }

    #[test]
    fn test_dot_click_goes_to_slide() {
        let bar = bar(2, 5);
        assert_eq!(click(&bar, 1.0, dot_center(&bar, 4)), vec![ControlAction::GoTo(4)]);
        assert_eq!(click(&bar, 1.0, dot_center(&bar, 0)), vec![ControlAction::GoTo(0)]);
    }

    #[test]
    fn test_current_dot_click_is_reported() {
        let bar = bar(2, 5);
        assert_eq!(click(&bar, 1.0, dot_center(&bar, 2)), vec![ControlAction::GoTo(2)]);
    }

    #[test]
    fn test_step_buttons_disabled_at_the_ends() {
        let first = bar(0, 3);
        assert!(click(&first, 1.0, buttons().previous.center()).is_empty());
        assert_eq!(click(&first, 1.0, buttons().next.center()), vec![ControlAction::Next]);

        let last = bar(2, 3);
        assert!(click(&last, 1.0, buttons().next.center()).is_empty());
        assert_eq!(
            click(&last, 1.0, buttons().previous.center()),
            vec![ControlAction::Previous]
        );
    }

    #[test]
    fn test_fullscreen_button() {
        let bar = bar(0, 3);
        assert_eq!(
            click(&bar, 1.0, buttons().fullscreen.center()),
            vec![ControlAction::ToggleFullscreen]
        );
    }

    #[test]
    fn test_faded_out_bar_ignores_clicks() {
        let bar = bar(1, 3);
        let faint = INTERACTIVE_OPACITY / 2.0;
        assert!(click(&bar, faint, buttons().next.center()).is_empty());
        assert!(click(&bar, faint, buttons().fullscreen.center()).is_empty());
        assert!(click(&bar, faint, dot_center(&bar, 0)).is_empty());
        assert!(click(&bar, 0.0, dot_center(&bar, 0)).is_empty());
    }
}
