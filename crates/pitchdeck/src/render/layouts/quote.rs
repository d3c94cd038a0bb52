use eframe::egui;

use crate::deck::{Deck, DeckSlide};
use crate::render::layouts;
use crate::render::text::{self, Align};
use crate::theme::Theme;

/// Attribution above a large centred quotation.
pub fn render(
    ui: &egui::Ui,
    _deck: &Deck,
    slide: &DeckSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    let Some(quote) = &slide.quote else { return };

    let width = rect.width() * 0.7;
    let cx = rect.center().x;
    let quote_size = theme.title_size * scale;
    let attribution_size = theme.body_size * scale;
    let gap = 12.0 * scale;

    let quoted = wrap_with_quotes(quote);
    let attribution = slide.attribution.as_deref().map(clean_attribution);

    let mut total = text::measure(ui, &quoted, quote_size, width);
    if let Some(attribution) = &attribution {
        total += gap + text::measure(ui, attribution, attribution_size, width);
    }
    let mut y = rect.center().y - total / 2.0;

    if let Some(attribution) = &attribution {
        y += text::draw(
            ui,
            attribution,
            cx,
            y,
            attribution_size,
            theme.text(0.9, opacity),
            width,
            Align::Center,
        );
        y += gap;
    }
    text::draw(ui, &quoted, cx, y, quote_size, theme.text(1.0, opacity), width, Align::Center);

    if let Some(footer) = &slide.footer {
        layouts::draw_footer(ui, footer, theme, rect, Align::Center, opacity, scale);
    }
}

/// Wrap in curly quotation marks unless the text already carries them.
fn wrap_with_quotes(quote: &str) -> String {
    let trimmed = quote.trim();
    let starts = trimmed.starts_with('\u{201C}') || trimmed.starts_with('"');
    let ends = trimmed.ends_with('\u{201D}') || trimmed.ends_with('"');
    if starts && ends {
        return trimmed.to_string();
    }
    let open = if starts { "" } else { "\u{201C}" };
    let close = if ends { "" } else { "\u{201D}" };
    format!("{open}{trimmed}{close}")
}

/// Strip a leading `--`/`---`/em dash; the layout places the name on its own.
fn clean_attribution(attribution: &str) -> String {
    attribution
        .trim_start()
        .trim_start_matches(['-', '\u{2014}'])
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_plain_quote() {
        assert_eq!(
            wrap_with_quotes("AI is the new electricity."),
            "\u{201C}AI is the new electricity.\u{201D}"
        );
    }

    #[test]
    fn test_keeps_existing_quotes() {
        assert_eq!(wrap_with_quotes("\"Already quoted\""), "\"Already quoted\"");
        assert_eq!(
            wrap_with_quotes("\u{201C}Curly\u{201D}"),
            "\u{201C}Curly\u{201D}"
        );
    }

    #[test]
    fn test_clean_attribution() {
        assert_eq!(clean_attribution("-- Andrew Ng"), "Andrew Ng");
        assert_eq!(clean_attribution("\u{2014} Andrew Ng"), "Andrew Ng");
        assert_eq!(clean_attribution("Andrew Ng"), "Andrew Ng");
    }
}
