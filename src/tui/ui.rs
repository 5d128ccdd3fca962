// TUI rendering
//
// Draws the page model as the browser would show it: a progress strip along
// the top, the fixed header (or its hidden placeholder), the slice of the
// document the viewport covers, and a log panel. Reveal state, the menu
// overlay and the typewriter line all render from the same Page the
// controller mutates, so the display is never out of sync with the model.

use crate::controller::Controller;
use crate::logging::{LogBuffer, LogLevel};
use crate::page::Page;
use crate::tui::palette::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn draw(
    f: &mut Frame,
    page: &Page,
    controller: &Controller,
    log_buffer: &LogBuffer,
    palette: &Palette,
) {
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // progress strip
            Constraint::Length(3), // page header
            Constraint::Min(8),    // document viewport
            Constraint::Length(8), // log panel
            Constraint::Length(1), // key hints
        ])
        .split(area);

    draw_progress(f, rows[0], controller, palette);
    draw_header(f, rows[1], page, controller, palette);
    draw_viewport(f, rows[2], page, controller, palette);
    draw_logs(f, rows[3], log_buffer, palette);
    draw_hints(f, rows[4], palette);
}

/// The scroll progress strip: fills left to right like the page's scaleX bar
fn draw_progress(f: &mut Frame, area: Rect, controller: &Controller, palette: &Palette) {
    let filled = (area.width as f64 * controller.scroll_fraction()).round() as usize;
    let line = Line::from(vec![
        Span::styled("█".repeat(filled), Style::default().fg(palette.progress)),
        Span::styled(
            "░".repeat((area.width as usize).saturating_sub(filled)),
            Style::default().fg(palette.dim),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_header(f: &mut Frame, area: Rect, page: &Page, controller: &Controller, palette: &Palette) {
    let hidden = controller.header_hidden(page);
    let scrolled = page
        .find_class("main-header")
        .is_some_and(|h| page.element(h).has_class("scrolled"));

    let border_style = if hidden {
        Style::default().fg(palette.hidden)
    } else if scrolled {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.border)
    };

    let mut spans = vec![Span::styled(
        " Portfolio ",
        Style::default().fg(palette.title).add_modifier(Modifier::BOLD),
    )];
    if hidden {
        spans.push(Span::styled(
            "(header slid out of view)",
            Style::default().fg(palette.hidden),
        ));
    } else {
        for link in page.anchors() {
            let text = &page.element(link).text;
            if !text.is_empty() {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(text.clone(), Style::default().fg(palette.fg)));
            }
        }
        let icon = match controller.theme_mode() {
            crate::controller::theme::ThemeMode::Dark => " ☀ ",
            crate::controller::theme::ThemeMode::Light => " ☾ ",
        };
        spans.push(Span::styled(icon, Style::default().fg(palette.accent)));
        if controller.menu_open(page) {
            spans.push(Span::styled(
                " [menu open]",
                Style::default().fg(palette.accent),
            ));
        }
    }

    let title = if scrolled && !hidden { " header · scrolled " } else { " header " };
    f.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        ),
        area,
    );
}

/// The document slice the viewport covers, section by section
fn draw_viewport(f: &mut Frame, area: Rect, page: &Page, controller: &Controller, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(format!(
            " document · {:.0}px / {:.0}px ",
            page.scroll_y(),
            page.max_scroll()
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let view_top = page.scroll_y();
    let view_bottom = view_top + page.viewport_height();

    let mut lines: Vec<Line> = Vec::new();

    // Typewriter line renders whenever the hero is in view
    if let Some(typing) = page.find_id("typing-text") {
        let el = page.element(typing);
        if el.top + el.height > view_top && el.top < view_bottom {
            let cursor = if controller.typewriter_running() { "▌" } else { "" };
            lines.push(Line::from(vec![
                Span::styled("I am a ", Style::default().fg(palette.dim)),
                Span::styled(
                    format!("{}{cursor}", el.text),
                    Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::default());
        }
    }

    for section in page.all_with_class("reveal-element") {
        let el = page.element(section);
        if el.top + el.height <= view_top || el.top >= view_bottom {
            continue;
        }
        let revealed = el.has_class("is-revealed");
        let (marker, style) = if revealed {
            ("●", Style::default().fg(palette.revealed))
        } else {
            ("○", Style::default().fg(palette.dim))
        };
        let name = el
            .id
            .clone()
            .or_else(|| (!el.text.is_empty()).then(|| el.text.clone()))
            .unwrap_or_else(|| "section".to_string());
        lines.push(Line::from(vec![
            Span::styled(format!("{marker} "), style),
            Span::styled(truncate(&name, inner.width.saturating_sub(4) as usize), style),
            Span::styled(
                format!("  @{:.0}px", el.top),
                Style::default().fg(palette.dim),
            ),
        ]));
    }

    let paragraph_height = lines.len() as u16;
    f.render_widget(Paragraph::new(lines), inner);

    // Skill gauges under the section list, when the skills section is in view
    let skill_items: Vec<_> = page
        .all_with_class("skill-item")
        .into_iter()
        .filter(|&id| {
            let el = page.element(id);
            el.top + el.height > view_top && el.top < view_bottom
        })
        .collect();
    if skill_items.is_empty() {
        return;
    }

    let mut y = inner.y + paragraph_height + 1;
    for item in skill_items {
        if y >= inner.y + inner.height {
            break;
        }
        let el = page.element(item);
        let width = page
            .descendant_with_class(item, "skill-bar-fill")
            .and_then(|bar| page.element(bar).style("width").map(str::to_string))
            .unwrap_or_default();
        let percent = width
            .trim_end_matches('%')
            .parse::<f64>()
            .unwrap_or(0.0)
            .clamp(0.0, 100.0);
        let gauge_area = Rect::new(inner.x, y, inner.width, 1);
        f.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(palette.progress).bg(palette.bg))
                .label(format!("{} {:.0}%", el.text, percent))
                .ratio(percent / 100.0),
            gauge_area,
        );
        y += 1;
    }
}

fn draw_logs(f: &mut Frame, area: Rect, log_buffer: &LogBuffer, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" logs ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = log_buffer
        .recent(inner.height as usize)
        .into_iter()
        .map(|entry| {
            let level_style = Style::default().fg(match entry.level {
                LogLevel::Error => palette.log_error,
                LogLevel::Warn => palette.log_warn,
                LogLevel::Info => palette.log_info,
                LogLevel::Debug => palette.log_debug,
                LogLevel::Trace => palette.log_trace,
            });
            Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(palette.dim),
                ),
                Span::styled(format!("{:<5} ", entry.level.as_str()), level_style),
                Span::raw(truncate(&entry.message, inner.width.saturating_sub(15) as usize)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_hints(f: &mut Frame, area: Rect, palette: &Palette) {
    let hints = " ↑/↓ scroll · PgUp/PgDn page · t theme · m menu · o click outside · 1-9 anchors · w stop typing · q quit";
    f.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(palette.dim))),
        area,
    );
}

/// Truncate to a display width, respecting wide characters
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}
