use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::time::Instant;

use abrepeat::constants::{SPEED_MAX, SPEED_MIN, VOLUME_MAX};
use abrepeat::drag::DragTarget;
use abrepeat::media::MediaBackend;
use abrepeat::session::NoticeLevel;
use abrepeat::slots::SlotIndex;
use abrepeat::time::{format_short_time, format_time};

use super::app::{App, InputMode};
use super::layout::{Button, CardLayout, REGION_BUTTONS, REPEAT_BUTTONS, TRANSPORT};

const ACCENT: Color = Color::Cyan;
const REGION: Color = Color::Magenta;

/// Draw the card and return the layout used, for mouse hit-testing.
pub fn draw<B: MediaBackend>(f: &mut Frame, app: &App<B>, now: Instant) -> CardLayout {
    let layout = CardLayout::new(f.area());

    let card = Block::default()
        .title(" A/B Repeat ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    f.render_widget(card, layout.card);

    draw_file_line(f, &layout, app);
    draw_clock(f, &layout, app);
    draw_track(f, &layout, app);
    draw_buttons(f, &layout, app);
    draw_gauges(f, &layout, app);
    draw_slots(f, &layout, app);
    draw_tips(f, &layout, app, now);
    draw_status(f, &layout, app);

    layout
}

fn draw_file_line<B: MediaBackend>(f: &mut Frame, layout: &CardLayout, app: &App<B>) {
    let session = &app.session;
    let playlist = session.playlist();
    let line = match (session.current_file(), playlist.current_index()) {
        (Some(file), Some(index)) => Line::from(vec![
            Span::styled(
                format!("{}/{} ", index + 1, playlist.len()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(file.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        _ => Line::from(Span::styled(
            "No file loaded - press o to open one",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), layout.file);
}

fn draw_clock<B: MediaBackend>(f: &mut Frame, layout: &CardLayout, app: &App<B>) {
    let session = &app.session;
    let line = Line::from(vec![
        Span::styled(
            format_time(session.position()),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" / "),
        Span::raw(format_time(session.display_duration())),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), layout.clock);
}

fn draw_track<B: MediaBackend>(f: &mut Frame, layout: &CardLayout, app: &App<B>) {
    let session = &app.session;
    let duration = session.display_duration();
    let region = session.display_region();
    let width = layout.track.width as usize;
    if width == 0 {
        return;
    }

    let col = |seconds: f32| (layout.column_at(seconds, duration) - layout.track.x) as usize;
    let a = col(region.a);
    let b = col(region.b);
    let head = col(session.position());

    // Progress track with the loop region highlighted
    let spans: Vec<Span> = (0..width)
        .map(|i| {
            if i == head && session.has_media() {
                Span::styled("●", Style::default().fg(Color::White))
            } else if (a..=b).contains(&i) {
                Span::styled("━", Style::default().fg(REGION))
            } else {
                Span::styled("─", Style::default().fg(Color::DarkGray))
            }
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)), layout.track);

    // Marker handles
    let mut handles = vec![' '; width];
    if let Some(cell) = handles.get_mut(a) {
        *cell = 'A';
    }
    if let Some(cell) = handles.get_mut(b) {
        *cell = 'B';
    }
    let handle_style = |target| {
        if session.dragging() == Some(target) {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(REGION).add_modifier(Modifier::BOLD)
        }
    };
    let handle_spans: Vec<Span> = handles
        .iter()
        .map(|c| match c {
            'A' => Span::styled("A", handle_style(DragTarget::MarkerA)),
            'B' => Span::styled("B", handle_style(DragTarget::MarkerB)),
            _ => Span::raw(" "),
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(handle_spans)), layout.handles);

    let labels = Line::from(vec![
        Span::styled(format!("A {}", format_short_time(region.a)), Style::default().fg(REGION)),
        Span::raw("  "),
        Span::styled(format!("B {}", format_short_time(region.b)), Style::default().fg(REGION)),
        Span::raw("  "),
        Span::styled(
            format!("loop {}", format_short_time(region.length())),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(labels).alignment(Alignment::Center), layout.labels);
}

fn button_label<B: MediaBackend>(button: Button, app: &App<B>) -> String {
    let session = &app.session;
    match button {
        Button::Previous => "⏮".to_string(),
        Button::StepBack => "⏪".to_string(),
        Button::PlayPause => {
            if session.is_playing() {
                "⏸".to_string()
            } else {
                "▶".to_string()
            }
        }
        Button::StepForward => "⏩".to_string(),
        Button::Next => "⏭".to_string(),
        Button::SetA => "A".to_string(),
        Button::All => "ALL".to_string(),
        Button::SetB => "B".to_string(),
        Button::Repeat(mode) => {
            if session.repeat_mode() == mode
                && let Some(limit) = mode.limit()
            {
                format!("{} {}/{}", mode.label(), session.repeat_count(), limit)
            } else {
                mode.label().to_string()
            }
        }
        Button::Slot(number) => number.to_string(),
    }
}

fn draw_button(f: &mut Frame, area: Rect, label: String, active: bool, enabled: bool) {
    let style = if !enabled {
        Style::default().fg(Color::DarkGray)
    } else if active {
        Style::default().fg(Color::Black).bg(ACCENT)
    } else {
        Style::default()
    };
    let block = Block::default().borders(Borders::ALL).border_style(if enabled {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    });
    let paragraph = Paragraph::new(Span::styled(label, style))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(paragraph, area);
}

fn draw_buttons<B: MediaBackend>(f: &mut Frame, layout: &CardLayout, app: &App<B>) {
    let session = &app.session;
    let has_media = session.has_media();
    let can_skip = session.playlist().len() > 1;

    for (area, button) in layout.transport.iter().zip(TRANSPORT) {
        let enabled = match button {
            Button::Previous | Button::Next => can_skip,
            _ => has_media,
        };
        let active = button == Button::PlayPause && session.is_playing();
        draw_button(f, *area, button_label(button, app), active, enabled);
    }

    for (area, button) in layout.region_buttons.iter().zip(REGION_BUTTONS) {
        draw_button(f, *area, button_label(button, app), false, has_media);
    }

    for (area, button) in layout.repeat_buttons.iter().zip(REPEAT_BUTTONS) {
        let active = matches!(button, Button::Repeat(mode) if mode == session.repeat_mode());
        draw_button(f, *area, button_label(button, app), active, true);
    }
}

/// Vertical bar filled from the bottom.
fn vertical_bar(area: Rect, fraction: f32, color: Color) -> Paragraph<'static> {
    let height = area.height as usize;
    let filled = (fraction.clamp(0.0, 1.0) * height as f32).round() as usize;
    let width = area.width as usize;
    let lines: Vec<Line> = (0..height)
        .map(|row| {
            if row >= height - filled {
                Line::from(Span::styled("█".repeat(width), Style::default().fg(color)))
            } else {
                Line::from(Span::styled("·".repeat(width), Style::default().fg(Color::DarkGray)))
            }
        })
        .collect();
    Paragraph::new(lines)
}

fn draw_gauges<B: MediaBackend>(f: &mut Frame, layout: &CardLayout, app: &App<B>) {
    let session = &app.session;
    let dragging = session.dragging();

    let volume_title = format!(" Vol {}% ", session.volume());
    let speed_title = format!(" Speed {:.1}x ", session.speed());

    for (frame, title, target) in [
        (layout.volume_frame, volume_title, DragTarget::Volume),
        (layout.speed_frame, speed_title, DragTarget::Speed),
    ] {
        let color = if dragging == Some(target) {
            Color::Yellow
        } else {
            ACCENT
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        f.render_widget(block, frame);
    }

    let volume_fraction = session.volume() as f32 / VOLUME_MAX as f32;
    let speed_fraction = (session.speed() - SPEED_MIN) / (SPEED_MAX - SPEED_MIN);
    f.render_widget(vertical_bar(layout.volume, volume_fraction, Color::Green), layout.volume);
    f.render_widget(vertical_bar(layout.speed, speed_fraction, Color::Blue), layout.speed);
}

fn draw_slots<B: MediaBackend>(f: &mut Frame, layout: &CardLayout, app: &App<B>) {
    let slots = app.session.slots();
    let has_media = app.session.has_media();
    for (area, index) in layout.slots.iter().zip(SlotIndex::all()) {
        let mut label = button_label(Button::Slot(index.number()), app);
        if slots.is_populated(index) {
            label.push('•');
        }
        let active = slots.selected() == Some(index);
        draw_button(f, *area, label, active, has_media);
    }
}

fn draw_tips<B: MediaBackend>(f: &mut Frame, layout: &CardLayout, app: &App<B>, now: Instant) {
    let Some(tip) = app.tips.as_ref().and_then(|tips| tips.current(now)) else {
        return;
    };
    let line = Line::from(Span::styled(
        format!("Tip: {tip}"),
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    ));
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), layout.tips);
}

fn draw_status<B: MediaBackend>(f: &mut Frame, layout: &CardLayout, app: &App<B>) {
    let line = if let InputMode::OpenPath { buffer, replace } = &app.input {
        let prompt = if *replace { "Replace with: " } else { "Open: " };
        Line::from(vec![
            Span::styled(prompt, Style::default().fg(Color::Yellow)),
            Span::raw(format!("{buffer}_")),
        ])
    } else if let Some(notice) = app.status() {
        let color = match notice.level {
            NoticeLevel::Info => Color::Green,
            NoticeLevel::Warning => Color::Yellow,
            NoticeLevel::Error => Color::Red,
        };
        Line::from(Span::styled(notice.message.clone(), Style::default().fg(color)))
    } else {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(ACCENT));
        Line::from(vec![
            key("[space]"),
            Span::raw(" play  "),
            key("[a/b/l]"),
            Span::raw(" A/B/ALL  "),
            key("[1-5]"),
            Span::raw(" slots  "),
            key("[x/X/i]"),
            Span::raw(" repeat  "),
            key("[o]"),
            Span::raw(" open  "),
            key("[q]"),
            Span::raw(" quit"),
        ])
    };
    f.render_widget(Paragraph::new(line), layout.status);
}
