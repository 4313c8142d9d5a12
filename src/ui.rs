use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableFocusChange, EnableFocusChange};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetForegroundColor, ResetColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use stopwatch_core::{format, format_split, format_total, lap_label, ring_fraction, Controls, LapHistory};

use crate::face;

pub const HELP_TEXT: &str = "STOPWATCH HELP\n\n\
     Space  Start/Pause\n\
     l      Record lap\n\
     r      Reset\n\
     c      Copy laps to file\n\
     ↑/↓    Scroll laps\n\
     ?      Help\n\
     q      Quit\n\n\
     Any key to close";

/// Everything the stopwatch screen shows.
pub struct View<'a> {
    pub elapsed_ms: u64,
    pub laps: &'a LapHistory,
    pub controls: Controls,
    pub lap_scroll_offset: usize,
    pub notice: Option<&'a str>,
    pub sound: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Layout {
    pub face_center: (u16, u16),
    pub radius_y: u16,
    pub list_origin: (u16, u16),
    pub list_rows: usize,
    pub footer_row: u16,
}

/// Face on the left, lap list on the right, two footer lines.
pub fn layout(cols: u16, rows: u16) -> Layout {
    let footer_row = rows.saturating_sub(2);
    let body_rows = footer_row.saturating_sub(3);
    let radius_y = (body_rows.saturating_sub(1) / 2).clamp(2, 9);
    let radius_x = radius_y * 2;
    let face_center = (radius_x + 2, 2 + radius_y);
    let list_x = (face_center.0 + radius_x + 4).min(cols.saturating_sub(1));
    Layout {
        face_center,
        radius_y,
        list_origin: (list_x, 2),
        list_rows: footer_row.saturating_sub(4) as usize,
        footer_row,
    }
}

/// "#01  +00:01.000  00:01.000", most recent first, starting `offset` laps in.
pub fn lap_lines(laps: &LapHistory, offset: usize, max_rows: usize) -> Vec<String> {
    laps.iter_recent()
        .skip(offset)
        .take(max_rows)
        .map(|lap| {
            format!(
                "{:<4} {}  {}",
                lap_label(lap.index),
                format_split(lap.split_ms),
                format_total(lap.total_ms)
            )
        })
        .collect()
}

pub fn enter(out: &mut impl Write) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, Hide, EnableFocusChange)
}

pub fn leave(out: &mut impl Write) -> io::Result<()> {
    execute!(out, DisableFocusChange, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()
}

fn clear_screen(out: &mut impl Write) -> io::Result<()> {
    queue!(out, ResetColor, SetAttribute(Attribute::Reset), Clear(ClearType::All))
}

pub fn draw_stopwatch(out: &mut impl Write, size: (u16, u16), view: &View) -> io::Result<()> {
    let (cols, rows) = size;
    let layout = layout(cols, rows);
    clear_screen(out)?;

    // Header
    queue!(
        out,
        MoveTo(2, 0),
        SetAttribute(Attribute::Bold),
        Print("STOPWATCH"),
        SetAttribute(Attribute::Reset),
    )?;
    let status = view.notice.unwrap_or(view.controls.status);
    let status_x = cols.saturating_sub(status.chars().count() as u16 + 2);
    queue!(out, MoveTo(status_x, 0), Print(status))?;

    // Face with progress ring
    let lit = face::lit_ticks(ring_fraction(view.elapsed_ms));
    for tick in face::ticks(layout.face_center, layout.radius_y) {
        if tick.x >= cols || tick.y >= layout.footer_row {
            continue;
        }
        let is_lit = tick.index < lit;
        let color = if is_lit { Color::Cyan } else { Color::DarkGrey };
        queue!(
            out,
            MoveTo(tick.x, tick.y),
            SetForegroundColor(color),
            Print(face::glyph(&tick, is_lit)),
        )?;
    }
    queue!(out, ResetColor)?;

    // Digital readout
    let parts = format(view.elapsed_ms);
    let readout = format!("{}:{}.{}", parts.m(), parts.s(), parts.ms());
    let (cx, cy) = layout.face_center;
    let readout_x = cx.saturating_sub(readout.chars().count() as u16 / 2);
    let running = view.controls.lap_enabled;
    queue!(out, MoveTo(readout_x, cy), SetAttribute(Attribute::Bold))?;
    if running {
        queue!(out, SetForegroundColor(Color::Green))?;
    }
    queue!(out, Print(&readout), ResetColor, SetAttribute(Attribute::Reset))?;

    // Lap list
    let (lx, ly) = layout.list_origin;
    if !view.laps.is_empty() && lx + 1 < cols {
        queue!(
            out,
            MoveTo(lx, ly),
            SetAttribute(Attribute::Underlined),
            Print("LAP  SPLIT       TOTAL"),
            SetAttribute(Attribute::Reset),
        )?;
        let lines = lap_lines(view.laps, view.lap_scroll_offset, layout.list_rows);
        for (i, line) in lines.iter().enumerate() {
            queue!(out, MoveTo(lx, ly + 1 + i as u16), Print(line))?;
        }
        let hidden = view.laps.len().saturating_sub(view.lap_scroll_offset + lines.len());
        if hidden > 0 {
            queue!(
                out,
                MoveTo(lx, ly + 1 + lines.len() as u16),
                SetForegroundColor(Color::DarkGrey),
                Print(format!("… {} more", hidden)),
                ResetColor,
            )?;
        }
    }

    // Footer
    let controls = &view.controls;
    queue!(
        out,
        MoveTo(2, layout.footer_row),
        Print(format!("Space={}  ", controls.primary_label.to_lowercase())),
    )?;
    footer_item(out, "l=lap  ", controls.lap_enabled)?;
    footer_item(out, "r=reset  ", controls.reset_enabled)?;
    queue!(
        out,
        Print("c=copy"),
        MoveTo(2, layout.footer_row + 1),
        Print(format!(
            "?=help  q=quit  sound {}",
            if view.sound { "on" } else { "off" }
        )),
    )?;

    out.flush()
}

fn footer_item(out: &mut impl Write, text: &str, enabled: bool) -> io::Result<()> {
    if enabled {
        queue!(out, Print(text))
    } else {
        queue!(out, SetForegroundColor(Color::DarkGrey), Print(text), ResetColor)
    }
}

pub fn draw_help(out: &mut impl Write, size: (u16, u16), text: &str) -> io::Result<()> {
    clear_screen(out)?;
    let top = 1;
    for (i, line) in text.lines().enumerate() {
        let y = top + i as u16;
        if y >= size.1 {
            break;
        }
        queue!(out, MoveTo(4, y))?;
        if i == 0 {
            queue!(out, SetAttribute(Attribute::Bold), Print(line), SetAttribute(Attribute::Reset))?;
        } else {
            queue!(out, Print(line))?;
        }
    }
    out.flush()
}
