//! Crossterm terminal driver for gridwalk.
//!
//! Provides a [`CrosstermDriver`] that implements [`gridwalk_core::Driver`]:
//! it turns key presses and mouse clicks/drags into [`Msg`]s and paints
//! [`Frame`] diffs with 24-bit colour.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    execute, queue,
    style::{self, Attribute, Color as CtColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridwalk_core::{
    app::{Context, Driver},
    messages::{Key, Msg, MouseAction},
    screen::{Frame, ScreenPos},
    style::{AttrMask, Color},
};

/// Maps a gridwalk [`Color`] to a crossterm colour.
fn to_ct_color(c: Color) -> CtColor {
    if c == Color::DEFAULT {
        CtColor::Reset
    } else {
        let (r, g, b) = c.to_rgb();
        CtColor::Rgb { r, g, b }
    }
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

fn to_button_action(btn: MouseButton) -> Option<MouseAction> {
    match btn {
        MouseButton::Left => Some(MouseAction::Main),
        MouseButton::Right => Some(MouseAction::Secondary),
        MouseButton::Middle => None,
    }
}

/// Translate one crossterm event. Key releases and repeats are dropped so a
/// held key triggers its action once.
fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent { code, kind, .. }) => {
            if kind != KeyEventKind::Press {
                return None;
            }
            to_key(code).map(Msg::key)
        }
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => {
            let action = match kind {
                // A drag paints like repeated clicks.
                MouseEventKind::Down(btn) | MouseEventKind::Drag(btn) => to_button_action(btn)?,
                _ => return None,
            };
            Some(Msg::mouse(action, ScreenPos::new(column as i32, row as i32)))
        }
        Event::Resize(w, h) => Some(Msg::Resize {
            width: w as i32,
            height: h as i32,
        }),
        _ => None,
    }
}

/// A terminal back-end for gridwalk using crossterm.
pub struct CrosstermDriver {
    mouse_enabled: bool,
    frame_time: Duration,
}

impl CrosstermDriver {
    /// Create a new driver with mouse capture and a ~60 Hz poll.
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
            frame_time: Duration::from_millis(16),
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// How long [`Driver::poll_msgs`] waits for input before returning, which
    /// paces animation.
    pub fn with_frame_time(mut self, frame_time: Duration) -> Self {
        self.frame_time = frame_time;
        self
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !event::poll(self.frame_time)? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }
            if let Some(msg) = to_msg(event::read()?) {
                tx.send(msg).ok();
            }
        }

        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout().lock();

        for fg in &frame.glyphs {
            let glyph = &fg.glyph;
            queue!(
                stdout,
                cursor::MoveTo(fg.pos.x as u16, fg.pos.y as u16),
                SetForegroundColor(to_ct_color(glyph.style.fg)),
                SetBackgroundColor(to_ct_color(glyph.style.bg))
            )?;

            let attrs = glyph.style.attrs;
            if attrs.contains(AttrMask::BOLD) {
                queue!(stdout, style::SetAttribute(Attribute::Bold))?;
            }
            if attrs.contains(AttrMask::DIM) {
                queue!(stdout, style::SetAttribute(Attribute::Dim))?;
            }

            write!(stdout, "{}", glyph.ch)?;

            if !attrs.is_empty() {
                queue!(stdout, style::SetAttribute(Attribute::Reset))?;
            }
        }

        queue!(stdout, style::ResetColor)?;
        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(
            stdout,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn space_is_its_own_key() {
        match to_msg(key(KeyCode::Char(' '), KeyEventKind::Press)) {
            Some(Msg::KeyDown { key }) => assert_eq!(key, Key::Space),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn releases_are_dropped() {
        assert!(to_msg(key(KeyCode::Char('c'), KeyEventKind::Release)).is_none());
        assert!(to_msg(key(KeyCode::Char('c'), KeyEventKind::Repeat)).is_none());
    }

    #[test]
    fn drags_act_like_clicks() {
        assert_eq!(
            to_msg(mouse(MouseEventKind::Drag(MouseButton::Left), 7, 3)),
            Some(Msg::mouse(MouseAction::Main, ScreenPos::new(7, 3)))
        );
        assert_eq!(
            to_msg(mouse(MouseEventKind::Down(MouseButton::Right), 0, 0)),
            Some(Msg::mouse(MouseAction::Secondary, ScreenPos::new(0, 0)))
        );
        assert!(to_msg(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0)).is_none());
        assert!(to_msg(mouse(MouseEventKind::Down(MouseButton::Middle), 0, 0)).is_none());
    }

    #[test]
    fn default_colour_resets() {
        assert_eq!(to_ct_color(Color::DEFAULT), CtColor::Reset);
        assert_eq!(
            to_ct_color(Color::BLACK),
            CtColor::Rgb { r: 0, g: 0, b: 1 }
        );
    }
}
