//! Shared model for the gridwalk demos.
//!
//! [`Visualizer`] is the interactive terminal front-end: the grid is drawn two
//! terminal columns per cell with a controls/message panel to its right, and
//! a search runs a few engine steps per frame so its progress is visible.

pub mod config;
pub mod layout;

use gridwalk_core::{
    CellState, Grid, Pos,
    app::{Effect, Model},
    messages::{Key, MouseAction, Msg},
    screen::{Glyph, Screen, ScreenPos},
    style::{AttrMask, Color, Style},
};
use gridwalk_search::{Search, SearchOutcome, Step};
use log::{debug, info};

pub use config::{ConfigError, DemoConfig, load_config};
pub use layout::{CAMPUS, apply_campus, prepare_grid};

/// Terminal columns per grid cell, so cells look roughly square.
pub const CELL_WIDTH: i32 = 2;
/// Width of the panel right of the grid.
pub const PANEL_WIDTH: i32 = 44;

const PANEL_GAP: i32 = 2;
const MAX_MESSAGES: usize = 12;

const COL_TEXT: Color = Color::from_rgb(200, 200, 200);
const COL_TITLE: Color = Color::ORANGE;
const COL_DIM: Color = Color::GREY;

const CONTROLS: [&str; 9] = [
    "Left mouse:  place start, end, barriers",
    "Right mouse: remove start, end, barrier",
    "Space:       run A*",
    "Esc:         abort search / quit",
    "C:           clear grid",
    "P:           print barrier coordinates",
    "L:           load campus layout",
    "Q:           quit",
    "",
];

/// Lines the panel needs above the message log.
const PANEL_HEADER_LINES: i32 = CONTROLS.len() as i32 + 7;

/// Screen size needed to show a grid of `rows` rows and the panel.
pub fn screen_size(rows: i32) -> (i32, i32) {
    let width = rows * CELL_WIDTH + PANEL_GAP + PANEL_WIDTH;
    let height = rows.max(PANEL_HEADER_LINES + MAX_MESSAGES as i32);
    (width, height)
}

/// The interactive grid editor and search animator.
pub struct Visualizer {
    grid: Grid,
    config: DemoConfig,
    search: Option<Search>,
    messages: Vec<String>,
}

impl Visualizer {
    pub fn new(config: DemoConfig) -> Self {
        let grid = prepare_grid(&config);
        let mut vis = Self {
            grid,
            config,
            search: None,
            messages: Vec::new(),
        };
        vis.log(format!(
            "{0}x{0} grid, {1} barriers",
            vis.grid.size(),
            vis.grid.barrier_coordinates().len()
        ));
        vis
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    /// Panel messages, oldest first.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    fn log(&mut self, msg: String) {
        debug!("{msg}");
        self.messages.push(msg);
        if self.messages.len() > MAX_MESSAGES {
            let excess = self.messages.len() - MAX_MESSAGES;
            self.messages.drain(..excess);
        }
    }

    /// Map a terminal position onto the grid cell drawn there.
    fn cell_at(&self, p: ScreenPos) -> Option<Pos> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        let pos = Pos::new(p.y, p.x / CELL_WIDTH);
        self.grid.contains(pos).then_some(pos)
    }

    fn place(&mut self, p: Pos) {
        let start = self.grid.start();
        let end = self.grid.end();
        if start.is_none() && end != Some(p) {
            self.grid.mark_start(p);
        } else if end.is_none() && start != Some(p) {
            self.grid.mark_end(p);
        } else if start != Some(p) && end != Some(p) && !self.grid.cell(p).is_barrier() {
            self.grid.mark_barrier(p);
        }
    }

    fn remove(&mut self, p: Pos) {
        if !self.grid.cell(p).is_empty() {
            self.grid.clear_cell(p);
        }
    }

    fn start_search(&mut self) -> Option<Effect> {
        self.grid.reset_search_marks();
        self.grid.recompute_all_neighbors();
        match Search::new(&self.grid, self.grid.start(), self.grid.end()) {
            Ok(search) => {
                let (s, e) = (search.start(), search.end());
                self.search = Some(search);
                self.log(format!("Searching {s} -> {e}"));
                Some(Effect::Animate(true))
            }
            Err(e) => {
                self.log(format!("Cannot search: {e}"));
                None
            }
        }
    }

    /// Run this frame's share of search steps.
    fn advance(&mut self) -> Option<Effect> {
        let search = self.search.as_mut()?;
        for _ in 0..self.config.steps_per_tick {
            if let Step::Finished(outcome) = search.step(&mut self.grid) {
                let expansions = search.expansions();
                self.search = None;
                self.report(outcome, expansions);
                return Some(Effect::Animate(false));
            }
        }
        None
    }

    fn abort_search(&mut self) -> Option<Effect> {
        let mut search = self.search.take()?;
        let outcome = search.abort();
        self.report(outcome, search.expansions());
        Some(Effect::Animate(false))
    }

    fn report(&mut self, outcome: SearchOutcome, expansions: usize) {
        let msg = match outcome {
            SearchOutcome::Found(path) => format!(
                "Path found: {} moves, {expansions} expanded",
                path.cost()
            ),
            SearchOutcome::NotFound => format!("No path ({expansions} expanded)"),
            SearchOutcome::Aborted => format!("Search aborted ({expansions} expanded)"),
        };
        self.log(msg);
    }

    fn print_barriers(&mut self) {
        let coords = self.grid.barrier_coordinates().to_vec();
        info!("Coordinates of barriers:");
        for p in &coords {
            info!("{p}");
        }
        self.log(format!("Barriers ({}):", coords.len()));

        let mut line = String::new();
        for p in &coords {
            let item = p.to_string();
            if !line.is_empty() && line.len() + 1 + item.len() > PANEL_WIDTH as usize {
                self.log(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&item);
        }
        if !line.is_empty() {
            self.log(line);
        }
    }

    fn reset(&mut self, campus: bool) {
        let config = DemoConfig {
            campus_layout: campus,
            start: None,
            end: None,
            ..self.config.clone()
        };
        self.grid = prepare_grid(&config);
        if campus {
            self.log(format!(
                "Campus layout loaded ({} barriers)",
                self.grid.barrier_coordinates().len()
            ));
        } else {
            self.log("Grid cleared".into());
        }
    }

    fn draw_panel(&self, screen: &mut Screen, x: i32) {
        let text = Style::default().with_fg(COL_TEXT);
        let title = Style::default()
            .with_fg(COL_TITLE)
            .with_attrs(AttrMask::BOLD);
        let dim = Style::default().with_fg(COL_DIM);

        let mut y = 0;
        screen.print(ScreenPos::new(x, y), "Controls:", title);
        y += 1;
        for line in CONTROLS {
            screen.print(ScreenPos::new(x, y), line, text);
            y += 1;
        }

        let state = match &self.search {
            Some(s) => format!("searching ({} expanded)", s.expansions()),
            None => "editing".to_string(),
        };
        let show = |p: Option<Pos>| p.map_or_else(|| "-".to_string(), |p| p.to_string());
        let status = [
            format!("Status:   {state}"),
            format!("Start:    {}", show(self.grid.start())),
            format!("End:      {}", show(self.grid.end())),
            format!("Barriers: {}", self.grid.barrier_coordinates().len()),
        ];
        for line in &status {
            screen.print(ScreenPos::new(x, y), line, text);
            y += 1;
        }

        y += 1;
        screen.print(ScreenPos::new(x, y), "Messages:", title);
        y += 1;
        for msg in &self.messages {
            screen.print(ScreenPos::new(x, y), msg, dim);
            y += 1;
        }
    }
}

impl Model for Visualizer {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => None,
            Msg::Quit => Some(Effect::End),
            Msg::Tick => self.advance(),

            Msg::KeyDown { key } => {
                if self.search.is_some() {
                    return match key {
                        Key::Escape => self.abort_search(),
                        Key::Char('q') | Key::Char('Q') => Some(Effect::End),
                        _ => None,
                    };
                }
                match key {
                    Key::Escape | Key::Char('q') | Key::Char('Q') => Some(Effect::End),
                    Key::Space => self.start_search(),
                    Key::Char('c') | Key::Char('C') => {
                        self.reset(false);
                        None
                    }
                    Key::Char('l') | Key::Char('L') => {
                        self.reset(true);
                        None
                    }
                    Key::Char('p') | Key::Char('P') => {
                        self.print_barriers();
                        None
                    }
                    _ => None,
                }
            }

            Msg::Mouse { action, pos } => {
                if self.search.is_some() {
                    return None;
                }
                if let Some(p) = self.cell_at(pos) {
                    match action {
                        MouseAction::Main => self.place(p),
                        MouseAction::Secondary => self.remove(p),
                    }
                }
                None
            }

            Msg::Resize { .. } => None,
        }
    }

    fn draw(&self, screen: &mut Screen) {
        screen.fill(Glyph::default());

        for cell in &self.grid {
            let p = cell.position();
            let base = Glyph::default()
                .with_style(Style::default().with_bg(Color::for_state(cell.state())));
            // Endpoints get a letter so they stay visible on any palette.
            let first = match cell.state() {
                CellState::Start => base.with_char('S'),
                CellState::End => base.with_char('E'),
                _ => base,
            };
            let first = if first.ch == ' ' {
                first
            } else {
                first.with_style(
                    first
                        .style
                        .with_fg(Color::WHITE)
                        .with_attrs(AttrMask::BOLD),
                )
            };
            let x = p.col * CELL_WIDTH;
            screen.set(ScreenPos::new(x, p.row), first);
            for dx in 1..CELL_WIDTH {
                screen.set(ScreenPos::new(x + dx, p.row), base);
            }
        }

        let panel_x = self.grid.size() * CELL_WIDTH + PANEL_GAP;
        self.draw_panel(screen, panel_x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(rows: i32) -> Visualizer {
        Visualizer::new(DemoConfig {
            rows,
            campus_layout: false,
            ..DemoConfig::default()
        })
    }

    fn click(vis: &mut Visualizer, action: MouseAction, p: Pos) -> Option<Effect> {
        vis.update(Msg::mouse(
            action,
            ScreenPos::new(p.col * CELL_WIDTH, p.row),
        ))
    }

    fn press(vis: &mut Visualizer, ch: char) -> Option<Effect> {
        vis.update(Msg::key(Key::Char(ch)))
    }

    /// Tick until the model stops animating; returns the number of ticks.
    fn run_to_end(vis: &mut Visualizer) -> usize {
        let mut ticks = 0;
        while vis.is_searching() {
            ticks += 1;
            assert!(ticks < 10_000, "search never finished");
            vis.update(Msg::Tick);
        }
        ticks
    }

    #[test]
    fn left_clicks_place_start_end_then_barriers() {
        let mut vis = blank(5);
        click(&mut vis, MouseAction::Main, Pos::new(0, 0));
        click(&mut vis, MouseAction::Main, Pos::new(4, 4));
        click(&mut vis, MouseAction::Main, Pos::new(2, 2));
        // Clicking an endpoint again never turns it into a barrier.
        click(&mut vis, MouseAction::Main, Pos::new(0, 0));
        let g = vis.grid();
        assert_eq!(g.start(), Some(Pos::new(0, 0)));
        assert_eq!(g.end(), Some(Pos::new(4, 4)));
        assert_eq!(g.barrier_coordinates(), &[Pos::new(2, 2)]);
    }

    #[test]
    fn second_column_of_a_cell_maps_to_it() {
        let mut vis = blank(5);
        vis.update(Msg::mouse(MouseAction::Main, ScreenPos::new(7, 2)));
        assert_eq!(vis.grid().start(), Some(Pos::new(2, 3)));
        // The panel is not part of the grid.
        vis.update(Msg::mouse(MouseAction::Main, ScreenPos::new(12, 0)));
        assert_eq!(vis.grid().end(), None);
    }

    #[test]
    fn right_click_unsets_endpoints() {
        let mut vis = blank(5);
        click(&mut vis, MouseAction::Main, Pos::new(1, 1));
        click(&mut vis, MouseAction::Main, Pos::new(3, 3));
        click(&mut vis, MouseAction::Secondary, Pos::new(1, 1));
        assert_eq!(vis.grid().start(), None);
        // The next left click becomes the new start.
        click(&mut vis, MouseAction::Main, Pos::new(0, 4));
        assert_eq!(vis.grid().start(), Some(Pos::new(0, 4)));
    }

    #[test]
    fn space_animates_until_found() {
        let mut vis = blank(5);
        click(&mut vis, MouseAction::Main, Pos::new(0, 0));
        click(&mut vis, MouseAction::Main, Pos::new(4, 4));
        assert_eq!(
            vis.update(Msg::key(Key::Space)),
            Some(Effect::Animate(true))
        );
        assert!(vis.is_searching());
        // 4 expansions, 3 path marks, the end repaint, then the finish.
        assert_eq!(run_to_end(&mut vis), 9);
        assert_eq!(vis.grid().count(CellState::Path), 3);
        assert!(
            vis.messages()
                .last()
                .is_some_and(|m| m.starts_with("Path found: 4 moves"))
        );
    }

    #[test]
    fn steps_per_tick_speeds_up_the_animation() {
        let mut vis = Visualizer::new(DemoConfig {
            rows: 5,
            steps_per_tick: 4,
            campus_layout: false,
            start: Some(Pos::new(0, 0)),
            end: Some(Pos::new(4, 4)),
        });
        vis.update(Msg::key(Key::Space));
        assert_eq!(run_to_end(&mut vis), 3);
    }

    #[test]
    fn editing_is_locked_while_searching() {
        let mut vis = Visualizer::new(DemoConfig {
            rows: 8,
            campus_layout: false,
            start: Some(Pos::new(0, 0)),
            end: Some(Pos::new(7, 7)),
            ..DemoConfig::default()
        });
        vis.update(Msg::key(Key::Space));
        click(&mut vis, MouseAction::Main, Pos::new(5, 1));
        press(&mut vis, 'c');
        assert!(vis.grid().barrier_coordinates().is_empty());
        assert_eq!(vis.grid().start(), Some(Pos::new(0, 0)));
    }

    #[test]
    fn escape_aborts_then_quits() {
        let mut vis = Visualizer::new(DemoConfig {
            rows: 8,
            campus_layout: false,
            start: Some(Pos::new(0, 0)),
            end: Some(Pos::new(7, 7)),
            ..DemoConfig::default()
        });
        vis.update(Msg::key(Key::Space));
        vis.update(Msg::Tick);
        assert_eq!(
            vis.update(Msg::key(Key::Escape)),
            Some(Effect::Animate(false))
        );
        assert!(!vis.is_searching());
        assert!(
            vis.messages()
                .last()
                .is_some_and(|m| m.starts_with("Search aborted"))
        );
        assert_eq!(vis.update(Msg::key(Key::Escape)), Some(Effect::End));
    }

    #[test]
    fn rerun_wipes_previous_marks() {
        let mut vis = Visualizer::new(DemoConfig {
            rows: 5,
            campus_layout: false,
            start: Some(Pos::new(0, 0)),
            end: Some(Pos::new(0, 4)),
            ..DemoConfig::default()
        });
        vis.update(Msg::key(Key::Space));
        run_to_end(&mut vis);
        assert_eq!(vis.grid().count(CellState::Path), 3);

        // Wall off the end, then search again from a clean slate.
        for r in 0..5 {
            click(&mut vis, MouseAction::Main, Pos::new(r, 3));
        }
        vis.update(Msg::key(Key::Space));
        run_to_end(&mut vis);
        assert_eq!(vis.grid().count(CellState::Path), 0);
        assert!(
            vis.messages()
                .last()
                .is_some_and(|m| m.starts_with("No path"))
        );
    }

    #[test]
    fn space_without_endpoints_reports() {
        let mut vis = blank(4);
        assert_eq!(vis.update(Msg::key(Key::Space)), None);
        assert!(!vis.is_searching());
        assert_eq!(
            vis.messages().last().map(String::as_str),
            Some("Cannot search: invalid endpoints: no start cell")
        );
    }

    #[test]
    fn clear_and_reload() {
        let mut vis = Visualizer::new(DemoConfig::default());
        assert_eq!(vis.grid().barrier_coordinates().len(), 301);
        click(&mut vis, MouseAction::Main, Pos::new(12, 6));
        press(&mut vis, 'c');
        assert!(vis.grid().barrier_coordinates().is_empty());
        assert_eq!(vis.grid().start(), None);
        press(&mut vis, 'l');
        assert_eq!(vis.grid().barrier_coordinates().len(), 301);
    }

    #[test]
    fn print_lists_barriers() {
        let mut vis = blank(4);
        click(&mut vis, MouseAction::Main, Pos::new(0, 0));
        click(&mut vis, MouseAction::Main, Pos::new(3, 3));
        click(&mut vis, MouseAction::Main, Pos::new(1, 2));
        click(&mut vis, MouseAction::Main, Pos::new(2, 1));
        press(&mut vis, 'p');
        let n = vis.messages().len();
        assert_eq!(vis.messages()[n - 2], "Barriers (2):");
        assert_eq!(vis.messages()[n - 1], "(1, 2) (2, 1)");
    }

    #[test]
    fn message_log_is_bounded() {
        let mut vis = blank(4);
        for _ in 0..(MAX_MESSAGES + 5) {
            vis.update(Msg::key(Key::Space));
        }
        assert_eq!(vis.messages().len(), MAX_MESSAGES);
    }

    #[test]
    fn draw_paints_cells_two_columns_wide() {
        let mut vis = blank(4);
        click(&mut vis, MouseAction::Main, Pos::new(1, 2));
        click(&mut vis, MouseAction::Main, Pos::new(3, 0));
        click(&mut vis, MouseAction::Main, Pos::new(0, 3));
        let (w, h) = screen_size(4);
        let mut screen = Screen::new(w, h);
        vis.draw(&mut screen);

        let start = screen.at(ScreenPos::new(4, 1));
        assert_eq!(start.ch, 'S');
        assert_eq!(start.style.bg, Color::ORANGE);
        assert_eq!(screen.at(ScreenPos::new(5, 1)).style.bg, Color::ORANGE);
        assert_eq!(screen.at(ScreenPos::new(6, 0)).style.bg, Color::BLACK);
        assert_eq!(screen.at(ScreenPos::new(0, 0)).style.bg, Color::WHITE);
        assert_eq!(screen.at(ScreenPos::new(10, 0)).ch, 'C');
    }

    #[test]
    fn screen_fits_grid_and_panel() {
        let (w, h) = screen_size(40);
        assert_eq!(w, 80 + PANEL_GAP + PANEL_WIDTH);
        assert_eq!(h, 40);
        assert!(screen_size(5).1 >= PANEL_HEADER_LINES);
    }
}
