use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use maze_chase::agent::Rgb;
use maze_chase::effects::ParticleField;
use maze_chase::{Game, Phase, Pos, Tile};
use unicode_width::UnicodeWidthStr;

const CELL_W: usize = 2;
/// HUD above the grid, overlay and notice lines below it.
const CHROME_ROWS: usize = 3;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Seeker,
    Chaser,
    Scared,
    Spark,
    Ember,
    Wall,
    Empty,
    House,
    Pellet,
    Power,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: Glyph::Empty,
    color: Color::Reset,
};

/// Redraws only what changed since the last frame.
pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    last_overlay: String,
    last_notice: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![BLANK; width * height],
            last_hud: String::new(),
            last_overlay: String::new(),
            last_notice: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    pub fn draw(
        &mut self,
        stdout: &mut Stdout,
        game: &Game,
        particles: &ParticleField,
        notice: Option<&str>,
    ) -> io::Result<()> {
        let grid = game.grid();
        let needed_h = (grid.height() + CHROME_ROWS) as u16;
        let needed_w = (grid.width() * CELL_W) as u16;

        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            stdout.queue(MoveTo(0, 0))?;
            stdout.queue(Clear(ClearType::All))?;
            stdout.queue(Print(format!(
                "Terminal too small. Need at least {needed_w}x{needed_h} (cols x rows). Current: {term_w}x{term_h}."
            )))?;
            stdout.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            stdout.queue(Clear(ClearType::All))?;
        }

        let hud = format!(
            "Score: {}  Lives: {}  Level: {}  Pellets: {}  Power: {}",
            game.score(),
            game.lives(),
            game.level(),
            grid.remaining_collectibles(),
            game.power_timer()
        );
        if self.needs_full || hud != self.last_hud {
            self.line(stdout, self.origin_y - 1, &hud, Color::White)?;
            self.last_hud = hud;
        }

        let sparks = spark_cells(particles, grid.width(), grid.height());
        for pos in grid.positions() {
            let idx = pos.y * grid.width() + pos.x;
            let cell = cell_for(game, pos).or(sparks[idx]).unwrap_or_else(|| tile_cell(grid.tile(pos)));
            if self.needs_full || cell != self.last[idx] {
                self.last[idx] = cell;
                self.draw_cell(stdout, pos, cell)?;
            }
        }

        let below = self.origin_y + grid.height() as u16;
        let overlay = overlay_text(game);
        if self.needs_full || overlay != self.last_overlay {
            self.line(stdout, below, &overlay, Color::Yellow)?;
            self.last_overlay = overlay;
        }
        let notice = notice.unwrap_or_default();
        if self.needs_full || notice != self.last_notice {
            self.line(stdout, below + 1, notice, Color::Cyan)?;
            self.last_notice = notice.to_string();
        }

        self.needs_full = false;
        stdout.flush()
    }

    fn line(&self, stdout: &mut Stdout, y: u16, text: &str, color: Color) -> io::Result<()> {
        stdout.queue(MoveTo(self.origin_x, y))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(SetForegroundColor(color))?;
        stdout.queue(Print(text))?;
        stdout.queue(ResetColor)?;
        Ok(())
    }

    fn draw_cell(&self, stdout: &mut Stdout, pos: Pos, cell: Cell) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Seeker => "ᗧ",
            Glyph::Chaser | Glyph::Scared => "ᗣ",
            Glyph::Spark => "*",
            Glyph::Ember => "+",
            Glyph::Wall => "██",
            Glyph::Empty | Glyph::House => "  ",
            Glyph::Pellet => "·",
            Glyph::Power => "●",
        };
        stdout.queue(MoveTo(
            self.origin_x + (pos.x * CELL_W) as u16,
            self.origin_y + pos.y as u16,
        ))?;
        stdout.queue(SetForegroundColor(cell.color))?;
        stdout.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        for _ in w..CELL_W {
            stdout.queue(Print(' '))?;
        }
        stdout.queue(ResetColor)?;
        Ok(())
    }
}

/// Agents drawn on top of everything else; the seeker wins a shared cell.
fn cell_for(game: &Game, pos: Pos) -> Option<Cell> {
    if game.seeker().pos == pos {
        return Some(Cell {
            glyph: Glyph::Seeker,
            color: Color::Yellow,
        });
    }
    let chaser = game.chasers().iter().find(|c| c.pos == pos)?;
    Some(if chaser.scared {
        Cell {
            glyph: Glyph::Scared,
            color: Color::Blue,
        }
    } else {
        Cell {
            glyph: Glyph::Chaser,
            color: rgb(chaser.color()),
        }
    })
}

fn tile_cell(tile: Tile) -> Cell {
    match tile {
        Tile::Wall => Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        Tile::Open => BLANK,
        Tile::GhostArea => Cell {
            glyph: Glyph::House,
            color: Color::Reset,
        },
        Tile::Pellet => Cell {
            glyph: Glyph::Pellet,
            color: Color::White,
        },
        Tile::PowerPellet => Cell {
            glyph: Glyph::Power,
            color: Color::Magenta,
        },
    }
}

/// Particles binned into grid cells; the freshest particle colours the cell.
fn spark_cells(particles: &ParticleField, width: usize, height: usize) -> Vec<Option<Cell>> {
    let mut cells: Vec<Option<(f32, Cell)>> = vec![None; width * height];
    for p in particles.particles() {
        if p.x < 0.0 || p.y < 0.0 {
            continue;
        }
        let (x, y) = (p.x as usize, p.y as usize);
        if x >= width || y >= height {
            continue;
        }
        let slot = &mut cells[y * width + x];
        if slot.map_or(true, |(life, _)| p.life > life) {
            let glyph = if p.size >= 3.0 { Glyph::Spark } else { Glyph::Ember };
            *slot = Some((
                p.life,
                Cell {
                    glyph,
                    color: rgb(p.color),
                },
            ));
        }
    }
    cells.into_iter().map(|slot| slot.map(|(_, cell)| cell)).collect()
}

fn overlay_text(game: &Game) -> String {
    match game.phase() {
        Phase::Idle => "Press Enter to start  (arrows/WASD/hjkl move, q quits)".to_string(),
        Phase::Paused => "PAUSED  p or Enter resumes, F5 saves, F9 loads".to_string(),
        Phase::GameOver => format!(
            "GAME OVER - Final Score: {}  (Enter plays again, q quits)",
            game.score()
        ),
        Phase::Playing => String::new(),
    }
}

fn rgb(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}
