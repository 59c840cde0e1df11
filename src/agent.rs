use crate::grid::{Dir, Pos, MAZE_HEIGHT, MAZE_WIDTH};

pub const SEEKER_SPAWN: Pos = Pos::new(9, 15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Personality {
    Chase,
    Ambush,
    Patrol,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub fn pos(self) -> Pos {
        match self {
            Corner::TopLeft => Pos::new(1, 1),
            Corner::TopRight => Pos::new(MAZE_WIDTH - 2, 1),
            Corner::BottomLeft => Pos::new(1, MAZE_HEIGHT - 2),
            Corner::BottomRight => Pos::new(MAZE_WIDTH - 2, MAZE_HEIGHT - 2),
        }
    }
}

/// Fixed per-chaser configuration.
#[derive(Debug, Clone, Copy)]
pub struct ChaserSpec {
    pub personality: Personality,
    pub color: Rgb,
    pub home: Pos,
    pub scatter_corner: Corner,
}

/// The chaser roster; index order is also the order chasers are saved in.
pub const ROSTER: [ChaserSpec; 4] = [
    ChaserSpec {
        personality: Personality::Chase,
        color: Rgb(255, 50, 50),
        home: Pos::new(8, 9),
        scatter_corner: Corner::TopRight,
    },
    ChaserSpec {
        personality: Personality::Ambush,
        color: Rgb(255, 105, 180),
        home: Pos::new(9, 9),
        scatter_corner: Corner::TopLeft,
    },
    ChaserSpec {
        personality: Personality::Patrol,
        color: Rgb(0, 255, 255),
        home: Pos::new(10, 9),
        scatter_corner: Corner::BottomRight,
    },
    ChaserSpec {
        personality: Personality::Random,
        color: Rgb(255, 165, 0),
        home: Pos::new(9, 10),
        scatter_corner: Corner::BottomLeft,
    },
];

/// Anything that occupies a maze cell and faces a direction.
pub trait Agent {
    fn pos(&self) -> Pos;
    fn facing(&self) -> Dir;

    fn shares_cell(&self, other: &impl Agent) -> bool {
        self.pos() == other.pos()
    }
}

#[derive(Debug, Clone)]
pub struct Seeker {
    pub pos: Pos,
    pub facing: Dir,
    /// Latched input; re-applied every eligible tick until replaced or reset.
    pub pending: Option<Dir>,
}

impl Seeker {
    pub fn new() -> Self {
        Self {
            pos: SEEKER_SPAWN,
            facing: Dir::Right,
            pending: None,
        }
    }

    pub fn respawn(&mut self) {
        self.pos = SEEKER_SPAWN;
        self.pending = None;
    }
}

impl Default for Seeker {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for Seeker {
    fn pos(&self) -> Pos {
        self.pos
    }

    fn facing(&self) -> Dir {
        self.facing
    }
}

#[derive(Debug, Clone)]
pub struct Chaser {
    pub pos: Pos,
    pub facing: Dir,
    spec: ChaserSpec,
    pub scared: bool,
    pub scatter: bool,
}

impl Chaser {
    pub fn new(spec: ChaserSpec) -> Self {
        Self {
            pos: spec.home,
            facing: Dir::Left,
            spec,
            scared: false,
            scatter: false,
        }
    }

    pub fn roster() -> Vec<Chaser> {
        ROSTER.iter().copied().map(Chaser::new).collect()
    }

    pub fn personality(&self) -> Personality {
        self.spec.personality
    }

    pub fn color(&self) -> Rgb {
        self.spec.color
    }

    pub fn home(&self) -> Pos {
        self.spec.home
    }

    pub fn scatter_corner(&self) -> Corner {
        self.spec.scatter_corner
    }

    pub fn send_home(&mut self) {
        self.pos = self.spec.home;
    }
}

impl Agent for Chaser {
    fn pos(&self) -> Pos {
        self.pos
    }

    fn facing(&self) -> Dir {
        self.facing
    }
}
