use std::fmt::{Display, Formatter};
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use gridspiel_core::game::Action;

/// Types of cells in the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Enum, Serialize, Deserialize)]
pub enum CellType{
    /// Agents can walk freely.
    Empty,
    /// No agent can move in.
    Wall,
    /// Agents die when they enter.
    Lava,
    /// Reaching it ends simple game.
    Goal,
    /// Synchronisation point of synchro game.
    Synchro,
}

impl CellType{
    pub fn symbol(&self) -> char{
        match self{
            CellType::Empty => '.',
            CellType::Wall => '#',
            CellType::Lava => '~',
            CellType::Goal => 'G',
            CellType::Synchro => 'S',
        }
    }
}

/// Colors distinguishing agents and matching keys with doors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Enum, Serialize, Deserialize)]
pub enum Color{
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Cyan,
    Pink,
}

impl Color{
    /// Color of agent with given id, palette repeats every 8 agents.
    pub fn for_agent(id: usize) -> Self{
        Color::from_usize(id % Color::LENGTH)
    }
}

/// Facing direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Enum, Serialize, Deserialize)]
pub enum Direction{
    North,
    East,
    South,
    West,
}

impl Direction{
    pub fn delta(&self) -> (i32, i32){
        match self{
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    pub fn rotate_left(&self) -> Self{
        Direction::from_usize((self.into_usize() + 3) % 4)
    }

    pub fn rotate_right(&self) -> Self{
        Direction::from_usize((self.into_usize() + 1) % 4)
    }

    pub fn symbol(&self) -> char{
        match self{
            Direction::North => '^',
            Direction::East => '>',
            Direction::South => 'v',
            Direction::West => '<',
        }
    }
}

/// Actions available to agents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Enum, Serialize, Deserialize)]
pub enum CompanionAction{
    North,
    East,
    South,
    West,
    Interact,
    Stay,
}

impl CompanionAction{
    /// Unknown identifiers are treated as [`Stay`](CompanionAction::Stay).
    pub fn from_action(action: Action) -> Self{
        if action < CompanionAction::LENGTH{
            CompanionAction::from_usize(action)
        } else {
            CompanionAction::Stay
        }
    }

    pub fn movement(&self) -> Option<Direction>{
        match self{
            CompanionAction::North => Some(Direction::North),
            CompanionAction::East => Some(Direction::East),
            CompanionAction::South => Some(Direction::South),
            CompanionAction::West => Some(Direction::West),
            _ => None
        }
    }
}

impl Display for CompanionAction{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Grid coordinates, signed so that neighbours of border cells can be expressed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position{
    pub row: i32,
    pub col: i32,
}

impl Position{
    pub fn new(row: i32, col: i32) -> Self{
        Self{row, col}
    }

    pub fn step(&self, direction: Direction) -> Self{
        let (dr, dc) = direction.delta();
        Self{row: self.row + dr, col: self.col + dc}
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind{
    Key,
    Treasure,
}

/// Item that can be carried in inventory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickableItem{
    pub kind: ItemKind,
    pub color: Color,
    pub id: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentData{
    pub id: usize,
    pub position: Position,
    pub direction: Direction,
    pub color: Color,
    pub inventory: Vec<PickableItem>,
}

impl AgentData{
    pub fn new(id: usize, position: Position, direction: Direction, color: Color) -> Self{
        Self{id, position, direction, color, inventory: Vec::new()}
    }

    pub fn has_key(&self, color: Color) -> bool{
        self.inventory.iter().any(|i| i.kind == ItemKind::Key && i.color == color)
    }

    /// Removes one key of color, returns `false` if there was none.
    pub fn remove_key(&mut self, color: Color) -> bool{
        match self.inventory.iter().position(|i| i.kind == ItemKind::Key && i.color == color){
            Some(index) => {
                self.inventory.remove(index);
                true
            }
            None => false
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoorData{
    pub position: Position,
    pub color: Color,
    pub required_key: Color,
    pub is_open: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroundItem{
    pub position: Position,
    pub item: PickableItem,
}

pub const NUM_ACTIONS: usize = CompanionAction::LENGTH;
/// Upper limit of agents in one game.
pub const MAX_AGENTS: usize = 25;
pub const MAX_INVENTORY: usize = 8;

pub const STEP_REWARD: f64 = -1.0;
pub const SUCCESS_REWARD: f64 = 100.0;
pub const DEATH_PENALTY: f64 = -100.0;

#[cfg(test)]
mod tests{
    use crate::companion::{Color, CompanionAction, Direction, Position};

    #[test]
    fn rotations_and_steps(){
        assert_eq!(Direction::North.rotate_left(), Direction::West);
        assert_eq!(Direction::West.rotate_right(), Direction::North);
        assert_eq!(Position::new(2, 2).step(Direction::East), Position::new(2, 3));
        assert_eq!(Position::new(0, 0).step(Direction::North), Position::new(-1, 0));
    }

    #[test]
    fn unknown_actions_stay(){
        assert_eq!(CompanionAction::from_action(1), CompanionAction::East);
        assert_eq!(CompanionAction::from_action(17), CompanionAction::Stay);
        assert_eq!(Color::for_agent(9), Color::Blue);
    }
}
