use std::fmt::{Display, Formatter};
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use gridspiel_core::game::Action;

pub const FIELD_SIZE: usize = 8;
pub const NUM_ACTIONS: usize = BoxAction::LENGTH;

pub const DELAY_PENALTY: f64 = -0.1;
pub const BUMP_PENALTY: f64 = -5.0;
pub const SMALL_BOX_REWARD: f64 = 10.0;
pub const BIG_BOX_REWARD: f64 = 100.0;

/// Probability that move chosen by agent is actually executed.
pub const SUCCESS_PROBABILITY: f64 = 0.9;

pub const CHANCE_SUCCESS: Action = 0;
pub const CHANCE_FAIL: Action = 1;
pub const CHANCE_INIT_PLAYER_0: Action = 2;
pub const CHANCE_INIT_PLAYER_1: Action = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum Heading{
    North,
    East,
    South,
    West,
}

impl Heading{
    pub fn delta(&self) -> (i32, i32){
        match self{
            Heading::North => (-1, 0),
            Heading::East => (0, 1),
            Heading::South => (1, 0),
            Heading::West => (0, -1),
        }
    }

    pub fn turned_left(&self) -> Self{
        Heading::from_usize((self.into_usize() + 3) % 4)
    }

    pub fn turned_right(&self) -> Self{
        Heading::from_usize((self.into_usize() + 1) % 4)
    }

    pub fn symbol(&self) -> char{
        match self{
            Heading::North => '^',
            Heading::East => '>',
            Heading::South => 'v',
            Heading::West => '<',
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Enum, Serialize, Deserialize)]
pub enum BoxAction{
    TurnLeft,
    TurnRight,
    MoveForward,
    Stay,
}

impl BoxAction{
    pub fn from_action(action: Action) -> Option<Self>{
        (action < BoxAction::LENGTH).then(|| BoxAction::from_usize(action))
    }
}

impl Display for BoxAction{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self{
            BoxAction::TurnLeft => "turn left",
            BoxAction::TurnRight => "turn right",
            BoxAction::MoveForward => "move forward",
            BoxAction::Stay => "stay",
        };
        write!(f, "{name}")
    }
}

/// Content of field square (agents are kept apart).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Enum, Serialize, Deserialize)]
pub enum Square{
    Empty,
    SmallBox,
    BigBox,
}

impl Square{
    pub fn symbol(&self) -> char{
        match self{
            Square::Empty => '.',
            Square::SmallBox => 'b',
            Square::BigBox => 'B',
        }
    }
}

/// What agent sees in the square in front of it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Enum, Serialize, Deserialize)]
pub enum FrontView{
    Empty,
    Wall,
    Agent,
    SmallBox,
    BigBox,
}

impl Display for FrontView{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self{
            FrontView::Empty => "empty",
            FrontView::Wall => "wall",
            FrontView::Agent => "agent",
            FrontView::SmallBox => "small box",
            FrontView::BigBox => "big box",
        };
        write!(f, "{name}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord{
    pub row: i32,
    pub col: i32,
}

impl Coord{
    pub const fn new(row: i32, col: i32) -> Self{
        Self{row, col}
    }

    pub fn ahead(&self, heading: Heading) -> Self{
        let (dr, dc) = heading.delta();
        Self{row: self.row + dr, col: self.col + dc}
    }

    pub fn in_field(&self) -> bool{
        (0..FIELD_SIZE as i32).contains(&self.row) && (0..FIELD_SIZE as i32).contains(&self.col)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxAgent{
    pub coord: Coord,
    pub heading: Heading,
}

impl BoxAgent{
    pub const fn new(row: i32, col: i32, heading: Heading) -> Self{
        Self{coord: Coord::new(row, col), heading}
    }

    pub fn front(&self) -> Coord{
        self.coord.ahead(self.heading)
    }
}

#[cfg(test)]
mod tests{
    use crate::coop_box_pushing::{BoxAction, Coord, Heading};

    #[test]
    fn headings_and_actions(){
        assert_eq!(Heading::North.turned_left(), Heading::West);
        assert_eq!(Heading::West.turned_right(), Heading::North);
        assert_eq!(BoxAction::from_action(2), Some(BoxAction::MoveForward));
        assert_eq!(BoxAction::from_action(4), None);
        assert_eq!(BoxAction::TurnRight.to_string(), "turn right");
        assert!(!Coord::new(0, 0).ahead(Heading::North).in_field());
        assert!(Coord::new(7, 7).in_field());
    }
}
