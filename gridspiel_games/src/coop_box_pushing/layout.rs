use serde::{Deserialize, Serialize};
use gridspiel_core::error::GameError;
use crate::coop_box_pushing::{BoxAgent, Coord, Heading};

pub const MAX_CURRICULUM_LEVEL: usize = 10;

/// Initial placement of boxes and agents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxLayout{
    pub level: usize,
    pub description: String,
    pub small_boxes: Vec<Coord>,
    /// Left square of the big box, which spans two squares in a row.
    pub big_box: Coord,
    pub agents: [BoxAgent; 2],
}

/// Small boxes at both ends, big box in the middle of row.
fn boxes_in_row(row: i32) -> (Vec<Coord>, Coord){
    (vec![Coord::new(row, 1), Coord::new(row, 6)], Coord::new(row, 3))
}

/// Layout of curriculum level. Level 0 is solvable in one joint push, level
/// [`MAX_CURRICULUM_LEVEL`] is the original placement.
pub fn curriculum_layout(level: usize) -> Result<BoxLayout, GameError>{
    use Heading::*;
    let (box_row, agents, description) = match level{
        0 => (1, [BoxAgent::new(2, 3, North), BoxAgent::new(2, 4, North)],
              "Easiest - agents directly behind the big box"),
        1 => (1, [BoxAgent::new(2, 2, North), BoxAgent::new(2, 5, North)],
              "Agents one step aside from the big box"),
        2 => (1, [BoxAgent::new(2, 3, East), BoxAgent::new(2, 4, West)],
              "Agents behind the big box facing each other"),
        3 => (1, [BoxAgent::new(2, 1, East), BoxAgent::new(2, 6, West)],
              "Agents at the edges facing inwards"),
        4 => (2, [BoxAgent::new(3, 2, North), BoxAgent::new(3, 5, North)],
              "Boxes one row lower"),
        5 => (2, [BoxAgent::new(4, 2, North), BoxAgent::new(4, 5, North)],
              "Agents two rows behind the boxes"),
        6 => (3, [BoxAgent::new(4, 2, North), BoxAgent::new(4, 5, North)],
              "Boxes in the original row"),
        7 => (3, [BoxAgent::new(5, 2, North), BoxAgent::new(5, 5, North)],
              "Agents further from the boxes"),
        8 => (3, [BoxAgent::new(6, 2, East), BoxAgent::new(6, 5, West)],
              "Agents in the original row facing each other"),
        9 => (3, [BoxAgent::new(6, 1, North), BoxAgent::new(6, 6, North)],
              "Agents in the original squares facing north"),
        10 => (3, [BoxAgent::new(6, 1, East), BoxAgent::new(6, 6, West)],
              "Original hard configuration"),
        _ => return Err(GameError::InvalidParameter {
            name: "curriculum_level".into(),
            explanation: format!("level {level} is out of range 0..={MAX_CURRICULUM_LEVEL}"),
        })
    };
    let (small_boxes, big_box) = boxes_in_row(box_row);
    Ok(BoxLayout{
        level,
        description: format!("Level {level}: {description}"),
        small_boxes,
        big_box,
        agents,
    })
}

#[cfg(test)]
mod tests{
    use crate::coop_box_pushing::{curriculum_layout, BoxAgent, Coord, Heading, MAX_CURRICULUM_LEVEL};

    #[test]
    fn original_layout(){
        let layout = curriculum_layout(MAX_CURRICULUM_LEVEL).unwrap();
        assert_eq!(layout.small_boxes, vec![Coord::new(3, 1), Coord::new(3, 6)]);
        assert_eq!(layout.big_box, Coord::new(3, 3));
        assert_eq!(layout.agents, [BoxAgent::new(6, 1, Heading::East), BoxAgent::new(6, 6, Heading::West)]);
        assert_eq!(layout.description, "Level 10: Original hard configuration");
    }

    #[test]
    fn every_level_is_consistent(){
        for level in 0..=MAX_CURRICULUM_LEVEL{
            let layout = curriculum_layout(level).unwrap();
            let mut occupied = layout.small_boxes.clone();
            occupied.push(layout.big_box);
            occupied.push(Coord::new(layout.big_box.row, layout.big_box.col + 1));
            for agent in layout.agents.iter(){
                assert!(agent.coord.in_field());
                assert!(!occupied.contains(&agent.coord), "level {level}");
            }
            assert!(layout.description.starts_with(&format!("Level {level}:")));
        }
        assert!(curriculum_layout(11).is_err());
    }
}
