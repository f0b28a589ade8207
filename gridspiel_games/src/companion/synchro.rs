use std::collections::BTreeSet;
use crate::companion::{place_agent, CellType, CompanionRules, Grid, Position};

/// Every agent has to stand on a synchronisation cell at the same time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SynchroRules;

impl SynchroRules{
    /// Layout of synchronisation cells for number of agents: centre for one agent, opposite
    /// corners for two, triangle for three, all corners for four, perimeter walk otherwise.
    pub fn synchro_positions(rows: i32, cols: i32, num_agents: usize) -> Vec<Position>{
        match num_agents{
            1 => vec![Position::new(rows / 2, cols / 2)],
            2 => vec![Position::new(0, 0), Position::new(rows - 1, cols - 1)],
            3 => vec![
                Position::new(0, cols / 2),
                Position::new(rows - 1, 0),
                Position::new(rows - 1, cols - 1)
            ],
            4 => vec![
                Position::new(0, 0),
                Position::new(0, cols - 1),
                Position::new(rows - 1, 0),
                Position::new(rows - 1, cols - 1)
            ],
            n => (0..n as i32).map(|i| {
                let (row, col) = if i < cols{
                    (0, i)
                } else if i < cols + rows - 1{
                    (i - cols + 1, cols - 1)
                } else if i < 2 * cols + rows - 2{
                    (rows - 1, cols - 1 - (i - cols - rows + 1))
                } else {
                    (rows - 1 - (i - 2 * cols - rows + 2), 0)
                };
                Position::new(row.clamp(0, rows - 1), col.clamp(0, cols - 1))
            }).collect()
        }
    }

    /// Agents are spread around the centre of grid.
    pub fn start_position(rows: i32, cols: i32, id: usize) -> Position{
        let i = id as i32;
        let offset_row = if i % 2 == 0 {0} else if i % 4 < 2 {-1} else {1};
        let offset_col = if (i / 2) % 2 == 0 {0} else if i / 4 < 2 {-1} else {1};
        Position::new(
            (rows / 2 + offset_row).clamp(0, rows - 1),
            (cols / 2 + offset_col).clamp(0, cols - 1)
        )
    }

    fn synchro_cells(grid: &Grid) -> Vec<Position>{
        let mut cells = Vec::new();
        for row in 0..grid.rows(){
            for col in 0..grid.cols(){
                let p = Position::new(row, col);
                if grid.cell(p) == CellType::Synchro{
                    cells.push(p);
                }
            }
        }
        cells
    }
}

impl CompanionRules for SynchroRules{
    fn short_name(&self) -> &'static str {
        "companion_synchro"
    }

    fn environment_name(&self) -> &'static str {
        "CompanionSynchro"
    }

    fn long_name(&self) -> &'static str {
        "Companion Synchro Environment"
    }

    fn setup(&self, rows: usize, cols: usize, num_agents: usize) -> Grid {
        let mut grid = Grid::new(rows, cols);
        let (rows, cols) = (rows as i32, cols as i32);
        for p in Self::synchro_positions(rows, cols, num_agents){
            grid.set_cell(p, CellType::Synchro);
        }
        for id in 0..num_agents{
            place_agent(&mut grid, id, Self::start_position(rows, cols, id));
        }

        if rows >= 6 && cols >= 6{
            let (mid_row, mid_col) = (rows / 2, cols / 2);
            for col in 1..cols - 1{
                if col != mid_col{
                    grid.set_cell(Position::new(mid_row - 1, col), CellType::Wall);
                    grid.set_cell(Position::new(mid_row + 1, col), CellType::Wall);
                }
            }
            for row in 1..rows - 1{
                if row != mid_row{
                    grid.set_cell(Position::new(row, mid_col - 1), CellType::Wall);
                    grid.set_cell(Position::new(row, mid_col + 1), CellType::Wall);
                }
            }
        }
        grid
    }

    fn is_success(&self, grid: &Grid) -> bool {
        let cells = Self::synchro_cells(grid);
        let occupied: BTreeSet<Position> = grid.agents().iter()
            .map(|a| a.position)
            .filter(|p| cells.contains(p))
            .collect();
        occupied.len() == cells.len()
    }
}

#[cfg(test)]
mod tests{
    use gridspiel_core::game::{Game, GameParameters};
    use crate::companion::{CompanionAction, CompanionSynchroGame, Position, SynchroRules};

    fn a(action: CompanionAction) -> usize{
        action as usize
    }

    #[test]
    fn synchro_layouts(){
        assert_eq!(SynchroRules::synchro_positions(6, 6, 1), vec![Position::new(3, 3)]);
        assert_eq!(SynchroRules::synchro_positions(6, 6, 2), vec![Position::new(0, 0), Position::new(5, 5)]);
        assert_eq!(SynchroRules::synchro_positions(4, 4, 3)[0], Position::new(0, 2));
        let perimeter = SynchroRules::synchro_positions(3, 3, 6);
        assert_eq!(perimeter, vec![
            Position::new(0, 0), Position::new(0, 1), Position::new(0, 2),
            Position::new(1, 2), Position::new(2, 2), Position::new(2, 2)
        ]);
    }

    #[test]
    fn start_positions_near_centre(){
        assert_eq!(SynchroRules::start_position(6, 6, 0), Position::new(3, 3));
        assert_eq!(SynchroRules::start_position(6, 6, 1), Position::new(2, 3));
        assert_eq!(SynchroRules::start_position(6, 6, 2), Position::new(3, 2));
        assert_eq!(SynchroRules::start_position(6, 6, 3), Position::new(4, 2));
    }

    #[test]
    fn single_agent_on_centre_wins_immediately_after_step(){
        let params = GameParameters::new().with("rows", 4).with("cols", 4).with("num_agents", 1);
        let game = CompanionSynchroGame::new(&params).unwrap();
        let mut state = game.new_initial_state();
        assert!(!state.is_terminal());
        state.apply_actions(&[a(CompanionAction::Stay)]).unwrap();
        assert!(state.is_terminal());
        assert_eq!(state.returns(), vec![99.0]);
    }

    #[test]
    fn two_agents_reach_corners(){
        let params = GameParameters::new().with("rows", 3).with("cols", 3).with("num_agents", 2);
        let game = CompanionSynchroGame::new(&params).unwrap();
        let mut state = game.new_initial_state();
        // agent 0 starts at (1,1), agent 1 at (0,1)
        state.apply_actions(&[a(CompanionAction::South), a(CompanionAction::West)]).unwrap();
        assert!(!state.is_terminal());
        state.apply_actions(&[a(CompanionAction::East), a(CompanionAction::Stay)]).unwrap();
        assert!(state.is_terminal());
        assert_eq!(state.returns(), vec![98.0, 98.0]);
        assert!(state.to_string().starts_with("CompanionSynchro State:\nTimestep: 2/100\nTerminal: true\n"));
    }
}
