use crate::companion::{place_agent, CellType, CompanionRules, Grid, Position};

/// Agents start on the bottom row and the game is won as soon as any of them reaches
/// the goal in the top right corner.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SimpleRules;

impl SimpleRules{
    pub fn goal(cols: i32) -> Position{
        Position::new(0, cols - 1)
    }
}

impl CompanionRules for SimpleRules{
    fn short_name(&self) -> &'static str {
        "companion_simple"
    }

    fn environment_name(&self) -> &'static str {
        "CompanionSimple"
    }

    fn long_name(&self) -> &'static str {
        "Companion Simple Environment"
    }

    fn setup(&self, rows: usize, cols: usize, num_agents: usize) -> Grid {
        let mut grid = Grid::new(rows, cols);
        let (rows, cols) = (rows as i32, cols as i32);
        let goal = Self::goal(cols);
        grid.set_cell(goal, CellType::Goal);

        for id in 0..num_agents{
            let position = Position::new(rows - 1, id as i32 % cols);
            place_agent(&mut grid, id, position);
        }

        if rows >= 5 && cols >= 5{
            let wall_row = rows / 2;
            for col in 1..cols - 1{
                let p = Position::new(wall_row, col);
                if col != cols / 2 && p != goal{
                    grid.set_cell(p, CellType::Wall);
                }
            }
            for row in 1..rows / 2{
                let p = Position::new(row, cols / 2);
                if p != goal{
                    grid.set_cell(p, CellType::Wall);
                }
            }
        }
        grid
    }

    fn is_success(&self, grid: &Grid) -> bool {
        let goal = Self::goal(grid.cols());
        grid.agents().iter().any(|a| a.position == goal)
    }
}

#[cfg(test)]
mod tests{
    use gridspiel_core::game::{Game, GameParameters, Turn};
    use crate::companion::{CompanionAction, CompanionSimpleGame};

    fn a(action: CompanionAction) -> usize{
        action as usize
    }

    #[test]
    fn default_layout(){
        let game = CompanionSimpleGame::new(&GameParameters::new()).unwrap();
        assert_eq!(game.num_players(), 2);
        assert_eq!(game.num_distinct_actions(), 6);
        let state = game.new_initial_state();
        assert_eq!(state.turn(), Turn::Simultaneous);
        let expected = "CompanionSimple State:\nTimestep: 0/100\nTerminal: false\nReturns: [0, 0]\n\n\
            .......G\n\
            ....#...\n\
            ....#...\n\
            ....#...\n\
            .###.##.\n\
            ........\n\
            ........\n\
            ^^......\n";
        assert_eq!(state.to_string(), expected);
    }

    #[test]
    fn reach_goal_on_small_grid(){
        let params = GameParameters::new().with("rows", 3).with("cols", 3).with("num_agents", 1);
        let game = CompanionSimpleGame::new(&params).unwrap();
        let mut state = game.new_initial_state();
        assert!(state.to_string().contains('^'));
        assert!(state.to_string().contains('G'));
        for action in [CompanionAction::East, CompanionAction::East, CompanionAction::North]{
            state.apply_actions(&[a(action)]).unwrap();
            assert!(!state.is_terminal());
        }
        state.apply_actions(&[a(CompanionAction::North)]).unwrap();
        assert!(state.is_terminal());
        assert_eq!(state.returns(), vec![96.0]);
        assert_eq!(state.rewards(), vec![99.0]);
    }

    #[test]
    fn horizon_ends_game(){
        let params = GameParameters::new().with("horizon", 5);
        let game = CompanionSimpleGame::new(&params).unwrap();
        let mut state = game.new_initial_state();
        for _ in 0..5{
            assert!(!state.is_terminal());
            state.apply_actions(&[a(CompanionAction::Stay), a(CompanionAction::Stay)]).unwrap();
        }
        assert!(state.is_terminal());
        assert_eq!(state.returns(), vec![-5.0, -5.0]);
        assert!(state.legal_actions(0).is_empty());
        assert!(state.apply_actions(&[0, 0]).is_err());
    }

    #[test]
    fn action_names_and_errors(){
        let game = CompanionSimpleGame::new(&GameParameters::new()).unwrap();
        let mut state = game.new_initial_state();
        let names: Vec<String> = (0..6).map(|x| state.action_to_string(0, x)).collect();
        assert_eq!(names, vec!["North", "East", "South", "West", "Interact", "Stay"]);
        assert!(state.apply_actions(&[0]).is_err());
        assert!(state.apply_actions(&[0, 6]).is_err());
        assert!(state.apply_action(0).is_err());
        assert!(state.information_state_string(2).is_err());
    }

    #[test]
    fn moving_into_vacated_cell(){
        let params = GameParameters::new().with("rows", 3).with("cols", 3).with("num_agents", 2);
        let game = CompanionSimpleGame::new(&params).unwrap();
        let mut state = game.new_initial_state();
        state.apply_actions(&[a(CompanionAction::East), a(CompanionAction::North)]).unwrap();
        let agents = state.to_string().chars().filter(|c| "^>v<".contains(*c)).count();
        assert_eq!(agents, 2);
    }
}
