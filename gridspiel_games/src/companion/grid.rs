use std::fmt::{Display, Formatter};
use crate::companion::{
    AgentData,
    CellType,
    CompanionAction,
    DoorData,
    GroundItem,
    Position,
    MAX_INVENTORY
};

/// Planned move of agent: `(agent id, target position)`.
pub type PlannedMove = (usize, Position);

/// Grid of cells with all actors standing on it (agents, doors, ground items).
#[derive(Clone, Debug, PartialEq)]
pub struct Grid{
    rows: i32,
    cols: i32,
    cells: Vec<CellType>,
    agents: Vec<AgentData>,
    doors: Vec<DoorData>,
    ground_items: Vec<GroundItem>,
}

impl Grid{
    pub fn new(rows: usize, cols: usize) -> Self{
        Self{
            rows: rows as i32,
            cols: cols as i32,
            cells: vec![CellType::Empty; rows * cols],
            agents: Vec::new(),
            doors: Vec::new(),
            ground_items: Vec::new(),
        }
    }

    pub fn rows(&self) -> i32{
        self.rows
    }

    pub fn cols(&self) -> i32{
        self.cols
    }

    pub fn is_within_bounds(&self, position: Position) -> bool{
        position.row >= 0 && position.row < self.rows && position.col >= 0 && position.col < self.cols
    }

    fn index(&self, position: Position) -> Option<usize>{
        match self.is_within_bounds(position){
            true => Some((position.row * self.cols + position.col) as usize),
            false => None
        }
    }

    /// Cell type, positions outside the grid read as walls.
    pub fn cell(&self, position: Position) -> CellType{
        self.index(position).map(|i| self.cells[i]).unwrap_or(CellType::Wall)
    }

    /// Positions outside the grid are ignored.
    pub fn set_cell(&mut self, position: Position, cell: CellType){
        if let Some(i) = self.index(position){
            self.cells[i] = cell;
        }
    }

    /// Returns `false` when agent with the same id is already placed.
    pub fn add_agent(&mut self, agent: AgentData) -> bool{
        if self.agent(agent.id).is_some(){
            return false
        }
        self.agents.push(agent);
        true
    }

    pub fn remove_agent(&mut self, id: usize){
        self.agents.retain(|a| a.id != id);
    }

    pub fn agent(&self, id: usize) -> Option<&AgentData>{
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn agent_mut(&mut self, id: usize) -> Option<&mut AgentData>{
        self.agents.iter_mut().find(|a| a.id == id)
    }

    pub fn agents(&self) -> &[AgentData]{
        &self.agents
    }

    pub fn agent_at(&self, position: Position) -> Option<&AgentData>{
        self.agents.iter().find(|a| a.position == position)
    }

    pub fn agent_ids_at(&self, position: Position) -> Vec<usize>{
        self.agents.iter().filter(|a| a.position == position).map(|a| a.id).collect()
    }

    pub fn add_door(&mut self, door: DoorData){
        self.doors.push(door);
    }

    pub fn remove_door(&mut self, position: Position){
        self.doors.retain(|d| d.position != position);
    }

    pub fn door_at(&self, position: Position) -> Option<&DoorData>{
        self.doors.iter().find(|d| d.position == position)
    }

    pub fn doors(&self) -> &[DoorData]{
        &self.doors
    }

    pub fn add_ground_item(&mut self, item: GroundItem){
        self.ground_items.push(item);
    }

    pub fn remove_ground_item(&mut self, position: Position, item_id: u32){
        self.ground_items.retain(|g| !(g.position == position && g.item.id == item_id));
    }

    pub fn ground_items_at(&self, position: Position) -> Vec<GroundItem>{
        self.ground_items.iter().filter(|g| g.position == position).cloned().collect()
    }

    pub fn ground_items(&self) -> &[GroundItem]{
        &self.ground_items
    }

    /// Position is in bounds, not a wall and not a closed door.
    pub fn can_move_to(&self, position: Position) -> bool{
        if !self.is_within_bounds(position) || self.cell(position) == CellType::Wall{
            return false
        }
        !matches!(self.door_at(position), Some(door) if !door.is_open)
    }

    /// Like [`can_move_to`](Grid::can_move_to), but also no agent may stand there.
    pub fn is_overlappable(&self, position: Position) -> bool{
        self.can_move_to(position) && self.agent_at(position).is_none()
    }

    /// Targets of agents given actions indexed by agent id. Agents without action stay.
    pub fn predict_moves(&self, actions: &[CompanionAction]) -> Vec<PlannedMove>{
        self.agents.iter().map(|agent| {
            let target = actions.get(agent.id)
                .and_then(|a| a.movement())
                .map(|d| agent.position.step(d))
                .unwrap_or(agent.position);
            (agent.id, target)
        }).collect()
    }

    /// Invalid targets are replaced with current position, then agents heading to the same
    /// cell are resolved pairwise: the ones that moved bounce back.
    pub fn resolve_collisions(&self, moves: &mut [PlannedMove]){
        for (id, target) in moves.iter_mut(){
            if let Some(agent) = self.agent(*id){
                if !self.can_move_to(*target){
                    *target = agent.position;
                }
            }
        }

        for i in 0..moves.len(){
            for j in i+1..moves.len(){
                if moves[i].1 != moves[j].1{
                    continue;
                }
                let (Some(first), Some(second)) = (self.agent(moves[i].0), self.agent(moves[j].0)) else {
                    continue;
                };
                if moves[i].1 != first.position{
                    moves[i].1 = first.position;
                }
                if moves[j].1 != second.position{
                    moves[j].1 = second.position;
                }
            }
        }
    }

    pub fn apply_moves(&mut self, moves: &[PlannedMove]){
        for (id, target) in moves{
            if let Some(agent) = self.agent_mut(*id){
                agent.position = *target;
            }
        }
    }

    /// Agents interacting open doors they have key for (consuming key), close open doors
    /// in front of them, or pick up one item from the cell they stand on.
    pub fn process_interactions(&mut self, actions: &[CompanionAction]){
        for index in 0..self.agents.len(){
            let id = self.agents[index].id;
            if actions.get(id) != Some(&CompanionAction::Interact){
                continue;
            }
            let position = self.agents[index].position;
            let front = position.step(self.agents[index].direction);
            if !self.is_within_bounds(front){
                continue;
            }

            if let Some(door_index) = self.doors.iter().position(|d| d.position == front){
                let required = self.doors[door_index].required_key;
                if !self.doors[door_index].is_open && self.agents[index].has_key(required){
                    self.doors[door_index].is_open = true;
                    self.agents[index].remove_key(required);
                } else if self.doors[door_index].is_open{
                    self.doors[door_index].is_open = false;
                }
                continue;
            }

            if self.agents[index].inventory.len() < MAX_INVENTORY{
                if let Some(item) = self.ground_items_at(position).first(){
                    self.agents[index].inventory.push(item.item);
                    self.remove_ground_item(position, item.item.id);
                }
            }
        }
    }

    /// Empty cells without agents, doors or items, in row major order.
    pub fn empty_cells(&self) -> Vec<Position>{
        let mut cells = Vec::new();
        for row in 0..self.rows{
            for col in 0..self.cols{
                let p = Position::new(row, col);
                if self.cell(p) == CellType::Empty
                    && self.agent_at(p).is_none()
                    && self.door_at(p).is_none()
                    && self.ground_items_at(p).is_empty(){
                    cells.push(p);
                }
            }
        }
        cells
    }

    pub fn dead_agents(&self) -> Vec<usize>{
        self.agents.iter().filter(|a| self.cell(a.position) == CellType::Lava).map(|a| a.id).collect()
    }

    pub fn remove_dead_agents(&mut self){
        let dead = self.dead_agents();
        self.agents.retain(|a| !dead.contains(&a.id));
    }

    /// Symbol of cell as shown in rendering: agents on top, then doors, items and cell type.
    pub fn symbol_at(&self, position: Position) -> char{
        if let Some(agent) = self.agent_at(position){
            return agent.direction.symbol()
        }
        if let Some(door) = self.door_at(position){
            return if door.is_open {'/'} else {'+'}
        }
        if !self.ground_items_at(position).is_empty(){
            return '*'
        }
        self.cell(position).symbol()
    }
}

impl Display for Grid{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.rows{
            for col in 0..self.cols{
                write!(f, "{}", self.symbol_at(Position::new(row, col)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests{
    use crate::companion::*;

    fn grid_with_agents(positions: &[(i32, i32)]) -> Grid{
        let mut grid = Grid::new(4, 4);
        for (id, (r, c)) in positions.iter().enumerate(){
            grid.add_agent(AgentData::new(id, Position::new(*r, *c), Direction::North, Color::for_agent(id)));
        }
        grid
    }

    fn step(grid: &mut Grid, actions: &[CompanionAction]){
        let mut moves = grid.predict_moves(actions);
        grid.resolve_collisions(&mut moves);
        grid.apply_moves(&moves);
        grid.process_interactions(actions);
    }

    #[test]
    fn walls_and_bounds_block(){
        let mut grid = grid_with_agents(&[(0, 0), (2, 2)]);
        grid.set_cell(Position::new(2, 3), CellType::Wall);
        step(&mut grid, &[CompanionAction::North, CompanionAction::East]);
        assert_eq!(grid.agent(0).unwrap().position, Position::new(0, 0));
        assert_eq!(grid.agent(1).unwrap().position, Position::new(2, 2));
    }

    #[test]
    fn agents_entering_same_cell_bounce(){
        let mut grid = grid_with_agents(&[(1, 0), (1, 2)]);
        step(&mut grid, &[CompanionAction::East, CompanionAction::West]);
        assert_eq!(grid.agent(0).unwrap().position, Position::new(1, 0));
        assert_eq!(grid.agent(1).unwrap().position, Position::new(1, 2));

        let mut grid = grid_with_agents(&[(1, 0), (1, 1)]);
        step(&mut grid, &[CompanionAction::East, CompanionAction::Stay]);
        assert_eq!(grid.agent(0).unwrap().position, Position::new(1, 0));
        assert_eq!(grid.agent(1).unwrap().position, Position::new(1, 1));
    }

    #[test]
    fn doors_need_keys(){
        let mut grid = grid_with_agents(&[(2, 1)]);
        let door_pos = Position::new(1, 1);
        grid.add_door(DoorData{position: door_pos, color: Color::Red, required_key: Color::Red, is_open: false});
        grid.add_ground_item(GroundItem{
            position: Position::new(2, 1),
            item: PickableItem{kind: ItemKind::Key, color: Color::Red, id: 1}
        });
        step(&mut grid, &[CompanionAction::North]);
        assert_eq!(grid.agent(0).unwrap().position, Position::new(2, 1));
        // door in front takes precedence over picking up the key
        step(&mut grid, &[CompanionAction::Interact]);
        assert!(grid.agent(0).unwrap().inventory.is_empty());
        assert_eq!(grid.symbol_at(door_pos), '+');

        grid.remove_door(door_pos);
        step(&mut grid, &[CompanionAction::Interact]);
        assert!(grid.agent(0).unwrap().has_key(Color::Red));
        grid.add_door(DoorData{position: door_pos, color: Color::Red, required_key: Color::Red, is_open: false});
        step(&mut grid, &[CompanionAction::Interact]);
        assert!(grid.door_at(door_pos).unwrap().is_open);
        assert!(grid.agent(0).unwrap().inventory.is_empty());
        step(&mut grid, &[CompanionAction::North]);
        assert_eq!(grid.agent(0).unwrap().position, door_pos);
    }

    #[test]
    fn lava_kills(){
        let mut grid = grid_with_agents(&[(1, 1), (3, 3)]);
        grid.set_cell(Position::new(0, 1), CellType::Lava);
        step(&mut grid, &[CompanionAction::North, CompanionAction::Stay]);
        assert_eq!(grid.dead_agents(), vec![0]);
        grid.remove_dead_agents();
        assert!(grid.agent(0).is_none());
        assert_eq!(grid.agents().len(), 1);
    }

    #[test]
    fn rendering(){
        let mut grid = grid_with_agents(&[(0, 0)]);
        grid.set_cell(Position::new(0, 3), CellType::Goal);
        grid.set_cell(Position::new(1, 1), CellType::Wall);
        assert_eq!(grid.to_string(), "^..G\n.#..\n....\n....\n");
        assert_eq!(grid.empty_cells().len(), 13);
    }
}
