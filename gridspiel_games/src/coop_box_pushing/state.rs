use std::fmt::{Display, Formatter};
use gridspiel_core::error::GameError;
use gridspiel_core::game::{check_player, Action, GameState, PlayerId, Turn};
use crate::coop_box_pushing::{
    BoxAction,
    BoxAgent,
    BoxLayout,
    Coord,
    FrontView,
    Heading,
    Square,
    BIG_BOX_REWARD,
    BUMP_PENALTY,
    CHANCE_FAIL,
    CHANCE_INIT_PLAYER_0,
    CHANCE_INIT_PLAYER_1,
    CHANCE_SUCCESS,
    DELAY_PENALTY,
    FIELD_SIZE,
    NUM_ACTIONS,
    SMALL_BOX_REWARD,
    SUCCESS_PROBABILITY
};

const NUM_PLAYERS: usize = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoxPushingConfig{
    pub fully_observable: bool,
    pub horizon: usize,
}

impl Default for BoxPushingConfig{
    fn default() -> Self {
        Self{fully_observable: false, horizon: 100}
    }
}

/// Stage of one round: joint move, success draw for each agent, initiative draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase{
    Moves,
    ActionStatus(PlayerId),
    Initiative,
}

#[derive(Clone, Debug)]
pub struct BoxPushingState{
    config: BoxPushingConfig,
    field: [[Square; FIELD_SIZE]; FIELD_SIZE],
    agents: [BoxAgent; NUM_PLAYERS],
    phase: Phase,
    moves: [BoxAction; NUM_PLAYERS],
    succeeded: [bool; NUM_PLAYERS],
    reward: f64,
    total_return: f64,
    total_moves: usize,
    move_number: usize,
    big_box_delivered: bool,
}

impl BoxPushingState{
    pub fn new(config: BoxPushingConfig, layout: &BoxLayout) -> Self{
        let mut field = [[Square::Empty; FIELD_SIZE]; FIELD_SIZE];
        let mut put = |c: Coord, square: Square| {
            if c.in_field(){
                field[c.row as usize][c.col as usize] = square;
            }
        };
        for small in layout.small_boxes.iter(){
            put(*small, Square::SmallBox);
        }
        put(layout.big_box, Square::BigBox);
        put(Coord::new(layout.big_box.row, layout.big_box.col + 1), Square::BigBox);
        Self{
            config,
            field,
            agents: layout.agents,
            phase: Phase::Moves,
            moves: [BoxAction::Stay; NUM_PLAYERS],
            succeeded: [false; NUM_PLAYERS],
            reward: 0.0,
            total_return: 0.0,
            total_moves: 0,
            move_number: 0,
            big_box_delivered: false,
        }
    }

    pub fn agent(&self, player: PlayerId) -> Option<&BoxAgent>{
        self.agents.get(player)
    }

    pub fn square(&self, c: Coord) -> Option<Square>{
        c.in_field().then(|| self.field[c.row as usize][c.col as usize])
    }

    /// Number of resolved rounds.
    pub fn total_moves(&self) -> usize{
        self.total_moves
    }

    pub fn big_box_delivered(&self) -> bool{
        self.big_box_delivered
    }

    fn set_square(&mut self, c: Coord, square: Square){
        if c.in_field(){
            self.field[c.row as usize][c.col as usize] = square;
        }
    }

    fn agent_at(&self, c: Coord) -> Option<PlayerId>{
        self.agents.iter().position(|a| a.coord == c)
    }

    fn is_free(&self, c: Coord) -> bool{
        self.square(c) == Some(Square::Empty) && self.agent_at(c).is_none()
    }

    /// What player sees in front of it.
    pub fn front_view(&self, player: PlayerId) -> Result<FrontView, GameError>{
        check_player(player, NUM_PLAYERS)?;
        let front = self.agents[player].front();
        Ok(match self.square(front){
            None => FrontView::Wall,
            Some(_) if self.agent_at(front).is_some() => FrontView::Agent,
            Some(Square::Empty) => FrontView::Empty,
            Some(Square::SmallBox) => FrontView::SmallBox,
            Some(Square::BigBox) => FrontView::BigBox,
        })
    }

    /// Field rows with agents drawn as arrows.
    pub fn field_string(&self) -> String{
        let mut s = String::with_capacity(FIELD_SIZE * (FIELD_SIZE + 1));
        for row in 0..FIELD_SIZE as i32{
            for col in 0..FIELD_SIZE as i32{
                let c = Coord::new(row, col);
                match self.agent_at(c){
                    Some(p) => s.push(self.agents[p].heading.symbol()),
                    None => s.push(self.field[row as usize][col as usize].symbol()),
                }
            }
            s.push('\n');
        }
        s
    }

    fn moved_forward(&self, player: PlayerId) -> bool{
        self.succeeded[player] && self.moves[player] == BoxAction::MoveForward
    }

    /// Both agents facing north, standing under the two halves of big box and moving forward.
    fn joint_push(&self) -> bool{
        if !(0..NUM_PLAYERS).all(|p| self.moved_forward(p) && self.agents[p].heading == Heading::North){
            return false
        }
        let (f0, f1) = (self.agents[0].front(), self.agents[1].front());
        self.square(f0) == Some(Square::BigBox)
            && self.square(f1) == Some(Square::BigBox)
            && f0.row == f1.row
            && (f0.col - f1.col).abs() == 1
    }

    fn resolve_joint_push(&mut self){
        let halves = [self.agents[0].front(), self.agents[1].front()];
        let targets = halves.map(|c| c.ahead(Heading::North));
        if !targets.iter().all(|t| self.is_free(*t)){
            self.reward += BUMP_PENALTY * NUM_PLAYERS as f64;
            return
        }
        for (half, target) in halves.iter().zip(targets.iter()){
            self.set_square(*half, Square::Empty);
            self.set_square(*target, Square::BigBox);
        }
        for (agent, half) in self.agents.iter_mut().zip(halves.iter()){
            agent.coord = *half;
        }
        if targets[0].row == 0{
            self.reward += BIG_BOX_REWARD;
            self.big_box_delivered = true;
            #[cfg(feature = "log_debug")]
            log::debug!("Big box delivered after {} rounds", self.total_moves + 1);
        }
    }

    fn resolve_move(&mut self, player: PlayerId){
        if !self.succeeded[player]{
            return
        }
        let agent = self.agents[player];
        match self.moves[player]{
            BoxAction::TurnLeft => self.agents[player].heading = agent.heading.turned_left(),
            BoxAction::TurnRight => self.agents[player].heading = agent.heading.turned_right(),
            BoxAction::Stay => {},
            BoxAction::MoveForward => {
                let target = agent.front();
                if self.agent_at(target).is_some(){
                    self.reward += BUMP_PENALTY;
                    return
                }
                match self.square(target){
                    None | Some(Square::BigBox) => self.reward += BUMP_PENALTY,
                    Some(Square::Empty) => self.agents[player].coord = target,
                    Some(Square::SmallBox) => {
                        let beyond = target.ahead(agent.heading);
                        if self.is_free(beyond){
                            self.set_square(target, Square::Empty);
                            self.set_square(beyond, Square::SmallBox);
                            self.agents[player].coord = target;
                            if beyond.row == 0 && target.row != 0{
                                self.reward += SMALL_BOX_REWARD;
                            }
                        } else {
                            self.reward += BUMP_PENALTY;
                        }
                    }
                }
            }
        }
    }

    fn resolve_round(&mut self, first: PlayerId){
        self.reward = DELAY_PENALTY;
        if self.joint_push(){
            self.resolve_joint_push();
        } else {
            self.resolve_move(first);
            self.resolve_move(1 - first);
        }
        self.total_return += self.reward;
        self.total_moves += 1;
        self.phase = Phase::Moves;
        #[cfg(feature = "log_trace")]
        log::trace!("Round {} resolved with reward {}", self.total_moves, self.reward);
    }
}

impl Display for BoxPushingState{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field_string())?;
        writeln!(f, "Total moves: {}", self.total_moves)?;
        writeln!(f, "Reward: {}", self.reward)
    }
}

impl GameState for BoxPushingState{
    fn turn(&self) -> Turn {
        if self.big_box_delivered || self.total_moves >= self.config.horizon{
            return Turn::Terminal
        }
        match self.phase{
            Phase::Moves => Turn::Simultaneous,
            Phase::ActionStatus(_) | Phase::Initiative => Turn::Chance,
        }
    }

    fn num_players(&self) -> usize {
        NUM_PLAYERS
    }

    fn legal_actions(&self, player: PlayerId) -> Vec<Action> {
        if player < NUM_PLAYERS && self.turn() == Turn::Simultaneous{
            (0..NUM_ACTIONS).collect()
        } else {
            Vec::new()
        }
    }

    fn action_to_string(&self, _player: PlayerId, action: Action) -> String {
        match BoxAction::from_action(action){
            Some(a) => a.to_string(),
            None => format!("Invalid action {action}"),
        }
    }

    fn chance_outcomes(&self) -> Vec<(Action, f64)> {
        match (self.turn(), self.phase){
            (Turn::Chance, Phase::ActionStatus(_)) => vec![
                (CHANCE_SUCCESS, SUCCESS_PROBABILITY),
                (CHANCE_FAIL, 1.0 - SUCCESS_PROBABILITY)
            ],
            (Turn::Chance, Phase::Initiative) => vec![(CHANCE_INIT_PLAYER_0, 0.5), (CHANCE_INIT_PLAYER_1, 0.5)],
            _ => Vec::new(),
        }
    }

    fn chance_outcome_to_string(&self, outcome: Action) -> String {
        match outcome{
            CHANCE_SUCCESS => "success".into(),
            CHANCE_FAIL => "fail".into(),
            CHANCE_INIT_PLAYER_0 => "player 0 first".into(),
            CHANCE_INIT_PLAYER_1 => "player 1 first".into(),
            other => format!("Invalid outcome {other}"),
        }
    }

    fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        let turn = self.turn();
        if turn != Turn::Chance{
            return Err(GameError::WrongTurn { operation: "apply_action".into(), turn })
        }
        match (self.phase, action){
            (Phase::ActionStatus(player), CHANCE_SUCCESS | CHANCE_FAIL) => {
                self.succeeded[player] = action == CHANCE_SUCCESS;
                self.phase = if player + 1 < NUM_PLAYERS{
                    Phase::ActionStatus(player + 1)
                } else {
                    Phase::Initiative
                };
            },
            (Phase::Initiative, CHANCE_INIT_PLAYER_0) => self.resolve_round(0),
            (Phase::Initiative, CHANCE_INIT_PLAYER_1) => self.resolve_round(1),
            _ => return Err(GameError::IllegalChanceOutcome { outcome: action }),
        }
        self.move_number += 1;
        Ok(())
    }

    fn apply_actions(&mut self, actions: &[Action]) -> Result<(), GameError> {
        let turn = self.turn();
        if turn != Turn::Simultaneous{
            return Err(GameError::WrongTurn { operation: "apply_actions".into(), turn })
        }
        if actions.len() != NUM_PLAYERS{
            return Err(GameError::JointActionSize { expected: NUM_PLAYERS, got: actions.len() })
        }
        for (player, action) in actions.iter().enumerate(){
            self.moves[player] = BoxAction::from_action(*action)
                .ok_or(GameError::IllegalAction { player, action: *action })?;
        }
        self.reward = 0.0;
        self.phase = Phase::ActionStatus(0);
        self.move_number += 1;
        Ok(())
    }

    fn rewards(&self) -> Vec<f64> {
        vec![self.reward; NUM_PLAYERS]
    }

    fn returns(&self) -> Vec<f64> {
        vec![self.total_return; NUM_PLAYERS]
    }

    fn information_state_string(&self, player: PlayerId) -> Result<String, GameError> {
        check_player(player, NUM_PLAYERS)?;
        Err(GameError::NotProvided { game: "coop_box_pushing".into(), feature: "information state string".into() })
    }

    fn observation_string(&self, player: PlayerId) -> Result<String, GameError> {
        if self.config.fully_observable{
            check_player(player, NUM_PLAYERS)?;
            Ok(self.field_string())
        } else {
            Ok(self.front_view(player)?.to_string())
        }
    }

    fn move_number(&self) -> usize {
        self.move_number
    }

    fn clone_box(&self) -> Box<dyn GameState> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests{
    use gridspiel_core::game::{GameState, Turn};
    use crate::coop_box_pushing::{
        curriculum_layout,
        BoxAction,
        BoxPushingConfig,
        BoxPushingState,
        Coord,
        FrontView,
        Heading,
        Square,
        CHANCE_FAIL,
        CHANCE_INIT_PLAYER_0,
        CHANCE_INIT_PLAYER_1,
        CHANCE_SUCCESS
    };

    fn state(level: usize) -> BoxPushingState{
        BoxPushingState::new(BoxPushingConfig::default(), &curriculum_layout(level).unwrap())
    }

    /// Plays one round with both actions succeeding.
    fn round(state: &mut BoxPushingState, actions: [BoxAction; 2], first: usize){
        state.apply_actions(&[actions[0] as usize, actions[1] as usize]).unwrap();
        assert_eq!(state.turn(), Turn::Chance);
        state.apply_action(CHANCE_SUCCESS).unwrap();
        state.apply_action(CHANCE_SUCCESS).unwrap();
        state.apply_action(if first == 0 {CHANCE_INIT_PLAYER_0} else {CHANCE_INIT_PLAYER_1}).unwrap();
    }

    #[test]
    fn original_field(){
        let s = state(10);
        assert_eq!(s.field_string(), "........\n........\n........\n.b.BB.b.\n........\n........\n.>....<.\n........\n");
        assert_eq!(s.turn(), Turn::Simultaneous);
        assert_eq!(s.legal_actions(1), vec![0, 1, 2, 3]);
        assert!(s.information_state_string(0).is_err());
        assert_eq!(s.observation_string(0).unwrap(), "empty");
    }

    #[test]
    fn joint_push_delivers_big_box(){
        let mut s = state(0);
        assert_eq!(s.front_view(0).unwrap(), FrontView::BigBox);
        round(&mut s, [BoxAction::MoveForward, BoxAction::MoveForward], 0);
        assert!(s.is_terminal());
        assert!(s.big_box_delivered());
        assert_eq!(s.square(Coord::new(0, 3)), Some(Square::BigBox));
        assert!((s.rewards()[0] - 99.9).abs() < 1e-9);
        assert_eq!(s.rewards()[0], s.rewards()[1]);
        assert_eq!(s.move_number(), 4);
    }

    #[test]
    fn single_push_on_big_box_bumps(){
        let mut s = state(0);
        round(&mut s, [BoxAction::MoveForward, BoxAction::Stay], 1);
        assert!(!s.is_terminal());
        assert!((s.rewards()[0] + 5.1).abs() < 1e-9);
        assert_eq!(s.agent(0).unwrap().coord, Coord::new(2, 3));
    }

    #[test]
    fn failed_action_has_no_effect(){
        let mut s = state(0);
        s.apply_actions(&[2, 2]).unwrap();
        s.apply_action(CHANCE_FAIL).unwrap();
        s.apply_action(CHANCE_SUCCESS).unwrap();
        assert_eq!(s.chance_outcomes().len(), 2);
        s.apply_action(CHANCE_INIT_PLAYER_0).unwrap();
        assert!(!s.is_terminal());
        assert!((s.rewards()[1] + 5.1).abs() < 1e-9);
    }

    #[test]
    fn small_box_to_top_row(){
        let mut s = state(1);
        // agent 0 at (2,2) goes west to stand under small box at (1,1)
        round(&mut s, [BoxAction::TurnLeft, BoxAction::Stay], 0);
        assert_eq!(s.agent(0).unwrap().heading, Heading::West);
        round(&mut s, [BoxAction::MoveForward, BoxAction::Stay], 0);
        round(&mut s, [BoxAction::TurnRight, BoxAction::Stay], 0);
        assert_eq!(s.front_view(0).unwrap(), FrontView::SmallBox);
        round(&mut s, [BoxAction::MoveForward, BoxAction::Stay], 0);
        assert!((s.rewards()[0] - 9.9).abs() < 1e-9);
        assert_eq!(s.square(Coord::new(0, 1)), Some(Square::SmallBox));
        round(&mut s, [BoxAction::MoveForward, BoxAction::Stay], 0);
        assert!((s.rewards()[0] + 5.1).abs() < 1e-9);
        assert!((s.returns()[0] - (5.0 * -0.1 + 10.0 - 5.0)).abs() < 1e-9);
    }

    #[test]
    fn agents_bump_into_each_other(){
        let mut s = state(2);
        assert_eq!(s.front_view(0).unwrap(), FrontView::Agent);
        round(&mut s, [BoxAction::MoveForward, BoxAction::MoveForward], 1);
        assert!((s.rewards()[0] + 10.1).abs() < 1e-9);
    }

    #[test]
    fn horizon_and_errors(){
        let layout = curriculum_layout(10).unwrap();
        let mut s = BoxPushingState::new(BoxPushingConfig{fully_observable: true, horizon: 2}, &layout);
        assert!(s.apply_action(0).is_err());
        assert!(s.apply_actions(&[0]).is_err());
        assert!(s.apply_actions(&[0, 4]).is_err());
        round(&mut s, [BoxAction::Stay, BoxAction::Stay], 0);
        assert!(s.apply_actions(&[0, 0]).is_ok());
        assert!(s.apply_action(CHANCE_INIT_PLAYER_0).is_err());
        s.apply_action(CHANCE_SUCCESS).unwrap();
        s.apply_action(CHANCE_SUCCESS).unwrap();
        s.apply_action(CHANCE_INIT_PLAYER_1).unwrap();
        assert!(s.is_terminal());
        assert!(s.legal_actions(0).is_empty());
        assert_eq!(s.observation_string(1).unwrap(), s.field_string());
        assert!(s.to_string().contains("Total moves: 2"));
    }
}
