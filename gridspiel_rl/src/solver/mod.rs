//! Solvers of stage games built from joint action values, used by
//! [`MultiagentQLearner`](crate::agent::MultiagentQLearner).
mod simplex;
mod correlated;

pub use simplex::*;
pub use correlated::*;

use gridspiel_core::game::Action;
use crate::error::GridspielRlError;

/// Payoffs of normal form game: for every player value of every joint action.
///
/// Joint actions are indexed row-major, the last player's action changing fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffTensor{
    num_actions: Vec<usize>,
    payoffs: Vec<Vec<f64>>,
}

impl PayoffTensor{
    /// Zero payoffs for every joint action.
    pub fn zeros(num_actions: Vec<usize>) -> Self{
        let size = num_actions.iter().product();
        let payoffs = vec![vec![0.0; size]; num_actions.len()];
        Self{num_actions, payoffs}
    }

    pub fn from_payoffs(num_actions: Vec<usize>, payoffs: Vec<Vec<f64>>) -> Result<Self, GridspielRlError>{
        let size: usize = num_actions.iter().product();
        if payoffs.len() != num_actions.len() || payoffs.iter().any(|p| p.len() != size){
            return Err(GridspielRlError::Solver {
                explanation: format!("payoff tensor shape does not match actions {num_actions:?}")
            })
        }
        Ok(Self{num_actions, payoffs})
    }

    pub fn num_players(&self) -> usize{
        self.num_actions.len()
    }

    pub fn num_actions(&self) -> &[usize]{
        &self.num_actions
    }

    pub fn num_joint_actions(&self) -> usize{
        self.num_actions.iter().product()
    }

    pub fn joint_index(&self, actions: &[Action]) -> Option<usize>{
        joint_index(&self.num_actions, actions)
    }

    pub fn payoff(&self, player: usize, joint: usize) -> f64{
        self.payoffs.get(player).and_then(|p| p.get(joint)).copied().unwrap_or(0.0)
    }

    pub fn player_payoffs(&self, player: usize) -> &[f64]{
        self.payoffs.get(player).map(|p| p.as_slice()).unwrap_or(&[])
    }
}

/// Flat index of joint action, `None` when it does not fit the action counts.
pub fn joint_index(num_actions: &[usize], actions: &[Action]) -> Option<usize>{
    if actions.len() != num_actions.len(){
        return None
    }
    let mut index = 0;
    for (a, n) in actions.iter().zip(num_actions.iter()){
        if a >= n{
            return None
        }
        index = index * n + a;
    }
    Some(index)
}

/// Solution of stage game: action distribution (marginal) and expected value of every player.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutput{
    pub marginals: Vec<Vec<f64>>,
    pub values: Vec<f64>,
}

/// Computes solution concept of normal form game.
pub trait JointActionSolver{
    fn solve(&self, payoffs: &PayoffTensor) -> Result<SolverOutput, GridspielRlError>;
}

impl<S: JointActionSolver + ?Sized> JointActionSolver for Box<S>{
    fn solve(&self, payoffs: &PayoffTensor) -> Result<SolverOutput, GridspielRlError> {
        self.as_ref().solve(payoffs)
    }
}
