use crate::error::GridspielRlError;
use crate::solver::{maximize, JointActionSolver, PayoffTensor, SolverOutput};

/// Two player correlated equilibrium maximising sum of expected payoffs.
///
/// With `coarse` set the weaker coarse correlated equilibrium is computed: players only
/// compare with deviations chosen before the recommendation is revealed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct CorrelatedEqSolver{
    coarse: bool,
}

impl CorrelatedEqSolver{
    pub fn new(coarse: bool) -> Self{
        Self{coarse}
    }

    pub fn is_coarse(&self) -> bool{
        self.coarse
    }

    /// Incentive constraints `sum x * (deviation - recommended) <= 0` over joint distribution `x`.
    fn incentive_constraints(&self, payoffs: &PayoffTensor, rows: usize, cols: usize) -> Vec<Vec<f64>>{
        let idx = |i: usize, j: usize| i * cols + j;
        let a = |i: usize, j: usize| payoffs.payoff(0, idx(i, j));
        let b = |i: usize, j: usize| payoffs.payoff(1, idx(i, j));
        let mut constraints = Vec::new();
        if self.coarse{
            for dev in 0..rows{
                let mut row = vec![0.0; rows * cols];
                for i in 0..rows{
                    for j in 0..cols{
                        row[idx(i, j)] = a(dev, j) - a(i, j);
                    }
                }
                constraints.push(row);
            }
            for dev in 0..cols{
                let mut row = vec![0.0; rows * cols];
                for i in 0..rows{
                    for j in 0..cols{
                        row[idx(i, j)] = b(i, dev) - b(i, j);
                    }
                }
                constraints.push(row);
            }
        } else {
            for i in 0..rows{
                for dev in (0..rows).filter(|d| *d != i){
                    let mut row = vec![0.0; rows * cols];
                    for j in 0..cols{
                        row[idx(i, j)] = a(dev, j) - a(i, j);
                    }
                    constraints.push(row);
                }
            }
            for j in 0..cols{
                for dev in (0..cols).filter(|d| *d != j){
                    let mut row = vec![0.0; rows * cols];
                    for i in 0..rows{
                        row[idx(i, j)] = b(i, dev) - b(i, j);
                    }
                    constraints.push(row);
                }
            }
        }
        constraints
    }
}

impl JointActionSolver for CorrelatedEqSolver{
    fn solve(&self, payoffs: &PayoffTensor) -> Result<SolverOutput, GridspielRlError> {
        if payoffs.num_players() != 2{
            return Err(GridspielRlError::Solver {
                explanation: format!("correlated equilibrium is solved for 2 players, got {}", payoffs.num_players())
            })
        }
        let (rows, cols) = (payoffs.num_actions()[0], payoffs.num_actions()[1]);
        let size = rows * cols;
        if size == 0{
            return Err(GridspielRlError::Solver { explanation: "empty action set".into() })
        }

        // Shifting payoffs does not change incentives, positive objective makes the
        // probability constraint tight.
        let welfare: Vec<f64> = (0..size).map(|k| payoffs.payoff(0, k) + payoffs.payoff(1, k)).collect();
        let min_welfare = welfare.iter().copied().fold(f64::INFINITY, f64::min);
        let shift = (1.0 - min_welfare).max(0.0);
        let objective: Vec<f64> = welfare.iter().map(|w| w + shift).collect();

        let mut constraints = self.incentive_constraints(payoffs, rows, cols);
        let mut bounds = vec![0.0; constraints.len()];
        constraints.push(vec![1.0; size]);
        bounds.push(1.0);

        let x = maximize(&objective, &constraints, &bounds)
            .map_err(|e| GridspielRlError::Solver { explanation: format!("{e:?}") })?;
        let x: Vec<f64> = x.iter().map(|v| v.max(0.0)).collect();
        let total: f64 = x.iter().sum();
        let joint: Vec<f64> = if total > 1e-12{
            x.iter().map(|v| v / total).collect()
        } else {
            vec![1.0 / size as f64; size]
        };

        let mut marginals = vec![vec![0.0; rows], vec![0.0; cols]];
        let mut values = vec![0.0; 2];
        for i in 0..rows{
            for j in 0..cols{
                let k = i * cols + j;
                marginals[0][i] += joint[k];
                marginals[1][j] += joint[k];
                values[0] += joint[k] * payoffs.payoff(0, k);
                values[1] += joint[k] * payoffs.payoff(1, k);
            }
        }
        #[cfg(feature = "log_trace")]
        log::trace!("Correlated equilibrium (coarse: {}): {:?}, values {:?}", self.coarse, joint, values);
        Ok(SolverOutput{marginals, values})
    }
}

#[cfg(test)]
mod tests{
    use crate::solver::{CorrelatedEqSolver, JointActionSolver, PayoffTensor};

    fn chicken() -> PayoffTensor{
        // actions: 0 swerve, 1 straight
        PayoffTensor::from_payoffs(vec![2, 2], vec![
            vec![6.0, 2.0, 7.0, 0.0],
            vec![6.0, 7.0, 2.0, 0.0],
        ]).unwrap()
    }

    #[test]
    fn chicken_correlated_equilibrium(){
        let out = CorrelatedEqSolver::new(false).solve(&chicken()).unwrap();
        assert!((out.values[0] - 5.25).abs() < 1e-6);
        assert!((out.values[1] - 5.25).abs() < 1e-6);
        assert!((out.marginals[0][0] - 0.75).abs() < 1e-6);
        assert!((out.marginals[1][1] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn coarse_is_not_worse(){
        let ce = CorrelatedEqSolver::new(false).solve(&chicken()).unwrap();
        let cce = CorrelatedEqSolver::new(true).solve(&chicken()).unwrap();
        let sum = |v: &[f64]| v.iter().sum::<f64>();
        assert!(sum(&cce.values) >= sum(&ce.values) - 1e-6);
        assert!((sum(&cce.marginals[0]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rectangular_coordination(){
        let payoffs = vec![0.0, -1.0, -1.0, -1.0, -1.0, 3.0];
        let tensor = PayoffTensor::from_payoffs(vec![2, 3], vec![payoffs.clone(), payoffs]).unwrap();
        let out = CorrelatedEqSolver::default().solve(&tensor).unwrap();
        assert!((out.marginals[0][1] - 1.0).abs() < 1e-6);
        assert!((out.marginals[1][2] - 1.0).abs() < 1e-6);
        assert!((out.values[0] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn wrong_shapes(){
        assert!(PayoffTensor::from_payoffs(vec![2, 2], vec![vec![0.0; 3], vec![0.0; 4]]).is_err());
        let three = PayoffTensor::zeros(vec![2, 2, 2]);
        assert!(CorrelatedEqSolver::default().solve(&three).is_err());
    }
}
