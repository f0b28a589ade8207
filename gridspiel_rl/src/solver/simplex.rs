//! Dense tableau simplex for small linear programs of joint action solvers.

const EPS: f64 = 1e-9;
const MAX_PIVOTS: usize = 100_000;

#[derive(Debug, Clone, PartialEq)]
pub enum SimplexError{
    /// Right hand side must be non negative so that slack basis is feasible.
    NegativeBound(usize),
    Unbounded,
    IterationLimit,
}

/// Maximises `c·x` subject to `a x <= b`, `x >= 0`, with `b >= 0`.
///
/// Bland's rule is used for pivoting, so degenerate programs terminate.
pub fn maximize(c: &[f64], a: &[Vec<f64>], b: &[f64]) -> Result<Vec<f64>, SimplexError>{
    let n = c.len();
    let m = a.len();
    if let Some(i) = b.iter().position(|v| *v < 0.0){
        return Err(SimplexError::NegativeBound(i))
    }
    let width = n + m + 1;
    // rows 0..m are constraints, row m is objective (reduced costs)
    let mut tableau = vec![vec![0.0; width]; m + 1];
    for (i, row) in a.iter().enumerate(){
        for (j, v) in row.iter().enumerate().take(n){
            tableau[i][j] = *v;
        }
        tableau[i][n + i] = 1.0;
        tableau[i][width - 1] = b[i];
    }
    for j in 0..n{
        tableau[m][j] = -c[j];
    }
    let mut basis: Vec<usize> = (n..n + m).collect();

    for _ in 0..MAX_PIVOTS{
        let entering = match (0..n + m).find(|j| tableau[m][*j] < -EPS){
            Some(j) => j,
            None => {
                let mut x = vec![0.0; n];
                for (i, var) in basis.iter().enumerate(){
                    if *var < n{
                        x[*var] = tableau[i][width - 1];
                    }
                }
                return Ok(x)
            }
        };
        let mut leaving: Option<(usize, f64)> = None;
        for i in 0..m{
            let coefficient = tableau[i][entering];
            if coefficient > EPS{
                let ratio = tableau[i][width - 1] / coefficient;
                leaving = match leaving{
                    None => Some((i, ratio)),
                    Some((r, best)) => {
                        if ratio < best - EPS || (ratio <= best + EPS && basis[i] < basis[r]){
                            Some((i, ratio))
                        } else {
                            Some((r, best))
                        }
                    }
                };
            }
        }
        let (pivot_row, _) = leaving.ok_or(SimplexError::Unbounded)?;
        pivot(&mut tableau, pivot_row, entering);
        basis[pivot_row] = entering;
    }
    Err(SimplexError::IterationLimit)
}

fn pivot(tableau: &mut [Vec<f64>], row: usize, col: usize){
    let p = tableau[row][col];
    for v in tableau[row].iter_mut(){
        *v /= p;
    }
    let pivot_row = tableau[row].clone();
    for (i, r) in tableau.iter_mut().enumerate(){
        if i == row{
            continue
        }
        let factor = r[col];
        if factor.abs() > 0.0{
            for (v, pv) in r.iter_mut().zip(pivot_row.iter()){
                *v -= factor * pv;
            }
        }
    }
}

#[cfg(test)]
mod tests{
    use crate::solver::simplex::{maximize, SimplexError};

    #[test]
    fn textbook_program(){
        // max 3x + 5y, x <= 4, 2y <= 12, 3x + 2y <= 18 -> (2, 6)
        let x = maximize(
            &[3.0, 5.0],
            &[vec![1.0, 0.0], vec![0.0, 2.0], vec![3.0, 2.0]],
            &[4.0, 12.0, 18.0]
        ).unwrap();
        assert!((x[0] - 2.0).abs() < 1e-9);
        assert!((x[1] - 6.0).abs() < 1e-9);
    }

    #[test]
    fn unbounded_and_infeasible_start(){
        assert_eq!(maximize(&[1.0], &[vec![-1.0]], &[1.0]), Err(SimplexError::Unbounded));
        assert_eq!(maximize(&[1.0], &[vec![1.0]], &[-1.0]), Err(SimplexError::NegativeBound(0)));
    }
}
