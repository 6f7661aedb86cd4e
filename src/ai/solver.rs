//! Two-player zero-sum matrix game solving

/// Mixed strategy for the row player and the game value it achieves
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixSolution {
    pub row_strategy: Vec<f64>,
    pub value: f64,
}

pub trait MatrixGameSolver {
    /// `payoff[i][j]` is the outcome when row `i` meets column `j`. The flags
    /// say whether each player wants that outcome large or small.
    fn solve(&self, payoff: &[Vec<f64>], maximize_rows: bool, maximize_cols: bool) -> MatrixSolution;
}

/// Regret matching+ self-play with linearly weighted strategy averaging
#[derive(Debug, Clone)]
pub struct RegretMatching {
    pub iterations: usize,
}

impl Default for RegretMatching {
    fn default() -> Self {
        Self { iterations: 1000 }
    }
}

impl MatrixGameSolver for RegretMatching {
    fn solve(&self, payoff: &[Vec<f64>], maximize_rows: bool, maximize_cols: bool) -> MatrixSolution {
        let rows = payoff.len();
        let cols = payoff.first().map_or(0, |row| row.len());

        if rows == 0 {
            return MatrixSolution { row_strategy: Vec::new(), value: 0.0 };
        }
        if cols == 0 {
            return MatrixSolution { row_strategy: vec![1.0 / rows as f64; rows], value: 0.0 };
        }

        let row_sign = if maximize_rows { 1.0 } else { -1.0 };
        let col_sign = if maximize_cols { 1.0 } else { -1.0 };

        let mut row_regrets = vec![0.0; rows];
        let mut col_regrets = vec![0.0; cols];
        let mut row_sum = vec![0.0; rows];
        let mut col_sum = vec![0.0; cols];

        for t in 1..=self.iterations {
            let row_policy = regret_policy(&row_regrets);
            let col_policy = regret_policy(&col_regrets);

            let row_utils: Vec<f64> = (0..rows)
                .map(|i| row_sign * (0..cols).map(|j| col_policy[j] * payoff[i][j]).sum::<f64>())
                .collect();
            let col_utils: Vec<f64> = (0..cols)
                .map(|j| col_sign * (0..rows).map(|i| row_policy[i] * payoff[i][j]).sum::<f64>())
                .collect();

            update_regrets(&mut row_regrets, &row_policy, &row_utils);
            update_regrets(&mut col_regrets, &col_policy, &col_utils);

            let weight = t as f64;
            for (sum, p) in row_sum.iter_mut().zip(&row_policy) {
                *sum += weight * p;
            }
            for (sum, p) in col_sum.iter_mut().zip(&col_policy) {
                *sum += weight * p;
            }
        }

        let row_strategy = normalize(&row_sum);
        let col_strategy = normalize(&col_sum);

        let value = (0..rows)
            .map(|i| (0..cols).map(|j| row_strategy[i] * col_strategy[j] * payoff[i][j]).sum::<f64>())
            .sum();

        MatrixSolution { row_strategy, value }
    }
}

/// Play in proportion to positive regret, uniformly when there is none
fn regret_policy(regrets: &[f64]) -> Vec<f64> {
    let positive: Vec<f64> = regrets.iter().map(|r| r.max(0.0)).collect();
    normalize(&positive)
}

fn update_regrets(regrets: &mut [f64], policy: &[f64], utils: &[f64]) {
    let expected: f64 = policy.iter().zip(utils).map(|(p, u)| p * u).sum();
    for (regret, u) in regrets.iter_mut().zip(utils) {
        *regret = (*regret + u - expected).max(0.0);
    }
}

fn normalize(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        weights.iter().map(|w| w / total).collect()
    } else {
        vec![1.0 / weights.len() as f64; weights.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 0.05;

    #[test]
    fn test_rock_paper_scissors_is_uniform() {
        let payoff = vec![
            vec![0.0, -1.0, 1.0],
            vec![1.0, 0.0, -1.0],
            vec![-1.0, 1.0, 0.0],
        ];
        let solution = RegretMatching::default().solve(&payoff, true, false);
        for p in &solution.row_strategy {
            assert!((p - 1.0 / 3.0).abs() < EPS);
        }
        assert!(solution.value.abs() < EPS);
    }

    #[test]
    fn test_dominant_row() {
        let payoff = vec![vec![3.0, 2.0], vec![1.0, 0.0]];
        let solution = RegretMatching::default().solve(&payoff, true, false);
        assert!(solution.row_strategy[0] > 1.0 - EPS);
        // column player minimizes, so settles on the second column
        assert!((solution.value - 2.0).abs() < EPS);
    }

    #[test]
    fn test_minimizing_rows() {
        let payoff = vec![vec![3.0, 3.0], vec![1.0, 1.0]];
        let solution = RegretMatching::default().solve(&payoff, false, true);
        assert!(solution.row_strategy[1] > 1.0 - EPS);
        assert!((solution.value - 1.0).abs() < EPS);
    }

    #[test]
    fn test_matching_pennies() {
        let payoff = vec![vec![1.0, -1.0], vec![-1.0, 1.0]];
        let solution = RegretMatching::default().solve(&payoff, true, false);
        assert!((solution.row_strategy[0] - 0.5).abs() < EPS);
    }

    #[test]
    fn test_degenerate_shapes() {
        let solver = RegretMatching::default();
        assert!(solver.solve(&[], true, false).row_strategy.is_empty());

        let solution = solver.solve(&[vec![], vec![]], true, false);
        assert_eq!(solution.row_strategy, vec![0.5, 0.5]);
    }
}
