use serde::{Serialize, Deserialize};




/**
 * Order of the strong-stability-preserving Runge-Kutta time integration
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RungeKuttaOrder {
    #[serde(rename = "rk1")]
    RK1,
    #[serde(rename = "rk2")]
    RK2,
    #[serde(rename = "rk3")]
    RK3,
}




// ============================================================================
impl RungeKuttaOrder {

    /**
     * The averaging weight of each sub-stage. A sub-stage forms a candidate
     * update u* by one forward-Euler application of the operator and then
     * takes (1 - b) u* + b u0, where u0 is the state saved at the start of
     * the full step. The weights below reproduce the classic SSP schemes of
     * first, second, and third order.
     */
    pub fn weights(self) -> &'static [f64] {
        match self {
            RungeKuttaOrder::RK1 => &[0.0],
            RungeKuttaOrder::RK2 => &[0.0, 0.5],
            RungeKuttaOrder::RK3 => &[0.0, 0.75, 1.0 / 3.0],
        }
    }

    pub fn num_stages(self) -> usize {
        self.weights().len()
    }
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_are_convex() {
        for order in [RungeKuttaOrder::RK1, RungeKuttaOrder::RK2, RungeKuttaOrder::RK3].iter() {
            for &b in order.weights() {
                assert!(b >= 0.0 && b <= 1.0);
            }
        }
    }

    #[test]
    fn serde_names_are_lower_case() {
        let order: RungeKuttaOrder = serde_yaml::from_str("rk2").unwrap();
        assert_eq!(order, RungeKuttaOrder::RK2);
    }
}
