//! Exact-test kernel abstraction.

pub trait PValueKernel: Send + Sync {
    fn pvalue(&self, a: u64, b: u64, c: u64, d: u64) -> f64;
}

impl<F> PValueKernel for F
where
    F: Fn(u64, u64, u64, u64) -> f64 + Send + Sync,
{
    fn pvalue(&self, a: u64, b: u64, c: u64, d: u64) -> f64 {
        self(a, b, c, d)
    }
}

#[derive(Debug, Clone)]
pub struct FastFisher {
    ln_fact: Vec<f64>,
}

impl FastFisher {
    pub const DEFAULT_CAPACITY: usize = 44_000;

    pub fn new(capacity: usize) -> Self {
        let mut ln_fact = Vec::with_capacity(capacity + 1);
        ln_fact.push(0.0);
        let mut acc = 0.0f64;
        for i in 1..=capacity {
            acc += (i as f64).ln();
            ln_fact.push(acc);
        }
        Self { ln_fact }
    }

    fn ln_factorial(&self, n: u64) -> f64 {
        match self.ln_fact.get(n as usize) {
            Some(v) => *v,
            None => ln_factorial_stirling(n as f64),
        }
    }

    fn ln_choose(&self, n: u64, k: u64) -> f64 {
        self.ln_factorial(n) - self.ln_factorial(k) - self.ln_factorial(n - k)
    }

    fn ln_pmf(&self, k: u64, row1: u64, col1: u64, total: u64) -> f64 {
        self.ln_choose(col1, k) + self.ln_choose(total - col1, row1 - k)
            - self.ln_choose(total, row1)
    }
}

impl Default for FastFisher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl PValueKernel for FastFisher {
    fn pvalue(&self, a: u64, b: u64, c: u64, d: u64) -> f64 {
        let total = a + b + c + d;
        let row1 = a + b;
        let col1 = a + c;
        let max_k = row1.min(col1);
        // Past the mode the tail terms only shrink.
        let mode = ((row1 + 1) as f64 * (col1 + 1) as f64 / (total + 2) as f64).floor() as u64;

        let mut p = 0.0f64;
        for k in a..=max_k {
            let term = self.ln_pmf(k, row1, col1, total).exp();
            p += term;
            if k > mode && term <= p * 1e-17 {
                break;
            }
        }
        p.clamp(0.0, 1.0)
    }
}

fn ln_factorial_stirling(n: f64) -> f64 {
    n * n.ln() - n + 0.5 * (2.0 * std::f64::consts::PI * n).ln() + 1.0 / (12.0 * n)
        - 1.0 / (360.0 * n * n * n)
}
