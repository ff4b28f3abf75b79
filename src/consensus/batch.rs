use crate::consensus::aggregate::ContingencyTable;
use crate::consensus::kernel::PValueKernel;
use crate::error::{ConsensusError, Result};

#[cfg(feature = "mt")]
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PvaluePair {
    // kernel(a_up, b_up, a_down, b_down)
    pub up: f64,
    // kernel(b_up, a_up, b_down, a_down)
    pub down: f64,
}

pub fn evaluate<K>(kernel: &K, tables: &[ContingencyTable]) -> Result<Vec<PvaluePair>>
where
    K: PValueKernel + ?Sized,
{
    #[cfg(feature = "mt")]
    {
        tables.par_iter().map(|t| evaluate_one(kernel, t)).collect()
    }

    #[cfg(not(feature = "mt"))]
    {
        evaluate_sequential(kernel, tables)
    }
}

pub fn evaluate_sequential<K>(kernel: &K, tables: &[ContingencyTable]) -> Result<Vec<PvaluePair>>
where
    K: PValueKernel + ?Sized,
{
    tables.iter().map(|t| evaluate_one(kernel, t)).collect()
}

fn evaluate_one<K>(kernel: &K, table: &ContingencyTable) -> Result<PvaluePair>
where
    K: PValueKernel + ?Sized,
{
    let [a, b, c, d] = table.cells();
    let up = checked(kernel.pvalue(a, b, c, d), table)?;
    let down = checked(kernel.pvalue(b, a, d, c), table)?;
    Ok(PvaluePair { up, down })
}

fn checked(value: f64, table: &ContingencyTable) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConsensusError::Kernel {
            entity_id: table.entity_id.clone(),
            value,
        })
    }
}

#[cfg(feature = "mt")]
pub fn thread_pool(threads: usize) -> anyhow::Result<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if threads > 0 {
        builder = builder.num_threads(threads);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build thread pool: {}", e))
}
