pub mod background;
pub mod cli;
pub mod config;
pub mod consensus;
pub mod ctx;
pub mod error;
pub mod io;
pub mod label;
pub mod pipeline;
pub mod pool;
pub mod rank;
pub mod records;
pub mod roc;
pub mod schema;
pub mod sweep;
