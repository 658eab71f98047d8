//! Command handlers -- one module per subcommand

pub mod analyze;
pub mod collect;
pub mod normalize;
pub mod run;
pub mod store;
