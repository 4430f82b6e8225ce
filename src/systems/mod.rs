mod bears;
mod growth;
mod labor_market;
mod lumberjacks;
mod wildlife_policy;

pub use bears::BearSystem;
pub use growth::GrowthSystem;
pub use labor_market::LaborMarketSystem;
pub use lumberjacks::LumberjackSystem;
pub use wildlife_policy::WildlifePolicySystem;
