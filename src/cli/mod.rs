//! CLI workflows, decoupled from argument parsing

pub mod orchestration;

pub use orchestration::{load_branches, plan_release, BranchSnapshot, PlanArgs, ReleasePlan};
