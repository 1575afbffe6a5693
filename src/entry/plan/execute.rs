use crate::app::{run_attack, run_report};
use crate::error::AppResult;

use super::types::RunPlan;

pub(crate) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    match plan {
        RunPlan::Attack(args) => run_attack(&args).await,
        RunPlan::Report(args) => run_report(&args),
    }
}
