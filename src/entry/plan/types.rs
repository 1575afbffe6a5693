use crate::args::{AttackArgs, ReportArgs};

pub(in crate::entry) enum RunPlan {
    Attack(AttackArgs),
    Report(ReportArgs),
}
