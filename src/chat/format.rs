//! Pure reply formatters over backend payloads.

use crate::gateway::Household;

/// Summarize households into a dashboard reply: totals, per-status counts,
/// and the open-task / NIGO sums.
pub fn format_dashboard(households: &[Household]) -> String {
    let total = households.len();
    let at_risk = households.iter().filter(|h| h.status == "AT_RISK").count();
    let in_progress = households
        .iter()
        .filter(|h| h.status == "IN_PROGRESS")
        .count();

    let total_tasks: u64 = households.iter().map(|h| h.open_tasks_count).sum();
    let total_nigo: u64 = households.iter().map(|h| h.nigo_issues_count).sum();

    format!(
        "📊 Transition Dashboard\n\n\
         Total Households: {total}\n  \
         • In Progress: {in_progress}\n  \
         • At Risk: {at_risk}\n\n\
         Open Tasks: {total_tasks}\n\
         NIGO Issues: {total_nigo}\n\n\
         Use /households to see the full list."
    )
}

/// Render up to the first ten households, in the order the backend returned
/// them, with a "... and N more" suffix past ten. Never sorts.
pub fn format_household_list(households: &[Household]) -> String {
    if households.is_empty() {
        return "No households found.".to_string();
    }

    let mut lines = vec!["🏠 Households:\n".to_string()];
    for h in households.iter().take(10) {
        let marker = if h.status == "AT_RISK" { "🔴" } else { "🟢" };
        lines.push(format!(
            "{marker} {} (ID: {})\n   Advisor: {} | Tasks: {} | NIGO: {}\n",
            h.name, h.id, h.advisor_name, h.open_tasks_count, h.nigo_issues_count
        ));
    }

    if households.len() > 10 {
        lines.push(format!("\n... and {} more", households.len() - 10));
    }

    lines.join("\n")
}
