use eframe::egui::{self, RichText, Ui};

use crate::data::aggregate::{Insights, SummaryStats};
use crate::data::model::{Category, Field};
use crate::state::{AppState, DashboardSummary};
use crate::ui::{format, plot, table};

pub const EMPTY_VIEW_NOTICE: &str =
    "No results for those filters. Try selecting more job titles or experience levels.";

/// Render the central panel: metrics, charts, insights and the data table.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("💼 Tech Job Salary Dashboard");
    ui.label(
        "Interactive dashboard exploring tech job salaries by role, experience, and remote work.",
    );
    ui.separator();

    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore salaries  (File → Open…)");
        });
        return;
    }

    let Some(summary) = &state.summary else {
        ui.colored_label(ui.visuals().warn_fg_color, EMPTY_VIEW_NOTICE);
        return;
    };

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            metrics(ui, &summary.stats);
            ui.add_space(8.0);

            charts(ui, state, summary);
            ui.add_space(8.0);

            insights(ui, &summary.insights);
            ui.add_space(8.0);

            egui::CollapsingHeader::new("📄 View filtered data table")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    table::records_table(ui, &state.view);
                });
        });
}

fn metrics(ui: &mut Ui, stats: &SummaryStats) {
    ui.columns(3, |cols| {
        metric(&mut cols[0], "Total Jobs", stats.count.to_string());
        metric(&mut cols[1], "Average Salary (USD)", format::usd(stats.mean_salary));
        metric(&mut cols[2], "Max Salary (USD)", format::usd(stats.max_salary));
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.label(label);
        ui.label(RichText::new(value).size(28.0).strong());
    });
}

fn charts(ui: &mut Ui, state: &AppState, summary: &DashboardSummary) {
    plot::average_salary_chart(ui, state, &summary.by_title);
    ui.add_space(8.0);
    ui.columns(2, |cols| {
        plot::distribution_chart(
            &mut cols[0],
            state,
            Field::ExperienceLevel,
            &summary.by_experience,
        );
        plot::distribution_chart(&mut cols[1], state, Field::RemoteRatio, &summary.by_remote);
    });
}

fn insights(ui: &mut Ui, found: &Insights) {
    ui.heading("📌 Key Insights (based on current filters)");
    for line in insight_lines(found) {
        ui.label(format!("•  {line}"));
    }
}

/// The bullet points of the insights section.
pub fn insight_lines(found: &Insights) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(exp) = &found.top_experience {
        lines.push(format!(
            "Highest average pay (experience): {} (~{})",
            exp.key,
            format::usd_f64(exp.mean_salary)
        ));
    }
    if let Some(remote) = &found.top_remote {
        let ratio = match &remote.key {
            Category::Integer(pct) => format!("{pct}% remote"),
            other => other.to_string(),
        };
        lines.push(format!(
            "Best-paying remote ratio in this view: {ratio} (~{})",
            format::usd_f64(remote.mean_salary)
        ));
    }
    lines.push("Use the filters on the left to explore different roles and patterns.".to_string());
    lines
}
