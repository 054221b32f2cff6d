use eframe::egui::{Stroke, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Plot};

use crate::data::aggregate::{GroupDistribution, GroupMean};
use crate::data::model::Field;
use crate::state::AppState;
use crate::ui::format;

const CHART_HEIGHT: f32 = 320.0;

/// Axis labels for charts whose x positions are group indices.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

fn usd_axis(mark: GridMark, _range: &std::ops::RangeInclusive<f64>) -> String {
    if mark.value < 0.0 {
        String::new()
    } else {
        format::usd_f64(mark.value)
    }
}

// ---------------------------------------------------------------------------
// Average salary by job title (bar chart)
// ---------------------------------------------------------------------------

pub fn average_salary_chart(ui: &mut Ui, state: &AppState, by_title: &[GroupMean]) {
    ui.strong("Average Salary by Job Title");

    let bars: Vec<Bar> = by_title
        .iter()
        .enumerate()
        .map(|(i, group)| {
            Bar::new(i as f64, group.mean_salary)
                .name(group.key.to_string())
                .fill(state.color_for(Field::JobTitle, &group.key))
                .width(0.7)
        })
        .collect();
    let labels = by_title.iter().map(|g| g.key.to_string()).collect();

    let chart = BarChart::new(bars)
        .name("Average salary")
        .element_formatter(Box::new(|bar, _chart| {
            format!("{}\n{}", bar.name, format::usd_f64(bar.value))
        }));

    Plot::new("avg_salary_by_title")
        .height(CHART_HEIGHT)
        .x_axis_formatter(category_axis(labels))
        .y_axis_formatter(usd_axis)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

// ---------------------------------------------------------------------------
// Salary distribution per group (box plots)
// ---------------------------------------------------------------------------

pub fn distribution_chart(ui: &mut Ui, state: &AppState, field: Field, groups: &[GroupDistribution]) {
    ui.strong(format!("Salary Distribution by {}", field.label()));

    let boxes: Vec<BoxElem> = groups
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let color = state.color_for(field, &g.key);
            BoxElem::new(
                i as f64,
                BoxSpread::new(g.lower_whisker, g.q1, g.median, g.q3, g.upper_whisker),
            )
            .name(format!("{} (n = {})", g.key, g.count))
            .fill(color.linear_multiply(0.3))
            .stroke(Stroke::new(1.5, color))
            .box_width(0.6)
        })
        .collect();
    let labels = groups.iter().map(|g| g.key.to_string()).collect();

    let plot = BoxPlot::new(boxes)
        .name(field.label())
        .element_formatter(Box::new(|elem, _plot| {
            let s = &elem.spread;
            format!(
                "{}\nmax: {}\nQ3: {}\nmedian: {}\nQ1: {}\nmin: {}",
                elem.name,
                format::usd_f64(s.upper_whisker),
                format::usd_f64(s.quartile3),
                format::usd_f64(s.median),
                format::usd_f64(s.quartile1),
                format::usd_f64(s.lower_whisker),
            )
        }));

    Plot::new(("salary_distribution", field))
        .height(CHART_HEIGHT)
        .x_axis_formatter(category_axis(labels))
        .y_axis_formatter(usd_axis)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(plot);
        });
}
