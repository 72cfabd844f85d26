use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use crate::color::{remainder_shade, to_color32};
use crate::engine::sync::ChartModel;

// ---------------------------------------------------------------------------
// Exposure chart (central panel)
// ---------------------------------------------------------------------------

/// Draw the chart segments as one stacked horizontal bar spanning 0–100 %.
pub fn exposure_chart(ui: &mut Ui, chart: &ChartModel) {
    let [exposed, remainder] = chart.segments;

    let exposed_chart = BarChart::new(vec![Bar::new(0.0, exposed).width(0.6)])
        .name("Exposed")
        .color(to_color32(chart.color))
        .horizontal();
    let remainder_chart = BarChart::new(vec![Bar::new(0.0, remainder).width(0.6)])
        .name("Not exposed")
        .color(remainder_shade(chart.color))
        .horizontal()
        .stack_on(&[&exposed_chart]);

    Plot::new("exposure_chart")
        .legend(egui_plot::Legend::default())
        .height(120.0)
        .include_x(0.0)
        .include_x(100.0)
        .x_axis_label("% of population")
        .show_y(false)
        .show_axes([true, false])
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(exposed_chart);
            plot_ui.bar_chart(remainder_chart);
        });
}
