use plotters::prelude::*;

use crate::error::{AppError, AppResult, ReportError};
use crate::results::Results;

const CHART_SIZE: (u32, u32) = (1600, 600);
const THOUSAND: u64 = 1_000;
const POINT_SIZE: u32 = 2;

/// Renders a standalone HTML page with a latency scatter chart.
///
/// The x axis is elapsed time since the first request and the y axis is
/// latency, both kept in integer units (milliseconds and microseconds) and
/// labelled as seconds and milliseconds.
pub(super) fn render(results: &Results) -> AppResult<Vec<u8>> {
    let (ok, failed) = points(results);
    let mut svg = String::new();
    draw_chart(&mut svg, &ok, &failed)
        .map_err(|err| AppError::report(ReportError::Plot { message: err }))?;
    Ok(wrap_html(&svg, results.len()).into_bytes())
}

/// Splits results into `(elapsed_ms, latency_us)` points for OK and failed hits.
fn points(results: &Results) -> (Vec<(u64, u64)>, Vec<(u64, u64)>) {
    let origin = results.iter().filter_map(|result| result.timestamp).min();
    let mut ok = Vec::new();
    let mut failed = Vec::new();
    for result in results {
        let elapsed_ms = match (origin, result.timestamp) {
            (Some(origin), Some(timestamp)) => {
                u64::try_from(timestamp.signed_duration_since(origin).num_milliseconds())
                    .unwrap_or(0)
            }
            _ => 0,
        };
        let latency_us = u64::try_from(result.latency.as_micros()).unwrap_or(u64::MAX);
        if result.is_success() {
            ok.push((elapsed_ms, latency_us));
        } else {
            failed.push((elapsed_ms, latency_us));
        }
    }
    (ok, failed)
}

fn draw_chart(
    svg: &mut String,
    ok: &[(u64, u64)],
    failed: &[(u64, u64)],
) -> Result<(), String> {
    let all = || ok.iter().chain(failed.iter());
    let x_max = all().map(|(x, _)| *x).max().unwrap_or(0).saturating_add(1);
    let y_max = all().map(|(_, y)| *y).max().unwrap_or(0).saturating_add(1);

    let root = SVGBackend::with_string(svg, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|err| err.to_string())?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Request Latency", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0u64..x_max, 0u64..y_max)
        .map_err(|err| err.to_string())?;

    chart
        .configure_mesh()
        .x_desc("Elapsed Time (s)")
        .y_desc("Latency (ms)")
        .x_label_formatter(&|ms| format_thousandths(*ms))
        .y_label_formatter(&|us| format_thousandths(*us))
        .draw()
        .map_err(|err| err.to_string())?;

    chart
        .draw_series(
            ok.iter()
                .map(|point| Circle::new(*point, POINT_SIZE, GREEN.filled())),
        )
        .map_err(|err| err.to_string())?
        .label("OK")
        .legend(|(x, y)| Circle::new((x, y), POINT_SIZE, GREEN.filled()));
    chart
        .draw_series(
            failed
                .iter()
                .map(|point| Circle::new(*point, POINT_SIZE, RED.filled())),
        )
        .map_err(|err| err.to_string())?
        .label("Error")
        .legend(|(x, y)| Circle::new((x, y), POINT_SIZE, RED.filled()));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(|err| err.to_string())?;

    root.present().map_err(|err| err.to_string())?;
    Ok(())
}

fn format_thousandths(value: u64) -> String {
    format!(
        "{}.{:03}",
        value.checked_div(THOUSAND).unwrap_or(0),
        value.checked_rem(THOUSAND).unwrap_or(0)
    )
}

fn wrap_html(svg: &str, requests: usize) -> String {
    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
<title>stress plot</title>\n</head>\n<body>\n<p>{} requests</p>\n{}\n</body>\n</html>\n",
        requests, svg
    )
}
