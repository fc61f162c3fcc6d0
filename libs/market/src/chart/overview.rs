use anyhow::{Error, ensure};
use charming::{
    Chart, HtmlRenderer,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisType, LineStyle, LineStyleType, MarkLine, MarkLineData, MarkLineVariant, Symbol,
        TextStyle,
    },
    series::Line,
};

use crate::indicators::macd::MacdSeries;

/// Price, RSI and MACD panels rendered as a static HTML page.
///
/// RSI gaps (the warm-up run) become NaN entries, which the chart leaves
/// blank; the 30/70 oversold/overbought thresholds are dashed mark lines.
pub fn overview_chart(
    symbol: &str,
    closes: &[f64],
    rsi: &[Option<f64>],
    macd: &MacdSeries,
    dates: &[String],
) -> Result<String, Error> {
    ensure!(!closes.is_empty(), "closes is empty");
    ensure!(
        closes.len() == rsi.len() && closes.len() == macd.macd.len() && closes.len() == dates.len(),
        "length mismatch: closes={}, rsi={}, macd={}, dates={}",
        closes.len(),
        rsi.len(),
        macd.macd.len(),
        dates.len()
    );
    if let Some(signal) = &macd.signal {
        ensure!(
            signal.len() == closes.len(),
            "length mismatch: closes={}, signal={}",
            closes.len(),
            signal.len()
        );
    }

    let rsi_values: Vec<f64> = rsi.iter().map(|v| v.unwrap_or(f64::NAN)).collect();
    let last_close = closes[closes.len() - 1];

    let mut chart = Chart::new()
        .background_color("#0b0c17")
        .title(
            Title::new()
                .text(format!("{} | ${:.2}", symbol.to_uppercase(), last_close))
                .left("center")
                .top("1%")
                .text_style(TextStyle::new().color("#ffffff").font_size(16)),
        )
        .title(
            Title::new()
                .text(format!("{} RSI", symbol.to_uppercase()))
                .left("center")
                .top("36%")
                .text_style(TextStyle::new().color("#a0a0a0").font_size(12)),
        )
        .title(
            Title::new()
                .text(format!("{} MACD", symbol.to_uppercase()))
                .left("center")
                .top("68%")
                .text_style(TextStyle::new().color("#a0a0a0").font_size(12)),
        )
        .legend(Legend::new().top("4%"))
        .grid(Grid::new().left("7%").right("3%").top("8%").height("24%"))
        .grid(Grid::new().left("7%").right("3%").top("40%").height("24%"))
        .grid(Grid::new().left("7%").right("3%").top("72%").height("22%"))
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .grid_index(0)
                .data(dates.to_vec())
                .axis_label(charming::element::AxisLabel::new().show(false)),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .grid_index(1)
                .data(dates.to_vec())
                .axis_label(charming::element::AxisLabel::new().show(false)),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .grid_index(2)
                .data(dates.to_vec())
                .axis_label(
                    charming::element::AxisLabel::new()
                        .rotate(45)
                        .interval(9)
                        .color("#a0a0a0"),
                ),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .grid_index(0)
                .scale(true)
                .axis_label(charming::element::AxisLabel::new().color("#a0a0a0"))
                .split_line(
                    charming::element::SplitLine::new()
                        .line_style(charming::element::LineStyle::new().color("#2d2f45")),
                ),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .grid_index(1)
                .min(0.0)
                .max(100.0)
                .axis_label(charming::element::AxisLabel::new().color("#a0a0a0"))
                .split_line(
                    charming::element::SplitLine::new()
                        .line_style(charming::element::LineStyle::new().color("#2d2f45")),
                ),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .grid_index(2)
                .scale(true)
                .axis_label(charming::element::AxisLabel::new().color("#a0a0a0"))
                .split_line(
                    charming::element::SplitLine::new()
                        .line_style(charming::element::LineStyle::new().color("#2d2f45")),
                ),
        )
        .series(
            Line::new()
                .name("Closing Price")
                .data(closes.to_vec())
                .x_axis_index(0)
                .y_axis_index(0)
                .symbol(Symbol::None)
                .line_style(LineStyle::new().width(2).color("#4287f5")),
        )
        .series(
            Line::new()
                .name("RSI")
                .data(rsi_values)
                .x_axis_index(1)
                .y_axis_index(1)
                .symbol(Symbol::None)
                .line_style(LineStyle::new().width(2).color("#b667f1"))
                .mark_line(
                    MarkLine::new()
                        .line_style(LineStyle::new().type_(LineStyleType::Dashed).width(2))
                        .data(vec![
                            MarkLineVariant::Simple(
                                MarkLineData::new().name("Overbought").y_axis(70),
                            ),
                            MarkLineVariant::Simple(
                                MarkLineData::new().name("Oversold").y_axis(30),
                            ),
                        ]),
                ),
        )
        .series(
            Line::new()
                .name("MACD")
                .data(macd.macd.clone())
                .x_axis_index(2)
                .y_axis_index(2)
                .symbol(Symbol::None)
                .line_style(LineStyle::new().width(2).color("#4287f5")),
        );

    if let Some(signal) = &macd.signal {
        chart = chart.series(
            Line::new()
                .name("Signal Line")
                .data(signal.clone())
                .x_axis_index(2)
                .y_axis_index(2)
                .symbol(Symbol::None)
                .line_style(LineStyle::new().width(2).color("#FF6400")),
        );
    }

    let mut renderer = HtmlRenderer::new(format!("{} indicators", symbol.to_uppercase()), 1000, 950);
    let html = renderer.render(&chart)?;
    Ok(html)
}
