use anyhow::{Error, ensure};
use charming::{
    Chart, ImageFormat, ImageRenderer,
    component::{Axis, Grid, Title},
    element::{AxisType, LineStyle, Symbol, TextStyle},
    series::Line,
};

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 800;

/// Price-plus-MACD chart rendered to PNG bytes.
///
/// The MACD panel draws the raw line in translucent cyan with green/red
/// overlays split at the zero crossing.
pub fn macd_chart(
    symbol: &str,
    closes: &[f64],
    macd: &[f64],
    dates: &[String],
) -> Result<Vec<u8>, Error> {
    ensure!(!closes.is_empty(), "closes is empty");
    ensure!(
        closes.len() == macd.len() && closes.len() == dates.len(),
        "length mismatch: closes={}, macd={}, dates={}",
        closes.len(),
        macd.len(),
        dates.len()
    );

    let (macd_bull, macd_bear) = split_by_sign(macd);
    let last_close = closes[closes.len() - 1];

    let chart = Chart::new()
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
                .text(format!("{} Closing Price", symbol.to_uppercase()))
                .left("center")
                .top("6%")
                .text_style(TextStyle::new().color("#a0a0a0").font_size(12)),
        )
        .title(
            Title::new()
                .text(format!("{} MACD", symbol.to_uppercase()))
                .left("center")
                .top("53%")
                .text_style(TextStyle::new().color("#a0a0a0").font_size(12)),
        )
        .grid(Grid::new().left("7%").right("3%").top("10%").height("36%"))
        .grid(Grid::new().left("7%").right("3%").top("58%").height("34%"))
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .grid_index(0)
                .data(dates.to_vec())
                .axis_label(charming::element::AxisLabel::new().show(false))
                .split_line(
                    charming::element::SplitLine::new()
                        .line_style(charming::element::LineStyle::new().color("#2d2f45")),
                ),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .grid_index(1)
                .data(dates.to_vec())
                .axis_label(
                    charming::element::AxisLabel::new()
                        .rotate(45)
                        .interval(9)
                        .color("#a0a0a0"),
                )
                .split_line(
                    charming::element::SplitLine::new()
                        .line_style(charming::element::LineStyle::new().color("#2d2f45")),
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
                .scale(true)
                .axis_label(charming::element::AxisLabel::new().color("#a0a0a0"))
                .split_line(
                    charming::element::SplitLine::new()
                        .line_style(charming::element::LineStyle::new().color("#2d2f45")),
                ),
        )
        .series(
            Line::new()
                .name("Close")
                .data(closes.to_vec())
                .x_axis_index(0)
                .y_axis_index(0)
                .symbol(Symbol::Circle)
                .line_style(LineStyle::new().width(1).color("#4287f5")),
        )
        .series(
            Line::new()
                .name("MACD")
                .data(macd.to_vec())
                .x_axis_index(1)
                .y_axis_index(1)
                .symbol(Symbol::None)
                .line_style(LineStyle::new().width(3).color("rgba(0,255,255,0.5)")),
        )
        .series(
            Line::new()
                .name("MACD (Bull)")
                .data(macd_bull)
                .x_axis_index(1)
                .y_axis_index(1)
                .symbol(Symbol::None)
                .line_style(LineStyle::new().width(2).color("#00d084")),
        )
        .series(
            Line::new()
                .name("MACD (Bear)")
                .data(macd_bear)
                .x_axis_index(1)
                .y_axis_index(1)
                .symbol(Symbol::None)
                .line_style(LineStyle::new().width(2).color("#ff4d4f")),
        );

    let mut renderer = ImageRenderer::new(WIDTH, HEIGHT);
    let png_bytes = renderer.render_format(ImageFormat::Png, &chart)?;
    Ok(png_bytes)
}

/// Mask `values` into two NaN-gapped series split at zero. On a sign flip
/// the previous point is copied into the incoming side so the colored
/// segments stay connected.
fn split_by_sign(values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = values.len();
    let mut bull = vec![f64::NAN; n];
    let mut bear = vec![f64::NAN; n];

    if n == 0 {
        return (bull, bear);
    }

    let mut prev_bull = values[0] >= 0.0;
    if prev_bull {
        bull[0] = values[0];
    } else {
        bear[0] = values[0];
    }

    for i in 1..n {
        let is_bull = values[i] >= 0.0;

        if is_bull {
            bull[i] = values[i];
            if is_bull != prev_bull {
                bull[i - 1] = values[i - 1];
            }
        } else {
            bear[i] = values[i];
            if is_bull != prev_bull {
                bear[i - 1] = values[i - 1];
            }
        }

        prev_bull = is_bull;
    }

    (bull, bear)
}
