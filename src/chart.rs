// src/chart.rs
//! Plotly-compatible figure descriptions for the donut + trend pair.
//!
//! The rendering layer hands `ChartPayload` straight to `Plotly.react`; the
//! crate never draws anything itself.

use serde::Serialize;

use crate::selector::YearSelector;
use crate::slice::YearSlice;
use crate::source::{Palette, Source};

const PIE_HOLE: f64 = 0.5;
const TRANSITION_MS: u32 = 1000;
/// The donut takes the left 30 % of the figure, the trend the rest.
const PIE_DOMAIN_X: [f64; 2] = [0.0, 0.3];
const TREND_DOMAIN_X: [f64; 2] = [0.35, 1.0];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartPayload {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie(PieTrace),
    Scatter(ScatterTrace),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub hole: f64,
    pub marker: PieMarker,
    pub hoverinfo: String,
    pub textinfo: String,
    pub domain: Domain,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieMarker {
    pub colors: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Domain {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub x: Vec<i32>,
    pub y: Vec<f64>,
    pub mode: String,
    pub name: String,
    pub hoverinfo: String,
    pub marker: ScatterMarker,
    pub xaxis: String,
    pub yaxis: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScatterMarker {
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Layout {
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub showlegend: bool,
    pub transition: Transition,
    pub annotations: Vec<Annotation>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Axis {
    pub title: AxisTitle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisTitle {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Transition {
    pub duration: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub showarrow: bool,
    pub xref: String,
    pub yref: String,
    pub x: f64,
    pub y: f64,
    pub font: Font,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Font {
    pub size: u32,
}

impl Annotation {
    fn paper(text: impl Into<String>, x: f64, y: f64, size: u32) -> Self {
        Self {
            text: text.into(),
            showarrow: false,
            xref: "paper".into(),
            yref: "paper".into(),
            x,
            y,
            font: Font { size },
        }
    }
}

fn pie_trace(slice: &YearSlice<'_>, palette: &Palette) -> PieTrace {
    PieTrace {
        labels: Source::ALL.iter().map(|s| s.label().to_string()).collect(),
        values: slice.values.to_vec(),
        hole: PIE_HOLE,
        marker: PieMarker {
            colors: palette.colors(),
        },
        hoverinfo: "label".into(),
        textinfo: "percent".into(),
        domain: Domain {
            x: PIE_DOMAIN_X,
            y: [0.0, 1.0],
        },
    }
}

fn trend_trace(slice: &YearSlice<'_>, source: Source, palette: &Palette) -> ScatterTrace {
    ScatterTrace {
        x: slice.trend_years(),
        y: slice.trend_column(source),
        mode: "lines+markers".into(),
        name: source.column_name().into(),
        hoverinfo: "name+y".into(),
        marker: ScatterMarker {
            color: palette.color(source).into(),
        },
        xaxis: "x".into(),
        yaxis: "y".into(),
    }
}

/// Donut of the selected year followed by one trend line per source.
pub fn build_charts(slice: &YearSlice<'_>, palette: &Palette) -> ChartPayload {
    let mut data = Vec::with_capacity(Source::COUNT + 1);
    data.push(Trace::Pie(pie_trace(slice, palette)));
    for s in Source::ALL {
        data.push(Trace::Scatter(trend_trace(slice, s, palette)));
    }

    let layout = Layout {
        xaxis: Axis {
            title: AxisTitle {
                text: "Years".into(),
            },
            domain: Some(TREND_DOMAIN_X),
        },
        yaxis: Axis {
            title: AxisTitle {
                text: "% Share".into(),
            },
            domain: None,
        },
        showlegend: false,
        transition: Transition {
            duration: TRANSITION_MS,
        },
        annotations: vec![
            Annotation::paper("Proportion of Sources", 0.055, 1.2, 20),
            Annotation::paper("Trend of Sources", 0.75, 1.2, 20),
            // year label inside the donut hole
            Annotation::paper(slice.year.to_string(), 0.108, 0.5, 27),
        ],
    };

    ChartPayload { data, layout }
}

/// Everything a page needs for one render: headings, slider and figure.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardView {
    pub title: String,
    pub attribution: String,
    pub selector: YearSelector,
    pub figure: ChartPayload,
}
